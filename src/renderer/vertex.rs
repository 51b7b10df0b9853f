//! Vertex type and palette for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in viewport pixels with a straight-alpha RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Byte stride of one vertex in a vertex buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// View a vertex list as raw bytes for upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for game elements
pub mod colors {
    /// Translucent fill drawn over the previous frame, leaving motion trails
    pub const BACKGROUND_FADE: [f32; 4] = [0.0, 10.0 / 255.0, 30.0 / 255.0, 0.2];

    pub const TARGET_RED: [f32; 4] = [1.0, 0x44 as f32 / 255.0, 0x44 as f32 / 255.0, 1.0];
    pub const TARGET_ORANGE: [f32; 4] = [1.0, 0x88 as f32 / 255.0, 0x44 as f32 / 255.0, 1.0];
    pub const TARGET_MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    pub const SPECIAL_HALO: [f32; 4] = [1.0, 1.0, 0.0, 0.8];
    pub const EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PUPIL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    // Explosion gradient, center to edge
    pub const EXPLOSION_CORE: [f32; 4] = [1.0, 1.0, 100.0 / 255.0, 0.8];
    pub const EXPLOSION_MID: [f32; 4] = [1.0, 100.0 / 255.0, 0.0, 0.6];
    pub const EXPLOSION_EDGE: [f32; 4] = [1.0, 0.0, 0.0, 0.0];

    pub const CROSSHAIR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const CROSSHAIR_DOT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const CROSSHAIR_GLOW: [f32; 4] = [1.0, 0.0, 0.0, 0.3];

    // Floating score text
    pub const POINTS_BIG: [f32; 4] = [1.0, 0.8, 0.0, 1.0];
    pub const POINTS: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
}
