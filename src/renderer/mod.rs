//! Frame tessellation
//!
//! Turns a `RenderFrame` into a flat triangle list any 2D backend can draw.
//! Draw order: background fade, targets (halo, body, eye), explosions,
//! crosshair on top.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, as_bytes, colors};

use glam::Vec2;

use crate::consts::CROSSHAIR_SIZE;
use crate::sim::{Entity, RenderFrame, ShapeKind, Tint, triangle_vertices};

/// Segments used for every circle
const CIRCLE_SEGMENTS: u32 = 32;
/// Stroke width for special-target halos
const HALO_WIDTH: f32 = 2.0;
/// Gap between a special target and its halo
const HALO_GAP: f32 = 2.0;
const CROSSHAIR_WIDTH: f32 = 3.0;

pub fn tint_color(tint: Tint) -> [f32; 4] {
    match tint {
        Tint::Red => colors::TARGET_RED,
        Tint::Orange => colors::TARGET_ORANGE,
        Tint::Magenta => colors::TARGET_MAGENTA,
    }
}

/// Color for floating "+N" text
pub fn points_color(points: u32) -> [f32; 4] {
    if points >= 20 {
        colors::POINTS_BIG
    } else {
        colors::POINTS
    }
}

/// Explosion radius at the entity's current progress
pub fn explosion_radius(entity: &Entity) -> f32 {
    entity.size * (1.0 + entity.explosion_progress() * 2.0)
}

/// Complete mesh for one frame
pub fn build_frame_mesh(frame: &RenderFrame) -> Vec<Vertex> {
    let mut out = shapes::rect(
        Vec2::ZERO,
        Vec2::new(frame.bounds.width, frame.bounds.height),
        colors::BACKGROUND_FADE,
    );
    for entity in &frame.entities {
        if entity.is_destroying() {
            out.extend(explosion(entity));
        } else {
            out.extend(target(entity));
        }
    }
    out.extend(crosshair(frame.cursor));
    out
}

/// A live target: body, halo if special, then the eye
pub fn target(entity: &Entity) -> Vec<Vertex> {
    let color = tint_color(entity.tint);
    let (pos, size) = (entity.pos, entity.size);

    let mut out = match entity.shape {
        ShapeKind::Circle => shapes::circle(pos, size, color, CIRCLE_SEGMENTS),
        ShapeKind::Triangle => shapes::triangle(triangle_vertices(pos, size), color),
        ShapeKind::Rectangle => shapes::square(pos, size / 2.0, color),
    };

    if entity.special {
        out.extend(halo(entity));
    }

    let eye = Vec2::new(pos.x, pos.y - size / 3.0);
    out.extend(shapes::circle(eye, size / 4.0, colors::EYE, CIRCLE_SEGMENTS));
    out.extend(shapes::circle(eye, size / 8.0, colors::PUPIL, CIRCLE_SEGMENTS));
    out
}

fn halo(entity: &Entity) -> Vec<Vertex> {
    let (pos, size) = (entity.pos, entity.size);
    match entity.shape {
        ShapeKind::Circle => {
            let r = size + HALO_GAP;
            shapes::ring(
                pos,
                r - HALO_WIDTH / 2.0,
                r + HALO_WIDTH / 2.0,
                colors::SPECIAL_HALO,
                CIRCLE_SEGMENTS,
            )
        }
        ShapeKind::Triangle => shapes::outline(
            &triangle_vertices(pos, size + HALO_GAP),
            HALO_WIDTH,
            colors::SPECIAL_HALO,
        ),
        ShapeKind::Rectangle => {
            let h = size / 2.0 + HALO_GAP;
            shapes::outline(
                &[
                    pos + Vec2::new(-h, -h),
                    pos + Vec2::new(h, -h),
                    pos + Vec2::new(h, h),
                    pos + Vec2::new(-h, h),
                ],
                HALO_WIDTH,
                colors::SPECIAL_HALO,
            )
        }
    }
}

/// Expanding radial burst for a destroyed target
pub fn explosion(entity: &Entity) -> Vec<Vertex> {
    let radius = explosion_radius(entity);
    shapes::banded_disc(
        entity.pos,
        &[
            (0.0, colors::EXPLOSION_CORE),
            (radius * 0.5, colors::EXPLOSION_MID),
            (radius, colors::EXPLOSION_EDGE),
        ],
        CIRCLE_SEGMENTS,
    )
}

/// Laser sight: cross arms, red disc, white center, faint glow ring
pub fn crosshair(at: Vec2) -> Vec<Vertex> {
    let arm = CROSSHAIR_SIZE;
    let mut out = shapes::line(
        at - Vec2::new(arm, 0.0),
        at + Vec2::new(arm, 0.0),
        CROSSHAIR_WIDTH,
        colors::CROSSHAIR,
    );
    out.extend(shapes::line(
        at - Vec2::new(0.0, arm),
        at + Vec2::new(0.0, arm),
        CROSSHAIR_WIDTH,
        colors::CROSSHAIR,
    ));
    out.extend(shapes::circle(at, 5.0, colors::CROSSHAIR, CIRCLE_SEGMENTS));
    out.extend(shapes::circle(at, 2.0, colors::CROSSHAIR_DOT, CIRCLE_SEGMENTS));
    out.extend(shapes::ring(at, 7.0, 9.0, colors::CROSSHAIR_GLOW, CIRCLE_SEGMENTS));
    out
}
