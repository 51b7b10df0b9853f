//! Per-tick motion and wall reflection
//!
//! Velocities are in pixels per tick, so one call moves a target by exactly
//! its velocity. Each axis reflects independently.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::consts::SPAWN_MARGIN;

/// Play-area size in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Too small to place a target inside the spawn margin
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 2.0 * SPAWN_MARGIN && self.height > 2.0 * SPAWN_MARGIN)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Move a live target by its velocity, then bounce it off the walls
pub fn advance(entity: &mut Entity, bounds: Bounds) {
    entity.pos += entity.vel;
    let extent = entity.extent();
    reflect_axis(&mut entity.pos.x, &mut entity.vel.x, extent, bounds.width);
    reflect_axis(&mut entity.pos.y, &mut entity.vel.y, extent, bounds.height);
}

fn reflect_axis(pos: &mut f32, vel: &mut f32, extent: f32, bound: f32) {
    if *pos - extent <= 0.0 || *pos + extent >= bound {
        *vel = -*vel;
        let hi = bound - extent;
        // Axis narrower than the target: park it in the middle
        *pos = if hi < extent { bound / 2.0 } else { pos.clamp(extent, hi) };
    }
}

/// Advance every target by one tick.
///
/// Live targets move; exploding targets progress their animation and are
/// dropped once it completes. Spawn order is preserved.
pub fn step_entities(entities: &mut Vec<Entity>, bounds: Bounds) {
    entities.retain_mut(|entity| {
        if entity.is_destroying() {
            !entity.step_explosion()
        } else {
            advance(entity, bounds);
            true
        }
    });
}
