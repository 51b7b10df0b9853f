//! Target entities
//!
//! A target is alive (moving, hittable) or exploding. Exploding targets are
//! frozen in place and removed once their explosion animation completes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::phase::Phase;
use crate::consts::{EXPLOSION_FRAMES, EXPLOSION_STEP};

/// Target silhouette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Triangle,
    Rectangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Triangle, ShapeKind::Rectangle];
}

/// Fill color family, picked at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Red,
    Orange,
    Magenta,
}

impl Tint {
    /// Specials are always magenta; regular targets follow the phase
    pub fn for_spawn(phase: Phase, special: bool) -> Self {
        if special {
            return Tint::Magenta;
        }
        match phase {
            Phase::One | Phase::Three => Tint::Red,
            Phase::Two => Tint::Orange,
        }
    }
}

/// Lifecycle state of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityState {
    Alive,
    /// Hit and exploding; `frames` counts ticks since the hit
    Destroying { frames: u8 },
}

/// A single on-screen target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    /// Velocity in pixels per tick
    pub vel: Vec2,
    /// Radius for circles and triangles, full side for rectangles. Also the
    /// half-extent used for wall bounces.
    pub size: f32,
    pub shape: ShapeKind,
    pub special: bool,
    pub tint: Tint,
    pub state: EntityState,
}

impl Entity {
    pub fn new(pos: Vec2, vel: Vec2, size: f32, shape: ShapeKind, special: bool, tint: Tint) -> Self {
        Self {
            id: 0,
            pos,
            vel,
            size,
            shape,
            special,
            tint,
            state: EntityState::Alive,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        matches!(self.state, EntityState::Alive)
    }

    #[inline]
    pub fn is_destroying(&self) -> bool {
        matches!(self.state, EntityState::Destroying { .. })
    }

    /// Start the explosion (no-op if already exploding)
    pub fn begin_destroy(&mut self) {
        if self.is_alive() {
            self.state = EntityState::Destroying { frames: 0 };
        }
    }

    /// Explosion progress in [0, 1]; 0 for live targets
    pub fn explosion_progress(&self) -> f32 {
        match self.state {
            EntityState::Alive => 0.0,
            EntityState::Destroying { frames } => (frames as f32 * EXPLOSION_STEP).min(1.0),
        }
    }

    /// Advance the explosion by one tick. Returns true once it has finished.
    pub fn step_explosion(&mut self) -> bool {
        match &mut self.state {
            EntityState::Alive => false,
            EntityState::Destroying { frames } => {
                *frames = frames.saturating_add(1);
                *frames >= EXPLOSION_FRAMES
            }
        }
    }

    /// Half-extent used for wall bounces
    #[inline]
    pub fn extent(&self) -> f32 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle() -> Entity {
        Entity::new(Vec2::new(10.0, 10.0), Vec2::ONE, 20.0, ShapeKind::Circle, false, Tint::Red)
    }

    #[test]
    fn test_explosion_lasts_ten_ticks() {
        let mut e = circle();
        assert_eq!(e.explosion_progress(), 0.0);
        assert!(!e.step_explosion(), "live targets don't explode");

        e.begin_destroy();
        for _ in 0..9 {
            assert!(!e.step_explosion());
        }
        assert!((e.explosion_progress() - 0.9).abs() < 1e-6);
        assert!(e.step_explosion());
        assert_eq!(e.explosion_progress(), 1.0);
    }

    #[test]
    fn test_begin_destroy_is_idempotent() {
        let mut e = circle();
        e.begin_destroy();
        e.step_explosion();
        e.begin_destroy();
        assert_eq!(e.state, EntityState::Destroying { frames: 1 });
    }

    #[test]
    fn test_tint_for_spawn() {
        assert_eq!(Tint::for_spawn(Phase::One, false), Tint::Red);
        assert_eq!(Tint::for_spawn(Phase::Two, false), Tint::Orange);
        assert_eq!(Tint::for_spawn(Phase::Three, false), Tint::Red);
        assert_eq!(Tint::for_spawn(Phase::Two, true), Tint::Magenta);
    }
}
