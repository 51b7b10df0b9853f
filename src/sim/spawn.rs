//! Target spawning
//!
//! Spawns are paced on simulation milliseconds and drawn from an injected
//! RNG so a seeded run always produces the same targets.

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, ShapeKind, Tint};
use super::phase::Phase;
use super::physics::Bounds;
use crate::consts::{BASE_SIZE, SIZE_SPREAD, SPAWN_MARGIN, SPECIAL_CHANCE, SPECIAL_SIZE_SCALE};

/// Largest size fraction of the allowed maximum when a roll has to be capped
const SIZE_CAP_FACTOR: f32 = 0.9;

/// Spawn targets if the phase's interval has elapsed.
///
/// Returns the new targets (ids unassigned) and the updated last-spawn time.
/// On a degenerate viewport nothing spawns and the last-spawn time is kept,
/// so the spawn is deferred until the viewport is usable again.
pub fn maybe_spawn<R: Rng + ?Sized>(
    now_ms: u64,
    last_spawn_ms: u64,
    phase: Phase,
    bounds: Bounds,
    rng: &mut R,
) -> (Vec<Entity>, u64) {
    let params = phase.params();
    if now_ms.saturating_sub(last_spawn_ms) <= params.spawn_interval_ms {
        return (Vec::new(), last_spawn_ms);
    }
    if bounds.is_degenerate() {
        log::debug!(
            "Spawn deferred: viewport {}x{} is too small",
            bounds.width,
            bounds.height
        );
        return (Vec::new(), last_spawn_ms);
    }

    let spawned = (0..params.spawn_count)
        .map(|_| spawn_one(phase, bounds, rng))
        .collect::<Vec<_>>();
    log::debug!("Spawned {} target(s) at {} ms", spawned.len(), now_ms);
    (spawned, now_ms)
}

/// Roll a single target for the given phase
pub fn spawn_one<R: Rng + ?Sized>(phase: Phase, bounds: Bounds, rng: &mut R) -> Entity {
    let speed = phase.params().enemy_speed;

    let shape = ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())];
    let x = rng.random::<f32>() * (bounds.width - 2.0 * SPAWN_MARGIN) + SPAWN_MARGIN;
    let y = rng.random::<f32>() * (bounds.height - 2.0 * SPAWN_MARGIN) + SPAWN_MARGIN;
    let mut size = BASE_SIZE + rng.random::<f32>() * SIZE_SPREAD;
    let vx = (rng.random::<f32>() - 0.5) * speed * 2.0;
    let vy = (rng.random::<f32>() - 0.5) * speed * 2.0;
    let special = rng.random_bool(SPECIAL_CHANCE);

    if special {
        size *= SPECIAL_SIZE_SCALE;
    }
    // Must stay below half the short side or it could never bounce
    let max_size = bounds.min_dimension() / 2.0;
    if size >= max_size {
        size = max_size * SIZE_CAP_FACTOR;
    }

    Entity::new(
        Vec2::new(x, y),
        Vec2::new(vx, vy),
        size,
        shape,
        special,
        Tint::for_spawn(phase, special),
    )
}
