//! Deterministic turn simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (velocities are per tick)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod engine;
pub mod entity;
pub mod hit;
pub mod phase;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use engine::{TurnConfig, TurnEngine, TurnStatus, TurnTimer};
pub use entity::{Entity, EntityState, ShapeKind, Tint};
pub use hit::{contains, hit_test, points_for, triangle_vertices};
pub use phase::{Phase, PhaseController, PhaseParams, ThresholdMode};
pub use physics::{Bounds, advance, step_entities};
pub use spawn::{maybe_spawn, spawn_one};
pub use state::{RenderFrame, ShotOutcome, TurnState, TurnStats};
pub use tick::{countdown, fire, tick};
