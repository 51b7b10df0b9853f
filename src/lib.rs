//! Zerguem - a timed, multi-player target-shooting minigame
//!
//! Core modules:
//! - `sim`: Deterministic turn simulation (entities, physics, spawning, hits, phases)
//! - `game_match`: Turn sequencing across players
//! - `game`: Top-level orchestrator driven by `advance(dt)` and pointer commands
//! - `presenter`: Callback surface for the external presentation layer
//! - `renderer`: Backend-agnostic 2D tessellation of render frames
//! - `platform`: Clocks and cancellable timers

pub mod error;
pub mod events;
pub mod game;
pub mod game_match;
pub mod platform;
pub mod presenter;
pub mod ranking;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{GameError, GameResult};
pub use events::GameEvent;
pub use game::{Game, Stage};
pub use game_match::{MatchController, MatchState, PlayerRecord};
pub use presenter::{LogPresenter, NullPresenter, Presenter};
pub use ranking::RankedResult;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation/render tick rate (Hz)
    pub const TICK_RATE: u32 = 60;
    /// Milliseconds between simulation ticks
    pub const TICK_MS: f64 = 1000.0 / TICK_RATE as f64;
    /// Countdown cadence (one second)
    pub const COUNTDOWN_MS: f64 = 1000.0;
    /// Largest dt accepted per `advance` call, to avoid catch-up spirals
    pub const MAX_FRAME_MS: f64 = 250.0;

    /// Default turn length in seconds
    pub const DEFAULT_TURN_SECS: u32 = 45;
    /// Seconds shown on the between-turns countdown
    pub const DEFAULT_TRANSITION_SECS: u32 = 5;
    /// How long the phase banner stays up
    pub const DEFAULT_BANNER_MS: u32 = 3000;

    /// Player count limits
    pub const MIN_PLAYERS: usize = 1;
    pub const MAX_PLAYERS: usize = 10;

    /// Spawn inset from each viewport edge (px)
    pub const SPAWN_MARGIN: f32 = 30.0;
    /// Target size is drawn from [BASE_SIZE, BASE_SIZE + SIZE_SPREAD)
    pub const BASE_SIZE: f32 = 15.0;
    pub const SIZE_SPREAD: f32 = 15.0;
    /// Special targets are this much bigger
    pub const SPECIAL_SIZE_SCALE: f32 = 1.3;
    /// Probability that a spawned target is special
    pub const SPECIAL_CHANCE: f64 = 0.3;
    /// Score multiplier for special targets
    pub const SPECIAL_MULTIPLIER: u32 = 2;

    /// Explosion progress added per tick
    pub const EXPLOSION_STEP: f32 = 0.1;
    /// Ticks until an exploding target is removed (1.0 / EXPLOSION_STEP)
    pub const EXPLOSION_FRAMES: u8 = 10;

    /// Phase thresholds (elapsed seconds) on the 45 s baseline
    pub const PHASE2_AT_SECS: f32 = 15.0;
    pub const PHASE3_AT_SECS: f32 = 30.0;

    /// Crosshair arm length (px)
    pub const CROSSHAIR_SIZE: f32 = 20.0;
}

/// Default display name for the player at `index` (0-based)
#[inline]
pub fn default_player_name(index: usize) -> String {
    format!("Player {}", index + 1)
}
