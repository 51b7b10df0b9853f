//! Turn state and core simulation types
//!
//! Everything one player's turn mutates lives in `TurnState`. It is created
//! fresh for every turn, so nothing leaks from one turn into the next.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::phase::{Phase, PhaseController, ThresholdMode};
use super::physics::Bounds;
use crate::consts::TICK_RATE;
use crate::events::GameEvent;

/// Per-turn shot counters and score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStats {
    pub shots_fired: u32,
    pub hits: u32,
    pub score: u64,
}

impl TurnStats {
    /// Hit percentage rounded to the nearest integer (0 when no shots)
    pub fn accuracy(&self) -> u32 {
        if self.shots_fired == 0 {
            return 0;
        }
        (self.hits as f64 / self.shots_fired as f64 * 100.0).round() as u32
    }
}

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShotOutcome {
    Hit {
        entity_id: u32,
        pos: Vec2,
        points: u32,
    },
    Miss {
        pos: Vec2,
    },
}

/// Snapshot handed to the presentation layer once per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub entities: Vec<Entity>,
    pub cursor: Vec2,
    pub phase: Phase,
    pub time_left: u32,
    pub score: u64,
    pub bounds: Bounds,
}

/// Complete state of one player's turn
#[derive(Debug, Clone)]
pub struct TurnState {
    pub player: String,
    pub duration_secs: u32,
    /// Whole seconds remaining, decremented by the countdown
    pub time_left: u32,
    /// Simulation ticks run so far (paused ticks don't count)
    pub time_ticks: u64,
    pub last_spawn_ms: u64,
    pub phase: PhaseController,
    /// Live and exploding targets in spawn order
    pub entities: Vec<Entity>,
    pub stats: TurnStats,
    pub cursor: Vec2,
    pub bounds: Bounds,
    pub paused: bool,
    pub finished: bool,
    /// Notifications for the presentation layer, drained by the owner
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl TurnState {
    pub fn new(player: impl Into<String>, duration_secs: u32, mode: ThresholdMode, bounds: Bounds) -> Self {
        Self {
            player: player.into(),
            duration_secs,
            time_left: duration_secs,
            time_ticks: 0,
            last_spawn_ms: 0,
            phase: PhaseController::new(duration_secs, mode),
            entities: Vec::new(),
            stats: TurnStats::default(),
            cursor: Vec2::new(bounds.width / 2.0, bounds.height / 2.0),
            bounds,
            paused: false,
            finished: false,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Placeholder state before any turn has started
    pub fn idle(bounds: Bounds) -> Self {
        let mut state = Self::new(String::new(), 0, ThresholdMode::Fixed, bounds);
        state.finished = true;
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Simulation clock in milliseconds, derived from the tick counter
    pub fn now_ms(&self) -> u64 {
        self.time_ticks * 1000 / TICK_RATE as u64
    }

    /// Seconds elapsed according to the countdown
    pub fn elapsed_secs(&self) -> u32 {
        self.duration_secs.saturating_sub(self.time_left)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.paused && !self.finished
    }

    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            entities: self.entities.clone(),
            cursor: self.cursor,
            phase: self.phase.current(),
            time_left: self.time_left,
            score: self.stats.score,
            bounds: self.bounds,
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
