//! Notifications emitted by the core for the presentation layer.

use serde::Serialize;

use crate::ranking::RankedResult;
use crate::sim::{Phase, RenderFrame, TurnStats};

/// Everything the presentation layer may want to react to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A player's turn began.
    TurnStarted { player: String, duration_secs: u32 },
    /// One simulation tick completed; draw this.
    Frame(RenderFrame),
    /// Countdown decremented.
    TimerTick { time_left: u32 },
    /// Difficulty escalated. Show `message` for `display_ms`.
    PhaseChanged {
        phase: Phase,
        message: String,
        display_ms: u32,
    },
    /// The phase banner timed out.
    BannerHidden,
    /// A click was accepted as a shot.
    ShotFired { x: f32, y: f32 },
    /// A shot destroyed a target.
    Hit {
        x: f32,
        y: f32,
        points: u32,
        special: bool,
    },
    /// A shot hit nothing.
    Miss { x: f32, y: f32 },
    Paused,
    Resumed,
    /// Time ran out; `stats` are final.
    TurnComplete { player: String, stats: TurnStats },
    /// Between-turns countdown began.
    TransitionStarted { next_player: String, seconds: u32 },
    TransitionTick { seconds_remaining: u32 },
    /// All players have played.
    MatchComplete { results: Vec<RankedResult> },
}

impl GameEvent {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::TurnStarted { .. } => "turn_started",
            GameEvent::Frame(_) => "frame",
            GameEvent::TimerTick { .. } => "timer_tick",
            GameEvent::PhaseChanged { .. } => "phase_changed",
            GameEvent::BannerHidden => "banner_hidden",
            GameEvent::ShotFired { .. } => "shot_fired",
            GameEvent::Hit { .. } => "hit",
            GameEvent::Miss { .. } => "miss",
            GameEvent::Paused => "paused",
            GameEvent::Resumed => "resumed",
            GameEvent::TurnComplete { .. } => "turn_complete",
            GameEvent::TransitionStarted { .. } => "transition_started",
            GameEvent::TransitionTick { .. } => "transition_tick",
            GameEvent::MatchComplete { .. } => "match_complete",
        }
    }
}
