//! Turn engine
//!
//! Drives one player's turn: a 60 Hz frame timer, a 1 Hz countdown and the
//! phase banner timeout, all owned here so a finished or restarted turn can
//! never leave a stray timer behind.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::phase::ThresholdMode;
use super::physics::Bounds;
use super::state::{ShotOutcome, TurnState, TurnStats};
use super::tick::{countdown, fire, tick};
use crate::consts::{COUNTDOWN_MS, DEFAULT_BANNER_MS, DEFAULT_TURN_SECS, TICK_MS};
use crate::events::GameEvent;
use crate::platform::Timers;

/// Turn parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnConfig {
    pub duration_secs: u32,
    pub thresholds: ThresholdMode,
    pub banner_ms: u32,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_TURN_SECS,
            thresholds: ThresholdMode::Fixed,
            banner_ms: DEFAULT_BANNER_MS,
        }
    }
}

/// Timers owned by a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnTimer {
    Frame,
    Countdown,
    Banner,
}

/// Result of advancing the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    Idle,
    Running,
    Paused,
    /// The turn ended during this advance; stats are final
    Finished(TurnStats),
}

pub struct TurnEngine {
    state: TurnState,
    config: TurnConfig,
    timers: Timers<TurnTimer>,
    rng: Pcg32,
}

impl TurnEngine {
    pub fn new(seed: u64, bounds: Bounds) -> Self {
        Self {
            state: TurnState::idle(bounds),
            config: TurnConfig::default(),
            timers: Timers::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reseed the spawn RNG (takes effect on the next spawn)
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn config(&self) -> TurnConfig {
        self.config
    }

    /// True while a turn is running or paused
    pub fn in_turn(&self) -> bool {
        !self.state.finished
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn is_timer_active(&self, timer: TurnTimer) -> bool {
        self.timers.is_active(timer)
    }

    /// Start a fresh turn, cancelling whatever was running before
    pub fn start_turn(&mut self, player: &str, config: TurnConfig) {
        self.timers.cancel_all();
        self.config = config;
        let bounds = self.state.bounds;
        self.state = TurnState::new(player, config.duration_secs, config.thresholds, bounds);

        self.timers.start_interval(TurnTimer::Frame, TICK_MS);
        self.timers.start_interval(TurnTimer::Countdown, COUNTDOWN_MS);

        log::info!("Turn started: {} ({}s)", player, config.duration_secs);
        self.state.push_event(GameEvent::TurnStarted {
            player: player.to_string(),
            duration_secs: config.duration_secs,
        });
        self.state.push_event(GameEvent::TimerTick {
            time_left: self.state.time_left,
        });
        // First frame goes out immediately, before the first tick
        let frame = self.state.render_frame();
        self.state.push_event(GameEvent::Frame(frame));
    }

    /// Advance turn time by `dt_ms`, running every timer that comes due
    pub fn advance(&mut self, dt_ms: f64) -> TurnStatus {
        if !self.in_turn() {
            return TurnStatus::Idle;
        }

        let mut budget = dt_ms.max(0.0);
        while let Some(timer) = self.timers.next_due(&mut budget) {
            match timer {
                TurnTimer::Frame => {
                    let entered = tick(&mut self.state, &mut self.rng, self.config.banner_ms);
                    if entered.is_some() {
                        self.timers
                            .start_timeout(TurnTimer::Banner, self.config.banner_ms as f64);
                    }
                }
                TurnTimer::Countdown => {
                    if countdown(&mut self.state) {
                        return TurnStatus::Finished(self.finish());
                    }
                }
                TurnTimer::Banner => self.state.push_event(GameEvent::BannerHidden),
            }
        }

        if self.state.paused {
            TurnStatus::Paused
        } else {
            TurnStatus::Running
        }
    }

    fn finish(&mut self) -> TurnStats {
        self.timers.cancel_all();
        self.state.finished = true;
        let stats = self.state.stats;
        log::info!(
            "Turn complete: {} scored {} ({} / {} hits, {}%)",
            self.state.player,
            stats.score,
            stats.hits,
            stats.shots_fired,
            stats.accuracy()
        );
        self.state.push_event(GameEvent::TurnComplete {
            player: self.state.player.clone(),
            stats,
        });
        stats
    }

    /// Stop the current turn without reporting it
    pub fn stop(&mut self) {
        self.timers.cancel_all();
        self.state.finished = true;
        self.state.paused = false;
    }

    pub fn pause(&mut self) {
        if self.in_turn() && !self.state.paused {
            self.state.paused = true;
            self.state.push_event(GameEvent::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.in_turn() && self.state.paused {
            self.state.paused = false;
            self.state.push_event(GameEvent::Resumed);
        }
    }

    /// Click at viewport-local `pos`
    pub fn click(&mut self, pos: Vec2) -> Option<ShotOutcome> {
        fire(&mut self.state, pos)
    }

    /// Track the aim cursor (ignored while paused)
    pub fn pointer_move(&mut self, pos: Vec2) {
        if self.state.is_active() {
            self.state.cursor = pos;
        }
    }

    /// Viewport resized; targets are pulled back inside on their next move
    pub fn resize(&mut self, bounds: Bounds) {
        self.state.bounds = bounds;
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Phase;

    fn engine() -> TurnEngine {
        TurnEngine::new(1234, Bounds::default())
    }

    fn run_secs(engine: &mut TurnEngine, secs: u32) -> TurnStatus {
        let mut status = TurnStatus::Running;
        for _ in 0..secs * 10 {
            status = engine.advance(100.0);
            if matches!(status, TurnStatus::Finished(_)) {
                break;
            }
        }
        status
    }

    #[test]
    fn test_idle_engine_does_nothing() {
        let mut engine = engine();
        assert_eq!(engine.advance(1000.0), TurnStatus::Idle);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_start_turn_emits_first_frame() {
        let mut engine = engine();
        engine.start_turn("Alice", TurnConfig::default());
        let events = engine.drain_events();
        assert!(matches!(events[0], GameEvent::TurnStarted { .. }));
        assert!(matches!(events.last(), Some(GameEvent::Frame(_))));
        assert!(engine.is_timer_active(TurnTimer::Frame));
        assert!(engine.is_timer_active(TurnTimer::Countdown));
    }

    #[test]
    fn test_turn_runs_to_completion() {
        let mut engine = engine();
        engine.start_turn("Alice", TurnConfig::default());

        let status = run_secs(&mut engine, 46);
        assert!(matches!(status, TurnStatus::Finished(_)));
        assert!(!engine.in_turn());
        assert_eq!(engine.state().time_left, 0);
        assert_eq!(engine.state().phase.current(), Phase::Three);
        assert!(!engine.is_timer_active(TurnTimer::Frame));
        assert!(!engine.is_timer_active(TurnTimer::Countdown));

        let events = engine.drain_events();
        let completes = events
            .iter()
            .filter(|e| matches!(e, GameEvent::TurnComplete { .. }))
            .count();
        assert_eq!(completes, 1);

        // Nothing happens after the end
        assert_eq!(engine.advance(5000.0), TurnStatus::Idle);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_pause_freezes_turn() {
        let mut engine = engine();
        engine.start_turn("Alice", TurnConfig::default());
        run_secs(&mut engine, 3);
        let before = engine.state().clone();

        engine.pause();
        assert_eq!(engine.advance(10_000.0), TurnStatus::Paused);
        assert_eq!(engine.state().time_left, before.time_left);
        assert_eq!(engine.state().time_ticks, before.time_ticks);
        assert_eq!(engine.state().entities, before.entities);
        assert_eq!(engine.click(Vec2::new(1.0, 1.0)), None);
        engine.pointer_move(Vec2::new(3.0, 3.0));
        assert_eq!(engine.state().cursor, before.cursor);

        engine.resume();
        engine.advance(1000.0);
        assert_eq!(engine.state().time_left, before.time_left - 1);
    }

    #[test]
    fn test_banner_hides_after_timeout() {
        let mut engine = engine();
        engine.start_turn("Alice", TurnConfig::default());
        run_secs(&mut engine, 15);
        engine.advance(50.0);
        assert!(engine.is_timer_active(TurnTimer::Banner));
        let events = engine.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::PhaseChanged { phase: Phase::Two, .. })));

        run_secs(&mut engine, 3);
        let events = engine.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::BannerHidden)));
        assert!(!engine.is_timer_active(TurnTimer::Banner));
    }

    #[test]
    fn test_restart_mid_turn_resets_state() {
        let mut engine = engine();
        engine.start_turn("Alice", TurnConfig::default());
        run_secs(&mut engine, 20);
        engine.start_turn("Bob", TurnConfig::default());
        let state = engine.state();
        assert_eq!(state.player, "Bob");
        assert_eq!(state.time_left, 45);
        assert_eq!(state.phase.current(), Phase::One);
        assert!(state.entities.is_empty());
        assert!(!engine.is_timer_active(TurnTimer::Banner));
    }

    #[test]
    fn test_same_seed_same_targets() {
        let mut a = TurnEngine::new(99, Bounds::default());
        let mut b = TurnEngine::new(99, Bounds::default());
        a.start_turn("A", TurnConfig::default());
        b.start_turn("A", TurnConfig::default());
        run_secs(&mut a, 10);
        run_secs(&mut b, 10);
        assert!(!a.state().entities.is_empty());
        assert_eq!(a.state().entities, b.state().entities);
    }
}
