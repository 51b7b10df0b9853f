//! Game orchestrator
//!
//! Ties the match flow to the turn engine: which screen is up, the
//! between-turns countdown, and the command surface (start, pause, resume,
//! restart, play again, back home). Everything the presentation layer needs
//! leaves through the `Presenter`.

use glam::Vec2;

use crate::consts::{COUNTDOWN_MS, MAX_FRAME_MS};
use crate::error::{GameError, GameResult};
use crate::events::GameEvent;
use crate::game_match::{MatchController, MatchState, TurnAdvance};
use crate::platform::{Clock, Timers};
use crate::presenter::{NullPresenter, Presenter, dispatch};
use crate::ranking::RankedResult;
use crate::settings::Settings;
use crate::sim::{Bounds, ShotOutcome, TurnEngine, TurnState, TurnStats, TurnStatus};

/// Which screen the game is on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Player setup
    Home,
    /// A turn is running (or paused)
    Playing,
    /// Countdown before the next player's turn
    Transition {
        next_player: String,
        seconds_remaining: u32,
    },
    /// Final ranking
    Scoreboard,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Home => "home",
            Stage::Playing => "playing",
            Stage::Transition { .. } => "transition",
            Stage::Scoreboard => "scoreboard",
        }
    }
}

/// Timers owned by the match flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchTimer {
    Transition,
}

pub struct Game<P: Presenter = NullPresenter> {
    settings: Settings,
    controller: Option<MatchController>,
    engine: TurnEngine,
    timers: Timers<MatchTimer>,
    stage: Stage,
    presenter: P,
    results: Vec<RankedResult>,
    last_clock_ms: Option<f64>,
}

impl<P: Presenter> Game<P> {
    pub fn new(mut settings: Settings, presenter: P) -> Self {
        settings.validate();
        let engine = TurnEngine::new(settings.seed.unwrap_or_default(), settings.bounds());
        Self {
            settings,
            controller: None,
            engine,
            timers: Timers::new(),
            stage: Stage::Home,
            presenter,
            results: Vec::new(),
            last_clock_ms: None,
        }
    }

    // === Accessors ===

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn turn(&self) -> &TurnState {
        self.engine.state()
    }

    pub fn match_state(&self) -> Option<&MatchState> {
        self.controller.as_ref().map(MatchController::state)
    }

    /// Final ranking (empty until the match completes)
    pub fn results(&self) -> &[RankedResult] {
        &self.results
    }

    pub fn is_paused(&self) -> bool {
        self.engine.is_paused()
    }

    // === Commands ===

    /// Configure players and start the first turn
    pub fn start_match<S: AsRef<str>>(&mut self, names: &[S]) {
        self.timers.cancel_all();
        self.engine.stop();

        let seed = self.settings.seed.unwrap_or_else(rand::random);
        log::info!("Match seed: {}", seed);
        self.engine.reseed(seed);

        self.controller = Some(MatchController::configure_match(names));
        self.results.clear();
        self.begin_turn();
    }

    /// Zero every score and start again from the first player
    pub fn restart(&mut self) -> GameResult<()> {
        self.reset_match("restart")
    }

    /// Same as `restart`, from the score screen
    pub fn play_again(&mut self) -> GameResult<()> {
        self.reset_match("play_again")
    }

    fn reset_match(&mut self, command: &'static str) -> GameResult<()> {
        let Some(controller) = self.controller.as_mut() else {
            return Err(GameError::InvalidCommand {
                command,
                stage: self.stage.name(),
            });
        };
        self.timers.cancel_all();
        self.engine.stop();
        controller.restart();
        self.results.clear();
        log::info!("Match restarted");
        self.begin_turn();
        Ok(())
    }

    /// Abandon the match and go back to player setup
    pub fn back_home(&mut self) {
        self.timers.cancel_all();
        self.engine.stop();
        self.controller = None;
        self.results.clear();
        self.stage = Stage::Home;
    }

    pub fn pause(&mut self) {
        if self.stage == Stage::Playing {
            self.engine.pause();
            self.flush_turn_events();
        }
    }

    pub fn resume(&mut self) {
        if self.stage == Stage::Playing {
            self.engine.resume();
            self.flush_turn_events();
        }
    }

    /// Pointer moved to viewport-local (x, y)
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.stage == Stage::Playing {
            self.engine.pointer_move(Vec2::new(x, y));
        }
    }

    /// Click at viewport-local (x, y)
    pub fn click(&mut self, x: f32, y: f32) -> Option<ShotOutcome> {
        if self.stage != Stage::Playing {
            return None;
        }
        let outcome = self.engine.click(Vec2::new(x, y));
        self.flush_turn_events();
        outcome
    }

    /// Viewport resized
    pub fn resize(&mut self, width: f32, height: f32) {
        let bounds = Bounds::new(width, height);
        self.settings.viewport_width = bounds.width;
        self.settings.viewport_height = bounds.height;
        self.engine.resize(bounds);
    }

    // === Time ===

    /// Advance by the time elapsed on `clock` since the previous call
    pub fn update<C: Clock + ?Sized>(&mut self, clock: &C) {
        let now = clock.now_ms();
        let dt = self.last_clock_ms.map_or(0.0, |last| now - last);
        self.last_clock_ms = Some(now);
        self.advance(dt);
    }

    /// Advance game time by `dt_ms` (capped at `MAX_FRAME_MS`)
    pub fn advance(&mut self, dt_ms: f64) {
        let mut budget = if dt_ms.is_finite() {
            dt_ms.clamp(0.0, MAX_FRAME_MS)
        } else {
            0.0
        };

        if matches!(self.stage, Stage::Transition { .. }) {
            self.run_transition(&mut budget);
        }

        if self.stage == Stage::Playing {
            let status = self.engine.advance(budget);
            self.flush_turn_events();
            if let TurnStatus::Finished(stats) = status {
                self.complete_turn(stats);
            }
        }
    }

    fn run_transition(&mut self, budget: &mut f64) {
        while let Some(MatchTimer::Transition) = self.timers.next_due(budget) {
            let Stage::Transition {
                seconds_remaining, ..
            } = &mut self.stage
            else {
                self.timers.cancel_all();
                return;
            };
            *seconds_remaining = seconds_remaining.saturating_sub(1);
            let left = *seconds_remaining;
            self.emit(GameEvent::TransitionTick {
                seconds_remaining: left,
            });
            if left == 0 {
                self.timers.cancel(MatchTimer::Transition);
                self.begin_turn();
                return;
            }
        }
    }

    // === Match flow ===

    fn begin_turn(&mut self) {
        let Some(controller) = self.controller.as_ref() else {
            return;
        };
        let player = controller.current_player().to_string();
        self.stage = Stage::Playing;
        self.engine.start_turn(&player, self.settings.turn_config());
        self.flush_turn_events();
    }

    fn complete_turn(&mut self, stats: TurnStats) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        controller.record_turn(&stats);

        match controller.advance_turn() {
            TurnAdvance::Next { player, .. } => {
                let seconds = self.settings.transition_secs;
                self.stage = Stage::Transition {
                    next_player: player.clone(),
                    seconds_remaining: seconds,
                };
                self.timers
                    .start_interval(MatchTimer::Transition, COUNTDOWN_MS);
                self.emit(GameEvent::TransitionStarted {
                    next_player: player,
                    seconds,
                });
            }
            TurnAdvance::Finished(results) => {
                self.stage = Stage::Scoreboard;
                self.results = results.clone();
                self.emit(GameEvent::MatchComplete { results });
            }
        }
    }

    fn flush_turn_events(&mut self) {
        for event in self.engine.drain_events() {
            self.emit(event);
        }
    }

    fn emit(&mut self, event: GameEvent) {
        dispatch(&mut self.presenter, &event);
    }
}
