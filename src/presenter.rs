//! Presentation layer interface
//!
//! The core never draws or plays anything itself. Events drained from the
//! turn engine and the match flow are routed to a `Presenter`, one typed
//! callback per event, plus a `SoundCue` for the events that make a noise.
//! A failing callback is logged and skipped; it never stops the game loop.

use glam::Vec2;

use crate::error::GameResult;
use crate::events::GameEvent;
use crate::ranking::RankedResult;
use crate::settings::Settings;
use crate::sim::{Phase, RenderFrame, TurnStats};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Shot fired
    Laser,
    /// Target destroyed
    Explosion,
    /// Shot hit nothing (laser, played faster)
    MissLaser,
    /// Difficulty escalated
    PhaseChange,
}

impl SoundCue {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired { .. } => Some(SoundCue::Laser),
            GameEvent::Hit { .. } => Some(SoundCue::Explosion),
            GameEvent::Miss { .. } => Some(SoundCue::MissLaser),
            GameEvent::PhaseChanged { .. } => Some(SoundCue::PhaseChange),
            _ => None,
        }
    }

    /// Playback speed multiplier
    pub fn playback_rate(self) -> f32 {
        match self {
            SoundCue::MissLaser => 1.5,
            _ => 1.0,
        }
    }
}

/// Callbacks for the presentation layer. Every method defaults to a no-op.
#[allow(unused_variables)]
pub trait Presenter {
    /// Called before the typed callback for every event
    fn on_event(&mut self, event: &GameEvent) -> GameResult<()> {
        Ok(())
    }

    fn render_frame(&mut self, frame: &RenderFrame) -> GameResult<()> {
        Ok(())
    }

    fn phase_changed(&mut self, phase: Phase, message: &str, display_ms: u32) -> GameResult<()> {
        Ok(())
    }

    fn banner_hidden(&mut self) -> GameResult<()> {
        Ok(())
    }

    fn shot_fired(&mut self, pos: Vec2) -> GameResult<()> {
        Ok(())
    }

    /// A target was destroyed at `pos` for `points`
    fn hit(&mut self, pos: Vec2, points: u32, special: bool) -> GameResult<()> {
        Ok(())
    }

    fn miss(&mut self, pos: Vec2) -> GameResult<()> {
        Ok(())
    }

    fn turn_started(&mut self, player: &str, duration_secs: u32) -> GameResult<()> {
        Ok(())
    }

    fn timer_tick(&mut self, time_left: u32) -> GameResult<()> {
        Ok(())
    }

    fn paused(&mut self) -> GameResult<()> {
        Ok(())
    }

    fn resumed(&mut self) -> GameResult<()> {
        Ok(())
    }

    fn turn_complete(&mut self, player: &str, stats: &TurnStats) -> GameResult<()> {
        Ok(())
    }

    fn transition_started(&mut self, next_player: &str, seconds: u32) -> GameResult<()> {
        Ok(())
    }

    fn transition_tick(&mut self, seconds_remaining: u32) -> GameResult<()> {
        Ok(())
    }

    fn match_complete(&mut self, results: &[RankedResult]) -> GameResult<()> {
        Ok(())
    }

    fn play_sound(&mut self, cue: SoundCue) -> GameResult<()> {
        Ok(())
    }
}

/// Route one event to the presenter. Returns how many callbacks failed.
pub fn dispatch<P: Presenter + ?Sized>(presenter: &mut P, event: &GameEvent) -> usize {
    let mut failures = 0;
    let mut report = |result: GameResult<()>| {
        if let Err(e) = result {
            log::warn!("Presenter failed on {}: {}", event.name(), e);
            failures += 1;
        }
    };

    report(presenter.on_event(event));
    report(match event {
        GameEvent::TurnStarted {
            player,
            duration_secs,
        } => presenter.turn_started(player, *duration_secs),
        GameEvent::Frame(frame) => presenter.render_frame(frame),
        GameEvent::TimerTick { time_left } => presenter.timer_tick(*time_left),
        GameEvent::PhaseChanged {
            phase,
            message,
            display_ms,
        } => presenter.phase_changed(*phase, message, *display_ms),
        GameEvent::BannerHidden => presenter.banner_hidden(),
        GameEvent::ShotFired { x, y } => presenter.shot_fired(Vec2::new(*x, *y)),
        GameEvent::Hit {
            x,
            y,
            points,
            special,
        } => presenter.hit(Vec2::new(*x, *y), *points, *special),
        GameEvent::Miss { x, y } => presenter.miss(Vec2::new(*x, *y)),
        GameEvent::Paused => presenter.paused(),
        GameEvent::Resumed => presenter.resumed(),
        GameEvent::TurnComplete { player, stats } => presenter.turn_complete(player, stats),
        GameEvent::TransitionStarted {
            next_player,
            seconds,
        } => presenter.transition_started(next_player, *seconds),
        GameEvent::TransitionTick { seconds_remaining } => {
            presenter.transition_tick(*seconds_remaining)
        }
        GameEvent::MatchComplete { results } => presenter.match_complete(results),
    });
    if let Some(cue) = SoundCue::for_event(event) {
        report(presenter.play_sound(cue));
    }
    failures
}

/// Ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// Writes the interesting events to the log
#[derive(Debug, Clone)]
pub struct LogPresenter {
    volume: f32,
}

impl LogPresenter {
    pub fn new(settings: &Settings) -> Self {
        Self {
            volume: settings.effective_sfx_volume(),
        }
    }
}

impl Default for LogPresenter {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Presenter for LogPresenter {
    fn phase_changed(&mut self, phase: Phase, message: &str, _display_ms: u32) -> GameResult<()> {
        log::info!("PHASE {}: {}", phase.number(), message);
        Ok(())
    }

    fn hit(&mut self, pos: Vec2, points: u32, special: bool) -> GameResult<()> {
        let tag = if special { " (special)" } else { "" };
        log::info!("+{} at ({:.0}, {:.0}){}", points, pos.x, pos.y, tag);
        Ok(())
    }

    fn miss(&mut self, pos: Vec2) -> GameResult<()> {
        log::debug!("Miss at ({:.0}, {:.0})", pos.x, pos.y);
        Ok(())
    }

    fn turn_started(&mut self, player: &str, duration_secs: u32) -> GameResult<()> {
        log::info!("{}'s turn, {}s on the clock", player, duration_secs);
        Ok(())
    }

    fn turn_complete(&mut self, player: &str, stats: &TurnStats) -> GameResult<()> {
        log::info!(
            "{} finished: {} points, {} hits, {}% accuracy",
            player,
            stats.score,
            stats.hits,
            stats.accuracy()
        );
        Ok(())
    }

    fn transition_started(&mut self, next_player: &str, seconds: u32) -> GameResult<()> {
        log::info!("Get ready {}! Starting in {}s", next_player, seconds);
        Ok(())
    }

    fn match_complete(&mut self, results: &[RankedResult]) -> GameResult<()> {
        for r in results {
            log::info!("#{} {} - {} points ({}%)", r.position, r.name, r.score, r.accuracy);
        }
        Ok(())
    }

    fn play_sound(&mut self, cue: SoundCue) -> GameResult<()> {
        if self.volume <= 0.0 {
            return Ok(());
        }
        log::trace!(
            "Sound {:?} at volume {:.2}, rate {}",
            cue,
            self.volume,
            cue.playback_rate()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    #[derive(Default)]
    struct Flaky {
        sounds: Vec<SoundCue>,
        seen: Vec<&'static str>,
    }

    impl Presenter for Flaky {
        fn on_event(&mut self, event: &GameEvent) -> GameResult<()> {
            self.seen.push(event.name());
            Ok(())
        }

        fn hit(&mut self, _pos: Vec2, _points: u32, _special: bool) -> GameResult<()> {
            Err(GameError::presentation("hit", "no floating text"))
        }

        fn play_sound(&mut self, cue: SoundCue) -> GameResult<()> {
            self.sounds.push(cue);
            Ok(())
        }
    }

    #[test]
    fn test_sound_cues() {
        let shot = GameEvent::ShotFired { x: 1.0, y: 2.0 };
        let miss = GameEvent::Miss { x: 1.0, y: 2.0 };
        assert_eq!(SoundCue::for_event(&shot), Some(SoundCue::Laser));
        assert_eq!(SoundCue::for_event(&miss), Some(SoundCue::MissLaser));
        assert_eq!(SoundCue::for_event(&GameEvent::Paused), None);
        assert_eq!(SoundCue::MissLaser.playback_rate(), 1.5);
        assert_eq!(SoundCue::Laser.playback_rate(), 1.0);
    }

    #[test]
    fn test_failure_is_swallowed() {
        let mut presenter = Flaky::default();
        let hit = GameEvent::Hit {
            x: 10.0,
            y: 10.0,
            points: 10,
            special: false,
        };
        assert_eq!(dispatch(&mut presenter, &hit), 1);
        // The sound still plays after the failed callback
        assert_eq!(presenter.sounds, [SoundCue::Explosion]);

        assert_eq!(dispatch(&mut presenter, &GameEvent::BannerHidden), 0);
        assert_eq!(presenter.seen, ["hit", "banner_hidden"]);
    }

    #[test]
    fn test_builtin_presenters_accept_everything() {
        let event = GameEvent::TransitionStarted {
            next_player: "Bob".to_string(),
            seconds: 5,
        };
        assert_eq!(dispatch(&mut NullPresenter, &event), 0);
        assert_eq!(dispatch(&mut LogPresenter::default(), &event), 0);

        let muted = Settings {
            muted: true,
            ..Default::default()
        };
        let mut quiet = LogPresenter::new(&muted);
        assert_eq!(dispatch(&mut quiet, &GameEvent::Miss { x: 0.0, y: 0.0 }), 0);
    }
}
