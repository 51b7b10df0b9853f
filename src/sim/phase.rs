//! Difficulty phases
//!
//! A turn starts in phase 1 and escalates on elapsed time. Phases never go
//! backwards within a turn; the controller is rebuilt for every new turn.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TURN_SECS, PHASE2_AT_SECS, PHASE3_AT_SECS};

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    One,
    Two,
    Three,
}

/// Tuning values attached to a phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseParams {
    /// Max speed per axis (px per tick)
    pub enemy_speed: f32,
    /// Minimum gap between spawns (ms)
    pub spawn_interval_ms: u64,
    /// Targets created per spawn
    pub spawn_count: usize,
    /// Points for a regular hit
    pub base_points: u32,
}

impl Phase {
    pub fn number(self) -> u8 {
        match self {
            Phase::One => 1,
            Phase::Two => 2,
            Phase::Three => 3,
        }
    }

    pub fn params(self) -> PhaseParams {
        match self {
            Phase::One => PhaseParams {
                enemy_speed: 2.0,
                spawn_interval_ms: 1000,
                spawn_count: 1,
                base_points: 10,
            },
            Phase::Two => PhaseParams {
                enemy_speed: 3.5,
                spawn_interval_ms: 1000,
                spawn_count: 1,
                base_points: 15,
            },
            Phase::Three => PhaseParams {
                enemy_speed: 3.5,
                spawn_interval_ms: 500,
                spawn_count: 2,
                base_points: 20,
            },
        }
    }

    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::One => Some(Phase::Two),
            Phase::Two => Some(Phase::Three),
            Phase::Three => None,
        }
    }

    /// Banner text announced when this phase begins
    pub fn evolution_message(self) -> &'static str {
        match self {
            Phase::One => "Get ready!",
            Phase::Two => "Enemies are speeding up!",
            Phase::Three => "Two enemies at once!",
        }
    }
}

/// How phase thresholds relate to the configured turn duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThresholdMode {
    /// 15 s and 30 s regardless of turn length
    #[default]
    Fixed,
    /// 1/3 and 2/3 of the turn, matching the 45 s baseline ratios
    Scaled,
}

/// Timed phase state machine for one turn
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseController {
    phase: Phase,
    phase2_at: f32,
    phase3_at: f32,
}

impl PhaseController {
    pub fn new(turn_duration_secs: u32, mode: ThresholdMode) -> Self {
        let (phase2_at, phase3_at) = match mode {
            ThresholdMode::Fixed => (PHASE2_AT_SECS, PHASE3_AT_SECS),
            ThresholdMode::Scaled => {
                let scale = turn_duration_secs as f32 / DEFAULT_TURN_SECS as f32;
                (PHASE2_AT_SECS * scale, PHASE3_AT_SECS * scale)
            }
        };
        Self {
            phase: Phase::One,
            phase2_at,
            phase3_at,
        }
    }

    #[inline]
    pub fn current(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn params(&self) -> PhaseParams {
        self.phase.params()
    }

    /// Elapsed seconds at which each phase starts
    pub fn thresholds(&self) -> (f32, f32) {
        (self.phase2_at, self.phase3_at)
    }

    /// Highest phase the elapsed time entitles the turn to
    fn target_for(&self, elapsed_secs: f32) -> Phase {
        if elapsed_secs >= self.phase3_at {
            Phase::Three
        } else if elapsed_secs >= self.phase2_at {
            Phase::Two
        } else {
            Phase::One
        }
    }

    /// Step at most one phase forward. Returns the phase entered, if any.
    ///
    /// Call repeatedly until it returns `None` to catch up after a large jump
    /// in elapsed time; each transition is still reported exactly once.
    pub fn advance(&mut self, elapsed_secs: f32) -> Option<Phase> {
        if self.target_for(elapsed_secs) <= self.phase {
            return None;
        }
        let next = self.phase.next()?;
        self.phase = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_per_phase() {
        assert_eq!(Phase::One.params().base_points, 10);
        assert_eq!(Phase::Two.params().base_points, 15);
        assert_eq!(Phase::Three.params().base_points, 20);
        assert_eq!(Phase::Two.params().enemy_speed, 3.5);
        assert_eq!(Phase::Three.params().spawn_interval_ms, 500);
        assert_eq!(Phase::Three.params().spawn_count, 2);
        assert_eq!(Phase::One.params().spawn_count, 1);
    }

    #[test]
    fn test_transitions_fire_once() {
        let mut ctl = PhaseController::new(45, ThresholdMode::Fixed);
        assert_eq!(ctl.advance(14.0), None);
        assert_eq!(ctl.advance(15.0), Some(Phase::Two));
        assert_eq!(ctl.advance(15.0), None);
        assert_eq!(ctl.advance(29.0), None);
        assert_eq!(ctl.advance(30.0), Some(Phase::Three));
        assert_eq!(ctl.advance(44.0), None);
        assert_eq!(ctl.current(), Phase::Three);
    }

    #[test]
    fn test_never_regresses() {
        let mut ctl = PhaseController::new(45, ThresholdMode::Fixed);
        ctl.advance(16.0);
        assert_eq!(ctl.advance(3.0), None);
        assert_eq!(ctl.current(), Phase::Two);
    }

    #[test]
    fn test_catch_up_steps_one_at_a_time() {
        let mut ctl = PhaseController::new(45, ThresholdMode::Fixed);
        assert_eq!(ctl.advance(40.0), Some(Phase::Two));
        assert_eq!(ctl.advance(40.0), Some(Phase::Three));
        assert_eq!(ctl.advance(40.0), None);
    }

    #[test]
    fn test_scaled_thresholds() {
        let ctl = PhaseController::new(90, ThresholdMode::Scaled);
        assert_eq!(ctl.thresholds(), (30.0, 60.0));

        let fixed = PhaseController::new(90, ThresholdMode::Fixed);
        assert_eq!(fixed.thresholds(), (15.0, 30.0));
    }
}
