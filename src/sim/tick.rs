//! Fixed timestep simulation tick
//!
//! `tick` is the 60 Hz step, `countdown` the 1 Hz step and `fire` handles a
//! click synchronously. All three do nothing while the turn is paused or over.

use glam::Vec2;
use rand::Rng;

use super::hit::{hit_test, points_for};
use super::phase::Phase;
use super::physics::step_entities;
use super::spawn::maybe_spawn;
use super::state::{ShotOutcome, TurnState};
use crate::events::GameEvent;

/// Advance the turn by one tick.
///
/// Order: move/explode targets, spawn, evaluate phase, publish the frame.
/// Returns the last phase entered during this tick, if any.
pub fn tick<R: Rng + ?Sized>(state: &mut TurnState, rng: &mut R, banner_ms: u32) -> Option<Phase> {
    if !state.is_active() {
        return None;
    }

    state.time_ticks += 1;

    step_entities(&mut state.entities, state.bounds);

    let now = state.now_ms();
    let (spawned, last_spawn) = maybe_spawn(
        now,
        state.last_spawn_ms,
        state.phase.current(),
        state.bounds,
        rng,
    );
    state.last_spawn_ms = last_spawn;
    for mut entity in spawned {
        entity.id = state.next_entity_id();
        state.entities.push(entity);
    }

    let elapsed = state.elapsed_secs() as f32;
    let mut entered = None;
    while let Some(phase) = state.phase.advance(elapsed) {
        log::info!(
            "{}: phase {} at {}s elapsed",
            state.player,
            phase.number(),
            elapsed
        );
        state.push_event(GameEvent::PhaseChanged {
            phase,
            message: phase.evolution_message().to_string(),
            display_ms: banner_ms,
        });
        entered = Some(phase);
    }

    let frame = state.render_frame();
    state.push_event(GameEvent::Frame(frame));

    entered
}

/// One countdown second. Returns true when the turn just ran out of time.
pub fn countdown(state: &mut TurnState) -> bool {
    if !state.is_active() {
        return false;
    }

    state.time_left = state.time_left.saturating_sub(1);
    state.push_event(GameEvent::TimerTick {
        time_left: state.time_left,
    });

    if state.time_left == 0 {
        state.finished = true;
        return true;
    }
    false
}

/// Handle a click at `pos`. Returns `None` if the click was ignored.
pub fn fire(state: &mut TurnState, pos: Vec2) -> Option<ShotOutcome> {
    if !state.is_active() {
        return None;
    }

    state.cursor = pos;
    state.stats.shots_fired += 1;
    state.push_event(GameEvent::ShotFired { x: pos.x, y: pos.y });

    let Some(index) = hit_test(&state.entities, pos) else {
        state.push_event(GameEvent::Miss { x: pos.x, y: pos.y });
        return Some(ShotOutcome::Miss { pos });
    };

    let phase = state.phase.current();
    let entity = &mut state.entities[index];
    entity.begin_destroy();
    let points = points_for(phase, entity.special);
    let (entity_id, special, at) = (entity.id, entity.special, entity.pos);

    state.stats.hits += 1;
    state.stats.score += points as u64;
    state.push_event(GameEvent::Hit {
        x: at.x,
        y: at.y,
        points,
        special,
    });

    Some(ShotOutcome::Hit {
        entity_id,
        pos: at,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_BANNER_MS;
    use crate::sim::entity::{Entity, ShapeKind, Tint};
    use crate::sim::phase::ThresholdMode;
    use crate::sim::physics::Bounds;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn new_turn() -> TurnState {
        TurnState::new("Alice", 45, ThresholdMode::Fixed, Bounds::default())
    }

    fn add_target(state: &mut TurnState, pos: Vec2, special: bool) -> u32 {
        let mut e = Entity::new(pos, Vec2::ZERO, 20.0, ShapeKind::Circle, special, Tint::Red);
        e.id = state.next_entity_id();
        let id = e.id;
        state.entities.push(e);
        id
    }

    #[test]
    fn test_first_spawn_after_one_second() {
        let mut state = new_turn();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..60 {
            tick(&mut state, &mut rng, DEFAULT_BANNER_MS);
        }
        assert!(state.entities.is_empty(), "1000 ms is not past the interval");
        tick(&mut state, &mut rng, DEFAULT_BANNER_MS);
        assert_eq!(state.entities.len(), 1);
        assert_eq!(state.entities[0].id, 1);
    }

    #[test]
    fn test_tick_emits_frame() {
        let mut state = new_turn();
        let mut rng = Pcg32::seed_from_u64(7);
        tick(&mut state, &mut rng, DEFAULT_BANNER_MS);
        assert!(matches!(state.events.last(), Some(GameEvent::Frame(_))));
    }

    #[test]
    fn test_paused_tick_freezes_everything() {
        let mut state = new_turn();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut e = Entity::new(Vec2::new(100.0, 100.0), Vec2::new(2.0, 0.0), 20.0, ShapeKind::Circle, false, Tint::Red);
        e.id = state.next_entity_id();
        state.entities.push(e);
        state.paused = true;

        assert_eq!(tick(&mut state, &mut rng, DEFAULT_BANNER_MS), None);
        assert!(!countdown(&mut state));
        assert_eq!(fire(&mut state, Vec2::new(100.0, 100.0)), None);

        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.time_left, 45);
        assert_eq!(state.entities[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.stats, Default::default());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_phase_changes_follow_countdown() {
        let mut state = new_turn();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut changes = Vec::new();
        for _ in 0..44 {
            countdown(&mut state);
            if let Some(phase) = tick(&mut state, &mut rng, DEFAULT_BANNER_MS) {
                changes.push((state.time_left, phase));
            }
        }
        assert_eq!(changes, vec![(30, Phase::Two), (15, Phase::Three)]);
        let banners = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::PhaseChanged { .. }))
            .count();
        assert_eq!(banners, 2);
    }

    #[test]
    fn test_countdown_ends_turn() {
        let mut state = new_turn();
        for _ in 0..44 {
            assert!(!countdown(&mut state));
        }
        assert!(countdown(&mut state));
        assert!(state.finished);
        assert!(!countdown(&mut state), "finished turns ignore the countdown");
        assert_eq!(state.time_left, 0);
    }

    #[test]
    fn test_fire_hit_scores_and_destroys() {
        let mut state = new_turn();
        let id = add_target(&mut state, Vec2::new(100.0, 100.0), false);

        let outcome = fire(&mut state, Vec2::new(105.0, 100.0));
        assert_eq!(
            outcome,
            Some(ShotOutcome::Hit {
                entity_id: id,
                pos: Vec2::new(100.0, 100.0),
                points: 10
            })
        );
        assert_eq!(state.stats.shots_fired, 1);
        assert_eq!(state.stats.hits, 1);
        assert_eq!(state.stats.score, 10);
        assert!(state.entities[0].is_destroying());
        assert_eq!(state.cursor, Vec2::new(105.0, 100.0));

        // The exploding target can't be hit again
        let outcome = fire(&mut state, Vec2::new(105.0, 100.0));
        assert!(matches!(outcome, Some(ShotOutcome::Miss { .. })));
        assert_eq!(state.stats.shots_fired, 2);
        assert_eq!(state.stats.hits, 1);
        assert_eq!(state.stats.score, 10);
    }

    #[test]
    fn test_special_hit_in_phase_two() {
        let mut state = new_turn();
        state.phase.advance(15.0);
        add_target(&mut state, Vec2::new(200.0, 200.0), true);
        let outcome = fire(&mut state, Vec2::new(200.0, 200.0));
        assert!(matches!(outcome, Some(ShotOutcome::Hit { points: 30, .. })));
        assert_eq!(state.stats.score, 30);
    }

    #[test]
    fn test_miss_emits_shot_and_miss() {
        let mut state = new_turn();
        fire(&mut state, Vec2::new(10.0, 10.0));
        assert_eq!(
            state.events,
            vec![
                GameEvent::ShotFired { x: 10.0, y: 10.0 },
                GameEvent::Miss { x: 10.0, y: 10.0 },
            ]
        );
    }
}
