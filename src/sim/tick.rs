//! Frame-driven simulation tick
//!
//! Input events are applied the moment they arrive; continuous motion is
//! advanced once per animation frame from the elapsed wall-clock time.

use rand::RngCore;

use super::landing::{Landing, evaluate_landing};
use super::state::{GameEvent, GamePhase, GameState, Stick};
use super::world;
use crate::consts::*;

/// Discrete player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Press began (mouse down, touch start, key down)
    Press,
    /// Press ended
    Release,
    /// Restart button
    Restart,
}

/// Apply an input event immediately. Events that don't fit the current phase
/// are ignored.
pub fn handle_input(state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::Press => {
            if state.phase != GamePhase::Waiting {
                return;
            }
            state.stick = Stick::anchored_at(state.current_platform().right());
            state.last_timestamp = None;
            state.last_landing = None;
            state.show_intro = false;
            set_phase(state, GamePhase::Stretching);
            state.events.push(GameEvent::Stretching);
        }
        InputEvent::Release => {
            if state.phase == GamePhase::Stretching {
                set_phase(state, GamePhase::Turning);
            }
        }
        InputEvent::Restart => {
            let seed = state.rng.next_u64();
            state.restart(seed);
        }
    }
}

/// Advance by one animation frame stamped `timestamp` (ms).
///
/// The first frame after a press only records the timestamp, so a long idle
/// gap never turns into one huge step.
pub fn tick(state: &mut GameState, timestamp: f64) {
    if state.phase == GamePhase::Waiting {
        return;
    }

    let Some(last) = state.last_timestamp.replace(timestamp) else {
        return;
    };
    advance(state, (timestamp - last) as f32);
}

/// Advance continuous motion by `elapsed` ms.
///
/// Negative or non-finite values are treated as zero.
pub fn advance(state: &mut GameState, elapsed: f32) {
    let elapsed = if elapsed.is_finite() && elapsed > 0.0 {
        elapsed
    } else {
        0.0
    };

    match state.phase {
        GamePhase::Waiting => {}

        GamePhase::Stretching => {
            state.stick.length += elapsed / state.tuning.stretching_speed;
        }

        GamePhase::Turning => {
            state.stick.rotation += elapsed / state.tuning.turning_speed;
            if state.stick.rotation >= STICK_MAX_ROTATION {
                state.stick.rotation = STICK_MAX_ROTATION;
                set_phase(state, GamePhase::Walking);
            }
        }

        GamePhase::Walking => {
            state.hero_x += elapsed / state.tuning.walking_speed;
            // Phase changes below, so this fires once per walk
            if state.hero_x > state.stick.end_x() {
                resolve_landing(state);
            }
        }

        GamePhase::Transitioning => {
            state.scene_offset += elapsed / state.tuning.transitioning_speed;
            let distance = state.next_platform().x - state.current_platform().x;
            if state.scene_offset >= distance {
                complete_cycle(state);
            }
        }

        GamePhase::Falling => {
            state.hero_y += elapsed / state.tuning.falling_speed;
            if state.hero_y > CANVAS_HEIGHT && !state.show_restart {
                state.show_restart = true;
                log::info!("Game over with score {}", state.score);
                state.events.push(GameEvent::GameOver);
            }
        }
    }
}

fn resolve_landing(state: &mut GameState) {
    let landing = evaluate_landing(
        &state.stick,
        &state.next_platform(),
        state.tuning.perfect_area_size,
    );
    state.last_landing = Some(landing);

    match landing {
        Landing::Land { perfect } => {
            state.score += 1;
            if perfect {
                state.perfect_count += 1;
            }
            log::info!(
                "Landed at {:.1} (score {}, perfect: {})",
                state.stick.end_x(),
                state.score,
                perfect
            );
            state.events.push(GameEvent::Landed {
                perfect,
                score: state.score,
            });
            set_phase(state, GamePhase::Transitioning);
        }
        Landing::Miss => {
            log::info!(
                "Missed: stick ends at {:.1}, platform spans {:.1}..{:.1}",
                state.stick.end_x(),
                state.next_platform().x,
                state.next_platform().right()
            );
            state.events.push(GameEvent::Fell);
            set_phase(state, GamePhase::Falling);
        }
    }
}

fn complete_cycle(state: &mut GameState) {
    state.scene_offset = 0.0;
    world::roll_over(state);
    state.place_on_current_platform();
    state.events.push(GameEvent::CycleComplete);
    set_phase(state, GamePhase::Waiting);
}

fn set_phase(state: &mut GameState, phase: GamePhase) {
    log::debug!("Phase {} -> {}", state.phase.as_str(), phase.as_str());
    state.phase = phase;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Platform;
    use proptest::prelude::*;

    /// Stretch, release and let the stick fall flat with the given length
    fn lay_stick(state: &mut GameState, length: f32) {
        let tuning = state.tuning.clone();
        handle_input(state, InputEvent::Press);
        advance(state, length * tuning.stretching_speed);
        handle_input(state, InputEvent::Release);
        advance(state, STICK_MAX_ROTATION * tuning.turning_speed);
        assert_eq!(state.phase, GamePhase::Walking);
    }

    /// Walk the hero just past the end of the stick
    fn walk_off_stick(state: &mut GameState) {
        let elapsed = (state.stick.end_x() - state.hero_x + 1.0) * state.tuning.walking_speed;
        advance(state, elapsed);
    }

    /// Deterministic two-platform layout used by the worked examples
    fn fixed_state() -> GameState {
        let mut state = GameState::new(1);
        state.platforms[0] = Platform { x: 50.0, width: 50.0 };
        state.platforms[1] = Platform { x: 140.0, width: 30.0 };
        state.place_on_current_platform();
        state
    }

    #[test]
    fn test_press_release_without_time() {
        let mut state = GameState::new(12345);
        handle_input(&mut state, InputEvent::Press);
        assert_eq!(state.phase, GamePhase::Stretching);
        advance(&mut state, 0.0);
        handle_input(&mut state, InputEvent::Release);
        assert_eq!(state.phase, GamePhase::Turning);
        assert_eq!(state.stick.length, 0.0);
        assert_eq!(state.stick.rotation, 0.0);

        // Next tick keeps turning
        advance(&mut state, 4.0);
        assert_eq!(state.phase, GamePhase::Turning);
        assert!((state.stick.rotation - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_ignored_inputs() {
        let mut state = GameState::new(5);
        handle_input(&mut state, InputEvent::Release);
        assert_eq!(state.phase, GamePhase::Waiting);

        advance(&mut state, 1000.0);
        assert_eq!(state.phase, GamePhase::Waiting);
        assert_eq!(state.stick.length, 0.0);

        handle_input(&mut state, InputEvent::Press);
        advance(&mut state, 40.0);
        let length = state.stick.length;
        handle_input(&mut state, InputEvent::Press);
        assert_eq!(state.phase, GamePhase::Stretching);
        assert_eq!(state.stick.length, length);
    }

    #[test]
    fn test_bad_elapsed_is_zero() {
        let mut state = GameState::new(5);
        handle_input(&mut state, InputEvent::Press);
        advance(&mut state, -50.0);
        advance(&mut state, f32::NAN);
        advance(&mut state, f32::INFINITY);
        assert_eq!(state.stick.length, 0.0);
    }

    #[test]
    fn test_first_tick_is_baseline() {
        let mut state = GameState::new(5);
        handle_input(&mut state, InputEvent::Press);
        tick(&mut state, 10_000.0);
        assert_eq!(state.stick.length, 0.0);
        tick(&mut state, 10_040.0);
        assert!((state.stick.length - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_waiting_tick_does_nothing() {
        let mut state = GameState::new(5);
        tick(&mut state, 100.0);
        tick(&mut state, 5000.0);
        assert_eq!(state.last_timestamp, None);
        assert_eq!(state.phase, GamePhase::Waiting);
    }

    #[test]
    fn test_turning_clamps_and_walks_same_tick() {
        let mut state = GameState::new(9);
        handle_input(&mut state, InputEvent::Press);
        advance(&mut state, 100.0);
        handle_input(&mut state, InputEvent::Release);
        advance(&mut state, 300.0);
        assert_eq!(state.phase, GamePhase::Turning);
        assert!((state.stick.rotation - 75.0).abs() < 0.001);

        advance(&mut state, 1000.0);
        assert_eq!(state.stick.rotation, STICK_MAX_ROTATION);
        assert_eq!(state.phase, GamePhase::Walking);
    }

    #[test]
    fn test_worked_example_miss() {
        let mut state = fixed_state();
        lay_stick(&mut state, 90.0);
        assert_eq!(state.stick.end_x(), 190.0);
        walk_off_stick(&mut state);
        assert_eq!(state.phase, GamePhase::Falling);
        assert_eq!(state.last_landing, Some(Landing::Miss));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_worked_example_land() {
        let mut state = fixed_state();
        lay_stick(&mut state, 60.0);
        assert_eq!(state.stick.end_x(), 160.0);
        walk_off_stick(&mut state);
        assert_eq!(state.phase, GamePhase::Transitioning);
        assert_eq!(state.score, 1);
        assert!(state.last_landing.is_some_and(|l| l.is_success()));
    }

    #[test]
    fn test_landing_fires_once_per_walk() {
        let mut state = fixed_state();
        lay_stick(&mut state, 90.0);
        walk_off_stick(&mut state);
        let hero_x = state.hero_x;
        for _ in 0..100 {
            advance(&mut state, 16.0);
        }
        assert_eq!(state.hero_x, hero_x);
        let falls = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Fell)
            .count();
        assert_eq!(falls, 1);

        let mut state = fixed_state();
        lay_stick(&mut state, 60.0);
        walk_off_stick(&mut state);
        advance(&mut state, 1.0);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_perfect_landing_is_reported_not_scored() {
        let mut state = fixed_state();
        lay_stick(&mut state, 55.0);
        walk_off_stick(&mut state);
        assert_eq!(state.score, 1);
        assert_eq!(state.perfect_count, 1);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Landed { perfect: true, score: 1 })
        );
    }

    #[test]
    fn test_full_cycle() {
        let mut state = GameState::new(2024);
        let count = state.platforms.len();
        let next = state.next_platform();

        let target = next.center() - state.stick.x;
        lay_stick(&mut state, target);
        walk_off_stick(&mut state);
        assert_eq!(state.phase, GamePhase::Transitioning);

        let distance = next.x - state.current_platform().x;
        let speed = state.tuning.transitioning_speed;
        advance(&mut state, distance * speed / 2.0);
        assert_eq!(state.phase, GamePhase::Transitioning);
        assert!(state.scene_offset > 0.0);

        advance(&mut state, distance * speed);
        assert_eq!(state.phase, GamePhase::Waiting);
        assert_eq!(state.score, 1);
        assert_eq!(state.platforms.len(), count);
        assert_eq!(state.scene_offset, 0.0);
        assert_eq!(state.hero_y, 0.0);

        let edge = state.current_platform().right();
        assert_eq!(state.stick, Stick::anchored_at(edge));
        assert!((state.hero_x - (edge - state.tuning.hero_distance_from_edge)).abs() < 0.001);
        assert!((state.current_platform().width - next.width).abs() < 0.001);
        assert!(state.drain_events().contains(&GameEvent::CycleComplete));
    }

    #[test]
    fn test_falling_and_restart_affordance() {
        let mut state = fixed_state();
        lay_stick(&mut state, 10.0);
        walk_off_stick(&mut state);
        assert_eq!(state.phase, GamePhase::Falling);

        let mut last_y = state.hero_y;
        while state.hero_y <= CANVAS_HEIGHT {
            assert!(!state.show_restart);
            advance(&mut state, 16.0);
            assert!(state.hero_y > last_y);
            last_y = state.hero_y;
        }
        assert!(state.show_restart);
        assert_eq!(state.phase, GamePhase::Falling);

        advance(&mut state, 16.0);
        let game_overs = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::GameOver)
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_restart_from_every_phase() {
        let phases = [
            GamePhase::Waiting,
            GamePhase::Stretching,
            GamePhase::Turning,
            GamePhase::Walking,
            GamePhase::Transitioning,
            GamePhase::Falling,
        ];
        for phase in phases {
            let mut state = GameState::new(77);
            state.score = 4;
            state.scene_offset = 12.0;
            state.hero_y = 400.0;
            state.show_restart = true;
            state.phase = phase;

            handle_input(&mut state, InputEvent::Restart);

            assert_eq!(state.phase, GamePhase::Waiting);
            assert_eq!(state.score, 0);
            assert_eq!(state.scene_offset, 0.0);
            assert_eq!(state.hero_y, 0.0);
            assert!(!state.show_restart);
            assert_eq!(state.platforms.len(), LOOKAHEAD_PLATFORMS + 1);
            for pair in state.platforms.windows(2) {
                assert!(pair[1].x >= pair[0].right() + MIN_GAP);
            }
        }
    }

    #[test]
    fn test_first_tick_after_restart_is_baseline() {
        let mut state = GameState::new(8);
        handle_input(&mut state, InputEvent::Press);
        tick(&mut state, 1000.0);
        tick(&mut state, 1040.0);
        assert_eq!(state.last_timestamp, Some(1040.0));

        handle_input(&mut state, InputEvent::Restart);
        assert_eq!(state.last_timestamp, None);
        // Waiting frames don't set a baseline either
        tick(&mut state, 5000.0);
        assert_eq!(state.last_timestamp, None);

        handle_input(&mut state, InputEvent::Press);
        tick(&mut state, 9000.0);
        assert_eq!(state.stick.length, 0.0);
        tick(&mut state, 9040.0);
        assert_eq!(state.stick.length, 40.0 / state.tuning.stretching_speed);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        for state in [&mut state1, &mut state2] {
            let target = state.next_platform().center() - state.stick.x;
            lay_stick(state, target);
            walk_off_stick(state);
            advance(state, 10_000.0);
        }

        assert_eq!(state1.platforms, state2.platforms);
        assert_eq!(state1.trees, state2.trees);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.hero_x, state2.hero_x);
    }

    proptest! {
        #[test]
        fn prop_rotation_never_exceeds_flat(steps in prop::collection::vec(0.0f32..200.0, 1..50)) {
            let mut state = GameState::new(1);
            handle_input(&mut state, InputEvent::Press);
            advance(&mut state, 100.0);
            handle_input(&mut state, InputEvent::Release);
            for elapsed in steps {
                let was_turning = state.phase == GamePhase::Turning;
                advance(&mut state, elapsed);
                prop_assert!(state.stick.rotation <= STICK_MAX_ROTATION);
                if was_turning && state.stick.rotation == STICK_MAX_ROTATION {
                    prop_assert_ne!(state.phase, GamePhase::Turning);
                }
            }
        }
    }
}
