//! Per-frame simulation step
//!
//! One invocation advances the game by exactly one frame. All randomness
//! comes from the state's seeded RNG, and the clock value is passed in,
//! so a state plus an input trace fully determines the outcome.

use glam::Vec2;
use rand::Rng;

use super::input::InputSnapshot;
use super::spawn;
use super::state::{GamePhase, GameState, Player, Pursuer};
use crate::consts::*;
use crate::ui;

/// Advance the game state by one frame. `now_ms` is the current clock
/// reading; elapsed survival time is derived from it and the run's start
/// timestamp.
pub fn tick(state: &mut GameState, input: &InputSnapshot, now_ms: f64) {
    if state.phase == GamePhase::GameOver {
        // Only the restart control is live. Clicks elsewhere are ignored.
        if let Some(click) = input.restart_click
            && ui::restart_button().contains(click)
        {
            state.reset(now_ms);
        }
        return;
    }

    state.frame += 1;

    // Player movement from both input sources, then clamp fully inside
    // the playfield
    let delta = input.movement(state.player.speed);
    state.player.pos += delta;
    state.player.pos.x = state
        .player
        .pos
        .x
        .clamp(state.player.radius, LOGICAL_WIDTH - state.player.radius);
    state.player.pos.y = state
        .player
        .pos
        .y
        .clamp(state.player.radius, LOGICAL_HEIGHT - state.player.radius);

    // Pursuit, jitter, and collision in one pass. Overlapping pursuers
    // are allowed; there is no avoidance between them.
    let player = state.player;
    let mut caught = false;
    let rng = &mut state.rng;
    for pursuer in state.pursuers.iter_mut() {
        let jitter = Vec2::new(
            rng.random_range(-JITTER..=JITTER),
            rng.random_range(-JITTER..=JITTER),
        );
        pursue(pursuer, player.pos, jitter);
        if collides(pursuer, &player) {
            caught = true;
        }
    }
    if caught {
        state.phase = GamePhase::GameOver;
    }

    // Clock and spawner. The spawner still sees the frame a collision
    // lands on; the phase gate at the top stops it from the next frame.
    let elapsed = ((now_ms - state.started_at) / 1000.0).floor().max(0.0) as u32;
    state.elapsed_secs = elapsed;
    spawn::run(state, elapsed);
}

/// Move a pursuer one frame toward `target`, plus the given jitter. A
/// pursuer exactly coincident with the target has no defined direction
/// and doesn't advance (`normalize_or_zero` instead of a NaN blowup).
pub fn pursue(pursuer: &mut Pursuer, target: Vec2, jitter: Vec2) {
    let dir = (target - pursuer.pos).normalize_or_zero();
    pursuer.pos += dir * pursuer.speed + jitter;
}

/// Circle-circle contact test between a pursuer and the player
pub fn collides(pursuer: &Pursuer, player: &Player) -> bool {
    pursuer.pos.distance(player.pos) < pursuer.radius + player.radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Run `frames` ticks with the same input, advancing the clock one
    /// frame-length per tick
    fn run_frames(state: &mut GameState, input: &InputSnapshot, frames: u64) {
        for _ in 0..frames {
            let now = (state.frame + 1) as f64 * FRAME_MS;
            tick(state, input, now);
        }
    }

    #[test]
    fn test_no_spawn_during_first_second() {
        let mut state = GameState::new(3, 0.0);
        run_frames(&mut state, &InputSnapshot::default(), 60);
        assert_eq!(state.elapsed_secs, 1);
        assert!(state.pursuers.is_empty());
    }

    #[test]
    fn test_first_spawn_at_two_seconds_then_catch_up() {
        let mut state = GameState::new(3, 0.0);
        run_frames(&mut state, &InputSnapshot::default(), 120);
        assert_eq!(state.elapsed_secs, 2);
        // First qualifying frame appends exactly one
        assert_eq!(state.pursuers.len(), 1);
        // Next frame catches up to the target of E/2 + 1 = 2
        run_frames(&mut state, &InputSnapshot::default(), 1);
        assert_eq!(state.pursuers.len(), 2);
        // Population holds at target while E stays 2
        run_frames(&mut state, &InputSnapshot::default(), 10);
        assert_eq!(state.pursuers.len(), 2);
    }

    #[test]
    fn test_right_key_moves_exactly_speed_per_frame() {
        let mut state = GameState::new(3, 0.0);
        let input = InputSnapshot {
            right: true,
            ..Default::default()
        };
        // Freeze the clock at 0 so no pursuers interfere
        for _ in 0..10 {
            tick(&mut state, &input, 0.0);
        }
        assert_eq!(state.player.pos.x, 400.0 + 10.0 * PLAYER_SPEED);
        assert_eq!(state.player.pos.y, 300.0);
    }

    #[test]
    fn test_player_clamps_at_right_edge() {
        let mut state = GameState::new(3, 0.0);
        let input = InputSnapshot {
            right: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &input, 0.0);
        }
        assert_eq!(state.player.pos.x, LOGICAL_WIDTH - PLAYER_RADIUS);
    }

    #[test]
    fn test_pursuer_closes_exact_speed_without_jitter() {
        let target = Vec2::new(400.0, 300.0);
        let mut pursuer = Pursuer::new(Vec2::new(400.0 - 100.0, 300.0));
        pursue(&mut pursuer, target, Vec2::ZERO);
        assert!((pursuer.pos.x - (300.0 + PURSUER_SPEED)).abs() < 1e-4);
        assert_eq!(pursuer.pos.y, 300.0);
        // Distance shrinks by exactly the speed each call
        let d0 = pursuer.pos.distance(target);
        pursue(&mut pursuer, target, Vec2::ZERO);
        let d1 = pursuer.pos.distance(target);
        assert!((d0 - d1 - PURSUER_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_coincident_pursuer_is_guarded() {
        let target = Vec2::new(400.0, 300.0);
        let mut pursuer = Pursuer::new(target);
        pursue(&mut pursuer, target, Vec2::ZERO);
        assert!(pursuer.pos.is_finite());
        assert_eq!(pursuer.pos, target);
    }

    #[test]
    fn test_contact_ends_the_run_and_freezes_state() {
        let mut state = GameState::new(3, 0.0);
        // Adjacent pursuer - within contact range even against max jitter
        state
            .pursuers
            .push(Pursuer::new(state.player.pos + Vec2::new(5.0, 0.0)));
        tick(&mut state, &InputSnapshot::default(), 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Further ticks mutate nothing, spawner included
        let frozen_player = state.player.pos;
        let frozen_pursuers = state.pursuers.clone();
        let input = InputSnapshot {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, 60_000.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.pos, frozen_player);
        assert_eq!(state.pursuers.len(), frozen_pursuers.len());
        for (a, b) in state.pursuers.iter().zip(frozen_pursuers.iter()) {
            assert_eq!(a.pos, b.pos);
        }
    }

    #[test]
    fn test_coincident_pursuer_still_triggers_game_over() {
        let mut state = GameState::new(3, 0.0);
        state.pursuers.push(Pursuer::new(state.player.pos));
        tick(&mut state, &InputSnapshot::default(), 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.pursuers[0].pos.is_finite());
    }

    #[test]
    fn test_restart_click_inside_button() {
        let mut state = GameState::new(3, 0.0);
        state.phase = GamePhase::GameOver;
        state.pursuers.push(Pursuer::new(Vec2::new(100.0, 100.0)));
        state.elapsed_secs = 9;

        let input = InputSnapshot {
            restart_click: Some(ui::restart_button().center()),
            ..Default::default()
        };
        tick(&mut state, &input, 9_500.0);

        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.pursuers.is_empty());
        assert_eq!(state.elapsed_secs, 0);
        assert_eq!(state.started_at, 9_500.0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_restart_click_outside_button_ignored() {
        let mut state = GameState::new(3, 0.0);
        state.phase = GamePhase::GameOver;
        let input = InputSnapshot {
            restart_click: Some(Vec2::new(10.0, 10.0)),
            ..Default::default()
        };
        tick(&mut state, &input, 9_500.0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_click_while_playing_does_nothing() {
        let mut state = GameState::new(3, 0.0);
        let input = InputSnapshot {
            restart_click: Some(ui::restart_button().center()),
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_determinism_same_seed_same_trace() {
        let mut a = GameState::new(99999, 0.0);
        let mut b = GameState::new(99999, 0.0);
        let input = InputSnapshot {
            up: true,
            left: true,
            ..Default::default()
        };
        run_frames(&mut a, &input, 300);
        run_frames(&mut b, &input, 300);

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.pursuers.len(), b.pursuers.len());
        for (pa, pb) in a.pursuers.iter().zip(b.pursuers.iter()) {
            assert_eq!(pa.pos, pb.pos);
        }
    }

    proptest! {
        #[test]
        fn prop_player_never_leaves_bounds(
            seed: u64,
            moves in prop::collection::vec(any::<(bool, bool, bool, bool)>(), 1..300),
        ) {
            let mut state = GameState::new(seed, 0.0);
            for (i, (up, down, left, right)) in moves.into_iter().enumerate() {
                let input = InputSnapshot { up, down, left, right, ..Default::default() };
                tick(&mut state, &input, (i + 1) as f64 * FRAME_MS);
                prop_assert!(state.player.pos.x >= PLAYER_RADIUS);
                prop_assert!(state.player.pos.x <= LOGICAL_WIDTH - PLAYER_RADIUS);
                prop_assert!(state.player.pos.y >= PLAYER_RADIUS);
                prop_assert!(state.player.pos.y <= LOGICAL_HEIGHT - PLAYER_RADIUS);
            }
        }

        #[test]
        fn prop_pursuer_count_monotone_and_capped(seed: u64, frames in 1u64..900) {
            let mut state = GameState::new(seed, 0.0);
            let mut prev = 0usize;
            for f in 1..=frames {
                tick(&mut state, &InputSnapshot::default(), f as f64 * FRAME_MS);
                let cap = (state.elapsed_secs / 2) as usize + 1;
                prop_assert!(state.pursuers.len() <= cap);
                prop_assert!(state.pursuers.len() >= prev);
                prev = state.pursuers.len();
            }
        }
    }
}
