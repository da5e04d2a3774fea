//! Time-driven pursuer spawning
//!
//! Population is a step function of elapsed survival time, not a raw
//! interval: the target count at E whole seconds is `E / 2 + 1`, checked
//! every frame. Expressing it as a target makes the rule self-healing -
//! if frames are dropped the population catches up one spawn per frame
//! instead of drifting permanently low.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Pursuer};
use crate::consts::*;

/// Target pursuer population at `elapsed_secs` whole seconds. Grows by
/// one roughly every two seconds.
pub fn target_population(elapsed_secs: u32) -> usize {
    (elapsed_secs / 2) as usize + 1
}

/// Append at most one pursuer if the elapsed time qualifies and the
/// population is below target. Qualifying seconds are even and nonzero,
/// so nothing spawns before E=2.
pub fn run(state: &mut GameState, elapsed_secs: u32) {
    if elapsed_secs == 0 || !elapsed_secs.is_multiple_of(2) {
        return;
    }
    if state.pursuers.len() < target_population(elapsed_secs) {
        let pos = edge_position(&mut state.rng);
        state.pursuers.push(Pursuer::new(pos));
    }
}

/// Pick a spawn point just outside the visible bounds: one of the four
/// edges uniformly, then a uniform coordinate along it.
pub fn edge_position(rng: &mut impl Rng) -> Vec2 {
    // 0: top, 1: right, 2: bottom, 3: left
    match rng.random_range(0..4u8) {
        0 => Vec2::new(rng.random_range(0.0..LOGICAL_WIDTH), -SPAWN_MARGIN),
        1 => Vec2::new(
            LOGICAL_WIDTH + SPAWN_MARGIN,
            rng.random_range(0.0..LOGICAL_HEIGHT),
        ),
        2 => Vec2::new(
            rng.random_range(0.0..LOGICAL_WIDTH),
            LOGICAL_HEIGHT + SPAWN_MARGIN,
        ),
        _ => Vec2::new(-SPAWN_MARGIN, rng.random_range(0.0..LOGICAL_HEIGHT)),
    }
}
