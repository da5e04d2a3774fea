//! Game state and core simulation types
//!
//! Everything the tick mutates lives here, including the seeded RNG:
//! two states built from the same seed and fed the same inputs evolve
//! identically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended - only restart hit-testing is live
    GameOver,
}

/// The player-controlled circle
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per frame
    pub speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(LOGICAL_WIDTH / 2.0, LOGICAL_HEIGHT / 2.0),
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
        }
    }
}

impl Player {
    /// Put the player back at the surface center
    pub fn recenter(&mut self) {
        self.pos = Vec2::new(LOGICAL_WIDTH / 2.0, LOGICAL_HEIGHT / 2.0);
    }
}

/// A pursuing circle. Spawned at the playfield edges, never despawned
/// within a run.
#[derive(Debug, Clone, Copy)]
pub struct Pursuer {
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per frame, fixed at spawn
    pub speed: f32,
}

impl Pursuer {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PURSUER_RADIUS,
            speed: PURSUER_SPEED,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG - jitter and spawn placement draw from here only
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Timestamp (ms) the current run started
    pub started_at: f64,
    /// Whole seconds survived so far, recomputed each frame for the HUD
    pub elapsed_secs: u32,
    /// Frames simulated in the current run
    pub frame: u64,
    /// The player
    pub player: Player,
    /// Active pursuers, in spawn order
    pub pursuers: Vec<Pursuer>,
    /// Completed runs since construction - salts the RNG on restart
    runs: u64,
}

impl GameState {
    /// Create a new game state with the given seed, starting the clock at
    /// `now_ms`
    pub fn new(seed: u64, now_ms: f64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            started_at: now_ms,
            elapsed_secs: 0,
            frame: 0,
            player: Player::default(),
            pursuers: Vec::new(),
            runs: 0,
        }
    }

    /// Full reset for a new run: clock restarted, pursuers cleared, player
    /// re-centered. The RNG is reseeded with a per-run salt so successive
    /// runs don't replay the same spawn pattern.
    pub fn reset(&mut self, now_ms: f64) {
        self.runs += 1;
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.runs));
        self.phase = GamePhase::Playing;
        self.started_at = now_ms;
        self.elapsed_secs = 0;
        self.frame = 0;
        self.player.recenter();
        self.pursuers.clear();
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_centered_and_empty() {
        let state = GameState::new(7, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert!(state.pursuers.is_empty());
        assert_eq!(state.elapsed_secs, 0);
    }

    #[test]
    fn test_reset_restores_initial_shape() {
        let mut state = GameState::new(7, 0.0);
        state.player.pos = Vec2::new(12.0, 34.0);
        state.pursuers.push(Pursuer::new(Vec2::new(-20.0, 50.0)));
        state.phase = GamePhase::GameOver;
        state.elapsed_secs = 42;

        state.reset(5000.0);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert!(state.pursuers.is_empty());
        assert_eq!(state.elapsed_secs, 0);
        assert_eq!(state.started_at, 5000.0);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_reset_reseeds_rng() {
        use rand::Rng;

        let mut a = GameState::new(7, 0.0);
        let mut b = GameState::new(7, 0.0);
        b.reset(0.0);

        let xa: u32 = a.rng.random();
        let xb: u32 = b.rng.random();
        assert_ne!(xa, xb);
    }
}
