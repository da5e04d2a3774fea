//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, clock value passed in
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use input::{InputSnapshot, Stick};
pub use state::{GamePhase, GameState, Player, Pursuer};
pub use tick::{collides, pursue, tick};
