//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio, or platform dependencies

pub mod state;
pub mod tick;

pub use state::{
    Ball, Brick, GameEvent, GamePhase, GameState, Paddle, Pickup, PickupKind,
};
pub use tick::{TickInput, tick};
