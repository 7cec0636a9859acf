//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One grid step per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::choose_direction;
pub use collision::{Collision, check_collision};
pub use state::{
    ActiveEffect, Direction, Food, FoodKind, GameConfig, GameEvent, GameMode, GameOverReason,
    GamePhase, GameState, Position, PowerUp, PowerUpKind, Snake,
};
pub use tick::{TickInput, TickOutcome, tick, tick_interval_ms};
