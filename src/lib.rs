//! Grid Snake - game-state engine for a grid-based 3D snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, phases)
//! - `game`: Owned game store (current run + persisted profile)
//! - `snapshot`: Read-only view consumed by the renderer
//! - `platform`: Browser/native platform abstraction (storage, time, tick driver)
//! - `persistence`: Versioned save/load of the profile blob

pub mod game;
pub mod leaderboard;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use game::Game;
pub use leaderboard::Leaderboard;
pub use settings::{CameraView, Settings, SpeedPreset};
pub use snapshot::Snapshot;

/// Game configuration constants
pub mod consts {
    /// Default board edge length in cells
    pub const DEFAULT_GRID_SIZE: i32 = 20;
    /// Smallest and largest board the settings accept
    pub const MIN_GRID_SIZE: i32 = 10;
    pub const MAX_GRID_SIZE: i32 = 40;

    /// Snake length at the start of a run
    pub const INITIAL_SNAKE_LENGTH: usize = 3;

    /// Base tick intervals per speed preset (ms)
    pub const TICK_MS_SLOW: f64 = 200.0;
    pub const TICK_MS_NORMAL: f64 = 140.0;
    pub const TICK_MS_FAST: f64 = 90.0;
    /// Interval shaved off per level above 1 (ms)
    pub const TICK_MS_PER_LEVEL: f64 = 8.0;
    /// Fastest the snake can ever move (ms)
    pub const MIN_TICK_MS: f64 = 50.0;

    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 8;
    /// Longest frame delta the driver accepts (tab switches etc.)
    pub const MAX_FRAME_DELTA_MS: f64 = 250.0;

    /// Food values
    pub const APPLE_POINTS: u64 = 10;
    pub const GOLDEN_POINTS: u64 = 30;
    /// Chance that a freshly spawned food is golden
    pub const GOLDEN_FOOD_CHANCE: f64 = 0.1;

    /// Foods eaten per level
    pub const FOODS_PER_LEVEL: u32 = 5;

    /// Power-up tuning
    pub const POWER_UP_CHANCE: f64 = 0.25;
    pub const POWER_UP_TTL_TICKS: u32 = 60;
    pub const EFFECT_DURATION_TICKS: u32 = 50;
    pub const BONUS_POINTS: u64 = 50;
    pub const SPEED_BOOST_FACTOR: f64 = 0.6;
    pub const SLOW_MOTION_FACTOR: f64 = 1.5;

    /// World-space edge length of one grid cell in the 3D scene
    pub const CELL_SIZE: f32 = 1.0;
}
