//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Key/value storage (LocalStorage on web, files natively)
//! - Turning frame callbacks into fixed ticks

pub mod driver;
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::TickDriver;
pub use storage::{MemoryStorage, Storage};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// Current Unix time in milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Current Unix time in milliseconds
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Seed for a new run derived from the clock
pub fn time_seed() -> u64 {
    now_ms() as u64
}
