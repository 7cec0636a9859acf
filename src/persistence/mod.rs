//! Save/load of the player profile
//!
//! Features:
//! - Versioned JSON envelope
//! - Legacy (un-enveloped) blob migration
//! - Corruption detection with fallback to defaults

pub mod envelope;
pub mod profile;

pub use envelope::{FORMAT_VERSION, decode, encode};
pub use profile::Profile;
