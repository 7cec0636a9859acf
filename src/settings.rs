//! Game settings and preferences
//!
//! Persisted with the leaderboard in the profile blob.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{GameConfig, GameMode};

/// Snake speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SpeedPreset {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreset::Slow => "Slow",
            SpeedPreset::Normal => "Normal",
            SpeedPreset::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(SpeedPreset::Slow),
            "normal" | "medium" => Some(SpeedPreset::Normal),
            "fast" => Some(SpeedPreset::Fast),
            _ => None,
        }
    }

    /// Tick interval at level 1 with no effect active
    pub fn base_tick_ms(&self) -> f64 {
        match self {
            SpeedPreset::Slow => TICK_MS_SLOW,
            SpeedPreset::Normal => TICK_MS_NORMAL,
            SpeedPreset::Fast => TICK_MS_FAST,
        }
    }
}

/// Camera rig the renderer should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CameraView {
    /// Chase camera behind the head
    #[default]
    Follow,
    /// Top-down over the whole board
    Overhead,
    /// Slowly circling the board
    Orbit,
}

/// Game settings/preferences
///
/// Keys are camelCase like the rest of the JS API. Blobs written with
/// snake_case keys still load through the aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    // === Gameplay ===
    /// Board edge length in cells
    #[serde(alias = "grid_size")]
    pub grid_size: i32,
    pub speed: SpeedPreset,
    /// Mode preselected in the menu
    pub mode: GameMode,
    /// Name recorded on the leaderboard
    #[serde(alias = "player_name")]
    pub player_name: String,

    // === Audio ===
    #[serde(alias = "sound_enabled")]
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,

    // === Presentation ===
    #[serde(alias = "show_grid")]
    pub show_grid: bool,
    pub camera: CameraView,
    /// Reduced motion (no camera shake, fewer particles)
    #[serde(alias = "reduced_motion")]
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            speed: SpeedPreset::Normal,
            mode: GameMode::Classic,
            player_name: "Player".to_string(),

            sound_enabled: true,
            volume: 0.7,

            show_grid: true,
            camera: CameraView::Follow,
            reduced_motion: false,
        }
    }
}

/// Longest player name kept
pub const MAX_NAME_LEN: usize = 16;

impl Settings {
    /// Clamp everything into range. Applied on load and on every update.
    pub fn sanitize(&mut self) {
        self.grid_size = self.grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            Self::default().volume
        };

        let name: String = self.player_name.trim().chars().take(MAX_NAME_LEN).collect();
        self.player_name = if name.is_empty() {
            Self::default().player_name
        } else {
            name
        };
    }

    /// Per-run configuration for a new game in `mode`
    pub fn game_config(&self, mode: GameMode) -> GameConfig {
        GameConfig::new(self.grid_size, mode)
    }

    /// Effective volume (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound_enabled { self.volume } else { 0.0 }
    }
}
