//! The persisted player profile: settings, leaderboard, best score

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::envelope;
use crate::leaderboard::Leaderboard;
use crate::platform::Storage;
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub settings: Settings,
    pub leaderboard: Leaderboard,
    /// Best score ever; only moves up
    #[serde(alias = "high_score")]
    pub high_score: u64,
}

impl Profile {
    /// Storage key for the profile blob
    pub const STORAGE_KEY: &'static str = "grid_snake_profile";

    /// Parse a stored blob and repair anything out of range
    pub fn from_json(json: &str) -> Result<Self> {
        let mut profile: Profile = envelope::decode(json)?;
        profile.normalize();
        Ok(profile)
    }

    pub fn to_json(&self) -> Result<String> {
        envelope::encode(self)
    }

    /// Read the profile. `Ok(None)` when nothing has been saved yet.
    pub fn load(storage: &dyn Storage) -> Result<Option<Self>> {
        let Some(json) = storage
            .get(Self::STORAGE_KEY)
            .context("Failed to read profile")?
        else {
            return Ok(None);
        };
        Self::from_json(&json).map(Some)
    }

    /// Read the profile, falling back to defaults on any failure
    pub fn load_or_default(storage: &dyn Storage) -> Self {
        match Self::load(storage) {
            Ok(Some(profile)) => {
                log::info!(
                    "Loaded profile ({} leaderboard entries, high score {})",
                    profile.leaderboard.len(),
                    profile.high_score
                );
                profile
            }
            Ok(None) => {
                log::info!("No profile found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Discarding unreadable profile: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<()> {
        let json = self.to_json()?;
        storage
            .set(Self::STORAGE_KEY, &json)
            .context("Failed to write profile")?;
        log::debug!("Profile saved ({} bytes)", json.len());
        Ok(())
    }

    /// Raise the high score if `score` beats it. Returns true if it did.
    pub fn record_high_score(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            return true;
        }
        false
    }

    fn normalize(&mut self) {
        self.settings.sanitize();
        self.leaderboard.normalize();
        if let Some(top) = self.leaderboard.top_score() {
            self.high_score = self.high_score.max(top);
        }
    }
}
