//! Browser bindings
//!
//! The JavaScript scene owns the animation-frame loop and calls `frame` each
//! display frame, then reads the snapshot/events as JSON to update the 3D
//! scene, HUD and sound.

use wasm_bindgen::prelude::*;

use super::{LocalStorage, MemoryStorage, Storage, time_seed};
use crate::game::Game;
use crate::settings::Settings;
use crate::sim::{Direction, GameMode, TickInput};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Grid Snake engine loaded");
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let storage: Box<dyn Storage> = match LocalStorage::open() {
            Some(storage) => Box::new(storage),
            None => {
                log::warn!("LocalStorage unavailable - progress won't be saved");
                Box::new(MemoryStorage::new())
            }
        };
        WebGame {
            game: Game::new(storage, time_seed()),
            input: TickInput::default(),
        }
    }

    /// Start a run; unknown mode names fall back to the one in settings
    #[wasm_bindgen(js_name = startGame)]
    pub fn start_game(&mut self, mode: &str) {
        let mode = GameMode::from_str(mode).unwrap_or(self.game.settings().mode);
        self.input = TickInput::default();
        self.game.start_game(mode);
    }

    /// Steering command ("up", "down", "left", "right"), applied immediately
    /// so every key pressed within one frame counts
    pub fn direction(&mut self, name: &str) -> bool {
        match Direction::from_key(name) {
            Some(direction) => {
                self.game.move_snake(direction);
                true
            }
            None => false,
        }
    }

    /// Feed a raw `KeyboardEvent.key`. Returns true if the key was used.
    pub fn key(&mut self, key: &str) -> bool {
        if key == " " || key.eq_ignore_ascii_case("p") || key.eq_ignore_ascii_case("escape") {
            self.input.pause = true;
            return true;
        }
        self.direction(key)
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) -> bool {
        self.game.toggle_pause()
    }

    #[wasm_bindgen(js_name = setAutopilot)]
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    pub fn reset(&mut self) {
        self.input = TickInput::default();
        self.game.reset_game();
    }

    /// Run any ticks due at `now_ms`; returns how many ran
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let ticks = self.game.frame(now_ms, &self.input);
        // Pause is one-shot
        self.input.pause = false;
        ticks
    }

    pub fn alpha(&self) -> f32 {
        self.game.interpolation_alpha()
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.snapshot()).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.drain_events()).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = settingsJson)]
    pub fn settings_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.game.settings()).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setSettingsJson)]
    pub fn set_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let settings: Settings = serde_json::from_str(json).map_err(to_js_error)?;
        self.game.update_settings(settings);
        Ok(())
    }

    #[wasm_bindgen(js_name = leaderboardJson)]
    pub fn leaderboard_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.game.leaderboard()).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = clearLeaderboard)]
    pub fn clear_leaderboard(&mut self) {
        self.game.clear_leaderboard();
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
