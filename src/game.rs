//! The game store
//!
//! One owned struct holds the current run and the persisted profile. The
//! presentation layer calls into it with commands and reads snapshots back.

use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::persistence::Profile;
use crate::platform::{self, Storage, TickDriver};
use crate::settings::Settings;
use crate::sim::{
    Direction, GameEvent, GameMode, GamePhase, GameState, TickInput, TickOutcome, tick,
    tick_interval_ms,
};
use crate::snapshot::Snapshot;

pub struct Game {
    state: GameState,
    profile: Profile,
    storage: Box<dyn Storage>,
    driver: TickDriver,
    /// Seed for the next run
    seed: u64,
    /// The current run's result has been written to the profile
    result_recorded: bool,
}

impl Game {
    /// Load the profile from `storage` and sit in the menu
    pub fn new(storage: Box<dyn Storage>, seed: u64) -> Self {
        let profile = Profile::load_or_default(storage.as_ref());
        let config = profile.settings.game_config(profile.settings.mode);
        Self {
            state: GameState::new(config, seed),
            profile,
            storage,
            driver: TickDriver::new(),
            seed: next_seed(seed),
            result_recorded: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn settings(&self) -> &Settings {
        &self.profile.settings
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.profile.leaderboard
    }

    pub fn high_score(&self) -> u64 {
        self.profile.high_score
    }

    /// Begin a new run. Legal from any phase; an unfinished run is discarded.
    pub fn start_game(&mut self, mode: GameMode) {
        let config = self.profile.settings.game_config(mode);
        let seed = self.seed;
        self.seed = next_seed(seed);

        self.state = GameState::start(config, seed);
        self.driver.reset();
        self.result_recorded = false;
        log::info!(
            "Started {} game on {}x{} grid (seed {})",
            mode.as_str(),
            config.grid_size,
            config.grid_size,
            seed
        );
    }

    /// Back to the menu with a fresh board
    pub fn reset_game(&mut self) {
        let config = self
            .profile
            .settings
            .game_config(self.profile.settings.mode);
        self.state = GameState::new(config, self.seed);
        self.driver.reset();
        self.result_recorded = false;
    }

    /// Steering command. Reversals and commands outside play are ignored.
    pub fn move_snake(&mut self, direction: Direction) -> bool {
        self.state.move_snake(direction)
    }

    pub fn pause(&mut self) -> bool {
        self.state.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.state.resume()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.state.toggle_pause()
    }

    /// Advance one tick
    pub fn update_game(&mut self) -> TickOutcome {
        self.step(&TickInput::default())
    }

    /// Advance one tick with this frame's commands
    pub fn step(&mut self, input: &TickInput) -> TickOutcome {
        let outcome = tick(&mut self.state, input);
        if let TickOutcome::GameOver(reason) = outcome {
            log::info!(
                "Game over ({:?}): score {}, level {}",
                reason,
                self.state.score,
                self.state.level
            );
            self.record_result();
        }
        outcome
    }

    /// Drive the engine from a display frame. Returns how many ticks ran.
    ///
    /// Pause and steering in `input` apply once, before any tick; the
    /// autopilot flag applies to every tick this frame.
    pub fn frame(&mut self, now_ms: f64, input: &TickInput) -> u32 {
        if input.pause {
            self.toggle_pause();
        }
        if let Some(direction) = input.direction {
            self.move_snake(direction);
        }

        self.driver.begin_frame(now_ms, self.state.is_playing());

        let per_tick = TickInput {
            autopilot: input.autopilot,
            ..Default::default()
        };
        let mut ticks = 0;
        while self.driver.take_tick(self.tick_interval_ms()) {
            ticks += 1;
            if matches!(self.step(&per_tick), TickOutcome::GameOver(_) | TickOutcome::Idle) {
                break;
            }
        }
        ticks
    }

    /// Current time between ticks
    pub fn tick_interval_ms(&self) -> f64 {
        tick_interval_ms(&self.state, self.profile.settings.speed.base_tick_ms())
    }

    /// Fraction of the way to the next tick, for smooth rendering
    pub fn interpolation_alpha(&self) -> f32 {
        self.driver.alpha(self.tick_interval_ms())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.profile.high_score, self.tick_interval_ms())
    }

    /// Hand pending events to the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Replace settings wholesale. Grid size and speed apply from the next run.
    pub fn update_settings(&mut self, mut settings: Settings) {
        settings.sanitize();
        self.profile.settings = settings;
        if self.state.phase == GamePhase::Menu {
            self.reset_game();
        }
        self.persist();
    }

    pub fn clear_leaderboard(&mut self) {
        self.profile.leaderboard.clear();
        log::info!("Leaderboard cleared");
        self.persist();
    }

    /// Write the finished run to the profile, once
    fn record_result(&mut self) {
        if self.result_recorded {
            return;
        }
        self.result_recorded = true;

        let score = self.state.score;
        if self.profile.record_high_score(score) {
            log::info!("New high score: {}", score);
            self.state.events.push(GameEvent::NewHighScore { score });
        }

        let entry = LeaderboardEntry {
            name: self.profile.settings.player_name.clone(),
            score,
            level: self.state.level,
            mode: self.state.config.mode,
            timestamp: platform::now_ms(),
        };
        if let Some(rank) = self.profile.leaderboard.add(entry) {
            log::info!("Leaderboard rank #{}", rank);
        }

        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.profile.save(self.storage.as_mut()) {
            log::warn!("Profile not saved: {:#}", e);
        }
    }
}

/// Derive the next run's seed (SplitMix64 step)
fn next_seed(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
