//! Grid Snake entry point
//!
//! On the web the engine is driven from JavaScript through `platform::web`.
//! Natively this runs a headless autopilot demo against a file-backed profile.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::Result;
    use clap::{Parser, ValueEnum};

    use grid_snake::Game;
    use grid_snake::platform::{FileStorage, time_seed};
    use grid_snake::sim::{GameMode, GamePhase, GameState, Position, TickInput};

    #[derive(Parser)]
    #[command(name = "grid-snake")]
    #[command(version, about = "Headless snake engine demo driven by the autopilot")]
    struct Cli {
        /// Game mode
        #[arg(long, value_enum, default_value = "classic")]
        mode: Mode,

        /// RNG seed (defaults to the clock)
        #[arg(long)]
        seed: Option<u64>,

        /// Maximum ticks to simulate
        #[arg(long, default_value = "2000")]
        ticks: u32,

        /// Directory holding the profile (settings + leaderboard)
        #[arg(long, default_value = ".grid-snake")]
        profile_dir: PathBuf,

        /// Print the board when the run ends
        #[arg(long)]
        show_board: bool,
    }

    #[derive(Clone, Copy, ValueEnum)]
    enum Mode {
        Classic,
        Survival,
        Multiplayer,
    }

    impl From<Mode> for GameMode {
        fn from(mode: Mode) -> Self {
            match mode {
                Mode::Classic => GameMode::Classic,
                Mode::Survival => GameMode::Survival,
                Mode::Multiplayer => GameMode::Multiplayer,
            }
        }
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();

        let storage = FileStorage::new(&cli.profile_dir);
        let seed = cli.seed.unwrap_or_else(time_seed);
        let mut game = Game::new(Box::new(storage), seed);

        game.start_game(cli.mode.into());
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        let mut ticks = 0;
        while ticks < cli.ticks && game.phase() == GamePhase::Playing {
            game.step(&input);
            for event in game.drain_events() {
                log::debug!("{:?}", event);
            }
            ticks += 1;
        }

        let snapshot = game.snapshot();
        log::info!(
            "Finished after {} ticks: phase {:?}, score {}, level {}, length {}",
            ticks,
            snapshot.phase,
            snapshot.score,
            snapshot.level,
            snapshot.snake.len()
        );

        if cli.show_board {
            println!("{}", render_board(game.state()));
        }
        println!("Score: {}  High score: {}", snapshot.score, game.high_score());
        for (i, entry) in game.leaderboard().entries.iter().enumerate() {
            println!(
                "{:>2}. {:<16} {:>6}  L{:<3} {}",
                i + 1,
                entry.name,
                entry.score,
                entry.level,
                entry.mode.as_str()
            );
        }

        Ok(())
    }

    fn render_board(state: &GameState) -> String {
        let size = state.grid_size();
        let mut out = String::with_capacity(((size + 3) * (size + 2)) as usize);
        let border = format!("+{}+\n", "-".repeat(size as usize));
        out.push_str(&border);
        for z in 0..size {
            out.push('|');
            for x in 0..size {
                let pos = Position::new(x, z);
                let c = if state.snake.head() == pos {
                    '@'
                } else if state.snake.occupies(pos) {
                    'o'
                } else if state.food.is_some_and(|f| f.pos == pos) {
                    '*'
                } else if state.power_up.is_some_and(|p| p.pos == pos) {
                    '$'
                } else {
                    ' '
                };
                out.push(c);
            }
            out.push_str("|\n");
        }
        out.push_str(&border);
        out
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Grid Snake (native) starting...");
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
