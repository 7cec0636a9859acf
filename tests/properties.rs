//! Engine invariants checked over random seeds and input sequences

use proptest::prelude::*;

use grid_snake::leaderboard::{Leaderboard, LeaderboardEntry, MAX_ENTRIES};
use grid_snake::persistence::Profile;
use grid_snake::sim::{
    Direction, GameConfig, GameMode, GamePhase, GameState, TickInput, TickOutcome, tick,
};

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn steering() -> impl Strategy<Value = Vec<Option<Direction>>> {
    prop::collection::vec(prop::option::of(direction()), 1..300)
}

fn input(direction: Option<Direction>) -> TickInput {
    TickInput {
        direction,
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn length_changes_only_when_eating(seed in any::<u64>(), grid in 10i32..=20, moves in steering()) {
        let mut state = GameState::start(GameConfig::new(grid, GameMode::Classic), seed);
        for dir in moves {
            let before = state.snake.len();
            match tick(&mut state, &input(dir)) {
                TickOutcome::Grew => prop_assert_eq!(state.snake.len(), before + 1),
                TickOutcome::Moved => prop_assert_eq!(state.snake.len(), before),
                TickOutcome::GameOver(_) | TickOutcome::Idle => {
                    prop_assert!(state.snake.len() <= before + 1);
                    break;
                }
            }
        }
    }

    #[test]
    fn head_moves_one_cell_along_heading(seed in any::<u64>(), moves in steering()) {
        let mut state = GameState::start(GameConfig::default(), seed);
        for dir in moves {
            let head = state.snake.head();
            match tick(&mut state, &input(dir)) {
                TickOutcome::Moved | TickOutcome::Grew => {
                    let new_head = state.snake.head();
                    prop_assert_eq!(new_head, head.step(state.direction));
                    let (dx, dz) = state.direction.delta();
                    prop_assert_eq!(new_head.x - head.x, dx);
                    prop_assert_eq!(new_head.z - head.z, dz);
                }
                _ => break,
            }
        }
    }

    #[test]
    fn game_over_is_terminal(seed in any::<u64>(), moves in steering(), extra in 1usize..20) {
        let mut state = GameState::start(GameConfig::new(10, GameMode::Classic), seed);
        let mut ended = false;
        for dir in moves {
            if let TickOutcome::GameOver(_) = tick(&mut state, &input(dir)) {
                ended = true;
                break;
            }
        }
        if ended {
            prop_assert_eq!(state.phase, GamePhase::GameOver);
            let snake = state.snake.clone();
            let ticks = state.time_ticks;
            let score = state.score;
            for _ in 0..extra {
                prop_assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Idle);
            }
            prop_assert_eq!(state.snake, snake);
            prop_assert_eq!(state.time_ticks, ticks);
            prop_assert_eq!(state.score, score);
        }
    }

    #[test]
    fn collisions_always_end_the_run(seed in any::<u64>(), moves in steering()) {
        let mut state = GameState::start(GameConfig::new(10, GameMode::Survival), seed);
        for dir in moves {
            if let Some(d) = dir {
                state.move_snake(d);
            }
            let heading = if state.direction.is_opposite(state.pending_direction) {
                state.direction
            } else {
                state.pending_direction
            };
            let next = state.snake.head().step(heading);
            let deadly = !next.in_bounds(state.grid_size()) || state.snake.occupies(next);

            let outcome = tick(&mut state, &TickInput::default());
            if deadly {
                prop_assert!(matches!(outcome, TickOutcome::GameOver(_)));
                prop_assert_eq!(state.phase, GamePhase::GameOver);
                break;
            }
            if matches!(outcome, TickOutcome::GameOver(_)) {
                break;
            }
        }
    }

    #[test]
    fn reversal_never_changes_direction(seed in any::<u64>(), moves in steering()) {
        let mut state = GameState::start(GameConfig::default(), seed);
        for dir in moves {
            let before = state.pending_direction;
            let reverse = state.direction.opposite();
            prop_assert!(!state.move_snake(reverse));
            prop_assert_eq!(state.pending_direction, before);

            if !matches!(tick(&mut state, &input(dir)), TickOutcome::Moved | TickOutcome::Grew) {
                break;
            }
        }
    }

    #[test]
    fn food_never_spawns_on_occupied_cells(seed in any::<u64>(), moves in steering()) {
        let mut state = GameState::start(GameConfig::new(10, GameMode::Classic), seed);
        for dir in moves {
            let outcome = tick(&mut state, &TickInput { autopilot: true, direction: dir, ..Default::default() });
            if let Some(food) = state.food {
                prop_assert!(food.pos.in_bounds(state.grid_size()));
                prop_assert!(!state.snake.occupies(food.pos));
                prop_assert!(state.power_up.is_none_or(|p| p.pos != food.pos));
            }
            if let Some(power_up) = state.power_up {
                prop_assert!(!state.snake.occupies(power_up.pos));
            }
            if matches!(outcome, TickOutcome::GameOver(_)) {
                break;
            }
        }
    }

    #[test]
    fn high_score_only_rises(scores in prop::collection::vec(0u64..10_000, 1..50)) {
        let mut profile = Profile::default();
        let mut best = 0;
        for score in scores {
            profile.record_high_score(score);
            prop_assert!(profile.high_score >= best);
            best = best.max(score);
            prop_assert_eq!(profile.high_score, best);
        }
    }

    #[test]
    fn leaderboard_stays_sorted_and_bounded(scores in prop::collection::vec(0u64..1_000, 0..40)) {
        let mut board = Leaderboard::new();
        for score in scores {
            board.add(LeaderboardEntry {
                name: "p".to_string(),
                score,
                level: 1,
                mode: GameMode::Classic,
                timestamp: 0.0,
            });
            prop_assert!(board.len() <= MAX_ENTRIES);
            prop_assert!(board.entries.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }
}
