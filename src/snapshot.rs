//! Read-only view of a run for the renderer/HUD
//!
//! Grid cells are also given in world space: the board is centred on the
//! origin in the XZ plane with Y up, one `CELL_SIZE` per cell.

use glam::Vec3;
use serde::Serialize;

use crate::consts::CELL_SIZE;
use crate::sim::{
    ActiveEffect, Direction, Food, GameMode, GameOverReason, GamePhase, GameState, Position,
    PowerUp,
};

/// Centre of a grid cell in world space
pub fn cell_to_world(pos: Position, grid_size: i32) -> Vec3 {
    let half = grid_size as f32 * CELL_SIZE / 2.0;
    Vec3::new(
        (pos.x as f32 + 0.5) * CELL_SIZE - half,
        0.0,
        (pos.z as f32 + 0.5) * CELL_SIZE - half,
    )
}

/// Unit vector the head is facing, in world space
pub fn direction_to_world(direction: Direction) -> Vec3 {
    let (dx, dz) = direction.delta();
    Vec3::new(dx as f32, 0.0, dz as f32)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub phase: GamePhase,
    pub mode: GameMode,
    pub grid_size: i32,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub lives: u8,
    pub direction: Direction,
    /// Head first
    pub snake: Vec<Position>,
    /// Same cells as `snake`, in world space
    pub snake_world: Vec<Vec3>,
    pub heading_world: Vec3,
    pub food: Option<Food>,
    pub food_world: Option<Vec3>,
    pub power_up: Option<PowerUp>,
    pub power_up_world: Option<Vec3>,
    pub effect: Option<ActiveEffect>,
    pub game_over_reason: Option<GameOverReason>,
    /// Current time between ticks
    pub tick_interval_ms: f64,
    pub time_ticks: u64,
}

impl Snapshot {
    pub fn capture(state: &GameState, high_score: u64, tick_interval_ms: f64) -> Self {
        let grid = state.grid_size();
        let snake: Vec<Position> = state.snake.segments.iter().copied().collect();
        let snake_world = snake.iter().map(|&p| cell_to_world(p, grid)).collect();

        Self {
            phase: state.phase,
            mode: state.config.mode,
            grid_size: grid,
            score: state.score,
            // Live score counts as the best once it passes the stored one
            high_score: high_score.max(state.score),
            level: state.level,
            lives: state.lives,
            direction: state.direction,
            snake,
            snake_world,
            heading_world: direction_to_world(state.direction),
            food: state.food,
            food_world: state.food.map(|f| cell_to_world(f.pos, grid)),
            power_up: state.power_up,
            power_up_world: state.power_up.map(|p| cell_to_world(p.pos, grid)),
            effect: state.effect,
            game_over_reason: state.game_over_reason,
            tick_interval_ms,
            time_ticks: state.time_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameConfig;

    #[test]
    fn test_cell_to_world_is_centred() {
        let a = cell_to_world(Position::new(0, 0), 10);
        let b = cell_to_world(Position::new(9, 9), 10);
        assert_eq!(a, Vec3::new(-4.5, 0.0, -4.5));
        assert_eq!(b, Vec3::new(4.5, 0.0, 4.5));
        assert_eq!(a + b, Vec3::ZERO);
    }

    #[test]
    fn test_heading() {
        assert_eq!(direction_to_world(Direction::Up), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(direction_to_world(Direction::Right), Vec3::X);
    }

    #[test]
    fn test_capture() {
        let mut state = GameState::start(GameConfig::default(), 3);
        state.score = 40;
        let snap = Snapshot::capture(&state, 25, 140.0);

        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.snake.len(), state.snake.len());
        assert_eq!(snap.snake[0], state.snake.head());
        assert_eq!(snap.snake_world.len(), snap.snake.len());
        assert_eq!(snap.high_score, 40);
        assert!(snap.food_world.is_some());
    }

    #[test]
    fn test_serializes_camel_case() {
        let state = GameState::new(GameConfig::default(), 3);
        let json = serde_json::to_value(Snapshot::capture(&state, 0, 140.0)).unwrap();
        assert_eq!(json["phase"], "menu");
        assert_eq!(json["gridSize"], 20);
        assert_eq!(json["snakeWorld"][0].as_array().map(|a| a.len()), Some(3));
    }
}
