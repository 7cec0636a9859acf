//! Food and power-up placement
//!
//! Items only ever land on free cells, chosen uniformly with the run's RNG.

use rand::Rng;

use super::state::{Food, FoodKind, GameEvent, GameState, Position, PowerUp, PowerUpKind};
use crate::consts::*;

/// Every cell not covered by the snake, food, or power-up (row-major order)
pub fn free_cells(state: &GameState) -> Vec<Position> {
    let size = state.grid_size();
    (0..size)
        .flat_map(|z| (0..size).map(move |x| Position::new(x, z)))
        .filter(|&pos| !state.is_occupied(pos))
        .collect()
}

fn pick_free_cell(state: &mut GameState) -> Option<Position> {
    let cells = free_cells(state);
    if cells.is_empty() {
        return None;
    }
    let idx = state.rng.random_range(0..cells.len());
    Some(cells[idx])
}

/// Place a new food item. `None` only when the snake covers every cell.
///
/// The caller clears the previous food first; it is treated as occupied here.
/// When the power-up sits on the last cell not under the snake, the power-up
/// is removed and the food takes its cell.
pub fn spawn_food(state: &mut GameState) -> Option<Food> {
    let pos = match pick_free_cell(state) {
        Some(pos) => pos,
        None => {
            let power_up = state.power_up.take()?;
            state.events.push(GameEvent::PowerUpExpired {
                kind: power_up.kind,
            });
            power_up.pos
        }
    };
    let kind = if state.rng.random_bool(GOLDEN_FOOD_CHANCE) {
        FoodKind::Golden
    } else {
        FoodKind::Apple
    };
    Some(Food { pos, kind })
}

/// Roll for a power-up after food is eaten. At most one sits on the board.
pub fn maybe_spawn_power_up(state: &mut GameState) -> Option<PowerUp> {
    if state.power_up.is_some() || !state.rng.random_bool(POWER_UP_CHANCE) {
        return None;
    }
    let pos = pick_free_cell(state)?;
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    Some(PowerUp {
        pos,
        kind,
        ttl_ticks: POWER_UP_TTL_TICKS,
    })
}
