//! Demo-mode steering
//!
//! Greedy: head for the nearest item, never step into a wall or the body, and
//! prefer moves that leave enough open room to fit the snake.

use std::collections::{HashSet, VecDeque};

use super::collision::is_deadly;
use super::state::{Direction, GameState, Position};

/// Pick the next heading, or `None` if every move is fatal
pub fn choose_direction(state: &GameState) -> Option<Direction> {
    let head = state.snake.head();
    let grid = state.grid_size();
    let needed = state.snake.len() + 1;

    let target = target_cell(state);

    Direction::ALL
        .iter()
        .copied()
        .filter(|d| !state.direction.is_opposite(*d))
        .filter(|d| !is_deadly(&state.snake, head.step(*d), grid))
        .map(|d| {
            let next = head.step(d);
            let roomy = open_area(state, next, needed) >= needed;
            let distance = target.map(|t| next.manhattan(t)).unwrap_or(0);
            let keeps_heading = d == state.direction;
            (d, roomy, distance, keeps_heading)
        })
        // Roomy first, then closest to target, then least turning
        .min_by_key(|&(_, roomy, distance, keeps_heading)| (!roomy, distance, !keeps_heading))
        .map(|(d, ..)| d)
}

/// The power-up if it is nearer than the food, else the food
fn target_cell(state: &GameState) -> Option<Position> {
    let head = state.snake.head();
    let food = state.food.map(|f| f.pos);
    match (food, state.power_up.map(|p| p.pos)) {
        (Some(f), Some(p)) if head.manhattan(p) < head.manhattan(f) => Some(p),
        (Some(f), _) => Some(f),
        (None, p) => p,
    }
}

/// Count free cells reachable from `start`, stopping once `cap` is reached
fn open_area(state: &GameState, start: Position, cap: usize) -> usize {
    let grid = state.grid_size();
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    let mut count = 0;

    while let Some(cell) = queue.pop_front() {
        count += 1;
        if count >= cap {
            break;
        }
        for d in Direction::ALL {
            let next = cell.step(d);
            if next.in_bounds(grid) && !state.snake.occupies(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    count
}
