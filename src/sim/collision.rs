//! Grid collision detection
//!
//! The board is small and the snake is a short list, so a linear scan of the
//! segments is all that's needed.

use super::state::{GameOverReason, Position, Snake};

/// What a prospective head cell would hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Cell lies outside the board
    Wall,
    /// Cell is already covered by a segment (tail included)
    Body,
}

impl Collision {
    pub fn reason(&self) -> GameOverReason {
        match self {
            Collision::Wall => GameOverReason::Wall,
            Collision::Body => GameOverReason::SelfCollision,
        }
    }
}

/// Check the cell the head is about to enter.
///
/// The tail counts as occupied: it has not moved out yet when the head moves in.
pub fn check_collision(snake: &Snake, new_head: Position, grid_size: i32) -> Option<Collision> {
    if !new_head.in_bounds(grid_size) {
        return Some(Collision::Wall);
    }
    if snake.occupies(new_head) {
        return Some(Collision::Body);
    }
    None
}

/// True if moving the head into `pos` would end the run
pub fn is_deadly(snake: &Snake, pos: Position, grid_size: i32) -> bool {
    check_collision(snake, pos, grid_size).is_some()
}
