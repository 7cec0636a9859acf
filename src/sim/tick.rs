//! Fixed-step simulation tick
//!
//! Each tick moves the snake exactly one cell, or ends the run.

use super::autopilot::choose_direction;
use super::collision::check_collision;
use super::spawn::{maybe_spawn_power_up, spawn_food};
use super::state::{
    ActiveEffect, Direction, GameEvent, GameOverReason, GameState, PowerUpKind,
};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steering command (arrow keys / swipe)
    pub direction: Option<Direction>,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - the autopilot steers
    pub autopilot: bool,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, nothing advanced
    Idle,
    /// Moved one cell, length unchanged
    Moved,
    /// Ate food and grew by one segment
    Grew,
    /// The run ended on this tick
    GameOver(GameOverReason),
}

/// Advance the game state by one grid step
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if input.pause {
        state.toggle_pause();
    }

    if !state.is_playing() {
        return TickOutcome::Idle;
    }

    if let Some(direction) = input.direction {
        state.move_snake(direction);
    }
    if input.autopilot {
        if let Some(direction) = choose_direction(state) {
            state.move_snake(direction);
        }
    }

    state.time_ticks += 1;
    age_items(state);

    if !state.direction.is_opposite(state.pending_direction) {
        state.direction = state.pending_direction;
    }

    let new_head = state.snake.head().step(state.direction);
    if let Some(collision) = check_collision(&state.snake, new_head, state.grid_size()) {
        let reason = collision.reason();
        log::debug!(
            "Run over at tick {}: {:?} at ({}, {})",
            state.time_ticks,
            reason,
            new_head.x,
            new_head.z
        );
        state.end(reason);
        return TickOutcome::GameOver(reason);
    }

    let ate = state.food.filter(|f| f.pos == new_head);
    state.snake.advance(new_head, ate.is_some());

    if let Some(food) = ate {
        let points = food.kind.points() * state.score_multiplier();
        state.score += points;
        state.foods_eaten += 1;
        state.events.push(GameEvent::FoodEaten {
            pos: food.pos,
            kind: food.kind,
            points,
        });

        let level = 1 + state.foods_eaten / FOODS_PER_LEVEL;
        if level > state.level {
            state.level = level;
            state.events.push(GameEvent::LevelUp { level });
        }

        state.food = None;
        state.food = spawn_food(state);
        if state.food.is_none() {
            log::info!("Board full at score {}", state.score);
            state.end(GameOverReason::BoardFull);
            return TickOutcome::GameOver(GameOverReason::BoardFull);
        }

        if let Some(power_up) = maybe_spawn_power_up(state) {
            state.events.push(GameEvent::PowerUpSpawned {
                pos: power_up.pos,
                kind: power_up.kind,
            });
            state.power_up = Some(power_up);
        }
    }

    if let Some(power_up) = state.power_up.filter(|p| p.pos == new_head) {
        state.power_up = None;
        state.events.push(GameEvent::PowerUpCollected {
            pos: power_up.pos,
            kind: power_up.kind,
        });
        match power_up.kind {
            PowerUpKind::BonusPoints => state.score += BONUS_POINTS,
            kind => {
                let previous = state.effect.replace(ActiveEffect {
                    kind,
                    remaining_ticks: EFFECT_DURATION_TICKS,
                });
                if let Some(old) = previous.filter(|old| old.kind != kind) {
                    state.events.push(GameEvent::EffectEnded { kind: old.kind });
                }
            }
        }
    }

    if ate.is_some() {
        TickOutcome::Grew
    } else {
        TickOutcome::Moved
    }
}

/// Count down the board power-up and the active effect
fn age_items(state: &mut GameState) {
    if let Some(power_up) = state.power_up.as_mut() {
        power_up.ttl_ticks = power_up.ttl_ticks.saturating_sub(1);
        if power_up.ttl_ticks == 0 {
            let kind = power_up.kind;
            state.power_up = None;
            state.events.push(GameEvent::PowerUpExpired { kind });
        }
    }

    if let Some(effect) = state.effect.as_mut() {
        effect.remaining_ticks = effect.remaining_ticks.saturating_sub(1);
        if effect.remaining_ticks == 0 {
            let kind = effect.kind;
            state.effect = None;
            state.events.push(GameEvent::EffectEnded { kind });
        }
    }
}

/// Milliseconds between ticks for the current level and effect
pub fn tick_interval_ms(state: &GameState, base_ms: f64) -> f64 {
    let levels_above_first = state.level.saturating_sub(1) as f64;
    let interval = (base_ms - levels_above_first * TICK_MS_PER_LEVEL).max(MIN_TICK_MS);
    match state.effect.map(|e| e.kind) {
        Some(PowerUpKind::SpeedBoost) => interval * SPEED_BOOST_FACTOR,
        Some(PowerUpKind::SlowMotion) => interval * SLOW_MOTION_FACTOR,
        _ => interval,
    }
}
