//! Game state and core simulation types
//!
//! Everything the tick function reads or writes lives here.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn;
use crate::consts::*;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Title screen, nothing moves
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Game modes offered by the menu
///
/// Modes only differ in starting lives; lives are shown but never consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    #[default]
    Classic,
    Survival,
    Multiplayer,
}

impl GameMode {
    pub fn initial_lives(&self) -> u8 {
        match self {
            GameMode::Classic => 1,
            GameMode::Survival => 3,
            GameMode::Multiplayer => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Survival => "Survival",
            GameMode::Multiplayer => "Multiplayer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "survival" => Some(GameMode::Survival),
            "multiplayer" | "multi" => Some(GameMode::Multiplayer),
            _ => None,
        }
    }
}

/// Heading on the grid. Up/Down move along z, Left/Right along x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Cell offset (dx, dz) for one step
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Map a keyboard key name (DOM `KeyboardEvent.key` style) to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "arrowup" | "up" | "w" => Some(Direction::Up),
            "arrowdown" | "down" | "s" => Some(Direction::Down),
            "arrowleft" | "left" | "a" => Some(Direction::Left),
            "arrowright" | "right" | "d" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// A grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub z: i32,
}

impl Position {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Neighbouring cell one step in `direction` (may lie off the board)
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dz) = direction.delta();
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    pub fn in_bounds(&self, grid_size: i32) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.z)
    }

    pub fn manhattan(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.z - other.z).abs()
    }
}

/// The snake, head first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    pub segments: VecDeque<Position>,
}

impl Snake {
    /// Build a straight snake with its body trailing behind `heading`
    pub fn new(head: Position, heading: Direction, length: usize) -> Self {
        let back = heading.opposite();
        let mut segments = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        segments.push_back(cell);
        for _ in 1..length {
            cell = cell.step(back);
            segments.push_back(cell);
        }
        Self { segments }
    }

    pub fn head(&self) -> Position {
        // A snake is never built empty
        self.segments.front().copied().unwrap_or(Position::new(0, 0))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if any segment (head and tail included) occupies `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Prepend a new head; drop the tail unless growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.segments.push_front(new_head);
        if !grow {
            self.segments.pop_back();
        }
    }
}

/// Food variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FoodKind {
    Apple,
    Golden,
}

impl FoodKind {
    pub fn points(&self) -> u64 {
        match self {
            FoodKind::Apple => APPLE_POINTS,
            FoodKind::Golden => GOLDEN_POINTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub pos: Position,
    pub kind: FoodKind,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    /// Shorter tick interval while active
    SpeedBoost,
    /// Longer tick interval while active
    SlowMotion,
    /// Food scores double while active
    DoublePoints,
    /// Instant score bonus, no lasting effect
    BonusPoints,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::SlowMotion,
        PowerUpKind::DoublePoints,
        PowerUpKind::BonusPoints,
    ];
}

/// A power-up lying on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Position,
    pub kind: PowerUpKind,
    pub ttl_ticks: u32,
}

/// A collected power-up still in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub remaining_ticks: u32,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameOverReason {
    Wall,
    SelfCollision,
    /// No free cell left for food
    BoardFull,
}

/// Notable things that happened during a tick, drained by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    FoodEaten { pos: Position, kind: FoodKind, points: u64 },
    PowerUpSpawned { pos: Position, kind: PowerUpKind },
    PowerUpCollected { pos: Position, kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    EffectEnded { kind: PowerUpKind },
    LevelUp { level: u32 },
    GameOver { reason: GameOverReason },
    NewHighScore { score: u64 },
}

/// Per-run configuration, derived from settings when a run starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid_size: i32,
    pub initial_length: usize,
    pub mode: GameMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            initial_length: INITIAL_SNAKE_LENGTH,
            mode: GameMode::Classic,
        }
    }
}

impl GameConfig {
    pub fn new(grid_size: i32, mode: GameMode) -> Self {
        Self {
            grid_size: grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE),
            mode,
            ..Default::default()
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub seed: u64,
    pub phase: GamePhase,
    pub snake: Snake,
    /// Heading used by the most recent tick
    pub direction: Direction,
    /// Heading the next tick will adopt
    pub pending_direction: Direction,
    pub food: Option<Food>,
    pub power_up: Option<PowerUp>,
    pub effect: Option<ActiveEffect>,
    pub score: u64,
    pub level: u32,
    pub lives: u8,
    pub foods_eaten: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub game_over_reason: Option<GameOverReason>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh run sitting in the menu phase, snake centred and food placed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let center = config.grid_size / 2;
        let snake = Snake::new(
            Position::new(center, center),
            Direction::Right,
            config.initial_length,
        );

        let mut state = Self {
            config,
            seed,
            phase: GamePhase::Menu,
            snake,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            food: None,
            power_up: None,
            effect: None,
            score: 0,
            level: 1,
            lives: config.mode.initial_lives(),
            foods_eaten: 0,
            time_ticks: 0,
            game_over_reason: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };

        state.food = spawn::spawn_food(&mut state);
        state
    }

    /// Fresh run already in the playing phase
    pub fn start(config: GameConfig, seed: u64) -> Self {
        let mut state = Self::new(config, seed);
        state.phase = GamePhase::Playing;
        state
    }

    pub fn grid_size(&self) -> i32 {
        self.config.grid_size
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Record a steering command. Ignored outside play and for reversals.
    ///
    /// Returns whether the command was accepted.
    pub fn move_snake(&mut self, direction: Direction) -> bool {
        if !self.is_playing() || self.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            return true;
        }
        false
    }

    pub fn resume(&mut self) -> bool {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            return true;
        }
        false
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// End the run
    pub fn end(&mut self, reason: GameOverReason) {
        self.phase = GamePhase::GameOver;
        self.game_over_reason = Some(reason);
        self.events.push(GameEvent::GameOver { reason });
    }

    /// Score multiplier from the active effect
    pub fn score_multiplier(&self) -> u64 {
        match self.effect {
            Some(ActiveEffect {
                kind: PowerUpKind::DoublePoints,
                ..
            }) => 2,
            _ => 1,
        }
    }

    /// True if `pos` is covered by the snake, food, or power-up
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
            || self.food.is_some_and(|f| f.pos == pos)
            || self.power_up.is_some_and(|p| p.pos == pos)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Right.is_opposite(Direction::Right));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("d"), Some(Direction::Right));
        assert_eq!(Direction::from_key("S"), Some(Direction::Down));
        assert_eq!(Direction::from_key("Enter"), None);
    }

    #[test]
    fn test_new_snake_trails_behind_heading() {
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 3);
        let cells: Vec<_> = snake.segments.iter().copied().collect();
        assert_eq!(
            cells,
            vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ]
        );
    }

    #[test]
    fn test_new_state_in_menu_with_food() {
        let state = GameState::new(GameConfig::default(), 7);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.snake.len(), INITIAL_SNAKE_LENGTH);
        let food = state.food.expect("food placed");
        assert!(food.pos.in_bounds(state.grid_size()));
        assert!(!state.snake.occupies(food.pos));
    }

    #[test]
    fn test_mode_lives() {
        let state = GameState::new(GameConfig::new(20, GameMode::Survival), 1);
        assert_eq!(state.lives, 3);
        let state = GameState::new(GameConfig::new(20, GameMode::Classic), 1);
        assert_eq!(state.lives, 1);
    }

    #[test]
    fn test_config_clamps_grid() {
        assert_eq!(GameConfig::new(2, GameMode::Classic).grid_size, MIN_GRID_SIZE);
        assert_eq!(GameConfig::new(500, GameMode::Classic).grid_size, MAX_GRID_SIZE);
    }

    #[test]
    fn test_move_snake_rejects_reversal() {
        let mut state = GameState::start(GameConfig::default(), 3);
        assert!(!state.move_snake(Direction::Left));
        assert_eq!(state.pending_direction, Direction::Right);
        assert!(state.move_snake(Direction::Up));
        assert_eq!(state.pending_direction, Direction::Up);
    }

    #[test]
    fn test_move_snake_ignored_outside_play() {
        let mut state = GameState::new(GameConfig::default(), 3);
        assert!(!state.move_snake(Direction::Up));
        assert_eq!(state.pending_direction, Direction::Right);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = GameState::start(GameConfig::default(), 3);
        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Playing);

        state.end(GameOverReason::Wall);
        assert!(!state.toggle_pause());
        assert_eq!(state.phase, GamePhase::GameOver);
    }
}
