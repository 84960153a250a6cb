use std::time::Duration;

use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement; `None` until the run starts
    pub direction: Option<Direction>,
}

impl Snake {
    /// Create a one-cell snake that is not moving yet
    pub fn new(head: Position) -> Self {
        Self {
            body: vec![head],
            direction: None,
        }
    }

    /// Create a snake from explicit segments, head first
    pub fn from_body(body: Vec<Position>, direction: Option<Direction>) -> Self {
        debug_assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if position is any segment of the snake, tail included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if position is a segment that stays put when the snake moves
    /// without growing (everything but the tail)
    pub fn occupies_after_move(&self, pos: Position) -> bool {
        self.body[..self.body.len() - 1].contains(&pos)
    }

    /// Put a new head in front, dropping the tail unless growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Latest accepted direction request, applied on the next tick
    pub pending_direction: Option<Direction>,
    pub food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub tick_interval: Duration,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(
        snake: Snake,
        food: Position,
        grid_width: usize,
        grid_height: usize,
        tick_interval: Duration,
    ) -> Self {
        Self {
            snake,
            pending_direction: None,
            food,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            tick_interval,
            is_alive: true,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Current direction of travel
    pub fn direction(&self) -> Option<Direction> {
        self.snake.direction
    }

    /// Record a direction request unless it reverses the current direction.
    /// Returns whether the request was accepted.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if let Some(current) = self.snake.direction {
            if current.is_opposite(direction) {
                return false;
            }
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Set both current and pending direction, as happens when a run starts
    pub fn set_direction(&mut self, direction: Direction) {
        self.snake.direction = Some(direction);
        self.pending_direction = Some(direction);
    }

    /// Promote the pending direction to the current one
    pub fn apply_pending_direction(&mut self) {
        if let Some(direction) = self.pending_direction {
            self.snake.direction = Some(direction);
        }
    }
}
