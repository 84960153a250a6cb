use std::collections::HashSet;
use std::time::Duration;

use log::debug;
use rand::Rng;
use rand::rngs::ThreadRng;

use super::{
    config::GameConfig,
    error::GameError,
    state::{Collision, GameState, Position, Snake},
};

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the snake moved this step
    pub moved: bool,
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision: Option<Collision>,
    /// New tick interval when eating changed the speed
    pub new_interval: Option<Duration>,
}

impl StepResult {
    fn idle() -> Self {
        Self {
            moved: false,
            ate_food: false,
            collision: None,
            new_interval: None,
        }
    }

    fn crashed(collision: Collision) -> Self {
        Self {
            collision: Some(collision),
            ..Self::idle()
        }
    }

    /// Whether the game has terminated
    pub fn terminated(&self) -> bool {
        self.collision.is_some()
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create a game engine drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> Result<GameState, GameError> {
        let center_x = (self.config.grid_width() / 2) as i32;
        let center_y = (self.config.grid_height() / 2) as i32;

        let snake = Snake::new(Position::new(center_x, center_y));
        let food = self.place_food(&snake.body)?;

        Ok(GameState::new(
            snake,
            food,
            self.config.grid_width(),
            self.config.grid_height(),
            self.config.base_interval(),
        ))
    }

    /// Execute one step of the game.
    ///
    /// Fails only with [`GameError::GridFull`] when the snake has eaten the
    /// last free cell; the state then holds the grown snake and the new score.
    pub fn step(&mut self, state: &mut GameState) -> Result<StepResult, GameError> {
        if !state.is_alive {
            return Ok(StepResult::idle());
        }

        state.apply_pending_direction();

        // Static until the first direction is set
        let Some(direction) = state.snake.direction else {
            return Ok(StepResult::idle());
        };

        let new_head = state.snake.head().moved_in_direction(direction);
        let ate_food = new_head == state.food;

        if let Some(collision) = self.check_collision(state, new_head, ate_food) {
            debug!("collision {:?} at ({}, {})", collision, new_head.x, new_head.y);
            state.is_alive = false;
            return Ok(StepResult::crashed(collision));
        }

        state.snake.advance(new_head, ate_food);
        state.steps += 1;

        let mut result = StepResult {
            moved: true,
            ate_food,
            ..StepResult::idle()
        };

        if ate_food {
            state.score += self.config.food_score;

            let next = self.config.next_interval(state.tick_interval);
            if next != state.tick_interval {
                state.tick_interval = next;
                result.new_interval = Some(next);
            }

            state.food = self.place_food(&state.snake.body)?;
            debug!(
                "food eaten, score {} length {} next food ({}, {})",
                state.score,
                state.snake.len(),
                state.food.x,
                state.food.y
            );
        }

        Ok(result)
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position, grows: bool) -> Option<Collision> {
        // Check wall collision
        if !state.is_in_bounds(pos) {
            return Some(Collision::Wall);
        }

        // Check self-collision
        let hits_body = if self.config.allow_tail_chase && !grows {
            state.snake.occupies_after_move(pos)
        } else {
            state.snake.occupies(pos)
        };
        if hits_body {
            return Some(Collision::SelfCollision);
        }

        None
    }

    /// Pick a random grid cell that is not in `occupied`
    pub fn place_food(&mut self, occupied: &[Position]) -> Result<Position, GameError> {
        let width = self.config.grid_width();
        let height = self.config.grid_height();

        let blocked: HashSet<Position> = occupied
            .iter()
            .copied()
            .filter(|p| p.x >= 0 && p.y >= 0 && (p.x as usize) < width && (p.y as usize) < height)
            .collect();
        if blocked.len() >= width * height {
            return Err(GameError::GridFull { width, height });
        }

        loop {
            let x = self.rng.gen_range(0..width) as i32;
            let y = self.rng.gen_range(0..height) as i32;
            let pos = Position::new(x, y);

            if !blocked.contains(&pos) {
                return Ok(pos);
            }
        }
    }
}
