//! Game lifecycle
//!
//! [`GameController`] is the single owner of the mutable [`GameState`]. It
//! runs the `Idle -> Running -> GameOver` state machine, keeps the scheduler
//! armed at the current speed and writes new high scores through to storage.

use log::info;
use rand::Rng;
use rand::rngs::ThreadRng;

use crate::game::{Collision, Direction, GameConfig, GameEngine, GameError, GameState};
use crate::schedule::Scheduler;
use crate::storage::{HighScore, KeyValueStore};

/// Where the game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fresh board, waiting for a start command
    Idle,
    /// The scheduler is armed and ticks move the snake
    Running,
    /// The run ended; waiting for a reset
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Collision(Collision),
    /// The snake filled every cell, leaving nowhere to put food
    BoardFilled,
}

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing happened: not running, or no direction yet
    Idle,
    /// The snake moved; the view needs redrawing
    Moved { ate_food: bool },
    /// The run ended with this final score
    GameOver { final_score: u32, reason: GameOverReason },
}

/// Owns the game state and drives it through its lifecycle
pub struct GameController<S: Scheduler, K: KeyValueStore, R: Rng = ThreadRng> {
    engine: GameEngine<R>,
    state: GameState,
    phase: Phase,
    high_score: HighScore<K>,
    scheduler: S,
}

impl<S: Scheduler, K: KeyValueStore> GameController<S, K, ThreadRng> {
    pub fn new(config: GameConfig, scheduler: S, store: K) -> Result<Self, GameError> {
        Self::with_engine(GameEngine::new(config), scheduler, store)
    }
}

impl<S: Scheduler, K: KeyValueStore, R: Rng> GameController<S, K, R> {
    /// Build a controller around an existing engine, loading the high score
    pub fn with_engine(mut engine: GameEngine<R>, scheduler: S, store: K) -> Result<Self, GameError> {
        engine.config().validate()?;
        let high_score = HighScore::load(store, engine.config().high_score_key.clone());
        let state = engine.reset()?;

        Ok(Self {
            engine,
            state,
            phase: Phase::Idle,
            high_score,
            scheduler,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.value()
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Begin a run from `Idle`. Returns whether anything changed.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }

        self.state.set_direction(Direction::Right);
        self.phase = Phase::Running;
        self.scheduler.arm(self.state.tick_interval);
        info!("game started at {:?} per tick", self.state.tick_interval);
        true
    }

    /// Go back to a fresh `Idle` board from any phase
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.scheduler.disarm();
        self.state = self.engine.reset()?;
        self.phase = Phase::Idle;
        info!("game reset");
        Ok(())
    }

    /// Ask for a new direction. Ignored unless running; reversals of the
    /// current direction are rejected. Returns whether it was accepted.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state.request_direction(direction)
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }

        let result = match self.engine.step(&mut self.state) {
            Ok(result) => result,
            // Only food placement fails, once the snake covers the board
            Err(e) => {
                info!("run ended: {}", e);
                self.record_score();
                return self.finish(GameOverReason::BoardFilled);
            }
        };

        if let Some(collision) = result.collision {
            return self.finish(GameOverReason::Collision(collision));
        }

        if !result.moved {
            return TickOutcome::Idle;
        }

        if result.ate_food {
            self.record_score();
        }

        if let Some(interval) = result.new_interval {
            self.scheduler.disarm();
            self.scheduler.arm(interval);
        }

        TickOutcome::Moved {
            ate_food: result.ate_food,
        }
    }

    fn record_score(&mut self) {
        if self.high_score.record(self.state.score) {
            info!("new high score: {}", self.state.score);
        }
    }

    fn finish(&mut self, reason: GameOverReason) -> TickOutcome {
        self.scheduler.disarm();
        self.state.is_alive = false;
        self.phase = Phase::GameOver;
        info!("game over ({:?}), final score {}", reason, self.state.score);

        TickOutcome::GameOver {
            final_score: self.state.score,
            reason,
        }
    }
}
