//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Movement, collisions, scoring and the speed curve all operate on a plain
//! [`GameState`] value, so they can be stepped deterministically in tests.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, StepResult};
pub use error::GameError;
pub use state::{Collision, GameState, Position, Snake};
