//! Grid Snake - a terminal Snake game
//!
//! This library provides:
//! - Core game logic: movement, collisions, scoring, speed curve (game module)
//! - Lifecycle state machine owning the game state (controller module)
//! - Tick scheduling behind a trait, with a tokio timer (schedule module)
//! - High score persistence (storage module)
//! - Keyboard and drag input mapping (input module)
//! - Board rendering onto a drawing surface, plus the TUI screen (render module)
//! - The interactive terminal mode (modes module)

pub mod controller;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod schedule;
pub mod storage;
