//! Persistence for the high score

pub mod high_score;
pub mod store;

pub use high_score::HighScore;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
