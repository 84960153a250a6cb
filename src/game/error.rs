use thiserror::Error;

/// Errors raised by the game simulation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Every cell of the grid is occupied, so no food can be placed
    #[error("no free cell left on a {width}x{height} grid")]
    GridFull { width: usize, height: usize },

    /// The configuration cannot describe a playable grid
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
