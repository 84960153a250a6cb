use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::GameError;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the drawing surface in surface units
    pub surface_width: usize,
    /// Height of the drawing surface in surface units
    pub surface_height: usize,
    /// Side length of one grid cell in surface units
    pub cell_size: usize,

    /// Points awarded per food eaten
    pub food_score: u32,

    // Speed curve
    /// Tick interval at the start of a run, in milliseconds
    pub base_interval_ms: u64,
    /// Amount the interval shrinks per food eaten, in milliseconds
    pub interval_step_ms: u64,
    /// The interval never drops below this, in milliseconds
    pub min_interval_ms: u64,

    /// Let the head move into the cell the tail is leaving this tick
    pub allow_tail_chase: bool,

    /// Storage key holding the high score
    pub high_score_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: 400,
            surface_height: 400,
            cell_size: 20,
            food_score: 10,
            base_interval_ms: 100,
            interval_step_ms: 2,
            min_interval_ms: 50,
            allow_tail_chase: false,
            high_score_key: "snakeHighScore".to_string(),
        }
    }
}

impl GameConfig {
    /// Create a configuration for a surface of the given size
    pub fn new(surface_width: usize, surface_height: usize) -> Self {
        Self {
            surface_width,
            surface_height,
            ..Default::default()
        }
    }

    /// Create a configuration with the given grid size in cells
    pub fn with_grid(width: usize, height: usize) -> Self {
        let config = Self::default();
        Self::new(width * config.cell_size, height * config.cell_size)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Number of columns in the grid
    pub fn grid_width(&self) -> usize {
        self.surface_width / self.cell_size.max(1)
    }

    /// Number of rows in the grid
    pub fn grid_height(&self) -> usize {
        self.surface_height / self.cell_size.max(1)
    }

    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_interval_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Interval after one more food has been eaten
    pub fn next_interval(&self, current: Duration) -> Duration {
        current
            .saturating_sub(Duration::from_millis(self.interval_step_ms))
            .max(self.min_interval())
            .min(current)
    }

    /// Check that the configuration describes a playable game
    pub fn validate(&self) -> Result<(), GameError> {
        if self.cell_size == 0 {
            return Err(GameError::InvalidConfig("cell_size must be positive".into()));
        }
        if self.grid_width() == 0 || self.grid_height() == 0 {
            return Err(GameError::InvalidConfig(format!(
                "surface {}x{} holds no {}-unit cell",
                self.surface_width, self.surface_height, self.cell_size
            )));
        }
        if self.min_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "min_interval_ms must be positive".into(),
            ));
        }
        if self.min_interval_ms > self.base_interval_ms {
            return Err(GameError::InvalidConfig(format!(
                "min_interval_ms ({}) exceeds base_interval_ms ({})",
                self.min_interval_ms, self.base_interval_ms
            )));
        }
        if self.high_score_key.is_empty() {
            return Err(GameError::InvalidConfig(
                "high_score_key must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width(), 20);
        assert_eq!(config.grid_height(), 20);
        assert_eq!(config.base_interval(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_grid_from_surface() {
        let config = GameConfig::new(610, 305);
        assert_eq!(config.grid_width(), 30);
        assert_eq!(config.grid_height(), 15);

        let config = GameConfig::with_grid(12, 8);
        assert_eq!(config.grid_width(), 12);
        assert_eq!(config.grid_height(), 8);
    }

    #[test]
    fn test_interval_never_below_floor() {
        let config = GameConfig::default();
        let mut interval = config.base_interval();
        assert_eq!(config.next_interval(interval), Duration::from_millis(98));

        for _ in 0..100 {
            let next = config.next_interval(interval);
            assert!(next <= interval);
            assert!(next >= config.min_interval());
            interval = next;
        }
        assert_eq!(interval, Duration::from_millis(50));
    }

    #[test]
    fn test_invalid_configs() {
        let config = GameConfig {
            cell_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig::new(10, 10);
        assert!(config.validate().is_err());

        let config = GameConfig {
            min_interval_ms: 200,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "cell_size": 10, "allow_tail_chase": true }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.grid_width(), 40);
        assert!(config.allow_tail_chase);
        assert_eq!(config.food_score, 10);
    }
}
