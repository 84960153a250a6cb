use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use grid_snake::storage::JsonFileStore;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a grid, in your terminal")]
struct Cli {
    /// Board width in surface units (cells are --cell-size units wide)
    #[arg(long)]
    width: Option<usize>,

    /// Board height in surface units
    #[arg(long)]
    height: Option<usize>,

    /// Size of one grid cell in surface units
    #[arg(long)]
    cell_size: Option<usize>,

    /// JSON file with a full game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// File the high score is kept in
    #[arg(long, default_value = "snake_storage.json")]
    store: PathBuf,

    /// File to write logs to
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    /// Configuration file (or defaults) with command line overrides applied
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.surface_width = width;
        }
        if let Some(height) = self.height {
            config.surface_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the game, so logs go to a file
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    info!(
        "starting on a {}x{} grid, high score kept in {:?}",
        config.grid_width(),
        config.grid_height(),
        cli.store
    );

    let mut human_mode = HumanMode::new(config, JsonFileStore::new(&cli.store))?;
    human_mode.run().await?;

    Ok(())
}
