use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid snake with a fixed-tick movement timer")]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of board columns
    #[arg(long)]
    columns: Option<u32>,

    /// Number of board rows
    #[arg(long)]
    rows: Option<u32>,

    /// Cell side in surface units
    #[arg(long)]
    cell_size: Option<u32>,

    /// Starting tick interval in milliseconds
    #[arg(long)]
    initial_interval: Option<u64>,

    /// Milliseconds taken off the interval per speed step
    #[arg(long)]
    speed_increment: Option<u64>,

    /// Food grabs per speed step
    #[arg(long)]
    grabs: Option<u32>,

    /// Seed for food and spawn placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(interval) = self.initial_interval {
            config.initial_interval_ms = interval;
        }
        if let Some(increment) = self.speed_increment {
            config.speed_increment_ms = increment;
        }
        if let Some(grabs) = self.grabs {
            config.grabs_per_step = grabs;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}
