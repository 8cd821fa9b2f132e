use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};
use super::geometry::SPAWN_LENGTH;
use super::state::Board;

/// Lower bound for the tick interval in milliseconds
pub const MIN_TICK_INTERVAL_MS: u64 = 40;

/// Largest board accepted, in cells
pub const MAX_BOARD_CELLS: u64 = 1_000_000;

/// Board and speed configuration for a session
///
/// Changing any of these on a live engine triggers a full reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of columns on the board
    pub columns: u32,
    /// Number of rows on the board
    pub rows: u32,
    /// Side of one cell in surface units
    pub cell_size: u32,
    /// Tick interval before any food is eaten
    pub initial_interval_ms: u64,
    /// How much each speed step shortens the interval
    pub speed_increment_ms: u64,
    /// Food grabs needed per speed step
    pub grabs_per_step: u32,
    /// The interval never drops below this
    pub min_interval_ms: u64,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 30,
            rows: 20,
            cell_size: 20,
            initial_interval_ms: 200,
            speed_increment_ms: 20,
            grabs_per_step: 2,
            min_interval_ms: MIN_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Board width in surface units
    pub fn width(&self) -> i32 {
        (self.columns as i64 * self.cell_size as i64) as i32
    }

    /// Board height in surface units
    pub fn height(&self) -> i32 {
        (self.rows as i64 * self.cell_size as i64) as i32
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size as i32
    }

    pub fn board(&self) -> Board {
        Board {
            width: self.width(),
            height: self.height(),
            cell_size: self.cell_size(),
        }
    }

    /// Check that every parameter can host a game
    pub fn validate(&self) -> GameResult<()> {
        let positive = [
            ("columns", self.columns as u64),
            ("rows", self.rows as u64),
            ("cell_size", self.cell_size as u64),
            ("initial_interval_ms", self.initial_interval_ms),
            ("speed_increment_ms", self.speed_increment_ms),
            ("grabs_per_step", self.grabs_per_step as u64),
            ("min_interval_ms", self.min_interval_ms),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(GameError::InvalidConfiguration(format!(
                "{name} must be positive"
            )));
        }

        let min_columns = SPAWN_LENGTH as u32 + 2;
        if self.columns < min_columns || self.rows < 3 {
            return Err(GameError::InvalidConfiguration(format!(
                "board must be at least {min_columns}x3 cells, got {}x{}",
                self.columns, self.rows
            )));
        }

        let cells = self.columns as u64 * self.rows as u64;
        if cells > MAX_BOARD_CELLS {
            return Err(GameError::InvalidConfiguration(format!(
                "board of {}x{} cells exceeds {MAX_BOARD_CELLS} cells",
                self.columns, self.rows
            )));
        }

        // Surface coordinates are i32
        let too_large =
            |cells: u32| cells as u64 * self.cell_size as u64 > i32::MAX as u64 / 2;
        if too_large(self.columns) || too_large(self.rows) {
            return Err(GameError::InvalidConfiguration(format!(
                "board of {}x{} cells of size {} is too large",
                self.columns, self.rows, self.cell_size
            )));
        }

        Ok(())
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse game config")?;
        config.validate().context("Invalid game config")?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize game config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.columns, 30);
        assert_eq!(config.rows, 20);
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.width(), 600);
        assert_eq!(config.height(), 400);
        assert_eq!(config.board().columns(), 30);
        assert_eq!(config.board().rows(), 20);
        assert_eq!(config.min_interval_ms, 40);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12).with_seed(3);
        assert_eq!(config.columns, 15);
        assert_eq!(config.rows, 12);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = GameConfig::default();
        config.cell_size = 0;
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfiguration(msg)) if msg.contains("cell_size")
        ));

        let mut config = GameConfig::default();
        config.grabs_per_step = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.initial_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_tiny_board() {
        assert!(GameConfig::new(5, 10).validate().is_err());
        assert!(GameConfig::new(10, 2).validate().is_err());
        assert!(GameConfig::new(6, 3).validate().is_ok());
    }

    #[test]
    fn test_validate_caps_board_area() {
        let mut config = GameConfig::new(100_000, 100_000);
        config.cell_size = 1;
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfiguration(msg)) if msg.contains("exceeds")
        ));
        assert!(GameConfig::new(1000, 1000).validate().is_ok());
        assert!(GameConfig::new(1000, 1001).validate().is_err());
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "columns": 12, "rows": 8, "seed": 99 }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.columns, 12);
        assert_eq!(config.rows, 8);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.initial_interval_ms, 200);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        let config = GameConfig::new(16, 9).with_seed(5);
        config.save(&path).unwrap();
        assert_eq!(GameConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_invalid_board() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "cell_size": 0 }"#).unwrap();
        assert!(GameConfig::load(&path).is_err());
        assert!(GameConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
