//! Boot Configuration
//!
//! Collects every tunable the runtime needs before the first frame.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variable: `LUMEN_SEED=1234` (overrides `maze.seed`)
//! 2. Config file: path in `LUMEN_CONFIG`, otherwise `lumen.toml`
//! 3. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! [maze]
//! width = 21
//! height = 21
//! room_size = 5
//! obstacle_removal_probability = 0.3
//! seed = 42
//!
//! [pursuit]
//! detection_radius = 10.0
//!
//! [interaction]
//! interaction_hold_time = 2.0
//!
//! [session]
//! ticks = 600
//! tick_rate = 60.0
//! ```

use lumen_ai::PursuitConfig;
use lumen_maze::MazeConfig;
use lumen_player::{InteractionConfig, MotorConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default config file name
pub const DEFAULT_CONFIG_PATH: &str = "lumen.toml";

/// Errors from loading the boot configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid LUMEN_SEED value: {0}")]
    InvalidSeed(String),
}

/// Headless loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Frames to simulate
    pub ticks: u32,
    /// Frames per second
    pub tick_rate: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            tick_rate: 60.0,
        }
    }
}

impl SessionConfig {
    /// Seconds per frame
    pub fn delta_time(&self) -> f32 {
        if self.tick_rate > 0.0 {
            1.0 / self.tick_rate
        } else {
            0.0
        }
    }
}

/// Complete boot configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    pub maze: MazeConfig,
    pub pursuit: PursuitConfig,
    pub interaction: InteractionConfig,
    pub motor: MotorConfig,
    pub session: SessionConfig,
    /// Where the config was read from
    #[serde(skip)]
    pub config_path: Option<String>,
}

impl BootConfig {
    /// Load from the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("LUMEN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            let loaded = Self::load_from_file(&path)?;
            log::info!("Loaded config from {}", path);
            loaded
        } else {
            log::info!("No config at {}, using defaults", path);
            Self::default()
        };

        if let Ok(seed) = std::env::var("LUMEN_SEED") {
            config.apply_seed_override(&seed)?;
            log::info!("Seed from env: {}", seed);
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.as_ref().display().to_string());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Override the maze seed from a string
    pub fn apply_seed_override(&mut self, value: &str) -> Result<(), ConfigError> {
        let seed = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidSeed(value.to_string()))?;
        self.maze.seed = Some(seed);
        Ok(())
    }

    /// Log a summary of the effective configuration
    pub fn log_summary(&self) {
        log::info!("Lumen configuration:");
        log::info!(
            "  Maze: {}x{} (room size {}, obstacle removal {:.2})",
            self.maze.width,
            self.maze.height,
            self.maze.room_size,
            self.maze.obstacle_removal_probability
        );
        match self.maze.seed {
            Some(seed) => log::info!("  Seed: {}", seed),
            None => log::info!("  Seed: random"),
        }
        log::info!(
            "  Enemy: patrol {:.1}, chase {:.1}, detection {:.1}",
            self.pursuit.patrol_speed,
            self.pursuit.chase_speed,
            self.pursuit.detection_radius
        );
        log::info!(
            "  Session: {} ticks at {:.0} Hz",
            self.session.ticks,
            self.session.tick_rate
        );
    }
}
