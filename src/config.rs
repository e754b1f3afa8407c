//! Startup configuration
//!
//! Everything tunable lives in `GameConfig`. The game reads `config.ron` from
//! the working directory when it exists; every field is optional and falls
//! back to the built-in default. Example:
//!
//! ```ron
//! (
//!     seed: Some(42),
//!     theme: Snow,
//!     movement: (jump_power: 7.0),
//!     generator: (hole_chance: 0.1),
//! )
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{AnimationConfig, FpsLimit, MovementInfo, PhysicsConfig, Theme};
use crate::world::{GeneratorConfig, EXIT_MARGIN, SPAWN_COLUMN};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "config.ron";

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// All startup constants and tuning values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub window_width: i32,
    pub window_height: i32,
    pub fps_limit: FpsLimit,

    /// World size in tiles
    pub world_width: usize,
    pub world_height: usize,
    /// Maximum number of objects per level
    pub object_capacity: usize,

    /// Base seed for level generation. `None` picks one from the clock at
    /// startup.
    pub seed: Option<u64>,
    pub theme: Theme,

    /// Player body size in pixels
    pub player_size: (f32, f32),
    pub movement: MovementInfo,
    pub physics: PhysicsConfig,
    pub animation: AnimationConfig,
    pub generator: GeneratorConfig,

    /// Fraction of the remaining distance the camera covers each frame
    pub camera_smoothing: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Jumpy Dumpy".to_string(),
            window_width: 640,
            window_height: 360,
            fps_limit: FpsLimit::default(),
            world_width: 80,
            world_height: 40,
            object_capacity: 16,
            seed: None,
            theme: Theme::default(),
            player_size: (15.0, 31.0),
            movement: MovementInfo::default(),
            physics: PhysicsConfig::default(),
            animation: AnimationConfig::default(),
            generator: GeneratorConfig::default(),
            camera_smoothing: 0.15,
        }
    }
}

impl GameConfig {
    /// Parse a RON document and validate it
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// Load `path` if it exists. A missing file gives the defaults silently;
    /// an unreadable or invalid one is logged and also gives the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No {} found, using default config", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Failed to load {}: {}, using default config", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The spawn column and the exit column must both exist and differ
        let min_width = (SPAWN_COLUMN + EXIT_MARGIN + 1) as usize;
        if self.world_width < min_width {
            return Err(ConfigError::Invalid(format!(
                "world_width must be at least {} (got {})",
                min_width, self.world_width
            )));
        }
        if self.world_height < 2 {
            return Err(ConfigError::Invalid(format!(
                "world_height must be at least 2 (got {})",
                self.world_height
            )));
        }
        if self.object_capacity == 0 {
            return Err(ConfigError::Invalid("object_capacity must be non-zero".to_string()));
        }
        if self.window_width <= 0 || self.window_height <= 0 {
            return Err(ConfigError::Invalid("window size must be positive".to_string()));
        }
        if self.player_size.0 <= 0.0 || self.player_size.1 <= 0.0 {
            return Err(ConfigError::Invalid("player_size must be positive".to_string()));
        }
        if self.animation.frames == 0 || self.animation.animations == 0 {
            return Err(ConfigError::Invalid("animation sheet needs at least one frame".to_string()));
        }
        if self.generator.max_hole_len == 0 {
            return Err(ConfigError::Invalid("generator.max_hole_len must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.camera_smoothing) {
            return Err(ConfigError::Invalid(format!(
                "camera_smoothing must be within 0..=1 (got {})",
                self.camera_smoothing
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_startup_constants() {
        let config = GameConfig::default();
        assert_eq!((config.window_width, config.window_height), (640, 360));
        assert_eq!((config.world_width, config.world_height), (80, 40));
        assert_eq!(config.object_capacity, 16);
        assert_eq!(config.fps_limit, FpsLimit::Fps60);
        assert!((config.physics.gravity - 0.3).abs() < 0.001);
        assert!((config.movement.deceleration - 0.85).abs() < 0.001);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_ron_keeps_other_defaults() {
        let config = GameConfig::from_ron("(seed: Some(42), movement: (jump_power: 7.5), theme: Snow)").unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.theme, Theme::Snow);
        assert!((config.movement.jump_power - 7.5).abs() < 0.001);
        assert!((config.movement.max_speed - 3.0).abs() < 0.001);
        assert_eq!(config.world_width, 80);
    }

    #[test]
    fn test_parse_error() {
        let err = GameConfig::from_ron("(seed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_world_too_narrow() {
        let err = GameConfig::from_ron("(world_width: 6)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(GameConfig::from_ron("(world_width: 7)").is_ok());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = GameConfig::from_ron("(object_capacity: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = GameConfig::default();
        config.seed = Some(7);
        config.world_width = 40;
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new()).unwrap();
        fs::File::create(&path).unwrap().write_all(text.as_bytes()).unwrap();

        let loaded = GameConfig::load(&path).unwrap();
        assert_eq!(loaded.seed, Some(7));
        assert_eq!(loaded.world_width, 40);
    }

    #[test]
    fn test_missing_or_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ron");
        assert_eq!(GameConfig::load_or_default(&missing).world_width, 80);
        assert!(matches!(GameConfig::load(&missing), Err(ConfigError::Io(_))));

        let broken = dir.path().join(CONFIG_FILE);
        fs::write(&broken, "(world_height: 1)").unwrap();
        assert_eq!(GameConfig::load_or_default(&broken).world_height, 40);
    }
}
