//! Generator configuration
//!
//! Handles generation parameters and loading them from a JSON file. Missing
//! keys fall back to the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::GenerationError;
use crate::layout::WallMode;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] GenerationError),
}

/// Parameters of one generation session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of rooms to place
    pub room_count: usize,
    /// Smallest rectangle side
    pub min_room_size: i32,
    /// Largest rectangle side, also the L-shape leg length
    pub max_room_size: i32,
    /// Cap on the shapes sampled from the catalog for one session
    pub max_sampled_shapes: usize,
    /// Add the L-shape and its rotations to the catalog
    pub include_l_shapes: bool,
    pub wall_mode: WallMode,
    /// Fixed seed; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            room_count: 10,
            min_room_size: 2,
            max_room_size: 4,
            max_sampled_shapes: 12,
            include_l_shapes: true,
            wall_mode: WallMode::PerRoom,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Reject parameters that cannot start a session
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.room_count == 0 {
            return Err(GenerationError::InvalidRoomCount {
                requested: self.room_count,
            });
        }
        if self.min_room_size < 1 {
            return Err(GenerationError::InvalidShapeParameters {
                reason: format!(
                    "minimum room size must be at least 1, got {}",
                    self.min_room_size
                ),
            });
        }
        if self.min_room_size > self.max_room_size {
            return Err(GenerationError::InvalidShapeParameters {
                reason: format!(
                    "minimum room size {} exceeds maximum {}",
                    self.min_room_size, self.max_room_size
                ),
            });
        }
        if self.max_sampled_shapes == 0 {
            return Err(GenerationError::InvalidShapeParameters {
                reason: "the sampled catalog must hold at least one shape".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_sampled_shapes, 12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GeneratorConfig::from_json_str(r#"{ "room_count": 25, "seed": 9 }"#).unwrap();
        assert_eq!(config.room_count, 25);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.min_room_size, 2);
        assert_eq!(config.wall_mode, WallMode::PerRoom);
    }

    #[test]
    fn test_wall_mode_from_json() {
        let config = GeneratorConfig::from_json_str(r#"{ "wall_mode": "Imputed" }"#).unwrap();
        assert_eq!(config.wall_mode, WallMode::Imputed);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let zero_rooms = GeneratorConfig::from_json_str(r#"{ "room_count": 0 }"#);
        assert!(matches!(
            zero_rooms,
            Err(ConfigError::Invalid(GenerationError::InvalidRoomCount { .. }))
        ));

        let inverted = GeneratorConfig {
            min_room_size: 5,
            max_room_size: 3,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let no_shapes = GeneratorConfig {
            max_sampled_shapes: 0,
            ..Default::default()
        };
        assert!(no_shapes.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GeneratorConfig::from_json_str("{ room_count: }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            GeneratorConfig::load("/nonexistent/dungeon.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("df_core_config_test.json");
        fs::write(&path, r#"{ "room_count": 4, "max_room_size": 3 }"#).unwrap();
        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.room_count, 4);
        assert_eq!(config.max_room_size, 3);
        fs::remove_file(&path).ok();
    }
}
