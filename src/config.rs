//! World bounds and motion tuning
//!
//! Loaded from an optional JSON file; every field has a default so partial
//! files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::REACH_SAFETY_FACTOR;

/// Errors raised while reading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Player motion constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Square hitbox edge length
    pub size: f32,
    /// Maximum horizontal speed (px/tick)
    pub max_speed: f32,
    /// Horizontal acceleration while a direction is held
    pub acceleration: f32,
    /// Velocity multiplier per tick on a platform with no input
    pub ground_friction: f32,
    /// Velocity multiplier per tick in the air with no input
    pub air_friction: f32,
    /// Vertical velocity applied on landing (negative is up)
    pub jump_power: f32,
    pub gravity: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: 50.0,
            max_speed: 6.0,
            acceleration: 0.4,
            ground_friction: 0.85,
            air_friction: 0.92,
            jump_power: -12.0,
            gravity: 0.4,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical canvas width; the world wraps horizontally at this bound
    pub width: f32,
    /// Logical canvas height; the camera pins the player at half of it
    pub height: f32,
    pub player: PlayerTuning,
    pub platform_width: f32,
    pub platform_height: f32,
    /// Minimum vertical spacing between consecutive platforms
    pub platform_gap: f32,
    /// Extra random spacing added on top of `platform_gap`
    pub platform_gap_jitter: f32,
    /// Platforms kept alive; the generator tops the world up to this count
    pub target_platforms: usize,
    /// Entities further than this below the canvas are culled
    pub cull_margin: f32,
    /// How far above the canvas top the initial world extends
    pub initial_extent: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 450.0,
            height: 600.0,
            player: PlayerTuning::default(),
            platform_width: 80.0,
            platform_height: 15.0,
            platform_gap: 80.0,
            platform_gap_jitter: 50.0,
            target_platforms: 30,
            cull_margin: 100.0,
            initial_extent: 2000.0,
        }
    }
}

impl GameConfig {
    /// Config with a different canvas size and default tuning
    pub fn with_canvas(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Longest horizontal distance generation trusts the player to cover in one jump
    ///
    /// Air time of a full arc is `2 * |jump| / gravity` ticks, covered at max speed,
    /// scaled down by a safety factor so gaps stay comfortable.
    pub fn max_horizontal_reach(&self) -> f32 {
        let air_ticks = (2.0 * self.player.jump_power / self.player.gravity).abs();
        self.player.max_speed * air_ticks * REACH_SAFETY_FACTOR
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= self.platform_width {
            return Err(ConfigError::Invalid("width must exceed platform width"));
        }
        if self.height <= 0.0 {
            return Err(ConfigError::Invalid("height must be positive"));
        }
        if self.player.gravity <= 0.0 {
            return Err(ConfigError::Invalid("gravity must be positive"));
        }
        if self.player.jump_power >= 0.0 {
            return Err(ConfigError::Invalid("jump power must point upward"));
        }
        if self.platform_gap <= 0.0 {
            return Err(ConfigError::Invalid("platform gap must be positive"));
        }
        if self.platform_gap_jitter < 0.0 {
            return Err(ConfigError::Invalid("platform gap jitter must not be negative"));
        }
        if self.initial_extent < 0.0 {
            return Err(ConfigError::Invalid("initial extent must not be negative"));
        }
        if self.target_platforms == 0 {
            return Err(ConfigError::Invalid("target platform count must be non-zero"));
        }
        Ok(())
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load a config, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
