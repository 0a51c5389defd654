//! Simulation settings
//!
//! Everything a control panel may push into the simulation between steps,
//! plus the bounds and seed fixed at startup. Persisted as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a settings value is rejected before it reaches the simulation
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("ball radius {0} must be positive")]
    NonPositiveBallRadius(f32),
    #[error("ball radius {radius} exceeds the broad-phase limit of {max}")]
    BallRadiusTooLarge { radius: f32, max: f32 },
    #[error("container radius {container} must exceed ball radius {ball}")]
    ContainerTooSmall { container: f32, ball: f32 },
    #[error("gap width {0} must be between 0 and 360 degrees")]
    GapOutOfRange(f32),
    #[error("respawn ratio {0} must not be negative")]
    NegativeRespawnRatio(f64),
    #[error("spawn speed range {min}..={max} is invalid")]
    InvalidSpeedRange { min: f32, max: f32 },
    #[error("world size {width}x{height} must be positive")]
    InvalidWorldSize { width: f32, height: f32 },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Physics ===
    /// Downward acceleration (px/s²). Negative values pull upward.
    pub gravity: f32,
    /// Restitution applied to every contact (1.0 = elastic)
    pub restitution: f32,

    // === Balls ===
    /// Radius for newly spawned balls
    pub ball_radius: f32,
    /// Replacement balls per removed ball (fractional values accumulate)
    pub respawn_ratio: f64,
    /// Spawn speed range (px/s)
    pub min_spawn_speed: f32,
    pub max_spawn_speed: f32,

    // === Container ===
    pub container_radius: f32,
    /// Angular width of the escape gap
    pub gap_degrees: f32,
    /// Rotation rate (degrees per second)
    pub rotation_speed: f32,

    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Seed for the spawn RNG
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            restitution: RESTITUTION,

            ball_radius: BALL_RADIUS,
            respawn_ratio: RESPAWN_RATIO,
            min_spawn_speed: BALL_MIN_SPEED,
            max_spawn_speed: BALL_MAX_SPEED,

            container_radius: CONTAINER_RADIUS,
            gap_degrees: CONTAINER_GAP_DEGREES,
            rotation_speed: CONTAINER_ROTATION_SPEED,

            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            seed: 0,
        }
    }
}

impl Settings {
    /// Center of the world, where the container sits and balls spawn
    pub fn world_center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.world_width / 2.0, self.world_height / 2.0)
    }

    /// Check every value against the preconditions the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        // NaN fails every comparison, so it is rejected explicitly
        if self.ball_radius.is_nan() || self.ball_radius <= 0.0 {
            return Err(SettingsError::NonPositiveBallRadius(self.ball_radius));
        }
        if self.ball_radius > MAX_BALL_RADIUS {
            return Err(SettingsError::BallRadiusTooLarge {
                radius: self.ball_radius,
                max: MAX_BALL_RADIUS,
            });
        }
        if self.container_radius.is_nan() || self.container_radius <= self.ball_radius {
            return Err(SettingsError::ContainerTooSmall {
                container: self.container_radius,
                ball: self.ball_radius,
            });
        }
        if !(0.0..=360.0).contains(&self.gap_degrees) {
            return Err(SettingsError::GapOutOfRange(self.gap_degrees));
        }
        if self.respawn_ratio.is_nan() || self.respawn_ratio < 0.0 {
            return Err(SettingsError::NegativeRespawnRatio(self.respawn_ratio));
        }
        let (min, max) = (self.min_spawn_speed, self.max_spawn_speed);
        if min.is_nan() || max.is_nan() || min < 0.0 || min > max {
            return Err(SettingsError::InvalidSpeedRange {
                min: self.min_spawn_speed,
                max: self.max_spawn_speed,
            });
        }
        let (width, height) = (self.world_width, self.world_height);
        if width.is_nan() || height.is_nan() || width <= 0.0 || height <= 0.0 {
            return Err(SettingsError::InvalidWorldSize {
                width: self.world_width,
                height: self.world_height,
            });
        }
        Ok(())
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let settings = Settings {
            ball_radius: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NonPositiveBallRadius(_))
        ));
    }

    #[test]
    fn test_rejects_nan_values() {
        let settings = Settings {
            ball_radius: f32::NAN,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NonPositiveBallRadius(_))
        ));

        let settings = Settings {
            respawn_ratio: f64::NAN,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NegativeRespawnRatio(_))
        ));

        let settings = Settings {
            max_spawn_speed: f32::NAN,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidSpeedRange { .. })
        ));
    }

    #[test]
    fn test_rejects_radius_beyond_grid() {
        let settings = Settings {
            ball_radius: MAX_BALL_RADIUS + 1.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::BallRadiusTooLarge { .. })
        ));
    }

    #[test]
    fn test_rejects_gap_out_of_range() {
        let settings = Settings {
            gap_degrees: 361.0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::GapOutOfRange(_))));
    }

    #[test]
    fn test_negative_gravity_is_valid() {
        let settings = Settings {
            gravity: -500.0,
            restitution: 1.2,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "gravity": 100.0, "gap_degrees": 90.0 }"#).unwrap();
        assert_eq!(settings.gravity, 100.0);
        assert_eq!(settings.gap_degrees, 90.0);
        assert_eq!(settings.ball_radius, BALL_RADIUS);
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "respawn_ratio": -1.0 }"#),
            Err(SettingsError::NegativeRespawnRatio(_))
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: 42,
            respawn_ratio: 0.5,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/marble-bounce.json"));
        assert_eq!(settings, Settings::default());
    }
}
