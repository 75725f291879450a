//! Game settings
//!
//! Read once at startup from an optional JSON file. Nothing here is
//! hot-reloadable: a `GameState` copies what it needs when it is built.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::AudioSettings;
use crate::consts::*;
use crate::sim::input::AxisMapping;

/// Why a settings file could not be used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Startup configuration for one game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Radius of the circular wall
    pub world_radius: f32,
    /// Size of the orb pool
    pub target_count: usize,
    /// Orb hit radius
    pub target_radius: f32,
    /// Inner edge of the spawn annulus
    pub min_spawn_radius: f32,
    /// Gap between the outer edge of the spawn annulus and the wall
    pub spawn_margin: f32,
    /// Lowest spawn height
    pub spawn_height: f32,
    /// Height band above `spawn_height`
    pub spawn_height_range: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_start: [f32; 3],
    /// Stick locomotion speed (m/s)
    pub walk_speed: f32,
    pub deadzone: f32,
    /// Which gamepad axes carry the thumbstick
    pub axis_mapping: AxisMapping,

    // === Idle animation ===
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub spin_per_frame: f32,

    // === Hit feedback ===
    pub emitter_lifetime_secs: f64,
    pub haptic_amplitude: f32,
    pub haptic_duration_ms: f32,
    pub audio: AudioSettings,

    /// Seed for orb placement
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_radius: WORLD_RADIUS,
            target_count: SPHERE_COUNT,
            target_radius: SPHERE_RADIUS,
            min_spawn_radius: MIN_SPAWN_RADIUS,
            spawn_margin: SPAWN_MARGIN,
            spawn_height: SPAWN_HEIGHT,
            spawn_height_range: SPAWN_HEIGHT_RANGE,

            player_radius: PLAYER_RADIUS,
            player_start: [0.0, 0.0, 3.0],
            walk_speed: VR_WALK_SPEED,
            deadzone: STICK_DEADZONE,
            axis_mapping: AxisMapping::default(),

            bob_amplitude: BOB_AMPLITUDE,
            bob_frequency: BOB_FREQUENCY,
            spin_per_frame: SPIN_PER_FRAME,

            emitter_lifetime_secs: EMITTER_LIFETIME,
            haptic_amplitude: HAPTIC_AMPLITUDE,
            haptic_duration_ms: HAPTIC_DURATION_MS,
            audio: AudioSettings::default(),

            seed: 0x0b5e_55ed,
        }
    }
}

impl Settings {
    /// Furthest the player's center may stand from the arena axis
    pub fn max_player_distance(&self) -> f32 {
        self.world_radius - self.player_radius
    }

    /// Outer edge of the spawn annulus
    pub fn max_spawn_radius(&self) -> f32 {
        self.world_radius - self.spawn_margin
    }

    pub fn player_start(&self) -> Vec3 {
        Vec3::from_array(self.player_start)
    }

    /// Reject configurations the simulation cannot honor
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| Err(SettingsError::Invalid(msg));

        let reals = [
            self.world_radius,
            self.target_radius,
            self.min_spawn_radius,
            self.spawn_margin,
            self.spawn_height,
            self.spawn_height_range,
            self.player_radius,
            self.walk_speed,
            self.deadzone,
            self.bob_amplitude,
            self.bob_frequency,
            self.spin_per_frame,
        ];
        if reals.iter().chain(&self.player_start).any(|v| !v.is_finite()) {
            return invalid("settings must not contain NaN or infinite values".into());
        }
        if self.target_count == 0 {
            return invalid("target_count must be at least 1".into());
        }
        if self.world_radius <= 0.0 || self.target_radius <= 0.0 || self.player_radius < 0.0 {
            return invalid("world, target and player radii must be positive".into());
        }
        if self.max_player_distance() <= 0.0 {
            return invalid(format!(
                "player_radius {} leaves no room inside world_radius {}",
                self.player_radius, self.world_radius
            ));
        }
        if self.min_spawn_radius < 0.0 || self.min_spawn_radius > self.max_spawn_radius() {
            return invalid(format!(
                "spawn annulus [{}, {}] is empty",
                self.min_spawn_radius,
                self.max_spawn_radius()
            ));
        }
        if self.spawn_height_range < 0.0 {
            return invalid("spawn_height_range must not be negative".into());
        }
        if !(0.0..1.0).contains(&self.deadzone) {
            return invalid(format!("deadzone {} must be in [0, 1)", self.deadzone));
        }
        if self.walk_speed < 0.0 {
            return invalid("walk_speed must not be negative".into());
        }
        if self.axis_mapping.primary == self.axis_mapping.fallback {
            return invalid("axis_mapping primary and fallback pairs must differ".into());
        }
        Ok(())
    }

    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
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
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!((settings.world_radius - 78.0).abs() < 1e-5);
        assert!((settings.max_player_distance() - 77.5).abs() < 1e-5);
        assert!((settings.max_spawn_radius() - 76.0).abs() < 1e-5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "target_count": 4, "walk_speed": 2.5 }"#).unwrap();
        assert_eq!(settings.target_count, 4);
        assert!((settings.walk_speed - 2.5).abs() < 1e-5);
        assert_eq!(settings.axis_mapping, AxisMapping::default());
        assert!((settings.player_radius - PLAYER_RADIUS).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_empty_spawn_annulus() {
        let err = Settings::from_json(r#"{ "world_radius": 5.0, "min_spawn_radius": 4.0 }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_targets() {
        let settings = Settings {
            target_count: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let settings = Settings {
            world_radius: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/definitely/not/here.json");
        assert_eq!(settings.target_count, SPHERE_COUNT);
    }
}
