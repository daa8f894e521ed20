//! Tuning constants for the simulation and the frame driver.
//!
//! Every value has a built-in default matching the stock Daytona setup, so the
//! game runs without any file present. An optional `daytona.yaml` in the working
//! directory can override individual fields:
//!
//! ```yaml
//! physics:
//!   max_speed: 20
//!   lap_target: 3
//! frame:
//!   steps_per_second: 120
//! ```

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

/// Base name of the optional settings file (extension resolved by `config`).
pub const SETTINGS_FILE: &str = "daytona";

/// Highest accepted physics rate. Much finer steps round the step length toward zero.
pub const MAX_STEPS_PER_SECOND: u32 = 1000;

/// Errors produced while reading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Per-step driving constants. All rates are applied once per physics step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Speed gained per step while throttle is held.
    pub acceleration: f64,
    /// Upper speed bound.
    pub max_speed: f64,
    /// Speed lost per step while the brake is held.
    pub braking: f64,
    /// Speed lost per step regardless of input.
    pub friction: f64,
    /// Heading change in degrees per step while steering.
    pub turn_rate: f64,
    /// Speed cap applied while the pit limiter is engaged.
    pub pit_speed_limit: f64,
    /// Number of laps that completes the race; the counter saturates here.
    pub lap_target: u32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            acceleration: 0.5,
            max_speed: 15.0,
            braking: 0.7,
            friction: 0.05,
            turn_rate: 3.0,
            pit_speed_limit: 2.0,
            lap_target: 5,
        }
    }
}

/// Fixed-step clock configuration for the frame driver.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    pub steps_per_second: u32,
    /// Upper bound on catch-up steps after a long frame.
    pub max_steps_per_frame: u32,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            steps_per_second: 60,
            max_steps_per_frame: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsSettings,
    pub frame: FrameSettings,
}

impl Settings {
    /// Loads `daytona.yaml` from the working directory if it exists.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(SETTINGS_FILE)
    }

    /// Loads settings from the file `name` (any extension `config` knows about).
    /// A missing file yields the defaults.
    pub fn load_from(name: &str) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(File::with_name(name).required(false))
            .build()?;
        Self::finish(config)
    }

    /// Parses settings from an in-memory YAML document.
    pub fn from_yaml(source: &str) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(File::from_str(source, FileFormat::Yaml))
            .build()?;
        Self::finish(config)
    }

    fn finish(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects values that would break the speed or lap invariants.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let physics = &self.physics;
        let checks: [(bool, &'static str, &'static str); 8] = [
            (
                physics.max_speed > 0.0,
                "physics.max_speed",
                "must be positive",
            ),
            (
                physics.acceleration >= 0.0,
                "physics.acceleration",
                "must not be negative",
            ),
            (
                physics.braking >= 0.0,
                "physics.braking",
                "must not be negative",
            ),
            (
                physics.friction >= 0.0,
                "physics.friction",
                "must not be negative",
            ),
            (
                physics.pit_speed_limit >= 0.0 && physics.pit_speed_limit <= physics.max_speed,
                "physics.pit_speed_limit",
                "must lie within [0, max_speed]",
            ),
            (
                physics.turn_rate.is_finite(),
                "physics.turn_rate",
                "must be finite",
            ),
            (
                (1..=MAX_STEPS_PER_SECOND).contains(&self.frame.steps_per_second),
                "frame.steps_per_second",
                "must lie within [1, 1000]",
            ),
            (
                self.frame.max_steps_per_frame > 0,
                "frame.max_steps_per_frame",
                "must be positive",
            ),
        ];

        match checks.iter().find(|(ok, _, _)| !ok) {
            Some(&(_, field, reason)) => Err(SettingsError::Invalid { field, reason }),
            None => Ok(()),
        }
    }
}
