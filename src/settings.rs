//! Gameplay tuning
//!
//! The float constants that shape a session, loadable from JSON. Grid and
//! barrier counts are compile-time and live in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("Failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning value for '{field}': {value}")]
    Invalid { field: &'static str, value: f32 },
}

/// Gameplay tuning values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Marble travel per frame once fired
    pub marble_speed: f32,
    pub marble_radius: f32,
    /// Aim rotation per frame (degrees)
    pub aim_rate: f32,
    /// Aim clamp (degrees either side of straight ahead)
    pub max_aim_angle: f32,
    /// Distance past the front row at which a shot is abandoned
    pub overshoot_margin: f32,
    /// Block drift toward the player (units per second)
    pub block_drift_speed: f32,
    pub wobble_speed: f32,
    pub wobble_amplitude: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            marble_speed: MARBLE_SPEED,
            marble_radius: MARBLE_RADIUS,
            aim_rate: AIM_RATE,
            max_aim_angle: MAX_AIM_ANGLE,
            overshoot_margin: OVERSHOOT_MARGIN,
            block_drift_speed: BLOCK_DRIFT_SPEED,
            wobble_speed: WOBBLE_SPEED,
            wobble_amplitude: WOBBLE_AMPLITUDE,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON string; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("marble_speed", self.marble_speed),
            ("marble_radius", self.marble_radius),
            ("aim_rate", self.aim_rate),
            ("max_aim_angle", self.max_aim_angle),
            ("overshoot_margin", self.overshoot_margin),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid { field, value });
            }
        }

        if self.max_aim_angle >= 90.0 {
            return Err(TuningError::Invalid {
                field: "max_aim_angle",
                value: self.max_aim_angle,
            });
        }

        let non_negative = [
            ("block_drift_speed", self.block_drift_speed),
            ("wobble_speed", self.wobble_speed),
            ("wobble_amplitude", self.wobble_amplitude),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Invalid { field, value });
            }
        }

        Ok(())
    }
}
