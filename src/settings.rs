//! Game settings and preferences
//!
//! Read from JSON handed over by the host page. Nothing is persisted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_FRAME_SCALE, PADDLE_KEY_STEP, REFERENCE_FRAME_MS};

/// How ball displacement relates to wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FrameTiming {
    /// Scale motion by elapsed time, measured in 60 Hz reference frames
    #[default]
    Elapsed,
    /// One velocity step per displayed frame, whatever the refresh rate
    PerFrame,
}

impl FrameTiming {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameTiming::Elapsed => "Elapsed",
            FrameTiming::PerFrame => "PerFrame",
        }
    }

    /// Reference frames to advance for `elapsed_ms` of wall-clock time
    pub fn frame_scale(&self, elapsed_ms: f64) -> f32 {
        match self {
            FrameTiming::Elapsed => {
                ((elapsed_ms / REFERENCE_FRAME_MS) as f32).clamp(0.0, MAX_FRAME_SCALE)
            }
            FrameTiming::PerFrame => 1.0,
        }
    }
}

/// Errors from reading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// JSON could not be parsed into settings
    #[error("Malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A volume outside 0.0..=1.0
    #[error("Volume '{name}' must be between 0 and 1, got {value}")]
    VolumeOutOfRange { name: &'static str, value: f32 },

    /// Keyboard step must move the paddle
    #[error("Keyboard step must be positive, got {0}")]
    InvalidKeyStep(f32),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Controls ===
    /// Paddle distance per arrow key press (pixels)
    pub key_step: f32,
    /// Follow the mouse with the paddle
    pub mouse_control: bool,

    // === Simulation ===
    pub frame_timing: FrameTiming,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 0.5,
            muted: false,
            key_step: PADDLE_KEY_STEP,
            mouse_control: true,
            frame_timing: FrameTiming::Elapsed,
        }
    }
}

impl Settings {
    /// Parse and validate settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings, logging and falling back to defaults on any error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::warn!("Ignoring settings: {}", e);
                Self::default()
            }),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [("master_volume", self.master_volume), ("sfx_volume", self.sfx_volume)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::VolumeOutOfRange { name, value });
            }
        }
        if self.key_step.is_nan() || self.key_step <= 0.0 {
            return Err(SettingsError::InvalidKeyStep(self.key_step));
        }
        Ok(())
    }

    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}
