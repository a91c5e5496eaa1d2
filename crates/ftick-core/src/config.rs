#![forbid(unsafe_code)]

//! Ticker configuration.
//!
//! [`TickerConfig`] gathers every tunable of the engine. With the `config`
//! feature it can be loaded from TOML or JSON; every field is optional in
//! the file and falls back to its default.
//!
//! ```toml
//! # ftick.toml
//! speed = 12.0
//! gap = 4.0
//! window_count = 3
//! placeholder = "SYNCING…"
//! ```
//!
//! ```rust,ignore
//! let config = TickerConfig::from_toml_file("ftick.toml")?;
//! ```
//!
//! Loaders validate before returning; a config built in code can be checked
//! with [`TickerConfig::validate`].

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{DEFAULT_MIN_STEP, DEFAULT_SPEED, MotionParams};
use crate::ring::{DEFAULT_PLACEHOLDER, DEFAULT_REPEATS};

/// Default gap between items, in display units.
pub const DEFAULT_GAP: f64 = 48.0;

/// Default number of windows.
pub const DEFAULT_WINDOW_COUNT: usize = 3;

/// Largest accepted window count.
pub const MAX_WINDOW_COUNT: usize = 64;

/// Largest accepted number of list copies per ring.
pub const MAX_REPEATS: usize = 1_000;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TickerConfig {
    /// Scroll speed, units per second.
    pub speed: f64,
    /// Blank space between consecutive items.
    pub gap: f64,
    /// Copies of the message list per ring.
    pub repeats: usize,
    /// Number of windows sampling the lane.
    pub window_count: usize,
    /// Smallest frame delta, in seconds.
    pub min_step_secs: f64,
    /// Largest frame delta, in seconds. Unset replays long pauses in full.
    pub max_step_secs: Option<f64>,
    /// Text shown while the message list is empty.
    pub placeholder: String,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            gap: DEFAULT_GAP,
            repeats: DEFAULT_REPEATS,
            window_count: DEFAULT_WINDOW_COUNT,
            min_step_secs: DEFAULT_MIN_STEP.as_secs_f64(),
            max_step_secs: None,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl TickerConfig {
    /// Preset for terminal hosts, where one unit is one cell.
    #[must_use]
    pub fn cells() -> Self {
        Self {
            speed: 12.0,
            gap: 4.0,
            ..Self::default()
        }
    }

    /// Motion tunables derived from this config.
    ///
    /// Out-of-range step values fall back to the defaults rather than panic.
    #[must_use]
    pub fn motion_params(&self) -> MotionParams {
        let min_step =
            Duration::try_from_secs_f64(self.min_step_secs).unwrap_or(DEFAULT_MIN_STEP);
        let max_step = self
            .max_step_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok());
        MotionParams {
            speed: self.speed,
            min_step,
            max_step,
        }
    }

    /// Check every field. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.speed.is_finite() && self.speed > 0.0) {
            errors.push(format!("speed must be > 0, got {}", self.speed));
        }

        if !(self.gap.is_finite() && self.gap >= 0.0) {
            errors.push(format!("gap must be >= 0, got {}", self.gap));
        }

        if !(1..=MAX_REPEATS).contains(&self.repeats) {
            errors.push(format!(
                "repeats must be in 1..={MAX_REPEATS}, got {}",
                self.repeats
            ));
        }

        if !(1..=MAX_WINDOW_COUNT).contains(&self.window_count) {
            errors.push(format!(
                "window_count must be in 1..={MAX_WINDOW_COUNT}, got {}",
                self.window_count
            ));
        }

        if !(self.min_step_secs.is_finite() && self.min_step_secs > 0.0) {
            errors.push(format!(
                "min_step_secs must be > 0, got {}",
                self.min_step_secs
            ));
        }

        if let Some(max) = self
            .max_step_secs
            .filter(|max| !(max.is_finite() && *max >= self.min_step_secs))
        {
            errors.push(format!(
                "max_step_secs must be >= min_step_secs ({}), got {max}",
                self.min_step_secs
            ));
        }

        errors
    }

    /// Return `self` if valid, otherwise every violation.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from a file, choosing JSON for `.json` and TOML otherwise.
    #[cfg(feature = "config")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }
}

/// Errors from loading a [`TickerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
