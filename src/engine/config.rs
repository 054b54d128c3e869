//! Session configuration.

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use crate::types::Phase;

const SECONDS_IN_MINUTE: f64 = 60.0;

/// Default work interval: 0.4 minutes.
pub const DEFAULT_WORK_SECONDS: f64 = 0.4 * SECONDS_IN_MINUTE;

/// Default rest interval: 0.1 minutes.
pub const DEFAULT_REST_SECONDS: f64 = 0.1 * SECONDS_IN_MINUTE;

/// Default warning window as a share of the phase duration.
pub const DEFAULT_WARNING_RATIO: f64 = 0.2;

/// Durations and thresholds supplied by the shell at construction.
///
/// # Example
///
/// ```
/// use pomobar::engine::SessionConfig;
///
/// let config = SessionConfig::default().with_work_seconds(1500.0);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.work_seconds, 1500.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Work interval in seconds
    #[serde(rename = "workSeconds")]
    pub work_seconds: f64,
    /// Rest interval in seconds
    #[serde(rename = "restSeconds")]
    pub rest_seconds: f64,
    /// Remaining share of a phase at or below which the warning fires
    #[serde(rename = "warningRatio")]
    pub warning_ratio: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            work_seconds: DEFAULT_WORK_SECONDS,
            rest_seconds: DEFAULT_REST_SECONDS,
            warning_ratio: DEFAULT_WARNING_RATIO,
        }
    }
}

impl SessionConfig {
    /// Sets the work interval.
    #[must_use]
    pub fn with_work_seconds(mut self, seconds: f64) -> Self {
        self.work_seconds = seconds;
        self
    }

    /// Sets the rest interval.
    #[must_use]
    pub fn with_rest_seconds(mut self, seconds: f64) -> Self {
        self.rest_seconds = seconds;
        self
    }

    /// Sets the warning ratio.
    #[must_use]
    pub fn with_warning_ratio(mut self, ratio: f64) -> Self {
        self.warning_ratio = ratio;
        self
    }

    /// Returns the default countdown length for a phase.
    pub fn duration_for(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Work => self.work_seconds,
            Phase::Rest => self.rest_seconds,
        }
    }

    /// Share of the full cycle taken by the work interval.
    ///
    /// Used to size the two progress bars side by side.
    pub fn work_share(&self) -> f64 {
        self.work_seconds / (self.work_seconds + self.rest_seconds)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDuration` for a non-positive or non-finite interval and
    /// `InvalidWarningRatio` for a ratio outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_duration(self.work_seconds)?;
        validate_duration(self.rest_seconds)?;
        if !(0.0..=1.0).contains(&self.warning_ratio) {
            return Err(EngineError::InvalidWarningRatio(self.warning_ratio));
        }
        Ok(())
    }
}

/// Rejects durations that cannot back a countdown.
pub(crate) fn validate_duration(seconds: f64) -> Result<(), EngineError> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidDuration(seconds))
    }
}
