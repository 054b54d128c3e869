//! Engine error types.
//!
//! The engine never fails at runtime; these errors are only raised when a
//! timer or session is constructed from invalid inputs.

use thiserror::Error;

/// Errors raised when constructing timers or sessions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// Countdown duration is zero, negative, or not a finite number.
    #[error("タイマーの時間は正の秒数で指定してください: {0}")]
    InvalidDuration(f64),

    /// Warning ratio lies outside `[0, 1]`.
    #[error("警告しきい値は0.0-1.0の範囲で指定してください: {0}")]
    InvalidWarningRatio(f64),
}

impl EngineError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::InvalidDuration(_) => "--work / --rest に0より大きい値を指定してください",
            Self::InvalidWarningRatio(_) => "--warning-ratio には 0.2 のような割合を指定してください",
        }
    }
}
