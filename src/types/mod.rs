//! Core data types for the interval timer.
//!
//! This module defines the data structures shared between the engine and
//! the presentation shell:
//! - Session phase and timer status
//! - One-shot session events
//! - The read model (`Snapshot`) rendered after each tick

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Phase
// ============================================================================

/// One of the two alternating countdown intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Focused work interval
    #[default]
    Work,
    /// Rest interval between work intervals
    Rest,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Rest => "rest",
        }
    }

    /// Returns the phase that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Phase::Work => Phase::Rest,
            Phase::Rest => Phase::Work,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TimerStatus
// ============================================================================

/// Lifecycle state of a single countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    /// Counting down
    #[default]
    Running,
    /// Frozen until resumed
    Paused,
    /// Terminal; elapsed time reads as zero
    Stopped,
}

impl TimerStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Stopped => "stopped",
        }
    }
}

// ============================================================================
// SessionEvent
// ============================================================================

/// One-shot events raised by the session controller for the shell to realize.
///
/// The core never plays audio itself; the shell maps each event to a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    /// A countdown was started by the user
    PlayStartSound,
    /// The live countdown entered its warning window
    PlayWarningSound,
    /// A phase ran out and the next one began
    PlayPhaseEndSound,
}

// ============================================================================
// Snapshot
// ============================================================================

/// Display values for one of the two progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarView {
    /// Fill ratio in `[0, 1]`
    pub progress: f64,
    /// Seconds shown as the bar label
    pub remaining: f64,
    /// Whether this bar tracks the current phase
    pub live: bool,
    /// Whether this bar should be highlighted as in the warning window
    pub warn: bool,
}

impl BarView {
    /// A bar that tracks the current countdown.
    pub fn live(progress: f64, remaining: f64, warn: bool) -> Self {
        Self {
            progress,
            remaining,
            live: true,
            warn,
        }
    }

    /// A bar parked at a fixed value while the other phase runs.
    pub fn pristine(progress: f64, remaining: f64) -> Self {
        Self {
            progress,
            remaining,
            live: false,
            warn: false,
        }
    }
}

/// Read model exposed to the shell after each tick or command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Seconds left in the current phase
    pub remaining: f64,
    /// Running seconds accumulated in the current phase
    pub elapsed: f64,
    /// `elapsed / duration`, clamped to `[0, 1]`
    pub progress: f64,
    /// Current phase
    pub phase: Phase,
    /// Whether the live countdown is inside its warning window
    pub warn: bool,
    /// Whether a countdown exists and is not paused
    pub running: bool,
    /// Status of the active countdown, if any
    #[serde(rename = "timerStatus", skip_serializing_if = "Option::is_none")]
    pub timer_status: Option<TimerStatus>,
    /// Whether `start` would take effect
    #[serde(rename = "canStart")]
    pub can_start: bool,
    /// Whether `pause` would take effect
    #[serde(rename = "canPause")]
    pub can_pause: bool,
    /// Whether `resume` would take effect
    #[serde(rename = "canResume")]
    pub can_resume: bool,
    /// Whether `stop` would take effect
    #[serde(rename = "canStop")]
    pub can_stop: bool,
    /// Work interval bar
    #[serde(rename = "workBar")]
    pub work_bar: BarView,
    /// Rest interval bar
    #[serde(rename = "restBar")]
    pub rest_bar: BarView,
}

impl Snapshot {
    /// Returns true if no countdown is active.
    pub fn is_idle(&self) -> bool {
        self.timer_status.is_none()
    }

    /// Returns true if the active countdown is paused.
    pub fn is_paused(&self) -> bool {
        self.timer_status == Some(TimerStatus::Paused)
    }
}

// ============================================================================
// Tests
// ============================================================================
