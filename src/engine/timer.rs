//! Single-phase countdown with pause/resume accounting.
//!
//! Elapsed time excludes every paused interval. On resume the reference
//! start point slides forward by exactly the time spent paused, so
//! `elapsed = now - start_time` holds again while running.
//!
//! State transitions:
//!
//! ```text
//! Running ──pause──▶ Paused ──resume──▶ Running
//!    │                  │
//!    └──────stop────────┴──────▶ Stopped (terminal)
//! ```

use tracing::debug;

use super::config::validate_duration;
use super::error::EngineError;
use crate::types::TimerStatus;

/// One countdown, fed explicit clock readings.
#[derive(Debug, Clone, PartialEq)]
pub struct Timer {
    duration: f64,
    start_time: f64,
    pause_time: f64,
    resume_time: f64,
    status: TimerStatus,
}

impl Timer {
    /// Creates a running countdown of `duration` seconds starting at `start_time`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDuration` if `duration` is not a positive finite number.
    pub fn new(duration: f64, start_time: f64) -> Result<Self, EngineError> {
        validate_duration(duration)?;
        Ok(Self::from_validated(duration, start_time))
    }

    /// Caller guarantees `duration` already passed validation.
    pub(crate) fn from_validated(duration: f64, start_time: f64) -> Self {
        Self {
            duration,
            start_time,
            pause_time: start_time,
            resume_time: start_time,
            status: TimerStatus::Running,
        }
    }

    /// Freezes the countdown at `now`.
    ///
    /// Returns false (and changes nothing) unless the timer is running.
    pub fn pause(&mut self, now: f64) -> bool {
        if self.status != TimerStatus::Running {
            debug!(status = self.status.as_str(), "Ignoring pause");
            return false;
        }
        self.pause_time = now;
        self.status = TimerStatus::Paused;
        true
    }

    /// Continues a paused countdown at `now`.
    ///
    /// Returns false (and changes nothing) unless the timer is paused.
    pub fn resume(&mut self, now: f64) -> bool {
        if self.status != TimerStatus::Paused {
            debug!(status = self.status.as_str(), "Ignoring resume");
            return false;
        }
        self.resume_time = now;
        self.start_time += self.resume_time - self.pause_time;
        self.status = TimerStatus::Running;
        true
    }

    /// Ends the countdown permanently.
    ///
    /// Returns false if it was already stopped.
    pub fn stop(&mut self) -> bool {
        if self.status == TimerStatus::Stopped {
            return false;
        }
        self.status = TimerStatus::Stopped;
        true
    }

    /// Running seconds accumulated as of `now`.
    pub fn elapsed(&self, now: f64) -> f64 {
        match self.status {
            TimerStatus::Stopped => 0.0,
            TimerStatus::Paused => self.pause_time - self.start_time,
            TimerStatus::Running => now - self.start_time,
        }
    }

    /// Seconds left as of `now`; negative once the countdown has run out.
    pub fn remaining(&self, now: f64) -> f64 {
        self.duration - self.elapsed(now)
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status == TimerStatus::Paused
    }

    pub fn is_stopped(&self) -> bool {
        self.status == TimerStatus::Stopped
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    // ------------------------------------------------------------------------
    // Construction Tests
    // ------------------------------------------------------------------------

    mod construction_tests {
        use super::*;

        #[test]
        fn test_new_is_running() {
            let timer = Timer::new(10.0, 3.0).unwrap();
            assert!(timer.is_running());
            assert_eq!(timer.duration(), 10.0);
            assert_eq!(timer.elapsed(3.0), 0.0);
            assert_eq!(timer.remaining(3.0), 10.0);
        }

        #[test]
        fn test_new_rejects_non_positive_duration() {
            assert_eq!(Timer::new(0.0, 0.0), Err(EngineError::InvalidDuration(0.0)));
            assert_eq!(
                Timer::new(-2.0, 0.0),
                Err(EngineError::InvalidDuration(-2.0))
            );
            assert!(Timer::new(f64::NAN, 0.0).is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Pause / Resume Tests
    // ------------------------------------------------------------------------

    mod pause_resume_tests {
        use super::*;

        #[test]
        fn test_pause_then_resume_excludes_pause_interval() {
            let mut timer = Timer::new(10.0, 0.0).unwrap();

            assert!(timer.pause(4.0));
            assert!(timer.resume(9.0));

            assert!((timer.elapsed(12.0) - 7.0).abs() < EPS);
            assert!((timer.remaining(12.0) - 3.0).abs() < EPS);
        }

        #[test]
        fn test_elapsed_frozen_while_paused() {
            let mut timer = Timer::new(10.0, 0.0).unwrap();
            timer.pause(2.5);

            assert_eq!(timer.elapsed(2.5), 2.5);
            assert_eq!(timer.elapsed(100.0), 2.5);
            assert_eq!(timer.status(), TimerStatus::Paused);
        }

        #[test]
        fn test_multiple_pauses_accumulate() {
            let mut timer = Timer::new(60.0, 0.0).unwrap();

            timer.pause(1.0);
            timer.resume(3.0);
            timer.pause(5.0);
            timer.resume(10.0);
            timer.pause(11.0);
            timer.resume(11.5);

            // 20 - 0 - (2 + 5 + 0.5)
            assert!((timer.elapsed(20.0) - 12.5).abs() < EPS);
        }

        #[test]
        fn test_pause_while_paused_is_ignored() {
            let mut timer = Timer::new(10.0, 0.0).unwrap();
            timer.pause(2.0);

            assert!(!timer.pause(5.0));
            assert_eq!(timer.elapsed(6.0), 2.0);
        }

        #[test]
        fn test_resume_while_running_is_ignored() {
            let mut timer = Timer::new(10.0, 0.0).unwrap();

            assert!(!timer.resume(4.0));
            assert_eq!(timer.elapsed(4.0), 4.0);
        }

        #[test]
        fn test_remaining_plus_elapsed_is_duration() {
            let mut timer = Timer::new(25.0, 1.0).unwrap();
            let checks = |t: &Timer, now: f64| {
                assert!((t.remaining(now) + t.elapsed(now) - 25.0).abs() < EPS);
            };

            checks(&timer, 4.0);
            timer.pause(6.0);
            checks(&timer, 8.0);
            timer.resume(9.0);
            checks(&timer, 40.0);
        }

        #[test]
        fn test_remaining_goes_negative_after_expiry() {
            let timer = Timer::new(5.0, 0.0).unwrap();
            assert!(timer.remaining(7.0) < 0.0);
        }
    }

    // ------------------------------------------------------------------------
    // Stop Tests
    // ------------------------------------------------------------------------

    mod stop_tests {
        use super::*;

        #[test]
        fn test_stop_zeroes_elapsed() {
            let mut timer = Timer::new(10.0, 0.0).unwrap();
            assert!(timer.stop());

            assert!(timer.is_stopped());
            assert_eq!(timer.elapsed(8.0), 0.0);
            assert_eq!(timer.remaining(8.0), 10.0);
        }

        #[test]
        fn test_stop_from_paused() {
            let mut timer = Timer::new(10.0, 0.0).unwrap();
            timer.pause(3.0);

            assert!(timer.stop());
            assert_eq!(timer.elapsed(3.0), 0.0);
        }

        #[test]
        fn test_stop_is_terminal() {
            let mut timer = Timer::new(10.0, 0.0).unwrap();
            timer.stop();

            assert!(!timer.stop());
            assert!(!timer.pause(1.0));
            assert!(!timer.resume(2.0));
            assert_eq!(timer.status(), TimerStatus::Stopped);
        }
    }
}
