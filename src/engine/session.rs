//! Session controller: phase cycling, warning detection, and the read model.
//!
//! The controller owns at most one [`Timer`] at a time. The shell drives it
//! with `tick()` at whatever cadence it likes and forwards user commands;
//! everything happens synchronously inside those calls.
//!
//! Phase cycle:
//!
//! ```text
//! idle ──start──▶ Work ──expiry──▶ Rest ──expiry──▶ Work ──▶ ...
//!                   │                 │
//!                   └─────stop────────┴──▶ idle (phase kept)
//! ```

use tracing::{debug, info};

use super::clock::Clock;
use super::config::SessionConfig;
use super::error::EngineError;
use super::timer::Timer;
use crate::types::{BarView, Phase, SessionEvent, Snapshot, TimerStatus};

/// Owns the active countdown and decides when a phase ends.
#[derive(Debug)]
pub struct SessionController<C: Clock> {
    clock: C,
    config: SessionConfig,
    active: Option<Timer>,
    phase: Phase,
    warning_acknowledged: bool,
    outbox: Vec<SessionEvent>,
}

impl<C: Clock> SessionController<C> {
    /// Creates an idle controller in the work phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: SessionConfig, clock: C) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            clock,
            config,
            active: None,
            phase: Phase::Work,
            warning_acknowledged: false,
            outbox: Vec::new(),
        })
    }

    /// Advances the session to the current clock reading.
    ///
    /// Queues `PlayWarningSound` the first time the live countdown enters its
    /// warning window, and on expiry rolls straight into the next phase and
    /// queues `PlayPhaseEndSound`. The returned snapshot reflects the state
    /// after any rollover.
    pub fn tick(&mut self) -> Snapshot {
        let now = self.clock.now();

        self.raise_warning_at(now);
        if self.active.as_ref().is_some_and(|t| t.remaining(now) <= 0.0) {
            self.roll_over(now);
            // A wide enough window puts the fresh phase straight into it.
            self.raise_warning_at(now);
        }

        self.snapshot_at(now)
    }

    /// Starts a countdown for the current phase.
    ///
    /// Returns false if a countdown is already active.
    pub fn start(&mut self) -> bool {
        if self.active.is_some() {
            debug!("Ignoring start: timer already active");
            return false;
        }

        let now = self.clock.now();
        self.begin_phase(now);
        debug!(phase = %self.phase, "Timer started");
        self.outbox.push(SessionEvent::PlayStartSound);
        true
    }

    /// Pauses the active countdown.
    ///
    /// Returns false if there is nothing running to pause.
    pub fn pause(&mut self) -> bool {
        let now = self.clock.now();
        match self.active.as_mut() {
            Some(timer) => timer.pause(now),
            None => {
                debug!("Ignoring pause: no active timer");
                false
            }
        }
    }

    /// Resumes the paused countdown.
    ///
    /// Returns false if there is nothing paused to resume.
    pub fn resume(&mut self) -> bool {
        let now = self.clock.now();
        match self.active.as_mut() {
            Some(timer) => timer.resume(now),
            None => {
                debug!("Ignoring resume: no active timer");
                false
            }
        }
    }

    /// Stops and discards the active countdown. The phase is kept.
    ///
    /// Returns false if there was no active countdown.
    pub fn stop(&mut self) -> bool {
        match self.active.take() {
            Some(mut timer) => {
                timer.stop();
                debug!(phase = %self.phase, "Timer stopped");
                true
            }
            None => {
                debug!("Ignoring stop: no active timer");
                false
            }
        }
    }

    /// Returns the read model at the current clock reading without
    /// raising any events.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_at(self.clock.now())
    }

    /// Hands over the events raised since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn active_timer(&self) -> Option<&Timer> {
        self.active.as_ref()
    }

    /// Whether the warning for the current phase has already fired.
    pub fn warning_acknowledged(&self) -> bool {
        self.warning_acknowledged
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn in_warning_window(&self, timer: &Timer, remaining: f64) -> bool {
        remaining <= timer.duration() * self.config.warning_ratio
    }

    /// Queues the warning once the live countdown enters its window.
    fn raise_warning_at(&mut self, now: f64) {
        if self.warning_acknowledged {
            return;
        }
        let Some(timer) = &self.active else { return };
        let remaining = timer.remaining(now);
        if self.in_warning_window(timer, remaining) {
            self.warning_acknowledged = true;
            debug!(phase = %self.phase, remaining, "Entered warning window");
            self.outbox.push(SessionEvent::PlayWarningSound);
        }
    }

    /// Installs a fresh countdown for the current phase at `now`.
    fn begin_phase(&mut self, now: f64) {
        let duration = self.config.duration_for(self.phase);
        self.active = Some(Timer::from_validated(duration, now));
        self.warning_acknowledged = false;
    }

    fn roll_over(&mut self, now: f64) {
        if let Some(mut finished) = self.active.take() {
            finished.stop();
        }
        let ended = self.phase;
        self.phase = ended.next();
        self.begin_phase(now);

        info!(ended = %ended, next = %self.phase, "Phase ended");
        self.outbox.push(SessionEvent::PlayPhaseEndSound);
    }

    fn snapshot_at(&self, now: f64) -> Snapshot {
        let (remaining, elapsed, progress, warn) = match &self.active {
            Some(timer) => {
                let remaining = timer.remaining(now);
                let elapsed = timer.elapsed(now);
                let progress = (elapsed / timer.duration()).clamp(0.0, 1.0);
                let warn = self.in_warning_window(timer, remaining);
                (remaining, elapsed, progress, warn)
            }
            None => (self.config.duration_for(self.phase), 0.0, 0.0, false),
        };

        let live = BarView::live(progress, remaining, warn);
        let (work_bar, rest_bar) = match self.phase {
            Phase::Work => (live, BarView::pristine(0.0, self.config.rest_seconds)),
            Phase::Rest => (BarView::pristine(1.0, self.config.work_seconds), live),
        };

        let status = self.active.as_ref().map(Timer::status);

        Snapshot {
            remaining,
            elapsed,
            progress,
            phase: self.phase,
            warn,
            running: status == Some(TimerStatus::Running),
            timer_status: status,
            can_start: status.is_none(),
            can_pause: status == Some(TimerStatus::Running),
            can_resume: status == Some(TimerStatus::Paused),
            can_stop: status.is_some(),
            work_bar,
            rest_bar,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
