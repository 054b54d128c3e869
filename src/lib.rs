//! Pomobar Library
//!
//! A work/rest interval timer that alternates between two phases and
//! shows their progress as two bars. It includes:
//! - An engine with a pausable countdown timer and a session controller
//!   that rolls phases over automatically
//! - A pluggable clock so the engine can be driven deterministically
//! - Sound cues for countdown start, the warning window and phase end
//! - A terminal shell with clap-based argument parsing
//!
//! # Example
//!
//! ```
//! use pomobar::engine::{ManualClock, SessionConfig, SessionController};
//! use pomobar::types::{Phase, SessionEvent};
//!
//! let clock = ManualClock::new(0.0);
//! let config = SessionConfig::default()
//!     .with_work_seconds(10.0)
//!     .with_rest_seconds(5.0);
//! let mut session = SessionController::new(config, clock.clone()).unwrap();
//!
//! session.start();
//! clock.set(10.0);
//! let snapshot = session.tick();
//!
//! assert_eq!(snapshot.phase, Phase::Rest);
//! assert!(session
//!     .drain_events()
//!     .contains(&SessionEvent::PlayPhaseEndSound));
//! ```

pub mod cli;
pub mod engine;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use engine::{
    Clock, EngineError, ManualClock, MonotonicClock, SessionConfig, SessionController, Timer,
};
pub use types::{BarView, Phase, SessionEvent, Snapshot, TimerStatus};

// Re-export sound types
pub use sound::{
    play_events, CueSounds, MockSoundPlayer, RodioSoundPlayer, SoundCue, SoundError, SoundPlayer,
    SoundSource,
};
