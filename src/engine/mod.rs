//! Timer engine for the interval timer.
//!
//! This module is the whole of the timing logic and performs no I/O:
//! - `clock`: monotonic time sources
//! - `timer`: single countdown with pause/resume accounting
//! - `session`: phase cycling, warning detection, read model
//! - `config`: durations and warning threshold

pub mod clock;
pub mod config;
pub mod error;
pub mod session;
pub mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{
    SessionConfig, DEFAULT_REST_SECONDS, DEFAULT_WARNING_RATIO, DEFAULT_WORK_SECONDS,
};
pub use error::EngineError;
pub use session::SessionController;
pub use timer::Timer;
