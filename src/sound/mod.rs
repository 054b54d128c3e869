//! Sound playback for session cues.
//!
//! The engine raises [`SessionEvent`]s; this module turns them into audio.
//!
//! # Architecture
//!
//! ```text
//! SessionEvent ──▶ SoundCue ──▶ CueSounds ──▶ SoundSource ──▶ SoundPlayer
//!                                              │
//!                                              ├─ File  (user override)
//!                                              └─ Tone  (synthesized)
//! ```
//!
//! Missing audio hardware never stops the timer: the shell simply runs
//! without a player.

mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{CueSounds, Note, SoundCue, SoundSource, Tone};

use crate::types::SessionEvent;

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a sound without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }
}

impl<P: SoundPlayer + ?Sized> SoundPlayer for Arc<P> {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        (**self).play(source)
    }
}

/// Plays the cue for every event, logging failures instead of returning them.
///
/// Returns the number of cues that started playing.
pub fn play_events<P: SoundPlayer + ?Sized>(
    player: &P,
    sounds: &CueSounds,
    events: &[SessionEvent],
) -> usize {
    let mut played = 0;
    for &event in events {
        let source = sounds.source_for(SoundCue::from(event));
        debug!(cue = source.cue().name(), path = ?source.path(), "Playing cue");
        match player.play(&source) {
            Ok(()) => played += 1,
            Err(e) => warn!("Failed to play {}: {}", source.cue().name(), e),
        }
    }
    played
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.calls().len()
    }

    /// Cues played so far, in order.
    #[must_use]
    pub fn played_cues(&self) -> Vec<SoundCue> {
        self.calls().iter().map(SoundSource::cue).collect()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.calls().to_vec()
    }

    pub fn clear_calls(&self) {
        self.calls().clear();
    }

    fn calls(&self) -> std::sync::MutexGuard<'_, Vec<SoundSource>> {
        self.play_calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.calls().push(source.clone());
        Ok(())
    }
}
