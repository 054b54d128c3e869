//! Sound player implementation using rodio.
//!
//! Cues backed by a file are decoded from disk; everything else, and any
//! file that cannot be opened or decoded, is synthesized from sine notes.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{SoundSource, Tone};

/// Output gain applied to synthesized notes.
const TONE_AMPLITUDE: f32 = 0.2;

/// A sound player that uses rodio for audio playback.
///
/// Playback is non-blocking; sinks are detached and keep playing after
/// `play` returns. The output stream must outlive them, so keep the player
/// around for the lifetime of the shell.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays the audio for a cue.
    ///
    /// # Errors
    ///
    /// Returns an error if the output sink cannot be created. File problems
    /// are not errors: they fall back to the cue's tone.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        match source {
            SoundSource::File { cue, path } => {
                debug!("Playing {} from {}", cue.name(), path.display());
                match self.play_file(path) {
                    Err(e) if e.should_fallback_to_tone() => {
                        warn!(
                            "Failed to play '{}': {}, falling back to tone",
                            cue.name(),
                            e
                        );
                        self.play_tone(cue.tone())
                    }
                    other => other,
                }
            }
            SoundSource::Tone { cue } => {
                debug!("Playing {} tone", cue.name());
                self.play_tone(cue.tone())
            }
        }
    }

    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let sink = self.new_sink()?;
        sink.append(decoder);
        sink.detach();
        Ok(())
    }

    fn play_tone(&self, tone: Tone) -> Result<(), SoundError> {
        let sink = self.new_sink()?;
        let gap = Duration::from_millis(tone.gap_ms);

        for (index, note) in tone.notes.iter().enumerate() {
            let delay = if index == 0 { Duration::ZERO } else { gap };
            let wave = SineWave::new(note.frequency_hz)
                .take_duration(Duration::from_millis(note.duration_ms))
                .amplify(TONE_AMPLITUDE)
                .delay(delay);
            sink.append(wave);
        }

        sink.detach();
        debug!(total_ms = tone.total_ms(), "Tone playback started (detached)");
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Opens an audio player, returning None if audio is unavailable.
#[must_use]
pub fn try_create_player() -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, sound disabled: {} ({})", e, e.suggestion());
            None
        }
    }
}
