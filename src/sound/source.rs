//! Cue definitions and where their audio comes from.
//!
//! Each session event maps to a cue. A cue plays a user-supplied file when
//! one is configured and otherwise a short synthesized tone pattern.

use std::path::PathBuf;

use crate::types::SessionEvent;

// ============================================================================
// SoundCue
// ============================================================================

/// The three audible cues of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Countdown started
    Start,
    /// Countdown entered its warning window
    Warning,
    /// Phase ran out
    PhaseEnd,
}

impl SoundCue {
    /// Short name used in logs and as the default asset stem.
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Start => "ticktock",
            SoundCue::Warning => "ding",
            SoundCue::PhaseEnd => "timeisup",
        }
    }

    /// Tone pattern used when no file is configured for this cue.
    pub fn tone(&self) -> Tone {
        match self {
            SoundCue::Start => Tone {
                notes: START_NOTES,
                gap_ms: 120,
            },
            SoundCue::Warning => Tone {
                notes: WARNING_NOTES,
                gap_ms: 0,
            },
            SoundCue::PhaseEnd => Tone {
                notes: PHASE_END_NOTES,
                gap_ms: 150,
            },
        }
    }
}

impl From<SessionEvent> for SoundCue {
    fn from(event: SessionEvent) -> Self {
        match event {
            SessionEvent::PlayStartSound => SoundCue::Start,
            SessionEvent::PlayWarningSound => SoundCue::Warning,
            SessionEvent::PlayPhaseEndSound => SoundCue::PhaseEnd,
        }
    }
}

// ============================================================================
// Tone
// ============================================================================

/// A single sine note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub frequency_hz: f32,
    pub duration_ms: u64,
}

impl Note {
    pub const fn new(frequency_hz: f32, duration_ms: u64) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }
}

/// A sequence of notes separated by fixed silences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub notes: &'static [Note],
    pub gap_ms: u64,
}

impl Tone {
    /// Total playing time including the gaps between notes.
    pub fn total_ms(&self) -> u64 {
        let notes: u64 = self.notes.iter().map(|n| n.duration_ms).sum();
        let gaps = self.gap_ms * self.notes.len().saturating_sub(1) as u64;
        notes + gaps
    }
}

const START_NOTES: &[Note] = &[Note::new(880.0, 90), Note::new(660.0, 90)];

const WARNING_NOTES: &[Note] = &[Note::new(1320.0, 250)];

const PHASE_END_NOTES: &[Note] = &[
    Note::new(440.0, 300),
    Note::new(440.0, 300),
    Note::new(440.0, 600),
];

// ============================================================================
// SoundSource
// ============================================================================

/// Represents the audio to be played for a cue.
#[derive(Debug, Clone, PartialEq)]
pub enum SoundSource {
    /// An audio file on disk.
    File {
        /// The cue this file stands in for.
        cue: SoundCue,
        /// The full path to the sound file.
        path: PathBuf,
    },
    /// The built-in tone pattern of a cue.
    Tone {
        /// The cue whose pattern is played.
        cue: SoundCue,
    },
}

impl SoundSource {
    /// Returns the cue this source realizes.
    pub fn cue(&self) -> SoundCue {
        match self {
            Self::File { cue, .. } | Self::Tone { cue } => *cue,
        }
    }

    /// Returns the file path if this is a file source.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Tone { .. } => None,
        }
    }
}

// ============================================================================
// CueSounds
// ============================================================================

/// Optional per-cue file overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueSounds {
    pub start: Option<PathBuf>,
    pub warning: Option<PathBuf>,
    pub phase_end: Option<PathBuf>,
}

impl CueSounds {
    /// Resolves the source to play for a cue.
    pub fn source_for(&self, cue: SoundCue) -> SoundSource {
        let path = match cue {
            SoundCue::Start => &self.start,
            SoundCue::Warning => &self.warning,
            SoundCue::PhaseEnd => &self.phase_end,
        };
        match path {
            Some(path) => SoundSource::File {
                cue,
                path: path.clone(),
            },
            None => SoundSource::Tone { cue },
        }
    }
}
