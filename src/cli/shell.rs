//! Terminal front end that drives the session.
//!
//! The shell owns a [`SessionController`] and:
//! - ticks it on a tokio interval
//! - forwards commands typed on stdin
//! - renders a frame whenever the visible text changes
//! - plays the cue for each event the session raises
//!
//! Only the main loop touches the controller; stdin is read on a detached
//! thread and forwarded over a channel, so a pending read never holds up
//! shutdown.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use super::display::Display;
use crate::engine::{Clock, SessionController};
use crate::sound::{play_events, CueSounds, SoundPlayer};
use crate::types::Snapshot;

// ============================================================================
// ShellCommand
// ============================================================================

/// Commands accepted on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Start,
    Pause,
    Resume,
    Stop,
    Quit,
}

impl ShellCommand {
    /// Returns the canonical command word.
    pub fn as_command(&self) -> &'static str {
        match self {
            ShellCommand::Start => "start",
            ShellCommand::Pause => "pause",
            ShellCommand::Resume => "resume",
            ShellCommand::Stop => "stop",
            ShellCommand::Quit => "quit",
        }
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_command())
    }
}

impl FromStr for ShellCommand {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "start" => Ok(ShellCommand::Start),
            "p" | "pause" => Ok(ShellCommand::Pause),
            "r" | "resume" => Ok(ShellCommand::Resume),
            "x" | "stop" => Ok(ShellCommand::Stop),
            "q" | "quit" | "exit" => Ok(ShellCommand::Quit),
            _ => Err(ShellError::UnknownCommand(s.trim().to_string())),
        }
    }
}

/// Errors produced while reading commands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// Input did not match any command.
    #[error("不明なコマンドです: '{0}' (s=開始, p=一時停止, r=再開, x=停止, q=終了)")]
    UnknownCommand(String),
}

/// Whether the loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlow {
    Continue,
    Quit,
}

// ============================================================================
// ShellOptions
// ============================================================================

/// How frames are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Single status line redrawn in place
    #[default]
    Text,
    /// One JSON snapshot per line
    Json,
}

/// Shell-only settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellOptions {
    /// Period between ticks
    pub tick: Duration,
    /// Frame format
    pub output: OutputMode,
    /// Start the first countdown without waiting for a command
    pub autostart: bool,
    /// Per-cue sound file overrides
    pub sounds: CueSounds,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
            output: OutputMode::Text,
            autostart: false,
            sounds: CueSounds::default(),
        }
    }
}

// ============================================================================
// Shell
// ============================================================================

/// Binds a session to a terminal and an optional sound player.
pub struct Shell<C: Clock> {
    session: SessionController<C>,
    player: Option<Box<dyn SoundPlayer>>,
    options: ShellOptions,
    last_line: Option<String>,
}

impl<C: Clock> Shell<C> {
    /// Creates a shell. Pass `None` as the player to run silently.
    pub fn new(
        session: SessionController<C>,
        player: Option<Box<dyn SoundPlayer>>,
        options: ShellOptions,
    ) -> Self {
        Self {
            session,
            player,
            options,
            last_line: None,
        }
    }

    /// Applies one command to the session and plays any resulting cue.
    pub fn apply(&mut self, command: ShellCommand) -> ShellFlow {
        let applied = match command {
            ShellCommand::Start => self.session.start(),
            ShellCommand::Pause => self.session.pause(),
            ShellCommand::Resume => self.session.resume(),
            ShellCommand::Stop => self.session.stop(),
            ShellCommand::Quit => return ShellFlow::Quit,
        };

        if applied {
            info!(command = %command, phase = %self.session.phase(), "Command applied");
        } else {
            debug!(command = %command, "Command ignored in current state");
        }
        self.flush_events();
        ShellFlow::Continue
    }

    /// Ticks the session and returns a frame to print if the display changed.
    pub fn on_tick(&mut self) -> Option<String> {
        let snapshot = self.session.tick();
        self.flush_events();
        self.frame_if_changed(&snapshot)
    }

    /// Renders the current state regardless of whether it changed.
    pub fn current_frame(&mut self) -> String {
        let snapshot = self.session.snapshot();
        let line = Display::render_line(&snapshot, self.session.config().work_share());
        self.last_line = Some(line);
        self.format_frame(&snapshot)
    }

    pub fn session(&self) -> &SessionController<C> {
        &self.session
    }

    pub fn options(&self) -> &ShellOptions {
        &self.options
    }

    fn flush_events(&mut self) {
        let events = self.session.drain_events();
        if events.is_empty() {
            return;
        }
        debug!(?events, "Session events");
        if let Some(player) = self.player.as_deref() {
            play_events(player, &self.options.sounds, &events);
        }
    }

    fn frame_if_changed(&mut self, snapshot: &Snapshot) -> Option<String> {
        let line = Display::render_line(snapshot, self.session.config().work_share());
        if self.last_line.as_deref() == Some(line.as_str()) {
            return None;
        }
        self.last_line = Some(line);
        Some(self.format_frame(snapshot))
    }

    fn format_frame(&self, snapshot: &Snapshot) -> String {
        match self.options.output {
            OutputMode::Text => self.last_line.clone().unwrap_or_default(),
            OutputMode::Json => Display::render_json(snapshot),
        }
    }
}

// ============================================================================
// Main Loop
// ============================================================================

/// Runs the shell until `quit` or Ctrl-C.
///
/// End of input on stdin stops command reading but keeps the timer going,
/// so the shell can be driven non-interactively with `--autostart`.
pub async fn run<C: Clock>(mut shell: Shell<C>) -> Result<()> {
    let output = shell.options().output;
    let mut ticker = interval(shell.options().tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let (tx, mut rx) = mpsc::unbounded_channel();
    thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || read_commands(tx))
        .context("Failed to spawn stdin reader")?;
    let mut stdin_open = true;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    if output == OutputMode::Text {
        Display::show_controls();
    }
    if shell.options().autostart {
        shell.apply(ShellCommand::Start);
    }
    Display::show_frame(&shell.current_frame(), output);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(frame) = shell.on_tick() {
                    Display::show_frame(&frame, output);
                }
            }
            received = rx.recv(), if stdin_open => match received {
                Some(Ok(command)) => {
                    if shell.apply(command) == ShellFlow::Quit {
                        break;
                    }
                    Display::show_frame(&shell.current_frame(), output);
                }
                Some(Err(e)) => Display::show_error(&e.to_string()),
                None => {
                    debug!("stdin closed, no further commands");
                    stdin_open = false;
                }
            },
            result = &mut ctrl_c => {
                result.context("Failed to listen for Ctrl-C")?;
                break;
            }
        }
    }

    Display::finish(output);
    Ok(())
}

/// Forwards parsed stdin lines until end of input or the receiver is gone.
fn read_commands(tx: mpsc::UnboundedSender<Result<ShellCommand, ShellError>>) {
    for line in std::io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        if tx.send(line.parse()).is_err() {
            break;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::engine::{ManualClock, SessionConfig};
    use crate::sound::{MockSoundPlayer, SoundCue};
    use crate::types::Phase;

    fn create_shell(
        output: OutputMode,
    ) -> (Shell<ManualClock>, ManualClock, Arc<MockSoundPlayer>) {
        let clock = ManualClock::new(0.0);
        let config = SessionConfig::default()
            .with_work_seconds(10.0)
            .with_rest_seconds(5.0);
        let session = SessionController::new(config, clock.clone()).unwrap();
        let player = Arc::new(MockSoundPlayer::new());
        let options = ShellOptions {
            output,
            ..ShellOptions::default()
        };
        let shell = Shell::new(session, Some(Box::new(player.clone())), options);
        (shell, clock, player)
    }

    // ------------------------------------------------------------------------
    // ShellCommand Tests
    // ------------------------------------------------------------------------

    mod shell_command_tests {
        use super::*;

        #[test]
        fn test_parse_short_and_long_forms() {
            assert_eq!("s".parse(), Ok(ShellCommand::Start));
            assert_eq!("start".parse(), Ok(ShellCommand::Start));
            assert_eq!("p".parse(), Ok(ShellCommand::Pause));
            assert_eq!("resume".parse(), Ok(ShellCommand::Resume));
            assert_eq!("x".parse(), Ok(ShellCommand::Stop));
            assert_eq!("q".parse(), Ok(ShellCommand::Quit));
        }

        #[test]
        fn test_parse_ignores_case_and_whitespace() {
            assert_eq!("  PAUSE \n".parse(), Ok(ShellCommand::Pause));
        }

        #[test]
        fn test_parse_unknown() {
            let result: Result<ShellCommand, _> = " jump ".parse();
            assert_eq!(result, Err(ShellError::UnknownCommand("jump".to_string())));
            assert!(result.unwrap_err().to_string().contains("jump"));
        }

        #[test]
        fn test_display_round_trips_through_parse() {
            for command in [
                ShellCommand::Start,
                ShellCommand::Pause,
                ShellCommand::Resume,
                ShellCommand::Stop,
                ShellCommand::Quit,
            ] {
                assert_eq!(command.to_string().parse(), Ok(command));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Shell Tests
    // ------------------------------------------------------------------------

    mod shell_tests {
        use super::*;

        #[test]
        fn test_start_plays_start_cue() {
            let (mut shell, _clock, player) = create_shell(OutputMode::Text);

            assert_eq!(shell.apply(ShellCommand::Start), ShellFlow::Continue);

            assert_eq!(player.played_cues(), vec![SoundCue::Start]);
            assert!(shell.session().active_timer().is_some());
        }

        #[test]
        fn test_quit_leaves_session_untouched() {
            let (mut shell, _clock, player) = create_shell(OutputMode::Text);

            assert_eq!(shell.apply(ShellCommand::Quit), ShellFlow::Quit);
            assert!(shell.session().active_timer().is_none());
            assert_eq!(player.play_count(), 0);
        }

        #[test]
        fn test_ignored_command_plays_nothing() {
            let (mut shell, _clock, player) = create_shell(OutputMode::Text);

            shell.apply(ShellCommand::Resume);

            assert_eq!(player.play_count(), 0);
        }

        #[test]
        fn test_tick_plays_warning_and_phase_end() {
            let (mut shell, clock, player) = create_shell(OutputMode::Text);
            shell.apply(ShellCommand::Start);
            player.clear_calls();

            clock.set(8.0);
            shell.on_tick();
            clock.set(10.0);
            shell.on_tick();

            assert_eq!(
                player.played_cues(),
                vec![SoundCue::Warning, SoundCue::PhaseEnd]
            );
            assert_eq!(shell.session().phase(), Phase::Rest);
        }

        #[test]
        fn test_frame_only_when_changed() {
            let (mut shell, clock, _player) = create_shell(OutputMode::Text);
            shell.apply(ShellCommand::Start);

            clock.set(0.2);
            assert!(shell.on_tick().is_some());
            clock.set(0.3);
            assert!(shell.on_tick().is_none());
            clock.set(1.5);
            assert!(shell.on_tick().is_some());
        }

        #[test]
        fn test_current_frame_resets_change_tracking() {
            let (mut shell, _clock, _player) = create_shell(OutputMode::Text);

            let frame = shell.current_frame();
            assert!(!frame.is_empty());
            assert!(shell.on_tick().is_none());
        }

        #[test]
        fn test_json_frames() {
            let (mut shell, _clock, _player) = create_shell(OutputMode::Json);
            shell.apply(ShellCommand::Start);

            let frame = shell.on_tick().unwrap();
            let value: serde_json::Value = serde_json::from_str(&frame).unwrap();

            assert_eq!(value["phase"], "work");
            assert_eq!(value["canPause"], true);
        }

        #[test]
        fn test_runs_without_player() {
            let clock = ManualClock::new(0.0);
            let session = SessionController::new(SessionConfig::default(), clock.clone()).unwrap();
            let mut shell = Shell::new(session, None, ShellOptions::default());

            shell.apply(ShellCommand::Start);
            clock.set(30.0);
            shell.on_tick();

            assert_eq!(shell.session().phase(), Phase::Rest);
        }
    }
}
