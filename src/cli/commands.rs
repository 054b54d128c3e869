//! Command definitions for the interval timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use super::shell::{OutputMode, ShellOptions};
use crate::engine::{
    SessionConfig, DEFAULT_REST_SECONDS, DEFAULT_WARNING_RATIO, DEFAULT_WORK_SECONDS,
};
use crate::sound::CueSounds;

// ============================================================================
// CLI Structure
// ============================================================================

/// Work/rest interval timer with a two-bar terminal display
#[derive(Parser, Debug)]
#[command(
    name = "pomobar",
    version,
    about = "作業と休憩を交互に計測するインターバルタイマー",
    long_about = "作業と休憩を自動で切り替えるシンプルなポモドーロタイマー。\n\
                  ターミナルに2本のプログレスバーを表示し、終了間際と切り替え時に音で知らせます。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the timer in this terminal
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Work interval in seconds
    #[arg(short, long, default_value_t = DEFAULT_WORK_SECONDS, value_parser = parse_seconds)]
    pub work: f64,

    /// Rest interval in seconds
    #[arg(short, long, default_value_t = DEFAULT_REST_SECONDS, value_parser = parse_seconds)]
    pub rest: f64,

    /// Remaining share of a phase that triggers the warning (0.0-1.0)
    #[arg(long, default_value_t = DEFAULT_WARNING_RATIO, value_parser = parse_ratio)]
    pub warning_ratio: f64,

    /// Milliseconds between ticks (10-1000)
    #[arg(
        long,
        default_value = "100",
        value_parser = clap::value_parser!(u64).range(10..=1000)
    )]
    pub tick_ms: u64,

    /// Start the first work interval immediately
    #[arg(short, long)]
    pub autostart: bool,

    /// Print each changed snapshot as a JSON line instead of the bar display
    #[arg(long)]
    pub json: bool,

    /// Disable cue sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Audio file played when a countdown starts
    #[arg(long, value_name = "PATH")]
    pub start_sound: Option<PathBuf>,

    /// Audio file played when the warning window begins
    #[arg(long, value_name = "PATH")]
    pub warning_sound: Option<PathBuf>,

    /// Audio file played when a phase ends
    #[arg(long, value_name = "PATH")]
    pub end_sound: Option<PathBuf>,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            work: DEFAULT_WORK_SECONDS,
            rest: DEFAULT_REST_SECONDS,
            warning_ratio: DEFAULT_WARNING_RATIO,
            tick_ms: 100,
            autostart: false,
            json: false,
            no_sound: false,
            start_sound: None,
            warning_sound: None,
            end_sound: None,
        }
    }
}

impl RunArgs {
    /// Builds the engine configuration from the arguments.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_work_seconds(self.work)
            .with_rest_seconds(self.rest)
            .with_warning_ratio(self.warning_ratio)
    }

    /// Builds the shell settings from the arguments.
    pub fn shell_options(&self) -> ShellOptions {
        ShellOptions {
            tick: Duration::from_millis(self.tick_ms),
            output: if self.json {
                OutputMode::Json
            } else {
                OutputMode::Text
            },
            autostart: self.autostart,
            sounds: CueSounds {
                start: self.start_sound.clone(),
                warning: self.warning_sound.clone(),
                phase_end: self.end_sound.clone(),
            },
        }
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Parses a positive, finite number of seconds.
fn parse_seconds(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("数値を指定してください: {}", s))?;
    if !value.is_finite() || value <= 0.0 {
        return Err("0より大きい秒数を指定してください".to_string());
    }
    Ok(value)
}

/// Parses a ratio in `[0, 1]`.
fn parse_ratio(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("数値を指定してください: {}", s))?;
    if !(0.0..=1.0).contains(&value) {
        return Err("0.0-1.0の範囲で指定してください".to_string());
    }
    Ok(value)
}

// ============================================================================
// Tests
// ============================================================================
