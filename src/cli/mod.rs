//! CLI module for the interval timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `shell`: Terminal loop that drives a session
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod shell;

pub use commands::{Cli, Commands, RunArgs};
pub use display::Display;
pub use shell::{OutputMode, Shell, ShellCommand, ShellError, ShellFlow, ShellOptions};
