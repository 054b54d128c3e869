//! Pomobar - a work/rest interval timer for the terminal
//!
//! Alternates between a work phase and a rest phase:
//! - two progress bars show where each phase stands
//! - a cue sounds when a countdown starts, when time is nearly up,
//!   and when a phase ends
//! - the next phase starts on its own

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use pomobar::cli::{shell, Cli, Commands, Display, RunArgs, Shell};
use pomobar::engine::{MonotonicClock, SessionController};
use pomobar::sound::{try_create_player, SoundPlayer};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never interleave with frames on stdout.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Run(args)) => run_timer(&args).await?,
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs the timer in the foreground until quit.
async fn run_timer(args: &RunArgs) -> Result<()> {
    let session = SessionController::new(args.session_config(), MonotonicClock::new())
        .context("タイマー設定が不正です")?;
    tracing::info!(config = ?session.config(), "Session configured");

    let player = if args.no_sound {
        None
    } else {
        try_create_player().map(|p| Box::new(p) as Box<dyn SoundPlayer>)
    };

    shell::run(Shell::new(session, player, args.shell_options())).await
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["pomobar"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["pomobar", "run"]);
        assert!(matches!(cli.command, Some(Commands::Run(_))));
    }

    #[test]
    fn test_cli_parse_run_with_options() {
        let cli = Cli::parse_from(["pomobar", "run", "--work", "30", "--no-sound"]);
        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.work, 30.0);
                assert!(args.no_sound);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["pomobar", "--verbose", "run"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_command_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
