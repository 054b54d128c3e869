//! Display utilities for the interval timer CLI.
//!
//! This module provides formatted output for:
//! - The two-bar status line
//! - JSON snapshots
//! - Error messages

use std::io::{self, Write};

use tracing::warn;

use super::shell::OutputMode;
use crate::types::{BarView, Phase, Snapshot};

/// Total characters shared by the two bars.
const BAR_WIDTH: usize = 40;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the available keyboard commands.
    pub fn show_controls() {
        println!("s=開始  p=一時停止  r=再開  x=停止  q=終了  (入力後Enter)");
    }

    /// Writes one frame.
    ///
    /// Text frames overwrite the current line; JSON frames get a line each.
    pub fn show_frame(frame: &str, output: OutputMode) {
        let mut stdout = io::stdout().lock();
        let result = match output {
            OutputMode::Text => write!(stdout, "\r{}\x1b[K", frame),
            OutputMode::Json => writeln!(stdout, "{}", frame),
        };
        if let Err(e) = result.and_then(|()| stdout.flush()) {
            warn!("Failed to write frame: {}", e);
        }
    }

    /// Leaves the terminal on a fresh line.
    pub fn finish(output: OutputMode) {
        if output == OutputMode::Text {
            println!();
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Renders the status line: phase, state, then the work and rest bars.
    ///
    /// Bars split the available width in proportion to `work_share`.
    pub fn render_line(snapshot: &Snapshot, work_share: f64) -> String {
        let work_width =
            ((BAR_WIDTH as f64 * work_share).round() as usize).clamp(1, BAR_WIDTH - 1);
        let rest_width = BAR_WIDTH - work_width;

        format!(
            "{} {} {} {}",
            Self::phase_label(snapshot.phase),
            Self::state_label(snapshot),
            Self::render_bar(&snapshot.work_bar, work_width),
            Self::render_bar(&snapshot.rest_bar, rest_width),
        )
    }

    /// Renders a snapshot as a single JSON line.
    pub fn render_json(snapshot: &Snapshot) -> String {
        serde_json::to_string(snapshot).unwrap_or_else(|e| {
            warn!("Failed to serialize snapshot: {}", e);
            String::new()
        })
    }

    /// Renders one bar as `[###---] m:ss`, with a trailing `!` in the
    /// warning window.
    fn render_bar(bar: &BarView, width: usize) -> String {
        let filled =
            ((bar.progress.clamp(0.0, 1.0) * width as f64).floor() as usize).min(width);
        format!(
            "[{}{}] {}{}",
            "#".repeat(filled),
            "-".repeat(width - filled),
            Self::format_time(bar.remaining),
            if bar.warn { "!" } else { "" }
        )
    }

    fn phase_label(phase: Phase) -> &'static str {
        match phase {
            Phase::Work => "作業",
            Phase::Rest => "休憩",
        }
    }

    fn state_label(snapshot: &Snapshot) -> &'static str {
        if snapshot.is_idle() {
            "待機"
        } else if snapshot.is_paused() {
            "停止中"
        } else {
            "計測中"
        }
    }

    /// Formats seconds as `m:ss`, truncating fractions and clamping
    /// negatives to zero.
    fn format_time(seconds: f64) -> String {
        let total = seconds.max(0.0) as u64;
        format!("{}:{:02}", total / 60, total % 60)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimerStatus;

    // ------------------------------------------------------------------------
    // Format Time Tests
    // ------------------------------------------------------------------------

    mod format_time_tests {
        use super::*;

        #[test]
        fn test_format_time_zero() {
            assert_eq!(Display::format_time(0.0), "0:00");
        }

        #[test]
        fn test_format_time_truncates() {
            assert_eq!(Display::format_time(9.99), "0:09");
            assert_eq!(Display::format_time(59.5), "0:59");
        }

        #[test]
        fn test_format_time_minutes() {
            assert_eq!(Display::format_time(90.0), "1:30");
            assert_eq!(Display::format_time(24.0 * 60.0), "24:00");
            assert_eq!(Display::format_time(120.0 * 60.0 + 59.0), "120:59");
        }

        #[test]
        fn test_format_time_negative_clamped() {
            assert_eq!(Display::format_time(-3.2), "0:00");
        }
    }

    // ------------------------------------------------------------------------
    // Bar Tests
    // ------------------------------------------------------------------------

    mod bar_tests {
        use super::*;

        #[test]
        fn test_render_empty_bar() {
            let bar = BarView::pristine(0.0, 6.0);
            assert_eq!(Display::render_bar(&bar, 4), "[----] 0:06");
        }

        #[test]
        fn test_render_full_bar() {
            let bar = BarView::pristine(1.0, 24.0);
            assert_eq!(Display::render_bar(&bar, 4), "[####] 0:24");
        }

        #[test]
        fn test_render_partial_bar_floors() {
            let bar = BarView::live(0.6, 4.0, false);
            assert_eq!(Display::render_bar(&bar, 4), "[##--] 0:04");
        }

        #[test]
        fn test_render_warning_marker() {
            let bar = BarView::live(0.9, 1.0, true);
            assert!(Display::render_bar(&bar, 10).ends_with("0:01!"));
        }
    }

    // ------------------------------------------------------------------------
    // Line Tests
    // ------------------------------------------------------------------------

    mod line_tests {
        use super::*;

        fn working_snapshot(status: Option<TimerStatus>) -> Snapshot {
            Snapshot {
                remaining: 14.0,
                elapsed: 10.0,
                progress: 10.0 / 24.0,
                phase: Phase::Work,
                warn: false,
                running: status == Some(TimerStatus::Running),
                timer_status: status,
                can_start: status.is_none(),
                can_pause: status == Some(TimerStatus::Running),
                can_resume: status == Some(TimerStatus::Paused),
                can_stop: status.is_some(),
                work_bar: BarView::live(10.0 / 24.0, 14.0, false),
                rest_bar: BarView::pristine(0.0, 6.0),
            }
        }

        #[test]
        fn test_render_line_labels() {
            let line = Display::render_line(&working_snapshot(Some(TimerStatus::Running)), 0.8);
            assert!(line.starts_with("作業 計測中 "));
            assert!(line.contains("0:14"));
            assert!(line.ends_with("0:06"));
        }

        #[test]
        fn test_render_line_states() {
            let paused = Display::render_line(&working_snapshot(Some(TimerStatus::Paused)), 0.8);
            assert!(paused.contains("停止中"));

            let idle = Display::render_line(&working_snapshot(None), 0.8);
            assert!(idle.contains("待機"));
        }

        #[test]
        fn test_render_line_bar_widths_follow_share() {
            let line = Display::render_line(&working_snapshot(None), 0.8);
            let bars: Vec<&str> = line
                .split(|c| c == '[' || c == ']')
                .skip(1)
                .step_by(2)
                .collect();

            assert_eq!(bars.len(), 2);
            assert_eq!(bars[0].len(), 32);
            assert_eq!(bars[1].len(), 8);
        }

        #[test]
        fn test_render_json() {
            let json = Display::render_json(&working_snapshot(Some(TimerStatus::Running)));
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["remaining"], 14.0);
            assert_eq!(value["workBar"]["live"], true);
        }
    }
}
