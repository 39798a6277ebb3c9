//! Terminal UI — spinners, stage lines, and captured command output.
//!
//! # Design goals
//!
//! - **Clean by default.** While the helper container runs the user sees only a spinner and a
//!   short label.  Raw `tar`/`cp` output is captured and hidden.
//! - **Informative on failure.** If a stage exits non-zero its captured stdout *and* stderr are
//!   printed in full so the operator can diagnose the problem without re-running manually.
//! - **Scriptable.** `--quiet` drops the spinner and the success lines entirely; failures are
//!   still reported.  `--verbose` replays the captured output even on success.
//!
//! # Typical usage
//!
//! ```text
//! let outcome = ui::run_stage("Archive", &args, rt.verbosity);
//! outcome.print(rt.verbosity);
//! if outcome.failed() { /* bail, main exits 1 */ }
//! ```

use std::{
    process::{Command, Output, Stdio},
    time::Duration,
};

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

// ─── Verbosity ────────────────────────────────────────────────────────────────

/// Output level selected by the mutually exclusive `-v`/`-q` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// clap guarantees the flags conflict, so both set is unreachable; the
    /// verbose arm wins if it ever happens.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }
}

// ─── Icons ───────────────────────────────────────────────────────────────────

/// Braille spinner frames — same style as indicatif's default.
static SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Green ✓  — printed when a stage succeeds.
fn icon_ok() -> console::StyledObject<&'static str> {
    style("✓").green().bold()
}
/// Red ✗    — printed when a stage fails.
fn icon_err() -> console::StyledObject<&'static str> {
    style("✗").red().bold()
}
/// Cyan ✓   — printed next to the final success line.
fn icon_done() -> console::StyledObject<&'static str> {
    style("✓").cyan().bold()
}

// ─── Stage result ─────────────────────────────────────────────────────────────

/// The outcome of a single helper-container stage.
///
/// Carries the stage label plus whatever the command wrote to stdout/stderr
/// so it can be replayed to the terminal when something goes wrong (or when
/// `--verbose` asks for it).
#[derive(Debug)]
pub struct StageOutcome {
    /// Human-readable stage label, e.g. `"Archive"`.
    pub label: String,
    /// Whether the stage completed without error.
    pub success: bool,
    /// Everything the command wrote to stdout.
    pub stdout: String,
    /// Everything the command wrote to stderr.
    pub stderr: String,
    /// The error message, if any.
    pub error: Option<String>,
}

impl StageOutcome {
    /// Print the one-line summary (✓/✗ + label) to stdout.
    ///
    /// On failure, also prints the captured stdout/stderr and the error
    /// message so the operator has everything they need without re-running.
    /// Quiet mode skips the success line; verbose mode replays captured
    /// stdout on success too.
    pub fn print(&self, verbosity: Verbosity) {
        if self.success {
            if verbosity.is_quiet() {
                return;
            }
            println!("  {}  {}", icon_ok(), style(&self.label).bold());
            if verbosity == Verbosity::Verbose && !self.stdout.is_empty() {
                for line in self.stdout.lines() {
                    println!("    {}", style(line).dim());
                }
            }
        } else {
            println!("  {}  {}", icon_err(), style(&self.label).bold());

            // Print the error message first (most useful thing).
            if let Some(ref msg) = self.error {
                eprintln!();
                eprintln!("  {} {}", style("Error:").red().bold(), msg);
            }

            // Replay captured output so the operator can see what the
            // helper container said.
            if !self.stdout.is_empty() {
                eprintln!();
                eprintln!("  {} stdout:", style("►").dim());
                for line in self.stdout.lines() {
                    eprintln!("    {line}");
                }
            }
            if !self.stderr.is_empty() {
                eprintln!();
                eprintln!("  {} stderr:", style("►").dim());
                for line in self.stderr.lines() {
                    eprintln!("    {line}");
                }
            }
        }
    }

    /// Returns `true` if the stage did not succeed.
    pub const fn failed(&self) -> bool {
        !self.success
    }
}

// ─── Spinner ──────────────────────────────────────────────────────────────────

/// Create and start an indeterminate spinner for `label`.
///
/// The spinner ticks at ~80 ms and is automatically cleared when
/// [`ProgressBar::finish_and_clear`] is called.
fn make_spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan}  {msg}")
            .unwrap()
            .tick_chars(SPINNER_CHARS),
    );
    pb.set_message(format!("{}", style(label).dim()));
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

// ─── Captured execution ───────────────────────────────────────────────────────

/// Run a command, capturing both stdout and stderr.
///
/// All output is buffered so the spinner can own the terminal while the
/// command runs.  Returns `(success, stdout_text, stderr_text)`.
pub fn run_captured(args: &[String]) -> Result<(bool, String, String)> {
    let (prog, rest) = args.split_first().context("cannot run an empty command")?;

    let output: Output = Command::new(prog)
        .args(rest)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .with_context(|| format!("failed to spawn: {}", args.join(" ")))?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    Ok((output.status.success(), stdout, stderr))
}

// ─── High-level stage runner ──────────────────────────────────────────────────

/// Run a helper-container stage behind a spinner, returning a
/// [`StageOutcome`].
///
/// The spinner is cleared before the outcome line is printed, so the
/// terminal always shows a clean, static summary when the stage finishes.
/// Quiet mode runs without a spinner.
pub fn run_stage(label: &str, args: &[String], verbosity: Verbosity) -> StageOutcome {
    let spinner = (!verbosity.is_quiet()).then(|| make_spinner(label));

    let result = run_captured(args);
    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    match result {
        Ok((true, stdout, stderr)) => StageOutcome {
            label: label.to_string(),
            success: true,
            stdout,
            stderr,
            error: None,
        },
        Ok((false, stdout, stderr)) => StageOutcome {
            label: label.to_string(),
            success: false,
            stdout,
            stderr,
            error: Some(format!("command exited non-zero: {}", args.join(" "))),
        },
        Err(e) => StageOutcome {
            label: label.to_string(),
            success: false,
            stdout: String::new(),
            stderr: String::new(),
            error: Some(e.to_string()),
        },
    }
}

// ─── Finish line ──────────────────────────────────────────────────────────────

/// Print the final success line for a completed operation, e.g.
/// `Finished backing up data to /backups/data.tar.gz`.
pub fn finish(message: &str, verbosity: Verbosity) {
    if verbosity.is_quiet() {
        return;
    }
    println!("  {} {}", icon_done(), style(message).cyan().bold());
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn success(label: &str) -> StageOutcome {
        StageOutcome {
            label: label.into(),
            success: true,
            stdout: String::new(),
            stderr: String::new(),
            error: None,
        }
    }

    fn failure(label: &str, err: &str, stdout: &str, stderr: &str) -> StageOutcome {
        StageOutcome {
            label: label.into(),
            success: false,
            stdout: stdout.into(),
            stderr: stderr.into(),
            error: Some(err.into()),
        }
    }

    // ── Verbosity ─────────────────────────────────────────────────────────────

    #[test]
    fn flags_map_to_levels() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Quiet);
    }

    #[test]
    fn verbose_wins_when_both_set() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Verbose);
    }

    // ── StageOutcome::failed ──────────────────────────────────────────────────

    #[test]
    fn success_outcome_is_not_failed() {
        assert!(!success("Archive").failed());
    }

    #[test]
    fn failure_outcome_is_failed() {
        assert!(failure("Archive", "oh no", "", "").failed());
    }

    // ── run_captured ─────────────────────────────────────────────────────────

    #[test]
    fn run_captured_true_succeeds() {
        let (ok, _out, _err) = run_captured(&["true".into()]).unwrap();
        assert!(ok);
    }

    #[test]
    fn run_captured_false_fails() {
        let (ok, _out, _err) = run_captured(&["false".into()]).unwrap();
        assert!(!ok);
    }

    #[test]
    fn run_captured_captures_stdout() {
        let (ok, out, _err) =
            run_captured(&["sh".into(), "-c".into(), "echo hello".into()]).unwrap();
        assert!(ok);
        assert!(out.contains("hello"));
    }

    #[test]
    fn run_captured_captures_stderr() {
        let (ok, _out, err) =
            run_captured(&["sh".into(), "-c".into(), "echo oops >&2".into()]).unwrap();
        assert!(ok);
        assert!(err.contains("oops"));
    }

    #[test]
    fn run_captured_captures_non_zero_output() {
        let (ok, out, _err) =
            run_captured(&["sh".into(), "-c".into(), "echo failing; exit 1".into()]).unwrap();
        assert!(!ok);
        assert!(out.contains("failing"));
    }

    #[test]
    fn run_captured_empty_args_errors() {
        assert!(run_captured(&[]).is_err());
    }

    // ── run_stage ─────────────────────────────────────────────────────────────

    #[test]
    fn run_stage_success_sets_success_true() {
        let o = run_stage("Test", &["true".into()], Verbosity::Quiet);
        assert!(o.success);
        assert_eq!(o.label, "Test");
        assert!(o.error.is_none());
    }

    #[test]
    fn run_stage_failure_sets_success_false() {
        let o = run_stage("Test", &["false".into()], Verbosity::Quiet);
        assert!(!o.success);
        assert!(o.error.is_some());
    }

    #[test]
    fn run_stage_captures_stdout_on_failure() {
        let o = run_stage(
            "Test",
            &["sh".into(), "-c".into(), "echo bad output; exit 1".into()],
            Verbosity::Quiet,
        );
        assert!(!o.success);
        assert!(o.stdout.contains("bad output"));
    }

    #[test]
    fn run_stage_unspawnable_command_fails() {
        let o = run_stage(
            "Test",
            &["/nonexistent/binary/for/this/test".into()],
            Verbosity::Quiet,
        );
        assert!(o.failed());
        assert!(o.error.unwrap().contains("failed to spawn"));
    }

}
