//! Container engine selection and volume probes.
//!
//! The two supported engines share the `run`/`-v` dialect used for helper
//! containers, so only the probes live behind the [`Engine`] enum:
//!
//! - **Existence** — docker has no `volume exists`, so its listing is
//!   filtered by name and the volume-name column is matched exactly.
//!   podman reports existence through its exit code.
//! - **Emptiness** — identical for both: a disposable helper container
//!   mounts the volume and lists it; empty trimmed output means empty.
//!
//! A probe that exits non-zero with diagnostics is a hard failure, never a
//! "does not exist" answer.

use std::fmt;

use clap::ValueEnum;

use crate::{config::Runtime, error::Error, runner, ui};

/// The container runtime CLI used to manage volumes and run helper
/// containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    Docker,
    Podman,
}

impl Engine {
    /// Name of the engine binary on the search path.
    pub const fn binary(self) -> &'static str {
        match self {
            Self::Docker => "docker",
            Self::Podman => "podman",
        }
    }

    /// Whether the engine binary is resolvable on `PATH`.
    pub fn installed(self) -> bool {
        which::which(self.binary()).is_ok()
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

// ─── Probes ───────────────────────────────────────────────────────────────────

/// Does `volume` exist according to the engine?
pub fn volume_exists(rt: &Runtime, volume: &str) -> Result<bool, Error> {
    match rt.engine {
        Engine::Docker => {
            // `-f name=` matches substrings, so the listing still has to be
            // checked for an exact name.
            let args = runner::volume_ls_args(rt, volume);
            let (ok, stdout, stderr) = run(&args)?;
            if !ok {
                return Err(subprocess(&args, &stderr));
            }
            Ok(listing_contains(&stdout, volume))
        }
        Engine::Podman => {
            let args = runner::volume_exists_args(rt, volume);
            let (ok, _, stderr) = run(&args)?;
            if ok {
                Ok(true)
            } else if stderr.trim().is_empty() {
                Ok(false)
            } else {
                Err(subprocess(&args, &stderr))
            }
        }
    }
}

/// Is `volume` empty?  Runs a helper container that lists the mounted
/// volume; empty trimmed stdout means empty.
pub fn volume_empty(rt: &Runtime, volume: &str) -> Result<bool, Error> {
    let args = runner::volume_empty_args(rt, volume);
    let (ok, stdout, stderr) = run(&args)?;
    if !ok {
        return Err(subprocess(&args, &stderr));
    }
    Ok(stdout.trim().is_empty())
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn run(args: &[String]) -> Result<(bool, String, String), Error> {
    ui::run_captured(args).map_err(|e| Error::Subprocess {
        command: args.join(" "),
        detail: e.to_string(),
    })
}

fn subprocess(args: &[String], stderr: &str) -> Error {
    Error::Subprocess {
        command: args.join(" "),
        detail: stderr.to_string(),
    }
}

/// Exact match against the second whitespace-delimited column of each
/// listing line (the volume-name column of `docker volume ls`).
fn listing_contains(listing: &str, volume: &str) -> bool {
    listing
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .any(|name| name == volume)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
