//! Error taxonomy for the volume operations.
//!
//! Every variant is terminal: nothing here is retried or recovered.  The
//! handlers bubble these up through `anyhow`, and `main` turns any error
//! into a styled message plus exit code 1.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::Engine;

#[derive(Error, Debug)]
pub enum Error {
    /// The selected engine binary is not on the search path.
    #[error("the {0} container engine is not installed")]
    EngineNotInstalled(Engine),

    /// A named volume is missing from the engine's volume listing.
    #[error("volume '{0}' does not exist")]
    VolumeNotFound(String),

    /// A volume that must be empty (restore/clone target) holds data.
    #[error("volume '{0}' is not empty")]
    VolumeNotEmpty(String),

    /// A volume that must hold data (backup/clone source) is empty.
    #[error("volume '{0}' is empty, nothing to copy")]
    VolumeEmpty(String),

    /// The restore input file is missing from the host filesystem.
    #[error("the file at {} does not exist", .0.display())]
    InputFileNotFound(PathBuf),

    /// A probe or helper-container invocation exited non-zero (or could not
    /// be spawned at all).
    #[error("command failed: {command}{}", detail_block(.detail))]
    Subprocess { command: String, detail: String },
}

/// Render the captured diagnostics on their own line, or nothing when the
/// subprocess was silent.
fn detail_block(detail: &str) -> String {
    let trimmed = detail.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{trimmed}")
    }
}
