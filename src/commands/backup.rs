//! `kilonova backup <volume> <output>` — archive a volume to a tarball.
//!
//! # Flow
//!
//! 1. Preconditions: the volume exists and is non-empty.
//! 2. A scoped staging directory is created; a helper container mounts the
//!    volume read-side and the staging directory write-side and runs
//!    `tar -C /in -czf /out/<basename(output)> .`.
//! 3. On success the archive is moved from staging to the resolved output
//!    path.  On any failure nothing is moved.
//!
//! The staging directory is removed when it goes out of scope, success or
//! not, so a failed run leaves no residue.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::{config::Runtime, engine, error::Error, runner, ui};

/// Execute the backup operation.
pub fn run(rt: &Runtime, volume: &str, output: &Path) -> Result<()> {
    if !engine::volume_exists(rt, volume)? {
        return Err(Error::VolumeNotFound(volume.into()).into());
    }
    if engine::volume_empty(rt, volume)? {
        return Err(Error::VolumeEmpty(volume.into()).into());
    }

    let archive = output
        .file_name()
        .with_context(|| format!("output path '{}' has no file name", output.display()))?
        .to_string_lossy()
        .into_owned();
    let target = absolute(output)?;

    // Scoped staging area; dropped (and deleted) on every exit path.
    let staging = tempfile::tempdir().context("creating staging directory")?;

    let args = runner::backup_args(rt, volume, staging.path(), &archive);
    let outcome = ui::run_stage("Archive", &args, rt.verbosity);
    outcome.print(rt.verbosity);
    if outcome.failed() {
        bail!("failed to back up volume '{volume}'");
    }

    move_artifact(&staging.path().join(&archive), &target)?;

    ui::finish(
        &format!("Finished backing up {volume} to {}", target.display()),
        rt.verbosity,
    );
    Ok(())
}

/// Resolve a path against the current directory without requiring it to
/// exist (the output file doesn't, yet).
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()
            .context("resolving current directory")?
            .join(path))
    }
}

/// Move the produced archive out of staging.
///
/// `rename` fails with `EXDEV` when the staging tmpfs and the output live on
/// different filesystems, so fall back to copy-then-remove.
fn move_artifact(source: &Path, target: &Path) -> Result<()> {
    if std::fs::rename(source, target).is_ok() {
        return Ok(());
    }
    std::fs::copy(source, target)
        .with_context(|| format!("moving {} to {}", source.display(), target.display()))?;
    std::fs::remove_file(source)
        .with_context(|| format!("removing staged {}", source.display()))?;
    Ok(())
}
