//! `kilonova restore <input> <volume>` — unpack a backup into a volume.
//!
//! Preconditions: the target volume exists and is empty, and the input file
//! exists on the host.  The helper container binds the input file (read-only
//! by default) at `/in/<filename>` and the volume at `/out`, then extracts
//! with `tar -C /out -xf /in/<filename>`.

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::{config::Runtime, engine, error::Error, runner, ui};

/// Execute the restore operation.
pub fn run(rt: &Runtime, input: &Path, volume: &str) -> Result<()> {
    if !engine::volume_exists(rt, volume)? {
        return Err(Error::VolumeNotFound(volume.into()).into());
    }
    if !engine::volume_empty(rt, volume)? {
        return Err(Error::VolumeNotEmpty(volume.into()).into());
    }
    if !input.exists() {
        return Err(Error::InputFileNotFound(input.to_path_buf()).into());
    }

    // The file exists, so canonicalize gives a clean absolute path for the
    // bind mount.
    let path = std::fs::canonicalize(input)
        .with_context(|| format!("resolving {}", input.display()))?;
    let filename = path
        .file_name()
        .with_context(|| format!("input path '{}' has no file name", path.display()))?
        .to_string_lossy()
        .into_owned();

    let args = runner::restore_args(rt, &path, &filename, volume);
    let outcome = ui::run_stage("Extract", &args, rt.verbosity);
    outcome.print(rt.verbosity);
    if outcome.failed() {
        bail!("failed to restore volume '{volume}'");
    }

    ui::finish(
        &format!("Finished restoring {volume} from {filename}"),
        rt.verbosity,
    );
    Ok(())
}
