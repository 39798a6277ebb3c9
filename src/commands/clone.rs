//! `kilonova clone <source> <target>` — copy one volume into another.
//!
//! Preconditions: the source exists and is non-empty, the target exists and
//! is empty.  The helper container mounts source at `/in` and target at
//! `/out` and runs `cp -a /in/. /out`, copying all contents with attributes
//! preserved.

use anyhow::{Result, bail};

use crate::{config::Runtime, engine, error::Error, runner, ui};

/// Execute the clone operation.
pub fn run(rt: &Runtime, source: &str, target: &str) -> Result<()> {
    if !engine::volume_exists(rt, source)? {
        return Err(Error::VolumeNotFound(source.into()).into());
    }
    if engine::volume_empty(rt, source)? {
        return Err(Error::VolumeEmpty(source.into()).into());
    }
    if !engine::volume_exists(rt, target)? {
        return Err(Error::VolumeNotFound(target.into()).into());
    }
    if !engine::volume_empty(rt, target)? {
        return Err(Error::VolumeNotEmpty(target.into()).into());
    }

    let args = runner::clone_args(rt, source, target);
    let outcome = ui::run_stage("Copy", &args, rt.verbosity);
    outcome.print(rt.verbosity);
    if outcome.failed() {
        bail!("failed to clone volume '{source}' into '{target}'");
    }

    ui::finish(
        &format!("Finished cloning {source} to {target}"),
        rt.verbosity,
    );
    Ok(())
}
