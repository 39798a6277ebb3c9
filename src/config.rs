//! Configuration types and loading logic.
//!
//! `Config` is a direct 1-to-1 mapping of `kilonova.toml`.  Every field has
//! a default, so the file is entirely optional — with no config present the
//! stock busybox helper image is used.
//!
//! # File format
//!
//! ```toml
//! [helper]
//! image           = "docker.io/library/busybox:1.36.0"
//! read_only_input = true   # bind the restore input file read-only
//! ```
//!
//! # Search order
//!
//! 1. the `--config` path (default `./kilonova.toml`)
//! 2. `<config dir>/kilonova/config.toml`
//! 3. built-in defaults
//!
//! The first file found wins; there is no per-field merging.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{cli::Cli, engine::Engine, ui::Verbosity};

// ─── Top-level ────────────────────────────────────────────────────────────────

/// Root configuration object, deserialised from `kilonova.toml`.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    /// Settings for the disposable helper containers.
    #[serde(default)]
    pub helper: HelperConfig,
}

// ─── [helper] ─────────────────────────────────────────────────────────────────

/// How helper containers are run.
#[derive(Debug, Deserialize, Serialize)]
pub struct HelperConfig {
    /// Image used for every helper container.
    ///
    /// Anything that ships `tar` and `cp` works; the default is the busybox
    /// tag the tool has always used.  Pin a digest here if the registry is
    /// not trusted.
    #[serde(default = "default_image")]
    pub image: String,

    /// Bind the restore input file read-only into the helper container.
    ///
    /// Set to `false` if the engine's mount handling on your platform
    /// rejects `ro` on single-file binds.
    #[serde(default = "default_read_only_input")]
    pub read_only_input: bool,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            image: default_image(),
            read_only_input: default_read_only_input(),
        }
    }
}

// ─── Defaults ─────────────────────────────────────────────────────────────────

// These free functions are required by `#[serde(default = "…")]` — serde
// cannot call `Default::default()` for individual fields, only for whole
// structs.

pub fn default_image() -> String {
    "docker.io/library/busybox:1.36.0".into()
}

pub fn default_read_only_input() -> bool {
    true
}

// ─── Loader ───────────────────────────────────────────────────────────────────

/// Read and parse a `Config`, trying `local_path` first and the per-user
/// config file second.  Missing files are not an error; a file that exists
/// but cannot be read or parsed is.
pub fn load_config(local_path: &Path) -> Result<Config> {
    if let Some(cfg) = parse_if_present(local_path)? {
        return Ok(cfg);
    }

    let global = dirs_next::config_dir().map(|d| d.join("kilonova").join("config.toml"));
    if let Some(path) = global
        && let Some(cfg) = parse_if_present(&path)?
    {
        return Ok(cfg);
    }

    Ok(Config::default())
}

fn parse_if_present(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let cfg = toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(cfg))
}

// ─── Runtime ──────────────────────────────────────────────────────────────────

/// Everything an operation needs, resolved from CLI flags plus config.
///
/// Passed explicitly into every handler and argument builder, so command
/// construction is testable without touching process-wide state or real
/// subprocesses.
#[derive(Debug, Clone)]
pub struct Runtime {
    pub engine: Engine,
    pub image: String,
    pub read_only_input: bool,
    pub verbosity: Verbosity,
}

impl Runtime {
    pub fn new(cli: &Cli, cfg: &Config) -> Self {
        Self {
            engine: cli.engine,
            image: cfg.helper.image.clone(),
            read_only_input: cfg.helper.read_only_input,
            verbosity: Verbosity::from_flags(cli.verbose, cli.quiet),
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
