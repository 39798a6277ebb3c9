//! `kilonova` — backup, restore, and clone container-engine volumes.
//!
//! # Overview
//!
//! This binary is a thin orchestration layer around a container engine
//! (docker or podman).  Each operation checks its preconditions with engine
//! probes, then runs a single disposable helper container that `tar`s or
//! `cp`s the mounted volume, and reports a terminal status.  Nothing
//! persists between runs.
//!
//! # Usage
//!
//! ```text
//! kilonova backup data ./data.tar.gz    # archive volume `data`
//! kilonova restore ./data.tar.gz fresh  # unpack into empty volume `fresh`
//! kilonova clone data data-copy         # copy volume contents
//! kilonova -e podman backup data d.tgz  # use podman instead of docker
//! kilonova init                         # scaffold a kilonova.toml
//! ```
//!
//! Exit code 0 on success; 1 on any precondition failure, missing engine,
//! or non-zero subprocess result.
//!
//! # Module layout
//!
//! | Module                 | Responsibility                              |
//! |------------------------|---------------------------------------------|
//! | [`cli`]                | Argument types parsed by clap               |
//! | [`config`]             | `Config` TOML loader + per-run `Runtime`    |
//! | [`engine`]             | Engine enum, PATH check, volume probes      |
//! | [`runner`]             | Argument-vector construction helpers        |
//! | [`ui`]                 | Spinner, captured execution, stage output   |
//! | [`error`]              | Terminal error taxonomy                     |
//! | [`commands::backup`]   | `kilonova backup` subcommand                |
//! | [`commands::restore`]  | `kilonova restore` subcommand               |
//! | [`commands::clone`]    | `kilonova clone` subcommand                 |
//! | [`commands::init`]     | `kilonova init` subcommand                  |

mod cli;
mod commands;
mod config;
mod engine;
mod error;
mod runner;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Subcommand};
use config::Runtime;
use console::style;
use error::Error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match dispatch(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: &Cli) -> Result<()> {
    // ── kilonova init ─────────────────────────────────────────────────────────
    // Scaffolding a config needs no engine and no config file.
    if cli.command == Subcommand::Init {
        return commands::init::run(&cli.config);
    }

    let cfg = config::load_config(&cli.config)?;
    let rt = Runtime::new(cli, &cfg);

    if !rt.engine.installed() {
        return Err(Error::EngineNotInstalled(rt.engine).into());
    }

    // ── volume operations ─────────────────────────────────────────────────────
    match &cli.command {
        Subcommand::Backup { volume, output } => commands::backup::run(&rt, volume, output),
        Subcommand::Restore { input, volume } => commands::restore::run(&rt, input, volume),
        Subcommand::Clone { source, target } => commands::clone::run(&rt, source, target),
        Subcommand::Init => unreachable!("handled above"),
    }
}
