//! Command-line interface definition.
//!
//! All argument parsing lives here so the rest of the codebase can stay
//! agnostic to `clap`.  The `Cli` struct is parsed once in `main` and then
//! passed (by reference) into the command handlers.

use std::path::PathBuf;

use clap::Parser;

use crate::engine::Engine;

/// Top-level CLI arguments, shared across every subcommand.
#[derive(Parser, Debug)]
#[command(
    name    = "kilonova",
    about   = "Backup, restore, and clone container-engine volumes",
    version,
    // Show a compact two-column help layout.
    help_template = "\
{before-help}{name} {version}
{about}

{usage-heading} {usage}

{all-args}{after-help}"
)]
pub struct Cli {
    /// Container engine used for volume probes and helper containers.
    ///
    /// Both engines speak the same `run`/`-v` dialect; only the volume
    /// existence probe differs between them.
    #[arg(short, long, value_enum, default_value_t = Engine::Docker)]
    pub engine: Engine,

    /// Verbose mode.  Replays the helper container's captured output even
    /// when a stage succeeds.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode.
    ///
    /// Switches the in-container `tar`/`cp` to non-verbose and suppresses
    /// spinners and success lines; failures are still reported in full.
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to the configuration file.
    ///
    /// Defaults to `kilonova.toml` in the current working directory.  When
    /// that does not resolve to a file, the per-user config
    /// (`<config dir>/kilonova/config.toml`) is tried before falling back to
    /// built-in defaults.
    #[arg(short, long, default_value = "kilonova.toml")]
    pub config: PathBuf,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Subcommand,
}

/// The volume operations, plus `init` for scaffolding a config file.
#[derive(clap::Subcommand, Debug, PartialEq)]
pub enum Subcommand {
    /// Archive a volume's contents into a compressed tarball.
    Backup {
        /// The volume to back up.
        volume: String,
        /// Where to store the resulting backup file.
        output: PathBuf,
    },

    /// Unpack a backup file into an empty volume.
    Restore {
        /// A file containing backup data.
        input: PathBuf,
        /// The volume to place data into.
        volume: String,
    },

    /// Create an exact copy of a volume.
    Clone {
        /// The volume containing data to be transferred.
        source: String,
        /// The volume to transfer data into.
        target: String,
    },

    /// Scaffold a `kilonova.toml` in the current directory.
    ///
    /// Exits with an error if the file already exists to avoid accidental
    /// overwrites.
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("kilonova").chain(extra.iter().copied()))
    }

    #[test]
    fn engine_defaults_to_docker() {
        let cli = parse(&["init"]).unwrap();
        assert_eq!(cli.engine, Engine::Docker);
    }

    #[test]
    fn engine_podman_accepted() {
        let cli = parse(&["-e", "podman", "init"]).unwrap();
        assert_eq!(cli.engine, Engine::Podman);
    }

    #[test]
    fn unknown_engine_rejected() {
        assert!(parse(&["-e", "lxc", "init"]).is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(parse(&["-v", "-q", "init"]).is_err());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn backup_takes_volume_and_output() {
        let cli = parse(&["backup", "data", "./out.tar.gz"]).unwrap();
        assert_eq!(cli.command, Subcommand::Backup {
            volume: "data".into(),
            output: "./out.tar.gz".into(),
        });
    }

    #[test]
    fn restore_takes_input_and_volume() {
        let cli = parse(&["restore", "./out.tar.gz", "data"]).unwrap();
        assert_eq!(cli.command, Subcommand::Restore {
            input: "./out.tar.gz".into(),
            volume: "data".into(),
        });
    }

    #[test]
    fn clone_takes_source_and_target() {
        let cli = parse(&["clone", "a", "b"]).unwrap();
        assert_eq!(cli.command, Subcommand::Clone {
            source: "a".into(),
            target: "b".into(),
        });
    }

    #[test]
    fn backup_missing_output_rejected() {
        assert!(parse(&["backup", "data"]).is_err());
    }
}
