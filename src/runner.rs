//! Command argument construction helpers.
//!
//! This module is responsible for *building* the argument vectors passed to
//! the container engine.  It deliberately does **not** execute anything —
//! process execution lives in [`crate::ui`] so that the spinner can own the
//! terminal while commands run.
//!
//! Keeping arg-building separate from execution means every function here is
//! pure and trivially unit-testable without spawning any child processes.
//!
//! # No shell assembly
//!
//! Every invocation is an exact argument vector executed against the engine
//! binary.  Volume names and paths containing spaces or shell metacharacters
//! pass through untouched.  The in-container commands avoid `sh -c` too:
//! `tar -C` replaces `cd … &&`, and `cp -a /in/. /out` copies a directory's
//! contents without needing glob expansion.

use std::path::Path;

use crate::{config::Runtime, ui::Verbosity};

// ─── Engine base command ──────────────────────────────────────────────────────

/// The argument list every invocation starts from: just the engine binary.
///
/// Callers append the subcommand and flags to the returned `Vec` before
/// passing it to [`crate::ui::run_stage`] or [`crate::ui::run_captured`].
pub fn engine_base(rt: &Runtime) -> Vec<String> {
    vec![rt.engine.binary().into()]
}

// ─── Probe invocations ────────────────────────────────────────────────────────

/// Arguments for the docker existence probe:
/// `docker volume ls -f name=<volume>`.
///
/// The filter matches substrings, so the caller still has to check the
/// output for an exact name.
pub fn volume_ls_args(rt: &Runtime, volume: &str) -> Vec<String> {
    let mut cmd = engine_base(rt);
    cmd.extend(["volume".into(), "ls".into(), "-f".into(), format!("name={volume}")]);
    cmd
}

/// Arguments for the podman existence probe:
/// `podman volume exists <volume>` (existence is reported via exit code).
pub fn volume_exists_args(rt: &Runtime, volume: &str) -> Vec<String> {
    let mut cmd = engine_base(rt);
    cmd.extend(["volume".into(), "exists".into(), volume.into()]);
    cmd
}

/// Arguments for the emptiness probe: a helper container that mounts the
/// volume and lists its contents (including dotfiles).
pub fn volume_empty_args(rt: &Runtime, volume: &str) -> Vec<String> {
    let mut cmd = engine_base(rt);
    cmd.extend([
        "run".into(),
        "--rm".into(),
        "-v".into(),
        format!("{volume}:/vol:z"),
        rt.image.clone(),
        "ls".into(),
        "-A".into(),
        "/vol".into(),
    ]);
    cmd
}

// ─── Operation invocations ────────────────────────────────────────────────────

/// Arguments for the backup helper container.
///
/// Mounts the volume at `/in` and the staging directory at `/out`, then
/// archives the volume's contents into `/out/<archive>`:
///
/// ```text
/// <engine> run --rm -v <volume>:/in:z -v <staging>:/out:z <image>
///     tar -C /in -cvzf /out/<archive> .
/// ```
///
/// `--quiet` drops the `v` from the tar flags.
pub fn backup_args(rt: &Runtime, volume: &str, staging: &Path, archive: &str) -> Vec<String> {
    let mut cmd = engine_base(rt);
    cmd.extend([
        "run".into(),
        "--rm".into(),
        "-v".into(),
        format!("{volume}:/in:z"),
        "-v".into(),
        format!("{}:/out:z", staging.display()),
        rt.image.clone(),
        "tar".into(),
        "-C".into(),
        "/in".into(),
        tar_flags("c", rt),
        format!("/out/{archive}"),
        ".".into(),
    ]);
    cmd
}

/// Arguments for the restore helper container.
///
/// Binds the input file at `/in/<filename>` (read-only unless configured
/// otherwise) and the target volume at `/out`, then extracts into the
/// volume's mount point:
///
/// ```text
/// <engine> run --rm -v <input>:/in/<filename>:ro,z -v <volume>:/out:z <image>
///     tar -C /out -xvf /in/<filename>
/// ```
pub fn restore_args(rt: &Runtime, input: &Path, filename: &str, volume: &str) -> Vec<String> {
    let mode = if rt.read_only_input { "ro,z" } else { "z" };
    let mut cmd = engine_base(rt);
    cmd.extend([
        "run".into(),
        "--rm".into(),
        "-v".into(),
        format!("{}:/in/{filename}:{mode}", input.display()),
        "-v".into(),
        format!("{volume}:/out:z"),
        rt.image.clone(),
        "tar".into(),
        "-C".into(),
        "/out".into(),
        tar_flags("x", rt),
        format!("/in/{filename}"),
    ]);
    cmd
}

/// Arguments for the clone helper container.
///
/// Mounts source at `/in` and target at `/out`, then copies all contents
/// preserving attributes:
///
/// ```text
/// <engine> run --rm -v <source>:/in:z -v <target>:/out:z <image>
///     cp -av /in/. /out
/// ```
pub fn clone_args(rt: &Runtime, source: &str, target: &str) -> Vec<String> {
    // Like tar, cp lists what it copies unless quieted.
    let flags = if rt.verbosity == Verbosity::Quiet { "-a" } else { "-av" };
    let mut cmd = engine_base(rt);
    cmd.extend([
        "run".into(),
        "--rm".into(),
        "-v".into(),
        format!("{source}:/in:z"),
        "-v".into(),
        format!("{target}:/out:z"),
        rt.image.clone(),
        "cp".into(),
        flags.into(),
        "/in/.".into(),
        "/out".into(),
    ]);
    cmd
}

/// tar flag cluster for the given mode (`c` or `x`).  tar runs verbose
/// unless `--quiet` drops the `v` — the output is captured either way, so
/// this only changes what a failure (or `--verbose` success) replays.
/// Compression (`z`) only applies when creating; extraction lets tar detect
/// it from the archive.
fn tar_flags(mode: &str, rt: &Runtime) -> String {
    let v = if rt.verbosity == Verbosity::Quiet { "" } else { "v" };
    match mode {
        "c" => format!("-{mode}{v}zf"),
        _ => format!("-{mode}{v}f"),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{config::Runtime, engine::Engine, ui::Verbosity};

    fn make_rt(engine: Engine, verbosity: Verbosity) -> Runtime {
        Runtime {
            engine,
            image: "docker.io/library/busybox:1.36.0".into(),
            read_only_input: true,
            verbosity,
        }
    }

    fn docker() -> Runtime {
        make_rt(Engine::Docker, Verbosity::Normal)
    }

    // ── probes ────────────────────────────────────────────────────────────────

    #[test]
    fn volume_ls_uses_name_filter() {
        assert_eq!(volume_ls_args(&docker(), "data"), vec![
            "docker", "volume", "ls", "-f", "name=data"
        ]);
    }

    #[test]
    fn volume_exists_uses_podman_binary() {
        let rt = make_rt(Engine::Podman, Verbosity::Normal);
        assert_eq!(volume_exists_args(&rt, "data"), vec![
            "podman", "volume", "exists", "data"
        ]);
    }

    #[test]
    fn volume_empty_lists_dotfiles() {
        let args = volume_empty_args(&docker(), "data");
        assert_eq!(args[4], "data:/vol:z");
        assert_eq!(&args[args.len() - 3..], ["ls", "-A", "/vol"]);
    }

    // ── backup ────────────────────────────────────────────────────────────────

    #[test]
    fn backup_mounts_volume_and_staging() {
        let args = backup_args(&docker(), "data", Path::new("/tmp/stage"), "data.tar.gz");
        assert_eq!(args[4], "data:/in:z");
        assert_eq!(args[6], "/tmp/stage:/out:z");
        assert_eq!(args.last().unwrap(), ".");
    }

    #[test]
    fn backup_archives_into_the_staging_mount() {
        let args = backup_args(&docker(), "data", Path::new("/tmp/stage"), "out.tar.gz");
        assert!(args.contains(&"/out/out.tar.gz".to_string()));
    }

    #[test]
    fn backup_tar_is_verbose_by_default() {
        let args = backup_args(&docker(), "data", Path::new("/tmp/stage"), "out.tar.gz");
        assert!(args.contains(&"-cvzf".to_string()));
    }

    #[test]
    fn backup_quiet_switches_tar_to_non_verbose() {
        let rt = make_rt(Engine::Docker, Verbosity::Quiet);
        let args = backup_args(&rt, "data", Path::new("/tmp/stage"), "out.tar.gz");
        assert!(args.contains(&"-czf".to_string()));
        assert!(!args.contains(&"-cvzf".to_string()));
    }

    #[test]
    fn backup_preserves_names_with_spaces() {
        let args = backup_args(
            &docker(),
            "my volume",
            Path::new("/tmp/st age"),
            "my backup.tar.gz",
        );
        assert_eq!(args[4], "my volume:/in:z");
        assert_eq!(args[6], "/tmp/st age:/out:z");
        assert!(args.contains(&"/out/my backup.tar.gz".to_string()));
    }

    // ── restore ───────────────────────────────────────────────────────────────

    #[test]
    fn restore_binds_input_read_only_by_default() {
        let args = restore_args(&docker(), Path::new("/b/data.tar.gz"), "data.tar.gz", "data");
        assert_eq!(args[4], "/b/data.tar.gz:/in/data.tar.gz:ro,z");
        assert_eq!(args[6], "data:/out:z");
        assert_eq!(args.last().unwrap(), "/in/data.tar.gz");
    }

    #[test]
    fn restore_input_bind_mode_is_configurable() {
        let mut rt = docker();
        rt.read_only_input = false;
        let args = restore_args(&rt, Path::new("/b/data.tar.gz"), "data.tar.gz", "data");
        assert_eq!(args[4], "/b/data.tar.gz:/in/data.tar.gz:z");
    }

    #[test]
    fn restore_extraction_omits_compression_flag() {
        // tar detects gzip on extraction; forcing `z` would reject plain tars.
        let args = restore_args(&docker(), Path::new("/b/data.tar.gz"), "data.tar.gz", "data");
        assert!(args.contains(&"-xvf".to_string()));
        assert!(!args.iter().any(|a| a.contains('z') && a.starts_with("-x")));
    }

    #[test]
    fn restore_quiet_switches_tar_to_non_verbose() {
        let rt = make_rt(Engine::Docker, Verbosity::Quiet);
        let args = restore_args(&rt, Path::new("/b/data.tar.gz"), "data.tar.gz", "data");
        assert!(args.contains(&"-xf".to_string()));
    }

    // ── clone ─────────────────────────────────────────────────────────────────

    #[test]
    fn clone_copies_contents_preserving_attributes() {
        let args = clone_args(&docker(), "src", "dst");
        assert_eq!(args[4], "src:/in:z");
        assert_eq!(args[6], "dst:/out:z");
        assert_eq!(&args[args.len() - 4..], ["cp", "-av", "/in/.", "/out"]);
    }

    #[test]
    fn clone_quiet_switches_cp_to_non_verbose() {
        let rt = make_rt(Engine::Docker, Verbosity::Quiet);
        assert!(clone_args(&rt, "src", "dst").contains(&"-a".to_string()));
    }

    // ── insta snapshots ───────────────────────────────────────────────────────
    // These lock down the exact argument vectors so any unintended change is
    // immediately visible in the diff.

    #[test]
    fn snapshot_backup_args() {
        insta::assert_debug_snapshot!(
            backup_args(&docker(), "data", Path::new("/tmp/stage"), "data.tar.gz"),
            @r#"
        [
            "docker",
            "run",
            "--rm",
            "-v",
            "data:/in:z",
            "-v",
            "/tmp/stage:/out:z",
            "docker.io/library/busybox:1.36.0",
            "tar",
            "-C",
            "/in",
            "-cvzf",
            "/out/data.tar.gz",
            ".",
        ]
        "#
        );
    }

    #[test]
    fn snapshot_restore_args() {
        insta::assert_debug_snapshot!(
            restore_args(&docker(), Path::new("/backups/data.tar.gz"), "data.tar.gz", "data"),
            @r#"
        [
            "docker",
            "run",
            "--rm",
            "-v",
            "/backups/data.tar.gz:/in/data.tar.gz:ro,z",
            "-v",
            "data:/out:z",
            "docker.io/library/busybox:1.36.0",
            "tar",
            "-C",
            "/out",
            "-xvf",
            "/in/data.tar.gz",
        ]
        "#
        );
    }

    #[test]
    fn snapshot_clone_args_podman() {
        insta::assert_debug_snapshot!(
            clone_args(&make_rt(Engine::Podman, Verbosity::Normal), "src", "dst"),
            @r#"
        [
            "podman",
            "run",
            "--rm",
            "-v",
            "src:/in:z",
            "-v",
            "dst:/out:z",
            "docker.io/library/busybox:1.36.0",
            "cp",
            "-av",
            "/in/.",
            "/out",
        ]
        "#
        );
    }
}
