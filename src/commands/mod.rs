//! Subcommand handlers.
//!
//! Each file in this module corresponds to one user-facing command:
//!
//! | File          | Invocation                    | Description                     |
//! |---------------|-------------------------------|---------------------------------|
//! | `backup.rs`   | `kilonova backup <vol> <out>` | Archive a volume to a tarball   |
//! | `restore.rs`  | `kilonova restore <in> <vol>` | Unpack a tarball into a volume  |
//! | `clone.rs`    | `kilonova clone <src> <dst>`  | Copy one volume into another    |
//! | `init.rs`     | `kilonova init`               | Scaffold a `kilonova.toml`      |

pub mod backup;
pub mod clone;
pub mod init;
pub mod restore;
