//! Configuration section definitions.
//!
//! Each module corresponds to a section in `bale.toml`:
//!
//! | Module      | TOML Section                 | Purpose                          |
//! |-------------|------------------------------|----------------------------------|
//! | `storage`   | `[storage]`                  | Storage root, URL, extra dirs    |
//! | `compress`  | `[compress]`                 | Compressors, source maps, wrapper|
//! | `compiler`  | `[[compilers]]`              | Per-file compilers               |
//! | `templates` | `[templates]`                | Client-side template compilation |
//! | `package`   | `[style.*]` / `[script.*]`   | Package tables                   |

mod compiler;
mod compress;
mod package;
mod storage;
mod templates;

pub use compiler::{CompilerConfig, normalize_ext, validate_compilers};
pub use compress::{CompressConfig, CompressorConfig};
pub use package::{PackageConfig, Variant, validate_packages};
pub use storage::StorageConfig;
pub use templates::TemplatesConfig;

use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Expand `~` and resolve a config path against the config directory.
pub(crate) fn normalize_relative(path: &Path, root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    let full_path = if path.is_relative() {
        root.join(&path)
    } else {
        path
    };
    crate::utils::path::normalize_path(&full_path)
}

/// Report a command whose program cannot be found on `PATH`.
///
/// Package runners (`npx` and friends) may download the real tool at run
/// time, so only a missing runner itself is an error.
pub(crate) fn check_executable(
    program: &str,
    command: &[String],
    field: FieldPath,
    diag: &mut ConfigDiagnostics,
) {
    if which::which(program).is_ok() {
        return;
    }

    let is_package_runner = ["npx", "bunx", "pnpx", "yarn", "dlx"].contains(&program);
    if is_package_runner && command.len() > 1 {
        diag.warn(
            field,
            format!("`{}` via `{program}`: `{program}` not found", command[1]),
        );
    } else {
        diag.error_with_hint(
            field.clone(),
            format!("`{program}` not found"),
            format!("install the command or update {field}"),
        );
    }
}
