//! Path normalization and file-tree copy utilities.
//!
//! Provides consistent path handling across the codebase:
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `copy_overlay` - recursive union copy of one tree onto another

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Recursively overlay the contents of `src` onto `dst`.
///
/// Equivalent to `cp -rf src/* dst/.`: files are added or overwritten,
/// never deleted, so `dst` ends up as the union of both trees with `src`
/// winning on conflicting paths.
pub fn copy_overlay(src: &Path, dst: &Path) -> Result<()> {
    let entries = fs::read_dir(src)
        .with_context(|| format!("Failed to read directory `{}`", src.display()))?;

    for entry in entries {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());

        if from.is_dir() {
            fs::create_dir_all(&to)
                .with_context(|| format!("Failed to create directory `{}`", to.display()))?;
            copy_overlay(&from, &to)?;
        } else {
            fs::copy(&from, &to).with_context(|| {
                format!(
                    "Failed to copy `{}` to `{}`",
                    from.display(),
                    to.display()
                )
            })?;
        }
    }

    Ok(())
}

// ============================================================================
// tests
// ============================================================================
