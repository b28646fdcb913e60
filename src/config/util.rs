//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/blog/_build/public/  ← cwd
/// /home/user/blog/blogship.toml   ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// Upward search starting from an explicit directory.
fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    // First check if config_name is an absolute path
    if config_name.is_absolute() && config_name.exists() {
        return Some(config_name.to_path_buf());
    }

    // Walk up from start looking for config file
    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_file_from_nested_dir() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("blogship.toml");
        fs::write(&config, "").unwrap();

        let nested = tmp.path().join("content/posts");
        fs::create_dir_all(&nested).unwrap();

        let found = find_config_file_from(&nested, Path::new("blogship.toml")).unwrap();
        assert_eq!(found, config);
    }

    #[test]
    fn test_find_config_file_absent() {
        let tmp = TempDir::new().unwrap();
        // Searching for a name that exists nowhere up the tree
        let found = find_config_file_from(tmp.path(), Path::new("no-such-config-blogship.toml"));
        assert!(found.is_none());
    }

    #[test]
    fn test_find_config_file_absolute_path() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("blogship.toml");
        fs::write(&config, "").unwrap();

        let found = find_config_file_from(Path::new("/"), &config).unwrap();
        assert_eq!(found, config);
    }
}
