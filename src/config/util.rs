//! Config file discovery.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /srv/cms/config/webspaces/  ← cwd
/// /srv/cms/routing.toml       ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// Walk up from `start` looking for `config_name`.
fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("config/webspaces");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("routing.toml"), "").unwrap();

        let found = find_config_file_from(&nested, Path::new("routing.toml")).unwrap();
        assert_eq!(found, dir.path().join("routing.toml"));
    }

    #[test]
    fn test_directory_is_not_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("routing.toml")).unwrap();
        let found = find_config_file_from(dir.path(), Path::new("routing.toml"));
        assert_ne!(found, Some(dir.path().join("routing.toml")));
    }

    #[test]
    fn test_absolute_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_config_file(&dir.path().join("missing.toml")), None);
    }
}
