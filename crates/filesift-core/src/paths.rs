//! Path normalization helpers for exclusion matching and root expansion.

use std::path::{Path, PathBuf};

/// Normalize a path string for exclusion matching: lower-cased with
/// forward slashes, so entries match the same way on every platform.
pub fn normalize_for_match(path: &str) -> String {
    path.replace('\\', "/").to_lowercase()
}

/// Expand a leading `~` to the user's home directory. Paths without the
/// placeholder are returned unchanged, as is `~` when no home directory
/// can be resolved.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(stripped) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match home_dir() {
        Some(home) => home.join(stripped),
        None => path.to_path_buf(),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_for_match() {
        assert_eq!(
            normalize_for_match("C:\\Users\\Me\\Downloads"),
            "c:/users/me/downloads"
        );
        assert_eq!(normalize_for_match("/tmp/X"), "/tmp/x");
    }

    #[test]
    fn test_expand_home_passthrough() {
        let path = Path::new("/var/log");
        assert_eq!(expand_home(path), PathBuf::from("/var/log"));
    }

    #[test]
    fn test_expand_home_tilde() {
        if let Some(home) = home_dir() {
            assert_eq!(expand_home(Path::new("~/Downloads")), home.join("Downloads"));
            assert_eq!(expand_home(Path::new("~")), home);
        }
    }
}
