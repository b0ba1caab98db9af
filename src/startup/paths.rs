//! Path resolution module
//!
//! Resolves configured filesystem paths against a base directory and
//! normalizes configured URL prefixes.

use std::path::{Path, PathBuf};

/// Resolve `maybe_relative` against `base`
///
/// Absolute paths are returned unchanged, relative ones are joined onto `base`.
///
/// # Examples
/// ```
/// use spa_server::startup::paths::resolve;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(resolve(Path::new("/srv"), "wwwroot"), PathBuf::from("/srv/wwwroot"));
/// assert_eq!(resolve(Path::new("/srv"), "/var/www"), PathBuf::from("/var/www"));
/// ```
pub fn resolve(base: &Path, maybe_relative: &str) -> PathBuf {
    let path = Path::new(maybe_relative);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Normalize a configured URL prefix to `/a/b` form
///
/// The root prefix (`/` or empty) becomes the empty string so that
/// prefix stripping and matching never have to special-case it.
pub fn normalize_url_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
