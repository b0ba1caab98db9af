//! `.env` file loading
//!
//! Runs before configuration is read, so the values reach both the `SPA__*`
//! configuration layer and template expansion. Variables already present in
//! the process environment are not overridden.

use std::path::{Path, PathBuf};

/// Load `.env` from the current directory or one of its parents
///
/// `Ok(None)` when there is no such file.
pub fn load_default() -> Result<Option<PathBuf>, dotenvy::Error> {
    absent_is_none(dotenvy::dotenv())
}

/// Load a specific env file, `Ok(None)` when it does not exist
pub fn load_from(path: &Path) -> Result<Option<PathBuf>, dotenvy::Error> {
    absent_is_none(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

fn absent_is_none(
    result: Result<PathBuf, dotenvy::Error>,
) -> Result<Option<PathBuf>, dotenvy::Error> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
