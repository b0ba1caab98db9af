//! Static mount module
//!
//! Auxiliary directories bound to URL prefixes. Mounts are tried in
//! registration order and the first matching prefix wins, even when a later
//! mount has a longer, more specific prefix.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};

use super::error::ServeError;
use super::router::RequestContext;
use super::static_files::{self, strip_url_prefix};
use crate::config::ServerOptions;
use crate::http;
use crate::startup::paths::normalize_url_prefix;

/// A URL prefix bound to a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticMount {
    request_path: String,
    root_path: PathBuf,
    download: bool,
}

impl StaticMount {
    pub fn new(request_path: &str, root_path: impl Into<PathBuf>, download: bool) -> Self {
        Self {
            request_path: normalize_url_prefix(request_path),
            root_path: root_path.into(),
            download,
        }
    }

    /// Normalized prefix, empty when mounted at `/`
    pub fn request_path(&self) -> &str {
        &self.request_path
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub const fn download(&self) -> bool {
        self.download
    }

    /// Serve `remainder` (the path below the prefix) from this mount
    ///
    /// A missing file is a 404; the request never falls through to other
    /// mounts or to the application fallback.
    pub async fn serve(
        &self,
        ctx: &RequestContext,
        remainder: &str,
        options: &ServerOptions,
    ) -> Result<Response<Full<Bytes>>, ServeError> {
        let Some(path) = static_files::locate_file(&self.root_path, remainder) else {
            return Ok(http::build_404_response());
        };
        let Some(file) = static_files::load_file(&path).await? else {
            return Ok(http::build_404_response());
        };

        let cache = http::headers_for(&file.file_name, options);
        static_files::build_file_response(ctx, file, &cache, self.download)
    }
}

/// Ordered list of static mounts
#[derive(Debug, Default)]
pub struct StaticMountRegistry {
    mounts: Vec<StaticMount>,
}

impl StaticMountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mount; it is tried after every mount registered before it
    pub fn register(&mut self, mount: StaticMount) {
        self.mounts.push(mount);
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StaticMount> {
        self.mounts.iter()
    }

    /// First mount whose prefix matches, with the rest of the path
    pub fn match_mount<'a>(&self, path: &'a str) -> Option<(&StaticMount, &'a str)> {
        self.mounts.iter().find_map(|mount| {
            strip_url_prefix(path, &mount.request_path).map(|remainder| (mount, remainder))
        })
    }
}

impl FromIterator<StaticMount> for StaticMountRegistry {
    fn from_iter<I: IntoIterator<Item = StaticMount>>(iter: I) -> Self {
        Self {
            mounts: iter.into_iter().collect(),
        }
    }
}
