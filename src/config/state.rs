// Application state module
// Immutable runtime state shared by every connection

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

use super::types::{Config, PerformanceConfig};
use crate::handler::mounts::StaticMountRegistry;

/// Resolved single-page application options
///
/// Built once at startup from [`super::SpaOptions`]; every path is already
/// resolved against the content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    /// Normalized prefix, empty when mounted at `/`
    pub url_base_path: String,
    pub root_path: PathBuf,
    pub default_page: String,
    pub cache_duration_minutes: u64,
    pub env_template_files: Vec<PathBuf>,
}

impl ServerOptions {
    /// Absolute location of the entry document
    pub fn default_page_path(&self) -> PathBuf {
        self.root_path
            .join(self.default_page.trim_start_matches(|c| c == '/' || c == '\\'))
    }

    /// File name the cache policy compares served files against
    pub fn default_page_name(&self) -> &str {
        Path::new(&self.default_page)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.default_page)
    }
}

/// Application state
#[derive(Debug)]
pub struct AppState {
    pub options: Arc<ServerOptions>,
    pub mounts: StaticMountRegistry,
    pub production: bool,
    pub access_log: bool,
    pub access_log_format: String,
    pub server_name: String,
    pub max_connections: Option<u64>,
    pub keep_alive: bool,
    /// Limit for receiving a request head, idle keep-alive time included
    pub header_read_timeout: Duration,
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub fn new(config: &Config, options: ServerOptions, mounts: StaticMountRegistry) -> Self {
        Self {
            options: Arc::new(options),
            mounts,
            production: config.is_production(),
            access_log: config.logging.access_log,
            access_log_format: config.logging.access_log_format.clone(),
            server_name: config.http.server_name.clone(),
            max_connections: config.performance.max_connections,
            keep_alive: config.performance.keep_alive_timeout > 0,
            header_read_timeout: header_read_timeout(&config.performance),
            active_connections: AtomicUsize::new(0),
        }
    }
}

/// hyper's header timer also runs while a kept-alive connection waits for
/// its next request, so with keep-alive on it is the longer of the two limits
fn header_read_timeout(performance: &PerformanceConfig) -> Duration {
    let secs = if performance.keep_alive_timeout > 0 {
        performance.read_timeout.max(performance.keep_alive_timeout)
    } else {
        performance.read_timeout
    };
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(default_page: &str) -> ServerOptions {
        ServerOptions {
            url_base_path: String::new(),
            root_path: PathBuf::from("/srv/app"),
            default_page: default_page.to_string(),
            cache_duration_minutes: 0,
            env_template_files: Vec::new(),
        }
    }

    #[test]
    fn test_default_page_path() {
        assert_eq!(
            options("index.html").default_page_path(),
            PathBuf::from("/srv/app/index.html")
        );
        assert_eq!(
            options("/shell/app.html").default_page_path(),
            PathBuf::from("/srv/app/shell/app.html")
        );
    }

    fn performance(keep_alive_timeout: u64, read_timeout: u64) -> PerformanceConfig {
        PerformanceConfig {
            keep_alive_timeout,
            read_timeout,
            max_connections: None,
        }
    }

    #[test]
    fn test_header_read_timeout() {
        assert_eq!(header_read_timeout(&performance(75, 30)), Duration::from_secs(75));
        assert_eq!(header_read_timeout(&performance(5, 30)), Duration::from_secs(30));
        assert_eq!(header_read_timeout(&performance(0, 30)), Duration::from_secs(30));
    }

    #[test]
    fn test_default_page_name() {
        assert_eq!(options("index.html").default_page_name(), "index.html");
        assert_eq!(options("shell/app.html").default_page_name(), "app.html");
    }
}
