// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub spa: SpaOptions,
    /// Auxiliary static directories, tried in the listed order
    #[serde(default)]
    pub static_files: Vec<StaticMountOptions>,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Environment name, "production" (any casing) hides error details
    pub environment: String,
    /// Base directory for relative paths, current directory if not set
    #[serde(default)]
    pub content_root: Option<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// Seconds an idle kept-alive connection may wait for its next request, 0 disables keep-alive
    pub keep_alive_timeout: u64,
    /// Seconds allowed for receiving a request head
    pub read_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
}

/// Single-page application options (`[spa]` section)
#[derive(Debug, Deserialize, Clone)]
pub struct SpaOptions {
    /// Path prefix every route is mounted under
    pub url_base_path: String,
    /// Directory holding the build output, absolute or relative to the content root
    pub root_path: String,
    /// Entry document, relative to `root_path`
    pub default_page: String,
    /// Cache lifetime for everything except the entry document.
    /// Signed so that a negative value can be clamped instead of rejected.
    pub cache_duration_minutes: i64,
    /// Files rewritten with environment variables at startup, in order
    #[serde(default)]
    pub env_template_files: Vec<String>,
}

/// Auxiliary static directory (`[[static_files]]` entries)
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StaticMountOptions {
    pub root_path: String,
    pub request_path: String,
    /// Serve every file as an attachment
    #[serde(default)]
    pub download: bool,
}
