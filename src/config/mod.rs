// Configuration module entry point
// Loads layered configuration and holds the immutable runtime state

mod state;
mod types;

use std::net::SocketAddr;
use std::path::PathBuf;

// Re-export public types
pub use state::{AppState, ServerOptions};
pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, SpaOptions,
    StaticMountOptions,
};

/// Seven days
pub const DEFAULT_CACHE_DURATION_MINUTES: i64 = 10_080;

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SPA").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.environment", "Production")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("http.server_name", "spa-server")?
            .set_default("spa.url_base_path", "/")?
            .set_default("spa.root_path", "wwwroot")?
            .set_default("spa.default_page", "index.html")?
            .set_default("spa.cache_duration_minutes", DEFAULT_CACHE_DURATION_MINUTES)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Whether error details must be hidden from clients
    pub fn is_production(&self) -> bool {
        self.server.environment.eq_ignore_ascii_case("production")
    }

    /// Configured cache lifetime, never negative
    pub fn cache_duration_minutes(&self) -> u64 {
        u64::try_from(self.spa.cache_duration_minutes).unwrap_or(0)
    }

    /// Directory relative configuration paths are resolved against
    pub fn content_root(&self) -> std::io::Result<PathBuf> {
        match &self.server.content_root {
            Some(root) => Ok(PathBuf::from(root)),
            None => std::env::current_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_defaults() -> Config {
        Config::load_from("tests/fixtures/no-such-config").unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = load_defaults();
        assert_eq!(cfg.spa.url_base_path, "/");
        assert_eq!(cfg.spa.root_path, "wwwroot");
        assert_eq!(cfg.spa.default_page, "index.html");
        assert_eq!(cfg.spa.cache_duration_minutes, 10_080);
        assert!(cfg.spa.env_template_files.is_empty());
        assert!(cfg.static_files.is_empty());
        assert_eq!(cfg.logging.access_log_format, "combined");
    }

    #[test]
    fn test_environment_is_case_insensitive() {
        let mut cfg = load_defaults();
        for name in ["Production", "PRODUCTION", "production"] {
            cfg.server.environment = name.to_string();
            assert!(cfg.is_production(), "{name} should be production");
        }
        for name in ["Development", "staging", ""] {
            cfg.server.environment = name.to_string();
            assert!(!cfg.is_production(), "{name} should not be production");
        }
    }

    #[test]
    fn test_negative_cache_duration_is_clamped() {
        let mut cfg = load_defaults();
        cfg.spa.cache_duration_minutes = -5;
        assert_eq!(cfg.cache_duration_minutes(), 0);
        cfg.spa.cache_duration_minutes = 60;
        assert_eq!(cfg.cache_duration_minutes(), 60);
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = load_defaults();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 9000;
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 9000);
        cfg.server.host = "not an address".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
