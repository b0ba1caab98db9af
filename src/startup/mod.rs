//! Startup preparation module
//!
//! Everything that has to happen before the listener accepts its first
//! connection: path resolution, template expansion and state construction.

pub mod env_file;
pub mod paths;
pub mod templates;

use std::path::Path;

use crate::config::{AppState, Config, ServerOptions};
use crate::handler::mounts::{StaticMount, StaticMountRegistry};
use crate::logger;

pub use templates::TemplateError;

/// Resolve the `[spa]` section against the content root
pub fn resolve_options(config: &Config, content_root: &Path) -> ServerOptions {
    if config.spa.cache_duration_minutes < 0 {
        logger::log_warning(&format!(
            "spa.cache_duration_minutes is negative ({}), using 0",
            config.spa.cache_duration_minutes
        ));
    }

    let root_path = paths::resolve(content_root, &config.spa.root_path);
    let env_template_files = config
        .spa
        .env_template_files
        .iter()
        .map(|file| paths::resolve(&root_path, file))
        .collect();

    ServerOptions {
        url_base_path: paths::normalize_url_prefix(&config.spa.url_base_path),
        root_path,
        default_page: config.spa.default_page.clone(),
        cache_duration_minutes: config.cache_duration_minutes(),
        env_template_files,
    }
}

/// Build the mount registry in configuration order
pub fn build_mounts(config: &Config, content_root: &Path) -> StaticMountRegistry {
    let mut registry = StaticMountRegistry::new();
    for mount in &config.static_files {
        let mount = StaticMount::new(
            &mount.request_path,
            paths::resolve(content_root, &mount.root_path),
            mount.download,
        );
        warn_if_missing(mount.root_path());
        logger::log_mount_registered(mount.request_path(), mount.root_path(), mount.download());
        registry.register(mount);
    }
    registry
}

/// Run the whole startup phase and return the state requests are served from
///
/// Template expansion finishes before this returns, so no request can ever
/// observe a half-expanded file.
pub fn prepare(config: &Config, content_root: &Path) -> Result<AppState, TemplateError> {
    let options = resolve_options(config, content_root);
    warn_if_missing(&options.root_path);

    let processed = templates::process_template_files(&options.env_template_files)?;
    if processed > 0 {
        logger::log_info(&format!("Expanded environment variables in {processed} file(s)"));
    }

    let mounts = build_mounts(config, content_root);
    Ok(AppState::new(config, options, mounts))
}

/// Missing directories are not fatal, requests below them answer 404
fn warn_if_missing(dir: &Path) {
    if !dir.is_dir() {
        logger::log_warning(&format!(
            "Directory '{}' does not exist, requests for it will return 404",
            dir.display()
        ));
    }
}
