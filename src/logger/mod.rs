//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Startup logging (configuration, mounts, template expansion)
//! - Access logging with multiple formats
//! - Error, warning and debug logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use std::path::Path;

use crate::config::{AppState, Config};

/// Initialize the logger with configuration
///
/// Should be called once at application startup. Until then messages go to
/// stdout/stderr.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        &config.logging.level,
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, state: &AppState) {
    let options = &state.options;
    write_info("======================================");
    write_info("SPA server started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Environment: {}", config.server.environment));
    write_info(&format!("Application root: {}", options.root_path.display()));
    write_info(&format!("Default page: {}", options.default_page));
    if !options.url_base_path.is_empty() {
        write_info(&format!("Base path: {}", options.url_base_path));
    }
    write_info(&format!(
        "Cache duration: {} minutes",
        options.cache_duration_minutes
    ));
    if state.mounts.is_empty() {
        write_info("Static mounts: none");
    } else {
        let prefixes: Vec<&str> = state
            .mounts
            .iter()
            .map(|mount| match mount.request_path() {
                "" => "/",
                prefix => prefix,
            })
            .collect();
        write_info(&format!("Static mounts: {}", prefixes.join(", ")));
    }
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================");
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

pub fn log_debug(message: &str) {
    if writer::get().is_some_and(writer::LogWriter::debug_enabled) {
        write_info(&format!("[DEBUG] {message}"));
    }
}

pub fn log_template_processed(path: &Path, changed: bool) {
    let outcome = if changed { "expanded" } else { "unchanged" };
    write_info(&format!("[TEMPLATE] {} ({outcome})", path.display()));
}

pub fn log_mount_registered(request_path: &str, root_path: &Path, download: bool) {
    let prefix = if request_path.is_empty() { "/" } else { request_path };
    let suffix = if download { " (download)" } else { "" };
    write_info(&format!(
        "[MOUNT] {prefix} -> {}{suffix}",
        root_path.display()
    ));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    match writer::get() {
        Some(w) => w.write_access(&entry.format(format)),
        None => println!("{}", entry.format(format)),
    }
}

pub fn log_shutdown(active_connections: usize) {
    write_info(&format!(
        "[SHUTDOWN] Listener closed, {active_connections} connection(s) still finishing"
    ));
}
