//! Static server for single-page applications
//!
//! Serves a prebuilt application directory with client-side routing fallback,
//! auxiliary static mounts, an entry-document aware cache policy and one-time
//! environment variable expansion of selected files at startup.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod startup;
