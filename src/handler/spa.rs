//! Single-page application fallback module
//!
//! Serves real files from the application root and answers every other path
//! with the entry document, so client-side routes survive a full page reload.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::PathBuf;

use super::error::ServeError;
use super::router::RequestContext;
use super::static_files;
use crate::config::ServerOptions;
use crate::http;
use crate::logger;

/// How a request maps onto the application root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaResolution {
    /// The path names a real file
    PassThrough(PathBuf),
    /// No such file, serve the entry document
    Fallback,
}

/// Decide per request, by looking at the filesystem, which file to serve
pub fn resolve(options: &ServerOptions, path: &str) -> SpaResolution {
    match static_files::locate_file(&options.root_path, path) {
        Some(file) => SpaResolution::PassThrough(file),
        None => SpaResolution::Fallback,
    }
}

/// Serve a request that no static mount claimed
///
/// The entry document is returned with status 200, never as a redirect.
/// If it is missing the answer is 404.
pub async fn serve(
    ctx: &RequestContext,
    options: &ServerOptions,
    path: &str,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let target = match resolve(options, path) {
        SpaResolution::PassThrough(file) => file,
        SpaResolution::Fallback => {
            logger::log_debug(&format!("Fallback to {} for {path}", options.default_page));
            options.default_page_path()
        }
    };

    let Some(file) = static_files::load_file(&target).await? else {
        logger::log_warning(&format!("File '{}' not found", target.display()));
        return Ok(http::build_404_response());
    };

    let cache = http::headers_for(&file.file_name, options);
    static_files::build_file_response(ctx, file, &cache, false)
}
