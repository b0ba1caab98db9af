//! Static file serving module
//!
//! Shared by the mount handlers and the SPA fallback: request path
//! sanitizing, file lookup below a root directory, loading and response building.

use chrono::{DateTime, Utc};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use std::borrow::Cow;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use super::error::ServeError;
use super::router::RequestContext;
use crate::http::{self, cache, CacheHeaders, RangeOutcome};
use crate::logger;

/// File read from disk, ready to be sent
#[derive(Debug)]
pub struct ServedFile {
    pub body: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Strip a normalized URL prefix at a segment boundary
///
/// `/files` strips `/files` and `/files/x` but not `/filesx`. The comparison
/// ignores ASCII case; an empty prefix strips nothing and always matches.
pub fn strip_url_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(path);
    }

    let head = path.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }

    let rest = &path[prefix.len()..];
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

/// Percent-decode a request path, `None` if the result is not valid UTF-8
///
/// Done once per request; prefix matching and file lookup both work on the
/// decoded form.
pub fn decode_request_path(raw: &str) -> Option<Cow<'_, str>> {
    percent_decode_str(raw).decode_utf8().ok()
}

/// Turn a decoded request path into a relative filesystem path
///
/// Returns `None` for paths that try to leave the root (`..`).
pub fn sanitize_path(request_path: &str) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in Path::new(request_path).components() {
        match component {
            Component::RootDir | Component::CurDir => {}
            Component::Normal(segment) => normalized.push(segment),
            Component::ParentDir | Component::Prefix(_) => return None,
        }
    }
    Some(normalized)
}

/// Find a regular file for the decoded `request_path` below `root`
///
/// Directories, missing files and anything resolving outside `root`
/// (for example through a symlink) yield `None`.
pub fn locate_file(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = sanitize_path(request_path)?;
    if relative.as_os_str().is_empty() {
        return None;
    }

    // File not found is common (404), no need to log
    let canonical = root.join(&relative).canonicalize().ok()?;
    let canonical_root = root.canonicalize().ok()?;

    if !canonical.starts_with(&canonical_root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            canonical.display()
        ));
        return None;
    }

    canonical.is_file().then_some(canonical)
}

/// Read a file, `Ok(None)` when it does not exist
pub async fn load_file(path: &Path) -> Result<Option<ServedFile>, ServeError> {
    let body = match fs::read(path).await {
        Ok(body) => body,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ServeError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let last_modified = fs::metadata(path)
        .await
        .ok()
        .and_then(|meta| meta.modified().ok())
        .map(DateTime::<Utc>::from);

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Unknown extensions are still served
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    Ok(Some(ServedFile {
        body,
        content_type,
        file_name,
        last_modified,
    }))
}

/// Build the response for a loaded file
///
/// Handles conditional requests and single byte ranges. `cache` is the
/// finished header set from the cache policy and is applied as a whole.
pub fn build_file_response(
    ctx: &RequestContext,
    file: ServedFile,
    cache: &CacheHeaders,
    download: bool,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let etag = cache::generate_etag(&file.body);

    if cache::is_not_modified(
        ctx.if_none_match.as_deref(),
        ctx.if_modified_since.as_deref(),
        &etag,
        file.last_modified,
    ) {
        return Ok(http::build_304_response(&etag, cache));
    }

    let total_size = file.body.len();
    let (status, range) = match http::evaluate_range(ctx.range.as_deref(), total_size) {
        RangeOutcome::Full => (200, None),
        RangeOutcome::Partial(range) => (206, Some(range)),
        RangeOutcome::Unsatisfiable => return Ok(http::build_416_response(total_size)),
    };

    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", &file.content_type)
        .header("Accept-Ranges", "bytes")
        .header("ETag", &etag)
        .header("Cache-Control", &cache.cache_control)
        .header("Expires", &cache.expires);

    if let Some(modified) = file.last_modified {
        builder = builder.header("Last-Modified", cache::format_http_date(modified));
    }
    if download {
        builder = builder.header("Content-Disposition", content_disposition(&file.file_name));
    }

    let mut body = Bytes::from(file.body);
    if let Some(range) = range {
        builder = builder.header(
            "Content-Range",
            format!("bytes {}-{}/{total_size}", range.start, range.end),
        );
        body = body.slice(range.start..=range.end);
    }

    builder = builder.header("Content-Length", body.len());
    if ctx.is_head() {
        body = Bytes::new();
    }

    Ok(builder.body(Full::new(body))?)
}

/// `Content-Disposition` value marking a file as an attachment
///
/// Visible ASCII names (spaces included) are sent as they are; anything else
/// would not survive as a header value and uses the RFC 5987 extended form.
pub fn content_disposition(file_name: &str) -> String {
    let plain = file_name.chars().all(|c| c == ' ' || c.is_ascii_graphic());

    if plain {
        format!("attachment; filename={file_name}")
    } else {
        format!(
            "attachment; filename*=UTF-8''{}",
            utf8_percent_encode(file_name, NON_ALPHANUMERIC)
        )
    }
}
