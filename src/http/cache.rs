//! HTTP cache control module
//!
//! Computes the `Cache-Control`/`Expires` pair for served files and handles
//! conditional requests (`ETag`, `Last-Modified`).

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::config::ServerOptions;

/// `Expires` value sent with the entry document
pub const EXPIRED_TIMESTAMP: &str = "Thu, 01 Jan 1970 00:00:01 GMT";

/// Cache control policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Public cache with specified max-age (seconds)
    Public(u64),
    /// Always revalidate
    NoCache,
}

impl CachePolicy {
    /// Convert to Cache-Control header value
    pub fn to_header_value(self) -> String {
        match self {
            Self::Public(max_age) => format!("public, max-age={max_age}"),
            Self::NoCache => "no-cache".to_string(),
        }
    }
}

/// Finished cache header set, applied to a response in one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheHeaders {
    pub cache_control: String,
    pub expires: String,
}

/// Cache headers for a served file, using the current time
pub fn headers_for(served_file_name: &str, options: &ServerOptions) -> CacheHeaders {
    headers_for_at(served_file_name, options, Utc::now())
}

/// Cache headers for a served file at a given instant
///
/// The entry document is never cached so that a new deployment is picked up
/// on the next load; every other file is cached for the configured duration.
pub fn headers_for_at(
    served_file_name: &str,
    options: &ServerOptions,
    now: DateTime<Utc>,
) -> CacheHeaders {
    if served_file_name == options.default_page_name() {
        return CacheHeaders {
            cache_control: CachePolicy::NoCache.to_header_value(),
            expires: EXPIRED_TIMESTAMP.to_string(),
        };
    }

    let minutes = options.cache_duration_minutes;
    let expires = i64::try_from(minutes)
        .ok()
        .and_then(TimeDelta::try_minutes)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    CacheHeaders {
        cache_control: CachePolicy::Public(minutes.saturating_mul(60)).to_header_value(),
        expires: format_http_date(expires),
    }
}

/// Format a timestamp as an RFC 1123 HTTP date
pub fn format_http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP date header value
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Generate `ETag` using fast hashing
///
/// Returns a quoted `ETag` string, e.g., `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports a single `ETag`, a comma separated list and the `*` wildcard.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .map(|e| e.trim().trim_start_matches("W/"))
            .any(|e| e == etag || e == "*")
    })
}

/// Decide whether a conditional request can be answered with 304
///
/// `If-None-Match` takes precedence; `If-Modified-Since` is only consulted
/// when it is absent.
pub fn is_not_modified(
    if_none_match: Option<&str>,
    if_modified_since: Option<&str>,
    etag: &str,
    last_modified: Option<DateTime<Utc>>,
) -> bool {
    if if_none_match.is_some() {
        return check_etag_match(if_none_match, etag);
    }

    match (if_modified_since.and_then(parse_http_date), last_modified) {
        (Some(since), Some(modified)) => modified.timestamp() <= since.timestamp(),
        _ => false,
    }
}
