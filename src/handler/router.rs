//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. The pipeline runs in a fixed
//! order: method check, path decoding, base path strip, static mounts (first
//! match wins), application fallback. Failures are caught once, in
//! `handle_request`.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderMap, HeaderValue, SERVER};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::error::{ErrorResponder, ServeError};
use super::spa;
use super::static_files::{decode_request_path, strip_url_prefix};
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Request data the handlers need, detached from the hyper body
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub range: Option<String>,
}

impl RequestContext {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            if_none_match: None,
            if_modified_since: None,
            range: None,
        }
    }

    pub fn from_request<B>(req: &Request<B>) -> Self {
        let headers = req.headers();
        Self {
            method: req.method().clone(),
            path: req.uri().path().to_string(),
            if_none_match: header_string(headers, "if-none-match"),
            if_modified_since: header_string(headers, "if-modified-since"),
            range: header_string(headers, "range"),
        }
    }

    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }

    /// Where a failure happened, shown in development error pages
    pub fn origin(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Main entry point for HTTP request handling
///
/// Never fails: every error has been turned into a response by the time
/// this returns.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let ctx = RequestContext::from_request(&req);

    let mut response = match respond(&ctx, &state).await {
        Ok(response) => response,
        Err(err) => ErrorResponder::new(state.production).respond(&err, &ctx.origin()),
    };

    if let Ok(value) = HeaderValue::from_str(&state.server_name) {
        response.headers_mut().insert(SERVER, value);
    }

    if state.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            req.method().to_string(),
            req.uri().path().to_string(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = http_version(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.referer = header_string(req.headers(), "referer");
        entry.user_agent = header_string(req.headers(), "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.access_log_format);
    }

    Ok(response)
}

/// Run the pipeline for one request
///
/// Missing files come back as `Ok` 404 responses; only unexpected failures
/// are returned as errors.
pub async fn respond(
    ctx: &RequestContext,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, ServeError> {
    match ctx.method {
        Method::GET | Method::HEAD => {}
        Method::OPTIONS => return Ok(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {}", ctx.method));
            return Ok(http::build_405_response());
        }
    }

    let Some(decoded) = decode_request_path(&ctx.path) else {
        logger::log_warning(&format!("Rejected undecodable request path: {}", ctx.path));
        return Ok(http::build_400_response());
    };
    let decoded: &str = &decoded;
    let options = &state.options;

    // Requests outside the base path are served as they are
    let path = strip_url_prefix(decoded, &options.url_base_path).unwrap_or(decoded);

    if let Some((mount, remainder)) = state.mounts.match_mount(path) {
        return mount.serve(ctx, remainder, options).await;
    }

    spa::serve(ctx, options, path).await
}

fn http_version(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
