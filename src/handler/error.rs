//! Error boundary module
//!
//! Converts a failed request into exactly one 500 response. Missing files are
//! not errors here; they are answered with 404 by the handlers themselves.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::http;
use crate::logger;

/// Body sent in production instead of the error description
pub const PRODUCTION_ERROR_BODY: &str = "Error occured.";

/// Unhandled failure while serving a request
#[derive(Debug)]
pub enum ServeError {
    /// Reading a file failed for a reason other than it being absent
    Io { path: PathBuf, source: io::Error },
    /// The response could not be assembled
    Response(hyper::http::Error),
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "I/O error on '{}': {source}", path.display())
            }
            Self::Response(err) => write!(f, "Failed to build response: {err}"),
        }
    }
}

impl Error for ServeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Response(err) => Some(err),
        }
    }
}

impl From<hyper::http::Error> for ServeError {
    fn from(err: hyper::http::Error) -> Self {
        Self::Response(err)
    }
}

/// Turns a [`ServeError`] into the response the client sees
#[derive(Debug, Clone, Copy)]
pub struct ErrorResponder {
    production: bool,
}

impl ErrorResponder {
    pub const fn new(production: bool) -> Self {
        Self { production }
    }

    /// Build the 500 response for a failed request
    ///
    /// `origin` names where the failure happened (usually method and path)
    /// and is only ever shown outside production.
    pub fn respond(&self, error: &ServeError, origin: &str) -> Response<Full<Bytes>> {
        let description = describe(error, origin);
        logger::log_error(&description);

        if self.production {
            return http::build_500_response(PRODUCTION_ERROR_BODY.to_string());
        }
        http::build_500_response(description)
    }
}

/// Full error description: message, cause chain and origin
pub fn describe(error: &dyn Error, origin: &str) -> String {
    let mut description = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        description.push_str(&format!("\n ---> {cause}"));
        source = cause.source();
    }
    description.push_str(&format!("\n   at {origin}"));
    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn io_failure() -> ServeError {
        ServeError::Io {
            path: PathBuf::from("/srv/app/index.html"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        }
    }

    async fn body_of(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_production_hides_details() {
        let resp = ErrorResponder::new(true).respond(&io_failure(), "GET /dashboard");
        assert_eq!(resp.status(), 500);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        assert_eq!(body_of(resp).await, "Error occured.");
    }

    #[tokio::test]
    async fn test_development_shows_details() {
        let resp = ErrorResponder::new(false).respond(&io_failure(), "GET /dashboard");
        assert_eq!(resp.status(), 500);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        let body = body_of(resp).await;
        assert!(body.contains("/srv/app/index.html"), "body: {body}");
        assert!(body.contains("permission denied"), "body: {body}");
        assert!(body.contains("GET /dashboard"), "body: {body}");
    }

    #[test]
    fn test_describe_walks_sources() {
        let description = describe(&io_failure(), "HEAD /");
        let lines: Vec<&str> = description.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("I/O error on '/srv/app/index.html'"));
        assert_eq!(lines[1], " ---> permission denied");
        assert_eq!(lines[2], "   at HEAD /");
    }
}
