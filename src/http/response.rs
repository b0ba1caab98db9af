//! HTTP response building module
//!
//! Builders for the fixed status responses, decoupled from file serving.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::cache::CacheHeaders;

/// Build 304 Not Modified response
///
/// Revalidated responses carry the same cache headers as a full one.
pub fn build_304_response(etag: &str, cache: &CacheHeaders) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", &cache.cache_control)
        .header("Expires", &cache.expires)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 400 Bad Request response
pub fn build_400_response() -> Response<Full<Bytes>> {
    text_response(400, "400 Bad Request")
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    text_response(404, "404 Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 416 Range Not Satisfiable response
pub fn build_416_response(file_size: usize) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::from("Range Not Satisfiable")))
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(Full::new(Bytes::from("Range Not Satisfiable")))
        })
}

/// Build 500 Internal Server Error response with a plain text body
pub fn build_500_response(body: String) -> Response<Full<Bytes>> {
    text_response(500, body)
}

/// Plain text response with the given status
fn text_response(status: u16, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    let body = body.into();
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            let mut resp = Response::new(Full::new(body));
            *resp.status_mut() =
                hyper::StatusCode::from_u16(status).unwrap_or(hyper::StatusCode::INTERNAL_SERVER_ERROR);
            resp
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_400() {
        let resp = build_400_response();
        assert_eq!(resp.status(), 400);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
    }

    #[test]
    fn test_404() {
        let resp = build_404_response();
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
    }

    #[test]
    fn test_405_lists_allowed_methods() {
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["Allow"], "GET, HEAD, OPTIONS");
    }

    #[test]
    fn test_304_keeps_cache_headers() {
        let cache = CacheHeaders {
            cache_control: "no-cache".to_string(),
            expires: "Thu, 01 Jan 1970 00:00:01 GMT".to_string(),
        };
        let resp = build_304_response("\"abc\"", &cache);
        assert_eq!(resp.status(), 304);
        assert_eq!(resp.headers()["ETag"], "\"abc\"");
        assert_eq!(resp.headers()["Cache-Control"], "no-cache");
        assert_eq!(resp.headers()["Expires"], "Thu, 01 Jan 1970 00:00:01 GMT");
    }

    #[test]
    fn test_416() {
        let resp = build_416_response(42);
        assert_eq!(resp.status(), 416);
        assert_eq!(resp.headers()["Content-Range"], "bytes */42");
    }

    #[test]
    fn test_500() {
        let resp = build_500_response("Error occured.".to_string());
        assert_eq!(resp.status(), 500);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
    }
}
