#![allow(dead_code)]

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use spa_server::config::{AppState, Config, StaticMountOptions};
use spa_server::handler::{self, RequestContext};
use spa_server::startup;

pub const INDEX_HTML: &str = "<!DOCTYPE html><html><body><div id=\"app\"></div></body></html>";

/// Defaults with the content root pointed at `root`, application in `root/wwwroot`
pub fn config_for(root: &Path) -> Config {
    let mut cfg = Config::load_from("tests/fixtures/no-such-config").unwrap();
    cfg.server.content_root = Some(root.to_string_lossy().into_owned());
    cfg.logging.access_log = false;
    cfg
}

pub fn mount(request_path: &str, root_path: &str, download: bool) -> StaticMountOptions {
    StaticMountOptions {
        root_path: root_path.to_string(),
        request_path: request_path.to_string(),
        download,
    }
}

/// Create `root/wwwroot` with an entry document and return its path
pub fn write_app(root: &Path) -> std::path::PathBuf {
    let app = root.join("wwwroot");
    std::fs::create_dir_all(&app).unwrap();
    std::fs::write(app.join("index.html"), INDEX_HTML).unwrap();
    app
}

pub fn state(cfg: &Config) -> AppState {
    let content_root = cfg.content_root().unwrap();
    startup::prepare(cfg, &content_root).unwrap()
}

pub async fn get(state: &AppState, path: &str) -> Response<Full<Bytes>> {
    send(state, RequestContext::new(Method::GET, path)).await
}

pub async fn send(state: &AppState, ctx: RequestContext) -> Response<Full<Bytes>> {
    handler::respond(&ctx, state).await.unwrap()
}

/// Go through the full entry point, error boundary included
pub async fn handle(state: Arc<AppState>, method: Method, path: &str) -> Response<Full<Bytes>> {
    let req = Request::builder().method(method).uri(path).body(()).unwrap();
    let peer: SocketAddr = "127.0.0.1:50000".parse().unwrap();
    handler::handle_request(req, state, peer).await.unwrap()
}

pub async fn body_bytes(resp: Response<Full<Bytes>>) -> Vec<u8> {
    resp.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_string(resp: Response<Full<Bytes>>) -> String {
    String::from_utf8(body_bytes(resp).await).unwrap()
}

pub fn header<'a>(resp: &'a Response<Full<Bytes>>, name: &str) -> Option<&'a str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}
