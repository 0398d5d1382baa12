//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use ba_local_server::{HarnessConfig, HttpServer, Shutdown};
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// One request received by the mock selectAd backend.
#[derive(Debug, Clone)]
pub struct Captured {
    pub client_ip: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct BackendState {
    status: StatusCode,
    body: &'static str,
    requests: Arc<Mutex<Vec<Captured>>>,
}

/// Handle to a running mock backend.
#[derive(Clone)]
pub struct MockBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Captured>>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn url(&self) -> String {
        format!("http://{}/v1/selectAd", self.addr)
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }
}

async fn select_ad(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, &'static str) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    state.requests.lock().unwrap().push(Captured {
        client_ip: header("x-bna-client-ip"),
        content_type: header("content-type"),
        body,
    });
    (state.status, state.body)
}

/// Start a programmable selectAd backend on an ephemeral port.
///
/// Every request is captured and answered with `status` and `body`.
#[allow(dead_code)]
pub async fn start_programmable_backend(status: u16, body: &'static str) -> MockBackend {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = BackendState {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        requests: requests.clone(),
    };
    let app = Router::new()
        .route("/v1/selectAd", post(select_ad))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockBackend { addr, requests }
}

/// A harness server on an ephemeral port, serving a temporary document root.
pub struct Harness {
    pub addr: SocketAddr,
    pub root: TempDir,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl Harness {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the harness over plain HTTP after applying `configure`.
pub async fn start_harness(configure: impl FnOnce(&mut HarnessConfig)) -> Harness {
    let root = tempfile::tempdir().unwrap();
    let mut config = HarnessConfig::default();
    config.files.root = root.path().to_string_lossy().into_owned();
    configure(&mut config);

    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    Harness {
        addr,
        root,
        shutdown,
    }
}

/// Client that never follows redirects and ignores proxy environment variables.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
