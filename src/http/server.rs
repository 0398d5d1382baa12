//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router around the dispatch handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve over plain TCP (tests) or TLS (the harness binary)
//! - Drain in-flight requests on shutdown

use axum::{routing::any, Router};
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auction::AuctionProxy;
use crate::beacon::BeaconTracker;
use crate::config::HarnessConfig;
use crate::files::FileServer;
use crate::http::request::{request_span, MakeRequestUuid, X_REQUEST_ID};
use crate::lifecycle::ShutdownSignal;
use crate::routing::{dispatch, RouteTable};

/// Errors raised while building or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to build auction backend client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("invalid bind address {0:?}")]
    BindAddress(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub beacons: Arc<BeaconTracker>,
    pub auction: Arc<AuctionProxy>,
    pub files: Arc<FileServer>,
}

impl AppState {
    pub fn new(config: &HarnessConfig) -> Result<Self, ServerError> {
        let auction = AuctionProxy::new(
            &config.auction,
            Duration::from_secs(config.timeouts.backend_secs),
        )?;

        Ok(Self {
            routes: Arc::new(RouteTable::from_config(config)),
            beacons: Arc::new(BeaconTracker::new()),
            auction: Arc::new(auction),
            files: Arc::new(FileServer::new(PathBuf::from(&config.files.root))),
        })
    }
}

/// HTTP server for the test harness.
pub struct HttpServer {
    router: Router,
    state: AppState,
    config: HarnessConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: HarnessConfig) -> Result<Self, ServerError> {
        let state = AppState::new(&config)?;
        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            state,
            config,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &HarnessConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(dispatch))
            .route("/{*path}", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// The router with middleware, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Shared state, for inspecting beacons and the auction config.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Bind the configured listen address for [`HttpServer::run_tls`].
    pub fn bind(&self) -> Result<std::net::TcpListener, ServerError> {
        let addr: SocketAddr = self
            .config
            .listener
            .bind_address
            .parse()
            .map_err(|_| ServerError::BindAddress(self.config.listener.bind_address.clone()))?;
        let listener = std::net::TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        Ok(listener)
    }

    /// Serve plain HTTP on an already bound listener until shutdown.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on an already bound listener until shutdown.
    ///
    /// In-flight requests get `timeouts.shutdown_grace_secs` to finish.
    pub async fn run_tls(
        self,
        listener: std::net::TcpListener,
        tls: RustlsConfig,
        shutdown: ShutdownSignal,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);

        let handle = axum_server::Handle::new();
        tokio::spawn({
            let handle = handle.clone();
            async move {
                shutdown.recv().await;
                tracing::info!(grace_secs = grace.as_secs(), "Draining connections");
                handle.graceful_shutdown(Some(grace));
            }
        });

        tracing::info!(address = %addr, "HTTPS server starting");

        axum_server::from_tcp_rustls(listener, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}
