//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the TLS certificate and key
//! - Build the HTTP server from validated configuration
//! - Wire OS signals to the shutdown coordinator
//! - Bind the HTTPS listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listeners start last (traffic only when ready)

use std::path::Path;

use crate::config::HarnessConfig;
use crate::http::{HttpServer, ServerError};
use crate::lifecycle::{signals, Shutdown};
use crate::net::tls::{load_tls_config, TlsError};

/// Fatal errors while starting or running the harness.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("TLS certificate and key are required")]
    MissingTls,
    #[error(transparent)]
    Tls(#[from] TlsError),
    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Run the HTTPS harness until a shutdown signal arrives.
pub async fn start(config: HarnessConfig) -> Result<(), StartupError> {
    let tls = match &config.listener.tls {
        Some(tls) => load_tls_config(Path::new(&tls.cert_path), Path::new(&tls.key_path))?,
        None => return Err(StartupError::MissingTls),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        root = %config.files.root,
        backend_url = %config.auction.backend_url,
        kv_enabled = config.kv.enabled,
        "Configuration loaded"
    );

    let server = HttpServer::new(config)?;
    let listener = server.bind()?;

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run_tls(listener, tls, signal).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TlsConfig;

    #[tokio::test]
    async fn tls_is_required() {
        let err = start(HarnessConfig::default()).await.unwrap_err();
        assert!(matches!(err, StartupError::MissingTls));
    }

    #[tokio::test]
    async fn missing_certificate_fails_before_binding() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = HarnessConfig::default();
        config.listener.tls = Some(TlsConfig {
            cert_path: dir.path().join("cert.pem").to_string_lossy().into_owned(),
            key_path: dir.path().join("key.pem").to_string_lossy().into_owned(),
        });

        let err = start(config).await.unwrap_err();
        assert!(matches!(err, StartupError::Tls(TlsError::Read { .. })));
    }
}
