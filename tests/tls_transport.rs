//! HTTPS transport: TLS 1.3 only, serving the document root.

use std::io::Write;
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use ba_local_server::net::load_tls_config;
use ba_local_server::{HarnessConfig, HttpServer, Shutdown};
use rustls::pki_types::{CertificateDer, ServerName};
use tempfile::TempDir;

struct TlsHarness {
    addr: SocketAddr,
    cert_pem: String,
    cert_der: CertificateDer<'static>,
    shutdown: Shutdown,
    server: tokio::task::JoinHandle<()>,
    _root: TempDir,
}

async fn start_tls_harness() -> TlsHarness {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("page.html"), "<p>secure</p>").unwrap();

    let certified = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let cert_pem = certified.cert.pem();
    let cert_path = root.path().join("cert.pem");
    let key_path = root.path().join("key.pem");
    std::fs::write(&cert_path, &cert_pem).unwrap();
    std::fs::write(&key_path, certified.key_pair.serialize_pem()).unwrap();
    let tls = load_tls_config(&cert_path, &key_path).unwrap();

    let mut config = HarnessConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.files.root = root.path().to_string_lossy().into_owned();
    config.timeouts.shutdown_grace_secs = 1;

    let server = HttpServer::new(config).unwrap();
    let listener = server.bind().unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    let server = tokio::spawn(async move {
        server.run_tls(listener, tls, signal).await.unwrap();
    });

    TlsHarness {
        addr,
        cert_pem,
        cert_der: certified.cert.der().clone(),
        shutdown,
        server,
        _root: root,
    }
}

/// Drive a raw rustls handshake restricted to `version`.
fn handshake(
    addr: SocketAddr,
    cert: CertificateDer<'static>,
    version: &'static rustls::SupportedProtocolVersion,
) -> Result<Option<rustls::ProtocolVersion>, std::io::Error> {
    let mut roots = rustls::RootCertStore::empty();
    roots.add(cert).unwrap();
    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    let config = rustls::ClientConfig::builder_with_provider(provider)
        .with_protocol_versions(&[version])
        .unwrap()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let name = ServerName::try_from("localhost").unwrap();
    let mut conn = rustls::ClientConnection::new(Arc::new(config), name).unwrap();
    let mut sock = TcpStream::connect(addr)?;
    sock.set_read_timeout(Some(Duration::from_secs(5)))?;

    while conn.is_handshaking() {
        conn.complete_io(&mut sock)?;
    }
    let version = conn.protocol_version();
    conn.send_close_notify();
    let _ = conn.complete_io(&mut sock);
    let _ = sock.flush();
    Ok(version)
}

#[tokio::test]
async fn serves_static_file_over_tls() {
    let harness = start_tls_harness().await;

    let client = reqwest::Client::builder()
        .add_root_certificate(reqwest::Certificate::from_pem(harness.cert_pem.as_bytes()).unwrap())
        .resolve("localhost", harness.addr)
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("https://localhost:{}/page.html", harness.addr.port()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(res.headers()["supports-loading-mode"], "fenced-frame");
    assert_eq!(res.text().await.unwrap(), "<p>secure</p>");
    drop(client);

    harness.shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(10), harness.server)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn negotiates_tls13_and_refuses_tls12() {
    let harness = start_tls_harness().await;
    let addr = harness.addr;

    let cert = harness.cert_der.clone();
    let version = tokio::task::spawn_blocking(move || handshake(addr, cert, &rustls::version::TLS13))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(version, Some(rustls::ProtocolVersion::TLSv1_3));

    let cert = harness.cert_der.clone();
    let result = tokio::task::spawn_blocking(move || handshake(addr, cert, &rustls::version::TLS12))
        .await
        .unwrap();
    assert!(result.is_err(), "TLS 1.2 handshake unexpectedly succeeded");

    harness.shutdown.trigger();
}
