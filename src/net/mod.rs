//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection (axum-server)
//!     → tls.rs (TLS 1.3 handshake, ALPN h2/http1.1)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - TLS 1.2 and below are refused; the browser under test always speaks 1.3
//! - Certificate problems are fatal at startup, never at first handshake

pub mod tls;

pub use tls::{load_tls_config, TlsError};
