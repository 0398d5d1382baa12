//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware, serve loop)
//!     → request.rs (request ID, request span)
//!     → routing::dispatch (beacons / proxy / kv / files)
//!     → response.rs (auction headers, error pages)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
