//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → http::request (request spans with correlation IDs)
//!
//! Consumers:
//!     → stdout (fmt layer)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through all request-scoped events
//! - `RUST_LOG` overrides the configured level

pub mod logging;

pub use logging::init_logging;
