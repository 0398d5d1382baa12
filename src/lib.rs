//! Local HTTPS harness for Bidding & Auction ad flows.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser test page
//!     ───────────────▶ net::tls ──▶ http::server ──▶ routing::dispatch
//!                                                        │
//!                  ┌──────────────┬──────────────┬───────┴──────┬─────────────┐
//!                  ▼              ▼              ▼              ▼             ▼
//!               beacon         auction          kv            files       501 page
//!               tracker     (seller mode,    responder    (static root,
//!                           proxy to B&A)                  listings, 304)
//!                                 │
//!                                 ▼
//!                        selectAd backend (HTTP/JSON)
//! ```

pub mod auction;
pub mod beacon;
pub mod config;
pub mod files;
pub mod http;
pub mod kv;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::schema::HarnessConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
