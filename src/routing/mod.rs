//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, target)
//!     → matcher.rs (classify into a Route, priority ordered)
//!     → router.rs (seller mode switch on navigation, dispatch)
//!     → beacon / auction / kv / files
//!
//! Route Compilation (at startup):
//!     HarnessConfig markers and paths
//!     → RouteTable (immutable, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins

pub mod matcher;
pub mod router;

pub use matcher::{Route, RouteTable};
pub use router::dispatch;
