//! Reporting beacon bookkeeping.
//!
//! # Data Flow
//! ```text
//! POST .../static/seller_result   → tracker.record(Seller)
//! POST .../static/bidding_winner  → tracker.record(Bidding)
//! GET  ...reset-vars...           → tracker.reset()
//! GET  ...get-vars...             → tracker.snapshot() → response headers
//! ```
//!
//! # Design Decisions
//! - Both flags live behind one lock so a snapshot is never torn
//! - State is process-lifetime only; nothing is persisted

pub mod tracker;

pub use tracker::{BeaconKind, BeaconSnapshot, BeaconTracker};
