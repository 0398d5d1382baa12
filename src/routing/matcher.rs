//! Request classification.
//!
//! # Responsibilities
//! - Map `(method, target)` onto the handler that owns it
//! - Beacon and admin markers match anywhere in the raw target
//! - Proxy and key/value paths match the parsed path exactly
//!
//! # Design Decisions
//! - Guards are evaluated in a fixed priority order; first match wins
//! - Substring markers are kept because the auction pages build beacon
//!   URLs with arbitrary prefixes and query strings
//! - No regex to guarantee O(n) matching

use axum::http::{Method, Uri};

use crate::config::{BeaconConfig, HarnessConfig};

/// The handler a request is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// POST carrying the seller's `reportResult` beacon.
    SellerBeacon,
    /// POST carrying the winning buyer's `reportWin` beacon.
    BiddingBeacon,
    /// Any other POST; acknowledged without side effects.
    AcknowledgePost,
    ResetBeacons,
    BeaconValues,
    KvLookup,
    FakeAdServer,
    StaticFile,
    /// Methods other than GET, HEAD and POST.
    Unsupported,
}

impl Route {
    /// Routes that take part in page navigation and so may switch seller mode.
    pub fn is_navigation(self) -> bool {
        matches!(self, Route::KvLookup | Route::FakeAdServer | Route::StaticFile)
    }
}

/// Compiled routing rules.
#[derive(Debug, Clone)]
pub struct RouteTable {
    beacons: BeaconConfig,
    script_path: String,
    kv_path: Option<String>,
}

impl RouteTable {
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            beacons: config.beacons.clone(),
            script_path: config.auction.script_path.clone(),
            kv_path: config.kv.enabled.then(|| config.kv.path.clone()),
        }
    }

    pub fn classify(&self, method: &Method, uri: &Uri) -> Route {
        let target = raw_target(uri);

        if method == Method::POST {
            return if target.contains(&self.beacons.seller_marker) {
                Route::SellerBeacon
            } else if target.contains(&self.beacons.bidding_marker) {
                Route::BiddingBeacon
            } else {
                Route::AcknowledgePost
            };
        }

        if method != Method::GET && method != Method::HEAD {
            return Route::Unsupported;
        }

        if target.contains(&self.beacons.reset_marker) {
            Route::ResetBeacons
        } else if target.contains(&self.beacons.values_marker) {
            Route::BeaconValues
        } else if self.kv_path.as_deref() == Some(uri.path()) {
            Route::KvLookup
        } else if uri.path() == self.script_path {
            Route::FakeAdServer
        } else {
            Route::StaticFile
        }
    }
}

/// Path plus query, as it appeared on the request line.
pub fn raw_target(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
}
