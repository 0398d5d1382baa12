//! Request dispatch.
//!
//! # Responsibilities
//! - Classify each request via the route table
//! - Apply beacon bookkeeping for POST and admin paths
//! - Switch seller mode on page navigation before serving
//! - Hand off to the proxy, key/value responder or file server
//!
//! # Design Decisions
//! - One handler with guard clauses; static files are the fallback
//! - Holds no per-connection state; all shared state lives in AppState

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::beacon::BeaconKind;
use crate::http::response::{
    bool_header, empty_ok, error_page, BIDDING_WINNER_REPORTED, BOTH_AD_BEACONS_REPORTED,
    SELLER_RESULT_REPORTED,
};
use crate::http::server::AppState;
use crate::kv;
use crate::routing::matcher::{raw_target, Route};

/// Entry point for every request.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let route = state.routes.classify(&method, &uri);

    tracing::debug!(method = %method, path = raw_target(&uri), ?route, "Dispatching");

    if route.is_navigation() {
        state
            .auction
            .config()
            .apply_seller_mode_from_path(raw_target(&uri));
    }

    match route {
        Route::SellerBeacon => {
            state.beacons.record(BeaconKind::Seller);
            empty_ok()
        }
        Route::BiddingBeacon => {
            state.beacons.record(BeaconKind::Bidding);
            empty_ok()
        }
        Route::AcknowledgePost => empty_ok(),
        Route::ResetBeacons => {
            state.beacons.reset();
            empty_ok()
        }
        Route::BeaconValues => {
            let snapshot = state.beacons.snapshot();
            let mut response = empty_ok();
            let response_headers = response.headers_mut();
            response_headers.insert(SELLER_RESULT_REPORTED, bool_header(snapshot.seller_reported));
            response_headers.insert(BIDDING_WINNER_REPORTED, bool_header(snapshot.bidding_reported));
            response_headers.insert(BOTH_AD_BEACONS_REPORTED, bool_header(snapshot.both));
            response
        }
        Route::KvLookup => kv::respond(uri.query()),
        Route::FakeAdServer => match state.auction.select_ad(uri.query()).await {
            Ok(response) => response,
            Err(e) => e.into_response(),
        },
        Route::StaticFile => state.files.serve(&method, &uri, &headers).await,
        Route::Unsupported => error_page(
            &method,
            StatusCode::NOT_IMPLEMENTED,
            &format!("Unsupported method ({:?})", method.as_str()),
        ),
    }
}
