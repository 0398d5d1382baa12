//! Response building shared by the handlers.
//!
//! # Responsibilities
//! - Name the non-standard headers the auction pages rely on
//! - Build the empty acknowledgements used by the beacon endpoints
//! - Render conventional HTML error pages for 404/501
//!
//! # Design Decisions
//! - Header values are static strings, so building responses cannot fail
//! - Error pages match what a plain static file server would emit

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};

pub const SUPPORTS_LOADING_MODE: HeaderName = HeaderName::from_static("supports-loading-mode");
pub const AD_AUCTION_ALLOWED: HeaderName = HeaderName::from_static("ad-auction-allowed");
pub const AD_AUCTION_RESULT: HeaderName = HeaderName::from_static("ad-auction-result");
pub const X_ALLOW_FLEDGE: HeaderName = HeaderName::from_static("x-allow-fledge");
pub const SELLER_RESULT_REPORTED: HeaderName = HeaderName::from_static("seller-result-reported");
pub const BIDDING_WINNER_REPORTED: HeaderName = HeaderName::from_static("bidding-winner-reported");
pub const BOTH_AD_BEACONS_REPORTED: HeaderName =
    HeaderName::from_static("both-ad-beacons-reported");

pub const FENCED_FRAME: HeaderValue = HeaderValue::from_static("fenced-frame");
pub const TRUE: HeaderValue = HeaderValue::from_static("true");
pub const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");
pub const TEXT_HTML: HeaderValue = HeaderValue::from_static("text/html; charset=utf-8");

/// `True`/`False`, the way the beacon query endpoint spells booleans.
pub fn bool_header(value: bool) -> HeaderValue {
    if value {
        HeaderValue::from_static("True")
    } else {
        HeaderValue::from_static("False")
    }
}

/// 200 with no headers beyond the defaults and an empty body.
pub fn empty_ok() -> Response {
    StatusCode::OK.into_response()
}

/// HTML error page. HEAD requests get the headers only.
pub fn error_page(method: &Method, status: StatusCode, message: &str) -> Response {
    let explain = status.canonical_reason().unwrap_or("Error");
    let code = status.as_u16();
    let page = format!(
        "<!DOCTYPE HTML>\n\
         <html lang=\"en\">\n\
         \x20   <head>\n\
         \x20       <meta charset=\"utf-8\">\n\
         \x20       <title>Error response</title>\n\
         \x20   </head>\n\
         \x20   <body>\n\
         \x20       <h1>Error response</h1>\n\
         \x20       <p>Error code: {code}</p>\n\
         \x20       <p>Message: {message}.</p>\n\
         \x20       <p>Error code explanation: {code} - {explain}.</p>\n\
         \x20   </body>\n\
         </html>\n"
    );

    let length = page.len();
    let body = if method == Method::HEAD {
        Body::empty()
    } else {
        Body::from(page)
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, TEXT_HTML);
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    response
}
