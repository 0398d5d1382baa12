//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and URLs parse
//! - Validate value ranges (timeouts > 0, markers non-empty)

use std::net::SocketAddr;

use crate::config::schema::HarnessConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address {0:?}")]
    BindAddress(String),
    #[error("backend url {url:?} is invalid: {reason}")]
    BackendUrl { url: String, reason: String },
    #[error("{field} must start with '/', got {value:?}")]
    RelativePath { field: &'static str, value: String },
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a configuration, collecting every problem rather than stopping at the first.
pub fn validate_config(config: &HarnessConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    match url::Url::parse(&config.auction.backend_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::BackendUrl {
            url: config.auction.backend_url.clone(),
            reason: format!("unsupported scheme {:?}", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::BackendUrl {
            url: config.auction.backend_url.clone(),
            reason: e.to_string(),
        }),
    }

    for (field, value) in [
        ("auction.script_path", &config.auction.script_path),
        ("kv.path", &config.kv.path),
    ] {
        if !value.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                field,
                value: value.clone(),
            });
        }
    }

    for (field, value) in [
        ("files.root", &config.files.root),
        ("auction.seller", &config.auction.seller),
        ("auction.multi_seller_marker", &config.auction.multi_seller_marker),
        ("auction.single_seller_marker", &config.auction.single_seller_marker),
        ("beacons.seller_marker", &config.beacons.seller_marker),
        ("beacons.bidding_marker", &config.beacons.bidding_marker),
        ("beacons.reset_marker", &config.beacons.reset_marker),
        ("beacons.values_marker", &config.beacons.values_marker),
    ] {
        if value.is_empty() {
            errors.push(ValidationError::Empty(field));
        }
    }

    if config.timeouts.backend_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.backend_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
