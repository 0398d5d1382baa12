//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the harness
//! server. All types derive Serde traits for deserialization from config files,
//! and every section carries defaults matching the local test setup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Seller and buyer origin used by the local auction pages.
pub const DEFAULT_AUCTION_ORIGIN: &str = "https://bidding-auction-server.example.com";

/// Root configuration for the harness server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HarnessConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Static file serving.
    pub files: FilesConfig,

    /// Fake ad server proxy and the auction config it forwards.
    pub auction: AuctionSettings,

    /// Reporting beacon path markers.
    pub beacons: BeaconConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Key/value responder.
    pub kv: KvConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:50071").
    pub bind_address: String,

    /// TLS certificate and key. Required by the `local-server` binary.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:50071".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Static file serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Document root. Relative paths resolve against the working directory.
    pub root: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
        }
    }
}

/// Fake ad server proxy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuctionSettings {
    /// Request path intercepted by the proxy (exact path match).
    pub script_path: String,

    /// SelectAd endpoint of the auction service.
    pub backend_url: String,

    /// Value sent in the `X-BnA-Client-IP` header.
    pub client_ip: String,

    /// `clientType` discriminant sent in the envelope.
    pub client_type: u8,

    /// Seller origin; also used as the top-level seller in multi-seller mode.
    pub seller: String,

    /// Buyer origins in the auction.
    pub buyers: Vec<String>,

    /// Serialized seller signals.
    pub seller_signals: String,

    /// Serialized auction signals.
    pub auction_signals: String,

    /// Serialized per-buyer signals, keyed by buyer origin.
    /// Buyers without an entry get `default_buyer_signals`.
    pub per_buyer_signals: BTreeMap<String, String>,

    /// Buyer signals used when `per_buyer_signals` has no entry.
    pub default_buyer_signals: String,

    /// Substring of a page path that switches to multi-seller mode.
    pub multi_seller_marker: String,

    /// Substring of a page path that switches to single-seller mode.
    pub single_seller_marker: String,
}

impl Default for AuctionSettings {
    fn default() -> Self {
        Self {
            script_path: "/cgi-bin/fake_ad_server.py".to_string(),
            backend_url: "http://localhost:51052/v1/selectAd".to_string(),
            client_ip: "192.168.1.100".to_string(),
            client_type: 2,
            seller: DEFAULT_AUCTION_ORIGIN.to_string(),
            buyers: vec![DEFAULT_AUCTION_ORIGIN.to_string()],
            seller_signals: "{}".to_string(),
            auction_signals: "{}".to_string(),
            per_buyer_signals: BTreeMap::new(),
            default_buyer_signals: "\"foo\"".to_string(),
            multi_seller_marker: "ba-multiseller.html".to_string(),
            single_seller_marker: "ba.html".to_string(),
        }
    }
}

/// Reporting beacon path markers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BeaconConfig {
    /// POST path substring reported by the seller's decision logic.
    pub seller_marker: String,

    /// POST path substring reported by the buyer's bidding logic.
    pub bidding_marker: String,

    /// GET path substring that clears both flags.
    pub reset_marker: String,

    /// GET path substring that reports both flags as headers.
    pub values_marker: String,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            seller_marker: "/static/seller_result".to_string(),
            bidding_marker: "/static/bidding_winner".to_string(),
            reset_marker: "reset-vars".to_string(),
            values_marker: "get-vars".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Auction backend round trip timeout in seconds.
    pub backend_secs: u64,

    /// Request timeout (time until response headers) in seconds.
    pub request_secs: u64,

    /// Grace period for in-flight requests on shutdown, in seconds.
    pub shutdown_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            backend_secs: 30,
            request_secs: 60,
            shutdown_grace_secs: 5,
        }
    }
}

/// Key/value responder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KvConfig {
    /// Answer key/value lookups instead of serving the script as a file.
    pub enabled: bool,

    /// Request path of the responder (exact path match).
    pub path: String,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "/cgi-bin/kv-cgi.py".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    /// `RUST_LOG` takes precedence when set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "ba_local_server=info,tower_http=info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_uses_defaults() {
        let config: HarnessConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:50071");
        assert_eq!(config.auction.client_type, 2);
        assert_eq!(config.auction.backend_url, "http://localhost:51052/v1/selectAd");
        assert_eq!(config.beacons.values_marker, "get-vars");
        assert!(!config.kv.enabled);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: HarnessConfig = toml::from_str(
            r#"
            [files]
            root = "/srv/static"

            [auction]
            backend_url = "http://127.0.0.1:9000/v1/selectAd"

            [listener.tls]
            cert_path = "cert.pem"
            key_path = "key.pem"
            "#,
        )
        .unwrap();

        assert_eq!(config.files.root, "/srv/static");
        assert_eq!(config.auction.backend_url, "http://127.0.0.1:9000/v1/selectAd");
        assert_eq!(config.auction.script_path, "/cgi-bin/fake_ad_server.py");
        assert_eq!(config.listener.tls.unwrap().key_path, "key.pem");
    }
}
