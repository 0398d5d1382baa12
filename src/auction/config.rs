//! The auction config forwarded to the auction service, and the seller-mode
//! switch driven by page navigation.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::config::AuctionSettings;

/// Auction config as the SelectAd endpoint expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionConfig {
    pub seller_signals: String,
    pub auction_signals: String,
    pub buyer_list: Vec<String>,
    pub seller: String,
    #[serde(rename = "perBuyerConfig")]
    pub per_buyer_config: BTreeMap<String, PerBuyerConfig>,
    #[serde(rename = "codeExperimentSpec")]
    pub code_experiment_spec: serde_json::Map<String, serde_json::Value>,
    /// Present only for multi-seller (component) auctions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_level_seller: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerBuyerConfig {
    pub buyer_signals: String,
}

impl AuctionConfig {
    /// Single-seller config built from the static settings.
    pub fn from_settings(settings: &AuctionSettings) -> Self {
        let per_buyer_config = settings
            .buyers
            .iter()
            .map(|buyer| {
                let buyer_signals = settings
                    .per_buyer_signals
                    .get(buyer)
                    .unwrap_or(&settings.default_buyer_signals)
                    .clone();
                (buyer.clone(), PerBuyerConfig { buyer_signals })
            })
            .collect();

        Self {
            seller_signals: settings.seller_signals.clone(),
            auction_signals: settings.auction_signals.clone(),
            buyer_list: settings.buyers.clone(),
            seller: settings.seller.clone(),
            per_buyer_config,
            code_experiment_spec: serde_json::Map::new(),
            top_level_seller: None,
        }
    }
}

/// Which auction shape the next proxied request will use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellerMode {
    Single,
    Multi,
}

/// The process-wide auction config.
///
/// Its shape is switched by whichever auction page was requested most
/// recently, across all connections. Proxied requests only ever see a
/// snapshot of it.
#[derive(Debug)]
pub struct SharedAuctionConfig {
    config: Mutex<AuctionConfig>,
    top_level_seller: String,
    multi_seller_marker: String,
    single_seller_marker: String,
}

impl SharedAuctionConfig {
    pub fn new(settings: &AuctionSettings) -> Self {
        Self {
            config: Mutex::new(AuctionConfig::from_settings(settings)),
            top_level_seller: settings.seller.clone(),
            multi_seller_marker: settings.multi_seller_marker.clone(),
            single_seller_marker: settings.single_seller_marker.clone(),
        }
    }

    /// Switch seller mode if the request target names one of the auction pages.
    ///
    /// The multi-seller marker is checked first. Targets naming neither page
    /// leave the config untouched and return `None`.
    pub fn apply_seller_mode_from_path(&self, target: &str) -> Option<SellerMode> {
        let mode = if target.contains(&self.multi_seller_marker) {
            SellerMode::Multi
        } else if target.contains(&self.single_seller_marker) {
            SellerMode::Single
        } else {
            return None;
        };

        let mut config = self.lock();
        config.top_level_seller = match mode {
            SellerMode::Multi => Some(self.top_level_seller.clone()),
            SellerMode::Single => None,
        };
        tracing::debug!(?mode, path = target, "Seller mode applied");
        Some(mode)
    }

    pub fn snapshot(&self) -> AuctionConfig {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, AuctionConfig> {
        self.config.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_config_serializes_like_the_service_expects() {
        let config = AuctionConfig::from_settings(&AuctionSettings::default());
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "seller_signals": "{}",
                "auction_signals": "{}",
                "buyer_list": ["https://bidding-auction-server.example.com"],
                "seller": "https://bidding-auction-server.example.com",
                "perBuyerConfig": {
                    "https://bidding-auction-server.example.com": {"buyerSignals": "\"foo\""}
                },
                "codeExperimentSpec": {}
            })
        );
    }

    #[test]
    fn per_buyer_signals_override_default() {
        let mut settings = AuctionSettings::default();
        settings.buyers.push("https://dsp.example".into());
        settings
            .per_buyer_signals
            .insert("https://dsp.example".into(), "[1,2]".into());

        let config = AuctionConfig::from_settings(&settings);
        assert_eq!(config.per_buyer_config["https://dsp.example"].buyer_signals, "[1,2]");
        assert_eq!(
            config.per_buyer_config["https://bidding-auction-server.example.com"].buyer_signals,
            "\"foo\""
        );
    }

    #[test]
    fn multi_seller_page_adds_top_level_seller() {
        let shared = SharedAuctionConfig::new(&AuctionSettings::default());
        assert_eq!(
            shared.apply_seller_mode_from_path("/static/ba-multiseller.html"),
            Some(SellerMode::Multi)
        );
        assert_eq!(
            shared.snapshot().top_level_seller.as_deref(),
            Some("https://bidding-auction-server.example.com")
        );
        let value = serde_json::to_value(shared.snapshot()).unwrap();
        assert_eq!(value["top_level_seller"], "https://bidding-auction-server.example.com");
    }

    #[test]
    fn single_seller_page_removes_top_level_seller() {
        let shared = SharedAuctionConfig::new(&AuctionSettings::default());
        shared.apply_seller_mode_from_path("/static/ba-multiseller.html");

        assert_eq!(shared.apply_seller_mode_from_path("/static/ba.html?ig=10"), Some(SellerMode::Single));
        assert_eq!(shared.snapshot().top_level_seller, None);
        let value = serde_json::to_value(shared.snapshot()).unwrap();
        assert!(value.get("top_level_seller").is_none());
    }

    #[test]
    fn unrelated_paths_leave_config_alone() {
        let shared = SharedAuctionConfig::new(&AuctionSettings::default());
        shared.apply_seller_mode_from_path("/static/ba-multiseller.html");

        assert_eq!(shared.apply_seller_mode_from_path("/static/js/decision-logic.js"), None);
        assert!(shared.snapshot().top_level_seller.is_some());
    }
}
