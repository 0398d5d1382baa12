//! Fake ad server proxy subsystem.
//!
//! # Data Flow
//! ```text
//! GET/HEAD page navigation (any path)
//!     → config.rs apply_seller_mode_from_path (set/remove top_level_seller)
//!
//! GET /cgi-bin/fake_ad_server.py?data=<base64>
//!     → proxy.rs (data param → SelectAdRequest { ciphertext, config snapshot, clientType })
//!     → POST auction service /v1/selectAd
//!     → digest.rs (base64 decode auctionResultCiphertext → SHA-256 → base64url)
//!     → 200 Ad-Auction-Result + backend body passed through
//! ```
//!
//! # Design Decisions
//! - The config is mutated by page navigation, not by the proxy; the proxy
//!   only snapshots it
//! - No retries and no fallback: a broken backend fails the request

pub mod config;
pub mod digest;
pub mod proxy;

pub use config::{AuctionConfig, PerBuyerConfig, SellerMode, SharedAuctionConfig};
pub use digest::auction_result_token;
pub use proxy::{AuctionProxy, ProxyError, SelectAdRequest, SelectAdResponse};
