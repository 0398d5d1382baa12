//! Fake ad server: forwards the browser's auction blob to the auction
//! service and announces the result hash.

use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::auction::config::{AuctionConfig, SharedAuctionConfig};
use crate::auction::digest::auction_result_token;
use crate::config::AuctionSettings;
use crate::http::response::{AD_AUCTION_RESULT, APPLICATION_JSON, TRUE, X_ALLOW_FLEDGE};

const CLIENT_IP_HEADER: &str = "X-BnA-Client-IP";

/// Envelope POSTed to the SelectAd endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectAdRequest<'a> {
    pub protected_audience_ciphertext: &'a str,
    pub auction_config: &'a AuctionConfig,
    pub client_type: u8,
}

/// The part of the SelectAd response the proxy reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectAdResponse {
    pub auction_result_ciphertext: String,
}

/// Failures are surfaced as-is; the harness never papers over a broken backend.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("missing `data` query parameter")]
    MissingData,
    #[error("auction backend request failed: {0}")]
    Backend(#[from] reqwest::Error),
    #[error("malformed auction backend response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("auctionResultCiphertext is not valid base64: {0}")]
    Ciphertext(#[from] base64::DecodeError),
    #[error("invalid Ad-Auction-Result value: {0}")]
    Token(#[from] header::InvalidHeaderValue),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Fake ad server request failed");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

/// Proxies fake ad server requests to the auction service.
#[derive(Debug)]
pub struct AuctionProxy {
    config: SharedAuctionConfig,
    client: reqwest::Client,
    backend_url: String,
    client_ip: String,
    client_type: u8,
}

impl AuctionProxy {
    pub fn new(settings: &AuctionSettings, timeout: Duration) -> Result<Self, reqwest::Error> {
        // The auction service is local; never route it through an HTTP proxy.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()?;

        Ok(Self {
            config: SharedAuctionConfig::new(settings),
            client,
            backend_url: settings.backend_url.clone(),
            client_ip: settings.client_ip.clone(),
            client_type: settings.client_type,
        })
    }

    /// The config whose seller mode page navigation switches.
    pub fn config(&self) -> &SharedAuctionConfig {
        &self.config
    }

    /// Run one auction for the `data` parameter in `query`.
    ///
    /// The parameter is forwarded as text; the service expects the base64
    /// form. The response body is passed through byte for byte.
    pub async fn select_ad(&self, query: Option<&str>) -> Result<Response, ProxyError> {
        let ciphertext = data_param(query).ok_or(ProxyError::MissingData)?;
        let auction_config = self.config.snapshot();
        let envelope = SelectAdRequest {
            protected_audience_ciphertext: &ciphertext,
            auction_config: &auction_config,
            client_type: self.client_type,
        };

        tracing::debug!(
            backend = %self.backend_url,
            multi_seller = auction_config.top_level_seller.is_some(),
            "Forwarding auction request"
        );

        let response = self
            .client
            .post(&self.backend_url)
            .header(header::CONTENT_TYPE, APPLICATION_JSON)
            .header(CLIENT_IP_HEADER, self.client_ip.as_str())
            .json(&envelope)
            .send()
            .await?
            .error_for_status()?;
        let body: Bytes = response.bytes().await?;

        tracing::debug!(response = %String::from_utf8_lossy(&body), "Auction backend responded");

        let result: SelectAdResponse = serde_json::from_slice(&body)?;
        let token = auction_result_token(&result.auction_result_ciphertext)?;
        let token = HeaderValue::try_from(token)?;

        let mut response = Response::new(Body::from(body));
        let headers = response.headers_mut();
        headers.insert(AD_AUCTION_RESULT, token);
        headers.insert(header::CONTENT_TYPE, APPLICATION_JSON);
        headers.insert(X_ALLOW_FLEDGE, TRUE);
        Ok(response)
    }
}

/// First non-empty `data` value, form-decoded.
fn data_param(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, value)| key == "data" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}
