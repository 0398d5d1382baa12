//! Key/value responder for trusted bidding and scoring signals.
//!
//! Answers the lookups the auction worklets make with placeholder data for
//! every requested key, interest group and render URL.

use axum::{
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use crate::http::response::{APPLICATION_JSON, TRUE, X_ALLOW_FLEDGE};

/// Build the lookup response for a query string.
pub fn lookup(query: Option<&str>) -> Value {
    let params: Vec<(String, String)> = query
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    let param = |name: &str| {
        params
            .iter()
            .find(|(key, value)| key == name && !value.is_empty())
            .map(|(_, value)| value.split(','))
    };

    let mut response = Map::new();
    if let Some(keys) = param("keys") {
        response.insert(
            "keys".into(),
            keys.map(|k| (k.to_string(), json!({ "blah": {} }))).collect(),
        );
    }
    if let Some(groups) = param("interestGroupNames") {
        response.insert(
            "perInterestGroupData".into(),
            groups.map(|ig| (ig.to_string(), json!({ "priorityVector": {} }))).collect(),
        );
    }
    for name in ["renderUrls", "adComponentRenderUrls"] {
        if let Some(urls) = param(name) {
            response.insert(
                name.into(),
                urls.map(|url| (url.to_string(), Value::Bool(true))).collect(),
            );
        }
    }
    Value::Object(response)
}

/// Axum response for [`lookup`].
pub fn respond(query: Option<&str>) -> Response {
    let body = lookup(query);
    tracing::debug!(%body, "Key/value lookup");

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, APPLICATION_JSON);
    headers.insert(X_ALLOW_FLEDGE, TRUE);
    (headers, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_every_requested_section() {
        let value = lookup(Some(
            "keys=a,b&interestGroupNames=ig1&renderUrls=https%3A%2F%2Fad.example%2F1&adComponentRenderUrls=c1,c2",
        ));
        assert_eq!(
            value,
            json!({
                "keys": {"a": {"blah": {}}, "b": {"blah": {}}},
                "perInterestGroupData": {"ig1": {"priorityVector": {}}},
                "renderUrls": {"https://ad.example/1": true},
                "adComponentRenderUrls": {"c1": true, "c2": true}
            })
        );
    }

    #[test]
    fn omits_absent_and_blank_sections() {
        assert_eq!(lookup(Some("keys=&hostname=example.com")), json!({}));
        assert_eq!(lookup(None), json!({}));
    }

    #[test]
    fn response_headers() {
        let response = respond(Some("keys=a"));
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()[X_ALLOW_FLEDGE], "true");
    }
}
