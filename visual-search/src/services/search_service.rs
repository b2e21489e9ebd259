//! Thin client for the visual similarity search service.
//!
//! One endpoint, two transfer shapes:
//! - `POST {endpoint}/api/search` multipart, part name `file` — binary upload
//! - `POST {endpoint}/api/search` JSON `{ "url": "<string>" }` — remote image
//!
//! The response is classified into exactly one of: `Ok(matches)` (a 2xx,
//! well-formed, `success: true` body; an empty match list is still `Ok`),
//! [`SearchError::ServiceRejected`] (the service answered and declined),
//! [`SearchError::Unreachable`] (no usable response at all), or
//! [`SearchError::Unknown`] (anything else, including a 2xx body that does
//! not decode).

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::search_config::SearchConfig;
use crate::error_handler::{Result, SearchError, make_snippet, validate_http_endpoint};
use crate::models::MatchResult;
use crate::request_builder::QueryPayload;

/// Default client timeout when the config does not set one.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Reusable HTTP client for the search service.
///
/// Initialized with a full [`SearchConfig`]; the underlying client and its
/// timeout are built once and reused across calls.
pub struct SearchService {
    client: reqwest::Client,
    url_search: String,
}

impl SearchService {
    /// Creates a new [`SearchService`] from the given config.
    ///
    /// # Errors
    /// - [`crate::error_handler::ConfigError::InvalidFormat`] if the API
    ///   origin is not an HTTP endpoint
    /// - [`crate::error_handler::MatcherError::HttpTransport`] if the HTTP
    ///   client cannot be built
    pub fn new(cfg: &SearchConfig) -> Result<Self> {
        validate_http_endpoint("MATCHER_API_URL", &cfg.api_url)?;

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let base = cfg.api_url.trim().trim_end_matches('/');
        Ok(Self {
            client,
            url_search: format!("{}/api/search", base),
        })
    }

    /// Submits one query payload and classifies the outcome.
    ///
    /// No deadline is imposed beyond the client timeout configured at
    /// construction, and nothing here can cancel an in-flight call.
    #[instrument(skip_all, fields(url = %self.url_search))]
    pub async fn execute(&self, payload: QueryPayload) -> std::result::Result<Vec<MatchResult>, SearchError> {
        let request = match payload {
            QueryPayload::File {
                bytes,
                mime_type,
                file_name,
            } => {
                debug!(file = %file_name, size = bytes.len(), "POST {} (file upload)", self.url_search);
                let part = multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&mime_type)
                    .map_err(|e| SearchError::Unknown(format!("invalid part media type: {e}")))?;
                self.client
                    .post(&self.url_search)
                    .multipart(multipart::Form::new().part("file", part))
            }
            QueryPayload::Url { url } => {
                debug!(%url, "POST {} (url query)", self.url_search);
                self.client
                    .post(&self.url_search)
                    .json(&UrlQuery { url: &url })
            }
        };

        let resp = request.send().await.map_err(classify_transport_error)?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SearchError::Unknown(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            warn!(%status, snippet = %make_snippet(&body), "search request declined");
        }

        decode_outcome(status, &body)
    }
}

/// Maps a send-level `reqwest::Error` onto the failure taxonomy.
///
/// Connection and timeout failures mean the service never answered;
/// everything else is unexpected.
fn classify_transport_error(e: reqwest::Error) -> SearchError {
    if e.is_connect() || e.is_timeout() {
        SearchError::Unreachable("make sure the backend is running".to_string())
    } else {
        SearchError::Unknown(e.to_string())
    }
}

/// Classifies a received response into the search outcome.
///
/// - non-2xx → `ServiceRejected`, surfacing the body's `error` string when
///   present or a generic message otherwise
/// - 2xx, `success: true` → `Ok(results)` (empty list included)
/// - 2xx, `success: false` → `ServiceRejected` with the carried message
/// - 2xx, body does not decode → `Unknown`
fn decode_outcome(
    status: StatusCode,
    body: &str,
) -> std::result::Result<Vec<MatchResult>, SearchError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| format!("search service returned HTTP {status}"));
        return Err(SearchError::ServiceRejected(message));
    }

    match serde_json::from_str::<SearchResponse>(body) {
        Ok(SearchResponse {
            success: true,
            results,
            ..
        }) => Ok(results),
        Ok(SearchResponse { error, .. }) => Err(SearchError::ServiceRejected(
            error.unwrap_or_else(|| "search failed, please try again".to_string()),
        )),
        Err(e) => Err(SearchError::Unknown(format!(
            "malformed response from search service: {e}"
        ))),
    }
}

/* ==========================
HTTP payloads
========================== */

/// JSON body for URL-mode queries.
#[derive(Debug, Serialize)]
struct UrlQuery<'a> {
    url: &'a str,
}

/// Response body for `/api/search`.
///
/// `success` is required so that a 2xx response of some other shape lands
/// in `Unknown` rather than being misread as a rejection.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    success: bool,
    #[serde(default)]
    results: Vec<MatchResult>,
    #[serde(default)]
    error: Option<String>,
}

/// Fallback body shape for non-2xx answers.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_matches() {
        let body = r#"{"success": true, "results": [
            {"product_id": "P1", "seller_img_id": "G1", "image_path": "p/a.jpg", "similarity": 92.3}
        ], "total_matches": 1}"#;
        let matches = decode_outcome(StatusCode::OK, body).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].product_id, "P1");
        assert_eq!(matches[0].gallery_image_id, "G1");
    }

    #[test]
    fn empty_success_is_not_an_error() {
        let body = r#"{"success": true, "results": [], "total_matches": 0}"#;
        let matches = decode_outcome(StatusCode::OK, body).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn service_refusal_surfaces_its_message() {
        let body = r#"{"success": false, "error": "unreachable image"}"#;
        let err = decode_outcome(StatusCode::OK, body).unwrap_err();
        assert_eq!(
            err,
            SearchError::ServiceRejected("unreachable image".to_string())
        );
    }

    #[test]
    fn non_2xx_with_error_body_is_rejected_with_that_message() {
        let body = r#"{"error": "Invalid file type. Please upload an image"}"#;
        let err = decode_outcome(StatusCode::BAD_REQUEST, body).unwrap_err();
        assert_eq!(
            err,
            SearchError::ServiceRejected("Invalid file type. Please upload an image".to_string())
        );
    }

    #[test]
    fn non_2xx_without_error_body_gets_a_generic_message() {
        let err = decode_outcome(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, SearchError::ServiceRejected(m) if m.contains("500")));
    }

    #[test]
    fn malformed_2xx_body_is_unknown() {
        let err = decode_outcome(StatusCode::OK, r#"{"unexpected": "shape"}"#).unwrap_err();
        assert!(matches!(err, SearchError::Unknown(_)));

        let err = decode_outcome(StatusCode::OK, "not json at all").unwrap_err();
        assert!(matches!(err, SearchError::Unknown(_)));
    }

    #[test]
    fn results_order_is_preserved() {
        let body = r#"{"success": true, "results": [
            {"product_id": 3, "seller_img_id": 30, "image_path": "c.jpg", "similarity": 40.0},
            {"product_id": 1, "seller_img_id": 10, "image_path": "a.jpg", "similarity": 90.0},
            {"product_id": 2, "seller_img_id": 20, "image_path": "b.jpg", "similarity": 70.0}
        ]}"#;
        let matches = decode_outcome(StatusCode::OK, body).unwrap();
        let ids: Vec<&str> = matches.iter().map(|m| m.product_id.as_str()).collect();
        // As returned by the service; the client never re-sorts.
        assert_eq!(ids, ["3", "1", "2"]);
    }
}
