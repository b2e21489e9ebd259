//! Health and statistics probes for the matcher backend.
//!
//! Two read-only endpoints:
//! - `GET {endpoint}/`          — plain-text liveness check
//! - `GET {endpoint}/api/stats` — catalog statistics
//!
//! [`HealthService::check`] is resilient and never fails (errors mapped to
//! `ok = false`), suitable for surfacing directly to the user. The stats
//! probe returns a strict `Result`.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::search_config::SearchConfig;
use crate::error_handler::{ProbeError, Result, make_snippet, validate_http_endpoint};
use crate::models::CatalogStats;

/// A serializable health snapshot for the configured backend.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds for the probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

/// Probes the matcher backend, reusing a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
    base: String,
}

impl HealthService {
    /// Creates a new health service for the configured backend.
    ///
    /// # Errors
    /// Fails when the API origin is not an HTTP endpoint or the client
    /// cannot be built.
    pub fn new(cfg: &SearchConfig) -> Result<Self> {
        validate_http_endpoint("MATCHER_API_URL", &cfg.api_url)?;
        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base: cfg.api_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Liveness probe against `GET /`.
    ///
    /// This method is **resilient**: it never returns an error. Any failure
    /// is converted to `HealthStatus { ok: false, message: ... }`.
    pub async fn check(&self) -> HealthStatus {
        let url = format!("{}/", self.base);
        debug!("GET {url}");

        let start = Instant::now();
        let outcome = self.client.get(&url).send().await;
        let latency_ms = start.elapsed().as_millis();

        let status = match outcome {
            Ok(resp) if resp.status().is_success() => {
                let body = resp.text().await.unwrap_or_default();
                HealthStatus {
                    endpoint: self.base.clone(),
                    ok: true,
                    latency_ms,
                    message: make_snippet(&body),
                }
            }
            Ok(resp) => HealthStatus {
                endpoint: self.base.clone(),
                ok: false,
                latency_ms,
                message: format!("backend answered HTTP {}", resp.status()),
            },
            Err(e) => HealthStatus {
                endpoint: self.base.clone(),
                ok: false,
                latency_ms,
                message: e.to_string(),
            },
        };

        if status.ok {
            info!(endpoint = %status.endpoint, latency_ms = status.latency_ms, "health probe completed");
        } else {
            warn!(endpoint = %status.endpoint, message = %status.message, "health probe failed");
        }
        status
    }

    /// Strict catalog statistics probe against `GET /api/stats`.
    ///
    /// # Errors
    /// - [`ProbeError::HttpStatus`] for non-2xx responses
    /// - [`ProbeError::Decode`] if the body cannot be parsed
    /// - transport errors from the underlying client
    pub async fn stats(&self) -> Result<CatalogStats> {
        let url = format!("{}/api/stats", self.base);
        debug!("GET {url}");

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(ProbeError::HttpStatus {
                status,
                url,
                snippet: make_snippet(&text),
            }
            .into());
        }

        let stats: CatalogStats = resp
            .json()
            .await
            .map_err(|e| ProbeError::Decode(format!("unexpected /api/stats body: {e}")))?;

        debug!(
            total_products = stats.total_products,
            features_loaded = stats.features_loaded,
            "catalog stats fetched"
        );
        Ok(stats)
    }
}
