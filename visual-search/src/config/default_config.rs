//! Default client config loaded from environment variables.
//!
//! This module provides the convenience constructor for [`SearchConfig`].
//! All variables are optional; defaults match a locally running matcher
//! backend.
//!
//! # Environment variables
//!
//! - `MATCHER_API_URL`     = search service origin (default `http://localhost:5000`)
//! - `MATCHER_IMAGE_URL`   = product-image host origin (default: same as API)
//! - `MATCHER_TIMEOUT_SECS` = optional request timeout in seconds (u64)

use crate::{
    config::search_config::SearchConfig,
    error_handler::{Result, env_opt_u64, env_or},
};

/// Fallback origin when `MATCHER_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default request timeout applied when `MATCHER_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Constructs a [`SearchConfig`] strictly from the environment.
///
/// The image host falls back to the API origin, matching deployments where
/// the service also serves `/images/{path}` itself.
///
/// # Errors
///
/// - [`crate::error_handler::ConfigError::InvalidNumber`] if
///   `MATCHER_TIMEOUT_SECS` is set but not a valid `u64`
/// - [`crate::error_handler::ConfigError::InvalidFormat`] if either origin
///   does not start with `http://` or `https://`
pub fn config_from_env() -> Result<SearchConfig> {
    let api_url = env_or("MATCHER_API_URL", DEFAULT_API_URL);
    let image_url = env_or("MATCHER_IMAGE_URL", &api_url);
    let timeout_secs = env_opt_u64("MATCHER_TIMEOUT_SECS")?.or(Some(DEFAULT_TIMEOUT_SECS));

    SearchConfig {
        api_url,
        image_url,
        timeout_secs,
    }
    .validated()
}
