//! Unified error handling for `visual-search`.
//!
//! This module exposes a single top-level error type [`MatcherError`] for the
//! whole library, and groups domain-specific errors in nested enums
//! ([`ConfigError`], [`ValidationError`], [`SearchError`]). Small helpers for
//! reading/validating environment variables are provided and return the
//! unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[Visual Search]` to simplify attribution
//! in logs.

use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, MatcherError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `visual-search` crate.
///
/// Variants wrap domain-specific enums (config/validation/search) and the
/// HTTP-transport case hit while constructing clients. Prefer adding new
/// sub-enums for distinct domains instead of growing this type indefinitely.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MatcherError {
    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Local input-validation errors; these never reach the network.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Remote search outcome failures.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Catalog probe (health/stats) failures.
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error` while
    /// building a client).
    #[error("[Visual Search] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
///
/// Keep this focused: only errors that realistically happen at config
/// load/validation time.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[Visual Search] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like timeouts or ports).
    #[error("[Visual Search] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `MATCHER_TIMEOUT_SECS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u64`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[Visual Search] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `MATCHER_API_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Validation errors                                                         */
/* ------------------------------------------------------------------------- */

/// Local input-validation failures.
///
/// Every variant is raised before any request is constructed; session state
/// (results, preview) is left untouched when one of these is returned.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The selected file does not carry an `image/*` media type.
    #[error("[Visual Search] not an image file: {mime_type}")]
    InvalidFileType {
        /// The rejected media type.
        mime_type: String,
    },

    /// The active mode's required field is empty or blank.
    #[error("[Visual Search] missing input: {0}")]
    MissingInput(&'static str),

    /// Similarity threshold outside the inclusive `[0, 100]` range.
    #[error("[Visual Search] similarity threshold out of range: {0} (expected 0..=100)")]
    InvalidThreshold(i64),

    /// A search is already in flight for this session.
    #[error("[Visual Search] a search is already in progress")]
    SearchInFlight,
}

/* ------------------------------------------------------------------------- */
/* Search outcome errors                                                     */
/* ------------------------------------------------------------------------- */

/// Failure kinds for a completed search attempt.
///
/// Exactly one of these is produced when a submission does not end in a
/// match list. A zero-match response is **not** an error; it is a valid
/// `Ok(vec![])` outcome.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The service answered but explicitly declined the query
    /// (unreachable image URL, corrupt upload, unsupported format, ...).
    #[error("[Visual Search] search rejected: {0}")]
    ServiceRejected(String),

    /// No usable response: connection refused, DNS failure, timeout.
    #[error("[Visual Search] cannot reach search service: {0}")]
    Unreachable(String),

    /// Anything unexpected, including a 2xx body that does not decode.
    #[error("[Visual Search] search failed unexpectedly: {0}")]
    Unknown(String),
}

/* ------------------------------------------------------------------------- */
/* Catalog probe errors                                                      */
/* ------------------------------------------------------------------------- */

/// Error enum for the strict catalog probes (`/api/stats`).
///
/// The resilient health check never returns these; it folds every failure
/// into an `ok = false` status instead.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Upstream returned a non-successful HTTP status.
    #[error("[Visual Search] HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: reqwest::StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body (trimmed).
        snippet: String,
    },

    /// Response payload could not be decoded as expected.
    #[error("[Visual Search] decode error: {0}")]
    Decode(String),
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Fetches an environment variable, falling back to `default` when the
/// variable is absent or blank.
pub fn env_or(name: &'static str, default: &str) -> String {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`MatcherError::Config`] with [`ConfigError::InvalidNumber`] if
/// the variable is set but not a valid `u64`.
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.parse::<u64>().map(Some).map_err(|_| {
            MatcherError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        _ => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers (return unified `Result<T>`)                           */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`MatcherError::Config`] with [`ConfigError::InvalidFormat`] when
/// the string does not start with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Shortens a response body for log lines and error messages.
pub fn make_snippet(text: &str) -> String {
    text.trim().chars().take(240).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_validation() {
        assert!(validate_http_endpoint("X", "http://localhost:5000").is_ok());
        assert!(validate_http_endpoint("X", "https://api.example.com").is_ok());
        assert!(validate_http_endpoint("X", "localhost:5000").is_err());
        assert!(validate_http_endpoint("X", "").is_err());
    }

    #[test]
    fn snippet_is_bounded() {
        let long = "x".repeat(1000);
        assert_eq!(make_snippet(&long).len(), 240);
        assert_eq!(make_snippet("  short  "), "short");
    }
}
