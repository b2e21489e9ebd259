use crate::error_handler::{Result, validate_http_endpoint};

/// Configuration for talking to the visual product matcher service.
///
/// # Fields
///
/// - `api_url`: Base origin of the search service (`POST /api/search`,
///   `GET /api/stats`, `GET /`).
/// - `image_url`: Base origin of the host serving product imagery
///   (`GET /images/{image_path}`). Usually the same origin as `api_url`,
///   but deployments may serve images from a CDN.
/// - `timeout_secs`: Optional request timeout in seconds applied to the
///   underlying HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Search service origin (e.g., `http://localhost:5000`).
    pub api_url: String,

    /// Product-image host origin.
    pub image_url: String,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl SearchConfig {
    /// Validates both origins and normalizes trailing slashes away.
    ///
    /// # Errors
    /// Returns [`crate::error_handler::ConfigError::InvalidFormat`] when an
    /// origin does not start with an HTTP scheme.
    pub fn validated(mut self) -> Result<Self> {
        validate_http_endpoint("MATCHER_API_URL", &self.api_url)?;
        validate_http_endpoint("MATCHER_IMAGE_URL", &self.image_url)?;
        self.api_url = self.api_url.trim().trim_end_matches('/').to_string();
        self.image_url = self.image_url.trim().trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Full URL for a product image returned in a match's `image_path`.
    pub fn image_endpoint(&self, image_path: &str) -> String {
        format!(
            "{}/images/{}",
            self.image_url,
            image_path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(api: &str, images: &str) -> SearchConfig {
        SearchConfig {
            api_url: api.to_string(),
            image_url: images.to_string(),
            timeout_secs: None,
        }
    }

    #[test]
    fn validated_normalizes_trailing_slash() {
        let c = cfg("http://localhost:5000/", "http://localhost:5000")
            .validated()
            .unwrap();
        assert_eq!(c.api_url, "http://localhost:5000");
        assert_eq!(
            c.image_endpoint("p/a.jpg"),
            "http://localhost:5000/images/p/a.jpg"
        );
    }

    #[test]
    fn validated_rejects_schemeless_origin() {
        assert!(cfg("localhost:5000", "http://x").validated().is_err());
        assert!(cfg("http://x", "ftp://images").validated().is_err());
    }
}
