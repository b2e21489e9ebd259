//! Domain types shared across the client: ranked matches, query previews,
//! and catalog statistics.

use serde::{Deserialize, Deserializer, Serialize};

/// A single ranked match returned by the search service.
///
/// Immutable once received. The service returns matches ordered by
/// descending similarity; that order is preserved and never re-sorted
/// client-side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchResult {
    /// Catalog product identifier.
    #[serde(deserialize_with = "id_string")]
    pub product_id: String,

    /// Identifier of the gallery image that matched.
    #[serde(rename = "seller_img_id", deserialize_with = "id_string")]
    pub gallery_image_id: String,

    /// Path of the matched image, relative to the image host's `/images/`.
    pub image_path: String,

    /// Similarity score as a percentage in `[0, 100]`.
    pub similarity: f32,
}

/// The deployed service serializes ids as JSON numbers while the interface
/// contract describes them as strings; accept both and normalize.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Num(i64),
        Text(String),
    }

    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Num(n) => n.to_string(),
        IdRepr::Text(s) => s,
    })
}

/// A renderable reference to the currently selected query image.
///
/// File mode yields an inline data URI; URL mode keeps the literal URL.
/// Lifetime spans from selection until a new query replaces it or the
/// input mode is switched away from FILE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewReference {
    /// `data:{mime};base64,{payload}` derived from the selected file.
    DataUri(String),
    /// The URL entered by the user, verbatim.
    Url(String),
}

impl PreviewReference {
    /// The renderable string, independent of how it was obtained.
    pub fn as_str(&self) -> &str {
        match self {
            PreviewReference::DataUri(s) | PreviewReference::Url(s) => s,
        }
    }
}

/// Basic catalog statistics from `GET /api/stats`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogStats {
    /// Number of products in the gallery.
    pub total_products: u64,
    /// Whether the service has its feature vectors loaded.
    pub features_loaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_decodes_numeric_ids() {
        let m: MatchResult = serde_json::from_str(
            r#"{"product_id": 17, "seller_img_id": 20481, "image_path": "gallery/a.jpg", "similarity": 92.3}"#,
        )
        .unwrap();
        assert_eq!(m.product_id, "17");
        assert_eq!(m.gallery_image_id, "20481");
        assert_eq!(m.image_path, "gallery/a.jpg");
        assert!((m.similarity - 92.3).abs() < 1e-4);
    }

    #[test]
    fn match_decodes_string_ids() {
        let m: MatchResult = serde_json::from_str(
            r#"{"product_id": "P1", "seller_img_id": "G1", "image_path": "p/a.jpg", "similarity": 50.0}"#,
        )
        .unwrap();
        assert_eq!(m.product_id, "P1");
        assert_eq!(m.gallery_image_id, "G1");
    }
}
