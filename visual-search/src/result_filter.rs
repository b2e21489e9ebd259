//! Threshold-based filtering of ranked matches.
//!
//! Pure functions only; the filtered view is recomputed on demand (result
//! sets are small, ten matches from the deployed service).

use crate::error_handler::ValidationError;
use crate::models::MatchResult;

/// The ordered subsequence of `results` with `similarity >= threshold`.
///
/// Input order is preserved; nothing is re-sorted or cached.
pub fn visible(results: &[MatchResult], threshold: u8) -> Vec<&MatchResult> {
    results
        .iter()
        .filter(|m| m.similarity >= f32::from(threshold))
        .collect()
}

/// Validates a requested similarity threshold.
///
/// Step granularity (the UI slider moves in steps of 5) is a presentation
/// constraint and deliberately not enforced here.
///
/// # Errors
/// Returns [`ValidationError::InvalidThreshold`] for values outside
/// `[0, 100]`.
pub fn validate_threshold(value: i64) -> Result<u8, ValidationError> {
    if (0..=100).contains(&value) {
        Ok(value as u8)
    } else {
        Err(ValidationError::InvalidThreshold(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(similarities: &[f32]) -> Vec<MatchResult> {
        similarities
            .iter()
            .enumerate()
            .map(|(i, &s)| MatchResult {
                product_id: format!("P{i}"),
                gallery_image_id: format!("G{i}"),
                image_path: format!("p/{i}.jpg"),
                similarity: s,
            })
            .collect()
    }

    #[test]
    fn identity_at_the_floor() {
        let results = matches(&[80.0, 30.0, 55.5]);
        let all = visible(&results, 0);
        assert_eq!(all.len(), 3);
        let ids: Vec<&str> = all.iter().map(|m| m.product_id.as_str()).collect();
        assert_eq!(ids, ["P0", "P1", "P2"]);
    }

    #[test]
    fn threshold_50_drops_the_low_match() {
        let results = matches(&[80.0, 30.0]);
        let kept = visible(&results, 50);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].product_id, "P0");
    }

    #[test]
    fn filtering_is_monotone_in_the_threshold() {
        let results = matches(&[92.3, 75.0, 61.2, 44.9, 12.0]);
        for t1 in (0..=100).step_by(5) {
            for t2 in (t1..=100).step_by(5) {
                let wide = visible(&results, t1 as u8);
                let narrow = visible(&results, t2 as u8);
                // narrow must be a subsequence of wide
                let mut it = wide.iter();
                assert!(
                    narrow
                        .iter()
                        .all(|m| it.any(|w| std::ptr::eq(*w, *m))),
                    "visible(_, {t2}) is not a subsequence of visible(_, {t1})"
                );
            }
        }
    }

    #[test]
    fn boundary_similarity_is_kept() {
        let results = matches(&[50.0]);
        assert_eq!(visible(&results, 50).len(), 1);
        assert_eq!(visible(&results, 51).len(), 0);
    }

    #[test]
    fn threshold_range_validation() {
        assert_eq!(validate_threshold(0).unwrap(), 0);
        assert_eq!(validate_threshold(100).unwrap(), 100);
        assert_eq!(
            validate_threshold(150),
            Err(ValidationError::InvalidThreshold(150))
        );
        assert_eq!(
            validate_threshold(-5),
            Err(ValidationError::InvalidThreshold(-5))
        );
    }
}
