//! Top-level session state: one active search session per client instance.
//!
//! The struct is the single owner of these fields; there are no ambient
//! globals. Mutation is restricted to
//! the operations that own each field: the submission path (results, error,
//! preview, loading flag, via crate-private methods) and the user-facing
//! threshold setter.

use tracing::debug;

use crate::error_handler::{SearchError, ValidationError};
use crate::models::{MatchResult, PreviewReference};
use crate::result_filter::{validate_threshold, visible};

/// Shared state of one search session.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Matches from the last *successful* search. `None` until one
    /// completes, so a confirmed zero-match search (`Some(vec![])`) stays
    /// distinguishable from "never searched".
    results: Option<Vec<MatchResult>>,
    /// Preview of the query that produced `results`.
    query_preview: Option<PreviewReference>,
    /// Message of the last failed search, if it was the latest outcome.
    error: Option<String>,
    /// Whether a request is currently in flight.
    is_loading: bool,
    /// User-controlled lower bound on displayed similarity, in `[0, 100]`.
    similarity_threshold: u8,
}

impl SessionState {
    /// Matches from the last successful search, unfiltered.
    pub fn results(&self) -> Option<&[MatchResult]> {
        self.results.as_deref()
    }

    /// Preview reference for the query behind `results`.
    pub fn query_preview(&self) -> Option<&PreviewReference> {
        self.query_preview.as_ref()
    }

    /// Error message of the latest failed search, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a search is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Current similarity threshold.
    pub fn similarity_threshold(&self) -> u8 {
        self.similarity_threshold
    }

    /// Sets the similarity threshold.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidThreshold`] for values outside
    /// `[0, 100]`; the prior threshold is retained unchanged.
    pub fn set_threshold(&mut self, value: i64) -> Result<(), ValidationError> {
        self.similarity_threshold = validate_threshold(value)?;
        Ok(())
    }

    /// The filtered subsequence of the current results.
    pub fn visible_results(&self) -> Vec<&MatchResult> {
        visible(self.results().unwrap_or_default(), self.similarity_threshold)
    }

    /// Marks the start of a submission: the prior error is cleared before
    /// the new outcome is known; results and preview are left alone.
    pub(crate) fn begin_search(&mut self) {
        self.error = None;
        self.is_loading = true;
    }

    /// Records a completed outcome, releasing the loading flag on every
    /// path.
    ///
    /// Exactly one terminal field is set: results + preview on success,
    /// error on failure. A failure does not erase the previous result set;
    /// the last confirmed results stay until the next successful search.
    pub(crate) fn finish_search(
        &mut self,
        outcome: &Result<Vec<MatchResult>, SearchError>,
        preview: Option<PreviewReference>,
    ) {
        self.is_loading = false;
        match outcome {
            Ok(matches) => {
                debug!(matches = matches.len(), "search completed");
                self.results = Some(matches.clone());
                self.query_preview = preview;
            }
            Err(e) => {
                debug!(error = %e, "search failed");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Derives what the presenter should show. Exactly one variant applies
    /// at a time; the executor never talks to the UI directly.
    pub fn view(&self) -> SessionView<'_> {
        if let Some(message) = self.error.as_deref() {
            return SessionView::ErrorBanner {
                message,
                retained: self.visible_results(),
            };
        }
        match self.results() {
            None => SessionView::Idle,
            Some([]) => SessionView::NoMatches,
            Some(all) => {
                let shown = self.visible_results();
                if shown.is_empty() {
                    SessionView::FilteredOut { total: all.len() }
                } else {
                    SessionView::Results {
                        total: all.len(),
                        visible: shown,
                    }
                }
            }
        }
    }
}

/// What the presenter renders, computed from [`SessionState`] alone.
#[derive(Debug)]
pub enum SessionView<'a> {
    /// No search has completed and nothing failed.
    Idle,
    /// The latest outcome was a failure. Results confirmed by an earlier
    /// search are carried along so they can stay visible under the banner.
    ErrorBanner {
        /// The failure message.
        message: &'a str,
        /// Filtered matches from the last confirmed success, if any.
        retained: Vec<&'a MatchResult>,
    },
    /// A search succeeded but the service found no matches at all.
    NoMatches,
    /// Matches exist but the threshold hides every one of them.
    FilteredOut {
        /// How many matches the filter is hiding.
        total: usize,
    },
    /// The filtered, ordered matches to list.
    Results {
        /// Matches passing the threshold, service order preserved.
        visible: Vec<&'a MatchResult>,
        /// Total matches before filtering.
        total: usize,
    },
}
