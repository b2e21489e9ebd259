//! One search session: input state, shared session state, and the service
//! client, wired together behind a single owner.
//!
//! Construct once and drive it for the lifetime of the client instance.
//! Completion is reported as a plain returned outcome the caller inspects
//! after awaiting; there are no callbacks.

use tracing::instrument;

use crate::config::search_config::SearchConfig;
use crate::error_handler::{MatcherError, Result, ValidationError};
use crate::models::MatchResult;
use crate::query_input::QueryInput;
use crate::request_builder;
use crate::services::search_service::SearchService;
use crate::session_state::SessionState;

/// Owns everything one active session needs.
pub struct SearchSession {
    input: QueryInput,
    state: SessionState,
    service: SearchService,
}

impl SearchSession {
    /// Creates a session talking to the configured service.
    ///
    /// # Errors
    /// Fails when the config is invalid or the HTTP client cannot be built.
    pub fn new(cfg: &SearchConfig) -> Result<Self> {
        Ok(Self {
            input: QueryInput::default(),
            state: SessionState::default(),
            service: SearchService::new(cfg)?,
        })
    }

    /// The query input (mode, file, URL).
    pub fn input(&self) -> &QueryInput {
        &self.input
    }

    /// Mutable access to the query input.
    pub fn input_mut(&mut self) -> &mut QueryInput {
        &mut self.input
    }

    /// The shared session state the presenter reads.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Sets the similarity threshold on the session state.
    ///
    /// # Errors
    /// [`ValidationError::InvalidThreshold`] outside `[0, 100]`.
    pub fn set_threshold(&mut self, value: i64) -> Result<()> {
        self.state.set_threshold(value)?;
        Ok(())
    }

    /// Submits the current query input as one search.
    ///
    /// Order of operations: reject if a search is already in flight (before
    /// any payload is constructed), build and validate the payload, clear
    /// the prior error and raise the loading flag, execute, then record the
    /// outcome. The loading flag is released on every exit path.
    ///
    /// # Errors
    /// - [`ValidationError`] kinds for local pre-network rejections; these
    ///   leave results and preview untouched.
    /// - [`crate::error_handler::SearchError`] kinds for remote failures;
    ///   these are also recorded in the session state as the error banner
    ///   message, while the last confirmed results remain.
    #[instrument(skip_all, fields(mode = ?self.input.mode()))]
    pub async fn submit(&mut self) -> Result<&[MatchResult]> {
        if self.state.is_loading() {
            return Err(ValidationError::SearchInFlight.into());
        }

        let payload = request_builder::build(&self.input)?;
        let preview = self.input.preview().cloned();

        self.state.begin_search();
        let outcome = self.service.execute(payload).await;
        self.state.finish_search(&outcome, preview);

        match outcome {
            Ok(_) => Ok(self.state.results().unwrap_or_default()),
            Err(e) => Err(MatcherError::from(e)),
        }
    }
}
