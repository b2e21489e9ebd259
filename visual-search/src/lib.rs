//! Client library for the visual product matcher service.
//!
//! The crate covers query submission end to end: input-mode state with its
//! mutual-exclusion invariant, payload validation and assembly, the
//! asynchronous call to the remote similarity search, classification of the
//! outcome into a typed success/failure, and threshold-based filtering of
//! the ranked matches. Presentation is someone else's job; consumers read
//! [`session_state::SessionState`] (or its derived
//! [`session_state::SessionView`]) and render.
//!
//! Typical use goes through [`search_session::SearchSession`]:
//!
//! ```no_run
//! use visual_search::config::config_from_env;
//! use visual_search::query_input::InputMode;
//! use visual_search::search_session::SearchSession;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = config_from_env()?;
//! let mut session = SearchSession::new(&cfg)?;
//!
//! session.input_mut().set_mode(InputMode::Url);
//! session.input_mut().set_url("https://example.com/shoe.jpg");
//! session.set_threshold(50)?;
//!
//! let matches = session.submit().await?;
//! println!("{} matches", matches.len());
//! # Ok(()) }
//! ```

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod models;
pub mod query_input;
pub mod request_builder;
pub mod result_filter;
pub mod search_session;
pub mod services;
pub mod session_state;
pub mod telemetry;

pub use error_handler::{MatcherError, Result, SearchError, ValidationError};
pub use models::{CatalogStats, MatchResult, PreviewReference};
