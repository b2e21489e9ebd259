//! Configuration types and env-driven constructors.

pub mod default_config;
pub mod search_config;

pub use default_config::config_from_env;
pub use search_config::SearchConfig;
