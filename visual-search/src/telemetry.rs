//! Tracing integration for the library.
//!
//! The crate never installs a global subscriber; binaries compose the
//! pieces below into their own registry. [`layer`] renders only events
//! whose target belongs to this crate, so application logs keep their own
//! formatting.

use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefix of every event emitted by this crate.
pub const TARGET_PREFIX: &str = "visual_search";

/// Compact RFC3339 UTC timestamps via `chrono`, e.g. `2026-08-06T10:20:30Z`.
#[derive(Clone, Debug)]
struct UtcTimer;

impl FormatTime for UtcTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let ts = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&ts)
    }
}

/// A formatting layer scoped to this library's events.
///
/// Single-line compact output with UTC timestamps and span-close events,
/// so instrumented calls report their duration. ANSI colors are enabled
/// only when stdout is a terminal. Events from other crates pass through
/// untouched for whatever other layers the binary installs.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .compact()
        .with_timer(UtcTimer)
        .with_target(true)
        .with_ansi(io::stdout().is_terminal())
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_filter(filter::filter_fn(|meta| {
            meta.target().starts_with(TARGET_PREFIX)
        }))
}

/// Env filter honoring `RUST_LOG`, with a fallback for everything else and
/// the given level for this crate.
///
/// `env_filter("warn", Level::DEBUG)` shows warnings globally and debug
/// output for the library only.
pub fn env_filter(default: &str, crate_level: Level) -> EnvFilter {
    let directive = format!("{TARGET_PREFIX}={}", crate_level.as_str().to_lowercase());
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default))
        .add_directive(
            filter::Directive::from_str(&directive).expect("valid level directive"),
        )
}
