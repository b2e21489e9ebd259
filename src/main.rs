use std::error::Error;

use tracing::Level;
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use visual_search::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from a .env file when one is present.
    dotenvy::dotenv().ok();

    let env_filter = telemetry::env_filter("warn", Level::INFO);

    // The library layer renders visual-search events with timings; the
    // plain layer takes everything else so nothing is printed twice.
    let rest = fmt::layer()
        .with_target(false)
        .with_filter(filter::filter_fn(|meta| {
            !meta.target().starts_with(telemetry::TARGET_PREFIX)
        }));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(telemetry::layer())
        .with(rest)
        .init();

    cli::start().await?;

    Ok(())
}
