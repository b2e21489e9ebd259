//! Command-line surface for the visual product matcher client.
//!
//! The binary stays thin; this crate parses arguments, drives a
//! [`visual_search::search_session::SearchSession`] end to end, and renders
//! whatever the session state says should be shown.

use std::error::Error;

use clap::{Parser, Subcommand};

mod probe;
mod render;
mod search;

#[derive(Parser)]
#[command(name = "visual-matcher")]
#[command(about = "Find visually similar products from a query image", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search with a local image file
    SearchFile(search::SearchFileArgs),

    /// Search with a remote image URL
    SearchUrl(search::SearchUrlArgs),

    /// Show catalog statistics
    Stats(probe::StatsArgs),

    /// Check that the backend is up
    Health(probe::HealthArgs),
}

/// Parses the command line and runs the selected command.
pub async fn start() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::SearchFile(args) => search::execute_file(args).await?,
        Commands::SearchUrl(args) => search::execute_url(args).await?,
        Commands::Stats(args) => probe::execute_stats(args).await?,
        Commands::Health(args) => probe::execute_health(args).await?,
    }

    Ok(())
}
