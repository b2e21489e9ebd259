use anyhow::Result;
use clap::Args;
use colored::Colorize;

use visual_search::config::config_from_env;
use visual_search::health_service::HealthService;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Fetches and prints catalog statistics.
pub async fn execute_stats(args: StatsArgs) -> Result<()> {
    let cfg = config_from_env()?;
    let service = HealthService::new(&cfg)?;
    let stats = service.stats().await?;

    match args.format {
        OutputFormat::Human => {
            println!("Total products:  {}", stats.total_products.to_string().bold());
            println!(
                "Features loaded: {}",
                if stats.features_loaded {
                    "yes".green()
                } else {
                    "no".red()
                }
            );
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }
    Ok(())
}

/// Probes backend liveness; exits non-zero when the backend is down.
pub async fn execute_health(args: HealthArgs) -> Result<()> {
    let cfg = config_from_env()?;
    let service = HealthService::new(&cfg)?;
    let status = service.check().await;

    match args.format {
        OutputFormat::Human => {
            let flag = if status.ok { "up".green().bold() } else { "down".red().bold() };
            println!("{} {} ({} ms)", flag, status.endpoint, status.latency_ms);
            if !status.message.is_empty() {
                println!("{}", status.message.dimmed());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
    }

    if !status.ok {
        anyhow::bail!("backend at {} is not healthy", status.endpoint);
    }
    Ok(())
}
