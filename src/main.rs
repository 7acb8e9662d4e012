mod extract;
mod models;
mod prompt;
mod providers;
mod render;
mod search;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use models::SearchCriteria;
use providers::types::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use providers::{GeminiClient, GeminiConfig};
use render::Outcome;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Flight price research with a search-grounded Gemini model", long_about = None)]
struct Cli {
    /// Departure city or airport
    #[arg(long = "from")]
    origin: String,

    /// Destination city or airport
    #[arg(long = "to")]
    destination: String,

    /// Earliest departure date (YYYY-MM-DD)
    #[arg(long)]
    depart_after: NaiveDate,

    /// Latest departure date (YYYY-MM-DD)
    #[arg(long)]
    depart_before: NaiveDate,

    /// Trip length in days
    #[arg(long, default_value_t = 7)]
    days: u32,

    /// Also consider airports within this many km of the origin
    #[arg(long, default_value_t = 0)]
    radius_km: u32,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// HTTP timeout for the model call
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Write the search outcome as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Open the aggregator link in the default browser
    #[arg(long)]
    open: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, results to stdout
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let criteria = SearchCriteria::new(
        &cli.origin,
        &cli.destination,
        cli.days,
        cli.depart_after,
        cli.depart_before,
        cli.radius_km,
    )
    .context("Invalid search criteria")?;

    let mut config = GeminiConfig::new(cli.api_key);
    config.model = cli.model;
    config.base_url = cli.base_url;
    config.timeout = Duration::from_secs(cli.timeout_secs);
    info!("✈️  Flight Scout using {:?}", config);

    let provider = GeminiClient::new(config)?;
    let result = search::search_flights(&provider, &criteria).await;

    let outcome = Outcome::classify(&result);
    print!("{}", outcome);

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Flight search failed: {}", e);
            return Err(e).context("Flight search failed");
        }
    };

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&outcome)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved search outcome to {}", path.display());
    }

    if cli.open {
        match &outcome.flight_info {
            Some(summary) => open::that(&summary.search_link)
                .with_context(|| format!("Failed to open {}", summary.search_link))?,
            None => warn!("No search link to open"),
        }
    }

    Ok(())
}
