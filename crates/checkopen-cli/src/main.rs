use anyhow::Context;
use checkopen_core::VenueStatus;
use checkopen_scraper::WongnaiClient;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "checkopen-cli")]
#[command(about = "Check whether a Wongnai restaurant is open right now")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up the current open/closed status of one venue
    Status {
        /// Venue identifier as it appears in the restaurant page URL
        venue_id: String,
        /// Print the full status record as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = checkopen_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Status { venue_id, json } => {
            tracing::debug!(venue_id, base_url = %config.base_url, "resolving venue status");
            let client = WongnaiClient::from_app_config(&config)?;
            let status = client
                .lookup(&venue_id)
                .await
                .with_context(|| format!("failed to look up venue {venue_id}"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("{}", format_status_line(&status));
            }
        }
    }

    Ok(())
}

/// One-line human summary, e.g. `Jay Fai [12345ab]: closing soon (closing soon, open until 21:00)`.
fn format_status_line(status: &VenueStatus) -> String {
    let label = status.status().as_str().replace('_', " ");
    let head = if status.name().is_empty() {
        format!("{}: {label}", status.venue_id())
    } else {
        format!("{} [{}]: {label}", status.name(), status.venue_id())
    };
    match status.message() {
        Some(message) => format!("{head} ({message})"),
        None => head,
    }
}
