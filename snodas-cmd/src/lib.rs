//! Command implementations for the SNODAS CLI.
//!
//! Provides subcommands for listing available tile dates and pourpoints, and
//! for building statistics query links with the same validation the query
//! map uses.

use clap::Subcommand;
use snodas_core::config::MapConfig;

pub mod dates;
pub mod link;
pub mod pourpoints;

pub use link::LinkQuery;

#[derive(Subcommand)]
pub enum Command {
    /// Show the range of dates that have SNODAS tiles
    Dates,

    /// List pourpoints sorted by name
    Pourpoints {
        /// Only show pourpoints whose name contains this text (case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Build a statistics query link
    Link {
        #[command(subcommand)]
        query: LinkQuery,
    },
}

pub async fn run(command: Command, config: &MapConfig) -> anyhow::Result<()> {
    match command {
        Command::Dates => dates::run_dates(config).await,
        Command::Pourpoints { filter } => {
            pourpoints::run_pourpoints(config, filter.as_deref()).await
        }
        Command::Link { query } => {
            let link = link::build_link(&query)
                .map_err(|reason| anyhow::anyhow!("Incomplete query: {}", reason))?;
            println!("{}", link.url(&config.api_root));
            Ok(())
        }
    }
}

/// GET `url` and return the body, failing on non-success status.
pub(crate) async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;
    log::info!("Fetching {}", url);
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}
