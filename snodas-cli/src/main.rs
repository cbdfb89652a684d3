//! SNODAS CLI - inspect tile dates and pourpoints, and build statistics links.

use clap::Parser;
use snodas_core::config::{MapConfig, DEFAULT_API_ROOT};

#[derive(Parser)]
#[command(
    name = "snodas-cli",
    version,
    about = "SNODAS pourpoint query toolkit"
)]
struct Cli {
    /// Root of the SNODAS API; every endpoint and link hangs off it
    #[arg(long, global = true, default_value = DEFAULT_API_ROOT)]
    api_root: String,

    #[command(subcommand)]
    command: snodas_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = MapConfig::with_api_root(&cli.api_root);
    log::debug!("Using API root {}", config.api_root);
    snodas_cmd::run(cli.command, &config).await
}
