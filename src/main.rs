use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use opds_browser::app::AppContext;
use opds_browser::cli::{commands, Cli, Commands};
use opds_browser::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Convert { path, base_url } => {
            commands::convert(&ctx, &path, base_url.as_deref())?;
        }
        Commands::Fetch { url, json } => {
            commands::fetch(&ctx, &url, json).await?;
        }
        Commands::Browse { urls } => {
            commands::browse(&ctx, urls).await?;
        }
        Commands::Search { terms, url } => {
            commands::search(&ctx, &terms, url).await?;
        }
    }

    Ok(())
}
