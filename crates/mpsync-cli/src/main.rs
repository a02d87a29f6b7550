mod output;
mod sync;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::sync::{run_sync, SyncOptions};

#[derive(Debug, Parser)]
#[command(name = "mpsync")]
#[command(about = "Export the marketplace product catalog as a storefront JSON snapshot")]
struct Cli {
    /// Write the snapshot here instead of `MPSYNC_OUTPUT_PATH`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fetch and normalize the catalog without writing the snapshot.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = mpsync_core::load_app_config().context("failed to load configuration")?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let options = SyncOptions {
        output_path: cli.output.unwrap_or_else(|| config.output_path.clone()),
        dry_run: cli.dry_run,
    };
    let summary = run_sync(&config, &options).await?;

    if summary.written {
        println!(
            "{} products written → {}",
            summary.products,
            summary.output_path.display()
        );
    } else {
        println!(
            "dry-run: {} products fetched in {} pages from {} endpoint, nothing written",
            summary.products, summary.pages, summary.endpoint
        );
    }

    Ok(())
}
