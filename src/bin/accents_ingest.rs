//! Ingestion entrypoint.
//!
//! Rebuilds the accent knowledge base from the configured knowledge directory. Command-line
//! flags override the matching environment variables.
use std::path::PathBuf;

use anyhow::{Context, Result};
use arabic_accents::{
    config,
    ingest::{IngestService, SourceLayout},
    logging,
};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "accents-ingest",
    about = "Build accent documents and the registry from PDFs, contributions, and dialect files"
)]
struct Cli {
    /// Root holding loose PDFs and the `contributions` folder (`ACCENTS_KNOWLEDGE_DIR`).
    #[arg(long)]
    knowledge_dir: Option<PathBuf>,
    /// Output directory for accent documents (`ACCENTS_DATA_DIR`).
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Directory with dialect vocabulary JSON files (`ACCENTS_DIALECTS_DIR`).
    #[arg(long)]
    dialects_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing();
    if let Err(err) = run(cli).await {
        tracing::error!(error = %format!("{err:#}"), "Ingestion failed");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::init_config();

    let knowledge_dir = cli.knowledge_dir.unwrap_or(config.knowledge_dir);
    let data_dir = cli.data_dir.unwrap_or(config.data_dir);
    let dialects_dir = cli.dialects_dir.unwrap_or(config.dialects_dir);

    let layout = SourceLayout::new(knowledge_dir).with_dialects_dir(dialects_dir);
    let summary = IngestService::new()
        .run(&layout, &data_dir)
        .await
        .with_context(|| format!("failed to write {}", data_dir.display()))?;

    println!("Done. {} accent(s) ready.", summary.documents_written());
    Ok(())
}
