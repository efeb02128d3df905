//! pagemend CLI — reconstruct structured documents from lossy PDF text.
//!
//! Extracts raw text through a backend fallback chain, repairs spacing
//! defects, optionally rewrites via a generative service, and reassembles
//! headings and paragraphs into a clean output document.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
