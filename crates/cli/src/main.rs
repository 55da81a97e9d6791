//! `produto` — command-line client for the product API.
//!
//! ```bash
//! produto list --page 2 --page-size 10
//! produto get 42
//! produto create --name "Caneta" --description "Azul"
//! produto update 42 --name "Caneta preta"
//! produto delete 42
//! ```

mod cli;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use produto_client::{ClientConfig, ProductService};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    produto_observability::init(cli.log_filter());

    let config = match &cli.base_url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    }
    .context("invalid API base URL")?;

    tracing::debug!(base_url = %config.base_url(), "using product API");

    let service = ProductService::from_config(config);
    let output = cli.command.run(&service).await?;

    if let Some(value) = output {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &value).context("failed to write output")?;
        writeln!(stdout).context("failed to write output")?;
    }

    Ok(())
}
