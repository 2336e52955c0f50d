mod cli;
mod commands;
mod mcp;
mod output_path;
mod page_range;
mod pdf;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use commands::select::SelectOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

/// Default filter directives when `RUST_LOG` is unset. lopdf reports recoverable
/// damage through `log`, which would otherwise add lines next to the one-line
/// diagnostic.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn,lopdf=error"
    }
}

/// Logs go to stderr; stdout carries the page list and the MCP transport.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    if cli.mcp {
        return mcp::run_server().await;
    }

    let input = cli.input.context("missing input PDF")?;
    let options = SelectOptions {
        pages: cli.pages.context("missing pages expression")?,
        output: cli.output,
        print_only: cli.print_only,
    };
    commands::select::run(&input, &options)
}
