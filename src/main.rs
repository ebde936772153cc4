use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod aggregator;
mod chunker;
mod cli;
mod client;
mod config;
mod error;
mod parser;
mod pipeline;
mod report;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("clauselens=debug")
    } else {
        EnvFilter::new("clauselens=warn")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Analyze(args) => cli::analyze::execute(args).await,
        Commands::Init(args) => cli::init::execute(args),
    }
}
