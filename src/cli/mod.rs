pub mod analyze;
pub mod init;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clauselens")]
#[command(
    author,
    version,
    about = "Concurrent Terms of Service analyzer with resilient LLM response parsing"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a document and print the report
    Analyze(AnalyzeArgs),

    /// Write a starter clauselens.yaml
    Init(InitArgs),
}

#[derive(Parser, Clone)]
pub struct AnalyzeArgs {
    /// Document to analyze ("-" or omitted reads stdin)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, default_value = "clauselens.yaml")]
    pub config: PathBuf,

    /// API key for the remote analysis service
    #[arg(long, env = "CLAUSELENS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Client implementation (openai, keyword)
    #[arg(long)]
    pub client: Option<String>,

    /// Override maximum chunk size in characters
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Override max parallel requests
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Override per-task timeout in seconds
    #[arg(long)]
    pub timeout_sec: Option<u64>,

    /// Output format (json, text)
    #[arg(long, default_value = "json")]
    pub format: String,

    /// Also write the JSON report to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Clone)]
pub struct InitArgs {
    /// Where to write the config
    #[arg(long, default_value = "clauselens.yaml")]
    pub config: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
