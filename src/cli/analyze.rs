use crate::aggregator::AggregatedReport;
use crate::cli::AnalyzeArgs;
use crate::client::create_client;
use crate::config::Config;
use crate::error::ConfigError;
use crate::pipeline::Pipeline;
use crate::report;
use anyhow::{bail, Context};
use std::io::Read;
use std::path::Path;
use tracing::info;

pub async fn execute(args: AnalyzeArgs) -> anyhow::Result<()> {
    // The config file is optional for analyze; defaults apply when absent.
    let mut config = if args.config.exists() {
        info!("Loading config from {:?}", args.config);
        Config::load(&args.config)?
    } else {
        Config::default()
    };

    // Apply CLI overrides
    if let Some(kind) = args.client.as_deref() {
        config.client = kind.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(api_key) = args.api_key {
        config.api_key = Some(api_key);
    }
    if let Some(max_chars) = args.max_chars {
        config.max_chunk_chars = max_chars;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(timeout_sec) = args.timeout_sec {
        config.timeout_sec = timeout_sec;
    }

    // Malformed inbound payload is rejected before the pipeline runs.
    let document = read_document(args.file.as_deref())?;
    if document.trim().is_empty() {
        bail!("Document is empty; pass a file with Terms of Service text or pipe it to stdin");
    }

    let aggregated = match run_pipeline(&config, &document).await {
        Ok(report) => report,
        // Fatal configuration fault: the caller still gets a well-formed,
        // explanatory report rather than an error.
        Err(e) => AggregatedReport::configuration_failure(&e.to_string()),
    };

    match args.format.as_str() {
        "json" => println!("{}", report::to_json(&aggregated)?),
        "text" => print!("{}", report::render_text(&aggregated)),
        other => bail!("Unknown format '{}' (expected json or text)", other),
    }

    if let Some(path) = &args.output {
        report::write_report(path, &aggregated)?;
        info!("Wrote report to {}", path.display());
    }

    Ok(())
}

async fn run_pipeline(config: &Config, document: &str) -> Result<AggregatedReport, ConfigError> {
    config.validate()?;
    let client = create_client(config)?;
    Ok(Pipeline::new(config.clone(), client).run(document).await)
}

fn read_document(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read document '{}'", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read document from stdin")?;
            Ok(buffer)
        }
    }
}
