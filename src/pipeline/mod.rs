mod dispatcher;
mod task;

pub use dispatcher::{dispatch, TaskFailure, TaskOutcome};
pub use task::{plan_tasks, AnalysisTask, TaskLabel};

use crate::aggregator::{self, AggregatedReport};
use crate::chunker;
use crate::client::AnalysisClient;
use crate::config::Config;
use crate::parser::{self, PartialResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// One document submission: idle until `run` is called, running through
/// chunk → plan → dispatch → parse → combine, then done. `run` consumes
/// the pipeline, so an instance cannot be reused for another document.
pub struct Pipeline {
    config: Config,
    client: Arc<dyn AnalysisClient>,
}

impl Pipeline {
    pub fn new(config: Config, client: Arc<dyn AnalysisClient>) -> Self {
        Self { config, client }
    }

    /// Analyze one document. Never fails: every failure mode below this
    /// boundary resolves into the report itself.
    pub async fn run(self, document: &str) -> AggregatedReport {
        let chunks = match chunker::split(document, self.config.max_chunk_chars) {
            Ok(chunks) => chunks,
            Err(e) => return AggregatedReport::configuration_failure(&e.to_string()),
        };
        info!("split document into {} chunk(s)", chunks.len());

        let tasks = task::plan_tasks(&chunks, &self.config.categories);
        info!("dispatching {} analysis task(s)", tasks.len());

        let outcomes = dispatcher::dispatch(
            self.client.clone(),
            tasks,
            Duration::from_secs(self.config.timeout_sec),
            self.config.concurrency,
        )
        .await;

        // A failed task yields an absent slot; a malformed response yields
        // an ok=false result. Both stay visible to the aggregator's counts.
        let results: Vec<Option<PartialResult>> = outcomes
            .into_iter()
            .map(|(label, outcome)| match outcome {
                TaskOutcome::Response(raw) => Some(parser::parse(&raw, label)),
                TaskOutcome::Failed(failure) => {
                    warn!("no result for {}: {}", label, failure);
                    None
                }
            })
            .collect();

        let report = aggregator::combine(&results);
        info!(
            "analysis finished: {} highlight(s)",
            report.highlights.len()
        );
        report
    }
}
