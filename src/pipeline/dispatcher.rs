use super::task::{AnalysisTask, TaskLabel};
use crate::client::AnalysisClient;
use futures::stream::{FuturesUnordered, StreamExt};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::timeout as tokio_timeout;
use tracing::{debug, warn};

#[derive(Debug)]
pub enum TaskOutcome {
    Response(String),
    Failed(TaskFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFailure {
    Timeout(Duration),
    Transport(String),
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskFailure::Timeout(duration) => write!(f, "timeout after {:?}", duration),
            TaskFailure::Transport(reason) => write!(f, "transport failure: {}", reason),
        }
    }
}

/// Run every task concurrently against the client and wait for all of them.
///
/// One slot per task, written at most once, keyed by input index: the output
/// order is the input order no matter which call returns first. A task's
/// failure (transport error or timeout) lands in its own slot and never
/// cancels siblings. The futures are polled within the caller's task, so
/// dropping the returned future cancels all outstanding work.
pub async fn dispatch(
    client: Arc<dyn AnalysisClient>,
    tasks: Vec<AnalysisTask>,
    task_timeout: Duration,
    concurrency: usize,
) -> Vec<(TaskLabel, TaskOutcome)> {
    let total = tasks.len();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let mut in_flight = FuturesUnordered::new();
    for (idx, task) in tasks.into_iter().enumerate() {
        let client = client.clone();
        let semaphore = semaphore.clone();

        in_flight.push(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return (
                        idx,
                        task.label,
                        TaskOutcome::Failed(TaskFailure::Transport(
                            "dispatch queue closed".to_string(),
                        )),
                    );
                }
            };

            debug!("dispatching {}", task.label);
            let outcome = match tokio_timeout(task_timeout, client.call(&task)).await {
                Ok(Ok(raw)) => TaskOutcome::Response(raw),
                Ok(Err(e)) => {
                    warn!("task {} failed: {}", task.label, e);
                    TaskOutcome::Failed(TaskFailure::Transport(e.to_string()))
                }
                Err(_) => {
                    warn!("task {} timed out after {:?}", task.label, task_timeout);
                    TaskOutcome::Failed(TaskFailure::Timeout(task_timeout))
                }
            };

            (idx, task.label, outcome)
        });
    }

    let mut slots: Vec<Option<(TaskLabel, TaskOutcome)>> = Vec::with_capacity(total);
    slots.resize_with(total, || None);

    while let Some((idx, label, outcome)) = in_flight.next().await {
        debug_assert!(slots[idx].is_none());
        slots[idx] = Some((label, outcome));
    }

    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RawResponse;
    use crate::error::ClientError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::time::sleep;

    /// Responds after a per-call delay taken from the chunk index; fails
    /// on labels listed in `failing`.
    struct ScriptedClient {
        delays_ms: Vec<u64>,
        failing: Vec<usize>,
        hang: Vec<usize>,
    }

    impl ScriptedClient {
        fn instant() -> Self {
            Self {
                delays_ms: Vec::new(),
                failing: Vec::new(),
                hang: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl AnalysisClient for ScriptedClient {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn call(&self, task: &AnalysisTask) -> Result<RawResponse, ClientError> {
            let index = match task.label {
                TaskLabel::Chunk { index, .. } => index,
                TaskLabel::Category { .. } => 0,
            };
            if self.hang.contains(&index) {
                sleep(Duration::from_secs(3600)).await;
            }
            if let Some(delay) = self.delays_ms.get(index) {
                sleep(Duration::from_millis(*delay)).await;
            }
            if self.failing.contains(&index) {
                return Err(ClientError::EmptyBody);
            }
            Ok(format!("response-{index}"))
        }
    }

    fn tasks(n: usize) -> Vec<AnalysisTask> {
        (0..n)
            .map(|index| AnalysisTask {
                label: TaskLabel::Chunk { index, total: n },
                context: String::new(),
                text: format!("chunk {index}"),
            })
            .collect()
    }

    fn label_indices(results: &[(TaskLabel, TaskOutcome)]) -> Vec<usize> {
        results
            .iter()
            .map(|(label, _)| match label {
                TaskLabel::Chunk { index, .. } => *index,
                TaskLabel::Category { .. } => unreachable!(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_order_preserved_under_reversed_completion() {
        let client = Arc::new(ScriptedClient {
            delays_ms: vec![60, 30, 0],
            failing: Vec::new(),
            hang: Vec::new(),
        });
        let results = dispatch(client, tasks(3), Duration::from_secs(5), 3).await;

        assert_eq!(label_indices(&results), vec![0, 1, 2]);
        for (i, (_, outcome)) in results.iter().enumerate() {
            match outcome {
                TaskOutcome::Response(raw) => assert_eq!(raw, &format!("response-{i}")),
                TaskOutcome::Failed(f) => panic!("task {i} failed: {f}"),
            }
        }
    }

    #[tokio::test]
    async fn test_failures_isolated_to_their_slots() {
        let client = Arc::new(ScriptedClient {
            delays_ms: Vec::new(),
            failing: vec![1, 3],
            hang: Vec::new(),
        });
        let results = dispatch(client, tasks(5), Duration::from_secs(5), 5).await;

        assert_eq!(results.len(), 5);
        assert_eq!(label_indices(&results), vec![0, 1, 2, 3, 4]);
        for (i, (_, outcome)) in results.iter().enumerate() {
            let should_fail = i == 1 || i == 3;
            match outcome {
                TaskOutcome::Response(_) => assert!(!should_fail, "task {i} should fail"),
                TaskOutcome::Failed(TaskFailure::Transport(_)) => {
                    assert!(should_fail, "task {i} should succeed")
                }
                TaskOutcome::Failed(other) => panic!("unexpected failure: {other}"),
            }
        }
    }

    #[tokio::test]
    async fn test_timeout_resolves_slot_with_timeout_reason() {
        let client = Arc::new(ScriptedClient {
            delays_ms: Vec::new(),
            failing: Vec::new(),
            hang: vec![0],
        });
        let timeout = Duration::from_millis(50);
        let results = dispatch(client, tasks(2), timeout, 2).await;

        assert!(matches!(
            results[0].1,
            TaskOutcome::Failed(TaskFailure::Timeout(t)) if t == timeout
        ));
        assert!(matches!(results[1].1, TaskOutcome::Response(_)));
    }

    #[tokio::test]
    async fn test_concurrency_cap_still_completes_all() {
        let client = Arc::new(ScriptedClient {
            delays_ms: vec![10, 10, 10, 10, 10, 10],
            failing: Vec::new(),
            hang: Vec::new(),
        });
        let results = dispatch(client, tasks(6), Duration::from_secs(5), 2).await;
        assert_eq!(results.len(), 6);
        assert_eq!(label_indices(&results), vec![0, 1, 2, 3, 4, 5]);
    }

    /// Flags whether a call is currently in flight; the flag clears when
    /// the call future is dropped, not just when it completes.
    struct HangingClient {
        in_call: Arc<AtomicBool>,
    }

    struct ClearOnDrop(Arc<AtomicBool>);

    impl Drop for ClearOnDrop {
        fn drop(&mut self) {
            self.0.store(false, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl AnalysisClient for HangingClient {
        fn name(&self) -> &'static str {
            "hanging"
        }

        async fn call(&self, _task: &AnalysisTask) -> Result<RawResponse, ClientError> {
            self.in_call.store(true, Ordering::SeqCst);
            let _guard = ClearOnDrop(self.in_call.clone());
            sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn test_dropping_dispatch_cancels_in_flight_calls() {
        let in_call = Arc::new(AtomicBool::new(false));
        let client = Arc::new(HangingClient {
            in_call: in_call.clone(),
        });

        let mut dispatching = Box::pin(dispatch(client, tasks(1), Duration::from_secs(3600), 1));
        tokio::select! {
            _ = &mut dispatching => panic!("dispatch should still be waiting on the client"),
            _ = sleep(Duration::from_millis(20)) => {}
        }
        assert!(in_call.load(Ordering::SeqCst));

        // The calls are polled within the dispatch future itself, so
        // dropping it must tear down the in-flight client call.
        drop(dispatching);
        assert!(!in_call.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_no_tasks_yields_no_results() {
        let results = dispatch(
            Arc::new(ScriptedClient::instant()),
            Vec::new(),
            Duration::from_secs(1),
            4,
        )
        .await;
        assert!(results.is_empty());
    }
}
