//! Bounded concurrent fan-out with a per-task timeout.
//!
//! Runs one task per key with at most `max_concurrency` tasks in flight. A
//! task that fails or exceeds `task_timeout` is recorded against its key;
//! sibling tasks keep running.

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Limits for a fan-out run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanoutConfig {
    pub max_concurrency: usize,
    pub task_timeout: Duration,
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            task_timeout: Duration::from_secs(10),
        }
    }
}

/// Result of a single task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome<T> {
    Completed(T),
    Failed(String),
    /// The task was dropped after exceeding the timeout.
    TimedOut,
}

impl<T> TaskOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Aggregated counts for a fan-out run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub timed_out: usize,
    /// Key -> error message, for failed and timed-out tasks.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

impl BatchReport {
    pub fn from_outcomes<K: Display, T>(outcomes: &[(K, TaskOutcome<T>)]) -> Self {
        let mut report = Self::default();
        for (key, outcome) in outcomes {
            match outcome {
                TaskOutcome::Completed(_) => report.record_success(),
                TaskOutcome::Failed(message) => report.record_failure(key.to_string(), message),
                TaskOutcome::TimedOut => report.record_timeout(key.to_string()),
            }
        }
        report
    }

    pub fn record_success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, key: String, message: impl Into<String>) {
        self.total += 1;
        self.failed += 1;
        self.errors.insert(key, message.into());
    }

    pub fn record_timeout(&mut self, key: String) {
        self.total += 1;
        self.timed_out += 1;
        self.errors.insert(key, "timed out".to_string());
    }

    /// True when every task completed.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.timed_out == 0
    }
}

/// Run `task` for every key, at most `config.max_concurrency` at a time.
///
/// Outcomes are returned in completion order, paired with their key.
pub async fn run_bounded<K, T, E, F, Fut>(
    keys: Vec<K>,
    config: &FanoutConfig,
    task: F,
) -> Vec<(K, TaskOutcome<T>)>
where
    K: Clone,
    E: Display,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let limit = config.max_concurrency.max(1);
    let timeout = config.task_timeout;

    stream::iter(keys)
        .map(|key| {
            let work = task(key.clone());
            async move {
                let outcome = match tokio::time::timeout(timeout, work).await {
                    Ok(Ok(value)) => TaskOutcome::Completed(value),
                    Ok(Err(e)) => TaskOutcome::Failed(e.to_string()),
                    Err(_) => TaskOutcome::TimedOut,
                };
                (key, outcome)
            }
        })
        .buffer_unordered(limit)
        .collect()
        .await
}
