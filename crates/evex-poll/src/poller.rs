//! The poll loop.

use std::future::Future;
use std::time::Duration;

use evex_types::{ExportError, Result, TaskState, TaskStatus};
use tokio::time::Instant;

use crate::progress::{ProgressUpdate, derive_update};

/// Default polling interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Abstract source of task-status snapshots.
///
/// The HTTP layer implements this; tests script it. The poller never retries
/// a failed fetch — transport errors propagate to the caller.
pub trait StatusSource {
    /// Fetches the current status snapshot for the given task.
    fn fetch_status(&self, task_uuid: &str) -> impl Future<Output = Result<TaskStatus>> + Send;
}

/// Polling parameters.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Delay between consecutive fetches.
    pub interval: Duration,
    /// Overall deadline; `None` polls without limit.
    pub max_wait: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_wait: None,
        }
    }
}

/// Polls a task until it reaches a terminal state or the deadline elapses.
///
/// Each iteration checks the deadline strictly before fetching, so a
/// zero or already-elapsed `max_wait` fails with [`ExportError::Timeout`]
/// without performing a single fetch. Non-terminal iterations emit an
/// advisory [`ProgressUpdate`] through `on_progress` and then sleep for the
/// configured interval.
///
/// A `FINISHED` task returns its download URL; the URL may legitimately be
/// absent (`Ok(None)`), which callers should treat as success with a
/// warning rather than a failure.
///
/// # Errors
///
/// Returns [`ExportError::Timeout`] when the deadline elapses,
/// [`ExportError::TaskFailed`] when the server reports a failure-family
/// state, and propagates any fetch error unchanged.
pub async fn poll_task<S, F>(
    source: &S,
    task_uuid: &str,
    config: PollConfig,
    mut on_progress: F,
) -> Result<Option<String>>
where
    S: StatusSource,
    F: FnMut(&ProgressUpdate),
{
    let start = Instant::now();
    // Saturate on overflow rather than quietly dropping the deadline.
    let deadline = config.max_wait.map(|wait| {
        start
            .checked_add(wait)
            .unwrap_or_else(|| start + Duration::from_secs(86400 * 365 * 30))
    });

    // Sliding window of exactly one prior sample, kept in locals so the
    // poller stays reentrant.
    let mut prev: Option<(u64, Instant)> = None;

    loop {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                return Err(ExportError::Timeout {
                    task_uuid: task_uuid.to_string(),
                    waited: start.elapsed(),
                });
            }
        }

        let status = source.fetch_status(task_uuid).await?;

        match &status.state {
            TaskState::Finished => return Ok(status.download_url),
            TaskState::Failed | TaskState::Canceled => {
                return Err(ExportError::TaskFailed {
                    state: status.state.label().to_string(),
                    detail: status
                        .error_detail
                        .unwrap_or_else(|| "(no detail provided)".to_string()),
                });
            }
            TaskState::InProgress(_) => {}
        }

        let now = Instant::now();
        on_progress(&derive_update(&status, prev, now));
        prev = Some((status.progress_count, now));

        tokio::time::sleep(config.interval).await;
    }
}
