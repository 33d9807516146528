//! Task status snapshots and terminal-state normalization.

use serde::Deserialize;

/// Normalized classification of a server-reported task state.
///
/// The server's `status` field is an open string set; only the terminal
/// spellings are distinguished. Anything unrecognized is carried through as
/// [`TaskState::InProgress`] so that server-added intermediate states keep
/// the poller looping instead of breaking it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    /// The export completed successfully.
    Finished,
    /// The export failed.
    Failed,
    /// The export was cancelled (either spelling).
    Canceled,
    /// Any other state, preserved verbatim for display.
    InProgress(String),
}

impl TaskState {
    /// Normalizes a raw server state string.
    ///
    /// Matching is case-insensitive and treats `CANCELED` and `CANCELLED`
    /// as the same terminal state.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "FINISHED" => Self::Finished,
            "FAILED" => Self::Failed,
            "CANCELED" | "CANCELLED" => Self::Canceled,
            _ => Self::InProgress(raw.to_string()),
        }
    }

    /// Returns true if this state ends the poll loop.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress(_))
    }

    /// Returns the state as a display label.
    ///
    /// Terminal states render in their canonical spelling; in-progress
    /// states render whatever the server sent.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Finished => "FINISHED",
            Self::Failed => "FAILED",
            Self::Canceled => "CANCELED",
            Self::InProgress(raw) => raw,
        }
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A snapshot of server-reported export progress.
///
/// Created fresh from every poll response; no identity persists between
/// calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatus {
    /// Normalized task state.
    pub state: TaskState,
    /// Items completed so far (0 when absent or null).
    pub progress_count: u64,
    /// Total items expected (0 means unknown).
    pub total: u64,
    /// Pre-signed artifact URL, present only on `FINISHED` when the server
    /// supplies one.
    pub download_url: Option<String>,
    /// Failure detail, present only on failure-family states.
    pub error_detail: Option<String>,
}

/// Serde mirror of the task-status endpoint's JSON body.
#[derive(Debug, Deserialize)]
struct RawTask {
    status: Option<String>,
    progress: Option<u64>,
    total: Option<u64>,
    message: Option<String>,
    #[serde(default)]
    attributes: RawAttributes,
}

#[derive(Debug, Default, Deserialize)]
struct RawAttributes {
    download_url: Option<String>,
    error: Option<String>,
}

impl TaskStatus {
    /// Parses a task-status response body.
    ///
    /// On failure-family states the error detail is taken from the
    /// top-level `message` field, then `attributes.error`, falling back to
    /// the raw response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON.
    pub fn from_body(body: &str) -> serde_json::Result<Self> {
        let raw: RawTask = serde_json::from_str(body)?;
        let state = TaskState::parse(raw.status.as_deref().unwrap_or_default());

        let error_detail = match state {
            TaskState::Failed | TaskState::Canceled => Some(
                raw.message
                    .or(raw.attributes.error)
                    .unwrap_or_else(|| body.to_string()),
            ),
            _ => None,
        };

        Ok(Self {
            state,
            progress_count: raw.progress.unwrap_or(0),
            total: raw.total.unwrap_or(0),
            download_url: raw.attributes.download_url,
            error_detail,
        })
    }

    /// Creates an in-progress snapshot, mainly useful in tests.
    #[must_use]
    pub fn in_progress(state: &str, progress_count: u64, total: u64) -> Self {
        Self {
            state: TaskState::parse(state),
            progress_count,
            total,
            download_url: None,
            error_detail: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_normalization() {
        assert_eq!(TaskState::parse("FINISHED"), TaskState::Finished);
        assert_eq!(TaskState::parse("finished"), TaskState::Finished);
        assert_eq!(TaskState::parse("FAILED"), TaskState::Failed);
        assert_eq!(TaskState::parse("CANCELED"), TaskState::Canceled);
        assert_eq!(TaskState::parse("CANCELLED"), TaskState::Canceled);
        assert_eq!(TaskState::parse("cancelled"), TaskState::Canceled);
        assert_eq!(
            TaskState::parse("RUNNING"),
            TaskState::InProgress("RUNNING".to_string())
        );
    }

    #[test]
    fn test_unknown_state_is_not_terminal() {
        assert!(!TaskState::parse("EXPORTING").is_terminal());
        assert!(TaskState::parse("FINISHED").is_terminal());
        assert!(TaskState::parse("CANCELLED").is_terminal());
    }

    #[test]
    fn test_from_body_finished_with_url() {
        let body = r#"{
            "status": "FINISHED",
            "progress": 100,
            "total": 100,
            "attributes": {"download_url": "https://x/y"}
        }"#;
        let status = TaskStatus::from_body(body).unwrap();
        assert_eq!(status.state, TaskState::Finished);
        assert_eq!(status.download_url.as_deref(), Some("https://x/y"));
        assert_eq!(status.error_detail, None);
    }

    #[test]
    fn test_from_body_null_progress_defaults_to_zero() {
        let body = r#"{"status": "RUNNING", "progress": null, "total": null}"#;
        let status = TaskStatus::from_body(body).unwrap();
        assert_eq!(status.progress_count, 0);
        assert_eq!(status.total, 0);
    }

    #[test]
    fn test_from_body_error_detail_prefers_message() {
        let body = r#"{
            "status": "FAILED",
            "message": "quota exceeded",
            "attributes": {"error": "secondary"}
        }"#;
        let status = TaskStatus::from_body(body).unwrap();
        assert_eq!(status.error_detail.as_deref(), Some("quota exceeded"));
    }

    #[test]
    fn test_from_body_error_detail_falls_back_to_attributes() {
        let body = r#"{"status": "CANCELLED", "attributes": {"error": "operator cancel"}}"#;
        let status = TaskStatus::from_body(body).unwrap();
        assert_eq!(status.state, TaskState::Canceled);
        assert_eq!(status.error_detail.as_deref(), Some("operator cancel"));
    }

    #[test]
    fn test_from_body_error_detail_falls_back_to_raw_body() {
        let body = r#"{"status": "FAILED"}"#;
        let status = TaskStatus::from_body(body).unwrap();
        assert_eq!(status.error_detail.as_deref(), Some(body));
    }

    #[test]
    fn test_from_body_missing_status_is_in_progress() {
        let body = r#"{"progress": 5, "total": 10}"#;
        let status = TaskStatus::from_body(body).unwrap();
        assert!(!status.state.is_terminal());
    }
}
