//! API client configuration and task endpoints.

use std::time::Duration;

use evex_poll::StatusSource;
use evex_types::{ExportError, Result, S3Config, TaskStatus};
use reqwest::StatusCode;

/// Default API host when neither the argument nor `API_HOST` is set.
pub const DEFAULT_API_HOST: &str = "api.sekoia.io";

/// Resolves the API host: explicit argument, then the `API_HOST`
/// environment variable, then [`DEFAULT_API_HOST`].
#[must_use]
pub fn resolve_api_host(api_host: Option<&str>) -> String {
    api_host
        .map(str::to_string)
        .or_else(|| std::env::var("API_HOST").ok())
        .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
}

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API host, either a bare hostname (`https://` is assumed) or a full
    /// base URL including the scheme.
    pub api_host: String,
    /// Bearer token for the API.
    pub api_key: String,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Read timeout for status/trigger requests.
    pub read_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration with the default timeouts.
    pub fn new(api_key: impl Into<String>, api_host: Option<&str>) -> Self {
        Self {
            api_host: resolve_api_host(api_host),
            api_key: api_key.into(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(30),
            user_agent: format!("evex/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Creates a configuration taking the API key from the `API_KEY`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `API_KEY` is not set.
    pub fn from_env(api_host: Option<&str>) -> Result<Self> {
        let api_key = std::env::var("API_KEY")
            .map_err(|_| ExportError::Config("API_KEY environment variable not set".to_string()))?;
        Ok(Self::new(api_key, api_host))
    }

    /// Returns the base URL for request building.
    fn base_url(&self) -> String {
        if self.api_host.contains("://") {
            self.api_host.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", self.api_host)
        }
    }
}

/// Client for the event-export API.
///
/// Cheap to clone; all requests carry bearer authentication and the
/// configured connect/read timeouts. The client performs no retries of its
/// own — a non-success response surfaces as [`ExportError::Transport`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Creates a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| ExportError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Triggers an export for the given search job.
    ///
    /// Sends an empty body when neither an S3 block nor a field list was
    /// provided. Accepts 200/201/202 responses.
    ///
    /// # Errors
    ///
    /// Returns a transport error on any other status, on network failure,
    /// or when the response carries no `task_uuid`.
    pub async fn trigger_export(
        &self,
        job_uuid: &str,
        s3: Option<&S3Config>,
        fields: &[String],
    ) -> Result<String> {
        let url = format!(
            "{}/v1/sic/conf/events/search/jobs/{job_uuid}/export",
            self.config.base_url()
        );

        let mut body = serde_json::Map::new();
        if let Some(s3) = s3 {
            body.insert("s3".to_string(), serde_json::to_value(s3)?);
        }
        if !fields.is_empty() {
            body.insert("fields".to_string(), serde_json::to_value(fields)?);
        }

        let mut request = self.client.post(&url).bearer_auth(&self.config.api_key);
        if !body.is_empty() {
            request = request.json(&serde_json::Value::Object(body));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ExportError::Transport(e.to_string()))?;

        let status = response.status();
        if !matches!(
            status,
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED
        ) {
            let text = response.text().await.unwrap_or_default();
            return Err(ExportError::Transport(format!(
                "Failed to trigger export: {status} {text}"
            )));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ExportError::Transport(e.to_string()))?;
        value
            .get("task_uuid")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                ExportError::Transport("No task UUID returned from export trigger".to_string())
            })
    }

    /// Fetches the current status of an export task.
    ///
    /// # Errors
    ///
    /// Returns a transport error on a non-200 response or network failure,
    /// and a JSON error if the body cannot be parsed.
    pub async fn fetch_task(&self, task_uuid: &str) -> Result<TaskStatus> {
        let url = format!("{}/v1/tasks/{task_uuid}", self.config.base_url());

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| ExportError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExportError::Transport(e.to_string()))?;

        if status != StatusCode::OK {
            return Err(ExportError::Transport(format!(
                "Failed to get export status: {status} {body}"
            )));
        }

        Ok(TaskStatus::from_body(&body)?)
    }
}

impl StatusSource for ApiClient {
    fn fetch_status(
        &self,
        task_uuid: &str,
    ) -> impl std::future::Future<Output = Result<TaskStatus>> + Send {
        self.fetch_task(task_uuid)
    }
}
