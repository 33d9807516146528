//! Rust client library for asynchronous event-export jobs.
//!
//! This is a facade crate that re-exports functionality from the evex
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use evex_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::from_env(None)?)?;
//!     let s3 = S3Options::default().merged_with_env().build(true)?;
//!
//!     let task_uuid = client.trigger_export("job-uuid", s3.as_ref(), &[]).await?;
//!     let url = poll_task(&client, &task_uuid, PollConfig::default(), |update| {
//!         println!("{update:?}");
//!     })
//!     .await?;
//!
//!     if let Some(url) = url {
//!         let encryption = s3.as_ref().and_then(|c| c.encryption.clone());
//!         download_artifact(&url, encryption.as_ref(), Default::default(), |_, _| {}).await?;
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use evex_types::*;

// Re-export configuration builders
pub use evex_sse::{DEFAULT_ALGORITHM, S3Options, SseOptions, generate_key};

// Re-export the HTTP layer
pub use evex_api::{
    ApiClient, ClientConfig, DEFAULT_API_HOST, DownloadOptions, download_artifact,
    resolve_api_host,
};

// Re-export the poller
pub use evex_poll::{DEFAULT_INTERVAL, Eta, PollConfig, ProgressUpdate, StatusSource, poll_task};

/// Prelude module for convenient imports.
///
/// ```
/// use evex_lib::prelude::*;
/// ```
pub mod prelude {
    pub use evex_types::{
        EncryptionConfig, ExportError, Result, S3Config, SseKeyError, TaskState, TaskStatus,
    };

    pub use evex_sse::{S3Options, SseOptions, generate_key};

    pub use evex_api::{ApiClient, ClientConfig, DownloadOptions, download_artifact};

    pub use evex_poll::{Eta, PollConfig, ProgressUpdate, StatusSource, poll_task};
}
