//! HTTP client for the evex event-export API.
//!
//! This crate is the transport layer behind the poller and the CLI:
//!
//! - [`ClientConfig`] - Host/credential resolution and timeouts
//! - [`ApiClient`] - Trigger an export, fetch task status
//! - [`download_artifact`] - Streamed artifact download with SSE-C headers

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod download;

pub use client::{ApiClient, ClientConfig, DEFAULT_API_HOST, resolve_api_host};
pub use download::{DownloadOptions, download_artifact};
