//! Core types for the evex event-export client.
//!
//! This crate provides the fundamental data structures used throughout evex:
//!
//! - [`TaskStatus`] - A snapshot of server-reported export progress
//! - [`TaskState`] - Normalized terminal/non-terminal task classification
//! - [`EncryptionConfig`] - SSE-C customer-key encryption descriptor
//! - [`S3Config`] - Custom object-storage destination for an export

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod s3;
mod task;

pub use error::{ExportError, Result, SseKeyError};
pub use s3::{EncryptionConfig, S3Config};
pub use task::{TaskState, TaskStatus};
