//! Task-status polling state machine for evex.
//!
//! This crate drives an abstract "fetch current status" operation (the HTTP
//! layer lives behind the [`StatusSource`] seam) until the task reaches a
//! terminal state or the deadline elapses:
//!
//! - [`poll_task`] - The poll loop itself
//! - [`PollConfig`] - Interval and optional deadline
//! - [`ProgressUpdate`] / [`Eta`] - Advisory progress emitted each iteration

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod poller;
mod progress;

pub use poller::{DEFAULT_INTERVAL, PollConfig, StatusSource, poll_task};
pub use progress::{Eta, ProgressUpdate};
