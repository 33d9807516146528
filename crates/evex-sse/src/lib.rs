//! SSE-C key handling and S3 configuration builder for evex.
//!
//! This crate turns CLI arguments and environment fallbacks into the
//! [`S3Config`](evex_types::S3Config) block sent with an export trigger:
//!
//! - [`generate_key`] - Fresh 256-bit key, base64-encoded
//! - [`SseOptions`] - SSE-C inputs and the encryption-config builder
//! - [`S3Options`] - Bucket/credential inputs and the full S3 builder

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builder;
mod key;

pub use builder::{DEFAULT_ALGORITHM, S3Options, SseOptions};
pub use key::{SSE_KEY_LEN, compute_key_md5, decode_key, generate_key};
