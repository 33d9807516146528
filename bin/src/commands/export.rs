//! Export command implementation.
//!
//! Triggers a server-side export for a search job, polls it to completion,
//! and downloads the resulting artifact.

use anyhow::Result;
use evex_lib::prelude::*;

use crate::CommonArgs;
use crate::commands::poll_and_download;
use crate::display;

/// Execute the export command.
///
/// Encryption is on by default here: when no key was supplied, one is
/// generated and shown once so the operator can save it.
pub(crate) async fn export(
    job_uuid: &str,
    fields: &[String],
    options: S3Options,
    common: &CommonArgs,
    quiet: bool,
) -> Result<()> {
    let client = ApiClient::new(ClientConfig::from_env(common.api_host.as_deref())?)?;
    let s3 = options.merged_with_env().build(true)?;

    if !quiet {
        println!("Using API host: {}", client.config().api_host);
    }
    display::announce_export_config(s3.as_ref());

    let task_uuid = client.trigger_export(job_uuid, s3.as_ref(), fields).await?;
    println!("Export task triggered with UUID: {task_uuid}");

    let encryption = s3.as_ref().and_then(|config| config.encryption.as_ref());
    poll_and_download(&client, &task_uuid, encryption, common, quiet).await
}
