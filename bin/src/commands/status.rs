//! Status command implementation.
//!
//! Polls an already-triggered export task and downloads the artifact once
//! it finishes.

use anyhow::Result;
use evex_lib::prelude::*;

use crate::CommonArgs;
use crate::commands::poll_and_download;
use crate::display;

/// Execute the status command.
///
/// Never auto-generates a key: an export encrypted at trigger time can only
/// be downloaded with the key used back then, so an absent key here means
/// "assume unencrypted".
pub(crate) async fn status(
    task_uuid: &str,
    options: SseOptions,
    common: &CommonArgs,
    quiet: bool,
) -> Result<()> {
    let client = ApiClient::new(ClientConfig::from_env(common.api_host.as_deref())?)?;
    let encryption = options.merged_with_env().build(false)?;

    if !quiet {
        println!("Using API host: {}", client.config().api_host);
    }
    display::announce_status_config(encryption.as_ref());

    poll_and_download(&client, task_uuid, encryption.as_ref(), common, quiet).await
}
