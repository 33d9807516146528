//! CLI command implementations.

pub(crate) mod export;
pub(crate) mod status;

use std::time::Duration;

use anyhow::Result;
use evex_lib::prelude::*;

use crate::CommonArgs;
use crate::display;

/// Polls a task to completion, then downloads the artifact unless
/// `--no-download` was given.
///
/// A failed download degrades to a warning plus the manual URL: the export
/// itself succeeded and the pre-signed link is still usable.
pub(crate) async fn poll_and_download(
    client: &ApiClient,
    task_uuid: &str,
    encryption: Option<&EncryptionConfig>,
    common: &CommonArgs,
    quiet: bool,
) -> Result<()> {
    let config = PollConfig {
        interval: Duration::from_secs(common.interval),
        max_wait: common.max_wait.map(Duration::from_secs),
    };

    let mut bar = display::PollDisplay::new(quiet);
    let outcome = poll_task(client, task_uuid, config, |update| bar.update(update)).await;
    bar.finish();

    let Some(url) = outcome? else {
        println!("Export finished but no download URL found.");
        return Ok(());
    };
    println!("Export ready! Download URL: {url}");

    if common.no_download {
        return Ok(());
    }

    if !quiet && encryption.is_some() {
        println!("Using SSE-C encryption headers for download");
    }

    let options = DownloadOptions {
        output: common.output.clone(),
        ..Default::default()
    };
    let bar = display::download_bar(quiet);
    let result = download_artifact(&url, encryption, options, |downloaded, total| {
        if let Some(total) = total {
            bar.set_length(total);
        }
        bar.set_position(downloaded);
    })
    .await;
    bar.finish_and_clear();

    match result {
        Ok(path) => {
            println!("Download complete: {}", path.display());
            Ok(())
        }
        Err(err) => {
            eprintln!("Warning: Download failed: {err}");
            eprintln!("You can manually download from: {url}");
            Ok(())
        }
    }
}
