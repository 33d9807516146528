//! Terminal rendering for the evex CLI.

use evex_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress rendering for the poll loop.
///
/// Starts as a spinner and switches to a sized bar once the server reports
/// a total; hidden entirely in quiet mode.
pub(crate) struct PollDisplay {
    bar: ProgressBar,
    sized: bool,
}

impl PollDisplay {
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        };
        Self { bar, sized: false }
    }

    pub(crate) fn update(&mut self, update: &ProgressUpdate) {
        if update.total > 0 {
            if !self.sized {
                self.bar.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] \
                             {pos}/{len} events ({percent}%) {msg}",
                        )
                        .expect("Invalid progress template")
                        .progress_chars("=>-"),
                );
                self.sized = true;
            }
            self.bar.set_length(update.total);
            self.bar.set_position(update.completed);
            self.bar.set_message(format!(
                "ETA: {} (status={})",
                format_eta(update.eta),
                update.state_label
            ));
        } else {
            self.bar
                .set_message(format!("status={} (progress unavailable)", update.state_label));
        }
    }

    pub(crate) fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

fn format_eta(eta: Eta) -> String {
    match eta {
        Eta::Unknown => "n/a".to_string(),
        Eta::Calculating => "calculating...".to_string(),
        Eta::Seconds(secs) => format!("{}s", secs.round() as u64),
    }
}

/// Byte-progress bar for the artifact download.
pub(crate) fn download_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bytes}/{total_bytes} {msg}")
            .expect("Invalid progress template"),
    );
    bar.set_message("downloading");
    bar
}

/// Announces the resolved S3/encryption configuration on the export path,
/// including the one-time banner for an auto-generated key.
pub(crate) fn announce_export_config(s3: Option<&S3Config>) {
    let Some(s3) = s3 else { return };

    if s3.has_bucket_settings() {
        let mut shown = Vec::new();
        if s3.bucket_name.is_some() {
            shown.push("bucket_name");
        }
        if s3.prefix.is_some() {
            shown.push("prefix");
        }
        if s3.endpoint_url.is_some() {
            shown.push("endpoint_url");
        }
        if s3.region_name.is_some() {
            shown.push("region_name");
        }
        if !shown.is_empty() {
            println!("Using custom S3 configuration: {}", shown.join(", "));
        }
    }

    if let Some(encryption) = &s3.encryption {
        if encryption.generated {
            generated_key_banner(
                &encryption.key_b64,
                &[
                    "You will need it to download this export later.",
                    "If you lose this key, you will NOT be able to decrypt your data.",
                ],
            );
        } else {
            println!("SSE-C encryption enabled");
        }
    }
}

/// Announces the encryption configuration on the status/download path.
pub(crate) fn announce_status_config(encryption: Option<&EncryptionConfig>) {
    if encryption.is_some() {
        println!("SSE-C encryption headers configured for download");
    }
}

/// Prints the generated key exactly once; it is not retrievable afterward.
fn generated_key_banner(key: &str, notes: &[&str]) {
    let rule = "=".repeat(80);
    println!("\n{rule}");
    println!("SSE-C ENCRYPTION KEY AUTO-GENERATED");
    println!("{rule}");
    println!("Encryption Key: {key}");
    println!();
    println!("IMPORTANT: Save this key securely!");
    for note in notes {
        println!("   {note}");
    }
    println!("{rule}\n");
}
