//! Streamed artifact download from the pre-signed URL.

use std::path::PathBuf;
use std::time::Duration;

use evex_types::{EncryptionConfig, ExportError, Result};
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

const HEADER_SSE_ALGORITHM: &str = "x-amz-server-side-encryption-customer-algorithm";
const HEADER_SSE_KEY: &str = "x-amz-server-side-encryption-customer-key";
const HEADER_SSE_KEY_MD5: &str = "x-amz-server-side-encryption-customer-key-MD5";

/// Options for an artifact download.
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    /// Output path; defaults to `export_<timestamp>.json.gz` in the current
    /// directory.
    pub output: Option<PathBuf>,
    /// Connect timeout (defaults to 5 s).
    pub connect_timeout: Option<Duration>,
    /// Read timeout (defaults to 60 s; longer than the status endpoints
    /// since artifacts can be large).
    pub read_timeout: Option<Duration>,
}

/// Downloads the exported artifact from a pre-signed URL.
///
/// The URL is already authenticated, so no bearer token is sent; when
/// `encryption` is present the SSE-C algorithm/key/digest headers are
/// attached so object storage can decrypt the artifact in transit. The body
/// is streamed to disk in chunks; `on_chunk` receives the running byte
/// count and the content length when the server reports one.
///
/// # Errors
///
/// Returns a transport error on network failure or a non-success response,
/// and an I/O error if the output file cannot be written.
pub async fn download_artifact<F>(
    url: &str,
    encryption: Option<&EncryptionConfig>,
    options: DownloadOptions,
    mut on_chunk: F,
) -> Result<PathBuf>
where
    F: FnMut(u64, Option<u64>),
{
    let output = options.output.unwrap_or_else(default_output_path);

    let client = reqwest::Client::builder()
        .connect_timeout(options.connect_timeout.unwrap_or(Duration::from_secs(5)))
        .read_timeout(options.read_timeout.unwrap_or(Duration::from_secs(60)))
        .build()
        .map_err(|e| ExportError::Transport(e.to_string()))?;

    let mut request = client.get(url);
    if let Some(encryption) = encryption {
        request = request
            .header(HEADER_SSE_ALGORITHM, &encryption.algorithm)
            .header(HEADER_SSE_KEY, &encryption.key_b64)
            .header(HEADER_SSE_KEY_MD5, &encryption.key_md5_b64);
    }

    let response = request
        .send()
        .await
        .map_err(|e| ExportError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(ExportError::Transport(format!(
            "Failed to download file: {status} {text}"
        )));
    }

    let total = response.content_length();
    let mut file = tokio::fs::File::create(&output).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ExportError::Transport(e.to_string()))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        on_chunk(downloaded, total);
    }
    file.flush().await?;

    Ok(output)
}

/// Default output filename: `export_<YYYYmmdd_HHMMSS>.json.gz`.
fn default_output_path() -> PathBuf {
    PathBuf::from(format!(
        "export_{}.json.gz",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ))
}
