//! evex CLI - Export search job results from the Sekoia.io events API.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use evex_lib::prelude::*;
use std::path::PathBuf;

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "evex")]
#[command(about = "Export search job results from the Sekoia.io events API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export search job results
    Export {
        /// The UUID of the search job to export
        job_uuid: String,

        /// Restrict the export to these event fields (repeatable)
        #[arg(long = "field", value_name = "FIELD")]
        fields: Vec<String>,

        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        s3: S3Args,

        #[command(flatten)]
        sse: SseArgs,
    },

    /// Check export task status (and download once finished)
    Status {
        /// The UUID of the export task
        task_uuid: String,

        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        sse: SseArgs,
    },
}

/// Arguments shared by both subcommands.
#[derive(Args)]
struct CommonArgs {
    /// API host (overrides API_HOST env var)
    #[arg(long)]
    api_host: Option<String>,

    /// Polling interval in seconds
    #[arg(long, default_value = "2")]
    interval: u64,

    /// Max wait time in seconds (no limit when omitted)
    #[arg(long)]
    max_wait: Option<u64>,

    /// Don't download the file, just print the URL
    #[arg(long)]
    no_download: bool,

    /// Output filename for the downloaded file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Custom S3 destination settings for the export.
#[derive(Args)]
#[command(next_help_heading = "S3 Configuration")]
struct S3Args {
    /// S3 bucket name (overrides S3_BUCKET env var)
    #[arg(long)]
    s3_bucket: Option<String>,

    /// S3 key prefix (overrides S3_PREFIX env var)
    #[arg(long)]
    s3_prefix: Option<String>,

    /// S3 access key ID (overrides S3_ACCESS_KEY_ID env var)
    #[arg(long)]
    s3_access_key: Option<String>,

    /// S3 secret access key (overrides S3_SECRET_ACCESS_KEY env var)
    #[arg(long)]
    s3_secret_key: Option<String>,

    /// S3 endpoint URL (overrides S3_ENDPOINT_URL env var)
    #[arg(long)]
    s3_endpoint: Option<String>,

    /// S3 region name (overrides S3_REGION_NAME env var)
    #[arg(long)]
    s3_region: Option<String>,
}

/// SSE-C encryption settings.
#[derive(Args)]
#[command(next_help_heading = "SSE-C Encryption")]
struct SseArgs {
    /// Disable SSE-C encryption (exports are encrypted by default)
    #[arg(long)]
    no_sse_c: bool,

    /// SSE-C encryption key, base64 encoded (overrides S3_SSE_C_KEY env var)
    #[arg(long)]
    s3_sse_c_key: Option<String>,

    /// SSE-C encryption key MD5, base64 encoded (auto-computed if not provided)
    #[arg(long)]
    s3_sse_c_key_md5: Option<String>,

    /// SSE-C algorithm (default: AES256)
    #[arg(long)]
    s3_sse_c_algorithm: Option<String>,
}

impl SseArgs {
    fn into_options(self) -> SseOptions {
        SseOptions {
            key: self.s3_sse_c_key,
            key_md5: self.s3_sse_c_key_md5,
            algorithm: self.s3_sse_c_algorithm,
            disabled: self.no_sse_c,
        }
    }
}

impl S3Args {
    fn into_options(self, sse: SseOptions) -> S3Options {
        S3Options {
            bucket: self.s3_bucket,
            prefix: self.s3_prefix,
            access_key: self.s3_access_key,
            secret_key: self.s3_secret_key,
            endpoint: self.s3_endpoint,
            region: self.s3_region,
            sse,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    let result = tokio::select! {
        result = run(cli.command, quiet) => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted by user. Exiting.");
            std::process::exit(130);
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}

async fn run(command: Commands, quiet: bool) -> Result<()> {
    match command {
        Commands::Export {
            job_uuid,
            fields,
            common,
            s3,
            sse,
        } => {
            let options = s3.into_options(sse.into_options());
            commands::export::export(&job_uuid, &fields, options, &common, quiet).await
        }
        Commands::Status {
            task_uuid,
            common,
            sse,
        } => commands::status::status(&task_uuid, sse.into_options(), &common, quiet).await,
    }
}

/// Maps each error kind to a distinct process exit code.
fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<SseKeyError>().is_some() {
        return 2;
    }
    match err.downcast_ref::<ExportError>() {
        Some(ExportError::Config(_) | ExportError::SseKey(_)) => 2,
        Some(ExportError::Timeout { .. }) => 3,
        Some(ExportError::TaskFailed { .. }) => 4,
        Some(ExportError::Transport(_)) => 5,
        _ => 1,
    }
}
