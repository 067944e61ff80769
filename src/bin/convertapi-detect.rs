//! CLI binary for convertapi-detect.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! [`FormatDetector`] and prints the detected source format.

use anyhow::{Context, Result};
use clap::Parser;
use convertapi_detect::{
    ArchivePolicy, ClientConfig, FormatDetector, HttpUploader, OpenFile, Resource, UploadIo,
    ANY_FORMAT,
};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # From a file name (no network)
  convertapi-detect report.docx --to pdf

  # From a URL; query and fragment are ignored
  convertapi-detect "https://example.com/files/slides.pptx?dl=1" --to pdf

  # Archive targets accept any source
  convertapi-detect anything --to zip

  # Let the service decide by uploading the file
  convertapi-detect --upload ./scan --to pdf

  # Machine-readable output
  convertapi-detect report.docx --to pdf --json

ENVIRONMENT VARIABLES:
  CONVERT_API_SECRET      API token, required for --upload
  CONVERT_API_BASE_URI    Override the service endpoint (default https://v2.convertapi.com/)
  RUST_LOG                Override log filter (e.g. convertapi_detect=debug)
"#;

/// Detect the source format of a document for a ConvertAPI conversion.
#[derive(Parser, Debug)]
#[command(
    name = "convertapi-detect",
    version,
    about = "Detect the source format of a document for a ConvertAPI conversion",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// File name, local path, or URL.
    input: String,

    /// Target format of the conversion (e.g. pdf, zip).
    #[arg(short, long, env = "CONVERTAPI_TO")]
    to: String,

    /// Explicit source format; skips detection.
    #[arg(short, long)]
    from: Option<String>,

    /// Read the local file and upload it; the service reports the format.
    #[arg(long, conflicts_with = "from")]
    upload: bool,

    /// Name to upload under (defaults to the input's file name).
    #[arg(long, requires = "upload")]
    upload_name: Option<String>,

    /// Upload timeout in seconds.
    #[arg(long, env = "CONVERTAPI_UPLOAD_TIMEOUT", default_value_t = 600)]
    upload_timeout: u64,

    /// Print a JSON object instead of the bare token.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "CONVERTAPI_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    input: &'a str,
    to: &'a str,
    from: &'a str,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Detect ───────────────────────────────────────────────────────────
    let from = detect_format(&cli)?;

    if cli.json {
        let report = Report {
            input: &cli.input,
            to: &cli.to.to_lowercase(),
            from: &from,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise output")?
        );
    } else {
        println!("{from}");
    }

    Ok(())
}

/// Resolve the source format for the parsed flags.
///
/// Archive targets are answered before the input is read or the transport
/// is configured, so `--upload` never touches the file or the network then.
fn detect_format(cli: &Cli) -> Result<String> {
    if cli.from.is_none() && ArchivePolicy::default().is_archive(&cli.to) {
        debug!("Target '{}' is an archive format, skipping input", cli.to);
        return Ok(ANY_FORMAT.to_string());
    }

    let resource = build_resource(cli)?;
    debug!("Resource: {}", resource.describe());

    FormatDetector::new(resource, &cli.to)
        .resolve(cli.from.as_deref())
        .with_context(|| format!("Failed to detect the format of '{}'", cli.input))
}

/// Map the positional input and `--upload` into a [`Resource`].
fn build_resource(cli: &Cli) -> Result<Resource> {
    if !cli.upload {
        let path = PathBuf::from(&cli.input);
        // An existing local file is opened so unreadable inputs fail early.
        if path.is_file() {
            let file = OpenFile::open(&path)
                .with_context(|| format!("Failed to open {:?}", path))?;
            let len = file
                .file()
                .metadata()
                .with_context(|| format!("Failed to stat {:?}", path))?
                .len();
            debug!("Opened {:?} ({} bytes)", path, len);
            return Ok(Resource::from(file));
        }
        return Ok(Resource::from(cli.input.as_str()));
    }

    let path = PathBuf::from(&cli.input);
    let payload =
        std::fs::read(&path).with_context(|| format!("Failed to read {:?}", path))?;
    let name = match cli.upload_name {
        Some(ref n) => n.clone(),
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("{:?} has no file name; pass --upload-name", path))?,
    };

    let mut builder = ClientConfig::builder().upload_timeout_secs(cli.upload_timeout);
    let env = ClientConfig::from_env().context("Invalid ConvertAPI environment")?;
    builder = builder.base_uri(env.base_uri);
    if let Some(secret) = env.api_credentials {
        builder = builder.api_credentials(secret);
    }
    let config = builder.build().context("Invalid configuration")?;
    let client = HttpUploader::new(config).context("Failed to create HTTP client")?;

    Ok(Resource::from(UploadIo::new(payload, name, Arc::new(client))))
}
