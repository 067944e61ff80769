//! # convertapi-detect
//!
//! Work out which source format a ConvertAPI conversion should start from.
//!
//! The service selects its conversion pipeline by a `(from, to)` pair of
//! format tokens. Callers usually only know the `to` side; this crate derives
//! the `from` side from whatever they hand in: a file name, a path, a URL, an
//! open file, or an in-memory document that still has to be uploaded.
//!
//! ## Decision Overview
//!
//! ```text
//! (resource, target)
//!  │
//!  ├─ 1. Archive  target is zip/7z/rar → "any", resource never touched
//!  ├─ 2. Classify exhaustive match on the Resource variant
//!  ├─ 3. Upload   in-memory document → server-reported FileExt
//!  ├─ 4. Extract  strip ?query / #fragment, last segment, text after last '.'
//!  └─ 5. Result   lowercase token, or FormatError when empty
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use convertapi_detect::{FormatDetector, HttpUploader, UploadIo};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Name-based: no network.
//!     assert_eq!(FormatDetector::new("/some/path/test.txt", "pdf").run()?, "txt");
//!
//!     // In-memory: one upload round-trip, server decides.
//!     let client = Arc::new(HttpUploader::from_env()?);
//!     let io = UploadIo::new(std::fs::read("scan")?, "scan", client);
//!     println!("{}", FormatDetector::new(io, "pdf").run()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `convertapi-detect` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod detect;
pub mod error;
pub mod resource;
pub mod upload;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::HttpUploader;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use detect::archive::{ArchivePolicy, ANY_FORMAT, ARCHIVE_FORMATS};
pub use detect::FormatDetector;
pub use error::{ConfigError, DetectError, FormatError, TransportError};
pub use resource::{OpenFile, Resource};
pub use upload::{UploadIo, UploadResult, Uploader};
