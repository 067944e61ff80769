//! Source-format detection.
//!
//! ## Decision Order
//!
//! ```text
//! target ∈ archive set? ──yes──▶ "any"            (resource untouched)
//!        │ no
//!        ▼
//! Resource::Upload ──────────▶ upload ─▶ FileExt   (server is authoritative)
//! Resource::{Path,Url,OpenFile} ─▶ name ─▶ extension
//!        │ empty
//!        ▼
//!   FormatError
//! ```
//!
//! 1. [`archive`]   — the archive policy that short-circuits detection
//! 2. [`extension`] — query/fragment stripping and extension extraction

pub mod archive;
pub mod extension;

use crate::error::{DetectError, FormatError};
use crate::resource::Resource;
use archive::{ArchivePolicy, ANY_FORMAT};
use extension::extract_extension;
use tracing::debug;

/// Determines the source format token for a conversion.
///
/// Holds only its constructor inputs; [`FormatDetector::run`] can be called
/// repeatedly and never mutates the resource.
///
/// # Example
/// ```rust
/// use convertapi_detect::FormatDetector;
///
/// let format = FormatDetector::new("https://host/docs/report.DOCX?v=2", "pdf")
///     .run()
///     .unwrap();
/// assert_eq!(format, "docx");
///
/// let format = FormatDetector::new("anything", "zip").run().unwrap();
/// assert_eq!(format, "any");
/// ```
#[derive(Debug)]
pub struct FormatDetector {
    resource: Resource,
    target_format: String,
    archive_policy: ArchivePolicy,
}

impl FormatDetector {
    pub fn new(resource: impl Into<Resource>, target_format: impl AsRef<str>) -> Self {
        Self {
            resource: resource.into(),
            target_format: target_format.as_ref().to_lowercase(),
            archive_policy: ArchivePolicy::default(),
        }
    }

    /// Replace the default archive set.
    pub fn with_archive_policy(mut self, policy: ArchivePolicy) -> Self {
        self.archive_policy = policy;
        self
    }

    /// Lowercased target format.
    pub fn target_format(&self) -> &str {
        &self.target_format
    }

    /// Detect the source format.
    ///
    /// # Errors
    /// - [`DetectError::Format`] when the name has no extension and the
    ///   resource is not an upload.
    /// - [`DetectError::Transport`] when the upload round-trip fails; the
    ///   transport error is passed through unchanged.
    pub fn run(&self) -> Result<String, DetectError> {
        if self.archive_policy.is_archive(&self.target_format) {
            debug!(
                "Target '{}' is an archive format, any source accepted",
                self.target_format
            );
            return Ok(ANY_FORMAT.to_string());
        }

        let format = match &self.resource {
            Resource::Upload(io) => {
                let uploaded = io.upload()?;
                uploaded.file_ext.to_lowercase()
            }
            Resource::Path(_) | Resource::Url(_) | Resource::OpenFile(_) => {
                let name = self.resource.local_name().unwrap_or_default();
                extract_extension(&name)
            }
        };

        if format.is_empty() {
            return Err(FormatError::new(self.resource.describe()).into());
        }

        debug!("Detected format '{}' for {}", format, self.resource.describe());
        Ok(format)
    }

    /// Use `explicit` when given, otherwise [`FormatDetector::run`].
    ///
    /// An explicit format skips detection entirely, including any upload.
    pub fn resolve(&self, explicit: Option<&str>) -> Result<String, DetectError> {
        match explicit.map(str::trim).filter(|f| !f.is_empty()) {
            Some(format) => {
                debug!("Using explicit source format '{}'", format);
                Ok(format.to_lowercase())
            }
            None => self.run(),
        }
    }
}
