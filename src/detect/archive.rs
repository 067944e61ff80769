//! Archive target formats: conversions that accept any source type.
//!
//! The list mirrors the service's archive/bundle converters. It is data, not
//! logic: update [`ARCHIVE_FORMATS`] (or load an [`ArchivePolicy`] from JSON)
//! when the service adds one.

use serde::{Deserialize, Serialize};

/// Token returned when the target accepts any source format.
pub const ANY_FORMAT: &str = "any";

/// Archive targets known to the service.
pub const ARCHIVE_FORMATS: &[&str] = &["zip", "7z", "rar"];

/// Closed set of target formats that short-circuit detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchivePolicy {
    formats: Vec<String>,
}

impl Default for ArchivePolicy {
    fn default() -> Self {
        Self::new(ARCHIVE_FORMATS.iter().copied())
    }
}

impl ArchivePolicy {
    pub fn new<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            formats: formats
                .into_iter()
                .map(|f| f.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Exact, case-insensitive membership.
    pub fn is_archive(&self, target_format: &str) -> bool {
        let target = target_format.to_lowercase();
        self.formats.iter().any(|f| f.to_lowercase() == target)
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }
}
