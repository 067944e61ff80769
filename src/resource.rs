//! Input classification: turn whatever the caller has into a [`Resource`].
//!
//! Classification happens once, here, when the resource is accepted. The
//! detector then matches on the variant and never probes the value again.

use crate::upload::UploadIo;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Something whose source format needs to be determined.
#[derive(Debug)]
pub enum Resource {
    /// Filesystem path or bare file name.
    Path(PathBuf),
    /// Remote location, possibly carrying a query string or fragment.
    Url(String),
    /// An already-open file and the path it was opened from.
    OpenFile(OpenFile),
    /// In-memory content that has not been sent to the service yet.
    Upload(UploadIo),
}

impl Resource {
    /// The name used for extension extraction, or `None` for uploads.
    pub fn local_name(&self) -> Option<String> {
        match self {
            Resource::Path(p) => Some(p.to_string_lossy().into_owned()),
            Resource::Url(u) => Some(u.clone()),
            Resource::OpenFile(f) => Some(f.path().to_string_lossy().into_owned()),
            Resource::Upload(_) => None,
        }
    }

    /// Short label for log lines and error messages.
    pub fn describe(&self) -> String {
        match self {
            Resource::Upload(io) => format!("upload:{}", io.file_name()),
            other => other.local_name().unwrap_or_default(),
        }
    }
}

/// Check if the input string looks like a URL (`scheme://…`).
pub fn is_url(input: &str) -> bool {
    match input.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

impl From<&str> for Resource {
    fn from(input: &str) -> Self {
        if is_url(input) {
            Resource::Url(input.to_string())
        } else {
            Resource::Path(PathBuf::from(input))
        }
    }
}

impl From<String> for Resource {
    fn from(input: String) -> Self {
        if is_url(&input) {
            Resource::Url(input)
        } else {
            Resource::Path(PathBuf::from(input))
        }
    }
}

impl From<PathBuf> for Resource {
    fn from(path: PathBuf) -> Self {
        Resource::Path(path)
    }
}

impl From<&Path> for Resource {
    fn from(path: &Path) -> Self {
        Resource::Path(path.to_path_buf())
    }
}

impl From<OpenFile> for Resource {
    fn from(file: OpenFile) -> Self {
        Resource::OpenFile(file)
    }
}

impl From<UploadIo> for Resource {
    fn from(io: UploadIo) -> Self {
        Resource::Upload(io)
    }
}

/// A [`File`] together with its path.
///
/// `std::fs::File` does not remember where it came from, so the path is
/// carried alongside it.
#[derive(Debug)]
pub struct OpenFile {
    file: File,
    path: PathBuf,
}

impl OpenFile {
    /// Open `path` for reading.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        Ok(Self { file, path })
    }

    /// Wrap a handle that was opened elsewhere.
    pub fn from_parts(file: File, path: impl Into<PathBuf>) -> Self {
        Self {
            file,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self) -> &File {
        &self.file
    }
}
