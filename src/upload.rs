//! Upload descriptors and the transport seam they upload through.
//!
//! An [`UploadIo`] is a document that only exists in memory: there is no
//! local path whose extension could be read, so the only way to learn its
//! format is to hand it to the service and read back the extension the
//! service assigned. The actual network call is behind the [`Uploader`]
//! trait so the detector can be driven by [`crate::client::HttpUploader`] in
//! production and by an in-process fake in tests.

use crate::error::TransportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Record returned by the service's upload endpoint.
///
/// `file_ext` is authoritative: it overrides whatever the local file name
/// suggested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UploadResult {
    /// Server-side identifier, usable as a conversion parameter.
    pub file_id: String,
    /// Extension the service assigned to the upload.
    pub file_ext: String,
    /// Name the service stored the upload under.
    pub file_name: String,
}

/// Performs the upload round-trip.
///
/// Implementations own timeouts, authentication and error mapping. Callers
/// get exactly one call per upload; nothing is retried or cached on top.
pub trait Uploader: Send + Sync {
    fn upload(&self, payload: &[u8], name: &str) -> Result<UploadResult, TransportError>;
}

/// Raw content plus the name it should be uploaded under.
///
/// Nothing is sent until [`UploadIo::upload`] is called.
#[derive(Clone)]
pub struct UploadIo {
    payload: Arc<[u8]>,
    file_name: String,
    uploader: Arc<dyn Uploader>,
}

impl UploadIo {
    pub fn new(
        payload: impl Into<Vec<u8>>,
        file_name: impl Into<String>,
        uploader: Arc<dyn Uploader>,
    ) -> Self {
        Self {
            payload: Arc::from(payload.into()),
            file_name: file_name.into(),
            uploader,
        }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The locally declared name. Not used for format detection.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Send the payload. Each call is a fresh round-trip.
    pub fn upload(&self) -> Result<UploadResult, TransportError> {
        info!(
            "Uploading '{}' ({} bytes)",
            self.file_name,
            self.payload.len()
        );
        let result = self.uploader.upload(&self.payload, &self.file_name)?;
        info!(
            "Uploaded '{}' as {} (ext: {})",
            self.file_name, result.file_id, result.file_ext
        );
        Ok(result)
    }
}

impl fmt::Debug for UploadIo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadIo")
            .field("file_name", &self.file_name)
            .field("payload_len", &self.payload.len())
            .field("uploader", &"<dyn Uploader>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Echo {
        calls: Mutex<Vec<(Vec<u8>, String)>>,
    }

    impl Uploader for Echo {
        fn upload(&self, payload: &[u8], name: &str) -> Result<UploadResult, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((payload.to_vec(), name.to_string()));
            Ok(UploadResult {
                file_id: "1".into(),
                file_ext: "bin".into(),
                file_name: name.into(),
            })
        }
    }

    #[test]
    fn upload_result_from_service_json() {
        let json = r#"{"FileId":"123","FileExt":"txt","FileName":"file.txt"}"#;
        let r: UploadResult = serde_json::from_str(json).unwrap();
        assert_eq!(r.file_id, "123");
        assert_eq!(r.file_ext, "txt");
        assert_eq!(r.file_name, "file.txt");
    }

    #[test]
    fn upload_passes_payload_and_name() {
        let echo = Arc::new(Echo {
            calls: Mutex::new(Vec::new()),
        });
        let io = UploadIo::new(b"hello".to_vec(), "greeting.txt", echo.clone());
        io.upload().unwrap();
        io.upload().unwrap();

        let calls = echo.calls.lock().unwrap();
        assert_eq!(calls.len(), 2, "every call is a fresh upload");
        assert_eq!(calls[0].0, b"hello");
        assert_eq!(calls[0].1, "greeting.txt");
    }

    #[test]
    fn debug_omits_payload() {
        let echo = Arc::new(Echo {
            calls: Mutex::new(Vec::new()),
        });
        let io = UploadIo::new(vec![0u8; 4096], "big.bin", echo);
        let dbg = format!("{io:?}");
        assert!(dbg.contains("payload_len: 4096"), "got: {dbg}");
    }
}
