//! Integration tests for `FormatDetector::run`.
//!
//! Upload resources are driven by an in-process `Uploader` that records
//! every call, so no network is needed.

use convertapi_detect::{
    DetectError, FormatDetector, OpenFile, Resource, TransportError, UploadIo, UploadResult,
    Uploader,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Replies with a fixed record and remembers what it was asked to upload.
struct RecordingUploader {
    reply: Result<UploadResult, fn() -> TransportError>,
    calls: Mutex<Vec<(Vec<u8>, String)>>,
}

impl RecordingUploader {
    fn replying(file_ext: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(UploadResult {
                file_id: "123".into(),
                file_ext: file_ext.into(),
                file_name: "file.txt".into(),
            }),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn failing(err: fn() -> TransportError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(err),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Uploader for RecordingUploader {
    fn upload(&self, payload: &[u8], name: &str) -> Result<UploadResult, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((payload.to_vec(), name.to_string()));
        match &self.reply {
            Ok(r) => Ok(r.clone()),
            Err(make) => Err(make()),
        }
    }
}

fn detect(resource: impl Into<Resource>, to: &str) -> Result<String, DetectError> {
    FormatDetector::new(resource, to).run()
}

// ── Name-based detection ─────────────────────────────────────────────────────

#[test]
fn with_file_name() {
    assert_eq!(detect("test.txt", "pdf").unwrap(), "txt");
}

#[test]
fn with_file_path() {
    assert_eq!(detect("/some/path/test.txt", "pdf").unwrap(), "txt");
    assert_eq!(detect(PathBuf::from("/some/path/test.txt"), "pdf").unwrap(), "txt");
}

#[test]
fn with_url() {
    assert_eq!(
        detect("https://hostname/some/path/test.txt?test=1", "pdf").unwrap(),
        "txt"
    );
}

#[test]
fn with_url_fragment() {
    assert_eq!(detect("https://hostname/a/b.HTML#intro", "pdf").unwrap(), "html");
}

#[test]
fn with_open_file() {
    let tmp = tempfile::Builder::new()
        .prefix("test")
        .suffix(".docx")
        .tempfile()
        .unwrap();
    let file = OpenFile::open(tmp.path()).unwrap();
    assert_eq!(detect(file, "pdf").unwrap(), "docx");
}

#[test]
fn extension_is_independent_of_stem_and_depth() {
    let stems = ["a", "report 2024", "x.y.z", "ÄÖÜ", "..hidden"];
    let dirs = ["", "dir/", "/abs/dir/", "deep/er/still/", "C:\\win\\"];
    for stem in stems {
        for dir in dirs {
            let name = format!("{dir}{stem}.PpTx");
            assert_eq!(detect(name.as_str(), "pdf").unwrap(), "pptx", "name: {name}");
        }
    }
}

// ── Archive short-circuit ────────────────────────────────────────────────────

#[test]
fn when_archiving() {
    assert_eq!(detect("test.txt", "zip").unwrap(), "any");
}

#[test]
fn archive_targets_ignore_resource_validity() {
    for target in ["zip", "ZIP", "7z", "rar"] {
        assert_eq!(detect("test", target).unwrap(), "any", "target: {target}");
    }
}

#[test]
fn archive_target_never_uploads() {
    let uploader = RecordingUploader::replying("txt");
    let io = UploadIo::new(b"test".to_vec(), "file.txt", uploader.clone());
    assert_eq!(detect(io, "zip").unwrap(), "any");
    assert_eq!(uploader.call_count(), 0);
}

// ── Upload path ──────────────────────────────────────────────────────────────

#[test]
fn with_upload_io() {
    let uploader = RecordingUploader::replying("txt");
    let io = UploadIo::new(b"test".to_vec(), "file.txt", uploader.clone());
    assert_eq!(detect(io, "pdf").unwrap(), "txt");

    let calls = uploader.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, b"test");
    assert_eq!(calls[0].1, "file.txt");
}

#[test]
fn server_extension_overrides_local_name() {
    let uploader = RecordingUploader::replying("pdf");
    let io = UploadIo::new(b"%PDF-1.7".to_vec(), "file.txt", uploader);
    assert_eq!(detect(io, "docx").unwrap(), "pdf");
}

#[test]
fn upload_without_local_extension() {
    let uploader = RecordingUploader::replying("png");
    let io = UploadIo::new(vec![0x89, b'P', b'N', b'G'], "scan", uploader);
    assert_eq!(detect(io, "pdf").unwrap(), "png");
}

#[test]
fn transport_error_propagates_unchanged() {
    let uploader = RecordingUploader::failing(|| TransportError::Unauthorized {
        status: 401,
        message: "Invalid token".into(),
    });
    let io = UploadIo::new(b"test".to_vec(), "file.txt", uploader.clone());
    let err = detect(io, "pdf").unwrap_err();

    match err {
        DetectError::Transport(TransportError::Unauthorized { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid token");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    assert_eq!(uploader.call_count(), 1, "no retries");
}

// ── Failures ─────────────────────────────────────────────────────────────────

#[test]
fn when_path_without_extension() {
    let err = detect("test", "pdf").unwrap_err();
    assert!(matches!(err, DetectError::Format(_)), "got: {err:?}");
}

#[test]
fn url_without_extension_is_a_format_error() {
    let err = detect("https://hostname/download?file=test.txt", "pdf").unwrap_err();
    assert!(err.is_format(), "query text must not be read: {err:?}");
}

#[test]
fn explicit_format_resolves_format_error() {
    let detector = FormatDetector::new("test", "pdf");
    assert!(detector.run().is_err());
    assert_eq!(detector.resolve(Some("txt")).unwrap(), "txt");
}

// ── Concurrency ──────────────────────────────────────────────────────────────

#[test]
fn detectors_run_concurrently() {
    let uploader = RecordingUploader::replying("odt");
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let uploader = uploader.clone();
            std::thread::spawn(move || {
                let io = UploadIo::new(vec![i as u8], format!("doc{i}"), uploader);
                detect(io, "pdf").unwrap()
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), "odt");
    }
    assert_eq!(uploader.call_count(), 8);
}
