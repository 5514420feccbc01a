//! Test helpers for laying out request and job files on disk.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// Temporary directory addressed through UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write_json(&self, name: &str, value: &Value) -> Utf8PathBuf {
        let path = self.path(name);
        let payload = serde_json::to_vec_pretty(value).expect("serialise test JSON");
        write_utf8(&path, &payload);
        path
    }
}

/// Request for the corners of a ten degree square, depot first.
pub(super) fn square_request(time_limit_ms: u64) -> Value {
    json!({
        "coords": [
            { "latitude": 0.0, "longitude": 0.0 },
            { "latitude": 0.0, "longitude": 10.0 },
            { "latitude": 10.0, "longitude": 10.0 },
            { "latitude": 10.0, "longitude": 0.0 },
        ],
        "time_limit_ms": time_limit_ms,
    })
}
