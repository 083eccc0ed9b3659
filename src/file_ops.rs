//! Whole-file persistence for store blobs
//!
//! Read everything, write everything. No locking and no temp-file swap:
//! a crash mid-write can leave a truncated blob.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::Result;

/// Append `.{default_extension}` when `path` has no extension
pub fn normalize_path<P: AsRef<Path>>(path: P, default_extension: &str) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(default_extension);
        PathBuf::from(name)
    }
}

/// Create an empty file (and its parent directories) if absent
pub fn ensure_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.is_file() {
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().append(true).create(true).open(path)?;
    debug!(path = %path.display(), "created empty store file");
    Ok(())
}

/// All bytes of `path`, creating it empty first if needed
pub fn read_all<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    ensure_file(path.as_ref())?;
    let bytes = fs::read(path.as_ref())?;
    debug!(path = %path.as_ref().display(), bytes = bytes.len(), "read store file");
    Ok(bytes)
}

/// Overwrite `path` with `bytes` in a single write
pub fn write_all<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    fs::write(path.as_ref(), bytes)?;
    debug!(path = %path.as_ref().display(), bytes = bytes.len(), "wrote store file");
    Ok(())
}
