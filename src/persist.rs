//! Disk I/O helpers: load one document, atomic write, remove.
//!
//! The rename-over approach is close to atomic on most platforms. On FAT32 or
//! network shares there are no hard guarantees.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::serializer::Serializer;
use std::io::ErrorKind;
use std::path::Path;

/// Reads and decodes the document at `path`.
pub fn load<S: Serializer>(path: &Path, serializer: &S) -> Result<Document> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(Error::not_found(path)),
        Err(e) => return Err(Error::io(path, e)),
    };
    serializer
        .deserialize(&bytes)
        .map_err(|e| Error::deserialize(path, e))
}

/// Write `bytes` to `<path>.tmp` and then rename over `path`. This avoids
/// leaving a half-written document if the process crashes mid-write.
///
/// Creates the parent directory first if it is missing.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    std::fs::write(&tmp, bytes).map_err(|e| Error::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Remove the file at `path`. A file that vanished in the meantime is
/// `NotFound`, anything else `Io`.
pub fn remove(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::not_found(path)),
        Err(e) => Err(Error::io(path, e)),
    }
}
