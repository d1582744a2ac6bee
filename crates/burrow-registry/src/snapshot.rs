//! JSON snapshot codec.
//!
//! A snapshot is a single JSON object keyed by short code. Keys are written
//! in sorted order so identical registries produce identical files.

use crate::error::{RegistryError, Result};
use burrow_core::{ShortCode, UrlRecord};
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub(crate) type Records = HashMap<ShortCode, UrlRecord>;

/// Encodes the records into a detached buffer.
pub(crate) fn encode(records: &Records) -> Result<Vec<u8>> {
    let sorted: BTreeMap<&ShortCode, &UrlRecord> = records.iter().collect();
    Ok(serde_json::to_vec_pretty(&sorted)?)
}

/// Writes `bytes` to `path` through a sibling temporary file.
///
/// The rename is atomic on the same filesystem, so readers observe either
/// the previous snapshot or the new one, never a truncated file.
pub(crate) fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_err = |source: std::io::Error| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)?;
    file.as_file().sync_all().map_err(io_err)?;
    file.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}

/// Reads and decodes a snapshot file.
pub(crate) fn read(path: &Path) -> Result<Records> {
    let bytes = std::fs::read(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| RegistryError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
