//! JSON file helpers
//!
//! Writes go to a sibling temp file that is renamed into place, so a cached
//! catalog is either the old one or the new one, never half written.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{QuokkaError, QuokkaResult};

/// Decode `path`, or `T::default()` when there is nothing there yet
pub fn read_json<T, P>(path: P) -> QuokkaResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }
    read_json_required(path)
}

/// Decode `path`; a missing file is a storage error
pub fn read_json_required<T, P>(path: P) -> QuokkaResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| {
        QuokkaError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        QuokkaError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Replace `path` with the pretty-printed encoding of `data`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> QuokkaResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            QuokkaError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Sibling of the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| QuokkaError::Storage(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| QuokkaError::Storage(format!("Failed to serialize data: {}", e)))?;
    writer
        .flush()
        .map_err(|e| QuokkaError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| QuokkaError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        QuokkaError::Storage(format!("Failed to rename temp file: {}", e))
    })
}
