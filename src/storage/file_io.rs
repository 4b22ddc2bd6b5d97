//! File I/O utilities with atomic writes
//!
//! The ledger file is always replaced whole: data is written to a sibling
//! temp file, synced, then renamed over the original.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{TallyError, TallyResult};

fn storage_error(action: &str, path: &Path) -> impl FnOnce(std::io::Error) -> TallyError {
    let context = format!("Failed to {} {}", action, path.display());
    move |e| TallyError::Storage(format!("{}: {}", context, e))
}

/// `ledger.json` -> `ledger.json.tmp`, next to the target
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("data"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Read JSON from a file, returning a default value if the file doesn't exist
///
/// An existing file that can't be opened or parsed is a storage error, never
/// silently replaced by the default.
pub fn read_json<T, P>(path: P) -> TallyResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(storage_error("open", path))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| TallyError::Storage(format!("Corrupt data in {}: {}", path.display(), e)))
}

/// Replace `path` with the JSON encoding of `data`
///
/// The bytes go to a sibling temp file which is synced and then renamed over
/// the target, so readers see either the old or the new contents.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> TallyResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(storage_error("create directory", parent))?;
    }

    let bytes = serde_json::to_vec_pretty(data)
        .map_err(|e| TallyError::Storage(format!("Failed to serialize data: {}", e)))?;

    let temp_path = temp_path_for(path);
    let written = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(&bytes)?;
            file.sync_all()
        })
        .map_err(storage_error("write", &temp_path))
        .and_then(|()| fs::rename(&temp_path, path).map_err(storage_error("replace", path)));

    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written?;

    tracing::trace!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}
