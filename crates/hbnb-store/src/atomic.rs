//! Atomic write primitives
//!
//! Uses temp→fsync→rename so a crash never leaves a partial store file

use crate::errors::{io_error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temp file next to the target, so the rename stays on one filesystem
fn temp_path_for(target_path: &Path) -> PathBuf {
    let name = target_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());
    target_path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

/// Atomically replace `target_path` with `content`
///
/// # Errors
///
/// Returns an `Io` error if the directory, temp file, sync or rename fails.
/// The previous content of `target_path` is intact in every failure case.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_store_dir", e))?;
        }
    }

    let temp_path = temp_path_for(target_path);

    let written = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(content)?;
            file.sync_all()
        })
        .map_err(|e| io_error("write_store_temp", e));
    if let Err(err) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    fs::rename(&temp_path, target_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        io_error("rename_store_temp", e)
    })?;

    Ok(())
}
