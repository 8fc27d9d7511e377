//! Atomic placement of finished files.
//!
//! Output is written to a temporary file in the destination directory and
//! renamed into place only after the writer succeeds, so a failed or
//! interrupted assembly never leaves a truncated file at the destination.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::AssemblyResult;

/// Runs `write` against a temp file beside `dest`, then moves it into place.
///
/// Missing parent directories are created. If `write` fails the temp file is
/// removed and `dest` is left untouched.
pub fn write_atomic<T, F>(dest: &Path, write: F) -> AssemblyResult<T>
where
    F: FnOnce(&mut dyn Write) -> AssemblyResult<T>,
{
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let temp = tempfile::Builder::new()
        .prefix(".vocatrack-")
        .suffix(".part")
        .tempfile_in(parent)?;

    let mut writer = BufWriter::new(temp);
    let value = write(&mut writer)?;
    let temp = writer.into_inner().map_err(|e| e.into_error())?;
    temp.as_file().sync_all()?;
    temp.persist(dest).map_err(|e| e.error)?;
    Ok(value)
}

/// Atomically writes a byte buffer to `dest`.
pub fn write_bytes_atomic(dest: &Path, bytes: &[u8]) -> AssemblyResult<()> {
    write_atomic(dest, |w| {
        w.write_all(bytes)?;
        Ok(())
    })
}
