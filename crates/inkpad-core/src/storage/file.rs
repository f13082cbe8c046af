//! File-based persistence.
//!
//! File handles live only for the duration of a call and are closed on every
//! exit path, including a decode that stops part way through.

use super::{FileFormat, StorageError, StorageResult, with_path};
use crate::document::{DrawingDocument, LoadReport};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

/// Write the document to `path`, replacing any existing file.
///
/// The format follows the extension: `.txt` for text, `.bin` for binary.
pub fn save_to_path(document: &DrawingDocument, path: &Path) -> StorageResult<()> {
    let format = FileFormat::from_path(path)?;
    let io_err = |source: std::io::Error| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    document
        .save(format.codec(), &mut writer)
        .map_err(|e| with_path(path, e))?;
    writer.flush().map_err(io_err)?;
    log::info!("saved {} shapes to {}", document.len(), path.display());
    Ok(())
}

/// Append the shapes stored at `path` to the document.
pub fn load_from_path(document: &mut DrawingDocument, path: &Path) -> StorageResult<LoadReport> {
    let format = FileFormat::from_path(path)?;
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => StorageError::NotFound(path.to_path_buf()),
        _ => StorageError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let mut reader = BufReader::new(file);
    let report = document
        .load(format.codec(), &mut reader)
        .map_err(|e| with_path(path, e))?;
    if !report.stop.is_end_of_data() {
        log::warn!("{}: load stopped early: {}", path.display(), report.stop);
    }
    Ok(report)
}
