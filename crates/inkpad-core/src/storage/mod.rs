//! Saving and loading documents by file path.

mod file;

pub use file::{load_from_path, save_to_path};

use crate::codec::{BinaryCodec, CodecError, ShapeCodec, TextCodec};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// On-disk representation, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.txt`
    Text,
    /// `.bin`
    Binary,
}

static TEXT_CODEC: TextCodec = TextCodec;
static BINARY_CODEC: BinaryCodec = BinaryCodec;

impl FileFormat {
    /// Pick the format from the path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> StorageResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("txt") => Ok(FileFormat::Text),
            Some("bin") => Ok(FileFormat::Binary),
            _ => Err(StorageError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Codec implementing this format.
    pub fn codec(self) -> &'static dyn ShapeCodec {
        match self {
            FileFormat::Text => &TEXT_CODEC,
            FileFormat::Binary => &BINARY_CODEC,
        }
    }
}

/// Attach the path to a codec failure.
fn with_path(path: &Path, err: CodecError) -> StorageError {
    match err {
        CodecError::Io(source) => StorageError::Io {
            path: path.to_path_buf(),
            source,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.txt")).unwrap(), FileFormat::Text);
        assert_eq!(FileFormat::from_path(Path::new("dir/b.BIN")).unwrap(), FileFormat::Binary);
        assert!(matches!(
            FileFormat::from_path(Path::new("c.png")),
            Err(StorageError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            FileFormat::from_path(Path::new("no_extension")),
            Err(StorageError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_codec_matches_format() {
        assert_eq!(FileFormat::Text.codec().name(), "text");
        assert_eq!(FileFormat::Binary.codec().name(), "binary");
    }
}
