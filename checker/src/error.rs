//! Fatal error types for the release checker.
//!
//! Data-quality problems inside an archive are [`Defect`](crate::defect::Defect)s
//! and never surface here. The variants below cover the cases where the
//! checker cannot continue at all: the archive is corrupt, a file cannot be
//! read, or the layout configuration is unusable.

use crate::layout::LayoutError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that abort a release check.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The top-level archive could not be opened.
    #[error("failed to open release archive {path}: {source}")]
    OpenArchive {
        /// Path of the archive on disk.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A zip container (top-level or nested) is corrupt or unreadable.
    #[error("corrupt zip archive {archive}: {source}")]
    Zip {
        /// Name of the archive or entry being read.
        archive: String,
        /// The error reported by the zip reader.
        #[source]
        source: zip::result::ZipError,
    },

    /// An entry could not be read from its archive.
    #[error("failed to read {entry}: {source}")]
    ReadEntry {
        /// Name of the entry being read.
        entry: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The release layout configuration could not be loaded.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Writing defect output failed.
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

impl CheckError {
    /// Wrap a zip error with the name of the archive it came from.
    pub(crate) fn zip(archive: impl Into<String>, source: zip::result::ZipError) -> Self {
        Self::Zip {
            archive: archive.into(),
            source,
        }
    }

    /// Wrap an I/O error raised while reading an archive entry.
    pub(crate) fn read_entry(entry: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadEntry {
            entry: entry.into(),
            source,
        }
    }
}

/// Result type alias using [`CheckError`].
pub type Result<T> = std::result::Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_error_names_archive() {
        let err = CheckError::zip("unvanquished_0.55.zip", zip::result::ZipError::FileNotFound);
        assert!(err.to_string().contains("unvanquished_0.55.zip"));
    }

    #[test]
    fn read_entry_error_names_entry() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        let err = CheckError::read_entry("pkg/md5sums", io);
        assert_eq!(err.to_string(), "failed to read pkg/md5sums: truncated");
    }
}
