//! Staged output files.
//!
//! An export to disk is written to a temporary file next to its destination
//! and renamed into place only after the body is complete. A failed or
//! abandoned export leaves nothing behind at the destination: dropping a
//! [`StagedFile`] removes the temporary file.

use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use tempfile::{Builder, NamedTempFile};

use crate::config::EXPORT_FILENAME_PREFIX;

/// A temporary file that becomes `destination` on [`commit`](StagedFile::commit).
#[derive(Debug)]
pub struct StagedFile {
    temp: NamedTempFile,
    destination: PathBuf,
}

impl StagedFile {
    /// Creates the temporary file in the destination's directory, so the final
    /// rename never crosses filesystems.
    pub fn create(destination: &Path) -> io::Result<Self> {
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = Builder::new()
            .prefix(&format!(".{}-", EXPORT_FILENAME_PREFIX))
            .suffix(".partial")
            .tempfile_in(dir)?;
        debug!(
            "Staging {} at {}",
            destination.display(),
            temp.path().display()
        );
        Ok(Self {
            temp,
            destination: destination.to_path_buf(),
        })
    }

    /// Async handle writing into the staged file.
    pub fn writer(&self) -> io::Result<tokio::fs::File> {
        Ok(tokio::fs::File::from_std(self.temp.reopen()?))
    }

    /// Moves the staged file to its destination, replacing any existing file.
    pub fn commit(self) -> io::Result<PathBuf> {
        let destination = self.destination;
        self.temp
            .persist(&destination)
            .map_err(|e| e.error)?;
        Ok(destination)
    }

    /// Removes the staged file. A failed removal is logged, not returned.
    pub fn discard(self) {
        let path = self.temp.path().to_path_buf();
        if let Err(e) = self.temp.close() {
            warn!(
                "Failed to remove staged export file {}: {}",
                path.display(),
                e
            );
        }
    }
}

/// Resolves `output` to a file path: a directory gets `filename` appended.
pub fn resolve_destination(output: &Path, filename: &str) -> PathBuf {
    if output.is_dir() {
        output.join(filename)
    } else {
        output.to_path_buf()
    }
}
