//! Upload staging.
//!
//! Extractors work on paths, uploads arrive as byte buffers. A staged upload
//! is a named temporary file carrying the upload's extension; it is deleted
//! when the guard is closed or dropped, panics included.

use crate::{DocioError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const STAGING_PREFIX: &str = "docio-upload-";

/// RAII guard around a staged upload.
#[derive(Debug)]
pub struct StagedUpload {
    file: NamedTempFile,
}

impl StagedUpload {
    /// Write `bytes` to a fresh temporary file ending in `extension`.
    ///
    /// `extension` is expected in normalized form (`".pdf"`) or empty.
    /// The file is created in `dir` when given, else in the system temp dir.
    ///
    /// # Errors
    ///
    /// Returns `DocioError::Resource` when the file cannot be created or written.
    pub fn create(bytes: &[u8], extension: &str, dir: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX).suffix(extension);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| DocioError::resource_with_source("Failed to create staging file", e))?;

        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|e| DocioError::resource_with_source("Failed to write staging file", e))?;

        tracing::debug!(path = %file.path().display(), size = bytes.len(), "Staged upload");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the staged file, reporting deletion failures.
    pub fn close(self) -> Result<()> {
        let path = self.file.path().to_path_buf();
        self.file.close().map_err(|e| {
            DocioError::resource_with_source(format!("Failed to delete staging file {}", path.display()), e)
        })?;
        tracing::debug!(path = %path.display(), "Removed staged upload");
        Ok(())
    }
}

/// Stage `bytes`, run `f` on the staged path, and delete the file.
///
/// The error from `f` wins over a deletion failure; a deletion failure after
/// a successful `f` is returned as `DocioError::Resource`.
pub fn with_staged_file<T>(
    bytes: &[u8],
    extension: &str,
    dir: Option<&Path>,
    f: impl FnOnce(&Path) -> Result<T>,
) -> Result<T> {
    let staged = StagedUpload::create(bytes, extension, dir)?;
    let outcome = f(staged.path());

    match (outcome, staged.close()) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(cleanup)) => Err(cleanup),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(cleanup)) => {
            tracing::warn!(error = %cleanup, "Staging cleanup failed after an extraction error");
            Err(err)
        }
    }
}
