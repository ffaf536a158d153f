//! File I/O helpers used by the extractors.

use crate::{DocioError, Result};
use std::path::Path;

/// Read a whole file into memory.
///
/// # Errors
///
/// Returns `DocioError::Extraction` when the file is missing or unreadable:
/// from the caller's point of view an unreadable upload is bad input.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|e| {
        DocioError::extraction_with_source(format!("Failed to read file {}", path.display()), e)
    })
}
