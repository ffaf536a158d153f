//! File extension handling shared by the registry and the dispatcher.

use crate::{DocioError, Result};
use std::path::Path;

/// Extensions handled by the built-in extractors.
pub const KNOWN_EXTENSIONS: &[&str] = &[".txt", ".md", ".csv", ".pdf"];

/// Lowercased extension of `path` with its leading dot, or an empty string.
///
/// Only the file name is inspected, so dots in directory names are ignored,
/// and dot-files such as `.env` have no extension.
///
/// # Example
///
/// ```rust
/// use docio::core::formats::extension_of;
/// use std::path::Path;
///
/// assert_eq!(extension_of(Path::new("/tmp/v1.2/Report.PDF")), ".pdf");
/// assert_eq!(extension_of(Path::new("archive.tar.gz")), ".gz");
/// assert_eq!(extension_of(Path::new("Makefile")), "");
/// ```
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Normalize an extension for registration: lowercase with a leading dot.
///
/// # Errors
///
/// Returns `DocioError::Validation` for empty extensions and extensions
/// containing whitespace, path separators or inner dots.
pub fn normalize_extension(extension: &str) -> Result<String> {
    let bare = extension.strip_prefix('.').unwrap_or(extension);

    if bare.is_empty() {
        return Err(DocioError::validation("File extension cannot be empty"));
    }

    if bare.contains(|c: char| c.is_whitespace() || c == '/' || c == '\\' || c == '.') {
        return Err(DocioError::validation(format!(
            "File extension '{}' contains invalid characters",
            extension
        )));
    }

    Ok(format!(".{}", bare.to_lowercase()))
}
