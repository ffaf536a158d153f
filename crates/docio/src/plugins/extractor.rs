//! Format extractor plugin trait.
//!
//! Implement [`FormatExtractor`] to teach docio a new file format, then
//! register it with a [`FormatRegistry`](crate::plugins::registry::FormatRegistry).

use crate::Result;
use crate::core::config::LoaderConfig;
use crate::plugins::Plugin;
use crate::types::ExtractionUnit;
use std::path::Path;

/// Trait for format extractor plugins.
///
/// An extractor turns one file into an ordered list of [`ExtractionUnit`]s
/// (one per page, row, or a single unit for formats without structure). The
/// pipeline sanitizes each unit and merges its metadata afterwards, so
/// extractors return raw text and only their native metadata keys.
///
/// # Contract
///
/// - The returned order is the document order (page order, row order).
/// - On malformed or unreadable input, return `DocioError::Extraction` and
///   no units: never a truncated list.
/// - Do not keep file handles open after returning.
///
/// # Priority
///
/// When two extractors claim the same extension, the registry keeps the one
/// with the higher priority. Built-in extractors use 50.
///
/// # Example
///
/// ```rust
/// use docio::plugins::{FormatExtractor, Plugin};
/// use docio::{ExtractionUnit, LoaderConfig, Result};
/// use std::path::Path;
///
/// struct LogExtractor;
///
/// impl Plugin for LogExtractor {
///     fn name(&self) -> &str { "log-extractor" }
///     fn version(&self) -> String { "1.0.0".to_string() }
/// }
///
/// impl FormatExtractor for LogExtractor {
///     fn extract(&self, path: &Path, _config: &LoaderConfig) -> Result<Vec<ExtractionUnit>> {
///         let text = std::fs::read_to_string(path)
///             .map_err(|e| docio::DocioError::extraction_with_source("unreadable log", e))?;
///         Ok(text
///             .lines()
///             .enumerate()
///             .map(|(idx, line)| ExtractionUnit::new(line).with_metadata("line", idx))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &[".log"]
///     }
/// }
/// ```
pub trait FormatExtractor: Plugin {
    /// Extract raw units from the file at `path`.
    ///
    /// # Errors
    ///
    /// - `DocioError::Extraction` - unreadable file, malformed content, parser failure
    /// - `DocioError::Validation` - configuration does not fit the file (e.g. unknown column)
    fn extract(&self, path: &Path, config: &LoaderConfig) -> Result<Vec<ExtractionUnit>>;

    /// File extensions handled by this extractor, e.g. `&[".txt", ".md"]`.
    ///
    /// Matching is case-insensitive; the leading dot is optional.
    fn supported_extensions(&self) -> &[&str];

    fn priority(&self) -> i32 {
        50
    }
}
