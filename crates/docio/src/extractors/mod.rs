//! Built-in format extractors.
//!
//! All extractors implement the [`FormatExtractor`](crate::plugins::FormatExtractor)
//! plugin trait and are registered by [`register_default_extractors`].

use crate::Result;
use crate::plugins::registry::FormatRegistry;
use std::sync::Arc;

pub mod csv;
pub mod pdf;
pub mod text;

pub use self::csv::CsvExtractor;
pub use self::pdf::PdfExtractor;
pub use self::text::PlainTextExtractor;

/// Register the built-in extractors with `registry`.
///
/// | Extension       | Extractor              |
/// |-----------------|------------------------|
/// | `.txt`, `.md`   | `plain-text-extractor` |
/// | `.csv`          | `csv-extractor`        |
/// | `.pdf`          | `pdf-extractor`        |
///
/// # Example
///
/// ```rust
/// use docio::extractors::register_default_extractors;
/// use docio::plugins::registry::FormatRegistry;
///
/// # fn main() -> docio::Result<()> {
/// let mut registry = FormatRegistry::new();
/// register_default_extractors(&mut registry)?;
/// assert_eq!(registry.extensions(), vec![".txt", ".md", ".csv", ".pdf"]);
/// # Ok(())
/// # }
/// ```
pub fn register_default_extractors(registry: &mut FormatRegistry) -> Result<()> {
    registry.register(Arc::new(PlainTextExtractor::new()))?;
    registry.register(Arc::new(CsvExtractor::new()))?;
    registry.register(Arc::new(PdfExtractor::new()))?;
    Ok(())
}
