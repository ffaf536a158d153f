//! PDF extractor: one unit per page.

use crate::Result;
use crate::core::config::LoaderConfig;
use crate::core::io::read_file;
use crate::pdf::extract_pdf_text;
use crate::plugins::{FormatExtractor, Plugin};
use crate::types::{ExtractionUnit, PAGE_KEY, SOURCE_KEY};
use std::path::Path;

pub const FILE_PATH_KEY: &str = "file_path";
pub const TOTAL_PAGES_KEY: &str = "total_pages";

/// PDF extractor.
///
/// Every page becomes one unit, empty pages included, with 1-based `page`
/// metadata. Page text follows the visual reading order; see
/// [`crate::pdf::layout`].
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PdfExtractor {
    fn name(&self) -> &str {
        "pdf-extractor"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn description(&self) -> &str {
        "Extracts layout-ordered text from PDF pages"
    }
}

impl FormatExtractor for PdfExtractor {
    fn extract(&self, path: &Path, config: &LoaderConfig) -> Result<Vec<ExtractionUnit>> {
        let bytes = read_file(path)?;
        let pdf = extract_pdf_text(&bytes, &config.pdf)?;

        let source = path.to_string_lossy().into_owned();
        let total_pages = pdf.pages.len();
        tracing::debug!(path = %source, total_pages, "Extracted PDF pages");

        let units = pdf
            .pages
            .into_iter()
            .map(|page| {
                let mut unit = ExtractionUnit::new(page.text)
                    .with_metadata(SOURCE_KEY, source.clone())
                    .with_metadata(FILE_PATH_KEY, source.clone())
                    .with_metadata(PAGE_KEY, page.number)
                    .with_metadata(TOTAL_PAGES_KEY, total_pages);
                if config.pdf.include_document_info {
                    for (key, value) in pdf.info.entries() {
                        unit = unit.with_metadata(key, value);
                    }
                }
                unit
            })
            .collect();

        Ok(units)
    }

    fn supported_extensions(&self) -> &[&str] {
        &[".pdf"]
    }
}
