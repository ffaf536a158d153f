//! CSV extractor: one unit per data row.

use crate::core::config::{CsvConfig, LoaderConfig};
use crate::core::io::read_file;
use crate::plugins::{FormatExtractor, Plugin};
use crate::text::decode_text;
use crate::types::{ExtractionUnit, SOURCE_KEY};
use crate::{DocioError, Result};
use std::path::Path;

/// Metadata key holding the 0-based data-row index.
pub const ROW_KEY: &str = "row";

/// CSV extractor.
///
/// The first record is the header. Every following record becomes one unit
/// whose text lists the columns as `"<header>: <value>"` lines:
///
/// ```text
/// name,team          name: Ada
/// Ada,compilers  ->  team: compilers
/// ```
///
/// Headers and values are trimmed. Rows whose field count differs from the
/// header fail the whole file.
pub struct CsvExtractor;

impl CsvExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for CsvExtractor {
    fn name(&self) -> &str {
        "csv-extractor"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn description(&self) -> &str {
        "Extracts one document per CSV row"
    }
}

impl FormatExtractor for CsvExtractor {
    fn extract(&self, path: &Path, config: &LoaderConfig) -> Result<Vec<ExtractionUnit>> {
        let bytes = read_file(path)?;
        let text = decode_text(&bytes, config.text.autodetect_encoding)?;
        parse_rows(&text, &path.to_string_lossy(), &config.csv)
    }

    fn supported_extensions(&self) -> &[&str] {
        &[".csv"]
    }
}

/// Column layout resolved against the header row.
struct Columns {
    headers: Vec<String>,
    content: Vec<usize>,
    metadata: Vec<usize>,
    source: Option<usize>,
}

impl Columns {
    fn resolve(headers: Vec<String>, config: &CsvConfig) -> Result<Self> {
        let index_of = |name: &str| -> Result<usize> {
            headers.iter().position(|h| h == name.trim()).ok_or_else(|| {
                DocioError::validation(format!("CSV column '{}' not found in header {:?}", name, headers))
            })
        };

        let content = if config.content_columns.is_empty() {
            (0..headers.len()).collect()
        } else {
            config
                .content_columns
                .iter()
                .map(|name| index_of(name))
                .collect::<Result<Vec<_>>>()?
        };
        let metadata = config
            .metadata_columns
            .iter()
            .map(|name| index_of(name))
            .collect::<Result<Vec<_>>>()?;
        let source = config.source_column.as_deref().map(index_of).transpose()?;

        Ok(Self {
            headers,
            content,
            metadata,
            source,
        })
    }
}

fn ascii_byte(ch: char, what: &str) -> Result<u8> {
    if ch.is_ascii() {
        Ok(ch as u8)
    } else {
        Err(DocioError::validation(format!(
            "CSV {} must be a single ASCII character, got '{}'",
            what, ch
        )))
    }
}

/// Parse CSV text into row units. `source` is used when no source column is set.
pub(crate) fn parse_rows(text: &str, source: &str, config: &CsvConfig) -> Result<Vec<ExtractionUnit>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(ascii_byte(config.delimiter, "delimiter")?)
        .quote(ascii_byte(config.quote, "quote")?)
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let columns = Columns::resolve(headers, config)?;

    let mut units = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let value = |idx: usize| record.get(idx).unwrap_or_default().trim();

        let content = columns
            .content
            .iter()
            .map(|&idx| format!("{}: {}", columns.headers[idx], value(idx)))
            .collect::<Vec<_>>()
            .join("\n");

        let row_source = columns.source.map(value).unwrap_or(source);
        let mut unit = ExtractionUnit::new(content)
            .with_metadata(SOURCE_KEY, row_source)
            .with_metadata(ROW_KEY, row);

        for &idx in &columns.metadata {
            unit = unit.with_metadata(columns.headers[idx].clone(), value(idx));
        }

        units.push(unit);
    }

    tracing::debug!(source, rows = units.len(), "Parsed CSV rows");
    Ok(units)
}
