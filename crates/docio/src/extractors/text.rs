//! Plain text and Markdown extractor.

use crate::Result;
use crate::core::config::LoaderConfig;
use crate::core::io::read_file;
use crate::plugins::{FormatExtractor, Plugin};
use crate::text::decode_text;
use crate::types::{ExtractionUnit, SOURCE_KEY};
use std::path::Path;

/// Plain text extractor.
///
/// Reads the whole file as one unit. Markdown is treated as plain text: the
/// markup is kept as-is. Content is not trimmed.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PlainTextExtractor {
    fn name(&self) -> &str {
        "plain-text-extractor"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn description(&self) -> &str {
        "Extracts content from plain text and Markdown files"
    }
}

impl FormatExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path, config: &LoaderConfig) -> Result<Vec<ExtractionUnit>> {
        let bytes = read_file(path)?;
        let text = decode_text(&bytes, config.text.autodetect_encoding)?;

        Ok(vec![
            ExtractionUnit::new(text).with_metadata(SOURCE_KEY, path.to_string_lossy().into_owned()),
        ])
    }

    fn supported_extensions(&self) -> &[&str] {
        &[".txt", ".md"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocioError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_plain_text_extractor_plugin_interface() {
        let extractor = PlainTextExtractor::new();
        assert_eq!(extractor.name(), "plain-text-extractor");
        assert_eq!(extractor.version(), env!("CARGO_PKG_VERSION"));
        assert_eq!(extractor.supported_extensions(), &[".txt", ".md"]);
        assert_eq!(extractor.priority(), 50);
    }

    #[test]
    fn test_extract_single_unit_untrimmed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.md");
        fs::write(&path, "\n  # Heading\n\nBody text.\n\n").unwrap();

        let units = PlainTextExtractor::new()
            .extract(&path, &LoaderConfig::default())
            .unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].text, "\n  # Heading\n\nBody text.\n\n");
        assert!(units[0].metadata.get("page").is_none());
        assert_eq!(
            units[0].metadata.get("source").and_then(|v| v.as_str()),
            Some(path.to_string_lossy().as_ref())
        );
    }

    #[test]
    fn test_extract_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        let units = PlainTextExtractor::new()
            .extract(&path, &LoaderConfig::default())
            .unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].text, "");
    }

    #[test]
    fn test_extract_non_utf8_depends_on_autodetect() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"caf\xe9 cr\xe8me br\xfbl\xe9e, na\xefve fa\xe7ade").unwrap();

        let strict = PlainTextExtractor::new().extract(&path, &LoaderConfig::default());
        assert!(matches!(strict, Err(DocioError::Extraction { .. })));

        let mut config = LoaderConfig::default();
        config.text.autodetect_encoding = true;
        let units = PlainTextExtractor::new().extract(&path, &config).unwrap();
        assert!(units[0].text.starts_with("café crème"));
    }
}
