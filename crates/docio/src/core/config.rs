//! Loader configuration.
//!
//! Configuration can be built in code, loaded from TOML, YAML or JSON files,
//! or discovered automatically as `docio.toml` in the current directory or
//! any of its parents.

use crate::{DocioError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up by [`LoaderConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "docio.toml";

/// Top-level configuration handed to every extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    #[serde(default)]
    pub text: TextConfig,

    #[serde(default)]
    pub csv: CsvConfig,

    #[serde(default)]
    pub pdf: PdfConfig,

    /// Directory for upload staging files (system temp dir when unset).
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,
}

/// Plain-text and Markdown options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextConfig {
    /// Fall back to a detected legacy encoding when the file is not UTF-8.
    #[serde(default)]
    pub autodetect_encoding: bool,
}

/// CSV options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    #[serde(default = "default_quote")]
    pub quote: char,

    /// Column whose value becomes the `source` metadata of each row.
    #[serde(default)]
    pub source_column: Option<String>,

    /// Columns copied verbatim (trimmed) into each row's metadata.
    #[serde(default)]
    pub metadata_columns: Vec<String>,

    /// Columns rendered into the row text; empty means all columns.
    #[serde(default)]
    pub content_columns: Vec<String>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            quote: default_quote(),
            source_column: None,
            metadata_columns: Vec::new(),
            content_columns: Vec::new(),
        }
    }
}

/// How the PDF layout engine handles multi-column pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnDetection {
    /// Split at a gutter unless both sides line up like table cells.
    #[default]
    Auto,
    /// Split at any gutter with enough lines on both sides.
    Always,
    /// Always read full-width lines.
    Never,
}

/// PDF options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfConfig {
    #[serde(default)]
    pub column_detection: ColumnDetection,

    /// Maximum baseline distance, in points, for two runs to share a line.
    #[serde(default = "default_line_tolerance")]
    pub line_tolerance: f32,

    /// Minimum empty horizontal band, in points, treated as a column gutter.
    #[serde(default = "default_min_gutter_width")]
    pub min_gutter_width: f32,

    /// Minimum number of lines on each side of a gutter.
    #[serde(default = "default_min_column_lines")]
    pub min_column_lines: usize,

    /// Copy the document information dictionary into page metadata.
    #[serde(default = "default_true")]
    pub include_document_info: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            column_detection: ColumnDetection::default(),
            line_tolerance: default_line_tolerance(),
            min_gutter_width: default_min_gutter_width(),
            min_column_lines: default_min_column_lines(),
            include_document_info: true,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_delimiter() -> char {
    ','
}
fn default_quote() -> char {
    '"'
}
fn default_line_tolerance() -> f32 {
    3.0
}
fn default_min_gutter_width() -> f32 {
    15.0
}
fn default_min_column_lines() -> usize {
    3
}

impl LoaderConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `DocioError::Validation` if the file cannot be read, is not
    /// valid TOML, or holds invalid values.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_config(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| DocioError::validation(format!("Invalid TOML in {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_config(path)?;
        let config: Self = serde_yaml_ng::from_str(&content)
            .map_err(|e| DocioError::validation(format!("Invalid YAML in {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_config(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| DocioError::validation(format!("Invalid JSON in {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, picking the parser by extension.
    ///
    /// `.toml`, `.yaml`/`.yml` and `.json` are recognized.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match crate::core::formats::extension_of(path).as_str() {
            ".toml" => Self::from_toml_file(path),
            ".yaml" | ".yml" => Self::from_yaml_file(path),
            ".json" => Self::from_json_file(path),
            other => Err(DocioError::validation(format!(
                "Unsupported config file format '{}' for {}",
                other,
                path.display()
            ))),
        }
    }

    /// Discover `docio.toml` in the current directory or its parents.
    ///
    /// Returns `Ok(None)` when no file is found.
    pub fn discover() -> Result<Option<Self>> {
        let current = std::env::current_dir()
            .map_err(|e| DocioError::resource_with_source("Failed to read the current directory", e))?;
        Self::discover_from(&current)
    }

    /// Like [`discover`](Self::discover), starting at `start` instead of the
    /// current directory.
    pub fn discover_from(start: &Path) -> Result<Option<Self>> {
        let mut current = Some(start);

        while let Some(dir) = current {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "Discovered configuration file");
                return Ok(Some(Self::from_toml_file(candidate)?));
            }
            current = dir.parent();
        }

        Ok(None)
    }

    /// Check values that serde cannot express as types.
    pub fn validate(&self) -> Result<()> {
        if !self.csv.delimiter.is_ascii() {
            return Err(DocioError::validation(format!(
                "CSV delimiter must be a single ASCII character, got '{}'",
                self.csv.delimiter
            )));
        }
        if !self.csv.quote.is_ascii() {
            return Err(DocioError::validation(format!(
                "CSV quote must be a single ASCII character, got '{}'",
                self.csv.quote
            )));
        }
        if self.csv.delimiter == self.csv.quote {
            return Err(DocioError::validation("CSV delimiter and quote must differ"));
        }
        if !(self.pdf.line_tolerance.is_finite() && self.pdf.line_tolerance >= 0.0) {
            return Err(DocioError::validation(format!(
                "pdf.line_tolerance must be a non-negative number, got {}",
                self.pdf.line_tolerance
            )));
        }
        if !(self.pdf.min_gutter_width.is_finite() && self.pdf.min_gutter_width > 0.0) {
            return Err(DocioError::validation(format!(
                "pdf.min_gutter_width must be positive, got {}",
                self.pdf.min_gutter_width
            )));
        }
        if self.pdf.min_column_lines == 0 {
            return Err(DocioError::validation("pdf.min_column_lines must be at least 1"));
        }
        Ok(())
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| DocioError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert!(!config.text.autodetect_encoding);
        assert_eq!(config.csv.delimiter, ',');
        assert_eq!(config.csv.quote, '"');
        assert_eq!(config.pdf.column_detection, ColumnDetection::Auto);
        assert!(config.pdf.include_document_info);
        assert!(config.staging_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
staging_dir = "/var/tmp/docio"

[text]
autodetect_encoding = true

[csv]
delimiter = ";"
source_column = "url"
metadata_columns = ["id"]

[pdf]
column_detection = "never"
"#,
        )
        .unwrap();

        let config = LoaderConfig::from_toml_file(&path).unwrap();
        assert!(config.text.autodetect_encoding);
        assert_eq!(config.csv.delimiter, ';');
        assert_eq!(config.csv.source_column.as_deref(), Some("url"));
        assert_eq!(config.csv.metadata_columns, vec!["id".to_string()]);
        assert_eq!(config.pdf.column_detection, ColumnDetection::Never);
        assert_eq!(config.pdf.line_tolerance, 3.0);
        assert_eq!(config.staging_dir, Some(PathBuf::from("/var/tmp/docio")));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "pdf:\n  column_detection: always\n  min_gutter_width: 20.0\n").unwrap();

        let config = LoaderConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.pdf.column_detection, ColumnDetection::Always);
        assert_eq!(config.pdf.min_gutter_width, 20.0);
        assert_eq!(config.csv, CsvConfig::default());
    }

    #[test]
    fn test_from_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"csv": {"content_columns": ["title", "body"]}}"#).unwrap();

        let config = LoaderConfig::from_json_file(&path).unwrap();
        assert_eq!(config.csv.content_columns, vec!["title".to_string(), "body".to_string()]);
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = TempDir::new().unwrap();
        let toml_path = dir.path().join("a.TOML");
        fs::write(&toml_path, "[text]\nautodetect_encoding = true\n").unwrap();
        assert!(LoaderConfig::from_file(&toml_path).unwrap().text.autodetect_encoding);

        let ini_path = dir.path().join("a.ini");
        fs::write(&ini_path, "").unwrap();
        assert!(matches!(
            LoaderConfig::from_file(&ini_path),
            Err(DocioError::Validation { .. })
        ));
    }

    #[test]
    fn test_invalid_files_are_validation_errors() {
        let dir = TempDir::new().unwrap();

        let bad_toml = dir.path().join("bad.toml");
        fs::write(&bad_toml, "[pdf\ncolumn_detection = ").unwrap();
        assert!(matches!(
            LoaderConfig::from_toml_file(&bad_toml),
            Err(DocioError::Validation { .. })
        ));

        let bad_mode = dir.path().join("mode.toml");
        fs::write(&bad_mode, "[pdf]\ncolumn_detection = \"sometimes\"\n").unwrap();
        assert!(matches!(
            LoaderConfig::from_toml_file(&bad_mode),
            Err(DocioError::Validation { .. })
        ));

        assert!(matches!(
            LoaderConfig::from_toml_file(dir.path().join("missing.toml")),
            Err(DocioError::Validation { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = LoaderConfig::default();
        config.csv.delimiter = '§';
        assert!(config.validate().is_err());

        let mut config = LoaderConfig::default();
        config.csv.quote = ',';
        assert!(config.validate().is_err());

        let mut config = LoaderConfig::default();
        config.pdf.line_tolerance = -1.0;
        assert!(config.validate().is_err());

        let mut config = LoaderConfig::default();
        config.pdf.min_column_lines = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_discover_from_parent_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[csv]\ndelimiter = \"|\"\n").unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = LoaderConfig::discover_from(&nested).unwrap().unwrap();
        assert_eq!(config.csv.delimiter, '|');
    }

    #[test]
    fn test_serde_round_trip_through_toml() {
        let mut config = LoaderConfig::default();
        config.csv.metadata_columns = vec!["id".to_string()];
        config.pdf.column_detection = ColumnDetection::Always;

        let encoded = toml::to_string(&config).unwrap();
        let decoded: LoaderConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, config);
    }
}
