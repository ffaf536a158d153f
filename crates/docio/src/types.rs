//! Document model shared by extractors, the normalizer and callers.

use crate::{DocioError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata key holding the page index of a document.
pub const PAGE_KEY: &str = "page";
/// Metadata key holding the origin of a document (file path or upload name).
pub const SOURCE_KEY: &str = "source";
/// Metadata key holding the caller's identifier for the ingested file.
pub const DOCUMENT_ID_KEY: &str = "document_id";

/// Ordered metadata mapping. Keys keep insertion order when serialized.
pub type Metadata = IndexMap<String, Value>;

/// Canonical ingestion output: sanitized text plus metadata.
///
/// Documents are built by the normalizer and are read-only afterwards. The
/// metadata always carries an integer `page` entry (0 when the source format
/// has no notion of pages, 1-based page numbers for PDF).
///
/// Deserialization enforces the same shape: `page` must be the first
/// metadata key and a non-negative integer, and the content must already be
/// sanitized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DocumentRepr")]
pub struct Document {
    page_content: String,
    metadata: Metadata,
}

#[derive(Deserialize)]
struct DocumentRepr {
    page_content: String,
    metadata: Metadata,
}

impl TryFrom<DocumentRepr> for Document {
    type Error = DocioError;

    fn try_from(repr: DocumentRepr) -> Result<Self> {
        match repr.metadata.get_index(0) {
            Some((key, value)) if key == PAGE_KEY && value.is_u64() => {}
            _ => {
                return Err(DocioError::validation(
                    "Document metadata must start with a non-negative integer 'page'",
                ));
            }
        }
        if crate::text::sanitize(&repr.page_content).len() != repr.page_content.len() {
            return Err(DocioError::validation(
                "Document page_content contains non-printable characters",
            ));
        }
        Ok(Self::new(repr.page_content, repr.metadata))
    }
}

impl Document {
    pub(crate) fn new(page_content: String, metadata: Metadata) -> Self {
        Self { page_content, metadata }
    }

    pub fn page_content(&self) -> &str {
        &self.page_content
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Page index of this document.
    pub fn page(&self) -> u64 {
        self.metadata.get(PAGE_KEY).and_then(Value::as_u64).unwrap_or(0)
    }

    /// Look up a metadata value as a string.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// Consume the document, returning its content and metadata.
    pub fn into_parts(self) -> (String, Metadata) {
        (self.page_content, self.metadata)
    }
}

/// Raw output of an extractor before sanitization and metadata merging.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionUnit {
    pub text: String,
    pub metadata: Metadata,
}

impl ExtractionUnit {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: Metadata::new(),
        }
    }

    /// Builder-style metadata insertion.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Caller-supplied metadata applied to every document of a load call.
///
/// Overlay entries win over extractor metadata with the same key. The `page`
/// key is reserved for the normalizer and cannot be overlaid.
///
/// # Example
///
/// ```rust
/// use docio::DocumentOverlay;
///
/// let overlay = DocumentOverlay::for_upload("report.pdf")
///     .with_field("tenant", "acme")
///     .unwrap();
/// assert_eq!(overlay.source(), Some("report.pdf"));
/// assert_eq!(overlay.document_id(), Some("report.pdf"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    extra: Metadata,
}

impl DocumentOverlay {
    /// Empty overlay: documents keep only extractor metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay for an uploaded file: `source` and `document_id` are both the
    /// original filename.
    pub fn for_upload(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            source: Some(filename.clone()),
            document_id: Some(filename),
            extra: Metadata::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    /// Add an arbitrary metadata field.
    ///
    /// # Errors
    ///
    /// Returns `DocioError::Validation` for the reserved `page` key, and for
    /// `source`/`document_id` values that are not strings.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            PAGE_KEY => {
                return Err(DocioError::validation(
                    "Overlay cannot set the 'page' metadata key; it is owned by the extractor",
                ));
            }
            SOURCE_KEY | DOCUMENT_ID_KEY => {
                let text = value
                    .as_str()
                    .ok_or_else(|| DocioError::validation(format!("Overlay field '{}' must be a string", key)))?
                    .to_string();
                if key == SOURCE_KEY {
                    self.source = Some(text);
                } else {
                    self.document_id = Some(text);
                }
            }
            _ => {
                self.extra.insert(key, value);
            }
        }
        Ok(self)
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.document_id.is_none() && self.extra.is_empty()
    }

    /// Overlay entries in application order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, Value)> + '_ {
        let identity = [(SOURCE_KEY, &self.source), (DOCUMENT_ID_KEY, &self.document_id)]
            .into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| (key, Value::String(v.clone()))));
        let extra = self.extra.iter().map(|(key, value)| (key.as_str(), value.clone()));
        extra.chain(identity)
    }
}
