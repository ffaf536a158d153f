//! Error types for docio.
//!
//! Every fallible operation in the crate returns [`DocioError`]. The variants
//! mirror the failure classes a caller has to tell apart:
//!
//! - `UnsupportedFormat` - no extractor is registered for the file extension
//! - `Extraction` - the file has a supported type but could not be read or parsed
//! - `Resource` - temp-file staging, blocking-task or Pdfium binding infrastructure failed
//! - `Validation` - invalid configuration, registration or overlay input
//! - `Serialization` - JSON (de)serialization failures
//!
//! `UnsupportedFormat`, `Extraction` and `Validation` are caused by caller input
//! and should be reported back to the caller; `Resource` and `Serialization`
//! are infrastructure faults. See [`DocioError::is_user_error`].
//!
//! # Example
//!
//! ```rust
//! use docio::{DocioError, Result};
//!
//! fn read_upload(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .map_err(|e| DocioError::extraction_with_source(format!("Failed to read {}", path), e))
//! }
//!
//! let err = read_upload("/nonexistent/upload.txt").unwrap_err();
//! assert!(matches!(err, DocioError::Extraction { .. }));
//! ```
use thiserror::Error;

/// Result type alias using `DocioError`.
pub type Result<T> = std::result::Result<T, DocioError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for all docio operations.
#[derive(Debug, Error)]
pub enum DocioError {
    /// The file extension has no registered extractor.
    ///
    /// `extension` is lowercased and keeps its leading dot (`".xyz"`); it is
    /// empty when the file name has no extension at all.
    #[error("Unsupported file type: '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("Extraction error: {message}")]
    Extraction {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Resource error: {message}")]
    Resource {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl From<serde_json::Error> for DocioError {
    fn from(err: serde_json::Error) -> Self {
        DocioError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<csv::Error> for DocioError {
    fn from(err: csv::Error) -> Self {
        DocioError::Extraction {
            message: format!("Malformed CSV: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

impl From<crate::pdf::error::PdfError> for DocioError {
    fn from(err: crate::pdf::error::PdfError) -> Self {
        let message = err.to_string();
        match err {
            crate::pdf::error::PdfError::LibraryUnavailable(_) => DocioError::Resource {
                message,
                source: Some(Box::new(err)),
            },
            _ => DocioError::Extraction {
                message,
                source: Some(Box::new(err)),
            },
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl DocioError {
    error_constructor!(extraction, Extraction);
    error_constructor!(resource, Resource);
    error_constructor!(validation, Validation);
    error_constructor!(serialization, Serialization);

    /// Create an `UnsupportedFormat` error for an extension.
    pub fn unsupported_format<S: Into<String>>(extension: S) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    /// Whether the failure was caused by caller input rather than infrastructure.
    ///
    /// Transport layers map `true` to a client error (4xx) and `false` to a
    /// server error (5xx).
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. } | Self::Extraction { .. } | Self::Validation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_carries_extension() {
        let err = DocioError::unsupported_format(".xyz");
        assert_eq!(err.to_string(), "Unsupported file type: '.xyz'");
        match err {
            DocioError::UnsupportedFormat { extension } => assert_eq!(extension, ".xyz"),
            other => panic!("Expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_extraction_error() {
        let err = DocioError::extraction("bad xref table");
        assert_eq!(err.to_string(), "Extraction error: bad xref table");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_extraction_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad data");
        let err = DocioError::extraction_with_source("corrupt file", source);
        assert_eq!(err.to_string(), "Extraction error: corrupt file");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_resource_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only fs");
        let err = DocioError::resource_with_source("Failed to create temp file", source);
        assert_eq!(err.to_string(), "Resource error: Failed to create temp file");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validation_error() {
        let err = DocioError::validation("extension cannot be empty");
        assert_eq!(err.to_string(), "Validation error: extension cannot be empty");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: DocioError = json_err.into();
        assert!(matches!(err, DocioError::Serialization { .. }));
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_pdf_error_conversion() {
        let pdf_err = crate::pdf::error::PdfError::InvalidPdf("missing trailer".to_string());
        let err: DocioError = pdf_err.into();
        assert!(matches!(err, DocioError::Extraction { .. }));
        assert!(err.to_string().contains("missing trailer"));
    }

    #[test]
    fn test_user_error_classification() {
        assert!(DocioError::unsupported_format(".xyz").is_user_error());
        assert!(DocioError::extraction("corrupt").is_user_error());
        assert!(DocioError::validation("bad config").is_user_error());
        assert!(!DocioError::resource("disk full").is_user_error());
        assert!(!DocioError::serialization("bad json").is_user_error());
    }
}
