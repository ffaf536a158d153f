//! Errors raised while reading PDF files.
//!
//! Converted into `DocioError::Extraction` at the crate boundary, except
//! `LibraryUnavailable` which becomes `DocioError::Resource`.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PdfError {
    /// The bytes could not be parsed as a PDF document.
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    /// A page content stream is missing, unresolvable or does not decode.
    #[error("Failed to decode content stream of page {page}: {message}")]
    ContentDecodingFailed { page: u32, message: String },

    /// The Pdfium library could not be bound.
    #[error("Pdfium library unavailable: {0}")]
    LibraryUnavailable(String),

    #[error("I/O error: {0}")]
    IOError(String),
}

impl From<lopdf::Error> for PdfError {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(io_err) => PdfError::IOError(io_err.to_string()),
            other => PdfError::InvalidPdf(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PdfError>;
