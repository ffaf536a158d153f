//! PDF text extraction.
//!
//! - **Characters**: positioned glyphs come from Pdfium (`pdfium-render`)
//! - **Layout**: characters are rebuilt into lines and columns in reading order
//! - **Structure**: page content streams are checked with `lopdf` before Pdfium
//!   sees them, so corrupt pages fail instead of coming out empty
//! - **Metadata**: the document information dictionary
//!
//! # Example
//!
//! ```rust,no_run
//! use docio::core::config::PdfConfig;
//! use docio::pdf::extract_pdf_text;
//!
//! # fn example() -> docio::Result<()> {
//! let bytes = std::fs::read("paper.pdf").map_err(|e| docio::DocioError::extraction_with_source("read", e))?;
//! let pdf = extract_pdf_text(&bytes, &PdfConfig::default())?;
//! for page in &pdf.pages {
//!     println!("--- page {} ---\n{}", page.number, page.text);
//! }
//! # Ok(())
//! # }
//! ```

mod bindings;
pub mod error;
pub mod layout;
pub mod metadata;
pub mod structure;
pub mod text;

pub use bindings::PDFIUM_DIR_ENV;
pub use error::PdfError;
pub use layout::{TextRun, layout_page};
pub use metadata::{DocumentInfo, document_info};
pub use structure::check_page_contents;
pub use text::{PageText, PdfText, extract_pdf_text};
