//! docio - document ingestion for retrieval pipelines
//!
//! docio turns uploaded files (plain text, Markdown, CSV and PDF) into a
//! uniform sequence of [`Document`]s: sanitized text plus ordered metadata
//! that always carries a `page` entry.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use docio::{DocumentOverlay, Loader};
//!
//! # fn main() -> docio::Result<()> {
//! let loader = Loader::default_loader()?;
//!
//! // From a path
//! for doc in loader.load("handbook.pdf")? {
//!     println!("page {}: {}", doc.page(), doc.page_content());
//! }
//!
//! // From an upload held in memory
//! let bytes = b"id,question\n1,How do I reset my password?\n";
//! let docs = loader.load_upload("faq.csv", bytes)?;
//! assert_eq!(docs[0].metadata_str("document_id"), Some("faq.csv"));
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): loader entry points, normalization, staging, config loading
//! - **Plugin System** (`plugins`): the extractor trait and the extension registry
//! - **Extractors** (`extractors`): built-in text, CSV and PDF extractors
//! - **PDF** (`pdf`): content-stream interpretation and layout-aware reading order
//! - **Text** (`text`): decoding and sanitization
//!
//! # Pipeline
//!
//! ```text
//! path -> dispatch by extension -> extract units -> sanitize -> normalize metadata -> Vec<Document>
//! ```

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extractors;
pub mod pdf;
pub mod plugins;
pub mod text;
pub mod types;

pub use error::{DocioError, Result};
pub use types::{Document, DocumentOverlay, ExtractionUnit, Metadata};

pub use core::config::LoaderConfig;
pub use core::loader::{Loader, load_file, load_file_with_overlay};

#[cfg(feature = "tokio-runtime")]
pub use core::loader::load_file_async;

pub use plugins::registry::{FormatRegistry, default_registry};
pub use text::sanitize;
