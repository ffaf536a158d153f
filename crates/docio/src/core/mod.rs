//! Core ingestion orchestration.
//!
//! - **Entry points**: [`Loader`](loader::Loader) and the `load_file*` functions
//! - **Formats**: extension normalization used by the registry
//! - **Normalization**: unit to document conversion with the `page` invariant
//! - **Staging**: temporary files for in-memory uploads
//! - **Configuration**: loading and discovering [`LoaderConfig`](config::LoaderConfig)
//! - **I/O**: file reading helpers for extractors

pub mod config;
pub mod formats;
pub mod io;
pub mod loader;
pub mod normalize;
pub mod staging;

pub use config::{ColumnDetection, CsvConfig, LoaderConfig, PdfConfig, TextConfig};
pub use loader::{Loader, load_file, load_file_with_overlay};

#[cfg(feature = "tokio-runtime")]
pub use loader::load_file_async;
