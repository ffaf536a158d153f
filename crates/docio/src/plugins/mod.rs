//! Plugin system for teaching docio new file formats.
//!
//! # Plugin Types
//!
//! - [`Plugin`] - Base trait that all plugins implement
//! - [`FormatExtractor`] - Turns one file into raw extraction units
//!
//! Extractors are stored as `Arc<dyn FormatExtractor>` in a
//! [`FormatRegistry`](registry::FormatRegistry) and shared between threads:
//!
//! ```rust
//! use docio::plugins::registry::FormatRegistry;
//! use docio::plugins::{FormatExtractor, Plugin};
//! use docio::{ExtractionUnit, Loader, LoaderConfig, Result};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! struct TsvExtractor;
//!
//! impl Plugin for TsvExtractor {
//!     fn name(&self) -> &str { "tsv-extractor" }
//!     fn version(&self) -> String { "0.1.0".to_string() }
//! }
//!
//! impl FormatExtractor for TsvExtractor {
//!     fn extract(&self, _path: &Path, _config: &LoaderConfig) -> Result<Vec<ExtractionUnit>> {
//!         Ok(vec![ExtractionUnit::new("a\tb")])
//!     }
//!
//!     fn supported_extensions(&self) -> &[&str] { &[".tsv"] }
//! }
//!
//! # fn main() -> Result<()> {
//! let mut registry = FormatRegistry::with_defaults()?;
//! registry.register(Arc::new(TsvExtractor))?;
//! let loader = Loader::new(Arc::new(registry), LoaderConfig::default());
//! assert!(loader.registry().supports(Path::new("table.tsv")));
//! # Ok(())
//! # }
//! ```

pub mod extractor;
pub mod registry;
mod traits;

pub use extractor::FormatExtractor;
pub use registry::{FormatRegistry, default_registry};
pub use traits::Plugin;
