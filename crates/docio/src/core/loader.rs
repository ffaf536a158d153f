//! Top-level load operation.
//!
//! A [`Loader`] ties the pipeline together:
//!
//! ```text
//! path -> FormatRegistry::dispatch -> FormatExtractor::extract -> sanitize + normalize -> Vec<Document>
//! ```
//!
//! Errors from any stage are propagated unchanged; no stage produces partial
//! output.

use crate::core::config::LoaderConfig;
use crate::core::formats::extension_of;
use crate::core::normalize::normalize_units;
use crate::core::staging::with_staged_file;
use crate::plugins::FormatExtractor;
use crate::plugins::registry::{FormatRegistry, default_registry};
use crate::types::{Document, DocumentOverlay};
use crate::Result;
use std::path::Path;
use std::sync::Arc;

/// Document loader bound to a registry and a configuration.
///
/// Cheap to clone; the registry is shared.
///
/// # Example
///
/// ```rust,no_run
/// use docio::{DocumentOverlay, Loader};
///
/// # fn main() -> docio::Result<()> {
/// let loader = Loader::default_loader()?;
/// let overlay = DocumentOverlay::new().with_document_id("kb-42");
/// for doc in loader.load_with_overlay("handbook.pdf", &overlay)? {
///     println!("page {}: {} chars", doc.page(), doc.page_content().len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Loader {
    registry: Arc<FormatRegistry>,
    config: LoaderConfig,
}

impl Loader {
    pub fn new(registry: Arc<FormatRegistry>, config: LoaderConfig) -> Self {
        Self { registry, config }
    }

    /// Loader using the default registry and the given configuration.
    pub fn with_config(config: LoaderConfig) -> Result<Self> {
        Ok(Self::new(default_registry()?, config))
    }

    /// Loader using the default registry and default configuration.
    pub fn default_loader() -> Result<Self> {
        Self::with_config(LoaderConfig::default())
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load the file at `path` into documents.
    ///
    /// # Errors
    ///
    /// - `DocioError::UnsupportedFormat` - no extractor for the file extension
    /// - `DocioError::Extraction` - the file is unreadable or malformed
    /// - `DocioError::Validation` - the configuration does not fit the file
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<Document>> {
        self.load_with_overlay(path, &DocumentOverlay::new())
    }

    /// Load the file at `path`, merging `overlay` into every document.
    pub fn load_with_overlay(&self, path: impl AsRef<Path>, overlay: &DocumentOverlay) -> Result<Vec<Document>> {
        let path = path.as_ref();
        let extractor = self.registry.dispatch(path)?;
        self.run(extractor.as_ref(), path, overlay)
    }

    /// Load an uploaded file from memory.
    ///
    /// The format is chosen from `filename` before anything touches the
    /// disk. The bytes are then staged into a temporary file with the same
    /// extension, loaded, and removed again whatever the outcome. Every
    /// document gets `source` and `document_id` set to `filename`.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), plus `DocioError::Resource` when the
    /// staging file cannot be created, written or removed.
    pub fn load_upload(&self, filename: &str, bytes: &[u8]) -> Result<Vec<Document>> {
        let extractor = self.registry.dispatch(Path::new(filename))?;
        let extension = extension_of(Path::new(filename));
        let overlay = DocumentOverlay::for_upload(filename);

        with_staged_file(bytes, &extension, self.config.staging_dir.as_deref(), |staged| {
            self.run(extractor.as_ref(), staged, &overlay)
        })
    }

    fn run(&self, extractor: &dyn FormatExtractor, path: &Path, overlay: &DocumentOverlay) -> Result<Vec<Document>> {
        tracing::debug!(path = %path.display(), extractor = extractor.name(), "Dispatching file");

        let units = extractor.extract(path, &self.config).map_err(|err| {
            tracing::warn!(path = %path.display(), extractor = extractor.name(), error = %err, "Extraction failed");
            err
        })?;

        let documents = normalize_units(units, overlay);
        tracing::info!(
            path = %path.display(),
            extractor = extractor.name(),
            documents = documents.len(),
            "Loaded file"
        );
        Ok(documents)
    }

    /// Async variant of [`load_with_overlay`](Self::load_with_overlay).
    ///
    /// Runs the synchronous pipeline on tokio's blocking pool.
    ///
    /// # Errors
    ///
    /// Same as the synchronous variant, plus `DocioError::Resource` when the
    /// blocking task panics or is cancelled.
    #[cfg(feature = "tokio-runtime")]
    pub async fn load_async(&self, path: impl AsRef<Path>, overlay: &DocumentOverlay) -> Result<Vec<Document>> {
        let loader = self.clone();
        let path = path.as_ref().to_path_buf();
        let overlay = overlay.clone();

        tokio::task::spawn_blocking(move || loader.load_with_overlay(&path, &overlay))
            .await
            .map_err(|e| crate::DocioError::resource_with_source("Blocking load task failed", e))?
    }
}

/// Load a file with the default loader.
///
/// # Example
///
/// ```rust,no_run
/// let docs = docio::load_file("notes.md")?;
/// assert_eq!(docs[0].page(), 0);
/// # Ok::<(), docio::DocioError>(())
/// ```
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    Loader::default_loader()?.load(path)
}

/// Load a file with the default loader, merging `overlay` into every document.
pub fn load_file_with_overlay(path: impl AsRef<Path>, overlay: &DocumentOverlay) -> Result<Vec<Document>> {
    Loader::default_loader()?.load_with_overlay(path, overlay)
}

/// Async variant of [`load_file`].
#[cfg(feature = "tokio-runtime")]
pub async fn load_file_async(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    Loader::default_loader()?
        .load_async(path, &DocumentOverlay::new())
        .await
}
