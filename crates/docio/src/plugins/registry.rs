//! Format registry: maps file extensions to extractors.
//!
//! Dispatch is a table lookup. Supporting a new format means registering an
//! extractor, never editing the dispatcher.

use crate::core::formats::{extension_of, normalize_extension};
use crate::plugins::FormatExtractor;
use crate::{DocioError, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;

/// Validate a plugin name before registration.
///
/// # Rules
///
/// - Name cannot be empty
/// - Name cannot contain whitespace
fn validate_plugin_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DocioError::validation("Plugin name cannot be empty"));
    }

    if name.contains(char::is_whitespace) {
        return Err(DocioError::validation(format!(
            "Plugin name '{}' cannot contain whitespace",
            name
        )));
    }

    Ok(())
}

/// Registry of format extractors keyed by extension.
///
/// Build it once, then share it (`Arc<FormatRegistry>`) between loaders and
/// threads; lookups take `&self` and need no locking.
///
/// # Example
///
/// ```rust
/// use docio::plugins::registry::FormatRegistry;
/// use std::path::Path;
///
/// # fn main() -> docio::Result<()> {
/// let registry = FormatRegistry::with_defaults()?;
/// let extractor = registry.dispatch(Path::new("quarterly.PDF"))?;
/// assert_eq!(extractor.name(), "pdf-extractor");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct FormatRegistry {
    extractors: IndexMap<String, Arc<dyn FormatExtractor>>,
}

impl FormatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            extractors: IndexMap::new(),
        }
    }

    /// Create a registry holding the built-in extractors.
    pub fn with_defaults() -> Result<Self> {
        let mut registry = Self::new();
        crate::extractors::register_default_extractors(&mut registry)?;
        Ok(registry)
    }

    /// Register an extractor for every extension it supports.
    ///
    /// An extension already taken by an extractor with a higher priority is
    /// left alone; otherwise the new extractor replaces the old one.
    ///
    /// # Errors
    ///
    /// - `DocioError::Validation` - invalid extractor name or extension, or no extensions
    /// - Any error from the extractor's `initialize()` method
    pub fn register(&mut self, extractor: Arc<dyn FormatExtractor>) -> Result<()> {
        let name = extractor.name().to_string();
        validate_plugin_name(&name)?;

        let extensions = extractor
            .supported_extensions()
            .iter()
            .map(|ext| normalize_extension(ext))
            .collect::<Result<Vec<_>>>()?;

        if extensions.is_empty() {
            return Err(DocioError::validation(format!(
                "Extractor '{}' does not declare any file extension",
                name
            )));
        }

        extractor.initialize()?;

        for extension in extensions {
            self.insert(extension, Arc::clone(&extractor));
        }

        Ok(())
    }

    /// Register an extractor for one extra extension, beyond the ones it declares.
    ///
    /// Useful to route e.g. `.markdown` or `.text` to an existing extractor.
    pub fn register_extension(&mut self, extension: &str, extractor: Arc<dyn FormatExtractor>) -> Result<()> {
        validate_plugin_name(extractor.name())?;
        let extension = normalize_extension(extension)?;
        extractor.initialize()?;
        self.insert(extension, extractor);
        Ok(())
    }

    fn insert(&mut self, extension: String, extractor: Arc<dyn FormatExtractor>) {
        if let Some(existing) = self.extractors.get(&extension)
            && existing.priority() > extractor.priority()
        {
            tracing::debug!(
                extension = %extension,
                kept = existing.name(),
                skipped = extractor.name(),
                "Extension already served by a higher priority extractor"
            );
            return;
        }

        tracing::debug!(extension = %extension, extractor = extractor.name(), "Registered extractor");
        self.extractors.insert(extension, extractor);
    }

    /// Look up the extractor registered for a normalized extension (`".pdf"`).
    pub fn get(&self, extension: &str) -> Option<Arc<dyn FormatExtractor>> {
        self.extractors.get(extension).cloned()
    }

    /// Select the extractor for `path` based on its extension.
    ///
    /// This only looks at the file name; the file itself is not touched.
    ///
    /// # Errors
    ///
    /// Returns `DocioError::UnsupportedFormat` carrying the lowercased
    /// extension when nothing is registered for it.
    pub fn dispatch(&self, path: &Path) -> Result<Arc<dyn FormatExtractor>> {
        let extension = extension_of(path);
        self.get(&extension)
            .ok_or_else(|| DocioError::unsupported_format(extension))
    }

    /// Whether an extractor is registered for the extension of `path`.
    pub fn supports(&self, path: &Path) -> bool {
        self.extractors.contains_key(&extension_of(path))
    }

    /// Registered extensions in registration order.
    pub fn extensions(&self) -> Vec<String> {
        self.extractors.keys().cloned().collect()
    }

    /// `(extension, extractor name)` pairs in registration order.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.extractors
            .iter()
            .map(|(ext, extractor)| (ext.clone(), extractor.name().to_string()))
            .collect()
    }

    /// Distinct extractor names in registration order.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for extractor in self.extractors.values() {
            if !names.iter().any(|name| name == extractor.name()) {
                names.push(extractor.name().to_string());
            }
        }
        names
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

static DEFAULT_REGISTRY: Lazy<Result<Arc<FormatRegistry>>> =
    Lazy::new(|| FormatRegistry::with_defaults().map(Arc::new));

/// Process-wide registry with the built-in extractors.
///
/// Initialized on first use and never mutated afterwards. Build your own
/// [`FormatRegistry`] to add formats.
pub fn default_registry() -> Result<Arc<FormatRegistry>> {
    DEFAULT_REGISTRY.as_ref().map(Arc::clone).map_err(|e| {
        DocioError::validation(format!("Failed to register default extractors: {}", e))
    })
}
