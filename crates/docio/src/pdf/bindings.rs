//! Lazy binding to the Pdfium library.
//!
//! The library is searched in, in order:
//!
//! 1. the directory named by `DOCIO_PDFIUM_DIR` at runtime
//! 2. the copy fetched by the build script
//! 3. the system library search path
//!
//! The first successful location is remembered. Later calls bind to it again
//! without searching; a failed search is remembered too and reported on every
//! call.

use super::error::{PdfError, Result};
use once_cell::sync::Lazy;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Runtime override for the directory holding the Pdfium shared library.
pub const PDFIUM_DIR_ENV: &str = "DOCIO_PDFIUM_DIR";

enum BindingState {
    Uninitialized,
    Bound { lib_dir: Option<PathBuf> },
    Failed(String),
}

/// Held for the whole lifetime of a `Pdfium` instance, so documents are
/// processed one at a time.
static PDFIUM_STATE: Lazy<Mutex<BindingState>> = Lazy::new(|| Mutex::new(BindingState::Uninitialized));

fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = std::env::var_os(PDFIUM_DIR_ENV) {
        dirs.push(PathBuf::from(dir));
    }
    if let Some(dir) = option_env!("DOCIO_PDFIUM_BUILD_DIR") {
        dirs.push(PathBuf::from(dir));
    }
    dirs
}

fn bind_at(lib_dir: Option<&Path>) -> std::result::Result<Box<dyn PdfiumLibraryBindings>, PdfiumError> {
    match lib_dir {
        Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
        None => Pdfium::bind_to_system_library(),
    }
}

fn search() -> std::result::Result<(Option<PathBuf>, Box<dyn PdfiumLibraryBindings>), String> {
    let mut failures = Vec::new();
    for dir in candidate_dirs() {
        match bind_at(Some(&dir)) {
            Ok(bindings) => return Ok((Some(dir), bindings)),
            Err(err) => failures.push(format!("{}: {}", dir.display(), err)),
        }
    }

    match bind_at(None) {
        Ok(bindings) => Ok((None, bindings)),
        Err(err) => {
            failures.push(format!("system library: {}", err));
            Err(failures.join("; "))
        }
    }
}

/// Run `f` with a bound `Pdfium` instance.
///
/// # Errors
///
/// `PdfError::LibraryUnavailable` when no Pdfium library can be bound, plus
/// whatever `f` returns.
pub(crate) fn with_pdfium<T>(f: impl FnOnce(&Pdfium) -> Result<T>) -> Result<T> {
    let mut state = PDFIUM_STATE
        .lock()
        .map_err(|e| PdfError::LibraryUnavailable(format!("Pdfium state lock poisoned: {}", e)))?;

    let bindings = match &*state {
        BindingState::Uninitialized => match search() {
            Ok((lib_dir, bindings)) => {
                tracing::debug!(lib_dir = ?lib_dir, "Bound Pdfium");
                *state = BindingState::Bound { lib_dir };
                bindings
            }
            Err(err) => {
                tracing::warn!(error = %err, "Pdfium library not found");
                *state = BindingState::Failed(err.clone());
                return Err(PdfError::LibraryUnavailable(err));
            }
        },
        BindingState::Bound { lib_dir } => {
            bind_at(lib_dir.as_deref()).map_err(|e| PdfError::LibraryUnavailable(e.to_string()))?
        }
        BindingState::Failed(err) => {
            return Err(PdfError::LibraryUnavailable(format!(
                "earlier binding attempt failed: {}",
                err
            )));
        }
    };

    let pdfium = Pdfium::new(bindings);
    f(&pdfium)
}
