//! Document normalization.
//!
//! Turns raw [`ExtractionUnit`]s into [`Document`]s: sanitized content plus
//! merged metadata with a guaranteed integer `page` entry.

use crate::text::sanitize;
use crate::types::{Document, DocumentOverlay, ExtractionUnit, Metadata, PAGE_KEY};
use serde_json::Value;

/// Normalize a single extraction unit.
///
/// Metadata is assembled in this order, later entries overriding earlier ones
/// while keeping the first insertion position:
///
/// 1. `page`, taken from the unit when it is a non-negative integer, else 0
/// 2. the unit's own metadata
/// 3. the overlay
pub fn normalize_unit(unit: ExtractionUnit, overlay: &DocumentOverlay) -> Document {
    let ExtractionUnit { text, metadata: unit_metadata } = unit;

    let page = unit_metadata.get(PAGE_KEY).and_then(Value::as_u64).unwrap_or(0);

    let mut metadata = Metadata::with_capacity(unit_metadata.len() + 3);
    metadata.insert(PAGE_KEY.to_string(), Value::from(page));

    for (key, value) in unit_metadata {
        if key != PAGE_KEY {
            metadata.insert(key, value);
        }
    }

    for (key, value) in overlay.entries() {
        metadata.insert(key.to_string(), value);
    }

    let page_content = sanitize(&text).into_owned();
    Document::new(page_content, metadata)
}

/// Normalize every unit, preserving order.
pub fn normalize_units(units: Vec<ExtractionUnit>, overlay: &DocumentOverlay) -> Vec<Document> {
    units.into_iter().map(|unit| normalize_unit(unit, overlay)).collect()
}
