//! Page text extraction.
//!
//! Pdfium reports every character with its bounds. Characters are grouped
//! into runs (same baseline, no whitespace or wide gap between them) and the
//! runs are handed to [`layout_page`] to rebuild the reading order.

use super::bindings::with_pdfium;
use super::error::{PdfError, Result};
use super::layout::{TextRun, layout_page};
use super::metadata::{DocumentInfo, document_info};
use super::structure::check_page_contents;
use crate::core::config::PdfConfig;
use pdfium_render::prelude::*;

/// Horizontal gap, in points, from which two characters belong to different runs.
const RUN_SPACING_THRESHOLD: f32 = 3.0;

/// Text of one page. `number` is 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

/// Everything read from a PDF file.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfText {
    pub pages: Vec<PageText>,
    pub info: DocumentInfo,
}

/// Extract the text of every page, in page order, plus the document info.
///
/// Pages without text are kept with empty text. Any page failing to decode
/// fails the whole document.
///
/// # Errors
///
/// - `PdfError::InvalidPdf` - the bytes are not a parseable PDF
/// - `PdfError::ContentDecodingFailed` - a page content stream is missing, dangling or corrupt
/// - `PdfError::LibraryUnavailable` - Pdfium could not be loaded
pub fn extract_pdf_text(pdf_bytes: &[u8], config: &PdfConfig) -> Result<PdfText> {
    let page_count = check_page_contents(pdf_bytes)?;

    with_pdfium(|pdfium| {
        let document = pdfium
            .load_pdf_from_byte_slice(pdf_bytes, None)
            .map_err(|e| PdfError::InvalidPdf(e.to_string()))?;

        let mut pages = Vec::with_capacity(page_count);
        for (index, page) in document.pages().iter().enumerate() {
            let number = index as u32 + 1;
            let runs = page_runs(&page, number)?;
            tracing::trace!(page = number, runs = runs.len(), "Collected text runs");
            pages.push(PageText {
                number,
                text: layout_page(runs, config),
            });
        }

        Ok(PdfText {
            pages,
            info: document_info(&document),
        })
    })
}

/// Character with its loose bounds, in points, y up.
#[derive(Debug, Clone)]
struct CharBox {
    ch: char,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

fn page_runs(page: &PdfPage<'_>, number: u32) -> Result<Vec<TextRun>> {
    let failed = |message: String| PdfError::ContentDecodingFailed { page: number, message };

    let text = page
        .text()
        .map_err(|e| failed(format!("page text unavailable: {}", e)))?;

    let mut chars = Vec::new();
    for pdf_char in text.chars().iter() {
        let Some(ch) = pdf_char.unicode_char() else {
            continue;
        };
        let bounds = pdf_char
            .loose_bounds()
            .map_err(|e| failed(format!("character bounds unavailable: {}", e)))?;
        chars.push(CharBox {
            ch,
            x: bounds.left().value,
            y: bounds.bottom().value,
            width: bounds.width().value,
            height: bounds.height().value,
        });
    }

    Ok(group_chars_into_runs(chars))
}

fn group_chars_into_runs(chars: Vec<CharBox>) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut current: Vec<CharBox> = Vec::new();

    for char_box in chars {
        if char_box.ch.is_whitespace() || char_box.ch.is_control() {
            flush(&mut current, &mut runs);
            continue;
        }
        if starts_new_run(&current, &char_box) {
            flush(&mut current, &mut runs);
        }
        current.push(char_box);
    }
    flush(&mut current, &mut runs);

    runs
}

fn starts_new_run(current: &[CharBox], next: &CharBox) -> bool {
    let Some(last) = current.last() else {
        return false;
    };
    if (next.y - last.y).abs() > last.height * 0.5 {
        return true;
    }
    let gap = next.x - (last.x + last.width);
    gap > RUN_SPACING_THRESHOLD || gap < -last.width
}

fn flush(current: &mut Vec<CharBox>, runs: &mut Vec<TextRun>) {
    let Some(first) = current.first() else {
        return;
    };

    let left = current.iter().map(|c| c.x).fold(f32::INFINITY, f32::min);
    let right = current.iter().map(|c| c.x + c.width).fold(f32::NEG_INFINITY, f32::max);
    let height = current.iter().map(|c| c.height).fold(0.0, f32::max);
    let text: String = current.iter().map(|c| c.ch).collect();

    runs.push(TextRun::new(text, left, first.y, right - left, height));
    current.clear();
}
