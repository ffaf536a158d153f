//! Structural checks on page content streams.
//!
//! Pdfium draws whatever it can decode and drops the rest without reporting
//! it, so a page whose `/Contents` is dangling or whose stream does not
//! inflate would come out as an empty page. These checks run on the raw
//! object graph first and turn such pages into errors.
//!
//! A page without a `/Contents` key is a blank page and passes.

use super::error::{PdfError, Result};
use flate2::read::ZlibDecoder;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::borrow::Cow;
use std::collections::HashSet;
use std::io::Read;

/// Page tree depth searched for inherited `/Resources`.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Check the content streams of every page, and of the form XObjects each
/// page can draw. Returns the number of pages.
///
/// # Errors
///
/// - `PdfError::InvalidPdf` - the bytes are not a parseable PDF
/// - `PdfError::ContentDecodingFailed` - a page's content does not resolve or decode
pub fn check_page_contents(pdf_bytes: &[u8]) -> Result<usize> {
    let doc = Document::load_mem(pdf_bytes)?;
    let pages = doc.get_pages();

    for (&number, &page_id) in &pages {
        check_page(&doc, page_id).map_err(|message| PdfError::ContentDecodingFailed { page: number, message })?;
    }

    Ok(pages.len())
}

fn check_page(doc: &Document, page_id: ObjectId) -> std::result::Result<(), String> {
    let page = doc
        .get_dictionary(page_id)
        .map_err(|e| format!("page object does not resolve: {}", e))?;

    if let Ok(contents) = page.get(b"Contents") {
        let (_, contents) = doc
            .dereference(contents)
            .map_err(|e| format!("/Contents does not resolve: {}", e))?;

        match contents {
            Object::Stream(stream) => check_stream(stream)?,
            Object::Array(items) => {
                for item in items {
                    let (_, item) = doc
                        .dereference(item)
                        .map_err(|e| format!("/Contents entry does not resolve: {}", e))?;
                    let stream = item
                        .as_stream()
                        .map_err(|_| format!("/Contents entry is {}, expected a stream", item.enum_variant()))?;
                    check_stream(stream)?;
                }
            }
            other => {
                return Err(format!(
                    "/Contents is {}, expected a stream or an array",
                    other.enum_variant()
                ));
            }
        }
    }

    if let Some(resources) = page_resources(doc, page) {
        check_forms(doc, resources, &mut HashSet::new())?;
    }

    Ok(())
}

/// Form XObjects reachable from `resources`. Unresolvable entries are
/// skipped: a resource that is never drawn does not break the page.
fn check_forms(
    doc: &Document,
    resources: &Dictionary,
    visited: &mut HashSet<ObjectId>,
) -> std::result::Result<(), String> {
    let Some(xobjects) = resolve_dict(doc, resources.get(b"XObject").ok()) else {
        return Ok(());
    };

    for (name, entry) in xobjects.iter() {
        let Ok((id, Object::Stream(stream))) = doc.dereference(entry) else {
            continue;
        };
        if stream.dict.get(b"Subtype").and_then(Object::as_name).ok() != Some(b"Form".as_slice()) {
            continue;
        }
        if let Some(id) = id
            && !visited.insert(id)
        {
            continue;
        }

        check_stream(stream).map_err(|message| format!("form XObject /{}: {}", String::from_utf8_lossy(name), message))?;
        if let Some(inner) = resolve_dict(doc, stream.dict.get(b"Resources").ok()) {
            check_forms(doc, inner, visited)?;
        }
    }

    Ok(())
}

/// Inflate every leading `FlateDecode` stage strictly. Other filters are left
/// to Pdfium.
fn check_stream(stream: &Stream) -> std::result::Result<(), String> {
    if stream.dict.get(b"Filter").is_err() {
        return Ok(());
    }
    let filters = stream.filters().map_err(|e| format!("invalid /Filter: {}", e))?;

    let mut data = Cow::Borrowed(stream.content.as_slice());
    for filter in filters {
        match filter {
            b"FlateDecode" | b"Fl" => data = Cow::Owned(inflate(&data)?),
            _ => break,
        }
    }

    Ok(())
}

fn inflate(data: &[u8]) -> std::result::Result<Vec<u8>, String> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let mut output = Vec::with_capacity(data.len() * 2);
    ZlibDecoder::new(data)
        .read_to_end(&mut output)
        .map_err(|e| format!("FlateDecode failed: {}", e))?;
    Ok(output)
}

fn page_resources<'a>(doc: &'a Document, page: &'a Dictionary) -> Option<&'a Dictionary> {
    let mut node = page;
    for _ in 0..MAX_INHERITANCE_DEPTH {
        if let Some(resources) = resolve_dict(doc, node.get(b"Resources").ok()) {
            return Some(resources);
        }
        node = resolve_dict(doc, node.get(b"Parent").ok())?;
    }
    None
}

fn resolve_dict<'a>(doc: &'a Document, object: Option<&'a Object>) -> Option<&'a Dictionary> {
    match doc.dereference(object?).ok()?.1 {
        Object::Dictionary(dict) => Some(dict),
        Object::Stream(stream) => Some(&stream.dict),
        _ => None,
    }
}
