//! Document information dictionary (`/Info`).

use pdfium_render::prelude::*;
use serde::{Deserialize, Serialize};

/// Fields of the PDF document information dictionary.
///
/// Dates are converted to ISO 8601 when they follow the PDF date syntax and
/// kept verbatim otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modification_date: Option<String>,
}

impl DocumentInfo {
    /// Present fields as `(metadata key, value)` pairs, in a fixed order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("title", &self.title),
            ("author", &self.author),
            ("subject", &self.subject),
            ("keywords", &self.keywords),
            ("creator", &self.creator),
            ("producer", &self.producer),
            ("creation_date", &self.creation_date),
            ("modification_date", &self.modification_date),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (key, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

/// Read the information dictionary of `document`. Empty entries are skipped.
pub fn document_info(document: &PdfDocument<'_>) -> DocumentInfo {
    let metadata = document.metadata();
    let text = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        let value = metadata.get(tag)?.value().trim().to_string();
        (!value.is_empty()).then_some(value)
    };

    DocumentInfo {
        title: text(PdfDocumentMetadataTagType::Title),
        author: text(PdfDocumentMetadataTagType::Author),
        subject: text(PdfDocumentMetadataTagType::Subject),
        keywords: text(PdfDocumentMetadataTagType::Keywords),
        creator: text(PdfDocumentMetadataTagType::Creator),
        producer: text(PdfDocumentMetadataTagType::Producer),
        creation_date: text(PdfDocumentMetadataTagType::CreationDate).map(|date| parse_pdf_date(&date)),
        modification_date: text(PdfDocumentMetadataTagType::ModificationDate).map(|date| parse_pdf_date(&date)),
    }
}

/// Convert `D:YYYYMMDDHHmmSSOHH'mm'` to ISO 8601.
///
/// Only the year is mandatory. Strings that do not follow the syntax are
/// returned unchanged.
pub(crate) fn parse_pdf_date(raw: &str) -> String {
    let value = raw.trim();
    let body = value.strip_prefix("D:").unwrap_or(value).as_bytes();

    let digits = body.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits < 4 || digits % 2 != 0 || digits > 14 {
        return raw.to_string();
    }

    let field = |start: usize, default: &'static str| -> String {
        if start + 2 <= digits {
            String::from_utf8_lossy(&body[start..start + 2]).into_owned()
        } else {
            default.to_string()
        }
    };

    let year = String::from_utf8_lossy(&body[..4]);
    let date = format!(
        "{}-{}-{}T{}:{}:{}",
        year,
        field(4, "01"),
        field(6, "01"),
        field(8, "00"),
        field(10, "00"),
        field(12, "00")
    );

    let zone = &body[digits..];
    match zone.first() {
        None => date,
        Some(b'Z') => format!("{}Z", date),
        Some(sign @ (b'+' | b'-')) => {
            let tz: Vec<u8> = zone[1..].iter().copied().filter(u8::is_ascii_digit).collect();
            if tz.len() < 2 {
                return raw.to_string();
            }
            let hours = String::from_utf8_lossy(&tz[..2]);
            let minutes = if tz.len() >= 4 {
                String::from_utf8_lossy(&tz[2..4]).into_owned()
            } else {
                "00".to_string()
            };
            format!("{}{}{}:{}", date, *sign as char, hours, minutes)
        }
        Some(_) => raw.to_string(),
    }
}
