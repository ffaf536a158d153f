//! Shared fixtures for integration tests.
//!
//! PDFs are generated on the fly with lopdf so the tests do not depend on
//! binary files in the repository. Text uses Courier at 10pt, which makes
//! each glyph exactly 6pt wide.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::path::{Path, PathBuf};

/// Text drawn at an integer position, in points.
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a> {
    pub x: i64,
    pub y: i64,
    pub text: &'a str,
}

pub fn at(x: i64, y: i64, text: &str) -> Placed<'_> {
    Placed { x, y, text }
}

/// One line per entry, top to bottom, 14pt apart.
pub fn lines<'a>(x: i64, top: i64, text: &[&'a str]) -> Vec<Placed<'a>> {
    text.iter()
        .enumerate()
        .map(|(i, line)| at(x, top - 14 * i as i64, line))
        .collect()
}

fn show(font: &str, x: i64, y: i64, shown: Operation) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), Object::Integer(10)]),
        Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]),
        shown,
        Operation::new("ET", vec![]),
    ]
}

fn encode(operations: Vec<Operation>) -> Vec<u8> {
    Content { operations }.encode().unwrap()
}

/// Content stream drawing each run with `Tj` in Courier.
pub fn courier_content(runs: &[Placed<'_>]) -> Vec<u8> {
    let operations = runs
        .iter()
        .flat_map(|run| show("F1", run.x, run.y, Operation::new("Tj", vec![Object::string_literal(run.text)])))
        .collect();
    encode(operations)
}

/// Content stream with one `TJ` array: strings interleaved with kerning
/// adjustments in thousandths of the font size.
pub fn kerned_content(x: i64, y: i64, parts: &[(&str, i64)]) -> Vec<u8> {
    let mut array = Vec::new();
    for (text, adjustment) in parts {
        array.push(Object::string_literal(*text));
        if *adjustment != 0 {
            array.push(Object::Integer(*adjustment));
        }
    }
    encode(show("F1", x, y, Operation::new("TJ", vec![Object::Array(array)])))
}

/// Content stream drawing `text` with the Identity-H font added by
/// [`PdfBuilder::with_identity_font`]. Code `i + 1` stands for the i-th
/// character of `alphabet`.
pub fn identity_content(x: i64, y: i64, alphabet: &str, text: &str) -> Vec<u8> {
    let mut codes = Vec::new();
    for ch in text.chars() {
        let index = alphabet.chars().position(|c| c == ch).expect("character in alphabet") as u16 + 1;
        codes.extend_from_slice(&index.to_be_bytes());
    }
    encode(show(
        "F2",
        x,
        y,
        Operation::new("Tj", vec![Object::String(codes, StringFormat::Hexadecimal)]),
    ))
}

fn to_unicode_cmap(alphabet: &str) -> Vec<u8> {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n12 dict begin\nbegincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n/CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
    );
    let chars: Vec<char> = alphabet.chars().collect();
    cmap.push_str(&format!("{} beginbfchar\n", chars.len()));
    for (i, ch) in chars.iter().enumerate() {
        let mut units = [0u16; 2];
        let hex: String = ch.encode_utf16(&mut units).iter().map(|u| format!("{:04X}", u)).collect();
        cmap.push_str(&format!("<{:04X}> <{}>\n", i + 1, hex));
    }
    cmap.push_str("endbfchar\nendcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    cmap.into_bytes()
}

/// Assembles a PDF page by page. Courier is always available as `/F1`.
pub struct PdfBuilder {
    doc: Document,
    pages_id: ObjectId,
    fonts: Dictionary,
    kids: Vec<Object>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let courier = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let mut fonts = Dictionary::new();
        fonts.set("F1", courier);

        Self {
            doc,
            pages_id,
            fonts,
            kids: Vec::new(),
        }
    }

    /// Register `/F2`, a Type0 font with Identity-H encoding whose codes are
    /// mapped to `alphabet` through a ToUnicode CMap.
    pub fn with_identity_font(mut self, alphabet: &str) -> Self {
        let descriptor = self.doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => "Courier",
            "Flags" => Object::Integer(33),
            "FontBBox" => vec![Object::Integer(-23), Object::Integer(-250), Object::Integer(715), Object::Integer(805)],
            "ItalicAngle" => Object::Integer(0),
            "Ascent" => Object::Integer(629),
            "Descent" => Object::Integer(-157),
            "CapHeight" => Object::Integer(562),
            "StemV" => Object::Integer(51),
        });
        let descendant = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => "Courier",
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => Object::Integer(0),
            },
            "FontDescriptor" => descriptor,
            "DW" => Object::Integer(600),
            "CIDToGIDMap" => "Identity",
        });
        let to_unicode = self
            .doc
            .add_object(Stream::new(dictionary! {}, to_unicode_cmap(alphabet)));
        let font = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => "Courier",
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(descendant)],
            "ToUnicode" => to_unicode,
        });
        self.fonts.set("F2", font);
        self
    }

    /// Add a page whose `/Contents` is a single stream with `content`.
    pub fn page(self, content: Vec<u8>) -> Self {
        self.page_stream(Stream::new(dictionary! {}, content))
    }

    /// Add a page with a Flate-compressed content stream.
    pub fn compressed_page(self, content: Vec<u8>) -> Self {
        let mut stream = Stream::new(dictionary! {}, content);
        stream.compress().unwrap();
        assert!(stream.dict.get(b"Filter").is_ok(), "fixture content too short to compress");
        self.page_stream(stream)
    }

    pub fn page_stream(mut self, stream: Stream) -> Self {
        let content_id = self.doc.add_object(stream);
        self.page_contents(Some(Object::Reference(content_id)))
    }

    /// Add a page with an arbitrary `/Contents` value, or none at all.
    pub fn page_contents(mut self, contents: Option<Object>) -> Self {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
        };
        if let Some(contents) = contents {
            page.set("Contents", contents);
        }
        let page_id = self.doc.add_object(page);
        self.kids.push(Object::Reference(page_id));
        self
    }

    pub fn build(self, info: &[(&str, &str)]) -> Vec<u8> {
        let mut doc = self.doc;
        let resources_id = doc.add_object(dictionary! { "Font" => self.fonts });

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Count" => Object::Integer(self.kids.len() as i64),
            "Kids" => self.kids,
            "Resources" => resources_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(612), Object::Integer(792)],
        };
        doc.objects.insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if !info.is_empty() {
            let mut info_dict = Dictionary::new();
            for (key, value) in info {
                info_dict.set(*key, Object::string_literal(*value));
            }
            let info_id = doc.add_object(info_dict);
            doc.trailer.set("Info", info_id);
        }

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }
}

/// Build a PDF with one Courier page per entry of `pages` and an optional
/// `/Info` dictionary.
pub fn build_pdf(pages: &[Vec<Placed<'_>>], info: &[(&str, &str)]) -> Vec<u8> {
    pages
        .iter()
        .fold(PdfBuilder::new(), |builder, runs| builder.page(courier_content(runs)))
        .build(info)
}

/// Write a generated PDF to `dir/name` and return its path.
pub fn write_pdf(dir: &Path, name: &str, pages: &[Vec<Placed<'_>>], info: &[(&str, &str)]) -> PathBuf {
    write_file(dir, name, build_pdf(pages, info))
}

/// Write `content` to `dir/name` and return its path.
pub fn write_file(dir: &Path, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// A small table drawn column by column, the way many generators emit it.
pub fn table_drawn_by_column() -> Vec<Placed<'static>> {
    let mut runs = lines(72, 700, &["Name", "Ada", "Grace", "Linus"]);
    runs.extend(lines(200, 700, &["Role", "Compilers", "Navy", "Kernels"]));
    runs
}

pub const TABLE_BY_ROW: &str = "Name Role\nAda Compilers\nGrace Navy\nLinus Kernels";

pub const LEFT_COLUMN: [&str; 4] = [
    "Left column opens the story",
    "and keeps going for a while",
    "with enough words per line",
    "to look like regular prose.",
];

pub const RIGHT_COLUMN: [&str; 4] = [
    "Right column continues here",
    "after the left one is done",
    "so reading row by row would",
    "mix both halves of the text.",
];

pub const PROSE_TITLE: &str = "A Title Running Across Both Columns Of The Page Layout";

/// Two prose columns under a full-width title, right column drawn first.
pub fn two_column_prose() -> Vec<Placed<'static>> {
    let mut runs = vec![at(72, 740, PROSE_TITLE)];
    runs.extend(lines(320, 700, &RIGHT_COLUMN));
    runs.extend(lines(72, 700, &LEFT_COLUMN));
    runs
}

pub fn assert_page_numbers(docs: &[docio::Document], expected: &[u64]) {
    let pages: Vec<u64> = docs.iter().map(docio::Document::page).collect();
    assert_eq!(pages, expected, "unexpected page numbers");
}
