//! Text utilities: decoding raw bytes and sanitizing extracted text.

pub mod encoding;
pub mod sanitize;

pub use encoding::decode_text;
pub use sanitize::{is_printable, sanitize};
