//! Byte-to-text decoding for text-based formats.

use crate::{DocioError, Result};
use chardetng::EncodingDetector;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode file bytes into a `String`.
///
/// UTF-8 (with or without BOM) is always accepted. Other encodings are only
/// accepted when `autodetect` is set, in which case the most likely legacy
/// encoding is picked by `chardetng`.
///
/// # Errors
///
/// Returns `DocioError::Extraction` when the bytes are not valid UTF-8 and
/// autodetection is disabled.
pub fn decode_text(bytes: &[u8], autodetect: bool) -> Result<String> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(err) if autodetect => {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            let encoding = detector.guess(None, true);
            let (decoded, actual, had_errors) = encoding.decode(bytes);
            tracing::debug!(
                encoding = actual.name(),
                had_errors,
                utf8_error = %err,
                "Decoded non-UTF-8 input with detected encoding"
            );
            Ok(decoded.into_owned())
        }
        Err(err) => Err(DocioError::extraction_with_source(
            format!("Input is not valid UTF-8 (byte offset {})", err.valid_up_to()),
            err,
        )),
    }
}
