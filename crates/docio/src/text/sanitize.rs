//! Removal of non-printable code points from extracted text.
//!
//! A code point is non-printable when its Unicode general category is Other
//! (`Cc`, `Cf`, `Cs`, `Co`, `Cn`) or Separator (`Zl`, `Zp`, `Zs`). The ASCII
//! space stays, and so does `\n` so that line structure survives. Tabs,
//! carriage returns, form feeds, zero-width marks, private-use and unassigned
//! code points are all deleted (not replaced).

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static NON_PRINTABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{C}\p{Z}--[\n ]]+").expect("Non-printable class regex pattern is valid and should compile")
});

/// Delete every non-printable code point except `\n`.
///
/// Returns the input unchanged (borrowed) when nothing has to be removed.
/// The function is total and idempotent.
///
/// # Example
///
/// ```rust
/// use docio::text::sanitize;
///
/// assert_eq!(sanitize("page\x0c one\u{200b}\r\nnext"), "page one\nnext");
/// assert_eq!(sanitize("already clean\n"), "already clean\n");
/// ```
pub fn sanitize(text: &str) -> Cow<'_, str> {
    NON_PRINTABLE.replace_all(text, "")
}

/// Whether `ch` is printable. `\n` is not printable but is still kept by [`sanitize`].
pub fn is_printable(ch: char) -> bool {
    let mut buf = [0u8; 4];
    ch != '\n' && !NON_PRINTABLE.is_match(ch.encode_utf8(&mut buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_ascii_is_borrowed() {
        let input = "Hello, World!\nSecond line ~ with symbols {}[]";
        let output = sanitize(input);
        assert!(matches!(output, Cow::Borrowed(_)));
        assert_eq!(output, input);
    }

    #[test]
    fn test_all_printable_ascii_survives() {
        let input: String = (0x20u8..0x7f).map(char::from).chain(['\n']).collect();
        assert_eq!(sanitize(&input), input);
    }

    #[test]
    fn test_removes_c0_and_c1_controls() {
        let input = "a\x00b\x07c\x0bd\x0ce\x1bf\x7fg\u{85}h\u{9f}i";
        assert_eq!(sanitize(input), "abcdefghi");
    }

    #[test]
    fn test_removes_tab_and_carriage_return_keeps_newline() {
        assert_eq!(sanitize("col1\tcol2\r\nnext\n"), "col1col2\nnext\n");
    }

    #[test]
    fn test_removes_format_characters() {
        // zero-width space, zero-width joiner, BOM, soft hyphen
        let input = "zero\u{200b}width\u{200d}join\u{feff}bom\u{ad}shy";
        assert_eq!(sanitize(input), "zerowidthjoinbomshy");
    }

    #[test]
    fn test_removes_non_ascii_separators() {
        // no-break space, ideographic space, line separator, paragraph separator
        let input = "a\u{a0}b\u{3000}c\u{2028}d\u{2029}e";
        assert_eq!(sanitize(input), "abcde");
    }

    #[test]
    fn test_removes_private_use_and_unassigned() {
        let input = "x\u{e000}y\u{f8ff}z\u{10ffff}w\u{0378}v";
        assert_eq!(sanitize(input), "xyzwv");
    }

    #[test]
    fn test_keeps_replacement_character_and_letters() {
        let input = "Gr\u{fc}\u{df}e \u{4e2d}\u{6587} \u{fffd} caf\u{e9} \u{1f600}";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn test_is_idempotent() {
        let samples = [
            "",
            "\n\n",
            "\t\r\x0c",
            "mixed\u{200b} \u{a0}content\x00\nwith\u{2028}breaks",
            "plain text",
        ];
        for sample in samples {
            let once = sanitize(sample).into_owned();
            let twice = sanitize(&once).into_owned();
            assert_eq!(once, twice, "sanitize should be idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_output_has_no_non_printable() {
        let input: String = (0u32..0x3000).filter_map(char::from_u32).collect();
        let output = sanitize(&input);
        assert!(output.chars().all(|c| c == '\n' || is_printable(c)));
        assert!(output.contains('\n'));
        assert!(output.contains(' '));
    }

    #[test]
    fn test_is_printable() {
        assert!(is_printable('a'));
        assert!(is_printable(' '));
        assert!(is_printable('\u{fffd}'));
        assert!(!is_printable('\n'));
        assert!(!is_printable('\t'));
        assert!(!is_printable('\u{200b}'));
    }
}
