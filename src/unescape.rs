//! The unescaper: the inverse of the escape engine.
//!
//! Resolves backslash sequences back to code points, recognizing (in priority
//! order): hex escapes `\xHH`, octal escapes `\[0-3]?[0-7]{1,2}`, named
//! single-character escapes (including the JavaScript-only `\v` and `\'`),
//! Unicode code-unit escapes `\uHHHH`, and Unicode code-point escapes
//! `\u{H+}`. Two adjacent code-unit escapes forming a valid surrogate pair
//! resolve to one supplementary code point.
//!
//! Any backslash not matching a known grammar is passed through literally —
//! lenient decoding, not an error. Escapes that resolve to undefined code
//! points or unmatched surrogates follow the four-way policies on
//! [`JsonOptions`].

use crate::scan::{apply_policy, CodePoint, Disposition};
use crate::{JsonOptions, Result};

/// What one escape sequence decoded to.
enum Decoded {
    /// A scalar value; undefined-code-point policy may still apply.
    Scalar(u32),
    /// A surrogate-pair join; valid by construction.
    Pair(u32),
    /// The backslash matched no known grammar and passes through literally.
    Literal,
}

fn hex_value(s: &str, digits: usize) -> Option<u32> {
    if s.len() < digits || !s.as_bytes()[..digits].iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    u32::from_str_radix(&s[..digits], 16).ok()
}

/// Decodes the escape at the start of `s` (which begins with `\`), returning
/// what it resolved to and how many bytes it consumed.
fn decode_escape(s: &str) -> (Decoded, usize) {
    let rest = &s[1..];
    let Some(marker) = rest.chars().next() else {
        return (Decoded::Literal, 1);
    };
    match marker {
        'x' => match hex_value(&rest[1..], 2) {
            Some(v) => (Decoded::Scalar(v), 4),
            None => (Decoded::Literal, 1),
        },
        '0'..='7' => {
            let bytes = rest.as_bytes();
            let octal_at = |idx: usize| bytes.get(idx).filter(|b| (b'0'..=b'7').contains(*b));
            let len = if marker <= '3' && octal_at(1).is_some() && octal_at(2).is_some() {
                3
            } else if octal_at(1).is_some() {
                2
            } else {
                1
            };
            match u32::from_str_radix(&rest[..len], 8) {
                Ok(v) => (Decoded::Scalar(v), 1 + len),
                Err(_) => (Decoded::Literal, 1),
            }
        }
        'b' => (Decoded::Scalar(0x08), 2),
        't' => (Decoded::Scalar(0x09), 2),
        'n' => (Decoded::Scalar(0x0A), 2),
        'v' => (Decoded::Scalar(0x0B), 2),
        'f' => (Decoded::Scalar(0x0C), 2),
        'r' => (Decoded::Scalar(0x0D), 2),
        '\'' => (Decoded::Scalar(0x27), 2),
        '"' => (Decoded::Scalar(0x22), 2),
        '/' => (Decoded::Scalar(0x2F), 2),
        '\\' => (Decoded::Scalar(0x5C), 2),
        'u' => {
            if let Some(braced) = rest.strip_prefix("u{") {
                let Some(end) = braced.find('}') else {
                    return (Decoded::Literal, 1);
                };
                if end == 0 || !braced[..end].bytes().all(|b| b.is_ascii_hexdigit()) {
                    return (Decoded::Literal, 1);
                }
                match u32::from_str_radix(&braced[..end], 16) {
                    Ok(v) => (Decoded::Scalar(v), 2 + 1 + end + 1),
                    Err(_) => (Decoded::Literal, 1),
                }
            } else {
                let Some(v) = hex_value(&rest[1..], 4) else {
                    return (Decoded::Literal, 1);
                };
                if (0xD800..=0xDBFF).contains(&v) {
                    // A high surrogate joins a directly following low-surrogate
                    // code-unit escape into one supplementary code point.
                    let after = &s[6..];
                    if after.starts_with("\\u") {
                        if let Some(low) = hex_value(&after[2..], 4) {
                            if (0xDC00..=0xDFFF).contains(&low) {
                                let joined =
                                    0x1_0000 + ((v - 0xD800) << 10) + (low - 0xDC00);
                                return (Decoded::Pair(joined), 12);
                            }
                        }
                    }
                }
                (Decoded::Scalar(v), 6)
            }
        }
        _ => (Decoded::Literal, 1),
    }
}

/// Resolves every escape sequence in `text` to the characters it denotes.
///
/// # Errors
///
/// Fails only under the `Error` policies: an unmatched surrogate escape with
/// `unmatched_surrogate_policy = Error`, or an escape resolving to an
/// undefined code point with `undefined_code_point_policy = Error`. Both
/// errors carry the position (relative to `text`) of the offending escape.
///
/// # Examples
///
/// ```rust
/// use loose_json::unescape::unescape;
/// use loose_json::JsonOptions;
///
/// let options = JsonOptions::new();
/// assert_eq!(unescape("a\\tb", &options).unwrap(), "a\tb");
/// assert_eq!(unescape("\\x41\\102", &options).unwrap(), "AB");
/// assert_eq!(unescape("\\uD83D\\uDE00", &options).unwrap(), "\u{1F600}");
/// // Unknown grammar passes through literally
/// assert_eq!(unescape("\\q", &options).unwrap(), "\\q");
/// ```
pub fn unescape(text: &str, options: &JsonOptions) -> Result<String> {
    if !text.contains('\\') {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    let mut line = 1;
    let mut col = 1;
    while i < text.len() {
        let Some(ch) = text[i..].chars().next() else {
            break;
        };
        if ch != '\\' {
            out.push(ch);
            i += ch.len_utf8();
            if ch == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
            continue;
        }

        let (decoded, consumed) = decode_escape(&text[i..]);
        let original = &text[i..i + consumed];
        match decoded {
            Decoded::Literal => out.push('\\'),
            Decoded::Pair(v) => {
                if let Some(c) = char::from_u32(v) {
                    out.push(c);
                } else {
                    out.push('\u{FFFD}');
                }
            }
            Decoded::Scalar(v) => {
                match apply_policy(CodePoint::of(v), original, options, line, col)? {
                    Disposition::Keep(kept) => {
                        if let Some(c) = char::from_u32(kept) {
                            out.push(c);
                        } else {
                            out.push('\u{FFFD}');
                        }
                    }
                    Disposition::Verbatim(text) => out.push_str(&text),
                    Disposition::Skip => {}
                }
            }
        }
        i += consumed;
        col += consumed;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CodePointPolicy, Error};

    fn roundtrip_options() -> JsonOptions {
        JsonOptions::new()
    }

    #[test]
    fn test_named_escapes() {
        let options = roundtrip_options();
        assert_eq!(
            unescape("\\b\\t\\n\\f\\r\\\"\\/\\\\", &options).unwrap(),
            "\u{8}\t\n\u{c}\r\"/\\"
        );
    }

    #[test]
    fn test_js_only_escapes() {
        let options = roundtrip_options();
        assert_eq!(unescape("\\v", &options).unwrap(), "\u{b}");
        assert_eq!(unescape("\\'", &options).unwrap(), "'");
    }

    #[test]
    fn test_hex_and_octal() {
        let options = roundtrip_options();
        assert_eq!(unescape("\\x41\\102", &options).unwrap(), "AB");
        assert_eq!(unescape("\\0", &options).unwrap(), "\0");
        assert_eq!(unescape("\\47", &options).unwrap(), "'");
        // Three digits only when the first is 0-3
        assert_eq!(unescape("\\101", &options).unwrap(), "A");
        assert_eq!(unescape("\\417", &options).unwrap(), "!7");
    }

    #[test]
    fn test_unicode_code_unit() {
        let options = roundtrip_options();
        assert_eq!(unescape("\\u0041", &options).unwrap(), "A");
        assert_eq!(unescape("\\u00E9", &options).unwrap(), "\u{e9}");
    }

    #[test]
    fn test_unicode_code_point() {
        let options = roundtrip_options();
        assert_eq!(unescape("\\u{41}", &options).unwrap(), "A");
        assert_eq!(unescape("\\u{1F600}", &options).unwrap(), "\u{1F600}");
    }

    #[test]
    fn test_surrogate_pair_joins() {
        let options = roundtrip_options();
        let decoded = unescape("\\uD83D\\uDE00", &options).unwrap();
        let points: Vec<char> = decoded.chars().collect();
        assert_eq!(points, vec!['\u{1F600}']);
        assert!((0x10000..=0x10FFFF).contains(&(points[0] as u32)));
    }

    #[test]
    fn test_unknown_escape_passes_through() {
        let options = roundtrip_options();
        assert_eq!(unescape("\\q\\z", &options).unwrap(), "\\q\\z");
        assert_eq!(unescape("trailing\\", &options).unwrap(), "trailing\\");
        assert_eq!(unescape("\\xZZ", &options).unwrap(), "\\xZZ");
    }

    #[test]
    fn test_unmatched_surrogate_replace() {
        let options = roundtrip_options().with_unmatched_surrogate_policy(CodePointPolicy::Replace);
        assert_eq!(unescape("a\\uD800b", &options).unwrap(), "a\u{FFFD}b");
        assert_eq!(unescape("a\\uDC00b", &options).unwrap(), "a\u{FFFD}b");
    }

    #[test]
    fn test_unmatched_surrogate_pass_keeps_spelling() {
        let options = roundtrip_options().with_unmatched_surrogate_policy(CodePointPolicy::Pass);
        assert_eq!(unescape("a\\uD800b", &options).unwrap(), "a\\uD800b");
    }

    #[test]
    fn test_unmatched_surrogate_discard() {
        let options = roundtrip_options().with_unmatched_surrogate_policy(CodePointPolicy::Discard);
        assert_eq!(unescape("a\\uD800b", &options).unwrap(), "ab");
    }

    #[test]
    fn test_unmatched_surrogate_error() {
        let options = roundtrip_options().with_unmatched_surrogate_policy(CodePointPolicy::Error);
        assert!(matches!(
            unescape("a\\uD800b", &options),
            Err(Error::MalformedSurrogate { .. })
        ));
    }

    #[test]
    fn test_undefined_code_point_policies() {
        let replace =
            roundtrip_options().with_undefined_code_point_policy(CodePointPolicy::Replace);
        assert_eq!(unescape("\\u{FDD0}", &replace).unwrap(), "\u{FFFD}");

        let error = roundtrip_options().with_undefined_code_point_policy(CodePointPolicy::Error);
        assert!(matches!(
            unescape("\\u{110000}", &error),
            Err(Error::UndefinedCodePoint { .. })
        ));

        // Pass keeps the spelling of values no Rust string can hold
        let pass = roundtrip_options().with_undefined_code_point_policy(CodePointPolicy::Pass);
        assert_eq!(unescape("\\u{110000}", &pass).unwrap(), "\\u{110000}");
    }
}
