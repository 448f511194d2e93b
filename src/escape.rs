//! The escape engine.
//!
//! Given a code point and the active options, this module decides whether and
//! how to escape it, renders escapes in the grammar of the selected ECMAScript
//! edition, and recognizes pre-existing legal escape sequences in raw text so
//! they can be copied through unchanged instead of being escaped twice.
//!
//! ## Decision table
//!
//! First match wins:
//!
//! 1. `"`, `/`, `\` and C0 controls always escape; controls with single-letter
//!    forms (`\b \t \n \f \r`) use them
//! 2. U+2028/U+2029 escape under `eval_safe` (they break JavaScript `eval`)
//! 3. everything above 0x7F escapes under `escape_non_ascii`
//! 4. supplementary code points escape in string content; `escape_surrogates`
//!    extends that to identifier context
//! 5. undefined code points follow the four-way policy
//! 6. otherwise the code point passes through
//!
//! ## Rendering
//!
//! Edition 6 renders code points below 0x10 or above 0xFFFF as a single
//! `\u{HEX}` code-point escape; everything else renders as one `\uXXXX`
//! code-unit escape, or two for a surrogate pair. Hex is uppercase and
//! zero-padded.
//!
//! ## Batching
//!
//! [`escape_str`] pre-scans with [`crate::scan::is_clean`] and returns the
//! input borrowed when nothing needs attention; otherwise it copies runs of
//! unescaped characters in one push per run rather than one push per character.

use crate::scan::{is_noncharacter, CodePoint, CodePointClass};
use crate::{CodePointPolicy, EcmaEdition, Error, JsonOptions, Result};
use std::borrow::Cow;
use unicode_ident::{is_xid_continue, is_xid_start};

/// Canonical single-letter escapes for the C0 controls that have one.
const CONTROL_ESCAPES: [Option<&str>; 0x20] = {
    let mut table: [Option<&str>; 0x20] = [None; 0x20];
    table[0x08] = Some("\\b");
    table[0x09] = Some("\\t");
    table[0x0A] = Some("\\n");
    table[0x0C] = Some("\\f");
    table[0x0D] = Some("\\r");
    table
};

/// ECMAScript reserved words, sorted for binary search. Includes the keyword
/// set, both future-reserved groups, and the value literals.
const RESERVED_WORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Where escaped text is headed; identifier context permits only Unicode
/// escapes, string context permits the full JSON escape set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeContext {
    StringContent,
    Identifier,
}

/// Returns `true` if `name` is an ECMAScript reserved word.
///
/// # Examples
///
/// ```rust
/// use loose_json::escape::is_reserved_word;
///
/// assert!(is_reserved_word("while"));
/// assert!(is_reserved_word("null"));
/// assert!(!is_reserved_word("value"));
/// ```
#[must_use]
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.binary_search(&name).is_ok()
}

pub(crate) fn is_ident_start(c: char, options: &JsonOptions) -> bool {
    if c == '_' || c == '$' {
        return true;
    }
    if options.full_json_identifiers || options.ecma_edition == EcmaEdition::Six {
        is_xid_start(c)
    } else {
        c.is_ascii_alphabetic()
    }
}

pub(crate) fn is_ident_continue(c: char, options: &JsonOptions) -> bool {
    if c == '_' || c == '$' {
        return true;
    }
    if options.full_json_identifiers || options.ecma_edition == EcmaEdition::Six {
        is_xid_continue(c)
    } else {
        c.is_ascii_alphanumeric()
    }
}

/// Parses a Unicode escape at the start of `s` (which must begin with `\`).
///
/// Returns the decoded scalar value and the byte length consumed, or `None`
/// if `s` does not start with a well-formed `\uXXXX` or (edition 6 only)
/// `\u{H+}` escape.
#[must_use]
pub fn parse_unicode_escape(s: &str, edition: EcmaEdition) -> Option<(u32, usize)> {
    let rest = s.strip_prefix("\\u")?;
    if let Some(braced) = rest.strip_prefix('{') {
        if edition != EcmaEdition::Six {
            return None;
        }
        let end = braced.find('}')?;
        if end == 0 || !braced[..end].bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(&braced[..end], 16).ok()?;
        Some((value, 2 + 1 + end + 1))
    } else {
        if rest.len() < 4 || !rest.as_bytes()[..4].iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        let value = u32::from_str_radix(&rest[..4], 16).ok()?;
        Some((value, 6))
    }
}

/// Matches the longest legal escape sequence for the active standard at the
/// start of `s` (which must begin with `\`), returning its byte length.
///
/// String context accepts the eight single-letter escapes plus the Unicode
/// forms; identifier context accepts Unicode escapes only.
#[must_use]
pub fn match_escape(s: &str, edition: EcmaEdition, context: EscapeContext) -> Option<usize> {
    if let Some((_, len)) = parse_unicode_escape(s, edition) {
        return Some(len);
    }
    if context == EscapeContext::Identifier {
        return None;
    }
    let marker = s.strip_prefix('\\')?.chars().next()?;
    match marker {
        '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' => Some(1 + marker.len_utf8()),
        _ => None,
    }
}

/// Renders a Unicode escape for `cp` in the grammar of `edition`.
///
/// # Examples
///
/// ```rust
/// use loose_json::escape::render_unicode_escape;
/// use loose_json::EcmaEdition;
///
/// assert_eq!(render_unicode_escape(0x1F600, EcmaEdition::Five), "\\uD83D\\uDE00");
/// assert_eq!(render_unicode_escape(0x1F600, EcmaEdition::Six), "\\u{1F600}");
/// assert_eq!(render_unicode_escape(0x0009, EcmaEdition::Five), "\\u0009");
/// assert_eq!(render_unicode_escape(0x0009, EcmaEdition::Six), "\\u{9}");
/// assert_eq!(render_unicode_escape(0x00E9, EcmaEdition::Six), "\\u00E9");
/// ```
#[must_use]
pub fn render_unicode_escape(cp: u32, edition: EcmaEdition) -> String {
    if cp > 0xFFFF {
        if edition == EcmaEdition::Six || cp > 0x10FFFF {
            format!("\\u{{{:X}}}", cp)
        } else {
            let v = cp - 0x1_0000;
            let high = 0xD800 + (v >> 10);
            let low = 0xDC00 + (v & 0x3FF);
            format!("\\u{:04X}\\u{:04X}", high, low)
        }
    } else if edition == EcmaEdition::Six && cp < 0x10 {
        format!("\\u{{{:X}}}", cp)
    } else {
        format!("\\u{:04X}", cp)
    }
}

/// Decides whether `cp` must be escaped under `options` in `context`,
/// returning the escape text, or `None` for pass-through.
///
/// Undefined-code-point policy is applied by the callers before this
/// decision; `cp` here is a value the caller intends to emit.
#[must_use]
pub fn escape_code_point(cp: u32, options: &JsonOptions, context: EscapeContext) -> Option<String> {
    match context {
        EscapeContext::StringContent => {
            match cp {
                0x22 => return Some("\\\"".to_string()),
                0x2F => return Some("\\/".to_string()),
                0x5C => return Some("\\\\".to_string()),
                c if c < 0x20 => {
                    return Some(match CONTROL_ESCAPES[c as usize] {
                        Some(letter) => letter.to_string(),
                        None => render_unicode_escape(c, options.ecma_edition),
                    });
                }
                _ => {}
            }
            if options.eval_safe && (cp == 0x2028 || cp == 0x2029) {
                return Some(render_unicode_escape(cp, options.ecma_edition));
            }
            if options.escape_non_ascii && cp > 0x7F {
                return Some(render_unicode_escape(cp, options.ecma_edition));
            }
            if cp > 0xFFFF {
                return Some(render_unicode_escape(cp, options.ecma_edition));
            }
            None
        }
        EscapeContext::Identifier => {
            if options.escape_non_ascii && cp > 0x7F {
                return Some(render_unicode_escape(cp, options.ecma_edition));
            }
            if options.escape_surrogates && cp > 0xFFFF {
                return Some(render_unicode_escape(cp, options.ecma_edition));
            }
            None
        }
    }
}

/// Escapes `s` as JSON string content.
///
/// Clean strings come back borrowed; otherwise runs of unescaped characters
/// are batch-copied around the escapes. Pre-existing backslashes are escaped
/// like any other character, so unescaping the result always restores `s`.
///
/// # Errors
///
/// Fails when an undefined code point is met under the `Error` policy.
///
/// # Examples
///
/// ```rust
/// use loose_json::escape::escape_str;
/// use loose_json::JsonOptions;
///
/// let options = JsonOptions::new();
/// assert_eq!(escape_str("x\ty", &options).unwrap(), "x\\ty");
/// assert_eq!(escape_str("plain", &options).unwrap(), "plain");
/// ```
pub fn escape_str<'a>(s: &'a str, options: &JsonOptions) -> Result<Cow<'a, str>> {
    escape_str_impl(s, options, false)
}

/// Escapes `s` as JSON string content, copying pre-existing legal escape
/// sequences through unchanged instead of re-escaping their backslashes.
///
/// The legality check uses the escape grammar of the active edition and runs
/// before any fresh escape is computed, so already-escaped text is never
/// escaped twice.
///
/// # Errors
///
/// Fails when an undefined code point is met under the `Error` policy.
pub fn escape_str_preserving<'a>(s: &'a str, options: &JsonOptions) -> Result<Cow<'a, str>> {
    escape_str_impl(s, options, true)
}

fn escape_str_impl<'a>(s: &'a str, options: &JsonOptions, preserve: bool) -> Result<Cow<'a, str>> {
    if crate::scan::is_clean(s, options) {
        return Ok(Cow::Borrowed(s));
    }

    let mut out = String::with_capacity(s.len() + 8);
    let mut run_start = 0;
    let mut i = 0;
    while i < s.len() {
        let Some(ch) = s[i..].chars().next() else {
            break;
        };
        let v = ch as u32;

        if preserve && ch == '\\' {
            if let Some(len) = match_escape(&s[i..], options.ecma_edition, EscapeContext::StringContent)
            {
                // Legal pre-existing escape stays in the current run verbatim.
                i += len;
                continue;
            }
        }

        if CodePoint::of(v).class == CodePointClass::Undefined {
            match options.undefined_code_point_policy {
                CodePointPolicy::Pass => {}
                CodePointPolicy::Replace => {
                    out.push_str(&s[run_start..i]);
                    out.push_str(&render_unicode_escape(0xFFFD, options.ecma_edition));
                    i += ch.len_utf8();
                    run_start = i;
                    continue;
                }
                CodePointPolicy::Discard => {
                    out.push_str(&s[run_start..i]);
                    i += ch.len_utf8();
                    run_start = i;
                    continue;
                }
                CodePointPolicy::Error => {
                    return Err(Error::undefined_code_point(1, i + 1, v));
                }
            }
        }

        if let Some(esc) = escape_code_point(v, options, EscapeContext::StringContent) {
            out.push_str(&s[run_start..i]);
            out.push_str(&esc);
            i += ch.len_utf8();
            run_start = i;
        } else {
            i += ch.len_utf8();
        }
    }
    out.push_str(&s[run_start..]);
    Ok(Cow::Owned(out))
}

/// Returns `true` if `name` is a legal identifier under `options`, counting
/// embedded legal Unicode escapes as the characters they denote.
#[must_use]
pub fn is_identifier(name: &str, options: &JsonOptions) -> bool {
    if name.is_empty() {
        return false;
    }
    let mut i = 0;
    let mut first = true;
    while i < name.len() {
        let Some(ch) = name[i..].chars().next() else {
            return false;
        };
        let (resolved, len) = if ch == '\\' {
            match parse_unicode_escape(&name[i..], options.ecma_edition) {
                Some((cp, len)) => match char::from_u32(cp) {
                    Some(c) => (c, len),
                    None => return false,
                },
                None => return false,
            }
        } else {
            (ch, ch.len_utf8())
        };
        let ok = if first {
            is_ident_start(resolved, options)
        } else {
            is_ident_continue(resolved, options)
        };
        if !ok {
            return false;
        }
        first = false;
        i += len;
    }
    true
}

/// Escapes a valid identifier per the policy, passing embedded legal Unicode
/// escapes through unchanged. Returns the rendered text and whether it
/// contains any escape sequences.
///
/// Only Unicode escapes are legal in identifier context, so every escape this
/// function produces or preserves is a `\uXXXX` or `\u{...}` form.
pub fn escape_identifier(name: &str, options: &JsonOptions) -> Result<(String, bool)> {
    let mut out = String::with_capacity(name.len());
    let mut has_escapes = false;
    let mut i = 0;
    while i < name.len() {
        let Some(ch) = name[i..].chars().next() else {
            break;
        };
        if ch == '\\' {
            if let Some(len) = match_escape(&name[i..], options.ecma_edition, EscapeContext::Identifier)
            {
                out.push_str(&name[i..i + len]);
                has_escapes = true;
                i += len;
                continue;
            }
            return Err(Error::bad_property_name(name));
        }
        let v = ch as u32;
        if is_noncharacter(v) && options.undefined_code_point_policy.is_error() {
            return Err(Error::undefined_code_point(1, i + 1, v));
        }
        match escape_code_point(v, options, EscapeContext::Identifier) {
            Some(esc) => {
                out.push_str(&esc);
                has_escapes = true;
            }
            None => out.push(ch),
        }
        i += ch.len_utf8();
    }
    Ok((out, has_escapes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_escapes() {
        let options = JsonOptions::new();
        assert_eq!(
            escape_code_point(0x08, &options, EscapeContext::StringContent),
            Some("\\b".to_string())
        );
        assert_eq!(
            escape_code_point(0x0B, &options, EscapeContext::StringContent),
            Some("\\u000B".to_string())
        );
        assert_eq!(
            escape_code_point(0x1F, &options, EscapeContext::StringContent),
            Some("\\u001F".to_string())
        );
    }

    #[test]
    fn test_required_characters_always_escape() {
        let options = JsonOptions::new();
        for (cp, expected) in [(0x22, "\\\""), (0x2F, "\\/"), (0x5C, "\\\\")] {
            assert_eq!(
                escape_code_point(cp, &options, EscapeContext::StringContent),
                Some(expected.to_string())
            );
        }
    }

    #[test]
    fn test_eval_safety_separators() {
        let options = JsonOptions::new();
        assert_eq!(
            escape_code_point(0x2028, &options, EscapeContext::StringContent),
            Some("\\u2028".to_string())
        );
        let relaxed = JsonOptions::new().with_eval_safe(false);
        assert_eq!(
            escape_code_point(0x2028, &relaxed, EscapeContext::StringContent),
            None
        );
    }

    #[test]
    fn test_supplementary_rendering_by_edition() {
        let five = JsonOptions::new();
        assert_eq!(
            escape_code_point(0x1F600, &five, EscapeContext::StringContent),
            Some("\\uD83D\\uDE00".to_string())
        );
        let six = JsonOptions::new().with_ecma_edition(EcmaEdition::Six);
        assert_eq!(
            escape_code_point(0x1F600, &six, EscapeContext::StringContent),
            Some("\\u{1F600}".to_string())
        );
    }

    #[test]
    fn test_escape_str_borrows_clean_input() {
        let options = JsonOptions::new();
        let escaped = escape_str("nothing to do here", &options).unwrap();
        assert!(matches!(escaped, Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_str_batches_runs() {
        let options = JsonOptions::new();
        assert_eq!(
            escape_str("a\"b\\c\nd", &options).unwrap(),
            "a\\\"b\\\\c\\nd"
        );
    }

    #[test]
    fn test_preserving_copies_legal_escapes() {
        let options = JsonOptions::new();
        assert_eq!(
            escape_str_preserving("already \\u0041 escaped", &options).unwrap(),
            "already \\u0041 escaped"
        );
        assert_eq!(
            escape_str_preserving("tab \\t here", &options).unwrap(),
            "tab \\t here"
        );
        // An illegal escape's backslash still gets escaped fresh.
        assert_eq!(
            escape_str_preserving("bad \\q here", &options).unwrap(),
            "bad \\\\q here"
        );
    }

    #[test]
    fn test_fresh_escaping_never_passes_through() {
        let options = JsonOptions::new();
        assert_eq!(escape_str("\\u0041", &options).unwrap(), "\\\\u0041");
    }

    #[test]
    fn test_match_escape_identifier_context() {
        assert_eq!(
            match_escape("\\u0041", EcmaEdition::Five, EscapeContext::Identifier),
            Some(6)
        );
        assert_eq!(
            match_escape("\\n", EcmaEdition::Five, EscapeContext::Identifier),
            None
        );
        assert_eq!(
            match_escape("\\u{1F600}", EcmaEdition::Five, EscapeContext::StringContent),
            None
        );
        assert_eq!(
            match_escape("\\u{1F600}", EcmaEdition::Six, EscapeContext::StringContent),
            Some(9)
        );
    }

    #[test]
    fn test_is_identifier() {
        let options = JsonOptions::new();
        assert!(is_identifier("userName", &options));
        assert!(is_identifier("_private", &options));
        assert!(is_identifier("$jq", &options));
        assert!(is_identifier("a1", &options));
        assert!(!is_identifier("1a", &options));
        assert!(!is_identifier("with space", &options));
        assert!(!is_identifier("", &options));
        assert!(is_identifier("\\u0041bc", &options));
        assert!(!is_identifier("\\u0020bc", &options));
    }

    #[test]
    fn test_unicode_identifiers_by_edition() {
        let five = JsonOptions::new();
        assert!(!is_identifier("caf\u{e9}", &five));
        let six = JsonOptions::new().with_ecma_edition(EcmaEdition::Six);
        assert!(is_identifier("caf\u{e9}", &six));
        let full = JsonOptions::new().with_full_json_identifiers(true);
        assert!(is_identifier("caf\u{e9}", &full));
    }

    #[test]
    fn test_reserved_words_sorted() {
        let mut sorted = RESERVED_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, RESERVED_WORDS);
    }

    #[test]
    fn test_escape_identifier_policies() {
        let options = JsonOptions::new().with_escape_non_ascii(true).with_ecma_edition(EcmaEdition::Six);
        let (text, escaped) = escape_identifier("caf\u{e9}", &options).unwrap();
        assert_eq!(text, "caf\\u00E9");
        assert!(escaped);

        let plain = JsonOptions::new().with_full_json_identifiers(true);
        let (text, escaped) = escape_identifier("caf\u{e9}", &plain).unwrap();
        assert_eq!(text, "caf\u{e9}");
        assert!(!escaped);
    }
}
