//! Code-point-aware scanning.
//!
//! This module provides [`CodePointScanner`], which walks a text buffer one
//! Unicode code point at a time and classifies each one, and the shared policy
//! machinery that decides what happens to code points that are undefined or
//! form unmatched surrogates.
//!
//! A Rust `&str` can never hold an unmatched surrogate, so the
//! [`CodePointClass::UnmatchedSurrogate`] classification only arises for code
//! points decoded out of escape sequences (see the unescaper); scanning raw
//! text classifies code points as `Valid` or `Undefined` only.
//!
//! The scanner also provides the fast pre-check used by the escape engine:
//! [`is_clean`] answers "does this string need any per-character handling at
//! all" in one forward pass, so clean strings pass through verbatim without
//! per-character branching.

use crate::{CodePointPolicy, Error, JsonOptions, Result};

/// Classification of a scanned code point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodePointClass {
    /// An assigned Unicode scalar value.
    Valid,
    /// A high surrogate with no matching low surrogate, or a lone low surrogate.
    UnmatchedSurrogate,
    /// A code point with no Unicode meaning: a noncharacter, or a numeric
    /// escape above U+10FFFF.
    Undefined,
}

/// One scanned code point: its scalar value, its UTF-16 encoding width in
/// code units, and its classification. Produced transiently; never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodePoint {
    pub value: u32,
    pub units: u8,
    pub class: CodePointClass,
}

impl CodePoint {
    /// Classifies a raw scalar value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use loose_json::scan::{CodePoint, CodePointClass};
    ///
    /// assert_eq!(CodePoint::of(0x41).class, CodePointClass::Valid);
    /// assert_eq!(CodePoint::of(0x1F600).units, 2);
    /// assert_eq!(CodePoint::of(0xD800).class, CodePointClass::UnmatchedSurrogate);
    /// assert_eq!(CodePoint::of(0xFFFE).class, CodePointClass::Undefined);
    /// ```
    #[must_use]
    pub fn of(value: u32) -> Self {
        let class = if (0xD800..=0xDFFF).contains(&value) {
            CodePointClass::UnmatchedSurrogate
        } else if value > 0x10FFFF || is_noncharacter(value) {
            CodePointClass::Undefined
        } else {
            CodePointClass::Valid
        };
        CodePoint {
            value,
            units: if value > 0xFFFF { 2 } else { 1 },
            class,
        }
    }

    /// Returns `true` if this code point encodes as a surrogate pair.
    #[inline]
    #[must_use]
    pub const fn is_supplementary(&self) -> bool {
        self.units == 2
    }
}

/// Returns `true` for Unicode noncharacters: U+FDD0..=U+FDEF and the last
/// two code points of every plane.
#[inline]
#[must_use]
pub fn is_noncharacter(value: u32) -> bool {
    (0xFDD0..=0xFDEF).contains(&value) || (value <= 0x10FFFF && (value & 0xFFFE) == 0xFFFE)
}

/// What the policy machinery decided to do with a code point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Disposition {
    /// Emit this scalar value.
    Keep(u32),
    /// Emit nothing for this position.
    Skip,
    /// Emit this text verbatim (the `Pass` analog for values a Rust string
    /// cannot hold).
    Verbatim(String),
}

/// Applies the four-way code-point policy to a classified code point.
///
/// `Valid` code points always keep their value. For the other classes the
/// applicable policy field of `options` decides: Pass keeps the value (or,
/// for unrepresentable values, the caller-supplied original text), Replace
/// substitutes U+FFFD, Discard skips, Error fails with positional context.
pub(crate) fn apply_policy(
    cp: CodePoint,
    original: &str,
    options: &JsonOptions,
    line: usize,
    col: usize,
) -> Result<Disposition> {
    match cp.class {
        CodePointClass::Valid => Ok(Disposition::Keep(cp.value)),
        CodePointClass::UnmatchedSurrogate => match options.unmatched_surrogate_policy {
            CodePointPolicy::Pass => Ok(Disposition::Verbatim(original.to_string())),
            CodePointPolicy::Replace => Ok(Disposition::Keep(0xFFFD)),
            CodePointPolicy::Discard => Ok(Disposition::Skip),
            CodePointPolicy::Error => Err(Error::malformed_surrogate(line, col, original)),
        },
        CodePointClass::Undefined => match options.undefined_code_point_policy {
            CodePointPolicy::Pass => {
                if cp.value > 0x10FFFF {
                    // Not a scalar value; Pass degrades to keeping the spelling.
                    Ok(Disposition::Verbatim(original.to_string()))
                } else {
                    Ok(Disposition::Keep(cp.value))
                }
            }
            CodePointPolicy::Replace => Ok(Disposition::Keep(0xFFFD)),
            CodePointPolicy::Discard => Ok(Disposition::Skip),
            CodePointPolicy::Error => Err(Error::undefined_code_point(line, col, cp.value)),
        },
    }
}

/// Iterates a string one code point at a time, yielding each code point with
/// its byte offset and resolving the undefined-code-point policy as it goes.
///
/// One scanner instance per string; the sequence is lazy and finite.
///
/// # Examples
///
/// ```rust
/// use loose_json::scan::CodePointScanner;
/// use loose_json::JsonOptions;
///
/// let options = JsonOptions::new();
/// let mut scanner = CodePointScanner::new("a\u{1F600}", &options);
///
/// let (offset, cp) = scanner.next().unwrap().unwrap();
/// assert_eq!((offset, cp.value, cp.units), (0, 0x41, 1));
///
/// let (offset, cp) = scanner.next().unwrap().unwrap();
/// assert_eq!((offset, cp.value, cp.units), (1, 0x1F600, 2));
///
/// assert!(scanner.next().is_none());
/// ```
pub struct CodePointScanner<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    options: &'a JsonOptions,
}

impl<'a> CodePointScanner<'a> {
    /// Creates a scanner over `input` governed by `options`.
    #[must_use]
    pub fn new(input: &'a str, options: &'a JsonOptions) -> Self {
        CodePointScanner {
            input,
            position: 0,
            line: 1,
            column: 1,
            options,
        }
    }

    fn advance(&mut self, ch: char) {
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl<'a> Iterator for CodePointScanner<'a> {
    type Item = Result<(usize, CodePoint)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let ch = self.input[self.position..].chars().next()?;
            let offset = self.position;
            let (line, col) = (self.line, self.column);
            self.advance(ch);

            let cp = CodePoint::of(ch as u32);
            let mut buf = [0u8; 4];
            let original = ch.encode_utf8(&mut buf);
            match apply_policy(cp, original, self.options, line, col) {
                Ok(Disposition::Keep(v)) => return Some(Ok((offset, CodePoint::of(v)))),
                Ok(Disposition::Verbatim(_)) => return Some(Ok((offset, cp))),
                Ok(Disposition::Skip) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// One-pass pre-check: `true` if no code point in `s` needs per-character
/// handling when written as string content under `options`, so the whole
/// string can be copied through verbatim.
#[must_use]
pub fn is_clean(s: &str, options: &JsonOptions) -> bool {
    for ch in s.chars() {
        let v = ch as u32;
        if v < 0x20 || ch == '"' || ch == '\\' || ch == '/' {
            return false;
        }
        if options.eval_safe && (v == 0x2028 || v == 0x2029) {
            return false;
        }
        if options.escape_non_ascii && v > 0x7F {
            return false;
        }
        if v > 0xFFFF {
            return false;
        }
        if is_noncharacter(v) && options.undefined_code_point_policy != CodePointPolicy::Pass {
            return false;
        }
    }
    true
}
