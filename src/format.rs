//! Wire Format
//!
//! This module documents the text format the codec reads and writes.
//!
//! # Overview
//!
//! The encoder always produces strict JSON (RFC 8259), with one optional,
//! explicitly-requested extension. The decoder accepts strict JSON plus a set
//! of JavaScript-only syntax forms, so text copied out of JavaScript source
//! or produced by JavaScript tooling decodes without preprocessing.
//!
//! # Encoding (always strict JSON)
//!
//! ```text
//! {"name":"Alice","tags":["admin","user"],"joined":"2016-01-02T03:04:05Z"}
//! ```
//!
//! - Property names are double-quoted (configurable: names that are legal
//!   identifiers can be written bare with `quote_identifiers` disabled)
//! - `"`, `/`, `\` and all control characters below U+0020 are escaped;
//!   `\b \t \n \f \r` use their single-letter forms
//! - U+2028 and U+2029 are escaped by default so output can be passed to
//!   JavaScript `eval` (the `eval_safe` option)
//! - Supplementary-plane characters are escaped: two `\uXXXX` code-unit
//!   escapes under ECMAScript edition 5, one `\u{...}` code-point escape
//!   under edition 6
//! - Hex is always uppercase and `\uXXXX` forms are zero-padded
//! - Dates render as ISO-8601 strings; with `encode_dates_as_objects` they
//!   render as `new Date("...")` constructor expressions instead, and the
//!   output is no longer strict JSON
//! - Numbers with no strict-JSON rendering (`Infinity`, `-Infinity`, `NaN`)
//!   are re-quoted as strings
//!
//! # Decoding (loose)
//!
//! All of the following decode to the same tree:
//!
//! ```text
//! {"price": 31, "label": "a\tb"}
//! {'price': 0x1F, 'label': 'a\tb'}
//! {price: 0x1F, label: "a\tb"}
//! ```
//!
//! Accepted beyond strict JSON:
//!
//! | Form | Example |
//! |------|---------|
//! | Single-quoted strings | `'text'` |
//! | Unquoted identifier keys | `{key: 1}` (Unicode identifiers, `_`, `$`, inline `\uXXXX` escapes) |
//! | Hex integers | `0x1F` |
//! | Octal-looking integers | `017` (interpreted base 8) |
//! | Signed specials | `Infinity`, `-Infinity`, `NaN` |
//! | Date constructor calls | `new Date("2016-01-02T03:04:05Z")` |
//! | Trailing commas | `[1, 2,]` |
//!
//! # Escape sequences (recognized on decode)
//!
//! In priority order:
//!
//! ```text
//! \xHH           - hex escape, two digits
//! \[0-3]?[0-7]{1,2} - octal escape, up to \377
//! \b \t \n \v \f \r \' \" \/ \\ - named escapes (\v and \' are JS-only
//!                  and never produced on encode)
//! \uHHHH         - Unicode code-unit escape; an adjacent pair forming a
//!                  valid surrogate pair resolves to one code point
//! \u{H+}         - Unicode code-point escape
//! ```
//!
//! A backslash matching none of these passes through literally.
//!
//! # Numbers
//!
//! Decoding accepts the JavaScript literal grammar: optional sign,
//! `digits[.digits]` or `.digits`, optional exponent, hex (`0x`) and
//! octal-looking integers, and the specials. Integers that do not fit a
//! 64-bit signed value decode losslessly to a big integer and re-encode as a
//! bare digit string.
//!
//! Encoding emits only the strict JSON grammar. Whole floats keep one
//! fraction digit (`42.0`) so they decode back as floats.
//!
//! # Dates
//!
//! Date literals try each registered custom format in order, then the
//! ISO-8601-extended defaults: `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS`, optional
//! fractional seconds, optional offset or bare `Z`. Formats without timezone
//! information are read as UTC. With `decode_date_strings` enabled, plain
//! string values are offered to the same parser.
//!
//! # Property names
//!
//! On encode, names are validated (unless disabled) against the identifier
//! grammar selected by `full_json_identifiers`/`ecma_edition` and the
//! ECMAScript reserved-word set. Reserved words and names containing
//! surrogate pairs are always quoted. Two properties of one object whose
//! rendered names collide after escaping are an error.

// This module contains only documentation; no implementation code
