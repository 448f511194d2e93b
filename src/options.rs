//! Configuration options for loose-JSON encoding and decoding.
//!
//! This module provides the types that make up the escape policy and the
//! codec configuration surface:
//!
//! - [`JsonOptions`]: main configuration struct, immutable per call
//! - [`EcmaEdition`]: which ECMAScript escape grammar applies (5th or 6th edition)
//! - [`CodePointPolicy`]: four-way handling of undefined code points and
//!   unmatched surrogates
//!
//! ## Examples
//!
//! ```rust
//! use loose_json::{to_string_with_options, EcmaEdition, JsonOptions};
//!
//! // Escape everything above ASCII using ECMAScript 6 code-point escapes
//! let options = JsonOptions::new()
//!     .with_escape_non_ascii(true)
//!     .with_ecma_edition(EcmaEdition::Six);
//! let json = to_string_with_options(&"caf\u{e9}", options).unwrap();
//! assert_eq!(json, "\"caf\\u00E9\"");
//! ```

/// Which ECMAScript edition's escape grammar is in effect.
///
/// Edition 6 adds the `\u{...}` code-point escape and Unicode-aware
/// identifier rules; edition 5 renders supplementary code points as two
/// `\uXXXX` code-unit escapes.
///
/// # Examples
///
/// ```rust
/// use loose_json::EcmaEdition;
///
/// assert_eq!(EcmaEdition::default(), EcmaEdition::Five);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EcmaEdition {
    #[default]
    Five,
    Six,
}

/// How the scanner and unescaper handle code points that are undefined or
/// form unmatched surrogates.
///
/// - **Pass**: hand the code point through unchanged for downstream
///   decision-making (for an unmatched surrogate this preserves the
///   original escape text, since a Rust string cannot hold a lone
///   surrogate)
/// - **Replace**: substitute U+FFFD REPLACEMENT CHARACTER and continue
/// - **Discard**: emit nothing for that position
/// - **Error**: fail immediately with a scan error carrying positional context
///
/// # Examples
///
/// ```rust
/// use loose_json::CodePointPolicy;
///
/// assert!(!CodePointPolicy::Replace.is_error());
/// assert!(CodePointPolicy::Error.is_error());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodePointPolicy {
    Pass,
    Replace,
    Discard,
    Error,
}

impl CodePointPolicy {
    /// Returns `true` if this policy aborts the call instead of handling
    /// the code point locally.
    #[inline]
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, CodePointPolicy::Error)
    }
}

/// Configuration for one encode or decode call.
///
/// An options value is immutable for the duration of a call and may be
/// reused read-only across calls and threads.
///
/// # Examples
///
/// ```rust
/// use loose_json::{CodePointPolicy, EcmaEdition, JsonOptions};
///
/// // Strict-JSON defaults
/// let options = JsonOptions::new();
///
/// // Loose decoding with date strings recognized
/// let options = JsonOptions::new().with_decode_date_strings(true);
///
/// // Paranoid ASCII-only eval-safe output
/// let options = JsonOptions::new()
///     .with_escape_non_ascii(true)
///     .with_undefined_code_point_policy(CodePointPolicy::Error)
///     .with_ecma_edition(EcmaEdition::Five);
/// ```
#[derive(Clone, Debug)]
pub struct JsonOptions {
    /// Escape every code point above 0x7F.
    pub escape_non_ascii: bool,
    /// Also escape supplementary code points in identifier/key context,
    /// where they could otherwise pass through raw. String content always
    /// escapes supplementary code points.
    pub escape_surrogates: bool,
    /// Escape grammar edition (5 or 6).
    pub ecma_edition: EcmaEdition,
    /// Escape U+2028 LINE SEPARATOR and U+2029 PARAGRAPH SEPARATOR, which
    /// break direct `eval` of the generated text as JavaScript source.
    pub eval_safe: bool,
    /// Accept the full JSON identifier code-point set for unquoted property
    /// names instead of the stricter ECMAScript identifier grammar.
    pub full_json_identifiers: bool,
    /// Validate property names against identifier syntax and the reserved
    /// word set, and reject duplicates.
    pub validate_property_names: bool,
    /// Always quote property names (strict JSON). When disabled, names
    /// that are legal identifiers are written bare.
    pub quote_identifiers: bool,
    /// Permit reserved words as unquoted identifiers.
    pub allow_reserved_words: bool,
    /// Check the traversal stack for reference cycles before descending
    /// into a composite. Disabling this is unsafe: a cyclic graph then
    /// recurses without bound.
    pub detect_loops: bool,
    /// Render dates as `new Date("...")` constructor expressions instead
    /// of ISO-8601 strings. Non-standard; the output is no longer strict JSON.
    pub encode_dates_as_objects: bool,
    /// Date formats (chrono syntax) tried in registration order before the
    /// ISO-8601 defaults when decoding date literals.
    pub custom_date_formats: Vec<String>,
    /// Offer plain string values to the date parser and decode matches as
    /// `Value::Date`.
    pub decode_date_strings: bool,
    /// Handling of a high surrogate escape with no matching low surrogate.
    pub unmatched_surrogate_policy: CodePointPolicy,
    /// Handling of code points with no assigned Unicode meaning.
    pub undefined_code_point_policy: CodePointPolicy,
    /// Write string values that parse as strict JSON numbers without quotes.
    pub encode_numeric_strings_as_numbers: bool,
    /// Unescape property-name text before re-escaping it fresh, instead of
    /// passing pre-existing legal escape sequences through unchanged.
    pub unescape_before_reescaping: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        JsonOptions {
            escape_non_ascii: false,
            escape_surrogates: false,
            ecma_edition: EcmaEdition::default(),
            eval_safe: true,
            full_json_identifiers: false,
            validate_property_names: true,
            quote_identifiers: true,
            allow_reserved_words: false,
            detect_loops: true,
            encode_dates_as_objects: false,
            custom_date_formats: Vec::new(),
            decode_date_strings: false,
            unmatched_surrogate_policy: CodePointPolicy::Replace,
            undefined_code_point_policy: CodePointPolicy::Pass,
            encode_numeric_strings_as_numbers: false,
            unescape_before_reescaping: false,
        }
    }
}

impl JsonOptions {
    /// Creates the default options: strict JSON output, loose decoding,
    /// loop detection on, `Replace` for unmatched surrogates, `Pass` for
    /// undefined code points.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use loose_json::JsonOptions;
    ///
    /// let options = JsonOptions::new();
    /// assert!(options.quote_identifiers);
    /// assert!(options.detect_loops);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether every code point above 0x7F is escaped.
    #[must_use]
    pub fn with_escape_non_ascii(mut self, escape_non_ascii: bool) -> Self {
        self.escape_non_ascii = escape_non_ascii;
        self
    }

    /// Sets whether supplementary code points are escaped in identifier
    /// and key context.
    #[must_use]
    pub fn with_escape_surrogates(mut self, escape_surrogates: bool) -> Self {
        self.escape_surrogates = escape_surrogates;
        self
    }

    /// Sets the ECMAScript edition for escape rendering.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use loose_json::{EcmaEdition, JsonOptions};
    ///
    /// let options = JsonOptions::new().with_ecma_edition(EcmaEdition::Six);
    /// assert_eq!(options.ecma_edition, EcmaEdition::Six);
    /// ```
    #[must_use]
    pub fn with_ecma_edition(mut self, edition: EcmaEdition) -> Self {
        self.ecma_edition = edition;
        self
    }

    /// Sets whether U+2028/U+2029 are escaped for eval safety.
    #[must_use]
    pub fn with_eval_safe(mut self, eval_safe: bool) -> Self {
        self.eval_safe = eval_safe;
        self
    }

    /// Sets whether the full JSON identifier code-point set is accepted
    /// for unquoted property names.
    #[must_use]
    pub fn with_full_json_identifiers(mut self, full: bool) -> Self {
        self.full_json_identifiers = full;
        self
    }

    /// Sets whether property names are validated and deduplicated.
    #[must_use]
    pub fn with_validate_property_names(mut self, validate: bool) -> Self {
        self.validate_property_names = validate;
        self
    }

    /// Sets whether property names are always quoted.
    #[must_use]
    pub fn with_quote_identifiers(mut self, quote: bool) -> Self {
        self.quote_identifiers = quote;
        self
    }

    /// Sets whether reserved words are permitted as unquoted identifiers.
    #[must_use]
    pub fn with_allow_reserved_words(mut self, allow: bool) -> Self {
        self.allow_reserved_words = allow;
        self
    }

    /// Sets whether reference cycles are detected during writing.
    #[must_use]
    pub fn with_detect_loops(mut self, detect: bool) -> Self {
        self.detect_loops = detect;
        self
    }

    /// Sets whether dates render as `new Date("...")` expressions.
    #[must_use]
    pub fn with_encode_dates_as_objects(mut self, as_objects: bool) -> Self {
        self.encode_dates_as_objects = as_objects;
        self
    }

    /// Registers a custom date format (chrono syntax), tried before the
    /// ISO-8601 defaults in registration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use loose_json::JsonOptions;
    ///
    /// let options = JsonOptions::new()
    ///     .with_custom_date_format("%d/%m/%Y %H:%M")
    ///     .with_custom_date_format("%d/%m/%Y");
    /// assert_eq!(options.custom_date_formats.len(), 2);
    /// ```
    #[must_use]
    pub fn with_custom_date_format(mut self, format: &str) -> Self {
        self.custom_date_formats.push(format.to_string());
        self
    }

    /// Sets whether plain string values are offered to the date parser.
    #[must_use]
    pub fn with_decode_date_strings(mut self, decode: bool) -> Self {
        self.decode_date_strings = decode;
        self
    }

    /// Sets the unmatched-surrogate policy.
    #[must_use]
    pub fn with_unmatched_surrogate_policy(mut self, policy: CodePointPolicy) -> Self {
        self.unmatched_surrogate_policy = policy;
        self
    }

    /// Sets the undefined-code-point policy.
    #[must_use]
    pub fn with_undefined_code_point_policy(mut self, policy: CodePointPolicy) -> Self {
        self.undefined_code_point_policy = policy;
        self
    }

    /// Sets whether numeric-looking strings are written as bare numbers.
    #[must_use]
    pub fn with_encode_numeric_strings_as_numbers(mut self, encode: bool) -> Self {
        self.encode_numeric_strings_as_numbers = encode;
        self
    }

    /// Sets whether property-name text is unescaped before re-escaping,
    /// instead of passing legal pre-existing escapes through unchanged.
    #[must_use]
    pub fn with_unescape_before_reescaping(mut self, unescape: bool) -> Self {
        self.unescape_before_reescaping = unescape;
        self
    }
}
