//! The cycle-safe graph-traversal writer.
//!
//! [`Writer`] walks a [`Value`] tree or an opaque object graph depth-first and
//! emits strict JSON to a streaming sink, driving the escape engine for all
//! string and identifier content. Before descending into any composite it
//! records the composite's reference identity on a traversal stack; meeting
//! the same identity again while it is still on the stack is a data-structure
//! loop and fails the call. The stack is call-local and fully unwound before
//! any error propagates, so a reused options value is never left dirty.
//!
//! Opaque objects are written through the injected [`PropertySource`]
//! capability: the writer asks for an ordered property list at the configured
//! [`Visibility`] and never inspects type metadata itself.

use crate::value::Number;
use crate::{dates, escape, unescape::unescape, Error, JsonOptions, Result, Value};
use std::borrow::Cow;
use std::collections::HashSet;
use std::io;
use std::sync::Arc;

/// Caller-supplied number formatter. The result must match the strict JSON
/// number grammar or the writer re-quotes it as a string.
pub type NumberFormatter = Arc<dyn Fn(&Number) -> String + Send + Sync>;

/// The minimum member visibility an external property enumerator exposes.
///
/// The codec only passes this through to the [`PropertySource`]; what each
/// level means is the enumerator's business.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Visibility {
    All,
    PackageOrAbove,
    ProtectedOrAbove,
    #[default]
    PublicOnly,
}

/// One enumerated property value: a plain [`Value`], a nested opaque object,
/// or an ordered sequence of either. `Source` and `List` are what make object
/// graphs — which can cycle — traversable through the same writer.
pub enum Property<'a> {
    Value(Value),
    Source(&'a dyn PropertySource),
    List(Vec<Property<'a>>),
}

/// The injected capability the writer uses for opaque objects.
///
/// Implementations return properties in the order they should be written.
///
/// # Examples
///
/// ```rust
/// use loose_json::{Property, PropertySource, Value, Visibility};
///
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl PropertySource for Point {
///     fn enumerate_properties(&self, _visibility: Visibility) -> Vec<(String, Property<'_>)> {
///         vec![
///             ("x".to_string(), Property::Value(Value::from(self.x))),
///             ("y".to_string(), Property::Value(Value::from(self.y))),
///         ]
///     }
/// }
/// ```
pub trait PropertySource {
    fn enumerate_properties(&self, visibility: Visibility) -> Vec<(String, Property<'_>)>;
}

/// Reference identities of the composites currently being visited.
///
/// Invariants: no identity appears twice simultaneously, exactly one
/// push/pop pair per composite, and the stack is empty before and after a
/// top-level call. A pop that does not match the frame just pushed is an
/// internal invariant violation, never a recoverable condition.
#[derive(Default)]
struct TraversalStack {
    frames: Vec<usize>,
}

impl TraversalStack {
    fn enter(&mut self, id: usize, what: &str, detect: bool) -> Result<()> {
        if detect && self.frames.contains(&id) {
            return Err(Error::data_structure_loop(what));
        }
        self.frames.push(id);
        Ok(())
    }

    fn leave(&mut self, id: usize) -> Result<()> {
        match self.frames.pop() {
            Some(top) if top == id => Ok(()),
            _ => Err(Error::InternalInvariant(
                "traversal stack pop does not match the frame just pushed".to_string(),
            )),
        }
    }

    fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn clear(&mut self) {
        self.frames.clear();
    }
}

/// Checks the strict JSON number grammar: optional minus, `0` or a non-zero
/// leading integer part, optional fraction, optional exponent. No leading
/// `+`, no octal-looking zeros, no `Infinity`/`NaN`.
///
/// # Examples
///
/// ```rust
/// use loose_json::writer::is_json_number;
///
/// assert!(is_json_number("-12.5e3"));
/// assert!(is_json_number("0"));
/// assert!(!is_json_number("+1"));
/// assert!(!is_json_number("017"));
/// assert!(!is_json_number("Infinity"));
/// ```
#[must_use]
pub fn is_json_number(s: &str) -> bool {
    let b = s.as_bytes();
    let mut i = 0;
    if i < b.len() && b[i] == b'-' {
        i += 1;
    }
    if i >= b.len() {
        return false;
    }
    if b[i] == b'0' {
        i += 1;
    } else if b[i].is_ascii_digit() {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
    } else {
        return false;
    }
    if i < b.len() && b[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return false;
        }
    }
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        i += 1;
        if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == b.len()
}

fn default_number_text(n: &Number) -> String {
    match n {
        Number::Integer(i) => i.to_string(),
        Number::Float(f) if f.is_finite() => {
            // Whole floats keep a fraction digit so they decode back as floats.
            if f.fract() == 0.0 {
                format!("{:.1}", f)
            } else {
                f.to_string()
            }
        }
        Number::Float(f) if f.is_nan() => "NaN".to_string(),
        Number::Float(f) if *f > 0.0 => "Infinity".to_string(),
        Number::Float(_) => "-Infinity".to_string(),
        Number::Infinity => "Infinity".to_string(),
        Number::NegativeInfinity => "-Infinity".to_string(),
        Number::NaN => "NaN".to_string(),
    }
}

/// The JSON writer.
///
/// Owns a streaming sink, the options for the call, an optional
/// caller-supplied number formatter, and the visibility level handed to
/// property sources.
///
/// # Examples
///
/// ```rust
/// use loose_json::{json, JsonOptions, Writer};
///
/// let mut out = Vec::new();
/// let mut writer = Writer::new(&mut out, JsonOptions::default());
/// writer.write(&json!({"a": [1, 2]})).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "{\"a\":[1,2]}");
/// ```
pub struct Writer<W: io::Write> {
    sink: W,
    options: JsonOptions,
    number_formatter: Option<NumberFormatter>,
    visibility: Visibility,
}

impl<W: io::Write> Writer<W> {
    #[must_use]
    pub fn new(sink: W, options: JsonOptions) -> Self {
        Writer {
            sink,
            options,
            number_formatter: None,
            visibility: Visibility::default(),
        }
    }

    /// Sets a caller-supplied number formatter.
    #[must_use]
    pub fn with_number_formatter(mut self, formatter: NumberFormatter) -> Self {
        self.number_formatter = Some(formatter);
        self
    }

    /// Sets the visibility level passed to property sources.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Consumes the writer and returns the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Writes one value tree.
    ///
    /// # Errors
    ///
    /// Fails on sink I/O errors, policy violations from the escape engine,
    /// property-name problems, and detected data-structure loops. The
    /// traversal stack is fully unwound before any error propagates.
    pub fn write(&mut self, value: &Value) -> Result<()> {
        let mut stack = TraversalStack::default();
        let result = self.write_value(value, &mut stack);
        self.finish_traversal(result, &mut stack)
    }

    /// Writes one opaque object graph through its [`PropertySource`].
    ///
    /// # Errors
    ///
    /// As for [`Writer::write`]; a graph that reaches a node already being
    /// written fails with a data-structure-loop error.
    pub fn write_source(&mut self, source: &dyn PropertySource) -> Result<()> {
        let mut stack = TraversalStack::default();
        let result = self.write_source_node(source, &mut stack);
        self.finish_traversal(result, &mut stack)
    }

    fn finish_traversal(&mut self, result: Result<()>, stack: &mut TraversalStack) -> Result<()> {
        match result {
            Ok(()) => {
                if stack.is_empty() {
                    Ok(())
                } else {
                    stack.clear();
                    Err(Error::InternalInvariant(
                        "traversal stack not empty after a top-level write".to_string(),
                    ))
                }
            }
            Err(e) => {
                stack.clear();
                Err(e)
            }
        }
    }

    fn write_value(&mut self, value: &Value, stack: &mut TraversalStack) -> Result<()> {
        match value {
            Value::Null => self.sink.write_all(b"null")?,
            Value::Bool(true) => self.sink.write_all(b"true")?,
            Value::Bool(false) => self.sink.write_all(b"false")?,
            Value::Number(n) => self.write_number(n)?,
            Value::BigInt(big) => self.sink.write_all(big.to_string().as_bytes())?,
            Value::String(s) => self.write_string_value(s)?,
            Value::Date(dt) => self.write_date(dt)?,
            Value::Array(items) => {
                let id = value as *const Value as usize;
                stack.enter(id, "array", self.options.detect_loops)?;
                self.sink.write_all(b"[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.sink.write_all(b",")?;
                    }
                    self.write_value(item, stack)?;
                }
                self.sink.write_all(b"]")?;
                stack.leave(id)?;
            }
            Value::Object(map) => {
                let id = value as *const Value as usize;
                stack.enter(id, "object", self.options.detect_loops)?;
                self.sink.write_all(b"{")?;
                let mut seen = HashSet::new();
                for (i, (name, member)) in map.iter().enumerate() {
                    if i > 0 {
                        self.sink.write_all(b",")?;
                    }
                    let rendered = self.render_key(name, &mut seen)?;
                    self.sink.write_all(rendered.as_bytes())?;
                    self.sink.write_all(b":")?;
                    self.write_value(member, stack)?;
                }
                self.sink.write_all(b"}")?;
                stack.leave(id)?;
            }
        }
        Ok(())
    }

    fn write_source_node(
        &mut self,
        source: &dyn PropertySource,
        stack: &mut TraversalStack,
    ) -> Result<()> {
        let id = source as *const dyn PropertySource as *const () as usize;
        stack.enter(id, "object graph node", self.options.detect_loops)?;
        self.sink.write_all(b"{")?;
        let properties = source.enumerate_properties(self.visibility);
        let mut seen = HashSet::new();
        for (i, (name, property)) in properties.iter().enumerate() {
            if i > 0 {
                self.sink.write_all(b",")?;
            }
            let rendered = self.render_key(name, &mut seen)?;
            self.sink.write_all(rendered.as_bytes())?;
            self.sink.write_all(b":")?;
            self.write_property(property, stack)?;
        }
        self.sink.write_all(b"}")?;
        stack.leave(id)
    }

    fn write_property(&mut self, property: &Property<'_>, stack: &mut TraversalStack) -> Result<()> {
        match property {
            Property::Value(value) => self.write_value(value, stack),
            Property::Source(source) => self.write_source_node(*source, stack),
            Property::List(items) => {
                let id = property as *const Property<'_> as usize;
                stack.enter(id, "sequence", self.options.detect_loops)?;
                self.sink.write_all(b"[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.sink.write_all(b",")?;
                    }
                    self.write_property(item, stack)?;
                }
                self.sink.write_all(b"]")?;
                stack.leave(id)
            }
        }
    }

    fn write_number(&mut self, n: &Number) -> Result<()> {
        let text = match &self.number_formatter {
            Some(format) => format(n),
            None => default_number_text(n),
        };
        if is_json_number(&text) {
            self.sink.write_all(text.as_bytes())?;
            Ok(())
        } else {
            // Whatever failed the grammar is re-quoted as a string.
            self.write_quoted(&text)
        }
    }

    fn write_string_value(&mut self, s: &str) -> Result<()> {
        if self.options.encode_numeric_strings_as_numbers && is_json_number(s) {
            self.sink.write_all(s.as_bytes())?;
            return Ok(());
        }
        self.write_quoted(s)
    }

    fn write_quoted(&mut self, s: &str) -> Result<()> {
        self.sink.write_all(b"\"")?;
        let escaped = escape::escape_str(s, &self.options)?;
        self.sink.write_all(escaped.as_bytes())?;
        self.sink.write_all(b"\"")?;
        Ok(())
    }

    fn write_date(&mut self, dt: &chrono::DateTime<chrono::Utc>) -> Result<()> {
        let iso = dates::format_date(dt);
        if self.options.encode_dates_as_objects {
            self.sink.write_all(b"new Date(\"")?;
            self.sink.write_all(iso.as_bytes())?;
            self.sink.write_all(b"\")")?;
        } else {
            self.sink.write_all(b"\"")?;
            self.sink.write_all(iso.as_bytes())?;
            self.sink.write_all(b"\"")?;
        }
        Ok(())
    }

    /// Renders one property name: optional unescape-first, identifier
    /// validation, policy-driven escaping, quoting, and duplicate detection
    /// against the other names already rendered for the same object.
    fn render_key(&self, name: &str, seen: &mut HashSet<String>) -> Result<String> {
        let prepared: Cow<'_, str> = if self.options.unescape_before_reescaping {
            Cow::Owned(unescape(name, &self.options)?)
        } else {
            Cow::Borrowed(name)
        };

        let valid = escape::is_identifier(&prepared, &self.options);
        let reserved = escape::is_reserved_word(&prepared);
        let has_supplementary = prepared.chars().any(|c| (c as u32) > 0xFFFF);

        let quote = self.options.quote_identifiers
            || !valid
            || (reserved && !self.options.allow_reserved_words)
            || has_supplementary;

        if self.options.validate_property_names && !valid && !self.options.quote_identifiers {
            return Err(Error::bad_property_name(name));
        }

        let rendered = if quote {
            let inner = if self.options.unescape_before_reescaping {
                escape::escape_str(&prepared, &self.options)?
            } else {
                escape::escape_str_preserving(&prepared, &self.options)?
            };
            format!("\"{}\"", inner)
        } else {
            let (text, _) = escape::escape_identifier(&prepared, &self.options)?;
            text
        };

        if self.options.validate_property_names && !seen.insert(rendered.clone()) {
            return Err(Error::duplicate_property_name(&rendered));
        }
        Ok(rendered)
    }
}
