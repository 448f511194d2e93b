//! # loose_json
//!
//! A permissive, JavaScript-flavored JSON codec.
//!
//! ## What does "loose" mean?
//!
//! Encoding always produces strict JSON with exact JSON-standard and
//! ECMAScript-standard escaping (5th and 6th edition variants). Decoding
//! additionally tolerates the JavaScript-only syntax that real-world
//! JavaScript tooling emits: single-quoted strings, unquoted identifier keys,
//! hex and octal integer literals, `Infinity`/`NaN`, and embedded
//! `new Date("...")` constructor calls.
//!
//! ## Key Features
//!
//! - **Exact escaping rules**: code-point-aware escape/unescape engine with
//!   surrogate-pair arithmetic, ECMAScript 5/6 rendering (`\uXXXX` pairs vs
//!   `\u{...}`), eval-safety for U+2028/U+2029, and pass-through of
//!   pre-existing legal escapes
//! - **Loose decoding**: backtracking-free tokenizer and recursive-descent
//!   parser over the JavaScript-flavored grammar
//! - **Cycle-safe encoding**: the writer tracks reference identities and
//!   fails on data-structure loops instead of recursing forever
//! - **Policy-driven**: four-way handling (pass/replace/discard/error) of
//!   undefined code points and unmatched surrogates
//! - **Serde Compatible**: works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! loose_json = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic Encoding and Decoding
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use loose_json::{to_string, from_str};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! // Encode to strict JSON
//! let json = to_string(&user).unwrap();
//! assert_eq!(json, r#"{"id":123,"name":"Alice","active":true}"#);
//!
//! // Decode back — loose syntax is fine
//! let user_back: User = from_str("{id: 0x7B, name: 'Alice', active: true}").unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Dynamic Values with the json! Macro
//!
//! ```rust
//! use loose_json::{json, Value};
//!
//! let data = json!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "json"]
//! });
//!
//! if let Value::Object(obj) = data {
//!     assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ### Escaping Policies
//!
//! ```rust
//! use loose_json::{value_to_string_with_options, json, EcmaEdition, JsonOptions};
//!
//! let value = json!("\u{1F600}");
//!
//! let five = JsonOptions::new();
//! assert_eq!(value_to_string_with_options(&value, five).unwrap(), "\"\\uD83D\\uDE00\"");
//!
//! let six = JsonOptions::new().with_ecma_edition(EcmaEdition::Six);
//! assert_eq!(value_to_string_with_options(&value, six).unwrap(), "\"\\u{1F600}\"");
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Proper error propagation with `Result` types
//! - All per-call state (scanner offsets, token lookahead, traversal stack)
//!   is call-local; options and static tables are safe for unsynchronized
//!   concurrent reads
//!
//! ## Format
//!
//! For the wire format accepted and produced by this crate, see the
//! [`format`] module.

pub mod dates;
pub mod de;
pub mod error;
pub mod escape;
pub mod format;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod scan;
pub mod ser;
pub mod unescape;
pub mod value;
pub mod writer;

pub use de::{from_value, ValueDeserializer};
pub use error::{Error, Result};
pub use map::JsonMap;
pub use options::{CodePointPolicy, EcmaEdition, JsonOptions};
pub use parser::Parser;
pub use ser::ValueSerializer;
pub use value::{Number, Value};
pub use writer::{NumberFormatter, Property, PropertySource, Visibility, Writer};

use serde::{Deserialize, Serialize};
use std::io;

/// Serialize any `T: Serialize` to a strict-JSON string.
///
/// # Examples
///
/// ```rust
/// use loose_json::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let json = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(json, r#"{"x":1,"y":2}"#);
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or violates the
/// default encoding policy.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, JsonOptions::default())
}

/// Serialize any `T: Serialize` to a JSON string with custom options.
///
/// # Examples
///
/// ```rust
/// use loose_json::{to_string_with_options, JsonOptions};
///
/// let options = JsonOptions::new().with_escape_non_ascii(true);
/// let json = to_string_with_options(&"caf\u{e9}", options).unwrap();
/// assert_eq!(json, "\"caf\\u00E9\"");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or violates the
/// encoding policy.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: JsonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let tree = to_value(value)?;
    value_to_string_with_options(&tree, options)
}

/// Serialize a [`Value`] tree directly to a strict-JSON string.
///
/// Unlike [`to_string`], this does not round the tree through the serde data
/// model, so [`Value::Date`] and [`Value::BigInt`] keep their native
/// renderings.
///
/// # Errors
///
/// Returns an error on policy violations, bad or duplicate property names,
/// or a detected data-structure loop.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn value_to_string(value: &Value) -> Result<String> {
    value_to_string_with_options(value, JsonOptions::default())
}

/// Serialize a [`Value`] tree directly to a JSON string with custom options.
///
/// # Errors
///
/// As for [`value_to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn value_to_string_with_options(value: &Value, options: JsonOptions) -> Result<String> {
    let mut out = Vec::with_capacity(256);
    let mut writer = Writer::new(&mut out, options);
    writer.write(value)?;
    String::from_utf8(out).map_err(|e| Error::custom(e.to_string()))
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// Useful for working with JSON data dynamically when the structure isn't
/// known at compile time.
///
/// # Examples
///
/// ```rust
/// use loose_json::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized (e.g. a map with
/// non-string keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    crate::ser::to_value(value)
}

/// Serialize any `T: Serialize` to a streaming sink in JSON format.
///
/// Output is flushed to the sink incrementally; nothing is buffered beyond
/// the value tree itself.
///
/// # Examples
///
/// ```rust
/// use loose_json::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, br#"{"x":1,"y":2}"#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the sink fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, JsonOptions::default())
}

/// Serialize any `T: Serialize` to a streaming sink with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the sink fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(writer: W, value: &T, options: JsonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let tree = to_value(value)?;
    let mut json_writer = Writer::new(writer, options);
    json_writer.write(&tree)
}

/// Parse loose-JSON text into a [`Value`] tree.
///
/// Returns `Ok(None)` for input containing no tokens at all; the caller
/// decides absent-versus-null semantics.
///
/// # Examples
///
/// ```rust
/// use loose_json::parse_str;
///
/// let value = parse_str("{a: 1}").unwrap().unwrap();
/// assert!(value.is_object());
///
/// assert!(parse_str("  ").unwrap().is_none());
/// ```
///
/// # Errors
///
/// Returns an error on any tokenize or parse failure, with line/column
/// context.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str(input: &str) -> Result<Option<Value>> {
    parse_str_with_options(input, &JsonOptions::default())
}

/// Parse loose-JSON text into a [`Value`] tree with custom options.
///
/// # Errors
///
/// As for [`parse_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str_with_options(input: &str, options: &JsonOptions) -> Result<Option<Value>> {
    Parser::new(input, options).parse_document()
}

/// Deserialize an instance of type `T` from loose-JSON text.
///
/// # Examples
///
/// ```rust
/// use loose_json::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("{x: 1, 'y': 2}").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid loose JSON or cannot be
/// deserialized to type `T`. Error messages include line and column
/// information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    from_str_with_options(s, &JsonOptions::default())
}

/// Deserialize an instance of type `T` from loose-JSON text with custom
/// options.
///
/// # Errors
///
/// As for [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &JsonOptions) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let value = parse_str_with_options(s, options)?.unwrap_or(Value::Null);
    from_value(value)
}

/// Deserialize an instance of type `T` from an I/O stream of loose JSON.
///
/// # Examples
///
/// ```rust
/// use loose_json::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let cursor = Cursor::new(b"{x: 1, y: 2}");
/// let point: Point = from_reader(cursor).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid loose JSON, or
/// the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of loose-JSON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid loose JSON,
/// or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let json = to_string(&point).unwrap();
        let point_back: Point = from_str(&json).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        };

        let json = to_string(&user).unwrap();
        let user_back: User = from_str(&json).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_to_value() {
        let point = Point { x: 1, y: 2 };
        let value = to_value(&point).unwrap();

        match value {
            Value::Object(obj) => {
                assert_eq!(obj.get("x"), Some(&Value::Number(Number::Integer(1))));
                assert_eq!(obj.get("y"), Some(&Value::Number(Number::Integer(2))));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_arrays() {
        let numbers = vec![1, 2, 3, 4, 5];
        let json = to_string(&numbers).unwrap();
        assert_eq!(json, "[1,2,3,4,5]");
        let numbers_back: Vec<i32> = from_str(&json).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn test_loose_decoding_smoke() {
        let point: Point = from_str("{x: 0x1, 'y': 017}").unwrap();
        assert_eq!(point, Point { x: 1, y: 15 });
    }

    #[test]
    fn test_empty_input_is_null() {
        let value: Value = from_str("").unwrap();
        assert_eq!(value, Value::Null);
        let opt: Option<i32> = from_str("").unwrap();
        assert_eq!(opt, None);
    }

    #[test]
    fn test_to_writer_streams() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &vec![1, 2]).unwrap();
        assert_eq!(buffer, b"[1,2]");
    }
}
