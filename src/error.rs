//! Error types for loose-JSON encoding and decoding.
//!
//! This module provides comprehensive error reporting with contextual information
//! to help diagnose and fix malformed input and unserializable graphs.
//!
//! ## Error Categories
//!
//! - **Scan errors**: malformed surrogates and undefined code points found while
//!   resolving escape sequences (raised only under the `Error` code-point policy)
//! - **Tokenize errors**: unterminated strings, unrecognized tokens, malformed
//!   code points, all with line/column information and surrounding text
//! - **Parse errors**: structural token mismatches and unparseable date literals
//! - **Write errors**: data-structure loops, bad or duplicate property names
//! - **I/O errors**: sink/source failures pass through unchanged
//!
//! ## Error Context
//!
//! All tokenize and parse errors include:
//! - Line and column numbers
//! - A snippet of the problematic input
//!
//! ## Examples
//!
//! ```rust
//! use loose_json::{from_str, Error, Value};
//!
//! let result: Result<Value, Error> = from_str("{\"a\": }");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     eprintln!("Parse error: {}", err);
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during loose-JSON
/// encoding/decoding.
///
/// Each error variant includes contextual information to aid debugging.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error from the sink or source
    #[error("IO error: {0}")]
    Io(String),

    /// A high surrogate escape with no matching low surrogate
    #[error("Malformed surrogate at line {line}, column {col}: {context}")]
    MalformedSurrogate {
        line: usize,
        col: usize,
        context: String,
    },

    /// An escape resolved to a code point with no Unicode meaning
    #[error("Undefined code point U+{code_point:04X} at line {line}, column {col}")]
    UndefinedCodePoint {
        line: usize,
        col: usize,
        code_point: u32,
    },

    /// A quote was opened with no matching unescaped quote before end of input
    #[error("Unterminated string starting at line {line}, column {col}:\n{context}")]
    UnterminatedString {
        line: usize,
        col: usize,
        context: String,
    },

    /// No token grammar matched at the current position
    #[error("Unrecognized token at line {line}, column {col}:\n{context}")]
    UnrecognizedToken {
        line: usize,
        col: usize,
        context: String,
    },

    /// A token appeared where a different token type is structurally required
    #[error("Unexpected token at line {line}, column {col}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        col: usize,
        expected: String,
        found: String,
    },

    /// A date literal matched none of the registered or default formats
    #[error("Unparseable date: {text}")]
    DateParse { text: String },

    /// A composite value was reached again while it was still being written
    #[error("Data structure loop detected at {path}")]
    DataStructureLoop { path: String },

    /// A property name failed identifier validation
    #[error("Bad property name: {name}")]
    BadPropertyName { name: String },

    /// Two properties of one object rendered to the same name
    #[error("Duplicate property name: {name}")]
    DuplicatePropertyName { name: String },

    /// Traversal-stack mismatch. Never expected; indicates a bug in the writer.
    #[error("Internal invariant violation: {0}")]
    InternalInvariant(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a malformed-surrogate error with positional context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use loose_json::Error;
    ///
    /// let err = Error::malformed_surrogate(3, 7, "\\uD800x");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn malformed_surrogate(line: usize, col: usize, context: &str) -> Self {
        Error::MalformedSurrogate {
            line,
            col,
            context: context.to_string(),
        }
    }

    /// Creates an undefined-code-point error.
    pub fn undefined_code_point(line: usize, col: usize, code_point: u32) -> Self {
        Error::UndefinedCodePoint {
            line,
            col,
            code_point,
        }
    }

    /// Creates an unterminated-string error with the text around the opening quote.
    pub fn unterminated_string(line: usize, col: usize, context: &str) -> Self {
        Error::UnterminatedString {
            line,
            col,
            context: context.to_string(),
        }
    }

    /// Creates an unrecognized-token error with the text around the failure point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use loose_json::Error;
    ///
    /// let err = Error::unrecognized_token(1, 5, "@bad");
    /// assert!(err.to_string().contains("@bad"));
    /// ```
    pub fn unrecognized_token(line: usize, col: usize, context: &str) -> Self {
        Error::UnrecognizedToken {
            line,
            col,
            context: context.to_string(),
        }
    }

    /// Creates an unexpected-token error naming what was required and what appeared.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use loose_json::Error;
    ///
    /// let err = Error::unexpected_token(2, 3, "':'", "','");
    /// assert!(err.to_string().contains("expected ':'"));
    /// ```
    pub fn unexpected_token(line: usize, col: usize, expected: &str, found: &str) -> Self {
        Error::UnexpectedToken {
            line,
            col,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a date-parse error carrying the rejected text.
    pub fn date_parse(text: &str) -> Self {
        Error::DateParse {
            text: text.to_string(),
        }
    }

    /// Creates a data-structure-loop error for the given traversal path.
    pub fn data_structure_loop(path: &str) -> Self {
        Error::DataStructureLoop {
            path: path.to_string(),
        }
    }

    /// Creates a bad-property-name error.
    pub fn bad_property_name(name: &str) -> Self {
        Error::BadPropertyName {
            name: name.to_string(),
        }
    }

    /// Creates a duplicate-property-name error.
    pub fn duplicate_property_name(name: &str) -> Self {
        Error::DuplicatePropertyName {
            name: name.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use loose_json::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for sink/source failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
