//! The recursive-descent parser.
//!
//! Consumes [`Token`]s from the tokenizer and builds a [`Value`] tree
//! bottom-up. Only two productions exist — object and array — with values
//! inlined at every other position.
//!
//! Numeric resolution follows JavaScript literal rules: `0x` prefixes parse
//! base 16, octal-looking leading-zero integers parse base 8, everything else
//! base 10; integers that overflow `i64` fall back to [`Value::BigInt`]
//! losslessly. Date tokens try the caller's custom formats in registration
//! order before the ISO-8601 defaults.
//!
//! End of input with zero tokens read yields `Ok(None)`; the caller decides
//! absent-versus-null semantics.

use crate::lexer::{Literal, Spanned, Token, Tokenizer};
use crate::value::Number;
use crate::{dates, Error, JsonMap, JsonOptions, Result, Value};
use num_bigint::BigInt;

/// The loose-JSON parser.
///
/// # Examples
///
/// ```rust
/// use loose_json::parser::Parser;
/// use loose_json::{JsonOptions, Value};
///
/// let options = JsonOptions::new();
/// let mut parser = Parser::new("{a: 1, 'b': [true, null]}", &options);
/// let value = parser.parse_document().unwrap().unwrap();
/// assert!(value.is_object());
///
/// let mut parser = Parser::new("", &options);
/// assert!(parser.parse_document().unwrap().is_none());
/// ```
pub struct Parser<'a> {
    tokens: Tokenizer<'a>,
    options: &'a JsonOptions,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(input: &'a str, options: &'a JsonOptions) -> Self {
        Parser {
            tokens: Tokenizer::new(input, options),
            options,
        }
    }

    fn require(&mut self, expected: &str) -> Result<Spanned> {
        match self.tokens.next_token()? {
            Some(spanned) => Ok(spanned),
            None => Err(Error::unexpected_token(0, 0, expected, "end of input")),
        }
    }

    /// Parses one complete document. Returns `Ok(None)` for empty input.
    ///
    /// # Errors
    ///
    /// Fails on any tokenize error, on structural mismatches, on unparseable
    /// date literals, and on text remaining after the first value.
    pub fn parse_document(&mut self) -> Result<Option<Value>> {
        let Some(first) = self.tokens.next_token()? else {
            return Ok(None);
        };
        let value = self.parse_value(first)?;
        if let Some(extra) = self.tokens.next_token()? {
            return Err(Error::unexpected_token(
                extra.line,
                extra.col,
                "end of input",
                extra.token.describe(),
            ));
        }
        Ok(Some(value))
    }

    fn parse_value(&mut self, spanned: Spanned) -> Result<Value> {
        match spanned.token {
            Token::StartObject => self.parse_object(),
            Token::StartArray => self.parse_array(),
            Token::Str(s) => {
                if self.options.decode_date_strings {
                    if let Some(dt) = dates::parse_date(&s, &self.options.custom_date_formats) {
                        return Ok(Value::Date(dt));
                    }
                }
                Ok(Value::String(s))
            }
            Token::Int(lexeme) => parse_integer(&lexeme),
            Token::Float(lexeme) => parse_float(&lexeme),
            Token::Literal(Literal::Null) => Ok(Value::Null),
            Token::Literal(Literal::True) => Ok(Value::Bool(true)),
            Token::Literal(Literal::False) => Ok(Value::Bool(false)),
            Token::Date(text) => dates::parse_date(&text, &self.options.custom_date_formats)
                .map(Value::Date)
                .ok_or_else(|| Error::date_parse(&text)),
            other => Err(Error::unexpected_token(
                spanned.line,
                spanned.col,
                "value",
                other.describe(),
            )),
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        let mut map = JsonMap::new();
        loop {
            let spanned = self.require("property name or '}'")?;
            let key = match spanned.token {
                Token::EndObject => break,
                Token::Str(s) | Token::Identifier(s) => s,
                other => {
                    return Err(Error::unexpected_token(
                        spanned.line,
                        spanned.col,
                        "property name or '}'",
                        other.describe(),
                    ));
                }
            };

            let colon = self.require("':'")?;
            if colon.token != Token::Colon {
                return Err(Error::unexpected_token(
                    colon.line,
                    colon.col,
                    "':'",
                    colon.token.describe(),
                ));
            }

            let value_token = self.require("value")?;
            let value = self.parse_value(value_token)?;
            map.insert(key, value);

            let separator = self.require("',' or '}'")?;
            match separator.token {
                Token::Comma => {}
                Token::EndObject => break,
                other => {
                    return Err(Error::unexpected_token(
                        separator.line,
                        separator.col,
                        "',' or '}'",
                        other.describe(),
                    ));
                }
            }
        }
        Ok(Value::Object(map))
    }

    fn parse_array(&mut self) -> Result<Value> {
        let mut elements = Vec::new();
        loop {
            let spanned = self.require("value or ']'")?;
            if spanned.token == Token::EndArray {
                break;
            }
            elements.push(self.parse_value(spanned)?);

            let separator = self.require("',' or ']'")?;
            match separator.token {
                Token::Comma => {}
                Token::EndArray => break,
                other => {
                    return Err(Error::unexpected_token(
                        separator.line,
                        separator.col,
                        "',' or ']'",
                        other.describe(),
                    ));
                }
            }
        }
        Ok(Value::Array(elements))
    }
}

/// Resolves an integer lexeme: `0x` hex, octal-looking leading zero, else
/// decimal; `i64` with a lossless `BigInt` fallback on overflow.
fn parse_integer(lexeme: &str) -> Result<Value> {
    let (negative, unsigned) = match lexeme.as_bytes().first() {
        Some(b'-') => (true, &lexeme[1..]),
        Some(b'+') => (false, &lexeme[1..]),
        _ => (false, lexeme),
    };

    let (digits, radix) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (hex, 16)
    } else if unsigned.len() > 1
        && unsigned.starts_with('0')
        && unsigned.bytes().all(|b| (b'0'..=b'7').contains(&b))
    {
        (unsigned, 8)
    } else {
        (unsigned, 10)
    };

    // Parse with the sign attached so i64::MIN stays an integer.
    let signed = if negative {
        let mut s = String::with_capacity(digits.len() + 1);
        s.push('-');
        s.push_str(digits);
        i64::from_str_radix(&s, radix)
    } else {
        i64::from_str_radix(digits, radix)
    };
    if let Ok(value) = signed {
        return Ok(Value::Number(Number::Integer(value)));
    }

    match BigInt::parse_bytes(digits.as_bytes(), radix) {
        Some(big) => Ok(Value::BigInt(if negative { -big } else { big })),
        None => Err(Error::custom(format!("invalid integer literal: {}", lexeme))),
    }
}

/// Resolves a float lexeme, mapping the JavaScript specials onto their
/// [`Number`] variants.
fn parse_float(lexeme: &str) -> Result<Value> {
    match lexeme {
        "Infinity" | "+Infinity" => return Ok(Value::Number(Number::Infinity)),
        "-Infinity" => return Ok(Value::Number(Number::NegativeInfinity)),
        "NaN" | "+NaN" | "-NaN" => return Ok(Value::Number(Number::NaN)),
        _ => {}
    }
    lexeme
        .parse::<f64>()
        .map(|f| Value::Number(Number::Float(f)))
        .map_err(|_| Error::custom(format!("invalid float literal: {}", lexeme)))
}
