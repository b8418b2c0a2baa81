//! The recursive-descent DOM parser
//!
//! Parses the supplied input and produces a complete [Value] tree. Nothing is returned until
//! the whole input has been consumed, and any failure aborts the parse: partial trees are never
//! handed back to the caller.
use std::io::BufReader;

use crate::decoders::{DecoderSelector, Encoding};
use crate::errors::{Details, ParserResult};
use crate::lexer::{Lexer, PackedToken, Token};
use crate::parser_error;
use crate::value::{Array, Object, Value};

/// The default maximum nesting depth for arrays and objects
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Main JSON parser struct. A parser holds only configuration, so a single instance may be
/// reused for any number of parses
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    decoders: DecoderSelector,
    encoding: Encoding,
    max_depth: usize,
}

impl Default for Parser {
    /// The default encoding is Utf-8, with a maximum nesting depth of [DEFAULT_MAX_DEPTH]
    fn default() -> Self {
        Self {
            decoders: Default::default(),
            encoding: Default::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Parser {
    /// Create a new instance of the parser using a specific [Encoding] for byte input
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self {
            encoding,
            ..Default::default()
        }
    }

    /// Set the maximum permitted nesting depth of arrays and objects. A depth of zero only
    /// permits scalar values
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse a document from a string. The root must be an object or an array
    pub fn parse_str(&self, str: &str) -> ParserResult<Value> {
        self.parse_document(&mut str.chars())
    }

    /// Parse a document from a buffer of bytes, decoded using the configured [Encoding].
    /// The root must be an object or an array. Bytes which are invalid under the encoding are
    /// reported as decoder errors
    pub fn parse_bytes(&self, bytes: &[u8]) -> ParserResult<Value> {
        self.decoders.validate(bytes, self.encoding)?;
        let mut reader = BufReader::new(bytes);
        let mut chars = self.decoders.new_decoder(&mut reader, self.encoding);
        self.parse_document(&mut chars)
    }

    /// Parse a document, requiring the root to be either an object or an array
    pub fn parse_document(&self, chars: &mut dyn Iterator<Item = char>) -> ParserResult<Value> {
        let mut lexer = Lexer::new(chars);
        let root = match lexer.consume()? {
            packed @ (Token::StartObject, _) | packed @ (Token::StartArray, _) => {
                self.parse_token(&mut lexer, packed, 0)?
            }
            (_, span) => {
                return parser_error!(Details::InvalidRootObject, span.start);
            }
        };
        self.expect_end(&mut lexer)?;
        Ok(root)
    }

    /// Parse any single value, including bare scalars
    pub fn parse_value(&self, chars: &mut dyn Iterator<Item = char>) -> ParserResult<Value> {
        let mut lexer = Lexer::new(chars);
        let packed = lexer.consume()?;
        let root = self.parse_token(&mut lexer, packed, 0)?;
        self.expect_end(&mut lexer)?;
        Ok(root)
    }

    /// Only whitespace may follow the root value
    fn expect_end(&self, lexer: &mut Lexer) -> ParserResult<()> {
        match lexer.consume()? {
            (Token::EndOfInput, _) => Ok(()),
            (_, span) => parser_error!(Details::TrailingCharacters, span.start),
        }
    }

    /// Build a value starting from an already consumed token. `depth` is the number of
    /// containers currently open around the value
    fn parse_token(
        &self,
        lexer: &mut Lexer,
        packed: PackedToken,
        depth: usize,
    ) -> ParserResult<Value> {
        match packed {
            (Token::StartObject, span) => {
                if depth >= self.max_depth {
                    return parser_error!(Details::NestingTooDeep(self.max_depth), span.start);
                }
                self.parse_object(lexer, depth + 1)
            }
            (Token::StartArray, span) => {
                if depth >= self.max_depth {
                    return parser_error!(Details::NestingTooDeep(self.max_depth), span.start);
                }
                self.parse_array(lexer, depth + 1)
            }
            (Token::Str(str), _) => Ok(Value::String(str)),
            (Token::Float(value), _) => Ok(Value::Real(value)),
            (Token::Integer(value), _) => Ok(Value::Integer(value)),
            (Token::Boolean(value), _) => Ok(Value::Boolean(value)),
            (Token::Null, _) => Ok(Value::Null),
            (Token::EndOfInput, span) => parser_error!(Details::EndOfInput, span.start),
            (token, span) => {
                parser_error!(Details::UnexpectedToken(token.to_string()), span.start)
            }
        }
    }

    /// An object is a list of comma separated name/value pairs. The opening brace has already
    /// been consumed
    fn parse_object(&self, lexer: &mut Lexer, depth: usize) -> ParserResult<Value> {
        let mut object = Object::new();
        loop {
            let name = match lexer.consume()? {
                (Token::Str(name), _) => name,
                (Token::EndObject, _) if object.is_empty() => return Ok(Value::Object(object)),
                (Token::EndOfInput, span) => {
                    return parser_error!(Details::EndOfInput, span.start)
                }
                (_, span) => return parser_error!(Details::InvalidObject, span.start),
            };
            match lexer.consume()? {
                (Token::Colon, _) => (),
                (_, span) => return parser_error!(Details::PairExpected, span.start),
            }
            let packed = lexer.consume()?;
            object.push(name, self.parse_token(lexer, packed, depth)?);
            match lexer.consume()? {
                (Token::Comma, _) => (),
                (Token::EndObject, _) => return Ok(Value::Object(object)),
                (Token::EndOfInput, span) => {
                    return parser_error!(Details::EndOfInput, span.start)
                }
                (_, span) => return parser_error!(Details::InvalidObject, span.start),
            }
        }
    }

    /// An array is a list of comma separated values. The opening bracket has already been
    /// consumed
    fn parse_array(&self, lexer: &mut Lexer, depth: usize) -> ParserResult<Value> {
        let mut values: Array = vec![];
        loop {
            match lexer.consume()? {
                (Token::EndArray, _) if values.is_empty() => return Ok(Value::Array(values)),
                (Token::EndArray, span) | (Token::Comma, span) => {
                    return parser_error!(Details::InvalidArray, span.start)
                }
                packed => values.push(self.parse_token(lexer, packed, depth)?),
            }
            match lexer.consume()? {
                (Token::Comma, _) => (),
                (Token::EndArray, _) => return Ok(Value::Array(values)),
                (Token::EndOfInput, span) => {
                    return parser_error!(Details::EndOfInput, span.start)
                }
                (_, span) => return parser_error!(Details::InvalidArray, span.start),
            }
        }
    }
}
