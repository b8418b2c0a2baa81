//! General error types for the parser, the value model and the conversion layer

use std::fmt::{Display, Formatter};

use thiserror::Error as ThisError;

use crate::coords::Coords;
use crate::value::ValueType;

/// Global result type used throughout the crate
pub type ParserResult<T> = Result<T, Error>;

/// Enumeration of the various different stages that can produce an error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Decoding of byte input into characters
    Decoder,
    /// The lexer stage of the parser
    Lexer,
    /// The parsing/DOM construction stage of the parser
    Parser,
    /// String escaping and unescaping
    Codec,
    /// Accessors over the value model
    Value,
    /// Conversions between values and native types
    Conversion,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Decoder => write!(f, "decoder"),
            Stage::Lexer => write!(f, "lexer"),
            Stage::Parser => write!(f, "parser"),
            Stage::Codec => write!(f, "codec"),
            Stage::Value => write!(f, "value"),
            Stage::Conversion => write!(f, "conversion"),
        }
    }
}

/// A global enumeration of error details
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Details {
    #[error("end of input reached unexpectedly")]
    EndOfInput,
    #[error("invalid utf-8 byte sequence starting with 0x{0:02X}")]
    NonUtf8InputDetected(u8),
    #[error("non-ascii byte detected: 0x{0:02X}")]
    NonAsciiInputDetected(u8),
    #[error("invalid character found: '{0}'")]
    InvalidCharacter(char),
    #[error("{0}")]
    InvalidLiteral(&'static str),
    #[error("invalid numeric literal: '{0}'")]
    InvalidNumericRepresentation(String),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),
    #[error("expected ':' between member name and value")]
    PairExpected,
    #[error("malformed object")]
    InvalidObject,
    #[error("malformed array")]
    InvalidArray,
    #[error("document root must be an object or an array")]
    InvalidRootObject,
    #[error("trailing characters after the root value")]
    TrailingCharacters,
    #[error("maximum nesting depth of {0} exceeded")]
    NestingTooDeep(usize),
    #[error("invalid escape sequence: '\\{0}'")]
    InvalidEscapeSequence(char),
    #[error("truncated escape sequence")]
    TruncatedEscapeSequence,
    #[error("invalid or truncated unicode escape sequence: '{0}'")]
    InvalidUnicodeEscapeSequence(String),
    #[error("invalid hex digit: '{0}'")]
    InvalidHexDigit(char),
    #[error("unicode escape in the surrogate range: 0x{0:04X}")]
    SurrogateEscape(u32),
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: ValueType, found: ValueType },
    #[error("member '{0}' not found")]
    KeyNotFound(String),
    #[error("value {value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },
    #[error("expected an object with exactly two members, found {0}")]
    InvalidPair(usize),
    #[error("exception while deserializing member '{member}': {source}")]
    InMember { member: String, source: Box<Error> },
}

/// The general error structure
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The originating stage for the error
    pub stage: Stage,
    /// The global error code for the error
    pub details: Details,
    /// Optional input coordinates
    pub coords: Option<Coords>,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.coords {
            Some(coords) => write!(f, "{} error at {}: {}", self.stage, coords, self.details),
            None => write!(f, "{} error: {}", self.stage, self.details),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.details {
            Details::InMember { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl Error {
    /// Create a new error without any positional information
    pub fn new(stage: Stage, details: Details) -> Self {
        Error {
            stage,
            details,
            coords: None,
        }
    }

    /// Attach input coordinates to an error
    pub fn at(mut self, coords: Coords) -> Self {
        self.coords = Some(coords);
        self
    }

    /// Wrap an error with the name of the member that was being deserialized when it occurred.
    /// Used by binding code layered over the conversion functions.
    pub fn in_member(self, member: &str) -> Self {
        let stage = self.stage;
        let coords = self.coords;
        Error {
            stage,
            details: Details::InMember {
                member: member.to_string(),
                source: Box::new(self),
            },
            coords,
        }
    }

    /// The innermost [Details], skipping over any member context
    pub fn root_details(&self) -> &Details {
        match &self.details {
            Details::InMember { source, .. } => source.root_details(),
            details => details,
        }
    }

    /// True if this error was raised whilst decoding, lexing or parsing input
    pub fn is_parse_error(&self) -> bool {
        matches!(self.stage, Stage::Decoder | Stage::Lexer | Stage::Parser)
    }
}

#[macro_export]
macro_rules! decoder_error {
    ($details: expr, $coords: expr) => {
        Err($crate::errors::Error::new($crate::errors::Stage::Decoder, $details).at($coords))
    };
}

#[macro_export]
macro_rules! lexer_error {
    ($details: expr, $coords: expr) => {
        Err($crate::errors::Error::new($crate::errors::Stage::Lexer, $details).at($coords))
    };
}

#[macro_export]
macro_rules! parser_error {
    ($details: expr, $coords: expr) => {
        Err($crate::errors::Error::new($crate::errors::Stage::Parser, $details).at($coords))
    };
}

#[macro_export]
macro_rules! codec_error {
    ($details: expr) => {
        Err($crate::errors::Error::new(
            $crate::errors::Stage::Codec,
            $details,
        ))
    };
}

#[macro_export]
macro_rules! value_error {
    ($details: expr) => {
        Err($crate::errors::Error::new(
            $crate::errors::Stage::Value,
            $details,
        ))
    };
}

#[macro_export]
macro_rules! conversion_error {
    ($details: expr) => {
        Err($crate::errors::Error::new(
            $crate::errors::Stage::Conversion,
            $details,
        ))
    };
}
