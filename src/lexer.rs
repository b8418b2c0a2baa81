//! A lexer which consumes characters from a [Scanner] and produces a stream of [Token]s.
//! This is a simple LA(1) algorithm: the first non-whitespace character decides which kind of
//! token is matched, and no backtracking is ever required.
use std::fmt::{Display, Formatter};

use crate::codec::unescape;
use crate::coords::{Coords, Span};
use crate::errors::{Details, Error, ParserResult, Stage};
use crate::lexer_error;
use crate::scanner::Scanner;

/// Default string buffer capacity
const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Enumeration of valid JSON tokens
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Colon,
    Comma,
    Str(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
    Null,
    EndOfInput,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::StartObject => write!(f, "'{{'"),
            Token::EndObject => write!(f, "'}}'"),
            Token::StartArray => write!(f, "'['"),
            Token::EndArray => write!(f, "']'"),
            Token::Colon => write!(f, "':'"),
            Token::Comma => write!(f, "','"),
            Token::Str(s) => write!(f, "string \"{}\"", s),
            Token::Float(r) => write!(f, "number {}", r),
            Token::Integer(i) => write!(f, "number {}", i),
            Token::Boolean(b) => write!(f, "boolean {}", b),
            Token::Null => write!(f, "null"),
            Token::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A packed token consists of a [Token] and the [Span] associated with it
pub type PackedToken = (Token, Span);

/// Convenience macro for packing tokens along with their positional information
macro_rules! packed_token {
    ($t:expr, $s:expr, $e:expr) => {
        ($t, Span { start: $s, end: $e })
    };
    ($t:expr, $s:expr) => {
        ($t, Span { start: $s, end: $s })
    };
}

pub struct Lexer<'a> {
    /// The [Scanner] instance used by the lexer to source characters
    scanner: Scanner<'a>,
    /// Internal buffer for hoovering up strings and numbers from the input
    buffer: String,
}

impl<'a> Lexer<'a> {
    pub fn new(chars: &'a mut dyn Iterator<Item = char>) -> Self {
        Lexer {
            scanner: Scanner::new(chars),
            buffer: String::with_capacity(DEFAULT_BUFFER_CAPACITY),
        }
    }

    /// Consume the next token from the input, skipping any leading whitespace. Once the input
    /// is exhausted, [Token::EndOfInput] is returned for every subsequent call
    pub fn consume(&mut self) -> ParserResult<PackedToken> {
        self.scanner.skip_whitespace();
        let start = self.scanner.next_coords();
        match self.scanner.peek() {
            None => Ok(packed_token!(Token::EndOfInput, self.scanner.coords())),
            Some('{') => self.match_single(Token::StartObject),
            Some('}') => self.match_single(Token::EndObject),
            Some('[') => self.match_single(Token::StartArray),
            Some(']') => self.match_single(Token::EndArray),
            Some(':') => self.match_single(Token::Colon),
            Some(',') => self.match_single(Token::Comma),
            Some('"') => self.match_string(start),
            Some('t') => self.match_literal("true", Token::Boolean(true), start),
            Some('f') => self.match_literal("false", Token::Boolean(false), start),
            Some('n') => self.match_literal("null", Token::Null, start),
            Some(c) if c == '-' || c.is_ascii_digit() => self.match_number(start),
            Some(c) => lexer_error!(Details::InvalidCharacter(c), start),
        }
    }

    /// Consume a single structural character
    fn match_single(&mut self, token: Token) -> ParserResult<PackedToken> {
        self.scanner.advance();
        Ok(packed_token!(token, self.scanner.coords()))
    }

    /// Consume and match (exactly) a sequence of characters forming a literal
    fn match_literal(
        &mut self,
        literal: &'static str,
        token: Token,
        start: Coords,
    ) -> ParserResult<PackedToken> {
        for expected in literal.chars() {
            match self.scanner.advance() {
                Some(c) if c == expected => (),
                _ => {
                    let message = match token {
                        Token::Null => "expected null",
                        _ => "expected boolean true/false",
                    };
                    return lexer_error!(Details::InvalidLiteral(message), start);
                }
            }
        }
        Ok(packed_token!(token, start, self.scanner.coords()))
    }

    /// Consume a run of (at least one) ascii digits into the internal buffer
    fn match_digits(&mut self, start: Coords) -> ParserResult<()> {
        let mut count = 0;
        while let Some(c) = self.scanner.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            self.buffer.push(c);
            self.scanner.advance();
            count += 1;
        }
        if count == 0 {
            if let Some(c) = self.scanner.peek() {
                self.buffer.push(c);
            }
            return lexer_error!(
                Details::InvalidNumericRepresentation(self.buffer.clone()),
                start
            );
        }
        Ok(())
    }

    /// Attempt to match on a number representation. The grammar is checked here, and the
    /// resulting slice is then handed off to lexical (integers) or fast_float (reals) for the
    /// actual conversion
    fn match_number(&mut self, start: Coords) -> ParserResult<PackedToken> {
        self.buffer.clear();
        let mut is_real = false;

        if self.scanner.peek() == Some('-') {
            self.buffer.push('-');
            self.scanner.advance();
        }

        // no leading zeros, but a lone zero is fine
        let leading_zero = self.scanner.peek() == Some('0');
        self.match_digits(start)?;
        if leading_zero && self.buffer.trim_start_matches('-').len() > 1 {
            return lexer_error!(
                Details::InvalidNumericRepresentation(self.buffer.clone()),
                start
            );
        }

        if self.scanner.peek() == Some('.') {
            is_real = true;
            self.buffer.push('.');
            self.scanner.advance();
            self.match_digits(start)?;
        }

        if let Some(e @ ('e' | 'E')) = self.scanner.peek() {
            is_real = true;
            self.buffer.push(e);
            self.scanner.advance();
            if let Some(sign @ ('+' | '-')) = self.scanner.peek() {
                self.buffer.push(sign);
                self.scanner.advance();
            }
            self.match_digits(start)?;
        }

        let end = self.scanner.coords();
        if is_real {
            match fast_float::parse::<f64, _>(self.buffer.as_bytes()) {
                Ok(n) if n.is_finite() => Ok(packed_token!(Token::Float(n), start, end)),
                _ => lexer_error!(
                    Details::InvalidNumericRepresentation(self.buffer.clone()),
                    start
                ),
            }
        } else {
            match lexical::parse::<i64, _>(self.buffer.as_bytes()) {
                Ok(n) => Ok(packed_token!(Token::Integer(n), start, end)),
                Err(_) => lexer_error!(
                    Details::InvalidNumericRepresentation(self.buffer.clone()),
                    start
                ),
            }
        }
    }

    /// Match a string token. The raw content is captured up to the first unescaped double
    /// quote, and then any escape sequences are translated
    fn match_string(&mut self, start: Coords) -> ParserResult<PackedToken> {
        self.buffer.clear();
        self.scanner.advance();
        loop {
            match self.scanner.advance() {
                Some('\"') => break,
                Some('\\') => {
                    self.buffer.push('\\');
                    match self.scanner.advance() {
                        Some(c) => self.buffer.push(c),
                        None => return lexer_error!(Details::UnterminatedString, start),
                    }
                }
                Some(c) => self.buffer.push(c),
                None => return lexer_error!(Details::UnterminatedString, start),
            }
        }
        let end = self.scanner.coords();
        match unescape(&self.buffer) {
            Ok(s) => Ok(packed_token!(Token::Str(s), start, end)),
            Err(err) => Err(Error::new(Stage::Lexer, err.details).at(start)),
        }
    }
}
