//! Scanner implementation with a single character of lookahead. The scanning and lexing phases
//! are split into distinct components: the scanner is only responsible for sourcing individual
//! characters (and keeping track of where they came from), which are consumed by the lexer to
//! produce fully formed tokens.
//!
//! The current implementation of the scanner is *not* internally thread safe.
use crate::coords::Coords;

/// Insignificant whitespace between JSON tokens. Note that this is narrower than
/// [char::is_whitespace]
#[inline]
pub fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// A forward-only cursor over a stream of `char`s
pub struct Scanner<'a> {
    /// The underlying source of characters
    chars: &'a mut dyn Iterator<Item = char>,
    /// Single character lookahead
    lookahead: Option<char>,
    /// Coordinates of the most recently consumed character
    coords: Coords,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner instance over a source of characters
    pub fn new(chars: &'a mut dyn Iterator<Item = char>) -> Self {
        let lookahead = chars.next();
        Scanner {
            chars,
            lookahead,
            coords: Coords::default(),
        }
    }

    /// Peek at the next character without consuming it
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.lookahead
    }

    /// Consume the next character. Returns [None] at the end of the input
    pub fn advance(&mut self) -> Option<char> {
        let current = self.lookahead?;
        self.coords.advance(current);
        self.lookahead = self.chars.next();
        Some(current)
    }

    /// Skip over any insignificant whitespace
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.lookahead {
            if !is_json_whitespace(c) {
                break;
            }
            self.advance();
        }
    }

    /// Get the coordinates of the last consumed character
    pub fn coords(&self) -> Coords {
        self.coords
    }

    /// Get the coordinates that the next character will occupy once consumed
    pub fn next_coords(&self) -> Coords {
        let mut coords = self.coords;
        if let Some(c) = self.lookahead {
            coords.advance(c);
        }
        coords
    }
}

#[cfg(test)]
mod tests {
    use crate::scanner::Scanner;

    #[test]
    fn should_handle_empty_input() {
        let mut chars = "".chars();
        let mut scanner = Scanner::new(&mut chars);
        assert_eq!(scanner.peek(), None);
        assert_eq!(scanner.advance(), None);
    }

    #[test]
    fn should_skip_json_whitespace_only() {
        let mut chars = " \t\r\n {\u{a0}".chars();
        let mut scanner = Scanner::new(&mut chars);
        scanner.skip_whitespace();
        assert_eq!(scanner.advance(), Some('{'));
        scanner.skip_whitespace();
        assert_eq!(scanner.peek(), Some('\u{a0}'));
    }

    #[test]
    fn should_report_correct_coords() {
        let mut chars = "12\n345".chars();
        let mut scanner = Scanner::new(&mut chars);
        for _ in 0..4 {
            scanner.advance();
        }
        assert_eq!(scanner.coords().absolute, 4);
        assert_eq!(scanner.coords().line, 2);
        assert_eq!(scanner.coords().column, 1);
        assert_eq!(scanner.next_coords().column, 2);
    }
}
