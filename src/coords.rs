//! Coordinate structure used to reference specific locations within parser input
#![allow(clippy::len_without_is_empty)]

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A [Coords] represents a single location within the parser input
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Coords {
    /// The absolute character position
    pub absolute: usize,
    /// The row position (1-based)
    pub line: usize,
    /// The column position (1-based, zero before the first character of a line is consumed)
    pub column: usize,
}

impl Coords {
    /// Move the coordinates forward over a single consumed character
    pub fn advance(&mut self, c: char) {
        self.absolute += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl Display for Coords {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[abs: {}, line: {}, column: {}]",
            self.absolute, self.line, self.column
        )
    }
}

impl Default for Coords {
    /// The default set of coordinates are positioned at the start of the first row
    fn default() -> Self {
        Coords {
            absolute: 0,
            line: 1,
            column: 0,
        }
    }
}

impl PartialOrd<Self> for Coords {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coords {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute.cmp(&other.absolute)
    }
}

/// A [Span] represents a linear interval within the parser input, between to different [Coords]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Span {
    /// Start [Coords] for the span
    pub start: Coords,
    /// End [Coords] for the span
    pub end: Coords,
}

impl Span {
    /// Get the length of the span in characters, minimum is 1
    pub fn len(&self) -> usize {
        match self.start.cmp(&self.end) {
            Ordering::Less => self.end.absolute - self.start.absolute + 1,
            Ordering::Equal => 1,
            Ordering::Greater => self.start.absolute - self.end.absolute + 1,
        }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "start: {}, end: {}, length: {}",
            self.start,
            self.end,
            self.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::{Coords, Span};

    #[test]
    fn should_track_lines_and_columns() {
        let mut coords = Coords::default();
        for c in "ab\ncd".chars() {
            coords.advance(c);
        }
        assert_eq!(coords.absolute, 5);
        assert_eq!(coords.line, 2);
        assert_eq!(coords.column, 2);
    }

    #[test]
    fn should_compute_span_lengths() {
        let mut end = Coords::default();
        let mut start = Coords::default();
        start.advance('x');
        for c in "null".chars() {
            end.advance(c);
        }
        let span = Span { start, end };
        assert_eq!(span.len(), 4);
        assert_eq!(Span { start, end: start }.len(), 1);
    }
}
