//! Escaping and unescaping of JSON string content.
//!
//! Only the fixed set of control/structural characters is escaped on output; everything else
//! (including non-ASCII text) passes through untouched. On input, `\uXXXX` escapes are decoded
//! one UCS-2 unit at a time. Surrogate pairs are not combined, and any escape in the surrogate
//! range is rejected.
use crate::codec_error;
use crate::errors::{Details, ParserResult};

/// Escape a string so that it may be embedded between double quotes in JSON text
pub fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    escape_into(s, &mut escaped);
    escaped
}

/// Escape a string, appending the result to an existing buffer
pub fn escape_into(s: &str, buffer: &mut String) {
    for c in s.chars() {
        match c {
            '\u{8}' => buffer.push_str("\\b"),
            '\u{c}' => buffer.push_str("\\f"),
            '\n' => buffer.push_str("\\n"),
            '\r' => buffer.push_str("\\r"),
            '\t' => buffer.push_str("\\t"),
            '\"' => buffer.push_str("\\\""),
            '\\' => buffer.push_str("\\\\"),
            '/' => buffer.push_str("\\/"),
            c => buffer.push(c),
        }
    }
}

/// Escape a string and wrap it in double quotes
pub fn enquote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    enquote_into(s, &mut quoted);
    quoted
}

/// Escape and quote a string, appending the result to an existing buffer
pub fn enquote_into(s: &str, buffer: &mut String) {
    buffer.push('\"');
    escape_into(s, buffer);
    buffer.push('\"');
}

/// Decode a single hex digit
pub fn decode_hex_digit(c: char) -> ParserResult<u32> {
    match c {
        '0'..='9' => Ok(c as u32 - '0' as u32),
        'a'..='f' => Ok(c as u32 - 'a' as u32 + 10),
        'A'..='F' => Ok(c as u32 - 'A' as u32 + 10),
        _ => codec_error!(Details::InvalidHexDigit(c)),
    }
}

/// Translate all escape sequences within a string into the characters they represent
pub fn unescape(s: &str) -> ParserResult<String> {
    if !s.contains('\\') {
        return Ok(s.to_string());
    }
    let mut unescaped = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('b') => unescaped.push('\u{8}'),
            Some('f') => unescaped.push('\u{c}'),
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some('t') => unescaped.push('\t'),
            Some('\"') => unescaped.push('\"'),
            Some('\\') => unescaped.push('\\'),
            Some('/') => unescaped.push('/'),
            Some('u') => unescaped.push(decode_unicode_escape(&mut chars)?),
            Some(other) => return codec_error!(Details::InvalidEscapeSequence(other)),
            None => return codec_error!(Details::TruncatedEscapeSequence),
        }
    }
    Ok(unescaped)
}

/// Decode the four hex digits which follow a `\u` prefix
fn decode_unicode_escape(chars: &mut impl Iterator<Item = char>) -> ParserResult<char> {
    let mut code = 0u32;
    let mut digits = String::with_capacity(4);
    for _ in 0..4 {
        match chars.next() {
            Some(c) => {
                digits.push(c);
                code = (code << 4) | decode_hex_digit(c)?;
            }
            None => {
                return codec_error!(Details::InvalidUnicodeEscapeSequence(format!(
                    "\\u{}",
                    digits
                )))
            }
        }
    }
    if (0xD800..=0xDFFF).contains(&code) {
        return codec_error!(Details::SurrogateEscape(code));
    }
    match char::from_u32(code) {
        Some(c) => Ok(c),
        None => codec_error!(Details::InvalidUnicodeEscapeSequence(format!(
            "\\u{}",
            digits
        ))),
    }
}

#[cfg(test)]
mod tests {
    use crate::codec::{decode_hex_digit, enquote, escape, unescape};
    use crate::errors::{Details, Stage};

    #[test]
    fn should_escape_the_special_characters_only() {
        assert_eq!(escape("a\"b\\c/d"), "a\\\"b\\\\c\\/d");
        assert_eq!(escape("\u{8}\u{c}\n\r\t"), "\\b\\f\\n\\r\\t");
        assert_eq!(escape("caf\u{e9} \u{1}"), "caf\u{e9} \u{1}");
    }

    #[test]
    fn should_enquote_empty_strings() {
        assert_eq!(enquote(""), "\"\"");
        assert_eq!(enquote("s"), "\"s\"");
    }

    #[test]
    fn should_unescape_simple_sequences() {
        assert_eq!(
            unescape("\\b\\f\\n\\r\\t\\\"\\\\\\/").unwrap(),
            "\u{8}\u{c}\n\r\t\"\\/"
        );
        assert_eq!(unescape("no escapes here").unwrap(), "no escapes here");
    }

    #[test]
    fn should_expand_unicode_escapes_to_utf8() {
        let degree = unescape("\\u00B0").unwrap();
        assert_eq!(degree, "\u{b0}");
        assert_eq!(degree.as_bytes(), &[0xC2, 0xB0]);
        assert_eq!(unescape("\\u0041\\u20ac").unwrap(), "A\u{20ac}");
        assert_eq!(unescape("\\u20AC").unwrap().as_bytes(), &[0xE2, 0x82, 0xAC]);
    }

    #[test]
    fn should_reject_surrogates() {
        let err = unescape("\\uD800").unwrap_err();
        assert_eq!(err.details, Details::SurrogateEscape(0xD800));
        assert!(unescape("\\uD83D\\uDE00").is_err());
    }

    #[test]
    fn should_reject_malformed_escapes() {
        let err = unescape("\\q").unwrap_err();
        assert_eq!(err.stage, Stage::Codec);
        assert_eq!(err.details, Details::InvalidEscapeSequence('q'));
        assert_eq!(
            unescape("trailing\\").unwrap_err().details,
            Details::TruncatedEscapeSequence
        );
        assert!(unescape("\\u12").is_err());
        assert_eq!(
            unescape("\\u12G4").unwrap_err().details,
            Details::InvalidHexDigit('G')
        );
    }

    #[test]
    fn should_decode_hex_digits() {
        assert_eq!(decode_hex_digit('0').unwrap(), 0);
        assert_eq!(decode_hex_digit('9').unwrap(), 9);
        assert_eq!(decode_hex_digit('a').unwrap(), 10);
        assert_eq!(decode_hex_digit('F').unwrap(), 15);
        assert!(decode_hex_digit('g').is_err());
    }

    #[test]
    fn should_round_trip_special_characters() {
        let source = "tab\there \"quoted\" back\\slash /path\nnew\u{8}\u{c}\r";
        assert_eq!(unescape(&escape(source)).unwrap(), source);
    }
}
