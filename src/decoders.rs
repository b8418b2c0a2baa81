//! Byte input has to be turned into a stream of `char`s before it reaches the lexer. The
//! [DecoderSelector] checks that a buffer is well formed under a given [Encoding], and then
//! instantiates the matching `char` iterator over it. (Currently only ASCII and UTF-8 are
//! supported).
//!
//! The underlying decoders stop yielding characters at the first bad byte, which would look
//! exactly like a clean end of input. Buffers are therefore checked in full before any decoding
//! takes place, and a bad byte is reported along with its position.
use std::io::BufRead;

use chisel_decoders::{ascii::AsciiDecoder, utf8::Utf8Decoder};

use crate::coords::Coords;
use crate::decoder_error;
use crate::errors::{Details, ParserResult};

/// Enumeration of different supported encoding types
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    Ascii,
}

/// Factory for [char] iterators over byte buffers, based on a specified encoding type
#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct DecoderSelector {}

impl DecoderSelector {
    /// Check that every byte within `bytes` is valid for the given encoding. On failure, the
    /// error carries the offending byte and the coordinates of the character it starts
    pub fn validate(&self, bytes: &[u8], encoding: Encoding) -> ParserResult<()> {
        match encoding {
            Encoding::Utf8 => match std::str::from_utf8(bytes) {
                Ok(_) => Ok(()),
                Err(err) => {
                    let index = err.valid_up_to();
                    decoder_error!(
                        Details::NonUtf8InputDetected(bytes[index]),
                        coords_after(&bytes[..index])
                    )
                }
            },
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                None => Ok(()),
                Some(index) => decoder_error!(
                    Details::NonAsciiInputDetected(bytes[index]),
                    coords_after(&bytes[..index])
                ),
            },
        }
    }

    /// Create and return a byte decoder / char iterator for a specific encoding. The buffer
    /// should already have passed [DecoderSelector::validate]
    pub fn new_decoder<'a, Buffer: BufRead>(
        &self,
        buffer: &'a mut Buffer,
        encoding: Encoding,
    ) -> Box<dyn Iterator<Item = char> + 'a> {
        match encoding {
            Encoding::Ascii => Box::new(AsciiDecoder::new(buffer)),
            Encoding::Utf8 => Box::new(Utf8Decoder::new(buffer)),
        }
    }
}

/// Coordinates of the character immediately following a well formed prefix
fn coords_after(prefix: &[u8]) -> Coords {
    let mut coords = Coords::default();
    for c in String::from_utf8_lossy(prefix).chars() {
        coords.advance(c);
    }
    coords.advance(char::REPLACEMENT_CHARACTER);
    coords
}

#[cfg(test)]
mod tests {
    use crate::decoders::{DecoderSelector, Encoding};
    use crate::errors::{Details, Stage};
    use std::io::BufReader;

    #[test]
    fn should_decode_utf8_bytes() {
        let bytes = "{\"t\u{e9}\":\"\u{b0}\"}".as_bytes();
        let selector = DecoderSelector::default();
        assert!(selector.validate(bytes, Encoding::Utf8).is_ok());
        let mut reader = BufReader::new(bytes);
        let decoded: String = selector.new_decoder(&mut reader, Encoding::Utf8).collect();
        assert_eq!(decoded, "{\"t\u{e9}\":\"\u{b0}\"}");
    }

    #[test]
    fn should_decode_ascii_bytes() {
        let mut reader = BufReader::new("[1, 2]".as_bytes());
        let decoded: String = DecoderSelector::default()
            .new_decoder(&mut reader, Encoding::Ascii)
            .collect();
        assert_eq!(decoded, "[1, 2]");
    }

    #[test]
    fn should_locate_invalid_utf8() {
        let selector = DecoderSelector::default();
        let err = selector
            .validate(b"{\"a\":1}\x80", Encoding::Utf8)
            .unwrap_err();
        assert_eq!(err.stage, Stage::Decoder);
        assert_eq!(err.details, Details::NonUtf8InputDetected(0x80));
        let coords = err.coords.unwrap();
        assert_eq!(coords.absolute, 8);
        assert_eq!(coords.column, 8);

        let err = selector
            .validate(b"[\"a\",\n\xFF]", Encoding::Utf8)
            .unwrap_err();
        assert_eq!(err.details, Details::NonUtf8InputDetected(0xFF));
        assert_eq!(err.coords.unwrap().line, 2);
        assert_eq!(err.coords.unwrap().column, 1);

        let truncated = [b'[', b'"', 0xE2, 0x82];
        let err = selector.validate(&truncated, Encoding::Utf8).unwrap_err();
        assert_eq!(err.details, Details::NonUtf8InputDetected(0xE2));
        assert_eq!(err.coords.unwrap().column, 3);
    }

    #[test]
    fn should_reject_non_ascii_bytes_in_ascii_mode() {
        let selector = DecoderSelector::default();
        let source = "[1]\n \u{e9}".as_bytes();
        assert!(selector.validate(source, Encoding::Utf8).is_ok());
        let err = selector.validate(source, Encoding::Ascii).unwrap_err();
        assert_eq!(err.details, Details::NonAsciiInputDetected(0xC3));
        let coords = err.coords.unwrap();
        assert_eq!(coords.line, 2);
        assert_eq!(coords.column, 2);
    }
}
