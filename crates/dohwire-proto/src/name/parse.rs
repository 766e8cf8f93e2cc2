//! DNS name parsing from wire format with compression support.
//!
//! This module handles parsing domain names from DNS wire format,
//! including name compression (RFC 1035 Section 4.1.4).

use super::{Label, Name};
use crate::error::{Error, Result};
use crate::wire::WireReader;
use tracing::trace;

/// Maximum number of compression pointers followed while reading one name.
///
/// Pointers may target any offset, including later ones or themselves, so
/// this bound is what stops a pointer cycle.
pub const MAX_POINTER_DEPTH: usize = 20;

/// Label type in the top two bits of a length octet.
const LABEL_TYPE_NORMAL: u8 = 0b00;
const LABEL_TYPE_POINTER: u8 = 0b11;

/// Parser for reading domain names from DNS wire format.
///
/// This parser handles both uncompressed names and names using compression
/// pointers. It holds the complete message buffer for pointer resolution.
#[derive(Debug, Clone)]
pub struct NameParser<'a> {
    /// The complete message buffer (for compression pointer resolution).
    message: &'a [u8],
}

impl<'a> NameParser<'a> {
    /// Creates a new name parser with the given message buffer.
    #[inline]
    pub const fn new(message: &'a [u8]) -> Self {
        Self { message }
    }

    /// Parses a domain name starting at the given offset.
    ///
    /// Returns the parsed name and the number of bytes it occupies at
    /// `offset`. Bytes reached only through a compression pointer do not
    /// count; a pointer always ends the name at its own position.
    ///
    /// # Errors
    ///
    /// - [`Error::TooManyCompressionJumps`] after more than
    ///   [`MAX_POINTER_DEPTH`] pointers
    /// - [`Error::UnsupportedLabelType`] for `01` and `10` label types
    /// - [`Error::UnexpectedEof`] if a label or pointer runs off the buffer
    pub fn parse_name(&self, offset: usize) -> Result<(Name, usize)> {
        let mut reader = WireReader::at(self.message, offset);
        let mut labels = Vec::new();
        let mut consumed = None;
        let mut depth = 0;

        loop {
            let len_offset = reader.position();
            let len_byte = reader.read_u8()?;

            match len_byte >> 6 {
                LABEL_TYPE_NORMAL => {
                    // Root label - end of name
                    if len_byte == 0 {
                        break;
                    }
                    let bytes = reader.read_bytes(usize::from(len_byte))?;
                    labels.push(Label::from_wire(bytes));
                }
                LABEL_TYPE_POINTER => {
                    let low = reader.read_u8()?;
                    let target = usize::from(u16::from_be_bytes([len_byte & 0x3F, low]));

                    // Only the first pointer ends the name at the original position.
                    if consumed.is_none() {
                        consumed = Some(reader.position() - offset);
                    }

                    depth += 1;
                    if depth > MAX_POINTER_DEPTH {
                        return Err(Error::TooManyCompressionJumps {
                            max_depth: MAX_POINTER_DEPTH,
                        });
                    }

                    trace!(from = len_offset, to = target, depth, "following name pointer");
                    reader.set_position(target);
                }
                label_type => {
                    return Err(Error::UnsupportedLabelType {
                        offset: len_offset,
                        label_type,
                    });
                }
            }
        }

        let consumed = consumed.unwrap_or(reader.position() - offset);
        Ok((Name::from_labels(labels), consumed))
    }

    /// Parses a name and returns only the name (ignoring consumed bytes).
    #[inline]
    pub fn parse(&self, offset: usize) -> Result<Name> {
        self.parse_name(offset).map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_name() {
        let wire = [
            3, b'w', b'w', b'w', 7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm',
            0,
        ];

        let parser = NameParser::new(&wire);
        let (name, consumed) = parser.parse_name(0).unwrap();

        assert_eq!(name.to_string(), "www.example.com");
        assert_eq!(consumed, wire.len());
    }

    #[test]
    fn test_parse_root_name() {
        let parser = NameParser::new(&[0]);
        let (name, consumed) = parser.parse_name(0).unwrap();
        assert!(name.is_root());
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_parse_compressed_name() {
        // At offset 0: example.com.
        // At offset 13: www.<pointer to 0>
        let wire = [
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0, // example.com.
            3, b'w', b'w', b'w', 0xC0, 0x00, // www.<ptr to 0>
        ];

        let parser = NameParser::new(&wire);

        let (name1, consumed1) = parser.parse_name(0).unwrap();
        assert_eq!(name1.to_string(), "example.com");
        assert_eq!(consumed1, 13);

        let (name2, consumed2) = parser.parse_name(13).unwrap();
        assert_eq!(name2.to_string(), "www.example.com");
        assert_eq!(consumed2, 6); // 3 + "www" + 2-byte pointer
    }

    #[test]
    fn test_pointer_only_name() {
        // Two labels at offset 2, a bare pointer to them at offset 15.
        let mut wire = vec![0xFF, 0xFF];
        wire.extend_from_slice(b"\x07example\x03com\x00");
        wire.extend_from_slice(&[0xC0, 0x02]);

        let (name, consumed) = NameParser::new(&wire).parse_name(15).unwrap();
        let labels: Vec<_> = name.labels().iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["example", "com"]);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_chained_pointers() {
        // com. at 0, example.<ptr 0> at 5, www.<ptr 5> at 15
        let wire = [
            3, b'c', b'o', b'm', 0, // 0..5
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0xC0, 0x00, // 5..15
            3, b'w', b'w', b'w', 0xC0, 0x05, // 15..21
        ];

        let (name, consumed) = NameParser::new(&wire).parse_name(15).unwrap();
        assert_eq!(name.to_string(), "www.example.com");
        assert_eq!(consumed, 6);
    }

    #[test]
    fn test_self_pointer_hits_depth_bound() {
        let wire = [0xC0, 0x00];

        let result = NameParser::new(&wire).parse_name(0);
        assert_eq!(
            result,
            Err(Error::TooManyCompressionJumps {
                max_depth: MAX_POINTER_DEPTH
            })
        );
    }

    #[test]
    fn test_pointer_chain_depth_limit() {
        // A chain of pointers, each pointing two bytes back, ending in a root label.
        fn chain(hops: usize) -> (Vec<u8>, usize) {
            let mut wire = vec![0u8];
            for i in 0..hops {
                let target = if i == 0 { 0 } else { 1 + (i - 1) * 2 };
                wire.extend_from_slice(&[0xC0, target as u8]);
            }
            let start = wire.len() - 2;
            (wire, start)
        }

        let (wire, start) = chain(MAX_POINTER_DEPTH);
        let name = NameParser::new(&wire).parse(start).unwrap();
        assert!(name.is_root());

        let (wire, start) = chain(MAX_POINTER_DEPTH + 1);
        assert!(matches!(
            NameParser::new(&wire).parse(start),
            Err(Error::TooManyCompressionJumps { .. })
        ));
    }

    #[test]
    fn test_extended_label_types_rejected() {
        for (byte, label_type) in [(0x41u8, 0b01u8), (0x80, 0b10)] {
            let wire = [byte, 0, 0];
            assert_eq!(
                NameParser::new(&wire).parse_name(0),
                Err(Error::UnsupportedLabelType {
                    offset: 0,
                    label_type
                })
            );
        }
    }

    #[test]
    fn test_truncated_inputs() {
        // Label runs past the end.
        assert!(matches!(
            NameParser::new(&[5, b'a', b'b']).parse_name(0),
            Err(Error::UnexpectedEof { .. })
        ));
        // Missing terminating zero.
        assert!(matches!(
            NameParser::new(&[1, b'a']).parse_name(0),
            Err(Error::UnexpectedEof { .. })
        ));
        // Half a pointer.
        assert!(matches!(
            NameParser::new(&[0xC0]).parse_name(0),
            Err(Error::UnexpectedEof { .. })
        ));
        // Pointer outside the message.
        assert!(matches!(
            NameParser::new(&[0xC0, 0x40]).parse_name(0),
            Err(Error::UnexpectedEof { .. })
        ));
    }
}
