//! DNS message header.
//!
//! The DNS header is a fixed 12-byte structure at the start of every DNS message.
//! It contains control information and counts of the sections that follow.

use crate::error::Result;
use crate::opcode::OpCode;
use crate::rcode::ResponseCode;
use crate::wire::{WireReader, WireWriter};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the DNS header in bytes.
pub const HEADER_SIZE: usize = 12;

const OPCODE_SHIFT: u16 = 11;
const Z_SHIFT: u16 = 4;
const Z_MASK: u16 = 0x0070;
const RCODE_MASK: u16 = 0x000F;

bitflags! {
    /// Single-bit DNS header flags.
    ///
    /// The 3-bit Z field, OPCODE and RCODE share the same 16-bit word but
    /// are carried separately on [`Header`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct HeaderFlags: u16 {
        /// Query/Response flag: 0 = query, 1 = response
        const QR = 0x8000;

        /// Authoritative Answer: server is authoritative for the domain
        const AA = 0x0400;

        /// Truncation: message was truncated
        const TC = 0x0200;

        /// Recursion Desired: client wants recursive resolution
        const RD = 0x0100;

        /// Recursion Available: server supports recursion
        const RA = 0x0080;
    }
}

impl Default for HeaderFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// DNS message header.
///
/// # Wire Format
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    QDCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ANCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    NSCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ARCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// The counts hold whatever the wire said after a parse. When a message is
/// serialized they are ignored and recomputed from the section lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Message identifier for matching requests to responses.
    pub id: u16,

    /// Single-bit flags.
    pub flags: HeaderFlags,

    /// Operation code.
    pub opcode: OpCode,

    /// Reserved 3-bit field, zero in conforming messages.
    pub z: u8,

    /// Response code (low four bits only).
    pub rcode: ResponseCode,

    /// Number of questions.
    pub qd_count: u16,

    /// Number of answer records.
    pub an_count: u16,

    /// Number of authority records.
    pub ns_count: u16,

    /// Number of additional records.
    pub ar_count: u16,
}

impl Header {
    /// Creates a new header with the given message ID and everything else zero.
    #[inline]
    pub const fn new(id: u16) -> Self {
        Self {
            id,
            flags: HeaderFlags::empty(),
            opcode: OpCode::Query,
            z: 0,
            rcode: ResponseCode::NoError,
            qd_count: 0,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Returns true if this is a query (QR = 0).
    #[inline]
    pub fn is_query(&self) -> bool {
        !self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if this is a response (QR = 1).
    #[inline]
    pub fn is_response(&self) -> bool {
        self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if the answer is authoritative.
    #[inline]
    pub fn is_authoritative(&self) -> bool {
        self.flags.contains(HeaderFlags::AA)
    }

    /// Returns true if the message was truncated.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.flags.contains(HeaderFlags::TC)
    }

    /// Returns true if recursion is desired.
    #[inline]
    pub fn recursion_desired(&self) -> bool {
        self.flags.contains(HeaderFlags::RD)
    }

    /// Returns true if recursion is available.
    #[inline]
    pub fn recursion_available(&self) -> bool {
        self.flags.contains(HeaderFlags::RA)
    }

    /// Sets the QR bit.
    #[inline]
    pub fn set_response(&mut self, response: bool) {
        self.flags.set(HeaderFlags::QR, response);
    }

    /// Sets the AA bit.
    #[inline]
    pub fn set_authoritative(&mut self, aa: bool) {
        self.flags.set(HeaderFlags::AA, aa);
    }

    /// Sets the TC bit.
    #[inline]
    pub fn set_truncated(&mut self, tc: bool) {
        self.flags.set(HeaderFlags::TC, tc);
    }

    /// Sets the RD bit.
    #[inline]
    pub fn set_recursion_desired(&mut self, rd: bool) {
        self.flags.set(HeaderFlags::RD, rd);
    }

    /// Sets the RA bit.
    #[inline]
    pub fn set_recursion_available(&mut self, ra: bool) {
        self.flags.set(HeaderFlags::RA, ra);
    }

    /// Packs flags, opcode, z and rcode into the second header word.
    pub fn flags_word(&self) -> u16 {
        self.flags.bits()
            | u16::from(self.opcode.to_u8()) << OPCODE_SHIFT
            | (u16::from(self.z) << Z_SHIFT) & Z_MASK
            | u16::from(self.rcode.to_u8())
    }

    /// Splits the second header word into its fields.
    ///
    /// Returns the single-bit flags, opcode, z and rcode.
    pub fn unpack_flags_word(word: u16) -> (HeaderFlags, OpCode, u8, ResponseCode) {
        let flags = HeaderFlags::from_bits_truncate(word);
        // Both casts keep only the masked bits.
        let opcode = OpCode::from_u8((word >> OPCODE_SHIFT) as u8);
        let z = ((word & Z_MASK) >> Z_SHIFT) as u8;
        let rcode = ResponseCode::from_u8((word & RCODE_MASK) as u8);
        (flags, opcode, z, rcode)
    }

    /// Reads a header from the reader.
    pub fn read(reader: &mut WireReader<'_>) -> Result<Self> {
        let id = reader.read_u16()?;
        let (flags, opcode, z, rcode) = Self::unpack_flags_word(reader.read_u16()?);

        Ok(Self {
            id,
            flags,
            opcode,
            z,
            rcode,
            qd_count: reader.read_u16()?,
            an_count: reader.read_u16()?,
            ns_count: reader.read_u16()?,
            ar_count: reader.read_u16()?,
        })
    }

    /// Parses a header from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::read(&mut WireReader::new(data))
    }

    /// Writes the header with the stored counts.
    pub fn write_to(&self, writer: &mut WireWriter) -> Result<()> {
        writer.write_u16(self.id)?;
        writer.write_u16(self.flags_word())?;
        writer.write_u16(self.qd_count)?;
        writer.write_u16(self.an_count)?;
        writer.write_u16(self.ns_count)?;
        writer.write_u16(self.ar_count)
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID:{:04X} {} {} {}",
            self.id,
            if self.is_query() { "QUERY" } else { "RESPONSE" },
            self.opcode,
            self.rcode
        )?;

        for (flag, name) in [
            (HeaderFlags::QR, "qr"),
            (HeaderFlags::AA, "aa"),
            (HeaderFlags::TC, "tc"),
            (HeaderFlags::RD, "rd"),
            (HeaderFlags::RA, "ra"),
        ] {
            if self.flags.contains(flag) {
                write!(f, " {name}")?;
            }
        }
        if self.z != 0 {
            write!(f, " z={}", self.z)?;
        }

        write!(
            f,
            " QD:{} AN:{} NS:{} AR:{}",
            self.qd_count, self.an_count, self.ns_count, self.ar_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_header_roundtrip() {
        let mut header = Header::new(0x1234);
        header.set_recursion_desired(true);
        header.qd_count = 1;
        header.ar_count = 1;

        let mut writer = WireWriter::new(HEADER_SIZE);
        header.write_to(&mut writer).unwrap();
        assert_eq!(
            writer.as_bytes(),
            &[0x12, 0x34, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 1]
        );

        let parsed = Header::parse(writer.as_bytes()).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_all_flag_combinations() {
        let bits = [
            HeaderFlags::QR,
            HeaderFlags::AA,
            HeaderFlags::TC,
            HeaderFlags::RD,
            HeaderFlags::RA,
        ];
        for mask in 0u8..32 {
            let mut flags = HeaderFlags::empty();
            for (i, bit) in bits.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    flags |= *bit;
                }
            }
            let mut header = Header::new(7);
            header.flags = flags;

            let (parsed, _, _, _) = Header::unpack_flags_word(header.flags_word());
            assert_eq!(parsed, flags);
        }
    }

    #[test]
    fn test_opcode_and_rcode_bits() {
        for value in 0..16u8 {
            let mut header = Header::new(0);
            header.opcode = OpCode::from_u8(value);
            header.rcode = ResponseCode::from_u8(15 - value);
            header.flags = HeaderFlags::QR | HeaderFlags::RA;

            let word = header.flags_word();
            assert_eq!(word >> 11 & 0x0F, u16::from(value));
            assert_eq!(word & 0x0F, u16::from(15 - value));

            let (flags, opcode, z, rcode) = Header::unpack_flags_word(word);
            assert_eq!(flags, header.flags);
            assert_eq!(opcode.to_u8(), value);
            assert_eq!(z, 0);
            assert_eq!(rcode.to_u8(), 15 - value);
        }
    }

    #[test]
    fn test_z_bits_preserved() {
        // QR=1, RD=1, RA=1, Z=0b101, RCODE=3
        let word = 0x8000 | 0x0100 | 0x0080 | 0x0050 | 0x0003;
        let (flags, opcode, z, rcode) = Header::unpack_flags_word(word);
        assert_eq!(flags, HeaderFlags::QR | HeaderFlags::RD | HeaderFlags::RA);
        assert_eq!(opcode, OpCode::Query);
        assert_eq!(z, 0b101);
        assert_eq!(rcode, ResponseCode::NXDomain);

        let header = Header {
            flags,
            opcode,
            z,
            rcode,
            ..Header::new(0)
        };
        assert_eq!(header.flags_word(), word);
    }

    #[test]
    fn test_header_parse_too_short() {
        let result = Header::parse(&[0; 10]);
        assert!(matches!(result, Err(Error::UnexpectedEof { offset: 10, .. })));
    }

    #[test]
    fn test_header_display() {
        let mut header = Header::new(0xABCD);
        header.set_response(true);
        header.set_recursion_desired(true);

        let display = header.to_string();
        assert!(display.contains("ABCD"));
        assert!(display.contains("RESPONSE"));
        assert!(display.contains("QUERY NOERROR"));
        assert!(display.contains(" rd"));
    }
}
