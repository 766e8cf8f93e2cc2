//! DNS resource records.
//!
//! A resource record (RR) is the fundamental unit of DNS data, containing a
//! name, type, class, TTL, and record-specific data. RDATA is kept as opaque
//! bytes; only A and AAAA payloads have typed accessors.

use crate::class::Class;
use crate::config::ParseConfig;
use crate::edns::OptRecord;
use crate::error::Result;
use crate::name::Name;
use crate::rtype::Type;
use crate::wire::{u16_len, WireReader, WireWriter};
use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// A DNS resource record.
///
/// # Wire Format
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// /                      NAME                     /
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      TYPE                     |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                     CLASS                     |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      TTL                      |
/// |                                               |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                   RDLENGTH                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// /                     RDATA                     /
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// Names embedded in RDATA (CNAME targets, MX exchanges and so on) are not
/// decompressed; a pointer inside `rdata` still refers to the message it
/// was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// The domain name this record is for.
    pub name: Name,
    /// Record type.
    pub rtype: Type,
    /// Record class.
    pub rclass: Class,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Raw record data.
    pub rdata: Vec<u8>,
}

impl ResourceRecord {
    /// Creates a record.
    pub fn new(
        name: Name,
        rtype: impl Into<Type>,
        rclass: impl Into<Class>,
        ttl: u32,
        rdata: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name,
            rtype: rtype.into(),
            rclass: rclass.into(),
            ttl,
            rdata: rdata.into(),
        }
    }

    /// Returns the RDATA length.
    #[inline]
    pub fn rdlength(&self) -> usize {
        self.rdata.len()
    }

    /// Returns the address of an A record with a 4-byte payload.
    pub fn ipv4_addr(&self) -> Option<Ipv4Addr> {
        if !self.rtype.is_a() {
            return None;
        }
        <[u8; 4]>::try_from(self.rdata.as_slice()).ok().map(Ipv4Addr::from)
    }

    /// Returns the address of an AAAA record with a 16-byte payload.
    pub fn ipv6_addr(&self) -> Option<Ipv6Addr> {
        if !self.rtype.is_aaaa() {
            return None;
        }
        <[u8; 16]>::try_from(self.rdata.as_slice()).ok().map(Ipv6Addr::from)
    }

    /// Reads a complete record at the reader's position.
    pub fn read(reader: &mut WireReader<'_>) -> Result<Self> {
        let name = Name::read(reader)?;
        let rtype = Type::from_u16(reader.read_u16()?);
        Self::read_body(name, rtype, reader)
    }

    /// Reads the part of a record that follows its TYPE field.
    pub fn read_body(name: Name, rtype: Type, reader: &mut WireReader<'_>) -> Result<Self> {
        let rclass = Class::from_u16(reader.read_u16()?);
        let ttl = reader.read_u32()?;
        let rdlength = usize::from(reader.read_u16()?);
        let rdata = reader.read_bytes(rdlength)?.to_vec();

        Ok(Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        })
    }

    /// Returns the wire format length (uncompressed).
    pub fn wire_len(&self) -> usize {
        self.name.wire_len() + 10 + self.rdata.len()
    }

    /// Writes the record without name compression.
    pub fn write_to(&self, writer: &mut WireWriter) -> Result<()> {
        self.name.write_to(writer)?;
        writer.write_u16(self.rtype.to_u16())?;
        writer.write_u16(self.rclass.to_u16())?;
        writer.write_u32(self.ttl)?;
        writer.write_u16(u16_len("RDATA", self.rdata.len())?)?;
        writer.write_bytes(&self.rdata)
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.\t{}\t{}\t{}\t", self.name, self.ttl, self.rclass, self.rtype)?;
        if let Some(addr) = self.ipv4_addr() {
            write!(f, "{addr}")
        } else if let Some(addr) = self.ipv6_addr() {
            write!(f, "{addr}")
        } else {
            // RFC 3597 generic presentation.
            write!(f, "\\# {} {}", self.rdata.len(), HEXLOWER.encode(&self.rdata))
        }
    }
}

/// An entry of the additional section: an ordinary record or an OPT
/// pseudo-record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Record {
    /// Any record other than OPT.
    Resource(ResourceRecord),
    /// EDNS(0) OPT pseudo-record.
    Opt(OptRecord),
}

impl Record {
    /// Reads an additional-section record, dispatching on TYPE 41.
    pub fn read(reader: &mut WireReader<'_>, config: &ParseConfig) -> Result<Self> {
        let name = Name::read(reader)?;
        let rtype = Type::from_u16(reader.read_u16()?);

        if rtype.is_opt() {
            OptRecord::read_body(name, reader, config).map(Self::Opt)
        } else {
            ResourceRecord::read_body(name, rtype, reader).map(Self::Resource)
        }
    }

    /// Returns the OPT record, if this is one.
    pub fn as_opt(&self) -> Option<&OptRecord> {
        match self {
            Self::Opt(opt) => Some(opt),
            Self::Resource(_) => None,
        }
    }

    /// Returns the ordinary record, if this is one.
    pub fn as_resource(&self) -> Option<&ResourceRecord> {
        match self {
            Self::Resource(rr) => Some(rr),
            Self::Opt(_) => None,
        }
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        match self {
            Self::Resource(rr) => rr.wire_len(),
            Self::Opt(opt) => opt.wire_len(),
        }
    }
}

impl From<ResourceRecord> for Record {
    fn from(rr: ResourceRecord) -> Self {
        Self::Resource(rr)
    }
}

impl From<OptRecord> for Record {
    fn from(opt: OptRecord) -> Self {
        Self::Opt(opt)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource(rr) => write!(f, "{rr}"),
            Self::Opt(opt) => write!(f, "{opt}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::RecordClass;
    use crate::error::Error;
    use crate::rtype::RecordType;

    fn example() -> Name {
        Name::from_ascii("example.com").unwrap()
    }

    #[test]
    fn test_record_roundtrip() {
        let rr = ResourceRecord::new(
            example(),
            RecordType::TXT,
            RecordClass::IN,
            300,
            b"\x05hello".to_vec(),
        );

        let mut writer = WireWriter::new(64);
        rr.write_to(&mut writer).unwrap();
        assert_eq!(writer.len(), rr.wire_len());

        let mut reader = WireReader::new(writer.as_bytes());
        assert_eq!(ResourceRecord::read(&mut reader).unwrap(), rr);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_address_accessors() {
        let a = ResourceRecord::new(
            example(),
            RecordType::A,
            RecordClass::IN,
            60,
            vec![104, 16, 132, 229],
        );
        assert_eq!(a.ipv4_addr(), Some(Ipv4Addr::new(104, 16, 132, 229)));
        assert_eq!(a.ipv6_addr(), None);
        assert!(a.to_string().ends_with("\t104.16.132.229"));

        let mut octets = [0u8; 16];
        octets[0] = 0x20;
        octets[1] = 0x01;
        octets[15] = 1;
        let aaaa = ResourceRecord::new(example(), RecordType::AAAA, RecordClass::IN, 60, octets);
        assert_eq!(aaaa.ipv6_addr(), Some("2001::1".parse().unwrap()));

        // Wrong length is not an address.
        let short = ResourceRecord::new(example(), RecordType::A, RecordClass::IN, 60, [1, 2, 3]);
        assert_eq!(short.ipv4_addr(), None);
        assert!(short.to_string().ends_with("\\# 3 010203"));
    }

    #[test]
    fn test_rdata_truncated() {
        let mut wire = vec![0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 8];
        wire.extend_from_slice(&[1, 2, 3]);
        assert!(matches!(
            ResourceRecord::read(&mut WireReader::new(&wire)),
            Err(Error::UnexpectedEof { offset: 11, needed: 8 })
        ));
    }

    #[test]
    fn test_additional_dispatch() {
        let config = ParseConfig::default();

        let opt_wire = [0, 0, 41, 0x10, 0, 0, 0, 0x80, 0, 0, 0];
        let record = Record::read(&mut WireReader::new(&opt_wire), &config).unwrap();
        let opt = record.as_opt().unwrap();
        assert_eq!(opt.max_payload_size, 4096);
        assert!(opt.dnssec_ok);

        let a_wire = [0, 0, 1, 0, 1, 0, 0, 0, 5, 0, 4, 1, 2, 3, 4];
        let record = Record::read(&mut WireReader::new(&a_wire), &config).unwrap();
        assert_eq!(
            record.as_resource().and_then(ResourceRecord::ipv4_addr),
            Some(Ipv4Addr::new(1, 2, 3, 4))
        );
    }
}
