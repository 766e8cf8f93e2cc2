//! EDNS(0) support (RFC 6891).
//!
//! The OPT pseudo-record rides in the additional section. Its CLASS field
//! carries the advertised payload size and its TTL field is repurposed to
//! hold the extended RCODE, the EDNS version, the DO bit and 15 reserved
//! bits.

mod padding;

pub use padding::padding_len;

use crate::config::ParseConfig;
use crate::error::{Error, Result};
use crate::name::Name;
use crate::rtype::RecordType;
use crate::wire::{u16_len, WireReader, WireWriter};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use tracing::trace;

/// Length of an option's code and length fields.
pub const OPTION_HEADER_LEN: usize = 4;

const DO_BIT: u16 = 0x8000;
const Z_MASK: u16 = 0x7FFF;

/// EDNS option codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum EdnsOptionCode {
    /// Name Server Identifier (RFC 5001)
    Nsid = 3,
    /// Client Subnet (RFC 7871)
    ClientSubnet = 8,
    /// DNS Cookie (RFC 7873)
    Cookie = 10,
    /// TCP Keepalive (RFC 7828)
    TcpKeepalive = 11,
    /// Padding (RFC 7830)
    Padding = 12,
    /// Extended DNS Error (RFC 8914)
    ExtendedDnsError = 15,
}

impl EdnsOptionCode {
    /// Creates from u16 value.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            3 => Some(Self::Nsid),
            8 => Some(Self::ClientSubnet),
            10 => Some(Self::Cookie),
            11 => Some(Self::TcpKeepalive),
            12 => Some(Self::Padding),
            15 => Some(Self::ExtendedDnsError),
            _ => None,
        }
    }

    /// Returns the short name used in presentation output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nsid => "NSID",
            Self::ClientSubnet => "ECS",
            Self::Cookie => "COOKIE",
            Self::TcpKeepalive => "KEEPALIVE",
            Self::Padding => "PADDING",
            Self::ExtendedDnsError => "EDE",
        }
    }
}

impl From<EdnsOptionCode> for u16 {
    fn from(code: EdnsOptionCode) -> Self {
        code as u16
    }
}

/// A single EDNS option: a code and opaque data.
///
/// Option contents are never interpreted; the length is implied by
/// `data`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdnsOption {
    /// Option code.
    pub code: u16,
    /// Option data.
    pub data: Vec<u8>,
}

impl EdnsOption {
    /// Creates an option.
    #[inline]
    pub fn new(code: u16, data: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            data: data.into(),
        }
    }

    /// Returns the registered code, if this option has one.
    #[inline]
    pub fn known_code(&self) -> Option<EdnsOptionCode> {
        EdnsOptionCode::from_u16(self.code)
    }

    /// Returns the wire format length, header included.
    #[inline]
    pub fn wire_len(&self) -> usize {
        OPTION_HEADER_LEN + self.data.len()
    }

    /// Writes the option.
    pub fn write_to(&self, writer: &mut WireWriter) -> Result<()> {
        writer.write_u16(self.code)?;
        writer.write_u16(u16_len("EDNS option", self.data.len())?)?;
        writer.write_bytes(&self.data)
    }
}

impl fmt::Display for EdnsOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.known_code() {
            Some(code) => write!(f, "{}: {} bytes", code.name(), self.data.len()),
            None => write!(f, "OPT{}: {} bytes", self.code, self.data.len()),
        }
    }
}

/// EDNS(0) OPT pseudo-record.
///
/// # Wire Format
///
/// ```text
/// NAME      root (a single zero byte)
/// TYPE      41
/// CLASS     requestor's payload size
/// TTL       EXTENDED-RCODE(8) | VERSION(8) | DO(1) | Z(15)
/// RDLENGTH  length of all options
/// RDATA     { OPTION-CODE(16) | OPTION-LENGTH(16) | OPTION-DATA } *
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptRecord {
    /// Owner name, the root in every conforming message.
    pub name: Name,
    /// Advertised maximum payload size.
    pub max_payload_size: u16,
    /// Upper eight bits of the extended RCODE.
    pub extended_rcode: u8,
    /// EDNS version.
    pub version: u8,
    /// DNSSEC OK flag.
    pub dnssec_ok: bool,
    /// Reserved 15-bit flags field.
    pub z: u16,
    /// Options in wire order.
    pub options: SmallVec<[EdnsOption; 2]>,
}

impl OptRecord {
    /// Fixed part of the record with a root owner name: name, type, class,
    /// TTL and RDLENGTH.
    pub const FIXED_LEN: usize = 1 + 2 + 2 + 4 + 2;

    /// Creates an OPT record advertising `max_payload_size`, with every
    /// other field zero.
    pub fn new(max_payload_size: u16) -> Self {
        Self {
            name: Name::root(),
            max_payload_size,
            extended_rcode: 0,
            version: 0,
            dnssec_ok: false,
            z: 0,
            options: SmallVec::new(),
        }
    }

    /// Packs extended RCODE, version, DO and Z into the TTL field.
    pub fn ttl(&self) -> u32 {
        let flags = (if self.dnssec_ok { DO_BIT } else { 0 }) | (self.z & Z_MASK);
        u32::from(self.extended_rcode) << 24 | u32::from(self.version) << 16 | u32::from(flags)
    }

    /// Unpacks a TTL field into this record's extended RCODE, version, DO and Z.
    pub fn set_ttl(&mut self, ttl: u32) {
        let [extended_rcode, version, hi, lo] = ttl.to_be_bytes();
        let flags = u16::from_be_bytes([hi, lo]);
        self.extended_rcode = extended_rcode;
        self.version = version;
        self.dnssec_ok = flags & DO_BIT != 0;
        self.z = flags & Z_MASK;
    }

    /// Returns the total length of the encoded options.
    pub fn options_len(&self) -> usize {
        self.options.iter().map(EdnsOption::wire_len).sum()
    }

    /// Returns the wire format length of the whole record.
    pub fn wire_len(&self) -> usize {
        self.name.wire_len() + 10 + self.options_len()
    }

    /// Returns the first option with the given code.
    pub fn option(&self, code: u16) -> Option<&EdnsOption> {
        self.options.iter().find(|o| o.code == code)
    }

    /// Reads the part of an OPT record that follows its TYPE field.
    ///
    /// Options are read until their combined length reaches RDLENGTH.
    /// Padding options are dropped unless `config.retain_padding` is set.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOptOption`] when an option header or its data would
    /// cross the end of the RDATA, [`Error::UnexpectedEof`] when the RDATA
    /// itself runs past the message.
    pub fn read_body(
        name: Name,
        reader: &mut WireReader<'_>,
        config: &ParseConfig,
    ) -> Result<Self> {
        let mut record = Self::new(reader.read_u16()?);
        record.name = name;
        record.set_ttl(reader.read_u32()?);

        let rdlength = usize::from(reader.read_u16()?);
        let rdata_start = reader.position();
        let mut rdata = WireReader::new(reader.read_bytes(rdlength)?);

        while !rdata.is_empty() {
            let offset = rdata_start + rdata.position();
            let invalid = |_| Error::InvalidOptOption { offset };

            let code = rdata.read_u16().map_err(invalid)?;
            let len = rdata.read_u16().map_err(invalid)?;
            let data = rdata.read_bytes(usize::from(len)).map_err(invalid)?;

            let option = EdnsOption::new(code, data);
            if option.is_padding() && !config.retain_padding {
                trace!(offset, len, "dropping padding option");
                continue;
            }
            record.options.push(option);
        }

        Ok(record)
    }

    /// Writes the record, appending `extra` after its own options inside
    /// the RDATA.
    pub fn write_to(&self, writer: &mut WireWriter, extra: Option<&EdnsOption>) -> Result<()> {
        let rdlength = self.options_len() + extra.map_or(0, EdnsOption::wire_len);

        self.name.write_to(writer)?;
        writer.write_u16(RecordType::OPT.to_u16())?;
        writer.write_u16(self.max_payload_size)?;
        writer.write_u32(self.ttl())?;
        writer.write_u16(u16_len("OPT RDATA", rdlength)?)?;
        for option in self.options.iter().chain(extra) {
            option.write_to(writer)?;
        }
        Ok(())
    }
}

impl Default for OptRecord {
    fn default() -> Self {
        Self::new(crate::DEFAULT_MAX_PAYLOAD_SIZE)
    }
}

impl fmt::Display for OptRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EDNS(version={}, udp={}, dnssec_ok={}, ext_rcode={}, z={:#06x})",
            self.version, self.max_payload_size, self.dnssec_ok, self.extended_rcode, self.z
        )?;

        for option in &self.options {
            write!(f, " [{option}]")?;
        }

        Ok(())
    }
}
