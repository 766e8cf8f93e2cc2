//! DNS question section.
//!
//! The question section contains queries for information.
//! Each question has a domain name, query type, and query class.

use crate::class::{Class, RecordClass};
use crate::error::Result;
use crate::name::Name;
use crate::rtype::{RecordType, Type};
use crate::wire::{WireReader, WireWriter};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A DNS question.
///
/// # Wire Format
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// /                     QNAME                     /
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                     QTYPE                     |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                     QCLASS                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    /// The domain name being queried.
    pub qname: Name,

    /// The type of record being requested.
    pub qtype: Type,

    /// The class of the query (usually IN for Internet).
    pub qclass: Class,
}

impl Question {
    /// Creates a new question.
    #[inline]
    pub fn new(qname: Name, qtype: RecordType, qclass: RecordClass) -> Self {
        Self {
            qname,
            qtype: Type::Known(qtype),
            qclass: Class::Known(qclass),
        }
    }

    /// Creates a new question with generic type and class.
    #[inline]
    pub fn new_generic(qname: Name, qtype: Type, qclass: Class) -> Self {
        Self { qname, qtype, qclass }
    }

    /// Creates an A record question in class IN.
    #[inline]
    pub fn a(name: Name) -> Self {
        Self::new(name, RecordType::A, RecordClass::IN)
    }

    /// Creates an AAAA record question in class IN.
    #[inline]
    pub fn aaaa(name: Name) -> Self {
        Self::new(name, RecordType::AAAA, RecordClass::IN)
    }

    /// Reads a question at the reader's position.
    pub fn read(reader: &mut WireReader<'_>) -> Result<Self> {
        let qname = Name::read(reader)?;
        let qtype = Type::from_u16(reader.read_u16()?);
        let qclass = Class::from_u16(reader.read_u16()?);
        Ok(Self { qname, qtype, qclass })
    }

    /// Returns the wire format length.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.qname.wire_len() + 4
    }

    /// Writes the question with an uncompressed name.
    pub fn write_to(&self, writer: &mut WireWriter) -> Result<()> {
        self.qname.write_to(writer)?;
        writer.write_u16(self.qtype.to_u16())?;
        writer.write_u16(self.qclass.to_u16())
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.\t{}\t{}", self.qname, self.qclass, self.qtype)
    }
}
