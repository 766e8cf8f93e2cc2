//! DNS operation codes (OpCodes).
//!
//! OpCodes specify the kind of query in a DNS message header.
//! Defined in RFC 1035 Section 4.1.1.

use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS operation code.
///
/// The OPCODE field is four bits wide. Values without an assigned meaning
/// are kept as [`OpCode::Reserved`] so every header round-trips unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OpCode {
    /// Standard query (QUERY) - RFC 1035
    #[default]
    Query,

    /// Inverse query (IQUERY) - RFC 1035 (obsoleted by RFC 3425)
    IQuery,

    /// Server status request (STATUS) - RFC 1035
    Status,

    /// Values 3-15, reserved for future use.
    Reserved(u8),
}

impl OpCode {
    /// Creates an opcode from the low four bits of `value`.
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value & 0x0F {
            0 => Self::Query,
            1 => Self::IQuery,
            2 => Self::Status,
            other => Self::Reserved(other),
        }
    }

    /// Returns the 4-bit numeric value of the opcode.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Query => 0,
            Self::IQuery => 1,
            Self::Status => 2,
            Self::Reserved(v) => v & 0x0F,
        }
    }

    /// Returns true for opcodes assigned by RFC 1035.
    #[inline]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Reserved(_))
    }
}

impl From<u8> for OpCode {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => f.write_str("QUERY"),
            Self::IQuery => f.write_str("IQUERY"),
            Self::Status => f.write_str("STATUS"),
            Self::Reserved(v) => write!(f, "OPCODE{v}"),
        }
    }
}
