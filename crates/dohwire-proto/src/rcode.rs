//! DNS response codes (RCODEs).
//!
//! Response codes indicate the status of a DNS operation.
//! Defined in RFC 1035 Section 4.1.1.

use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS response code, as carried in the four header RCODE bits.
///
/// Values 6-15 are kept as [`ResponseCode::Reserved`]. The upper eight
/// bits of an EDNS0 extended RCODE live in the OPT record and are not
/// merged into this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResponseCode {
    /// No error condition - RFC 1035
    #[default]
    NoError,

    /// Format error - RFC 1035
    ///
    /// The name server was unable to interpret the query.
    FormErr,

    /// Server failure - RFC 1035
    ServFail,

    /// Name error - RFC 1035
    ///
    /// The domain name referenced in the query does not exist.
    NXDomain,

    /// Not implemented - RFC 1035
    NotImp,

    /// Query refused - RFC 1035
    Refused,

    /// Values 6-15, reserved for future use.
    Reserved(u8),
}

impl ResponseCode {
    /// Creates a response code from the low four bits of `value`.
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value & 0x0F {
            0 => Self::NoError,
            1 => Self::FormErr,
            2 => Self::ServFail,
            3 => Self::NXDomain,
            4 => Self::NotImp,
            5 => Self::Refused,
            other => Self::Reserved(other),
        }
    }

    /// Returns the 4-bit value for the header RCODE field.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::NoError => 0,
            Self::FormErr => 1,
            Self::ServFail => 2,
            Self::NXDomain => 3,
            Self::NotImp => 4,
            Self::Refused => 5,
            Self::Reserved(v) => v & 0x0F,
        }
    }

    /// Combines this header RCODE with the extended RCODE of an OPT record
    /// into the full 12-bit response code.
    #[inline]
    pub const fn with_extended(self, extended_rcode: u8) -> u16 {
        (extended_rcode as u16) << 4 | self.to_u8() as u16
    }

    /// Returns true if this response indicates success.
    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::NoError)
    }

    /// Returns true if this response indicates the name does not exist.
    #[inline]
    pub const fn is_nxdomain(self) -> bool {
        matches!(self, Self::NXDomain)
    }

    /// Returns the human-readable name of the response code.
    pub fn name(self) -> std::borrow::Cow<'static, str> {
        match self {
            Self::NoError => "NOERROR".into(),
            Self::FormErr => "FORMERR".into(),
            Self::ServFail => "SERVFAIL".into(),
            Self::NXDomain => "NXDOMAIN".into(),
            Self::NotImp => "NOTIMP".into(),
            Self::Refused => "REFUSED".into(),
            Self::Reserved(v) => format!("RCODE{v}").into(),
        }
    }
}

impl From<u8> for ResponseCode {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
