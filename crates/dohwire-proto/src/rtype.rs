//! DNS record types.
//!
//! The registry below covers the types a stub client commonly asks for.
//! Anything else is carried as [`Type::Unknown`] and round-trips unchanged.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// DNS record type.
///
/// See RFC 1035, RFC 3596, RFC 6891, RFC 9460.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u16)]
pub enum RecordType {
    // =========================================================================
    // Standard Record Types (RFC 1035)
    // =========================================================================
    /// IPv4 address - RFC 1035
    A = 1,

    /// Authoritative name server - RFC 1035
    NS = 2,

    /// Canonical name (alias) - RFC 1035
    CNAME = 5,

    /// Start of authority - RFC 1035
    SOA = 6,

    /// Domain name pointer - RFC 1035
    PTR = 12,

    /// Mail exchange - RFC 1035
    MX = 15,

    /// Text strings - RFC 1035
    TXT = 16,

    // =========================================================================
    // Later Additions
    // =========================================================================
    /// IPv6 address - RFC 3596
    AAAA = 28,

    /// Service locator - RFC 2782
    SRV = 33,

    /// EDNS(0) pseudo-record - RFC 6891
    OPT = 41,

    /// Delegation signer - RFC 4034
    DS = 43,

    /// DNSSEC signature - RFC 4034
    RRSIG = 46,

    /// DNSSEC public key - RFC 4034
    DNSKEY = 48,

    /// Service binding - RFC 9460
    SVCB = 64,

    /// HTTPS service binding - RFC 9460
    HTTPS = 65,

    /// Any record type (query only) - RFC 1035
    ANY = 255,

    /// Certification Authority Authorization - RFC 8659
    CAA = 257,
}

impl RecordType {
    /// Returns the numeric value of the record type.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Creates a record type from its numeric value.
    #[inline]
    pub fn from_u16(value: u16) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Returns the mnemonic used in zone files and presentation format.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::NS => "NS",
            Self::CNAME => "CNAME",
            Self::SOA => "SOA",
            Self::PTR => "PTR",
            Self::MX => "MX",
            Self::TXT => "TXT",
            Self::AAAA => "AAAA",
            Self::SRV => "SRV",
            Self::OPT => "OPT",
            Self::DS => "DS",
            Self::RRSIG => "RRSIG",
            Self::DNSKEY => "DNSKEY",
            Self::SVCB => "SVCB",
            Self::HTTPS => "HTTPS",
            Self::ANY => "ANY",
            Self::CAA => "CAA",
        }
    }

    /// Looks up a record type by mnemonic, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        const ALL: [RecordType; 17] = [
            RecordType::A,
            RecordType::NS,
            RecordType::CNAME,
            RecordType::SOA,
            RecordType::PTR,
            RecordType::MX,
            RecordType::TXT,
            RecordType::AAAA,
            RecordType::SRV,
            RecordType::OPT,
            RecordType::DS,
            RecordType::RRSIG,
            RecordType::DNSKEY,
            RecordType::SVCB,
            RecordType::HTTPS,
            RecordType::ANY,
            RecordType::CAA,
        ];
        ALL.into_iter().find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Default for RecordType {
    fn default() -> Self {
        Self::A
    }
}

/// A type value that can represent both registered types and unknown values.
///
/// Parsing never fails on an unfamiliar type code; it lands in
/// [`Type::Unknown`] and is written back as the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
    /// A registered record type.
    Known(RecordType),
    /// An unknown type value (TYPE#### format per RFC 3597).
    Unknown(u16),
}

impl Type {
    /// Creates a type from a u16 value.
    #[inline]
    pub fn from_u16(value: u16) -> Self {
        RecordType::from_u16(value).map_or(Self::Unknown(value), Self::Known)
    }

    /// Returns the numeric value.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::Known(t) => t.to_u16(),
            Self::Unknown(v) => v,
        }
    }

    /// Returns the registered type if known.
    #[inline]
    pub const fn as_known(self) -> Option<RecordType> {
        match self {
            Self::Known(t) => Some(t),
            Self::Unknown(_) => None,
        }
    }

    /// Returns true if this is an A record type.
    #[inline]
    pub const fn is_a(self) -> bool {
        matches!(self, Self::Known(RecordType::A))
    }

    /// Returns true if this is an AAAA record type.
    #[inline]
    pub const fn is_aaaa(self) -> bool {
        matches!(self, Self::Known(RecordType::AAAA))
    }

    /// Returns true if this is the OPT pseudo-type.
    #[inline]
    pub const fn is_opt(self) -> bool {
        self.to_u16() == RecordType::OPT as u16
    }
}

impl From<RecordType> for Type {
    fn from(t: RecordType) -> Self {
        Self::Known(t)
    }
}

impl From<u16> for Type {
    fn from(value: u16) -> Self {
        Self::from_u16(value)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(t) => write!(f, "{t}"),
            Self::Unknown(v) => write!(f, "TYPE{v}"),
        }
    }
}

impl Default for Type {
    fn default() -> Self {
        Self::Known(RecordType::A)
    }
}

/// Error returned when a type string is neither a mnemonic nor a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown record type \"{0}\"")]
pub struct ParseTypeError(pub String);

impl FromStr for Type {
    type Err = ParseTypeError;

    /// Accepts a mnemonic (`AAAA`), an RFC 3597 `TYPE####` form, or a bare
    /// number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(t) = RecordType::from_name(s) {
            return Ok(Self::Known(t));
        }
        let digits = s
            .get(..4)
            .filter(|prefix| prefix.eq_ignore_ascii_case("TYPE"))
            .map_or(s, |_| &s[4..]);
        digits
            .parse::<u16>()
            .map(Self::from_u16)
            .map_err(|_| ParseTypeError(s.to_owned()))
    }
}
