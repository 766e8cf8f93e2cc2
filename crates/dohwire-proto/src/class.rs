//! DNS record classes.
//!
//! IN is used almost exclusively; the others are kept for display.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// DNS record class.
///
/// See RFC 1035 Section 3.2.4.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u16)]
pub enum RecordClass {
    /// Internet - RFC 1035
    IN = 1,

    /// CHAOS - RFC 1035
    CH = 3,

    /// Hesiod - RFC 1035
    HS = 4,

    /// Query class: NONE - RFC 2136
    NONE = 254,

    /// Query class: ANY - RFC 1035
    ANY = 255,
}

impl RecordClass {
    /// Returns the numeric value of the class.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Creates a class from its numeric value.
    #[inline]
    pub fn from_u16(value: u16) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Returns the mnemonic of the class.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IN => "IN",
            Self::CH => "CH",
            Self::HS => "HS",
            Self::NONE => "NONE",
            Self::ANY => "ANY",
        }
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Default for RecordClass {
    fn default() -> Self {
        Self::IN
    }
}

/// A class value that can represent both registered classes and unknown values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    /// A registered class.
    Known(RecordClass),
    /// An unknown class value (CLASS#### format per RFC 3597).
    Unknown(u16),
}

impl Class {
    /// Creates a class from a u16 value.
    #[inline]
    pub fn from_u16(value: u16) -> Self {
        RecordClass::from_u16(value).map_or(Self::Unknown(value), Self::Known)
    }

    /// Returns the numeric value.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::Known(c) => c.to_u16(),
            Self::Unknown(v) => v,
        }
    }

    /// Returns true for the Internet class.
    #[inline]
    pub const fn is_in(self) -> bool {
        matches!(self, Self::Known(RecordClass::IN))
    }
}

impl From<RecordClass> for Class {
    fn from(c: RecordClass) -> Self {
        Self::Known(c)
    }
}

impl From<u16> for Class {
    fn from(value: u16) -> Self {
        Self::from_u16(value)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(c) => write!(f, "{c}"),
            Self::Unknown(v) => write!(f, "CLASS{v}"),
        }
    }
}

impl Default for Class {
    fn default() -> Self {
        Self::Known(RecordClass::IN)
    }
}

/// Error returned when a class string is neither a mnemonic nor a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown record class \"{0}\"")]
pub struct ParseClassError(pub String);

impl FromStr for Class {
    type Err = ParseClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let known = [
            RecordClass::IN,
            RecordClass::CH,
            RecordClass::HS,
            RecordClass::NONE,
            RecordClass::ANY,
        ];
        if let Some(c) = known.into_iter().find(|c| c.name().eq_ignore_ascii_case(s)) {
            return Ok(Self::Known(c));
        }
        let digits = s
            .get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("CLASS"))
            .map_or(s, |_| &s[5..]);
        digits
            .parse::<u16>()
            .map(Self::from_u16)
            .map_err(|_| ParseClassError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_values() {
        assert_eq!(RecordClass::IN.to_u16(), 1);
        assert_eq!(RecordClass::ANY.to_u16(), 255);
        assert_eq!(Class::from_u16(1), Class::Known(RecordClass::IN));
        assert_eq!(Class::from_u16(4096), Class::Unknown(4096));
        assert_eq!(Class::Unknown(4096).to_u16(), 4096);
        assert!(Class::default().is_in());
    }

    #[test]
    fn test_class_from_str() {
        assert_eq!("in".parse::<Class>().unwrap(), Class::Known(RecordClass::IN));
        assert_eq!("CLASS4096".parse::<Class>().unwrap(), Class::Unknown(4096));
        assert_eq!("3".parse::<Class>().unwrap(), Class::Known(RecordClass::CH));
        assert!("XX".parse::<Class>().is_err());
        assert_eq!(Class::Unknown(7).to_string(), "CLASS7");
    }
}
