//! DNS domain name representation and operations.
//!
//! This module provides:
//!
//! - [`Name`], an owned sequence of [`Label`]s
//! - strict construction from ASCII text ([`Name::from_ascii`])
//! - permissive wire parsing with compression pointers ([`NameParser`])
//! - uncompressed wire serialization

mod label;
mod parse;

pub use label::Label;
pub use parse::{NameParser, MAX_POINTER_DEPTH};

use crate::error::{Error, Result};
use crate::wire::{WireReader, WireWriter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A DNS domain name.
///
/// A name is an ordered list of labels, leftmost first. The root name has no
/// labels; the terminating zero-length label of the wire format is implicit.
///
/// # Wire Format
///
/// Each label is written as a length byte followed by its bytes, and the name
/// ends with a zero byte. `www.example.com` is encoded as:
///
/// ```text
/// 03 'w' 'w' 'w' 07 'e' 'x' 'a' 'm' 'p' 'l' 'e' 03 'c' 'o' 'm' 00
/// ```
///
/// Names are always written uncompressed. When reading, a length byte with
/// the top two bits set is a pointer to an earlier occurrence of the rest of
/// the name; see [`NameParser`].
///
/// # Example
///
/// ```rust
/// use dohwire_proto::name::Name;
///
/// let name = Name::from_ascii("www.example.com").unwrap();
/// assert_eq!(name.label_count(), 3);
/// assert_eq!(name.to_string(), "www.example.com");
/// assert_eq!(name.wire_len(), 17);
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    labels: Vec<Label>,
}

impl Name {
    /// Creates the root name (no labels).
    #[inline]
    pub const fn root() -> Self {
        Self { labels: Vec::new() }
    }

    /// Creates a name from already validated or wire-read labels.
    #[inline]
    pub fn from_labels(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    /// Builds a name from a dotted ASCII string.
    ///
    /// Empty labels are dropped, so leading, trailing and doubled dots
    /// collapse silently. Each remaining label must be 1 to 63 characters of
    /// `[0-9a-z-]` and may not start or end with a hyphen.
    ///
    /// The input is expected to be ASCII already; Unicode names must be
    /// converted to their punycode form before they reach this function.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending label.
    pub fn from_ascii(s: &str) -> Result<Self> {
        let labels = s
            .split('.')
            .filter(|label| !label.is_empty())
            .map(Label::from_ascii)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { labels })
    }

    /// Returns the labels of the name, leftmost first.
    #[inline]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the number of labels (the root label is not counted).
    #[inline]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if this is the root name.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the uncompressed wire format length, terminating zero included.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| 1 + l.len()).sum::<usize>() + 1
    }

    /// Reads a possibly compressed name at the reader's position and advances
    /// the reader past it.
    pub fn read(reader: &mut WireReader<'_>) -> Result<Self> {
        let start = reader.position();
        let (name, consumed) = NameParser::new(reader.data()).parse_name(start)?;
        reader.set_position(start + consumed);
        Ok(name)
    }

    /// Writes the name without compression.
    pub fn write_to(&self, writer: &mut WireWriter) -> Result<()> {
        for label in &self.labels {
            // Labels are at most 63 bytes, so this never truncates.
            writer.write_u8(label.len() as u8)?;
            writer.write_bytes(label.as_bytes())?;
        }
        writer.write_u8(0)
    }
}

impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_ascii(s)
    }
}

impl fmt::Display for Name {
    /// Joins the labels with `.`; the root name renders as an empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{label}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name(\"{}\")", self.to_string().escape_debug())
    }
}

impl From<Vec<Label>> for Name {
    fn from(labels: Vec<Label>) -> Self {
        Self::from_labels(labels)
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_ascii(&s).map_err(serde::de::Error::custom)
    }
}
