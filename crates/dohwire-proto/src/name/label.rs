//! DNS label handling.
//!
//! A label is a single component of a domain name, 1 to 63 bytes long.

use crate::error::{Error, Result};
use crate::MAX_LABEL_LENGTH;
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single DNS label (component of a domain name).
///
/// Labels built from text go through [`Label::from_ascii`], which only admits
/// LDH labels (`[0-9a-z-]`, no leading or trailing hyphen). Labels read off
/// the wire are taken verbatim and may contain any byte.
#[derive(Clone)]
pub struct Label {
    /// The raw bytes of the label (without length prefix).
    bytes: SmallVec<[u8; 24]>,
}

impl Label {
    /// Creates a label from raw wire bytes without validating its content.
    ///
    /// The caller guarantees the length is within 1..=63, which holds for
    /// anything read through a 6-bit length octet.
    #[inline]
    pub(crate) fn from_wire(bytes: &[u8]) -> Self {
        Self {
            bytes: SmallVec::from_slice(bytes),
        }
    }

    /// Creates a label from an ASCII string, validating it.
    ///
    /// # Errors
    ///
    /// Fails if the label is empty or longer than 63 bytes, starts or ends
    /// with `-`, or contains anything other than digits, lowercase ASCII
    /// letters and `-`.
    pub fn from_ascii(label: &str) -> Result<Self> {
        if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
            return Err(Error::invalid_label_length(label, label.len()));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::InvalidLabelHyphen {
                label: label.to_owned(),
            });
        }

        if let Some(character) = label
            .chars()
            .find(|c| !(c.is_ascii_digit() || c.is_ascii_lowercase() || *c == '-'))
        {
            return Err(Error::InvalidLabelChar {
                label: label.to_owned(),
                character,
            });
        }

        Ok(Self::from_wire(label.as_bytes()))
    }

    /// Returns the raw bytes of the label.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the length of the label in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the label holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Case-insensitive comparison with another label.
    #[inline]
    pub fn eq_ignore_ascii_case(&self, other: &Label) -> bool {
        self.bytes.eq_ignore_ascii_case(&other.bytes)
    }
}

impl fmt::Display for Label {
    /// Renders every byte as the Latin-1 code point of the same value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.bytes {
            write!(f, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label(\"{}\")", self.to_string().escape_debug())
    }
}

impl PartialEq for Label {
    /// Case-insensitive equality per DNS semantics.
    fn eq(&self, other: &Self) -> bool {
        self.eq_ignore_ascii_case(other)
    }
}

impl Eq for Label {}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.bytes.len());
        for byte in &self.bytes {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}
