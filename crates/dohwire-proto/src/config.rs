//! Codec policies.
//!
//! Parsing and serialization are pure functions of their input and one of
//! these small configuration values. Both deserialize from any serde format
//! with every field optional.

use crate::DEFAULT_PADDING_BLOCK;
use serde::{Deserialize, Serialize};

/// What to do when bytes remain after the last section has been parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingData {
    /// Log a warning and return the parsed message.
    #[default]
    Lenient,
    /// Fail with [`crate::Error::TrailingData`].
    Strict,
}

/// Options for [`crate::Message::parse_with`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Trailing byte policy.
    pub trailing_data: TrailingData,

    /// Keep EDNS padding options in parsed OPT records instead of
    /// dropping them.
    pub retain_padding: bool,
}

impl ParseConfig {
    /// A configuration that rejects trailing bytes.
    pub fn strict() -> Self {
        Self {
            trailing_data: TrailingData::Strict,
            ..Self::default()
        }
    }
}

/// EDNS(0) padding applied when serializing a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingPolicy {
    /// Never add a padding option.
    None,
    /// Pad the message to a multiple of the given block length (RFC 8467).
    Block(u16),
}

impl PaddingPolicy {
    /// Returns the block length, or `None` when padding is off.
    ///
    /// A block length below 2 cannot change the message length and is
    /// treated as off.
    pub fn block_len(self) -> Option<usize> {
        match self {
            Self::Block(block) if block > 1 => Some(usize::from(block)),
            _ => None,
        }
    }
}

impl Default for PaddingPolicy {
    fn default() -> Self {
        Self::Block(DEFAULT_PADDING_BLOCK)
    }
}

/// Options for [`crate::Message::serialize_query_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializeConfig {
    /// Padding policy.
    pub padding: PaddingPolicy,

    /// Upper bound on the serialized message, padding included.
    pub max_message_size: usize,
}

impl SerializeConfig {
    /// A configuration that never pads.
    pub fn unpadded() -> Self {
        Self {
            padding: PaddingPolicy::None,
            ..Self::default()
        }
    }
}

impl Default for SerializeConfig {
    fn default() -> Self {
        Self {
            padding: PaddingPolicy::default(),
            max_message_size: usize::from(u16::MAX),
        }
    }
}
