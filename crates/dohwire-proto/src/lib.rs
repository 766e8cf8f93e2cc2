//! # dohwire protocol library
//!
//! DNS wire-format codec for DNS-over-HTTPS clients, following RFC 1035,
//! RFC 6891 (EDNS0) and RFC 7830 / RFC 8467 (padding).
//!
//! ## Features
//!
//! - **Header bit packing** for every flag, opcode and rcode value
//! - **Name decompression** with a bounded pointer depth
//! - **EDNS0 OPT records** with the TTL field unpacked into its parts
//! - **Block-length padding** of serialized queries
//! - **Opaque RDATA**, with typed views of A and AAAA addresses only
//!
//! ## Example
//!
//! ```rust
//! use dohwire_proto::{create_query, parse_message, serialize_query, Name, Question};
//!
//! let name = Name::from_ascii("example.com")?;
//! let query = create_query([Question::a(name)]);
//!
//! let wire = serialize_query(&query)?;
//! assert_eq!(wire.len() % 128, 0);
//!
//! let parsed = parse_message(&wire, 0)?;
//! assert_eq!(parsed, query);
//! # Ok::<(), dohwire_proto::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod class;
pub mod config;
pub mod edns;
pub mod error;
pub mod header;
pub mod message;
pub mod name;
pub mod opcode;
pub mod question;
pub mod rcode;
pub mod record;
pub mod rtype;
pub mod wire;

// Re-exports for convenience
pub use class::{Class, RecordClass};
pub use config::{PaddingPolicy, ParseConfig, SerializeConfig, TrailingData};
pub use edns::{EdnsOption, OptRecord};
pub use error::{Error, ErrorKind, Result};
pub use header::{Header, HeaderFlags};
pub use message::Message;
pub use name::{Label, Name};
pub use opcode::OpCode;
pub use question::Question;
pub use rcode::ResponseCode;
pub use record::{Record, ResourceRecord};
pub use rtype::{RecordType, Type};

/// Maximum length of a DNS label (63 bytes per RFC 1035)
pub const MAX_LABEL_LENGTH: usize = 63;

/// Payload size advertised in the OPT record of a new query.
pub const DEFAULT_MAX_PAYLOAD_SIZE: u16 = 0xFFFF;

/// Default padding block length for queries (RFC 8467 section 4.1)
pub const DEFAULT_PADDING_BLOCK: u16 = 128;

/// Media type of DNS wire-format messages over HTTPS (RFC 8484)
pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// Builds a recursive query for `questions`. See [`Message::query`].
pub fn create_query(questions: impl IntoIterator<Item = Question>) -> Message {
    Message::query(questions)
}

/// Serializes a query with default padding. See [`Message::serialize_query`].
///
/// # Errors
///
/// Fails if the message has answers, authority records, or OPT options.
pub fn serialize_query(message: &Message) -> Result<bytes::Bytes> {
    message.serialize_query()
}

/// Parses a message beginning at `offset`. See [`Message::parse_at`].
///
/// # Errors
///
/// Fails on truncated or malformed input.
pub fn parse_message(data: &[u8], offset: usize) -> Result<Message> {
    Message::parse_at(data, offset)
}
