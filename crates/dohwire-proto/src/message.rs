//! DNS message representation.
//!
//! A DNS message consists of a header, question section, and three
//! resource record sections (answer, authority, additional). Queries are
//! serialized uncompressed with optional block-length padding; any message
//! can be parsed.

use crate::config::{ParseConfig, SerializeConfig, TrailingData};
use crate::edns::{padding_len, EdnsOption, OptRecord};
use crate::error::{Error, Result};
use crate::header::{Header, HeaderFlags, HEADER_SIZE};
use crate::question::Question;
use crate::record::{Record, ResourceRecord};
use crate::wire::{u16_len, WireReader, WireWriter};
use crate::DEFAULT_MAX_PAYLOAD_SIZE;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::{debug, trace, warn};

/// A complete DNS message.
///
/// A parsed message is a snapshot of the wire: header counts are kept as
/// read, even when they disagree with what the sections hold. Serializing
/// recomputes them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    /// The message header.
    pub header: Header,
    /// The question section.
    pub questions: Vec<Question>,
    /// The answer section.
    pub answers: Vec<ResourceRecord>,
    /// The authority section.
    pub authority: Vec<ResourceRecord>,
    /// The additional section, OPT pseudo-records included.
    pub additional: Vec<Record>,
}

impl Message {
    /// Creates an empty message with the given header.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    /// Builds a recursive query for `questions`.
    ///
    /// The message has ID 0 (as DNS over HTTPS recommends), RD set, and a
    /// single OPT record advertising a payload size of 65535 with every
    /// other EDNS field zero.
    pub fn query(questions: impl IntoIterator<Item = Question>) -> Self {
        let mut header = Header::new(0);
        header.flags = HeaderFlags::RD;

        let mut msg = Self {
            header,
            questions: questions.into_iter().collect(),
            answers: Vec::new(),
            authority: Vec::new(),
            additional: vec![Record::Opt(OptRecord::new(DEFAULT_MAX_PAYLOAD_SIZE))],
        };
        msg.header.qd_count = msg.questions.len().try_into().unwrap_or(u16::MAX);
        msg.header.ar_count = 1;
        msg
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the message ID.
    #[inline]
    pub fn id(&self) -> u16 {
        self.header.id
    }

    /// Returns the first question.
    pub fn question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Returns the first OPT record of the additional section.
    pub fn opt(&self) -> Option<&OptRecord> {
        self.additional.iter().find_map(Record::as_opt)
    }

    /// Returns the first OPT record of the additional section, mutably.
    pub fn opt_mut(&mut self) -> Option<&mut OptRecord> {
        self.additional.iter_mut().find_map(|r| match r {
            Record::Opt(opt) => Some(opt),
            Record::Resource(_) => None,
        })
    }

    /// Returns the 12-bit response code, merging in the OPT extended RCODE
    /// when an OPT record is present.
    pub fn full_rcode(&self) -> u16 {
        let extended = self.opt().map_or(0, |opt| opt.extended_rcode);
        self.header.rcode.with_extended(extended)
    }

    /// Returns the IPv4 addresses of all A answers.
    pub fn a_records(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.answers.iter().filter_map(ResourceRecord::ipv4_addr)
    }

    /// Returns the IPv6 addresses of all AAAA answers.
    pub fn aaaa_records(&self) -> impl Iterator<Item = Ipv6Addr> + '_ {
        self.answers.iter().filter_map(ResourceRecord::ipv6_addr)
    }

    // =========================================================================
    // Wire format
    // =========================================================================

    /// Parses a message that fills `data` exactly, with default options.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with(data, 0, &ParseConfig::default())
    }

    /// Parses a message starting at `offset`, with default options.
    pub fn parse_at(data: &[u8], offset: usize) -> Result<Self> {
        Self::parse_with(data, offset, &ParseConfig::default())
    }

    /// Parses a message starting at `offset`.
    ///
    /// Compression pointers are resolved against the whole of `data`. The
    /// sections are read in wire order and the first failure aborts the
    /// parse. Bytes left over after the additional section are handled
    /// according to `config.trailing_data`.
    pub fn parse_with(data: &[u8], offset: usize, config: &ParseConfig) -> Result<Self> {
        let mut reader = WireReader::at(data, offset);
        let header = Header::read(&mut reader)?;

        let questions = (0..header.qd_count)
            .map(|_| Question::read(&mut reader))
            .collect::<Result<Vec<_>>>()?;
        let answers = (0..header.an_count)
            .map(|_| ResourceRecord::read(&mut reader))
            .collect::<Result<Vec<_>>>()?;
        let authority = (0..header.ns_count)
            .map(|_| ResourceRecord::read(&mut reader))
            .collect::<Result<Vec<_>>>()?;
        let additional = (0..header.ar_count)
            .map(|_| Record::read(&mut reader, config))
            .collect::<Result<Vec<_>>>()?;

        let end = reader.position();
        if end != data.len() {
            match config.trailing_data {
                TrailingData::Lenient => {
                    warn!(
                        offset = end,
                        length = data.len(),
                        "unexpected end of message, ignoring trailing bytes"
                    );
                }
                TrailingData::Strict => {
                    return Err(Error::TrailingData {
                        offset: end,
                        length: data.len(),
                    });
                }
            }
        }

        Ok(Self {
            header,
            questions,
            answers,
            authority,
            additional,
        })
    }

    /// Serializes a query with default options (128-byte padding blocks).
    pub fn serialize_query(&self) -> Result<Bytes> {
        self.serialize_query_with(&SerializeConfig::default())
    }

    /// Serializes the message as a query.
    ///
    /// Header counts come from the section lengths. Names are written
    /// without compression. When padding is enabled, a padding option is
    /// appended inside the first OPT record so the whole message becomes a
    /// multiple of the block length; a message without an OPT record is
    /// left unpadded.
    ///
    /// # Errors
    ///
    /// - [`Error::NonQuerySections`] if answers or authority records are present
    /// - [`Error::UnsupportedOptPayload`] if an OPT record carries options, or
    ///   if a TYPE 41 record appears as a plain [`ResourceRecord`]
    /// - [`Error::BufferOverflow`] if the result would exceed
    ///   `config.max_message_size`
    pub fn serialize_query_with(&self, config: &SerializeConfig) -> Result<Bytes> {
        if !self.answers.is_empty() || !self.authority.is_empty() {
            return Err(Error::NonQuerySections {
                answers: self.answers.len(),
                authority: self.authority.len(),
            });
        }
        for record in &self.additional {
            // A raw TYPE 41 record would bypass the OPT encoder entirely.
            let rdlength = match record {
                Record::Opt(opt) if !opt.options.is_empty() => opt.options_len(),
                Record::Resource(rr) if rr.rtype.is_opt() => rr.rdata.len(),
                _ => continue,
            };
            return Err(Error::UnsupportedOptPayload { rdlength });
        }

        let unpadded = HEADER_SIZE
            + self.questions.iter().map(Question::wire_len).sum::<usize>()
            + self.additional.iter().map(Record::wire_len).sum::<usize>();

        let padding = match (config.padding.block_len(), self.opt().is_some()) {
            (Some(block), true) => {
                let len = padding_len(unpadded, block);
                debug!(unpadded, block, padding = len, "padding query");
                Some(EdnsOption::padding(len))
            }
            (Some(_), false) => {
                debug!("query has no OPT record, not padding");
                None
            }
            (None, _) => None,
        };

        let mut header = self.header.clone();
        header.qd_count = u16_len("question count", self.questions.len())?;
        header.an_count = 0;
        header.ns_count = 0;
        header.ar_count = u16_len("additional count", self.additional.len())?;

        let mut writer = WireWriter::with_max_size(
            unpadded + padding.as_ref().map_or(0, EdnsOption::wire_len),
            config.max_message_size,
        );
        header.write_to(&mut writer)?;
        for question in &self.questions {
            question.write_to(&mut writer)?;
        }

        let mut padding = padding.as_ref();
        for record in &self.additional {
            match record {
                Record::Resource(rr) => rr.write_to(&mut writer)?,
                Record::Opt(opt) => opt.write_to(&mut writer, padding.take())?,
            }
        }

        trace!(len = writer.len(), "serialized query");
        Ok(writer.freeze())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ";; ->>HEADER<<- {}", self.header)?;

        if let Some(opt) = self.opt() {
            writeln!(f, ";; OPT: {opt}")?;
        }

        writeln!(f, "\n;; QUESTION SECTION:")?;
        for q in &self.questions {
            writeln!(f, ";{q}")?;
        }

        if !self.answers.is_empty() {
            writeln!(f, "\n;; ANSWER SECTION:")?;
            for r in &self.answers {
                writeln!(f, "{r}")?;
            }
        }

        if !self.authority.is_empty() {
            writeln!(f, "\n;; AUTHORITY SECTION:")?;
            for r in &self.authority {
                writeln!(f, "{r}")?;
            }
        }

        let others: Vec<_> = self.additional.iter().filter_map(Record::as_resource).collect();
        if !others.is_empty() {
            writeln!(f, "\n;; ADDITIONAL SECTION:")?;
            for r in others {
                writeln!(f, "{r}")?;
            }
        }

        Ok(())
    }
}
