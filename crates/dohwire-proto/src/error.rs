//! Codec error types.
//!
//! Every failure of the codec is reported through [`Error`]. Errors are never
//! retried or recovered internally: parsing and serialization are pure
//! transformations, so the caller decides how to surface a failure.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A domain-name label rejected during construction.
    Validation,
    /// A structure this codec deliberately does not handle.
    Unsupported,
    /// The input message is inconsistent with itself.
    Malformed,
    /// A read past the end of the input buffer.
    Underflow,
    /// A write past the bound of the output buffer.
    Overflow,
}

/// DNS codec errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // =========================================================================
    // Label Validation Errors
    // =========================================================================
    /// Label is empty or longer than 63 bytes.
    #[error("label \"{label}\" must be between 1 and 63 characters long, got {length}")]
    InvalidLabelLength {
        /// The offending label.
        label: String,
        /// Its length in bytes.
        length: usize,
    },

    /// Label contains a character outside `[0-9a-z-]`.
    #[error("invalid character '{character}' in label \"{label}\"")]
    InvalidLabelChar {
        /// The offending label.
        label: String,
        /// The first invalid character.
        character: char,
    },

    /// Label starts or ends with a hyphen.
    #[error("label \"{label}\" cannot start or end with a hyphen")]
    InvalidLabelHyphen {
        /// The offending label.
        label: String,
    },

    // =========================================================================
    // Unsupported Structures
    // =========================================================================
    /// Answer or authority records present in a message serialized as a query.
    #[error(
        "cannot serialize answers ({answers}) or authority records ({authority}) for a query"
    )]
    NonQuerySections {
        /// Number of answer records.
        answers: usize,
        /// Number of authority records.
        authority: usize,
    },

    /// OPT record carrying options, or a raw TYPE 41 resource record, was
    /// handed to the serializer.
    #[error("EDNS0 OPT records with options are not supported ({rdlength} bytes of options)")]
    UnsupportedOptPayload {
        /// Encoded length of the options.
        rdlength: usize,
    },

    /// Extended (RFC 6891 section 5) or reserved label type.
    #[error("unsupported label type {label_type:#04b} at offset {offset}")]
    UnsupportedLabelType {
        /// Offset of the length octet.
        offset: usize,
        /// The top two bits of the length octet.
        label_type: u8,
    },

    // =========================================================================
    // Malformed Messages
    // =========================================================================
    /// Compression pointers nested deeper than allowed.
    #[error("too many nested compression pointers (>{max_depth})")]
    TooManyCompressionJumps {
        /// Maximum allowed pointer depth.
        max_depth: usize,
    },

    /// Bytes remain after all sections were parsed (strict policy only).
    #[error("unexpected end of message (offset: {offset}, length: {length})")]
    TrailingData {
        /// Offset where parsing stopped.
        offset: usize,
        /// Total length of the input.
        length: usize,
    },

    /// An EDNS option does not fit inside the OPT record's RDATA.
    #[error("EDNS option at offset {offset} crosses the end of the OPT record data")]
    InvalidOptOption {
        /// Offset of the option header.
        offset: usize,
    },

    // =========================================================================
    // Buffer Bounds
    // =========================================================================
    /// Read past the end of the input.
    #[error("unexpected end of data at offset {offset}: {needed} more bytes needed")]
    UnexpectedEof {
        /// Offset of the failed read.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
    },

    /// Write past the end of the output bound.
    #[error("buffer overflow: cannot write {needed} bytes to buffer with {available} available")]
    BufferOverflow {
        /// Bytes needed to write.
        needed: usize,
        /// Available space in buffer.
        available: usize,
    },

    /// A section or record is too large for its 16-bit length or count field.
    #[error("{what} too large: {size} exceeds maximum of {max_size}")]
    FieldOverflow {
        /// What overflowed.
        what: &'static str,
        /// Actual size.
        size: usize,
        /// Maximum representable size.
        max_size: usize,
    },
}

impl Error {
    /// Creates a new `UnexpectedEof` error.
    #[inline]
    pub fn unexpected_eof(offset: usize, needed: usize) -> Self {
        Self::UnexpectedEof { offset, needed }
    }

    /// Creates a new `BufferOverflow` error.
    #[inline]
    pub fn buffer_overflow(needed: usize, available: usize) -> Self {
        Self::BufferOverflow { needed, available }
    }

    /// Creates a new `InvalidLabelLength` error.
    #[inline]
    pub fn invalid_label_length(label: impl Into<String>, length: usize) -> Self {
        Self::InvalidLabelLength {
            label: label.into(),
            length,
        }
    }

    /// Returns the broad class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLabelLength { .. }
            | Self::InvalidLabelChar { .. }
            | Self::InvalidLabelHyphen { .. } => ErrorKind::Validation,
            Self::NonQuerySections { .. }
            | Self::UnsupportedOptPayload { .. }
            | Self::UnsupportedLabelType { .. } => ErrorKind::Unsupported,
            Self::TooManyCompressionJumps { .. }
            | Self::TrailingData { .. }
            | Self::InvalidOptOption { .. } => ErrorKind::Malformed,
            Self::UnexpectedEof { .. } => ErrorKind::Underflow,
            Self::BufferOverflow { .. } | Self::FieldOverflow { .. } => ErrorKind::Overflow,
        }
    }

    /// Returns true if this error indicates a malformed or truncated input.
    #[inline]
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind(), ErrorKind::Malformed | ErrorKind::Underflow)
    }
}
