//! Block-length padding (RFC 7830, RFC 8467).

use super::{EdnsOption, EdnsOptionCode, OPTION_HEADER_LEN};
use rand::RngCore;

/// Returns how many padding bytes to add to a message of `len` bytes so
/// that, after a padding option header is appended, the total is the
/// smallest multiple of `block` not below `len + 4`.
///
/// ```rust
/// use dohwire_proto::edns::padding_len;
///
/// assert_eq!(padding_len(100, 128), 24);
/// assert_eq!(padding_len(124, 128), 0);
/// assert_eq!(padding_len(125, 128), 127);
/// ```
pub fn padding_len(len: usize, block: usize) -> usize {
    if block == 0 {
        return 0;
    }
    let padded = len + OPTION_HEADER_LEN;
    padded.div_ceil(block) * block - padded
}

impl EdnsOption {
    /// Creates a padding option holding `len` random bytes.
    ///
    /// The bytes only need to hide the message length, so a fast
    /// non-cryptographic generator is sufficient.
    pub fn padding(len: usize) -> Self {
        let mut data = vec![0u8; len];
        rand::thread_rng().fill_bytes(&mut data);
        Self::new(EdnsOptionCode::Padding.into(), data)
    }

    /// Returns true if this is a padding option.
    #[inline]
    pub fn is_padding(&self) -> bool {
        self.code == u16::from(EdnsOptionCode::Padding)
    }
}
