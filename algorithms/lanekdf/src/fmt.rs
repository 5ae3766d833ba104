//! Hex Formatting
//!
//! Display adapters for word buffers. Batch buffers print as the bytes they
//! carry (little-endian per word, up to the valid length); SHA-1 states print
//! as their big-endian words, which is the conventional digest spelling.

use crate::kernels::hmac::PadState;
use crate::types::{InputRecord, OutputRecord, SaltRecord};
use core::fmt;

// =============================================================================
// ADAPTERS
// =============================================================================

/// The first `len` bytes of a little-endian word buffer, as lowercase hex.
#[derive(Clone, Copy)]
pub struct HexBytes<'a> {
    words: &'a [u32],
    len: usize,
}

impl<'a> HexBytes<'a> {
    /// Format `len` bytes of `words`. `len` is clamped to the buffer size.
    #[must_use]
    pub fn new(words: &'a [u32], len: usize) -> Self {
        Self {
            words,
            len: len.min(words.len() * 4),
        }
    }
}

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.words.iter().flat_map(|w| w.to_le_bytes()).take(self.len) {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Big-endian state words (SHA-1 chaining values, digests) as lowercase hex.
#[derive(Clone, Copy)]
pub struct HexState<'a>(pub &'a [u32]);

impl fmt::Display for HexState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.0 {
            write!(f, "{word:08x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for HexState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

// =============================================================================
// RECORDS
// =============================================================================

impl<const WORDS: usize> fmt::Debug for InputRecord<WORDS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputRecord")
            .field("length", &self.length)
            .field("bytes", &HexBytes::new(&self.buffer, self.len()))
            .finish()
    }
}

impl<const WORDS: usize> fmt::Debug for SaltRecord<WORDS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltRecord")
            .field("length", &self.length)
            .field("bytes", &HexBytes::new(&self.buffer, self.len()))
            .finish()
    }
}

impl<const WORDS: usize> fmt::Debug for OutputRecord<WORDS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OutputRecord")
            .field(&HexBytes::new(&self.buffer, Self::CAPACITY))
            .finish()
    }
}

impl fmt::Display for PadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "inner={} outer={}",
            HexState(&self.inner),
            HexState(&self.outer)
        )
    }
}
