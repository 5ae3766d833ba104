//! Shared types used across the lanekdf library.
//!
//! The records are the fixed-layout buffers a host hands to the engine: one
//! [`InputRecord`] and one [`OutputRecord`] per lane, and a single
//! [`SaltRecord`] shared by the whole batch. Capacities are const generics
//! whose defaults are the deployment constants in
//! [`crate::kernels::constants`].

use crate::kernels::codec::{bytes_to_words, words_to_bytes};
use crate::kernels::constants::{OUTPUT_WORDS, PASSWORD_WORDS, SALT_WORDS};
use core::fmt;
use core::num::NonZeroU32;
#[cfg(feature = "std")]
use std::error;

// =============================================================================
// LANE FUNCTION
// =============================================================================

/// Per-lane kernel signature: `(password, shared salt, output, params)`.
///
/// The executors in [`crate::engine::parallel`] are generic over this so the
/// scalar kernel can be swapped without touching the dispatch code.
pub type LaneFn<const P: usize, const S: usize, const O: usize> =
    fn(&InputRecord<P>, &SaltRecord<S>, &mut OutputRecord<O>, &DerivationParams);

// =============================================================================
// RECORDS
// =============================================================================

/// One password for one lane.
///
/// `length` bytes are packed little-endian into `buffer`; bytes past `length`
/// are ignored.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct InputRecord<const WORDS: usize = PASSWORD_WORDS> {
    /// Valid bytes in `buffer`.
    pub length: u32,
    /// Password bytes, little-endian per word.
    pub buffer: [u32; WORDS],
}

/// The salt shared by every lane of a batch.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct SaltRecord<const WORDS: usize = SALT_WORDS> {
    /// Valid bytes in `buffer`.
    pub length: u32,
    /// Salt bytes, little-endian per word.
    pub buffer: [u32; WORDS],
}

/// One derived key for one lane.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct OutputRecord<const WORDS: usize = OUTPUT_WORDS> {
    /// Derived key bytes, little-endian per word.
    pub buffer: [u32; WORDS],
}

/// Implements the byte-oriented constructor and view shared by the two
/// length-prefixed records.
macro_rules! length_prefixed_record {
    ($record:ident, $field:expr) => {
        impl<const WORDS: usize> $record<WORDS> {
            /// Capacity in bytes.
            pub const CAPACITY: usize = WORDS * 4;

            /// Pack `bytes` into a new record.
            ///
            /// # Errors
            /// Returns [`CapacityError`] if `bytes` exceeds [`Self::CAPACITY`].
            #[allow(clippy::cast_possible_truncation)]
            pub fn from_bytes(bytes: &[u8]) -> Result<Self, CapacityError> {
                if bytes.len() > Self::CAPACITY {
                    return Err(CapacityError::new($field, bytes.len(), Self::CAPACITY));
                }
                let mut record = Self::default();
                bytes_to_words(bytes, &mut record.buffer);
                record.length = bytes.len() as u32;
                Ok(record)
            }

            /// Valid length in bytes.
            #[must_use]
            pub const fn len(&self) -> usize {
                self.length as usize
            }

            /// Whether the record holds zero bytes.
            #[must_use]
            pub const fn is_empty(&self) -> bool {
                self.length == 0
            }

            /// Copy the valid bytes into `out`, returning the written prefix.
            ///
            /// # Panics
            /// Panics if `out` is shorter than [`Self::len`].
            pub fn copy_bytes<'a>(&self, out: &'a mut [u8]) -> &'a [u8] {
                let n = self.len().min(Self::CAPACITY);
                words_to_bytes(&self.buffer, &mut out[..n]);
                &out[..n]
            }
        }

        impl<const WORDS: usize> Default for $record<WORDS> {
            fn default() -> Self {
                Self {
                    length: 0,
                    buffer: [0; WORDS],
                }
            }
        }
    };
}

length_prefixed_record!(InputRecord, Field::Password);
length_prefixed_record!(SaltRecord, Field::Salt);

impl<const WORDS: usize> OutputRecord<WORDS> {
    /// Capacity in bytes.
    pub const CAPACITY: usize = WORDS * 4;

    /// Copy the first `dk_len` bytes of the derived key into `out`.
    ///
    /// # Panics
    /// Panics if `dk_len` exceeds [`Self::CAPACITY`] or `out.len()`.
    pub fn copy_key<'a>(&self, dk_len: usize, out: &'a mut [u8]) -> &'a [u8] {
        words_to_bytes(&self.buffer, &mut out[..dk_len]);
        &out[..dk_len]
    }

    /// The derived key as an owned byte vector.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn derived_key(&self, dk_len: usize) -> Vec<u8> {
        let mut out = vec![0u8; dk_len.min(Self::CAPACITY)];
        words_to_bytes(&self.buffer, &mut out);
        out
    }
}

impl<const WORDS: usize> Default for OutputRecord<WORDS> {
    fn default() -> Self {
        Self { buffer: [0; WORDS] }
    }
}

// =============================================================================
// PARAMETERS
// =============================================================================

/// Per-batch derivation parameters.
///
/// `iterations` is non-zero by construction; `dk_len` is checked against the
/// output capacity when a batch is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationParams {
    iterations: NonZeroU32,
    dk_len: u32,
}

impl DerivationParams {
    /// Validate and build parameters.
    ///
    /// # Errors
    /// Returns [`BatchError::ZeroIterations`] if `iterations == 0`.
    pub const fn new(iterations: u32, dk_len: u32) -> Result<Self, BatchError> {
        match NonZeroU32::new(iterations) {
            Some(iterations) => Ok(Self { iterations, dk_len }),
            None => Err(BatchError::ZeroIterations),
        }
    }

    /// PBKDF2 iteration count `c`.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations.get()
    }

    /// Derived key length in bytes.
    #[must_use]
    pub const fn dk_len(&self) -> usize {
        self.dk_len as usize
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Which buffer a [`CapacityError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Password (`InputRecord`).
    Password,
    /// Salt (`SaltRecord`).
    Salt,
    /// Derived key (`OutputRecord`).
    DerivedKey,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Password => "password",
            Self::Salt => "salt",
            Self::DerivedKey => "derived key",
        })
    }
}

/// A length exceeds the fixed capacity of its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    field: Field,
    len: usize,
    capacity: usize,
}

impl CapacityError {
    /// Create a new `CapacityError`.
    pub const fn new(field: Field, len: usize, capacity: usize) -> Self {
        Self {
            field,
            len,
            capacity,
        }
    }

    /// The offending buffer.
    #[must_use]
    pub const fn field(&self) -> Field {
        self.field
    }

    /// Requested length in bytes.
    #[must_use]
    pub const fn requested(&self) -> usize {
        self.len
    }

    /// Capacity in bytes.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} bytes exceeds the {}-byte capacity",
            self.field, self.len, self.capacity
        )
    }
}

#[cfg(feature = "std")]
impl error::Error for CapacityError {}

/// A batch that must not be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchError {
    /// PBKDF2 needs at least one iteration.
    ZeroIterations,
    /// Input and output slices have different lane counts.
    LaneCountMismatch {
        /// Number of input records.
        inputs: usize,
        /// Number of output records.
        outputs: usize,
    },
    /// A password, salt or derived-key length exceeds its buffer.
    Capacity(CapacityError),
}

impl From<CapacityError> for BatchError {
    fn from(err: CapacityError) -> Self {
        Self::Capacity(err)
    }
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroIterations => f.write_str("iteration count must be at least 1"),
            Self::LaneCountMismatch { inputs, outputs } => write!(
                f,
                "lane count mismatch: {inputs} input records, {outputs} output records"
            ),
            Self::Capacity(err) => err.fmt(f),
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for BatchError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Capacity(err) => Some(err),
            _ => None,
        }
    }
}
