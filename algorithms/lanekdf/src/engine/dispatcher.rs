//! Lane Dispatcher
//!
//! One lane = one complete PBKDF2 derivation: read the lane's password, read
//! the shared salt, write the lane's output. Nothing here validates; callers
//! go through [`crate::derive_batch`] or check the preconditions themselves.

use crate::kernels::constants::{MAX_SALT_BYTES, OUTPUT_WORDS, PASSWORD_WORDS, SALT_WORDS};
use crate::kernels::{hmac, pbkdf2};
use crate::types::{DerivationParams, InputRecord, OutputRecord, SaltRecord};
use core::fmt;
use core::mem::size_of;

// =============================================================================
// LANE KERNEL
// =============================================================================

/// Derive one lane's key.
///
/// The pad states are rebuilt from this lane's password; nothing is shared
/// with other lanes. The salt record is only borrowed, and the counter is
/// appended to a lane-local copy inside the kernel.
///
/// Preconditions: `input.len() <= P * 4`, `salt.len() <= MAX_SALT_BYTES`,
/// `params.dk_len() <= O * 4`.
#[inline]
pub fn derive_lane<const P: usize, const S: usize, const O: usize>(
    input: &InputRecord<P>,
    salt: &SaltRecord<S>,
    output: &mut OutputRecord<O>,
    params: &DerivationParams,
) {
    debug_assert!(input.len() <= InputRecord::<P>::CAPACITY);
    debug_assert!(salt.len() <= MAX_SALT_BYTES.min(SaltRecord::<S>::CAPACITY));
    debug_assert!(params.dk_len() <= OutputRecord::<O>::CAPACITY);

    let pads = hmac::precompute(&input.buffer, input.len());
    pbkdf2::derive(
        &pads,
        &salt.buffer,
        salt.len(),
        params.iterations(),
        &mut output.buffer,
        params.dk_len(),
    );
}

/// Run lane `lane` of a batch.
///
/// Explicit lane indexing for schedulers that hand out indices rather than
/// records. Panics if `lane` is out of bounds for either slice.
#[inline]
pub fn run<const P: usize, const S: usize, const O: usize>(
    lane: usize,
    inputs: &[InputRecord<P>],
    salt: &SaltRecord<S>,
    outputs: &mut [OutputRecord<O>],
    params: &DerivationParams,
) {
    derive_lane(&inputs[lane], salt, &mut outputs[lane], params);
}

// =============================================================================
// BACKEND
// =============================================================================

/// Executor that runs the lanes of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Lanes run one after another on the calling thread.
    Serial,
    /// Lanes are spread over the current rayon pool.
    Rayon {
        /// Worker threads in the pool.
        threads: usize,
    },
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => f.write_str("Serial"),
            Self::Rayon { threads } => write!(f, "Rayon ({threads} threads)"),
        }
    }
}

/// Returns the executor [`crate::derive_batch`] uses from the calling context.
///
/// Inside `ThreadPool::install` this reports that pool's width.
#[must_use]
pub fn get_active_backend() -> Backend {
    #[cfg(feature = "multithread")]
    {
        Backend::Rayon {
            threads: rayon::current_num_threads(),
        }
    }
    #[cfg(not(feature = "multithread"))]
    {
        Backend::Serial
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

/// Byte and word sizes of a batch layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Password capacity in bytes.
    pub password_bytes: usize,
    /// Password capacity in words.
    pub password_words: usize,
    /// Salt capacity in bytes.
    pub salt_bytes: usize,
    /// Salt capacity in words.
    pub salt_words: usize,
    /// Output capacity in bytes.
    pub output_bytes: usize,
    /// Output capacity in words.
    pub output_words: usize,
    /// Size of one `InputRecord` in memory.
    pub input_record_size: usize,
    /// Size of one `OutputRecord` in memory.
    pub output_record_size: usize,
}

impl Layout {
    /// Layout of records with `P`, `S` and `O` words.
    #[must_use]
    pub const fn of<const P: usize, const S: usize, const O: usize>() -> Self {
        Self {
            password_bytes: InputRecord::<P>::CAPACITY,
            password_words: P,
            salt_bytes: SaltRecord::<S>::CAPACITY,
            salt_words: S,
            output_bytes: OutputRecord::<O>::CAPACITY,
            output_words: O,
            input_record_size: size_of::<InputRecord<P>>(),
            output_record_size: size_of::<OutputRecord<O>>(),
        }
    }
}

/// The default deployment layout.
pub const DEFAULT_LAYOUT: Layout = Layout::of::<PASSWORD_WORDS, SALT_WORDS, OUTPUT_WORDS>();

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Password capacity: {} bytes ({} words)",
            self.password_bytes, self.password_words
        )?;
        writeln!(
            f,
            "Salt capacity:     {} bytes ({} words)",
            self.salt_bytes, self.salt_words
        )?;
        writeln!(
            f,
            "Output capacity:   {} bytes ({} words)",
            self.output_bytes, self.output_words
        )?;
        write!(
            f,
            "Record sizes:      input {} bytes, output {} bytes",
            self.input_record_size, self.output_record_size
        )
    }
}
