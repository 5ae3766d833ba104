#![cfg_attr(not(feature = "std"), no_std)]

//! # lanekdf
//!
//! Batch PBKDF2-HMAC-SHA1 over fixed-layout buffers.
//! One lane, one password, one independent derivation.

//! # Usage
//! ```rust
//! use lanekdf::{derive_batch, DerivationParams, InputRecord, OutputRecord, SaltRecord};
//!
//! // 1. Batch derivation
//! let inputs: Vec<InputRecord> = ["password", "letmein", "hunter2"]
//!     .iter()
//!     .map(|p| InputRecord::from_bytes(p.as_bytes()))
//!     .collect::<Result<_, _>>()?;
//! let salt: SaltRecord = SaltRecord::from_bytes(b"salt")?;
//! let params = DerivationParams::new(4096, 20)?;
//!
//! let mut outputs: Vec<OutputRecord> = vec![OutputRecord::default(); inputs.len()];
//! derive_batch(&inputs, &salt, &mut outputs, &params)?;
//! assert_eq!(outputs[0].derived_key(20)[..4], [0x4b, 0x00, 0x79, 0x01]);
//!
//! // 2. Single password, any length
//! let mut key = [0u8; 64];
//! lanekdf::pbkdf2_hmac_sha1(b"password", b"salt", 4096, &mut key)?;
//! assert_eq!(key[..20], outputs[0].derived_key(20)[..]);
//!
//! // 3. Constant-time verification
//! assert!(lanekdf::verify(b"password", b"salt", 4096, &key));
//! # Ok::<(), lanekdf::BatchError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod engine;
#[cfg(feature = "std")]
mod ffi;
pub mod fmt;
// Scalar kernels, public for tests and benches; hidden from docs
#[doc(hidden)]
pub mod kernels;
mod oneshot;
mod types;

// =============================================================================
// EXPORTS
// =============================================================================

pub use engine::{Backend, Layout, DEFAULT_LAYOUT};
pub use kernels::constants::{
    MAX_SALT_BYTES, OUTPUT_CAPACITY, OUTPUT_WORDS, PASSWORD_CAPACITY, PASSWORD_WORDS,
    SALT_CAPACITY, SALT_WORDS,
};
pub use oneshot::{derive_batch, derive_batch_serial, pbkdf2_hmac_sha1, verify};
pub use types::{
    BatchError, CapacityError, DerivationParams, Field, InputRecord, LaneFn, OutputRecord,
    SaltRecord,
};

/// Returns the executor that batch calls from this context run on.
#[must_use]
pub fn active_backend() -> Backend {
    engine::get_active_backend()
}
