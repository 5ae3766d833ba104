//! Kernel Constants
//!
//! SHA-1 constants are from FIPS 180-4 section 4.2.1 / 5.3.1, the pad bytes
//! from RFC 2104, and the buffer capacities are deployment choices for the
//! batch layout (see [`crate::types`]).

use crate::kernels::codec::words_for;
use static_assertions::const_assert;

// =============================================================================
// SHA-1
// =============================================================================

/// SHA-1 block size in bytes.
pub const BLOCK_SIZE: usize = 64;

/// SHA-1 block size in 32-bit words.
pub const BLOCK_WORDS: usize = BLOCK_SIZE / 4;

/// SHA-1 digest size in bytes (HMAC-SHA1 `hLen`).
pub const DIGEST_SIZE: usize = 20;

/// SHA-1 digest size in 32-bit words.
pub const DIGEST_WORDS: usize = DIGEST_SIZE / 4;

/// Initial hash value H(0).
pub const IV: [u32; DIGEST_WORDS] = [
    0x6745_2301,
    0xEFCD_AB89,
    0x98BA_DCFE,
    0x1032_5476,
    0xC3D2_E1F0,
];

// Round constants, one per 20-round stanza: floor(2^30 * sqrt(n)).
pub const K0: u32 = 0x5A82_7999; // sqrt(2), rounds 0-19
pub const K1: u32 = 0x6ED9_EBA1; // sqrt(3), rounds 20-39
pub const K2: u32 = 0x8F1B_BCDC; // sqrt(5), rounds 40-59
pub const K3: u32 = 0xCA62_C1D6; // sqrt(10), rounds 60-79

/// Message terminator byte appended before the length field.
pub const TERMINATOR: u8 = 0x80;

/// Bytes taken by the terminator and the 64-bit length field.
pub const PADDING_OVERHEAD: usize = 1 + 8;

// =============================================================================
// HMAC
// =============================================================================

/// Inner pad byte.
pub const IPAD: u8 = 0x36;

/// Outer pad byte.
pub const OPAD: u8 = 0x5C;

/// Inner pad byte replicated over a word.
pub const IPAD_WORD: u32 = u32::from_ne_bytes([IPAD; 4]);

/// Outer pad byte replicated over a word.
pub const OPAD_WORD: u32 = u32::from_ne_bytes([OPAD; 4]);

/// Bit length of the outer HMAC message: one pad block plus the inner digest.
pub const OUTER_MESSAGE_BITS: u32 = ((BLOCK_SIZE + DIGEST_SIZE) * 8) as u32;

// =============================================================================
// PBKDF2
// =============================================================================

/// Size of the big-endian block counter appended to the salt.
pub const COUNTER_SIZE: usize = 4;

/// Longest message `hmac_block` accepts: one block minus padding.
pub const MAX_MESSAGE_BYTES: usize = BLOCK_SIZE - PADDING_OVERHEAD;

/// Longest salt that still fits one block once the counter is appended.
pub const MAX_SALT_BYTES: usize = MAX_MESSAGE_BYTES - COUNTER_SIZE;

// =============================================================================
// BATCH LAYOUT
// =============================================================================

/// Password capacity of one input record, in bytes.
pub const PASSWORD_CAPACITY: usize = 128;

/// Salt capacity of the shared salt record, in bytes.
pub const SALT_CAPACITY: usize = 8;

/// Derived-key capacity of one output record, in bytes (two digest blocks).
pub const OUTPUT_CAPACITY: usize = 40;

/// Password capacity in 32-bit words.
pub const PASSWORD_WORDS: usize = words_for::<u32>(PASSWORD_CAPACITY);

/// Salt capacity in 32-bit words.
pub const SALT_WORDS: usize = words_for::<u32>(SALT_CAPACITY);

/// Output capacity in 32-bit words.
pub const OUTPUT_WORDS: usize = words_for::<u32>(OUTPUT_CAPACITY);

const_assert!(SALT_CAPACITY <= MAX_SALT_BYTES);
const_assert!(OUTPUT_CAPACITY % 4 == 0);
const_assert!(PASSWORD_WORDS * 4 == PASSWORD_CAPACITY);
