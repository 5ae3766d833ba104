//! HMAC-SHA1 over cached pad states.
//!
//! The password-dependent half of HMAC (one compression of `K ^ ipad` and one
//! of `K ^ opad`) is computed once per password by [`precompute`]. Every
//! HMAC evaluation after that resumes from the cached states and costs exactly
//! two compressions.

use crate::kernels::codec::{load_be, put_byte_be};
use crate::kernels::constants::{
    BLOCK_SIZE, BLOCK_WORDS, DIGEST_WORDS, IPAD_WORD, IV, MAX_MESSAGE_BYTES, OPAD_WORD,
    OUTER_MESSAGE_BITS, TERMINATOR,
};
use crate::kernels::sha1::{compress, digest_words};

// =============================================================================
// STATE
// =============================================================================

/// SHA-1 states after absorbing the inner and outer HMAC key blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadState {
    /// State after `K ^ ipad`.
    pub inner: [u32; DIGEST_WORDS],
    /// State after `K ^ opad`.
    pub outer: [u32; DIGEST_WORDS],
}

/// Build the cached pad states for a password.
///
/// `password` is the external little-endian word buffer holding `len` valid
/// bytes. Keys longer than one block are replaced by their SHA-1 digest
/// (RFC 2104); shorter keys are zero-padded.
#[must_use]
pub fn precompute(password: &[u32], len: usize) -> PadState {
    debug_assert!(len <= password.len() * 4);

    let mut key = [0u32; BLOCK_WORDS];
    if len > BLOCK_SIZE {
        key[..DIGEST_WORDS].copy_from_slice(&digest_words(password, len));
    } else {
        for (i, w) in key.iter_mut().enumerate() {
            *w = load_be(password, len, i);
        }
    }

    let mut block = key.map(|w| w ^ IPAD_WORD);
    let mut inner = IV;
    compress(&block, &mut inner);

    block = key.map(|w| w ^ OPAD_WORD);
    let mut outer = IV;
    compress(&block, &mut outer);

    PadState { inner, outer }
}

// =============================================================================
// EVALUATION
// =============================================================================

/// HMAC of a single-block message.
///
/// `message` holds big-endian words with `len` valid bytes; every byte past
/// `len` must be zero. Precondition: `len <= MAX_MESSAGE_BYTES` (55).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn hmac_block(
    pads: &PadState,
    message: &[u32; BLOCK_WORDS],
    len: usize,
) -> [u32; DIGEST_WORDS] {
    debug_assert!(len <= MAX_MESSAGE_BYTES);

    let mut block = *message;
    put_byte_be(&mut block, len, TERMINATOR);
    block[BLOCK_WORDS - 1] = ((BLOCK_SIZE + len) * 8) as u32;

    let mut inner = pads.inner;
    compress(&block, &mut inner);
    finish(&pads.outer, &inner)
}

/// HMAC of a 20-byte message, i.e. `HMAC(P, U_{j-1})` in the PBKDF2 loop.
///
/// A 20-byte message after a pad block has the same length field as the outer
/// hash, so both compressions share one block layout.
#[inline]
#[must_use]
pub fn hmac_digest(pads: &PadState, message: &[u32; DIGEST_WORDS]) -> [u32; DIGEST_WORDS] {
    let mut inner = pads.inner;
    compress(&digest_block(message), &mut inner);
    finish(&pads.outer, &inner)
}

/// Resume the outer state with the inner digest.
#[inline]
fn finish(outer: &[u32; DIGEST_WORDS], inner: &[u32; DIGEST_WORDS]) -> [u32; DIGEST_WORDS] {
    let mut state = *outer;
    compress(&digest_block(inner), &mut state);
    state
}

/// Pad a 20-byte digest that follows one already-absorbed block.
#[inline]
fn digest_block(digest: &[u32; DIGEST_WORDS]) -> [u32; BLOCK_WORDS] {
    let mut block = [0u32; BLOCK_WORDS];
    block[..DIGEST_WORDS].copy_from_slice(digest);
    block[DIGEST_WORDS] = u32::from(TERMINATOR) << 24;
    block[BLOCK_WORDS - 1] = OUTER_MESSAGE_BITS;
    block
}
