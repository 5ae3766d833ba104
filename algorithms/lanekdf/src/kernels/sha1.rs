//! SHA-1 Compression
//!
//! FIPS 180-4 compression over a 16-word big-endian message block and a
//! 5-word running digest. The message schedule lives in a 16-word ring and is
//! expanded in place as rounds 16..80 consume it.

use crate::kernels::codec::{load_be, put_byte_be};
use crate::kernels::constants::{
    BLOCK_SIZE, BLOCK_WORDS, DIGEST_WORDS, IV, K0, K1, K2, K3, PADDING_OVERHEAD, TERMINATOR,
};

// =============================================================================
// ROUND FUNCTIONS
// =============================================================================

/// Rounds 0..20: `bitselect(z, y, x)`, i.e. `x ? y : z` per bit.
#[inline]
const fn select(x: u32, y: u32, z: u32) -> u32 {
    z ^ (x & (y ^ z))
}

/// Rounds 20..40 and 60..80.
#[inline]
const fn parity(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

/// Rounds 40..60.
#[inline]
const fn majority(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (z & (x | y))
}

// =============================================================================
// SCHEDULE & STEP
// =============================================================================

/// `W[t]` for `t >= 16`, written back over `W[t - 16]` in the ring.
#[inline]
fn expand(w: &mut [u32; BLOCK_WORDS], t: usize) -> u32 {
    let x = (w[(t + 13) & 15] ^ w[(t + 8) & 15] ^ w[(t + 2) & 15] ^ w[t & 15]).rotate_left(1);
    w[t & 15] = x;
    x
}

/// One round over the working variables `[a, b, c, d, e]`.
#[inline]
fn step(v: &mut [u32; DIGEST_WORDS], f: u32, k: u32, wt: u32) {
    let temp = v[0]
        .rotate_left(5)
        .wrapping_add(f)
        .wrapping_add(v[4])
        .wrapping_add(k)
        .wrapping_add(wt);
    v[4] = v[3];
    v[3] = v[2];
    v[2] = v[1].rotate_left(30);
    v[1] = v[0];
    v[0] = temp;
}

// =============================================================================
// COMPRESSION
// =============================================================================

/// Compress one block into `digest` (with Merkle-Damgard feed-forward).
#[inline]
pub fn compress(message: &[u32; BLOCK_WORDS], digest: &mut [u32; DIGEST_WORDS]) {
    let mut w = *message;
    let mut v = *digest;

    for &wt in message {
        let f = select(v[1], v[2], v[3]);
        step(&mut v, f, K0, wt);
    }
    for t in 16..20 {
        let wt = expand(&mut w, t);
        let f = select(v[1], v[2], v[3]);
        step(&mut v, f, K0, wt);
    }
    for t in 20..40 {
        let wt = expand(&mut w, t);
        let f = parity(v[1], v[2], v[3]);
        step(&mut v, f, K1, wt);
    }
    for t in 40..60 {
        let wt = expand(&mut w, t);
        let f = majority(v[1], v[2], v[3]);
        step(&mut v, f, K2, wt);
    }
    for t in 60..80 {
        let wt = expand(&mut w, t);
        let f = parity(v[1], v[2], v[3]);
        step(&mut v, f, K3, wt);
    }

    for (d, x) in digest.iter_mut().zip(v) {
        *d = d.wrapping_add(x);
    }
}

/// Full SHA-1 of a bounded message stored in the external little-endian
/// word layout with `len` valid bytes.
///
/// Used to reduce HMAC keys longer than one block. Fixed scratch, no
/// allocation; bytes past `len` in the trailing word are masked off.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn digest_words(message: &[u32], len: usize) -> [u32; DIGEST_WORDS] {
    debug_assert!(len <= message.len() * 4);

    let mut state = IV;
    let full_blocks = len / BLOCK_SIZE;

    let mut block = [0u32; BLOCK_WORDS];
    for b in 0..full_blocks {
        for (i, w) in block.iter_mut().enumerate() {
            *w = load_be(message, len, b * BLOCK_WORDS + i);
        }
        compress(&block, &mut state);
    }

    // Tail: remaining bytes + terminator + 64-bit bit length, one or two blocks.
    let rem = len - full_blocks * BLOCK_SIZE;
    let mut tail = [0u32; 2 * BLOCK_WORDS];
    for (i, w) in tail.iter_mut().take(BLOCK_WORDS).enumerate() {
        *w = load_be(message, len, full_blocks * BLOCK_WORDS + i);
    }
    put_byte_be(&mut tail, rem, TERMINATOR);

    let tail_blocks = if rem + PADDING_OVERHEAD <= BLOCK_SIZE { 1 } else { 2 };
    let bits = (len as u64) * 8;
    let last = tail_blocks * BLOCK_WORDS;
    tail[last - 2] = (bits >> 32) as u32;
    tail[last - 1] = bits as u32;

    for chunk in tail.chunks_exact(BLOCK_WORDS).take(tail_blocks) {
        block.copy_from_slice(chunk);
        compress(&block, &mut state);
    }
    state
}
