//! PBKDF2-HMAC-SHA1 (RFC 8018 section 5.2).
//!
//! ```text
//! DK = T_1 || T_2 || ... truncated to dk_len
//! T_i = U_1 ^ U_2 ^ ... ^ U_c
//! U_1 = HMAC(P, S || INT_32_BE(i)),  U_j = HMAC(P, U_{j-1})
//! ```
//!
//! All state is fixed-size and lane-private. The shared salt is only read;
//! the counter is appended to a local copy.

use crate::kernels::codec::{load_be, put_byte_be, store_le_masked};
use crate::kernels::constants::{
    BLOCK_WORDS, COUNTER_SIZE, DIGEST_SIZE, DIGEST_WORDS, MAX_SALT_BYTES,
};
use crate::kernels::hmac::{hmac_block, hmac_digest, PadState};

/// Compute `T_index` for one derived-key block.
///
/// `salt` is the external little-endian word buffer with `salt_len` valid
/// bytes. Preconditions: `salt_len <= MAX_SALT_BYTES`, `iterations >= 1`,
/// `index >= 1`.
#[must_use]
pub fn derive_block(
    pads: &PadState,
    salt: &[u32],
    salt_len: usize,
    iterations: u32,
    index: u32,
) -> [u32; DIGEST_WORDS] {
    debug_assert!(salt_len <= MAX_SALT_BYTES);
    debug_assert!(iterations >= 1);

    // Lane-private S || INT_32_BE(i).
    let mut message: [u32; BLOCK_WORDS] = core::array::from_fn(|i| load_be(salt, salt_len, i));
    for (k, byte) in index.to_be_bytes().into_iter().enumerate() {
        put_byte_be(&mut message, salt_len + k, byte);
    }

    let mut u = hmac_block(pads, &message, salt_len + COUNTER_SIZE);
    let mut t = u;
    for _ in 1..iterations {
        u = hmac_digest(pads, &u);
        for (acc, x) in t.iter_mut().zip(u) {
            *acc ^= x;
        }
    }
    t
}

/// Derive `dk_len` bytes into `out` (external little-endian word layout).
///
/// Blocks are emitted 20 bytes at a time; the final block is truncated and
/// the unused bytes of the last written word are zeroed. Words of `out` past
/// `dk_len` are left untouched.
///
/// Preconditions: those of [`derive_block`], and `dk_len <= out.len() * 4`.
pub fn derive(
    pads: &PadState,
    salt: &[u32],
    salt_len: usize,
    iterations: u32,
    out: &mut [u32],
    dk_len: usize,
) {
    debug_assert!(dk_len <= out.len() * 4);

    let mut offset = 0;
    let mut index = 1u32;
    while offset < dk_len {
        let t = derive_block(pads, salt, salt_len, iterations, index);
        let take = (dk_len - offset).min(DIGEST_SIZE);

        let dst = &mut out[offset / 4..];
        for (k, (slot, word)) in dst.iter_mut().zip(t).take(take.div_ceil(4)).enumerate() {
            store_le_masked(slot, word, (take - 4 * k).min(4));
        }

        offset += take;
        index += 1;
    }
}
