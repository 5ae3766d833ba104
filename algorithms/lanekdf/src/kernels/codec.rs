//! Word Codec
//!
//! Batch buffers carry bytes packed little-endian into words; SHA-1 consumes
//! big-endian words. Everything that crosses between the two views goes
//! through here.
//!
//! None of these functions check capacity. Callers size buffers with
//! [`words_for`] and validate lengths before dispatch.

// =============================================================================
// WORD WIDTH
// =============================================================================

/// Storage word of a batch buffer.
///
/// The SHA-1 / SHA-256 family uses `u32`; `u64` is the layout for 64-bit-word
/// hash families and only participates in capacity arithmetic here.
pub trait Word: Copy + Default + Send + Sync + 'static {
    /// Width in bits.
    const BITS: usize;
    /// Width in bytes.
    const BYTES: usize = Self::BITS / 8;

    /// Reverse the byte order within the word.
    #[must_use]
    fn swap_endian(self) -> Self;
}

impl Word for u32 {
    const BITS: usize = 32;

    #[inline]
    fn swap_endian(self) -> Self {
        self.swap_bytes()
    }
}

impl Word for u64 {
    const BITS: usize = 64;

    #[inline]
    fn swap_endian(self) -> Self {
        self.swap_bytes()
    }
}

// =============================================================================
// SIZING
// =============================================================================

/// `ceil(bits / word_bits)`.
#[must_use]
pub const fn ceil_div(bits: usize, word_bits: usize) -> usize {
    bits.div_ceil(word_bits)
}

/// Number of `W` words needed to hold `bytes` bytes.
#[must_use]
pub const fn words_for<W: Word>(bytes: usize) -> usize {
    ceil_div(bytes * 8, W::BITS)
}

// =============================================================================
// EXTERNAL (LITTLE-ENDIAN) VIEW
// =============================================================================

/// Reverse the byte order of a 32-bit word.
#[inline]
#[must_use]
pub const fn swap_endian(word: u32) -> u32 {
    word.swap_bytes()
}

/// Pack `bytes` little-endian into `words`, zero-filling the rest.
///
/// Returns the number of words covered by `bytes`.
/// Precondition: `bytes.len() <= words.len() * 4`.
pub fn bytes_to_words(bytes: &[u8], words: &mut [u32]) -> usize {
    debug_assert!(bytes.len() <= words.len() * 4);

    words.fill(0);
    for (word, chunk) in words.iter_mut().zip(bytes.chunks(4)) {
        let mut raw = [0u8; 4];
        raw[..chunk.len()].copy_from_slice(chunk);
        *word = u32::from_le_bytes(raw);
    }
    words_for::<u32>(bytes.len())
}

/// Unpack little-endian `words` into `out`, stopping at `out.len()` bytes.
pub fn words_to_bytes(words: &[u32], out: &mut [u8]) {
    debug_assert!(out.len() <= words.len() * 4);

    for (chunk, word) in out.chunks_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes()[..chunk.len()]);
    }
}

// =============================================================================
// INTERNAL (BIG-ENDIAN) VIEW
// =============================================================================

/// Big-endian load of word `index` from a little-endian buffer holding
/// `len` valid bytes.
///
/// Bytes past `len` in the trailing partial word are masked to zero; words
/// entirely past `len` read as zero.
#[inline]
#[must_use]
pub fn load_be(words: &[u32], len: usize, index: usize) -> u32 {
    let start = index * 4;
    if start >= len {
        return 0;
    }

    let word = swap_endian(words[index]);
    match len - start {
        1 => word & 0xFF00_0000,
        2 => word & 0xFFFF_0000,
        3 => word & 0xFFFF_FF00,
        _ => word,
    }
}

/// OR `byte` into position `pos` of a big-endian word block.
#[inline]
pub fn put_byte_be(block: &mut [u32], pos: usize, byte: u8) {
    block[pos / 4] |= u32::from(byte) << (24 - 8 * (pos % 4));
}

/// Store a big-endian state word into the little-endian external buffer,
/// keeping only the first `valid` bytes (`1..=4`) and zeroing the rest.
#[inline]
pub fn store_le_masked(dst: &mut u32, word: u32, valid: usize) {
    debug_assert!((1..=4).contains(&valid));

    let le = swap_endian(word);
    *dst = match valid {
        1 => le & 0x0000_00FF,
        2 => le & 0x0000_FFFF,
        3 => le & 0x00FF_FFFF,
        _ => le,
    };
}
