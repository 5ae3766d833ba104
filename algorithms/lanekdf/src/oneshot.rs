//! Public API Layer
//!
//! Checked entry points. The kernels and the lane dispatcher trust their
//! inputs; everything a caller can get wrong is rejected here, before any
//! lane runs.

use crate::engine::{dispatcher, parallel};
use crate::kernels::codec::{bytes_to_words, words_for};
use crate::kernels::constants::{DIGEST_SIZE, MAX_SALT_BYTES, PASSWORD_CAPACITY, PASSWORD_WORDS};
use crate::kernels::hmac::{self, PadState};
use crate::kernels::pbkdf2;
use crate::types::{
    BatchError, CapacityError, DerivationParams, Field, InputRecord, OutputRecord, SaltRecord,
};
use subtle::{Choice, ConstantTimeEq};
use tracing::debug;

// Scratch for the longest salt a single block can carry.
const SALT_SCRATCH_WORDS: usize = words_for::<u32>(MAX_SALT_BYTES);

// =============================================================================
// BATCH API
// =============================================================================

/// Derive one key per lane.
///
/// Every lane derives `params.dk_len()` bytes from its own password and the
/// shared salt. Lanes run on the rayon pool of the calling context when the
/// `multithread` feature is enabled; the result does not depend on it.
///
/// # Errors
/// - [`BatchError::LaneCountMismatch`] if `inputs` and `outputs` differ in length.
/// - [`BatchError::Capacity`] if `dk_len` exceeds the output capacity, the
///   salt exceeds its capacity (or the 51 bytes one block can carry), or any
///   password length field exceeds the input capacity.
///
/// # Example
/// ```rust
/// use lanekdf::{derive_batch, DerivationParams, InputRecord, OutputRecord, SaltRecord};
///
/// let inputs: [InputRecord; 1] = [InputRecord::from_bytes(b"password")?];
/// let salt: SaltRecord = SaltRecord::from_bytes(b"salt")?;
/// let mut outputs: [OutputRecord; 1] = [OutputRecord::default()];
///
/// derive_batch(&inputs, &salt, &mut outputs, &DerivationParams::new(2, 20)?)?;
/// assert_eq!(outputs[0].derived_key(20)[..4], [0xea, 0x6c, 0x01, 0x4d]);
/// # Ok::<(), lanekdf::BatchError>(())
/// ```
pub fn derive_batch<const P: usize, const S: usize, const O: usize>(
    inputs: &[InputRecord<P>],
    salt: &SaltRecord<S>,
    outputs: &mut [OutputRecord<O>],
    params: &DerivationParams,
) -> Result<(), BatchError> {
    check_batch(inputs, salt, outputs, params)?;
    parallel::derive_all(inputs, salt, outputs, params);
    Ok(())
}

/// [`derive_batch`] on the calling thread, lanes in order.
///
/// # Errors
/// Same as [`derive_batch`].
pub fn derive_batch_serial<const P: usize, const S: usize, const O: usize>(
    inputs: &[InputRecord<P>],
    salt: &SaltRecord<S>,
    outputs: &mut [OutputRecord<O>],
    params: &DerivationParams,
) -> Result<(), BatchError> {
    check_batch(inputs, salt, outputs, params)?;
    parallel::execute_serial(
        dispatcher::derive_lane::<P, S, O>,
        inputs,
        salt,
        outputs,
        params,
    );
    Ok(())
}

fn check_batch<const P: usize, const S: usize, const O: usize>(
    inputs: &[InputRecord<P>],
    salt: &SaltRecord<S>,
    outputs: &[OutputRecord<O>],
    params: &DerivationParams,
) -> Result<(), BatchError> {
    if inputs.len() != outputs.len() {
        return Err(BatchError::LaneCountMismatch {
            inputs: inputs.len(),
            outputs: outputs.len(),
        });
    }

    let output_capacity = OutputRecord::<O>::CAPACITY;
    if params.dk_len() > output_capacity {
        return Err(CapacityError::new(Field::DerivedKey, params.dk_len(), output_capacity).into());
    }

    let salt_capacity = MAX_SALT_BYTES.min(SaltRecord::<S>::CAPACITY);
    if salt.len() > salt_capacity {
        return Err(CapacityError::new(Field::Salt, salt.len(), salt_capacity).into());
    }

    let input_capacity = InputRecord::<P>::CAPACITY;
    if let Some((lane, input)) = inputs
        .iter()
        .enumerate()
        .find(|(_, input)| input.len() > input_capacity)
    {
        debug!(lane, length = input.len(), "password length field out of range");
        return Err(CapacityError::new(Field::Password, input.len(), input_capacity).into());
    }

    Ok(())
}

// =============================================================================
// SCALAR API
// =============================================================================

/// Standard PBKDF2-HMAC-SHA1 for one password, any output length.
///
/// Fills all of `out`. Passwords may be up to the input record capacity
/// (128 bytes) and salts up to [`MAX_SALT_BYTES`].
///
/// # Errors
/// - [`BatchError::ZeroIterations`] if `iterations == 0`.
/// - [`BatchError::Capacity`] if the password or salt is too long, or `out`
///   needs more than `2^32 - 1` blocks.
///
/// # Example
/// ```rust
/// let mut key = [0u8; 20];
/// lanekdf::pbkdf2_hmac_sha1(b"password", b"salt", 1, &mut key)?;
/// assert_eq!(key[..4], [0x0c, 0x60, 0xc8, 0x0f]);
/// # Ok::<(), lanekdf::BatchError>(())
/// ```
pub fn pbkdf2_hmac_sha1(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out: &mut [u8],
) -> Result<(), BatchError> {
    let kdf = ScalarKdf::new(password, salt, iterations, out.len())?;
    for (chunk, index) in out.chunks_mut(DIGEST_SIZE).zip(1..=u32::MAX) {
        let block = kdf.block(index);
        chunk.copy_from_slice(&block[..chunk.len()]);
    }
    Ok(())
}

/// Check a derived key in constant time.
///
/// Returns `false` for an empty `expected` and for parameters
/// [`pbkdf2_hmac_sha1`] would reject.
///
/// # Example
/// ```rust
/// let mut key = [0u8; 32];
/// lanekdf::pbkdf2_hmac_sha1(b"hunter2", b"NaCl", 1000, &mut key)?;
/// assert!(lanekdf::verify(b"hunter2", b"NaCl", 1000, &key));
/// assert!(!lanekdf::verify(b"hunter3", b"NaCl", 1000, &key));
/// # Ok::<(), lanekdf::BatchError>(())
/// ```
#[must_use]
pub fn verify(password: &[u8], salt: &[u8], iterations: u32, expected: &[u8]) -> bool {
    if expected.is_empty() {
        return false;
    }
    let Ok(kdf) = ScalarKdf::new(password, salt, iterations, expected.len()) else {
        return false;
    };

    let mut equal = Choice::from(1);
    for (chunk, index) in expected.chunks(DIGEST_SIZE).zip(1..=u32::MAX) {
        let block = kdf.block(index);
        equal &= block[..chunk.len()].ct_eq(chunk);
    }
    equal.into()
}

/// Validated scalar derivation state: pad states plus a block-sized salt copy.
struct ScalarKdf {
    pads: PadState,
    salt: [u32; SALT_SCRATCH_WORDS],
    salt_len: usize,
    iterations: u32,
}

impl ScalarKdf {
    fn new(
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        dk_len: usize,
    ) -> Result<Self, BatchError> {
        if iterations == 0 {
            return Err(BatchError::ZeroIterations);
        }
        if password.len() > PASSWORD_CAPACITY {
            return Err(
                CapacityError::new(Field::Password, password.len(), PASSWORD_CAPACITY).into(),
            );
        }
        if salt.len() > MAX_SALT_BYTES {
            return Err(CapacityError::new(Field::Salt, salt.len(), MAX_SALT_BYTES).into());
        }
        let max_key =
            usize::try_from(u32::MAX).map_or(usize::MAX, |n| n.saturating_mul(DIGEST_SIZE));
        if dk_len > max_key {
            return Err(CapacityError::new(Field::DerivedKey, dk_len, max_key).into());
        }

        let mut key = [0u32; PASSWORD_WORDS];
        bytes_to_words(password, &mut key);
        let mut words = [0u32; SALT_SCRATCH_WORDS];
        bytes_to_words(salt, &mut words);

        Ok(Self {
            pads: hmac::precompute(&key, password.len()),
            salt: words,
            salt_len: salt.len(),
            iterations,
        })
    }

    /// `T_index` in PBKDF2 byte order.
    fn block(&self, index: u32) -> [u8; DIGEST_SIZE] {
        let t = pbkdf2::derive_block(&self.pads, &self.salt, self.salt_len, self.iterations, index);
        let mut bytes = [0u8; DIGEST_SIZE];
        for (dst, word) in bytes.chunks_exact_mut(4).zip(t) {
            dst.copy_from_slice(&word.to_be_bytes());
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(passwords: &[&[u8]]) -> Vec<InputRecord> {
        passwords
            .iter()
            .map(|p| InputRecord::from_bytes(p).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_derive_batch_rfc6070() -> Result<(), BatchError> {
        let inputs = records(&[b"password", b"password"]);
        let salt: SaltRecord = SaltRecord::from_bytes(b"salt")?;
        let mut outputs: Vec<OutputRecord> = vec![OutputRecord::default(); 2];

        derive_batch(&inputs, &salt, &mut outputs, &DerivationParams::new(2, 20)?)?;

        for out in &outputs {
            assert_eq!(
                hex::encode(out.derived_key(20)),
                "ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957"
            );
        }
        Ok(())
    }

    #[test]
    fn test_batch_rejects_bad_shapes() -> Result<(), BatchError> {
        let inputs = records(&[b"a", b"b"]);
        let salt: SaltRecord = SaltRecord::default();
        let params = DerivationParams::new(1, 20)?;

        let mut one: Vec<OutputRecord> = vec![OutputRecord::default(); 1];
        assert_eq!(
            derive_batch(&inputs, &salt, &mut one, &params),
            Err(BatchError::LaneCountMismatch {
                inputs: 2,
                outputs: 1
            })
        );

        let mut two: Vec<OutputRecord> = vec![OutputRecord::default(); 2];
        let too_long = DerivationParams::new(1, 41)?;
        assert_eq!(
            derive_batch_serial(&inputs, &salt, &mut two, &too_long),
            Err(CapacityError::new(Field::DerivedKey, 41, 40).into())
        );

        let mut forged = inputs.clone();
        forged[1].length = 129;
        assert_eq!(
            derive_batch(&forged, &salt, &mut two, &params),
            Err(CapacityError::new(Field::Password, 129, 128).into())
        );
        assert_eq!(two, vec![OutputRecord::default(); 2], "nothing dispatched");
        Ok(())
    }

    #[test]
    fn test_batch_salt_bounded_by_block() -> Result<(), BatchError> {
        let inputs = records(&[b"pw"]);
        let mut outputs: Vec<OutputRecord> = vec![OutputRecord::default(); 1];
        let params = DerivationParams::new(1, 20)?;

        let wide = SaltRecord::<16>::from_bytes(&[7u8; 52])?;
        assert_eq!(
            derive_batch(&inputs, &wide, &mut outputs, &params),
            Err(CapacityError::new(Field::Salt, 52, MAX_SALT_BYTES).into())
        );

        let fits = SaltRecord::<16>::from_bytes(&[7u8; 51])?;
        derive_batch(&inputs, &fits, &mut outputs, &params)?;

        let mut expected = [0u8; 20];
        pbkdf2_hmac_sha1(b"pw", &[7u8; 51], 1, &mut expected)?;
        assert_eq!(outputs[0].derived_key(20), expected);
        Ok(())
    }

    #[test]
    fn test_serial_matches_parallel() -> Result<(), BatchError> {
        let inputs = records(&[b"one", b"two", b"three", b"", &[0xA5; 128]]);
        let salt: SaltRecord = SaltRecord::from_bytes(b"saltsalt")?;
        let params = DerivationParams::new(3, 40)?;

        let mut a: Vec<OutputRecord> = vec![OutputRecord::default(); inputs.len()];
        let mut b: Vec<OutputRecord> = vec![OutputRecord::default(); inputs.len()];
        derive_batch(&inputs, &salt, &mut a, &params)?;
        derive_batch_serial(&inputs, &salt, &mut b, &params)?;

        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_scalar_any_length() -> Result<(), BatchError> {
        let mut long = [0u8; 100];
        pbkdf2_hmac_sha1(b"password", b"salt", 2, &mut long)?;

        let mut short = [0u8; 20];
        pbkdf2_hmac_sha1(b"password", b"salt", 2, &mut short)?;
        assert_eq!(long[..20], short);

        let mut empty = [0u8; 0];
        pbkdf2_hmac_sha1(b"password", b"salt", 2, &mut empty)?;
        Ok(())
    }

    #[test]
    fn test_scalar_rejects_bad_parameters() {
        let mut out = [0u8; 20];
        assert_eq!(
            pbkdf2_hmac_sha1(b"pw", b"salt", 0, &mut out),
            Err(BatchError::ZeroIterations)
        );
        assert_eq!(
            pbkdf2_hmac_sha1(&[0u8; 129], b"salt", 1, &mut out),
            Err(CapacityError::new(Field::Password, 129, 128).into())
        );
        assert_eq!(
            pbkdf2_hmac_sha1(b"pw", &[0u8; 52], 1, &mut out),
            Err(CapacityError::new(Field::Salt, 52, 51).into())
        );
    }

    #[test]
    fn test_verify() -> Result<(), BatchError> {
        let mut key = [0u8; 25];
        pbkdf2_hmac_sha1(b"secret", b"pepper", 10, &mut key)?;

        assert!(verify(b"secret", b"pepper", 10, &key));
        assert!(!verify(b"secret", b"pepper", 11, &key));
        assert!(!verify(b"secret", b"salt", 10, &key));

        let mut tampered = key;
        tampered[24] ^= 1;
        assert!(!verify(b"secret", b"pepper", 10, &tampered));

        assert!(!verify(b"secret", b"pepper", 10, &[]));
        assert!(!verify(b"secret", b"pepper", 0, &key));
        Ok(())
    }
}
