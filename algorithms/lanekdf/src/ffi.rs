//! C-API Bindings
//!
//! Exposes the batch engine to C/C++ via FFI with pointer checks and a panic
//! boundary. Records cross the boundary as-is: they are `#[repr(C)]` with the
//! default layout.

#![allow(unsafe_code)]

use crate::oneshot;
use crate::types::{DerivationParams, InputRecord, OutputRecord, SaltRecord};

use std::panic;
use std::slice;

// =============================================================================
// RETURN CODES
// =============================================================================

const OK: i32 = 0;
const NULL_POINTER: i32 = -1;
const PANICKED: i32 = -2;
const INVALID: i32 = -3;

// =============================================================================
// BATCH API
// =============================================================================

/// Derive one key per lane.
///
/// # Safety
/// - `inputs` must be valid for `lane_count` `InputRecord`s
/// - `salt` must point to one `SaltRecord`
/// - `outputs` must be valid for `lane_count` writable `OutputRecord`s and must
///   not overlap `inputs`
/// - any pointer may be null when `lane_count == 0`, except `salt`
///
/// # Returns
/// - `0`: Success
/// - `-1`: Null pointer
/// - `-2`: Panic
/// - `-3`: Invalid parameters (zero iterations, `dk_len` over 40 bytes,
///   out-of-range length fields)
#[no_mangle]
pub unsafe extern "C" fn lanekdf_derive_batch(
    inputs: *const InputRecord,
    lane_count: usize,
    salt: *const SaltRecord,
    outputs: *mut OutputRecord,
    iterations: u32,
    dk_len: u32,
) -> i32 {
    if salt.is_null() || (lane_count > 0 && (inputs.is_null() || outputs.is_null())) {
        return NULL_POINTER;
    }

    let result = panic::catch_unwind(|| {
        let (inputs, outputs) = if lane_count == 0 {
            (<&[InputRecord]>::default(), <&mut [OutputRecord]>::default())
        } else {
            (
                slice::from_raw_parts(inputs, lane_count),
                slice::from_raw_parts_mut(outputs, lane_count),
            )
        };
        let params = DerivationParams::new(iterations, dk_len)?;
        oneshot::derive_batch(inputs, &*salt, outputs, &params)
    });

    match result {
        Ok(Ok(())) => OK,
        Ok(Err(_)) => INVALID,
        Err(_) => PANICKED,
    }
}

// =============================================================================
// SCALAR API
// =============================================================================

/// Standard PBKDF2-HMAC-SHA1 for one password.
///
/// # Safety
/// - `password` must be valid for `password_len` bytes (may be null if `password_len == 0`)
/// - `salt` must be valid for `salt_len` bytes (may be null if `salt_len == 0`)
/// - `out` must be valid for `out_len` writable bytes
///
/// # Returns
/// - `0`: Success
/// - `-1`: Null pointer
/// - `-2`: Panic
/// - `-3`: Invalid parameters (zero iterations, password over 128 bytes,
///   salt over 51 bytes)
#[no_mangle]
pub unsafe extern "C" fn lanekdf_pbkdf2_hmac_sha1(
    password: *const u8,
    password_len: usize,
    salt: *const u8,
    salt_len: usize,
    iterations: u32,
    out: *mut u8,
    out_len: usize,
) -> i32 {
    if (password.is_null() && password_len > 0)
        || (salt.is_null() && salt_len > 0)
        || out.is_null()
    {
        return NULL_POINTER;
    }

    let result = panic::catch_unwind(|| {
        let password = bytes(password, password_len);
        let salt = bytes(salt, salt_len);
        let out = slice::from_raw_parts_mut(out, out_len);
        oneshot::pbkdf2_hmac_sha1(password, salt, iterations, out)
    });

    match result {
        Ok(Ok(())) => OK,
        Ok(Err(_)) => INVALID,
        Err(_) => PANICKED,
    }
}

/// Check a derived key in constant time.
///
/// # Safety
/// Same as [`lanekdf_pbkdf2_hmac_sha1`], with `expected` valid for
/// `expected_len` bytes.
///
/// # Returns
/// - `1`: Match
/// - `0`: No match (including parameters the derivation would reject)
/// - `-1`: Null pointer
/// - `-2`: Panic
#[no_mangle]
pub unsafe extern "C" fn lanekdf_verify(
    password: *const u8,
    password_len: usize,
    salt: *const u8,
    salt_len: usize,
    iterations: u32,
    expected: *const u8,
    expected_len: usize,
) -> i32 {
    if (password.is_null() && password_len > 0)
        || (salt.is_null() && salt_len > 0)
        || expected.is_null()
    {
        return NULL_POINTER;
    }

    let result = panic::catch_unwind(|| {
        let password = bytes(password, password_len);
        let salt = bytes(salt, salt_len);
        let expected = slice::from_raw_parts(expected, expected_len);
        oneshot::verify(password, salt, iterations, expected)
    });

    match result {
        Ok(true) => 1,
        Ok(false) => 0,
        Err(_) => PANICKED,
    }
}

/// Null-tolerant view of `len` bytes at `ptr`.
unsafe fn bytes<'a>(ptr: *const u8, len: usize) -> &'a [u8] {
    if len == 0 {
        &[]
    } else {
        slice::from_raw_parts(ptr, len)
    }
}

// =============================================================================
// INTROSPECTION
// =============================================================================

/// Number of worker threads batch calls run on (`1` when serial).
#[no_mangle]
pub extern "C" fn lanekdf_worker_count() -> usize {
    match crate::active_backend() {
        crate::Backend::Serial => 1,
        crate::Backend::Rayon { threads } => threads,
    }
}
