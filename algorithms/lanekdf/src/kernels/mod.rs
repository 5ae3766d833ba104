//! Scalar Kernels
//!
//! The per-lane building blocks: word packing, SHA-1 compression, HMAC over
//! cached pad states and the PBKDF2 block loop. Everything here works on
//! fixed-size word arrays and never allocates.

pub mod codec;
pub mod constants;
pub mod hmac;
pub mod pbkdf2;
pub mod sha1;
