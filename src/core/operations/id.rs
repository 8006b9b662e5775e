//! Key ID computation operations.
//!
//! This module provides the ID hashing function used to compute key identifiers
//! (lid, pid, sid) from PASERK keys.
//!
//! The hash algorithm depends on the version:
//! - v1/v3: SHA-384, truncated to 33 bytes (264 bits)
//! - v2/v4: `BLAKE2b` with 33-byte (264-bit) output

use blake2::digest::consts::U33;
use blake2::Blake2b;
use sha2::{Digest, Sha384};

use crate::core::version::{IdHash, Version};

/// ID hash output size (33 bytes = 264 bits).
pub const ID_HASH_SIZE: usize = 33;

/// Computes the PASERK ID hash.
///
/// The ID is computed by hashing the concatenation of the target id header
/// (e.g. `"k4.lid."`) and the full PASERK string representation of the key.
/// Hashing the encoded key rather than the raw bytes binds the id to the
/// version and type of the key it was derived from.
#[must_use]
pub fn compute_id(version: Version, id_header: &str, paserk_string: &str) -> [u8; ID_HASH_SIZE] {
    match version.descriptor().id_hash {
        IdHash::Blake2b264 => compute_id_blake2b(id_header, paserk_string),
        IdHash::Sha384Truncated => compute_id_sha384(id_header, paserk_string),
    }
}

fn compute_id_blake2b(id_header: &str, paserk_string: &str) -> [u8; ID_HASH_SIZE] {
    let mut hasher = Blake2b::<U33>::new();
    hasher.update(id_header.as_bytes());
    hasher.update(paserk_string.as_bytes());

    let mut output = [0u8; ID_HASH_SIZE];
    output.copy_from_slice(&hasher.finalize());
    output
}

fn compute_id_sha384(id_header: &str, paserk_string: &str) -> [u8; ID_HASH_SIZE] {
    let mut hasher = Sha384::new();
    hasher.update(id_header.as_bytes());
    hasher.update(paserk_string.as_bytes());
    let result = hasher.finalize();

    let mut output = [0u8; ID_HASH_SIZE];
    output.copy_from_slice(&result[..ID_HASH_SIZE]);
    output
}
