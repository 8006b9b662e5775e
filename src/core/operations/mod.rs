//! Cryptographic operations for PASETO and PASERK.
//!
//! - [`pae`] - Pre-Authentication Encoding
//! - [`id`] - Key ID computation (hashing)
//! - [`local`] - Authenticated encryption for `local` tokens
//! - [`public`] - Signatures for `public` tokens
//! - [`paserk`] - Key serialization and parsing
//! - [`token`] - Token sealing and opening

pub mod id;
pub mod local;
pub mod pae;
pub mod paserk;
pub mod public;
pub mod token;

use rand_core::{OsRng, TryRngCore};

use crate::core::error::{PasetoError, PasetoResult};
use crate::core::registry::Algorithm;

/// Fills `buf` from the OS CSPRNG.
pub(crate) fn fill_random(buf: &mut [u8]) -> PasetoResult<()> {
    OsRng.try_fill_bytes(buf).map_err(|err| {
        tracing::error!(error = %err, "OS random number generator failed");
        PasetoError::RngFailure
    })
}

/// The algorithms compiled in through cargo features.
pub(crate) fn default_algorithms() -> Vec<Algorithm> {
    #[allow(unused_mut)]
    let mut algorithms = Vec::new();

    #[cfg(feature = "v1")]
    algorithms.push(local::v1::algorithm());

    #[cfg(feature = "v2")]
    {
        algorithms.push(local::v2::algorithm());
        algorithms.push(public::ed25519::v2_algorithm());
    }

    #[cfg(feature = "v3")]
    {
        algorithms.push(local::v3::algorithm());
        algorithms.push(public::p384::algorithm());
    }

    #[cfg(feature = "v4")]
    {
        algorithms.push(local::v4::algorithm());
        algorithms.push(public::ed25519::v4_algorithm());
    }

    algorithms
}
