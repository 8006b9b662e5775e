//! v2.local: XChaCha20-Poly1305 with a message-derived nonce.
//!
//! ```text
//! n = BLAKE2b(key = b, m, 24)      where b is 24 random bytes
//! c, t = XChaCha20-Poly1305(key, n, m, aad = PAE(h, n, f))
//! ```
//!
//! v2 predates implicit assertions; they are never part of the PAE input.

use blake2::digest::consts::U24;
use blake2::digest::{FixedOutput, Update};
use blake2::Blake2bMac;
use chacha20poly1305::aead::{AeadInPlace, KeyInit};
use chacha20poly1305::{Tag, XChaCha20Poly1305, XNonce};

use crate::core::error::{FormatError, PasetoError, PasetoResult};
use crate::core::operations::pae::PreAuth;
use crate::core::registry::{Algorithm, LocalCipher, SealedParts};
use crate::core::version::Version;

/// Key size (32 bytes).
pub const KEY_SIZE: usize = 32;

/// Nonce size (24 bytes).
pub const NONCE_SIZE: usize = 24;

/// Tag size (16 bytes, Poly1305).
pub const TAG_SIZE: usize = 16;

type Blake2bMac24 = Blake2bMac<U24>;

fn derive_nonce(random: &[u8], plaintext: &[u8]) -> PasetoResult<[u8; NONCE_SIZE]> {
    let mut mac = <Blake2bMac24 as blake2::digest::KeyInit>::new_from_slice(random)
        .map_err(|_| PasetoError::from(FormatError::InvalidKey))?;
    <Blake2bMac24 as Update>::update(&mut mac, plaintext);

    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(&<Blake2bMac24 as FixedOutput>::finalize_fixed(mac));
    Ok(nonce)
}

fn aead(key: &[u8]) -> PasetoResult<XChaCha20Poly1305> {
    XChaCha20Poly1305::new_from_slice(key).map_err(|_| FormatError::InvalidKey.into())
}

/// The v2.local cipher.
#[derive(Debug, Clone, Copy, Default)]
pub struct V2Local;

impl LocalCipher for V2Local {
    fn seal(
        &self,
        key: &[u8],
        random: &[u8],
        plaintext: &[u8],
        pre_auth: &PreAuth<'_>,
    ) -> PasetoResult<SealedParts> {
        let nonce = derive_nonce(random, plaintext)?;
        let aad = pre_auth.encode_without_assertion(&[&nonce]);

        let mut ciphertext = plaintext.to_vec();
        let tag = aead(key)?
            .encrypt_in_place_detached(XNonce::from_slice(&nonce), &aad, &mut ciphertext)
            .map_err(|_| PasetoError::AuthenticationFailure)?;

        Ok(SealedParts {
            nonce: nonce.to_vec(),
            ciphertext,
            tag: tag.to_vec(),
        })
    }

    fn open(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        tag: &[u8],
        pre_auth: &PreAuth<'_>,
    ) -> PasetoResult<Vec<u8>> {
        if nonce.len() != NONCE_SIZE || tag.len() != TAG_SIZE {
            return Err(FormatError::InvalidFormat.into());
        }
        let aad = pre_auth.encode_without_assertion(&[nonce]);

        let mut plaintext = ciphertext.to_vec();
        aead(key)?
            .decrypt_in_place_detached(
                XNonce::from_slice(nonce),
                &aad,
                &mut plaintext,
                Tag::from_slice(tag),
            )
            .map_err(|_| PasetoError::AuthenticationFailure)?;
        Ok(plaintext)
    }
}

/// Describes v2.local for the registry.
#[must_use]
pub fn algorithm() -> Algorithm {
    Algorithm::local(
        "XChaCha20-Poly1305",
        Version::V2,
        KEY_SIZE,
        NONCE_SIZE,
        TAG_SIZE,
        V2Local,
    )
}
