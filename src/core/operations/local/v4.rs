//! v4.local: XChaCha20 with `BLAKE2b`-derived keys and a `BLAKE2b`-MAC tag.
//!
//! ```text
//! Ek || n2 = BLAKE2b-MAC(key, "paseto-encryption-key" || n, 56)
//! Ak       = BLAKE2b-MAC(key, "paseto-auth-key-for-aead" || n, 32)
//! c        = XChaCha20(Ek, n2, m)
//! t        = BLAKE2b-MAC(Ak, PAE(h, n, c, f, i), 32)
//! ```

use blake2::digest::consts::{U32, U56};
use blake2::digest::{FixedOutput, KeyInit, Update};
use blake2::Blake2bMac;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::XChaCha20;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::{AUTH_KEY_DOMAIN, ENCRYPTION_KEY_DOMAIN};
use crate::core::error::{FormatError, PasetoError, PasetoResult};
use crate::core::operations::pae::PreAuth;
use crate::core::registry::{Algorithm, LocalCipher, SealedParts};
use crate::core::version::Version;

/// Key size (32 bytes).
pub const KEY_SIZE: usize = 32;

/// Nonce size (32 bytes).
pub const NONCE_SIZE: usize = 32;

/// Tag size (32 bytes).
pub const TAG_SIZE: usize = 32;

type Blake2bMac56 = Blake2bMac<U56>;
type Blake2bMac32 = Blake2bMac<U32>;

/// Derived per-token keys.
struct TokenKeys {
    encryption_key: Zeroizing<[u8; 32]>,
    counter_nonce: [u8; 24],
    auth_key: Zeroizing<[u8; 32]>,
}

fn mac32(key: &[u8], parts: &[&[u8]]) -> PasetoResult<[u8; 32]> {
    let mut mac = <Blake2bMac32 as KeyInit>::new_from_slice(key)
        .map_err(|_| PasetoError::from(FormatError::InvalidKey))?;
    for part in parts {
        <Blake2bMac32 as Update>::update(&mut mac, part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&<Blake2bMac32 as FixedOutput>::finalize_fixed(mac));
    Ok(out)
}

fn derive_keys(key: &[u8], nonce: &[u8]) -> PasetoResult<TokenKeys> {
    let mut kdf = <Blake2bMac56 as KeyInit>::new_from_slice(key)
        .map_err(|_| PasetoError::from(FormatError::InvalidKey))?;
    <Blake2bMac56 as Update>::update(&mut kdf, ENCRYPTION_KEY_DOMAIN);
    <Blake2bMac56 as Update>::update(&mut kdf, nonce);
    let mut tmp = Zeroizing::new([0u8; 56]);
    tmp.copy_from_slice(&<Blake2bMac56 as FixedOutput>::finalize_fixed(kdf));

    let mut encryption_key = Zeroizing::new([0u8; 32]);
    encryption_key.copy_from_slice(&tmp[..32]);
    let mut counter_nonce = [0u8; 24];
    counter_nonce.copy_from_slice(&tmp[32..]);

    let auth_key = Zeroizing::new(mac32(key, &[AUTH_KEY_DOMAIN, nonce])?);

    Ok(TokenKeys {
        encryption_key,
        counter_nonce,
        auth_key,
    })
}

fn apply_keystream(keys: &TokenKeys, buf: &mut [u8]) {
    let mut cipher = XChaCha20::new(&(*keys.encryption_key).into(), &keys.counter_nonce.into());
    cipher.apply_keystream(buf);
}

/// The v4.local cipher.
#[derive(Debug, Clone, Copy, Default)]
pub struct V4Local;

impl LocalCipher for V4Local {
    fn seal(
        &self,
        key: &[u8],
        random: &[u8],
        plaintext: &[u8],
        pre_auth: &PreAuth<'_>,
    ) -> PasetoResult<SealedParts> {
        let keys = derive_keys(key, random)?;

        let mut ciphertext = plaintext.to_vec();
        apply_keystream(&keys, &mut ciphertext);

        let tag = mac32(&*keys.auth_key, &[&pre_auth.encode(&[random, &ciphertext])])?;

        Ok(SealedParts {
            nonce: random.to_vec(),
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
        let keys = derive_keys(key, nonce)?;

        let expected = mac32(&*keys.auth_key, &[&pre_auth.encode(&[nonce, ciphertext])])?;
        if !bool::from(expected[..].ct_eq(tag)) {
            return Err(PasetoError::AuthenticationFailure);
        }

        let mut plaintext = ciphertext.to_vec();
        apply_keystream(&keys, &mut plaintext);
        Ok(plaintext)
    }
}

/// Describes v4.local for the registry.
#[must_use]
pub fn algorithm() -> Algorithm {
    Algorithm::local(
        "XChaCha20-BLAKE2b",
        Version::V4,
        KEY_SIZE,
        NONCE_SIZE,
        TAG_SIZE,
        V4Local,
    )
    .with_implicit_assertions(true)
}
