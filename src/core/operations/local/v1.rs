//! v1.local: AES-256-CTR with HKDF-SHA384 keys and a message-derived nonce.
//!
//! ```text
//! n  = HMAC-SHA384(key = b, m)[..32]      where b is 32 random bytes
//! Ek = HKDF-SHA384(salt = n[..16], ikm = key, info = "paseto-encryption-key", 32)
//! Ak = HKDF-SHA384(salt = n[..16], ikm = key, info = "paseto-auth-key-for-aead", 32)
//! c  = AES-256-CTR(Ek, n[16..], m)
//! t  = HMAC-SHA384(Ak, PAE(h, n, c, f))
//! ```
//!
//! Legacy. Only compiled with the `v1` feature.

use aes::cipher::{KeyIvInit, StreamCipher};
use aes::Aes256;
use ctr::Ctr128BE;
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::Sha384;
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

/// Tag size (48 bytes, HMAC-SHA384).
pub const TAG_SIZE: usize = 48;

type HmacSha384 = Hmac<Sha384>;

fn hmac(key: &[u8], message: &[u8]) -> PasetoResult<HmacSha384> {
    let mut mac =
        HmacSha384::new_from_slice(key).map_err(|_| PasetoError::from(FormatError::InvalidKey))?;
    mac.update(message);
    Ok(mac)
}

fn derive_nonce(random: &[u8], plaintext: &[u8]) -> PasetoResult<[u8; NONCE_SIZE]> {
    let digest = hmac(random, plaintext)?.finalize().into_bytes();
    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(&digest[..NONCE_SIZE]);
    Ok(nonce)
}

fn derive_keys(key: &[u8], nonce: &[u8]) -> PasetoResult<(Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>)> {
    let kdf = Hkdf::<Sha384>::new(Some(&nonce[..16]), key);

    let mut encryption_key = Zeroizing::new([0u8; 32]);
    kdf.expand(ENCRYPTION_KEY_DOMAIN, &mut encryption_key[..])
        .map_err(|_| PasetoError::from(FormatError::InvalidKey))?;

    let mut auth_key = Zeroizing::new([0u8; 32]);
    kdf.expand(AUTH_KEY_DOMAIN, &mut auth_key[..])
        .map_err(|_| PasetoError::from(FormatError::InvalidKey))?;

    Ok((encryption_key, auth_key))
}

fn apply_keystream(encryption_key: &[u8; 32], nonce: &[u8], buf: &mut [u8]) {
    let mut counter = [0u8; 16];
    counter.copy_from_slice(&nonce[16..32]);
    let mut cipher = Ctr128BE::<Aes256>::new(&(*encryption_key).into(), &counter.into());
    cipher.apply_keystream(buf);
}

/// The v1.local cipher.
#[derive(Debug, Clone, Copy, Default)]
pub struct V1Local;

impl LocalCipher for V1Local {
    fn seal(
        &self,
        key: &[u8],
        random: &[u8],
        plaintext: &[u8],
        pre_auth: &PreAuth<'_>,
    ) -> PasetoResult<SealedParts> {
        let nonce = derive_nonce(random, plaintext)?;
        let (encryption_key, auth_key) = derive_keys(key, &nonce)?;

        let mut ciphertext = plaintext.to_vec();
        apply_keystream(&encryption_key, &nonce, &mut ciphertext);

        let tag = hmac(
            &*auth_key,
            &pre_auth.encode_without_assertion(&[&nonce, &ciphertext]),
        )?
        .finalize()
        .into_bytes();

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
        if nonce.len() != NONCE_SIZE {
            return Err(FormatError::InvalidFormat.into());
        }
        let (encryption_key, auth_key) = derive_keys(key, nonce)?;

        hmac(
            &*auth_key,
            &pre_auth.encode_without_assertion(&[nonce, ciphertext]),
        )?
        .verify_slice(tag)
        .map_err(|_| PasetoError::AuthenticationFailure)?;

        let mut plaintext = ciphertext.to_vec();
        apply_keystream(&encryption_key, nonce, &mut plaintext);
        Ok(plaintext)
    }
}

/// Describes v1.local for the registry.
#[must_use]
pub fn algorithm() -> Algorithm {
    Algorithm::local(
        "AES-256-CTR-HMAC-SHA384 (legacy)",
        Version::V1,
        KEY_SIZE,
        NONCE_SIZE,
        TAG_SIZE,
        V1Local,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::operations::local::test_support;

    #[test]
    fn test_seal_open_and_tamper() -> PasetoResult<()> {
        test_support::exercise(&algorithm())
    }

    #[test]
    fn test_nonce_binds_message() -> PasetoResult<()> {
        let random = [0x44u8; NONCE_SIZE];
        assert_ne!(derive_nonce(&random, b"a")?, derive_nonce(&random, b"b")?);
        Ok(())
    }
}
