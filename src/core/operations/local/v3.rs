//! v3.local: AES-256-CTR with HKDF-SHA384 keys and an HMAC-SHA384 tag.
//!
//! ```text
//! Ek || n2 = HKDF-SHA384(ikm = key, info = "paseto-encryption-key" || n, 48)
//! Ak       = HKDF-SHA384(ikm = key, info = "paseto-auth-key-for-aead" || n, 48)
//! c        = AES-256-CTR(Ek, n2, m)
//! t        = HMAC-SHA384(Ak, PAE(h, n, c, f, i))
//! ```

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

struct TokenKeys {
    encryption_key: Zeroizing<[u8; 32]>,
    counter: [u8; 16],
    auth_key: Zeroizing<[u8; 48]>,
}

fn derive_keys(key: &[u8], nonce: &[u8]) -> PasetoResult<TokenKeys> {
    let kdf = Hkdf::<Sha384>::new(None, key);

    let mut tmp = Zeroizing::new([0u8; 48]);
    kdf.expand_multi_info(&[ENCRYPTION_KEY_DOMAIN, nonce], &mut tmp[..])
        .map_err(|_| PasetoError::from(FormatError::InvalidKey))?;

    let mut auth_key = Zeroizing::new([0u8; 48]);
    kdf.expand_multi_info(&[AUTH_KEY_DOMAIN, nonce], &mut auth_key[..])
        .map_err(|_| PasetoError::from(FormatError::InvalidKey))?;

    let mut encryption_key = Zeroizing::new([0u8; 32]);
    encryption_key.copy_from_slice(&tmp[..32]);
    let mut counter = [0u8; 16];
    counter.copy_from_slice(&tmp[32..]);

    Ok(TokenKeys {
        encryption_key,
        counter,
        auth_key,
    })
}

fn authenticator(auth_key: &[u8], pae: &[u8]) -> PasetoResult<HmacSha384> {
    let mut mac = HmacSha384::new_from_slice(auth_key)
        .map_err(|_| PasetoError::from(FormatError::InvalidKey))?;
    mac.update(pae);
    Ok(mac)
}

fn apply_keystream(keys: &TokenKeys, buf: &mut [u8]) {
    let mut cipher =
        Ctr128BE::<Aes256>::new(&(*keys.encryption_key).into(), &keys.counter.into());
    cipher.apply_keystream(buf);
}

/// The v3.local cipher.
#[derive(Debug, Clone, Copy, Default)]
pub struct V3Local;

impl LocalCipher for V3Local {
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

        let mac = authenticator(&*keys.auth_key, &pre_auth.encode(&[random, &ciphertext]))?;

        Ok(SealedParts {
            nonce: random.to_vec(),
            ciphertext,
            tag: mac.finalize().into_bytes().to_vec(),
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

        // verify_slice compares in constant time
        authenticator(&*keys.auth_key, &pre_auth.encode(&[nonce, ciphertext]))?
            .verify_slice(tag)
            .map_err(|_| PasetoError::AuthenticationFailure)?;

        let mut plaintext = ciphertext.to_vec();
        apply_keystream(&keys, &mut plaintext);
        Ok(plaintext)
    }
}

/// Describes v3.local for the registry.
#[must_use]
pub fn algorithm() -> Algorithm {
    Algorithm::local(
        "AES-256-CTR-HMAC-SHA384",
        Version::V3,
        KEY_SIZE,
        NONCE_SIZE,
        TAG_SIZE,
        V3Local,
    )
    .with_implicit_assertions(true)
}
