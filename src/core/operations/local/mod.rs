//! Authenticated encryption for the `local` purpose.
//!
//! | Version | Cipher | Tag | Nonce |
//! |---------|--------|-----|-------|
//! | v1 | AES-256-CTR, HKDF-SHA384 keys | HMAC-SHA384 | HMAC of the message |
//! | v2 | XChaCha20-Poly1305 | Poly1305 | `BLAKE2b` of the message |
//! | v3 | AES-256-CTR, HKDF-SHA384 keys | HMAC-SHA384 | random |
//! | v4 | XChaCha20, `BLAKE2b` keys | `BLAKE2b`-MAC | random |
//!
//! Each submodule exposes a [`LocalCipher`](crate::core::registry::LocalCipher)
//! and an `algorithm()` constructor describing its sizes.

#[cfg(feature = "v1")]
pub mod v1;

#[cfg(feature = "v2")]
pub mod v2;

#[cfg(feature = "v3")]
pub mod v3;

#[cfg(feature = "v4")]
pub mod v4;

/// Domain separation for encryption key derivation.
#[cfg(any(feature = "v1", feature = "v3", feature = "v4"))]
pub(crate) const ENCRYPTION_KEY_DOMAIN: &[u8] = b"paseto-encryption-key";

/// Domain separation for authentication key derivation.
#[cfg(any(feature = "v1", feature = "v3", feature = "v4"))]
pub(crate) const AUTH_KEY_DOMAIN: &[u8] = b"paseto-auth-key-for-aead";

#[cfg(test)]
#[cfg(any(feature = "v1", feature = "v2", feature = "v3", feature = "v4"))]
pub(crate) mod test_support {
    use crate::core::error::{PasetoError, PasetoResult};
    use crate::core::operations::pae::PreAuth;
    use crate::core::registry::Algorithm;

    /// Seals and opens a message, then checks that every tampered field fails.
    pub(crate) fn exercise(algorithm: &Algorithm) -> PasetoResult<()> {
        let crate::core::registry::Primitive::Aead(cipher) = algorithm.primitive() else {
            panic!("not a local algorithm");
        };
        let key = vec![0x42u8; algorithm.key_len()];
        let random = vec![0x07u8; algorithm.nonce_len()];
        let assertion: &[u8] = if algorithm.supports_implicit_assertions() {
            b"assert"
        } else {
            b""
        };
        let ctx = PreAuth {
            header: "vX.local.",
            footer: b"footer",
            implicit_assertion: assertion,
        };

        let sealed = cipher.seal(&key, &random, b"hello world", &ctx)?;
        assert_eq!(sealed.nonce.len(), algorithm.nonce_len());
        assert_eq!(sealed.tag.len(), algorithm.tag_len());
        assert_eq!(sealed.ciphertext.len(), 11);
        assert_ne!(sealed.ciphertext, b"hello world");

        let opened = cipher.open(&key, &sealed.nonce, &sealed.ciphertext, &sealed.tag, &ctx)?;
        assert_eq!(opened, b"hello world");

        let mut bad_ct = sealed.ciphertext.clone();
        bad_ct[0] ^= 1;
        let mut bad_tag = sealed.tag.clone();
        bad_tag[0] ^= 1;
        let mut bad_nonce = sealed.nonce.clone();
        bad_nonce[0] ^= 1;
        let mut bad_key = key.clone();
        bad_key[0] ^= 1;
        let bad_footer = PreAuth {
            footer: b"Footer",
            ..ctx
        };

        let attempts = [
            cipher.open(&key, &sealed.nonce, &bad_ct, &sealed.tag, &ctx),
            cipher.open(&key, &sealed.nonce, &sealed.ciphertext, &bad_tag, &ctx),
            cipher.open(&key, &bad_nonce, &sealed.ciphertext, &sealed.tag, &ctx),
            cipher.open(&bad_key, &sealed.nonce, &sealed.ciphertext, &sealed.tag, &ctx),
            cipher.open(&key, &sealed.nonce, &sealed.ciphertext, &sealed.tag, &bad_footer),
        ];
        for result in attempts {
            assert!(matches!(result, Err(PasetoError::AuthenticationFailure)));
        }

        if algorithm.supports_implicit_assertions() {
            let other = PreAuth {
                implicit_assertion: b"other",
                ..ctx
            };
            let result = cipher.open(&key, &sealed.nonce, &sealed.ciphertext, &sealed.tag, &other);
            assert!(matches!(result, Err(PasetoError::AuthenticationFailure)));
        }
        Ok(())
    }
}
