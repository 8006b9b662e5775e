//! Ed25519 signatures for v2.public and v4.public.
//!
//! The signed message is `PAE(h, m, f, i)` for v4 and `PAE(h, m, f)` for v2.
//! Secret keys are 64 bytes (`seed || public_key`); the embedded public key
//! must match the one derived from the seed.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::core::error::{FormatError, PasetoError, PasetoResult};
use crate::core::operations::fill_random;
use crate::core::operations::pae::PreAuth;
use crate::core::registry::{Algorithm, SignatureScheme};
use crate::core::version::Version;

/// Secret key size (64 bytes: seed || public key).
pub const SECRET_KEY_SIZE: usize = 64;

/// Public key size (32 bytes).
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Signature size (64 bytes).
pub const SIGNATURE_SIZE: usize = 64;

/// Ed25519 for one token version.
#[derive(Debug, Clone, Copy)]
pub struct Ed25519 {
    implicit_assertions: bool,
}

impl Ed25519 {
    /// The v2 flavour (no implicit assertion in PAE).
    #[must_use]
    pub const fn v2() -> Self {
        Self {
            implicit_assertions: false,
        }
    }

    /// The v4 flavour.
    #[must_use]
    pub const fn v4() -> Self {
        Self {
            implicit_assertions: true,
        }
    }

    fn message(&self, message: &[u8], pre_auth: &PreAuth<'_>) -> Vec<u8> {
        if self.implicit_assertions {
            pre_auth.encode(&[message])
        } else {
            pre_auth.encode_without_assertion(&[message])
        }
    }

    fn signing_key(secret_key: &[u8]) -> PasetoResult<SigningKey> {
        if secret_key.len() != SECRET_KEY_SIZE {
            return Err(FormatError::InvalidKey.into());
        }
        let mut seed = Zeroizing::new([0u8; 32]);
        seed.copy_from_slice(&secret_key[..32]);
        let signing_key = SigningKey::from_bytes(&seed);

        if !bool::from(signing_key.verifying_key().as_bytes()[..].ct_eq(&secret_key[32..])) {
            return Err(FormatError::InvalidKey.into());
        }
        Ok(signing_key)
    }

    fn verifying_key(public_key: &[u8]) -> PasetoResult<VerifyingKey> {
        let bytes: &[u8; PUBLIC_KEY_SIZE] = public_key
            .try_into()
            .map_err(|_| PasetoError::from(FormatError::InvalidKey))?;
        VerifyingKey::from_bytes(bytes).map_err(|_| FormatError::InvalidKey.into())
    }
}

impl SignatureScheme for Ed25519 {
    fn sign(
        &self,
        secret_key: &[u8],
        message: &[u8],
        pre_auth: &PreAuth<'_>,
    ) -> PasetoResult<Vec<u8>> {
        let signing_key = Self::signing_key(secret_key)?;
        let signature = signing_key.sign(&self.message(message, pre_auth));
        Ok(signature.to_bytes().to_vec())
    }

    fn verify(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
        pre_auth: &PreAuth<'_>,
    ) -> PasetoResult<()> {
        let verifying_key =
            Self::verifying_key(public_key).map_err(|_| PasetoError::AuthenticationFailure)?;
        let signature =
            Signature::from_slice(signature).map_err(|_| PasetoError::AuthenticationFailure)?;

        verifying_key
            .verify_strict(&self.message(message, pre_auth), &signature)
            .map_err(|_| PasetoError::AuthenticationFailure)
    }

    fn generate_secret_key(&self) -> PasetoResult<Vec<u8>> {
        let mut seed = Zeroizing::new([0u8; 32]);
        fill_random(&mut seed[..])?;
        let signing_key = SigningKey::from_bytes(&seed);
        Ok(signing_key.to_keypair_bytes().to_vec())
    }

    fn public_key(&self, secret_key: &[u8]) -> PasetoResult<Option<Vec<u8>>> {
        let signing_key = Self::signing_key(secret_key)?;
        Ok(Some(signing_key.verifying_key().as_bytes().to_vec()))
    }

    fn check_secret_key(&self, secret_key: &[u8]) -> PasetoResult<()> {
        Self::signing_key(secret_key).map(|_| ())
    }

    fn check_public_key(&self, public_key: &[u8]) -> PasetoResult<()> {
        Self::verifying_key(public_key).map(|_| ())
    }
}

/// Describes v2.public for the registry.
#[must_use]
pub fn v2_algorithm() -> Algorithm {
    Algorithm::public(
        "Ed25519",
        Version::V2,
        SECRET_KEY_SIZE,
        PUBLIC_KEY_SIZE,
        SIGNATURE_SIZE,
        Ed25519::v2(),
    )
}

/// Describes v4.public for the registry.
#[must_use]
pub fn v4_algorithm() -> Algorithm {
    Algorithm::public(
        "Ed25519",
        Version::V4,
        SECRET_KEY_SIZE,
        PUBLIC_KEY_SIZE,
        SIGNATURE_SIZE,
        Ed25519::v4(),
    )
    .with_implicit_assertions(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::operations::public::test_support;

    #[test]
    fn test_v2_sign_verify() -> PasetoResult<()> {
        test_support::exercise(&v2_algorithm())
    }

    #[test]
    fn test_v4_sign_verify() -> PasetoResult<()> {
        test_support::exercise(&v4_algorithm())
    }

    #[test]
    fn test_mismatched_keypair_rejected() -> PasetoResult<()> {
        let scheme = Ed25519::v4();
        let mut secret = scheme.generate_secret_key()?;
        secret[40] ^= 0xff;
        let result = scheme.check_secret_key(&secret);
        assert!(matches!(result, Err(PasetoError::Format(FormatError::InvalidKey))));
        Ok(())
    }

    #[test]
    fn test_v2_and_v4_messages_differ() -> PasetoResult<()> {
        let secret = Ed25519::v4().generate_secret_key()?;
        let public = Ed25519::v4().public_key(&secret)?.unwrap_or_default();
        let ctx = PreAuth {
            header: "v4.public.",
            footer: b"",
            implicit_assertion: b"",
        };
        let signature = Ed25519::v2().sign(&secret, b"m", &ctx)?;
        // PAE(h, m, f) and PAE(h, m, f, "") have different piece counts.
        let result = Ed25519::v4().verify(&public, b"m", &signature, &ctx);
        assert!(matches!(result, Err(PasetoError::AuthenticationFailure)));
        Ok(())
    }

    #[test]
    fn test_rfc8032_seed_derives_public_key() -> PasetoResult<()> {
        // RFC 8032, section 7.1, test 1.
        let seed = hex_literal("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
        let expected = hex_literal("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");
        let signing_key = SigningKey::from_bytes(&seed);
        assert_eq!(signing_key.verifying_key().as_bytes(), &expected);

        let keypair = signing_key.to_keypair_bytes();
        assert_eq!(Ed25519::v4().public_key(&keypair)?, Some(expected.to_vec()));
        Ok(())
    }

    fn hex_literal(s: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&hex::decode(s).unwrap_or_default());
        out
    }
}
