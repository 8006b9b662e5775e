//! ECDSA over P-384 with SHA-384 for v3.public.
//!
//! The signed message is `PAE(pk, h, m, f, i)` where `pk` is the signer's
//! compressed SEC1 public key. Signatures are `r || s` (96 bytes) with `s`
//! normalized to the low half of the curve order.

use p384::ecdsa::signature::{DigestSigner, DigestVerifier};
use p384::ecdsa::{Signature, SigningKey, VerifyingKey};
use sha2::{Digest, Sha384};
use zeroize::Zeroizing;

use crate::core::error::{FormatError, PasetoError, PasetoResult};
use crate::core::operations::fill_random;
use crate::core::operations::pae::PreAuth;
use crate::core::registry::{Algorithm, SignatureScheme};
use crate::core::version::Version;

/// Secret key size (48-byte scalar).
pub const SECRET_KEY_SIZE: usize = 48;

/// Public key size (49 bytes, compressed SEC1).
pub const PUBLIC_KEY_SIZE: usize = 49;

/// Signature size (96 bytes).
pub const SIGNATURE_SIZE: usize = 96;

/// Draws allowed before key generation gives up on the RNG.
const MAX_SCALAR_ATTEMPTS: usize = 64;

/// ECDSA P-384 for v3.
#[derive(Debug, Clone, Copy, Default)]
pub struct EcdsaP384;

fn signing_key(secret_key: &[u8]) -> PasetoResult<SigningKey> {
    if secret_key.len() != SECRET_KEY_SIZE {
        return Err(FormatError::InvalidKey.into());
    }
    SigningKey::from_slice(secret_key).map_err(|_| FormatError::InvalidKey.into())
}

fn verifying_key(public_key: &[u8]) -> PasetoResult<VerifyingKey> {
    // Only the compressed form is a valid PASERK public key.
    if public_key.len() != PUBLIC_KEY_SIZE || !matches!(public_key[0], 0x02 | 0x03) {
        return Err(FormatError::InvalidKey.into());
    }
    VerifyingKey::from_sec1_bytes(public_key).map_err(|_| FormatError::InvalidKey.into())
}

fn compressed(key: &VerifyingKey) -> Vec<u8> {
    key.to_encoded_point(true).as_bytes().to_vec()
}

fn digest(public_key: &[u8], message: &[u8], pre_auth: &PreAuth<'_>) -> Sha384 {
    Sha384::new_with_prefix(pre_auth.encode_prefixed(&[public_key], &[message]))
}

/// Rejection-samples a scalar in `[1, n)` from `fill`.
fn generate_with(mut fill: impl FnMut(&mut [u8]) -> PasetoResult<()>) -> PasetoResult<Vec<u8>> {
    let mut bytes = Zeroizing::new([0u8; SECRET_KEY_SIZE]);
    for _ in 0..MAX_SCALAR_ATTEMPTS {
        fill(&mut bytes[..])?;
        if let Ok(key) = SigningKey::from_slice(&bytes[..]) {
            return Ok(key.to_bytes().to_vec());
        }
    }
    tracing::error!(attempts = MAX_SCALAR_ATTEMPTS, "RNG never produced a valid P-384 scalar");
    Err(PasetoError::RngFailure)
}

impl SignatureScheme for EcdsaP384 {
    fn sign(
        &self,
        secret_key: &[u8],
        message: &[u8],
        pre_auth: &PreAuth<'_>,
    ) -> PasetoResult<Vec<u8>> {
        let signing_key = signing_key(secret_key)?;
        let public_key = compressed(signing_key.verifying_key());

        let signature: Signature = signing_key
            .try_sign_digest(digest(&public_key, message, pre_auth))
            .map_err(|_| PasetoError::from(FormatError::InvalidKey))?;
        let signature = signature.normalize_s().unwrap_or(signature);

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
            verifying_key(public_key).map_err(|_| PasetoError::AuthenticationFailure)?;
        let signature =
            Signature::from_slice(signature).map_err(|_| PasetoError::AuthenticationFailure)?;

        DigestVerifier::<Sha384, Signature>::verify_digest(
            &verifying_key,
            digest(public_key, message, pre_auth),
            &signature,
        )
        .map_err(|_| PasetoError::AuthenticationFailure)
    }

    fn generate_secret_key(&self) -> PasetoResult<Vec<u8>> {
        generate_with(fill_random)
    }

    fn public_key(&self, secret_key: &[u8]) -> PasetoResult<Option<Vec<u8>>> {
        let signing_key = signing_key(secret_key)?;
        Ok(Some(compressed(signing_key.verifying_key())))
    }

    fn check_secret_key(&self, secret_key: &[u8]) -> PasetoResult<()> {
        signing_key(secret_key).map(|_| ())
    }

    fn check_public_key(&self, public_key: &[u8]) -> PasetoResult<()> {
        verifying_key(public_key).map(|_| ())
    }
}

/// Describes v3.public for the registry.
#[must_use]
pub fn algorithm() -> Algorithm {
    Algorithm::public(
        "ECDSA-P384-SHA384",
        Version::V3,
        SECRET_KEY_SIZE,
        PUBLIC_KEY_SIZE,
        SIGNATURE_SIZE,
        EcdsaP384,
    )
    .with_implicit_assertions(true)
}
