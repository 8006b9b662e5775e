//! `PublicKey` - verifying keys for `public` tokens.
//!
//! Format: `k{version}.public.{base64url(key)}`
//!
//! Public key sizes vary by version:
//! - v2/v4: Ed25519 public key (32 bytes)
//! - v3: P-384 compressed point (49 bytes)

use core::fmt::{self, Debug, Display};
use core::str::FromStr;

use base64::prelude::*;
use subtle::ConstantTimeEq;

use crate::core::error::{FormatError, PasetoError, PasetoResult};
use crate::core::header::make_paserk_header;
use crate::core::operations::paserk;
use crate::core::registry::{global, Registry};
use crate::core::types::secret::scheme_for;
use crate::core::types::{Key, KeyId};
use crate::core::version::{KeyKind, PaserkType, Purpose, Version};

/// A verifying key bound to one version.
///
/// Public keys are not secret, so Debug shows the encoded key. Equality still
/// compares the key bytes in constant time.
#[derive(Clone)]
pub struct PublicKey {
    version: Version,
    key: Vec<u8>,
}

impl PublicKey {
    /// The kind of key material.
    pub const KIND: KeyKind = KeyKind::Public;

    /// Creates a key from raw bytes, checked against the global registry.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidKey` if `bytes` has the wrong length or is
    /// not a valid point, and `PasetoError::AlgorithmUnsupported` if `version`
    /// has no public algorithm.
    pub fn from_bytes(version: Version, bytes: &[u8]) -> PasetoResult<Self> {
        Self::from_bytes_in(global(), version, bytes)
    }

    /// Creates a key from raw bytes, checked against `registry`.
    ///
    /// # Errors
    ///
    /// See [`PublicKey::from_bytes`].
    pub fn from_bytes_in(registry: &Registry, version: Version, bytes: &[u8]) -> PasetoResult<Self> {
        let (_, scheme) = scheme_for(registry, version)?;
        let expected = registry.resolve(version, Purpose::Public)?.public_key_len();
        if bytes.len() != expected {
            return Err(FormatError::InvalidKey.into());
        }
        scheme.check_public_key(bytes)?;
        Ok(Self {
            version,
            key: bytes.to_vec(),
        })
    }

    /// The version this key belongs to.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Returns the header for this key (e.g., "k4.public.").
    #[must_use]
    pub fn header(&self) -> String {
        make_paserk_header(self.version, PaserkType::Public)
    }

    /// Returns a reference to the raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    /// Computes the `pid` identifier of this key.
    #[must_use]
    pub fn id(&self) -> KeyId {
        paserk::derive_id(self.version, Self::KIND, &self.to_string())
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&paserk::serialize(
            self.version,
            PaserkType::Public,
            &self.key,
        ))
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("version", &self.version)
            .field("key", &BASE64_URL_SAFE_NO_PAD.encode(&self.key))
            .finish()
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && bool::from(self.key.ct_eq(&other.key))
    }
}

impl Eq for PublicKey {}

impl FromStr for PublicKey {
    type Err = PasetoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match paserk::parse(global(), s)? {
            Key::Public(key) => Ok(key),
            Key::Local(_) | Key::Secret(_) => Err(FormatError::InvalidHeader.into()),
        }
    }
}
