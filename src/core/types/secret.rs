//! `SecretKey` - signing keys for `public` tokens.
//!
//! Format: `k{version}.secret.{base64url(key)}`
//!
//! Secret key sizes vary by version:
//! - v2/v4: Ed25519 secret key (64 bytes, seed || public key)
//! - v3: P-384 secret scalar (48 bytes)

use core::fmt::{self, Debug, Display};
use core::str::FromStr;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::core::error::{FormatError, PasetoError, PasetoResult};
use crate::core::header::make_paserk_header;
use crate::core::operations::paserk;
use crate::core::registry::{global, Registry, SignatureScheme};
use crate::core::types::{Key, KeyId, PublicKey};
use crate::core::version::{KeyKind, PaserkType, Purpose, Version};

/// Finds the signature scheme registered for `version`.
pub(crate) fn scheme_for(registry: &Registry, version: Version) -> PasetoResult<(usize, &dyn SignatureScheme)> {
    let algorithm = registry.resolve(version, Purpose::Public)?;
    let scheme = algorithm
        .signature_scheme()
        .ok_or(PasetoError::AlgorithmUnsupported {
            version,
            purpose: Purpose::Public,
        })?;
    Ok((algorithm.key_len(), scheme))
}

/// A signing key bound to one version.
///
/// # Security
///
/// - Key material is zeroized on drop
/// - Debug output redacts the key
/// - Equality comparison uses constant-time comparison
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    #[zeroize(skip)]
    version: Version,
    key: Vec<u8>,
}

impl SecretKey {
    /// The kind of key material.
    pub const KIND: KeyKind = KeyKind::Secret;

    /// Creates a key from raw bytes, checked against the global registry.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidKey` if `bytes` has the wrong length or is
    /// rejected by the signature scheme, and `PasetoError::AlgorithmUnsupported`
    /// if `version` has no public algorithm.
    pub fn from_bytes(version: Version, bytes: &[u8]) -> PasetoResult<Self> {
        Self::from_bytes_in(global(), version, bytes)
    }

    /// Creates a key from raw bytes, checked against `registry`.
    ///
    /// # Errors
    ///
    /// See [`SecretKey::from_bytes`].
    pub fn from_bytes_in(registry: &Registry, version: Version, bytes: &[u8]) -> PasetoResult<Self> {
        let (key_len, scheme) = scheme_for(registry, version)?;
        if bytes.len() != key_len {
            return Err(FormatError::InvalidKey.into());
        }
        scheme.check_secret_key(bytes)?;
        Ok(Self {
            version,
            key: bytes.to_vec(),
        })
    }

    /// Generates a fresh signing key.
    ///
    /// # Errors
    ///
    /// Returns `PasetoError::RngFailure` if the OS RNG fails.
    pub fn generate(version: Version) -> PasetoResult<Self> {
        Self::generate_in(global(), version)
    }

    /// Generates a fresh signing key using `registry`'s scheme.
    ///
    /// The generated bytes pass the same checks as [`SecretKey::from_bytes_in`].
    ///
    /// # Errors
    ///
    /// See [`SecretKey::generate`]. Returns `FormatError::InvalidKey` if the
    /// scheme produces a key the algorithm rejects.
    pub fn generate_in(registry: &Registry, version: Version) -> PasetoResult<Self> {
        let (_, scheme) = scheme_for(registry, version)?;
        let key = Zeroizing::new(scheme.generate_secret_key()?);
        Self::from_bytes_in(registry, version, &key)
    }

    /// Derives the matching verifying key.
    ///
    /// Returns `None` if the registered scheme defines no derivation.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidKey` if the derived key is rejected.
    pub fn public_key(&self) -> PasetoResult<Option<PublicKey>> {
        self.public_key_in(global())
    }

    /// Derives the matching verifying key using `registry`'s scheme.
    ///
    /// # Errors
    ///
    /// See [`SecretKey::public_key`].
    pub fn public_key_in(&self, registry: &Registry) -> PasetoResult<Option<PublicKey>> {
        let (_, scheme) = scheme_for(registry, self.version)?;
        scheme
            .public_key(&self.key)?
            .map(|bytes| PublicKey::from_bytes_in(registry, self.version, &bytes))
            .transpose()
    }

    /// The version this key belongs to.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Returns the header for this key (e.g., "k4.secret.").
    #[must_use]
    pub fn header(&self) -> String {
        make_paserk_header(self.version, PaserkType::Secret)
    }

    /// Returns a reference to the raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    /// Computes the `sid` identifier of this key.
    #[must_use]
    pub fn id(&self) -> KeyId {
        let serialized = Zeroizing::new(self.to_string());
        paserk::derive_id(self.version, Self::KIND, &serialized)
    }
}

impl Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let serialized = Zeroizing::new(paserk::serialize(
            self.version,
            PaserkType::Secret,
            &self.key,
        ));
        f.write_str(&serialized)
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("version", &self.version)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl FromStr for SecretKey {
    type Err = PasetoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match paserk::parse(global(), s)? {
            Key::Secret(key) => Ok(key),
            Key::Local(_) | Key::Public(_) => Err(FormatError::InvalidHeader.into()),
        }
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && bool::from(self.key.ct_eq(&other.key))
    }
}

impl Eq for SecretKey {}
