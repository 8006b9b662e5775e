//! `LocalKey` - symmetric keys for `local` tokens.
//!
//! Format: `k{version}.local.{base64url(key)}`

use core::fmt::{self, Debug, Display};
use core::str::FromStr;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::core::error::{FormatError, PasetoError, PasetoResult};
use crate::core::header::make_paserk_header;
use crate::core::operations::{fill_random, paserk};
use crate::core::registry::{global, Registry};
use crate::core::types::{Key, KeyId};
use crate::core::version::{KeyKind, PaserkType, Purpose, Version};

/// A symmetric key bound to one version.
///
/// # Security
///
/// - Key material is zeroized on drop
/// - Debug output redacts the key
/// - Equality comparison uses constant-time comparison
///
/// # Example
///
/// ```rust
/// use paseto_paserk::core::types::LocalKey;
/// use paseto_paserk::core::version::Version;
///
/// let key = LocalKey::from_bytes(Version::V4, &[0u8; 32])?;
/// let paserk = key.to_string();
/// assert!(paserk.starts_with("k4.local."));
///
/// let parsed: LocalKey = paserk.parse()?;
/// assert_eq!(key, parsed);
/// # Ok::<(), paseto_paserk::core::error::PasetoError>(())
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LocalKey {
    #[zeroize(skip)]
    version: Version,
    key: Vec<u8>,
}

impl LocalKey {
    /// The kind of key material.
    pub const KIND: KeyKind = KeyKind::Local;

    /// Creates a key from raw bytes, checked against the global registry.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidKey` if `bytes` has the wrong length and
    /// `PasetoError::AlgorithmUnsupported` if `version` has no local algorithm.
    pub fn from_bytes(version: Version, bytes: &[u8]) -> PasetoResult<Self> {
        Self::from_bytes_in(global(), version, bytes)
    }

    /// Creates a key from raw bytes, checked against `registry`.
    ///
    /// # Errors
    ///
    /// See [`LocalKey::from_bytes`].
    pub fn from_bytes_in(registry: &Registry, version: Version, bytes: &[u8]) -> PasetoResult<Self> {
        let algorithm = registry.resolve(version, Purpose::Local)?;
        if bytes.len() != algorithm.key_len() {
            return Err(FormatError::InvalidKey.into());
        }
        Ok(Self {
            version,
            key: bytes.to_vec(),
        })
    }

    /// Generates a fresh random key.
    ///
    /// # Errors
    ///
    /// Returns `PasetoError::RngFailure` if the OS RNG fails.
    pub fn generate(version: Version) -> PasetoResult<Self> {
        Self::generate_in(global(), version)
    }

    /// Generates a fresh random key sized for `registry`'s algorithm.
    ///
    /// # Errors
    ///
    /// See [`LocalKey::generate`].
    pub fn generate_in(registry: &Registry, version: Version) -> PasetoResult<Self> {
        let algorithm = registry.resolve(version, Purpose::Local)?;
        let mut key = vec![0u8; algorithm.key_len()];
        fill_random(&mut key)?;
        Ok(Self { version, key })
    }

    /// The version this key belongs to.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Returns the header for this key (e.g., "k4.local.").
    #[must_use]
    pub fn header(&self) -> String {
        make_paserk_header(self.version, PaserkType::Local)
    }

    /// Returns a reference to the raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    /// Computes the `lid` identifier of this key.
    #[must_use]
    pub fn id(&self) -> KeyId {
        let serialized = Zeroizing::new(self.to_string());
        paserk::derive_id(self.version, Self::KIND, &serialized)
    }
}

impl Display for LocalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let serialized = Zeroizing::new(paserk::serialize(
            self.version,
            PaserkType::Local,
            &self.key,
        ));
        f.write_str(&serialized)
    }
}

impl Debug for LocalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalKey")
            .field("version", &self.version)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl FromStr for LocalKey {
    type Err = PasetoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match paserk::parse(global(), s)? {
            Key::Local(key) => Ok(key),
            Key::Secret(_) | Key::Public(_) => Err(FormatError::InvalidHeader.into()),
        }
    }
}

impl PartialEq for LocalKey {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && bool::from(self.key.ct_eq(&other.key))
    }
}

impl Eq for LocalKey {}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: [u8; 32] = [
        0x70, 0x71, 0x72, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7a, 0x7b, 0x7c, 0x7d, 0x7e,
        0x7f, 0x80, 0x81, 0x82, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8a, 0x8b, 0x8c, 0x8d,
        0x8e, 0x8f,
    ];
    const TEST_PASERK_K4: &str = "k4.local.cHFyc3R1dnd4eXp7fH1-f4CBgoOEhYaHiImKi4yNjo8";

    #[test]
    #[cfg(feature = "v4")]
    fn test_to_string() -> PasetoResult<()> {
        let key = LocalKey::from_bytes(Version::V4, &TEST_KEY)?;
        assert_eq!(key.to_string(), TEST_PASERK_K4);
        assert_eq!(key.header(), "k4.local.");
        Ok(())
    }

    #[test]
    #[cfg(feature = "v4")]
    fn test_parse() -> PasetoResult<()> {
        let key: LocalKey = TEST_PASERK_K4.parse()?;
        assert_eq!(key.as_bytes(), &TEST_KEY);
        assert_eq!(key.version(), Version::V4);
        Ok(())
    }

    #[test]
    #[cfg(feature = "v4")]
    fn test_lid() -> PasetoResult<()> {
        let key = LocalKey::from_bytes(Version::V4, &TEST_KEY)?;
        assert_eq!(
            key.id().to_string(),
            "k4.lid.iVtYQDjr5gEijCSjJC3fQaJm7nCeQSeaty0Jixy8dbsk"
        );
        Ok(())
    }

    #[test]
    #[cfg(feature = "v4")]
    fn test_wrong_length_rejected() {
        let result = LocalKey::from_bytes(Version::V4, &[0u8; 31]);
        assert!(matches!(result, Err(PasetoError::Format(FormatError::InvalidKey))));
    }

    #[test]
    #[cfg(all(feature = "v3", feature = "v4"))]
    fn test_equality_includes_version() -> PasetoResult<()> {
        let v3 = LocalKey::from_bytes(Version::V3, &TEST_KEY)?;
        let v4 = LocalKey::from_bytes(Version::V4, &TEST_KEY)?;
        assert_ne!(v3, v4);
        assert_eq!(v4, LocalKey::from_bytes(Version::V4, &TEST_KEY)?);
        Ok(())
    }

    #[test]
    #[cfg(feature = "v4")]
    fn test_generate_is_random() -> PasetoResult<()> {
        let a = LocalKey::generate(Version::V4)?;
        let b = LocalKey::generate(Version::V4)?;
        assert_eq!(a.as_bytes().len(), 32);
        assert_ne!(a, b);
        Ok(())
    }

    #[test]
    #[cfg(feature = "v4")]
    fn test_debug_redacts() -> PasetoResult<()> {
        let key = LocalKey::from_bytes(Version::V4, &TEST_KEY)?;
        let debug_str = format!("{key:?}");
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("112"));
        Ok(())
    }

    #[test]
    #[cfg(feature = "v4")]
    fn test_wrong_type_rejected() {
        let result: Result<LocalKey, _> = "k4.public.AAAA".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_unregistered_version() {
        let result = LocalKey::from_bytes_in(&Registry::empty(), Version::V4, &TEST_KEY);
        assert!(matches!(
            result,
            Err(PasetoError::AlgorithmUnsupported { .. })
        ));
    }
}
