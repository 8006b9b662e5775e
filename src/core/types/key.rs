//! `Key` - any PASERK key.

use core::fmt::{self, Display};
use core::str::FromStr;

use crate::core::error::{PasetoError, PasetoResult};
use crate::core::operations::paserk;
use crate::core::registry::{global, Registry};
use crate::core::types::{KeyId, LocalKey, PublicKey, SecretKey};
use crate::core::version::{KeyKind, Purpose, Version};

/// A key of any kind.
///
/// Two keys are equal exactly when their version, kind, and raw bytes are.
///
/// # Example
///
/// ```rust
/// use paseto_paserk::core::types::Key;
///
/// let key: Key = "k4.local.cHFyc3R1dnd4eXp7fH1-f4CBgoOEhYaHiImKi4yNjo8".parse()?;
/// assert_eq!(
///     key.id().to_string(),
///     "k4.lid.iVtYQDjr5gEijCSjJC3fQaJm7nCeQSeaty0Jixy8dbsk"
/// );
/// # Ok::<(), paseto_paserk::core::error::PasetoError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Symmetric key.
    Local(LocalKey),
    /// Signing key.
    Secret(SecretKey),
    /// Verifying key.
    Public(PublicKey),
}

impl Key {
    /// Parses a PASERK key string, validating it against `registry`.
    ///
    /// # Errors
    ///
    /// See [`paserk::parse`].
    pub fn parse_in(registry: &Registry, paserk: &str) -> PasetoResult<Self> {
        paserk::parse(registry, paserk)
    }

    /// The version this key belongs to.
    #[must_use]
    pub const fn version(&self) -> Version {
        match self {
            Self::Local(key) => key.version(),
            Self::Secret(key) => key.version(),
            Self::Public(key) => key.version(),
        }
    }

    /// The kind of key material.
    #[must_use]
    pub const fn kind(&self) -> KeyKind {
        match self {
            Self::Local(_) => KeyKind::Local,
            Self::Secret(_) => KeyKind::Secret,
            Self::Public(_) => KeyKind::Public,
        }
    }

    /// The token purpose this key is used with.
    #[must_use]
    pub const fn purpose(&self) -> Purpose {
        self.kind().purpose()
    }

    /// Raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Local(key) => key.as_bytes(),
            Self::Secret(key) => key.as_bytes(),
            Self::Public(key) => key.as_bytes(),
        }
    }

    /// Computes the key's `lid`, `sid`, or `pid`.
    #[must_use]
    pub fn id(&self) -> KeyId {
        match self {
            Self::Local(key) => key.id(),
            Self::Secret(key) => key.id(),
            Self::Public(key) => key.id(),
        }
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(key) => Display::fmt(key, f),
            Self::Secret(key) => Display::fmt(key, f),
            Self::Public(key) => Display::fmt(key, f),
        }
    }
}

impl FromStr for Key {
    type Err = PasetoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        paserk::parse(global(), s)
    }
}

impl From<LocalKey> for Key {
    fn from(key: LocalKey) -> Self {
        Self::Local(key)
    }
}

impl From<SecretKey> for Key {
    fn from(key: SecretKey) -> Self {
        Self::Secret(key)
    }
}

impl From<PublicKey> for Key {
    fn from(key: PublicKey) -> Self {
        Self::Public(key)
    }
}
