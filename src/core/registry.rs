//! Algorithm registry.
//!
//! Maps each `(Version, Purpose)` pair to exactly one [`Algorithm`]. Pairs
//! without a registration resolve to [`PasetoError::AlgorithmUnsupported`],
//! never to a default.
//!
//! A process-wide registry is available through [`global`]. Hosts that add
//! their own algorithms build a [`Registry`] during startup and hand it to
//! [`install`] before the first token or key operation; afterwards the
//! registry is only ever read.

use core::fmt;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::core::error::{PasetoError, PasetoResult};
use crate::core::operations::pae::PreAuth;
use crate::core::version::{Purpose, Version};

/// Output of a local-purpose encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedParts {
    /// Final nonce, exactly `nonce_len` bytes.
    pub nonce: Vec<u8>,
    /// Ciphertext, same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// Authentication tag, exactly `tag_len` bytes.
    pub tag: Vec<u8>,
}

/// Symmetric authenticated encryption for the `local` purpose.
///
/// Implementations build their PAE input from the supplied [`PreAuth`] and
/// must compare tags in constant time.
pub trait LocalCipher: Send + Sync {
    /// Encrypts `plaintext` under `key`.
    ///
    /// `random` holds `nonce_len` fresh bytes from the OS CSPRNG. Versions that
    /// derive their nonce from the message use it as the derivation key.
    fn seal(
        &self,
        key: &[u8],
        random: &[u8],
        plaintext: &[u8],
        pre_auth: &PreAuth<'_>,
    ) -> PasetoResult<SealedParts>;

    /// Authenticates and decrypts. Never returns plaintext if the tag is wrong.
    fn open(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        tag: &[u8],
        pre_auth: &PreAuth<'_>,
    ) -> PasetoResult<Vec<u8>>;
}

/// Detached signatures for the `public` purpose.
pub trait SignatureScheme: Send + Sync {
    /// Signs the PAE of `message` and the token context.
    fn sign(
        &self,
        secret_key: &[u8],
        message: &[u8],
        pre_auth: &PreAuth<'_>,
    ) -> PasetoResult<Vec<u8>>;

    /// Verifies a detached signature using the primitive's own verifier.
    fn verify(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
        pre_auth: &PreAuth<'_>,
    ) -> PasetoResult<()>;

    /// Creates new secret key material.
    fn generate_secret_key(&self) -> PasetoResult<Vec<u8>>;

    /// Derives the public key matching `secret_key`, if the scheme defines one.
    fn public_key(&self, _secret_key: &[u8]) -> PasetoResult<Option<Vec<u8>>> {
        Ok(None)
    }

    /// Checks secret key bytes beyond their length.
    fn check_secret_key(&self, _secret_key: &[u8]) -> PasetoResult<()> {
        Ok(())
    }

    /// Checks public key bytes beyond their length.
    fn check_public_key(&self, _public_key: &[u8]) -> PasetoResult<()> {
        Ok(())
    }
}

/// The concrete primitive behind an [`Algorithm`].
#[derive(Clone)]
pub enum Primitive {
    /// Authenticated encryption (local purpose).
    Aead(Arc<dyn LocalCipher>),
    /// Detached signature (public purpose).
    Signature(Arc<dyn SignatureScheme>),
}

/// A concrete cipher or signature scheme and its fixed sizes.
#[derive(Clone)]
pub struct Algorithm {
    name: &'static str,
    version: Version,
    purpose: Purpose,
    key_len: usize,
    public_key_len: usize,
    nonce_len: usize,
    tag_len: usize,
    implicit_assertions: bool,
    primitive: Primitive,
}

impl Algorithm {
    /// Describes an AEAD algorithm for `(version, local)`.
    pub fn local(
        name: &'static str,
        version: Version,
        key_len: usize,
        nonce_len: usize,
        tag_len: usize,
        cipher: impl LocalCipher + 'static,
    ) -> Self {
        Self {
            name,
            version,
            purpose: Purpose::Local,
            key_len,
            public_key_len: 0,
            nonce_len,
            tag_len,
            implicit_assertions: false,
            primitive: Primitive::Aead(Arc::new(cipher)),
        }
    }

    /// Describes a signature algorithm for `(version, public)`.
    pub fn public(
        name: &'static str,
        version: Version,
        secret_key_len: usize,
        public_key_len: usize,
        signature_len: usize,
        scheme: impl SignatureScheme + 'static,
    ) -> Self {
        Self {
            name,
            version,
            purpose: Purpose::Public,
            key_len: secret_key_len,
            public_key_len,
            nonce_len: 0,
            tag_len: signature_len,
            implicit_assertions: false,
            primitive: Primitive::Signature(Arc::new(scheme)),
        }
    }

    /// Sets whether the algorithm binds implicit assertions.
    #[must_use]
    pub fn with_implicit_assertions(mut self, supported: bool) -> Self {
        self.implicit_assertions = supported;
        self
    }

    /// Human-readable algorithm name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Version this algorithm serves.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Purpose this algorithm serves.
    #[must_use]
    pub const fn purpose(&self) -> Purpose {
        self.purpose
    }

    /// Length of a local key, or of a secret key for signature algorithms.
    #[must_use]
    pub const fn key_len(&self) -> usize {
        self.key_len
    }

    /// Length of a public key (0 for local algorithms).
    #[must_use]
    pub const fn public_key_len(&self) -> usize {
        self.public_key_len
    }

    /// Nonce length (0 if not applicable).
    #[must_use]
    pub const fn nonce_len(&self) -> usize {
        self.nonce_len
    }

    /// Authentication tag or signature length.
    #[must_use]
    pub const fn tag_len(&self) -> usize {
        self.tag_len
    }

    /// Whether implicit assertions are bound into authentication.
    #[must_use]
    pub const fn supports_implicit_assertions(&self) -> bool {
        self.implicit_assertions
    }

    /// Whether the primitive is authenticated encryption.
    #[must_use]
    pub const fn is_aead(&self) -> bool {
        matches!(self.primitive, Primitive::Aead(_))
    }

    /// The underlying primitive.
    #[must_use]
    pub const fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    /// The signature scheme, if this is a public algorithm.
    pub(crate) fn signature_scheme(&self) -> Option<&dyn SignatureScheme> {
        match &self.primitive {
            Primitive::Signature(scheme) => Some(scheme.as_ref()),
            Primitive::Aead(_) => None,
        }
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Algorithm")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("purpose", &self.purpose)
            .field("key_len", &self.key_len)
            .field("public_key_len", &self.public_key_len)
            .field("nonce_len", &self.nonce_len)
            .field("tag_len", &self.tag_len)
            .field("implicit_assertions", &self.implicit_assertions)
            .finish_non_exhaustive()
    }
}

/// A table of algorithms keyed by `(Version, Purpose)`.
#[derive(Clone, Default)]
pub struct Registry {
    table: BTreeMap<(Version, Purpose), Algorithm>,
}

impl Registry {
    /// A registry with nothing registered.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding every algorithm enabled by cargo features.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for algorithm in crate::core::operations::default_algorithms() {
            let version = algorithm.version();
            let purpose = algorithm.purpose();
            // Built-in pairs are distinct.
            if registry.register(algorithm).is_err() {
                tracing::error!(%version, %purpose, "duplicate built-in algorithm skipped");
            }
        }
        registry
    }

    /// Adds an algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`PasetoError::DuplicateRegistration`] if the pair is taken.
    pub fn register(&mut self, algorithm: Algorithm) -> PasetoResult<()> {
        let slot = (algorithm.version(), algorithm.purpose());
        if self.table.contains_key(&slot) {
            return Err(PasetoError::DuplicateRegistration {
                version: slot.0,
                purpose: slot.1,
            });
        }

        tracing::debug!(
            version = %slot.0,
            purpose = %slot.1,
            algorithm = algorithm.name(),
            "registered algorithm"
        );
        self.table.insert(slot, algorithm);
        Ok(())
    }

    /// Looks up the algorithm for a pair.
    ///
    /// # Errors
    ///
    /// Returns [`PasetoError::AlgorithmUnsupported`] if nothing is registered.
    pub fn resolve(&self, version: Version, purpose: Purpose) -> PasetoResult<&Algorithm> {
        self.table
            .get(&(version, purpose))
            .ok_or(PasetoError::AlgorithmUnsupported { version, purpose })
    }

    /// The registered pairs, in `(version, purpose)` order.
    pub fn supported(&self) -> impl Iterator<Item = (Version, Purpose)> + '_ {
        self.table.keys().copied()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.table.values()).finish()
    }
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Installs the process-wide registry.
///
/// Must be called at most once, before any operation that uses [`global`].
///
/// # Errors
///
/// Returns [`PasetoError::RegistryInitialized`] if a registry was already
/// installed or the default one was already used.
pub fn install(registry: Registry) -> PasetoResult<()> {
    GLOBAL
        .set(registry)
        .map_err(|_| PasetoError::RegistryInitialized)
}

/// The process-wide registry, defaulting to [`Registry::with_defaults`].
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::with_defaults)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullCipher;

    impl LocalCipher for NullCipher {
        fn seal(
            &self,
            _key: &[u8],
            random: &[u8],
            plaintext: &[u8],
            _pre_auth: &PreAuth<'_>,
        ) -> PasetoResult<SealedParts> {
            Ok(SealedParts {
                nonce: random.to_vec(),
                ciphertext: plaintext.to_vec(),
                tag: Vec::new(),
            })
        }

        fn open(
            &self,
            _key: &[u8],
            _nonce: &[u8],
            ciphertext: &[u8],
            _tag: &[u8],
            _pre_auth: &PreAuth<'_>,
        ) -> PasetoResult<Vec<u8>> {
            Ok(ciphertext.to_vec())
        }
    }

    #[test]
    fn test_empty_registry_resolves_nothing() {
        let registry = Registry::empty();
        for version in Version::ALL {
            for purpose in Purpose::ALL {
                let result = registry.resolve(version, purpose);
                assert!(matches!(
                    result,
                    Err(PasetoError::AlgorithmUnsupported { version: v, purpose: p })
                        if v == version && p == purpose
                ));
            }
        }
    }

    #[test]
    fn test_register_and_resolve() -> PasetoResult<()> {
        let mut registry = Registry::empty();
        registry.register(Algorithm::local("null", Version::V1, 32, 8, 0, NullCipher))?;

        let algorithm = registry.resolve(Version::V1, Purpose::Local)?;
        assert_eq!(algorithm.name(), "null");
        assert_eq!(algorithm.key_len(), 32);
        assert_eq!(algorithm.nonce_len(), 8);
        assert!(algorithm.is_aead());
        assert!(!algorithm.supports_implicit_assertions());
        assert!(registry.resolve(Version::V1, Purpose::Public).is_err());
        Ok(())
    }

    #[test]
    fn test_duplicate_registration_rejected() -> PasetoResult<()> {
        let mut registry = Registry::empty();
        registry.register(Algorithm::local("a", Version::V1, 32, 8, 0, NullCipher))?;
        let result = registry.register(Algorithm::local("b", Version::V1, 32, 8, 0, NullCipher));
        assert!(matches!(
            result,
            Err(PasetoError::DuplicateRegistration {
                version: Version::V1,
                purpose: Purpose::Local
            })
        ));
        assert_eq!(registry.resolve(Version::V1, Purpose::Local)?.name(), "a");
        Ok(())
    }

    #[test]
    fn test_defaults_have_one_algorithm_per_pair() -> PasetoResult<()> {
        let registry = Registry::with_defaults();
        for (version, purpose) in registry.supported() {
            let algorithm = registry.resolve(version, purpose)?;
            assert_eq!(algorithm.version(), version);
            assert_eq!(algorithm.purpose(), purpose);
            assert_eq!(algorithm.is_aead(), purpose == Purpose::Local);
        }
        Ok(())
    }

    #[test]
    #[cfg(feature = "v4")]
    fn test_default_v4_sizes() -> PasetoResult<()> {
        let registry = Registry::with_defaults();

        let local = registry.resolve(Version::V4, Purpose::Local)?;
        assert_eq!(
            (local.key_len(), local.nonce_len(), local.tag_len()),
            (32, 32, 32)
        );
        assert!(local.supports_implicit_assertions());

        let public = registry.resolve(Version::V4, Purpose::Public)?;
        assert_eq!(
            (public.key_len(), public.public_key_len(), public.tag_len()),
            (64, 32, 64)
        );
        assert!(!public.is_aead());
        Ok(())
    }

    #[test]
    fn test_v1_public_not_registered_by_default() {
        let registry = Registry::with_defaults();
        assert!(registry.resolve(Version::V1, Purpose::Public).is_err());
    }

    #[test]
    fn test_debug_lists_algorithms() {
        let mut registry = Registry::empty();
        assert!(registry
            .register(Algorithm::local("null", Version::V1, 32, 8, 0, NullCipher))
            .is_ok());
        let debug_str = format!("{registry:?}");
        assert!(debug_str.contains("null"));
    }
}
