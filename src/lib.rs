//! PASETO tokens and PASERK keys.
//!
//! PASETO (Platform-Agnostic Security Tokens) are versioned, purpose-tagged
//! authenticated tokens. PASERK is the matching serialization format for the
//! keys that produce and verify them. This crate implements both on top of a
//! runtime [`Registry`] that maps every `(version, purpose)` pair to exactly
//! one algorithm.
//!
//! # Quick Start
//!
//! ```rust
//! use jiff::Timestamp;
//! use paseto_paserk::core::types::{Claims, Key, LocalKey};
//! use paseto_paserk::core::version::Version;
//!
//! let key = Key::from(LocalKey::from_bytes(Version::V4, &[0u8; 32])?);
//! let claims = Claims::new().with_subject("123");
//!
//! let token = paseto_paserk::encode(&key, &claims, b"", b"")?;
//! assert!(token.starts_with("v4.local."));
//!
//! let verified = paseto_paserk::decode(&key, &token, b"", Timestamp::now())?;
//! assert_eq!(verified.payload().subject(), Some("123"));
//! assert!(verified.footer().is_empty());
//! # Ok::<(), paseto_paserk::PasetoError>(())
//! ```
//!
//! # Token Format
//!
//! `v{version}.{purpose}.{base64url(body)}[.{base64url(footer)}]`
//!
//! | Purpose | Body | Key |
//! |---------|------|-----|
//! | `local` | nonce, ciphertext, tag | [`LocalKey`] |
//! | `public` | message, signature | [`SecretKey`] signs, [`PublicKey`] verifies |
//!
//! # PASERK Types
//!
//! | Type | Format | Description |
//! |------|--------|-------------|
//! | `local` | `k{v}.local.{data}` | Symmetric encryption key |
//! | `public` | `k{v}.public.{data}` | Public verification key |
//! | `secret` | `k{v}.secret.{data}` | Secret signing key |
//! | `lid` | `k{v}.lid.{data}` | Local key identifier |
//! | `pid` | `k{v}.pid.{data}` | Public key identifier |
//! | `sid` | `k{v}.sid.{data}` | Secret key identifier |
//!
//! # Versions
//!
//! - **v1**: AES-256-CTR + HMAC-SHA384, local only (legacy, `v1` feature)
//! - **v2**: XChaCha20-Poly1305 and Ed25519
//! - **v3**: AES-256-CTR + HMAC-SHA384 and ECDSA P-384
//! - **v4**: XChaCha20 + BLAKE2b-MAC and Ed25519 - **Recommended**
//!
//! Only v3 and v4 bind implicit assertions. Passing a non-empty assertion to
//! v1 or v2 fails with [`PasetoError::ImplicitAssertionUnsupported`].
//!
//! # Features
//!
//! ```toml
//! [dependencies]
//! paseto-paserk = { version = "0.1", features = ["v4"] }
//! paseto-paserk = { version = "0.1", features = ["all-versions"] }
//! ```
//!
//! A version whose feature is disabled still parses; it resolves to
//! [`PasetoError::AlgorithmUnsupported`].
//!
//! # Security
//!
//! - Key material is zeroized on drop
//! - Debug output redacts secret key material
//! - Constant-time comparison for keys and authentication tags
//! - Claims are only inspected after authentication succeeds
//! - No unsafe code
//!
//! # Modules
//!
//! - [`core`] - Core types and operations
//! - [`prelude`] - Builders and ergonomic imports (requires `prelude` feature)

#![forbid(unsafe_code)]

pub mod core;

#[cfg(feature = "prelude")]
pub mod prelude;

use jiff::Timestamp;

// Re-export commonly used items at crate root
pub use crate::core::error::{FormatError, PasetoError, PasetoResult};
pub use crate::core::operations::token::unverified_footer;
pub use crate::core::registry::{install, Algorithm, LocalCipher, Registry, SignatureScheme};
pub use crate::core::types::{
    Claims, Key, KeyId, LocalKey, PublicKey, SecretKey, Token, Validation, VerifiedToken,
};
pub use crate::core::version::{KeyKind, PaserkType, Purpose, Version};

/// Encodes `claims` into a token using the global registry.
///
/// `footer` is authenticated and sent in clear; `implicit_assertion` is
/// authenticated but never sent. Pass empty slices to omit either.
///
/// # Errors
///
/// See [`crate::core::operations::token::seal_payload`].
pub fn encode(
    key: &Key,
    claims: &Claims,
    footer: &[u8],
    implicit_assertion: &[u8],
) -> PasetoResult<String> {
    crate::core::operations::token::encode(
        crate::core::registry::global(),
        key,
        claims,
        footer,
        implicit_assertion,
    )
}

/// Decodes a token with the global registry, checking time claims at `now`.
///
/// # Errors
///
/// See [`crate::core::operations::token::open_payload`]. A token that
/// authenticates but has expired or is not yet valid fails with
/// [`PasetoError::TokenExpired`] or [`PasetoError::TokenNotYetValid`].
pub fn decode(
    key: &Key,
    token: &str,
    implicit_assertion: &[u8],
    now: Timestamp,
) -> PasetoResult<VerifiedToken<Claims>> {
    crate::core::operations::token::decode(
        crate::core::registry::global(),
        key,
        token,
        implicit_assertion,
        &Validation::at(now),
    )
}

/// Serializes a key to its PASERK string.
#[must_use]
pub fn serialize_key(key: &Key) -> String {
    key.to_string()
}

/// Parses a PASERK key string against the global registry.
///
/// # Errors
///
/// Returns a [`FormatError`] for malformed strings, id types, or key bytes
/// of the wrong length.
pub fn parse_key(paserk: &str) -> PasetoResult<Key> {
    paserk.parse()
}

/// The PASERK id (`lid`, `sid`, or `pid`) of a key.
#[must_use]
pub fn key_id(key: &Key) -> String {
    key.id().to_string()
}
