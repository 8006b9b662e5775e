//! Detached signatures for the `public` purpose.
//!
//! - v2, v4: Ed25519 ([`ed25519`])
//! - v3: ECDSA over P-384 with SHA-384 ([`p384`])
//!
//! v1 (RSA-PSS) has no built-in scheme; hosts that need it register their
//! own [`SignatureScheme`](crate::core::registry::SignatureScheme).

#[cfg(any(feature = "v2", feature = "v4"))]
pub mod ed25519;

#[cfg(feature = "v3")]
pub mod p384;
