//! Error types for PASETO and PASERK operations.
//!
//! Structural problems with a token or key string are reported as a
//! [`FormatError`] before any cryptographic primitive runs. Failures inside
//! the primitives are intentionally vague to avoid leaking information that
//! could aid attacks.

use thiserror::Error;

use crate::core::version::{Purpose, Version};

/// A token, key, or claims payload was not well formed.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The string does not have the expected `.`-delimited shape.
    #[error("Invalid format")]
    InvalidFormat,

    /// The header names an unknown purpose or PASERK type.
    #[error("Invalid header")]
    InvalidHeader,

    /// The version tag is not one of the known versions.
    #[error("Invalid or unknown version")]
    InvalidVersion,

    /// The key material has the wrong size or is not a valid key.
    #[error("Invalid key material")]
    InvalidKey,

    /// Base64 decoding error.
    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// The payload is not a valid claims object.
    #[error("Invalid claims: {0}")]
    InvalidClaims(#[from] serde_json::Error),

    /// A registered claim name was used for a custom claim.
    #[error("Claim `{0}` is reserved")]
    ReservedClaim(String),
}

/// Errors that can occur when producing or consuming tokens and keys.
#[derive(Debug, Error)]
pub enum PasetoError {
    /// Malformed token, key, or claims.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// No algorithm is registered for this version and purpose.
    #[error("Unsupported algorithm: {version}.{purpose}")]
    AlgorithmUnsupported {
        /// Requested version.
        version: Version,
        /// Requested purpose.
        purpose: Purpose,
    },

    /// An algorithm is already registered for this version and purpose.
    #[error("Algorithm already registered: {version}.{purpose}")]
    DuplicateRegistration {
        /// Version of the rejected registration.
        version: Version,
        /// Purpose of the rejected registration.
        purpose: Purpose,
    },

    /// The process-wide registry was already installed or used.
    #[error("Algorithm registry already initialized")]
    RegistryInitialized,

    /// The key's version or purpose does not match the token.
    #[error("Key does not match token version or purpose")]
    KeyMismatch,

    /// Tag or signature verification failed.
    /// Intentionally vague for security.
    #[error("Authentication failed")]
    AuthenticationFailure,

    /// An implicit assertion was supplied to a version that cannot bind one.
    #[error("Implicit assertions are not supported by {0}")]
    ImplicitAssertionUnsupported(Version),

    /// The `exp` claim is in the past.
    #[error("Token has expired")]
    TokenExpired,

    /// The `nbf` claim is in the future.
    #[error("Token is not yet valid")]
    TokenNotYetValid,

    /// A claim did not have the expected value.
    #[error("Claim `{0}` did not match")]
    ClaimMismatch(&'static str),

    /// The system random number generator failed.
    #[error("Random number generator failed")]
    RngFailure,
}

impl PasetoError {
    /// Whether the error was raised by a structural check.
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}

/// Result type alias for PASETO operations.
pub type PasetoResult<T> = Result<T, PasetoError>;
