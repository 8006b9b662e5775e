//! Builder patterns for token operations.
//!
//! [`TokenBuilder`] and [`TokenVerifier`] wrap
//! [`crate::core::operations::token::encode`] and
//! [`crate::core::operations::token::decode`] so optional inputs (footer,
//! implicit assertion, registry, validation rules) can be set by name.
//!
//! # Example
//!
//! ```rust
//! use paseto_paserk::prelude::*;
//!
//! let key = Key::from(LocalKey::generate(Version::V4)?);
//!
//! let token = TokenBuilder::new(&key)
//!     .claims(Claims::new().with_issuer("auth.example"))
//!     .footer(b"kid-1")
//!     .implicit_assertion(b"tenant-7")
//!     .encode()?;
//!
//! let verified = TokenVerifier::new(&key)
//!     .expect_issuer("auth.example")
//!     .implicit_assertion(b"tenant-7")
//!     .verify(&token)?;
//! assert_eq!(verified.footer(), b"kid-1");
//! # Ok::<(), PasetoError>(())
//! ```

use core::time::Duration;

use crate::core::error::PasetoResult;
use crate::core::operations::token;
use crate::core::registry::{global, Registry};
use crate::core::types::{Claims, Key, Validation, VerifiedToken};

/// Builder for sealing claims into a token.
///
/// Footer and implicit assertion default to empty, the registry to
/// [`global`].
#[derive(Debug, Clone)]
pub struct TokenBuilder<'a> {
    key: &'a Key,
    claims: Claims,
    footer: Vec<u8>,
    implicit_assertion: Vec<u8>,
    registry: Option<&'a Registry>,
}

impl<'a> TokenBuilder<'a> {
    /// Starts a token sealed with `key` and no claims.
    #[must_use]
    pub fn new(key: &'a Key) -> Self {
        Self {
            key,
            claims: Claims::new(),
            footer: Vec::new(),
            implicit_assertion: Vec::new(),
            registry: None,
        }
    }

    /// Sets the payload claims.
    #[must_use]
    pub fn claims(mut self, claims: Claims) -> Self {
        self.claims = claims;
        self
    }

    /// Sets the footer, which is authenticated and sent in clear.
    #[must_use]
    pub fn footer(mut self, footer: impl AsRef<[u8]>) -> Self {
        self.footer = footer.as_ref().to_vec();
        self
    }

    /// Sets the implicit assertion, which is authenticated but not sent.
    #[must_use]
    pub fn implicit_assertion(mut self, assertion: impl AsRef<[u8]>) -> Self {
        self.implicit_assertion = assertion.as_ref().to_vec();
        self
    }

    /// Uses `registry` instead of the global one.
    #[must_use]
    pub const fn registry(mut self, registry: &'a Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Returns the claims set so far.
    #[must_use]
    pub const fn get_claims(&self) -> &Claims {
        &self.claims
    }

    /// Seals the token.
    ///
    /// # Errors
    ///
    /// See [`token::seal_payload`].
    pub fn encode(&self) -> PasetoResult<String> {
        token::encode(
            self.registry.unwrap_or_else(|| global()),
            self.key,
            &self.claims,
            &self.footer,
            &self.implicit_assertion,
        )
    }
}

/// Builder for opening and validating a token.
///
/// Validation defaults to [`Validation::now`] with no expectations.
#[derive(Debug, Clone)]
pub struct TokenVerifier<'a> {
    key: &'a Key,
    validation: Validation,
    implicit_assertion: Vec<u8>,
    registry: Option<&'a Registry>,
}

impl<'a> TokenVerifier<'a> {
    /// Starts a verifier using `key`.
    #[must_use]
    pub fn new(key: &'a Key) -> Self {
        Self {
            key,
            validation: Validation::now(),
            implicit_assertion: Vec::new(),
            registry: None,
        }
    }

    /// Replaces the validation rules, including the instant.
    #[must_use]
    pub fn validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// Tolerates clock skew on `exp` and `nbf`.
    #[must_use]
    pub fn leeway(mut self, leeway: Duration) -> Self {
        self.validation = self.validation.with_leeway(leeway);
        self
    }

    /// Requires `iss` to equal `issuer`.
    #[must_use]
    pub fn expect_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.validation = self.validation.expect_issuer(issuer);
        self
    }

    /// Requires `sub` to equal `subject`.
    #[must_use]
    pub fn expect_subject(mut self, subject: impl Into<String>) -> Self {
        self.validation = self.validation.expect_subject(subject);
        self
    }

    /// Requires `aud` to equal `audience`.
    #[must_use]
    pub fn expect_audience(mut self, audience: impl Into<String>) -> Self {
        self.validation = self.validation.expect_audience(audience);
        self
    }

    /// Rejects tokens without `exp`.
    #[must_use]
    pub fn require_expiration(mut self) -> Self {
        self.validation = self.validation.require_expiration();
        self
    }

    /// Sets the implicit assertion the token must have been sealed with.
    #[must_use]
    pub fn implicit_assertion(mut self, assertion: impl AsRef<[u8]>) -> Self {
        self.implicit_assertion = assertion.as_ref().to_vec();
        self
    }

    /// Uses `registry` instead of the global one.
    #[must_use]
    pub const fn registry(mut self, registry: &'a Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Opens `token` and validates its claims.
    ///
    /// # Errors
    ///
    /// See [`token::decode`].
    pub fn verify(&self, token: &str) -> PasetoResult<VerifiedToken<Claims>> {
        token::decode(
            self.registry.unwrap_or_else(|| global()),
            self.key,
            token,
            &self.implicit_assertion,
            &self.validation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PasetoError;
    use crate::core::types::{LocalKey, SecretKey};
    use crate::core::version::{Purpose, Version};
    use jiff::{SignedDuration, Timestamp};

    #[test]
    #[cfg(feature = "v4")]
    fn test_builder_roundtrip() -> PasetoResult<()> {
        let key = Key::from(LocalKey::generate(Version::V4)?);
        let claims = Claims::new().with_subject("alice").with_token_id("t-1");

        let token = TokenBuilder::new(&key)
            .claims(claims.clone())
            .footer("kid")
            .encode()?;
        let verified = TokenVerifier::new(&key).expect_subject("alice").verify(&token)?;

        assert_eq!(verified.payload(), &claims);
        assert_eq!(verified.footer(), b"kid");
        Ok(())
    }

    #[test]
    #[cfg(feature = "v4")]
    fn test_verifier_reports_mismatched_expectation() -> PasetoResult<()> {
        let key = Key::from(LocalKey::generate(Version::V4)?);
        let token = TokenBuilder::new(&key)
            .claims(Claims::new().with_audience("web"))
            .encode()?;

        let result = TokenVerifier::new(&key).expect_audience("mobile").verify(&token);
        assert!(matches!(result, Err(PasetoError::ClaimMismatch("aud"))));

        let result = TokenVerifier::new(&key).require_expiration().verify(&token);
        assert!(matches!(result, Err(PasetoError::ClaimMismatch("exp"))));
        Ok(())
    }

    #[test]
    #[cfg(feature = "v4")]
    fn test_leeway_accepts_recent_expiry() -> PasetoResult<()> {
        let key = Key::from(LocalKey::generate(Version::V4)?);
        let now = Timestamp::now();
        let expired = now
            .checked_sub(SignedDuration::from_secs(5))
            .map_err(|_| PasetoError::TokenExpired)?;
        let token = TokenBuilder::new(&key)
            .claims(Claims::new().with_expiration(expired))
            .encode()?;

        let strict = TokenVerifier::new(&key).validation(Validation::at(now));
        assert!(matches!(strict.verify(&token), Err(PasetoError::TokenExpired)));

        let lenient = strict.leeway(Duration::from_secs(60));
        assert!(lenient.verify(&token).is_ok());
        Ok(())
    }

    #[test]
    #[cfg(feature = "v4")]
    fn test_implicit_assertion_must_match() -> PasetoResult<()> {
        let secret = SecretKey::generate(Version::V4)?;
        let public = Key::from(secret.public_key()?.ok_or(PasetoError::KeyMismatch)?);
        let secret = Key::from(secret);

        let token = TokenBuilder::new(&secret).implicit_assertion("tenant-1").encode()?;
        assert!(token.starts_with("v4.public."));

        let ok = TokenVerifier::new(&public).implicit_assertion("tenant-1").verify(&token);
        assert!(ok.is_ok());
        let wrong = TokenVerifier::new(&public).implicit_assertion("tenant-2").verify(&token);
        assert!(matches!(wrong, Err(PasetoError::AuthenticationFailure)));
        Ok(())
    }

    #[test]
    #[cfg(feature = "v4")]
    fn test_explicit_registry_is_used() -> PasetoResult<()> {
        let key = Key::from(LocalKey::generate(Version::V4)?);
        let empty = Registry::empty();
        let result = TokenBuilder::new(&key).registry(&empty).encode();
        assert!(matches!(
            result,
            Err(PasetoError::AlgorithmUnsupported {
                version: Version::V4,
                purpose: Purpose::Local
            })
        ));
        Ok(())
    }
}
