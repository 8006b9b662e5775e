//! Token claims and their validation.
//!
//! Payloads are JSON objects. The registered claims `iss`, `sub`, `aud`,
//! `exp`, `nbf`, `iat`, and `jti` have typed accessors; time claims are RFC
//! 3339 strings. Every other member is kept as a custom claim.

use std::collections::BTreeMap;
use std::time::Duration;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::{FormatError, PasetoError, PasetoResult};

/// Names with typed accessors on [`Claims`].
pub const REGISTERED_CLAIMS: [&str; 7] = ["iss", "sub", "aud", "exp", "nbf", "iat", "jti"];

/// A claims object.
///
/// # Example
///
/// ```rust
/// use paseto_paserk::core::types::Claims;
///
/// let claims = Claims::new()
///     .with_issuer("auth.example.com")
///     .with_subject("user-42")
///     .with_claim("role", "admin")?;
/// assert_eq!(claims.issuer(), Some("auth.example.com"));
/// assert_eq!(claims.get("role").and_then(|v| v.as_str()), Some("admin"));
/// # Ok::<(), paseto_paserk::core::error::PasetoError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    issuer: Option<String>,
    #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    #[serde(rename = "aud", default, skip_serializing_if = "Option::is_none")]
    audience: Option<String>,
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    expiration: Option<Timestamp>,
    #[serde(rename = "nbf", default, skip_serializing_if = "Option::is_none")]
    not_before: Option<Timestamp>,
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    issued_at: Option<Timestamp>,
    #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
    token_id: Option<String>,
    #[serde(flatten)]
    custom: BTreeMap<String, Value>,
}

impl Claims {
    /// An empty claims object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `iss`.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Sets `sub`.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets `aud`.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Sets `exp`.
    #[must_use]
    pub fn with_expiration(mut self, expiration: Timestamp) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Sets `nbf`.
    #[must_use]
    pub fn with_not_before(mut self, not_before: Timestamp) -> Self {
        self.not_before = Some(not_before);
        self
    }

    /// Sets `iat`.
    #[must_use]
    pub fn with_issued_at(mut self, issued_at: Timestamp) -> Self {
        self.issued_at = Some(issued_at);
        self
    }

    /// Sets `jti`.
    #[must_use]
    pub fn with_token_id(mut self, token_id: impl Into<String>) -> Self {
        self.token_id = Some(token_id.into());
        self
    }

    /// Adds a custom claim.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::ReservedClaim` for a registered claim name.
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> PasetoResult<Self> {
        self.insert(name, value)?;
        Ok(self)
    }

    /// Inserts or replaces a custom claim.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::ReservedClaim` for a registered claim name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> PasetoResult<()> {
        let name = name.into();
        if REGISTERED_CLAIMS.contains(&name.as_str()) {
            return Err(FormatError::ReservedClaim(name).into());
        }
        self.custom.insert(name, value.into());
        Ok(())
    }

    /// `iss`
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// `sub`
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// `aud`
    #[must_use]
    pub fn audience(&self) -> Option<&str> {
        self.audience.as_deref()
    }

    /// `exp`
    #[must_use]
    pub const fn expiration(&self) -> Option<Timestamp> {
        self.expiration
    }

    /// `nbf`
    #[must_use]
    pub const fn not_before(&self) -> Option<Timestamp> {
        self.not_before
    }

    /// `iat`
    #[must_use]
    pub const fn issued_at(&self) -> Option<Timestamp> {
        self.issued_at
    }

    /// `jti`
    #[must_use]
    pub fn token_id(&self) -> Option<&str> {
        self.token_id.as_deref()
    }

    /// A custom claim by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.custom.get(name)
    }

    /// All custom claims, ordered by name.
    #[must_use]
    pub const fn custom(&self) -> &BTreeMap<String, Value> {
        &self.custom
    }

    /// Serializes to a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidClaims` if serialization fails.
    pub fn to_bytes(&self) -> PasetoResult<Vec<u8>> {
        Ok(serde_json::to_vec(self).map_err(FormatError::from)?)
    }

    /// Parses a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidClaims` if the payload is not a JSON
    /// object or a registered claim has the wrong type.
    pub fn from_bytes(bytes: &[u8]) -> PasetoResult<Self> {
        Ok(serde_json::from_slice(bytes).map_err(FormatError::from)?)
    }
}

/// Checks applied to claims after a token is authenticated.
///
/// Time claims are always checked when present. `exp` in the past yields
/// [`PasetoError::TokenExpired`], `nbf` in the future yields
/// [`PasetoError::TokenNotYetValid`]. Expected values produce
/// [`PasetoError::ClaimMismatch`] naming the claim.
#[derive(Debug, Clone)]
pub struct Validation {
    now: Timestamp,
    leeway: SignedDuration,
    issuer: Option<String>,
    subject: Option<String>,
    audience: Option<String>,
    require_expiration: bool,
}

impl Validation {
    /// Validation at a fixed instant.
    #[must_use]
    pub const fn at(now: Timestamp) -> Self {
        Self {
            now,
            leeway: SignedDuration::ZERO,
            issuer: None,
            subject: None,
            audience: None,
            require_expiration: false,
        }
    }

    /// Validation at the current system time.
    #[must_use]
    pub fn now() -> Self {
        Self::at(Timestamp::now())
    }

    /// Tolerates clock skew of up to `leeway` on `exp` and `nbf`.
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = SignedDuration::try_from(leeway).unwrap_or(SignedDuration::MAX);
        self
    }

    /// Requires `iss` to equal `issuer`.
    #[must_use]
    pub fn expect_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Requires `sub` to equal `subject`.
    #[must_use]
    pub fn expect_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Requires `aud` to equal `audience`.
    #[must_use]
    pub fn expect_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Rejects tokens without `exp`.
    #[must_use]
    pub fn require_expiration(mut self) -> Self {
        self.require_expiration = true;
        self
    }

    /// The instant checks are made against.
    #[must_use]
    pub const fn instant(&self) -> Timestamp {
        self.now
    }

    /// Applies every check.
    ///
    /// # Errors
    ///
    /// See the type documentation.
    pub fn validate(&self, claims: &Claims) -> PasetoResult<()> {
        match claims.expiration() {
            Some(exp) => {
                let earliest = self.now.checked_sub(self.leeway).unwrap_or(Timestamp::MIN);
                if exp < earliest {
                    return Err(PasetoError::TokenExpired);
                }
            }
            None if self.require_expiration => return Err(PasetoError::ClaimMismatch("exp")),
            None => {}
        }

        if let Some(nbf) = claims.not_before() {
            let latest = self.now.checked_add(self.leeway).unwrap_or(Timestamp::MAX);
            if nbf > latest {
                return Err(PasetoError::TokenNotYetValid);
            }
        }

        check_expected("iss", self.issuer.as_deref(), claims.issuer())?;
        check_expected("sub", self.subject.as_deref(), claims.subject())?;
        check_expected("aud", self.audience.as_deref(), claims.audience())?;
        Ok(())
    }
}

fn check_expected(name: &'static str, expected: Option<&str>, actual: Option<&str>) -> PasetoResult<()> {
    match expected {
        Some(expected) if actual != Some(expected) => Err(PasetoError::ClaimMismatch(name)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap_or(Timestamp::UNIX_EPOCH)
    }

    #[test]
    fn test_serialize_registered_and_custom() -> PasetoResult<()> {
        let claims = Claims::new()
            .with_issuer("issuer")
            .with_expiration(ts("2030-01-01T00:00:00Z"))
            .with_claim("data", "this is a secret message")?;

        let json: Value = serde_json::from_slice(&claims.to_bytes()?).map_err(FormatError::from)?;
        assert_eq!(json["iss"], "issuer");
        assert_eq!(json["exp"], "2030-01-01T00:00:00Z");
        assert_eq!(json["data"], "this is a secret message");
        assert!(json.get("sub").is_none());
        Ok(())
    }

    #[test]
    fn test_parse_roundtrip() -> PasetoResult<()> {
        let claims = Claims::new()
            .with_subject("user")
            .with_audience("api")
            .with_not_before(ts("2024-01-01T00:00:00Z"))
            .with_issued_at(ts("2024-01-01T00:00:00Z"))
            .with_token_id("abc")
            .with_claim("n", 5)?;
        assert_eq!(Claims::from_bytes(&claims.to_bytes()?)?, claims);
        Ok(())
    }

    #[test]
    fn test_custom_claims_preserved() -> PasetoResult<()> {
        let claims = Claims::from_bytes(br#"{"a":1,"b":{"c":[true,null]},"iss":"x"}"#)?;
        assert_eq!(claims.issuer(), Some("x"));
        assert_eq!(claims.custom().len(), 2);
        assert_eq!(claims.get("a"), Some(&Value::from(1)));
        Ok(())
    }

    #[test]
    fn test_rejects_non_objects() {
        for payload in [&b"[]"[..], b"\"s\"", b"1", b"not json", b""] {
            let result = Claims::from_bytes(payload);
            assert!(matches!(
                result,
                Err(PasetoError::Format(FormatError::InvalidClaims(_)))
            ));
        }
    }

    #[test]
    fn test_rejects_malformed_time() {
        let result = Claims::from_bytes(br#"{"exp":"yesterday"}"#);
        assert!(matches!(
            result,
            Err(PasetoError::Format(FormatError::InvalidClaims(_)))
        ));
    }

    #[test]
    fn test_reserved_names_rejected() {
        for name in REGISTERED_CLAIMS {
            let result = Claims::new().with_claim(name, "x");
            assert!(matches!(
                result,
                Err(PasetoError::Format(FormatError::ReservedClaim(_)))
            ));
        }
    }

    #[test]
    fn test_expiration() {
        let now = ts("2025-06-01T12:00:00Z");
        let expired = Claims::new().with_expiration(ts("2025-06-01T11:59:59Z"));
        let valid = Claims::new().with_expiration(ts("2025-06-01T13:00:00Z"));

        assert!(matches!(
            Validation::at(now).validate(&expired),
            Err(PasetoError::TokenExpired)
        ));
        assert!(Validation::at(now).validate(&valid).is_ok());
        assert!(Validation::at(now)
            .with_leeway(Duration::from_secs(5))
            .validate(&expired)
            .is_ok());
    }

    #[test]
    fn test_not_before() {
        let now = ts("2025-06-01T12:00:00Z");
        let future = Claims::new().with_not_before(ts("2025-06-01T12:00:10Z"));
        assert!(matches!(
            Validation::at(now).validate(&future),
            Err(PasetoError::TokenNotYetValid)
        ));
        assert!(Validation::at(now)
            .with_leeway(Duration::from_secs(10))
            .validate(&future)
            .is_ok());
    }

    #[test]
    fn test_expected_values() {
        let claims = Claims::new().with_issuer("a").with_audience("b");
        let now = Timestamp::UNIX_EPOCH;

        assert!(Validation::at(now).expect_issuer("a").validate(&claims).is_ok());
        assert!(matches!(
            Validation::at(now).expect_issuer("z").validate(&claims),
            Err(PasetoError::ClaimMismatch("iss"))
        ));
        assert!(matches!(
            Validation::at(now).expect_subject("s").validate(&claims),
            Err(PasetoError::ClaimMismatch("sub"))
        ));
        assert!(matches!(
            Validation::at(now).require_expiration().validate(&claims),
            Err(PasetoError::ClaimMismatch("exp"))
        ));
    }
}
