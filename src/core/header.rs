//! Header parsing and generation utilities.
//!
//! PASERK strings follow the format `k{version}.{type}.{data}` and tokens
//! follow `v{version}.{purpose}.{body}[.{footer}]`. Only the shape is checked
//! here; decoding of the data segments happens in the callers.

use crate::core::error::FormatError;
use crate::core::version::{PaserkType, Purpose, Version};

/// Splits a PASERK string into its version, type, and data segment.
///
/// # Errors
///
/// Returns `FormatError::InvalidFormat` if the string doesn't have three segments,
/// `FormatError::InvalidVersion` for an unknown prefix and
/// `FormatError::InvalidHeader` for a type outside the supported set.
pub fn parse_paserk_header(paserk: &str) -> Result<(Version, PaserkType, &str), FormatError> {
    let mut parts = paserk.splitn(3, '.');
    let (Some(version), Some(type_name), Some(data)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FormatError::InvalidFormat);
    };

    let version = Version::from_paserk_prefix(version)?;
    let paserk_type = PaserkType::from_name(type_name)?;

    if data.is_empty() {
        return Err(FormatError::InvalidFormat);
    }

    Ok((version, paserk_type, data))
}

/// Constructs a PASERK header string with trailing dot (e.g. `"k4.local."`).
#[must_use]
pub fn make_paserk_header(version: Version, paserk_type: PaserkType) -> String {
    format!("{}.{}.", version.paserk_prefix(), paserk_type.as_str())
}

/// The still-encoded segments of a token string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSegments<'a> {
    /// Version from the header.
    pub version: Version,
    /// Purpose from the header.
    pub purpose: Purpose,
    /// Base64url body segment.
    pub body: &'a str,
    /// Base64url footer segment, if present.
    pub footer: Option<&'a str>,
}

/// Splits a token string into header fields and encoded segments.
///
/// # Errors
///
/// Returns `FormatError::InvalidFormat` for the wrong number of segments or an
/// empty segment, `FormatError::InvalidVersion` for an unknown version tag and
/// `FormatError::InvalidHeader` for an unknown purpose.
pub fn parse_token_header(token: &str) -> Result<TokenSegments<'_>, FormatError> {
    let parts: Vec<&str> = token.split('.').collect();

    if !(3..=4).contains(&parts.len()) {
        return Err(FormatError::InvalidFormat);
    }
    if parts.iter().any(|p| p.is_empty()) {
        return Err(FormatError::InvalidFormat);
    }

    let version = Version::from_token_header(parts[0])?;
    let purpose = match parts[1] {
        "local" => Purpose::Local,
        "public" => Purpose::Public,
        _ => return Err(FormatError::InvalidHeader),
    };

    Ok(TokenSegments {
        version,
        purpose,
        body: parts[2],
        footer: parts.get(3).copied(),
    })
}

/// Constructs a token header string with trailing dot (e.g. `"v4.local."`).
#[must_use]
pub fn make_token_header(version: Version, purpose: Purpose) -> String {
    format!("{}.{}.", version.token_header(), purpose.as_str())
}
