//! `Token` - the wire form of a PASETO token.
//!
//! Format: `v{version}.{purpose}.{base64url(body)}[.{base64url(footer)}]`
//!
//! Parsing only checks structure and base64; nothing is authenticated until
//! the token is opened with a key.

use core::fmt::{self, Display};
use core::str::FromStr;

use crate::core::error::PasetoError;
use crate::core::header::{make_token_header, parse_token_header};
use crate::core::operations::paserk::{decode_data, encode_data};
use crate::core::version::{Purpose, Version};

/// A structurally valid, unverified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    version: Version,
    purpose: Purpose,
    body: Vec<u8>,
    footer: Vec<u8>,
}

impl Token {
    pub(crate) const fn new(version: Version, purpose: Purpose, body: Vec<u8>, footer: Vec<u8>) -> Self {
        Self {
            version,
            purpose,
            body,
            footer,
        }
    }

    /// Version from the header.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Purpose from the header.
    #[must_use]
    pub const fn purpose(&self) -> Purpose {
        self.purpose
    }

    /// Header with trailing dot (e.g. "v4.local.").
    #[must_use]
    pub fn header(&self) -> String {
        make_token_header(self.version, self.purpose)
    }

    /// Decoded body: the encrypted or signed payload with its nonce, tag or
    /// signature.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decoded footer, empty if absent. Not authenticated.
    #[must_use]
    pub fn unverified_footer(&self) -> &[u8] {
        &self.footer
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.header(), encode_data(&self.body))?;
        if !self.footer.is_empty() {
            write!(f, ".{}", encode_data(&self.footer))?;
        }
        Ok(())
    }
}

impl FromStr for Token {
    type Err = PasetoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = parse_token_header(s)?;
        let body = decode_data(segments.body)?;
        let footer = match segments.footer {
            Some(footer) => decode_data(footer)?,
            None => Vec::new(),
        };
        Ok(Self::new(segments.version, segments.purpose, body, footer))
    }
}

/// The payload and footer of a token whose authentication succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedToken<T> {
    payload: T,
    footer: Vec<u8>,
}

impl<T> VerifiedToken<T> {
    pub(crate) const fn new(payload: T, footer: Vec<u8>) -> Self {
        Self { payload, footer }
    }

    /// The authenticated payload.
    pub const fn payload(&self) -> &T {
        &self.payload
    }

    /// The authenticated footer, empty if absent.
    #[must_use]
    pub fn footer(&self) -> &[u8] {
        &self.footer
    }

    /// Splits into payload and footer.
    pub fn into_parts(self) -> (T, Vec<u8>) {
        (self.payload, self.footer)
    }
}
