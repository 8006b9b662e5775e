//! `KeyId` - key identifiers (`lid`, `sid`, `pid`).
//!
//! Format: `k{version}.{lid|sid|pid}.{base64url(hash)}`
//!
//! The hash is computed from the full PASERK string of the source key using:
//! - SHA-384 truncated to 33 bytes for v1/v3
//! - BLAKE2b-264 (33 bytes) for v2/v4

use core::fmt::{self, Debug, Display};
use core::str::FromStr;

use crate::core::error::{FormatError, PasetoError};
use crate::core::header::{make_paserk_header, parse_paserk_header};
use crate::core::operations::id::ID_HASH_SIZE;
use crate::core::operations::paserk::{decode_data, encode_data};
use crate::core::version::{KeyKind, PaserkType, Version};

/// A key identifier.
///
/// Identifiers are safe to publish: they do not reveal the key.
///
/// # Example
///
/// ```rust
/// use paseto_paserk::core::types::KeyId;
/// use paseto_paserk::core::version::{KeyKind, Version};
///
/// let id: KeyId = "k4.lid.iVtYQDjr5gEijCSjJC3fQaJm7nCeQSeaty0Jixy8dbsk".parse()?;
/// assert_eq!(id.version(), Version::V4);
/// assert_eq!(id.kind(), KeyKind::Local);
/// # Ok::<(), paseto_paserk::core::error::PasetoError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct KeyId {
    version: Version,
    kind: KeyKind,
    /// The 33-byte hash (264 bits).
    id: [u8; ID_HASH_SIZE],
}

impl KeyId {
    /// Creates an identifier from a pre-computed hash.
    #[must_use]
    pub(crate) const fn new(version: Version, kind: KeyKind, id: [u8; ID_HASH_SIZE]) -> Self {
        Self { version, kind, id }
    }

    /// Version of the identified key.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Kind of the identified key.
    #[must_use]
    pub const fn kind(&self) -> KeyKind {
        self.kind
    }

    /// `Lid`, `Sid`, or `Pid`.
    #[must_use]
    pub const fn paserk_type(&self) -> PaserkType {
        self.kind.id_type()
    }

    /// Returns the header for this identifier (e.g., "k4.lid.").
    #[must_use]
    pub fn header(&self) -> String {
        make_paserk_header(self.version, self.paserk_type())
    }

    /// Returns a reference to the raw ID bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ID_HASH_SIZE] {
        &self.id
    }
}

impl Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.header(), encode_data(&self.id))
    }
}

impl Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyId")
            .field("version", &self.version)
            .field("kind", &self.kind)
            .field("id", &encode_data(&self.id))
            .finish()
    }
}

impl FromStr for KeyId {
    type Err = PasetoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (version, paserk_type, data) = parse_paserk_header(s)?;
        let descriptor = paserk_type.descriptor();
        if !descriptor.is_id {
            return Err(FormatError::InvalidHeader.into());
        }

        let bytes = decode_data(data)?;
        let id: [u8; ID_HASH_SIZE] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| PasetoError::from(FormatError::InvalidKey))?;

        Ok(Self::new(version, descriptor.key_kind, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_LID: &str = "k4.lid.iVtYQDjr5gEijCSjJC3fQaJm7nCeQSeaty0Jixy8dbsk";

    #[test]
    fn test_parse_lid() -> Result<(), PasetoError> {
        let id: KeyId = TEST_LID.parse()?;
        assert_eq!(id.version(), Version::V4);
        assert_eq!(id.kind(), KeyKind::Local);
        assert_eq!(id.paserk_type(), PaserkType::Lid);
        assert_eq!(id.header(), "k4.lid.");
        assert_eq!(id.to_string(), TEST_LID);
        Ok(())
    }

    #[test]
    fn test_kind_from_type() -> Result<(), PasetoError> {
        let data = encode_data(&[7u8; ID_HASH_SIZE]);
        for (ty, kind) in [
            ("lid", KeyKind::Local),
            ("sid", KeyKind::Secret),
            ("pid", KeyKind::Public),
        ] {
            let id: KeyId = format!("k3.{ty}.{data}").parse()?;
            assert_eq!(id.kind(), kind);
            assert_eq!(id.version(), Version::V3);
        }
        Ok(())
    }

    #[test]
    fn test_key_types_rejected() {
        let result: Result<KeyId, _> =
            "k4.local.cHFyc3R1dnd4eXp7fH1-f4CBgoOEhYaHiImKi4yNjo8".parse();
        assert!(matches!(
            result,
            Err(PasetoError::Format(FormatError::InvalidHeader))
        ));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let result: Result<KeyId, _> = "k4.lid.AAAA".parse();
        assert!(matches!(result, Err(PasetoError::Format(FormatError::InvalidKey))));
    }

    #[test]
    fn test_debug() -> Result<(), PasetoError> {
        let id: KeyId = TEST_LID.parse()?;
        let debug_str = format!("{id:?}");
        assert!(debug_str.contains("KeyId"));
        assert!(debug_str.contains("V4"));
        Ok(())
    }
}
