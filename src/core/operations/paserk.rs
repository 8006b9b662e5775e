//! PASERK serialization.
//!
//! Keys are written as `k{v}.{type}.{base64url(bytes)}` with unpadded
//! URL-safe base64. Parsing is strict: padding, non-canonical trailing bits
//! and wrong lengths are all rejected.

use base64::prelude::*;
use zeroize::Zeroizing;

use crate::core::error::{FormatError, PasetoResult};
use crate::core::header::{make_paserk_header, parse_paserk_header};
use crate::core::operations::id::compute_id;
use crate::core::registry::Registry;
use crate::core::types::{Key, KeyId, LocalKey, PublicKey, SecretKey};
use crate::core::version::{KeyKind, PaserkType, Version};

/// Encodes raw bytes as a PASERK data segment.
pub(crate) fn encode_data(bytes: &[u8]) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes a PASERK data segment.
pub(crate) fn decode_data(data: &str) -> Result<Vec<u8>, FormatError> {
    Ok(BASE64_URL_SAFE_NO_PAD.decode(data)?)
}

/// Serializes raw key bytes as a PASERK string.
#[must_use]
pub fn serialize(version: Version, paserk_type: PaserkType, bytes: &[u8]) -> String {
    let mut out = make_paserk_header(version, paserk_type);
    out.push_str(&encode_data(bytes));
    out
}

/// Parses a `local`, `secret`, or `public` PASERK string.
///
/// Key lengths and validity are checked against the algorithm registered in
/// `registry` for the key's version and purpose.
///
/// # Errors
///
/// - `FormatError::InvalidFormat`, `InvalidVersion`, or `InvalidHeader` for a
///   malformed header. Identifier types (`lid`, `sid`, `pid`) are rejected
///   with `InvalidHeader`; parse those with [`KeyId`]'s `FromStr`.
/// - `FormatError::Base64Decode` for bad base64.
/// - `FormatError::InvalidKey` for wrong-length or invalid key material.
/// - `PasetoError::AlgorithmUnsupported` if nothing is registered.
pub fn parse(registry: &Registry, paserk: &str) -> PasetoResult<Key> {
    let (version, paserk_type, data) = parse_paserk_header(paserk)?;
    let descriptor = paserk_type.descriptor();
    if descriptor.is_id {
        return Err(FormatError::InvalidHeader.into());
    }

    let bytes = Zeroizing::new(decode_data(data)?);
    let key = match descriptor.key_kind {
        KeyKind::Local => Key::Local(LocalKey::from_bytes_in(registry, version, &bytes)?),
        KeyKind::Secret => Key::Secret(SecretKey::from_bytes_in(registry, version, &bytes)?),
        KeyKind::Public => Key::Public(PublicKey::from_bytes_in(registry, version, &bytes)?),
    };

    tracing::trace!(%version, paserk_type = %paserk_type, "parsed PASERK key");
    Ok(key)
}

/// Computes the identifier of a key from its PASERK serialization.
#[must_use]
pub fn derive_id(version: Version, kind: KeyKind, paserk: &str) -> KeyId {
    let id_header = make_paserk_header(version, kind.id_type());
    KeyId::new(version, kind, compute_id(version, &id_header, paserk))
}
