//! Token sealing and opening.
//!
//! `seal_payload` and `open_payload` work on raw bytes; `encode` and
//! `decode` add the JSON claims layer and its validation. Every function
//! takes the [`Registry`] to resolve algorithms from.
//!
//! Body layout:
//! - local: `nonce || ciphertext || tag`
//! - public: `message || signature`

use zeroize::Zeroizing;

use crate::core::error::{FormatError, PasetoError, PasetoResult};
use crate::core::header::make_token_header;
use crate::core::operations::fill_random;
use crate::core::operations::pae::PreAuth;
use crate::core::registry::{Algorithm, Primitive, Registry};
use crate::core::types::{Claims, Key, Token, Validation, VerifiedToken};

fn check_implicit_assertion(algorithm: &Algorithm, implicit_assertion: &[u8]) -> PasetoResult<()> {
    if !implicit_assertion.is_empty() && !algorithm.supports_implicit_assertions() {
        return Err(PasetoError::ImplicitAssertionUnsupported(algorithm.version()));
    }
    Ok(())
}

/// Encrypts or signs `payload` into a token string.
///
/// An empty `footer` is omitted from the token. A non-empty
/// `implicit_assertion` is authenticated but not transmitted.
///
/// # Errors
///
/// - `PasetoError::AlgorithmUnsupported` if the key's pair is not registered.
/// - `PasetoError::KeyMismatch` for a [`Key::Public`] key.
/// - `PasetoError::ImplicitAssertionUnsupported` for v1/v2.
/// - `PasetoError::RngFailure` if nonce generation fails.
pub fn seal_payload(
    registry: &Registry,
    key: &Key,
    payload: &[u8],
    footer: &[u8],
    implicit_assertion: &[u8],
) -> PasetoResult<String> {
    let (version, purpose) = (key.version(), key.purpose());
    let algorithm = registry.resolve(version, purpose)?;
    check_implicit_assertion(algorithm, implicit_assertion)?;

    let header = make_token_header(version, purpose);
    let pre_auth = PreAuth {
        header: &header,
        footer,
        implicit_assertion,
    };

    let body = match (key, algorithm.primitive()) {
        (Key::Local(key), Primitive::Aead(cipher)) => {
            let mut random = Zeroizing::new(vec![0u8; algorithm.nonce_len()]);
            fill_random(&mut random)?;
            let sealed = cipher.seal(key.as_bytes(), &random, payload, &pre_auth)?;
            [sealed.nonce, sealed.ciphertext, sealed.tag].concat()
        }
        (Key::Secret(key), Primitive::Signature(scheme)) => {
            let signature = scheme.sign(key.as_bytes(), payload, &pre_auth)?;
            [payload, signature.as_slice()].concat()
        }
        _ => return Err(PasetoError::KeyMismatch),
    };

    tracing::trace!(%version, %purpose, algorithm = algorithm.name(), "sealed token");
    Ok(Token::new(version, purpose, body, footer.to_vec()).to_string())
}

/// Authenticates a token string and returns its payload and footer.
///
/// # Errors
///
/// - [`FormatError`] if the token is malformed or its body is too short.
/// - `PasetoError::AlgorithmUnsupported` if the token's pair is not registered.
/// - `PasetoError::KeyMismatch` if the key's version or purpose differs from
///   the token's, or a [`Key::Secret`] key is used.
/// - `PasetoError::ImplicitAssertionUnsupported` for v1/v2.
/// - `PasetoError::AuthenticationFailure` if the tag or signature is wrong.
pub fn open_payload(
    registry: &Registry,
    key: &Key,
    token: &str,
    implicit_assertion: &[u8],
) -> PasetoResult<VerifiedToken<Vec<u8>>> {
    let result = open_token(registry, key, token, implicit_assertion);
    if let Err(err) = &result {
        tracing::debug!(error = %err, "token rejected");
    }
    result
}

fn open_token(
    registry: &Registry,
    key: &Key,
    token: &str,
    implicit_assertion: &[u8],
) -> PasetoResult<VerifiedToken<Vec<u8>>> {
    let token: Token = token.parse()?;
    let algorithm = registry.resolve(token.version(), token.purpose())?;

    if key.version() != token.version() || key.purpose() != token.purpose() {
        return Err(PasetoError::KeyMismatch);
    }
    check_implicit_assertion(algorithm, implicit_assertion)?;

    let header = token.header();
    let pre_auth = PreAuth {
        header: &header,
        footer: token.unverified_footer(),
        implicit_assertion,
    };
    let body = token.body();

    let payload = match (key, algorithm.primitive()) {
        (Key::Local(key), Primitive::Aead(cipher)) => {
            let (nonce_len, tag_len) = (algorithm.nonce_len(), algorithm.tag_len());
            if body.len() < nonce_len + tag_len {
                return Err(FormatError::InvalidFormat.into());
            }
            let (nonce, rest) = body.split_at(nonce_len);
            let (ciphertext, tag) = rest.split_at(rest.len() - tag_len);
            cipher.open(key.as_bytes(), nonce, ciphertext, tag, &pre_auth)?
        }
        (Key::Public(key), Primitive::Signature(scheme)) => {
            let signature_len = algorithm.tag_len();
            if body.len() < signature_len {
                return Err(FormatError::InvalidFormat.into());
            }
            let (message, signature) = body.split_at(body.len() - signature_len);
            scheme.verify(key.as_bytes(), message, signature, &pre_auth)?;
            message.to_vec()
        }
        _ => return Err(PasetoError::KeyMismatch),
    };

    Ok(VerifiedToken::new(payload, token.unverified_footer().to_vec()))
}

/// Returns the footer of a token without authenticating it.
///
/// The footer may be used to pick a key (e.g. by `kid`) but must not be
/// trusted until the token is opened.
///
/// # Errors
///
/// Returns a [`FormatError`] if the token is malformed.
pub fn unverified_footer(token: &str) -> PasetoResult<Vec<u8>> {
    let token: Token = token.parse()?;
    Ok(token.unverified_footer().to_vec())
}

/// Serializes `claims` and seals them into a token string.
///
/// # Errors
///
/// See [`seal_payload`].
pub fn encode(
    registry: &Registry,
    key: &Key,
    claims: &Claims,
    footer: &[u8],
    implicit_assertion: &[u8],
) -> PasetoResult<String> {
    seal_payload(registry, key, &claims.to_bytes()?, footer, implicit_assertion)
}

/// Opens a token, parses its claims, and applies `validation`.
///
/// Claims are only checked after authentication succeeds.
///
/// # Errors
///
/// See [`open_payload`] and [`Validation::validate`].
pub fn decode(
    registry: &Registry,
    key: &Key,
    token: &str,
    implicit_assertion: &[u8],
    validation: &Validation,
) -> PasetoResult<VerifiedToken<Claims>> {
    let (payload, footer) = open_payload(registry, key, token, implicit_assertion)?.into_parts();
    let claims = Claims::from_bytes(&payload)?;

    if let Err(err) = validation.validate(&claims) {
        tracing::debug!(error = %err, "claims rejected");
        return Err(err);
    }
    Ok(VerifiedToken::new(claims, footer))
}
