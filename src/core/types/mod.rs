//! Key, token, and claims types.
//!
//! - [`LocalKey`] - Symmetric key (`k{v}.local.{data}`)
//! - [`SecretKey`] - Signing key (`k{v}.secret.{data}`)
//! - [`PublicKey`] - Verifying key (`k{v}.public.{data}`)
//! - [`Key`] - Any of the three
//! - [`KeyId`] - Key identifier (`k{v}.{lid|sid|pid}.{data}`)
//! - [`Token`] - Unverified token (`v{v}.{purpose}.{body}[.{footer}]`)
//! - [`Claims`] and [`Validation`] - JSON payloads and their checks

mod claims;
mod key;
mod key_id;
mod local;
mod public;
mod secret;
mod token;

pub use claims::{Claims, Validation, REGISTERED_CLAIMS};
pub use key::Key;
pub use key_id::KeyId;
pub use local::LocalKey;
pub use public::PublicKey;
pub use secret::SecretKey;
pub use token::{Token, VerifiedToken};
