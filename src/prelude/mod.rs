//! Ergonomic layer for token and key operations.
//!
//! The prelude re-exports the common types together with the
//! [`TokenBuilder`] and [`TokenVerifier`] builders.
//!
//! # Usage
//!
//! ```rust
//! use paseto_paserk::prelude::*;
//! ```

mod builders;

pub use builders::{TokenBuilder, TokenVerifier};

pub use crate::core::error::{FormatError, PasetoError, PasetoResult};
pub use crate::core::registry::{global, install, Algorithm, Registry};
pub use crate::core::types::{
    Claims, Key, KeyId, LocalKey, PublicKey, SecretKey, Token, Validation, VerifiedToken,
};
pub use crate::core::version::{KeyKind, Purpose, Version};
