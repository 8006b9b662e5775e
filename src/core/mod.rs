//! Core PASETO and PASERK types and operations.
//!
//! This module provides the fundamental building blocks:
//!
//! - [`version`] - Versions, purposes, PASERK types and their descriptor tables
//! - [`error`] - Error types for token and key operations
//! - [`header`] - Header parsing and generation utilities
//! - [`registry`] - The `(version, purpose)` to algorithm table
//! - [`types`] - Keys, key ids, tokens and claims
//! - [`operations`] - Cryptographic operations (PAE, ciphers, signatures, ids)

pub mod error;
pub mod header;
pub mod operations;
pub mod registry;
pub mod types;
pub mod version;

// Re-export commonly used items
pub use error::{FormatError, PasetoError, PasetoResult};
pub use registry::{Algorithm, LocalCipher, Registry, SignatureScheme};
pub use version::{KeyKind, PaserkType, Purpose, Version};
