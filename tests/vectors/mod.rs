//! Test vector types for token and key tests.
//!
//! Vectors are stored as JSON beside this module. Token vectors fix the
//! nonce (or nonce-derivation input) so local tokens are reproducible;
//! Ed25519 signatures are deterministic and ECDSA vectors are verify-only.

// Many fields are required for deserialization but not directly used in tests
#![allow(dead_code)]

use std::path::PathBuf;

use serde::Deserialize;

/// A test vector suite (top-level JSON structure).
#[derive(Debug, Deserialize)]
pub struct TestVectorSuite<T> {
    pub name: String,
    pub tests: Vec<T>,
}

/// Test vector for a sealed token.
#[derive(Debug, Deserialize)]
pub struct TokenTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    /// Token version (e.g. "v4")
    pub version: String,
    /// Purpose of the key used to open the token
    pub purpose: String,
    /// Hex-encoded local key or secret key
    pub key: Option<String>,
    /// Hex-encoded public key (public purpose only)
    #[serde(rename = "public-key")]
    pub public_key: Option<String>,
    /// Hex-encoded random input handed to the cipher (local purpose only)
    pub nonce: Option<String>,
    /// Expected payload (null for fail tests)
    pub payload: Option<String>,
    pub footer: String,
    #[serde(rename = "implicit-assertion")]
    pub implicit_assertion: String,
    pub token: String,
}

/// Test vector for a serialized key and its id.
#[derive(Debug, Deserialize)]
pub struct KeyTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    pub version: Option<String>,
    /// PASERK type ("local", "secret" or "public")
    #[serde(rename = "type")]
    pub key_type: Option<String>,
    /// Hex-encoded key bytes (null for fail tests)
    pub key: Option<String>,
    pub paserk: String,
    /// Expected `lid`, `sid` or `pid` (null for fail tests)
    pub id: Option<String>,
}

/// Get the path to the test vectors directory.
pub fn vectors_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/vectors")
}

/// Decode a hex string into bytes.
pub fn hex_decode(s: &str) -> Option<Vec<u8>> {
    hex::decode(s).ok()
}

/// Load test vectors from a JSON file.
pub fn load_vectors<T: serde::de::DeserializeOwned>(name: &str) -> TestVectorSuite<T> {
    let path = vectors_dir().join(name);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test vector file {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse test vector file {}: {e}", path.display()))
}
