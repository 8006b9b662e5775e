//! Build script for paseto-paserk.
//!
//! This emits compile-time warnings for security-sensitive feature flags.

fn main() {
    // Emit a compile-time warning when the legacy v1 suite is enabled
    #[cfg(feature = "v1")]
    {
        // Note: Using single-colon syntax for MSRV 1.75.0 compatibility
        println!("cargo:warning=SECURITY WARNING: The 'v1' feature is enabled.");
        println!("cargo:warning=v1 local tokens use AES-256-CTR with HMAC-SHA384 and cannot bind implicit assertions.");
        println!("cargo:warning=Use v4 for new projects. v1 is provided only for legacy PASETO interoperability.");
    }
}
