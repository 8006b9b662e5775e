//! Pre-Authentication Encoding.
//!
//! `PAE(p_0, .., p_n) = LE64(n + 1) || LE64(len(p_0)) || p_0 || ..`
//!
//! Every count and length is a 64-bit little-endian integer with the most
//! significant bit cleared, so no two distinct sequences share an encoding.

/// Encodes a single length or count.
fn le64(n: u64) -> [u8; 8] {
    (n & (u64::MAX >> 1)).to_le_bytes()
}

/// Encodes an ordered sequence of byte strings.
#[must_use]
pub fn pre_auth_encode(pieces: &[&[u8]]) -> Vec<u8> {
    let total: usize = pieces.iter().map(|p| p.len() + 8).sum();
    let mut out = Vec::with_capacity(total + 8);

    out.extend_from_slice(&le64(pieces.len() as u64));
    for piece in pieces {
        out.extend_from_slice(&le64(piece.len() as u64));
        out.extend_from_slice(piece);
    }
    out
}

/// The token context that every algorithm binds into its PAE input.
#[derive(Debug, Clone, Copy)]
pub struct PreAuth<'a> {
    /// Token header including trailing dot, e.g. `"v4.local."`.
    pub header: &'a str,
    /// Raw footer bytes (empty if absent).
    pub footer: &'a [u8],
    /// Implicit assertion bytes (empty if absent).
    pub implicit_assertion: &'a [u8],
}

impl PreAuth<'_> {
    /// `PAE(h, ..middle, f)` for versions without implicit assertions.
    #[must_use]
    pub fn encode_without_assertion(&self, middle: &[&[u8]]) -> Vec<u8> {
        let mut pieces: Vec<&[u8]> = Vec::with_capacity(middle.len() + 2);
        pieces.push(self.header.as_bytes());
        pieces.extend_from_slice(middle);
        pieces.push(self.footer);
        pre_auth_encode(&pieces)
    }

    /// `PAE(h, ..middle, f, i)`.
    #[must_use]
    pub fn encode(&self, middle: &[&[u8]]) -> Vec<u8> {
        self.encode_prefixed(&[], middle)
    }

    /// `PAE(..prefix, h, ..middle, f, i)`.
    #[must_use]
    pub fn encode_prefixed(&self, prefix: &[&[u8]], middle: &[&[u8]]) -> Vec<u8> {
        let mut pieces: Vec<&[u8]> = Vec::with_capacity(prefix.len() + middle.len() + 3);
        pieces.extend_from_slice(prefix);
        pieces.push(self.header.as_bytes());
        pieces.extend_from_slice(middle);
        pieces.push(self.footer);
        pieces.push(self.implicit_assertion);
        pre_auth_encode(&pieces)
    }
}
