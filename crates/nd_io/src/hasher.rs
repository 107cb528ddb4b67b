//! crates/nd_io/src/hasher.rs
//!
//! SHA-256 digests of raw source text. Hex digests are **lowercase**.
//! The digest lets the presentation layer tell whether a reload brought in
//! different content; it never feeds into aggregation.

#![forbid(unsafe_code)]

/// Lowercase hex SHA-256 of `bytes`.
#[cfg(feature = "hash")]
pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    hex::encode(Sha256::digest(bytes))
}

/// Without the `hash` feature the digest is left empty rather than faked.
#[cfg(not(feature = "hash"))]
pub fn sha256_hex(_bytes: &[u8]) -> String {
    String::new()
}

#[cfg(all(test, feature = "hash"))]
mod tests {
    use super::*;

    #[test]
    fn known_vectors() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn digest_is_lowercase_64_hex() {
        let h = sha256_hex("Município;Date;Notifications\n".as_bytes());
        assert_eq!(h.len(), 64);
        assert!(h.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    }
}
