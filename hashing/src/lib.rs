//! Hash functions used throughout the proof system (spec.md §4.H):
//! SHA-512 (Ed25519, scalar reduction), SHA3-256/512 and Keccak-256
//! (application-level commitments and the Ristretto Schnorr variant).
//!
//! Every hash is exposed three ways: a one-shot free function, a streaming
//! `Digest`-compatible wrapper for multi-part messages, and (behind `std`)
//! a batch helper for hashing many independent messages without repeated
//! setup overhead.

#![cfg_attr(not(feature = "std"), no_std)]

use sha2::Digest as _;
use sha3::Digest as _;

/// SHA-512 (spec.md §4.H): used by Ed25519 signing/verification and every
/// wide-reduction scalar derivation in this workspace.
pub mod sha512 {
    use super::*;

    pub fn hash(data: &[u8]) -> [u8; 64] {
        let mut out = [0u8; 64];
        out.copy_from_slice(&sha2::Sha512::digest(data));
        out
    }

    #[cfg(feature = "std")]
    pub fn batch(inputs: &[&[u8]]) -> std::vec::Vec<[u8; 64]> {
        inputs.iter().map(|m| hash(m)).collect()
    }

    #[derive(Clone, Default)]
    pub struct Hasher(sha2::Sha512);

    impl Hasher {
        pub fn new() -> Self {
            Hasher(sha2::Sha512::new())
        }
        pub fn update(&mut self, data: &[u8]) {
            self.0.update(data);
        }
        pub fn finalize(self) -> [u8; 64] {
            let mut out = [0u8; 64];
            out.copy_from_slice(&self.0.finalize());
            out
        }
    }
}

/// SHA3-256 (spec.md §4.H).
pub mod sha3_256 {
    use super::*;

    pub fn hash(data: &[u8]) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&sha3::Sha3_256::digest(data));
        out
    }

    #[cfg(feature = "std")]
    pub fn batch(inputs: &[&[u8]]) -> std::vec::Vec<[u8; 32]> {
        inputs.iter().map(|m| hash(m)).collect()
    }

    #[derive(Clone, Default)]
    pub struct Hasher(sha3::Sha3_256);

    impl Hasher {
        pub fn new() -> Self {
            Hasher(sha3::Sha3_256::new())
        }
        pub fn update(&mut self, data: &[u8]) {
            self.0.update(data);
        }
        pub fn finalize(self) -> [u8; 32] {
            let mut out = [0u8; 32];
            out.copy_from_slice(&self.0.finalize());
            out
        }
    }
}

/// SHA3-512 (spec.md §4.H): the hash the Ristretto255 Schnorr variant signs
/// and verifies with.
pub mod sha3_512 {
    use super::*;

    pub fn hash(data: &[u8]) -> [u8; 64] {
        let mut out = [0u8; 64];
        out.copy_from_slice(&sha3::Sha3_512::digest(data));
        out
    }

    #[cfg(feature = "std")]
    pub fn batch(inputs: &[&[u8]]) -> std::vec::Vec<[u8; 64]> {
        inputs.iter().map(|m| hash(m)).collect()
    }

    #[derive(Clone, Default)]
    pub struct Hasher(sha3::Sha3_512);

    impl Hasher {
        pub fn new() -> Self {
            Hasher(sha3::Sha3_512::new())
        }
        pub fn update(&mut self, data: &[u8]) {
            self.0.update(data);
        }
        pub fn finalize(self) -> [u8; 64] {
            let mut out = [0u8; 64];
            out.copy_from_slice(&self.0.finalize());
            out
        }
    }
}

/// Keccak-256 (spec.md §4.H): the Ethereum-style hash used for
/// application-level commitments.
pub mod keccak256 {
    use super::*;

    pub fn hash(data: &[u8]) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&sha3::Keccak256::digest(data));
        out
    }

    #[cfg(feature = "std")]
    pub fn batch(inputs: &[&[u8]]) -> std::vec::Vec<[u8; 32]> {
        inputs.iter().map(|m| hash(m)).collect()
    }

    #[derive(Clone, Default)]
    pub struct Hasher(sha3::Keccak256);

    impl Hasher {
        pub fn new() -> Self {
            Hasher(sha3::Keccak256::new())
        }
        pub fn update(&mut self, data: &[u8]) {
            self.0.update(data);
        }
        pub fn finalize(self) -> [u8; 32] {
            let mut out = [0u8; 32];
            out.copy_from_slice(&self.0.finalize());
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha512_empty_matches_known_answer() {
        let digest = sha512::hash(b"");
        assert_eq!(
            digest,
            hex_literal::hex!(
                "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9c"
                "e47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da"
            )
        );
    }

    #[test]
    fn keccak256_empty_matches_known_answer() {
        let digest = keccak256::hash(b"");
        assert_eq!(
            digest,
            hex_literal::hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a47")
        );
    }

    #[test]
    fn streaming_matches_one_shot() {
        let mut h = sha3_256::Hasher::new();
        h.update(b"hello, ");
        h.update(b"world");
        assert_eq!(h.finalize(), sha3_256::hash(b"hello, world"));
    }
}
