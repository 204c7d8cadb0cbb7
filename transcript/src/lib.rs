//! Merlin-style duplex transcripts for Fiat-Shamir challenge derivation
//! (spec.md §4.T).
//!
//! This crate is a thin, typed layer over the real `merlin` transcript
//! (itself a STROBE-based duplex construction) rather than a hand-rolled
//! sponge: every sigma proof and the Bulletproofs verifier in this
//! workspace talks to transcripts only through [`ProofTranscript`], so the
//! duplex construction itself is never reimplemented or audited twice.

#![cfg_attr(not(feature = "std"), no_std)]

use curve25519::{RistrettoPoint, Scalar};
use merlin::Transcript;

/// Domain-separation label catalogue, one constant per distinct proof type
/// or transcript role so that two different protocols can never be
/// confused for each other even if they happen to append the same bytes.
pub mod labels {
    pub const PROTOCOL: &[u8] = b"zkhe-confidential-transfer-v1";
    pub const PROTOCOL_V: &[u8] = b"1";

    pub const CHAL_EQ: &[u8] = b"chal-eq";
    pub const CHAL_VALIDITY: &[u8] = b"chal-validity";
    pub const CHAL_SHIELD: &[u8] = b"chal-shield";
    pub const CHAL_BALANCE: &[u8] = b"chal-balance";
    pub const CHAL_BULLETPROOF_Y: &[u8] = b"bp-y";
    pub const CHAL_BULLETPROOF_Z: &[u8] = b"bp-z";
    pub const CHAL_BULLETPROOF_X: &[u8] = b"bp-x";
    pub const CHAL_BULLETPROOF_W: &[u8] = b"bp-w";

    pub const APPEND_SENDER_PK: &[u8] = b"sender-pk";
    pub const APPEND_RECEIVER_PK: &[u8] = b"receiver-pk";
    pub const APPEND_COMMITMENT: &[u8] = b"commitment";
    pub const APPEND_CIPHERTEXT_C: &[u8] = b"ciphertext-c";
    pub const APPEND_CIPHERTEXT_D: &[u8] = b"ciphertext-d";
    pub const APPEND_NONCE: &[u8] = b"nonce";

    // Sigma-proof append/challenge labels (spec.md §4.P literal label list).
    pub const APPEND_Y_H: &[u8] = b"Y_H";
    pub const APPEND_Y_P: &[u8] = b"Y_P";
    pub const APPEND_Y_0: &[u8] = b"Y_0";
    pub const APPEND_Y_1: &[u8] = b"Y_1";
    pub const APPEND_Y_2: &[u8] = b"Y_2";
    pub const APPEND_Z_S: &[u8] = b"z_s";
    pub const APPEND_Z_X: &[u8] = b"z_x";
    pub const APPEND_Z_R: &[u8] = b"z_r";
    pub const CHAL_C: &[u8] = b"c";

    pub const DOM_SEP_SHIELD: &[u8] = b"shield-commitment-proof";
    pub const DOM_SEP_VALIDITY: &[u8] = b"validity-proof";
    pub const DOM_SEP_EQUALITY: &[u8] = b"equality-proof";
    pub const DOM_SEP_NEW_COMMITMENT: &[u8] = b"new-commitment-proof";
    pub const DOM_SEP_BALANCE: &[u8] = b"balance-proof";

    // Bulletproofs range-proof append/challenge labels (spec.md §4.P step 1-4).
    pub const APPEND_V: &[u8] = b"V";
    pub const APPEND_A: &[u8] = b"A";
    pub const APPEND_S: &[u8] = b"S";
    pub const APPEND_T1: &[u8] = b"T_1";
    pub const APPEND_T2: &[u8] = b"T_2";
    pub const APPEND_TX: &[u8] = b"t_x";
    pub const APPEND_TX_BLINDING: &[u8] = b"t_x_blinding";
    pub const APPEND_E_BLINDING: &[u8] = b"e_blinding";
    pub const APPEND_L: &[u8] = b"L";
    pub const APPEND_R: &[u8] = b"R";
    pub const CHAL_BULLETPROOF_U: &[u8] = b"u";
}

/// Error returned when a point appended to (or read from) a transcript
/// fails to decode or is the group identity where the protocol forbids it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptError {
    #[error("point encoding did not decode to a valid Ristretto255 element")]
    InvalidPoint,
    #[error("identity element is not a valid input at this transcript step")]
    UnexpectedIdentity,
}

/// Wraps a `merlin::Transcript` with typed append/challenge helpers for the
/// group and field types this workspace uses everywhere (spec.md §4.T).
pub struct ProofTranscript(Transcript);

impl ProofTranscript {
    pub fn new(label: &'static [u8]) -> Self {
        let mut t = Transcript::new(label);
        t.append_message(b"proto", labels::PROTOCOL);
        t.append_message(b"proto-v", labels::PROTOCOL_V);
        ProofTranscript(t)
    }

    pub fn append_message(&mut self, label: &'static [u8], message: &[u8]) {
        self.0.append_message(label, message);
    }

    pub fn append_point(&mut self, label: &'static [u8], point: &RistrettoPoint) {
        self.0.append_message(label, &point.compress());
    }

    pub fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar) {
        self.0.append_message(label, &scalar.to_bytes());
    }

    pub fn append_u64(&mut self, label: &'static [u8], value: u64) {
        self.0.append_message(label, &value.to_le_bytes());
    }

    /// Decode `bytes` as a Ristretto255 point, append it, and return the
    /// decoded point. Rejects invalid encodings so a malformed proof can
    /// never desynchronize the verifier's transcript from the prover's.
    pub fn validate_and_append_point(
        &mut self,
        label: &'static [u8],
        bytes: &[u8; 32],
    ) -> Result<RistrettoPoint, TranscriptError> {
        let point = RistrettoPoint::from_bytes(bytes).ok_or(TranscriptError::InvalidPoint)?;
        self.append_point(label, &point);
        Ok(point)
    }

    pub fn challenge_bytes(&mut self, label: &'static [u8], out: &mut [u8]) {
        self.0.challenge_bytes(label, out);
    }

    /// Derive a scalar challenge via wide (64-byte) reduction mod the group
    /// order, the standard way to turn transcript output into an unbiased
    /// Fiat-Shamir challenge.
    pub fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar {
        let mut bytes = [0u8; 64];
        self.0.challenge_bytes(label, &mut bytes);
        Scalar::from_bytes_mod_order_wide(&bytes)
    }

    /// Fork the transcript's RNG state into a deterministic-but-unique
    /// 32-byte seed, used to derive proof nonces without a separate source
    /// of randomness (spec.md §4.T, §4.P nonce-binding requirement).
    pub fn context_bytes(&self) -> [u8; 32] {
        let mut clone = self.0.clone();
        let mut out = [0u8; 32];
        clone.challenge_bytes(b"context-bytes", &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_transcript_script_yields_same_challenge() {
        let mut t1 = ProofTranscript::new(b"test");
        t1.append_message(b"m", b"hello");
        let c1 = t1.challenge_scalar(b"c");

        let mut t2 = ProofTranscript::new(b"test");
        t2.append_message(b"m", b"hello");
        let c2 = t2.challenge_scalar(b"c");

        assert_eq!(c1, c2);
    }

    #[test]
    fn different_messages_yield_different_challenges() {
        let mut t1 = ProofTranscript::new(b"test");
        t1.append_message(b"m", b"hello");
        let c1 = t1.challenge_scalar(b"c");

        let mut t2 = ProofTranscript::new(b"test");
        t2.append_message(b"m", b"goodbye");
        let c2 = t2.challenge_scalar(b"c");

        assert_ne!(c1, c2);
    }

    #[test]
    fn validate_and_append_point_rejects_garbage() {
        let mut t = ProofTranscript::new(b"test");
        let garbage = [0xffu8; 32];
        assert!(t.validate_and_append_point(b"p", &garbage).is_err());
    }
}
