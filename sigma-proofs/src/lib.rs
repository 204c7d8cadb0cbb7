//! Schnorr-style sigma proofs over Ristretto255 used by the confidential
//! balance layer (spec.md §4.P): `ShieldCommitmentProof`,
//! `CiphertextValidityProof`, `CommitmentEqProof` and `BalanceProof`.
//!
//! Every proof type exposes `parse`, `verify(.., transcript)` and a
//! `pre_verify(.., collector)` variant. `pre_verify` exists so a future
//! batched-MSM verifier can accumulate several proofs' equations into one
//! randomized check; today's [`VerificationCollector`] is a stub and
//! `pre_verify` just calls `verify` (spec.md §9 "MSM batching collector"
//! design note — the spec freezes eager per-proof verification).

use curve25519::{RistrettoPoint, Scalar};
use transcript::{labels, ProofTranscript};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SigmaProofError {
    #[error("proof bytes have the wrong length for this proof type")]
    WrongLength,
    #[error("a point in the proof did not decode to a valid Ristretto255 element")]
    InvalidPoint,
    #[error("sigma-proof verification equation did not hold")]
    VerificationFailed,
}

/// Placeholder for a future batched-MSM collector (spec.md §9): proofs
/// submitted via `pre_verify` would accumulate their equations here and a
/// single randomized check would run once at the end. Present today only
/// to keep that API surface stable; it carries no state yet.
#[derive(Default)]
pub struct VerificationCollector;

impl VerificationCollector {
    pub fn new() -> Self {
        VerificationCollector
    }
}

fn decode_point(bytes: &[u8]) -> Result<RistrettoPoint, SigmaProofError> {
    let mut b = [0u8; 32];
    b.copy_from_slice(bytes);
    RistrettoPoint::from_bytes(&b).ok_or(SigmaProofError::InvalidPoint)
}

fn decode_scalar(bytes: &[u8]) -> Scalar {
    let mut b = [0u8; 32];
    b.copy_from_slice(bytes);
    Scalar::from_bytes_mod_order(&b)
}

/// Proves knowledge of the randomness `r` binding a Pedersen commitment
/// `C = v*G + r*H` and an ElGamal handle `D = r*P` for a *publicly known*
/// value `v` (the amount being shielded in a mint, spec.md §4.P). Wire
/// layout: `Y_H (32) || Y_P (32) || z (32)` = 96 bytes.
pub mod shield_commitment {
    use super::*;

    pub const LEN: usize = 96;

    #[derive(Clone, Copy, Debug)]
    pub struct ShieldCommitmentProof {
        pub y_h: RistrettoPoint,
        pub y_p: RistrettoPoint,
        pub z: Scalar,
    }

    impl ShieldCommitmentProof {
        pub fn to_bytes(&self) -> [u8; LEN] {
            let mut out = [0u8; LEN];
            out[0..32].copy_from_slice(&self.y_h.compress());
            out[32..64].copy_from_slice(&self.y_p.compress());
            out[64..96].copy_from_slice(&self.z.to_bytes());
            out
        }

        pub fn parse(bytes: &[u8]) -> Result<Self, SigmaProofError> {
            if bytes.len() != LEN {
                return Err(SigmaProofError::WrongLength);
            }
            Ok(ShieldCommitmentProof {
                y_h: decode_point(&bytes[0..32])?,
                y_p: decode_point(&bytes[32..64])?,
                z: decode_scalar(&bytes[64..96]),
            })
        }
    }

    /// `g, h` are the Pedersen commitment generators, `p` the ElGamal
    /// public key the handle `d` is encrypted to.
    pub fn prove(
        r: &Scalar,
        g: &RistrettoPoint,
        h: &RistrettoPoint,
        p: &RistrettoPoint,
        k_r: Scalar,
        transcript: &mut ProofTranscript,
    ) -> ShieldCommitmentProof {
        let _ = g;
        let y_h = h.vartime_mul(&k_r);
        let y_p = p.vartime_mul(&k_r);

        transcript.append_message(labels::DOM_SEP_SHIELD, b"");
        transcript.append_point(labels::APPEND_Y_H, &y_h);
        transcript.append_point(labels::APPEND_Y_P, &y_p);
        let c = transcript.challenge_scalar(labels::CHAL_C);

        let z = k_r.add(&c.mul(r));
        ShieldCommitmentProof { y_h, y_p, z }
    }

    pub fn verify(
        proof: &ShieldCommitmentProof,
        v: &Scalar,
        c_commitment: &RistrettoPoint,
        d_handle: &RistrettoPoint,
        g: &RistrettoPoint,
        h: &RistrettoPoint,
        p: &RistrettoPoint,
        transcript: &mut ProofTranscript,
    ) -> Result<(), SigmaProofError> {
        transcript.append_message(labels::DOM_SEP_SHIELD, b"");
        transcript.append_point(labels::APPEND_Y_H, &proof.y_h);
        transcript.append_point(labels::APPEND_Y_P, &proof.y_p);
        let c = transcript.challenge_scalar(labels::CHAL_C);

        let c_minus_vg = c_commitment.sub(&g.vartime_mul(v));

        let lhs_h = h.vartime_mul(&proof.z);
        let rhs_h = proof.y_h.add(&c_minus_vg.vartime_mul(&c));
        let lhs_p = p.vartime_mul(&proof.z);
        let rhs_p = proof.y_p.add(&d_handle.vartime_mul(&c));

        if bool::from(lhs_h.eq(&rhs_h)) && bool::from(lhs_p.eq(&rhs_p)) {
            Ok(())
        } else {
            Err(SigmaProofError::VerificationFailed)
        }
    }

    pub fn pre_verify(
        proof: &ShieldCommitmentProof,
        v: &Scalar,
        c_commitment: &RistrettoPoint,
        d_handle: &RistrettoPoint,
        g: &RistrettoPoint,
        h: &RistrettoPoint,
        p: &RistrettoPoint,
        transcript: &mut ProofTranscript,
        _collector: &mut VerificationCollector,
    ) -> Result<(), SigmaProofError> {
        verify(proof, v, c_commitment, d_handle, g, h, p, transcript)
    }
}

/// Proves a Pedersen commitment `C = x*G + r*H` and one or two ElGamal
/// handles `D0 = r*P0` (and, in the 160-byte variant, `D1 = r*P1`) all
/// share the same randomness `r`, for a secret amount `x` (spec.md §4.P).
/// Wire layout: `Y_0 (32) || Y_1 (32) [|| Y_2 (32)] || z_r (32) || z_x (32)`
/// = 128 or 160 bytes.
pub mod ciphertext_validity {
    use super::*;

    pub const LEN_SINGLE: usize = 128;
    pub const LEN_DOUBLE: usize = 160;

    #[derive(Clone, Copy, Debug)]
    pub struct CiphertextValidityProof {
        pub y_0: RistrettoPoint,
        pub y_1: RistrettoPoint,
        pub y_2: Option<RistrettoPoint>,
        pub z_r: Scalar,
        pub z_x: Scalar,
    }

    impl CiphertextValidityProof {
        pub fn to_bytes(&self) -> std::vec::Vec<u8> {
            let mut out = std::vec::Vec::with_capacity(if self.y_2.is_some() { LEN_DOUBLE } else { LEN_SINGLE });
            out.extend_from_slice(&self.y_0.compress());
            out.extend_from_slice(&self.y_1.compress());
            if let Some(y_2) = self.y_2 {
                out.extend_from_slice(&y_2.compress());
            }
            out.extend_from_slice(&self.z_r.to_bytes());
            out.extend_from_slice(&self.z_x.to_bytes());
            out
        }

        pub fn parse(bytes: &[u8]) -> Result<Self, SigmaProofError> {
            match bytes.len() {
                LEN_SINGLE => Ok(CiphertextValidityProof {
                    y_0: decode_point(&bytes[0..32])?,
                    y_1: decode_point(&bytes[32..64])?,
                    y_2: None,
                    z_r: decode_scalar(&bytes[64..96]),
                    z_x: decode_scalar(&bytes[96..128]),
                }),
                LEN_DOUBLE => Ok(CiphertextValidityProof {
                    y_0: decode_point(&bytes[0..32])?,
                    y_1: decode_point(&bytes[32..64])?,
                    y_2: Some(decode_point(&bytes[64..96])?),
                    z_r: decode_scalar(&bytes[96..128]),
                    z_x: decode_scalar(&bytes[128..160]),
                }),
                _ => Err(SigmaProofError::WrongLength),
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn prove(
        x: &Scalar,
        r: &Scalar,
        g: &RistrettoPoint,
        h: &RistrettoPoint,
        p0: &RistrettoPoint,
        p1: Option<&RistrettoPoint>,
        k_x: Scalar,
        k_r: Scalar,
        transcript: &mut ProofTranscript,
    ) -> CiphertextValidityProof {
        let y_0 = g.vartime_mul(&k_x).add(&h.vartime_mul(&k_r));
        let y_1 = p0.vartime_mul(&k_r);
        let y_2 = p1.map(|p1| p1.vartime_mul(&k_r));

        transcript.append_message(labels::DOM_SEP_VALIDITY, b"");
        transcript.append_point(labels::APPEND_Y_0, &y_0);
        transcript.append_point(labels::APPEND_Y_1, &y_1);
        if let Some(y_2) = y_2 {
            transcript.append_point(labels::APPEND_Y_2, &y_2);
        }
        let c = transcript.challenge_scalar(labels::CHAL_C);

        let z_x = k_x.add(&c.mul(x));
        let z_r = k_r.add(&c.mul(r));
        CiphertextValidityProof { y_0, y_1, y_2, z_r, z_x }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn verify(
        proof: &CiphertextValidityProof,
        c_commitment: &RistrettoPoint,
        d0: &RistrettoPoint,
        d1: Option<&RistrettoPoint>,
        g: &RistrettoPoint,
        h: &RistrettoPoint,
        p0: &RistrettoPoint,
        p1: Option<&RistrettoPoint>,
        transcript: &mut ProofTranscript,
    ) -> Result<(), SigmaProofError> {
        transcript.append_message(labels::DOM_SEP_VALIDITY, b"");
        transcript.append_point(labels::APPEND_Y_0, &proof.y_0);
        transcript.append_point(labels::APPEND_Y_1, &proof.y_1);
        if let Some(y_2) = proof.y_2 {
            transcript.append_point(labels::APPEND_Y_2, &y_2);
        }
        let c = transcript.challenge_scalar(labels::CHAL_C);

        let lhs_0 = g.vartime_mul(&proof.z_x).add(&h.vartime_mul(&proof.z_r));
        let rhs_0 = proof.y_0.add(&c_commitment.vartime_mul(&c));

        let lhs_1 = p0.vartime_mul(&proof.z_r);
        let rhs_1 = proof.y_1.add(&d0.vartime_mul(&c));

        let mut ok = bool::from(lhs_0.eq(&rhs_0)) && bool::from(lhs_1.eq(&rhs_1));

        match (proof.y_2, d1, p1) {
            (Some(y_2), Some(d1), Some(p1)) => {
                let lhs_2 = p1.vartime_mul(&proof.z_r);
                let rhs_2 = y_2.add(&d1.vartime_mul(&c));
                ok &= bool::from(lhs_2.eq(&rhs_2));
            }
            (None, None, None) => {}
            _ => ok = false,
        }

        if ok {
            Ok(())
        } else {
            Err(SigmaProofError::VerificationFailed)
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pre_verify(
        proof: &CiphertextValidityProof,
        c_commitment: &RistrettoPoint,
        d0: &RistrettoPoint,
        d1: Option<&RistrettoPoint>,
        g: &RistrettoPoint,
        h: &RistrettoPoint,
        p0: &RistrettoPoint,
        p1: Option<&RistrettoPoint>,
        transcript: &mut ProofTranscript,
        _collector: &mut VerificationCollector,
    ) -> Result<(), SigmaProofError> {
        verify(proof, c_commitment, d0, d1, g, h, p0, p1, transcript)
    }
}

/// Proves a source ElGamal ciphertext `(C_src, D_src)` and a destination
/// Pedersen commitment `C_dest` commit to the same secret amount `x`, with
/// independent randomness `s` (source) and `r` (destination) (spec.md
/// §4.P). Wire layout: `Y_0 || Y_1 || Y_2 || z_s || z_x || z_r` = 192 bytes.
pub mod commitment_eq {
    use super::*;

    pub const LEN: usize = 192;

    #[derive(Clone, Copy, Debug)]
    pub struct CommitmentEqProof {
        pub y_0: RistrettoPoint,
        pub y_1: RistrettoPoint,
        pub y_2: RistrettoPoint,
        pub z_s: Scalar,
        pub z_x: Scalar,
        pub z_r: Scalar,
    }

    impl CommitmentEqProof {
        pub fn to_bytes(&self) -> [u8; LEN] {
            let mut out = [0u8; LEN];
            out[0..32].copy_from_slice(&self.y_0.compress());
            out[32..64].copy_from_slice(&self.y_1.compress());
            out[64..96].copy_from_slice(&self.y_2.compress());
            out[96..128].copy_from_slice(&self.z_s.to_bytes());
            out[128..160].copy_from_slice(&self.z_x.to_bytes());
            out[160..192].copy_from_slice(&self.z_r.to_bytes());
            out
        }

        pub fn parse(bytes: &[u8]) -> Result<Self, SigmaProofError> {
            if bytes.len() != LEN {
                return Err(SigmaProofError::WrongLength);
            }
            Ok(CommitmentEqProof {
                y_0: decode_point(&bytes[0..32])?,
                y_1: decode_point(&bytes[32..64])?,
                y_2: decode_point(&bytes[64..96])?,
                z_s: decode_scalar(&bytes[96..128]),
                z_x: decode_scalar(&bytes[128..160]),
                z_r: decode_scalar(&bytes[160..192]),
            })
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn prove(
        x: &Scalar,
        s: &Scalar,
        r: &Scalar,
        g: &RistrettoPoint,
        h: &RistrettoPoint,
        p_src: &RistrettoPoint,
        k_x: Scalar,
        k_s: Scalar,
        k_r: Scalar,
        transcript: &mut ProofTranscript,
    ) -> CommitmentEqProof {
        let y_0 = g.vartime_mul(&k_x).add(&h.vartime_mul(&k_s));
        let y_1 = p_src.vartime_mul(&k_s);
        let y_2 = g.vartime_mul(&k_x).add(&h.vartime_mul(&k_r));

        transcript.append_message(labels::DOM_SEP_EQUALITY, b"");
        transcript.append_point(labels::APPEND_Y_0, &y_0);
        transcript.append_point(labels::APPEND_Y_1, &y_1);
        transcript.append_point(labels::APPEND_Y_2, &y_2);
        let c = transcript.challenge_scalar(labels::CHAL_C);

        let z_x = k_x.add(&c.mul(x));
        let z_s = k_s.add(&c.mul(s));
        let z_r = k_r.add(&c.mul(r));
        CommitmentEqProof { y_0, y_1, y_2, z_s, z_x, z_r }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn verify(
        proof: &CommitmentEqProof,
        c_src: &RistrettoPoint,
        d_src: &RistrettoPoint,
        c_dest: &RistrettoPoint,
        g: &RistrettoPoint,
        h: &RistrettoPoint,
        p_src: &RistrettoPoint,
        transcript: &mut ProofTranscript,
    ) -> Result<(), SigmaProofError> {
        transcript.append_message(labels::DOM_SEP_EQUALITY, b"");
        transcript.append_point(labels::APPEND_Y_0, &proof.y_0);
        transcript.append_point(labels::APPEND_Y_1, &proof.y_1);
        transcript.append_point(labels::APPEND_Y_2, &proof.y_2);
        let c = transcript.challenge_scalar(labels::CHAL_C);

        let lhs_0 = g.vartime_mul(&proof.z_x).add(&h.vartime_mul(&proof.z_s));
        let rhs_0 = proof.y_0.add(&c_src.vartime_mul(&c));

        let lhs_1 = p_src.vartime_mul(&proof.z_s);
        let rhs_1 = proof.y_1.add(&d_src.vartime_mul(&c));

        let lhs_2 = g.vartime_mul(&proof.z_x).add(&h.vartime_mul(&proof.z_r));
        let rhs_2 = proof.y_2.add(&c_dest.vartime_mul(&c));

        if bool::from(lhs_0.eq(&rhs_0)) && bool::from(lhs_1.eq(&rhs_1)) && bool::from(lhs_2.eq(&rhs_2)) {
            Ok(())
        } else {
            Err(SigmaProofError::VerificationFailed)
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pre_verify(
        proof: &CommitmentEqProof,
        c_src: &RistrettoPoint,
        d_src: &RistrettoPoint,
        c_dest: &RistrettoPoint,
        g: &RistrettoPoint,
        h: &RistrettoPoint,
        p_src: &RistrettoPoint,
        transcript: &mut ProofTranscript,
        _collector: &mut VerificationCollector,
    ) -> Result<(), SigmaProofError> {
        verify(proof, c_src, d_src, c_dest, g, h, p_src, transcript)
    }
}

/// A public amount bound to a [`commitment_eq::CommitmentEqProof`] (spec.md
/// §4.P). Wire layout: `amount (8, LE) || CommitmentEqProof (192)` = 200
/// bytes; used by mint/burn, where the amount crossing the confidential
/// boundary is public.
pub mod balance {
    use super::*;
    use commitment_eq::CommitmentEqProof;

    pub const LEN: usize = 200;

    #[derive(Clone, Copy, Debug)]
    pub struct BalanceProof {
        pub amount: u64,
        pub eq_proof: CommitmentEqProof,
    }

    impl BalanceProof {
        pub fn to_bytes(&self) -> [u8; LEN] {
            let mut out = [0u8; LEN];
            out[0..8].copy_from_slice(&self.amount.to_le_bytes());
            out[8..LEN].copy_from_slice(&self.eq_proof.to_bytes());
            out
        }

        pub fn parse(bytes: &[u8]) -> Result<Self, SigmaProofError> {
            if bytes.len() != LEN {
                return Err(SigmaProofError::WrongLength);
            }
            let mut amount_bytes = [0u8; 8];
            amount_bytes.copy_from_slice(&bytes[0..8]);
            Ok(BalanceProof {
                amount: u64::from_le_bytes(amount_bytes),
                eq_proof: CommitmentEqProof::parse(&bytes[8..LEN])?,
            })
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn verify(
        proof: &BalanceProof,
        c_src: &RistrettoPoint,
        d_src: &RistrettoPoint,
        c_dest: &RistrettoPoint,
        g: &RistrettoPoint,
        h: &RistrettoPoint,
        p_src: &RistrettoPoint,
        transcript: &mut ProofTranscript,
    ) -> Result<(), SigmaProofError> {
        transcript.append_u64(b"balance-amount", proof.amount);
        commitment_eq::verify(&proof.eq_proof, c_src, d_src, c_dest, g, h, p_src, transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use rand::RngCore;

    fn rand_scalar() -> Scalar {
        let mut bytes = [0u8; 64];
        OsRng.fill_bytes(&mut bytes);
        Scalar::from_bytes_mod_order_wide(&bytes)
    }

    #[test]
    fn shield_commitment_proof_round_trips() {
        let g = RistrettoPoint::basepoint();
        let h = RistrettoPoint::hash_to_curve(b"test-h-generator");
        let p = RistrettoPoint::hash_to_curve(b"test-p-generator");

        let v = Scalar::from_bytes_mod_order(&[7u8; 32]);
        let r = rand_scalar();
        let c_commitment = g.vartime_mul(&v).add(&h.vartime_mul(&r));
        let d_handle = p.vartime_mul(&r);

        let mut prove_t = ProofTranscript::new(b"shield-test");
        let proof = shield_commitment::prove(&r, &g, &h, &p, rand_scalar(), &mut prove_t);

        let mut verify_t = ProofTranscript::new(b"shield-test");
        assert!(shield_commitment::verify(&proof, &v, &c_commitment, &d_handle, &g, &h, &p, &mut verify_t).is_ok());

        let bytes = proof.to_bytes();
        let parsed = shield_commitment::ShieldCommitmentProof::parse(&bytes).unwrap();
        let mut verify_t2 = ProofTranscript::new(b"shield-test");
        assert!(
            shield_commitment::verify(&parsed, &v, &c_commitment, &d_handle, &g, &h, &p, &mut verify_t2).is_ok()
        );
    }

    #[test]
    fn shield_commitment_proof_rejects_wrong_value() {
        let g = RistrettoPoint::basepoint();
        let h = RistrettoPoint::hash_to_curve(b"test-h-generator");
        let p = RistrettoPoint::hash_to_curve(b"test-p-generator");

        let v = Scalar::from_bytes_mod_order(&[7u8; 32]);
        let wrong_v = Scalar::from_bytes_mod_order(&[8u8; 32]);
        let r = rand_scalar();
        let c_commitment = g.vartime_mul(&v).add(&h.vartime_mul(&r));
        let d_handle = p.vartime_mul(&r);

        let mut prove_t = ProofTranscript::new(b"shield-test");
        let proof = shield_commitment::prove(&r, &g, &h, &p, rand_scalar(), &mut prove_t);

        let mut verify_t = ProofTranscript::new(b"shield-test");
        assert!(
            shield_commitment::verify(&proof, &wrong_v, &c_commitment, &d_handle, &g, &h, &p, &mut verify_t)
                .is_err()
        );
    }

    #[test]
    fn ciphertext_validity_proof_single_handle_round_trips() {
        let g = RistrettoPoint::basepoint();
        let h = RistrettoPoint::hash_to_curve(b"test-h-generator");
        let p0 = RistrettoPoint::hash_to_curve(b"test-p0-generator");

        let x = rand_scalar();
        let r = rand_scalar();
        let c_commitment = g.vartime_mul(&x).add(&h.vartime_mul(&r));
        let d0 = p0.vartime_mul(&r);

        let mut prove_t = ProofTranscript::new(b"validity-test");
        let proof =
            ciphertext_validity::prove(&x, &r, &g, &h, &p0, None, rand_scalar(), rand_scalar(), &mut prove_t);
        assert_eq!(proof.to_bytes().len(), ciphertext_validity::LEN_SINGLE);

        let mut verify_t = ProofTranscript::new(b"validity-test");
        assert!(
            ciphertext_validity::verify(&proof, &c_commitment, &d0, None, &g, &h, &p0, None, &mut verify_t).is_ok()
        );
    }

    #[test]
    fn ciphertext_validity_proof_double_handle_round_trips() {
        let g = RistrettoPoint::basepoint();
        let h = RistrettoPoint::hash_to_curve(b"test-h-generator");
        let p0 = RistrettoPoint::hash_to_curve(b"test-p0-generator");
        let p1 = RistrettoPoint::hash_to_curve(b"test-p1-generator");

        let x = rand_scalar();
        let r = rand_scalar();
        let c_commitment = g.vartime_mul(&x).add(&h.vartime_mul(&r));
        let d0 = p0.vartime_mul(&r);
        let d1 = p1.vartime_mul(&r);

        let mut prove_t = ProofTranscript::new(b"validity-test");
        let proof = ciphertext_validity::prove(
            &x,
            &r,
            &g,
            &h,
            &p0,
            Some(&p1),
            rand_scalar(),
            rand_scalar(),
            &mut prove_t,
        );
        assert_eq!(proof.to_bytes().len(), ciphertext_validity::LEN_DOUBLE);

        let mut verify_t = ProofTranscript::new(b"validity-test");
        assert!(ciphertext_validity::verify(
            &proof,
            &c_commitment,
            &d0,
            Some(&d1),
            &g,
            &h,
            &p0,
            Some(&p1),
            &mut verify_t
        )
        .is_ok());
    }

    #[test]
    fn commitment_eq_proof_round_trips() {
        let g = RistrettoPoint::basepoint();
        let h = RistrettoPoint::hash_to_curve(b"test-h-generator");
        let p_src = RistrettoPoint::hash_to_curve(b"test-psrc-generator");

        let x = rand_scalar();
        let s = rand_scalar();
        let r = rand_scalar();
        let c_src = g.vartime_mul(&x).add(&h.vartime_mul(&s));
        let d_src = p_src.vartime_mul(&s);
        let c_dest = g.vartime_mul(&x).add(&h.vartime_mul(&r));

        let mut prove_t = ProofTranscript::new(b"eq-test");
        let proof = commitment_eq::prove(
            &x,
            &s,
            &r,
            &g,
            &h,
            &p_src,
            rand_scalar(),
            rand_scalar(),
            rand_scalar(),
            &mut prove_t,
        );

        let mut verify_t = ProofTranscript::new(b"eq-test");
        assert!(commitment_eq::verify(&proof, &c_src, &d_src, &c_dest, &g, &h, &p_src, &mut verify_t).is_ok());
    }

    #[test]
    fn balance_proof_round_trips_through_bytes() {
        let g = RistrettoPoint::basepoint();
        let h = RistrettoPoint::hash_to_curve(b"test-h-generator");
        let p_src = RistrettoPoint::hash_to_curve(b"test-psrc-generator");

        let x = rand_scalar();
        let s = rand_scalar();
        let r = rand_scalar();
        let c_src = g.vartime_mul(&x).add(&h.vartime_mul(&s));
        let d_src = p_src.vartime_mul(&s);
        let c_dest = g.vartime_mul(&x).add(&h.vartime_mul(&r));

        let mut prove_t = ProofTranscript::new(b"balance-test");
        prove_t.append_u64(b"balance-amount", 42);
        let eq_proof = commitment_eq::prove(
            &x,
            &s,
            &r,
            &g,
            &h,
            &p_src,
            rand_scalar(),
            rand_scalar(),
            rand_scalar(),
            &mut prove_t,
        );
        let proof = balance::BalanceProof { amount: 42, eq_proof };

        let bytes = proof.to_bytes();
        assert_eq!(bytes.len(), balance::LEN);
        let parsed = balance::BalanceProof::parse(&bytes).unwrap();

        let mut verify_t = ProofTranscript::new(b"balance-test");
        assert!(balance::verify(&parsed, &c_src, &d_src, &c_dest, &g, &h, &p_src, &mut verify_t).is_ok());
    }
}
