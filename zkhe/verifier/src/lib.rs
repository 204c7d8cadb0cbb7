//! Server-side verification for the confidential-transfer, mint and burn
//! proofs produced by `zkhe-prover`.
//!
//! Every bundle is a fixed-offset concatenation of one `sigma-proofs` proof
//! and one or two 64-bit Bulletproof range proofs — no length prefixes,
//! since a [`bulletproofs::RangeProof`] for a fixed bit width has a fixed
//! byte width. [`ZkheVerifier`] implements `zkhe_primitives::ZkVerifier` and
//! is generic over a [`NetworkIdProvider`] so the network a proof is bound
//! to is fixed by the type, not a runtime argument that could be forgotten.

use std::marker::PhantomData;

use bulletproofs::{BulletproofGens, RangeProof};
use curve25519::RistrettoPoint;
use sigma_proofs::{balance, ciphertext_validity, shield_commitment, SigmaProofError};
use thiserror::Error;
use transcript::ProofTranscript;
use zkhe_primitives::{
    commitment_or_identity, pad_or_trim_asset_id, pedersen_gens, pedersen_h_generator,
    point_from_bytes, Ciphertext, EncryptedAmount, NetworkIdProvider, PrimitivesError,
    PublicContext, PublicKeyBytes, RangeProofVerifier, SDK_VERSION, ZkVerifier,
};

#[cfg(test)]
mod tests;

const RANGE_BITS: usize = 64;
const RANGE_PROOF_LEN: usize = 672;

const SENDER_BUNDLE_LEN: usize = 32 + ciphertext_validity::LEN_SINGLE + RANGE_PROOF_LEN;
const ACCEPT_ENVELOPE_LEN: usize = 32 + 2 * RANGE_PROOF_LEN;
const MINT_PROOF_LEN: usize = 8 + 64 + shield_commitment::LEN + 2 * RANGE_PROOF_LEN;
const BURN_PROOF_LEN: usize = 32 + 64 + balance::LEN + 2 * RANGE_PROOF_LEN;

#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("proof bytes have the wrong length or are otherwise malformed")]
    Malformed,
    #[error("a point in the proof did not decode to a valid curve element")]
    InvalidPoint,
    #[error("sigma-proof verification failed")]
    SigmaProof,
    #[error("range proof verification failed")]
    RangeProof,
    #[error("an overflow or underflow occurred reconstructing a commitment")]
    Overflow,
}

impl From<PrimitivesError> for VerifierError {
    fn from(_: PrimitivesError) -> Self {
        VerifierError::InvalidPoint
    }
}

impl From<SigmaProofError> for VerifierError {
    fn from(_: SigmaProofError) -> Self {
        VerifierError::SigmaProof
    }
}

/// Delegates Bulletproof range-proof verification, kept as a standalone
/// unit struct so [`ZkheVerifier`] can depend on it through the
/// `RangeProofVerifier` trait boundary instead of the concrete bulletproofs
/// API.
pub struct BulletproofRangeVerifier;

impl RangeProofVerifier for BulletproofRangeVerifier {
    fn verify_range_proof(
        label: &[u8],
        ctx_bytes: &[u8],
        commitment: &[u8; 32],
        proof_bytes: &[u8],
    ) -> Result<(), ()> {
        let commitment_point = point_from_bytes(commitment).map_err(|_| ())?;
        let proof = RangeProof::from_bytes(proof_bytes).map_err(|_| ())?;

        let pc_gens = pedersen_gens();
        let mut t = ProofTranscript::new(b"zkhe-range-proof");
        t.append_message(b"range-label", label);
        t.append_message(b"range-ctx", ctx_bytes);
        t.append_message(b"range-commitment", commitment);

        bulletproofs::verify_single(&proof, &[commitment_point], &[RANGE_BITS], &pc_gens, &mut t)
            .map_err(|_| ())
    }
}

fn fork_range_ctx(t: &ProofTranscript) -> [u8; 32] {
    t.context_bytes()
}

fn verify_range(label: &'static [u8], ctx_bytes: &[u8; 32], commitment: &[u8; 32], bytes: &[u8]) -> Result<(), VerifierError> {
    BulletproofRangeVerifier::verify_range_proof(label, ctx_bytes, commitment, bytes)
        .map_err(|_| VerifierError::RangeProof)
}

/// Verifies the fixed-offset bundles `zkhe-prover` produces, bound to a
/// single, statically-known network id.
pub struct ZkheVerifier<N: NetworkIdProvider>(PhantomData<N>);

impl<N: NetworkIdProvider> ZkVerifier for ZkheVerifier<N> {
    type Error = VerifierError;

    fn verify_transfer_sent(
        asset_id: &[u8],
        sender_pk: &[u8; 32],
        receiver_pk: &[u8; 32],
        from_old_c: &[u8],
        to_old_c: &[u8],
        delta_ct_bytes: &[u8; 64],
        bundle: &[u8],
    ) -> Result<([u8; 32], [u8; 32]), Self::Error> {
        if bundle.len() != SENDER_BUNDLE_LEN {
            return Err(VerifierError::Malformed);
        }
        let g = RistrettoPoint::basepoint();
        let h = pedersen_h_generator();
        let sender_pk_pt = point_from_bytes(sender_pk)?;
        let receiver_pk_pt = point_from_bytes(receiver_pk)?;
        let from_old_pt = commitment_or_identity(from_old_c)?;
        let to_old_pt = commitment_or_identity(to_old_c)?;

        let delta_ct = Ciphertext::from_bytes(delta_ct_bytes)?;
        let mut delta_comm_bytes = [0u8; 32];
        delta_comm_bytes.copy_from_slice(&bundle[0..32]);
        let delta_comm = point_from_bytes(&delta_comm_bytes)?;
        if !bool::from(delta_comm.eq(&delta_ct.c)) {
            return Err(VerifierError::Malformed);
        }

        let ctx = PublicContext {
            network_id: N::network_id(),
            sdk_version: SDK_VERSION,
            asset_id: pad_or_trim_asset_id(asset_id),
            sender_pk: sender_pk_pt,
            receiver_pk: receiver_pk_pt,
            auditor_pk: None,
            fee_commitment: RistrettoPoint::identity(),
            ciphertext_out: delta_ct,
            ciphertext_in: None,
        };
        let mut t = zkhe_primitives::new_transcript(&ctx);

        let validity_proof = ciphertext_validity::CiphertextValidityProof::parse(&bundle[32..32 + ciphertext_validity::LEN_SINGLE])?;
        ciphertext_validity::verify(&validity_proof, &delta_ct.c, &delta_ct.d, None, &g, &h, &receiver_pk_pt, None, &mut t)?;
        let ctx_bytes = fork_range_ctx(&t);

        let from_new = from_old_pt.sub(&delta_ct.c);
        let to_new = to_old_pt.add(&delta_ct.c);
        let from_new_bytes = from_new.compress();
        let to_new_bytes = to_new.compress();

        let range_from = &bundle[32 + ciphertext_validity::LEN_SINGLE..];
        verify_range(b"range_from_new", &ctx_bytes, &from_new_bytes, range_from)?;

        Ok((from_new_bytes, to_new_bytes))
    }

    fn verify_transfer_received(
        asset_id: &[u8],
        receiver_pk: &[u8; 32],
        avail_old_c: &[u8],
        pending_old_c: &[u8],
        pending_commits: &[[u8; 32]],
        envelope: &[u8],
    ) -> Result<([u8; 32], [u8; 32]), Self::Error> {
        if envelope.len() != ACCEPT_ENVELOPE_LEN {
            return Err(VerifierError::Malformed);
        }
        let receiver_pk_pt = point_from_bytes(receiver_pk)?;
        let avail_old_pt = commitment_or_identity(avail_old_c)?;
        let pending_old_pt = commitment_or_identity(pending_old_c)?;

        let mut delta_comm_bytes = [0u8; 32];
        delta_comm_bytes.copy_from_slice(&envelope[0..32]);
        let delta_comm = point_from_bytes(&delta_comm_bytes)?;

        // If the caller provides the pending balance's constituent deposits,
        // cross-check they actually sum to the claimed pending commitment and
        // that the accepted delta is one of them.
        if !pending_commits.is_empty() {
            let mut sum = RistrettoPoint::identity();
            let mut found = false;
            for commit_bytes in pending_commits {
                let pt = point_from_bytes(commit_bytes)?;
                sum = sum.add(&pt);
                if commit_bytes == &delta_comm_bytes {
                    found = true;
                }
            }
            if !found || !bool::from(sum.eq(&pending_old_pt)) {
                return Err(VerifierError::Malformed);
            }
        }

        let mut t = ProofTranscript::new(b"zkhe-accept-ctx");
        t.append_message(b"network-id", &N::network_id());
        t.append_message(b"asset-id", &pad_or_trim_asset_id(asset_id));
        t.append_point(b"receiver-pk", &receiver_pk_pt);
        t.append_point(b"avail-old", &avail_old_pt);
        t.append_point(b"pending-old", &pending_old_pt);
        t.append_point(b"delta-comm", &delta_comm);
        let ctx_bytes = fork_range_ctx(&t);

        let avail_new = avail_old_pt.add(&delta_comm);
        let pending_new = pending_old_pt.sub(&delta_comm);
        let avail_new_bytes = avail_new.compress();
        let pending_new_bytes = pending_new.compress();

        let rp_avail = &envelope[32..32 + RANGE_PROOF_LEN];
        let rp_pending = &envelope[32 + RANGE_PROOF_LEN..];
        verify_range(b"range_avail_new", &ctx_bytes, &avail_new_bytes, rp_avail)?;
        verify_range(b"range_pending_new", &ctx_bytes, &pending_new_bytes, rp_pending)?;

        Ok((avail_new_bytes, pending_new_bytes))
    }

    fn verify_mint(
        asset_id: &[u8],
        to_pk: &PublicKeyBytes,
        to_pending_old_c: &[u8],
        total_old_c: &[u8],
        proof: &[u8],
    ) -> Result<([u8; 32], [u8; 32], [u8; 64]), Self::Error> {
        if proof.len() != MINT_PROOF_LEN {
            return Err(VerifierError::Malformed);
        }
        let g = RistrettoPoint::basepoint();
        let h = pedersen_h_generator();
        let to_pk_pt = to_pk.point()?;
        let to_old_pt = commitment_or_identity(to_pending_old_c)?;
        let total_old_pt = commitment_or_identity(total_old_c)?;

        let mut amount_bytes = [0u8; 8];
        amount_bytes.copy_from_slice(&proof[0..8]);
        let amount = u64::from_le_bytes(amount_bytes);
        let amount_scalar = curve25519::Scalar::from_u64(amount);

        let mut minted_ct_bytes = [0u8; 64];
        minted_ct_bytes.copy_from_slice(&proof[8..72]);
        let minted_ct = Ciphertext::from_bytes(&minted_ct_bytes)?;

        let ctx = PublicContext {
            network_id: N::network_id(),
            sdk_version: SDK_VERSION,
            asset_id: pad_or_trim_asset_id(asset_id),
            sender_pk: to_pk_pt,
            receiver_pk: to_pk_pt,
            auditor_pk: None,
            fee_commitment: RistrettoPoint::identity(),
            ciphertext_out: minted_ct,
            ciphertext_in: None,
        };
        let mut t = zkhe_primitives::new_transcript(&ctx);
        t.append_u64(b"mint-amount", amount);

        let shield_proof_bytes = &proof[72..72 + shield_commitment::LEN];
        let shield_proof = shield_commitment::ShieldCommitmentProof::parse(shield_proof_bytes)?;
        shield_commitment::verify(&shield_proof, &amount_scalar, &minted_ct.c, &minted_ct.d, &g, &h, &to_pk_pt, &mut t)?;
        let ctx_bytes = fork_range_ctx(&t);

        let to_new = to_old_pt.add(&minted_ct.c);
        let total_new = total_old_pt.add(&minted_ct.c);
        let to_new_bytes = to_new.compress();
        let total_new_bytes = total_new.compress();

        let range_start = 72 + shield_commitment::LEN;
        let rp_to = &proof[range_start..range_start + RANGE_PROOF_LEN];
        let rp_total = &proof[range_start + RANGE_PROOF_LEN..];
        verify_range(b"range_to_pending_new", &ctx_bytes, &to_new_bytes, rp_to)?;
        verify_range(b"range_total_new", &ctx_bytes, &total_new_bytes, rp_total)?;

        Ok((to_new_bytes, total_new_bytes, minted_ct_bytes))
    }

    fn verify_burn(
        asset_id: &[u8],
        from_pk: &PublicKeyBytes,
        from_avail_old_c: &[u8],
        total_old_c: &[u8],
        amount_ct: &EncryptedAmount,
        proof: &[u8],
    ) -> Result<([u8; 32], [u8; 32], u64), Self::Error> {
        if proof.len() != BURN_PROOF_LEN {
            return Err(VerifierError::Malformed);
        }
        let g = RistrettoPoint::basepoint();
        let h = pedersen_h_generator();
        let from_pk_pt = from_pk.point()?;
        let from_old_pt = commitment_or_identity(from_avail_old_c)?;
        let total_old_pt = commitment_or_identity(total_old_c)?;

        let mut delta_c_bytes = [0u8; 32];
        delta_c_bytes.copy_from_slice(&proof[0..32]);
        let delta_c = point_from_bytes(&delta_c_bytes)?;

        let amount_ct_parsed = amount_ct.ciphertext()?;
        if proof[32..96] != amount_ct.as_bytes()[..] {
            return Err(VerifierError::Malformed);
        }

        let ctx = PublicContext {
            network_id: N::network_id(),
            sdk_version: SDK_VERSION,
            asset_id: pad_or_trim_asset_id(asset_id),
            sender_pk: from_pk_pt,
            receiver_pk: from_pk_pt,
            auditor_pk: None,
            fee_commitment: RistrettoPoint::identity(),
            ciphertext_out: amount_ct_parsed,
            ciphertext_in: None,
        };
        let mut t = zkhe_primitives::new_transcript(&ctx);

        let balance_proof = balance::BalanceProof::parse(&proof[96..96 + balance::LEN])?;
        // `delta_c` (destination) carries independent blinding from
        // `amount_ct` (source); the proof binds them to the same secret
        // amount without revealing either blinding factor.
        balance::verify(&balance_proof, &amount_ct_parsed.c, &amount_ct_parsed.d, &delta_c, &g, &h, &from_pk_pt, &mut t)?;

        let ctx_bytes = fork_range_ctx(&t);
        let disclosed = balance_proof.amount;

        let from_new = from_old_pt.sub(&delta_c);
        let total_new = total_old_pt.sub(&delta_c);
        let from_new_bytes = from_new.compress();
        let total_new_bytes = total_new.compress();

        let range_start = 96 + balance::LEN;
        let rp_from = &proof[range_start..range_start + RANGE_PROOF_LEN];
        let rp_total = &proof[range_start + RANGE_PROOF_LEN..];
        verify_range(b"range_from_avail_new", &ctx_bytes, &from_new_bytes, rp_from)?;
        verify_range(b"range_total_new", &ctx_bytes, &total_new_bytes, rp_total)?;

        Ok((from_new_bytes, total_new_bytes, disclosed))
    }
}
