//! Client-side proof generation for confidential transfers, mint and burn.
//!
//! Implements the same two-phase transfer protocol the verifier crate
//! checks:
//!
//! **Phase 1 — sender:** [`prove_sender_transfer`] produces a Δciphertext
//! plus a fixed-size proof bundle proving the sender's new balance stays
//! non-negative and the Δciphertext is well-formed.
//!
//! **Phase 2 — receiver:** [`prove_receiver_accept`] produces an envelope
//! proving the receiver's new available/pending balances are both
//! non-negative.
//!
//! **Mint / burn:** [`prove_mint`] and [`prove_burn`] move value across the
//! public/confidential boundary, where the amount is public by definition.
//!
//! Every ciphertext is twisted ElGamal (`zkhe_primitives::Ciphertext`): the
//! commitment half `c = v*G + r*H` doubles as the value's Pedersen
//! commitment, so a single sigma proof can bind a ciphertext and a
//! commitment update to the same witness. Proof bundles are fixed-size
//! concatenations of a sigma proof (from the `sigma-proofs` crate) and one
//! or two 64-bit Bulletproof range proofs (from the `bulletproofs` crate) —
//! there is no length-prefixing, since every constituent has a fixed byte
//! width for a given bit length.

pub mod bench_vectors;
#[cfg(test)]
mod tests;

use curve25519::{RistrettoPoint, Scalar};
use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};
use thiserror::Error;
use transcript::ProofTranscript;

use bulletproofs::{BulletproofGens, RangeProof};
use sigma_proofs::{balance, ciphertext_validity, commitment_eq, shield_commitment};
use zkhe_primitives::{pad_or_trim_asset_id, pedersen_gens, pedersen_h_generator, Ciphertext, PublicContext, SDK_VERSION};

const RANGE_BITS: usize = 64;
/// `bulletproofs::RangeProof::to_bytes` length for a single 64-bit value:
/// `FIXED_PART_LEN (288) + 64 * log2(64) (384)`.
const RANGE_PROOF_LEN: usize = 672;

#[derive(Debug, Error)]
pub enum ProverError {
    #[error("range proof generation failed: {0}")]
    RangeProof(&'static str),
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
}

fn random_scalar<R: RngCore>(rng: &mut R) -> Scalar {
    let mut bytes = [0u8; 64];
    rng.fill_bytes(&mut bytes);
    Scalar::from_bytes_mod_order_wide(&bytes)
}

fn basepoint() -> RistrettoPoint {
    RistrettoPoint::basepoint()
}

/// Produce a 64-bit single-value Bulletproof range proof, forking a fresh
/// transcript off the caller-provided label, context bytes (usually a fork
/// of the main sigma-proof transcript) and the target commitment, so the
/// verifier can reconstruct the exact same transcript from public data.
fn prove_range_u64(
    label: &'static [u8],
    ctx_bytes: &[u8; 32],
    commit_compressed: &[u8; 32],
    value_u64: u64,
    blinding: &Scalar,
    rng: &mut ChaCha20Rng,
) -> Result<RangeProof, ProverError> {
    let pc_gens = pedersen_gens();
    let bp_gens = BulletproofGens::new(RANGE_BITS);

    let mut t = ProofTranscript::new(b"zkhe-range-proof");
    t.append_message(b"range-label", label);
    t.append_message(b"range-ctx", ctx_bytes);
    t.append_message(b"range-commitment", commit_compressed);

    let (proof, _commitment) =
        bulletproofs::prove_single(value_u64, blinding, RANGE_BITS, &pc_gens, &bp_gens, &mut t, rng)
            .map_err(|_| ProverError::RangeProof("bulletproof generation failed"))?;
    Ok(proof)
}

// ========================= Sender phase =========================

pub struct SenderInput {
    pub asset_id: std::vec::Vec<u8>,
    pub network_id: [u8; 32],

    pub sender_pk: RistrettoPoint,
    pub receiver_pk: RistrettoPoint,

    pub from_old_c: RistrettoPoint,
    pub from_old_opening: (u64, Scalar),

    /// Receiver's old pending commitment (opening not needed in this phase).
    pub to_old_c: RistrettoPoint,

    /// Amount to send.
    pub delta_value: u64,

    /// Deterministic RNG seed (tests and reproducible vector generation).
    pub rng_seed: [u8; 32],

    pub fee_c: Option<RistrettoPoint>,
}

pub struct SenderOutput {
    pub delta_ct_bytes: [u8; 64],
    /// `delta_comm(32) || ciphertext_validity_proof(128) || range_from_new(672)`.
    pub sender_bundle_bytes: std::vec::Vec<u8>,
    pub delta_comm_bytes: [u8; 32],
    pub from_new_c: [u8; 32],
    pub to_new_c: [u8; 32],
}

/// Generate the sender's ZK proof for phase 1 of a confidential transfer:
/// a Δciphertext to the receiver plus a proof that the sender's remaining
/// balance is non-negative and the Δciphertext is well-formed.
pub fn prove_sender_transfer(inp: &SenderInput) -> Result<SenderOutput, ProverError> {
    let (v_from_old_u64, r_from_old) = inp.from_old_opening;
    let dv_u64 = inp.delta_value;
    let dv = Scalar::from_u64(dv_u64);
    let g = basepoint();
    let h = pedersen_h_generator();

    let mut rng = ChaCha20Rng::from_seed(inp.rng_seed);
    let r = random_scalar(&mut rng);
    let k_x = random_scalar(&mut rng);
    let k_r = random_scalar(&mut rng);

    let delta_ct = Ciphertext {
        c: g.vartime_mul(&dv).add(&h.vartime_mul(&r)),
        d: inp.receiver_pk.vartime_mul(&r),
    };

    let ctx = PublicContext {
        network_id: inp.network_id,
        sdk_version: SDK_VERSION,
        asset_id: pad_or_trim_asset_id(&inp.asset_id),
        sender_pk: inp.sender_pk,
        receiver_pk: inp.receiver_pk,
        auditor_pk: None,
        fee_commitment: inp.fee_c.unwrap_or_else(RistrettoPoint::identity),
        ciphertext_out: delta_ct,
        ciphertext_in: None,
    };
    let mut t = zkhe_primitives::new_transcript(&ctx);

    let validity_proof =
        ciphertext_validity::prove(&dv, &r, &g, &h, &inp.receiver_pk, None, k_x, k_r, &mut t);
    let ctx_bytes = t.context_bytes();

    let from_new_c = inp.from_old_c.sub(&delta_ct.c);
    let to_new_c = inp.to_old_c.add(&delta_ct.c);
    let from_new_bytes = from_new_c.compress();
    let to_new_bytes = to_new_c.compress();

    let range_from = prove_range_u64(
        b"range_from_new",
        &ctx_bytes,
        &from_new_bytes,
        v_from_old_u64.checked_sub(dv_u64).ok_or(ProverError::Overflow("sender balance - delta"))?,
        &r_from_old.sub(&r),
        &mut rng,
    )?;

    let delta_comm_bytes = delta_ct.c.compress();
    let mut bundle = std::vec::Vec::with_capacity(32 + ciphertext_validity::LEN_SINGLE + RANGE_PROOF_LEN);
    bundle.extend_from_slice(&delta_comm_bytes);
    bundle.extend_from_slice(&validity_proof.to_bytes());
    bundle.extend_from_slice(&range_from.to_bytes());

    Ok(SenderOutput {
        delta_ct_bytes: delta_ct.to_bytes(),
        sender_bundle_bytes: bundle,
        delta_comm_bytes,
        from_new_c: from_new_bytes,
        to_new_c: to_new_bytes,
    })
}

// ========================= Receiver phase =========================

pub struct ReceiverAcceptInput {
    pub asset_id: std::vec::Vec<u8>,
    pub network_id: [u8; 32],

    pub receiver_pk: RistrettoPoint,

    pub avail_old_c: RistrettoPoint,
    pub avail_old_opening: (u64, Scalar),

    pub pending_old_c: RistrettoPoint,
    pub pending_old_opening: (u64, Scalar),

    /// The Δ commitment being accepted (the sender's `delta_comm`) and its
    /// opening, known to the receiver after decrypting the Δciphertext.
    pub delta_comm: RistrettoPoint,
    pub delta_value: u64,
    pub delta_rho: Scalar,

    pub rng_seed: [u8; 32],
}

pub struct ReceiverAcceptOutput {
    /// `delta_comm(32) || range_avail_new(672) || range_pending_new(672)`.
    pub accept_envelope: std::vec::Vec<u8>,
    pub avail_new_c: [u8; 32],
    pub pending_new_c: [u8; 32],
}

/// Generate the receiver's acceptance proof for phase 2: both the
/// available and pending balances after applying Δ stay non-negative.
pub fn prove_receiver_accept(inp: &ReceiverAcceptInput) -> Result<ReceiverAcceptOutput, ProverError> {
    let (v_av_u64, r_av_old) = inp.avail_old_opening;
    let (v_pend_u64, r_pend_old) = inp.pending_old_opening;
    let dv_u64 = inp.delta_value;
    let rho = inp.delta_rho;

    let mut rng = ChaCha20Rng::from_seed(inp.rng_seed);

    let avail_new_c = inp.avail_old_c.add(&inp.delta_comm);
    let pending_new_c = inp.pending_old_c.sub(&inp.delta_comm);
    let avail_new_bytes = avail_new_c.compress();
    let pending_new_bytes = pending_new_c.compress();

    let mut ctx_bytes = [0u8; 32];
    {
        let mut t = ProofTranscript::new(b"zkhe-accept-ctx");
        t.append_message(b"network-id", &inp.network_id);
        t.append_message(b"asset-id", &pad_or_trim_asset_id(&inp.asset_id));
        t.append_point(b"receiver-pk", &inp.receiver_pk);
        t.append_point(b"avail-old", &inp.avail_old_c);
        t.append_point(b"pending-old", &inp.pending_old_c);
        t.append_point(b"delta-comm", &inp.delta_comm);
        ctx_bytes = t.context_bytes();
    }

    let rp_avail_new = prove_range_u64(
        b"range_avail_new",
        &ctx_bytes,
        &avail_new_bytes,
        v_av_u64.checked_add(dv_u64).ok_or(ProverError::Overflow("available balance + delta"))?,
        &r_av_old.add(&rho),
        &mut rng,
    )?;
    let rp_pending_new = prove_range_u64(
        b"range_pending_new",
        &ctx_bytes,
        &pending_new_bytes,
        v_pend_u64.checked_sub(dv_u64).ok_or(ProverError::Overflow("pending balance - delta"))?,
        &r_pend_old.sub(&rho),
        &mut rng,
    )?;

    let mut env = std::vec::Vec::with_capacity(32 + 2 * RANGE_PROOF_LEN);
    env.extend_from_slice(&inp.delta_comm.compress());
    env.extend_from_slice(&rp_avail_new.to_bytes());
    env.extend_from_slice(&rp_pending_new.to_bytes());

    Ok(ReceiverAcceptOutput { accept_envelope: env, avail_new_c: avail_new_bytes, pending_new_c: pending_new_bytes })
}

// ========================= Mint (public -> confidential) =========================

pub struct MintInput {
    pub asset_id: std::vec::Vec<u8>,
    pub network_id: [u8; 32],

    pub to_pk: RistrettoPoint,

    pub to_pending_old_c: RistrettoPoint,
    pub to_pending_old_opening: (u64, Scalar),

    pub total_old_c: RistrettoPoint,
    pub total_old_opening: (u64, Scalar),

    pub mint_value: u64,
    pub rng_seed: [u8; 32],
}

pub struct MintOutput {
    pub minted_ct_bytes: [u8; 64],
    /// `amount(8, LE) || minted_ct(64) || shield_commitment_proof(96) || range_to_new(672) || range_total_new(672)`.
    pub proof_bytes: std::vec::Vec<u8>,
    pub to_pending_new_c: [u8; 32],
    pub total_new_c: [u8; 32],
}

/// Generate a mint proof: a known plaintext amount becomes a confidential
/// balance for `to_pk`, proving the new pending and total commitments stay
/// in range.
pub fn prove_mint(inp: &MintInput) -> Result<MintOutput, ProverError> {
    let (v_to_old_u64, r_to_old) = inp.to_pending_old_opening;
    let (v_total_old_u64, r_total_old) = inp.total_old_opening;
    let dv_u64 = inp.mint_value;
    let dv = Scalar::from_u64(dv_u64);
    let g = basepoint();
    let h = pedersen_h_generator();

    let mut rng = ChaCha20Rng::from_seed(inp.rng_seed);
    let r = random_scalar(&mut rng);
    let k_r = random_scalar(&mut rng);

    let minted_ct =
        Ciphertext { c: g.vartime_mul(&dv).add(&h.vartime_mul(&r)), d: inp.to_pk.vartime_mul(&r) };

    let ctx = PublicContext {
        network_id: inp.network_id,
        sdk_version: SDK_VERSION,
        asset_id: pad_or_trim_asset_id(&inp.asset_id),
        sender_pk: inp.to_pk,
        receiver_pk: inp.to_pk,
        auditor_pk: None,
        fee_commitment: RistrettoPoint::identity(),
        ciphertext_out: minted_ct,
        ciphertext_in: None,
    };
    let mut t = zkhe_primitives::new_transcript(&ctx);

    // The mint amount is public, so bind it into the transcript the same way
    // `balance::verify` binds a burn's disclosed amount, and carry it as an
    // explicit prefix in the wire format rather than relying on a caller to
    // thread it in separately.
    t.append_u64(b"mint-amount", dv_u64);
    let shield_proof = shield_commitment::prove(&r, &g, &h, &inp.to_pk, k_r, &mut t);
    let ctx_bytes = t.context_bytes();

    let to_new = inp.to_pending_old_c.add(&minted_ct.c);
    let total_new = inp.total_old_c.add(&minted_ct.c);
    let to_new_bytes = to_new.compress();
    let total_new_bytes = total_new.compress();

    let rp_to_new = prove_range_u64(
        b"range_to_pending_new",
        &ctx_bytes,
        &to_new_bytes,
        v_to_old_u64.checked_add(dv_u64).ok_or(ProverError::Overflow("pending balance + mint amount"))?,
        &r_to_old.add(&r),
        &mut rng,
    )?;
    let rp_total_new = prove_range_u64(
        b"range_total_new",
        &ctx_bytes,
        &total_new_bytes,
        v_total_old_u64.checked_add(dv_u64).ok_or(ProverError::Overflow("total supply + mint amount"))?,
        &r_total_old.add(&r),
        &mut rng,
    )?;

    let mut proof =
        std::vec::Vec::with_capacity(8 + 64 + shield_commitment::LEN + 2 * RANGE_PROOF_LEN);
    proof.extend_from_slice(&dv_u64.to_le_bytes());
    proof.extend_from_slice(&minted_ct.to_bytes());
    proof.extend_from_slice(&shield_proof.to_bytes());
    proof.extend_from_slice(&rp_to_new.to_bytes());
    proof.extend_from_slice(&rp_total_new.to_bytes());

    Ok(MintOutput {
        minted_ct_bytes: minted_ct.to_bytes(),
        proof_bytes: proof,
        to_pending_new_c: to_new_bytes,
        total_new_c: total_new_bytes,
    })
}

// ========================= Burn (confidential -> public) =========================

pub struct BurnInput {
    pub asset_id: std::vec::Vec<u8>,
    pub network_id: [u8; 32],

    pub from_pk: RistrettoPoint,

    pub from_avail_old_c: RistrettoPoint,
    pub from_avail_old_opening: (u64, Scalar),

    pub total_old_c: RistrettoPoint,
    pub total_old_opening: (u64, Scalar),

    pub burn_value: u64,
    pub rng_seed: [u8; 32],
}

pub struct BurnOutput {
    pub amount_ct_bytes: [u8; 64],
    /// `delta_c(32) || amount_ct(64) || balance_proof(200) || range_from_new(672) || range_total_new(672)`.
    ///
    /// `delta_c` is the commitment actually subtracted from the available
    /// and total-supply balances; it carries independent blinding from
    /// `amount_ct` so the two can't be linked without the proof.
    pub proof_bytes: std::vec::Vec<u8>,
    pub from_avail_new_c: [u8; 32],
    pub total_new_c: [u8; 32],
}

/// Generate a burn proof: a disclosed amount leaves the confidential
/// balance back into the public supply, proving the disclosed ciphertext
/// and the subtracted commitment commit to the same amount and that the
/// new balances stay in range.
pub fn prove_burn(inp: &BurnInput) -> Result<BurnOutput, ProverError> {
    let (v_from_old_u64, r_from_old) = inp.from_avail_old_opening;
    let (v_total_old_u64, r_total_old) = inp.total_old_opening;
    let dv_u64 = inp.burn_value;
    let dv = Scalar::from_u64(dv_u64);
    let g = basepoint();
    let h = pedersen_h_generator();

    let mut rng = ChaCha20Rng::from_seed(inp.rng_seed);
    let k = random_scalar(&mut rng); // amount_ct randomness
    let rho = random_scalar(&mut rng); // delta_c randomness
    let k_x = random_scalar(&mut rng);
    let k_s = random_scalar(&mut rng);
    let k_r = random_scalar(&mut rng);

    let amount_ct =
        Ciphertext { c: g.vartime_mul(&dv).add(&h.vartime_mul(&k)), d: inp.from_pk.vartime_mul(&k) };
    let delta_c = g.vartime_mul(&dv).add(&h.vartime_mul(&rho));

    let ctx = PublicContext {
        network_id: inp.network_id,
        sdk_version: SDK_VERSION,
        asset_id: pad_or_trim_asset_id(&inp.asset_id),
        sender_pk: inp.from_pk,
        receiver_pk: inp.from_pk,
        auditor_pk: None,
        fee_commitment: RistrettoPoint::identity(),
        ciphertext_out: amount_ct,
        ciphertext_in: None,
    };
    let mut t = zkhe_primitives::new_transcript(&ctx);

    // `balance::verify` appends the disclosed amount before delegating to
    // `commitment_eq::verify`; match that ordering here.
    t.append_u64(b"balance-amount", dv_u64);
    let eq_proof =
        commitment_eq::prove(&dv, &k, &rho, &g, &h, &inp.from_pk, k_x, k_s, k_r, &mut t);
    let balance_proof = balance::BalanceProof { amount: dv_u64, eq_proof };
    let ctx_bytes = t.context_bytes();

    let from_new = inp.from_avail_old_c.sub(&delta_c);
    let total_new = inp.total_old_c.sub(&delta_c);
    let from_new_bytes = from_new.compress();
    let total_new_bytes = total_new.compress();

    let rp_from_new = prove_range_u64(
        b"range_from_avail_new",
        &ctx_bytes,
        &from_new_bytes,
        v_from_old_u64.checked_sub(dv_u64).ok_or(ProverError::Overflow("available balance - burn amount"))?,
        &r_from_old.sub(&rho),
        &mut rng,
    )?;
    let rp_total_new = prove_range_u64(
        b"range_total_new",
        &ctx_bytes,
        &total_new_bytes,
        v_total_old_u64.checked_sub(dv_u64).ok_or(ProverError::Overflow("total supply - burn amount"))?,
        &r_total_old.sub(&rho),
        &mut rng,
    )?;

    let mut proof = std::vec::Vec::with_capacity(32 + 64 + balance::LEN + 2 * RANGE_PROOF_LEN);
    proof.extend_from_slice(&delta_c.compress());
    proof.extend_from_slice(&amount_ct.to_bytes());
    proof.extend_from_slice(&balance_proof.to_bytes());
    proof.extend_from_slice(&rp_from_new.to_bytes());
    proof.extend_from_slice(&rp_total_new.to_bytes());

    Ok(BurnOutput {
        amount_ct_bytes: amount_ct.to_bytes(),
        proof_bytes: proof,
        from_avail_new_c: from_new_bytes,
        total_new_c: total_new_bytes,
    })
}

