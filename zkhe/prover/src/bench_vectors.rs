//! Deterministic proof generation for benches and the verifier crate's
//! test fixtures. Everything here is generated at call time rather than
//! hardcoded, since the curve points involved can't be hand-authored.

use crate::{prove_burn, prove_mint, prove_receiver_accept, prove_sender_transfer, BurnInput, MintInput, ReceiverAcceptInput, SenderInput};
use curve25519::{RistrettoPoint, Scalar};
use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

fn pedersen_h() -> RistrettoPoint {
    zkhe_primitives::pedersen_h_generator()
}

/// One fully-formed round trip through sender transfer, receiver accept,
/// mint and burn, using fixed seeds so callers get the same bytes on every
/// run without persisting anything to disk.
pub struct SampleVectors {
    pub asset_id: std::vec::Vec<u8>,
    pub network_id: [u8; 32],
    pub sender_pk: RistrettoPoint,
    pub receiver_pk: RistrettoPoint,

    pub transfer_from_old_c: RistrettoPoint,
    pub transfer_to_old_c: RistrettoPoint,
    pub delta_ct_bytes: [u8; 64],
    pub delta_comm_bytes: [u8; 32],
    pub sender_bundle: std::vec::Vec<u8>,
    pub transfer_from_new_c: [u8; 32],
    pub transfer_to_new_c: [u8; 32],

    pub accept_avail_old_c: RistrettoPoint,
    pub accept_pending_old_c: RistrettoPoint,
    pub accept_envelope: std::vec::Vec<u8>,
    pub accept_avail_new_c: [u8; 32],
    pub accept_pending_new_c: [u8; 32],

    pub mint_to_pending_old_c: RistrettoPoint,
    pub mint_total_old_c: RistrettoPoint,
    pub mint_value: u64,
    pub minted_ct_bytes: [u8; 64],
    pub mint_proof: std::vec::Vec<u8>,
    pub mint_to_new_c: [u8; 32],
    pub mint_total_new_c: [u8; 32],

    pub burn_from_old_c: RistrettoPoint,
    pub burn_total_old_c: RistrettoPoint,
    pub burn_value: u64,
    pub burn_amount_ct_bytes: [u8; 64],
    pub burn_proof: std::vec::Vec<u8>,
    pub burn_from_new_c: [u8; 32],
    pub burn_total_new_c: [u8; 32],
}

/// Build one self-consistent set of proofs and their public inputs. Panics
/// on any proving failure, which would indicate a bug in this module's own
/// wiring rather than anything a caller passed in.
pub fn sample_vectors() -> SampleVectors {
    let asset_id = std::vec![0u8; 16];
    let network_id = [0u8; 32];
    let g = RistrettoPoint::basepoint();
    let h = pedersen_h();

    let sk_sender = Scalar::from_u64(5);
    let sender_pk = g.vartime_mul(&sk_sender);
    let sk_receiver = Scalar::from_u64(9);
    let receiver_pk = g.vartime_mul(&sk_receiver);

    let from_old_v = 1_234u64;
    let from_old_r = Scalar::from_u64(42);
    let transfer_from_old_c = g.vartime_mul(&Scalar::from_u64(from_old_v)).add(&h.vartime_mul(&from_old_r));
    let transfer_to_old_c = RistrettoPoint::identity();

    let dv = 111u64;
    let mut seed = [0u8; 32];
    seed[0] = 7;

    let sender_out = prove_sender_transfer(&SenderInput {
        asset_id: asset_id.clone(),
        network_id,
        sender_pk,
        receiver_pk,
        from_old_c: transfer_from_old_c,
        from_old_opening: (from_old_v, from_old_r),
        to_old_c: transfer_to_old_c,
        delta_value: dv,
        rng_seed: seed,
        fee_c: None,
    })
    .expect("sender prover");

    // `prove_sender_transfer` draws its Δ-ciphertext randomness `r` first
    // from the seeded RNG; `delta_comm`'s opening uses that same `r`, so
    // re-derive it here rather than threading it out through the return type.
    let mut chacha = ChaCha20Rng::from_seed(seed);
    let mut bytes = [0u8; 64];
    chacha.fill_bytes(&mut bytes);
    let delta_rho = Scalar::from_bytes_mod_order_wide(&bytes);
    let delta_comm = RistrettoPoint::from_bytes(&sender_out.delta_comm_bytes).expect("delta comm decodes");

    let accept_avail_old_c = RistrettoPoint::identity();
    let accept_pending_old_c = delta_comm;

    let receiver_out = prove_receiver_accept(&ReceiverAcceptInput {
        asset_id: asset_id.clone(),
        network_id,
        receiver_pk,
        avail_old_c: accept_avail_old_c,
        avail_old_opening: (0, Scalar::from_u64(0)),
        pending_old_c: accept_pending_old_c,
        pending_old_opening: (dv, delta_rho),
        delta_comm,
        delta_value: dv,
        delta_rho,
        rng_seed: {
            let mut s = seed;
            s[1] = 0x9c;
            s
        },
    })
    .expect("receiver accept prover");

    let mut seed_mint = [0u8; 32];
    seed_mint[0] = 0xA5;
    let mint_value = 77u64;
    let mint_to_pending_old_c = RistrettoPoint::identity();
    let mint_total_old_c = RistrettoPoint::identity();
    let mint_out = prove_mint(&MintInput {
        asset_id: asset_id.clone(),
        network_id,
        to_pk: receiver_pk,
        to_pending_old_c: mint_to_pending_old_c,
        to_pending_old_opening: (0, Scalar::from_u64(0)),
        total_old_c: mint_total_old_c,
        total_old_opening: (0, Scalar::from_u64(0)),
        mint_value,
        rng_seed: seed_mint,
    })
    .expect("mint prover");

    let mut seed_burn = [0u8; 32];
    seed_burn[1] = 0x5c;
    let burn_value = 120u64;
    let from_old_v_b = 500u64;
    let from_old_r_b = Scalar::from_u64(333);
    let burn_from_old_c = g.vartime_mul(&Scalar::from_u64(from_old_v_b)).add(&h.vartime_mul(&from_old_r_b));
    let total_old_v_b = 500u64;
    let total_old_r_b = Scalar::from_u64(111);
    let burn_total_old_c = g.vartime_mul(&Scalar::from_u64(total_old_v_b)).add(&h.vartime_mul(&total_old_r_b));

    let burn_out = prove_burn(&BurnInput {
        asset_id: asset_id.clone(),
        network_id,
        from_pk: sender_pk,
        from_avail_old_c: burn_from_old_c,
        from_avail_old_opening: (from_old_v_b, from_old_r_b),
        total_old_c: burn_total_old_c,
        total_old_opening: (total_old_v_b, total_old_r_b),
        burn_value,
        rng_seed: seed_burn,
    })
    .expect("burn prover");

    SampleVectors {
        asset_id,
        network_id,
        sender_pk,
        receiver_pk,
        transfer_from_old_c,
        transfer_to_old_c,
        delta_ct_bytes: sender_out.delta_ct_bytes,
        delta_comm_bytes: sender_out.delta_comm_bytes,
        sender_bundle: sender_out.sender_bundle_bytes,
        transfer_from_new_c: sender_out.from_new_c,
        transfer_to_new_c: sender_out.to_new_c,
        accept_avail_old_c,
        accept_pending_old_c,
        accept_envelope: receiver_out.accept_envelope,
        accept_avail_new_c: receiver_out.avail_new_c,
        accept_pending_new_c: receiver_out.pending_new_c,
        mint_to_pending_old_c,
        mint_total_old_c,
        mint_value,
        minted_ct_bytes: mint_out.minted_ct_bytes,
        mint_proof: mint_out.proof_bytes,
        mint_to_new_c: mint_out.to_pending_new_c,
        mint_total_new_c: mint_out.total_new_c,
        burn_from_old_c,
        burn_total_old_c,
        burn_value,
        burn_amount_ct_bytes: burn_out.amount_ct_bytes,
        burn_proof: burn_out.proof_bytes,
        burn_from_new_c: burn_out.from_avail_new_c,
        burn_total_new_c: burn_out.total_new_c,
    }
}
