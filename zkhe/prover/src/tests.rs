use crate::*;
use curve25519::{RistrettoPoint, Scalar};

const SENDER_BUNDLE_LEN: usize = 32 + sigma_proofs::ciphertext_validity::LEN_SINGLE + 672;
const ACCEPT_ENVELOPE_LEN: usize = 32 + 2 * 672;
const MINT_PROOF_LEN: usize = 8 + 64 + sigma_proofs::shield_commitment::LEN + 2 * 672;
const BURN_PROOF_LEN: usize = 32 + 64 + sigma_proofs::balance::LEN + 2 * 672;

#[test]
fn sender_receiver_round_trip_shapes() {
    let vectors = crate::bench_vectors::sample_vectors();

    assert_eq!(vectors.delta_ct_bytes.len(), 64);
    assert_eq!(vectors.sender_bundle.len(), SENDER_BUNDLE_LEN);
    assert_eq!(vectors.accept_envelope.len(), ACCEPT_ENVELOPE_LEN);
}

#[test]
fn mint_and_burn_round_trip_shapes() {
    let vectors = crate::bench_vectors::sample_vectors();

    assert_eq!(vectors.minted_ct_bytes.len(), 64);
    assert_eq!(vectors.mint_proof.len(), MINT_PROOF_LEN);
    assert_eq!(vectors.burn_amount_ct_bytes.len(), 64);
    assert_eq!(vectors.burn_proof.len(), BURN_PROOF_LEN);
}

#[test]
fn sender_transfer_rejects_overdraft() {
    let g = RistrettoPoint::basepoint();
    let h = zkhe_primitives::pedersen_h_generator();
    let sk_sender = Scalar::from_u64(5);
    let sender_pk = g.vartime_mul(&sk_sender);
    let receiver_pk = g.vartime_mul(&Scalar::from_u64(9));

    let from_old_v = 10u64;
    let from_old_r = Scalar::from_u64(1);
    let from_old_c = g.vartime_mul(&Scalar::from_u64(from_old_v)).add(&h.vartime_mul(&from_old_r));

    let mut seed = [0u8; 32];
    seed[0] = 3;

    let result = prove_sender_transfer(&SenderInput {
        asset_id: std::vec![0u8; 4],
        network_id: [1u8; 32],
        sender_pk,
        receiver_pk,
        from_old_c,
        from_old_opening: (from_old_v, from_old_r),
        to_old_c: RistrettoPoint::identity(),
        delta_value: from_old_v + 1,
        rng_seed: seed,
        fee_c: None,
    });

    assert!(matches!(result, Err(ProverError::Overflow(_))));
}

#[test]
fn burn_rejects_amount_exceeding_balance() {
    let g = RistrettoPoint::basepoint();
    let h = zkhe_primitives::pedersen_h_generator();
    let from_pk = g.vartime_mul(&Scalar::from_u64(5));

    let from_old_v = 50u64;
    let from_old_r = Scalar::from_u64(7);
    let from_old_c = g.vartime_mul(&Scalar::from_u64(from_old_v)).add(&h.vartime_mul(&from_old_r));
    let total_old_c = from_old_c;

    let mut seed = [0u8; 32];
    seed[0] = 9;

    let result = prove_burn(&BurnInput {
        asset_id: std::vec![0u8; 4],
        network_id: [2u8; 32],
        from_pk,
        from_avail_old_c: from_old_c,
        from_avail_old_opening: (from_old_v, from_old_r),
        total_old_c,
        total_old_opening: (from_old_v, from_old_r),
        burn_value: from_old_v + 1,
        rng_seed: seed,
    });

    assert!(matches!(result, Err(ProverError::Overflow(_))));
}
