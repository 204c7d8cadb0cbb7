use crate::*;
use curve25519::RistrettoPoint;
use zkhe_primitives::{EncryptedAmount, PublicKeyBytes};

struct TestNetwork;
impl NetworkIdProvider for TestNetwork {
    fn network_id() -> [u8; 32] {
        [0u8; 32]
    }
}

type V = ZkheVerifier<TestNetwork>;

fn pk_bytes(p: &RistrettoPoint) -> PublicKeyBytes {
    PublicKeyBytes::try_from(p.compress().to_vec()).unwrap()
}

fn ct_bytes(bytes: [u8; 64]) -> EncryptedAmount {
    EncryptedAmount::try_from(bytes.to_vec()).unwrap()
}

#[test]
fn verify_sender_and_receiver_happy_path() {
    let vectors = zkhe_vectors::sample_vectors();

    let (from_new, to_new) = V::verify_transfer_sent(
        &vectors.asset_id,
        &vectors.sender_pk.compress(),
        &vectors.receiver_pk.compress(),
        &vectors.transfer_from_old_c.compress(),
        &[],
        &vectors.delta_ct_bytes,
        &vectors.sender_bundle,
    )
    .expect("sender bundle verifies");
    assert_eq!(from_new, vectors.transfer_from_new_c);
    assert_eq!(to_new, vectors.transfer_to_new_c);

    let (avail_new, pending_new) = V::verify_transfer_received(
        &vectors.asset_id,
        &vectors.receiver_pk.compress(),
        &[],
        &vectors.accept_pending_old_c.compress(),
        &[vectors.delta_comm_bytes],
        &vectors.accept_envelope,
    )
    .expect("accept envelope verifies");
    assert_eq!(avail_new, vectors.accept_avail_new_c);
    assert_eq!(pending_new, vectors.accept_pending_new_c);
}

#[test]
fn rejects_tampered_sender_bundle() {
    let vectors = zkhe_vectors::sample_vectors();
    let mut tampered = vectors.sender_bundle.clone();
    let last = tampered.len() - 1;
    tampered[last] ^= 0x01;

    let result = V::verify_transfer_sent(
        &vectors.asset_id,
        &vectors.sender_pk.compress(),
        &vectors.receiver_pk.compress(),
        &vectors.transfer_from_old_c.compress(),
        &[],
        &vectors.delta_ct_bytes,
        &tampered,
    );
    assert!(result.is_err());
}

#[test]
fn rejects_wrong_length_bundle() {
    let vectors = zkhe_vectors::sample_vectors();
    let mut truncated = vectors.sender_bundle.clone();
    truncated.pop();

    let result = V::verify_transfer_sent(
        &vectors.asset_id,
        &vectors.sender_pk.compress(),
        &vectors.receiver_pk.compress(),
        &vectors.transfer_from_old_c.compress(),
        &[],
        &vectors.delta_ct_bytes,
        &truncated,
    );
    assert!(matches!(result, Err(VerifierError::Malformed)));
}

#[test]
fn identity_commitment_is_zero_point() {
    let p = zkhe_primitives::commitment_or_identity(&[]).unwrap();
    assert!(bool::from(p.eq(&RistrettoPoint::identity())));
}

#[test]
fn mint_round_trip() {
    let vectors = zkhe_vectors::sample_vectors();

    let (to_new, total_new, minted_ct) = V::verify_mint(
        &vectors.asset_id,
        &pk_bytes(&vectors.receiver_pk),
        &vectors.mint_to_pending_old_c.compress(),
        &vectors.mint_total_old_c.compress(),
        &vectors.mint_proof,
    )
    .expect("mint proof verifies");

    assert_eq!(to_new, vectors.mint_to_new_c);
    assert_eq!(total_new, vectors.mint_total_new_c);
    assert_eq!(minted_ct, vectors.minted_ct_bytes);
}

#[test]
fn burn_round_trip() {
    let vectors = zkhe_vectors::sample_vectors();

    let (from_new, total_new, disclosed) = V::verify_burn(
        &vectors.asset_id,
        &pk_bytes(&vectors.sender_pk),
        &vectors.burn_from_old_c.compress(),
        &vectors.burn_total_old_c.compress(),
        &ct_bytes(vectors.burn_amount_ct_bytes),
        &vectors.burn_proof,
    )
    .expect("burn proof verifies");

    assert_eq!(from_new, vectors.burn_from_new_c);
    assert_eq!(total_new, vectors.burn_total_new_c);
    assert_eq!(disclosed, vectors.burn_value);
}

#[test]
fn range_proof_from_sender_bundle_verifies_standalone() {
    let vectors = zkhe_vectors::sample_vectors();

    let g = RistrettoPoint::basepoint();
    let h = zkhe_primitives::pedersen_h_generator();
    let receiver_pk = vectors.receiver_pk;

    let ctx = PublicContext {
        network_id: vectors.network_id,
        sdk_version: SDK_VERSION,
        asset_id: pad_or_trim_asset_id(&vectors.asset_id),
        sender_pk: vectors.sender_pk,
        receiver_pk,
        auditor_pk: None,
        fee_commitment: RistrettoPoint::identity(),
        ciphertext_out: Ciphertext::from_bytes(&vectors.delta_ct_bytes).unwrap(),
        ciphertext_in: None,
    };
    let mut t = zkhe_primitives::new_transcript(&ctx);
    let validity_proof = sigma_proofs::ciphertext_validity::CiphertextValidityProof::parse(
        &vectors.sender_bundle[32..32 + sigma_proofs::ciphertext_validity::LEN_SINGLE],
    )
    .unwrap();
    let delta_ct = Ciphertext::from_bytes(&vectors.delta_ct_bytes).unwrap();
    sigma_proofs::ciphertext_validity::verify(&validity_proof, &delta_ct.c, &delta_ct.d, None, &g, &h, &receiver_pk, None, &mut t)
        .expect("validity proof verifies");
    let ctx_bytes = fork_range_ctx(&t);

    let range_from = &vectors.sender_bundle[32 + sigma_proofs::ciphertext_validity::LEN_SINGLE..];
    verify_range(b"range_from_new", &ctx_bytes, &vectors.transfer_from_new_c, range_from)
        .expect("range proof verifies standalone");
}
