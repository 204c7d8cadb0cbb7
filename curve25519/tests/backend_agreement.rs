//! Cross-backend agreement: every `Field25519` implementation must produce
//! identical `to_bytes()` output for the same sequence of operations
//! (spec.md §8).

use curve25519::backend::u32e_25_5::FieldElement2625;
use curve25519::backend::u64_43::FieldElement43;
use curve25519::backend::u64_51::FieldElement51;
use curve25519::field::Field25519;

fn sample_bytes() -> Vec<[u8; 32]> {
    vec![
        [0u8; 32],
        {
            let mut b = [0u8; 32];
            b[0] = 1;
            b
        },
        [7u8; 32],
        [0xffu8; 32],
        {
            let mut b = [3u8; 32];
            b[31] = 0x0f; // keep top bit clear
            b
        },
    ]
}

#[test]
fn add_mul_sub_agree_across_backends() {
    for a in sample_bytes() {
        for b in sample_bytes() {
            let a51 = FieldElement51::from_bytes(&a);
            let b51 = FieldElement51::from_bytes(&b);
            let a25 = FieldElement2625::from_bytes(&a);
            let b25 = FieldElement2625::from_bytes(&b);
            let a43 = FieldElement43::from_bytes(&a);
            let b43 = FieldElement43::from_bytes(&b);

            assert_eq!(a51.add(&b51).to_bytes(), a25.add(&b25).to_bytes());
            assert_eq!(a51.add(&b51).to_bytes(), a43.add(&b43).to_bytes());

            assert_eq!(a51.mul(&b51).to_bytes(), a25.mul(&b25).to_bytes());
            assert_eq!(a51.mul(&b51).to_bytes(), a43.mul(&b43).to_bytes());

            assert_eq!(a51.sub(&b51).to_bytes(), a25.sub(&b25).to_bytes());
            assert_eq!(a51.sub(&b51).to_bytes(), a43.sub(&b43).to_bytes());
        }
    }
}

#[test]
fn inverse_agrees_across_backends() {
    for a in sample_bytes() {
        let a51 = FieldElement51::from_bytes(&a);
        let a25 = FieldElement2625::from_bytes(&a);
        let a43 = FieldElement43::from_bytes(&a);

        assert_eq!(a51.inv().to_bytes(), a25.inv().to_bytes());
        assert_eq!(a51.inv().to_bytes(), a43.inv().to_bytes());
    }
}

#[test]
fn round_trip_through_bytes_is_identity_on_canonical_input() {
    for a in sample_bytes() {
        let a51 = FieldElement51::from_bytes(&a);
        assert_eq!(a51.to_bytes(), FieldElement51::from_bytes(&a51.to_bytes()).to_bytes());
    }
}
