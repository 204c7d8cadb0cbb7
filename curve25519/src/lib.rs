//! GF(2^255 - 19) field arithmetic, scalar arithmetic mod the group order,
//! extended twisted-Edwards point arithmetic, Ristretto255, X25519 and the
//! scalar-multiplication engines built on top of them (spec.md §4.F, §4.S,
//! §4.E, §4.R, §4.M).

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod backend;
pub mod constants;
pub mod edwards;
pub mod field;
pub mod montgomery;
pub mod ristretto;
pub mod scalar;
pub mod window;

pub use edwards::EdwardsPoint;
pub use field::{Field25519, FieldElement};
pub use montgomery::{clamp_integer, MontgomeryPoint};
pub use ristretto::RistrettoPoint;
pub use scalar::Scalar;
pub use window::{straus_multiscalar_mul, vartime_wnaf_mul, FixedBaseTable};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basepoint_roundtrips_through_compression() {
        let b = constants::ed25519_basepoint();
        let bytes = b.compress();
        let decoded = EdwardsPoint::from_bytes(&bytes).expect("basepoint encoding must decode");
        assert!(bool::from(b.eq(&decoded)));
    }

    #[test]
    fn identity_is_additive_identity() {
        let b = constants::ed25519_basepoint();
        let id = EdwardsPoint::identity();
        assert!(bool::from(b.add(&id).eq(&b)));
    }

    #[test]
    fn scalar_arithmetic_is_consistent() {
        let a = Scalar::from_bytes_mod_order(&[7u8; 32]);
        let b = Scalar::from_bytes_mod_order(&[9u8; 32]);
        let sum = a.add(&b);
        let diff = sum.sub(&b);
        assert_eq!(diff, a);
    }

    #[test]
    fn scalar_inverse_round_trips() {
        let a = Scalar::from_bytes_mod_order(&[3u8; 32]);
        let inv = a.invert();
        assert_eq!(a.mul(&inv), Scalar::ONE);
    }

    #[test]
    fn field_inverse_round_trips() {
        let x = FieldElement::from_bytes(&[5u8; 32]);
        let inv = x.inv();
        assert_eq!(x.mul(&inv).to_bytes(), FieldElement::one().to_bytes());
    }

    #[test]
    fn vartime_and_fixed_base_multiplication_agree() {
        let b = constants::ed25519_basepoint();
        let scalar = Scalar::from_bytes_mod_order(&[42u8; 32]);

        let vartime = window::vartime_wnaf_mul(&b, &scalar);
        let table = FixedBaseTable::build(&b);
        let fixed = table.mul(&scalar);

        assert!(bool::from(vartime.eq(&fixed)));
    }

    #[test]
    fn straus_msm_matches_sequential_combination() {
        let b = constants::ed25519_basepoint();
        let b2 = b.double();
        let s1 = Scalar::from_bytes_mod_order(&[11u8; 32]);
        let s2 = Scalar::from_bytes_mod_order(&[13u8; 32]);

        let combined = window::straus_multiscalar_mul(&[b, b2], &[s1, s2]);
        let expected = window::vartime_wnaf_mul(&b, &s1).add(&window::vartime_wnaf_mul(&b2, &s2));

        assert!(bool::from(combined.eq(&expected)));
    }

    #[test]
    fn ristretto_round_trips_through_compression() {
        let b = RistrettoPoint::basepoint();
        let bytes = b.compress();
        let decoded = RistrettoPoint::from_bytes(&bytes).expect("ristretto encoding must decode");
        assert!(bool::from(b.eq(&decoded)));
    }

    #[test]
    fn hash_to_curve_is_deterministic() {
        let a = RistrettoPoint::hash_to_curve(b"curve25519 ristretto hash-to-group");
        let b = RistrettoPoint::hash_to_curve(b"curve25519 ristretto hash-to-group");
        assert!(bool::from(a.eq(&b)));
    }

    #[test]
    fn x25519_is_symmetric() {
        let alice_sk = [1u8; 32];
        let bob_sk = [2u8; 32];
        let mut base_bytes = [0u8; 32];
        base_bytes[0] = 9;
        let base = MontgomeryPoint(base_bytes); // u = 9, the standard X25519 base

        let alice_pk = base.mul_clamped(alice_sk).expect("nonzero output");
        let bob_pk = base.mul_clamped(bob_sk).expect("nonzero output");

        let shared_from_alice = bob_pk.mul_clamped(alice_sk).expect("nonzero output");
        let shared_from_bob = alice_pk.mul_clamped(bob_sk).expect("nonzero output");

        assert_eq!(shared_from_alice, shared_from_bob);
    }

    #[test]
    fn x25519_from_standard_basepoint_is_deterministic() {
        // RFC 7748 §5.2 fixes u = 9 as the X25519 base point; the same
        // clamped scalar against it must always land on the same public key.
        let base = MontgomeryPoint(u_basepoint_bytes());
        let sk = [42u8; 32];

        let pk1 = base.mul_clamped(sk).expect("nonzero output");
        let pk2 = base.mul_clamped(sk).expect("nonzero output");
        assert_eq!(pk1, pk2);
    }

    fn u_basepoint_bytes() -> [u8; 32] {
        let mut base_bytes = [0u8; 32];
        base_bytes[0] = 9;
        base_bytes
    }

    #[test]
    fn x25519_rejects_all_zero_output() {
        // u = 0 is a low-order point: every clamped scalar maps it to the
        // all-zero output, which RFC 7748 §6.1 requires rejecting.
        let zero_point = MontgomeryPoint([0u8; 32]);
        let sk = [7u8; 32];
        assert!(zero_point.mul_clamped(sk).is_none());
    }
}
