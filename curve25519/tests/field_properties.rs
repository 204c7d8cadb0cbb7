//! Algebraic invariants of the reference field backend (spec.md §8
//! "testable properties"): associativity, distributivity, and inverse
//! laws, checked over randomly sampled elements.

use curve25519::field::{Field25519, FieldElement};
use proptest::prelude::*;

fn arb_field_element() -> impl Strategy<Value = FieldElement> {
    any::<[u8; 32]>().prop_map(|mut b| {
        b[31] &= 0x7f;
        FieldElement::from_bytes(&b)
    })
}

proptest! {
    #[test]
    fn addition_is_commutative(a in arb_field_element(), b in arb_field_element()) {
        prop_assert_eq!(a.add(&b).to_bytes(), b.add(&a).to_bytes());
    }

    #[test]
    fn multiplication_is_commutative(a in arb_field_element(), b in arb_field_element()) {
        prop_assert_eq!(a.mul(&b).to_bytes(), b.mul(&a).to_bytes());
    }

    #[test]
    fn multiplication_distributes_over_addition(
        a in arb_field_element(), b in arb_field_element(), c in arb_field_element()
    ) {
        let lhs = a.mul(&b.add(&c));
        let rhs = a.mul(&b).add(&a.mul(&c));
        prop_assert_eq!(lhs.to_bytes(), rhs.to_bytes());
    }

    #[test]
    fn sqr_matches_self_mul(a in arb_field_element()) {
        prop_assert_eq!(a.sqr().to_bytes(), a.mul(&a).to_bytes());
    }

    #[test]
    fn nonzero_inverse_round_trips(a in arb_field_element()) {
        prop_assume!(!bool::from(a.is_zero()));
        let product = a.mul(&a.inv());
        prop_assert_eq!(product.to_bytes(), FieldElement::one().to_bytes());
    }

    #[test]
    fn neg_is_additive_inverse(a in arb_field_element()) {
        prop_assert_eq!(a.add(&a.neg()).to_bytes(), FieldElement::zero().to_bytes());
    }
}
