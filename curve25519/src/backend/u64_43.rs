//! 6-limb radix-2^43 backend, shaped for AVX-512 IFMA (spec.md §4.F, §9):
//! `vpmadd52luq`/`vpmadd52huq` operate on 52-bit products, so limbs are kept
//! narrow enough (43 bits, one below-half-width limb) that a schoolbook
//! product never exceeds the 52-bit accumulator those instructions target.
//!
//! `add`/`sub`/`neg`/`mul`/`sqr` are native to this 43-bit radix (see
//! [`radix::sub_bias`] and [`radix::schoolbook_mul`]); `inv`/`pow22523`/
//! `sqrt_ratio` inherit [`Field25519`]'s default addition-chain, which only
//! calls back into this backend's own `mul`/`sqr`. Only `to_bytes`'s
//! canonicalization reuses the reference backend, matching the
//! radix-2^25.5 backend's split between "encoding" and "arithmetic".

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::radix;
use super::u64_51::FieldElement51;
use crate::field::Field25519;

const WIDTHS: [u32; 6] = [43, 43, 43, 43, 43, 40];
const SUB_BIAS_K: u64 = 16;

#[derive(Clone, Copy, Debug)]
pub struct FieldElement43(pub [u64; 6]);

impl FieldElement43 {
    fn to_inner(&self) -> FieldElement51 {
        let bytes = radix::limbs_to_bytes(&self.0, &WIDTHS);
        FieldElement51::from_bytes(&bytes)
    }
}

impl Field25519 for FieldElement43 {
    fn zero() -> Self {
        FieldElement43([0; 6])
    }

    fn one() -> Self {
        let mut limbs = [0u64; 6];
        limbs[0] = 1;
        FieldElement43(limbs)
    }

    fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut clamped = *bytes;
        clamped[31] &= 0x7f;
        FieldElement43(radix::bytes_to_limbs(&clamped, &WIDTHS))
    }

    fn to_bytes(&self) -> [u8; 32] {
        self.to_inner().to_bytes()
    }

    fn add(&self, rhs: &Self) -> Self {
        let mut out = [0u64; 6];
        for i in 0..6 {
            out[i] = self.0[i] + rhs.0[i];
        }
        radix::carry_reduce(&mut out, &WIDTHS);
        FieldElement43(out)
    }

    fn sub(&self, rhs: &Self) -> Self {
        let bias = radix::sub_bias(&WIDTHS, SUB_BIAS_K);
        let mut out = [0u64; 6];
        for i in 0..6 {
            out[i] = bias[i] + self.0[i] - rhs.0[i];
        }
        radix::carry_reduce(&mut out, &WIDTHS);
        FieldElement43(out)
    }

    fn neg(&self) -> Self {
        Self::zero().sub(self)
    }

    fn mul(&self, rhs: &Self) -> Self {
        FieldElement43(radix::schoolbook_mul(&self.0, &rhs.0, &WIDTHS))
    }

    fn sqr(&self) -> Self {
        self.mul(self)
    }

    fn mul_121666(&self) -> Self {
        let mut out = [0u64; 6];
        for i in 0..6 {
            out[i] = self.0[i] * 121666;
        }
        radix::carry_reduce(&mut out, &WIDTHS);
        FieldElement43(out)
    }

    fn carry(&self) -> Self {
        let mut limbs = self.0;
        radix::carry_reduce(&mut limbs, &WIDTHS);
        FieldElement43(limbs)
    }

    fn is_zero(&self) -> Choice {
        self.to_bytes().ct_eq(&[0u8; 32])
    }

    fn eq(&self, rhs: &Self) -> Choice {
        self.to_bytes().ct_eq(&rhs.to_bytes())
    }

    fn sgn(&self) -> Choice {
        Choice::from(self.to_bytes()[0] & 1)
    }

    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [0u64; 6];
        for i in 0..6 {
            out[i] = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        FieldElement43(out)
    }
}
