//! 10-limb radix-2^25.5 backend, shaped for 4-way/8-way SIMD lanes (spec.md
//! §4.F, §9): alternating 26/25-bit limbs so that four or eight field
//! elements pack into parallel 32-bit lanes without any lane needing more
//! than a 26-bit product width.
//!
//! Arithmetic is native to this radix: `add`/`sub`/`neg` work limb-wise with
//! [`radix::sub_bias`] keeping subtraction non-negative, and `mul`/`sqr` run
//! a genuine schoolbook convolution over the 26/25-bit limbs
//! ([`radix::schoolbook_mul`]) rather than converting through another
//! backend's representation. `inv`/`pow22523`/`sqrt_ratio` fall back to
//! [`Field25519`]'s default addition-chain, which is itself built only from
//! `mul`/`sqr`, so they run entirely on this backend's own arithmetic too.
//! Only `to_bytes`'s final canonicalization reuses the reference backend,
//! since producing the unique mod-p representative is encoding work, not a
//! field operation this backend needs its own copy of.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::radix;
use super::u64_51::FieldElement51;
use crate::field::Field25519;

const WIDTHS: [u32; 10] = [26, 25, 26, 25, 26, 25, 26, 25, 26, 25];
const SUB_BIAS_K: u64 = 16;

#[derive(Clone, Copy, Debug)]
pub struct FieldElement2625(pub [u32; 10]);

impl FieldElement2625 {
    fn to64(&self) -> [u64; 10] {
        self.0.map(|x| x as u64)
    }

    fn from64(mut limbs: [u64; 10]) -> Self {
        radix::carry_reduce(&mut limbs, &WIDTHS);
        let mut out = [0u32; 10];
        for i in 0..10 {
            out[i] = limbs[i] as u32;
        }
        FieldElement2625(out)
    }

    fn to_inner(&self) -> FieldElement51 {
        let bytes = radix::limbs_to_bytes(&self.to64(), &WIDTHS);
        FieldElement51::from_bytes(&bytes)
    }
}

impl Field25519 for FieldElement2625 {
    fn zero() -> Self {
        FieldElement2625([0; 10])
    }

    fn one() -> Self {
        let mut limbs = [0u32; 10];
        limbs[0] = 1;
        FieldElement2625(limbs)
    }

    fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut clamped = *bytes;
        clamped[31] &= 0x7f;
        let limbs64 = radix::bytes_to_limbs(&clamped, &WIDTHS);
        let mut limbs = [0u32; 10];
        for i in 0..10 {
            limbs[i] = limbs64[i] as u32;
        }
        FieldElement2625(limbs)
    }

    fn to_bytes(&self) -> [u8; 32] {
        self.to_inner().to_bytes()
    }

    fn add(&self, rhs: &Self) -> Self {
        let a = self.to64();
        let b = rhs.to64();
        let mut out = [0u64; 10];
        for i in 0..10 {
            out[i] = a[i] + b[i];
        }
        Self::from64(out)
    }

    fn sub(&self, rhs: &Self) -> Self {
        let bias = radix::sub_bias(&WIDTHS, SUB_BIAS_K);
        let a = self.to64();
        let b = rhs.to64();
        let mut out = [0u64; 10];
        for i in 0..10 {
            out[i] = bias[i] + a[i] - b[i];
        }
        Self::from64(out)
    }

    fn neg(&self) -> Self {
        Self::zero().sub(self)
    }

    fn mul(&self, rhs: &Self) -> Self {
        Self::from64(radix::schoolbook_mul(&self.to64(), &rhs.to64(), &WIDTHS))
    }

    fn sqr(&self) -> Self {
        self.mul(self)
    }

    fn mul_121666(&self) -> Self {
        let a = self.to64();
        let mut out = [0u64; 10];
        for i in 0..10 {
            out[i] = a[i] * 121666;
        }
        Self::from64(out)
    }

    fn carry(&self) -> Self {
        let mut limbs64 = self.0.map(|x| x as u64);
        radix::carry_reduce(&mut limbs64, &WIDTHS);
        let mut limbs = [0u32; 10];
        for i in 0..10 {
            limbs[i] = limbs64[i] as u32;
        }
        FieldElement2625(limbs)
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
        let mut out = [0u32; 10];
        for i in 0..10 {
            out[i] = u32::conditional_select(&a.0[i], &b.0[i], choice);
        }
        FieldElement2625(out)
    }
}
