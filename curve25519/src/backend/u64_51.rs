//! Reference backend: 5-limb radix-2^51 representation of GF(2^255 - 19).
//!
//! Each limb holds at most 51 bits after a `carry()`; unreduced
//! intermediate values are allowed to grow up to ~54 bits so that a run of
//! `add`/`sub` calls between two `carry()`s never overflows a `u64` when fed
//! into `mul`/`sqr` (those widen every limb product into a `u128`
//! accumulator before folding back down).

use core::ops::Neg;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::field::Field25519;

const LOW_51_BIT_MASK: u64 = (1u64 << 51) - 1;

/// `2p` in radix-2^51, used to keep `sub` outputs non-negative before
/// carrying.
const SUB_BIAS: [u64; 5] = [
    36028797018963664,
    36028797018963952,
    36028797018963952,
    36028797018963952,
    36028797018963952,
];

#[derive(Clone, Copy, Debug)]
pub struct FieldElement51(pub [u64; 5]);

impl FieldElement51 {
    pub const fn from_limbs(limbs: [u64; 5]) -> Self {
        FieldElement51(limbs)
    }

    /// Fold an accumulator of loosely-bounded u128 "digits" (radix 2^51)
    /// down into canonical-width u64 limbs, using `x^5 = 2^255 = 19 (mod p)`
    /// to wrap the carry out of limb 4 back into limb 0.
    fn carry_reduce(mut l: [u128; 5]) -> [u64; 5] {
        for _ in 0..2 {
            let mut carry: u128 = 0;
            for limb in l.iter_mut() {
                *limb += carry;
                carry = *limb >> 51;
                *limb &= LOW_51_BIT_MASK as u128;
            }
            l[0] += carry * 19;
        }
        let mut carry: u128 = 0;
        for limb in l.iter_mut() {
            *limb += carry;
            carry = *limb >> 51;
            *limb &= LOW_51_BIT_MASK as u128;
        }
        l[0] += carry * 19;
        [l[0] as u64, l[1] as u64, l[2] as u64, l[3] as u64, l[4] as u64]
    }

    /// Full reduction to the unique representative in `[0, p)`, as 5 u64
    /// limbs each `< 2^51`.
    fn to_canonical_limbs(&self) -> [u64; 5] {
        let FieldElement51(mut limbs) = self.carry();

        // q = floor((value + 19) / 2^255); either 0 or 1.
        let mut q = (limbs[0] + 19) >> 51;
        q = (limbs[1] + q) >> 51;
        q = (limbs[2] + q) >> 51;
        q = (limbs[3] + q) >> 51;
        q = (limbs[4] + q) >> 51;

        limbs[0] += 19 * q;

        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        limbs
    }

    /// `self^(2^k)`.
    fn sqr_n(&self, k: usize) -> Self {
        let mut r = self.sqr();
        for _ in 1..k {
            r = r.sqr();
        }
        r
    }

    /// Shared addition chain for `inv` (exponent p-2) and `pow22523`
    /// (exponent (p-5)/8): returns `(self^(2^250 - 1), self^11)`, the two
    /// partial products both final exponentiations are built from.
    fn pow22501(&self) -> (Self, Self) {
        let z = self;
        let t0 = z.sqr();
        let t1 = t0.sqr().sqr();
        let t1 = z.mul(&t1);
        let t0 = t0.mul(&t1);
        let t2 = t0.sqr();
        let t1 = t1.mul(&t2);
        let t2 = t1.sqr_n(5);
        let t1 = t2.mul(&t1);
        let t2 = t1.sqr_n(10);
        let t2 = t2.mul(&t1);
        let t3 = t2.sqr_n(20);
        let t2 = t3.mul(&t2);
        let t2 = t2.sqr_n(10);
        let t1 = t2.mul(&t1);
        let t2 = t1.sqr_n(50);
        let t2 = t2.mul(&t1);
        let t3 = t2.sqr_n(100);
        let t2 = t3.mul(&t2);
        let t2 = t2.sqr_n(50);
        let t1 = t2.mul(&t1);
        (t1, t0)
    }
}

impl Field25519 for FieldElement51 {
    fn zero() -> Self {
        FieldElement51([0, 0, 0, 0, 0])
    }

    fn one() -> Self {
        FieldElement51([1, 0, 0, 0, 0])
    }

    fn from_bytes(bytes: &[u8; 32]) -> Self {
        let load8 = |b: &[u8]| -> u64 {
            (b[0] as u64)
                | (b[1] as u64) << 8
                | (b[2] as u64) << 16
                | (b[3] as u64) << 24
                | (b[4] as u64) << 32
                | (b[5] as u64) << 40
                | (b[6] as u64) << 48
                | (b[7] as u64) << 56
        };
        let mut low_255 = *bytes;
        low_255[31] &= 0x7f; // clear bit 255

        let l0 = load8(&low_255[0..8]) & LOW_51_BIT_MASK;
        let l1 = (load8(&low_255[6..14]) >> 3) & LOW_51_BIT_MASK;
        let l2 = (load8(&low_255[12..20]) >> 6) & LOW_51_BIT_MASK;
        let l3 = (load8(&low_255[19..27]) >> 1) & LOW_51_BIT_MASK;
        let l4 = (load8(&low_255[24..32]) >> 12) & LOW_51_BIT_MASK;

        FieldElement51([l0, l1, l2, l3, l4])
    }

    fn to_bytes(&self) -> [u8; 32] {
        let limbs = self.to_canonical_limbs();
        let mut s = [0u8; 32];

        s[0] = limbs[0] as u8;
        s[1] = (limbs[0] >> 8) as u8;
        s[2] = (limbs[0] >> 16) as u8;
        s[3] = (limbs[0] >> 24) as u8;
        s[4] = (limbs[0] >> 32) as u8;
        s[5] = (limbs[0] >> 40) as u8;
        s[6] = ((limbs[0] >> 48) | (limbs[1] << 3)) as u8;
        s[7] = (limbs[1] >> 5) as u8;
        s[8] = (limbs[1] >> 13) as u8;
        s[9] = (limbs[1] >> 21) as u8;
        s[10] = (limbs[1] >> 29) as u8;
        s[11] = (limbs[1] >> 37) as u8;
        s[12] = ((limbs[1] >> 45) | (limbs[2] << 6)) as u8;
        s[13] = (limbs[2] >> 2) as u8;
        s[14] = (limbs[2] >> 10) as u8;
        s[15] = (limbs[2] >> 18) as u8;
        s[16] = (limbs[2] >> 26) as u8;
        s[17] = (limbs[2] >> 34) as u8;
        s[18] = (limbs[2] >> 42) as u8;
        s[19] = ((limbs[2] >> 50) | (limbs[3] << 1)) as u8;
        s[20] = (limbs[3] >> 7) as u8;
        s[21] = (limbs[3] >> 15) as u8;
        s[22] = (limbs[3] >> 23) as u8;
        s[23] = (limbs[3] >> 31) as u8;
        s[24] = (limbs[3] >> 39) as u8;
        s[25] = ((limbs[3] >> 47) | (limbs[4] << 4)) as u8;
        s[26] = (limbs[4] >> 4) as u8;
        s[27] = (limbs[4] >> 12) as u8;
        s[28] = (limbs[4] >> 20) as u8;
        s[29] = (limbs[4] >> 28) as u8;
        s[30] = (limbs[4] >> 36) as u8;
        s[31] = (limbs[4] >> 44) as u8;

        s
    }

    fn add(&self, rhs: &Self) -> Self {
        let mut out = [0u64; 5];
        for i in 0..5 {
            out[i] = self.0[i] + rhs.0[i];
        }
        FieldElement51(out)
    }

    fn sub(&self, rhs: &Self) -> Self {
        let mut out = [0u128; 5];
        for i in 0..5 {
            out[i] = (self.0[i] + SUB_BIAS[i]) as u128 - rhs.0[i] as u128;
        }
        FieldElement51(Self::carry_reduce(out))
    }

    fn neg(&self) -> Self {
        Self::zero().sub(self)
    }

    fn mul(&self, rhs: &Self) -> Self {
        let a = &self.0;
        let b = &rhs.0;

        let b1_19 = b[1] * 19;
        let b2_19 = b[2] * 19;
        let b3_19 = b[3] * 19;
        let b4_19 = b[4] * 19;

        let m = |x: u64, y: u64| (x as u128) * (y as u128);

        let c0 = m(a[0], b[0]) + m(a[4], b1_19) + m(a[3], b2_19) + m(a[2], b3_19) + m(a[1], b4_19);
        let c1 = m(a[1], b[0]) + m(a[0], b[1]) + m(a[4], b2_19) + m(a[3], b3_19) + m(a[2], b4_19);
        let c2 = m(a[2], b[0]) + m(a[1], b[1]) + m(a[0], b[2]) + m(a[4], b3_19) + m(a[3], b4_19);
        let c3 = m(a[3], b[0]) + m(a[2], b[1]) + m(a[1], b[2]) + m(a[0], b[3]) + m(a[4], b4_19);
        let c4 = m(a[4], b[0]) + m(a[3], b[1]) + m(a[2], b[2]) + m(a[1], b[3]) + m(a[0], b[4]);

        FieldElement51(Self::carry_reduce([c0, c1, c2, c3, c4]))
    }

    fn sqr(&self) -> Self {
        self.mul(self)
    }

    fn mul_121666(&self) -> Self {
        let mut out = [0u128; 5];
        for i in 0..5 {
            out[i] = self.0[i] as u128 * 121666u128;
        }
        FieldElement51(Self::carry_reduce(out))
    }

    fn carry(&self) -> Self {
        let mut l = [0u128; 5];
        for i in 0..5 {
            l[i] = self.0[i] as u128;
        }
        FieldElement51(Self::carry_reduce(l))
    }

    fn is_zero(&self) -> Choice {
        let bytes = self.to_bytes();
        bytes.ct_eq(&[0u8; 32])
    }

    fn eq(&self, rhs: &Self) -> Choice {
        self.to_bytes().ct_eq(&rhs.to_bytes())
    }

    fn sgn(&self) -> Choice {
        Choice::from(self.to_bytes()[0] & 1)
    }

    fn inv(&self) -> Self {
        // self^(p-2): (t19)^(2^5) * t3
        let (t19, t3) = self.pow22501();
        t19.sqr_n(5).mul(&t3)
    }

    fn pow22523(&self) -> Self {
        // exponent (p-5)/8
        let (t19, _t3) = self.pow22501();
        t19.sqr_n(2).mul(self)
    }

    fn sqrt_ratio(u: &Self, v: &Self) -> (Choice, Self) {
        let v3 = v.sqr().mul(v);
        let v7 = v3.sqr().mul(v);
        let uv3 = u.mul(&v3);
        let uv7 = u.mul(&v7);
        let mut r = uv3.mul(&uv7.pow22523());

        let check = v.mul(&r.sqr());

        let sqrt_m1 = sqrt_m1();
        let neg_u = u.neg();

        let correct_sign = check.eq(u);
        let flipped_sign = check.eq(&neg_u);
        let flipped_sign_i = check.eq(&neg_u.mul(&sqrt_m1));

        let r_prime = sqrt_m1.mul(&r);
        r = Self::conditional_select(&r, &r_prime, flipped_sign | flipped_sign_i);

        // Always return the nonnegative root.
        let r_is_negative = r.sgn();
        r = Self::conditional_select(&r, &r.neg(), r_is_negative);

        let was_square = correct_sign | flipped_sign;
        (was_square, r)
    }

    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [0u64; 5];
        for i in 0..5 {
            out[i] = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        FieldElement51(out)
    }
}

/// `sqrt(-1) mod p`, the Ristretto/Ed25519 standard constant.
pub fn sqrt_m1() -> FieldElement51 {
    FieldElement51([
        1718705420411056,
        234908883556509,
        2233514472574048,
        2117202627021982,
        765476049583133,
    ])
}

impl Neg for FieldElement51 {
    type Output = FieldElement51;
    fn neg(self) -> FieldElement51 {
        Field25519::neg(&self)
    }
}

impl PartialEq for FieldElement51 {
    fn eq(&self, other: &Self) -> bool {
        bool::from(Field25519::eq(self, other))
    }
}
impl Eq for FieldElement51 {}
