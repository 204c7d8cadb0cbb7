//! X25519 (spec.md §4.M "constant-time Montgomery ladder"): scalar
//! multiplication on the Montgomery `u`-line, RFC 7748 §5.

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::field::{Field25519, FieldElement};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MontgomeryPoint(pub [u8; 32]);

/// Apply the RFC 7748 clamping (clear the low 3 bits, clear the top bit, set
/// bit 254) so every X25519 private scalar lands in the safe subgroup-times-
/// cofactor range regardless of the bytes a caller supplies.
pub fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 248;
    bytes[31] &= 127;
    bytes[31] |= 64;
    bytes
}

impl MontgomeryPoint {
    /// `X25519(scalar, self)`, RFC 7748's constant-time ladder. `scalar_bytes`
    /// is clamped internally and zeroized on return. RFC 7748 §6.1 requires
    /// the all-zero output some low-order `u`-values produce to be rejected
    /// rather than used as a shared secret, so this returns `None` for that
    /// case instead of the all-zero bytes.
    pub fn mul_clamped(&self, mut scalar_bytes: [u8; 32]) -> Option<MontgomeryPoint> {
        let k = clamp_integer(scalar_bytes);
        scalar_bytes.zeroize();
        let out = x25519_ladder(&k, &self.0);
        let is_zero = out.ct_eq(&[0u8; 32]);
        if bool::from(is_zero) {
            None
        } else {
            Some(MontgomeryPoint(out))
        }
    }
}

fn x25519_ladder(k: &[u8; 32], u_bytes: &[u8; 32]) -> [u8; 32] {
    let x1 = FieldElement::from_bytes(u_bytes);
    let mut x2 = FieldElement::one();
    let mut z2 = FieldElement::zero();
    let mut x3 = x1;
    let mut z3 = FieldElement::one();
    let mut swap = Choice::from(0u8);

    let mut k = *k;

    for t in (0..255u32).rev() {
        let bit = (k[(t / 8) as usize] >> (t % 8)) & 1;
        let k_t = Choice::from(bit);
        swap ^= k_t;
        FieldElement::conditional_swap(&mut x2, &mut x3, swap);
        FieldElement::conditional_swap(&mut z2, &mut z3, swap);
        swap = k_t;

        let a = x2.add(&z2);
        let aa = a.sqr();
        let b = x2.sub(&z2);
        let bb = b.sqr();
        let e = aa.sub(&bb);
        let c = x3.add(&z3);
        let d = x3.sub(&z3);
        let da = d.mul(&a);
        let cb = c.mul(&b);
        x3 = da.add(&cb).sqr();
        z3 = x1.mul(&da.sub(&cb).sqr());
        x2 = aa.mul(&bb);
        z2 = e.mul(&aa.add(&e.mul_121666()));
    }

    FieldElement::conditional_swap(&mut x2, &mut x3, swap);
    FieldElement::conditional_swap(&mut z2, &mut z3, swap);

    let result = x2.mul(&z2.inv()).to_bytes();
    k.zeroize();
    result
}
