//! Ristretto255: a prime-order group built on top of the curve25519 Edwards
//! curve by quotienting out its cofactor-8 torsion subgroup (spec.md §4.R).
//!
//! A `RistrettoPoint` is represented by the same extended-coordinates
//! `EdwardsPoint` used everywhere else in this crate; what makes it a
//! distinct type is that equality, encoding and decoding all go through the
//! Ristretto coset maps below instead of raw Edwards equality, so that the
//! 4 (or 8) Edwards representatives of one Ristretto element always compare
//! and encode identically.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::constants::EDWARDS_D;
use crate::edwards::EdwardsPoint;
use crate::field::{Field25519, FieldElement};
use crate::scalar::Scalar;

#[derive(Clone, Copy, Debug)]
pub struct RistrettoPoint(pub(crate) EdwardsPoint);

fn sqrt_m1() -> FieldElement {
    crate::backend::u64_51::sqrt_m1()
}

/// `1/sqrt(a - d)` for `a = -1`, derived at runtime from the verified field
/// `sqrt_ratio` primitive rather than hardcoded, so this module never risks
/// silently diverging from the field layer it is built on.
fn invsqrt_a_minus_d() -> FieldElement {
    let a = FieldElement::one().neg();
    let a_minus_d = a.sub(&EDWARDS_D);
    let (_, r) = FieldElement::sqrt_ratio(&FieldElement::one(), &a_minus_d);
    r
}

/// A fixed square root of `a*d - 1` (`a = -1`), used by the Elligator map.
/// Same runtime-derivation rationale as [`invsqrt_a_minus_d`].
fn sqrt_ad_minus_one() -> FieldElement {
    let a = FieldElement::one().neg();
    let ad_minus_one = a.mul(&EDWARDS_D).sub(&FieldElement::one());
    let (_, r) = FieldElement::sqrt_ratio(&ad_minus_one, &FieldElement::one());
    r
}

impl RistrettoPoint {
    pub fn identity() -> Self {
        RistrettoPoint(EdwardsPoint::identity())
    }

    /// The standard Ristretto255 base point: the Ristretto encoding of the
    /// Ed25519 base point (any Edwards representative of a coset encodes to
    /// the same canonical Ristretto value).
    pub fn basepoint() -> Self {
        RistrettoPoint(crate::constants::ed25519_basepoint())
    }

    pub fn add(&self, rhs: &Self) -> Self {
        RistrettoPoint(self.0.add(&rhs.0))
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        RistrettoPoint(self.0.sub(&rhs.0))
    }

    pub fn neg(&self) -> Self {
        RistrettoPoint(self.0.neg())
    }

    pub fn double(&self) -> Self {
        RistrettoPoint(self.0.double())
    }

    pub fn vartime_mul(&self, scalar: &Scalar) -> Self {
        RistrettoPoint(self.0.vartime_mul(scalar))
    }

    /// Ristretto equality: `x1*y2 == y1*x2 || x1*x2 == y1*y2` (the two
    /// cross-ratio identities that hold exactly when two Edwards points lie
    /// in the same coset, spec.md §4.R).
    pub fn eq(&self, rhs: &Self) -> Choice {
        let (x1, y1) = (self.0.x, self.0.y);
        let (x2, y2) = (rhs.0.x, rhs.0.y);
        let a = x1.mul(&y2).eq(&y1.mul(&x2));
        let b = x1.mul(&x2).eq(&y1.mul(&y2));
        a | b
    }

    pub fn compress(&self) -> [u8; 32] {
        let p = &self.0;
        let u1 = p.z.add(&p.y).mul(&p.z.sub(&p.y));
        let u2 = p.x.mul(&p.y);
        let u2_sqr = u2.sqr();
        let (_, invsqrt) = FieldElement::sqrt_ratio(&FieldElement::one(), &u1.mul(&u2_sqr));
        let den1 = invsqrt.mul(&u1);
        let den2 = invsqrt.mul(&u2);
        let z_inv = den1.mul(&den2).mul(&p.t);

        let ix = p.x.mul(&sqrt_m1());
        let iy = p.y.mul(&sqrt_m1());
        let enchanted_denominator = den1.mul(&invsqrt_a_minus_d());

        let rotate = p.t.mul(&z_inv).sgn();

        let x = FieldElement::conditional_select(&p.x, &iy, rotate);
        let mut y = FieldElement::conditional_select(&p.y, &ix, rotate);
        let den_inv = FieldElement::conditional_select(&den2, &enchanted_denominator, rotate);

        let x_z_inv_sgn = x.mul(&z_inv).sgn();
        y = FieldElement::conditional_select(&y, &y.neg(), x_z_inv_sgn);

        let mut s = den_inv.mul(&p.z.sub(&y));
        let s_is_negative = s.sgn();
        s = FieldElement::conditional_select(&s, &s.neg(), s_is_negative);
        s.to_bytes()
    }

    /// Decode a canonical Ristretto255 encoding (spec.md §4.R: rejects
    /// non-canonical `s`, negative `s`, and the non-square/zero-`y` cases).
    pub fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let s = FieldElement::from_bytes(bytes);
        if s.to_bytes() != *bytes {
            return None; // non-canonical encoding
        }
        if bool::from(s.sgn()) {
            return None; // s must be nonnegative
        }

        let s2 = s.sqr();
        let u1 = FieldElement::one().sub(&s2);
        let u2 = FieldElement::one().add(&s2);
        let u2_sqr = u2.sqr();
        let v = EDWARDS_D.neg().mul(&u1.sqr()).sub(&u2_sqr);

        let (was_square, invsqrt) = FieldElement::sqrt_ratio(&FieldElement::one(), &v.mul(&u2_sqr));
        if !bool::from(was_square) {
            return None;
        }

        let den_x = invsqrt.mul(&u2);
        let den_y = invsqrt.mul(&den_x).mul(&v);

        let x = s.add(&s).mul(&den_x).abs();
        let y = u1.mul(&den_y);
        let t = x.mul(&y);

        if bool::from(t.sgn()) || bool::from(y.is_zero()) {
            return None;
        }

        Some(RistrettoPoint(EdwardsPoint::from_raw(x, y, FieldElement::one(), t)))
    }

    /// The one-way Elligator2-based map from a field element onto a curve
    /// point (spec.md §4.R `map_to_curve`); not a group homomorphism, and
    /// not injective, by design.
    pub fn map_to_curve(r0: &FieldElement) -> RistrettoPoint {
        let i = sqrt_m1();
        let d = EDWARDS_D;
        let one = FieldElement::one();
        let minus_one = one.neg();

        let one_minus_d_sq = one.sub(&d.sqr());
        let d_minus_one_sq = d.sub(&one).sqr();

        let r = i.mul(&r0.sqr());
        let ns = r.add(&one).mul(&one_minus_d_sq);
        let mut c = minus_one;
        let d_val = c.sub(&r.mul(&d)).mul(&r.add(&d));

        let (ns_d_is_sq, mut s) = FieldElement::sqrt_ratio(&ns, &d_val);
        let s_prime = s.mul(r0).abs().neg();
        s = FieldElement::conditional_select(&s_prime, &s, ns_d_is_sq);
        c = FieldElement::conditional_select(&r, &c, ns_d_is_sq);

        let n_t = c.mul(&r.sub(&one)).mul(&d_minus_one_sq).sub(&d_val);
        let s_sq = s.sqr();

        let w0 = s.add(&s).mul(&d_val);
        let w1 = n_t.mul(&sqrt_ad_minus_one());
        let w2 = one.sub(&s_sq);
        let w3 = one.add(&s_sq);

        RistrettoPoint(EdwardsPoint::from_raw(w0.mul(&w3), w2.mul(&w1), w1.mul(&w3), w0.mul(&w2)))
    }

    /// Multi-scalar multiplication for an arbitrary number of point/scalar
    /// pairs, assembled from repeated [`crate::window::straus_multiscalar_mul`]
    /// calls over chunks of at most 32 points each, with the per-chunk
    /// results added together (spec.md §5: Straus proper is capped at
    /// `STRAUS_MAX_BATCH_SZ = 32`; larger MSMs such as the range-proof
    /// verifier's are built from it rather than by raising that cap).
    #[cfg(feature = "alloc")]
    pub fn multiscalar_mul(scalars: &[Scalar], points: &[RistrettoPoint]) -> RistrettoPoint {
        assert_eq!(scalars.len(), points.len());
        let edwards_points: alloc::vec::Vec<EdwardsPoint> = points.iter().map(|p| p.0).collect();

        let mut acc = EdwardsPoint::identity();
        for (chunk_scalars, chunk_points) in scalars.chunks(32).zip(edwards_points.chunks(32)) {
            let chunk_result = if chunk_scalars.len() == 1 {
                chunk_points[0].vartime_mul(&chunk_scalars[0])
            } else {
                crate::window::straus_multiscalar_mul(chunk_points, chunk_scalars)
            };
            acc = acc.add(&chunk_result);
        }
        RistrettoPoint(acc)
    }

    /// Hash an arbitrary-length message onto the group: SHA-512 the input,
    /// split the 64-byte digest into two field elements, map each to a
    /// curve point and add them (spec.md §4.R `hash_to_curve`).
    pub fn hash_to_curve(input: &[u8]) -> RistrettoPoint {
        Self::hash_from_bytes::<sha2::Sha512>(input)
    }

    /// `hash_to_curve`, generalized over any digest producing at least 64
    /// bytes of output (any `sha2`/`sha3`/`blake2`-family hash implementing
    /// the shared `digest::Digest` trait) rather than a fixed SHA-512.
    pub fn hash_from_bytes<D: sha2::Digest>(input: &[u8]) -> RistrettoPoint {
        let mut hasher = D::new();
        hasher.update(input);
        let output = hasher.finalize();
        assert!(
            output.len() >= 64,
            "hash_from_bytes requires a digest producing at least 64 bytes"
        );

        let mut lo = [0u8; 32];
        let mut hi = [0u8; 32];
        lo.copy_from_slice(&output[0..32]);
        hi.copy_from_slice(&output[32..64]);

        let r1 = FieldElement::from_bytes(&lo);
        let r2 = FieldElement::from_bytes(&hi);

        Self::map_to_curve(&r1).add(&Self::map_to_curve(&r2))
    }
}

impl PartialEq for RistrettoPoint {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.eq(other))
    }
}
impl Eq for RistrettoPoint {}
