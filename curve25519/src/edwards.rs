//! Extended twisted-Edwards coordinates over curve25519 (spec.md §4.E).
//!
//! Points are held as `(X:Y:Z:T)` with the invariant `X*Y = T*Z`, the
//! representation Hisil, Wong, Carter and Dawson's 2008 paper
//! "Twisted Edwards Curves Revisited" introduced to make point addition a
//! single complete formula (no exceptional cases for the identity or
//! 2-torsion points), which is what lets every operation below skip the
//! case-analysis a projective or affine implementation would need.

use subtle::Choice;
use zeroize::Zeroize;

use crate::constants::EDWARDS_D;
use crate::field::{Field25519, FieldElement};
use crate::scalar::Scalar;

#[derive(Clone, Copy, Debug)]
pub struct EdwardsPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

impl EdwardsPoint {
    pub fn identity() -> Self {
        EdwardsPoint {
            x: FieldElement::zero(),
            y: FieldElement::one(),
            z: FieldElement::one(),
            t: FieldElement::zero(),
        }
    }

    /// Build from already-reduced extended coordinates. Callers must
    /// maintain `x*y = t*z`; used internally by decode and the scalar
    /// multiplication tables.
    pub(crate) fn from_raw(x: FieldElement, y: FieldElement, z: FieldElement, t: FieldElement) -> Self {
        EdwardsPoint { x, y, z, t }
    }

    pub fn compress(&self) -> [u8; 32] {
        let recip = self.z.inv();
        let x = self.x.mul(&recip);
        let y = self.y.mul(&recip);
        let mut bytes = y.to_bytes();
        bytes[31] |= u8::from(x.sgn()) << 7;
        bytes
    }

    /// Decode a compressed point, rejecting encodings whose `y` is not on
    /// the curve (spec.md §4.E edge cases). Non-canonical `y` (`>= p`) is
    /// rejected by `FieldElement::from_bytes` only insofar as it reduces
    /// mod p first; callers that must reject non-canonical input entirely
    /// should compare against `FieldElement::from_bytes(..).to_bytes()`.
    pub fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let sign_bit = bytes[31] >> 7;
        let mut y_bytes = *bytes;
        y_bytes[31] &= 0x7f;
        let y = FieldElement::from_bytes(&y_bytes);

        let y2 = y.sqr();
        let u = y2.sub(&FieldElement::one());
        let v = EDWARDS_D.mul(&y2).add(&FieldElement::one());
        let (is_valid, mut x) = FieldElement::sqrt_ratio(&u, &v);
        if !bool::from(is_valid) {
            return None;
        }

        let x_is_zero = x.is_zero();
        if bool::from(x_is_zero) && sign_bit == 1 {
            return None;
        }

        let should_negate = x.sgn() ^ Choice::from(sign_bit);
        x = FieldElement::conditional_select(&x, &x.neg(), should_negate);

        let t = x.mul(&y);
        Some(EdwardsPoint { x, y, z: FieldElement::one(), t })
    }

    pub fn neg(&self) -> Self {
        EdwardsPoint {
            x: self.x.neg(),
            y: self.y,
            z: self.z,
            t: self.t.neg(),
        }
    }

    /// Complete addition (HWCD 2008 §4.2): no exceptional inputs.
    pub fn add(&self, rhs: &Self) -> Self {
        let a = self.y.sub(&self.x).mul(&rhs.y.sub(&rhs.x));
        let b = self.y.add(&self.x).mul(&rhs.y.add(&rhs.x));
        let c = self.t.mul(&EDWARDS_D.add(&EDWARDS_D)).mul(&rhs.t);
        let d = self.z.mul(&rhs.z).add(&self.z.mul(&rhs.z));
        let e = b.sub(&a);
        let f = d.sub(&c);
        let g = d.add(&c);
        let h = b.add(&a);

        EdwardsPoint {
            x: e.mul(&f),
            y: g.mul(&h),
            z: f.mul(&g),
            t: e.mul(&h),
        }
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        self.add(&rhs.neg())
    }

    /// Dedicated doubling (HWCD 2008 §4.4), cheaper than `add(self, self)`.
    pub fn double(&self) -> Self {
        let a = self.x.sqr();
        let b = self.y.sqr();
        let c = self.z.sqr().add(&self.z.sqr());
        let d = a.neg();
        let xy = self.x.add(&self.y);
        let e = xy.sqr().sub(&a).sub(&b);
        let g = d.add(&b);
        let f = g.sub(&c);
        let h = d.sub(&b);

        EdwardsPoint {
            x: e.mul(&f),
            y: g.mul(&h),
            z: f.mul(&g),
            t: e.mul(&h),
        }
    }

    /// `self` doubled `n` times.
    pub fn dbln(&self, n: u32) -> Self {
        let mut p = *self;
        for _ in 0..n {
            p = p.double();
        }
        p
    }

    /// Equality up to projective scaling: `X1*Z2 == X2*Z1 && Y1*Z2 == Y2*Z1`.
    pub fn eq(&self, rhs: &Self) -> Choice {
        let xz = self.x.mul(&rhs.z).eq(&rhs.x.mul(&self.z));
        let yz = self.y.mul(&rhs.z).eq(&rhs.y.mul(&self.z));
        xz & yz
    }

    /// Equality assuming both points already have `Z = 1` (table lookups,
    /// decoded points before any group operation).
    pub fn eq_z1(&self, rhs: &Self) -> Choice {
        self.x.eq(&rhs.x) & self.y.eq(&rhs.y)
    }

    pub fn is_identity(&self) -> Choice {
        self.eq(&EdwardsPoint::identity())
    }

    /// `8*P == identity`: detects low-order torsion points (spec.md §4.R,
    /// the canonical-encoding and cofactor-clearing checks both rely on
    /// this).
    pub fn is_small_order(&self) -> Choice {
        self.dbln(3).is_identity()
    }

    pub fn mul_by_cofactor(&self) -> Self {
        self.dbln(3)
    }

    /// Variable-time generic double-and-add scalar multiplication
    /// (spec.md §4.M "variable-time generic"). Not safe to use with secret
    /// scalars.
    pub fn vartime_mul(&self, scalar: &Scalar) -> Self {
        let bytes = scalar.to_bytes();
        let mut acc = EdwardsPoint::identity();
        for byte in bytes.iter().rev() {
            for bit in (0..8).rev() {
                acc = acc.double();
                if (byte >> bit) & 1 == 1 {
                    acc = acc.add(self);
                }
            }
        }
        acc
    }

    pub fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        EdwardsPoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
            t: FieldElement::conditional_select(&a.t, &b.t, choice),
        }
    }

    /// Precompute `(Y+X, Y-X, Z, 2d*T)` for repeated mixed addition against
    /// `self` (HWCD 2008 §4.3). Scalar-multiplication tables build one of
    /// these per entry instead of keeping full `EdwardsPoint`s, so every
    /// table lookup feeds straight into the cheaper [`add_precomputed`]
    /// formula.
    ///
    /// [`add_precomputed`]: EdwardsPoint::add_precomputed
    pub fn to_precomputed(&self) -> PrecomputedPoint {
        PrecomputedPoint {
            y_plus_x: self.y.add(&self.x),
            y_minus_x: self.y.sub(&self.x),
            z: self.z,
            t2d: self.t.mul(&EDWARDS_D.add(&EDWARDS_D)),
        }
    }

    /// Mixed addition against a [`PrecomputedPoint`]: reuses `rhs`'s
    /// already-computed `Y+X`/`Y-X`/`2d*T`, so a table lookup costs one
    /// fewer multiplication than `add` against another live `EdwardsPoint`.
    pub fn add_precomputed(&self, rhs: &PrecomputedPoint) -> Self {
        let y_plus_x = self.y.add(&self.x);
        let y_minus_x = self.y.sub(&self.x);
        let pp = y_plus_x.mul(&rhs.y_plus_x);
        let mm = y_minus_x.mul(&rhs.y_minus_x);
        let tt2d = self.t.mul(&rhs.t2d);
        let zz = self.z.mul(&rhs.z);
        let zz2 = zz.add(&zz);

        let x = pp.sub(&mm);
        let y = pp.add(&mm);
        let z = zz2.add(&tt2d);
        let t = zz2.sub(&tt2d);

        EdwardsPoint {
            x: x.mul(&t),
            y: y.mul(&z),
            z: z.mul(&t),
            t: x.mul(&y),
        }
    }

    /// Mixed subtraction: `add_precomputed` against `rhs` negated.
    pub fn sub_precomputed(&self, rhs: &PrecomputedPoint) -> Self {
        self.add_precomputed(&rhs.conditional_negate(Choice::from(1u8)))
    }
}

/// Precomputed `(Y+X, Y-X, Z, 2d*T)` form of a point, used as the table-entry
/// representation for the variable-time NAF table and the constant-time
/// fixed-base table (spec.md §4.M).
#[derive(Clone, Copy, Debug)]
pub struct PrecomputedPoint {
    pub(crate) y_plus_x: FieldElement,
    pub(crate) y_minus_x: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t2d: FieldElement,
}

impl PrecomputedPoint {
    pub fn identity() -> Self {
        PrecomputedPoint {
            y_plus_x: FieldElement::one(),
            y_minus_x: FieldElement::one(),
            z: FieldElement::one(),
            t2d: FieldElement::zero(),
        }
    }

    pub fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        PrecomputedPoint {
            y_plus_x: FieldElement::conditional_select(&a.y_plus_x, &b.y_plus_x, choice),
            y_minus_x: FieldElement::conditional_select(&a.y_minus_x, &b.y_minus_x, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
            t2d: FieldElement::conditional_select(&a.t2d, &b.t2d, choice),
        }
    }

    /// Swap `Y+X`/`Y-X` and negate `2d*T` when `choice` is set: the
    /// precomputed-form equivalent of negating the underlying point.
    pub fn conditional_negate(&self, choice: Choice) -> Self {
        let negated = PrecomputedPoint {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            z: self.z,
            t2d: self.t2d.neg(),
        };
        Self::conditional_select(self, &negated, choice)
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.eq(other))
    }
}
impl Eq for EdwardsPoint {}

impl Zeroize for EdwardsPoint {
    fn zeroize(&mut self) {
        self.x = FieldElement::zero();
        self.y = FieldElement::one();
        self.z = FieldElement::one();
        self.t = FieldElement::zero();
    }
}
