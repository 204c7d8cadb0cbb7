//! Precomputed-table scalar multiplication (spec.md §4.M): variable-time
//! width-w NAF multiplication (used for the base point and for generic
//! points), a constant-time fixed-base table, and Straus multi-scalar
//! multiplication for 2..=32 points.

use subtle::Choice;

use crate::edwards::{EdwardsPoint, PrecomputedPoint};
use crate::scalar::Scalar;

/// Width used for the variable-time NAF paths: 8 odd-multiple table entries
/// (`1P, 3P, .., 15P`).
const NAF_WIDTH: u32 = 5;
const NAF_TABLE_SIZE: usize = 8;

/// Width-w non-adjacent form of a scalar, one digit per bit position
/// (spec.md §4.M). Digits are in `-2^(w-1)..2^(w-1)`, at most every w-th one
/// nonzero. Not constant-time: branches on the scalar's own bits, which is
/// the point of a *variable*-time multiplier.
fn non_adjacent_form(scalar: &Scalar, w: u32) -> [i8; 256] {
    let limbs = scalar.limbs();
    let mut naf = [0i8; 256];
    let width_mask = (1u64 << w) - 1;

    let mut pos = 0usize;
    let mut carry = 0u64;
    while pos < 256 {
        let limb_idx = pos / 64;
        let bit_idx = pos % 64;

        let bit_buf = if bit_idx < 64 - w as usize {
            limbs[limb_idx] >> bit_idx
        } else if limb_idx + 1 < 4 {
            (limbs[limb_idx] >> bit_idx) | (limbs[limb_idx + 1] << (64 - bit_idx))
        } else {
            limbs[limb_idx] >> bit_idx
        };

        let window = carry + (bit_buf & width_mask);

        if window & 1 == 0 {
            pos += 1;
            continue;
        }

        if window < (1 << (w - 1)) {
            carry = 0;
            naf[pos] = window as i8;
        } else {
            carry = 1;
            naf[pos] = (window as i8).wrapping_sub(1i8 << w);
        }

        pos += w as usize;
    }
    naf
}

/// Odd multiples `1P, 3P, 5P, .., (2*NAF_TABLE_SIZE-1)P`, stored precomputed
/// (spec.md §4.M) so every NAF digit lookup feeds directly into
/// `EdwardsPoint::add_precomputed`/`sub_precomputed` instead of the more
/// expensive general `add`.
struct NafLookupTable([PrecomputedPoint; NAF_TABLE_SIZE]);

impl NafLookupTable {
    fn build(point: &EdwardsPoint) -> Self {
        let mut multiples = [*point; NAF_TABLE_SIZE];
        let double = point.double();
        for i in 1..NAF_TABLE_SIZE {
            multiples[i] = multiples[i - 1].add(&double);
        }
        let mut table = [PrecomputedPoint::identity(); NAF_TABLE_SIZE];
        for i in 0..NAF_TABLE_SIZE {
            table[i] = multiples[i].to_precomputed();
        }
        NafLookupTable(table)
    }

    /// `digit` is an odd signed value from the NAF; looks up the precomputed
    /// form of `|digit| * P`.
    fn select(&self, digit: i8) -> &PrecomputedPoint {
        &self.0[(digit.unsigned_abs() as usize - 1) / 2]
    }
}

/// Variable-time width-5 NAF scalar multiplication; used both for the
/// dedicated base-point multiplier and as the building block for generic
/// point multiplication (spec.md §4.M "variable-time w-NAF base-point" and
/// "variable-time generic").
pub fn vartime_wnaf_mul(point: &EdwardsPoint, scalar: &Scalar) -> EdwardsPoint {
    let naf = non_adjacent_form(scalar, NAF_WIDTH);
    let table = NafLookupTable::build(point);

    let mut acc = EdwardsPoint::identity();
    for i in (0..256).rev() {
        acc = acc.double();
        let digit = naf[i];
        if digit > 0 {
            acc = acc.add_precomputed(table.select(digit));
        } else if digit < 0 {
            acc = acc.sub_precomputed(table.select(digit));
        }
    }
    acc
}

/// Straus's simultaneous multi-scalar multiplication (spec.md §4.M),
/// sharing one doubling ladder across up to 32 point/scalar pairs.
/// Variable-time: the NAF digits of every scalar are secret-independent
/// branching the same way a single-scalar vartime multiply is.
///
/// `points`/`scalars` may be any length: 0 returns the identity, 1 falls
/// back to [`vartime_wnaf_mul`], and more than the 32-entry simultaneous
/// table falls back to summing sequential [`vartime_wnaf_mul`] calls rather
/// than panicking.
pub fn straus_multiscalar_mul(points: &[EdwardsPoint], scalars: &[Scalar]) -> EdwardsPoint {
    assert_eq!(points.len(), scalars.len());

    const MAX_SIMULTANEOUS: usize = 32;

    match points.len() {
        0 => return EdwardsPoint::identity(),
        1 => return vartime_wnaf_mul(&points[0], &scalars[0]),
        n if n > MAX_SIMULTANEOUS => {
            let mut acc = EdwardsPoint::identity();
            for (point, scalar) in points.iter().zip(scalars.iter()) {
                acc = acc.add(&vartime_wnaf_mul(point, scalar));
            }
            return acc;
        }
        _ => {}
    }

    let mut nafs = [[0i8; 256]; MAX_SIMULTANEOUS];
    let mut tables: [Option<NafLookupTable>; MAX_SIMULTANEOUS] = Default::default();
    for i in 0..points.len() {
        nafs[i] = non_adjacent_form(&scalars[i], NAF_WIDTH);
        tables[i] = Some(NafLookupTable::build(&points[i]));
    }

    let mut acc = EdwardsPoint::identity();
    for bit in (0..256).rev() {
        acc = acc.double();
        for i in 0..points.len() {
            let digit = nafs[i][bit];
            if digit > 0 {
                acc = acc.add_precomputed(tables[i].as_ref().unwrap().select(digit));
            } else if digit < 0 {
                acc = acc.sub_precomputed(tables[i].as_ref().unwrap().select(digit));
            }
        }
    }
    acc
}

// --- Constant-time fixed-base table -----------------------------------

const RADIX16_ROWS: usize = 64;
const RADIX16_TABLE_SIZE: usize = 8;

/// Signed radix-16 digits `d_i` in `-8..=8` with `scalar = sum d_i * 16^i`,
/// the standard Ed25519 fixed-base digit recoding.
fn to_radix16(scalar: &Scalar) -> [i8; 64] {
    let bytes = scalar.to_bytes();
    let mut digits = [0i8; 64];

    for i in 0..32 {
        digits[2 * i] = (bytes[i] & 0x0f) as i8;
        digits[2 * i + 1] = ((bytes[i] >> 4) & 0x0f) as i8;
    }

    let mut carry = 0i8;
    for d in digits.iter_mut().take(63) {
        *d += carry;
        carry = (*d + 8) >> 4;
        *d -= carry << 4;
    }
    digits[63] += carry;

    digits
}

/// Precomputed `16^i * (1, 2, .., 8) * basepoint` table for constant-time
/// fixed-base multiplication (spec.md §4.M "constant-time fixed-base via 2D
/// table").
pub struct FixedBaseTable {
    rows: alloc_or_stack::TableStorage,
}

mod alloc_or_stack {
    use crate::edwards::PrecomputedPoint;
    pub type TableStorage = [[PrecomputedPoint; super::RADIX16_TABLE_SIZE]; super::RADIX16_ROWS];
}

impl FixedBaseTable {
    pub fn build(base: &EdwardsPoint) -> Self {
        let mut rows: alloc_or_stack::TableStorage =
            [[PrecomputedPoint::identity(); RADIX16_TABLE_SIZE]; RADIX16_ROWS];

        let mut row_base = *base;
        for row in rows.iter_mut() {
            let mut multiple = row_base;
            row[0] = multiple.to_precomputed();
            for k in 1..RADIX16_TABLE_SIZE {
                multiple = multiple.add(&row_base);
                row[k] = multiple.to_precomputed();
            }
            row_base = row_base.dbln(4); // advance by 16^1 for the next row
        }

        FixedBaseTable { rows }
    }

    /// Constant-time in the scalar: every row performs a fixed sequence of
    /// 8 equality checks (one per possible digit magnitude) regardless of
    /// which digit is actually present, then a single mixed addition against
    /// the selected, sign-corrected precomputed table entry.
    pub fn mul(&self, scalar: &Scalar) -> EdwardsPoint {
        let digits = to_radix16(scalar);
        let mut acc = EdwardsPoint::identity();

        for (row, &digit) in self.rows.iter().zip(digits.iter()) {
            let is_negative = Choice::from((digit < 0) as u8);
            let abs_digit = digit.unsigned_abs();

            let mut selected = PrecomputedPoint::identity();
            for k in 0..RADIX16_TABLE_SIZE {
                let is_this_one = Choice::from((abs_digit == (k as u8 + 1)) as u8);
                selected = PrecomputedPoint::conditional_select(&selected, &row[k], is_this_one);
            }
            selected = selected.conditional_negate(is_negative);

            acc = acc.add_precomputed(&selected);
        }

        acc
    }
}
