//! Curve and group constants (spec.md §4.E, §4.R).

use crate::backend::u64_51::FieldElement51;
use crate::edwards::EdwardsPoint;
use crate::field::Field25519;

/// Twisted Edwards curve constant `d = -121665/121666 (mod p)`.
pub(crate) const EDWARDS_D: FieldElement51 = FieldElement51::from_limbs([
    929955233495203,
    466365720129213,
    1662059464998953,
    2033849074728123,
    1442794654840575,
]);

/// Montgomery-form curve25519 constant `486662`, used by the X25519 ladder.
pub const MONTGOMERY_A: u32 = 486662;

/// Compressed encoding of the standard Ed25519 base point
/// (`y = 4/5`, sign bit `0`).
pub const ED25519_BASEPOINT_COMPRESSED: [u8; 32] = [
    0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
];

/// The standard Ed25519/Ristretto255 base point.
pub fn ed25519_basepoint() -> EdwardsPoint {
    EdwardsPoint::from_bytes(&ED25519_BASEPOINT_COMPRESSED)
        .expect("ED25519_BASEPOINT_COMPRESSED is a valid point encoding")
}

/// `sqrt(-1) mod p`.
pub fn sqrt_m1() -> FieldElement51 {
    crate::backend::u64_51::sqrt_m1()
}
