//! Arithmetic mod the prime group order
//! `L = 2^252 + 27742317777372353535851937790883648493` (spec.md §4.S).
//!
//! Scalars are always kept in canonical form (`< L`) as four little-endian
//! `u64` limbs. Reduction uses a 256/512-bit binary long-division loop
//! rather than Montgomery or Barrett arithmetic: the loop invariant
//! (`acc < L` before and after every step, since `2*acc + bit < 2*L` is at
//! most one subtraction away from `< L`) is easy to see is correct, which
//! matters here more than the constant-factor speedup a precomputed-`mu`
//! Barrett reduction would give.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// `L`, little-endian bytes.
pub const L_BYTES: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

fn l_limbs() -> [u64; 4] {
    bytes_to_limbs4(&L_BYTES)
}

fn bytes_to_limbs4(b: &[u8; 32]) -> [u64; 4] {
    let mut out = [0u64; 4];
    for i in 0..4 {
        out[i] = u64::from_le_bytes(b[i * 8..i * 8 + 8].try_into().unwrap());
    }
    out
}

fn limbs4_to_bytes(l: &[u64; 4]) -> [u8; 32] {
    let mut out = [0u8; 32];
    for i in 0..4 {
        out[i * 8..i * 8 + 8].copy_from_slice(&l[i].to_le_bytes());
    }
    out
}

/// `a >= b`, as a plain bool. Used only by [`Scalar::from_canonical_bytes`]
/// to decide whether a decoded encoding is in range: that outcome is the
/// function's own public `Option` result, not a value an attacker can use
/// this branch to learn anything about beyond what the return value already
/// reveals. Every arithmetic path on live secret scalars uses
/// [`ct_limbs4_ge`] instead.
fn limbs4_ge(a: &[u64; 4], b: &[u64; 4]) -> bool {
    for i in (0..4).rev() {
        if a[i] != b[i] {
            return a[i] > b[i];
        }
    }
    true
}

/// Constant-time `a >= b`: a borrow chain with no data-dependent branch.
fn ct_limbs4_ge(a: &[u64; 4], b: &[u64; 4]) -> Choice {
    let mut borrow: u64 = 0;
    for i in 0..4 {
        let (d1, b1) = a[i].overflowing_sub(b[i]);
        let (_d2, b2) = d1.overflowing_sub(borrow);
        borrow = (b1 as u64) | (b2 as u64);
    }
    Choice::from((borrow == 0) as u8)
}

/// Two's-complement `a - b mod 2^256`, via an unsigned borrow chain with no
/// data-dependent branch (unlike a signed-subtract-and-check-negative).
fn limbs4_sub(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    let mut out = [0u64; 4];
    let mut borrow: u64 = 0;
    for i in 0..4 {
        let (d1, b1) = a[i].overflowing_sub(b[i]);
        let (d2, b2) = d1.overflowing_sub(borrow);
        out[i] = d2;
        borrow = (b1 as u64) | (b2 as u64);
    }
    out
}

fn limbs4_add_raw(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    let mut out = [0u64; 4];
    let mut carry: u128 = 0;
    for i in 0..4 {
        let s = a[i] as u128 + b[i] as u128 + carry;
        out[i] = s as u64;
        carry = s >> 64;
    }
    out
}

fn double4(a: &[u64; 4]) -> [u64; 4] {
    let mut out = [0u64; 4];
    out[0] = a[0] << 1;
    out[1] = (a[1] << 1) | (a[0] >> 63);
    out[2] = (a[2] << 1) | (a[1] >> 63);
    out[3] = (a[3] << 1) | (a[2] >> 63);
    out
}

/// Reduce an arbitrary-length little-endian bit string mod `L` via repeated
/// double-and-reduce, most significant bit first.
fn reduce_bits(words: &[u64], total_bits: usize) -> [u64; 4] {
    let l = l_limbs();
    let mut acc = [0u64; 4];
    for i in (0..total_bits).rev() {
        let word = i / 64;
        let bit = i % 64;
        let set = (words[word] >> bit) & 1;
        acc = double4(&acc);
        acc[0] |= set;
        let reduced = limbs4_sub(&acc, &l);
        let choice = ct_limbs4_ge(&acc, &l);
        for j in 0..4 {
            acc[j] = u64::conditional_select(&acc[j], &reduced[j], choice);
        }
    }
    acc
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Scalar(pub(crate) [u64; 4]);

impl Scalar {
    pub const ZERO: Scalar = Scalar([0, 0, 0, 0]);
    pub const ONE: Scalar = Scalar([1, 0, 0, 0]);

    /// Decode a canonical (`< L`) scalar. Rejects non-canonical encodings,
    /// per spec.md §4.S.
    pub fn from_canonical_bytes(bytes: &[u8; 32]) -> Option<Scalar> {
        let limbs = bytes_to_limbs4(bytes);
        if limbs4_ge(&limbs, &l_limbs()) {
            None
        } else {
            Some(Scalar(limbs))
        }
    }

    /// Reduce a 32-byte little-endian value mod `L`.
    pub fn from_bytes_mod_order(bytes: &[u8; 32]) -> Scalar {
        let limbs = bytes_to_limbs4(bytes);
        Scalar(reduce_bits(&limbs, 256))
    }

    /// Reduce a 64-byte little-endian value mod `L` (the hash-output-to-scalar
    /// path used throughout Ed25519/Schnorr signing).
    pub fn from_bytes_mod_order_wide(bytes: &[u8; 64]) -> Scalar {
        let mut words = [0u64; 8];
        for i in 0..8 {
            words[i] = u64::from_le_bytes(bytes[i * 8..i * 8 + 8].try_into().unwrap());
        }
        Scalar(reduce_bits(&words, 512))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        limbs4_to_bytes(&self.0)
    }

    /// Lift a small integer into the field, used to turn plaintext amounts
    /// into scalars for Pedersen commitments and range-proof bit decomposition.
    pub fn from_u64(value: u64) -> Scalar {
        Scalar([value, 0, 0, 0])
    }

    /// Sample a uniformly random scalar via 64 bytes of wide reduction, the
    /// same "reduce more input than the modulus needs" approach RFC 9380 and
    /// Ed25519 nonce generation both use to keep sampling bias negligible.
    pub fn random<R: rand_core::RngCore + rand_core::CryptoRng>(rng: &mut R) -> Scalar {
        let mut bytes = [0u8; 64];
        rng.fill_bytes(&mut bytes);
        Scalar::from_bytes_mod_order_wide(&bytes)
    }

    pub fn is_zero(&self) -> Choice {
        let l = self.0;
        Choice::from(((l[0] | l[1] | l[2] | l[3]) == 0) as u8)
    }

    pub fn add(&self, rhs: &Scalar) -> Scalar {
        let sum = limbs4_add_raw(&self.0, &rhs.0);
        let l = l_limbs();
        let reduced = limbs4_sub(&sum, &l);
        let choice = ct_limbs4_ge(&sum, &l);
        let mut out = [0u64; 4];
        for i in 0..4 {
            out[i] = u64::conditional_select(&sum[i], &reduced[i], choice);
        }
        Scalar(out)
    }

    pub fn sub(&self, rhs: &Scalar) -> Scalar {
        let l = l_limbs();
        // Two's-complement wraparound diff; if `self < rhs` this is
        // `2^256 - (rhs - self)`, which `+ L` (mod 2^256) turns into the
        // correct positive representative `L - (rhs - self)`.
        let diff = limbs4_sub(&self.0, &rhs.0);
        let wrapped = limbs4_add_raw(&diff, &l);
        let choice = ct_limbs4_ge(&self.0, &rhs.0);
        let mut out = [0u64; 4];
        for i in 0..4 {
            out[i] = u64::conditional_select(&wrapped[i], &diff[i], choice);
        }
        Scalar(out)
    }

    pub fn neg(&self) -> Scalar {
        Scalar::ZERO.sub(self)
    }

    pub fn mul(&self, rhs: &Scalar) -> Scalar {
        let mut product = [0u128; 8];
        for i in 0..4 {
            for j in 0..4 {
                product[i + j] += self.0[i] as u128 * rhs.0[j] as u128;
            }
        }
        // Propagate u128 carries into a flat 8x64 limb array before reducing.
        let mut words = [0u64; 8];
        let mut carry: u128 = 0;
        for i in 0..8 {
            let v = product[i] + carry;
            words[i] = v as u64;
            carry = v >> 64;
        }
        Scalar(reduce_bits(&words, 512))
    }

    pub fn muladd(&self, b: &Scalar, c: &Scalar) -> Scalar {
        self.mul(b).add(c)
    }

    /// Multiplicative inverse mod `L` via Fermat's little theorem (`L` is
    /// prime). The zero scalar has no inverse; callers must not pass it.
    pub fn invert(&self) -> Scalar {
        let l_minus_2 = {
            let mut b = L_BYTES;
            b[0] -= 2;
            Scalar(bytes_to_limbs4(&b))
        };
        self.pow(&l_minus_2)
    }

    fn pow(&self, exp: &Scalar) -> Scalar {
        let mut result = Scalar::ONE;
        let mut base = *self;
        for limb in 0..4 {
            for bit in 0..64 {
                if (exp.0[limb] >> bit) & 1 == 1 {
                    result = result.mul(&base);
                }
                base = base.mul(&base);
            }
        }
        result
    }

    /// Montgomery's batch-inversion trick: replaces every element of
    /// `scalars` with its own inverse and returns the inverse of their
    /// product. Panics-free: the caller is responsible for excluding zero
    /// scalars, same as [`Scalar::invert`].
    #[cfg(feature = "alloc")]
    pub fn batch_invert(scalars: &mut [Scalar]) -> Scalar {
        use alloc::vec::Vec;

        let n = scalars.len();
        let mut prefix: Vec<Scalar> = Vec::with_capacity(n);
        let mut acc = Scalar::ONE;
        for s in scalars.iter() {
            prefix.push(acc);
            acc = acc.mul(s);
        }
        let mut inv_acc = acc.invert();
        let product_inv = inv_acc;
        for i in (0..n).rev() {
            let tmp = inv_acc.mul(&scalars[i]);
            scalars[i] = inv_acc.mul(&prefix[i]);
            inv_acc = tmp;
        }
        product_inv
    }

    /// Raw little-endian 64-bit limbs, for callers (the NAF/windowed-table
    /// code) that need to scan individual bits.
    pub(crate) fn limbs(&self) -> [u64; 4] {
        self.0
    }

    pub fn conditional_select(a: &Scalar, b: &Scalar, choice: Choice) -> Scalar {
        let mut out = [0u64; 4];
        for i in 0..4 {
            out[i] = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Scalar(out)
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}
impl Eq for Scalar {}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}
