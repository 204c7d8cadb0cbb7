//! Generic little-endian bit-packing helpers shared by the non-reference
//! backends. Each backend defines its own limb widths; encoding/decoding is
//! just regrouping those bits, so one routine serves every width table.

/// Decode a 256-bit little-endian value into limbs of the given bit widths
/// (bit 255, the sign bit of the wire format, must already be cleared by the
/// caller).
pub fn bytes_to_limbs<const N: usize>(bytes: &[u8; 32], widths: &[u32; N]) -> [u64; N] {
    let mut words = [0u64; 4];
    for i in 0..4 {
        words[i] = u64::from_le_bytes(bytes[i * 8..i * 8 + 8].try_into().unwrap());
    }

    let mut limbs = [0u64; N];
    let mut bit_offset: u32 = 0;
    for (i, &w) in widths.iter().enumerate() {
        limbs[i] = read_bits(&words, bit_offset, w);
        bit_offset += w;
    }
    limbs
}

fn read_bits(words: &[u64; 4], bit_offset: u32, width: u32) -> u64 {
    let word_idx = (bit_offset / 64) as usize;
    let bit_in_word = bit_offset % 64;
    let lo = words[word_idx] >> bit_in_word;
    let hi = if bit_in_word == 0 || word_idx + 1 >= 4 {
        0
    } else {
        words[word_idx + 1] << (64 - bit_in_word)
    };
    let mask = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };
    (lo | hi) & mask
}

/// Encode limbs of the given bit widths back into a 256-bit little-endian
/// byte string. Limbs must already be carried to fit within their declared
/// width; the result is not reduced mod p.
pub fn limbs_to_bytes<const N: usize>(limbs: &[u64; N], widths: &[u32; N]) -> [u8; 32] {
    let mut acc = [0u64; 5];
    let mut bit_offset: u32 = 0;
    for (i, &w) in widths.iter().enumerate() {
        add_shifted(&mut acc, limbs[i], bit_offset);
        bit_offset += w;
    }

    let mut bytes = [0u8; 32];
    for i in 0..4 {
        bytes[i * 8..i * 8 + 8].copy_from_slice(&acc[i].to_le_bytes());
    }
    bytes
}

fn add_shifted(acc: &mut [u64; 5], value: u64, bit_offset: u32) {
    let word_idx = (bit_offset / 64) as usize;
    let bit_in_word = bit_offset % 64;
    let shifted = (value as u128) << bit_in_word;
    let lo = shifted as u64;
    let hi = (shifted >> 64) as u64;

    let (s0, c0) = acc[word_idx].overflowing_add(lo);
    acc[word_idx] = s0;
    let mut carry_in = c0 as u64;

    if word_idx + 1 < 5 {
        let (s1, c1) = acc[word_idx + 1].overflowing_add(hi);
        let (s1b, c1b) = s1.overflowing_add(carry_in);
        acc[word_idx + 1] = s1b;
        carry_in = c1 as u64 + c1b as u64;
    }
    if word_idx + 2 < 5 && carry_in > 0 {
        acc[word_idx + 2] = acc[word_idx + 2].wrapping_add(carry_in);
    }
}

/// Propagate carries through a limb array with the given bit widths, folding
/// the final overflow back into limb 0 via `2^255 = 19 (mod p)`.
pub fn carry_reduce<const N: usize>(limbs: &mut [u64; N], widths: &[u32; N]) {
    for _ in 0..2 {
        let mut carry: u128 = 0;
        for i in 0..N {
            let v = limbs[i] as u128 + carry;
            let mask = (1u128 << widths[i]) - 1;
            limbs[i] = (v & mask) as u64;
            carry = v >> widths[i];
        }
        limbs[0] = (limbs[0] as u128 + carry * 19) as u64;
    }
}

/// `K * p` expressed directly in the given mixed-radix limb widths. Derived
/// by the same telescoping construction `FieldElement51::sub`'s `SUB_BIAS`
/// uses, generalized to an arbitrary width table: writing `K*p` as
/// `K*2^255 - 19*K` and distributing the borrow so that
/// `digit[i] = K*2^widths[i] - K` for every limb but the lowest, which
/// absorbs the `-19*K` term. Each digit ends up deliberately larger than
/// `2^widths[i]` (non-canonical), so `digit[i] - x[i]` never borrows for any
/// already-carried `x`, while the weighted sum telescopes to exactly `K*p` —
/// congruent to zero mod p, so adding it before subtracting changes nothing
/// but the sign of the intermediate arithmetic.
pub fn sub_bias<const N: usize>(widths: &[u32; N], k: u64) -> [u64; N] {
    let mut out = [0u64; N];
    out[0] = (k << widths[0]) - 19 * k;
    for i in 1..N {
        out[i] = (k << widths[i]) - k;
    }
    out
}

const WIDE_WORDS: usize = 9;

/// Ripple-carry add `value << bit_offset` into a wide little-endian
/// accumulator, used by [`schoolbook_mul`] to sum every cross term of a
/// mixed-radix schoolbook multiplication before reducing mod p. `value` can
/// run past 64 bits (the 43-bit-limb backend's cross terms reach ~86 bits),
/// so it's split into two 64-bit halves added at `bit_offset` and
/// `bit_offset + 64` rather than shifted as a single `u128`, which would
/// silently drop bits once the shift pushed the value past bit 127.
fn add_shifted_wide(acc: &mut [u64; WIDE_WORDS], value: u128, bit_offset: u32) {
    let lo = value as u64;
    let hi = (value >> 64) as u64;
    add_u64_shifted(acc, lo, bit_offset);
    if hi != 0 {
        add_u64_shifted(acc, hi, bit_offset + 64);
    }
}

fn add_u64_shifted(acc: &mut [u64; WIDE_WORDS], value: u64, bit_offset: u32) {
    let word_idx = (bit_offset / 64) as usize;
    if word_idx >= WIDE_WORDS {
        return;
    }
    let bit_in_word = bit_offset % 64;
    let shifted = (value as u128) << bit_in_word;
    let lo = shifted as u64;
    let hi = (shifted >> 64) as u64;

    let mut carry = lo as u128;
    let mut idx = word_idx;
    let sum0 = acc[idx] as u128 + carry;
    acc[idx] = sum0 as u64;
    carry = sum0 >> 64;
    idx += 1;

    if idx < WIDE_WORDS {
        let sum1 = acc[idx] as u128 + hi as u128 + carry;
        acc[idx] = sum1 as u64;
        carry = sum1 >> 64;
        idx += 1;
    }

    while carry > 0 && idx < WIDE_WORDS {
        let sum = acc[idx] as u128 + carry;
        acc[idx] = sum as u64;
        carry = sum >> 64;
        idx += 1;
    }
}

/// Fold the high half of a wide accumulator back in using
/// `2^256 = 2 * 2^255 = 38 (mod p)`, shrinking the accumulator toward 256
/// bits. A schoolbook product of two 255-bit mixed-radix values needs a
/// handful of rounds to converge; this is cheap enough to just always run a
/// fixed number of them rather than detect convergence.
fn fold_high_bits(acc: &mut [u64; WIDE_WORDS]) {
    for _ in 0..4 {
        let mut high = [0u64; WIDE_WORDS - 4];
        let mut any = false;
        for i in 0..WIDE_WORDS - 4 {
            high[i] = acc[i + 4];
            any |= acc[i + 4] != 0;
            acc[i + 4] = 0;
        }
        if !any {
            break;
        }
        let mut carry: u128 = 0;
        for i in 0..WIDE_WORDS {
            let h = if i < WIDE_WORDS - 4 { high[i] as u128 } else { 0 };
            let sum = acc[i] as u128 + h * 38 + carry;
            acc[i] = sum as u64;
            carry = sum >> 64;
        }
        debug_assert_eq!(carry, 0, "schoolbook_mul accumulator headroom exceeded");
    }
}

/// Split a folded wide accumulator (already reduced to a few bits past the
/// 255-bit boundary by [`fold_high_bits`]) into limbs of the given widths.
/// Every limb but the last is masked to its declared width; the last limb
/// keeps whatever remains above it so the caller's `carry_reduce` can fold
/// that final overflow back via `2^255 = 19 (mod p)`, exactly as it already
/// does for any other oversized top limb.
fn decompose_wide<const N: usize>(acc: &[u64; WIDE_WORDS], widths: &[u32; N]) -> [u64; N] {
    let mut limbs = [0u64; N];
    let mut bit_offset: u32 = 0;
    for i in 0..N {
        let word_idx = (bit_offset / 64) as usize;
        let bit_in_word = bit_offset % 64;
        let lo = acc[word_idx] >> bit_in_word;
        let hi = if bit_in_word == 0 || word_idx + 1 >= WIDE_WORDS {
            0
        } else {
            acc[word_idx + 1] << (64 - bit_in_word)
        };
        let raw = lo | hi;
        limbs[i] = if i + 1 < N {
            let mask = if widths[i] == 64 { u64::MAX } else { (1u64 << widths[i]) - 1 };
            raw & mask
        } else {
            raw
        };
        bit_offset += widths[i];
    }
    limbs
}

/// Generic schoolbook multiply for a mixed-radix limb representation: forms
/// every cross term `a[i]*b[j]` weighted by its true bit position, then
/// reduces mod p via the `2^255 = 19` identity. Operates directly on the
/// caller's own limb widths rather than converting through another
/// backend's representation, so each backend using this gets a genuinely
/// independent multiplier in its own native radix.
pub fn schoolbook_mul<const N: usize>(a: &[u64; N], b: &[u64; N], widths: &[u32; N]) -> [u64; N] {
    let mut weight = [0u32; N];
    {
        let mut w = 0u32;
        for i in 0..N {
            weight[i] = w;
            w += widths[i];
        }
    }

    let mut acc = [0u64; WIDE_WORDS];
    for i in 0..N {
        for j in 0..N {
            let product = (a[i] as u128) * (b[j] as u128);
            add_shifted_wide(&mut acc, product, weight[i] + weight[j]);
        }
    }

    fold_high_bits(&mut acc);
    let mut limbs = decompose_wide(&acc, widths);
    carry_reduce(&mut limbs, widths);
    limbs
}
