//! Arithmetic modulo the prime order l of the Edwards25519 subgroup.
//!
//! Scalars are exchanged as little-endian byte buffers. Internally,
//! values are split into signed 21-bit limbs held in `i64`, so that
//! products and folded reductions never overflow: 2^252 = -c (mod l)
//! with c = 27742317777372353535851937790883648493, and each limb of
//! weight 2^252 or more is folded back through the 21-bit limbs of -c
//! (666643, 470296, 654183, -997805, 136657, -683901).
//!
//! All functions are constant-time.

/// Group order l, as four 64-bit limbs (little-endian order).
const ORDER: [u64; 4] = [
    0x5812631A5CF5D3ED,
    0x14DEF9DEA2F79CD6,
    0x0000000000000000,
    0x1000000000000000,
];

const MASK21: i64 = (1 << 21) - 1;

/// Splits `src` into 21-bit limbs; the last limb receives all remaining
/// high bits.
#[inline]
fn decode_limbs<const N: usize>(src: &[u8]) -> [i64; N] {
    let mut d = [0i64; N];
    for k in 0..N {
        let off = (21 * k) >> 3;
        let sh = (21 * k) & 7;
        let w = (src[off] as i64)
            | ((src[off + 1] as i64) << 8)
            | ((src[off + 2] as i64) << 16)
            | ((src[off + 3] as i64) << 24);
        d[k] = w >> sh;
        if k < N - 1 {
            d[k] &= MASK21;
        }
    }
    d
}

/// Signed carry with rounding: limb `i` is brought into [-2^20, 2^20].
#[inline(always)]
fn carry_round(s: &mut [i64; 24], i: usize) {
    let c = (s[i] + (1 << 20)) >> 21;
    s[i + 1] += c;
    s[i] -= c << 21;
}

/// Carry with truncation: limb `i` is brought into [0, 2^21).
#[inline(always)]
fn carry_floor(s: &mut [i64; 24], i: usize) {
    let c = s[i] >> 21;
    s[i + 1] += c;
    s[i] -= c << 21;
}

/// Folds limb `i` (weight 2^(21*i), with i >= 12) into limbs i-12 to i-7.
#[inline(always)]
fn fold(s: &mut [i64; 24], i: usize) {
    let x = s[i];
    s[i - 12] += x * 666643;
    s[i - 11] += x * 470296;
    s[i - 10] += x * 654183;
    s[i - 9] -= x * 997805;
    s[i - 8] += x * 136657;
    s[i - 7] -= x * 683901;
    s[i] = 0;
}

/// Reduces a 24-limb value (limbs roughly within 21 bits, top limb
/// possibly larger) modulo l, and encodes the result over 32 bytes.
fn reduce_limbs(mut s: [i64; 24]) -> [u8; 32] {
    for i in (18..24).rev() {
        fold(&mut s, i);
    }
    for i in (6..17).step_by(2) {
        carry_round(&mut s, i);
    }
    for i in (7..16).step_by(2) {
        carry_round(&mut s, i);
    }

    for i in (12..18).rev() {
        fold(&mut s, i);
    }
    for i in (0..11).step_by(2) {
        carry_round(&mut s, i);
    }
    for i in (1..12).step_by(2) {
        carry_round(&mut s, i);
    }

    // Limbs 0 to 11 are now balanced; one folded limb remains, and a
    // second fold absorbs the carry produced by normalizing the others.
    fold(&mut s, 12);
    for i in 0..12 {
        carry_floor(&mut s, i);
    }
    fold(&mut s, 12);
    for i in 0..11 {
        carry_floor(&mut s, i);
    }

    let mut d = [0u8; 32];
    let mut acc = 0u64;
    let mut acc_len = 0;
    let mut j = 0;
    for i in 0..12 {
        acc |= (s[i] as u64) << acc_len;
        acc_len += 21;
        while acc_len >= 8 {
            d[j] = acc as u8;
            j += 1;
            acc >>= 8;
            acc_len -= 8;
        }
    }
    d[31] = acc as u8;
    d
}

/// Reduces a 64-byte little-endian integer (typically a SHA-512 output)
/// modulo l. The result is canonical.
pub fn scalar_reduce(src: &[u8; 64]) -> [u8; 32] {
    reduce_limbs(decode_limbs::<24>(&src[..]))
}

/// Computes `(a*b + c) mod l`. Inputs are 32-byte little-endian integers
/// (they need not be reduced, but must be lower than 2^256); the result
/// is canonical.
pub fn scalar_mul_add(a: &[u8; 32], b: &[u8; 32], c: &[u8; 32]) -> [u8; 32] {
    let a = decode_limbs::<12>(&a[..]);
    let b = decode_limbs::<12>(&b[..]);
    let c = decode_limbs::<12>(&c[..]);

    let mut s = [0i64; 24];
    s[..12].copy_from_slice(&c);
    for i in 0..12 {
        for j in 0..12 {
            s[i + j] += a[i] * b[j];
        }
    }

    // Schoolbook output limbs reach about 2^46; bring them back to 21
    // bits before folding.
    for i in (0..23).step_by(2) {
        carry_round(&mut s, i);
    }
    for i in (1..22).step_by(2) {
        carry_round(&mut s, i);
    }
    reduce_limbs(s)
}

/// Returns true if `s` (32 bytes, little-endian) is lower than l, i.e.
/// if it is the canonical encoding of a scalar.
///
/// This is constant-time; the comparison runs over all four words.
pub fn scalar_minimal(s: &[u8; 32]) -> bool {
    // Compare from the most significant word down. `lt` and `gt` record
    // whether the value is already known to be lower or greater.
    let mut lt = 0u64;
    let mut gt = 0u64;
    for i in (0..4).rev() {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&s[8 * i..8 * i + 8]);
        let w = u64::from_le_bytes(buf);
        let (_, bl) = w.overflowing_sub(ORDER[i]);
        let (_, bg) = ORDER[i].overflowing_sub(w);
        let done = lt | gt;
        lt |= (bl as u64) & !done;
        gt |= (bg as u64) & !done;
    }
    lt != 0
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use num_bigint::{BigInt, Sign};
    use sha2::{Sha256, Sha512, Digest};

    fn order() -> BigInt {
        (BigInt::from(1u32) << 252)
            + BigInt::parse_bytes(b"27742317777372353535851937790883648493", 10).unwrap()
    }

    fn to_big(x: &[u8]) -> BigInt {
        BigInt::from_bytes_le(Sign::Plus, x)
    }

    fn order_bytes() -> [u8; 32] {
        let mut d = [0u8; 32];
        for i in 0..4 {
            d[8 * i..8 * i + 8].copy_from_slice(&ORDER[i].to_le_bytes());
        }
        d
    }

    #[test]
    fn order_constant() {
        assert!(to_big(&order_bytes()) == order());
    }

    #[test]
    fn reduce() {
        let zl = order();
        let mut sh = Sha512::new();
        for i in 0..300 {
            sh.update((i as u64).to_le_bytes());
            let mut v = [0u8; 64];
            v.copy_from_slice(&sh.finalize_reset());
            let r = scalar_reduce(&v);
            assert!(to_big(&r) == to_big(&v) % &zl);
            assert!(scalar_minimal(&r));
        }

        let r = scalar_reduce(&[0xFFu8; 64]);
        assert!(to_big(&r) == to_big(&[0xFFu8; 64]) % &zl);
        assert!(scalar_reduce(&[0u8; 64]) == [0u8; 32]);

        let mut v = [0u8; 64];
        v[..32].copy_from_slice(&order_bytes());
        assert!(scalar_reduce(&v) == [0u8; 32]);
    }

    #[test]
    fn mul_add() {
        let zl = order();
        let mut sh = Sha256::new();
        for i in 0..300 {
            sh.update(((3 * i + 0) as u64).to_le_bytes());
            let mut a = [0u8; 32];
            a.copy_from_slice(&sh.finalize_reset());
            sh.update(((3 * i + 1) as u64).to_le_bytes());
            let mut b = [0u8; 32];
            b.copy_from_slice(&sh.finalize_reset());
            sh.update(((3 * i + 2) as u64).to_le_bytes());
            let mut c = [0u8; 32];
            c.copy_from_slice(&sh.finalize_reset());

            // Half of the inputs are partially reduced, as in signing.
            if (i & 1) == 0 {
                a[31] &= 0x0F;
                b[31] &= 0x0F;
                c[31] &= 0x0F;
            }
            let d = scalar_mul_add(&a, &b, &c);
            let zd = (to_big(&a) * to_big(&b) + to_big(&c)) % &zl;
            assert!(to_big(&d) == zd);
        }

        let m = [0xFFu8; 32];
        let d = scalar_mul_add(&m, &m, &m);
        let zm = to_big(&m);
        assert!(to_big(&d) == (&zm * &zm + &zm) % &zl);
    }

    #[test]
    fn minimal() {
        let zl = order();
        let l = order_bytes();
        assert!(!scalar_minimal(&l));
        assert!(scalar_minimal(&[0u8; 32]));
        assert!(!scalar_minimal(&[0xFFu8; 32]));

        let mut lm1 = l;
        lm1[0] -= 1;
        assert!(scalar_minimal(&lm1));
        let mut lp1 = l;
        lp1[0] += 1;
        assert!(!scalar_minimal(&lp1));

        // Same top word as l, lower middle words.
        let mut x = l;
        x[8] = 0;
        assert!(scalar_minimal(&x));
        // Top word just below l's.
        let mut x = [0xFFu8; 32];
        x[31] = 0x0F;
        assert!(scalar_minimal(&x));
        assert!(to_big(&x) < zl);
    }
}
