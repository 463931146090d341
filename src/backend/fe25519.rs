use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Element of GF(2^255 - 19), in the ref10 representation.
///
/// The value is `t[0] + 2^26*t[1] + 2^51*t[2] + 2^77*t[3] + 2^102*t[4]
/// + ... + 2^230*t[9]`, i.e. ten signed limbs alternating between 26 and
/// 25 bits (radix 2^25.5). After a multiplication, squaring or decoding,
/// limbs are bounded by about 1.01*2^25 (odd indices: 1.01*2^24) in
/// absolute value. Additions and subtractions do not propagate carries;
/// their outputs must go through a multiplication, squaring or encoding
/// before being added again.
#[derive(Clone, Copy, Debug)]
pub struct FieldElement(pub(crate) [i32; 10]);

#[inline(always)]
fn load3(b: &[u8]) -> i64 {
    (b[0] as i64) | ((b[1] as i64) << 8) | ((b[2] as i64) << 16)
}

#[inline(always)]
fn load4(b: &[u8]) -> i64 {
    (b[0] as i64) | ((b[1] as i64) << 8)
        | ((b[2] as i64) << 16) | ((b[3] as i64) << 24)
}

impl FieldElement {

    pub const ZERO: Self = Self([ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0 ]);
    pub const ONE: Self = Self([ 1, 0, 0, 0, 0, 0, 0, 0, 0, 0 ]);

    /// Creates an element from raw limbs (no normalization).
    pub const fn from_limbs(t: [i32; 10]) -> Self {
        Self(t)
    }

    /// Decodes 32 bytes (unsigned little-endian) into a field element.
    ///
    /// The top bit of the last byte is ignored. Values in the p to
    /// 2^255-1 range are accepted and implicitly reduced; this function
    /// never fails.
    pub fn from_bytes(s: &[u8; 32]) -> Self {
        let h0 = load4(&s[0..]);
        let h1 = load3(&s[4..]) << 6;
        let h2 = load3(&s[7..]) << 5;
        let h3 = load3(&s[10..]) << 3;
        let h4 = load3(&s[13..]) << 2;
        let h5 = load4(&s[16..]);
        let h6 = load3(&s[20..]) << 7;
        let h7 = load3(&s[23..]) << 5;
        let h8 = load3(&s[26..]) << 4;
        let h9 = (load3(&s[29..]) & 0x7FFFFF) << 2;
        Self::combine([ h0, h1, h2, h3, h4, h5, h6, h7, h8, h9 ])
    }

    /// Encodes this element into 32 bytes (unsigned little-endian).
    ///
    /// The encoding is canonical: the encoded integer is always in the
    /// 0 to p-1 range.
    pub fn to_bytes(&self) -> [u8; 32] {
        // Outputs of add()/sub() are not carried; normalize first so that
        // the limbs are within the bounds expected by the q computation.
        let mut w = [0i64; 10];
        for i in 0..10 {
            w[i] = self.0[i] as i64;
        }
        let t = Self::combine(w);
        let mut h = [0i64; 10];
        for i in 0..10 {
            h[i] = t.0[i] as i64;
        }

        // Compute q = floor(h / p), which is 0 or 1 for bounded inputs.
        let mut q = (19 * h[9] + (1 << 24)) >> 25;
        q = (h[0] + q) >> 26;
        q = (h[1] + q) >> 25;
        q = (h[2] + q) >> 26;
        q = (h[3] + q) >> 25;
        q = (h[4] + q) >> 26;
        q = (h[5] + q) >> 25;
        q = (h[6] + q) >> 26;
        q = (h[7] + q) >> 25;
        q = (h[8] + q) >> 26;
        q = (h[9] + q) >> 25;

        // h - q*p = h + 19*q - q*2^255; the 2^255 part is dropped by
        // the final carry out of h[9].
        h[0] += 19 * q;
        for i in 0..9 {
            let w = if (i & 1) == 0 { 26 } else { 25 };
            let c = h[i] >> w;
            h[i + 1] += c;
            h[i] -= c << w;
        }
        let c = h[9] >> 25;
        h[9] -= c << 25;

        let mut s = [0u8; 32];
        s[0] = h[0] as u8;
        s[1] = (h[0] >> 8) as u8;
        s[2] = (h[0] >> 16) as u8;
        s[3] = ((h[0] >> 24) | (h[1] << 2)) as u8;
        s[4] = (h[1] >> 6) as u8;
        s[5] = (h[1] >> 14) as u8;
        s[6] = ((h[1] >> 22) | (h[2] << 3)) as u8;
        s[7] = (h[2] >> 5) as u8;
        s[8] = (h[2] >> 13) as u8;
        s[9] = ((h[2] >> 21) | (h[3] << 5)) as u8;
        s[10] = (h[3] >> 3) as u8;
        s[11] = (h[3] >> 11) as u8;
        s[12] = ((h[3] >> 19) | (h[4] << 6)) as u8;
        s[13] = (h[4] >> 2) as u8;
        s[14] = (h[4] >> 10) as u8;
        s[15] = (h[4] >> 18) as u8;
        s[16] = h[5] as u8;
        s[17] = (h[5] >> 8) as u8;
        s[18] = (h[5] >> 16) as u8;
        s[19] = ((h[5] >> 24) | (h[6] << 1)) as u8;
        s[20] = (h[6] >> 7) as u8;
        s[21] = (h[6] >> 15) as u8;
        s[22] = ((h[6] >> 23) | (h[7] << 3)) as u8;
        s[23] = (h[7] >> 5) as u8;
        s[24] = (h[7] >> 13) as u8;
        s[25] = ((h[7] >> 21) | (h[8] << 4)) as u8;
        s[26] = (h[8] >> 4) as u8;
        s[27] = (h[8] >> 12) as u8;
        s[28] = ((h[8] >> 20) | (h[9] << 6)) as u8;
        s[29] = (h[9] >> 2) as u8;
        s[30] = (h[9] >> 10) as u8;
        s[31] = (h[9] >> 18) as u8;
        s
    }

    /// Carry propagation from ten wide limbs back to the nominal bounds.
    ///
    /// The step order (0, 4, 1, 5, 2, 6, 3, 7, 4, 8, 9, 0) interleaves
    /// two chains so that every intermediate fits in 64 bits for the
    /// outputs of mul() and square(); the carry out of limb 9 is folded
    /// into limb 0 with a factor 19, since 2^255 = 19 mod p.
    #[inline(always)]
    fn combine(h: [i64; 10]) -> Self {
        let [mut h0, mut h1, mut h2, mut h3, mut h4,
             mut h5, mut h6, mut h7, mut h8, mut h9] = h;

        let c0 = (h0 + (1 << 25)) >> 26;
        h1 += c0;
        h0 -= c0 << 26;
        let c4 = (h4 + (1 << 25)) >> 26;
        h5 += c4;
        h4 -= c4 << 26;
        // |h0| <= 2^25, |h4| <= 2^25

        let c1 = (h1 + (1 << 24)) >> 25;
        h2 += c1;
        h1 -= c1 << 25;
        let c5 = (h5 + (1 << 24)) >> 25;
        h6 += c5;
        h5 -= c5 << 25;
        // |h1| <= 2^24, |h5| <= 2^24

        let c2 = (h2 + (1 << 25)) >> 26;
        h3 += c2;
        h2 -= c2 << 26;
        let c6 = (h6 + (1 << 25)) >> 26;
        h7 += c6;
        h6 -= c6 << 26;

        let c3 = (h3 + (1 << 24)) >> 25;
        h4 += c3;
        h3 -= c3 << 25;
        let c7 = (h7 + (1 << 24)) >> 25;
        h8 += c7;
        h7 -= c7 << 25;

        let c4 = (h4 + (1 << 25)) >> 26;
        h5 += c4;
        h4 -= c4 << 26;
        let c8 = (h8 + (1 << 25)) >> 26;
        h9 += c8;
        h8 -= c8 << 26;

        let c9 = (h9 + (1 << 24)) >> 25;
        h0 += c9 * 19;
        h9 -= c9 << 25;

        let c0 = (h0 + (1 << 25)) >> 26;
        h1 += c0;
        h0 -= c0 << 26;

        Self([
            h0 as i32, h1 as i32, h2 as i32, h3 as i32, h4 as i32,
            h5 as i32, h6 as i32, h7 as i32, h8 as i32, h9 as i32,
        ])
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        for i in 0..10 {
            self.0[i] += rhs.0[i];
        }
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        for i in 0..10 {
            self.0[i] -= rhs.0[i];
        }
    }

    /// Negates this element (in place). Limbs are negated, no carry.
    #[inline]
    pub fn set_neg(&mut self) {
        for i in 0..10 {
            self.0[i] = -self.0[i];
        }
    }

    fn set_mul(&mut self, rhs: &Self) {
        let f = &self.0;
        let g = &rhs.0;

        let f0 = f[0] as i64;
        let f1 = f[1] as i64;
        let f2 = f[2] as i64;
        let f3 = f[3] as i64;
        let f4 = f[4] as i64;
        let f5 = f[5] as i64;
        let f6 = f[6] as i64;
        let f7 = f[7] as i64;
        let f8 = f[8] as i64;
        let f9 = f[9] as i64;

        // Odd limbs of f are counted twice when multiplied by odd limbs
        // of g, since 2^25.5 * 2^25.5 = 2 * 2^51.
        let f1_2 = 2 * f1;
        let f3_2 = 2 * f3;
        let f5_2 = 2 * f5;
        let f7_2 = 2 * f7;
        let f9_2 = 2 * f9;

        let g0 = g[0] as i64;
        let g1 = g[1] as i64;
        let g2 = g[2] as i64;
        let g3 = g[3] as i64;
        let g4 = g[4] as i64;
        let g5 = g[5] as i64;
        let g6 = g[6] as i64;
        let g7 = g[7] as i64;
        let g8 = g[8] as i64;
        let g9 = g[9] as i64;

        // Terms that wrap past 2^255 are folded back with a factor 19.
        let g1_19 = 19 * g1;  // 1.4*2^29
        let g2_19 = 19 * g2;  // 1.4*2^30; still ok
        let g3_19 = 19 * g3;
        let g4_19 = 19 * g4;
        let g5_19 = 19 * g5;
        let g6_19 = 19 * g6;
        let g7_19 = 19 * g7;
        let g8_19 = 19 * g8;
        let g9_19 = 19 * g9;

        let h0 = f0 * g0 + f1_2 * g9_19 + f2 * g8_19 + f3_2 * g7_19
            + f4 * g6_19 + f5_2 * g5_19 + f6 * g4_19 + f7_2 * g3_19
            + f8 * g2_19 + f9_2 * g1_19;
        let h1 = f0 * g1 + f1 * g0 + f2 * g9_19 + f3 * g8_19
            + f4 * g7_19 + f5 * g6_19 + f6 * g5_19 + f7 * g4_19
            + f8 * g3_19 + f9 * g2_19;
        let h2 = f0 * g2 + f1_2 * g1 + f2 * g0 + f3_2 * g9_19
            + f4 * g8_19 + f5_2 * g7_19 + f6 * g6_19 + f7_2 * g5_19
            + f8 * g4_19 + f9_2 * g3_19;
        let h3 = f0 * g3 + f1 * g2 + f2 * g1 + f3 * g0
            + f4 * g9_19 + f5 * g8_19 + f6 * g7_19 + f7 * g6_19
            + f8 * g5_19 + f9 * g4_19;
        let h4 = f0 * g4 + f1_2 * g3 + f2 * g2 + f3_2 * g1
            + f4 * g0 + f5_2 * g9_19 + f6 * g8_19 + f7_2 * g7_19
            + f8 * g6_19 + f9_2 * g5_19;
        let h5 = f0 * g5 + f1 * g4 + f2 * g3 + f3 * g2
            + f4 * g1 + f5 * g0 + f6 * g9_19 + f7 * g8_19
            + f8 * g7_19 + f9 * g6_19;
        let h6 = f0 * g6 + f1_2 * g5 + f2 * g4 + f3_2 * g3
            + f4 * g2 + f5_2 * g1 + f6 * g0 + f7_2 * g9_19
            + f8 * g8_19 + f9_2 * g7_19;
        let h7 = f0 * g7 + f1 * g6 + f2 * g5 + f3 * g4
            + f4 * g3 + f5 * g2 + f6 * g1 + f7 * g0
            + f8 * g9_19 + f9 * g8_19;
        let h8 = f0 * g8 + f1_2 * g7 + f2 * g6 + f3_2 * g5
            + f4 * g4 + f5_2 * g3 + f6 * g2 + f7_2 * g1
            + f8 * g0 + f9_2 * g9_19;
        let h9 = f0 * g9 + f1 * g8 + f2 * g7 + f3 * g6
            + f4 * g5 + f5 * g4 + f6 * g3 + f7 * g2
            + f8 * g1 + f9 * g0;

        *self = Self::combine([ h0, h1, h2, h3, h4, h5, h6, h7, h8, h9 ]);
    }

    /// Ten partial sums of f^2, before carry propagation.
    #[inline(always)]
    fn internal_square(&self) -> [i64; 10] {
        let f = &self.0;

        let f0 = f[0] as i64;
        let f1 = f[1] as i64;
        let f2 = f[2] as i64;
        let f3 = f[3] as i64;
        let f4 = f[4] as i64;
        let f5 = f[5] as i64;
        let f6 = f[6] as i64;
        let f7 = f[7] as i64;
        let f8 = f[8] as i64;
        let f9 = f[9] as i64;

        let f0_2 = 2 * f0;
        let f1_2 = 2 * f1;
        let f2_2 = 2 * f2;
        let f3_2 = 2 * f3;
        let f4_2 = 2 * f4;
        let f5_2 = 2 * f5;
        let f6_2 = 2 * f6;
        let f7_2 = 2 * f7;

        let f5_38 = 38 * f5;  // 1.31*2^30
        let f6_19 = 19 * f6;  // 1.31*2^30
        let f7_38 = 38 * f7;  // 1.31*2^30
        let f8_19 = 19 * f8;  // 1.31*2^30
        let f9_38 = 38 * f9;  // 1.31*2^30

        [
            f0 * f0 + f1_2 * f9_38 + f2_2 * f8_19 + f3_2 * f7_38
                + f4_2 * f6_19 + f5 * f5_38,
            f0_2 * f1 + f2 * f9_38 + f3_2 * f8_19 + f4 * f7_38
                + f5_2 * f6_19,
            f0_2 * f2 + f1_2 * f1 + f3_2 * f9_38 + f4_2 * f8_19
                + f5_2 * f7_38 + f6 * f6_19,
            f0_2 * f3 + f1_2 * f2 + f4 * f9_38 + f5_2 * f8_19
                + f6 * f7_38,
            f0_2 * f4 + f1_2 * f3_2 + f2 * f2 + f5_2 * f9_38
                + f6_2 * f8_19 + f7 * f7_38,
            f0_2 * f5 + f1_2 * f4 + f2_2 * f3 + f6 * f9_38
                + f7_2 * f8_19,
            f0_2 * f6 + f1_2 * f5_2 + f2_2 * f4 + f3_2 * f3
                + f7_2 * f9_38 + f8 * f8_19,
            f0_2 * f7 + f1_2 * f6 + f2_2 * f5 + f3_2 * f4
                + f8 * f9_38,
            f0_2 * f8 + f1_2 * f7_2 + f2_2 * f6 + f3_2 * f5_2
                + f4 * f4 + f9 * f9_38,
            f0_2 * f9 + f1_2 * f8 + f2_2 * f7 + f3_2 * f6
                + f4_2 * f5,
        ]
    }

    /// Squares this element (in place).
    #[inline]
    pub fn set_square(&mut self) {
        *self = Self::combine(self.internal_square());
    }

    /// Returns the square of this element.
    #[inline(always)]
    pub fn square(self) -> Self {
        Self::combine(self.internal_square())
    }

    /// Returns twice the square of this element.
    #[inline]
    pub fn square2(self) -> Self {
        let mut h = self.internal_square();
        for i in 0..10 {
            h[i] += h[i];
        }
        Self::combine(h)
    }

    /// Squares this element `n` times (in place).
    #[inline]
    pub fn set_xsquare(&mut self, n: u32) {
        for _ in 0..n {
            self.set_square();
        }
    }

    /// Returns this element multiplied by 121666 = (486662 + 2) / 4.
    ///
    /// This is the constant of the Montgomery ladder doubling formulas.
    pub fn mul121666(self) -> Self {
        let mut h = [0i64; 10];
        for i in 0..10 {
            h[i] = (self.0[i] as i64) * 121666;
        }
        Self::combine(h)
    }

    /// Returns the inverse of this element, computed as z^(p-2).
    ///
    /// If this element is zero, then zero is returned. The addition
    /// chain uses 254 squarings and 11 multiplications.
    pub fn invert(self) -> Self {
        let z = self;

        let mut t0 = z.square();                       // 2^1
        let mut t1 = t0.square().square();             // 2^3
        t1 = z * t1;                                   // 2^3 + 2^0
        t0 = t0 * t1;                                  // 2^3 + 2^1 + 2^0
        let mut t2 = t0.square();                      // 2^4 + 2^2 + 2^1
        t1 = t1 * t2;                                  // 2^5 - 2^0
        t2 = t1;
        t2.set_xsquare(5);                             // 2^10 - 2^5
        t1 = t2 * t1;                                  // 2^10 - 2^0
        t2 = t1;
        t2.set_xsquare(10);                            // 2^20 - 2^10
        t2 = t2 * t1;                                  // 2^20 - 2^0
        let mut t3 = t2;
        t3.set_xsquare(20);                            // 2^40 - 2^20
        t2 = t3 * t2;                                  // 2^40 - 2^0
        t2.set_xsquare(10);                            // 2^50 - 2^10
        t1 = t2 * t1;                                  // 2^50 - 2^0
        t2 = t1;
        t2.set_xsquare(50);                            // 2^100 - 2^50
        t2 = t2 * t1;                                  // 2^100 - 2^0
        t3 = t2;
        t3.set_xsquare(100);                           // 2^200 - 2^100
        t2 = t3 * t2;                                  // 2^200 - 2^0
        t2.set_xsquare(50);                            // 2^250 - 2^50
        t1 = t2 * t1;                                  // 2^250 - 2^0
        t1.set_xsquare(5);                             // 2^255 - 2^5
        t1 * t0                                        // 2^255 - 21
    }

    /// Returns z^((p-5)/8) = z^(2^252 - 3), with z being this element.
    ///
    /// This is the exponentiation used for square root extraction in
    /// point decompression.
    pub fn pow22523(self) -> Self {
        let z = self;

        let mut t0 = z.square();                       // 2^1
        let mut t1 = t0.square().square();             // 2^3
        t1 = z * t1;                                   // 2^3 + 2^0
        t0 = t0 * t1;                                  // 2^3 + 2^1 + 2^0
        t0.set_square();                               // 2^4 + 2^2 + 2^1
        t0 = t1 * t0;                                  // 2^5 - 2^0
        t1 = t0;
        t1.set_xsquare(5);                             // 2^10 - 2^5
        t0 = t1 * t0;                                  // 2^10 - 2^0
        t1 = t0;
        t1.set_xsquare(10);                            // 2^20 - 2^10
        t1 = t1 * t0;                                  // 2^20 - 2^0
        let mut t2 = t1;
        t2.set_xsquare(20);                            // 2^40 - 2^20
        t1 = t2 * t1;                                  // 2^40 - 2^0
        t1.set_xsquare(10);                            // 2^50 - 2^10
        t0 = t1 * t0;                                  // 2^50 - 2^0
        t1 = t0;
        t1.set_xsquare(50);                            // 2^100 - 2^50
        t1 = t1 * t0;                                  // 2^100 - 2^0
        t2 = t1;
        t2.set_xsquare(100);                           // 2^200 - 2^100
        t1 = t2 * t1;                                  // 2^200 - 2^0
        t1.set_xsquare(50);                            // 2^250 - 2^50
        t0 = t1 * t0;                                  // 2^250 - 2^0
        t0.set_xsquare(2);                             // 2^252 - 2^2
        t0 * z                                         // 2^252 - 3
    }

    /// Returns 1 if the canonical encoding of this element is odd,
    /// 0 otherwise.
    #[inline]
    pub fn is_negative(&self) -> u32 {
        (self.to_bytes()[0] & 1) as u32
    }

    /// Returns 1 if this element is not zero, 0 if it is zero
    /// (constant-time).
    #[inline]
    pub fn is_nonzero(&self) -> u32 {
        let s = self.to_bytes();
        let mut x = 0u32;
        for i in 0..32 {
            x |= s[i] as u32;
        }
        x.wrapping_neg() >> 31
    }

    /// Sets this element to the value of `g` if `ctl` is 0xFFFFFFFF,
    /// or leaves it unchanged if `ctl` is 0x00000000. No other value of
    /// `ctl` is allowed. Only bitwise operations are used.
    #[inline]
    pub fn set_cond(&mut self, g: &Self, ctl: u32) {
        let m = ctl as i32;
        for i in 0..10 {
            self.0[i] ^= m & (self.0[i] ^ g.0[i]);
        }
    }

    /// Returns a copy of `a0` (if `ctl` = 0x00000000) or `a1`
    /// (if `ctl` = 0xFFFFFFFF).
    #[inline(always)]
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    /// Exchanges `a` and `b` if `ctl` = 0xFFFFFFFF; leaves them
    /// unchanged if `ctl` = 0x00000000.
    #[inline]
    pub fn cswap(a: &mut Self, b: &mut Self, ctl: u32) {
        let m = ctl as i32;
        for i in 0..10 {
            let t = m & (a.0[i] ^ b.0[i]);
            a.0[i] ^= t;
            b.0[i] ^= t;
        }
    }

    /// Compares two elements (constant-time). Returned value is
    /// 0xFFFFFFFF on equality, 0x00000000 otherwise.
    #[inline]
    pub fn equals(&self, rhs: &Self) -> u32 {
        (*self - *rhs).is_nonzero().wrapping_sub(1)
    }
}

impl Add<FieldElement> for FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn add(self, other: FieldElement) -> FieldElement {
        let mut r = self;
        r.set_add(&other);
        r
    }
}

impl Add<&FieldElement> for FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn add(self, other: &FieldElement) -> FieldElement {
        let mut r = self;
        r.set_add(other);
        r
    }
}

impl Add<FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn add(self, other: FieldElement) -> FieldElement {
        let mut r = *self;
        r.set_add(&other);
        r
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn add(self, other: &FieldElement) -> FieldElement {
        let mut r = *self;
        r.set_add(other);
        r
    }
}

impl AddAssign<FieldElement> for FieldElement {
    #[inline(always)]
    fn add_assign(&mut self, other: FieldElement) {
        self.set_add(&other);
    }
}

impl AddAssign<&FieldElement> for FieldElement {
    #[inline(always)]
    fn add_assign(&mut self, other: &FieldElement) {
        self.set_add(other);
    }
}

impl Mul<FieldElement> for FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn mul(self, other: FieldElement) -> FieldElement {
        let mut r = self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&FieldElement> for FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn mul(self, other: &FieldElement) -> FieldElement {
        let mut r = self;
        r.set_mul(other);
        r
    }
}

impl Mul<FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn mul(self, other: FieldElement) -> FieldElement {
        let mut r = *self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn mul(self, other: &FieldElement) -> FieldElement {
        let mut r = *self;
        r.set_mul(other);
        r
    }
}

impl MulAssign<FieldElement> for FieldElement {
    #[inline(always)]
    fn mul_assign(&mut self, other: FieldElement) {
        self.set_mul(&other);
    }
}

impl MulAssign<&FieldElement> for FieldElement {
    #[inline(always)]
    fn mul_assign(&mut self, other: &FieldElement) {
        self.set_mul(other);
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn neg(self) -> FieldElement {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn neg(self) -> FieldElement {
        let mut r = *self;
        r.set_neg();
        r
    }
}

impl Sub<FieldElement> for FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn sub(self, other: FieldElement) -> FieldElement {
        let mut r = self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&FieldElement> for FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn sub(self, other: &FieldElement) -> FieldElement {
        let mut r = self;
        r.set_sub(other);
        r
    }
}

impl Sub<FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn sub(self, other: FieldElement) -> FieldElement {
        let mut r = *self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn sub(self, other: &FieldElement) -> FieldElement {
        let mut r = *self;
        r.set_sub(other);
        r
    }
}

impl SubAssign<FieldElement> for FieldElement {
    #[inline(always)]
    fn sub_assign(&mut self, other: FieldElement) {
        self.set_sub(&other);
    }
}

impl SubAssign<&FieldElement> for FieldElement {
    #[inline(always)]
    fn sub_assign(&mut self, other: &FieldElement) {
        self.set_sub(other);
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::FieldElement;
    use crate::field::MODULUS;
    use num_bigint::{BigInt, Sign};
    use sha2::{Sha256, Digest};

    fn modulus() -> BigInt {
        BigInt::from_bytes_le(Sign::Plus, &MODULUS)
    }

    fn to_big(x: &FieldElement) -> BigInt {
        BigInt::from_bytes_le(Sign::Plus, &x.to_bytes())
    }

    // va and vb must be 32 bytes each in length
    fn check_fe_ops(va: &[u8; 32], vb: &[u8; 32]) {
        let zp = modulus();
        let zp4 = &zp << 2;

        let a = FieldElement::from_bytes(va);
        let b = FieldElement::from_bytes(vb);
        let mut ma = *va;
        ma[31] &= 0x7F;
        let mut mb = *vb;
        mb[31] &= 0x7F;
        let za = BigInt::from_bytes_le(Sign::Plus, &ma);
        let zb = BigInt::from_bytes_le(Sign::Plus, &mb);

        assert!(to_big(&a) == &za % &zp);
        assert!(to_big(&b) == &zb % &zp);

        let c = a + b;
        assert!(to_big(&c) == (&za + &zb) % &zp);
        assert!(to_big(&(b + a)) == to_big(&c));

        let c = a - b;
        assert!(to_big(&c) == ((&zp4 + &za) - &zb) % &zp);

        let c = -a;
        assert!(to_big(&c) == (&zp4 - &za) % &zp);

        let c = a * b;
        assert!(to_big(&c) == (&za * &zb) % &zp);

        let c = a.square();
        assert!(to_big(&c) == (&za * &za) % &zp);

        let c = a.square2();
        assert!(to_big(&c) == ((&za * &za) << 1) % &zp);

        let c = a.mul121666();
        assert!(to_big(&c) == (&za * 121666u32) % &zp);

        // Results of sums are not carried; they must still multiply
        // and encode properly.
        let c = (a + b) * (a - b);
        let zd = ((&za + &zb) * ((&zp4 + &za) - &zb)) % &zp;
        assert!(to_big(&c) == zd);

        let c = a.invert();
        if (&za % &zp).sign() == Sign::NoSign {
            assert!(c.is_nonzero() == 0);
        } else {
            assert!(to_big(&(a * c)) == BigInt::from(1u32));
        }

        let e = a.pow22523();
        let exp = (&zp - BigInt::from(5u32)) >> 3;
        assert!(to_big(&e) == za.modpow(&exp, &zp));

        assert!(a.is_negative() == (a.to_bytes()[0] & 1) as u32);
        assert!(FieldElement::from_bytes(&a.to_bytes()).to_bytes() == a.to_bytes());
    }

    #[test]
    fn fe_ops() {
        let mut va = [0u8; 32];
        let mut vb = [0u8; 32];
        check_fe_ops(&va, &vb);
        for i in 0..32 {
            va[i] = 0xFF;
            vb[i] = 0xFF;
        }
        check_fe_ops(&va, &vb);

        let mut sh = Sha256::new();
        for i in 0..300 {
            sh.update(((2 * i + 0) as u64).to_le_bytes());
            let v1 = sh.finalize_reset();
            sh.update(((2 * i + 1) as u64).to_le_bytes());
            let v2 = sh.finalize_reset();
            va.copy_from_slice(&v1);
            vb.copy_from_slice(&v2);
            check_fe_ops(&va, &vb);
        }
    }

    #[test]
    fn fe_laws() {
        let mut sh = Sha256::new();
        for i in 0..100 {
            sh.update(((3 * i + 0) as u64).to_le_bytes());
            let mut v1 = [0u8; 32];
            v1.copy_from_slice(&sh.finalize_reset());
            sh.update(((3 * i + 1) as u64).to_le_bytes());
            let mut v2 = [0u8; 32];
            v2.copy_from_slice(&sh.finalize_reset());
            sh.update(((3 * i + 2) as u64).to_le_bytes());
            let mut v3 = [0u8; 32];
            v3.copy_from_slice(&sh.finalize_reset());
            let a = FieldElement::from_bytes(&v1);
            let b = FieldElement::from_bytes(&v2);
            let c = FieldElement::from_bytes(&v3);

            assert!((a + b).to_bytes() == (b + a).to_bytes());
            assert!(((a + b) + c).to_bytes() == (a + (b + c)).to_bytes());
            assert!((a * b).to_bytes() == (b * a).to_bytes());
            assert!(((a * b) * c).to_bytes() == (a * (b * c)).to_bytes());
            assert!((a * (b + c)).to_bytes() == (a * b + a * c).to_bytes());
            assert!((a * a.invert()).to_bytes() == FieldElement::ONE.to_bytes());
            assert!(a.equals(&(a + b - b)) == 0xFFFFFFFF);
            assert!(a.equals(&b) == 0);
        }
    }

    #[test]
    fn fe_non_canonical() {
        // p, p+1 and 2^255-1 decode to 0, 1 and 18.
        let mut p = [0xFFu8; 32];
        p[0] = 0xED;
        p[31] = 0x7F;
        let x = FieldElement::from_bytes(&p);
        assert!(x.is_nonzero() == 0);
        assert!(x.to_bytes() == [0u8; 32]);

        p[0] = 0xEE;
        let x = FieldElement::from_bytes(&p);
        assert!(x.to_bytes() == FieldElement::ONE.to_bytes());

        let m = [0xFFu8; 32];
        let x = FieldElement::from_bytes(&m);
        let mut e = [0u8; 32];
        e[0] = 18;
        assert!(x.to_bytes() == e);
    }

    #[test]
    fn fe_cond() {
        let a = FieldElement::from_bytes(&[0x11u8; 32]);
        let b = FieldElement::from_bytes(&[0x22u8; 32]);
        let mut c = a;
        c.set_cond(&b, 0);
        assert!(c.to_bytes() == a.to_bytes());
        c.set_cond(&b, 0xFFFFFFFF);
        assert!(c.to_bytes() == b.to_bytes());
        assert!(FieldElement::select(&a, &b, 0).to_bytes() == a.to_bytes());
        assert!(FieldElement::select(&a, &b, 0xFFFFFFFF).to_bytes() == b.to_bytes());

        let mut x = a;
        let mut y = b;
        FieldElement::cswap(&mut x, &mut y, 0);
        assert!(x.to_bytes() == a.to_bytes() && y.to_bytes() == b.to_bytes());
        FieldElement::cswap(&mut x, &mut y, 0xFFFFFFFF);
        assert!(x.to_bytes() == b.to_bytes() && y.to_bytes() == a.to_bytes());
    }
}
