use crate::backend::FieldElement;
use super::{CachedGroupElement, CompletedGroupElement, PreComputedGroupElement,
    ProjectiveGroupElement, D, D2, SQRT_M1};

/// A point in extended coordinates (X:Y:Z:T), with `X*Y = Z*T`.
#[derive(Clone, Copy, Debug)]
pub struct ExtendedGroupElement {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl ExtendedGroupElement {

    /// The neutral point (0, 1).
    pub const ZERO: Self = Self {
        X: FieldElement::ZERO,
        Y: FieldElement::ONE,
        Z: FieldElement::ONE,
        T: FieldElement::ZERO,
    };

    /// Decodes a point from its compressed form (y, and the sign of x
    /// in the top bit).
    ///
    /// Returns `None` if there is no curve point with that y coordinate.
    /// The y coordinate is NOT required to be canonical: values in the
    /// p to 2^255-1 range are reduced. A zero x with the sign bit set is
    /// also accepted. The returned point always has Z = 1.
    ///
    /// This function is not constant-time with regard to the decoding
    /// outcome (success or failure).
    pub fn from_bytes(s: &[u8; 32]) -> Option<Self> {
        let Y = FieldElement::from_bytes(s);
        let Z = FieldElement::ONE;

        // x^2 = u/v with u = y^2 - 1 and v = d*y^2 + 1.
        let yy = Y.square();
        let u = yy - Z;
        let v = yy * D + Z;

        // Candidate root: x = u*v^3 * (u*v^7)^((p-5)/8).
        let v3 = v.square() * v;
        let mut X = (v3.square() * v * u).pow22523();
        X = X * v3 * u;

        // v*x^2 is then u (root found), or -u (the root is x*sqrt(-1)),
        // or neither (y does not match a curve point).
        let vxx = X.square() * v;
        if (vxx - u).is_nonzero() != 0 {
            if (vxx + u).is_nonzero() != 0 {
                return None;
            }
            X = X * SQRT_M1;
        }

        if X.is_negative() != ((s[31] >> 7) as u32) {
            X.set_neg();
        }

        let T = X * Y;
        Some(Self { X, Y, Z, T })
    }

    /// Encodes this point into exactly 32 bytes.
    ///
    /// Encoding is always canonical.
    pub fn to_bytes(&self) -> [u8; 32] {
        let iZ = self.Z.invert();
        let x = self.X * iZ;
        let y = self.Y * iZ;
        let mut s = y.to_bytes();
        s[31] ^= (x.is_negative() << 7) as u8;
        s
    }

    /// Converts this point to cached coordinates.
    #[inline]
    pub fn to_cached(&self) -> CachedGroupElement {
        CachedGroupElement {
            y_plus_x: self.Y + self.X,
            y_minus_x: self.Y - self.X,
            Z: self.Z,
            T2d: self.T * D2,
        }
    }

    /// Converts this point to projective coordinates (T is dropped).
    #[inline(always)]
    pub fn to_projective(&self) -> ProjectiveGroupElement {
        ProjectiveGroupElement {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Returns the double of this point.
    #[inline]
    pub fn double(&self) -> CompletedGroupElement {
        self.to_projective().double()
    }

    /// Negates this point (in place).
    #[inline(always)]
    pub fn set_neg(&mut self) {
        self.X.set_neg();
        self.T.set_neg();
    }

    /// Returns `a*B`, with `B` the conventional base point.
    ///
    /// The scalar `a` is a 32-byte little-endian integer, which must be
    /// lower than 2^255 (i.e. `a[31] <= 127`). This function is
    /// constant-time.
    pub fn scalar_mult_base(a: &[u8; 32]) -> Self {
        // Signed radix-16 digits: a = sum(e[i]*16^i), with e[i] in
        // the -8 to +7 range (e[63] in 0 to +8).
        let mut e = [0i8; 64];
        for i in 0..32 {
            e[2 * i] = (a[i] & 15) as i8;
            e[2 * i + 1] = ((a[i] >> 4) & 15) as i8;
        }
        let mut carry = 0i8;
        for i in 0..63 {
            e[i] += carry;
            carry = (e[i] + 8) >> 4;
            e[i] -= carry << 4;
        }
        e[63] += carry;

        // Odd digits first: sum(e[2*i+1]*16*256^i*B), computed as
        // 16*sum(e[2*i+1]*256^i*B).
        let mut h = Self::ZERO;
        for i in (1..64).step_by(2) {
            let t = PreComputedGroupElement::select_point(i / 2, e[i]);
            h = CompletedGroupElement::mixed_add(&h, &t).to_extended();
        }

        let mut r = h.double();
        for _ in 0..3 {
            r = r.to_projective().double();
        }
        h = r.to_extended();

        for i in (0..64).step_by(2) {
            let t = PreComputedGroupElement::select_point(i / 2, e[i]);
            h = CompletedGroupElement::mixed_add(&h, &t).to_extended();
        }
        h
    }

    /// Returns 0xFFFFFFFF if this point and `q` differ by a point of
    /// order dividing 8, 0x00000000 otherwise.
    ///
    /// This computes `[8](P - Q)` with three doublings and checks that it
    /// is the neutral point (X = 0 and Y = Z).
    pub fn cofactor_equal(&self, q: &Self) -> u32 {
        let mut r = CompletedGroupElement::sub(self, &q.to_cached());
        for _ in 0..3 {
            r = r.to_projective().double();
        }
        let p = r.to_projective();
        let x_zero = p.X.is_nonzero().wrapping_sub(1);
        x_zero & p.Y.equals(&p.Z)
    }

    /// Applies the birational map to the Montgomery curve Curve25519,
    /// returning the u coordinate `(1+y)/(1-y)`, encoded over 32 bytes.
    ///
    /// The neutral point (y = 1) maps to u = 0.
    pub fn to_montgomery_u(&self) -> [u8; 32] {
        // With y = Y/Z: u = (Z+Y)/(Z-Y).
        let n = self.Z + self.Y;
        let d = self.Z - self.Y;
        (n * d.invert()).to_bytes()
    }
}

impl Default for ExtendedGroupElement {
    fn default() -> Self {
        Self::ZERO
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use super::super::tests::BASE_POINT;
    use sha2::{Sha256, Digest};

    fn same_point(P: &ExtendedGroupElement, Q: &ExtendedGroupElement) -> bool {
        P.to_bytes() == Q.to_bytes()
    }

    // Reference multiplication by a scalar, bit by bit (variable time).
    fn mul_ref(P: &ExtendedGroupElement, n: &[u8; 32]) -> ExtendedGroupElement {
        let Pc = P.to_cached();
        let mut R = ExtendedGroupElement::ZERO;
        for i in (0..256).rev() {
            R = R.double().to_extended();
            if ((n[i >> 3] >> (i & 7)) & 1) != 0 {
                R = CompletedGroupElement::add(&R, &Pc).to_extended();
            }
        }
        R
    }

    #[test]
    fn decode_encode() {
        let B = ExtendedGroupElement::from_bytes(&BASE_POINT).unwrap();
        assert!(B.to_bytes() == BASE_POINT);

        // Neutral point.
        let mut n = [0u8; 32];
        n[0] = 1;
        let N = ExtendedGroupElement::from_bytes(&n).unwrap();
        assert!(N.to_bytes() == ExtendedGroupElement::ZERO.to_bytes());

        // Multiples of the base point round-trip.
        let mut P = B;
        let Bc = B.to_cached();
        for _ in 0..50 {
            let s = P.to_bytes();
            let Q = ExtendedGroupElement::from_bytes(&s).unwrap();
            assert!(Q.to_bytes() == s);
            assert!(Q.cofactor_equal(&P) == 0xFFFFFFFF);

            // Flipped sign bit yields the opposite point.
            let mut s2 = s;
            s2[31] ^= 0x80;
            let mut R = ExtendedGroupElement::from_bytes(&s2).unwrap();
            assert!(R.to_bytes() == s2);
            R.set_neg();
            assert!(R.to_bytes() == s);

            P = CompletedGroupElement::add(&P, &Bc).to_extended();
        }

        // y = 2 is not the y coordinate of a curve point.
        let mut s = [0u8; 32];
        s[0] = 2;
        assert!(ExtendedGroupElement::from_bytes(&s).is_none());
    }

    #[test]
    fn decode_non_canonical() {
        // y = p + 1 decodes as y = 1 (neutral point), but does not
        // re-encode to the same bytes.
        let mut s = [0xFFu8; 32];
        s[0] = 0xEE;
        s[31] = 0x7F;
        let P = ExtendedGroupElement::from_bytes(&s).unwrap();
        assert!(P.to_bytes() == ExtendedGroupElement::ZERO.to_bytes());
        assert!(P.to_bytes() != s);
    }

    #[test]
    fn group_law() {
        let B = ExtendedGroupElement::from_bytes(&BASE_POINT).unwrap();
        let B2 = B.double().to_extended();
        let B3 = CompletedGroupElement::add(&B2, &B.to_cached()).to_extended();
        let B3b = CompletedGroupElement::sub(&B2.double().to_extended(),
            &B.to_cached()).to_extended();
        assert!(same_point(&B3, &B3b));

        // Mixed addition agrees with the general one.
        let B1p = PreComputedGroupElement::select_point(0, 1);
        let B3c = CompletedGroupElement::mixed_add(&B2, &B1p).to_extended();
        assert!(same_point(&B3, &B3c));
        let B1m = CompletedGroupElement::mixed_sub(&B2, &B1p).to_extended();
        assert!(same_point(&B1m, &B));

        // P - P = 0
        let Z = CompletedGroupElement::sub(&B3, &B3.to_cached()).to_extended();
        assert!(same_point(&Z, &ExtendedGroupElement::ZERO));

        // Projective round trip.
        let P = B3.to_projective().to_extended();
        assert!(same_point(&P, &B3));
        assert!(B3.to_projective().to_bytes() == B3.to_bytes());
    }

    #[test]
    fn mult_base() {
        let B = ExtendedGroupElement::from_bytes(&BASE_POINT).unwrap();

        let mut n = [0u8; 32];
        assert!(same_point(&ExtendedGroupElement::scalar_mult_base(&n),
            &ExtendedGroupElement::ZERO));
        n[0] = 1;
        assert!(same_point(&ExtendedGroupElement::scalar_mult_base(&n), &B));

        let mut sh = Sha256::new();
        for i in 0..20 {
            sh.update((i as u64).to_le_bytes());
            let mut a = [0u8; 32];
            a.copy_from_slice(&sh.finalize_reset());
            a[31] &= 0x7F;
            let P = ExtendedGroupElement::scalar_mult_base(&a);
            assert!(same_point(&P, &mul_ref(&B, &a)));
        }

        // Largest allowed scalar.
        let mut a = [0xFFu8; 32];
        a[31] = 0x7F;
        let P = ExtendedGroupElement::scalar_mult_base(&a);
        assert!(same_point(&P, &mul_ref(&B, &a)));
    }

    #[test]
    fn double_mult() {
        let B = ExtendedGroupElement::from_bytes(&BASE_POINT).unwrap();
        let mut sh = Sha256::new();
        for i in 0..20 {
            sh.update(((3 * i + 0) as u64).to_le_bytes());
            let mut k = [0u8; 32];
            k.copy_from_slice(&sh.finalize_reset());
            sh.update(((3 * i + 1) as u64).to_le_bytes());
            let mut a = [0u8; 32];
            a.copy_from_slice(&sh.finalize_reset());
            sh.update(((3 * i + 2) as u64).to_le_bytes());
            let mut b = [0u8; 32];
            b.copy_from_slice(&sh.finalize_reset());
            k[31] &= 0x0F;
            a[31] &= 0x0F;
            b[31] &= 0x0F;

            let A = ExtendedGroupElement::scalar_mult_base(&k);
            let R = ProjectiveGroupElement::double_scalar_mult_vartime(&a, &A, &b);
            let aA = mul_ref(&A, &a);
            let bB = mul_ref(&B, &b);
            let E = CompletedGroupElement::add(&aA, &bB.to_cached()).to_extended();
            assert!(R.to_bytes() == E.to_bytes());
        }

        let zero = [0u8; 32];
        let R = ProjectiveGroupElement::double_scalar_mult_vartime(&zero, &B, &zero);
        assert!(R.to_bytes() == ExtendedGroupElement::ZERO.to_bytes());
    }

    #[test]
    fn cofactor() {
        let B = ExtendedGroupElement::from_bytes(&BASE_POINT).unwrap();
        let B2 = B.double().to_extended();
        assert!(B.cofactor_equal(&B) == 0xFFFFFFFF);
        assert!(B.cofactor_equal(&B2) == 0);

        // (0, -1) has order 2.
        let mut s = [0xFFu8; 32];
        s[0] = 0xEC;
        s[31] = 0x7F;
        let T2 = ExtendedGroupElement::from_bytes(&s).unwrap();
        let P = CompletedGroupElement::add(&B, &T2.to_cached()).to_extended();
        assert!(!same_point(&P, &B));
        assert!(P.cofactor_equal(&B) == 0xFFFFFFFF);
        assert!(P.cofactor_equal(&B2) == 0);
    }

    #[test]
    fn montgomery() {
        // The base point maps to u = 9.
        let B = ExtendedGroupElement::from_bytes(&BASE_POINT).unwrap();
        let mut u = [0u8; 32];
        u[0] = 9;
        assert!(B.to_montgomery_u() == u);
        assert!(ExtendedGroupElement::ZERO.to_montgomery_u() == [0u8; 32]);
    }
}
