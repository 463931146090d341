use crate::backend::FieldElement;
use super::table::BI;
use super::{slide, CachedGroupElement, CompletedGroupElement,
    ExtendedGroupElement};

/// A point in projective coordinates (X:Y:Z).
#[derive(Clone, Copy, Debug)]
pub struct ProjectiveGroupElement {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
}

impl ProjectiveGroupElement {

    /// The neutral point (0, 1).
    pub const ZERO: Self = Self {
        X: FieldElement::ZERO,
        Y: FieldElement::ONE,
        Z: FieldElement::ONE,
    };

    /// Returns the double of this point (dbl-2008-hwcd formulas).
    pub fn double(&self) -> CompletedGroupElement {
        let XX = self.X.square();
        let YY = self.Y.square();
        let ZZ2 = self.Z.square2();
        let S = (self.X + self.Y).square();
        let Y = YY + XX;
        let Z = YY - XX;
        CompletedGroupElement {
            X: S - Y,
            Y,
            Z,
            T: ZZ2 - Z,
        }
    }

    /// Converts this point to extended coordinates.
    pub fn to_extended(&self) -> ExtendedGroupElement {
        ExtendedGroupElement {
            X: self.X * self.Z,
            Y: self.Y * self.Z,
            Z: self.Z.square(),
            T: self.X * self.Y,
        }
    }

    /// Encodes this point into exactly 32 bytes (canonical encoding).
    pub fn to_bytes(&self) -> [u8; 32] {
        let iZ = self.Z.invert();
        let x = self.X * iZ;
        let y = self.Y * iZ;
        let mut s = y.to_bytes();
        s[31] ^= (x.is_negative() << 7) as u8;
        s
    }

    /// Returns `a*A + b*B`, with `B` the conventional base point.
    ///
    /// Scalars are 32-byte little-endian integers and should be lower
    /// than 2^255. THIS FUNCTION IS NOT CONSTANT-TIME; it shall be used
    /// only with public data (e.g. in signature verification).
    pub fn double_scalar_mult_vartime(a: &[u8; 32], A: &ExtendedGroupElement,
        b: &[u8; 32]) -> Self
    {
        let a_slide = slide(a);
        let b_slide = slide(b);

        // Ai[i] = (2*i+1)*A
        let mut Ai = [CachedGroupElement::ZERO; 8];
        Ai[0] = A.to_cached();
        let A2 = A.double().to_extended();
        for i in 0..7 {
            Ai[i + 1] = CompletedGroupElement::add(&A2, &Ai[i])
                .to_extended().to_cached();
        }

        let mut i = 256;
        while i > 0 && a_slide[i - 1] == 0 && b_slide[i - 1] == 0 {
            i -= 1;
        }

        let mut r = Self::ZERO;
        while i > 0 {
            i -= 1;
            let mut t = r.double();

            let da = a_slide[i];
            if da > 0 {
                t = CompletedGroupElement::add(&t.to_extended(),
                    &Ai[(da / 2) as usize]);
            } else if da < 0 {
                t = CompletedGroupElement::sub(&t.to_extended(),
                    &Ai[((-da) / 2) as usize]);
            }

            let db = b_slide[i];
            if db > 0 {
                t = CompletedGroupElement::mixed_add(&t.to_extended(),
                    &BI[(db / 2) as usize]);
            } else if db < 0 {
                t = CompletedGroupElement::mixed_sub(&t.to_extended(),
                    &BI[((-db) / 2) as usize]);
            }

            r = t.to_projective();
        }
        r
    }
}

impl Default for ProjectiveGroupElement {
    fn default() -> Self {
        Self::ZERO
    }
}
