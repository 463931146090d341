use crate::backend::FieldElement;
use super::{CachedGroupElement, ExtendedGroupElement, PreComputedGroupElement,
    ProjectiveGroupElement};

/// A point in completed coordinates ((X:Z), (Y:T)).
///
/// The affine point is `x = X/Z`, `y = Y/T`. This is the output of the
/// addition and doubling formulas; converting it to the extended form
/// costs four multiplications, and three to the projective form.
#[derive(Clone, Copy, Debug)]
pub struct CompletedGroupElement {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl CompletedGroupElement {

    /// Returns `p + q`.
    pub fn add(p: &ExtendedGroupElement, q: &CachedGroupElement) -> Self {
        let ypx = p.Y + p.X;
        let ymx = p.Y - p.X;
        let A = ymx * q.y_minus_x;
        let B = ypx * q.y_plus_x;
        let C = q.T2d * p.T;
        let D = p.Z * q.Z;
        let D2 = D + D;
        Self {
            X: B - A,
            Y: B + A,
            Z: D2 + C,
            T: D2 - C,
        }
    }

    /// Returns `p - q`.
    pub fn sub(p: &ExtendedGroupElement, q: &CachedGroupElement) -> Self {
        // Same as add() with -q = (Y-X, Y+X, Z, -2*d*T).
        let ypx = p.Y + p.X;
        let ymx = p.Y - p.X;
        let A = ymx * q.y_plus_x;
        let B = ypx * q.y_minus_x;
        let C = q.T2d * p.T;
        let D = p.Z * q.Z;
        let D2 = D + D;
        Self {
            X: B - A,
            Y: B + A,
            Z: D2 - C,
            T: D2 + C,
        }
    }

    /// Returns `p + q`, for an affine point `q` in Duif coordinates.
    pub fn mixed_add(p: &ExtendedGroupElement, q: &PreComputedGroupElement) -> Self {
        let ypx = p.Y + p.X;
        let ymx = p.Y - p.X;
        let A = ymx * q.y_minus_x;
        let B = ypx * q.y_plus_x;
        let C = q.xy2d * p.T;
        let D2 = p.Z + p.Z;
        Self {
            X: B - A,
            Y: B + A,
            Z: D2 + C,
            T: D2 - C,
        }
    }

    /// Returns `p - q`, for an affine point `q` in Duif coordinates.
    pub fn mixed_sub(p: &ExtendedGroupElement, q: &PreComputedGroupElement) -> Self {
        let ypx = p.Y + p.X;
        let ymx = p.Y - p.X;
        let A = ymx * q.y_plus_x;
        let B = ypx * q.y_minus_x;
        let C = q.xy2d * p.T;
        let D2 = p.Z + p.Z;
        Self {
            X: B - A,
            Y: B + A,
            Z: D2 - C,
            T: D2 + C,
        }
    }

    /// Converts this point to projective coordinates.
    #[inline]
    pub fn to_projective(&self) -> ProjectiveGroupElement {
        ProjectiveGroupElement {
            X: self.X * self.T,
            Y: self.Y * self.Z,
            Z: self.Z * self.T,
        }
    }

    /// Converts this point to extended coordinates.
    #[inline]
    pub fn to_extended(&self) -> ExtendedGroupElement {
        ExtendedGroupElement {
            X: self.X * self.T,
            Y: self.Y * self.Z,
            Z: self.Z * self.T,
            T: self.X * self.Y,
        }
    }
}
