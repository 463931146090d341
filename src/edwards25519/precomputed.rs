use crate::backend::FieldElement;
use super::table::BASE;
use super::{equal, negative};

/// A point in affine Duif coordinates (y+x, y-x, 2*d*x*y), with an
/// implicit Z = 1.
///
/// This is the representation of the entries of the precomputed tables
/// of multiples of the base point; it is the right operand of
/// `CompletedGroupElement::mixed_add()` and `mixed_sub()`.
#[derive(Clone, Copy, Debug)]
pub struct PreComputedGroupElement {
    pub(crate) y_plus_x: FieldElement,
    pub(crate) y_minus_x: FieldElement,
    pub(crate) xy2d: FieldElement,
}

impl PreComputedGroupElement {

    /// The neutral point (0, 1), in Duif coordinates.
    pub const ZERO: Self = Self {
        y_plus_x: FieldElement::ONE,
        y_minus_x: FieldElement::ONE,
        xy2d: FieldElement::ZERO,
    };

    /// Sets this point to the value of `rhs` if `ctl` is 0xFFFFFFFF, or
    /// leaves it unchanged if `ctl` is 0x00000000.
    #[inline]
    pub(crate) fn set_cond(&mut self, rhs: &Self, ctl: u32) {
        self.y_plus_x.set_cond(&rhs.y_plus_x, ctl);
        self.y_minus_x.set_cond(&rhs.y_minus_x, ctl);
        self.xy2d.set_cond(&rhs.xy2d, ctl);
    }

    /// Negates this point (in place).
    #[inline]
    pub(crate) fn set_neg(&mut self) {
        core::mem::swap(&mut self.y_plus_x, &mut self.y_minus_x);
        self.xy2d.set_neg();
    }

    /// Returns `b*(256^pos)*B`, for the base point B, with `b` in the
    /// -8 to +8 range and `pos` in the 0 to 31 range.
    ///
    /// All eight entries of row `pos` are read; the digit `b` (which may
    /// be secret) does not influence the memory access pattern.
    pub fn select_point(pos: usize, b: i8) -> Self {
        let b_negative = negative(b);
        let b_abs = b - ((((b_negative as i8).wrapping_neg()) & b) << 1);

        let mut t = Self::ZERO;
        for i in 0..8 {
            t.set_cond(&BASE[pos][i], equal(b_abs, (i + 1) as i8).wrapping_neg());
        }
        let mut minus_t = t;
        minus_t.set_neg();
        t.set_cond(&minus_t, b_negative.wrapping_neg());
        t
    }
}

impl Default for PreComputedGroupElement {
    fn default() -> Self {
        Self::ZERO
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use super::super::table::BASE;

    fn same(a: &PreComputedGroupElement, b: &PreComputedGroupElement) -> bool {
        a.y_plus_x.to_bytes() == b.y_plus_x.to_bytes()
            && a.y_minus_x.to_bytes() == b.y_minus_x.to_bytes()
            && a.xy2d.to_bytes() == b.xy2d.to_bytes()
    }

    #[test]
    fn select() {
        for pos in [0usize, 1, 17, 31] {
            assert!(same(&PreComputedGroupElement::select_point(pos, 0),
                &PreComputedGroupElement::ZERO));
            for b in 1..9i8 {
                let p = PreComputedGroupElement::select_point(pos, b);
                assert!(same(&p, &BASE[pos][(b - 1) as usize]));
                let mut q = PreComputedGroupElement::select_point(pos, -b);
                q.set_neg();
                assert!(same(&q, &p));
            }
        }
    }
}
