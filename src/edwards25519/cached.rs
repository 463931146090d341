use crate::backend::FieldElement;

/// A point in cached coordinates (Y+X, Y-X, Z, 2*d*T).
///
/// This is the form of the right operand in `CompletedGroupElement::add()`
/// and `CompletedGroupElement::sub()`. It is obtained from an extended
/// point with `ExtendedGroupElement::to_cached()`.
#[derive(Clone, Copy, Debug)]
pub struct CachedGroupElement {
    pub(crate) y_plus_x: FieldElement,
    pub(crate) y_minus_x: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T2d: FieldElement,
}

impl CachedGroupElement {

    /// The neutral point (0, 1), in cached coordinates.
    pub const ZERO: Self = Self {
        y_plus_x: FieldElement::ONE,
        y_minus_x: FieldElement::ONE,
        Z: FieldElement::ONE,
        T2d: FieldElement::ZERO,
    };
}

impl Default for CachedGroupElement {
    fn default() -> Self {
        Self::ZERO
    }
}
