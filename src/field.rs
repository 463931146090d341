//! Finite field GF(2^255 - 19).
//!
//! This is the base field of Edwards25519 and Curve25519. The type is
//! implemented in `backend`; see that module for the representation and
//! the conventions on carries.

pub use crate::backend::FieldElement;

/// The field modulus p = 2^255 - 19, in unsigned little-endian encoding.
pub const MODULUS: [u8; 32] = [
    0xED, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F,
];

#[cfg(test)]
mod tests {

    use super::{FieldElement, MODULUS};
    use num_bigint::{BigInt, Sign};

    #[test]
    fn modulus_value() {
        let zp = (BigInt::from(1u32) << 255) - BigInt::from(19u32);
        assert!(BigInt::from_bytes_le(Sign::Plus, &MODULUS) == zp);
    }

    #[test]
    fn modulus_is_zero() {
        assert!(FieldElement::from_bytes(&MODULUS).is_nonzero() == 0);
        let mut m = MODULUS;
        m[0] -= 1;
        let x = FieldElement::from_bytes(&m);
        assert!((x + FieldElement::ONE).is_nonzero() == 0);
        assert!(x.to_bytes() == m);
    }
}
