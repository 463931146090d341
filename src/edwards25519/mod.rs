//! Edwards25519 group elements.
//!
//! The twisted Edwards curve `-x^2 + y^2 = 1 + d*x^2*y^2`, over
//! GF(2^255 - 19), with `d` = -121665/121666. Points are handled in five
//! representations, each suited to a specific operation; all of them
//! represent the affine point `x = X/Z`, `y = Y/Z`:
//!
//!  - `ExtendedGroupElement` (X:Y:Z:T), with `X*Y = Z*T`: general-purpose
//!    accumulator, used for encoding, decoding and as the left operand
//!    of additions.
//!
//!  - `ProjectiveGroupElement` (X:Y:Z): input of the doubling formulas,
//!    and working form of the double-scalar multiplication used by
//!    signature verification.
//!
//!  - `CompletedGroupElement` ((X:Z), (Y:T)): output of the addition and
//!    doubling formulas, before being folded back into extended or
//!    projective form.
//!
//!  - `CachedGroupElement` (Y+X, Y-X, Z, 2*d*T): right operand of
//!    general additions.
//!
//!  - `PreComputedGroupElement` (y+x, y-x, 2*d*x*y), with Z = 1: entries
//!    of the precomputed tables of multiples of the base point, used as
//!    right operand of mixed additions.
//!
//! All types are plain `Copy` values; conversions return new instances.
//! Functions whose name ends in `_vartime` branch on their inputs and
//! MUST NOT be used with secret data. All other functions are
//! constant-time.

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use crate::backend::FieldElement;

mod cached;
mod completed;
mod extended;
mod precomputed;
mod projective;
mod table;

pub use cached::CachedGroupElement;
pub use completed::CompletedGroupElement;
pub use extended::ExtendedGroupElement;
pub use precomputed::PreComputedGroupElement;
pub use projective::ProjectiveGroupElement;

/// Curve constant `d` = -121665/121666.
pub const D: FieldElement = FieldElement::from_limbs([
    -10913610, 13857413, -15372611, 6949391, 114729,
    -8787816, -6275908, -3247719, -18696448, -12055116,
]);

/// `2*d`.
pub const D2: FieldElement = FieldElement::from_limbs([
    -21827239, -5839606, -30745221, 13898782, 229458,
    15978800, -12551817, -6495438, 29715968, 9444199,
]);

/// A square root of -1 in the field (`2^((p-1)/4)`).
pub const SQRT_M1: FieldElement = FieldElement::from_limbs([
    -32595792, -7943725, 9377950, 3500415, 12389472,
    -272473, -25146209, -2005654, 326686, 11406482,
]);

/// Returns 1 if `b` is negative, 0 otherwise.
#[inline(always)]
pub(crate) fn negative(b: i8) -> u32 {
    ((b as i32 as u32) >> 31) & 1
}

/// Returns 1 if `b == c`, 0 otherwise. Both values must be non-negative.
#[inline(always)]
pub(crate) fn equal(b: i8, c: i8) -> u32 {
    let x = ((b as u8) ^ (c as u8)) as u32;
    x.wrapping_sub(1) >> 31
}

/// Recodes a scalar (32 bytes, little-endian) into 256 signed digits,
/// such that the scalar is equal to `sum(r[i]*2^i)`. Each non-zero digit
/// is odd and in the -15 to +15 range, and any two non-zero digits are
/// separated by at least four zeros.
///
/// This function is not constant-time.
pub(crate) fn slide(a: &[u8; 32]) -> [i8; 256] {
    let mut r = [0i8; 256];
    for i in 0..256 {
        r[i] = (1 & (a[i >> 3] >> (i & 7))) as i8;
    }

    for i in 0..256 {
        if r[i] == 0 {
            continue;
        }
        let mut b = 1;
        while b <= 6 && i + b < 256 {
            if r[i + b] != 0 {
                let ri = r[i] as i32;
                let rb = (r[i + b] as i32) << b;
                if ri + rb <= 15 {
                    r[i] = (ri + rb) as i8;
                    r[i + b] = 0;
                } else if ri - rb >= -15 {
                    r[i] = (ri - rb) as i8;
                    // Propagate the borrowed bit upwards.
                    for k in (i + b)..256 {
                        if r[k] == 0 {
                            r[k] = 1;
                            break;
                        }
                        r[k] = 0;
                    }
                } else {
                    break;
                }
            }
            b += 1;
        }
    }
    r
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use super::table::{BASE, BI};
    use sha2::{Sha256, Digest};

    // Encoding of the conventional base point (y = 4/5, x even).
    pub(crate) const BASE_POINT: [u8; 32] = [
        0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    ];

    fn same(a: &FieldElement, b: &FieldElement) -> bool {
        a.to_bytes() == b.to_bytes()
    }

    #[test]
    fn constants() {
        let d = -(FieldElement::from_bytes(&[0x41, 0xDB, 0x01, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0, 0, 0]))
            * FieldElement::from_bytes(&[0x42, 0xDB, 0x01, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0, 0, 0]).invert();
        assert!(same(&d, &D));
        assert!(same(&(D + D), &D2));
        assert!(same(&SQRT_M1.square(), &(-FieldElement::ONE)));
    }

    #[test]
    fn predicates() {
        assert!(negative(-1) == 1);
        assert!(negative(-8) == 1);
        assert!(negative(0) == 0);
        assert!(negative(8) == 0);
        for b in 0..9i8 {
            for c in 0..9i8 {
                assert!(equal(b, c) == ((b == c) as u32));
            }
        }
    }

    #[test]
    fn slide_recoding() {
        let mut sh = Sha256::new();
        for i in 0..200 {
            sh.update((i as u64).to_le_bytes());
            let mut a = [0u8; 32];
            a.copy_from_slice(&sh.finalize_reset());
            a[31] &= 0x0F;
            let r = slide(&a);

            // Digits are odd, bounded, and spaced apart.
            let mut last: Option<usize> = None;
            for j in 0..256 {
                if r[j] != 0 {
                    assert!((r[j] & 1) != 0);
                    assert!(r[j] >= -15 && r[j] <= 15);
                    if let Some(k) = last {
                        assert!(j - k > 4);
                    }
                    last = Some(j);
                }
            }

            // Recompute the scalar as a signed 320-bit value (five words).
            let mut acc = [0i128; 5];
            for j in 0..256 {
                acc[j >> 6] += (r[j] as i128) << (j & 63);
            }
            for j in 0..4 {
                let c = acc[j] >> 64;
                acc[j + 1] += c;
                acc[j] -= c << 64;
            }
            assert!(acc[4] == 0);
            for j in 0..4 {
                let mut w = [0u8; 8];
                w.copy_from_slice(&a[8 * j..8 * j + 8]);
                assert!(acc[j] == u64::from_le_bytes(w) as i128);
            }
        }
    }

    // Affine (y+x, y-x, 2*d*x*y) form of an extended point.
    fn precompute(P: &ExtendedGroupElement) -> PreComputedGroupElement {
        let iZ = P.Z.invert();
        let x = P.X * iZ;
        let y = P.Y * iZ;
        PreComputedGroupElement {
            y_plus_x: y + x,
            y_minus_x: y - x,
            xy2d: x * y * D2,
        }
    }

    fn same_precomputed(a: &PreComputedGroupElement,
        b: &PreComputedGroupElement) -> bool
    {
        same(&a.y_plus_x, &b.y_plus_x)
            && same(&a.y_minus_x, &b.y_minus_x)
            && same(&a.xy2d, &b.xy2d)
    }

    #[test]
    fn base_table() {
        let B = ExtendedGroupElement::from_bytes(&BASE_POINT).unwrap();
        let mut P = B;
        for i in 0..32 {
            let Pc = P.to_cached();
            let mut Q = P;
            for j in 0..8 {
                assert!(same_precomputed(&precompute(&Q), &BASE[i][j]));
                Q = CompletedGroupElement::add(&Q, &Pc).to_extended();
            }
            for _ in 0..8 {
                P = P.double().to_extended();
            }
        }
    }

    #[test]
    fn odd_multiples_table() {
        let B = ExtendedGroupElement::from_bytes(&BASE_POINT).unwrap();
        let B2 = B.double().to_extended().to_cached();
        let mut P = B;
        for i in 0..8 {
            assert!(same_precomputed(&precompute(&P), &BI[i]));
            P = CompletedGroupElement::add(&P, &B2).to_extended();
        }
    }
}
