//! X25519 key exchange, and conversion of Ed25519 keys to X25519 keys.
//!
//! The `x25519()` function implements exactly the process described in
//! [RFC 7748] (section 5). The `x25519_base()` function is the specific
//! case of the input point being the conventional generator (u = 9); it
//! computes the same output as `x25519()`, but goes through the
//! fixed-base multiplication on Edwards25519 and the birational map to
//! the Montgomery curve.
//!
//! The conversion functions map Ed25519 keys to X25519 keys:
//!
//!   - `convert_private_key_to_x25519()` returns the pruned first half
//!   of SHA-512(seed), i.e. the Ed25519 secret scalar. It is already
//!   clamped as X25519 requires.
//!
//!   - `convert_public_key_to_x25519()` decodes the Edwards point and
//!   returns its Montgomery u coordinate `(1+y)/(1-y)`.
//!
//! The X25519 public key obtained from a converted private key (with
//! `x25519_base()`) is equal to the converted Ed25519 public key.
//!
//! [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use core::convert::TryFrom;
use tracing::debug;

use crate::backend::FieldElement;
use crate::ed25519::{clamp, sha512, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE};
use crate::edwards25519::ExtendedGroupElement;
use crate::Error;

/// Size, in bytes, of X25519 scalars and u coordinates.
pub const X25519_KEY_SIZE: usize = 32;

/// X25519 function (from RFC 7748), general case.
///
/// The `point` parameter is the little-endian encoding of the u
/// coordinate of a point on the Montgomery curve or on its quadratic
/// twist; its top bit is ignored, and non-canonical values are accepted.
/// The scalar is clamped (bits 0, 1, 2 and 255 cleared, bit 254 set)
/// before use. No input value is rejected, including low-order points.
pub fn x25519(point: &[u8; X25519_KEY_SIZE], scalar: &[u8; X25519_KEY_SIZE])
    -> [u8; X25519_KEY_SIZE]
{
    let mut s = *scalar;
    clamp(&mut s);

    let x1 = FieldElement::from_bytes(point);
    let mut x2 = FieldElement::ONE;
    let mut z2 = FieldElement::ZERO;
    let mut x3 = x1;
    let mut z3 = FieldElement::ONE;
    let mut swap = 0u32;

    for t in (0..255).rev() {
        let kt = (((s[t >> 3] >> (t & 7)) & 1) as u32).wrapping_neg();
        swap ^= kt;
        FieldElement::cswap(&mut x2, &mut x3, swap);
        FieldElement::cswap(&mut z2, &mut z3, swap);
        swap = kt;

        let A = x2 + z2;
        let B = x2 - z2;
        let AA = A.square();
        let BB = B.square();
        let C = x3 + z3;
        let D = x3 - z3;
        let E = AA - BB;
        let DA = D * A;
        let CB = C * B;
        x3 = (DA + CB).square();
        z3 = x1 * (DA - CB).square();
        x2 = AA * BB;
        // AA + 121665*E = BB + 121666*E
        z2 = E * (BB + E.mul121666());
    }
    FieldElement::cswap(&mut x2, &mut x3, swap);
    FieldElement::cswap(&mut z2, &mut z3, swap);

    (x2 * z2.invert()).to_bytes()
}

/// X25519 function applied to the conventional generator (u = 9).
pub fn x25519_base(scalar: &[u8; X25519_KEY_SIZE]) -> [u8; X25519_KEY_SIZE] {
    let mut s = *scalar;
    clamp(&mut s);

    // The clamped scalar is lower than 2^255, as scalar_mult_base()
    // requires. The neutral point maps to u = 0.
    ExtendedGroupElement::scalar_mult_base(&s).to_montgomery_u()
}

/// Converts an Ed25519 private key (64 bytes: seed and public key) into
/// an X25519 private key.
pub fn convert_private_key_to_x25519(ed25519_private_key: &[u8])
    -> Result<[u8; X25519_KEY_SIZE], Error>
{
    if ed25519_private_key.len() != PRIVATE_KEY_SIZE {
        return Err(Error::InvalidPrivateKeyLength {
            expected: PRIVATE_KEY_SIZE,
            actual: ed25519_private_key.len(),
        });
    }
    let digest = sha512(&ed25519_private_key[..32]);
    let mut k = [0u8; X25519_KEY_SIZE];
    k.copy_from_slice(&digest[..32]);
    clamp(&mut k);
    Ok(k)
}

/// Converts an Ed25519 public key (32 bytes) into an X25519 public key.
///
/// The key must decode as an Edwards25519 point. Non-canonical encodings
/// are accepted.
pub fn convert_public_key_to_x25519(ed25519_public_key: &[u8])
    -> Result<[u8; X25519_KEY_SIZE], Error>
{
    let pk = <&[u8; PUBLIC_KEY_SIZE]>::try_from(ed25519_public_key)
        .map_err(|_| {
            debug!(len = ed25519_public_key.len(), "invalid public key length");
            Error::InvalidPublicKeyLength {
                expected: PUBLIC_KEY_SIZE,
                actual: ed25519_public_key.len(),
            }
        })?;
    let A = ExtendedGroupElement::from_bytes(pk).ok_or_else(|| {
        debug!("public key is not a valid point encoding");
        Error::InvalidPublicKey
    })?;

    // A.Z = 1 after decoding, so this is (1+y)/(1-y).
    Ok(A.to_montgomery_u())
}

// ========================================================================
