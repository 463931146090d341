//! Ed25519 verification with the ZIP-215 rules.
//!
//! [ZIP-215] fixes the exact set of accepted Ed25519 signatures, so that
//! all implementations of a consensus protocol agree on validity. It
//! differs from the strict verifier (`ed25519::verify()`) in two ways:
//!
//!   - Non-canonical encodings of the public key `A` and of the point
//!   `R` are accepted (y values in the p to 2^255-1 range are reduced;
//!   an x of zero with the sign bit set is allowed).
//!
//!   - The cofactored equation is used: the signature is valid when
//!   `[8](R - R')` is the neutral point, where `R' = S*B - k*A` is the
//!   recomputed point. `R` may then differ from `R'` by a point of small
//!   order.
//!
//! The `S` component must still be canonical (lower than `L`).
//!
//! [ZIP-215]: https://zips.z.cash/zip-0215

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use tracing::debug;

use crate::backend::sc25519::scalar_minimal;
use crate::ed25519::{challenge, split_inputs};
use crate::edwards25519::{ExtendedGroupElement, ProjectiveGroupElement};

/// Checks a signature against the public key and message, with the
/// ZIP-215 rules.
///
/// Returns `false` on any malformed input. This function is not
/// constant-time; it processes only public data.
pub fn verify(public_key: &[u8], message: &[u8], sig: &[u8]) -> bool {
    let (pk, R_enc, S) = match split_inputs(public_key, sig) {
        Some(v) => v,
        None => return false,
    };

    // Point decoding does not enforce canonical encodings.
    let mut A = match ExtendedGroupElement::from_bytes(&pk) {
        Some(A) => A,
        None => {
            debug!("public key is not a valid point encoding");
            return false;
        }
    };
    A.set_neg();

    let k = challenge(&R_enc, &pk, message);

    let R = match ExtendedGroupElement::from_bytes(&R_enc) {
        Some(R) => R,
        None => {
            debug!("signature R is not a valid point encoding");
            return false;
        }
    };

    if !scalar_minimal(&S) {
        debug!("signature scalar is not reduced");
        return false;
    }

    // R' = k*(-A) + S*B; accept if [8](R' - R) = 0.
    let Rp = ProjectiveGroupElement::double_scalar_mult_vartime(&k, &A, &S)
        .to_extended();
    Rp.cofactor_equal(&R) == 0xFFFFFFFF
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use crate::ed25519;
    use crate::edwards25519::{CompletedGroupElement, ExtendedGroupElement};
    use sha2::{Sha256, Digest};

    // Encoding of a point of order 8.
    const T8_ENC: [u8; 32] = [
        0x26, 0xE8, 0x95, 0x8F, 0xC2, 0xB2, 0x27, 0xB0,
        0x45, 0xC3, 0xF4, 0x89, 0xF2, 0xEF, 0x98, 0xF0,
        0xD5, 0xDF, 0xAC, 0x05, 0xD3, 0xC6, 0x33, 0x39,
        0xB1, 0x38, 0x02, 0x88, 0x6D, 0x53, 0xFC, 0x85,
    ];

    // Non-canonical encoding of the neutral point: y = p + 1.
    const ID_NON_CANONICAL: [u8; 32] = [
        0xEE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F,
    ];

    #[test]
    fn valid_signatures() {
        let mut sh = Sha256::new();
        for i in 0..20 {
            sh.update((i as u64).to_le_bytes());
            let seed = sh.finalize_reset();
            let kp = ed25519::key_pair_from_seed(&seed[..]).unwrap();
            let msg = &seed[..(i as usize)];
            let sig = ed25519::sign(&kp.private_key, msg).unwrap();
            assert!(verify(&kp.public_key, msg, &sig));
            assert!(ed25519::verify(&kp.public_key, msg, &sig));

            let mut sig2 = sig;
            sig2[33] ^= 0x04;
            assert!(!verify(&kp.public_key, msg, &sig2));
            assert!(!verify(&kp.public_key, b"other", &sig));
        }
    }

    #[test]
    fn malformed_inputs() {
        let kp = ed25519::key_pair_from_seed(&[5u8; 32]).unwrap();
        let sig = ed25519::sign(&kp.private_key, b"msg").unwrap();
        assert!(!verify(&kp.public_key[..31], b"msg", &sig));
        assert!(!verify(&kp.public_key, b"msg", &sig[..63]));
        let mut sig2 = sig;
        sig2[63] |= 0x20;
        assert!(!verify(&kp.public_key, b"msg", &sig2));

        // R that does not decode (y = 2).
        let mut sig2 = sig;
        sig2[..32].copy_from_slice(&[0u8; 32]);
        sig2[0] = 2;
        assert!(!verify(&kp.public_key, b"msg", &sig2));
    }

    #[test]
    fn small_order_component_in_r() {
        // R + T (T of order 8) is accepted by the cofactored equation,
        // but not by the strict verifier.
        let kp = ed25519::key_pair_from_seed(&[11u8; 32]).unwrap();
        let msg = b"cofactor";
        let T = ExtendedGroupElement::from_bytes(&T8_ENC).unwrap();
        let Tc = T.to_cached();

        // R is bound to k, so search for a signature whose R' can be
        // shifted without changing k: sign normally, then replace R by
        // R + T and recompute S for the new challenge.
        let sig = ed25519::sign(&kp.private_key, msg).unwrap();
        let mut R_enc = [0u8; 32];
        R_enc.copy_from_slice(&sig[..32]);
        let R = ExtendedGroupElement::from_bytes(&R_enc).unwrap();
        let R2 = CompletedGroupElement::add(&R, &Tc).to_extended();
        let R2_enc = R2.to_bytes();

        // S2 = r + k2*s, with r and s as in signing.
        let digest = ed25519::sha512(&kp.private_key[..32]);
        let mut s = [0u8; 32];
        s.copy_from_slice(&digest[..32]);
        ed25519::clamp(&mut s);
        let mut sh = sha2::Sha512::new();
        sh.update(&digest[32..]);
        sh.update(msg);
        let mut rd = [0u8; 64];
        rd.copy_from_slice(&sh.finalize());
        let r = crate::backend::sc25519::scalar_reduce(&rd);
        let k2 = challenge(&R2_enc, &kp.public_key, msg);
        let S2 = crate::backend::sc25519::scalar_mul_add(&k2, &s, &r);

        let mut sig2 = [0u8; 64];
        sig2[..32].copy_from_slice(&R2_enc);
        sig2[32..].copy_from_slice(&S2);

        // S2*B - k2*A = r*B = R, which differs from R2 by T.
        assert!(verify(&kp.public_key, msg, &sig2));
        assert!(!ed25519::verify(&kp.public_key, msg, &sig2));
    }

    #[test]
    fn non_canonical_r() {
        // Public key of order 8 with S = 0: R' = -k*A is a small-order
        // point, so any small-order R passes the cofactored equation. A
        // non-canonical encoding of the neutral point as R is accepted
        // by ZIP-215, while the strict verifier rejects it (it compares
        // encodings, and the recomputed point is canonically encoded).
        for j in 0..8u8 {
            let msg = [j; 4];
            let mut sig = [0u8; 64];
            sig[..32].copy_from_slice(&ID_NON_CANONICAL);
            assert!(verify(&T8_ENC, &msg, &sig));
            assert!(!ed25519::verify(&T8_ENC, &msg, &sig));
        }
    }

    #[test]
    fn non_canonical_public_key() {
        // A = neutral point with a non-canonical encoding, S = 0, and
        // R = neutral point: R' = 0 for any message.
        let mut sig = [0u8; 64];
        sig[0] = 1;
        assert!(verify(&ID_NON_CANONICAL, b"anything", &sig));
        assert!(verify(&ID_NON_CANONICAL, b"something else", &sig));

        // The strict verifier decodes the key too, and R matches exactly.
        assert!(ed25519::verify(&ID_NON_CANONICAL, b"anything", &sig));
    }
}
