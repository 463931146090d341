//! Ed25519 signatures (RFC 8032).
//!
//! Keys and signatures are exchanged as plain byte arrays:
//!
//!  - A seed is 32 bytes; it MUST come from a cryptographically secure
//!    random source (see `key_pair_generate()`).
//!
//!  - A private key is 64 bytes: the 32-byte seed, followed by the
//!    32-byte encoded public key. This is the layout used by ref10 and
//!    most other implementations.
//!
//!  - A public key is the 32-byte encoding of the point `A = s*B`, where
//!    `s` is the secret scalar derived from the seed.
//!
//!  - A signature is 64 bytes: the encoded point `R` followed by the
//!    scalar `S` (little-endian).
//!
//! Functions that build keys or signatures report malformed inputs with
//! an `Error`. `verify()` only returns a `bool`: malformed keys, malformed
//! signatures and invalid signatures all yield `false`.
//!
//! # Verification Rules
//!
//! `verify()` is the strict variant: the `S` component must be lower
//! than the group order `L` (its three top bits must also be zero), and
//! the recomputed `R` must have exactly the same encoding as the one in
//! the signature (the cofactorless equation is used). Public keys with a
//! non-canonical encoding of y are still decoded (as in ref10). See
//! `zip215::verify()` for the relaxed, cofactored variant.

// Points traditionally use uppercase letters.
#![allow(non_snake_case)]

use core::convert::TryFrom;
use sha2::{Sha512, Digest};
use rand_core::{CryptoRng, RngCore};
use tracing::debug;

use crate::backend::sc25519::{scalar_minimal, scalar_mul_add, scalar_reduce};
use crate::edwards25519::{ExtendedGroupElement, ProjectiveGroupElement};
use crate::Error;

/// Size, in bytes, of an encoded public key.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size, in bytes, of a private key (seed followed by public key).
pub const PRIVATE_KEY_SIZE: usize = 64;

/// Size, in bytes, of a signature.
pub const SIGNATURE_SIZE: usize = 64;

/// Size, in bytes, of a private key seed.
pub const SEED_SIZE: usize = 32;

/// An Ed25519 key pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub private_key: [u8; PRIVATE_KEY_SIZE],
    pub public_key: [u8; PUBLIC_KEY_SIZE],
}

/// Prunes the first half of a hashed seed into a secret scalar
/// (multiple of 8, bit 254 set, bit 255 cleared).
#[inline]
pub(crate) fn clamp(d: &mut [u8; 32]) {
    d[0] &= 0xF8;
    d[31] &= 0x7F;
    d[31] |= 0x40;
}

/// Returns `SHA-512(data)`.
#[inline]
pub(crate) fn sha512(data: &[u8]) -> [u8; 64] {
    let mut sh = Sha512::new();
    sh.update(data);
    let mut d = [0u8; 64];
    d.copy_from_slice(&sh.finalize());
    d
}

/// Finalizes a SHA-512 computation and reduces the output modulo L.
#[inline]
fn reduce_digest(sh: Sha512) -> [u8; 32] {
    let mut d = [0u8; 64];
    d.copy_from_slice(&sh.finalize());
    scalar_reduce(&d)
}

/// Constant-time comparison of two 32-byte values.
fn bytes_equal(a: &[u8; 32], b: &[u8; 32]) -> bool {
    let mut r = 0u8;
    for i in 0..32 {
        r |= a[i] ^ b[i];
    }
    r == 0
}

/// Returns the public key embedded in a private key (its last 32 bytes).
pub fn public_key_from_private_key(private_key: &[u8; PRIVATE_KEY_SIZE])
    -> [u8; PUBLIC_KEY_SIZE]
{
    let mut pk = [0u8; PUBLIC_KEY_SIZE];
    pk.copy_from_slice(&private_key[32..]);
    pk
}

/// Computes the private key for a seed.
///
/// The seed length MUST be exactly `SEED_SIZE` bytes.
pub fn private_key_from_seed(seed: &[u8]) -> Result<[u8; PRIVATE_KEY_SIZE], Error> {
    let seed = <&[u8; SEED_SIZE]>::try_from(seed).map_err(|_| {
        Error::InvalidSeedLength { expected: SEED_SIZE, actual: seed.len() }
    })?;
    Ok(expand_seed(seed))
}

/// Computes the key pair for a seed.
///
/// Only the first `SEED_SIZE` bytes of `seed` are used; shorter seeds
/// are rejected.
pub fn key_pair_from_seed(seed: &[u8]) -> Result<KeyPair, Error> {
    let n = core::cmp::min(seed.len(), SEED_SIZE);
    let private_key = private_key_from_seed(&seed[..n])?;
    Ok(KeyPair {
        private_key,
        public_key: public_key_from_private_key(&private_key),
    })
}

/// Generates a new key pair from a cryptographically secure RNG.
pub fn key_pair_generate<T: CryptoRng + RngCore>(rng: &mut T) -> KeyPair {
    let mut seed = [0u8; SEED_SIZE];
    rng.fill_bytes(&mut seed);
    let private_key = expand_seed(&seed);
    KeyPair {
        private_key,
        public_key: public_key_from_private_key(&private_key),
    }
}

/// Builds the private key (seed || A) for a seed.
fn expand_seed(seed: &[u8; SEED_SIZE]) -> [u8; PRIVATE_KEY_SIZE] {
    // RFC 8032, section 5.1.5: the pruned first half of SHA-512(seed) is
    // the secret scalar; the public key is its product with the base.
    let digest = sha512(seed);
    let mut s = [0u8; 32];
    s.copy_from_slice(&digest[..32]);
    clamp(&mut s);
    let A = ExtendedGroupElement::scalar_mult_base(&s);

    let mut private_key = [0u8; PRIVATE_KEY_SIZE];
    private_key[..32].copy_from_slice(seed);
    private_key[32..].copy_from_slice(&A.to_bytes());
    private_key
}

/// Signs a message.
///
/// The private key length MUST be exactly `PRIVATE_KEY_SIZE` bytes. Its
/// second half is trusted to be the public key matching the seed.
/// Signatures are deterministic.
pub fn sign(private_key: &[u8], message: &[u8]) -> Result<[u8; SIGNATURE_SIZE], Error> {
    if private_key.len() != PRIVATE_KEY_SIZE {
        return Err(Error::InvalidPrivateKeyLength {
            expected: PRIVATE_KEY_SIZE,
            actual: private_key.len(),
        });
    }

    // Expanded secret: pruned first half of SHA-512(seed); the second
    // half is the prefix for nonce derivation.
    let digest = sha512(&private_key[..32]);
    let mut s = [0u8; 32];
    s.copy_from_slice(&digest[..32]);
    s[31] &= 0x3F;
    clamp(&mut s);

    // r = SHA-512(prefix || M) mod L
    let mut sh = Sha512::new();
    sh.update(&digest[32..]);
    sh.update(message);
    let r = reduce_digest(sh);

    // R = r*B
    let R_enc = ExtendedGroupElement::scalar_mult_base(&r).to_bytes();

    // k = SHA-512(R || A || M) mod L
    let mut sh = Sha512::new();
    sh.update(&R_enc);
    sh.update(&private_key[32..]);
    sh.update(message);
    let k = reduce_digest(sh);

    // S = k*s + r mod L
    let S = scalar_mul_add(&k, &s, &r);

    let mut sig = [0u8; SIGNATURE_SIZE];
    sig[..32].copy_from_slice(&R_enc);
    sig[32..].copy_from_slice(&S);
    Ok(sig)
}

/// Checks a signature against the public key and message, with the
/// strict RFC 8032 rules.
///
/// Returns `false` on any malformed input. This function is not
/// constant-time; it processes only public data.
pub fn verify(public_key: &[u8], message: &[u8], sig: &[u8]) -> bool {
    let (pk, R_enc, S) = match split_inputs(public_key, sig) {
        Some(v) => v,
        None => return false,
    };

    let mut A = match ExtendedGroupElement::from_bytes(&pk) {
        Some(A) => A,
        None => {
            debug!("public key is not a valid point encoding");
            return false;
        }
    };
    A.set_neg();

    let k = challenge(&R_enc, &pk, message);

    // RFC 8032, section 5.1.7: S must be in the 0 to L-1 range, to
    // prevent malleability.
    if !scalar_minimal(&S) {
        debug!("signature scalar is not reduced");
        return false;
    }

    // R' = k*(-A) + S*B
    let R = ProjectiveGroupElement::double_scalar_mult_vartime(&k, &A, &S);
    bytes_equal(&R.to_bytes(), &R_enc)
}

/// Length and range checks shared by both verifiers; on success, returns
/// the public key, `R` and `S` as arrays.
pub(crate) fn split_inputs(public_key: &[u8], sig: &[u8])
    -> Option<([u8; 32], [u8; 32], [u8; 32])>
{
    if public_key.len() != PUBLIC_KEY_SIZE {
        debug!(len = public_key.len(), "invalid public key length");
        return None;
    }
    if sig.len() != SIGNATURE_SIZE {
        debug!(len = sig.len(), "invalid signature length");
        return None;
    }
    if (sig[63] & 0xE0) != 0 {
        debug!("signature scalar has top bits set");
        return None;
    }
    let mut pk = [0u8; 32];
    let mut R = [0u8; 32];
    let mut S = [0u8; 32];
    pk.copy_from_slice(public_key);
    R.copy_from_slice(&sig[..32]);
    S.copy_from_slice(&sig[32..]);
    Some((pk, R, S))
}

/// Returns `SHA-512(R || A || M) mod L`.
pub(crate) fn challenge(R_enc: &[u8; 32], pk: &[u8; 32], message: &[u8]) -> [u8; 32] {
    let mut sh = Sha512::new();
    sh.update(R_enc);
    sh.update(pk);
    sh.update(message);
    reduce_digest(sh)
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sha2::Sha256;
    use crate::edwards25519::CompletedGroupElement;

    struct Ed25519TestVector<'a> {
        s: &'a str,
        Q: &'a str,
        m: &'a str,
        sig: &'a str,
    }

    // Test vectors from RFC 8032, section 7.1 (TEST 1, 2, 3 and SHA(abc)).
    const TEST_VECTORS: [Ed25519TestVector; 4] = [
        Ed25519TestVector {
            s:   "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            Q:   "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
            m:   "",
            sig: "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
        },
        Ed25519TestVector {
            s:   "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
            Q:   "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c",
            m:   "72",
            sig: "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
        },
        Ed25519TestVector {
            s:   "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
            Q:   "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025",
            m:   "af82",
            sig: "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a",
        },
        Ed25519TestVector {
            s:   "833fe62409237b9d62ec77587520911e9a759cec1d19755b7da901b96dca3d42",
            Q:   "ec172b93ad5e563bf4932c70e1245034c35467ef2efd4d64ebf819683467e2bf",
            m:   "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
            sig: "dc2a4459e7369633a52b1bf277839a00201009a3efbf3ecb69bea2186c26b58909351fc9ac90b3ecfdfbc7c66431e0303dca179c138ac17ad9bef1177331a704",
        },
    ];

    // Encoding of a point of order 8.
    const T8_ENC: [u8; 32] = [
        0x26, 0xE8, 0x95, 0x8F, 0xC2, 0xB2, 0x27, 0xB0,
        0x45, 0xC3, 0xF4, 0x89, 0xF2, 0xEF, 0x98, 0xF0,
        0xD5, 0xDF, 0xAC, 0x05, 0xD3, 0xC6, 0x33, 0x39,
        0xB1, 0x38, 0x02, 0x88, 0x6D, 0x53, 0xFC, 0x85,
    ];

    // Group order L, little-endian.
    const ORDER_ENC: [u8; 32] = [
        0xED, 0xD3, 0xF5, 0x5C, 0x1A, 0x63, 0x12, 0x58,
        0xD6, 0x9C, 0xF7, 0xA2, 0xDE, 0xF9, 0xDE, 0x14,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
    ];

    #[test]
    fn signatures() {
        for tv in TEST_VECTORS.iter() {
            let seed = hex::decode(tv.s).unwrap();
            let Q_enc = hex::decode(tv.Q).unwrap();
            let msg = hex::decode(tv.m).unwrap();
            let mut sig = [0u8; 64];
            hex::decode_to_slice(tv.sig, &mut sig[..]).unwrap();

            let kp = key_pair_from_seed(&seed[..]).unwrap();
            assert!(&Q_enc[..] == kp.public_key);
            assert!(&kp.private_key[..32] == &seed[..]);
            assert!(&kp.private_key[32..] == &Q_enc[..]);
            assert!(private_key_from_seed(&seed[..]).unwrap() == kp.private_key);

            assert!(sign(&kp.private_key, &msg[..]).unwrap() == sig);
            assert!(verify(&Q_enc[..], &msg[..], &sig));
            assert!(!verify(&Q_enc[..], &[0u8], &sig));

            let mut sig2 = sig;
            sig2[5] ^= 0x01;
            assert!(!verify(&Q_enc[..], &msg[..], &sig2));
            let mut sig2 = sig;
            sig2[40] ^= 0x01;
            assert!(!verify(&Q_enc[..], &msg[..], &sig2));
        }
    }

    #[test]
    fn round_trip() {
        let mut sh = Sha256::new();
        for i in 0..20 {
            sh.update(((2 * i + 0) as u64).to_le_bytes());
            let seed = sh.finalize_reset();
            sh.update(((2 * i + 1) as u64).to_le_bytes());
            let msg = sh.finalize_reset();
            let kp = key_pair_from_seed(&seed[..]).unwrap();
            let msg = &msg[..(i as usize)];
            let sig = sign(&kp.private_key, msg).unwrap();
            assert!(verify(&kp.public_key, msg, &sig));
            assert!(sign(&kp.private_key, msg).unwrap() == sig);
        }
    }

    #[test]
    fn generate() {
        let mut rng = StdRng::seed_from_u64(42);
        let kp1 = key_pair_generate(&mut rng);
        let kp2 = key_pair_generate(&mut rng);
        assert!(kp1 != kp2);
        assert!(key_pair_from_seed(&kp1.private_key[..32]).unwrap() == kp1);
        let sig = sign(&kp1.private_key, b"hello").unwrap();
        assert!(verify(&kp1.public_key, b"hello", &sig));
        assert!(!verify(&kp2.public_key, b"hello", &sig));
    }

    #[test]
    fn seed_lengths() {
        assert!(private_key_from_seed(&[0u8; 31])
            == Err(Error::InvalidSeedLength { expected: 32, actual: 31 }));
        assert!(private_key_from_seed(&[0u8; 33])
            == Err(Error::InvalidSeedLength { expected: 32, actual: 33 }));
        assert!(key_pair_from_seed(&[0u8; 16])
            == Err(Error::InvalidSeedLength { expected: 32, actual: 16 }));

        // Longer seeds are truncated by key_pair_from_seed().
        let mut long = [7u8; 40];
        long[35] = 1;
        let kp = key_pair_from_seed(&long).unwrap();
        assert!(kp == key_pair_from_seed(&long[..32]).unwrap());

        assert!(sign(&[0u8; 32], b"")
            == Err(Error::InvalidPrivateKeyLength { expected: 64, actual: 32 }));
    }

    #[test]
    fn malformed_inputs() {
        let kp = key_pair_from_seed(&[3u8; 32]).unwrap();
        let sig = sign(&kp.private_key, b"msg").unwrap();
        assert!(verify(&kp.public_key, b"msg", &sig));

        assert!(!verify(&kp.public_key[..31], b"msg", &sig));
        assert!(!verify(&kp.public_key, b"msg", &sig[..63]));
        let mut long = [0u8; 65];
        long[..64].copy_from_slice(&sig);
        assert!(!verify(&kp.public_key, b"msg", &long));

        // Top bits of S.
        let mut sig2 = sig;
        sig2[63] |= 0x80;
        assert!(!verify(&kp.public_key, b"msg", &sig2));

        // Public key that does not decode (y = 2).
        let mut pk = [0u8; 32];
        pk[0] = 2;
        assert!(!verify(&pk, b"msg", &sig));
    }

    #[test]
    fn malleability() {
        let kp = key_pair_from_seed(&[9u8; 32]).unwrap();
        let sig = sign(&kp.private_key, b"malleable").unwrap();
        assert!(verify(&kp.public_key, b"malleable", &sig));

        // S + L is congruent to S but not reduced.
        let mut sig2 = sig;
        let mut cc = 0u32;
        for i in 0..32 {
            let w = (sig[32 + i] as u32) + (ORDER_ENC[i] as u32) + cc;
            sig2[32 + i] = w as u8;
            cc = w >> 8;
        }
        assert!(cc == 0);
        assert!((sig2[63] & 0xE0) == 0);
        let mut S2 = [0u8; 32];
        S2.copy_from_slice(&sig2[32..]);
        assert!(!scalar_minimal(&S2));
        assert!(!verify(&kp.public_key, b"malleable", &sig2));
    }

    #[test]
    fn small_order_public_key() {
        // With A of order 8 and S = 0, the recomputed R' is -k*A, a
        // point of small order. The signature is accepted exactly when
        // R matches it.
        let A = ExtendedGroupElement::from_bytes(&T8_ENC).unwrap();
        let Ac = A.to_cached();
        let mut multiples = [ExtendedGroupElement::ZERO; 8];
        for i in 1..8 {
            multiples[i] = CompletedGroupElement::add(&multiples[i - 1], &Ac)
                .to_extended();
        }

        let mut accepted = 0;
        for j in 0..16u8 {
            let msg = [j; 3];
            for i in 0..8 {
                let R_enc = multiples[i].to_bytes();
                let mut sig = [0u8; 64];
                sig[..32].copy_from_slice(&R_enc);
                let k = challenge(&R_enc, &T8_ENC, &msg);
                let e = (8 - (k[0] & 7) as usize) & 7;
                let expected = multiples[e].to_bytes() == R_enc;
                assert!(verify(&T8_ENC, &msg, &sig) == expected);
                if expected {
                    accepted += 1;
                }
            }
        }
        assert!(accepted > 0);
    }
}
