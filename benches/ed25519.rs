#![allow(non_snake_case)]

mod util;
use util::{cycles_seed, median_cycles};

use curve25519_ref10::ed25519::{key_pair_from_seed, sign, verify};
use curve25519_ref10::edwards25519::{ExtendedGroupElement, ProjectiveGroupElement};
use curve25519_ref10::zip215;

fn bench_scalar_mult_base() -> (f64, u8) {
    let mut s = cycles_seed();
    s[31] &= 0x7F;
    let v = median_cycles(100, || {
        for _ in 0..100 {
            let P = ExtendedGroupElement::scalar_mult_base(&s);
            s[0] ^= P.to_bytes()[0];
        }
    });
    (v, s[0])
}

fn bench_double_scalar_mult() -> (f64, u8) {
    let mut a = cycles_seed();
    let mut b = cycles_seed();
    a[31] &= 0x0F;
    b[0] ^= 0x55;
    b[31] &= 0x0F;
    let A = ExtendedGroupElement::scalar_mult_base(&b);
    let v = median_cycles(100, || {
        for _ in 0..100 {
            let R = ProjectiveGroupElement::double_scalar_mult_vartime(&a, &A, &b);
            a[0] ^= R.to_bytes()[0];
        }
    });
    (v, a[0])
}

fn bench_key_pair() -> (f64, u8) {
    let mut seed = cycles_seed();
    let v = median_cycles(100, || {
        for _ in 0..100 {
            if let Ok(kp) = key_pair_from_seed(&seed) {
                seed.copy_from_slice(&kp.public_key);
            }
        }
    });
    (v, seed[0])
}

fn bench_sign() -> (f64, u8) {
    let kp = match key_pair_from_seed(&cycles_seed()) {
        Ok(kp) => kp,
        Err(_) => return (0.0, 0),
    };
    let mut msg = [0u8; 32];
    let v = median_cycles(100, || {
        for _ in 0..100 {
            if let Ok(sig) = sign(&kp.private_key, &msg) {
                msg.copy_from_slice(&sig[..32]);
            }
        }
    });
    (v, msg[0])
}

fn bench_verify(zip: bool) -> (f64, u8) {
    let kp = match key_pair_from_seed(&cycles_seed()) {
        Ok(kp) => kp,
        Err(_) => return (0.0, 0),
    };
    let mut sigs = [[0u8; 64]; 64];
    for i in 0..64 {
        if let Ok(sig) = sign(&kp.private_key, &[i as u8]) {
            sigs[i] = sig;
        }
    }
    let mut x = 0u8;
    let v = median_cycles(64, || {
        for i in 0..64 {
            let ok = if zip {
                zip215::verify(&kp.public_key, &[i as u8], &sigs[i])
            } else {
                verify(&kp.public_key, &[i as u8], &sigs[i])
            };
            x ^= ok as u8;
        }
    });
    (v, x)
}

fn main() {
    let mut bx = 0u8;

    let (v, x) = bench_scalar_mult_base();
    bx ^= x;
    println!("Ed25519 scalar_mult_base:           {:13.2}", v);
    let (v, x) = bench_double_scalar_mult();
    bx ^= x;
    println!("Ed25519 double_scalar_mult_vartime: {:13.2}", v);
    let (v, x) = bench_key_pair();
    bx ^= x;
    println!("Ed25519 key pair from seed:         {:13.2}", v);
    let (v, x) = bench_sign();
    bx ^= x;
    println!("Ed25519 sign:                       {:13.2}", v);
    let (v, x) = bench_verify(false);
    bx ^= x;
    println!("Ed25519 verify (strict):            {:13.2}", v);
    let (v, x) = bench_verify(true);
    bx ^= x;
    println!("Ed25519 verify (ZIP-215):           {:13.2}", v);

    println!("{}", bx);
}
