mod util;
use util::{cycles_seed, median_cycles};

use curve25519_ref10::x25519::{convert_public_key_to_x25519, x25519, x25519_base};
use curve25519_ref10::ed25519::key_pair_from_seed;

fn bench_x25519() -> (f64, u8) {
    let mut b = cycles_seed();
    let v = median_cycles(100, || {
        for _ in 0..100 {
            b = x25519(&b, &b);
        }
    });
    (v, b[0])
}

fn bench_x25519_base() -> (f64, u8) {
    let mut b = cycles_seed();
    let v = median_cycles(100, || {
        for _ in 0..100 {
            b = x25519_base(&b);
        }
    });
    (v, b[0])
}

fn bench_convert_public_key() -> (f64, u8) {
    let pk = match key_pair_from_seed(&cycles_seed()) {
        Ok(kp) => kp.public_key,
        Err(_) => return (0.0, 0),
    };
    let mut x = 0u8;
    let v = median_cycles(100, || {
        for _ in 0..100 {
            if let Ok(u) = convert_public_key_to_x25519(&pk) {
                x ^= u[0];
            }
        }
    });
    (v, x)
}

fn main() {
    let mut bx = 0u8;

    let (v, x) = bench_x25519();
    bx ^= x;
    println!("X25519 (generic):              {:13.2}", v);
    let (v, x) = bench_x25519_base();
    bx ^= x;
    println!("X25519 (base point):           {:13.2}", v);
    let (v, x) = bench_convert_public_key();
    bx ^= x;
    println!("Ed25519 -> X25519 public key:  {:13.2}", v);

    println!("{}", bx);
}
