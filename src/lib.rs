//! Ed25519 signatures over Edwards25519, with the "ref10" arithmetic.
//!
//! This library implements the Edwards25519 curve and the Ed25519
//! signature scheme ([RFC 8032]), with a strict verifier and a relaxed
//! verifier following the [ZIP-215] consensus rules. Ed25519 keys can be
//! converted into X25519 keys ([RFC 7748]), and the X25519 function
//! itself is provided.
//!
//! The field arithmetic uses ten signed 32-bit limbs in radix 2^25.5,
//! with 64-bit intermediate products; scalars modulo the group order are
//! handled with 21-bit limbs. Fixed-base multiplications use a
//! precomputed table of 256 multiples of the base point.
//!
//! # Modules
//!
//!  - `backend`: field elements (`FieldElement`) and scalar arithmetic
//!    (reduction, multiply-add, canonicity check).
//!
//!  - `edwards25519`: the five point representations (extended,
//!    projective, completed, cached and precomputed) and the group law.
//!
//!  - `ed25519`: key pairs, signing and strict verification.
//!
//!  - `zip215`: verification with the ZIP-215 rules.
//!
//!  - `x25519`: X25519, and conversion of Ed25519 keys.
//!
//! # Usage
//!
//! The library is `no_std` and performs no heap allocation. By default
//! it compiles against the standard library (feature `std`), which only
//! affects the `thiserror` and `tracing` dependencies.
//!
//! # Conventions
//!
//! All implemented functions should be strictly constant-time, unless
//! explicitly documented otherwise (non-constant-time functions normally
//! have "vartime" in their name, and the verification functions, which
//! only handle public data, are not constant-time). Low-level functions
//! that return or use a potentially secret Boolean value use the `u32`
//! type; the convention is that 0xFFFFFFFF means "true", and 0x00000000
//! means "false".
//!
//! Keys and signatures are plain byte arrays. Key construction and
//! conversion functions report malformed inputs with an `Error`;
//! verification functions only return `bool`.
//!
//! Diagnostic events (rejection reasons for malformed verification
//! inputs) are emitted with `tracing` at the debug level. Secret values
//! are never logged.
//!
//! [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748
//! [RFC 8032]: https://datatracker.ietf.org/doc/html/rfc8032
//! [ZIP-215]: https://zips.z.cash/zip-0215

#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub use rand_core::{CryptoRng, RngCore};

pub mod backend;
pub mod field;
pub mod edwards25519;
pub mod ed25519;
pub mod zip215;
pub mod x25519;

mod error;
pub use error::Error;
