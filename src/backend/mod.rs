//! Machine-level arithmetic for Curve25519.
//!
//! This module contains the two arithmetic layers on which the curve
//! code is built:
//!
//!  - `FieldElement`: integers modulo p = 2^255 - 19, as ten signed
//!    32-bit limbs in radix 2^25.5 (the "ref10" representation).
//!    Products are computed over 64-bit intermediates and then carried
//!    back to the nominal limb bounds.
//!
//!  - Scalars modulo the group order l = 2^252 +
//!    27742317777372353535851937790883648493, handled directly on 32-byte
//!    (and 64-byte, for reduction) little-endian buffers.
//!
//! In general, the following properties apply to field elements:
//!
//!  - Usual arithmetic operators can be used (`+`, `-`, `*`, unary `-`,
//!    and the compound assignments `+=`, `-=` and `*=`), on both the raw
//!    type and references thereof. Additions and subtractions do not
//!    propagate carries.
//!
//!  - Function `set_cond(&mut self, a: &Self, ctl: u32)` sets the
//!    instance to the value of `a` if `ctl` is 0xFFFFFFFF, or leaves it
//!    unmodified if `ctl` is 0x00000000. `select()` and `cswap()` follow
//!    the same convention.
//!
//!  - Encoding with `to_bytes()` is always canonical. Decoding with
//!    `from_bytes()` ignores the top bit and never fails; values in the
//!    p to 2^255-1 range are implicitly reduced.

pub mod fe25519;
pub mod sc25519;

pub use fe25519::FieldElement;
