//! Errors reported by key construction and conversion functions.
//!
//! Signature verification never reports an error: any problem with the
//! public key or the signature yields `false`.

use thiserror::Error;

/// Errors that can occur when building or converting keys.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid seed length: expected {expected}, got {actual}")]
    InvalidSeedLength { expected: usize, actual: usize },
    #[error("invalid private key length: expected {expected}, got {actual}")]
    InvalidPrivateKeyLength { expected: usize, actual: usize },
    #[error("invalid public key length: expected {expected}, got {actual}")]
    InvalidPublicKeyLength { expected: usize, actual: usize },
    #[error("invalid public key")]
    InvalidPublicKey,
}
