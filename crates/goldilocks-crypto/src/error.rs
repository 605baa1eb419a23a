//! Error types for the field, curve and signature primitives.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("Non-canonical encoding: {0}")]
    NonCanonical(&'static str),

    #[error("Domain error: {0}")]
    Domain(&'static str),

    #[error("Element is not a quadratic residue")]
    NonResidue,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Check a byte slice against a fixed width.
pub(crate) fn expect_len(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(Error::Length {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}
