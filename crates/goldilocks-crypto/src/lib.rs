//! Goldilocks-field cryptography for exchange transaction signing.
//!
//! Layers, leaves first:
//! - [`field`]: GF(p) with p = 2^64 - 2^32 + 1 and its quintic extension
//! - [`poseidon2`]: the width-12 sponge used for transaction hashing
//! - [`scalar`]: integers modulo the curve group order
//! - [`curve`]: the ECgFp5 group
//! - [`schnorr`]: signatures over that group

pub mod curve;
pub mod error;
pub mod field;
pub mod poseidon2;
pub mod scalar;
pub mod schnorr;

pub use curve::ECPoint;
pub use error::{Error, Result};
pub use field::{Fp, Fp5};
pub use poseidon2::{hash_no_pad, hash_to_fp5, hash_two_to_one, permute, HashOut};
pub use scalar::Scalar;
pub use schnorr::{Signature, SigningKey};
