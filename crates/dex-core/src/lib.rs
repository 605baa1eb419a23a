//! DEX Core Library
//!
//! Transaction codec, key table and configuration for signing exchange
//! transactions with Goldilocks-field Schnorr keys.

pub mod config;
pub mod error;
pub mod signing;

pub use error::{Error, Result};
