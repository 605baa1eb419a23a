//! DEX Signer: Goldilocks-field Schnorr signing for exchange transactions
//!
//! This is the root crate that provides benchmark and integration-test access
//! to the workspace. For actual functionality, use the individual crates
//! directly:
//!
//! - `goldilocks-crypto`: field arithmetic, Poseidon2, ECgFp5, Schnorr
//! - `dex-core`: transaction codec, signer, configuration
//! - `sign-bridge`: JSON-lines signing bridge binary

// Re-export for benchmarks
pub use dex_core as core;
pub use goldilocks_crypto as crypto;
