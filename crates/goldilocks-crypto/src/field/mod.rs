//! Goldilocks base field and its quintic extension.

pub mod fp;
pub mod fp5;

pub use fp::Fp;
pub use fp5::Fp5;
