//! Goldilocks prime field arithmetic.
//!
//! Implements GF(p) where p = 2^64 - 2^32 + 1. Elements are always stored in
//! canonical form, so equality and byte encoding can work on the raw `u64`.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::{CryptoRng, RngCore};

use crate::error::{expect_len, Error, Result};

/// Goldilocks prime: p = 2^64 - 2^32 + 1 = 18446744069414584321
pub const MODULUS: u64 = 0xFFFF_FFFF_0000_0001;

/// 2^64 mod p, used by the reduction.
const EPSILON: u64 = 0xFFFF_FFFF;

/// p - 1 = 2^32 * ODD_FACTOR.
const TWO_ADICITY: usize = 32;
const ODD_FACTOR: u64 = 0xFFFF_FFFF;

/// Field element in GF(p).
///
/// Invariant: 0 <= value < MODULUS
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fp(u64);

impl Fp {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);
    pub const TWO: Self = Self(2);
    pub const NEG_ONE: Self = Self(MODULUS - 1);

    /// Generator of the multiplicative group (a quadratic non-residue).
    pub const MULTIPLICATIVE_GENERATOR: Self = Self(7);

    /// Size of the little-endian byte encoding.
    pub const BYTES: usize = 8;

    /// Create from a value already known to be below the modulus.
    pub const fn from_canonical_u64(value: u64) -> Self {
        debug_assert!(value < MODULUS);
        Self(value)
    }

    /// Create from any u64, reducing modulo p.
    pub const fn from_u64(value: u64) -> Self {
        if value >= MODULUS {
            Self(value - MODULUS)
        } else {
            Self(value)
        }
    }

    pub const fn from_u32(value: u32) -> Self {
        Self(value as u64)
    }

    /// Embed a signed integer as its residue modulo p.
    pub fn from_i64(value: i64) -> Self {
        if value >= 0 {
            Self::from_u64(value as u64)
        } else {
            -Self::from_u64(value.unsigned_abs())
        }
    }

    pub const fn to_canonical_u64(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn double(self) -> Self {
        self + self
    }

    pub fn square(self) -> Self {
        self * self
    }

    /// Compute self^exponent by square-and-multiply.
    pub fn pow(self, mut exponent: u64) -> Self {
        let mut result = Self::ONE;
        let mut base = self;

        while exponent > 0 {
            if exponent & 1 == 1 {
                result *= base;
            }
            base = base.square();
            exponent >>= 1;
        }

        result
    }

    /// Compute self^(2^k) by repeated squaring.
    pub fn exp_power_of_2(self, k: usize) -> Self {
        let mut result = self;
        for _ in 0..k {
            result = result.square();
        }
        result
    }

    /// Multiplicative inverse via Fermat's little theorem.
    pub fn inverse(self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::Domain("inverse of zero in Fp"));
        }
        Ok(self.pow(MODULUS - 2))
    }

    /// Euler's criterion: 0 for zero, 1 for squares, p - 1 otherwise.
    pub fn legendre(self) -> Self {
        self.pow((MODULUS - 1) / 2)
    }

    /// Square root by Tonelli-Shanks. `None` when self is not a square.
    pub fn sqrt(self) -> Option<Self> {
        if self.is_zero() {
            return Some(Self::ZERO);
        }
        if self.legendre() != Self::ONE {
            return None;
        }

        let mut m = TWO_ADICITY;
        let mut c = Self::MULTIPLICATIVE_GENERATOR.pow(ODD_FACTOR);
        let mut t = self.pow(ODD_FACTOR);
        let mut root = self.pow((ODD_FACTOR + 1) / 2);

        while t != Self::ONE {
            // least i with t^(2^i) == 1; always below m for a residue
            let mut i = 0;
            let mut acc = t;
            while acc != Self::ONE {
                acc = acc.square();
                i += 1;
            }

            let b = c.exp_power_of_2(m - i - 1);
            root *= b;
            c = b.square();
            t *= c;
            m = i;
        }

        Some(root)
    }

    pub fn to_bytes_le(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Decode exactly 8 little-endian bytes holding a canonical value.
    pub fn from_bytes_le(bytes: &[u8]) -> Result<Self> {
        expect_len(bytes, Self::BYTES)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        let value = u64::from_le_bytes(buf);
        if value >= MODULUS {
            return Err(Error::NonCanonical("Fp value is not below the modulus"));
        }
        Ok(Self(value))
    }

    /// Uniform sample by rejection.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let candidate = rng.next_u64();
            if candidate < MODULUS {
                return Self(candidate);
            }
        }
    }
}

/// Reduce a 128-bit product modulo p using 2^64 = 2^32 - 1 and 2^96 = -1.
#[inline]
fn reduce128(x: u128) -> u64 {
    let lo = x as u64;
    let hi = (x >> 64) as u64;
    let hi_hi = hi >> 32;
    let hi_lo = hi & EPSILON;

    let (mut t0, borrow) = lo.overflowing_sub(hi_hi);
    if borrow {
        t0 = t0.wrapping_sub(EPSILON);
    }
    let t1 = hi_lo * EPSILON;

    let (sum, carry) = t0.overflowing_add(t1);
    let sum = sum.wrapping_add(EPSILON * carry as u64);
    if sum >= MODULUS {
        sum - MODULUS
    } else {
        sum
    }
}

impl Add for Fp {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let (sum, carry) = self.0.overflowing_add(rhs.0);
        if carry || sum >= MODULUS {
            Self(sum.wrapping_sub(MODULUS))
        } else {
            Self(sum)
        }
    }
}

impl AddAssign for Fp {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Fp {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let (diff, borrow) = self.0.overflowing_sub(rhs.0);
        if borrow {
            Self(diff.wrapping_add(MODULUS))
        } else {
            Self(diff)
        }
    }
}

impl SubAssign for Fp {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for Fp {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(reduce128(self.0 as u128 * rhs.0 as u128))
    }
}

impl MulAssign for Fp {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Neg for Fp {
    type Output = Self;

    fn neg(self) -> Self {
        if self.0 == 0 {
            self
        } else {
            Self(MODULUS - self.0)
        }
    }
}

impl Sum for Fp {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl From<u32> for Fp {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl fmt::Display for Fp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
