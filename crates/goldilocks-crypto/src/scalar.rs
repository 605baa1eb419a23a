//! Scalar field of the ECgFp5 group: integers modulo the prime group order.
//!
//! Values are kept canonical as five little-endian u64 limbs. Arithmetic
//! goes through `BigUint`; signing touches only a handful of scalars so
//! the conversion cost does not matter next to the curve work.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::OnceLock;

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use crate::error::{expect_len, Error, Result};
use crate::field::Fp5;

/// Group order n (319 bits), little-endian limbs.
pub const ORDER_LIMBS: [u64; 5] = [
    0xE80F_D996_948B_FFE1,
    0xE888_5C39_D724_A09C,
    0x7FFF_FFE6_CFB8_0639,
    0x7FFF_FFF1_0000_0016,
    0x7FFF_FFFD_8000_0007,
];

fn order() -> &'static BigUint {
    static ORDER: OnceLock<BigUint> = OnceLock::new();
    ORDER.get_or_init(|| limbs_to_biguint(&ORDER_LIMBS))
}

fn limbs_to_biguint(limbs: &[u64; 5]) -> BigUint {
    let mut bytes = [0u8; 40];
    for (chunk, limb) in bytes.chunks_exact_mut(8).zip(limbs) {
        chunk.copy_from_slice(&limb.to_le_bytes());
    }
    BigUint::from_bytes_le(&bytes)
}

/// Compare two little-endian limb arrays as integers.
fn cmp_limbs(a: &[u64; 5], b: &[u64; 5]) -> Ordering {
    a.iter().rev().cmp(b.iter().rev())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Scalar([u64; 5]);

impl Scalar {
    pub const ZERO: Self = Self([0; 5]);
    pub const ONE: Self = Self([1, 0, 0, 0, 0]);

    /// Size of the little-endian byte encoding.
    pub const BYTES: usize = 40;

    /// Number of 4-bit digits in [`Scalar::to_nibbles`].
    pub const NIBBLES: usize = 80;

    pub const fn from_u64(value: u64) -> Self {
        Self([value, 0, 0, 0, 0])
    }

    /// Reduce an arbitrary big integer modulo n.
    pub fn from_biguint(value: &BigUint) -> Self {
        let reduced = value % order();
        let mut limbs = [0u64; 5];
        for (limb, digit) in limbs.iter_mut().zip(reduced.to_u64_digits()) {
            *limb = digit;
        }
        Self(limbs)
    }

    pub fn to_biguint(&self) -> BigUint {
        limbs_to_biguint(&self.0)
    }

    /// Interpret the five base-field limbs as a 320-bit integer
    /// (c4 most significant) and reduce modulo n.
    pub fn from_fp5(value: &Fp5) -> Self {
        let limbs = value.to_u64_array();
        if cmp_limbs(&limbs, &ORDER_LIMBS) == Ordering::Less {
            return Self(limbs);
        }
        Self::from_biguint(&limbs_to_biguint(&limbs))
    }

    pub fn limbs(&self) -> &[u64; 5] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 5]
    }

    pub fn square(&self) -> Self {
        *self * *self
    }

    pub fn pow(&self, exponent: &BigUint) -> Self {
        Self::from_biguint(&self.to_biguint().modpow(exponent, order()))
    }

    /// Multiplicative inverse via Fermat, failing on zero.
    pub fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::Domain("inverse of zero scalar"));
        }
        let exponent = order().clone() - 2u32;
        Ok(self.pow(&exponent))
    }

    /// Bit `index` of the canonical value, little-endian; false past bit 319.
    pub fn bit(&self, index: usize) -> bool {
        if index >= 320 {
            return false;
        }
        (self.0[index / 64] >> (index % 64)) & 1 == 1
    }

    /// 80 little-endian 4-bit digits.
    pub fn to_nibbles(&self) -> [u8; 80] {
        std::array::from_fn(|i| ((self.0[i / 16] >> (4 * (i % 16))) & 0xF) as u8)
    }

    pub fn to_bytes_le(&self) -> [u8; 40] {
        let mut out = [0u8; 40];
        for (chunk, limb) in out.chunks_exact_mut(8).zip(self.0) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }
        out
    }

    /// Decode exactly 40 little-endian bytes holding a value below n.
    pub fn from_bytes_le(bytes: &[u8]) -> Result<Self> {
        expect_len(bytes, Self::BYTES)?;
        let mut limbs = [0u64; 5];
        for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *limb = u64::from_le_bytes(buf);
        }
        if cmp_limbs(&limbs, &ORDER_LIMBS) != Ordering::Less {
            return Err(Error::NonCanonical("scalar is not below the group order"));
        }
        Ok(Self(limbs))
    }

    /// Parse a 40-byte little-endian hex string, with or without `0x`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)?;
        Self::from_bytes_le(&bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes_le())
    }

    /// Uniform sample below n: draw 319 bits and reject values >= n.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 40];
        loop {
            rng.fill_bytes(&mut bytes);
            bytes[39] &= 0x7F;
            if let Ok(scalar) = Self::from_bytes_le(&bytes) {
                return scalar;
            }
        }
    }
}

impl Add for Scalar {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_biguint(&(self.to_biguint() + rhs.to_biguint()))
    }
}

impl Sub for Scalar {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for Scalar {
    type Output = Self;

    fn neg(self) -> Self {
        if self.is_zero() {
            return self;
        }
        Self::from_biguint(&(order() - self.to_biguint()))
    }
}

impl Mul for Scalar {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_biguint(&(self.to_biguint() * rhs.to_biguint()))
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Fp;
    use crate::poseidon2::hash_to_fp5;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ORDER_DEC: &str =
        "1067993516717146951041484916571792702745057740581727230159139685185762082554198619328292418486241";

    fn order_minus_one() -> Scalar {
        -Scalar::ONE
    }

    #[test]
    fn test_order_limbs_match_decimal() {
        assert_eq!(order().to_string(), ORDER_DEC);
        assert_eq!(order().bits(), 319);
    }

    #[test]
    fn test_order_minus_one_encoding() {
        let max = order_minus_one();
        assert_eq!(
            max.to_hex(),
            "e0ff8b9496d90fe89ca024d7395c88e83906b8cfe6ffff7f16000000f1ffff7f07000080fdffff7f"
        );
        assert_eq!(max + Scalar::ONE, Scalar::ZERO);
        assert_eq!(Scalar::from_bytes_le(&max.to_bytes_le()).unwrap(), max);
    }

    #[test]
    fn test_rejects_order_and_wrong_length() {
        let mut bytes = order_minus_one().to_bytes_le();
        bytes[0] += 1;
        assert!(matches!(
            Scalar::from_bytes_le(&bytes),
            Err(Error::NonCanonical(_))
        ));
        assert!(matches!(
            Scalar::from_bytes_le(&[0u8; 39]),
            Err(Error::Length {
                expected: 40,
                actual: 39
            })
        ));
        assert!(Scalar::from_bytes_le(&[0u8; 41]).is_err());
    }

    #[test]
    fn test_from_fp5_known_answer() {
        let input = [1u64, 2, 3].map(Fp::from_u64);
        let e = Scalar::from_fp5(&hash_to_fp5(&input));
        assert_eq!(
            e.to_string(),
            "379055958827670197953213450094608939023420302459946114799785425427022028213503417080317582682091"
        );
    }

    #[test]
    fn test_from_fp5_reduces_large_values() {
        let all_max = Fp5::from_u64_array([crate::field::fp::MODULUS - 1; 5]);
        let reduced = Scalar::from_fp5(&all_max);
        let expected = limbs_to_biguint(&all_max.to_u64_array()) % order();
        assert_eq!(reduced.to_biguint(), expected);
    }

    #[test]
    fn test_arithmetic_laws() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let a = Scalar::random(&mut rng);
            let b = Scalar::random(&mut rng);
            let c = Scalar::random(&mut rng);
            assert_eq!(a + b, b + a);
            assert_eq!((a * b) * c, a * (b * c));
            assert_eq!(a * (b + c), a * b + a * c);
            assert_eq!(a - a, Scalar::ZERO);
            assert_eq!(a - b + b, a);
            assert_eq!(a.square(), a * a);
        }
    }

    #[test]
    fn test_inverse() {
        let mut rng = StdRng::seed_from_u64(4);
        let a = Scalar::random(&mut rng);
        assert_eq!(a * a.inverse().unwrap(), Scalar::ONE);
        assert_eq!(
            Scalar::from_u64(2).inverse().unwrap() * Scalar::from_u64(2),
            Scalar::ONE
        );
        assert!(Scalar::ZERO.inverse().is_err());
    }

    #[test]
    fn test_nibbles_and_bits_reconstruct_value() {
        let mut rng = StdRng::seed_from_u64(5);
        let a = Scalar::random(&mut rng);

        let from_nibbles = a
            .to_nibbles()
            .iter()
            .rev()
            .fold(BigUint::from(0u32), |acc, &d| (acc << 4) + BigUint::from(d));
        assert_eq!(from_nibbles, a.to_biguint());

        let from_bits = (0..320)
            .rev()
            .fold(BigUint::from(0u32), |acc, i| (acc << 1) + BigUint::from(a.bit(i) as u8));
        assert_eq!(from_bits, a.to_biguint());
        assert!(!a.bit(400));
    }

    #[test]
    fn test_from_hex() {
        let key =
            "ed636277f3753b6c0275f7a28c2678a7f3a95655e09deaebec15179b50c5da7f903152e50f594f7b";
        let scalar = Scalar::from_hex(key).unwrap();
        assert_eq!(scalar.to_hex(), key);
        assert_eq!(Scalar::from_hex(&format!("0x{key}")).unwrap(), scalar);
        assert!(matches!(Scalar::from_hex("zz"), Err(Error::Hex(_))));
        assert!(matches!(
            Scalar::from_hex("00ff"),
            Err(Error::Length { .. })
        ));
    }

    #[test]
    fn test_random_is_canonical() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..50 {
            let s = Scalar::random(&mut rng);
            assert_eq!(cmp_limbs(s.limbs(), &ORDER_LIMBS), Ordering::Less);
        }
    }
}
