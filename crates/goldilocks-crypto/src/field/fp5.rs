//! Quintic extension GF(p^5) = GF(p)[w] / (w^5 - 3).
//!
//! Element `[c0, c1, c2, c3, c4]` stands for c0 + c1 w + c2 w^2 + c3 w^3 + c4 w^4.
//! Inversion, the Legendre symbol and square roots all go through the
//! Frobenius map, which on this basis is a per-coefficient scaling.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::{CryptoRng, RngCore};

use super::fp::Fp;
use crate::error::{expect_len, Error, Result};

/// The constant W in w^5 = W.
const W: Fp = Fp::from_canonical_u64(3);

/// 2 * W, used by the squaring formula.
const DOUBLE_W: Fp = Fp::from_canonical_u64(6);

/// Primitive 5th root of unity: the Frobenius map scales c_i by DTH_ROOT^i.
pub const DTH_ROOT: Fp = Fp::from_canonical_u64(1041288259238279555);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fp5([Fp; 5]);

impl Fp5 {
    pub const ZERO: Self = Self([Fp::ZERO; 5]);
    pub const ONE: Self = Self([Fp::ONE, Fp::ZERO, Fp::ZERO, Fp::ZERO, Fp::ZERO]);
    pub const TWO: Self = Self([Fp::TWO, Fp::ZERO, Fp::ZERO, Fp::ZERO, Fp::ZERO]);

    /// Size of the little-endian byte encoding.
    pub const BYTES: usize = 40;

    pub const fn new(coeffs: [Fp; 5]) -> Self {
        Self(coeffs)
    }

    /// Build from raw limbs, reducing each modulo p.
    pub const fn from_u64_array(limbs: [u64; 5]) -> Self {
        Self([
            Fp::from_u64(limbs[0]),
            Fp::from_u64(limbs[1]),
            Fp::from_u64(limbs[2]),
            Fp::from_u64(limbs[3]),
            Fp::from_u64(limbs[4]),
        ])
    }

    /// Embed a base-field element as the constant term.
    pub const fn from_fp(value: Fp) -> Self {
        Self([value, Fp::ZERO, Fp::ZERO, Fp::ZERO, Fp::ZERO])
    }

    pub const fn coeffs(&self) -> &[Fp; 5] {
        &self.0
    }

    pub fn to_u64_array(&self) -> [u64; 5] {
        self.0.map(Fp::to_canonical_u64)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| c.is_zero())
    }

    pub fn double(&self) -> Self {
        *self + *self
    }

    /// Multiply every coefficient by a base-field element.
    pub fn mul_fp(&self, scalar: Fp) -> Self {
        Self(self.0.map(|c| c * scalar))
    }

    /// Dedicated squaring, algebraically equal to `self * self`.
    pub fn square(&self) -> Self {
        let [a0, a1, a2, a3, a4] = self.0;
        let a0_double = a0.double();
        let a1_double = a1.double();

        let c0 = a0.square() + DOUBLE_W * (a1 * a4 + a2 * a3);
        let c1 = a0_double * a1 + DOUBLE_W * (a2 * a4) + W * a3.square();
        let c2 = a0_double * a2 + a1.square() + DOUBLE_W * (a4 * a3);
        let c3 = a0_double * a3 + a1_double * a2 + W * a4.square();
        let c4 = a0_double * a4 + a1_double * a3 + a2.square();

        Self([c0, c1, c2, c3, c4])
    }

    /// Compute self^(2^k) by repeated squaring.
    pub fn exp_power_of_2(&self, k: usize) -> Self {
        let mut result = *self;
        for _ in 0..k {
            result = result.square();
        }
        result
    }

    /// Raise to the p-th power.
    pub fn frobenius(&self) -> Self {
        self.repeated_frobenius(1)
    }

    /// Raise to the (p^count)-th power; the map has order 5.
    pub fn repeated_frobenius(&self, count: usize) -> Self {
        let count = count % 5;
        if count == 0 {
            return *self;
        }

        let z0 = DTH_ROOT.pow(count as u64);
        let mut z = Fp::ONE;
        let mut result = self.0;
        for coeff in result.iter_mut().skip(1) {
            z *= z0;
            *coeff *= z;
        }
        Self(result)
    }

    /// Constant term of `self * other`, for when the product is known to
    /// lie in the base field.
    fn mul_constant_term(&self, other: &Self) -> Fp {
        let [a0, a1, a2, a3, a4] = self.0;
        let [b0, b1, b2, b3, b4] = other.0;
        a0 * b0 + W * (a1 * b4 + a2 * b3 + a3 * b2 + a4 * b1)
    }

    /// Multiplicative inverse, or zero for zero.
    ///
    /// x^(p + p^2 + p^3 + p^4) times x is the norm of x, a base-field value,
    /// so the inverse is that product divided by the norm.
    pub fn inverse_or_zero(&self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }

        let d = self.frobenius();
        let e = d * d.frobenius();
        let f = e * e.repeated_frobenius(2);
        let norm = self.mul_constant_term(&f);

        match norm.inverse() {
            Ok(norm_inv) => f.mul_fp(norm_inv),
            // the norm of a non-zero element is non-zero
            Err(_) => Self::ZERO,
        }
    }

    /// Divide, failing on a zero divisor.
    pub fn div(&self, rhs: &Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::Domain("division by zero in Fp5"));
        }
        Ok(*self * rhs.inverse_or_zero())
    }

    /// Quadratic character: 0 for zero, 1 for squares, p - 1 otherwise.
    pub fn legendre(&self) -> Fp {
        let frob1 = self.frobenius();
        let frob2 = frob1.frobenius();
        let frob1_frob2 = frob1 * frob2;
        let frob3_frob4 = frob1_frob2.repeated_frobenius(2);
        let norm = (*self * frob1_frob2 * frob3_frob4).0[0];

        // norm^((p - 1) / 2) with (p - 1) / 2 = 2^63 - 2^31
        let norm_31 = norm.exp_power_of_2(31);
        let norm_63 = norm_31.exp_power_of_2(32);
        match norm_31.inverse() {
            Ok(inv) => norm_63 * inv,
            Err(_) => Fp::ZERO,
        }
    }

    /// Square root. `None` when self is not a square in GF(p^5).
    ///
    /// Reduces to a base-field square root: with v = x^(2^31) and
    /// d = x * v^(2^32) / v = x^((p+1)/2), e = (d * d^(p^2))^p makes
    /// x * e^2 land in GF(p).
    pub fn sqrt(&self) -> Option<Self> {
        let v = self.exp_power_of_2(31);
        let d = *self * v.exp_power_of_2(32) * v.inverse_or_zero();
        let e = (d * d.repeated_frobenius(2)).frobenius();
        let f = e.square();

        let g = self.mul_constant_term(&f);
        let s = g.sqrt()?;

        Some(Self::from_fp(s) * e.inverse_or_zero())
    }

    /// Square root with the sign convention `sgn0(root) == false`.
    pub fn canonical_sqrt(&self) -> Option<Self> {
        let root = self.sqrt()?;
        if root.sgn0() {
            Some(-root)
        } else {
            Some(root)
        }
    }

    /// Sign bit, scanning limbs from c0. Any zero prefix counts as even.
    pub fn sgn0(&self) -> bool {
        let mut sign = false;
        let mut zero = true;
        for limb in self.0 {
            let limb_even = limb.to_canonical_u64() & 1 == 0;
            sign = sign || (zero && limb_even);
            zero = zero && limb.is_zero();
        }
        sign
    }

    pub fn to_bytes_le(&self) -> [u8; 40] {
        let mut out = [0u8; 40];
        for (chunk, limb) in out.chunks_exact_mut(8).zip(self.0) {
            chunk.copy_from_slice(&limb.to_bytes_le());
        }
        out
    }

    /// Decode exactly 40 bytes: five canonical 8-byte little-endian limbs.
    pub fn from_bytes_le(bytes: &[u8]) -> Result<Self> {
        expect_len(bytes, Self::BYTES)?;
        let mut limbs = [Fp::ZERO; 5];
        for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
            *limb = Fp::from_bytes_le(chunk)?;
        }
        Ok(Self(limbs))
    }

    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self(std::array::from_fn(|_| Fp::random(rng)))
    }
}

impl Add for Fp5 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl AddAssign for Fp5 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Fp5 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl SubAssign for Fp5 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Fp5 {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.map(|c| -c))
    }
}

impl Mul for Fp5 {
    type Output = Self;

    /// Schoolbook product; terms of degree 5..8 fold back as 3 * w^(k-5).
    fn mul(self, rhs: Self) -> Self {
        let [a0, a1, a2, a3, a4] = self.0;
        let [b0, b1, b2, b3, b4] = rhs.0;

        let c0 = a0 * b0 + W * (a1 * b4 + a2 * b3 + a3 * b2 + a4 * b1);
        let c1 = a0 * b1 + a1 * b0 + W * (a2 * b4 + a3 * b3 + a4 * b2);
        let c2 = a0 * b2 + a1 * b1 + a2 * b0 + W * (a3 * b4 + a4 * b3);
        let c3 = a0 * b3 + a1 * b2 + a2 * b1 + a3 * b0 + W * (a4 * b4);
        let c4 = a0 * b4 + a1 * b3 + a2 * b2 + a3 * b1 + a4 * b0;

        Self([c0, c1, c2, c3, c4])
    }
}

impl MulAssign for Fp5 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl From<Fp> for Fp5 {
    fn from(value: Fp) -> Self {
        Self::from_fp(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::fp::MODULUS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(55)
    }

    #[test]
    fn test_mul_known_answer() {
        let a = Fp5::from_u64_array([1, 2, 3, 4, 5]);
        let b = Fp5::from_u64_array([6, 7, 8, 9, 10]);
        assert_eq!((a * b).to_u64_array(), [348, 337, 295, 220, 110]);
    }

    #[test]
    fn test_w_to_the_fifth_is_three() {
        let w = Fp5::from_u64_array([0, 1, 0, 0, 0]);
        let w4 = Fp5::from_u64_array([0, 0, 0, 0, 1]);
        assert_eq!(w * w4, Fp5::from_u64_array([3, 0, 0, 0, 0]));
        assert_eq!(w4 * w4, Fp5::from_u64_array([0, 0, 0, 3, 0]));
    }

    #[test]
    fn test_square_matches_mul() {
        let mut rng = rng();
        for _ in 0..50 {
            let a = Fp5::random(&mut rng);
            assert_eq!(a.square(), a * a);
        }
    }

    #[test]
    fn test_field_axioms() {
        let mut rng = rng();
        for _ in 0..30 {
            let a = Fp5::random(&mut rng);
            let b = Fp5::random(&mut rng);
            let c = Fp5::random(&mut rng);
            assert_eq!((a + b) + c, a + (b + c));
            assert_eq!((a * b) * c, a * (b * c));
            assert_eq!(a * b, b * a);
            assert_eq!(a * (b + c), a * b + a * c);
            assert_eq!(a + (-a), Fp5::ZERO);
            assert_eq!(a - b, a + (-b));
        }
    }

    #[test]
    fn test_inverse_known_answer() {
        let a = Fp5::from_u64_array([1, 2, 3, 4, 5]);
        assert_eq!(
            a.inverse_or_zero().to_u64_array(),
            [
                16227807958868272813,
                4552730750487813724,
                11612833514307017418,
                9161515214422980997,
                13509202856671625680,
            ]
        );
    }

    #[test]
    fn test_inverse_or_zero() {
        let mut rng = rng();
        for _ in 0..20 {
            let a = Fp5::random(&mut rng);
            assert_eq!(a * a.inverse_or_zero(), Fp5::ONE);
        }
        assert_eq!(Fp5::ZERO.inverse_or_zero(), Fp5::ZERO);
    }

    #[test]
    fn test_inverse_only_top_limb() {
        let a = Fp5::from_u64_array([0, 0, 0, 0, 9]);
        assert_eq!(a * a.inverse_or_zero(), Fp5::ONE);
    }

    #[test]
    fn test_div() {
        let mut rng = rng();
        let a = Fp5::random(&mut rng);
        let b = Fp5::random(&mut rng);
        assert_eq!(a.div(&b).unwrap() * b, a);
        assert!(matches!(a.div(&Fp5::ZERO), Err(Error::Domain(_))));
    }

    #[test]
    fn test_frobenius_is_pth_power() {
        let mut rng = rng();
        let a = Fp5::random(&mut rng);

        // a^p by square-and-multiply over the bits of p
        let mut expected = Fp5::ONE;
        for bit in (0..64).rev() {
            expected = expected.square();
            if (MODULUS >> bit) & 1 == 1 {
                expected *= a;
            }
        }
        assert_eq!(a.frobenius(), expected);
    }

    #[test]
    fn test_repeated_frobenius_has_order_five() {
        let mut rng = rng();
        let a = Fp5::random(&mut rng);
        assert_eq!(a.repeated_frobenius(0), a);
        assert_eq!(a.repeated_frobenius(5), a);
        assert_eq!(a.repeated_frobenius(7), a.repeated_frobenius(2));
        assert_eq!(a.frobenius().frobenius().frobenius(), a.repeated_frobenius(3));
        assert_eq!(DTH_ROOT.pow(5), Fp::ONE);
    }

    #[test]
    fn test_sqrt_of_squares() {
        let mut rng = rng();
        for _ in 0..10 {
            let a = Fp5::random(&mut rng);
            let sq = a.square();
            assert_eq!(sq.legendre(), Fp::ONE);
            let root = sq.sqrt().expect("square has a root");
            assert_eq!(root.square(), sq);
            assert!(root == a || root == -a);
        }
    }

    #[test]
    fn test_non_residue_has_no_root() {
        let mut rng = rng();
        let mut found = 0;
        for _ in 0..20 {
            let a = Fp5::random(&mut rng);
            if a.legendre() == Fp::NEG_ONE {
                assert_eq!(a.sqrt(), None);
                assert_eq!(a.canonical_sqrt(), None);
                found += 1;
            }
        }
        assert!(found > 0);
    }

    #[test]
    fn test_canonical_sqrt_sign() {
        let mut rng = rng();
        for _ in 0..10 {
            let a = Fp5::random(&mut rng);
            let root = a.square().canonical_sqrt().unwrap();
            assert!(!root.sgn0());
            assert_eq!(root.square(), a.square());
        }
    }

    #[test]
    fn test_legendre_of_zero() {
        assert_eq!(Fp5::ZERO.legendre(), Fp::ZERO);
        assert_eq!(Fp5::ZERO.sqrt(), Some(Fp5::ZERO));
    }

    #[test]
    fn test_sgn0() {
        assert!(Fp5::ZERO.sgn0());
        assert!(!Fp5::ONE.sgn0());
        assert!(Fp5::TWO.sgn0());
        assert!(Fp5::from_u64_array([0, 3, 0, 0, 0]).sgn0());
        assert!(!Fp5::from_u64_array([5, 4, 0, 0, 0]).sgn0());
        assert!(Fp5::from_u64_array([8, 3, 0, 0, 0]).sgn0());
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut rng = rng();
        let a = Fp5::random(&mut rng);
        assert_eq!(Fp5::from_bytes_le(&a.to_bytes_le()).unwrap(), a);

        let top = Fp5::from_u64_array([0, 0, 0, 0, 0xdead_beef]);
        let bytes = top.to_bytes_le();
        assert_eq!(&bytes[..32], &[0u8; 32]);
        assert_eq!(Fp5::from_bytes_le(&bytes).unwrap(), top);
    }

    #[test]
    fn test_bytes_length_checked() {
        assert!(Fp5::from_bytes_le(&[0u8; 40]).is_ok());
        assert!(matches!(
            Fp5::from_bytes_le(&[0u8; 39]),
            Err(Error::Length {
                expected: 40,
                actual: 39
            })
        ));
        assert!(Fp5::from_bytes_le(&[0u8; 41]).is_err());
    }
}
