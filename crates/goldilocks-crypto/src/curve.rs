//! The ECgFp5 prime-order group.
//!
//! The curve y^2 = x(x^2 + A x + B) over GF(p^5), with A = 2 and B = 263 w,
//! has a point of order two; the group used here is the quotient by it,
//! which has prime order [`crate::scalar::ORDER_LIMBS`]. Points are kept in
//! fractional (x:z:u:t) coordinates with x/z and u/t = x/y. The addition
//! and doubling formulas are complete: no input needs special handling.
//!
//! A group element is encoded as the single extension-field value w = t/u
//! (the neutral element encodes to zero).

use std::ops::{Add, Neg, Sub};

use crate::error::{Error, Result};
use crate::field::{Fp, Fp5};
use crate::scalar::Scalar;

/// Curve coefficient A = 2.
pub const A: Fp5 = Fp5::TWO;

/// Curve coefficient B = 263 w.
pub const B: Fp5 = Fp5::new([
    Fp::ZERO,
    Fp::from_canonical_u64(263),
    Fp::ZERO,
    Fp::ZERO,
    Fp::ZERO,
]);

const B_MUL2: Fp5 = Fp5::new([
    Fp::ZERO,
    Fp::from_canonical_u64(2 * 263),
    Fp::ZERO,
    Fp::ZERO,
    Fp::ZERO,
]);

const B_MUL4: Fp5 = Fp5::new([
    Fp::ZERO,
    Fp::from_canonical_u64(4 * 263),
    Fp::ZERO,
    Fp::ZERO,
    Fp::ZERO,
]);

/// Window width of the fixed-window scalar multiplication.
const WINDOW: usize = 4;

#[derive(Clone, Copy, Debug)]
pub struct ECPoint {
    x: Fp5,
    z: Fp5,
    u: Fp5,
    t: Fp5,
}

impl ECPoint {
    pub const NEUTRAL: Self = Self {
        x: Fp5::ZERO,
        z: Fp5::ONE,
        u: Fp5::ZERO,
        t: Fp5::ONE,
    };

    /// Conventional generator; it encodes to w = 4.
    pub const GENERATOR: Self = Self {
        x: Fp5::new([
            Fp::from_canonical_u64(12883135586176881569),
            Fp::from_canonical_u64(4356519642755055268),
            Fp::from_canonical_u64(5248930565894896907),
            Fp::from_canonical_u64(2165973894480315022),
            Fp::from_canonical_u64(2448410071095648785),
        ]),
        z: Fp5::ONE,
        u: Fp5::ONE,
        t: Fp5::new([
            Fp::from_canonical_u64(4),
            Fp::ZERO,
            Fp::ZERO,
            Fp::ZERO,
            Fp::ZERO,
        ]),
    };

    pub fn neutral() -> Self {
        Self::NEUTRAL
    }

    pub fn generator() -> Self {
        Self::GENERATOR
    }

    pub fn is_neutral(&self) -> bool {
        self.u.is_zero()
    }

    /// Encode as w = t / u.
    pub fn encode(&self) -> Fp5 {
        self.t * self.u.inverse_or_zero()
    }

    /// Decode a w value. Zero decodes to the neutral element; a w for which
    /// (w^2 - A)^2 - 4B is not a square encodes no group element.
    pub fn decode(w: &Fp5) -> Result<Self> {
        if w.is_zero() {
            return Ok(Self::NEUTRAL);
        }

        let e = w.square() - A;
        let delta = e.square() - B_MUL4;
        let r = delta.canonical_sqrt().ok_or(Error::NonResidue)?;

        // both roots give the same group element; pick x1 unless it is a square
        let half = Fp5::from_fp(Fp::TWO).inverse_or_zero();
        let x1 = (e + r) * half;
        let x2 = (e - r) * half;
        let x = if x1.legendre() == Fp::ONE { x2 } else { x1 };

        Ok(Self {
            x,
            z: Fp5::ONE,
            u: Fp5::ONE,
            t: *w,
        })
    }

    /// General addition (10 extension-field multiplications).
    pub fn add(self, rhs: &Self) -> Self {
        if self.is_neutral() {
            return *rhs;
        }
        if rhs.is_neutral() {
            return self;
        }

        let Self {
            x: x1,
            z: z1,
            u: u1,
            t: ta,
        } = self;
        let Self {
            x: x2,
            z: z2,
            u: u2,
            t: tb,
        } = *rhs;

        let t1 = x1 * x2;
        let t2 = z1 * z2;
        let t3 = u1 * u2;
        let t4 = ta * tb;
        let t5 = (x1 + z1) * (x2 + z2) - t1 - t2;
        let t6 = (u1 + ta) * (u2 + tb) - t3 - t4;
        let t7 = t1 + t2 * B;
        let t8 = t4 * t7;
        let t9 = t3 * (t5 * B_MUL2 + t7.double());
        let t10 = (t4 + t3.double()) * (t5 + t7);

        Self {
            x: (t10 - t8) * B,
            z: t8 - t9,
            u: t6 * (t2 * B - t1),
            t: t8 + t9,
        }
    }

    pub fn double(&self) -> Self {
        let Self { x, z, u, t } = *self;

        let t1 = z * t;
        let t2 = t1 * t;
        let x1 = t2.square();
        let z1 = t1 * u;
        let t3 = u.square();
        let w1 = t2 - (x + z).double() * t3;
        let t4 = z1.square();

        let new_z = w1.square();
        Self {
            x: t4 * B_MUL4,
            z: new_z,
            u: (w1 + z1).square() - t4 - new_z,
            t: x1.double() - t4.double().double() - new_z,
        }
    }

    /// Double `k` times.
    pub fn mdouble(&self, k: usize) -> Self {
        let mut result = *self;
        for _ in 0..k {
            result = result.double();
        }
        result
    }

    /// Scalar multiplication with a 4-bit fixed window, most significant
    /// digit first.
    pub fn mul(&self, scalar: &Scalar) -> Self {
        let mut table = [Self::NEUTRAL; 1 << WINDOW];
        for i in 1..table.len() {
            table[i] = table[i - 1].add(self);
        }

        let mut acc = Self::NEUTRAL;
        for &digit in scalar.to_nibbles().iter().rev() {
            acc = acc.mdouble(WINDOW);
            acc = acc.add(&table[digit as usize]);
        }
        acc
    }

    /// Multiply the generator.
    pub fn mul_generator(scalar: &Scalar) -> Self {
        Self::GENERATOR.mul(scalar)
    }

    pub fn neg(self) -> Self {
        Self {
            u: -self.u,
            ..self
        }
    }
}

impl Default for ECPoint {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Points compare by their encoding: u1 t2 == u2 t1.
impl PartialEq for ECPoint {
    fn eq(&self, other: &Self) -> bool {
        self.u * other.t == other.u * self.t
    }
}

impl Eq for ECPoint {}

impl Add for ECPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        ECPoint::add(self, &rhs)
    }
}

impl Sub for ECPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        ECPoint::add(self, &ECPoint::neg(rhs))
    }
}

impl Neg for ECPoint {
    type Output = Self;

    fn neg(self) -> Self {
        ECPoint::neg(self)
    }
}
