// Copyright 2016 The Ramp Developers
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use std::cmp::{self, Ordering};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use ieee754::Ieee754;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer as IntegerOps;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::dispatch::{self, BinOp};
use crate::int::Integer;
use crate::ll::Cell;
use crate::traits::{SupportsIntegerAdd, SupportsIntegerMultiply, SupportsIntegerSubtract};

/// Smallest precision a `Float` can have, in bits.
pub const PREC_MIN: u32 = 1;
/// Largest precision a `Float` can have, in bits.
pub const PREC_MAX: u32 = (i32::max_value() - 1) as u32;

/**
 * An arbitrary-precision binary floating-point number.
 *
 * The value is `mant * 2^exp` with `mant` holding at most `prec` significant
 * bits. Every operation computes its exact result and then rounds it to the
 * precision of the result, to nearest with ties going to the even mantissa.
 *
 * The result of an operation between two floats has the precision of the
 * left-hand operand. Mixed with an `Integer`, on either side, the result has
 * the float's precision:
 *
 * ```
 * # use ramp_tower::{Float, Integer};
 * let x = Float::from_f64(2, 3.0).unwrap();
 * let y = &Integer::from(5) * &x;
 * assert_eq!(y.prec(), 2);
 * assert_eq!(y.to_f64(), 16.0);
 * ```
 *
 * Equality compares values; the precision is not part of it.
 */
#[derive(Clone, Debug)]
pub struct Float {
    prec: u32,
    // Odd, or zero with `exp` zero
    mant: Cell,
    exp: i64,
}

#[inline]
fn check_prec(prec: u32) {
    assert!(prec >= PREC_MIN && prec <= PREC_MAX, "precision out of range");
}

impl Float {
    /// Creates a zero with the given precision.
    pub fn new(prec: u32) -> Float {
        check_prec(prec);
        Float {
            prec: prec,
            mant: Cell::zero(),
            exp: 0,
        }
    }

    /// Creates a float with the given precision from an `Integer`, rounding
    /// it if it does not fit.
    pub fn with_val(prec: u32, val: &Integer) -> Float {
        check_prec(prec);
        Float::round(prec, val.cell().clone(), 0)
    }

    /// Creates a float with the given precision from an `f64`. Returns `None`
    /// for NaN and infinities.
    pub fn from_f64(prec: u32, val: f64) -> Option<Float> {
        check_prec(prec);
        if !val.is_finite() {
            return None;
        }

        let (neg, raw_exp, signif) = val.decompose_raw();
        let (signif, exp) = if raw_exp == 0 {
            // Subnormal
            (signif, -1074)
        } else {
            (signif | (1 << 52), raw_exp as i64 - 1075)
        };

        let mut mant = Cell::from(signif);
        if neg {
            mant = -mant;
        }
        Some(Float::round(prec, mant, exp))
    }

    #[inline]
    pub fn prec(&self) -> u32 {
        self.prec
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mant.is_zero()
    }

    /// Returns -1, 0 or 1 for `self` being negative, zero or positive.
    pub fn sign(&self) -> i32 {
        crate::ll::sign(&self.mant)
    }

    /// Converts to the nearest `f64`, ties to even, saturating to infinity.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }

        // The value lies in [2^top, 2^(top + 1))
        let top = self.exp + self.mant.bits() as i64 - 1;
        // Below 2^-1022 there are fewer bits left above 2^-1074
        let prec = cmp::min(53, top + 1075);

        let v = if prec >= 1 {
            let r = Float::round(prec as u32, self.mant.clone(), self.exp);
            let m = r.mant.magnitude().to_u64().unwrap_or(u64::max_value());
            scale(m as f64, r.exp)
        } else if prec == 0 && !self.mant.magnitude().is_one() {
            // Past the midpoint between zero and the smallest subnormal
            scale(1.0, -1074)
        } else {
            0.0
        };

        if self.sign() < 0 { -v } else { v }
    }

    /**
     * Builds the float closest to `mant * 2^exp` with at most `prec`
     * significant bits.
     */
    fn round(prec: u32, mant: Cell, exp: i64) -> Float {
        if mant.is_zero() {
            return Float { prec, mant, exp: 0 };
        }

        let (sign, mut mag) = mant.into_parts();
        let mut exp = exp;

        let bits = mag.bits();
        if bits > prec as u64 {
            let shift = bits - prec as u64;
            let mask = (BigUint::one() << shift) - 1u32;
            let rem = &mag & &mask;
            let half = BigUint::one() << (shift - 1);

            mag >>= shift;
            exp += shift as i64;

            let up = match rem.cmp(&half) {
                Ordering::Greater => true,
                Ordering::Equal => mag.is_odd(),
                Ordering::Less => false,
            };
            if up {
                mag += 1u32;
                // Carried into a new bit
                if mag.bits() > prec as u64 {
                    mag >>= 1u32;
                    exp += 1;
                }
            }
        }

        if let Some(tz) = mag.trailing_zeros() {
            mag >>= tz;
            exp += tz as i64;
        }

        Float {
            prec,
            mant: BigInt::from_biguint(sign, mag),
            exp,
        }
    }

    /// Rounds `a * 2^ea + b * 2^eb` to `prec` bits.
    fn sum(prec: u32, a: &Cell, ea: i64, b: &Cell, eb: i64) -> Float {
        if a.is_zero() {
            return Float::round(prec, b.clone(), eb);
        }
        if b.is_zero() {
            return Float::round(prec, a.clone(), ea);
        }

        let top = |m: &Cell, e: i64| e + m.bits() as i64 - 1;
        let ((a, ea), (b, eb)) = if top(a, ea) >= top(b, eb) {
            ((a, ea), (b, eb))
        } else {
            ((b, eb), (a, ea))
        };

        // `a` and every rounding boundary next to it are multiples of 2^g, so
        // anything below 2^g can only pick the direction to round in.
        let g = cmp::min(ea, top(a, ea) - prec as i64 - 1);
        if top(b, eb) < g {
            let sticky = if b.is_negative() { -Cell::one() } else { Cell::one() };
            return Float::aligned_sum(prec, a, ea, &sticky, g - 1);
        }
        Float::aligned_sum(prec, a, ea, b, eb)
    }

    fn aligned_sum(prec: u32, a: &Cell, ea: i64, b: &Cell, eb: i64) -> Float {
        let e = cmp::min(ea, eb);
        let m = (a << (ea - e) as u64) + (b << (eb - e) as u64);
        Float::round(prec, m, e)
    }

    fn negated(&self) -> Float {
        Float {
            prec: self.prec,
            mant: -&self.mant,
            exp: self.exp,
        }
    }
}

/// `v * 2^exp`, exact unless the result overflows or is subnormal.
fn scale(mut v: f64, mut exp: i64) -> f64 {
    while exp > 1000 && v.is_finite() {
        v *= 2f64.powi(1000);
        exp -= 1000;
    }
    while exp < -1000 && v != 0.0 {
        v *= 2f64.powi(-1000);
        exp += 1000;
    }
    if exp.abs() <= 1000 { v * 2f64.powi(exp as i32) } else { v }
}

impl PartialEq for Float {
    fn eq(&self, other: &Float) -> bool {
        self.mant == other.mant && self.exp == other.exp
    }
}

impl<'a> AddAssign<&'a Float> for Float {
    fn add_assign(&mut self, other: &'a Float) {
        *self = Float::sum(self.prec, &self.mant, self.exp, &other.mant, other.exp);
    }
}

impl<'a> SubAssign<&'a Float> for Float {
    fn sub_assign(&mut self, other: &'a Float) {
        let neg = -&other.mant;
        *self = Float::sum(self.prec, &self.mant, self.exp, &neg, other.exp);
    }
}

impl<'a> MulAssign<&'a Float> for Float {
    fn mul_assign(&mut self, other: &'a Float) {
        *self = Float::round(self.prec, &self.mant * &other.mant, self.exp + other.exp);
    }
}

macro_rules! impl_arith (
    ($tr:ident, $meth:ident, $tr_assign:ident, $meth_assign:ident) => {
        impl $tr_assign<Float> for Float {
            #[inline]
            fn $meth_assign(&mut self, other: Float) {
                $tr_assign::$meth_assign(self, &other);
            }
        }

        impl $tr<Float> for Float {
            type Output = Float;

            #[inline]
            fn $meth(mut self, other: Float) -> Float {
                $tr_assign::$meth_assign(&mut self, &other);
                self
            }
        }

        impl<'a> $tr<&'a Float> for Float {
            type Output = Float;

            #[inline]
            fn $meth(mut self, other: &'a Float) -> Float {
                $tr_assign::$meth_assign(&mut self, other);
                self
            }
        }

        impl<'a, 'b> $tr<&'a Float> for &'b Float {
            type Output = Float;

            #[inline]
            fn $meth(self, other: &'a Float) -> Float {
                $tr::$meth(self.clone(), other)
            }
        }
    }
);

impl_arith!(Add, add, AddAssign, add_assign);
impl_arith!(Sub, sub, SubAssign, sub_assign);
impl_arith!(Mul, mul, MulAssign, mul_assign);

impl Neg for Float {
    type Output = Float;

    fn neg(mut self) -> Float {
        self.mant = -self.mant;
        self
    }
}

impl<'a> Neg for &'a Float {
    type Output = Float;

    fn neg(self) -> Float {
        self.negated()
    }
}

impl SupportsIntegerAdd for Float {
    type Output = Float;

    fn add_integer(&self, rhs: &Integer) -> Float {
        Float::sum(self.prec, &self.mant, self.exp, rhs.cell(), 0)
    }
}

impl SupportsIntegerSubtract for Float {
    type Output = Float;

    fn sub_integer(&self, rhs: &Integer) -> Float {
        let neg = -rhs.cell();
        Float::sum(self.prec, &self.mant, self.exp, &neg, 0)
    }
}

impl SupportsIntegerMultiply for Float {
    type Output = Float;

    fn mul_integer(&self, rhs: &Integer) -> Float {
        Float::round(self.prec, &self.mant * rhs.cell(), self.exp)
    }
}

impl<'a, 'b> Add<&'a Integer> for &'b Float {
    type Output = Float;

    fn add(self, other: &'a Integer) -> Float {
        self.add_integer(other)
    }
}

impl<'a, 'b> Sub<&'a Integer> for &'b Float {
    type Output = Float;

    fn sub(self, other: &'a Integer) -> Float {
        self.sub_integer(other)
    }
}

impl<'a, 'b> Mul<&'a Integer> for &'b Float {
    type Output = Float;

    fn mul(self, other: &'a Integer) -> Float {
        self.mul_integer(other)
    }
}

macro_rules! impl_int_lhs (
    ($tr:ident, $meth:ident, $op:expr) => {
        impl<'a, 'b> $tr<&'a Float> for &'b Integer {
            type Output = Float;

            #[inline]
            fn $meth(self, other: &'a Float) -> Float {
                dispatch::float($op, self, other)
            }
        }

        impl $tr<Float> for Integer {
            type Output = Float;

            #[inline]
            fn $meth(self, other: Float) -> Float {
                dispatch::float($op, &self, &other)
            }
        }
    }
);

impl_int_lhs!(Add, add, BinOp::Add);
impl_int_lhs!(Sub, sub, BinOp::Sub);
impl_int_lhs!(Mul, mul, BinOp::Mul);

/// Prints the exact decimal value, which always terminates.
impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.sign() < 0 {
            f.write_str("-")?;
        }

        let mag = self.mant.magnitude();
        if self.exp >= 0 {
            return write!(f, "{}.0", mag << self.exp as u64);
        }

        // mant * 2^-k == mant * 5^k / 10^k
        let k = (-self.exp) as usize;
        let digits = (mag * BigUint::from(5u32).pow(k as u32)).to_string();
        let digits = if digits.len() <= k {
            format!("{}{}", "0".repeat(k + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (int, frac) = digits.split_at(digits.len() - k);
        write!(f, "{}.{}", int, frac)
    }
}
