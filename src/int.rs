// Copyright 2015 The Ramp Developers
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

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use num_bigint::{BigInt, ParseBigIntError, RandBigInt};
use num_traits::{Num, ToPrimitive, Zero};
use rand::Rng;

use crate::dispatch::{self, BinOp};
use crate::error::{Error, Result};
use crate::ll::{self, Cell};
use crate::operand::Integral;

/**
 * An arbitrary-precision signed integer.
 *
 * This type grows to the size it needs to in order to store the result of any operation.
 *
 * ## Creation
 *
 * An `Integer` can be constructed in a number of ways:
 *
 * - `Integer::zero` and `Integer::one` construct a zero- and one-valued `Integer` respectively.
 *
 * - `Integer::from` will convert from any primitive integer type to an `Integer` of the same value
 *
 *   ```
 *   # use ramp_tower::Integer;
 *   let four = Integer::from(4);
 *   ```
 *
 * - `Integer::from_str` (or `str::parse`) will attempt to convert from a string to an `Integer`
 *
 *   ```
 *   # use ramp_tower::Integer;
 *   # use std::str::FromStr;
 *   let i = Integer::from_str("123456789").unwrap();
 *   ```
 *
 * ## Usage
 *
 * `Integer` has the usual operator overloads for `Integer` and `i64` operands. `a + b` consumes
 * both operands, reusing the storage of `a`; `&a + &b` leaves them alone and allocates the
 * result. The `*Assign` forms mutate the left-hand side in place.
 *
 * Mixing in the other members of the tower promotes the result: `&i + &rational` is a
 * `Rational` and `&i * &float` is a `Float` at the float's precision. When the kind of the
 * operand is only known at runtime, the `*_promoted` methods take any `Operand` and return a
 * `Number`, and the `*_in_place` methods mutate the receiver, rejecting operands that would
 * need a non-integer result:
 *
 *   ```
 *   # use ramp_tower::{Integer, Number, Rational};
 *   let five = Integer::from(5);
 *   let half = Rational::new(Integer::from(1), Integer::from(2));
 *   let r = five.sub_promoted(&half);
 *   assert_eq!(r, Number::Rational(Rational::new(Integer::from(9), Integer::from(2))));
 *
 *   let mut x = Integer::from(10);
 *   x.add_in_place(-3).unwrap();
 *   assert_eq!(x, 7);
 *   assert!(x.add_in_place(&half).is_err());
 *   ```
 *
 * ### Semantics
 *
 * Addition, subtraction and multiplication follow the expected rules for integers. Square roots
 * and `k`th roots are truncated toward zero; the square root of a negative number is a
 * `Domain` error in every form.
 */
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer {
    cell: Cell,
}

impl Integer {
    pub fn zero() -> Integer {
        Integer { cell: Cell::zero() }
    }

    pub fn one() -> Integer {
        Integer::from(1)
    }

    #[inline]
    pub(crate) fn from_cell(cell: Cell) -> Integer {
        Integer { cell }
    }

    #[inline]
    pub(crate) fn cell(&self) -> &Cell {
        &self.cell
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self) -> &mut Cell {
        &mut self.cell
    }

    /**
     * Returns the sign of the Integer as either -1, 0 or 1 for self being negative, zero
     * or positive, respectively.
     */
    #[inline]
    pub fn sign(&self) -> i32 {
        ll::sign(&self.cell)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.cell.is_zero()
    }

    /// Returns the number of bits needed to represent the absolute value of `self`.
    pub fn bit_length(&self) -> u64 {
        self.cell.bits()
    }

    /// Converts to an `i64`, or `None` if the value does not fit.
    pub fn to_i64(&self) -> Option<i64> {
        self.cell.to_i64()
    }

    /// Converts to the nearest `f64`; values too large become infinite.
    pub fn to_f64(&self) -> f64 {
        self.cell.to_f64().unwrap_or(if self.sign() < 0 {
            std::f64::NEG_INFINITY
        } else {
            std::f64::INFINITY
        })
    }

    pub fn from_str_radix(src: &str, radix: u32) -> std::result::Result<Integer, ParseBigIntError> {
        BigInt::from_str_radix(src, radix).map(Integer::from_cell)
    }

    // Unary operations come in two forms that share the primitive: the
    // allocating one runs it on a fresh copy, the in-place one on `self`.

    #[inline]
    fn unary(&self, p: fn(&mut Cell)) -> Integer {
        let mut w = self.cell.clone();
        p(&mut w);
        Integer::from_cell(w)
    }

    #[inline]
    fn unary_mut(&mut self, p: fn(&mut Cell)) {
        p(&mut self.cell)
    }

    /**
     * Negates `self` in-place
     */
    pub fn negate(&mut self) {
        self.unary_mut(ll::neg)
    }

    /**
     * Returns the absolute value of `self`
     */
    pub fn abs(&self) -> Integer {
        self.unary(ll::abs)
    }

    /**
     * Replaces `self` with its absolute value
     */
    pub fn abs_mut(&mut self) {
        self.unary_mut(ll::abs)
    }

    fn check_sqrt(&self, op: &'static str) -> Result<()> {
        if self.sign() < 0 {
            return Err(Error::Domain { op, reason: "square root of a negative number" });
        }
        Ok(())
    }

    /**
     * Returns the truncated square root of `self`.
     */
    pub fn sqrt(&self) -> Result<Integer> {
        self.check_sqrt("sqrt")?;
        Ok(self.unary(ll::sqrt))
    }

    /**
     * Replaces `self` with its truncated square root. `self` is left as it was
     * if it is negative.
     */
    pub fn sqrt_mut(&mut self) -> Result<()> {
        self.check_sqrt("sqrt!")?;
        self.unary_mut(ll::sqrt);
        Ok(())
    }

    /**
     * Compute the sqrt of this number, returning its floor, S, and the
     * remainder, R, as Ok((S, R)).
     *
     * The numbers S, R are both positive and satisfy `self = S * S + R`,
     * with `R` zero exactly when `self` is a perfect square.
     */
    pub fn sqrt_rem(&self) -> Result<(Integer, Integer)> {
        self.check_sqrt("sqrtrem")?;
        let mut s = self.cell.clone();
        let r = ll::sqrtrem(&mut s);
        Ok((Integer::from_cell(s), Integer::from_cell(r)))
    }

    /// Returns whether `self` is the square of an integer.
    pub fn is_perfect_square(&self) -> bool {
        match self.sqrt_rem() {
            Ok((_, r)) => r.is_zero(),
            Err(_) => false,
        }
    }

    /**
     * Returns the truncated `n`th root of `self`.
     *
     * `n` must be positive. Odd roots of negative numbers are truncated
     * toward zero; even roots of negative numbers are a `Domain` error.
     */
    pub fn root(&self, n: i64) -> Result<Integer> {
        if n <= 0 {
            return Err(Error::Range { op: "root", reason: "degree must be positive" });
        }
        if self.sign() < 0 && n & 1 == 0 {
            return Err(Error::Domain { op: "root", reason: "even root of a negative number" });
        }
        // No integer other than 0 and ±1 has a root of degree 2^32 or more,
        // and clamping keeps odd degrees odd.
        let n = if n > u32::max_value() as i64 { u32::max_value() } else { n as u32 };

        let mut w = self.cell.clone();
        ll::root(&mut w, n);
        Ok(Integer::from_cell(w))
    }
}

impl Neg for Integer {
    type Output = Integer;

    #[inline]
    fn neg(mut self) -> Integer {
        self.negate();
        self
    }
}

impl<'a> Neg for &'a Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Integer {
        self.unary(ll::neg)
    }
}

#[inline]
fn apply(w: &mut Integer, op: BinOp, x: Integral) {
    dispatch::apply_integral(op, &mut w.cell, x)
}

// The operator grid for Integer and i64 operands. Every impl bottoms out in
// the `*Assign<&Integer>` or `*Assign<i64>` form, which runs the dispatcher's
// integral path on the left-hand side's cell.

macro_rules! impl_arith (
    ($tr:ident, $meth:ident, $tr_assign:ident, $meth_assign:ident, $op:expr) => {
        impl<'a> $tr_assign<&'a Integer> for Integer {
            #[inline]
            fn $meth_assign(&mut self, other: &'a Integer) {
                apply(self, $op, Integral::Integer(other));
            }
        }

        impl $tr_assign<Integer> for Integer {
            #[inline]
            fn $meth_assign(&mut self, other: Integer) {
                $tr_assign::$meth_assign(self, &other);
            }
        }

        impl $tr_assign<i64> for Integer {
            #[inline]
            fn $meth_assign(&mut self, other: i64) {
                apply(self, $op, Integral::Small(other));
            }
        }

        impl<'a> $tr<&'a Integer> for Integer {
            type Output = Integer;

            #[inline]
            fn $meth(mut self, other: &'a Integer) -> Integer {
                $tr_assign::$meth_assign(&mut self, other);
                self
            }
        }

        impl $tr<Integer> for Integer {
            type Output = Integer;

            #[inline]
            fn $meth(mut self, other: Integer) -> Integer {
                $tr_assign::$meth_assign(&mut self, &other);
                self
            }
        }

        impl<'a> $tr<Integer> for &'a Integer {
            type Output = Integer;

            #[inline]
            fn $meth(self, other: Integer) -> Integer {
                $tr::$meth(self.clone(), &other)
            }
        }

        impl<'a, 'b> $tr<&'a Integer> for &'b Integer {
            type Output = Integer;

            #[inline]
            fn $meth(self, other: &'a Integer) -> Integer {
                $tr::$meth(self.clone(), other)
            }
        }

        impl $tr<i64> for Integer {
            type Output = Integer;

            #[inline]
            fn $meth(mut self, other: i64) -> Integer {
                $tr_assign::$meth_assign(&mut self, other);
                self
            }
        }

        impl<'a> $tr<i64> for &'a Integer {
            type Output = Integer;

            #[inline]
            fn $meth(self, other: i64) -> Integer {
                $tr::$meth(self.clone(), other)
            }
        }
    }
);

impl_arith!(Add, add, AddAssign, add_assign, BinOp::Add);
impl_arith!(Sub, sub, SubAssign, sub_assign, BinOp::Sub);
impl_arith!(Mul, mul, MulAssign, mul_assign, BinOp::Mul);

impl PartialEq<i64> for Integer {
    #[inline]
    fn eq(&self, other: &i64) -> bool {
        self.to_i64() == Some(*other)
    }
}

impl PartialEq<Integer> for i64 {
    #[inline]
    fn eq(&self, other: &Integer) -> bool {
        other.eq(self)
    }
}

impl PartialOrd<i64> for Integer {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        match self.to_i64() {
            Some(v) => Some(v.cmp(other)),
            // Too large in magnitude for i64, so the sign decides
            None => Some(if self.sign() < 0 { Ordering::Less } else { Ordering::Greater }),
        }
    }
}

impl PartialOrd<Integer> for i64 {
    #[inline]
    fn partial_cmp(&self, other: &Integer) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}

macro_rules! impl_from_prim (
    ($($t:ty),*) => {
        $(impl From<$t> for Integer {
            #[inline]
            fn from(val: $t) -> Integer {
                Integer::from_cell(BigInt::from(val))
            }
        })*
    }
);

impl_from_prim!(i8, i16, i32, i64, i128, isize);
impl_from_prim!(u8, u16, u32, u64, u128, usize);

impl From<BigInt> for Integer {
    #[inline]
    fn from(val: BigInt) -> Integer {
        Integer::from_cell(val)
    }
}

impl From<Integer> for BigInt {
    #[inline]
    fn from(val: Integer) -> BigInt {
        val.cell
    }
}

// Number formatting - the cell already knows how to print itself in every
// radix, so each impl just forwards.

macro_rules! impl_fmt (
    ($($t:path),*) => {
        $(impl $t for Integer {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                <Cell as $t>::fmt(&self.cell, f)
            }
        })*
    }
);

impl_fmt!(fmt::Binary, fmt::Octal, fmt::Display, fmt::Debug, fmt::LowerHex, fmt::UpperHex);

impl FromStr for Integer {
    type Err = ParseBigIntError;

    fn from_str(src: &str) -> std::result::Result<Integer, ParseBigIntError> {
        Integer::from_str_radix(src, 10)
    }
}

/// Trait for generating random `Integer`.
///
/// # Example
///
/// Generate a random `Integer` of size `256` bits:
///
/// ```
/// use ramp_tower::RandomInt;
///
/// let mut rng = rand::thread_rng();
/// let big_i = rng.gen_int(256);
/// assert!(big_i.bit_length() <= 256);
/// ```
pub trait RandomInt {
    /// Generate a random unsigned `Integer` of given bit size.
    fn gen_uint(&mut self, bits: usize) -> Integer;
    /// Generate a random `Integer` of given bit size.
    fn gen_int(&mut self, bits: usize) -> Integer;
    /// Generate a random unsigned `Integer` less than the given bound.
    /// Fails when the bound is zero or negative.
    fn gen_uint_below(&mut self, bound: &Integer) -> Integer;
    /// Generate a random `Integer` within the given range.
    /// The lower bound is inclusive; the upper bound is exclusive.
    /// Fails when the upper bound is not greater than the lower bound.
    fn gen_int_range(&mut self, lbound: &Integer, ubound: &Integer) -> Integer;
}

impl<R: Rng> RandomInt for R {
    fn gen_uint(&mut self, bits: usize) -> Integer {
        assert!(bits > 0);
        let n = self.gen_biguint(bits as u64);
        Integer::from_cell(BigInt::from(n))
    }

    fn gen_int(&mut self, bits: usize) -> Integer {
        let i = self.gen_uint(bits);

        if i.is_zero() {
            // ...except that if the value is zero, we need to try
            // again with probability 0.5. This is because otherwise,
            // the probability of generating a zero would be
            // double that of any other number.
            if self.gen() {
                self.gen_uint(bits)
            } else {
                i
            }
        } else if self.gen() {
            -i
        } else {
            i
        }
    }

    fn gen_uint_below(&mut self, bound: &Integer) -> Integer {
        assert!(bound.sign() > 0);
        let n = self.gen_biguint_below(bound.cell.magnitude());
        Integer::from_cell(BigInt::from(n))
    }

    fn gen_int_range(&mut self, lbound: &Integer, ubound: &Integer) -> Integer {
        assert!(*lbound < *ubound);
        Integer::from_cell(self.gen_bigint_range(&lbound.cell, &ubound.cell))
    }
}
