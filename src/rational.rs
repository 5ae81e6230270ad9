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

use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_integer::Integer as IntegerOps;
use num_traits::One;

use crate::dispatch::{self, BinOp};
use crate::int::Integer;
use crate::traits::{SupportsIntegerAdd, SupportsIntegerMultiply, SupportsIntegerSubtract};

/**
 * An arbitrary-precision rational number.
 *
 * This type is used to represent numbers in the form `a / b` where `a` and `b`
 * are integers and `b` is non-zero. A `Rational` is always kept normalized:
 * `a` and `b` are relatively prime and `b` is positive, so two rationals are
 * equal exactly when their parts are.
 */
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    n: Integer,
    d: Integer
}

impl Rational {

    pub fn new(n: Integer, d: Integer) -> Rational {
        assert!(!d.is_zero(), "Denominator is zero");

        if n.is_zero() {
            return Rational {
                n: n,
                d: Integer::one()
            }
        }

        let mut rat = Rational {
            n: n,
            d: d
        };

        rat.normalize();

        rat
    }

    pub fn from_integer(n: Integer) -> Rational {
        Rational {
            n: n,
            d: Integer::one()
        }
    }

    /// Builds a rational from parts that are already normalized.
    pub(crate) fn from_canonical(n: Integer, d: Integer) -> Rational {
        let rat = Rational { n: n, d: d };
        debug_assert!(rat.normalized());
        rat
    }

    #[inline]
    pub fn numer(&self) -> &Integer {
        &self.n
    }

    #[inline]
    pub fn denom(&self) -> &Integer {
        &self.d
    }

    /// Returns whether the denominator is one.
    pub fn is_integer(&self) -> bool {
        self.d == 1
    }

    fn normalized(&self) -> bool {
        let gcd = self.n.cell().gcd(self.d.cell());
        gcd.is_one() && self.d.sign() > 0
    }

    /**
     * Normalize this Rational.
     *
     * This method will cause the value to be represented in the
     * form `a/b` where `a` and `b` are relatively prime. It also
     * ensures that the denominator is positive.
     */
    fn normalize(&mut self) {
        let gcd = self.n.cell().gcd(self.d.cell());

        if !gcd.is_one() {
            *self.n.cell_mut() /= &gcd;
            *self.d.cell_mut() /= &gcd;
        }

        // Make sure the denominator is positive
        if self.d.sign() < 0 {
            self.d.negate();
            self.n.negate();
        }
    }

    /**
     * Returns the reciprocal of this Rational
     */
    pub fn invert(self) -> Rational {
        assert!(!self.n.is_zero(), "Denominator is zero");
        Rational::new(self.d, self.n)
    }

    /**
     * Converts this Rational to an `f64` value.
     */
    pub fn to_f64(&self) -> f64 {
        self.n.to_f64() / self.d.to_f64()
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Rational {
        Rational::from_integer(n)
    }
}

impl<'a> AddAssign<&'a Rational> for Rational {
    fn add_assign(&mut self, other: &'a Rational) {
        if self.d == other.d {
            self.n += &other.n;
        } else {
            self.n = &self.n * &other.d + &other.n * &self.d;
            self.d *= &other.d;
        }
        self.normalize();
    }
}

impl<'a> AddAssign<&'a Integer> for Rational {
    fn add_assign(&mut self, other: &'a Integer) {
        // gcd(n + i*d, d) == gcd(n, d), so this stays normalized
        self.n += other * &self.d;
    }
}

impl<'a> SubAssign<&'a Rational> for Rational {
    fn sub_assign(&mut self, other: &'a Rational) {
        if self.d == other.d {
            self.n -= &other.n;
        } else {
            self.n = &self.n * &other.d - &other.n * &self.d;
            self.d *= &other.d;
        }
        self.normalize();
    }
}

impl<'a> SubAssign<&'a Integer> for Rational {
    fn sub_assign(&mut self, other: &'a Integer) {
        self.n -= other * &self.d;
    }
}

impl<'a> MulAssign<&'a Rational> for Rational {
    fn mul_assign(&mut self, other: &'a Rational) {
        self.n *= &other.n;
        self.d *= &other.d;
        self.normalize();
    }
}

impl<'a> MulAssign<&'a Integer> for Rational {
    fn mul_assign(&mut self, other: &'a Integer) {
        self.n *= other;
        self.normalize();
    }
}

// The rest of the grid forwards to the `*Assign<&T>` impls above.
macro_rules! impl_arith (
    ($tr:ident, $meth:ident, $tr_assign:ident, $meth_assign:ident, $rhs:ty) => {
        impl $tr_assign<$rhs> for Rational {
            #[inline]
            fn $meth_assign(&mut self, other: $rhs) {
                $tr_assign::$meth_assign(self, &other);
            }
        }

        impl $tr<$rhs> for Rational {
            type Output = Rational;

            #[inline]
            fn $meth(mut self, other: $rhs) -> Rational {
                $tr_assign::$meth_assign(&mut self, &other);
                self
            }
        }

        impl<'a> $tr<&'a $rhs> for Rational {
            type Output = Rational;

            #[inline]
            fn $meth(mut self, other: &'a $rhs) -> Rational {
                $tr_assign::$meth_assign(&mut self, other);
                self
            }
        }

        impl<'a, 'b> $tr<&'a $rhs> for &'b Rational {
            type Output = Rational;

            #[inline]
            fn $meth(self, other: &'a $rhs) -> Rational {
                $tr::$meth(self.clone(), other)
            }
        }
    }
);

impl_arith!(Add, add, AddAssign, add_assign, Rational);
impl_arith!(Add, add, AddAssign, add_assign, Integer);
impl_arith!(Sub, sub, SubAssign, sub_assign, Rational);
impl_arith!(Sub, sub, SubAssign, sub_assign, Integer);
impl_arith!(Mul, mul, MulAssign, mul_assign, Rational);
impl_arith!(Mul, mul, MulAssign, mul_assign, Integer);

impl Neg for Rational {
    type Output = Rational;

    fn neg(mut self) -> Rational {
        self.n.negate();
        self
    }
}

impl<'a> Neg for &'a Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        -self.clone()
    }
}

impl SupportsIntegerAdd for Rational {
    type Output = Rational;

    fn add_integer(&self, rhs: &Integer) -> Rational {
        self + rhs
    }
}

impl SupportsIntegerSubtract for Rational {
    type Output = Rational;

    fn sub_integer(&self, rhs: &Integer) -> Rational {
        self - rhs
    }
}

impl SupportsIntegerMultiply for Rational {
    type Output = Rational;

    fn mul_integer(&self, rhs: &Integer) -> Rational {
        self * rhs
    }
}

// Integer on the left: the result is a Rational, picked by the dispatcher.
macro_rules! impl_int_lhs (
    ($tr:ident, $meth:ident, $op:expr) => {
        impl<'a, 'b> $tr<&'a Rational> for &'b Integer {
            type Output = Rational;

            #[inline]
            fn $meth(self, other: &'a Rational) -> Rational {
                dispatch::rational($op, self, other)
            }
        }

        impl $tr<Rational> for Integer {
            type Output = Rational;

            #[inline]
            fn $meth(self, other: Rational) -> Rational {
                dispatch::rational($op, &self, &other)
            }
        }
    }
);

impl_int_lhs!(Add, add, BinOp::Add);
impl_int_lhs!(Sub, sub, BinOp::Sub);
impl_int_lhs!(Mul, mul, BinOp::Mul);

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}/{:?}", self.n, self.d)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.n, self.d)
    }
}
