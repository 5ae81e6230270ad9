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

//! Promotion and mutation for `Integer` operations with mixed operands.
//!
//! An allocating operation takes any `Operand` and picks the result's kind
//! from the operand's: integral operands stay `Integer`, a `Rational` or a
//! `Float` hands the work to that type through the traits in `traits`. An
//! in-place operation only takes integral operands and writes the receiver's
//! cell directly.
//!
//! Native operands take the cheapest route available. Small ones are fed to
//! the `*_si` primitives without ever being widened into a cell; wide ones
//! are materialized into a `TmpCell` that is released when the operation
//! finishes.

use std::any::Any;
use std::fmt;
use std::ops::Deref;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::float::Float;
use crate::int::Integer;
use crate::ll::{self, Cell};
use crate::mem::TmpCell;
use crate::number::Number;
use crate::operand::{mismatch, Integral, Kind, Operand, ANY_NUMBER, INTEGRAL};
use crate::rational::Rational;
use crate::traits::{SupportsIntegerAdd, SupportsIntegerMultiply, SupportsIntegerSubtract};

/// A binary arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
}

impl BinOp {
    /// Name of the allocating form, used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
        }
    }

    /// Name of the in-place form, used in diagnostics.
    pub fn name_mut(self) -> &'static str {
        match self {
            BinOp::Add => "add!",
            BinOp::Sub => "sub!",
            BinOp::Mul => "mul!",
        }
    }

    #[inline]
    fn cell(self, w: &mut Cell, x: &Cell) {
        match self {
            BinOp::Add => ll::add(w, x),
            BinOp::Sub => ll::sub(w, x),
            BinOp::Mul => ll::mul(w, x),
        }
    }

    #[inline]
    fn small(self, w: &mut Cell, s: i64) {
        match self {
            BinOp::Add => ll::add_si(w, s),
            BinOp::Sub => ll::sub_si(w, s),
            BinOp::Mul => ll::mul_si(w, s),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs `w = w op x` for an integral operand.
pub(crate) fn apply_integral(op: BinOp, w: &mut Cell, x: Integral) {
    match x {
        Integral::Integer(i) => op.cell(w, i.cell()),
        Integral::Small(s) => op.small(w, s),
        Integral::Big(b) => {
            let t = TmpCell::from_wide(b);
            op.cell(w, &t);
        }
    }
}

/// `lhs op rhs` for a rational `rhs`.
pub(crate) fn rational(op: BinOp, lhs: &Integer, rhs: &Rational) -> Rational {
    trace!("{}: Integer with Rational, delegating to Rational", op);
    match op {
        BinOp::Add => rhs.add_integer(lhs),
        BinOp::Mul => rhs.mul_integer(lhs),
        BinOp::Sub => {
            // lhs - n/d = (lhs*d - n)/d, and gcd(lhs*d - n, d) = gcd(n, d) = 1
            let mut n = lhs.cell().clone();
            ll::mul(&mut n, rhs.denom().cell());
            ll::sub(&mut n, rhs.numer().cell());
            Rational::from_canonical(Integer::from_cell(n), rhs.denom().clone())
        }
    }
}

/// `lhs op rhs` for a float `rhs`, at `rhs`'s precision.
pub(crate) fn float(op: BinOp, lhs: &Integer, rhs: &Float) -> Float {
    trace!("{}: Integer with Float, delegating to Float at precision {}", op, rhs.prec());
    match op {
        BinOp::Add => rhs.add_integer(lhs),
        BinOp::Mul => rhs.mul_integer(lhs),
        BinOp::Sub => Float::with_val(rhs.prec(), lhs) - rhs,
    }
}

fn binary(op: BinOp, lhs: &Integer, x: Operand) -> Number {
    match x {
        Operand::Integer(i) => {
            let mut w = lhs.cell().clone();
            op.cell(&mut w, i.cell());
            Number::Integer(Integer::from_cell(w))
        }
        Operand::Small(s) => {
            let mut w = lhs.cell().clone();
            op.small(&mut w, s);
            Number::Integer(Integer::from_cell(w))
        }
        Operand::Big(b) => {
            let t = TmpCell::from_wide(b);
            let w = match op {
                // The temporary becomes the result
                BinOp::Add => {
                    let mut w = t.into_inner();
                    ll::add(&mut w, lhs.cell());
                    w
                }
                BinOp::Sub | BinOp::Mul => {
                    let mut w = lhs.cell().clone();
                    op.cell(&mut w, &t);
                    w
                }
            };
            Number::Integer(Integer::from_cell(w))
        }
        Operand::Rational(r) => Number::Rational(rational(op, lhs, r)),
        Operand::Float(f) => Number::Float(float(op, lhs, f)),
    }
}

/// The first factor of a fused multiply-add, borrowed from an `Integer` or
/// materialized for the length of the call.
enum Multiplicand<'a> {
    Borrowed(&'a Cell),
    Tmp(TmpCell),
}

impl<'a> Deref for Multiplicand<'a> {
    type Target = Cell;

    fn deref(&self) -> &Cell {
        match *self {
            Multiplicand::Borrowed(c) => c,
            Multiplicand::Tmp(ref t) => t,
        }
    }
}

impl Integer {
    /// Returns `self + x`, promoted to the kind `x` calls for.
    pub fn add_promoted<'a>(&self, x: impl Into<Operand<'a>>) -> Number {
        binary(BinOp::Add, self, x.into())
    }

    /// Returns `self - x`, promoted to the kind `x` calls for.
    pub fn sub_promoted<'a>(&self, x: impl Into<Operand<'a>>) -> Number {
        binary(BinOp::Sub, self, x.into())
    }

    /// Returns `self * x`, promoted to the kind `x` calls for.
    pub fn mul_promoted<'a>(&self, x: impl Into<Operand<'a>>) -> Number {
        binary(BinOp::Mul, self, x.into())
    }

    /**
     * Adds `x` to `self`.
     *
     * Only operands that keep the result an integer are accepted; a
     * `Rational` or `Float` is a `TypeMismatch` and leaves `self` as it was.
     */
    pub fn add_in_place<'a>(&mut self, x: impl Into<Operand<'a>>) -> Result<()> {
        self.in_place(BinOp::Add, x.into())
    }

    /// Subtracts `x` from `self`. Accepts the same operands as `add_in_place`.
    pub fn sub_in_place<'a>(&mut self, x: impl Into<Operand<'a>>) -> Result<()> {
        self.in_place(BinOp::Sub, x.into())
    }

    /// Multiplies `self` by `x`. Accepts the same operands as `add_in_place`.
    pub fn mul_in_place<'a>(&mut self, x: impl Into<Operand<'a>>) -> Result<()> {
        self.in_place(BinOp::Mul, x.into())
    }

    fn in_place(&mut self, op: BinOp, x: Operand) -> Result<()> {
        let x = x.integral(op.name_mut())?;
        apply_integral(op, self.cell_mut(), x);
        Ok(())
    }

    /**
     * Adds `b * c` to `self` without a separate product.
     *
     * Both factors must be integral. A native small `c` has to be
     * non-negative, otherwise this is a `Range` error. `self` is only
     * written once both factors have been accepted.
     *
     * `b` and `c` may be the same value.
     */
    pub fn addmul_in_place<'a, 'b>(&mut self, b: impl Into<Operand<'a>>, c: impl Into<Operand<'b>>) -> Result<()> {
        const OP: &str = "addmul!";

        let b = match b.into().integral(OP)? {
            Integral::Integer(i) => Multiplicand::Borrowed(i.cell()),
            Integral::Small(s) => Multiplicand::Tmp(TmpCell::from_si(s)),
            Integral::Big(v) => Multiplicand::Tmp(TmpCell::from_wide(v)),
        };

        match c.into() {
            Operand::Integer(i) => ll::addmul(self.cell_mut(), &b, i.cell()),
            Operand::Big(v) => {
                let t = TmpCell::from_wide(v);
                ll::addmul(self.cell_mut(), &b, &t);
            }
            Operand::Small(s) if s >= 0 => ll::addmul_ui(self.cell_mut(), &b, s as u64),
            Operand::Small(s) => {
                debug!("{} rejected negative multiplicand {}", OP, s);
                return Err(Error::Range { op: OP, reason: "multiplicand must not be negative" });
            }
            c @ Operand::Rational(_) | c @ Operand::Float(_) => {
                return Err(mismatch(OP, c.kind(), INTEGRAL));
            }
        }
        Ok(())
    }

    /// Returns `self op x` for a dynamically typed `x`.
    pub fn apply_any(&self, op: BinOp, x: &dyn Any) -> Result<Number> {
        match Operand::from_any(x) {
            Some(x) => Ok(binary(op, self, x)),
            None => Err(mismatch(op.name(), Kind::Unsupported, ANY_NUMBER)),
        }
    }

    /// Runs `self op= x` for a dynamically typed `x`.
    pub fn apply_any_mut(&mut self, op: BinOp, x: &dyn Any) -> Result<()> {
        match Operand::from_any(x) {
            Some(x) => self.in_place(op, x),
            None => Err(mismatch(op.name_mut(), Kind::Unsupported, INTEGRAL)),
        }
    }

    /// `addmul_in_place` for dynamically typed factors.
    pub fn addmul_any(&mut self, b: &dyn Any, c: &dyn Any) -> Result<()> {
        let b = Operand::from_any(b).ok_or_else(|| mismatch("addmul!", Kind::Unsupported, INTEGRAL))?;
        let c = Operand::from_any(c).ok_or_else(|| mismatch("addmul!", Kind::Unsupported, INTEGRAL))?;
        self.addmul_in_place(b, c)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mem::live_temporaries;
    use crate::RandomInt;
    use num_bigint::{BigInt, BigUint};

    fn int(s: &str) -> Integer {
        s.parse().unwrap()
    }

    fn rat(n: i64, d: i64) -> Rational {
        Rational::new(Integer::from(n), Integer::from(d))
    }

    fn float(prec: u32, v: f64) -> Float {
        Float::from_f64(prec, v).unwrap()
    }

    #[test]
    fn small_operands() {
        let ten = Integer::from(10);
        assert_eq!(ten.add_promoted(-3), Number::Integer(Integer::from(7)));
        assert_eq!(ten.sub_promoted(-3), Number::Integer(Integer::from(13)));
        assert_eq!(Integer::from(6).mul_promoted(7), Number::Integer(Integer::from(42)));
        assert_eq!(ten.mul_promoted(-7i8), Number::Integer(Integer::from(-70)));
        assert_eq!(ten.add_promoted(i64::min_value()),
                   Number::Integer(Integer::from(i64::min_value() as i128 + 10)));
        assert_eq!(ten.sub_promoted(i64::min_value()),
                   Number::Integer(Integer::from(10 - i64::min_value() as i128)));
        assert_eq!(ten, 10);
    }

    #[test]
    fn big_operands() {
        let x = int("-340282366920938463463374607431768211456");
        let b = 1i128 << 120;

        let cases = [
            (BinOp::Add, "-338953138925153547590470800371487866880"),
            (BinOp::Sub, "-341611594916723379336278414492048556032"),
            (BinOp::Mul, "-452312848583266388373324160190187140051835877600158453279131187530910662656"),
        ];

        for &(op, expected) in cases.iter() {
            let r = match op {
                BinOp::Add => x.add_promoted(b),
                BinOp::Sub => x.sub_promoted(b),
                BinOp::Mul => x.mul_promoted(b),
            };
            assert_eq!(r, Number::Integer(int(expected)), "{}", op);
            assert_eq!(live_temporaries(), 0);
        }

        assert_eq!(Integer::from(1).add_promoted(u64::max_value()),
                   Number::Integer(Integer::from(1u128 << 64)));
    }

    #[test]
    fn wide_operands() {
        let x = Integer::from(10);
        let max = u128::max_value();
        let b = -(BigInt::from(1) << 200u32);
        let u = BigUint::from(3u32);

        assert_eq!(x.add_promoted(max), Number::Integer(Integer::from(BigInt::from(max) + 10)));
        assert_eq!(x.mul_promoted(&b), Number::Integer(Integer::from(&b * 10)));
        assert_eq!(x.apply_any(BinOp::Add, &max), Ok(Number::Integer(Integer::from(BigInt::from(max) + 10))));
        assert_eq!(x.apply_any(BinOp::Sub, &b), Ok(Number::Integer(Integer::from(BigInt::from(10) - &b))));

        let mut y = x.clone();
        y.sub_in_place(&b).unwrap();
        assert_eq!(BigInt::from(y.clone()), BigInt::from(10) - &b);
        y.apply_any_mut(BinOp::Mul, &u).unwrap();
        assert_eq!(BigInt::from(y), (BigInt::from(10) - &b) * 3);

        let mut r = Integer::from(1);
        r.addmul_in_place(&u, &b).unwrap();
        assert_eq!(BigInt::from(r), &b * 3 + 1);
        assert_eq!(live_temporaries(), 0);
    }

    #[test]
    fn rational_operands() {
        let five = Integer::from(5);
        assert_eq!(five.sub_promoted(&rat(1, 2)), Number::Rational(rat(9, 2)));
        assert_eq!(five.add_promoted(&rat(1, 2)), Number::Rational(rat(11, 2)));
        assert_eq!(five.mul_promoted(&rat(3, 10)), Number::Rational(rat(3, 2)));
        assert_eq!(Integer::from(-2).sub_promoted(&rat(-7, 3)), Number::Rational(rat(1, 3)));

        // An integral result is still a Rational
        assert_eq!(five.mul_promoted(&rat(2, 5)), Number::Rational(rat(2, 1)));
    }

    #[test]
    fn float_operands() {
        let three = Integer::from(3);
        let half = float(53, 0.5);

        let sum = three.add_promoted(&half).into_float().unwrap();
        assert_eq!(sum, float(53, 3.5));
        assert_eq!(sum.prec(), 53);

        assert_eq!(three.sub_promoted(&half), Number::Float(float(53, 2.5)));
        assert_eq!(three.mul_promoted(&half), Number::Float(float(53, 1.5)));

        // 15 rounded to two bits
        let r = Integer::from(5).mul_promoted(&float(2, 3.0)).into_float().unwrap();
        assert_eq!(r.prec(), 2);
        assert_eq!(r, float(2, 16.0));
    }

    #[test]
    fn in_place() {
        let mut x = Integer::from(10);
        x.add_in_place(-3).unwrap();
        assert_eq!(x, 7);
        x.sub_in_place(&Integer::from(9)).unwrap();
        assert_eq!(x, -2);
        x.mul_in_place(1i128 << 100).unwrap();
        assert_eq!(x, -Integer::from(1i128 << 101));
        x.add_in_place(u64::max_value()).unwrap();
        x.sub_in_place(1i128 << 70).unwrap();
        assert_eq!(live_temporaries(), 0);

        let expected = -Integer::from(1i128 << 101) + Integer::from(u64::max_value())
            - Integer::from(1i128 << 70);
        assert_eq!(x, expected);
    }

    #[test]
    fn in_place_rejects_non_integral() {
        let mut x = Integer::from(10);

        let err = x.add_in_place(&rat(1, 2)).unwrap_err();
        assert_eq!(err, Error::TypeMismatch { op: "add!", found: Kind::Rational, accepted: INTEGRAL });

        let err = x.sub_in_place(&float(53, 0.5)).unwrap_err();
        assert_eq!(err, Error::TypeMismatch { op: "sub!", found: Kind::Float, accepted: INTEGRAL });

        assert!(x.mul_in_place(&rat(4, 1)).is_err());
        assert_eq!(x, 10);
    }

    #[test]
    fn in_place_matches_allocating() {
        let mut rng = rand::thread_rng();
        let r = rat(3, 7);

        for _ in 0..50 {
            let a = rng.gen_int(200);
            let b = rng.gen_int(150);
            let s: i64 = rand::Rng::gen(&mut rng);
            let w: i128 = rand::Rng::gen(&mut rng);

            let operands: [Operand; 3] = [Operand::Integer(&b), Operand::Small(s), Operand::from(w)];
            for &x in operands.iter() {
                for &op in [BinOp::Add, BinOp::Sub, BinOp::Mul].iter() {
                    let expected = binary(op, &a, x);
                    let mut y = a.clone();
                    y.in_place(op, x).unwrap();
                    assert_eq!(Number::Integer(y), expected);

                    // sub(add(a, x), x) == a
                    if op == BinOp::Add {
                        let sum = expected.into_integer().unwrap();
                        assert_eq!(sum.sub_promoted(x), Number::Integer(a.clone()));
                    }
                }
            }

            assert_eq!(a.add_promoted(&b), b.add_promoted(&a));
            assert_eq!(a.mul_promoted(&b), b.mul_promoted(&a));

            let q = a.add_promoted(&r).into_rational().unwrap();
            assert_eq!(q - &r, Rational::from_integer(a.clone()));
        }
        assert_eq!(live_temporaries(), 0);
    }

    #[test]
    fn aliasing() {
        let mut a = int("-123456789012345678901234567890");

        let snapshot = a.clone();
        a.add_in_place(&snapshot).unwrap();
        assert_eq!(a, &snapshot * 2);

        let mut r = snapshot.clone();
        r.addmul_in_place(&snapshot, &snapshot).unwrap();
        assert_eq!(r, &snapshot + &(&snapshot * &snapshot));

        // Shared factors need no snapshot
        let b = Integer::from(12);
        let mut r = Integer::from(1);
        r.addmul_in_place(&b, &b).unwrap();
        assert_eq!(r, 145);
    }

    #[test]
    fn addmul() {
        let big = 1i128 << 90;
        let cases: [(i64, Operand, Operand, &str); 6] = [
            (1, Operand::Small(2), Operand::Small(3), "7"),
            (1, Operand::Small(-2), Operand::Small(3), "-5"),
            (-5, Operand::from(big), Operand::Small(0), "-5"),
            (0, Operand::from(big), Operand::from(-big), "-1532495540865888858358347027150309183618739122183602176"),
            (10, Operand::Small(-1), Operand::from(big), "-1237940039285380274899124214"),
            (7, Operand::Small(3), Operand::Small(i64::max_value()), "27670116110564327428"),
        ];

        for &(r, b, c, expected) in cases.iter() {
            let mut x = Integer::from(r);
            x.addmul_in_place(b, c).unwrap();
            assert_eq!(x, int(expected));
            assert_eq!(live_temporaries(), 0);
        }
    }

    #[test]
    fn addmul_negative_small() {
        let mut r = Integer::from(1);
        let err = r.addmul_in_place(&Integer::from(2), -1).unwrap_err();
        assert_eq!(err, Error::Range { op: "addmul!", reason: "multiplicand must not be negative" });
        assert_eq!(r, 1);

        // The temporary made for b is released on the error path too
        assert!(r.addmul_in_place(1i128 << 80, -1).is_err());
        assert!(r.addmul_in_place(5, -1).is_err());
        assert_eq!(live_temporaries(), 0);
        assert_eq!(r, 1);
    }

    #[test]
    fn addmul_non_integral() {
        let mut r = Integer::from(1);

        let err = r.addmul_in_place(&rat(1, 2), 3).unwrap_err();
        assert_eq!(err, Error::TypeMismatch { op: "addmul!", found: Kind::Rational, accepted: INTEGRAL });

        let err = r.addmul_in_place(1i128 << 80, &float(53, 2.0)).unwrap_err();
        assert_eq!(err, Error::TypeMismatch { op: "addmul!", found: Kind::Float, accepted: INTEGRAL });
        assert_eq!(live_temporaries(), 0);
        assert_eq!(r, 1);
    }

    #[test]
    fn dynamic_operands() {
        let x = Integer::from(10);
        let half = rat(1, 2);
        let values: [&dyn Any; 4] = [&-3i32, &Integer::from(4), &half, &1.5f64];

        assert_eq!(x.apply_any(BinOp::Add, values[0]), Ok(Number::Integer(Integer::from(7))));
        assert_eq!(x.apply_any(BinOp::Mul, values[1]), Ok(Number::Integer(Integer::from(40))));
        assert_eq!(x.apply_any(BinOp::Sub, values[2]), Ok(Number::Rational(rat(19, 2))));

        let err = x.apply_any(BinOp::Add, values[3]).unwrap_err();
        assert_eq!(err, Error::TypeMismatch { op: "add", found: Kind::Unsupported, accepted: ANY_NUMBER });

        let mut y = x.clone();
        y.apply_any_mut(BinOp::Sub, values[1]).unwrap();
        assert_eq!(y, 6);
        assert!(y.apply_any_mut(BinOp::Add, values[2]).is_err());
        assert!(y.apply_any_mut(BinOp::Add, &"6").is_err());
        assert_eq!(y, 6);

        y.addmul_any(&3u8, &(4i128)).unwrap();
        assert_eq!(y, 18);
        assert!(y.addmul_any(&3u8, &-4i64).is_err());
        assert!(y.addmul_any(&1.5f32, &1u8).is_err());
        assert_eq!(y, 18);
    }

    #[test]
    fn names() {
        assert_eq!(BinOp::Sub.name(), "sub");
        assert_eq!(BinOp::Mul.name_mut(), "mul!");
        assert_eq!(BinOp::Add.to_string(), "add");
    }
}
