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

//! Operand classification.
//!
//! Every operand an `Integer` operation can take is one of five kinds. The
//! closed `Operand` type carries a borrowed or native value of each kind so
//! the dispatcher's matches are checked for exhaustiveness. Host bindings
//! holding dynamically typed values go through `classify` and
//! `Operand::from_any`, where anything else is `Kind::Unsupported`.

use std::any::Any;
use std::fmt;

use log::debug;
use num_bigint::{BigInt, BigUint};

use crate::error::{Error, Result};
use crate::float::Float;
use crate::int::Integer;
use crate::ll::{self, Cell};
use crate::rational::Rational;

/// The kind of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// An arbitrary-precision `Integer`.
    Integer,
    /// A native machine-word integer, `i64`.
    Small,
    /// An arbitrary-precision `Rational`.
    Rational,
    /// An arbitrary-precision `Float`.
    Float,
    /// A wide integer from outside the tower, native (`i128`, `u128`) or
    /// arbitrary-width (`num_bigint`), that has to be materialized into a
    /// cell before use.
    Big,
    /// Anything else.
    Unsupported,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Kind::Integer => "Integer",
            Kind::Small => "i64",
            Kind::Rational => "Rational",
            Kind::Float => "Float",
            Kind::Big => "wide integer",
            Kind::Unsupported => "unsupported value",
        };
        f.write_str(name)
    }
}

/// Kinds accepted by the allocating binary operations.
pub static ANY_NUMBER: &[Kind] = &[Kind::Integer, Kind::Small, Kind::Rational, Kind::Float, Kind::Big];

/// Kinds accepted by in-place operations: those whose result is still an
/// integer.
pub static INTEGRAL: &[Kind] = &[Kind::Integer, Kind::Small, Kind::Big];

/// An operand of any supported kind.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Integer(&'a Integer),
    Small(i64),
    Rational(&'a Rational),
    Float(&'a Float),
    Big(Wide<'a>),
}

/// An operand whose kind keeps an integer result an integer.
#[derive(Debug, Clone, Copy)]
pub enum Integral<'a> {
    Integer(&'a Integer),
    Small(i64),
    Big(Wide<'a>),
}

/// A wide integer value, not yet materialized.
#[derive(Debug, Clone, Copy)]
pub enum Wide<'a> {
    I128(i128),
    U128(u128),
    Signed(&'a BigInt),
    Unsigned(&'a BigUint),
}

impl<'a> Wide<'a> {
    /// Copies the value into a fresh cell.
    pub(crate) fn to_cell(self) -> Cell {
        match self {
            Wide::I128(v) => ll::from_wide(v),
            Wide::U128(v) => Cell::from(v),
            Wide::Signed(b) => b.clone(),
            Wide::Unsigned(u) => Cell::from(u.clone()),
        }
    }
}

impl<'a> fmt::Display for Wide<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Wide::I128(v) => fmt::Display::fmt(&v, f),
            Wide::U128(v) => fmt::Display::fmt(&v, f),
            Wide::Signed(b) => fmt::Display::fmt(b, f),
            Wide::Unsigned(u) => fmt::Display::fmt(u, f),
        }
    }
}

impl<'a> Operand<'a> {
    /// Returns the kind of this operand.
    #[inline]
    pub fn kind(&self) -> Kind {
        match *self {
            Operand::Integer(_) => Kind::Integer,
            Operand::Small(_) => Kind::Small,
            Operand::Rational(_) => Kind::Rational,
            Operand::Float(_) => Kind::Float,
            Operand::Big(_) => Kind::Big,
        }
    }

    /**
     * Views a dynamically typed value as an operand, or returns `None` if its
     * type is not part of the tower. Native integers are accepted at the
     * widths `From` accepts.
     */
    pub fn from_any(value: &'a dyn Any) -> Option<Operand<'a>> {
        if let Some(i) = value.downcast_ref::<Integer>() {
            return Some(Operand::Integer(i));
        }
        if let Some(r) = value.downcast_ref::<Rational>() {
            return Some(Operand::Rational(r));
        }
        if let Some(f) = value.downcast_ref::<Float>() {
            return Some(Operand::Float(f));
        }
        if let Some(b) = value.downcast_ref::<BigInt>() {
            return Some(Operand::Big(Wide::Signed(b)));
        }
        if let Some(u) = value.downcast_ref::<BigUint>() {
            return Some(Operand::Big(Wide::Unsigned(u)));
        }
        macro_rules! native {
            ($($t:ty),*) => {
                $(if let Some(&v) = value.downcast_ref::<$t>() {
                    return Some(Operand::from(v));
                })*
            }
        }
        native!(i64, i32, i16, i8, isize, u64, u32, u16, u8, usize, i128, u128);
        None
    }

    /**
     * Narrows this operand to the integral kinds, failing with a
     * `TypeMismatch` naming `op` otherwise.
     */
    pub fn integral(self, op: &'static str) -> Result<Integral<'a>> {
        match self {
            Operand::Integer(i) => Ok(Integral::Integer(i)),
            Operand::Small(s) => Ok(Integral::Small(s)),
            Operand::Big(b) => Ok(Integral::Big(b)),
            Operand::Rational(_) | Operand::Float(_) => Err(mismatch(op, self.kind(), INTEGRAL)),
        }
    }
}

impl<'a> From<Integral<'a>> for Operand<'a> {
    fn from(x: Integral<'a>) -> Operand<'a> {
        match x {
            Integral::Integer(i) => Operand::Integer(i),
            Integral::Small(s) => Operand::Small(s),
            Integral::Big(b) => Operand::Big(b),
        }
    }
}

/**
 * Reports the kind of a dynamically typed value. Never fails: values outside
 * the tower are `Kind::Unsupported`, which callers turn into a
 * `TypeMismatch`.
 */
pub fn classify(value: &dyn Any) -> Kind {
    Operand::from_any(value).map_or(Kind::Unsupported, |op| op.kind())
}

/// Builds the `TypeMismatch` for an operand of kind `found` given to `op`.
pub fn mismatch(op: &'static str, found: Kind, accepted: &'static [Kind]) -> Error {
    debug!("{} rejected an operand of kind {}", op, found);
    Error::TypeMismatch { op, found, accepted }
}

impl<'a> From<&'a Integer> for Operand<'a> {
    #[inline]
    fn from(i: &'a Integer) -> Operand<'a> {
        Operand::Integer(i)
    }
}

impl<'a> From<&'a Rational> for Operand<'a> {
    #[inline]
    fn from(r: &'a Rational) -> Operand<'a> {
        Operand::Rational(r)
    }
}

impl<'a> From<&'a Float> for Operand<'a> {
    #[inline]
    fn from(f: &'a Float) -> Operand<'a> {
        Operand::Float(f)
    }
}

impl<'a> From<i128> for Operand<'a> {
    #[inline]
    fn from(v: i128) -> Operand<'a> {
        Operand::Big(Wide::I128(v))
    }
}

impl<'a> From<u128> for Operand<'a> {
    #[inline]
    fn from(v: u128) -> Operand<'a> {
        Operand::Big(Wide::U128(v))
    }
}

impl<'a> From<&'a BigInt> for Operand<'a> {
    #[inline]
    fn from(b: &'a BigInt) -> Operand<'a> {
        Operand::Big(Wide::Signed(b))
    }
}

impl<'a> From<&'a BigUint> for Operand<'a> {
    #[inline]
    fn from(u: &'a BigUint) -> Operand<'a> {
        Operand::Big(Wide::Unsigned(u))
    }
}

macro_rules! impl_from_native (
    (small $($t:ty),*) => {
        $(impl<'a> From<$t> for Operand<'a> {
            #[inline]
            fn from(v: $t) -> Operand<'a> {
                Operand::Small(v as i64)
            }
        })*
    };
    (word $($t:ty),*) => {
        $(impl<'a> From<$t> for Operand<'a> {
            #[inline]
            fn from(v: $t) -> Operand<'a> {
                // Values past i64::MAX no longer fit the small fast path
                if (v as u64) <= i64::max_value() as u64 {
                    Operand::Small(v as i64)
                } else {
                    Operand::Big(Wide::I128(v as i128))
                }
            }
        })*
    }
);

impl_from_native!(small i8, i16, i32, i64, isize, u8, u16, u32);
impl_from_native!(word u64, usize);
