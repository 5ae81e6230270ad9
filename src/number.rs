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

use crate::float::Float;
use crate::int::Integer;
use crate::operand::Kind;
use crate::rational::Rational;

/// The result of an allocating mixed operation on an `Integer`.
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(Integer),
    Rational(Rational),
    Float(Float),
}

impl Number {
    pub fn kind(&self) -> Kind {
        match *self {
            Number::Integer(_) => Kind::Integer,
            Number::Rational(_) => Kind::Rational,
            Number::Float(_) => Kind::Float,
        }
    }

    pub fn as_integer(&self) -> Option<&Integer> {
        match *self {
            Number::Integer(ref i) => Some(i),
            _ => None,
        }
    }

    pub fn into_integer(self) -> Option<Integer> {
        match self {
            Number::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn into_rational(self) -> Option<Rational> {
        match self {
            Number::Rational(r) => Some(r),
            _ => None,
        }
    }

    pub fn into_float(self) -> Option<Float> {
        match self {
            Number::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl From<Integer> for Number {
    fn from(i: Integer) -> Number {
        Number::Integer(i)
    }
}

impl From<Rational> for Number {
    fn from(r: Rational) -> Number {
        Number::Rational(r)
    }
}

impl From<Float> for Number {
    fn from(f: Float) -> Number {
        Number::Float(f)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Number::Integer(ref i) => fmt::Display::fmt(i, f),
            Number::Rational(ref r) => fmt::Display::fmt(r, f),
            Number::Float(ref x) => fmt::Display::fmt(x, f),
        }
    }
}
