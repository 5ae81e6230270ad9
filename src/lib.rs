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

//! A multiple-precision numeric tower.
//!
//! `Integer`, `Rational` and `Float` share one set of arithmetic operators.
//! Mixing them promotes the result to the richer type. Machine integers up
//! to 128 bits and `num_bigint` values take part without first being
//! converted by hand. See `Integer` for the two call forms, allocating and in-place.

mod ll;
mod mem;

mod dispatch;
pub mod error;
pub mod float;
pub mod int;
pub mod number;
pub mod operand;
pub mod rational;
pub mod traits;

// Re-exports

pub use dispatch::BinOp;
pub use error::{Error, Result};
pub use float::Float;
pub use int::Integer;
pub use int::RandomInt;
pub use number::Number;
pub use operand::{classify, Kind, Operand};
pub use rational::Rational;
pub use traits::{SupportsIntegerAdd, SupportsIntegerMultiply, SupportsIntegerSubtract};
