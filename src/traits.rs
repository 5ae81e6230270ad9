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

/*!
 * Traits through which the other members of the tower take part in mixed
 * arithmetic with an `Integer`.
 *
 * When an `Integer` meets a `Rational` or a `Float`, the bookkeeping for the
 * result (a denominator, a precision) belongs to the other operand's type.
 * Rather than reaching into it, the dispatcher calls one of these methods on
 * the other operand:
 *
 * ```ignore
 *     i + r   =>   r.add_integer(&i)
 * ```
 *
 * Addition and multiplication are commutative, so the operand order can be
 * swapped freely. Subtraction is not: `sub_integer` is always `self - rhs`.
 */

use crate::int::Integer;

pub trait SupportsIntegerAdd {
    type Output;

    /// Returns `self + rhs`.
    fn add_integer(&self, rhs: &Integer) -> Self::Output;
}

pub trait SupportsIntegerSubtract {
    type Output;

    /// Returns `self - rhs`.
    fn sub_integer(&self, rhs: &Integer) -> Self::Output;
}

pub trait SupportsIntegerMultiply {
    type Output;

    /// Returns `self * rhs`.
    fn mul_integer(&self, rhs: &Integer) -> Self::Output;
}
