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

//! Primitives over the storage cell that backs every `Integer`.
//!
//! The cell itself is a `num_bigint::BigInt`. Functions here follow the
//! usual destination-first shape: the first argument is written to, the
//! rest are only read. Inputs may alias each other freely; the borrow rules
//! keep the destination distinct from them.
//!
//! Preconditions that depend on the value (square roots of negative
//! numbers, a zero root degree) are the caller's job. They are only checked
//! with `debug_assert!` here.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

mod addsub;
mod mul;
mod root;

pub use self::addsub::{add, add_ui, sub, sub_ui, neg, abs};
pub use self::mul::{mul, mul_si, addmul, addmul_ui};
pub use self::root::{sqrt, sqrtrem, root};

/// The storage cell of an arbitrary-precision integer.
pub type Cell = BigInt;

/// Materializes a fresh cell holding `v`.
#[inline]
pub fn from_si(v: i64) -> Cell {
    BigInt::from(v)
}

/// Materializes a fresh cell holding the wide value `v`.
#[inline]
pub fn from_wide(v: i128) -> Cell {
    BigInt::from(v)
}

/**
 * Adds the signed native value `v` to `w`.
 *
 * The magnitude goes through `add_ui` or `sub_ui` depending on the sign, so
 * the value never has to be widened into a cell.
 */
#[inline]
pub fn add_si(w: &mut Cell, v: i64) {
    if v < 0 {
        sub_ui(w, v.unsigned_abs());
    } else {
        add_ui(w, v as u64);
    }
}

/**
 * Subtracts the signed native value `v` from `w`.
 */
#[inline]
pub fn sub_si(w: &mut Cell, v: i64) {
    if v < 0 {
        add_ui(w, v.unsigned_abs());
    } else {
        sub_ui(w, v as u64);
    }
}

/// Returns -1, 0 or 1 for `x` being negative, zero or positive.
#[inline]
pub fn sign(x: &Cell) -> i32 {
    if x.is_zero() {
        0
    } else if x.is_negative() {
        -1
    } else {
        1
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn materialize_and_sign() {
        let w = from_si(17);
        assert_eq!(sign(&w), 1);

        let w = from_si(-5);
        assert_eq!(w, BigInt::from(-5));
        assert_eq!(sign(&w), -1);

        assert_eq!(from_si(i64::min_value()), BigInt::from(i64::min_value()));
        assert_eq!(from_wide(i128::max_value()), BigInt::from(i128::max_value()));
        assert_eq!(sign(&from_wide(0)), 0);
    }

    #[test]
    fn signed_native() {
        let cases = [
            (10i64, -3i64, 7i64, 13i64),
            (0, 0, 0, 0),
            (-4, 4, 0, -8),
            (5, i64::min_value(), i64::min_value() + 5, 0),
        ];

        for &(x, v, sum, diff) in cases.iter() {
            let mut w = from_si(x);
            add_si(&mut w, v);
            assert_eq!(w, BigInt::from(sum));

            if x.checked_sub(v).is_some() {
                let mut w = from_si(x);
                sub_si(&mut w, v);
                assert_eq!(w, BigInt::from(diff));
            }
        }

        // The magnitude of i64::MIN does not fit in i64
        let mut w = from_si(0);
        sub_si(&mut w, i64::min_value());
        assert_eq!(w, BigInt::from(i64::max_value()) + 1);
    }
}
