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

use std::mem;

use num_traits::Signed;

use super::Cell;

/**
 * Adds `x` to `w`, storing the result in `w`.
 */
#[inline]
pub fn add(w: &mut Cell, x: &Cell) {
    *w += x;
}

/**
 * Adds the unsigned native value `u` to `w`.
 */
#[inline]
pub fn add_ui(w: &mut Cell, u: u64) {
    if u != 0 {
        *w += u;
    }
}

/**
 * Subtracts `x` from `w`, storing the result in `w`. The order is fixed:
 * `w = w - x`.
 */
#[inline]
pub fn sub(w: &mut Cell, x: &Cell) {
    *w -= x;
}

/**
 * Subtracts the unsigned native value `u` from `w`.
 */
#[inline]
pub fn sub_ui(w: &mut Cell, u: u64) {
    if u != 0 {
        *w -= u;
    }
}

/// Negates `w` in place without reallocating.
#[inline]
pub fn neg(w: &mut Cell) {
    let x = mem::take(w);
    *w = -x;
}

/// Replaces `w` with its absolute value.
#[inline]
pub fn abs(w: &mut Cell) {
    if w.is_negative() {
        neg(w);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ll::{from_si, from_wide};

    #[test]
    fn add_sub() {
        let cases = [
            (0i128, 0i128),
            (1, -1),
            (190000000000000, 1),
            (-192834857324591531, -431343873217510631841),
            (i64::max_value() as i128, 1),
        ];

        for &(x, y) in cases.iter() {
            let mut w = from_wide(x);
            add(&mut w, &from_wide(y));
            assert_eq!(w, from_wide(x + y));

            let mut w = from_wide(x);
            sub(&mut w, &from_wide(y));
            assert_eq!(w, from_wide(x - y));
        }
    }

    #[test]
    fn add_sub_ui() {
        let mut w = from_si(-3);
        add_ui(&mut w, 10);
        assert_eq!(w, from_si(7));

        sub_ui(&mut w, u64::max_value());
        assert_eq!(w, from_wide(7 - u64::max_value() as i128));

        add_ui(&mut w, 0);
        sub_ui(&mut w, 0);
        assert_eq!(w, from_wide(7 - u64::max_value() as i128));
    }

    #[test]
    fn neg_abs() {
        let mut w = from_si(-12);
        neg(&mut w);
        assert_eq!(w, from_si(12));
        abs(&mut w);
        assert_eq!(w, from_si(12));
        neg(&mut w);
        abs(&mut w);
        assert_eq!(w, from_si(12));

        let mut z = from_si(0);
        neg(&mut z);
        assert_eq!(z, from_si(0));
    }
}
