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

use num_integer::Roots;
use num_traits::Signed;

use super::Cell;

/**
 * Replaces `w` with the truncated square root of `w`.
 *
 * `w` must not be negative.
 */
#[inline]
pub fn sqrt(w: &mut Cell) {
    debug_assert!(!w.is_negative());
    *w = Roots::sqrt(&*w);
}

/**
 * Replaces `w` with the truncated square root `s` of `w` and returns the
 * remainder `r`, such that the old value of `w` is `s * s + r` and
 * `0 <= r <= 2 * s`.
 *
 * `w` must not be negative.
 */
pub fn sqrtrem(w: &mut Cell) -> Cell {
    debug_assert!(!w.is_negative());
    let s = Roots::sqrt(&*w);
    let mut r = std::mem::replace(w, s);
    r -= &*w * &*w;
    debug_assert!(!r.is_negative());
    r
}

/**
 * Replaces `w` with its truncated `n`th root. The root of a negative value
 * is truncated toward zero.
 *
 * `n` must be positive, and odd when `w` is negative.
 */
#[inline]
pub fn root(w: &mut Cell, n: u32) {
    debug_assert!(n > 0);
    debug_assert!(n & 1 == 1 || !w.is_negative());
    if n > 1 {
        *w = w.nth_root(n);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ll::{from_si, from_wide};

    #[test]
    fn sqrt_and_rem() {
        let cases = [
            (0i128, 0i128, 0i128),
            (1, 1, 0),
            (2, 1, 1),
            (3, 1, 2),
            (4, 2, 0),
            (10, 3, 1),
            (1000, 31, 39),
            (4_503_599_761_588_225, 67108865, 0),
            (4_503_599_761_588_224, 67108864, 134217728),
        ];

        for &(x, s, r) in cases.iter() {
            let mut w = from_wide(x);
            sqrt(&mut w);
            assert_eq!(w, from_wide(s));

            let mut w = from_wide(x);
            let rem = sqrtrem(&mut w);
            assert_eq!(w, from_wide(s));
            assert_eq!(rem, from_wide(r));
        }
    }

    #[test]
    fn kth_root() {
        let cases = [
            (27i64, 3u32, 3i64),
            (26, 3, 2),
            (-27, 3, -3),
            (-26, 3, -2),
            (1 << 40, 4, 1024),
            (10, 1, 10),
            (10, 64, 1),
            (0, 5, 0),
        ];

        for &(x, n, r) in cases.iter() {
            let mut w = from_si(x);
            root(&mut w, n);
            assert_eq!(w, from_si(r), "root({}, {})", x, n);
        }
    }
}
