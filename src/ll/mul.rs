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

use num_traits::Zero;

use super::Cell;

/**
 * Multiplies `w` by `x`, storing the result in `w`.
 */
#[inline]
pub fn mul(w: &mut Cell, x: &Cell) {
    *w *= x;
}

/**
 * Multiplies `w` by the signed native value `s`. No sign decomposition is
 * needed, a signed scalar is supported directly.
 */
#[inline]
pub fn mul_si(w: &mut Cell, s: i64) {
    if s == 0 {
        w.set_zero();
    } else if s != 1 {
        *w *= s;
    }
}

/**
 * Adds the product `x * y` to `w`. `x` and `y` may be the same cell.
 */
#[inline]
pub fn addmul(w: &mut Cell, x: &Cell, y: &Cell) {
    if x.is_zero() || y.is_zero() {
        return;
    }
    *w += x * y;
}

/**
 * Adds the product `x * u` to `w`, for an unsigned native `u`. There is no
 * signed form of this primitive.
 */
#[inline]
pub fn addmul_ui(w: &mut Cell, x: &Cell, u: u64) {
    if u == 0 || x.is_zero() {
        return;
    }
    *w += x * u;
}
