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

extern crate ramp_tower;

use ramp_tower::{Float, Integer, Number, Rational, Result};

fn main() -> Result<()> {
    println!("5!: {}", factorial(5)?);
    println!("10!: {}", factorial(10)?);
    println!("20!: {}", factorial(20)?);
    println!("100!: {}", factorial(100)?);
    println!("1000!: {}", factorial(1000)?);

    // Mixed operands promote the result
    let f = factorial(25)?;
    let third = Rational::new(Integer::from(1), Integer::from(3));
    let approx = Float::from_f64(24, 0.5).unwrap_or_else(|| Float::new(24));

    for n in [f.add_promoted(&third), f.mul_promoted(&approx), f.sub_promoted(1u64 << 63)].iter() {
        match *n {
            Number::Integer(ref i) => println!("integer: {}", i),
            Number::Rational(ref r) => println!("rational: {}", r),
            Number::Float(ref x) => println!("float ({} bits): {}", x.prec(), x),
        }
    }

    Ok(())
}

/// Calculates n!
fn factorial(n: usize) -> Result<Integer> {
    let mut a = Integer::from(1);
    for i in 2..=n {
        a.mul_in_place(i)?;
    }
    Ok(a)
}
