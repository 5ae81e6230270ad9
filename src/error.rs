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

//! Errors reported by the tower's fallible operations.

use thiserror::Error;

use crate::operand::Kind;

/// The ways an operation on the tower can be rejected. None of them leave the
/// receiver modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The operand's kind is not accepted by the operation.
    #[error("{op}: expected {}, found {found}", kinds(.accepted))]
    TypeMismatch {
        op: &'static str,
        found: Kind,
        accepted: &'static [Kind],
    },
    /// A numeric precondition on an argument does not hold.
    #[error("{op}: {reason}")]
    Range {
        op: &'static str,
        reason: &'static str,
    },
    /// The operation is undefined for the receiver's value.
    #[error("{op}: {reason}")]
    Domain {
        op: &'static str,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

fn kinds(accepted: &[Kind]) -> String {
    let names: Vec<String> = accepted.iter().map(|k| k.to_string()).collect();
    match names.len() {
        0 => "nothing".to_string(),
        1 => names[0].clone(),
        n => format!("{} or {}", names[..n - 1].join(", "), names[n - 1]),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages() {
        let e = Error::TypeMismatch {
            op: "add!",
            found: Kind::Float,
            accepted: &[Kind::Integer, Kind::Small, Kind::Big],
        };
        assert_eq!(e.to_string(), "add!: expected Integer, i64 or wide integer, found Float");

        let e = Error::Range { op: "root", reason: "degree must be positive" };
        assert_eq!(e.to_string(), "root: degree must be positive");
    }
}
