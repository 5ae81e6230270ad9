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

//! Scoped temporaries. A native operand that has to take part in a cell
//! primitive is materialized into a `TmpCell`, which releases the cell when
//! it goes out of scope, whichever way the enclosing operation exits.

use std::mem;
use std::ops::Deref;

use log::trace;

use crate::ll::{self, Cell};
use crate::operand::Wide;

/// A cell materialized from a native value for the duration of one
/// operation.
pub struct TmpCell {
    cell: Cell,
}

impl TmpCell {
    /// Materializes the native small value `v`.
    pub fn from_si(v: i64) -> TmpCell {
        trace!("materializing temporary cell for small operand {}", v);
        TmpCell::acquire(ll::from_si(v))
    }

    /// Materializes the wide value `v`.
    pub fn from_wide(v: Wide) -> TmpCell {
        trace!("materializing temporary cell for wide operand {}", v);
        TmpCell::acquire(v.to_cell())
    }

    fn acquire(cell: Cell) -> TmpCell {
        live::inc();
        TmpCell { cell }
    }

    /**
     * Hands the cell over to the caller. Used when the temporary itself
     * becomes the destination of the operation, so there is nothing left to
     * release afterwards.
     */
    pub fn into_inner(mut self) -> Cell {
        mem::take(&mut self.cell)
    }
}

impl Deref for TmpCell {
    type Target = Cell;

    #[inline]
    fn deref(&self) -> &Cell {
        &self.cell
    }
}

impl Drop for TmpCell {
    fn drop(&mut self) {
        live::dec();
    }
}

/// Number of temporaries currently alive on this thread.
#[cfg(test)]
pub fn live_temporaries() -> usize {
    live::get()
}

#[cfg(test)]
mod live {
    use std::cell::Cell;

    thread_local!(static LIVE: Cell<usize> = Cell::new(0));

    pub fn inc() {
        LIVE.with(|l| l.set(l.get() + 1));
    }

    pub fn dec() {
        LIVE.with(|l| {
            debug_assert!(l.get() > 0);
            l.set(l.get() - 1)
        });
    }

    pub fn get() -> usize {
        LIVE.with(|l| l.get())
    }
}

#[cfg(not(test))]
mod live {
    #[inline(always)]
    pub fn inc() {}
    #[inline(always)]
    pub fn dec() {}
}
