//! Table enumeration.
//!
//! [`generate`] walks the operand domain of one operation in descending order
//! and yields an [`Entry`] per operand pair. It holds no buffers, so the
//! emitter can write each entry as soon as it is produced.

use std::fmt;
use std::iter::FusedIterator;

use serde::Serialize;

use crate::op::{Operation, Sweep};

/// Inclusive upper limit of the operand domain `[0, N]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Bound(pub u32);

/// Bound compiled into every shipped header.
pub const DEFAULT_BOUND: Bound = Bound(64);

impl Bound {
    /// Returns the largest operand value.
    pub fn limit(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of a generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Operation the row belongs to.
    pub operation: Operation,
    /// Outer operand.
    pub a: u32,
    /// Inner operand.
    pub b: u32,
    /// Precomputed `operation(a, b)`.
    pub result: u64,
}

impl Entry {
    /// Token name defined for this row, e.g. `i_ADD_3_1`.
    pub fn symbol(&self) -> SymbolName {
        SymbolName {
            prefix: self.operation.symbol_prefix(),
            a: self.a,
            b: self.b,
        }
    }
}

/// Displayable token name; formatting writes straight into the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolName {
    prefix: &'static str,
    a: u32,
    b: u32,
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.prefix, self.a, self.b)
    }
}

/// Lazy enumeration of a table's entries.
#[derive(Debug, Clone)]
pub struct Entries {
    operation: Operation,
    bound: Bound,
    next: Option<(u32, u32)>,
}

/// Enumerates the table for `operation` over `[0, bound]`.
///
/// The outer operand runs from `bound` down to 0. The inner operand runs from
/// the outer operand (triangular) or from `bound` (rectangular) down to 0.
pub fn generate(operation: Operation, bound: Bound) -> Entries {
    let a = bound.limit();
    Entries {
        operation,
        bound,
        next: Some((a, inner_start(operation.sweep(), bound, a))),
    }
}

/// Number of entries [`generate`] yields, or `None` if it exceeds `usize`.
pub fn checked_len(operation: Operation, bound: Bound) -> Option<usize> {
    let n = u128::from(bound.limit());
    let len = match operation.sweep() {
        Sweep::Triangular => (n + 1) * (n + 2) / 2,
        Sweep::Rectangular => (n + 1) * (n + 1),
    };
    usize::try_from(len).ok()
}

/// Number of entries [`generate`] yields, saturating at `usize::MAX`.
pub fn expected_len(operation: Operation, bound: Bound) -> usize {
    checked_len(operation, bound).unwrap_or(usize::MAX)
}

fn inner_start(sweep: Sweep, bound: Bound, a: u32) -> u32 {
    match sweep {
        Sweep::Triangular => a,
        Sweep::Rectangular => bound.limit(),
    }
}

impl Entries {
    /// Operation being enumerated.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Domain bound being enumerated.
    pub fn bound(&self) -> Bound {
        self.bound
    }

    fn remaining(&self) -> Option<usize> {
        let Some((a, b)) = self.next else {
            return Some(0);
        };
        let (a, b) = (u128::from(a), u128::from(b));
        let below = match self.operation.sweep() {
            Sweep::Triangular => a * (a + 1) / 2,
            Sweep::Rectangular => a * (u128::from(self.bound.limit()) + 1),
        };
        usize::try_from(b + 1 + below).ok()
    }
}

impl Iterator for Entries {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        let (a, b) = self.next?;
        self.next = if b > 0 {
            Some((a, b - 1))
        } else if a > 0 {
            Some((a - 1, inner_start(self.operation.sweep(), self.bound, a - 1)))
        } else {
            None
        };
        Some(Entry {
            operation: self.operation,
            a,
            b,
            result: self.operation.result(a, b),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining() {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

/// `len()` is exact while the remaining count fits in `usize`, which holds
/// for every bound below `u32::MAX` on 64-bit targets.
impl ExactSizeIterator for Entries {}

impl FusedIterator for Entries {}
