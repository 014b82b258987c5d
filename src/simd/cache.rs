//! Per-species operation caches.
//!
//! Each species owns one [`ImplCache`] per operator category. A cache is a
//! dense array of write-once slots indexed by opcode, so a warm lookup is
//! a bounds-free array index plus one atomic load.

use std::fmt;
use std::sync::OnceLock;

use tracing::trace;

use crate::error::{illegal_operator, Result};
use crate::simd::lanes::Lane;
use crate::simd::operators::{OperatorToken, OPCODE_LIMIT};

/// Identity element and combining function of an associative operator.
#[derive(Clone, Copy)]
pub struct Reducer<T> {
    /// Result of folding zero lanes.
    pub identity: T,
    /// Lane combiner.
    pub combine: fn(T, T) -> T,
}

impl<T: fmt::Debug> fmt::Debug for Reducer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Lazily populated table of resolved lane functions for one category.
pub struct ImplCache<F> {
    category: &'static str,
    slots: [OnceLock<F>; OPCODE_LIMIT],
}

impl<F: Copy> ImplCache<F> {
    /// Creates an empty cache whose failures report `category`.
    pub fn new(category: &'static str) -> Self {
        ImplCache {
            category,
            slots: std::array::from_fn(|_| OnceLock::new()),
        }
    }

    /// Operator category named in errors.
    pub fn category(&self) -> &'static str {
        self.category
    }

    /// Returns the function cached for `opc`, resolving it with `supplier`
    /// on first use.
    ///
    /// Racing first uses may all call `supplier`; the first store wins and
    /// the others are dropped. A supplier that has no implementation for
    /// `opc` yields [`VectorError::IllegalOperator`](crate::error::VectorError::IllegalOperator).
    #[inline(always)]
    pub fn find<O, S>(&self, op: O, opc: usize, owner: impl fmt::Display, supplier: S) -> Result<F>
    where
        O: OperatorToken,
        S: FnOnce(usize) -> Option<F>,
    {
        let slot = &self.slots[opc];
        if let Some(f) = slot.get() {
            return Ok(*f);
        }
        let f = supplier(opc).ok_or_else(|| {
            illegal_operator(op.operator().name(), self.category, owner.to_string())
        })?;
        if slot.set(f).is_ok() {
            trace!(
                operator = op.operator().name(),
                opcode = opc,
                category = self.category,
                owner = %owner,
                "operation cache slot populated"
            );
        }
        Ok(f)
    }

    /// True if `opc` has been resolved.
    pub fn is_cached(&self, opc: usize) -> bool {
        self.slots.get(opc).is_some_and(|slot| slot.get().is_some())
    }

    /// Number of resolved slots.
    pub fn populated(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }
}

impl<F> fmt::Debug for ImplCache<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let populated = self.slots.iter().filter(|slot| slot.get().is_some()).count();
        f.debug_struct("ImplCache")
            .field("category", &self.category)
            .field("populated", &populated)
            .finish()
    }
}

/// The operation caches owned by one species.
#[derive(Debug)]
pub struct OpCaches<T: Lane> {
    pub(crate) unary: ImplCache<fn(T) -> T>,
    pub(crate) binary: ImplCache<fn(T, T) -> T>,
    pub(crate) ternary: ImplCache<fn(T, T, T) -> T>,
    pub(crate) reduce: ImplCache<Reducer<T>>,
    pub(crate) compare: ImplCache<fn(T, T) -> bool>,
}

impl<T: Lane> OpCaches<T> {
    pub(crate) fn new() -> Self {
        OpCaches {
            unary: ImplCache::new("unary"),
            binary: ImplCache::new("binary"),
            ternary: ImplCache::new("ternary"),
            reduce: ImplCache::new("associative"),
            compare: ImplCache::new("comparison"),
        }
    }

    /// Total number of resolved slots across all categories.
    pub fn populated(&self) -> usize {
        self.unary.populated()
            + self.binary.populated()
            + self.ternary.populated()
            + self.reduce.populated()
            + self.compare.populated()
    }
}
