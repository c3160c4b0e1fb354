//! Operation caches for ZDD computations.
//!
//! Diagrams are immutable once built, so cached results stay valid for the
//! lifetime of the manager and are never evicted.

use std::collections::HashMap;

use num_bigint::BigUint;

use crate::reference::ZddId;

/// Cache key for unary and binary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub op: OpType,
    pub f: ZddId,
    pub g: ZddId,
}

/// Operation types for caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpType {
    Union,
    Intersection,
    Difference,
    Join,
    Meet,
    NonSubsets,
    NonSupersets,
    Minimal,
    Maximal,
    Quotient,
    /// Keyed by the universe size as second operand.
    Hitting,
}

impl CacheKey {
    /// Create a key for a commutative operation, normalizing operand order.
    pub fn commutative(op: OpType, f: ZddId, g: ZddId) -> Self {
        let (f, g) = if f.raw() <= g.raw() { (f, g) } else { (g, f) };
        Self { op, f, g }
    }

    pub fn non_commutative(op: OpType, f: ZddId, g: ZddId) -> Self {
        Self { op, f, g }
    }

    pub fn unary(op: OpType, f: ZddId) -> Self {
        Self {
            op,
            f,
            g: ZddId::INVALID,
        }
    }
}

/// Operation cache using HashMap.
#[derive(Debug, Clone, Default)]
pub struct Cache {
    map: HashMap<CacheKey, ZddId>,
}

impl Cache {
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<ZddId> {
        self.map.get(key).copied()
    }

    pub fn insert(&mut self, key: CacheKey, value: ZddId) {
        self.map.insert(key, value);
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Cache for exact cardinalities.
#[derive(Debug, Clone, Default)]
pub struct CountCache {
    map: HashMap<ZddId, BigUint>,
}

impl CountCache {
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn get(&self, id: ZddId) -> Option<&BigUint> {
        self.map.get(&id)
    }

    pub fn insert(&mut self, id: ZddId, count: BigUint) {
        self.map.insert(id, count);
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
}
