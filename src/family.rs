//! Partial-order filters and derived families.
//!
//! Everything here is built on top of the primitive set operations of
//! [`ZddManager`]: subset/superset filtering, minimal and maximal antichains,
//! the hitting-set transform, Minato division and cardinality filters.
//!
//! Operations that talk about "all sets" (hitting, complement) are relative to
//! the manager's current universe, i.e. the elements `1..=num_vars()`.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::debug;
use num_bigint::BigUint;

use crate::cache::{CacheKey, OpType};
use crate::error::{Error, Result};
use crate::reference::ZddId;
use crate::types::Level;
use crate::zdd::ZddManager;

impl ZddManager {
    // ========================================================================
    // Subset / Superset Filters
    // ========================================================================

    /// Sets of `f` that are not a subset of any set of `g`.
    ///
    /// ```
    /// use frontier_zdd::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let f = mgr.from_sets(vec![vec![1u32], vec![1, 2], vec![3]]);
    /// let g = mgr.from_sets(vec![vec![1u32, 2]]);
    ///
    /// assert_eq!(mgr.non_subsets(f, g), mgr.base(3));
    /// ```
    pub fn non_subsets(&self, f: ZddId, g: ZddId) -> ZddId {
        if g.is_zero() {
            return f;
        }
        if f.is_zero() || f == g || f.is_one() {
            return ZddId::ZERO;
        }
        if g.is_one() {
            return self.difference(f, ZddId::ONE);
        }

        let key = CacheKey::non_commutative(OpType::NonSubsets, f, g);
        if let Some(result) = self.cache.borrow().get(&key) {
            return result;
        }

        let f_node = self.node(f);
        let g_node = self.node(g);
        let result = match self.level(f_node.var).cmp(&self.level(g_node.var)) {
            Ordering::Less => {
                // Sets with `var` cannot fit into any set of `g`
                let lo = self.non_subsets(f_node.lo, g);
                self.get_node(f_node.var, lo, f_node.hi)
            }
            Ordering::Greater => {
                let r = self.non_subsets(f, g_node.hi);
                self.non_subsets(r, g_node.lo)
            }
            Ordering::Equal => {
                let r = self.non_subsets(f_node.lo, g_node.lo);
                let lo = self.non_subsets(r, g_node.hi);
                let hi = self.non_subsets(f_node.hi, g_node.hi);
                self.get_node(f_node.var, lo, hi)
            }
        };

        self.cache.borrow_mut().insert(key, result);
        result
    }

    /// Sets of `f` that are not a superset of any set of `g`.
    pub fn non_supersets(&self, f: ZddId, g: ZddId) -> ZddId {
        if g.is_zero() {
            return f;
        }
        if f.is_zero() || f == g || self.contains_empty(g) {
            return ZddId::ZERO;
        }
        if f.is_one() {
            return ZddId::ONE;
        }

        let key = CacheKey::non_commutative(OpType::NonSupersets, f, g);
        if let Some(result) = self.cache.borrow().get(&key) {
            return result;
        }

        let f_node = self.node(f);
        let g_node = self.node(g);
        let result = match self.level(f_node.var).cmp(&self.level(g_node.var)) {
            Ordering::Less => {
                let lo = self.non_supersets(f_node.lo, g);
                let hi = self.non_supersets(f_node.hi, g);
                self.get_node(f_node.var, lo, hi)
            }
            // Sets of `g` with `var` cannot fit into any set of `f`
            Ordering::Greater => self.non_supersets(f, g_node.lo),
            Ordering::Equal => {
                let lo = self.non_supersets(f_node.lo, g_node.lo);
                let a = self.non_supersets(f_node.hi, g_node.lo);
                let b = self.non_supersets(f_node.hi, g_node.hi);
                let hi = self.intersection(a, b);
                self.get_node(f_node.var, lo, hi)
            }
        };

        self.cache.borrow_mut().insert(key, result);
        result
    }

    /// Sets of `f` contained in some set of `g`.
    pub fn subsets(&self, f: ZddId, g: ZddId) -> ZddId {
        let outside = self.non_subsets(f, g);
        self.difference(f, outside)
    }

    /// Sets of `f` containing some set of `g`.
    pub fn supersets(&self, f: ZddId, g: ZddId) -> ZddId {
        let outside = self.non_supersets(f, g);
        self.difference(f, outside)
    }

    // ========================================================================
    // Antichains
    // ========================================================================

    /// Inclusion-minimal sets of `f`.
    ///
    /// ```
    /// use frontier_zdd::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let f = mgr.from_sets(vec![vec![1u32, 2], vec![1, 2, 3], vec![2, 3, 4]]);
    ///
    /// let min = mgr.minimal(f);
    /// assert_eq!(min, mgr.from_sets(vec![vec![1u32, 2], vec![2, 3, 4]]));
    /// ```
    pub fn minimal(&self, f: ZddId) -> ZddId {
        if f.is_terminal() {
            return f;
        }

        let key = CacheKey::unary(OpType::Minimal, f);
        if let Some(result) = self.cache.borrow().get(&key) {
            return result;
        }

        let node = self.node(f);
        let lo = self.minimal(node.lo);
        let hi = self.minimal(node.hi);
        let hi = self.non_supersets(hi, lo);
        let result = self.get_node(node.var, lo, hi);

        self.cache.borrow_mut().insert(key, result);
        result
    }

    /// Inclusion-maximal sets of `f`.
    pub fn maximal(&self, f: ZddId) -> ZddId {
        if f.is_terminal() {
            return f;
        }

        let key = CacheKey::unary(OpType::Maximal, f);
        if let Some(result) = self.cache.borrow().get(&key) {
            return result;
        }

        let node = self.node(f);
        let lo = self.maximal(node.lo);
        let hi = self.maximal(node.hi);
        let lo = self.non_subsets(lo, hi);
        let result = self.get_node(node.var, lo, hi);

        self.cache.borrow_mut().insert(key, result);
        result
    }

    // ========================================================================
    // Hitting Sets
    // ========================================================================

    /// All subsets of the universe that intersect every set of `f`.
    ///
    /// The empty family is hit by everything (the result is the power set of
    /// the universe); a family containing ∅ is hit by nothing.
    pub fn hitting(&self, f: ZddId) -> ZddId {
        // The result spans the whole universe, so it is only reusable while
        // the number of elements stays the same
        let key = CacheKey::non_commutative(OpType::Hitting, f, ZddId::new(self.num_vars() as u32));
        if let Some(result) = self.cache.borrow().get(&key) {
            return result;
        }

        let mut memo: HashMap<ZddId, ZddId> = HashMap::new();

        for id in self.nodes_bottom_up(f) {
            let node = self.node(id);
            let below = Level::new(self.level(node.var).raw() + 1);

            let h_lo = self.hitting_of(node.lo, &memo);
            let h_hi = self.hitting_of(node.hi, &memo);
            let h_lo = self.extend_levels(h_lo, self.top_level(node.lo), below);
            let h_hi = self.extend_levels(h_hi, self.top_level(node.hi), below);

            // Without `var`, a hitting set must hit both branches
            let lo = self.intersection(h_lo, h_hi);
            let result = self.get_node(node.var, lo, h_lo);
            memo.insert(id, result);
        }

        let root = self.hitting_of(f, &memo);
        let result = self.extend_levels(root, self.top_level(f), Level::new(0));
        debug!("Hitting sets of {} ({} nodes): {}", f, memo.len(), result);
        self.cache.borrow_mut().insert(key, result);
        result
    }

    fn hitting_of(&self, f: ZddId, memo: &HashMap<ZddId, ZddId>) -> ZddId {
        if f.is_zero() {
            ZddId::ONE
        } else if f.is_one() {
            ZddId::ZERO
        } else {
            memo[&f]
        }
    }

    /// Lets every element at levels `to..from` occur freely in `f`.
    fn extend_levels(&self, f: ZddId, from: Level, to: Level) -> ZddId {
        let mut result = f;
        for level in (to.raw()..from.raw()).rev() {
            let var = self.var_at_level(Level::new(level));
            result = self.get_node(var, result, result);
        }
        result
    }

    /// Sets of the universe not in `f`.
    pub fn complement(&self, f: ZddId) -> ZddId {
        let all = self.universe();
        self.difference(all, f)
    }

    // ========================================================================
    // Division
    // ========================================================================

    /// Quotient `f / g`: the largest family `q` with `join(g, q) ⊆ f`, where
    /// sets of `q` are disjoint from the sets of `g` they are joined with.
    ///
    /// Fails with [`Error::EmptyDivisor`] when `g` is the empty family.
    pub fn quotient(&self, f: ZddId, g: ZddId) -> Result<ZddId> {
        if g.is_zero() {
            return Err(Error::EmptyDivisor);
        }
        let q = self.quotient_rec(f, g);
        debug!("Quotient {} / {} = {}", f, g, q);
        Ok(q)
    }

    fn quotient_rec(&self, f: ZddId, g: ZddId) -> ZddId {
        if g.is_one() {
            return f;
        }
        if f.is_terminal() {
            return ZddId::ZERO;
        }
        if f == g {
            return ZddId::ONE;
        }

        let key = CacheKey::non_commutative(OpType::Quotient, f, g);
        if let Some(result) = self.cache.borrow().get(&key) {
            return result;
        }

        let g_node = self.node(g);
        let f1 = self.subset1(f, g_node.var);
        let mut result = self.quotient_rec(f1, g_node.hi);
        if !result.is_zero() && !g_node.lo.is_zero() {
            let f0 = self.subset0(f, g_node.var);
            let q0 = self.quotient_rec(f0, g_node.lo);
            result = self.intersection(result, q0);
        }

        self.cache.borrow_mut().insert(key, result);
        result
    }

    /// Remainder `f % g = f \ join(g, f / g)`.
    pub fn remainder(&self, f: ZddId, g: ZddId) -> Result<ZddId> {
        let q = self.quotient(f, g)?;
        let product = self.join(g, q);
        Ok(self.difference(f, product))
    }

    // ========================================================================
    // Cardinality Filters
    // ========================================================================

    /// Sets of `f` with exactly `k` elements.
    pub fn choose(&self, f: ZddId, k: usize) -> ZddId {
        if f.is_zero() {
            return ZddId::ZERO;
        }
        if f.is_one() {
            return ZddId::terminal(k == 0);
        }

        if let Some(&result) = self.choose_cache.borrow().get(&(f, k)) {
            return result;
        }

        let node = self.node(f);
        let lo = self.choose(node.lo, k);
        let hi = if k == 0 { ZddId::ZERO } else { self.choose(node.hi, k - 1) };
        let result = self.get_node(node.var, lo, hi);

        self.choose_cache.borrow_mut().insert((f, k), result);
        result
    }

    /// Number of sets of `f` per set size: entry `k` counts the `k`-element sets.
    pub fn size_histogram(&self, f: ZddId) -> Vec<BigUint> {
        let mut memo: HashMap<ZddId, Vec<BigUint>> = HashMap::new();
        memo.insert(ZddId::ZERO, Vec::new());
        memo.insert(ZddId::ONE, vec![BigUint::from(1u32)]);

        for id in self.nodes_bottom_up(f) {
            let node = self.node(id);
            let lo = &memo[&node.lo];
            let hi = &memo[&node.hi];

            let mut hist = vec![BigUint::from(0u32); lo.len().max(hi.len() + 1)];
            for (k, c) in lo.iter().enumerate() {
                hist[k] += c;
            }
            for (k, c) in hi.iter().enumerate() {
                hist[k + 1] += c;
            }
            memo.insert(id, hist);
        }

        memo.remove(&f).unwrap_or_default()
    }
}
