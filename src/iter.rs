//! Enumerating and sampling the sets of a family.

use num_bigint::{BigUint, RandBigInt};
use rand::Rng;

use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

/// Iterator that yields all sets in a ZDD family.
///
/// Sets come out in lexicographic order of their include/exclude paths,
/// exclude branch first; elements of each set are in increasing order.
pub struct SetIterator<'a> {
    mgr: &'a ZddManager,
    /// Stack of (node, set so far, hi branch pending)
    stack: Vec<(ZddId, Vec<Var>, bool)>,
}

impl<'a> SetIterator<'a> {
    pub fn new(mgr: &'a ZddManager, root: ZddId) -> Self {
        let mut iter = Self { mgr, stack: Vec::new() };
        if !root.is_zero() {
            iter.stack.push((root, Vec::new(), false));
        }
        iter
    }
}

impl<'a> Iterator for SetIterator<'a> {
    type Item = Vec<Var>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, current_set, visited_lo)) = self.stack.pop() {
            if id.is_zero() {
                continue;
            }
            if id.is_one() {
                return Some(current_set);
            }

            let node = self.mgr.node(id);
            if !visited_lo {
                self.stack.push((id, current_set.clone(), true));
                self.stack.push((node.lo, current_set, false));
            } else {
                let mut hi_set = current_set;
                hi_set.push(node.var);
                self.stack.push((node.hi, hi_set, false));
            }
        }
        None
    }
}

/// Iterator that yields every set of a family exactly once, in uniformly
/// random order.
///
/// Created by [`ZddManager::random_sets`].
pub struct RandomSets<'a, R> {
    mgr: &'a ZddManager,
    remaining: ZddId,
    rng: R,
}

impl<'a, R: Rng> Iterator for RandomSets<'a, R> {
    type Item = Vec<Var>;

    fn next(&mut self) -> Option<Self::Item> {
        let set = self.mgr.sample(self.remaining, &mut self.rng)?;
        let drawn = self.mgr.singleton(set.iter().copied());
        self.remaining = self.mgr.difference(self.remaining, drawn);
        Some(set)
    }
}

impl ZddManager {
    /// Returns an iterator over all sets in the family.
    ///
    /// ```
    /// use frontier_zdd::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let ps = mgr.powerset([1u32, 2]);
    ///
    /// let sets: Vec<_> = mgr.iter_sets(ps).collect();
    /// assert_eq!(sets.len(), 4);
    /// ```
    pub fn iter_sets(&self, f: ZddId) -> SetIterator<'_> {
        SetIterator::new(self, f)
    }

    pub fn collect_sets(&self, f: ZddId) -> Vec<Vec<Var>> {
        self.iter_sets(f).collect()
    }

    /// Returns one arbitrary set from the family, if non-empty.
    pub fn pick_one(&self, f: ZddId) -> Option<Vec<Var>> {
        if f.is_zero() {
            return None;
        }

        let mut result = Vec::new();
        let mut current = f;
        while !current.is_terminal() {
            let node = self.node(current);
            result.push(node.var);
            current = node.hi;
        }
        Some(result)
    }

    /// Draws one set of `f` uniformly at random.
    ///
    /// Each node splits the draw between its branches in proportion to their
    /// exact cardinalities.
    pub fn sample<R: Rng + ?Sized>(&self, f: ZddId, rng: &mut R) -> Option<Vec<Var>> {
        if f.is_zero() {
            return None;
        }

        let total = self.count(f);
        let mut r: BigUint = rng.gen_biguint_below(&total);

        let mut set = Vec::new();
        let mut current = f;
        while !current.is_terminal() {
            let node = self.node(current);
            let lo_count = self.count(node.lo);
            if r < lo_count {
                current = node.lo;
            } else {
                r -= lo_count;
                set.push(node.var);
                current = node.hi;
            }
        }
        debug_assert!(current.is_one());

        Some(set)
    }

    /// Iterates over the sets of `f` in random order, without repetition.
    pub fn random_sets<R: Rng>(&self, f: ZddId, rng: R) -> RandomSets<'_, R> {
        RandomSets {
            mgr: self,
            remaining: f,
            rng,
        }
    }
}
