//! Weighted optimum members (Knuth's Algorithm B).
//!
//! Every element of the universe carries a real weight; the weight of a set is
//! the sum over its elements. A single bottom-up pass computes, per node, the
//! best weight any completion can reach, then a walk from the root follows the
//! better child. Ties prefer the exclude branch.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

/// Direction of the weighted search.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Objective {
    #[default]
    Maximize,
    Minimize,
}

impl Objective {
    fn sign(self) -> f64 {
        match self {
            Objective::Maximize => 1.0,
            Objective::Minimize => -1.0,
        }
    }
}

impl ZddManager {
    fn check_weights(&self, weights: &[f64]) -> Result<()> {
        if weights.len() != self.num_vars() {
            return Err(Error::WeightCount {
                expected: self.num_vars(),
                actual: weights.len(),
            });
        }
        Ok(())
    }

    /// Best-scoring member of `f` and its weight, or `None` if `f` is empty.
    ///
    /// `weights[i]` is the weight of element `i + 1`; one weight per element of
    /// the universe is required.
    ///
    /// ```
    /// use frontier_zdd::optimize::Objective;
    /// use frontier_zdd::types::Var;
    /// use frontier_zdd::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let f = mgr.from_sets(vec![vec![1u32], vec![2], vec![1, 2]]);
    ///
    /// let (set, weight) = mgr.best_set(f, &[1.0, -2.0], Objective::Maximize).unwrap().unwrap();
    /// assert_eq!(set, vec![Var::new(1)]);
    /// assert_eq!(weight, 1.0);
    /// ```
    pub fn best_set(&self, f: ZddId, weights: &[f64], objective: Objective) -> Result<Option<(Vec<Var>, f64)>> {
        self.check_weights(weights)?;
        Ok(self.best_set_unchecked(f, weights, objective))
    }

    pub fn max_weight_set(&self, f: ZddId, weights: &[f64]) -> Result<Option<(Vec<Var>, f64)>> {
        self.best_set(f, weights, Objective::Maximize)
    }

    pub fn min_weight_set(&self, f: ZddId, weights: &[f64]) -> Result<Option<(Vec<Var>, f64)>> {
        self.best_set(f, weights, Objective::Minimize)
    }

    fn best_set_unchecked(&self, f: ZddId, weights: &[f64], objective: Objective) -> Option<(Vec<Var>, f64)> {
        if f.is_zero() {
            return None;
        }

        let sign = objective.sign();
        let mut best: HashMap<ZddId, f64> = HashMap::new();
        best.insert(ZddId::ZERO, f64::NEG_INFINITY);
        best.insert(ZddId::ONE, 0.0);

        for id in self.nodes_bottom_up(f) {
            let node = self.node(id);
            let lo = best[&node.lo];
            let hi = sign * weights[node.var.position()] + best[&node.hi];
            best.insert(id, lo.max(hi));
        }

        let mut set = Vec::new();
        let mut total = 0.0;
        let mut current = f;
        while !current.is_terminal() {
            let node = self.node(current);
            let w = weights[node.var.position()];
            let hi = sign * w + best[&node.hi];
            if hi > best[&node.lo] {
                set.push(node.var);
                total += w;
                current = node.hi;
            } else {
                current = node.lo;
            }
        }
        debug_assert!(current.is_one());

        Some((set, total))
    }

    /// Iterates over the members of `f` from best to worst weight.
    ///
    /// Each step runs Algorithm B on the family with all previously yielded
    /// sets removed.
    pub fn weighted_sets(&self, f: ZddId, weights: &[f64], objective: Objective) -> Result<WeightedSets<'_>> {
        self.check_weights(weights)?;
        Ok(WeightedSets {
            mgr: self,
            remaining: f,
            weights: weights.to_vec(),
            objective,
        })
    }
}

/// Iterator over the members of a family in weight order.
///
/// Created by [`ZddManager::weighted_sets`].
pub struct WeightedSets<'a> {
    mgr: &'a ZddManager,
    remaining: ZddId,
    weights: Vec<f64>,
    objective: Objective,
}

impl<'a> Iterator for WeightedSets<'a> {
    type Item = (Vec<Var>, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let (set, weight) = self
            .mgr
            .best_set_unchecked(self.remaining, &self.weights, self.objective)?;
        let found = self.mgr.singleton(set.iter().copied());
        self.remaining = self.mgr.difference(self.remaining, found);
        Some((set, weight))
    }
}
