//! Probability of a family under independent element inclusion.

use std::collections::HashMap;

use log::debug;

use crate::error::{Error, Result};
use crate::reference::ZddId;
use crate::types::Level;
use crate::zdd::ZddManager;

impl ZddManager {
    /// Probability that a random subset of the universe belongs to `f`, when
    /// element `i + 1` is included independently with probability `probs[i]`.
    ///
    /// Elements skipped between a node and its child are excluded from every
    /// set on that edge, so each contributes its non-inclusion probability.
    ///
    /// ```
    /// use frontier_zdd::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let f = mgr.base(1);
    /// mgr.base(2);
    ///
    /// // {1} is drawn when 1 is in and 2 is out
    /// let p = mgr.probability(f, &[0.5, 0.2]).unwrap();
    /// assert!((p - 0.4).abs() < 1e-12);
    /// ```
    pub fn probability(&self, f: ZddId, probs: &[f64]) -> Result<f64> {
        if probs.len() != self.num_vars() {
            return Err(Error::ProbabilityCount {
                expected: self.num_vars(),
                actual: probs.len(),
            });
        }
        for (i, &p) in probs.iter().enumerate() {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidProbability {
                    var: i as u32 + 1,
                    value: p,
                });
            }
        }

        let mut memo: HashMap<ZddId, f64> = HashMap::new();
        memo.insert(ZddId::ZERO, 0.0);
        memo.insert(ZddId::ONE, 1.0);

        for id in self.nodes_bottom_up(f) {
            let node = self.node(id);
            let level = self.level(node.var);
            let below = Level::new(level.raw() + 1);
            let p = probs[level.index()];

            let lo = memo[&node.lo] * self.skip_factor(probs, below, self.top_level(node.lo));
            let hi = memo[&node.hi] * self.skip_factor(probs, below, self.top_level(node.hi));
            memo.insert(id, (1.0 - p) * lo + p * hi);
        }

        let p = memo[&f] * self.skip_factor(probs, Level::new(0), self.top_level(f));
        debug!("Probability of {} over {} nodes: {}", f, memo.len() - 2, p);
        Ok(p)
    }

    /// Probability that every element at levels `from..to` is left out.
    fn skip_factor(&self, probs: &[f64], from: Level, to: Level) -> f64 {
        (from.index()..to.index())
            .map(|level| 1.0 - probs[self.var_at_level(Level::from(level)).position()])
            .product()
    }
}
