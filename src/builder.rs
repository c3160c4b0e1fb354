//! Breadth-first construction of a ZDD from a [`DdSpec`].
//!
//! Construction runs in two sweeps:
//!
//! 1. **Top-down.** Starting from the root state, every live state at a
//!    position is expanded under both decisions. Resulting states are
//!    deduplicated per target position (hash, then full equality), so each
//!    distinct state is expanded once. Only the child links are kept after a
//!    level is done; its state arena is dropped.
//! 2. **Bottom-up.** Levels are turned into manager nodes from the last
//!    position to the first. The manager applies zero-suppression and
//!    hash-consing, so the result is the canonical diagram of the family.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::reference::ZddId;
use crate::spec::{DdSpec, Step};
use crate::types::Var;
use crate::zdd::ZddManager;

/// Where a decision leads during the top-down sweep.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Child {
    Zero,
    One,
    Node { position: usize, index: u32 },
}

/// Live states of one position.
struct LevelTable<C> {
    state_len: usize,
    /// Flat arena, `state_len` cells per state.
    states: Vec<C>,
    buckets: HashMap<u64, Vec<u32>>,
    /// `[exclude, include]` per state, filled when the level is expanded.
    children: Vec<[Child; 2]>,
}

impl<C: Copy + Eq> LevelTable<C> {
    fn new(state_len: usize) -> Self {
        Self {
            state_len,
            states: Vec::new(),
            buckets: HashMap::new(),
            children: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        if self.state_len == 0 {
            self.buckets.values().map(Vec::len).sum()
        } else {
            self.states.len() / self.state_len
        }
    }

    fn state(&self, index: usize) -> &[C] {
        &self.states[index * self.state_len..(index + 1) * self.state_len]
    }

    /// Index of a state equal to `state`, inserting it if there is none.
    ///
    /// Returns the index and whether it was newly inserted.
    fn find_or_insert<S>(&mut self, spec: &S, state: &[C], position: usize) -> (u32, bool)
    where
        S: DdSpec<Cell = C>,
    {
        let hash = spec.hash_state(state, position);
        let bucket = self.buckets.entry(hash).or_default();
        for &index in bucket.iter() {
            let start = index as usize * self.state_len;
            let stored = &mut self.states[start..start + self.state_len];
            if spec.equal_states(stored, state, position) {
                spec.merge_states(stored, state, position);
                return (index, false);
            }
        }

        let index = if self.state_len == 0 {
            bucket.len() as u32
        } else {
            (self.states.len() / self.state_len) as u32
        };
        self.states.extend_from_slice(state);
        bucket.push(index);
        (index, true)
    }

    /// Drops the states, keeping the child links.
    fn release_states(&mut self) {
        self.states = Vec::new();
        self.buckets = HashMap::new();
    }
}

/// Statistics of one construction.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of distinct live states at each position.
    pub level_widths: Vec<usize>,
    /// Largest number of states held at once across all positions.
    pub peak_states: usize,
    /// Number of decision nodes in the resulting diagram.
    pub nodes: usize,
    /// Wall-clock time of the whole construction.
    pub elapsed: Duration,
}

impl BuildStats {
    /// Largest number of distinct states at a single position.
    pub fn max_level_width(&self) -> usize {
        self.level_widths.iter().copied().max().unwrap_or(0)
    }

    /// Number of distinct states expanded over all positions.
    pub fn total_states(&self) -> usize {
        self.level_widths.iter().sum()
    }
}

/// Drives a [`DdSpec`] into a [`ZddManager`].
///
/// ```
/// use frontier_zdd::builder::DdBuilder;
/// use frontier_zdd::frontier::FrontierManager;
/// use frontier_zdd::graph::Graph;
/// use frontier_zdd::specs::SpanningTree;
/// use frontier_zdd::zdd::ZddManager;
///
/// let graph = Graph::grid(2, 3);
/// let fm = FrontierManager::new(&graph).unwrap();
/// let mgr = ZddManager::new();
///
/// let trees = DdBuilder::new(&mgr).build(&SpanningTree::new(&fm)).unwrap();
/// assert_eq!(mgr.count(trees).to_string(), "15");
/// ```
pub struct DdBuilder<'a> {
    mgr: &'a ZddManager,
    state_limit: Option<usize>,
}

impl<'a> DdBuilder<'a> {
    pub fn new(mgr: &'a ZddManager) -> Self {
        Self { mgr, state_limit: None }
    }

    /// Fails with [`Error::StateLimit`] once more than `limit` states are live at once.
    pub fn with_state_limit(mut self, limit: usize) -> Self {
        self.state_limit = Some(limit);
        self
    }

    /// Builds the family described by `spec`.
    pub fn build<S: DdSpec>(&self, spec: &S) -> Result<ZddId> {
        self.build_with_stats(spec).map(|(root, _)| root)
    }

    /// Builds the family described by `spec`, also reporting construction statistics.
    pub fn build_with_stats<S: DdSpec>(&self, spec: &S) -> Result<(ZddId, BuildStats)> {
        let start = Instant::now();
        let m = spec.num_positions();
        let state_len = spec.state_len();
        if m > 0 {
            self.mgr.ensure_var(Var::at_position(m - 1));
        }

        let mut stats = BuildStats::default();
        let mut tables: Vec<LevelTable<S::Cell>> = (0..m).map(|_| LevelTable::new(state_len)).collect();
        let mut live = 0usize;

        let mut scratch = vec![S::Cell::default(); state_len];
        let root = match spec.root(&mut scratch) {
            Step::Reject => Child::Zero,
            Step::Accept => Child::One,
            Step::Next(position) => {
                if position >= m {
                    return Err(Error::InvalidTransition { position: 0, next: position });
                }
                let (index, _) = tables[position].find_or_insert(spec, &scratch, position);
                live += 1;
                Child::Node { position, index }
            }
        };
        stats.peak_states = live;

        // Top-down: expand every level into its successors
        for position in 0..m {
            let (head, tail) = tables.split_at_mut(position + 1);
            let current = &mut head[position];
            let width = current.len();
            stats.level_widths.push(width);
            debug!(
                "Level {}: {} states, {} live in total",
                position, width, live
            );

            let mut children = Vec::with_capacity(width);
            for index in 0..width {
                let mut links = [Child::Zero; 2];
                for (link, take) in links.iter_mut().zip([false, true]) {
                    scratch.copy_from_slice(current.state(index));
                    *link = match spec.child(&mut scratch, position, take) {
                        Step::Reject => Child::Zero,
                        Step::Accept => Child::One,
                        Step::Next(next) => {
                            if next <= position || next >= m {
                                return Err(Error::InvalidTransition { position, next });
                            }
                            let target = &mut tail[next - position - 1];
                            let (index, inserted) = target.find_or_insert(spec, &scratch, next);
                            if inserted {
                                live += 1;
                                stats.peak_states = stats.peak_states.max(live);
                                if let Some(limit) = self.state_limit {
                                    if live > limit {
                                        return Err(Error::StateLimit { states: live, limit });
                                    }
                                }
                            }
                            Child::Node { position: next, index }
                        }
                    };
                }
                children.push(links);
            }

            current.children = children;
            current.release_states();
            live -= width;
        }

        // Bottom-up: create canonical nodes, deepest level first
        let mut ids: Vec<Vec<ZddId>> = vec![Vec::new(); m];
        for position in (0..m).rev() {
            let var = Var::at_position(position);
            let level_ids: Vec<ZddId> = tables[position]
                .children
                .iter()
                .map(|&[lo, hi]| {
                    let lo = resolve(&ids, lo);
                    let hi = resolve(&ids, hi);
                    self.mgr.get_node(var, lo, hi)
                })
                .collect();
            ids[position] = level_ids;
            tables[position].children = Vec::new();
            self.mgr.check_node_limit()?;
        }

        let root = resolve(&ids, root);
        stats.nodes = self.mgr.node_count(root);
        stats.elapsed = start.elapsed();
        info!(
            "Built diagram {} over {} positions: {} nodes, max level width {}, in {:?}",
            root,
            m,
            stats.nodes,
            stats.max_level_width(),
            stats.elapsed
        );

        Ok((root, stats))
    }
}

fn resolve(ids: &[Vec<ZddId>], child: Child) -> ZddId {
    match child {
        Child::Zero => ZddId::ZERO,
        Child::One => ZddId::ONE,
        Child::Node { position, index } => ids[position][index as usize],
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    /// Subsets of `n` elements with exactly `k` elements, tracking the count so far.
    struct Combination {
        n: usize,
        k: u8,
    }

    impl DdSpec for Combination {
        type Cell = u8;

        fn state_len(&self) -> usize {
            1
        }

        fn num_positions(&self) -> usize {
            self.n
        }

        fn root(&self, _state: &mut [u8]) -> Step {
            if self.n == 0 {
                return if self.k == 0 { Step::Accept } else { Step::Reject };
            }
            Step::Next(0)
        }

        fn child(&self, state: &mut [u8], position: usize, take: bool) -> Step {
            if take {
                state[0] += 1;
                if state[0] > self.k {
                    return Step::Reject;
                }
            }
            if state[0] == self.k {
                return Step::Accept;
            }
            Step::advance(position, self.n)
        }
    }

    /// Jumps straight to the last position, skipping all others.
    struct Skipper {
        n: usize,
    }

    impl DdSpec for Skipper {
        type Cell = u8;

        fn state_len(&self) -> usize {
            0
        }

        fn num_positions(&self) -> usize {
            self.n
        }

        fn root(&self, _state: &mut [u8]) -> Step {
            Step::Next(0)
        }

        fn child(&self, _state: &mut [u8], position: usize, _take: bool) -> Step {
            if position == 0 {
                Step::Next(self.n - 1)
            } else {
                Step::Accept
            }
        }
    }

    /// `k`-subsets of `n` elements priced `1..=n`, accepted when the cheapest
    /// prefix leading to the same count stays within `budget`.
    ///
    /// The cost cell is ignored by hashing and equality, so states differing
    /// only in cost are merged, keeping the smaller cost.
    struct CheapestPrefix {
        n: usize,
        k: u32,
        budget: u32,
        merges: std::cell::Cell<usize>,
    }

    impl CheapestPrefix {
        fn new(n: usize, k: u32, budget: u32) -> Self {
            Self {
                n,
                k,
                budget,
                merges: std::cell::Cell::new(0),
            }
        }
    }

    impl DdSpec for CheapestPrefix {
        type Cell = u32;

        fn state_len(&self) -> usize {
            2
        }

        fn num_positions(&self) -> usize {
            self.n
        }

        fn root(&self, _state: &mut [u32]) -> Step {
            Step::Next(0)
        }

        fn child(&self, state: &mut [u32], position: usize, take: bool) -> Step {
            if take {
                state[0] += 1;
                state[1] += position as u32 + 1;
                if state[0] > self.k {
                    return Step::Reject;
                }
            }
            if position + 1 < self.n {
                Step::Next(position + 1)
            } else if state[0] == self.k && state[1] <= self.budget {
                Step::Accept
            } else {
                Step::Reject
            }
        }

        fn hash_state(&self, state: &[u32], _position: usize) -> u64 {
            state[0] as u64
        }

        fn equal_states(&self, a: &[u32], b: &[u32], _position: usize) -> bool {
            a[0] == b[0]
        }

        fn merge_states(&self, kept: &mut [u32], other: &[u32], _position: usize) {
            kept[1] = kept[1].min(other[1]);
            self.merges.set(self.merges.get() + 1);
        }
    }

    struct Backwards;

    impl DdSpec for Backwards {
        type Cell = u8;

        fn state_len(&self) -> usize {
            1
        }

        fn num_positions(&self) -> usize {
            3
        }

        fn root(&self, _state: &mut [u8]) -> Step {
            Step::Next(1)
        }

        fn child(&self, _state: &mut [u8], _position: usize, _take: bool) -> Step {
            Step::Next(0)
        }
    }

    #[test]
    fn test_combinations_match_manager() {
        let mgr = ZddManager::new();
        let f = DdBuilder::new(&mgr).build(&Combination { n: 6, k: 3 }).unwrap();
        assert_eq!(f, mgr.combinations(1u32..=6, 3));
        assert_eq!(mgr.count(f), 20u32.into());
    }

    #[test]
    fn test_states_are_merged() {
        let mgr = ZddManager::new();
        let (_, stats) = DdBuilder::new(&mgr)
            .build_with_stats(&Combination { n: 8, k: 2 })
            .unwrap();
        // Count so far is 0, 1 or 2; 2 accepts immediately
        assert_eq!(stats.level_widths[0], 1);
        assert!(stats.level_widths.iter().all(|&w| w <= 2));
    }

    #[test]
    fn test_merge_hook_combines_states() {
        let mgr = ZddManager::new();

        // Cheapest pair among the first three elements costs 3, any pair with
        // element 4 costs at least 5.
        let spec = CheapestPrefix::new(4, 2, 3);
        let (f, stats) = DdBuilder::new(&mgr).build_with_stats(&spec).unwrap();
        assert!(spec.merges.get() > 0);
        assert_eq!(f, mgr.combinations(1u32..=3, 2));
        assert_eq!(mgr.node_count(f), 4);
        assert_eq!(stats.nodes, 4);
        assert!(stats.level_widths.iter().all(|&w| w <= 3));

        let f = DdBuilder::new(&mgr).build(&CheapestPrefix::new(4, 2, 5)).unwrap();
        assert_eq!(f, mgr.combinations(1u32..=4, 2));
        assert_eq!(mgr.count(f), 6u32.into());

        let f = DdBuilder::new(&mgr).build(&CheapestPrefix::new(4, 2, 2)).unwrap();
        assert_eq!(f, ZddId::ZERO);
    }

    #[test]
    fn test_trivial_roots() {
        let mgr = ZddManager::new();
        let builder = DdBuilder::new(&mgr);
        assert_eq!(builder.build(&Combination { n: 0, k: 0 }).unwrap(), ZddId::ONE);
        assert_eq!(builder.build(&Combination { n: 0, k: 1 }).unwrap(), ZddId::ZERO);
        assert_eq!(builder.build(&Combination { n: 3, k: 4 }).unwrap(), ZddId::ZERO);
    }

    #[test]
    fn test_skipped_positions_are_excluded() {
        let mgr = ZddManager::new();
        let f = DdBuilder::new(&mgr).build(&Skipper { n: 4 }).unwrap();
        assert_eq!(f, mgr.powerset([1u32, 4]));
    }

    #[test]
    fn test_invalid_transition() {
        let mgr = ZddManager::new();
        let err = DdBuilder::new(&mgr).build(&Backwards).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { position: 1, next: 0 }));
    }

    #[test]
    fn test_state_limit() {
        let mgr = ZddManager::new();
        let err = DdBuilder::new(&mgr)
            .with_state_limit(3)
            .build(&Combination { n: 10, k: 5 })
            .unwrap_err();
        assert!(matches!(err, Error::StateLimit { limit: 3, .. }));
    }

    #[test]
    fn test_node_limit() {
        let mgr = ZddManager::with_node_limit(8);
        let err = DdBuilder::new(&mgr).build(&Combination { n: 10, k: 5 }).unwrap_err();
        assert!(matches!(err, Error::OutOfMemory { limit: 8, .. }));
    }

    #[test]
    fn test_canonical_rebuild() {
        let mgr = ZddManager::new();
        let builder = DdBuilder::new(&mgr);
        let a = builder.build(&Combination { n: 7, k: 3 }).unwrap();
        let nodes = mgr.num_nodes();
        let b = builder.build(&Combination { n: 7, k: 3 }).unwrap();
        assert_eq!(a, b);
        assert_eq!(mgr.num_nodes(), nodes);
    }
}
