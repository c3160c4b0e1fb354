//! Zero-Suppressed Decision Diagram (ZDD) manager.
//!
//! The manager is the canonical node store every diagram lives in: it hands
//! out small integer handles ([`ZddId`]) for `(element, lo, hi)` triples and
//! guarantees that structurally identical nodes are never duplicated. Two
//! families are therefore equal exactly when their handles are equal.
//!
//! # Quick Start
//!
//! ```
//! use frontier_zdd::zdd::ZddManager;
//!
//! let mgr = ZddManager::new();
//!
//! let x1 = mgr.base(1);  // {{1}}
//! let x2 = mgr.base(2);  // {{2}}
//!
//! let union = mgr.union(x1, x2);      // {{1}, {2}}
//! let joined = mgr.join(x1, x2);      // {{1, 2}}
//!
//! assert_eq!(mgr.count(union), 2u32.into());
//! assert_eq!(mgr.count(joined), 1u32.into());
//! ```

use std::cell::RefCell;
use std::cmp::{Ordering, Reverse};
use std::collections::{HashMap, HashSet};

use num_bigint::BigUint;

use crate::cache::{Cache, CacheKey, CountCache, OpType};
use crate::error::{Error, Result};
use crate::node::ZddNode;
use crate::reference::ZddId;
use crate::subtable::Subtable;
use crate::types::{Level, NodeId, Var};

/// Largest element a text dump may introduce unless configured otherwise.
pub const DEFAULT_MAX_VARS: usize = 1 << 20;

/// The ZDD manager: owns all nodes and handles operations.
///
/// # Terminal Semantics
///
/// - `ZddId::ZERO` (⊥): Empty family (no sets)
/// - `ZddId::ONE` (⊤): Family containing only the empty set: {∅}
pub struct ZddManager {
    /// Node storage. Index 0 = ZERO terminal, Index 1 = ONE terminal.
    nodes: RefCell<Vec<ZddNode>>,

    /// Per-level subtables for unique table lookup.
    subtables: RefCell<Vec<Subtable>>,

    /// Level of each element, indexed by `var.id()`; index 0 is a sentinel.
    level_map: RefCell<Vec<Level>>,

    /// Element at each level.
    var_order: RefCell<Vec<Var>>,

    /// Maximum number of nodes before [`check_node_limit`](Self::check_node_limit) fails.
    node_limit: Option<usize>,

    /// Largest element id accepted from untrusted input such as text dumps.
    max_vars: usize,

    pub(crate) cache: RefCell<Cache>,
    pub(crate) count_cache: RefCell<CountCache>,
    subset1_cache: RefCell<HashMap<(ZddId, u32), ZddId>>,
    subset0_cache: RefCell<HashMap<(ZddId, u32), ZddId>>,
    pub(crate) choose_cache: RefCell<HashMap<(ZddId, usize), ZddId>>,
}

impl Default for ZddManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ZddManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZddManager")
            .field("num_vars", &self.num_vars())
            .field("num_nodes", &self.num_nodes())
            .field("node_limit", &self.node_limit)
            .field("max_vars", &self.max_vars)
            .field("cache_entries", &self.cache.borrow().len())
            .finish()
    }
}

impl ZddManager {
    // ========================================================================
    // Construction
    // ========================================================================

    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Creates a manager with specified initial node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(2));

        // Index 0: ZERO terminal (⊥)
        nodes.push(ZddNode::default());
        // Index 1: ONE terminal (⊤)
        nodes.push(ZddNode::default());

        Self {
            nodes: RefCell::new(nodes),
            subtables: RefCell::new(Vec::new()),
            level_map: RefCell::new(vec![Level::new(u32::MAX)]),
            var_order: RefCell::new(Vec::new()),
            node_limit: None,
            max_vars: DEFAULT_MAX_VARS,
            cache: RefCell::new(Cache::new()),
            count_cache: RefCell::new(CountCache::new()),
            subset1_cache: RefCell::new(HashMap::new()),
            subset0_cache: RefCell::new(HashMap::new()),
            choose_cache: RefCell::new(HashMap::new()),
        }
    }

    /// Creates a manager that reports [`Error::OutOfMemory`] once it holds
    /// more than `limit` nodes.
    pub fn with_node_limit(limit: usize) -> Self {
        let mut mgr = Self::new();
        mgr.node_limit = Some(limit);
        mgr
    }

    pub fn node_limit(&self) -> Option<usize> {
        self.node_limit
    }

    pub fn max_vars(&self) -> usize {
        self.max_vars
    }

    /// Sets the largest element id [`read_dump`](Self::read_dump) may allocate.
    pub fn set_max_vars(&mut self, max_vars: usize) {
        self.max_vars = max_vars;
    }

    /// Fails if the node store has grown beyond the configured limit.
    pub fn check_node_limit(&self) -> Result<()> {
        match self.node_limit {
            Some(limit) if self.num_nodes() > limit => Err(Error::OutOfMemory {
                nodes: self.num_nodes(),
                limit,
            }),
            _ => Ok(()),
        }
    }

    // ========================================================================
    // Terminal Constants
    // ========================================================================

    /// Returns the empty family (⊥): contains no sets.
    pub fn zero(&self) -> ZddId {
        ZddId::ZERO
    }

    /// Returns the family containing only the empty set (⊤): {∅}.
    pub fn one(&self) -> ZddId {
        ZddId::ONE
    }

    #[inline(always)]
    pub fn is_zero(&self, f: ZddId) -> bool {
        f.is_zero()
    }

    #[inline(always)]
    pub fn is_one(&self, f: ZddId) -> bool {
        f.is_one()
    }

    #[inline(always)]
    pub fn is_terminal(&self, f: ZddId) -> bool {
        f.is_terminal()
    }

    // ========================================================================
    // Variable Management
    // ========================================================================

    /// Allocates a new element and returns its ID.
    pub fn new_var(&self) -> Var {
        let mut level_map = self.level_map.borrow_mut();
        let var = Var::new(level_map.len() as u32);

        let level = Level::new(self.var_order.borrow().len() as u32);
        self.var_order.borrow_mut().push(var);
        level_map.push(level);
        self.subtables.borrow_mut().push(Subtable::new(var));

        var
    }

    /// Ensures an element exists, allocating every smaller one as well.
    pub fn ensure_var(&self, var: Var) -> Var {
        while (self.level_map.borrow().len() as u32) <= var.id() {
            self.new_var();
        }
        var
    }

    /// Number of allocated elements: the size of the current universe.
    pub fn num_vars(&self) -> usize {
        self.var_order.borrow().len()
    }

    pub fn level(&self, var: Var) -> Level {
        self.level_map.borrow()[var.id() as usize]
    }

    pub fn var_at_level(&self, level: Level) -> Var {
        self.var_order.borrow()[level.index()]
    }

    /// Level of the root of `f`; terminals sit at level `num_vars()`.
    pub fn top_level(&self, f: ZddId) -> Level {
        if f.is_terminal() {
            Level::from(self.num_vars())
        } else {
            self.level(self.node(f).var)
        }
    }

    // ========================================================================
    // Node Construction
    // ========================================================================

    /// Creates or retrieves a ZDD node with the given element and children.
    ///
    /// Enforces the zero-suppression rule: if `hi = ⊥`, returns `lo` instead
    /// of creating a node.
    pub fn get_node(&self, var: Var, lo: ZddId, hi: ZddId) -> ZddId {
        if hi.is_zero() {
            return lo;
        }

        let level = self.level(var);
        debug_assert!(lo.is_terminal() || self.level(self.node(lo).var) > level);
        debug_assert!(hi.is_terminal() || self.level(self.node(hi).var) > level);

        {
            let subtables = self.subtables.borrow();
            let nodes = self.nodes.borrow();
            if let Some(id) = subtables[level.index()].find(lo, hi, &nodes) {
                return ZddId::from_node(id);
            }
        }

        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId::new(nodes.len() as u32);
        nodes.push(ZddNode::new(var, lo, hi));
        self.subtables.borrow_mut()[level.index()].insert(lo, hi, id, &mut nodes);

        ZddId::from_node(id)
    }

    /// Access node data.
    pub fn node(&self, id: ZddId) -> ZddNode {
        self.nodes.borrow()[id.index()]
    }

    pub fn lo(&self, id: ZddId) -> ZddId {
        self.node(id).lo
    }

    pub fn hi(&self, id: ZddId) -> ZddId {
        self.node(id).hi
    }

    // ========================================================================
    // Primitive Constructors
    // ========================================================================

    /// Creates a base set: `{{var}}`.
    pub fn base(&self, var: impl Into<Var>) -> ZddId {
        let var = var.into();
        self.ensure_var(var);
        self.get_node(var, ZddId::ZERO, ZddId::ONE)
    }

    /// Creates a singleton family: `{{v1, v2, ..., vn}}`.
    pub fn singleton(&self, vars: impl IntoIterator<Item = impl Into<Var>>) -> ZddId {
        let mut vars: Vec<Var> = vars.into_iter().map(|v| v.into()).collect();
        if vars.is_empty() {
            return ZddId::ONE;
        }

        for &var in &vars {
            self.ensure_var(var);
        }

        // Bottom-up: deepest level first
        vars.sort_unstable_by_key(|&var| Reverse(self.level(var)));
        vars.dedup();

        let mut result = ZddId::ONE;
        for var in vars {
            result = self.get_node(var, ZddId::ZERO, result);
        }
        result
    }

    /// Creates a family from explicit member sets.
    pub fn from_sets<I, S, V>(&self, sets: I) -> ZddId
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = V>,
        V: Into<Var>,
    {
        sets.into_iter()
            .fold(ZddId::ZERO, |acc, set| self.union(acc, self.singleton(set)))
    }

    /// Creates the power set of given elements: `2^{vars}`.
    pub fn powerset(&self, vars: impl IntoIterator<Item = impl Into<Var>>) -> ZddId {
        let mut vars: Vec<Var> = vars.into_iter().map(|v| v.into()).collect();
        if vars.is_empty() {
            return ZddId::ONE;
        }

        for &var in &vars {
            self.ensure_var(var);
        }

        vars.sort_unstable_by_key(|&var| Reverse(self.level(var)));
        vars.dedup();

        let mut result = ZddId::ONE;
        for var in vars {
            result = self.get_node(var, result, result);
        }
        result
    }

    /// The power set of the whole current universe.
    pub fn universe(&self) -> ZddId {
        let vars: Vec<Var> = self.var_order.borrow().clone();
        self.powerset(vars)
    }

    /// Creates all k-element subsets of given elements: `C(n, k)`.
    pub fn combinations(&self, vars: impl IntoIterator<Item = impl Into<Var>>, k: usize) -> ZddId {
        let mut vars: Vec<Var> = vars.into_iter().map(|v| v.into()).collect();

        if k == 0 {
            return ZddId::ONE;
        }
        if k > vars.len() {
            return ZddId::ZERO;
        }

        for &var in &vars {
            self.ensure_var(var);
        }
        vars.sort_unstable_by_key(|&var| self.level(var));

        self.combinations_rec(&vars, 0, k)
    }

    fn combinations_rec(&self, vars: &[Var], start: usize, k: usize) -> ZddId {
        if k == 0 {
            return ZddId::ONE;
        }
        if start + k > vars.len() {
            return ZddId::ZERO;
        }
        if start + k == vars.len() {
            return self.singleton(vars[start..].iter().copied());
        }

        let with_var = self.combinations_rec(vars, start + 1, k - 1);
        let without_var = self.combinations_rec(vars, start + 1, k);

        self.get_node(vars[start], without_var, with_var)
    }

    // ========================================================================
    // Set-Theoretic Operations
    // ========================================================================

    /// Union: `F ∪ G`, sets in either family.
    pub fn union(&self, f: ZddId, g: ZddId) -> ZddId {
        if f.is_zero() {
            return g;
        }
        if g.is_zero() || f == g {
            return f;
        }

        let key = CacheKey::commutative(OpType::Union, f, g);
        if let Some(result) = self.cache.borrow().get(&key) {
            return result;
        }

        let result = if f.is_one() {
            let g_node = self.node(g);
            let lo = self.union(ZddId::ONE, g_node.lo);
            self.get_node(g_node.var, lo, g_node.hi)
        } else if g.is_one() {
            let f_node = self.node(f);
            let lo = self.union(f_node.lo, ZddId::ONE);
            self.get_node(f_node.var, lo, f_node.hi)
        } else {
            let f_node = self.node(f);
            let g_node = self.node(g);

            match self.level(f_node.var).cmp(&self.level(g_node.var)) {
                Ordering::Less => {
                    let lo = self.union(f_node.lo, g);
                    self.get_node(f_node.var, lo, f_node.hi)
                }
                Ordering::Greater => {
                    let lo = self.union(f, g_node.lo);
                    self.get_node(g_node.var, lo, g_node.hi)
                }
                Ordering::Equal => {
                    let lo = self.union(f_node.lo, g_node.lo);
                    let hi = self.union(f_node.hi, g_node.hi);
                    self.get_node(f_node.var, lo, hi)
                }
            }
        };

        self.cache.borrow_mut().insert(key, result);
        result
    }

    /// Intersection: `F ∩ G`, sets in both families.
    pub fn intersection(&self, f: ZddId, g: ZddId) -> ZddId {
        if f.is_zero() || g.is_zero() {
            return ZddId::ZERO;
        }
        if f == g {
            return f;
        }
        if f.is_one() {
            return ZddId::terminal(self.contains_empty(g));
        }
        if g.is_one() {
            return ZddId::terminal(self.contains_empty(f));
        }

        let key = CacheKey::commutative(OpType::Intersection, f, g);
        if let Some(result) = self.cache.borrow().get(&key) {
            return result;
        }

        let f_node = self.node(f);
        let g_node = self.node(g);
        let result = match self.level(f_node.var).cmp(&self.level(g_node.var)) {
            Ordering::Less => self.intersection(f_node.lo, g),
            Ordering::Greater => self.intersection(f, g_node.lo),
            Ordering::Equal => {
                let lo = self.intersection(f_node.lo, g_node.lo);
                let hi = self.intersection(f_node.hi, g_node.hi);
                self.get_node(f_node.var, lo, hi)
            }
        };

        self.cache.borrow_mut().insert(key, result);
        result
    }

    /// Difference: `F \ G`, sets in F but not in G.
    pub fn difference(&self, f: ZddId, g: ZddId) -> ZddId {
        if f.is_zero() || f == g {
            return ZddId::ZERO;
        }
        if g.is_zero() {
            return f;
        }
        if f.is_one() {
            return ZddId::terminal(!self.contains_empty(g));
        }

        let key = CacheKey::non_commutative(OpType::Difference, f, g);
        if let Some(result) = self.cache.borrow().get(&key) {
            return result;
        }

        let f_node = self.node(f);
        let result = if g.is_one() {
            // Remove ∅ from f
            let lo = self.difference(f_node.lo, ZddId::ONE);
            self.get_node(f_node.var, lo, f_node.hi)
        } else {
            let g_node = self.node(g);
            match self.level(f_node.var).cmp(&self.level(g_node.var)) {
                Ordering::Less => {
                    let lo = self.difference(f_node.lo, g);
                    self.get_node(f_node.var, lo, f_node.hi)
                }
                Ordering::Greater => self.difference(f, g_node.lo),
                Ordering::Equal => {
                    let lo = self.difference(f_node.lo, g_node.lo);
                    let hi = self.difference(f_node.hi, g_node.hi);
                    self.get_node(f_node.var, lo, hi)
                }
            }
        };

        self.cache.borrow_mut().insert(key, result);
        result
    }

    /// Symmetric difference: `F △ G`, sets in exactly one of F or G.
    pub fn symmetric_difference(&self, f: ZddId, g: ZddId) -> ZddId {
        let union = self.union(f, g);
        let inter = self.intersection(f, g);
        self.difference(union, inter)
    }

    // ========================================================================
    // Element Operations
    // ========================================================================

    /// Subset0: sets NOT containing `var`.
    pub fn subset0(&self, f: ZddId, var: Var) -> ZddId {
        if f.is_terminal() {
            return f;
        }

        let cache_key = (f, var.id());
        if let Some(&result) = self.subset0_cache.borrow().get(&cache_key) {
            return result;
        }

        let f_node = self.node(f);
        let result = match self.level(f_node.var).cmp(&self.level(var)) {
            Ordering::Less => {
                let lo = self.subset0(f_node.lo, var);
                let hi = self.subset0(f_node.hi, var);
                self.get_node(f_node.var, lo, hi)
            }
            Ordering::Equal => f_node.lo,
            Ordering::Greater => f,
        };

        self.subset0_cache.borrow_mut().insert(cache_key, result);
        result
    }

    /// Subset1: sets containing `var`, with `var` removed from each.
    pub fn subset1(&self, f: ZddId, var: Var) -> ZddId {
        if f.is_terminal() {
            return ZddId::ZERO;
        }

        let cache_key = (f, var.id());
        if let Some(&result) = self.subset1_cache.borrow().get(&cache_key) {
            return result;
        }

        let f_node = self.node(f);
        let result = match self.level(f_node.var).cmp(&self.level(var)) {
            Ordering::Less => {
                let lo = self.subset1(f_node.lo, var);
                let hi = self.subset1(f_node.hi, var);
                self.get_node(f_node.var, lo, hi)
            }
            Ordering::Equal => f_node.hi,
            Ordering::Greater => ZddId::ZERO,
        };

        self.subset1_cache.borrow_mut().insert(cache_key, result);
        result
    }

    /// Change: toggle `var` in every set.
    pub fn change(&self, f: ZddId, var: Var) -> ZddId {
        self.ensure_var(var);

        if f.is_zero() {
            return ZddId::ZERO;
        }
        if f.is_one() {
            return self.base(var);
        }

        let f_node = self.node(f);
        match self.level(f_node.var).cmp(&self.level(var)) {
            Ordering::Less => {
                let lo = self.change(f_node.lo, var);
                let hi = self.change(f_node.hi, var);
                self.get_node(f_node.var, lo, hi)
            }
            Ordering::Equal => self.get_node(f_node.var, f_node.hi, f_node.lo),
            Ordering::Greater => self.get_node(var, ZddId::ZERO, f),
        }
    }

    /// Onset: sets containing `var` (keeping `var`).
    pub fn onset(&self, f: ZddId, var: Var) -> ZddId {
        let s1 = self.subset1(f, var);
        self.get_node(var, ZddId::ZERO, s1)
    }

    /// Offset: sets NOT containing `var` (same as subset0).
    pub fn offset(&self, f: ZddId, var: Var) -> ZddId {
        self.subset0(f, var)
    }

    /// Join: `{S ∪ T | S ∈ F, T ∈ G}`.
    pub fn join(&self, f: ZddId, g: ZddId) -> ZddId {
        if f.is_zero() || g.is_zero() {
            return ZddId::ZERO;
        }
        if f.is_one() {
            return g;
        }
        if g.is_one() {
            return f;
        }

        let key = CacheKey::commutative(OpType::Join, f, g);
        if let Some(result) = self.cache.borrow().get(&key) {
            return result;
        }

        let f_node = self.node(f);
        let g_node = self.node(g);
        let result = match self.level(f_node.var).cmp(&self.level(g_node.var)) {
            Ordering::Less => {
                let lo = self.join(f_node.lo, g);
                let hi = self.join(f_node.hi, g);
                self.get_node(f_node.var, lo, hi)
            }
            Ordering::Greater => {
                let lo = self.join(f, g_node.lo);
                let hi = self.join(f, g_node.hi);
                self.get_node(g_node.var, lo, hi)
            }
            Ordering::Equal => {
                let lo_lo = self.join(f_node.lo, g_node.lo);
                let hi_lo = self.join(f_node.hi, g_node.lo);
                let lo_hi = self.join(f_node.lo, g_node.hi);
                let hi_hi = self.join(f_node.hi, g_node.hi);

                let hi = self.union(hi_lo, self.union(lo_hi, hi_hi));
                self.get_node(f_node.var, lo_lo, hi)
            }
        };

        self.cache.borrow_mut().insert(key, result);
        result
    }

    /// Meet: `{S ∩ T | S ∈ F, T ∈ G}`.
    pub fn meet(&self, f: ZddId, g: ZddId) -> ZddId {
        if f.is_zero() || g.is_zero() {
            return ZddId::ZERO;
        }
        if f.is_one() || g.is_one() {
            return ZddId::ONE;
        }

        let key = CacheKey::commutative(OpType::Meet, f, g);
        if let Some(result) = self.cache.borrow().get(&key) {
            return result;
        }

        let f_node = self.node(f);
        let g_node = self.node(g);
        let result = match self.level(f_node.var).cmp(&self.level(g_node.var)) {
            Ordering::Less => {
                let all = self.union(f_node.lo, f_node.hi);
                self.meet(all, g)
            }
            Ordering::Greater => {
                let all = self.union(g_node.lo, g_node.hi);
                self.meet(f, all)
            }
            Ordering::Equal => {
                // var survives only when both sides contain it
                let hi = self.meet(f_node.hi, g_node.hi);
                let lo_lo = self.meet(f_node.lo, g_node.lo);
                let lo_hi = self.meet(f_node.lo, g_node.hi);
                let hi_lo = self.meet(f_node.hi, g_node.lo);
                let lo = self.union(lo_lo, self.union(lo_hi, hi_lo));
                self.get_node(f_node.var, lo, hi)
            }
        };

        self.cache.borrow_mut().insert(key, result);
        result
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns true if the family contains the empty set.
    pub fn contains_empty(&self, f: ZddId) -> bool {
        let mut current = f;
        while !current.is_terminal() {
            current = self.node(current).lo;
        }
        current.is_one()
    }

    /// Membership test: does the family contain exactly this set?
    pub fn contains(&self, f: ZddId, set: &[Var]) -> bool {
        {
            let level_map = self.level_map.borrow();
            if set.iter().any(|var| var.id() as usize >= level_map.len()) {
                return false;
            }
        }

        let mut sorted_set: Vec<Var> = set.to_vec();
        sorted_set.sort_unstable_by_key(|&var| self.level(var));
        sorted_set.dedup();

        let mut current = f;
        for var in sorted_set {
            loop {
                if current.is_terminal() {
                    return false;
                }
                let node = self.node(current);
                match self.level(node.var).cmp(&self.level(var)) {
                    Ordering::Less => current = node.lo,
                    Ordering::Equal => {
                        current = node.hi;
                        break;
                    }
                    Ordering::Greater => return false,
                }
            }
        }
        self.contains_empty(current)
    }

    // ========================================================================
    // Counting
    // ========================================================================

    /// Counts the number of sets in the family (Knuth's Algorithm C).
    pub fn count(&self, f: ZddId) -> BigUint {
        if f.is_zero() {
            return BigUint::from(0u32);
        }
        if f.is_one() {
            return BigUint::from(1u32);
        }

        if let Some(cached) = self.count_cache.borrow().get(f) {
            return cached.clone();
        }

        let f_node = self.node(f);
        let count = self.count(f_node.lo) + self.count(f_node.hi);

        self.count_cache.borrow_mut().insert(f, count.clone());
        count
    }

    /// Returns the number of decision nodes reachable from `f`.
    pub fn node_count(&self, f: ZddId) -> usize {
        self.descendants([f]).len()
    }

    /// All decision nodes reachable from the given roots, in no particular order.
    pub fn descendants(&self, roots: impl IntoIterator<Item = ZddId>) -> HashSet<ZddId> {
        let mut visited = HashSet::new();
        let mut stack: Vec<ZddId> = roots.into_iter().collect();
        while let Some(f) = stack.pop() {
            if f.is_terminal() || !visited.insert(f) {
                continue;
            }
            let node = self.node(f);
            stack.push(node.lo);
            stack.push(node.hi);
        }
        visited
    }

    /// Decision nodes reachable from `f`, deepest level first.
    pub(crate) fn nodes_bottom_up(&self, f: ZddId) -> Vec<ZddId> {
        let mut nodes: Vec<ZddId> = self.descendants([f]).into_iter().collect();
        nodes.sort_unstable_by_key(|&id| (Reverse(self.level(self.node(id).var)), id));
        nodes
    }

    /// Total number of nodes in the manager, terminals included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.borrow().len()
    }

    // ========================================================================
    // Cache Management
    // ========================================================================

    pub fn clear_caches(&self) {
        self.cache.borrow_mut().clear();
        self.count_cache.borrow_mut().clear();
        self.subset1_cache.borrow_mut().clear();
        self.subset0_cache.borrow_mut().clear();
        self.choose_cache.borrow_mut().clear();
    }
}
