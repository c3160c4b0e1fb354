//! Per-level unique table for ZDD nodes with intrusive hashing.
//!
//! Collision chains are threaded through [`ZddNode::next`], so a subtable only
//! owns its bucket heads.

use crate::node::ZddNode;
use crate::reference::ZddId;
use crate::types::{NodeId, Var};

/// Default number of bucket bits (2^10 = 1024 buckets per level).
const DEFAULT_BUCKET_BITS: usize = 10;

/// Chains longer than this (on average) trigger a rehash into twice the buckets.
const MAX_LOAD: usize = 4;

/// A subtable storing the ZDD nodes of a single element.
#[derive(Debug, Clone)]
pub struct Subtable {
    /// The element decided by every node in this subtable.
    pub variable: Var,

    /// Head of each collision chain; `ZddNode::NO_NEXT` marks an empty bucket.
    /// Empty until the first insertion.
    buckets: Vec<NodeId>,

    bitmask: u64,

    /// Number of bucket bits allocated on the first insertion.
    initial_bits: usize,

    count: usize,
}

impl Subtable {
    pub fn new(variable: Var) -> Self {
        Self::with_bucket_bits(variable, DEFAULT_BUCKET_BITS)
    }

    /// Create a new subtable that starts with `2^bits` buckets.
    ///
    /// No buckets are allocated until the first node is inserted, so elements
    /// that never appear in a diagram cost no table space.
    pub fn with_bucket_bits(variable: Var, bits: usize) -> Self {
        Self {
            variable,
            buckets: Vec::new(),
            bitmask: 0,
            initial_bits: bits,
            count: 0,
        }
    }

    #[inline]
    fn bucket_index(&self, lo: ZddId, hi: ZddId) -> usize {
        (hash_children(lo, hi) & self.bitmask) as usize
    }

    /// Look up a node by its children.
    pub fn find(&self, lo: ZddId, hi: ZddId, nodes: &[ZddNode]) -> Option<NodeId> {
        if self.buckets.is_empty() {
            return None;
        }
        let mut current = self.buckets[self.bucket_index(lo, hi)];

        while current != ZddNode::NO_NEXT {
            let node = &nodes[current.index()];
            if node.lo == lo && node.hi == hi {
                return Some(current);
            }
            current = node.next;
        }

        None
    }

    /// Insert a node into the subtable.
    ///
    /// The caller guarantees that no node with the same children is present.
    pub fn insert(&mut self, lo: ZddId, hi: ZddId, id: NodeId, nodes: &mut [ZddNode]) {
        if self.buckets.is_empty() {
            self.allocate(1 << self.initial_bits);
        } else if self.count >= self.buckets.len() * MAX_LOAD {
            self.grow(nodes);
        }
        let bucket_idx = self.bucket_index(lo, hi);
        nodes[id.index()].next = self.buckets[bucket_idx];
        self.buckets[bucket_idx] = id;
        self.count += 1;
    }

    fn allocate(&mut self, num_buckets: usize) {
        self.buckets = vec![ZddNode::NO_NEXT; num_buckets];
        self.bitmask = (num_buckets - 1) as u64;
    }

    fn grow(&mut self, nodes: &mut [ZddNode]) {
        let old = std::mem::take(&mut self.buckets);
        self.allocate(old.len() * 2);

        for head in old {
            let mut current = head;
            while current != ZddNode::NO_NEXT {
                let node = nodes[current.index()];
                let next = node.next;
                let bucket_idx = self.bucket_index(node.lo, node.hi);
                nodes[current.index()].next = self.buckets[bucket_idx];
                self.buckets[bucket_idx] = current;
                current = next;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }
}

/// Hash function for (lo, hi) children.
#[inline]
fn hash_children(lo: ZddId, hi: ZddId) -> u64 {
    // FNV-1a inspired mixing
    let mut h = 14695981039346656037u64;
    h ^= lo.raw() as u64;
    h = h.wrapping_mul(1099511628211);
    h ^= hi.raw() as u64;
    h = h.wrapping_mul(1099511628211);
    h ^ (h >> 29)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtable_basic() {
        let mut nodes = vec![ZddNode::default(); 10];
        let mut subtable = Subtable::new(Var::new(1));

        let lo = ZddId::ZERO;
        let hi = ZddId::ONE;
        nodes[2] = ZddNode::new(Var::new(1), lo, hi);

        subtable.insert(lo, hi, NodeId::new(2), &mut nodes);
        assert_eq!(subtable.len(), 1);

        assert_eq!(subtable.find(lo, hi, &nodes), Some(NodeId::new(2)));
        assert_eq!(subtable.find(ZddId::ONE, ZddId::ONE, &nodes), None);
    }

    #[test]
    fn test_subtable_allocates_on_first_insert() {
        let mut nodes = vec![ZddNode::default(); 3];
        let mut subtable = Subtable::new(Var::new(1));
        assert_eq!(subtable.num_buckets(), 0);
        assert_eq!(subtable.find(ZddId::ZERO, ZddId::ONE, &nodes), None);

        nodes[2] = ZddNode::new(Var::new(1), ZddId::ZERO, ZddId::ONE);
        subtable.insert(ZddId::ZERO, ZddId::ONE, NodeId::new(2), &mut nodes);
        assert_eq!(subtable.num_buckets(), 1 << DEFAULT_BUCKET_BITS);
        assert_eq!(subtable.find(ZddId::ZERO, ZddId::ONE, &nodes), Some(NodeId::new(2)));
    }

    #[test]
    fn test_subtable_grows() {
        let mut subtable = Subtable::with_bucket_bits(Var::new(1), 1);
        let mut nodes = vec![ZddNode::default(); 2];
        for i in 0..64u32 {
            let lo = ZddId::new(i);
            let hi = ZddId::ONE;
            let id = NodeId::new(nodes.len() as u32);
            nodes.push(ZddNode::new(Var::new(1), lo, hi));
            subtable.insert(lo, hi, id, &mut nodes);
        }
        assert!(subtable.num_buckets() > 2);
        for i in 0..64u32 {
            let found = subtable.find(ZddId::new(i), ZddId::ONE, &nodes).unwrap();
            assert_eq!(nodes[found.index()].lo, ZddId::new(i));
        }
    }
}
