//! Frontier scheduling for graph universes.
//!
//! While edges are decided one at a time in a fixed order, only the vertices
//! touched both before and after the current position can still influence
//! later decisions. [`FrontierManager`] precomputes that frontier for every
//! position and maps each active vertex to a small *slot*, so a spec can keep
//! per-vertex state in an array of [`max_width`](FrontierManager::max_width)
//! cells no matter how large the graph is.
//!
//! Slots are reused: a vertex frees its slot after its last edge, and the
//! smallest free slot is handed to the next entering vertex. The assignment
//! depends only on the edge order, so every spec built over the same manager
//! sees the same slots.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::debug;

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Largest supported vertex count: vertex indices must fit in a `u16` with
/// `u16::MAX` reserved as the vacant marker.
pub const MAX_VERTICES: usize = u16::MAX as usize - 1;

const UNTOUCHED: usize = usize::MAX;

#[derive(Debug, Clone)]
pub struct FrontierManager {
    num_vertices: usize,
    edges: Vec<(usize, usize)>,

    /// Vertices whose first edge is at each position.
    entering: Vec<Vec<usize>>,
    /// Vertices whose last edge is at each position.
    leaving: Vec<Vec<usize>>,
    /// Active vertices at each position, by slot.
    frontier: Vec<Vec<usize>>,

    /// Slot of each vertex, `UNTOUCHED` if no edge touches it.
    slots: Vec<usize>,
    first: Vec<usize>,
    last: Vec<usize>,

    /// Position of the last entering vertex.
    last_entry: Option<usize>,
    max_width: usize,
}

impl FrontierManager {
    /// Computes the frontier schedule of `graph` in its edge order.
    ///
    /// Fails with [`Error::TooManyVertices`] if the graph has more than
    /// [`MAX_VERTICES`] vertices.
    pub fn new(graph: &Graph) -> Result<Self> {
        let n = graph.num_vertices();
        if n > MAX_VERTICES {
            return Err(Error::TooManyVertices {
                count: n,
                max: MAX_VERTICES,
            });
        }

        let edges = graph.edges().to_vec();
        let m = edges.len();

        let mut first = vec![UNTOUCHED; n];
        let mut last = vec![UNTOUCHED; n];
        let mut entering = vec![Vec::new(); m];
        let mut leaving = vec![Vec::new(); m];

        for (i, &(u, v)) in edges.iter().enumerate() {
            for w in endpoints(u, v) {
                if first[w] == UNTOUCHED {
                    first[w] = i;
                    entering[i].push(w);
                }
            }
        }
        for (i, &(u, v)) in edges.iter().enumerate().rev() {
            for w in endpoints(u, v) {
                if last[w] == UNTOUCHED {
                    last[w] = i;
                    leaving[i].push(w);
                }
            }
        }

        let mut slots = vec![UNTOUCHED; n];
        let mut free: BinaryHeap<Reverse<usize>> = BinaryHeap::new();
        let mut next_slot = 0;
        let mut live: Vec<usize> = Vec::new();
        let mut frontier = Vec::with_capacity(m);
        let mut max_width = 0;

        for i in 0..m {
            for &w in &entering[i] {
                let slot = match free.pop() {
                    Some(Reverse(slot)) => slot,
                    None => {
                        next_slot += 1;
                        next_slot - 1
                    }
                };
                slots[w] = slot;
                live.push(w);
            }
            max_width = max_width.max(live.len());

            let mut active = live.clone();
            active.sort_unstable_by_key(|&w| slots[w]);
            frontier.push(active);

            for &w in &leaving[i] {
                free.push(Reverse(slots[w]));
                live.retain(|&x| x != w);
            }
        }

        let last_entry = (0..m).rev().find(|&i| !entering[i].is_empty());
        debug!(
            "Frontier schedule: {} vertices, {} edges, max width {}",
            n, m, max_width
        );

        Ok(Self {
            num_vertices: n,
            edges,
            entering,
            leaving,
            frontier,
            slots,
            first,
            last,
            last_entry,
            max_width,
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of decision positions (edges).
    pub fn num_positions(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, position: usize) -> (usize, usize) {
        self.edges[position]
    }

    /// Largest number of simultaneously active vertices; also the number of slots.
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    pub fn entering_vertices(&self, position: usize) -> &[usize] {
        &self.entering[position]
    }

    pub fn leaving_vertices(&self, position: usize) -> &[usize] {
        &self.leaving[position]
    }

    /// Vertices active at `position`, after entries and before exits.
    pub fn frontier_vertices(&self, position: usize) -> &[usize] {
        &self.frontier[position]
    }

    /// Slot of `vertex` while it is active.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if no edge touches `vertex`.
    pub fn slot_of(&self, vertex: usize) -> usize {
        debug_assert_ne!(self.slots[vertex], UNTOUCHED, "vertex {} is never active", vertex);
        self.slots[vertex]
    }

    /// Whether some edge touches `vertex`.
    pub fn is_touched(&self, vertex: usize) -> bool {
        self.slots[vertex] != UNTOUCHED
    }

    /// Number of vertices touched by no edge.
    pub fn num_untouched(&self) -> usize {
        self.slots.iter().filter(|&&s| s == UNTOUCHED).count()
    }

    /// Position of the first edge touching `vertex`.
    pub fn first_position(&self, vertex: usize) -> Option<usize> {
        Some(self.first[vertex]).filter(|&p| p != UNTOUCHED)
    }

    /// Position of the last edge touching `vertex`.
    pub fn last_position(&self, vertex: usize) -> Option<usize> {
        Some(self.last[vertex]).filter(|&p| p != UNTOUCHED)
    }

    /// True if no vertex enters after `position`.
    pub fn all_entered_by(&self, position: usize) -> bool {
        self.last_entry.map_or(true, |p| p <= position)
    }
}

fn endpoints(u: usize, v: usize) -> impl Iterator<Item = usize> {
    std::iter::once(u).chain((u != v).then_some(v))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_log::test;

    use super::*;

    #[test]
    fn test_grid_schedule() {
        // 0 - 1 - 2
        // |   |   |
        // 3 - 4 - 5
        let fm = FrontierManager::new(&Graph::grid(2, 3)).unwrap();
        assert_eq!(fm.num_positions(), 7);
        assert_eq!(fm.max_width(), 4);

        assert_eq!(fm.entering_vertices(0), &[0, 1]);
        assert_eq!(fm.entering_vertices(1), &[3]);
        assert_eq!(fm.entering_vertices(2), &[2]);
        assert_eq!(fm.entering_vertices(3), &[4]);
        assert_eq!(fm.entering_vertices(4), &[5]);
        assert!(fm.entering_vertices(5).is_empty());

        assert_eq!(fm.leaving_vertices(1), &[0]);
        assert_eq!(fm.leaving_vertices(3), &[1]);
        assert_eq!(fm.leaving_vertices(4), &[2]);
        assert_eq!(fm.leaving_vertices(5), &[3]);
        assert_eq!(fm.leaving_vertices(6), &[4, 5]);

        let active: HashSet<usize> = fm.frontier_vertices(3).iter().copied().collect();
        assert_eq!(active, HashSet::from([1, 2, 3, 4]));

        assert!(!fm.all_entered_by(3));
        assert!(fm.all_entered_by(4));
    }

    #[test]
    fn test_every_vertex_enters_and_leaves_once() {
        let graph = Graph::grid(4, 5);
        let fm = FrontierManager::new(&graph).unwrap();

        let mut entered = vec![0; graph.num_vertices()];
        let mut left = vec![0; graph.num_vertices()];
        for i in 0..fm.num_positions() {
            for &v in fm.entering_vertices(i) {
                entered[v] += 1;
            }
            for &v in fm.leaving_vertices(i) {
                left[v] += 1;
            }
        }
        assert!(entered.iter().all(|&c| c == 1));
        assert!(left.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_slots_are_injective_on_frontier() {
        let graph = Graph::grid(5, 4);
        let fm = FrontierManager::new(&graph).unwrap();

        for i in 0..fm.num_positions() {
            let frontier = fm.frontier_vertices(i);
            let (u, v) = fm.edge(i);
            assert!(frontier.contains(&u) && frontier.contains(&v));

            let slots: HashSet<usize> = frontier.iter().map(|&w| fm.slot_of(w)).collect();
            assert_eq!(slots.len(), frontier.len());
            assert!(slots.iter().all(|&s| s < fm.max_width()));
        }
        assert_eq!(fm.max_width(), 5);
    }

    #[test]
    fn test_slot_reuse_is_deterministic() {
        let graph = Graph::grid(3, 3);
        let a = FrontierManager::new(&graph).unwrap();
        let b = FrontierManager::new(&graph).unwrap();
        for v in 0..graph.num_vertices() {
            assert_eq!(a.slot_of(v), b.slot_of(v));
        }
    }

    #[test]
    fn test_untouched_vertices() {
        let graph = Graph::new(4, vec![(0, 2)]).unwrap();
        let fm = FrontierManager::new(&graph).unwrap();
        assert!(fm.is_touched(0));
        assert!(!fm.is_touched(1));
        assert_eq!(fm.num_untouched(), 2);
        assert_eq!(fm.first_position(3), None);
        assert_eq!(fm.last_position(2), Some(0));
    }

    #[test]
    fn test_too_many_vertices() {
        let graph = Graph::new(MAX_VERTICES + 1, Vec::new()).unwrap();
        assert!(matches!(
            FrontierManager::new(&graph),
            Err(Error::TooManyVertices { max: MAX_VERTICES, .. })
        ));
    }

    #[test]
    fn test_empty_graph() {
        let fm = FrontierManager::new(&Graph::new(0, Vec::new()).unwrap()).unwrap();
        assert_eq!(fm.num_positions(), 0);
        assert_eq!(fm.max_width(), 0);
        assert!(fm.all_entered_by(0));
    }
}
