//! Frontier-based specs for subgraph families.
//!
//! Every spec here decides the edges of a [`Graph`](crate::graph::Graph) in
//! the order fixed by a [`FrontierManager`] and keeps one state cell per
//! frontier slot. Connectivity is tracked with component labels: each entering
//! vertex starts as its own component, and joining two components overwrites
//! the smaller label with the larger one across the frontier. Labels are never
//! compressed, so a cell stays a plain value that hashes and compares as is.
//!
//! | Spec | Family |
//! |---|---|
//! | [`SingleCycle`] | edge sets forming exactly one cycle (optionally Hamiltonian) |
//! | [`SinglePath`] | simple paths between two fixed vertices |
//! | [`DirectedCycle`] | arc sets forming exactly one directed cycle |
//! | [`SpanningTree`] | spanning trees of the touched vertices |
//! | [`Forest`] | acyclic edge sets, or spanning forests with one root per tree |
//! | [`DegreeConstraint`] | edge sets with per-vertex degree ranges |
//! | [`DegreeDistribution`] | edge sets with a prescribed count of vertices per degree |
//! | [`RegularSubgraph`] | edge sets whose non-isolated vertices share one degree |

use crate::frontier::FrontierManager;

mod cycle;
mod degree;
mod directed;
mod forest;

pub use cycle::{SingleCycle, SinglePath, VertexCell};
pub use degree::{DegreeConstraint, DegreeDistribution, RegularSubgraph};
pub use directed::{ArcCell, DirectedCycle};
pub use forest::{Forest, ForestCell, SpanningTree};

/// Label marking a vacant cell.
const NO_COMPONENT: u16 = u16::MAX;

/// A state cell carrying a component label.
trait ComponentCell: Copy {
    fn component(&self) -> u16;
    fn set_component(&mut self, comp: u16);

    fn is_vacant(&self) -> bool {
        self.component() == NO_COMPONENT
    }
}

/// Joins the components of `u` and `v`.
///
/// Returns `false` if they already were the same component.
fn union_components<C: ComponentCell>(
    fm: &FrontierManager,
    state: &mut [C],
    position: usize,
    u: usize,
    v: usize,
) -> bool {
    let cu = state[fm.slot_of(u)].component();
    let cv = state[fm.slot_of(v)].component();
    if cu == cv {
        return false;
    }

    let (from, to) = (cu.min(cv), cu.max(cv));
    for &w in fm.frontier_vertices(position) {
        let cell = &mut state[fm.slot_of(w)];
        if cell.component() == from {
            cell.set_component(to);
        }
    }
    true
}

/// Live cells of the frontier at `position`, except the one of `vertex`.
fn other_cells<'s, C: ComponentCell>(
    fm: &'s FrontierManager,
    state: &'s [C],
    position: usize,
    vertex: usize,
) -> impl Iterator<Item = C> + 's {
    fm.frontier_vertices(position)
        .iter()
        .filter(move |&&w| w != vertex)
        .map(move |&w| state[fm.slot_of(w)])
        .filter(|cell| !cell.is_vacant())
}

/// Whether another live vertex at `position` shares the component of `vertex`.
fn component_continues<C: ComponentCell>(
    fm: &FrontierManager,
    state: &[C],
    position: usize,
    vertex: usize,
) -> bool {
    let comp = state[fm.slot_of(vertex)].component();
    other_cells(fm, state, position, vertex).any(|cell| cell.component() == comp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn test_union_relabels_to_larger() {
        let fm = FrontierManager::new(&Graph::grid(2, 3)).unwrap();
        let mut state = vec![VertexCell::VACANT; fm.max_width()];
        for v in [1, 2, 3, 4] {
            state[fm.slot_of(v)] = VertexCell::fresh(v);
        }

        // Position 3 is edge (1, 4)
        assert!(union_components(&fm, &mut state, 3, 1, 4));
        assert_eq!(state[fm.slot_of(1)].comp, 4);
        assert!(!union_components(&fm, &mut state, 3, 4, 1));

        assert!(component_continues(&fm, &state, 3, 1));
        assert!(!component_continues(&fm, &state, 3, 2));
        assert_eq!(other_cells(&fm, &state, 3, 2).count(), 3);
    }
}
