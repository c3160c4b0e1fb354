use crate::frontier::FrontierManager;
use crate::spec::{DdSpec, Step};

use super::{component_continues, other_cells, union_components, ComponentCell, NO_COMPONENT};

/// In-degree, out-degree and component label of one frontier vertex.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ArcCell {
    pub indeg: i8,
    pub outdeg: i8,
    pub comp: u16,
}

impl ArcCell {
    pub const VACANT: ArcCell = ArcCell {
        indeg: -1,
        outdeg: -1,
        comp: NO_COMPONENT,
    };

    pub fn fresh(vertex: usize) -> Self {
        ArcCell {
            indeg: 0,
            outdeg: 0,
            comp: vertex as u16,
        }
    }

    fn is_isolated(&self) -> bool {
        self.indeg == 0 && self.outdeg == 0
    }
}

impl Default for ArcCell {
    fn default() -> Self {
        Self::VACANT
    }
}

impl ComponentCell for ArcCell {
    fn component(&self) -> u16 {
        self.comp
    }

    fn set_component(&mut self, comp: u16) {
        self.comp = comp;
    }
}

/// Arc sets forming exactly one directed cycle.
///
/// Edge `(u, v)` of the graph is read as the arc `u → v`; list both
/// orientations to allow either. Every vertex ends with in- and out-degree
/// both 0 or both 1, and the closing rule is the one of
/// [`SingleCycle`](super::SingleCycle).
#[derive(Debug, Clone)]
pub struct DirectedCycle<'a> {
    fm: &'a FrontierManager,
    hamiltonian: bool,
}

impl<'a> DirectedCycle<'a> {
    pub fn new(fm: &'a FrontierManager) -> Self {
        Self { fm, hamiltonian: false }
    }

    /// Directed cycles through every vertex touched by some arc.
    pub fn hamiltonian(fm: &'a FrontierManager) -> Self {
        Self { fm, hamiltonian: true }
    }
}

impl DdSpec for DirectedCycle<'_> {
    type Cell = ArcCell;

    fn state_len(&self) -> usize {
        self.fm.max_width()
    }

    fn num_positions(&self) -> usize {
        self.fm.num_positions()
    }

    fn root(&self, _state: &mut [ArcCell]) -> Step {
        if self.num_positions() == 0 {
            Step::Reject
        } else {
            Step::Next(0)
        }
    }

    fn child(&self, state: &mut [ArcCell], position: usize, take: bool) -> Step {
        let fm = self.fm;
        for &w in fm.entering_vertices(position) {
            state[fm.slot_of(w)] = ArcCell::fresh(w);
        }

        if take {
            let (u, v) = fm.edge(position);
            let tail = &mut state[fm.slot_of(u)];
            tail.outdeg += 1;
            if tail.outdeg > 1 {
                return Step::Reject;
            }
            let head = &mut state[fm.slot_of(v)];
            head.indeg += 1;
            if head.indeg > 1 {
                return Step::Reject;
            }
            union_components(fm, state, position, u, v);
        }

        for &w in fm.leaving_vertices(position) {
            let cell = state[fm.slot_of(w)];
            match (cell.indeg, cell.outdeg) {
                (0, 0) if self.hamiltonian => return Step::Reject,
                (0, 0) | (1, 1) => {}
                _ => return Step::Reject,
            }

            if !cell.is_isolated() && !component_continues(fm, state, position, w) {
                let mut others = other_cells(fm, state, position, w);
                let closed = if self.hamiltonian {
                    others.next().is_none() && fm.all_entered_by(position)
                } else {
                    others.all(|other| other.is_isolated())
                };
                return if closed { Step::Accept } else { Step::Reject };
            }

            state[fm.slot_of(w)] = ArcCell::VACANT;
        }

        Step::advance(position, self.num_positions())
    }
}
