use crate::error::{Error, Result};
use crate::frontier::FrontierManager;
use crate::spec::{DdSpec, Step};

use super::{component_continues, other_cells, union_components, ComponentCell, NO_COMPONENT};

/// Degree and component label of one frontier vertex.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VertexCell {
    pub degree: i8,
    pub comp: u16,
}

impl VertexCell {
    pub const VACANT: VertexCell = VertexCell {
        degree: -1,
        comp: NO_COMPONENT,
    };

    /// Cell of a vertex that has just entered the frontier.
    pub fn fresh(vertex: usize) -> Self {
        VertexCell {
            degree: 0,
            comp: vertex as u16,
        }
    }
}

impl Default for VertexCell {
    fn default() -> Self {
        Self::VACANT
    }
}

impl ComponentCell for VertexCell {
    fn component(&self) -> u16 {
        self.comp
    }

    fn set_component(&mut self, comp: u16) {
        self.comp = comp;
    }
}

fn enter(fm: &FrontierManager, state: &mut [VertexCell], position: usize) {
    for &w in fm.entering_vertices(position) {
        state[fm.slot_of(w)] = VertexCell::fresh(w);
    }
}

/// Includes the edge at `position`.
///
/// Returns `None` if an endpoint exceeds `max_degree`, otherwise whether the
/// edge joined two different components.
fn add_edge(
    fm: &FrontierManager,
    state: &mut [VertexCell],
    position: usize,
    max_degree: impl Fn(usize) -> i8,
) -> Option<bool> {
    let (u, v) = fm.edge(position);
    for w in [u, v] {
        let cell = &mut state[fm.slot_of(w)];
        cell.degree += 1;
        if cell.degree > max_degree(w) {
            return None;
        }
    }
    Some(union_components(fm, state, position, u, v))
}

/// Edge sets forming exactly one simple cycle.
///
/// Each frontier vertex carries its degree (0, 1 or 2) and a component label.
/// A leaving vertex must have degree 0 or 2. When the last frontier vertex of a
/// component leaves, the cycle is closed: it is accepted if no other vertex has
/// any edge yet, and rejected otherwise, since two components can never merge
/// into one cycle.
///
/// In Hamiltonian mode every touched vertex must have degree 2, and the cycle
/// may only close once every vertex has entered.
#[derive(Debug, Clone)]
pub struct SingleCycle<'a> {
    fm: &'a FrontierManager,
    hamiltonian: bool,
}

impl<'a> SingleCycle<'a> {
    pub fn new(fm: &'a FrontierManager) -> Self {
        Self { fm, hamiltonian: false }
    }

    /// Cycles through every vertex touched by some edge.
    pub fn hamiltonian(fm: &'a FrontierManager) -> Self {
        Self { fm, hamiltonian: true }
    }
}

impl DdSpec for SingleCycle<'_> {
    type Cell = VertexCell;

    fn state_len(&self) -> usize {
        self.fm.max_width()
    }

    fn num_positions(&self) -> usize {
        self.fm.num_positions()
    }

    fn root(&self, _state: &mut [VertexCell]) -> Step {
        if self.num_positions() == 0 {
            Step::Reject
        } else {
            Step::Next(0)
        }
    }

    fn child(&self, state: &mut [VertexCell], position: usize, take: bool) -> Step {
        let fm = self.fm;
        enter(fm, state, position);
        if take && add_edge(fm, state, position, |_| 2).is_none() {
            return Step::Reject;
        }

        for &w in fm.leaving_vertices(position) {
            let cell = state[fm.slot_of(w)];
            match cell.degree {
                0 if self.hamiltonian => return Step::Reject,
                0 | 2 => {}
                _ => return Step::Reject,
            }

            if cell.degree == 2 && !component_continues(fm, state, position, w) {
                let mut others = other_cells(fm, state, position, w);
                let closed = if self.hamiltonian {
                    others.next().is_none() && fm.all_entered_by(position)
                } else {
                    others.all(|other| other.degree == 0)
                };
                return if closed { Step::Accept } else { Step::Reject };
            }

            state[fm.slot_of(w)] = VertexCell::VACANT;
        }

        Step::advance(position, self.num_positions())
    }
}

/// Edge sets forming one simple path between two fixed vertices.
///
/// The endpoints must end with degree 1 and every other vertex with degree 0
/// or 2. Including an edge inside a component would close a cycle and is
/// rejected. When the component of the path leaves the frontier, the path is
/// accepted if no other vertex has an edge.
#[derive(Debug, Clone)]
pub struct SinglePath<'a> {
    fm: &'a FrontierManager,
    s: usize,
    t: usize,
}

impl<'a> SinglePath<'a> {
    pub fn new(fm: &'a FrontierManager, s: usize, t: usize) -> Result<Self> {
        for vertex in [s, t] {
            if vertex >= fm.num_vertices() {
                return Err(Error::VertexOutOfRange {
                    vertex,
                    num_vertices: fm.num_vertices(),
                });
            }
        }
        if s == t {
            return Err(Error::SameTerminals { vertex: s });
        }
        Ok(Self { fm, s, t })
    }

    fn is_terminal(&self, vertex: usize) -> bool {
        vertex == self.s || vertex == self.t
    }
}

impl DdSpec for SinglePath<'_> {
    type Cell = VertexCell;

    fn state_len(&self) -> usize {
        self.fm.max_width()
    }

    fn num_positions(&self) -> usize {
        self.fm.num_positions()
    }

    fn root(&self, _state: &mut [VertexCell]) -> Step {
        if self.num_positions() == 0 {
            Step::Reject
        } else {
            Step::Next(0)
        }
    }

    fn child(&self, state: &mut [VertexCell], position: usize, take: bool) -> Step {
        let fm = self.fm;
        enter(fm, state, position);
        if take {
            let max_degree = |w: usize| if self.is_terminal(w) { 1 } else { 2 };
            // An edge inside one component would close a cycle
            if add_edge(fm, state, position, max_degree) != Some(true) {
                return Step::Reject;
            }
        }

        for &w in fm.leaving_vertices(position) {
            let cell = state[fm.slot_of(w)];
            let valid = if self.is_terminal(w) {
                cell.degree == 1
            } else {
                cell.degree == 0 || cell.degree == 2
            };
            if !valid {
                return Step::Reject;
            }

            if cell.degree > 0 && !component_continues(fm, state, position, w) {
                let closed = other_cells(fm, state, position, w).all(|other| other.degree == 0);
                return if closed { Step::Accept } else { Step::Reject };
            }

            state[fm.slot_of(w)] = VertexCell::VACANT;
        }

        Step::advance(position, self.num_positions())
    }
}
