use crate::error::{Error, Result};
use crate::frontier::FrontierManager;
use crate::spec::{DdSpec, Step};

use super::{component_continues, other_cells, union_components, ComponentCell, NO_COMPONENT};

/// Component label of one frontier vertex, and whether its component holds a root.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ForestCell {
    pub comp: u16,
    pub rooted: bool,
}

impl ForestCell {
    pub const VACANT: ForestCell = ForestCell {
        comp: NO_COMPONENT,
        rooted: false,
    };
}

impl Default for ForestCell {
    fn default() -> Self {
        Self::VACANT
    }
}

impl ComponentCell for ForestCell {
    fn component(&self) -> u16 {
        self.comp
    }

    fn set_component(&mut self, comp: u16) {
        self.comp = comp;
    }
}

fn enter(
    fm: &FrontierManager,
    state: &mut [ForestCell],
    position: usize,
    is_root: impl Fn(usize) -> bool,
) {
    for &w in fm.entering_vertices(position) {
        state[fm.slot_of(w)] = ForestCell {
            comp: w as u16,
            rooted: is_root(w),
        };
    }
}

/// Spanning trees of the vertices touched by some edge.
///
/// An edge inside one component is rejected. When a component leaves the
/// frontier it must be the only one left and every vertex must have entered,
/// otherwise the touched vertices can no longer end up connected.
#[derive(Debug, Clone)]
pub struct SpanningTree<'a> {
    fm: &'a FrontierManager,
}

impl<'a> SpanningTree<'a> {
    pub fn new(fm: &'a FrontierManager) -> Self {
        Self { fm }
    }
}

impl DdSpec for SpanningTree<'_> {
    type Cell = ForestCell;

    fn state_len(&self) -> usize {
        self.fm.max_width()
    }

    fn num_positions(&self) -> usize {
        self.fm.num_positions()
    }

    fn root(&self, _state: &mut [ForestCell]) -> Step {
        if self.num_positions() == 0 {
            Step::Accept
        } else {
            Step::Next(0)
        }
    }

    fn child(&self, state: &mut [ForestCell], position: usize, take: bool) -> Step {
        let fm = self.fm;
        enter(fm, state, position, |_| false);
        if take {
            let (u, v) = fm.edge(position);
            if !union_components(fm, state, position, u, v) {
                return Step::Reject;
            }
        }

        for &w in fm.leaving_vertices(position) {
            if !component_continues(fm, state, position, w) {
                let alone = other_cells(fm, state, position, w).next().is_none();
                return if alone && fm.all_entered_by(position) {
                    Step::Accept
                } else {
                    Step::Reject
                };
            }
            state[fm.slot_of(w)] = ForestCell::VACANT;
        }

        Step::advance(position, self.num_positions())
    }
}

/// Acyclic edge sets.
///
/// Built with [`Forest::rooted`], only spanning forests of the touched
/// vertices in which every tree holds exactly one root are kept.
#[derive(Debug, Clone)]
pub struct Forest<'a> {
    fm: &'a FrontierManager,
    roots: Option<Vec<bool>>,
}

impl<'a> Forest<'a> {
    /// All forests of the graph, including the empty edge set.
    pub fn new(fm: &'a FrontierManager) -> Self {
        Self { fm, roots: None }
    }

    /// Spanning forests with one root per tree.
    pub fn rooted(fm: &'a FrontierManager, roots: &[usize]) -> Result<Self> {
        let mut is_root = vec![false; fm.num_vertices()];
        for &vertex in roots {
            if vertex >= fm.num_vertices() {
                return Err(Error::VertexOutOfRange {
                    vertex,
                    num_vertices: fm.num_vertices(),
                });
            }
            is_root[vertex] = true;
        }
        Ok(Self {
            fm,
            roots: Some(is_root),
        })
    }

    fn is_root(&self, vertex: usize) -> bool {
        self.roots.as_ref().map_or(false, |roots| roots[vertex])
    }
}

impl DdSpec for Forest<'_> {
    type Cell = ForestCell;

    fn state_len(&self) -> usize {
        self.fm.max_width()
    }

    fn num_positions(&self) -> usize {
        self.fm.num_positions()
    }

    fn root(&self, _state: &mut [ForestCell]) -> Step {
        if self.num_positions() == 0 {
            Step::Accept
        } else {
            Step::Next(0)
        }
    }

    fn child(&self, state: &mut [ForestCell], position: usize, take: bool) -> Step {
        let fm = self.fm;
        enter(fm, state, position, |w| self.is_root(w));
        if take {
            let (u, v) = fm.edge(position);
            let rooted = state[fm.slot_of(u)].rooted;
            if rooted && state[fm.slot_of(v)].rooted {
                return Step::Reject;
            }
            if !union_components(fm, state, position, u, v) {
                return Step::Reject;
            }
            let rooted = rooted || state[fm.slot_of(v)].rooted;
            let comp = state[fm.slot_of(u)].comp;
            for &w in fm.frontier_vertices(position) {
                let cell = &mut state[fm.slot_of(w)];
                if cell.comp == comp {
                    cell.rooted = rooted;
                }
            }
        }

        for &w in fm.leaving_vertices(position) {
            if self.roots.is_some()
                && !state[fm.slot_of(w)].rooted
                && !component_continues(fm, state, position, w)
            {
                return Step::Reject;
            }
            state[fm.slot_of(w)] = ForestCell::VACANT;
        }

        Step::advance_or_accept(position, self.num_positions())
    }
}
