//! Graph universes: vertices plus an ordered list of edges.
//!
//! Edge `i` of the list is the element decided at position `i`, i.e.
//! [`Var::at_position(i)`](crate::types::Var::at_position) in the manager.
//! Vertices are numbered from 0.

use crate::error::{Error, Result};
use crate::types::Var;

/// An undirected (or, for directed specs, arc-oriented) multigraph without self-loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    num_vertices: usize,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Creates a graph, checking that every endpoint is a vertex and no edge is a loop.
    pub fn new(num_vertices: usize, edges: Vec<(usize, usize)>) -> Result<Self> {
        for &(u, v) in &edges {
            for w in [u, v] {
                if w >= num_vertices {
                    return Err(Error::VertexOutOfRange {
                        vertex: w,
                        num_vertices,
                    });
                }
            }
            if u == v {
                return Err(Error::SelfLoop { vertex: u });
            }
        }
        Ok(Self { num_vertices, edges })
    }

    /// Creates a graph whose vertex count is one past the largest endpoint.
    pub fn from_edges(edges: impl IntoIterator<Item = (usize, usize)>) -> Result<Self> {
        let edges: Vec<(usize, usize)> = edges.into_iter().collect();
        let num_vertices = edges.iter().map(|&(u, v)| u.max(v) + 1).max().unwrap_or(0);
        Self::new(num_vertices, edges)
    }

    /// The `rows × cols` grid graph, vertices numbered row by row.
    ///
    /// Edges are listed vertex by vertex: the edge to the right neighbor first,
    /// then the edge to the neighbor below. The frontier never exceeds
    /// `cols + 1` vertices.
    pub fn grid(rows: usize, cols: usize) -> Self {
        let mut edges = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                let v = r * cols + c;
                if c + 1 < cols {
                    edges.push((v, v + 1));
                }
                if r + 1 < rows {
                    edges.push((v, v + cols));
                }
            }
        }
        Self {
            num_vertices: rows * cols,
            edges,
        }
    }

    /// The cycle graph `0 - 1 - ... - (n-1) - 0`.
    pub fn cycle(n: usize) -> Self {
        let edges = match n {
            0 | 1 => Vec::new(),
            2 => vec![(0, 1)],
            _ => (0..n).map(|v| (v, (v + 1) % n)).collect(),
        };
        Self { num_vertices: n, edges }
    }

    /// The complete graph on `n` vertices, edges in lexicographic order.
    pub fn complete(n: usize) -> Self {
        let edges = (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v))).collect();
        Self { num_vertices: n, edges }
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn edge(&self, position: usize) -> (usize, usize) {
        self.edges[position]
    }

    /// Position of the first edge joining `u` and `v` (in either direction).
    pub fn position_of(&self, u: usize, v: usize) -> Option<usize> {
        self.edges
            .iter()
            .position(|&(a, b)| (a, b) == (u, v) || (a, b) == (v, u))
    }

    /// The element standing for the first edge joining `u` and `v`.
    pub fn edge_var(&self, u: usize, v: usize) -> Option<Var> {
        self.position_of(u, v).map(Var::at_position)
    }

    /// Elements for a list of edges; `None` if some edge is not in the graph.
    pub fn edge_set(&self, edges: &[(usize, usize)]) -> Option<Vec<Var>> {
        edges.iter().map(|&(u, v)| self.edge_var(u, v)).collect()
    }

    /// Number of edges touching `v`.
    pub fn degree(&self, v: usize) -> usize {
        self.edges
            .iter()
            .map(|&(a, b)| usize::from(a == v) + usize::from(b == v))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_edge_order() {
        let g = Graph::grid(2, 3);
        assert_eq!(g.num_vertices(), 6);
        assert_eq!(g.edges(), &[(0, 1), (0, 3), (1, 2), (1, 4), (2, 5), (3, 4), (4, 5)]);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            Graph::new(3, vec![(0, 3)]),
            Err(Error::VertexOutOfRange { vertex: 3, num_vertices: 3 })
        ));
        assert!(matches!(Graph::new(3, vec![(1, 1)]), Err(Error::SelfLoop { vertex: 1 })));
        assert!(matches!(Graph::from_edges([(2, 2)]), Err(Error::SelfLoop { vertex: 2 })));
    }

    #[test]
    fn test_from_edges() {
        let g = Graph::from_edges([(0, 4), (4, 2)]).unwrap();
        assert_eq!(g.num_vertices(), 5);
        assert_eq!(g.degree(4), 2);
        assert_eq!(g.degree(1), 0);
        assert_eq!(Graph::from_edges([]).unwrap().num_vertices(), 0);
    }

    #[test]
    fn test_edge_vars() {
        let g = Graph::cycle(4);
        assert_eq!(g.edge_var(0, 1), Some(Var::new(1)));
        assert_eq!(g.edge_var(0, 3), Some(Var::new(4)));
        assert_eq!(g.edge_var(0, 2), None);
        assert_eq!(g.edge_set(&[(1, 2), (3, 2)]), Some(vec![Var::new(2), Var::new(3)]));
    }

    #[test]
    fn test_complete() {
        let g = Graph::complete(4);
        assert_eq!(g.num_edges(), 6);
        assert!((0..4).all(|v| g.degree(v) == 3));
    }
}
