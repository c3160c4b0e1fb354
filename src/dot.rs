//! Graphviz DOT export for debugging diagrams.

use std::fmt::Write;

use crate::reference::ZddId;
use crate::zdd::ZddManager;

impl ZddManager {
    /// Renders the diagram rooted at `f` in Graphviz DOT syntax.
    ///
    /// Exclude edges are dashed, include edges solid. Nodes deciding the same
    /// element share a rank.
    ///
    /// ```
    /// use frontier_zdd::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let f = mgr.union(mgr.base(1), mgr.base(2));
    ///
    /// let dot = mgr.to_dot(f);
    /// assert!(dot.starts_with("digraph ZDD {"));
    /// ```
    pub fn to_dot(&self, f: ZddId) -> String {
        let mut dot = String::new();
        writeln!(dot, "digraph ZDD {{").unwrap();
        writeln!(dot, "  rankdir=TB;").unwrap();
        writeln!(dot, "  node [shape=circle];").unwrap();
        writeln!(dot, "  zero [label=\"⊥\", shape=square];").unwrap();
        writeln!(dot, "  one [label=\"⊤\", shape=square];").unwrap();

        let mut nodes = self.nodes_bottom_up(f);
        nodes.reverse();

        let mut rank: Option<u32> = None;
        for &id in &nodes {
            let node = self.node(id);
            let level = self.level(node.var).raw();
            if rank != Some(level) {
                if rank.is_some() {
                    writeln!(dot, "  }}").unwrap();
                }
                writeln!(dot, "  {{ rank=same;").unwrap();
                rank = Some(level);
            }
            writeln!(dot, "    n{} [label=\"{}\"];", id.raw(), node.var).unwrap();
        }
        if rank.is_some() {
            writeln!(dot, "  }}").unwrap();
        }

        for &id in &nodes {
            let node = self.node(id);
            writeln!(dot, "  n{} -> {} [style=dashed];", id.raw(), dot_name(node.lo)).unwrap();
            writeln!(dot, "  n{} -> {};", id.raw(), dot_name(node.hi)).unwrap();
        }

        if f.is_terminal() {
            writeln!(dot, "  root [shape=none, label=\"\"];").unwrap();
            writeln!(dot, "  root -> {};", dot_name(f)).unwrap();
        }

        writeln!(dot, "}}").unwrap();
        dot
    }
}

fn dot_name(f: ZddId) -> String {
    if f.is_zero() {
        "zero".to_string()
    } else if f.is_one() {
        "one".to_string()
    } else {
        format!("n{}", f.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_edges() {
        let mgr = ZddManager::new();
        let f = mgr.from_sets(vec![vec![1u32], vec![2]]);
        let dot = mgr.to_dot(f);

        let root = f.raw();
        assert!(dot.contains(&format!("n{} [label=\"x1\"]", root)));
        assert!(dot.contains(&format!("n{} -> one;", root)));
        assert!(dot.contains("-> zero [style=dashed];"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_dot_terminal() {
        let mgr = ZddManager::new();
        let dot = mgr.to_dot(ZddId::ONE);
        assert!(dot.contains("root -> one;"));
    }
}
