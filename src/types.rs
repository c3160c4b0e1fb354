use std::fmt;

/// A node identifier (index into the node storage array).
///
/// # Invariants
///
/// - `NodeId(0)` is the ZERO terminal (⊥, empty family)
/// - `NodeId(1)` is the ONE terminal (⊤, family containing empty set)
/// - Decision nodes start at index 2
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The ZERO terminal node (empty family).
    pub const ZERO: NodeId = NodeId(0);

    /// The ONE terminal node (family containing empty set).
    pub const ONE: NodeId = NodeId(1);

    /// Sentinel value for invalid/uninitialized node references.
    pub const INVALID: NodeId = NodeId(0xFFFF_FFFF);

    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the node index as a `usize` for array indexing.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "⊥"),
            1 => write!(f, "⊤"),
            _ => write!(f, "@{}", self.0),
        }
    }
}

/// A universe element (1-indexed).
///
/// The element processed at position `i` of the universe order is `Var(i + 1)`.
/// `Var(0)` is reserved.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Var(u32);

impl Var {
    /// Special zero value (reserved, not a valid element).
    pub const ZERO: Var = Var(0);

    /// # Panics
    ///
    /// Panics in debug mode if `id == 0`.
    pub const fn new(id: u32) -> Self {
        debug_assert!(id > 0, "Variable IDs must be >= 1");
        Var(id)
    }

    /// The element decided at the given (0-based) universe position.
    pub const fn at_position(position: usize) -> Self {
        Var(position as u32 + 1)
    }

    pub const fn id(self) -> u32 {
        self.0
    }

    /// The (0-based) universe position of this element.
    pub const fn position(self) -> usize {
        self.0 as usize - 1
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<u32> for Var {
    fn from(id: u32) -> Self {
        Var::new(id)
    }
}

impl From<Var> for u32 {
    fn from(v: Var) -> Self {
        v.0
    }
}

/// A level in the element ordering (0 = top, increasing towards the terminals).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Level(u32);

impl Level {
    pub const fn new(level: u32) -> Self {
        Level(level)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl From<usize> for Level {
    fn from(level: usize) -> Self {
        Level::new(level as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_position() {
        let v = Var::at_position(0);
        assert_eq!(v, Var::new(1));
        assert_eq!(v.position(), 0);
        assert_eq!(Var::new(7).position(), 6);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", NodeId::ZERO), "⊥");
        assert_eq!(format!("{}", NodeId::new(5)), "@5");
        assert_eq!(format!("{}", Var::new(3)), "x3");
        assert_eq!(format!("{}", Level::new(2)), "L2");
    }
}
