use std::fmt::{Display, Formatter};

use crate::types::NodeId;

/// A handle to a family of sets stored in a [`ZddManager`][crate::zdd::ZddManager].
///
/// Handles are plain indices: two families built in the same manager are equal
/// if and only if their handles are equal.
///
/// # Terminal Values
///
/// - `ZddId::ZERO` (⊥): empty family: no sets (the reject terminal)
/// - `ZddId::ONE` (⊤): family containing only the empty set: {∅} (the accept terminal)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ZddId(u32);

impl ZddId {
    /// Empty family (⊥): contains no sets.
    pub const ZERO: ZddId = ZddId(0);

    /// Family containing only empty set (⊤): {∅}.
    pub const ONE: ZddId = ZddId(1);

    /// Sentinel for invalid references.
    pub const INVALID: ZddId = ZddId(0xFFFF_FFFF);

    pub const fn from_node(id: NodeId) -> Self {
        ZddId(id.raw())
    }

    pub const fn new(index: u32) -> Self {
        ZddId(index)
    }

    /// Terminal for the given acceptance value.
    pub const fn terminal(accept: bool) -> Self {
        if accept {
            ZddId::ONE
        } else {
            ZddId::ZERO
        }
    }

    pub const fn node_id(self) -> NodeId {
        NodeId::new(self.0)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_terminal(self) -> bool {
        self.0 <= 1
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_one(self) -> bool {
        self.0 == 1
    }
}

impl Default for ZddId {
    fn default() -> Self {
        ZddId::INVALID
    }
}

impl Display for ZddId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "⊥"),
            1 => write!(f, "⊤"),
            _ => write!(f, "#{}", self.0),
        }
    }
}

impl From<NodeId> for ZddId {
    fn from(id: NodeId) -> Self {
        ZddId::from_node(id)
    }
}

impl From<ZddId> for NodeId {
    fn from(id: ZddId) -> Self {
        id.node_id()
    }
}
