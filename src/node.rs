use crate::reference::ZddId;
use crate::types::{NodeId, Var};

/// A decision node of a ZDD.
///
/// A node represents the family:
/// ```text
/// F(node) = F(lo) ∪ {S ∪ {var} | S ∈ F(hi)}
/// ```
///
/// # Invariant
///
/// **Zero-suppression rule**: `hi` is NEVER `ZddId::ZERO`.
/// Nodes where `hi = ⊥` are eliminated (replaced by `lo`).
#[derive(Debug, Copy, Clone)]
pub struct ZddNode {
    /// Decision element.
    pub var: Var,
    /// Sets NOT containing `var`.
    pub lo: ZddId,
    /// Sets containing `var`, stored without it.
    pub hi: ZddId,
    /// Next node in the collision chain of the unique table.
    pub next: NodeId,
}

impl Default for ZddNode {
    fn default() -> Self {
        Self {
            var: Var::ZERO,
            lo: ZddId::INVALID,
            hi: ZddId::INVALID,
            next: Self::NO_NEXT,
        }
    }
}

impl ZddNode {
    /// Sentinel value for end of hash collision chain.
    pub const NO_NEXT: NodeId = NodeId::INVALID;

    /// # Panics
    ///
    /// Debug-panics if `hi == ZddId::ZERO` (violates zero-suppression).
    pub fn new(var: Var, lo: ZddId, hi: ZddId) -> Self {
        debug_assert!(!hi.is_zero(), "ZDD node cannot have hi=ZERO (zero-suppression rule)");
        Self {
            var,
            lo,
            hi,
            next: Self::NO_NEXT,
        }
    }

    /// The child selected by a decision (`false` = exclude, `true` = include).
    pub fn child(&self, take: bool) -> ZddId {
        if take {
            self.hi
        } else {
            self.lo
        }
    }
}

impl PartialEq for ZddNode {
    fn eq(&self, other: &Self) -> bool {
        self.var == other.var && self.lo == other.lo && self.hi == other.hi
    }
}

impl Eq for ZddNode {}
