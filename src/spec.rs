//! Constraint state machines driving diagram construction.
//!
//! A spec describes a family of sets implicitly: it starts from a root state
//! and, for every position of the universe, says what becomes of a state when
//! the element at that position is excluded or included. [`DdBuilder`]
//! explores these transitions level by level and turns them into a reduced,
//! canonical diagram.
//!
//! States are fixed-length arrays of `Copy` cells. Cells describing vertices
//! that have left the frontier must be reset to `Cell::default()`, so that two
//! states differing only in dead cells compare equal.
//!
//! [`DdBuilder`]: crate::builder::DdBuilder

use std::collections::hash_map::DefaultHasher;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

/// Outcome of a transition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Step {
    /// No completion of the partial set is a member (the 0-terminal).
    Reject,
    /// The partial set is a member, with every remaining element excluded (the 1-terminal).
    Accept,
    /// Continue at the given position, skipping (excluding) every position in between.
    Next(usize),
}

impl Step {
    /// Continue at the position following `position`, or reject if it was the last.
    pub fn advance(position: usize, num_positions: usize) -> Self {
        if position + 1 < num_positions {
            Step::Next(position + 1)
        } else {
            Step::Reject
        }
    }

    /// Continue at the position following `position`, or accept if it was the last.
    pub fn advance_or_accept(position: usize, num_positions: usize) -> Self {
        if position + 1 < num_positions {
            Step::Next(position + 1)
        } else {
            Step::Accept
        }
    }
}

/// A constraint state machine over a universe of `num_positions()` elements.
///
/// Positions are decided in increasing order; a transition must move to a
/// strictly later position.
pub trait DdSpec {
    /// One cell of the state array. `Default` is the vacant value.
    type Cell: Copy + Eq + Hash + Default + Debug;

    /// Number of cells in a state.
    fn state_len(&self) -> usize;

    /// Number of elements in the universe.
    fn num_positions(&self) -> usize;

    /// Initializes `state` (all cells vacant on entry) and returns the first step.
    fn root(&self, state: &mut [Self::Cell]) -> Step;

    /// Applies the decision on the element at `position` to `state` in place.
    fn child(&self, state: &mut [Self::Cell], position: usize, take: bool) -> Step;

    /// Hash of a state at `position`; states that are
    /// [`equal_states`](Self::equal_states) must hash equally.
    #[allow(unused_variables)]
    fn hash_state(&self, state: &[Self::Cell], position: usize) -> u64 {
        let mut hasher = DefaultHasher::new();
        state.hash(&mut hasher);
        hasher.finish()
    }

    /// Whether two states at `position` describe the same residual family.
    #[allow(unused_variables)]
    fn equal_states(&self, a: &[Self::Cell], b: &[Self::Cell], position: usize) -> bool {
        a == b
    }

    /// Folds `other` into `kept` when both are found equal at `position`.
    ///
    /// Must not change the hash of `kept`. The default keeps `kept` as is.
    #[allow(unused_variables)]
    fn merge_states(&self, kept: &mut [Self::Cell], other: &[Self::Cell], position: usize) {}
}
