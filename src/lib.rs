//! # frontier-zdd: Frontier-based ZDD construction in Rust
//!
//! **`frontier-zdd`** builds and manipulates *families of sets* stored as
//! **Zero-suppressed Decision Diagrams (ZDDs)**. Typical families are subsets
//! of a graph's edges with a structural property: spanning trees, single
//! cycles, paths between two vertices, matchings, subgraphs with a prescribed
//! degree sequence.
//!
//! ## What is a ZDD?
//!
//! A ZDD is a reduced decision diagram over a fixed order of elements. Each
//! root-to-⊤ path includes some elements and excludes the rest; the included
//! elements form one member set. A node whose include-child is ⊥ is never
//! stored, which keeps sparse families small. For a fixed order, every family
//! has exactly one diagram, so equality of families is equality of handles.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: all diagrams live in a
//!   [`ZddManager`][crate::zdd::ZddManager] and are referenced by lightweight
//!   [`ZddId`][crate::reference::ZddId] handles.
//! - **Frontier-based construction**: a [`DdSpec`][crate::spec::DdSpec] is a
//!   small state machine over the elements. [`DdBuilder`][crate::builder::DdBuilder]
//!   explores it breadth-first, merging equal states per level, and emits the
//!   canonical diagram. Graph specs keep state only for the vertices on the
//!   current [`FrontierManager`][crate::frontier::FrontierManager] frontier.
//! - **Family algebra**: union, intersection, difference, join, meet,
//!   minimal/maximal antichains, hitting sets, division, exact counting with
//!   big integers, weighted optimization and probabilities.
//! - **1-Based Variables**: element `x{i}` sits at position `i - 1`, so a
//!   graph's edge at position `p` is [`Var::at_position(p)`][crate::types::Var::at_position].
//!
//! ## Basic Usage
//!
//! ```rust
//! use frontier_zdd::builder::DdBuilder;
//! use frontier_zdd::frontier::FrontierManager;
//! use frontier_zdd::graph::Graph;
//! use frontier_zdd::specs::SingleCycle;
//! use frontier_zdd::zdd::ZddManager;
//!
//! // 1. Describe the universe: the edges of a 3x3 grid
//! let graph = Graph::grid(3, 3);
//! let fm = FrontierManager::new(&graph)?;
//!
//! // 2. Build the family of single cycles
//! let mgr = ZddManager::new();
//! let cycles = DdBuilder::new(&mgr).build(&SingleCycle::new(&fm))?;
//! assert_eq!(mgr.count(cycles).to_string(), "13");
//!
//! // 3. Combine it with other families
//! let squares = mgr.combinations(1..=graph.num_edges() as u32, 4);
//! let small_cycles = mgr.intersection(cycles, squares);
//! assert_eq!(mgr.count(small_cycles).to_string(), "4");
//! # Ok::<(), frontier_zdd::error::Error>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`zdd`]**: the manager, node store and the basic set operations.
//! - **[`family`]**: antichains, hitting sets, division, cardinality filters.
//! - **[`builder`]** and **[`spec`]**: breadth-first construction from constraint state machines.
//! - **[`frontier`]** and **[`specs`]**: frontier schedules and the graph specs built on them.
//! - **[`optimize`]**, **[`probability`]**, **[`iter`]**: weighted search, probabilities, enumeration and sampling.
//! - **[`io`]** and **[`dot`]**: text dumps and Graphviz output.

pub mod builder;
pub mod cache;
pub mod dot;
pub mod error;
pub mod family;
pub mod frontier;
pub mod graph;
pub mod io;
pub mod iter;
pub mod node;
pub mod optimize;
pub mod probability;
pub mod reference;
pub mod spec;
pub mod specs;
pub mod subtable;
pub mod types;
pub mod zdd;
