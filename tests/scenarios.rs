//! End-to-end tests: graph specs built into a manager, then queried and
//! combined with the family algebra.

use frontier_zdd::builder::DdBuilder;
use frontier_zdd::error::Error;
use frontier_zdd::frontier::FrontierManager;
use frontier_zdd::graph::Graph;
use frontier_zdd::optimize::Objective;
use frontier_zdd::reference::ZddId;
use frontier_zdd::spec::DdSpec;
use frontier_zdd::specs::{DegreeConstraint, Forest, SingleCycle, SpanningTree};
use frontier_zdd::types::Var;
use frontier_zdd::zdd::ZddManager;
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn vars(ids: &[u32]) -> Vec<Var> {
    ids.iter().map(|&i| Var::new(i)).collect()
}

fn family(mgr: &ZddManager, sets: &[&[u32]]) -> ZddId {
    mgr.from_sets(sets.iter().map(|s| s.iter().copied()))
}

// ─── Graph Scenarios ───────────────────────────────────────────────────────────

#[test]
fn spanning_trees_of_ladder() {
    // Vertices 0..6 in two rows of three; edges 0-1, 0-3, 1-2, 1-4, 2-5, 3-4, 4-5
    let graph = Graph::grid(2, 3);
    let fm = FrontierManager::new(&graph).unwrap();
    let mgr = ZddManager::new();
    let trees = DdBuilder::new(&mgr).build(&SpanningTree::new(&fm)).unwrap();

    assert_eq!(mgr.count(trees), BigUint::from(15u32));
    let tree = graph.edge_set(&[(0, 1), (0, 3), (1, 2), (1, 4), (2, 5)]).unwrap();
    assert!(mgr.contains(trees, &tree));
    let with_cycle = graph.edge_set(&[(0, 1), (0, 3), (1, 2), (1, 4), (3, 4)]).unwrap();
    assert!(!mgr.contains(trees, &with_cycle));
}

#[test]
fn single_cycles_of_ladder() {
    let graph = Graph::grid(2, 3);
    let fm = FrontierManager::new(&graph).unwrap();
    let mgr = ZddManager::new();
    let cycles = DdBuilder::new(&mgr).build(&SingleCycle::new(&fm)).unwrap();

    assert_eq!(mgr.count(cycles), BigUint::from(3u32));
    let square = graph.edge_set(&[(0, 1), (0, 3), (1, 4), (3, 4)]).unwrap();
    assert!(mgr.contains(cycles, &square));
    assert!(!mgr.contains_empty(cycles));
}

#[test]
fn specs_share_one_manager() {
    let graph = Graph::grid(3, 3);
    let fm = FrontierManager::new(&graph).unwrap();
    let mgr = ZddManager::new();
    let builder = DdBuilder::new(&mgr);

    let cycles = builder.build(&SingleCycle::new(&fm)).unwrap();
    let forests = builder.build(&Forest::new(&fm)).unwrap();
    let trees = builder.build(&SpanningTree::new(&fm)).unwrap();
    let max_deg2 = builder
        .build(&DegreeConstraint::new(&fm).with_all(0..=2).unwrap())
        .unwrap();

    // Cycles and forests are disjoint, trees are forests
    assert!(mgr.is_zero(mgr.intersection(cycles, forests)));
    assert_eq!(mgr.intersection(trees, forests), trees);
    // Every cycle has maximum degree 2
    assert_eq!(mgr.intersection(cycles, max_deg2), cycles);
    // Hamiltonian paths are exactly the spanning trees of maximum degree 2
    let ham_paths = mgr.intersection(trees, max_deg2);
    assert_eq!(mgr.count(ham_paths), BigUint::from(20u32));
}

#[test]
fn canonical_results() {
    // On a 4-cycle the only cycle is the whole graph, and the spanning trees are its 3-subsets
    let graph = Graph::cycle(4);
    let fm = FrontierManager::new(&graph).unwrap();
    let mgr = ZddManager::new();
    let builder = DdBuilder::new(&mgr);

    let cycles = builder.build(&SingleCycle::new(&fm)).unwrap();
    assert_eq!(cycles, mgr.singleton(1..=4u32));

    let trees = builder.build(&SpanningTree::new(&fm)).unwrap();
    assert_eq!(trees, mgr.combinations(1..=4u32, 3));

    let forests = builder.build(&Forest::new(&fm)).unwrap();
    assert_eq!(forests, mgr.difference(mgr.powerset(1..=4u32), cycles));
}

#[test]
fn building_twice_gives_same_root() {
    let fm = FrontierManager::new(&Graph::grid(3, 4)).unwrap();
    let mgr = ZddManager::new();
    let builder = DdBuilder::new(&mgr);

    let first = builder.build(&SpanningTree::new(&fm)).unwrap();
    let nodes = mgr.num_nodes();
    let second = builder.build(&SpanningTree::new(&fm)).unwrap();
    assert_eq!(first, second);
    assert_eq!(mgr.num_nodes(), nodes);
}

#[test]
fn frontier_width_does_not_grow_with_length() {
    let widths: Vec<usize> = [8, 16]
        .into_iter()
        .map(|rows| {
            let fm = FrontierManager::new(&Graph::grid(rows, 2)).unwrap();
            let spec = SingleCycle::new(&fm);
            assert_eq!(spec.state_len(), fm.max_width());
            assert_eq!(fm.max_width(), 3);
            let mgr = ZddManager::new();
            let (_, stats) = DdBuilder::new(&mgr).build_with_stats(&spec).unwrap();
            assert_eq!(stats.level_widths.len(), fm.num_positions());
            stats.max_level_width()
        })
        .collect();
    assert_eq!(widths[0], widths[1]);
}

#[test]
fn node_limit_stops_construction() {
    let fm = FrontierManager::new(&Graph::grid(4, 4)).unwrap();
    let mgr = ZddManager::with_node_limit(10);
    let result = DdBuilder::new(&mgr).build(&SpanningTree::new(&fm));
    assert!(matches!(result, Err(Error::OutOfMemory { limit: 10, .. })));
}

#[test]
fn state_limit_stops_construction() {
    let fm = FrontierManager::new(&Graph::grid(4, 4)).unwrap();
    let mgr = ZddManager::new();
    let result = DdBuilder::new(&mgr)
        .with_state_limit(5)
        .build(&SpanningTree::new(&fm));
    assert!(matches!(result, Err(Error::StateLimit { limit: 5, .. })));
}

// ─── Family Algebra ────────────────────────────────────────────────────────────

#[test]
fn minimal_and_maximal() {
    let mgr = ZddManager::new();
    let f = family(&mgr, &[&[1, 2], &[1, 2, 3], &[2, 3, 4]]);

    assert_eq!(mgr.minimal(f), family(&mgr, &[&[1, 2], &[2, 3, 4]]));
    assert_eq!(mgr.maximal(f), family(&mgr, &[&[1, 2, 3], &[2, 3, 4]]));
}

#[test]
fn hitting_sets() {
    let mgr = ZddManager::new();
    let f = family(&mgr, &[&[1, 2], &[1, 4], &[2, 3], &[3, 4]]);
    let h = mgr.hitting(f);

    assert!(mgr.contains(h, &vars(&[1, 3])));
    assert!(mgr.contains(h, &vars(&[2, 4])));
    assert!(!mgr.contains(h, &vars(&[1])));
    assert_eq!(mgr.minimal(h), family(&mgr, &[&[1, 3], &[2, 4]]));
}

#[test]
fn weighted_order() {
    let mgr = ZddManager::new();
    let f = family(
        &mgr,
        &[&[], &[1], &[1, 2], &[1, 2, 3], &[1, 2, 3, 4], &[1, 3, 4], &[1, 4], &[4]],
    );
    let weights = [0.3, -0.2, -0.2, 0.4];

    let order: Vec<Vec<Var>> = mgr
        .weighted_sets(f, &weights, Objective::Maximize)
        .unwrap()
        .take(3)
        .map(|(set, _)| set)
        .collect();
    assert_eq!(order, vec![vars(&[1, 4]), vars(&[1, 3, 4]), vars(&[4])]);
}

#[test]
fn algebra_identities_on_random_families() {
    let mut rng = StdRng::seed_from_u64(42);
    let mgr = ZddManager::new();
    let random_family = |rng: &mut StdRng| {
        let sets: Vec<Vec<u32>> = (0..12)
            .map(|_| (1..=6u32).filter(|_| rng.gen_bool(0.4)).collect())
            .collect();
        mgr.from_sets(sets)
    };

    for _ in 0..20 {
        let f = random_family(&mut rng);
        let g = random_family(&mut rng);
        let h = random_family(&mut rng);

        // Lattice laws
        assert_eq!(mgr.union(f, g), mgr.union(g, f));
        assert_eq!(mgr.intersection(f, mgr.union(g, h)), {
            let fg = mgr.intersection(f, g);
            let fh = mgr.intersection(f, h);
            mgr.union(fg, fh)
        });
        assert_eq!(mgr.difference(f, f), ZddId::ZERO);
        assert_eq!(mgr.union(mgr.difference(f, g), mgr.intersection(f, g)), f);

        // Counting is additive over disjoint parts
        let total = mgr.count(mgr.union(f, g));
        let parts = mgr.count(mgr.difference(f, g)) + mgr.count(g);
        assert_eq!(total, parts);

        // Division
        if !mgr.is_zero(g) {
            let q = mgr.quotient(f, g).unwrap();
            let r = mgr.remainder(f, g).unwrap();
            assert_eq!(mgr.union(mgr.join(q, g), r), f);
            assert!(mgr.is_zero(mgr.intersection(r, mgr.join(q, g))));
        }

        // Absorption and inclusion-exclusion
        assert_eq!(mgr.union(f, mgr.intersection(f, g)), f);
        let lhs = mgr.count(mgr.union(f, g)) + mgr.count(mgr.intersection(f, g));
        assert_eq!(lhs, mgr.count(f) + mgr.count(g));
        assert_eq!(mgr.non_subsets(f, f), ZddId::ZERO);

        // Antichains
        let min = mgr.minimal(f);
        assert_eq!(mgr.minimal(min), min);
        assert_eq!(mgr.difference(min, f), ZddId::ZERO);
    }
}

// ─── Persistence ───────────────────────────────────────────────────────────────

#[test]
fn dump_into_fresh_manager() {
    let fm = FrontierManager::new(&Graph::grid(3, 3)).unwrap();
    let mgr = ZddManager::new();
    let trees = DdBuilder::new(&mgr).build(&SpanningTree::new(&fm)).unwrap();
    let text = mgr.to_dump_string(trees);

    let other = ZddManager::new();
    let loaded = other.from_dump_str(&text).unwrap();
    assert_eq!(other.count(loaded), BigUint::from(192u32));
    assert_eq!(other.node_count(loaded), mgr.node_count(trees));
    let again = other.to_dump_string(loaded);
    assert_eq!(other.from_dump_str(&again).unwrap(), loaded);
    assert_eq!(mgr.from_dump_str(&again).unwrap(), trees);
}

#[test]
fn dump_terminals() {
    let mgr = ZddManager::new();
    for f in [ZddId::ZERO, ZddId::ONE] {
        let text = mgr.to_dump_string(f);
        assert_eq!(mgr.from_dump_str(&text).unwrap(), f);
    }
}

// ─── Probability And Sampling ──────────────────────────────────────────────────

#[test]
fn spanning_tree_reliability() {
    // A 4-cycle stays connected iff at least three of its edges survive
    let fm = FrontierManager::new(&Graph::cycle(4)).unwrap();
    let mgr = ZddManager::new();
    let trees = DdBuilder::new(&mgr).build(&SpanningTree::new(&fm)).unwrap();
    let connected = mgr.supersets(mgr.universe(), trees);

    let p = mgr.probability(connected, &[0.5; 4]).unwrap();
    assert!((p - 5.0 / 16.0).abs() < 1e-12);
}

#[test]
fn samples_are_members() {
    let fm = FrontierManager::new(&Graph::grid(3, 3)).unwrap();
    let mgr = ZddManager::new();
    let cycles = DdBuilder::new(&mgr).build(&SingleCycle::new(&fm)).unwrap();

    let rng = StdRng::seed_from_u64(7);
    for set in mgr.random_sets(cycles, rng).take(50) {
        assert!(mgr.contains(cycles, &set));
    }
}
