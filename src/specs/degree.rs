use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::frontier::FrontierManager;
use crate::spec::{DdSpec, Step};

fn check_vertex(fm: &FrontierManager, vertex: usize) -> Result<()> {
    if vertex < fm.num_vertices() {
        Ok(())
    } else {
        Err(Error::VertexOutOfRange {
            vertex,
            num_vertices: fm.num_vertices(),
        })
    }
}

fn root_step(num_positions: usize) -> Step {
    if num_positions == 0 {
        Step::Accept
    } else {
        Step::Next(0)
    }
}

/// Edge sets in which every touched vertex has a degree within its range.
///
/// Vertices touched by no edge are not checked.
#[derive(Debug, Clone)]
pub struct DegreeConstraint<'a> {
    fm: &'a FrontierManager,
    ranges: Vec<RangeInclusive<u8>>,
}

impl<'a> DegreeConstraint<'a> {
    /// No constraint on any vertex.
    pub fn new(fm: &'a FrontierManager) -> Self {
        Self {
            fm,
            ranges: vec![0..=u8::MAX; fm.num_vertices()],
        }
    }

    pub fn with_range(mut self, vertex: usize, range: RangeInclusive<u8>) -> Result<Self> {
        check_vertex(self.fm, vertex)?;
        if range.is_empty() {
            return Err(Error::EmptyDegreeRange { vertex });
        }
        self.ranges[vertex] = range;
        Ok(self)
    }

    /// The same range for every vertex.
    pub fn with_all(mut self, range: RangeInclusive<u8>) -> Result<Self> {
        if range.is_empty() {
            return Err(Error::EmptyRange { what: "degree" });
        }
        self.ranges.fill(range);
        Ok(self)
    }
}

impl DdSpec for DegreeConstraint<'_> {
    /// Degree of the vertex, `None` if the slot is vacant.
    type Cell = Option<u8>;

    fn state_len(&self) -> usize {
        self.fm.max_width()
    }

    fn num_positions(&self) -> usize {
        self.fm.num_positions()
    }

    fn root(&self, _state: &mut [Option<u8>]) -> Step {
        root_step(self.num_positions())
    }

    fn child(&self, state: &mut [Option<u8>], position: usize, take: bool) -> Step {
        let fm = self.fm;
        for &w in fm.entering_vertices(position) {
            state[fm.slot_of(w)] = Some(0);
        }

        if take {
            let (u, v) = fm.edge(position);
            for w in [u, v] {
                let cell = &mut state[fm.slot_of(w)];
                let degree = cell.map_or(0, u16::from) + 1;
                if degree > u16::from(*self.ranges[w].end()) {
                    return Step::Reject;
                }
                *cell = Some(degree as u8);
            }
        }

        for &w in fm.leaving_vertices(position) {
            let slot = fm.slot_of(w);
            match state[slot] {
                Some(degree) if self.ranges[w].contains(&degree) => state[slot] = None,
                _ => return Step::Reject,
            }
        }

        Step::advance_or_accept(position, self.num_positions())
    }
}

/// Edge sets with a prescribed number of vertices of each degree.
///
/// `counts[d]` bounds how many vertices end with degree `d`; `None` leaves
/// that degree unbounded, and degrees of `counts.len()` or more are not
/// allowed at all. Vertices touched by no edge count as degree 0.
///
/// The state holds one cell per slot (degree plus one, 0 when vacant)
/// followed by a histogram of the finished vertices of each bounded degree.
#[derive(Debug, Clone)]
pub struct DegreeDistribution<'a> {
    fm: &'a FrontierManager,
    counts: Vec<Option<RangeInclusive<usize>>>,
}

impl<'a> DegreeDistribution<'a> {
    pub fn new(fm: &'a FrontierManager, counts: Vec<Option<RangeInclusive<usize>>>) -> Result<Self> {
        for (degree, range) in counts.iter().enumerate() {
            if range.as_ref().map_or(false, |r| r.is_empty()) {
                return Err(Error::EmptyCountRange { degree });
            }
        }
        Ok(Self { fm, counts })
    }

    /// Records one finished vertex of `degree`; `false` if its count overflows.
    fn finish(&self, histogram: &mut [i32], degree: usize) -> bool {
        match self.counts.get(degree) {
            Some(Some(range)) => {
                histogram[degree] += 1;
                histogram[degree] as usize <= *range.end()
            }
            Some(None) => true,
            None => false,
        }
    }

    fn histogram_fits(&self, histogram: &[i32]) -> bool {
        self.counts.iter().zip(histogram).all(|(range, &count)| {
            range.as_ref().map_or(true, |r| r.contains(&(count as usize)))
        })
    }
}

impl DdSpec for DegreeDistribution<'_> {
    type Cell = i32;

    fn state_len(&self) -> usize {
        self.fm.max_width() + self.counts.len()
    }

    fn num_positions(&self) -> usize {
        self.fm.num_positions()
    }

    fn root(&self, state: &mut [i32]) -> Step {
        let (_, histogram) = state.split_at_mut(self.fm.max_width());
        for _ in 0..self.fm.num_untouched() {
            if !self.finish(histogram, 0) {
                return Step::Reject;
            }
        }
        if self.num_positions() == 0 && !self.histogram_fits(histogram) {
            return Step::Reject;
        }
        root_step(self.num_positions())
    }

    fn child(&self, state: &mut [i32], position: usize, take: bool) -> Step {
        let fm = self.fm;
        let (slots, histogram) = state.split_at_mut(fm.max_width());
        for &w in fm.entering_vertices(position) {
            slots[fm.slot_of(w)] = 1;
        }

        if take {
            let (u, v) = fm.edge(position);
            for w in [u, v] {
                let cell = &mut slots[fm.slot_of(w)];
                *cell += 1;
                if *cell as usize > self.counts.len() {
                    return Step::Reject;
                }
            }
        }

        for &w in fm.leaving_vertices(position) {
            let slot = fm.slot_of(w);
            if !self.finish(histogram, slots[slot] as usize - 1) {
                return Step::Reject;
            }
            slots[slot] = 0;
        }

        if position + 1 == self.num_positions() {
            if self.histogram_fits(histogram) {
                Step::Accept
            } else {
                Step::Reject
            }
        } else {
            Step::Next(position + 1)
        }
    }
}

/// Edge sets whose non-isolated vertices all share one degree within `degrees`.
///
/// The common degree is unknown until the first vertex with an edge leaves
/// the frontier; from then on it is stored in the last state cell and every
/// other vertex must match it. The empty edge set is a member iff `degrees`
/// contains 0.
#[derive(Debug, Clone)]
pub struct RegularSubgraph<'a> {
    fm: &'a FrontierManager,
    degrees: RangeInclusive<u8>,
}

impl<'a> RegularSubgraph<'a> {
    pub fn new(fm: &'a FrontierManager, degrees: RangeInclusive<u8>) -> Result<Self> {
        if degrees.is_empty() {
            return Err(Error::EmptyRange { what: "degree" });
        }
        Ok(Self { fm, degrees })
    }

    fn max_degree(&self, common: u8) -> u16 {
        if common == 0 {
            // A slot holds the degree plus one
            u16::from(*self.degrees.end()).min(u16::from(u8::MAX) - 1)
        } else {
            u16::from(common)
        }
    }
}

impl DdSpec for RegularSubgraph<'_> {
    /// Degree plus one per slot, 0 when vacant; the last cell is the common degree, 0 while unknown.
    type Cell = u8;

    fn state_len(&self) -> usize {
        self.fm.max_width() + 1
    }

    fn num_positions(&self) -> usize {
        self.fm.num_positions()
    }

    fn root(&self, _state: &mut [u8]) -> Step {
        if self.num_positions() == 0 && !self.degrees.contains(&0) {
            return Step::Reject;
        }
        root_step(self.num_positions())
    }

    fn child(&self, state: &mut [u8], position: usize, take: bool) -> Step {
        let fm = self.fm;
        let (slots, common) = state.split_at_mut(fm.max_width());
        let common = &mut common[0];
        for &w in fm.entering_vertices(position) {
            slots[fm.slot_of(w)] = 1;
        }

        if take {
            let (u, v) = fm.edge(position);
            for w in [u, v] {
                let cell = &mut slots[fm.slot_of(w)];
                let degree = u16::from(*cell);
                if degree > self.max_degree(*common) {
                    return Step::Reject;
                }
                *cell = (degree + 1) as u8;
            }
        }

        for &w in fm.leaving_vertices(position) {
            let slot = fm.slot_of(w);
            let degree = slots[slot] - 1;
            if degree > 0 {
                if *common == 0 {
                    if !self.degrees.contains(&degree) {
                        return Step::Reject;
                    }
                    *common = degree;
                } else if degree != *common {
                    return Step::Reject;
                }
            }
            slots[slot] = 0;
        }

        if position + 1 == self.num_positions() {
            if *common != 0 || self.degrees.contains(&0) {
                Step::Accept
            } else {
                Step::Reject
            }
        } else {
            Step::Next(position + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::builder::DdBuilder;
    use crate::graph::Graph;
    use crate::zdd::ZddManager;

    fn count<S: DdSpec>(spec: &S) -> u64 {
        let mgr = ZddManager::new();
        let f = DdBuilder::new(&mgr).build(spec).unwrap();
        u64::try_from(mgr.count(f)).unwrap()
    }

    #[test]
    fn test_matchings() {
        let fm = FrontierManager::new(&Graph::grid(2, 3)).unwrap();
        let matchings = DegreeConstraint::new(&fm).with_all(0..=1).unwrap();
        assert_eq!(count(&matchings), 22);
        let perfect = DegreeConstraint::new(&fm).with_all(1..=1).unwrap();
        assert_eq!(count(&perfect), 3);
    }

    #[test]
    fn test_unconstrained_is_powerset() {
        let fm = FrontierManager::new(&Graph::cycle(5)).unwrap();
        assert_eq!(count(&DegreeConstraint::new(&fm)), 32);
    }

    #[test]
    fn test_single_vertex_range() {
        // Star at vertex 0 of K4 forced to full degree, others free
        let fm = FrontierManager::new(&Graph::complete(4)).unwrap();
        let spec = DegreeConstraint::new(&fm).with_range(0, 3..=3).unwrap();
        assert_eq!(count(&spec), 8);
    }

    #[test]
    fn test_degree_constraint_errors() {
        let fm = FrontierManager::new(&Graph::cycle(4)).unwrap();
        #[allow(clippy::reversed_empty_ranges)]
        let empty = 2..=1;
        assert!(matches!(
            DegreeConstraint::new(&fm).with_range(1, empty.clone()),
            Err(Error::EmptyDegreeRange { vertex: 1 })
        ));
        assert!(matches!(
            DegreeConstraint::new(&fm).with_range(9, 0..=1),
            Err(Error::VertexOutOfRange { vertex: 9, .. })
        ));
        assert!(matches!(
            DegreeConstraint::new(&fm).with_all(empty),
            Err(Error::EmptyRange { what: "degree" })
        ));
    }

    #[test]
    fn test_even_subgraphs() {
        // No vertex of degree 1 and none above 2: unions of disjoint cycles
        let fm = FrontierManager::new(&Graph::grid(2, 3)).unwrap();
        let spec = DegreeDistribution::new(&fm, vec![None, Some(0..=0), None]).unwrap();
        assert_eq!(count(&spec), 4);
    }

    #[test]
    fn test_distribution_counts_untouched_vertices() {
        let graph = Graph::new(3, vec![(0, 1)]).unwrap();
        let fm = FrontierManager::new(&graph).unwrap();

        let spec = DegreeDistribution::new(&fm, vec![Some(0..=0), None]).unwrap();
        assert_eq!(count(&spec), 0);
        let spec = DegreeDistribution::new(&fm, vec![Some(1..=1), None]).unwrap();
        assert_eq!(count(&spec), 1);
    }

    #[test]
    fn test_distribution_perfect_matchings() {
        let fm = FrontierManager::new(&Graph::grid(2, 3)).unwrap();
        let spec = DegreeDistribution::new(&fm, vec![Some(0..=0), None]).unwrap();
        assert_eq!(count(&spec), 3);
    }

    #[test]
    fn test_distribution_errors() {
        let fm = FrontierManager::new(&Graph::cycle(4)).unwrap();
        #[allow(clippy::reversed_empty_ranges)]
        let counts = vec![None, Some(3..=2)];
        assert!(matches!(
            DegreeDistribution::new(&fm, counts),
            Err(Error::EmptyCountRange { degree: 1 })
        ));
    }

    #[test]
    fn test_regular_subgraphs() {
        let fm = FrontierManager::new(&Graph::cycle(4)).unwrap();
        // Four single edges, two perfect matchings and the whole cycle
        assert_eq!(count(&RegularSubgraph::new(&fm, 1..=2).unwrap()), 7);
        assert_eq!(count(&RegularSubgraph::new(&fm, 0..=2).unwrap()), 8);
        assert_eq!(count(&RegularSubgraph::new(&fm, 2..=2).unwrap()), 1);
    }

    #[test]
    fn test_cubic_subgraphs() {
        // The only 3-regular subgraph of K4 is K4 itself
        let fm = FrontierManager::new(&Graph::complete(4)).unwrap();
        assert_eq!(count(&RegularSubgraph::new(&fm, 3..=3).unwrap()), 1);
    }

    #[test]
    fn test_regular_subgraph_errors() {
        let fm = FrontierManager::new(&Graph::cycle(4)).unwrap();
        #[allow(clippy::reversed_empty_ranges)]
        let empty = 3..=1;
        assert!(matches!(RegularSubgraph::new(&fm, empty), Err(Error::EmptyRange { .. })));
    }
}
