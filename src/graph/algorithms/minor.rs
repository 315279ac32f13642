//! Minor tests, and series-parallel graphs as the graphs without a K4 minor.
//!
//! The search first deletes nodes of degree at most one and, for minors of minimum degree
//! three, contracts nodes of degree two. Then it contracts or deletes edges until the
//! minor shows up as a subgraph; states are memoised on their (labelled) edge sets.

use std::collections::VecDeque;

use bitvec::vec::BitVec;
use hashbrown::HashMap;
use itertools::Itertools;

use crate::graph::{Edge, Graph, HNodes, Node, VNodes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Minor {
    K4,
    K5,
    K23,
    K33,
}

impl Minor {
    fn min_degree(self) -> usize {
        match self {
            Minor::K4 | Minor::K33 => 3,
            Minor::K5 => 4,
            Minor::K23 => 2,
        }
    }

    fn num_nodes(self) -> usize {
        match self {
            Minor::K4 => 4,
            Minor::K5 | Minor::K23 => 5,
            Minor::K33 => 6,
        }
    }

    fn num_edges(self) -> usize {
        match self {
            Minor::K4 | Minor::K23 => 6,
            Minor::K5 => 10,
            Minor::K33 => 9,
        }
    }

    fn is_subgraph_of(self, state: &State) -> bool {
        match self {
            Minor::K4 => state.has_clique(4),
            Minor::K5 => state.has_clique(5),
            Minor::K23 => state.has_complete_bipartite(2, 3),
            Minor::K33 => state.has_complete_bipartite(3, 3),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct State {
    rows: Vec<BitVec>,
}

impl State {
    fn from_graph(graph: &Graph) -> Self {
        let n = graph.len();
        let mut rows = vec![BitVec::repeat(false, n); n];
        for (a, b) in graph.iter_edges() {
            rows[a].set(b, true);
            rows[b].set(a, true);
        }
        Self { rows }
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn degree(&self, node: Node) -> usize {
        self.rows[node].count_ones()
    }

    fn num_edges(&self) -> usize {
        self.rows.iter().map(|row| row.count_ones()).sum::<usize>() / 2
    }

    fn edges(&self) -> Vec<Edge> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(a, row)| row.iter_ones().filter(move |&b| b > a).map(move |b| (a, b)))
            .collect()
    }

    fn remove_node(&mut self, node: Node) {
        self.rows.remove(node);
        for row in self.rows.iter_mut() {
            row.remove(node);
        }
    }

    fn delete(&self, a: Node, b: Node) -> Self {
        let mut ret = self.clone();
        ret.rows[a].set(b, false);
        ret.rows[b].set(a, false);
        ret
    }

    /// Merges `b` into `a`.
    fn contract(&self, a: Node, b: Node) -> Self {
        let mut ret = self.clone();
        let merged = ret.rows[b].clone();
        for other in merged.iter_ones() {
            ret.rows[other].set(a, true);
        }
        ret.rows[a] |= merged.as_bitslice();
        ret.rows[a].set(a, false);
        ret.remove_node(b);
        ret
    }

    /// Deletes nodes of degree at most one and, if `suppress`, contracts nodes of degree
    /// two into a neighbour; neither creates or destroys a minor of minimum degree three
    /// (or two, for the deletion).
    fn reduce(&mut self, suppress: bool) {
        loop {
            let Some(node) = (0..self.len())
                .find(|&v| self.degree(v) <= 1 || (suppress && self.degree(v) == 2))
            else {
                return;
            };
            match self.rows[node].first_one() {
                Some(neighbour) if self.degree(node) == 2 => {
                    *self = self.contract(neighbour, node);
                },
                _ => self.remove_node(node),
            }
        }
    }

    fn candidates(&self, min_degree: usize) -> VNodes {
        (0..self.len()).filter(|&v| self.degree(v) >= min_degree).collect()
    }

    fn has_clique(&self, k: usize) -> bool {
        self.candidates(k - 1)
            .into_iter()
            .combinations(k)
            .any(|set| set.iter().tuple_combinations().all(|(&a, &b)| self.rows[a][b]))
    }

    fn has_complete_bipartite(&self, a: usize, b: usize) -> bool {
        self.candidates(b).into_iter().combinations(a).any(|side| {
            let mut common = BitVec::<usize>::repeat(true, self.len());
            for &v in side.iter() {
                common &= self.rows[v].as_bitslice();
            }
            common.count_ones() >= b
        })
    }
}

/// Memoised contraction/deletion search for one minor.
struct MinorSearch {
    minor: Minor,
    suppress: bool,
    memo: HashMap<State, bool>,
}

impl MinorSearch {
    fn new(minor: Minor) -> Self {
        Self { minor, suppress: minor.min_degree() >= 3, memo: HashMap::new() }
    }

    fn contains(&mut self, mut state: State) -> bool {
        state.reduce(self.suppress);
        // Dirac: minimum degree three forces a K4 minor, and the reduction leaves nothing
        // of smaller degree
        if self.minor == Minor::K4 {
            return state.len() > 0;
        }
        if state.len() < self.minor.num_nodes() || state.num_edges() < self.minor.num_edges() {
            return false;
        }
        if self.minor.is_subgraph_of(&state) {
            return true;
        }
        if let Some(&known) = self.memo.get(&state) {
            return known;
        }
        let found = state.edges().into_iter().any(|(a, b)| {
            self.contains(state.contract(a, b)) || self.contains(state.delete(a, b))
        });
        self.memo.insert(state, found);
        found
    }
}

// both for outerplanar and series-parallel graphs
pub(super) fn k4_free_bound(n: usize) -> usize {
    if n < 2 { 0 } else { 2 * n - 3 }
}

impl Graph {
    /// Exponential in general; K4 is decided after the degree reduction alone.
    pub fn has_minor(&self, minor: Minor) -> bool {
        MinorSearch::new(minor).contains(State::from_graph(self))
    }

    pub fn is_series_parallel(&self) -> bool {
        self.is_series_parallel_queue_reduction()
    }

    /// No K4 minor.
    pub fn is_series_parallel_minor_check(&self) -> bool {
        self.num_edges() <= k4_free_bound(self.len()) && !self.has_minor(Minor::K4)
    }

    /// Deletes nodes of degree at most one and replaces nodes of degree two by an edge
    /// between their neighbours (parallel edges collapse), working off a queue. The graph
    /// has no K4 minor iff this deletes everything.
    pub fn is_series_parallel_queue_reduction(&self) -> bool {
        let mut adj: Vec<HNodes> = self
            .iter_nodes()
            .map(|v| self.neighbours(v).iter().copied().collect())
            .collect();
        let mut queue: VecDeque<Node> =
            self.iter_nodes().filter(|&v| adj[v].len() <= 2).collect();
        let mut removed = BitVec::<usize>::repeat(false, self.len());
        let mut remaining = self.len();

        while let Some(node) = queue.pop_front() {
            if removed[node] {
                continue;
            }
            removed.set(node, true);
            remaining -= 1;
            let neighbours: VNodes = adj[node].drain().collect();
            for &neighbour in neighbours.iter() {
                adj[neighbour].remove(&node);
            }
            if let [a, b] = neighbours[..] {
                adj[a].insert(b);
                adj[b].insert(a);
            }
            // degrees never grow, so every node is queued once it is small enough
            for &neighbour in neighbours.iter() {
                if adj[neighbour].len() <= 2 {
                    queue.push_back(neighbour);
                }
            }
        }
        remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::graph::test_utils::*;

    fn cube() -> Graph {
        collect!(8;
            (1, 2), (2, 3), (3, 4), (4, 1),
            (5, 6), (6, 7), (7, 8), (8, 5),
            (1, 5), (2, 6), (3, 7), (4, 8)
        )
    }

    #[test]
    fn minors() {
        assert!(complete(4).has_minor(Minor::K4));
        assert!(!cycle(6).has_minor(Minor::K4));
        // every edge of K4 subdivided once
        let subdivided = collect!(10;
            (1, 5), (5, 2), (1, 6), (6, 3), (1, 7), (7, 4),
            (2, 8), (8, 3), (2, 9), (9, 4), (3, 10), (10, 4)
        );
        assert!(subdivided.has_minor(Minor::K4));
        assert!(!subdivided.has_minor(Minor::K5));
        assert!(complete_bipartite(2, 3).has_minor(Minor::K23));
        assert!(!complete(4).has_minor(Minor::K23));
        assert!(complete_bipartite(3, 3).has_minor(Minor::K4));
        assert!(complete_bipartite(3, 3).has_minor(Minor::K33));
        assert!(!cube().has_minor(Minor::K33));
    }

    #[test]
    fn series_parallel() {
        for graph in [cycle(5), complete_bipartite(2, 4), path(5), empty(3), empty(0)] {
            assert!(graph.is_series_parallel_queue_reduction(), "{graph:?}");
            assert!(graph.is_series_parallel_minor_check(), "{graph:?}");
        }
        for graph in [complete(4), cube(), complete_bipartite(3, 3)] {
            assert!(!graph.is_series_parallel_queue_reduction(), "{graph:?}");
            assert!(!graph.is_series_parallel_minor_check(), "{graph:?}");
        }
        for n in 0..=6 {
            for graph in all_graphs(n) {
                let queue = graph.is_series_parallel_queue_reduction();
                assert_eq!(queue, graph.is_series_parallel_minor_check(), "{graph:?}");
                if graph.is_outer_planar() {
                    assert!(queue, "{graph:?}");
                }
            }
        }
    }

    #[test]
    fn no_branching_for_k4() {
        // a 10x10 grid with one diagonal per cell is far too large for a blind search
        let node = |r: usize, c: usize| r * 10 + c;
        let mut edges = Vec::new();
        for r in 0..10 {
            for c in 0..10 {
                if c + 1 < 10 {
                    edges.push((node(r, c), node(r, c + 1)));
                }
                if r + 1 < 10 {
                    edges.push((node(r, c), node(r + 1, c)));
                }
                if r + 1 < 10 && c + 1 < 10 {
                    edges.push((node(r, c), node(r + 1, c + 1)));
                }
            }
        }
        let start = Instant::now();
        let graph = Graph::from_edges_unchecked(100, edges);
        assert!(graph.has_minor(Minor::K4));
        assert!(!graph.is_series_parallel_minor_check());
        // a long cycle with nested chords from one node stays series-parallel
        let fan = Graph::from_edges_unchecked(
            60,
            (0..60).map(|i| (i, (i + 1) % 60)).chain((2..59).map(|i| (0, i))),
        );
        assert!(fan.is_series_parallel_minor_check());
        assert!(start.elapsed() < Duration::from_secs(5), "took {:?}", start.elapsed());
    }
}
