//! Transitive orientations, and the classes built on top of them: comparability,
//! co-comparability, permutation and bipartite permutation graphs.
//!
//! Two edges ab and ab' force each other (Γ) if b and b' are not adjacent: orienting one
//! away from a orients the other one away from a, too.

use bitvec::vec::BitVec;

use crate::graph::{AdjMatrix, Edge, Graph, Node};

/// Orients edges one at a time, closes the partial orientation under Γ and
/// transitivity, and backtracks on a contradiction.
struct OrientationSearch<'a> {
    graph: &'a Graph,
    matrix: AdjMatrix,
    // arcs[u][v]: u -> v
    arcs: Vec<BitVec>,
    trail: Vec<Edge>,
    queue: Vec<Edge>,
}

impl<'a> OrientationSearch<'a> {
    fn new(graph: &'a Graph) -> Self {
        let n = graph.len();
        Self {
            graph,
            matrix: graph.adjacency_matrix(),
            arcs: vec![BitVec::repeat(false, n); n],
            trail: Vec::with_capacity(graph.num_edges()),
            queue: Vec::new(),
        }
    }

    fn is_oriented(&self, (u, v): Edge) -> bool {
        self.arcs[u][v] || self.arcs[v][u]
    }

    fn assign(&mut self, u: Node, v: Node) -> bool {
        if !self.matrix.contains(u, v) || self.arcs[v][u] {
            return false;
        }
        if !self.arcs[u][v] {
            self.arcs[u].set(v, true);
            self.trail.push((u, v));
            self.queue.push((u, v));
        }
        true
    }

    fn propagate(&mut self) -> bool {
        let graph = self.graph;
        let mut head = 0;
        while let Some(&(x, y)) = self.queue.get(head) {
            head += 1;
            for &z in graph.neighbours(x) {
                if z != y && !self.matrix.contains(y, z) && !self.assign(x, z) {
                    return false;
                }
            }
            for &z in graph.neighbours(y) {
                if z != x && !self.matrix.contains(x, z) && !self.assign(z, y) {
                    return false;
                }
            }
            // p -> x -> y needs p -> y, and x -> y -> s needs x -> s
            for &p in graph.neighbours(x) {
                if self.arcs[p][x] && !self.assign(p, y) {
                    return false;
                }
            }
            for &s in graph.neighbours(y) {
                if self.arcs[y][s] && !self.assign(x, s) {
                    return false;
                }
            }
        }
        true
    }

    fn undo(&mut self, checkpoint: usize) {
        for (u, v) in self.trail.drain(checkpoint..) {
            self.arcs[u].set(v, false);
        }
    }

    fn branch(&mut self, u: Node, v: Node) -> bool {
        let checkpoint = self.trail.len();
        self.queue.clear();
        if self.assign(u, v) && self.propagate() && self.search() {
            return true;
        }
        self.undo(checkpoint);
        false
    }

    fn search(&mut self) -> bool {
        let Some((u, v)) = self.graph.iter_edges().find(|&edge| !self.is_oriented(edge)) else {
            return true;
        };
        self.branch(u, v) || self.branch(v, u)
    }

    fn run(mut self) -> Option<Vec<Edge>> {
        self.search().then_some(self.trail)
    }
}

impl Graph {
    /// A transitive orientation as a list of arcs (a, b) meaning a -> b, found by the
    /// backtracking search.
    pub fn transitive_orientation(&self) -> Option<Vec<Edge>> {
        OrientationSearch::new(self).run()
    }

    /// Golumbic's decomposition: orient the implication class of some remaining edge,
    /// delete it, and compute the next class in what is left. The graph is a
    /// comparability graph iff no class contains an edge in both directions, and then the
    /// union of the classes is transitive.
    pub fn transitive_orientation_by_classes(&self) -> Option<Vec<Edge>> {
        let n = self.len();
        let mut remaining = self.adjacency_matrix();
        let mut in_class = vec![BitVec::<usize>::repeat(false, n); n];
        let mut arcs = Vec::with_capacity(self.num_edges());

        for (u, v) in self.iter_edges() {
            if !remaining.contains(u, v) {
                continue;
            }
            let mut class = vec![(u, v)];
            in_class[u].set(v, true);
            let mut head = 0;
            while let Some(&(a, b)) = class.get(head) {
                head += 1;
                let forced: Vec<Edge> = remaining
                    .row(a)
                    .iter_ones()
                    .filter(|&c| c != b && !remaining.contains(b, c))
                    .map(|c| (a, c))
                    .chain(
                        remaining
                            .row(b)
                            .iter_ones()
                            .filter(|&c| c != a && !remaining.contains(a, c))
                            .map(|c| (c, b)),
                    )
                    .collect();
                for (x, y) in forced {
                    if in_class[y][x] {
                        return None;
                    }
                    if !in_class[x][y] {
                        in_class[x].set(y, true);
                        class.push((x, y));
                    }
                }
            }
            for &(a, b) in class.iter() {
                remaining.set(a, b, false);
            }
            arcs.extend(class);
        }
        Some(arcs)
    }

    pub fn is_comparability(&self) -> bool {
        self.transitive_orientation().is_some()
    }

    pub fn is_co_comparability(&self) -> bool {
        self.complement().is_comparability()
    }

    pub fn is_permutation(&self) -> bool {
        self.is_permutation_class_based()
    }

    /// Permutation graphs are the comparability graphs whose complement is a comparability
    /// graph, too (Pnueli, Lempel and Even).
    pub fn is_permutation_class_based(&self) -> bool {
        self.transitive_orientation_by_classes().is_some()
            && self.complement().transitive_orientation_by_classes().is_some()
    }

    pub fn is_permutation_backtracking(&self) -> bool {
        self.is_comparability() && self.is_co_comparability()
    }

    pub fn is_bipartite_permutation(&self) -> bool {
        self.is_bipartite() && self.is_permutation()
    }
}

/// Whether the arcs orient every edge exactly once and a -> b -> c implies a -> c.
pub fn is_transitive_orientation(graph: &Graph, arcs: &[Edge]) -> bool {
    let n = graph.len();
    let mut matrix = AdjMatrix::new(n);
    let mut out = vec![BitVec::<usize>::repeat(false, n); n];
    for &(a, b) in arcs {
        if !graph.is_adjacent(a, b) || matrix.contains(a, b) {
            return false;
        }
        matrix.set(a, b, true);
        out[a].set(b, true);
    }
    arcs.len() == graph.num_edges()
        && arcs.iter().all(|&(a, b)| out[b].iter_ones().all(|c| out[a][c]))
}
