//! Weakly chordal graphs: neither the graph nor its complement has an induced cycle of
//! length at least five.

use std::collections::VecDeque;

use bitvec::vec::BitVec;

use crate::graph::{AdjMatrix, Graph, Node, VNodes};

/// What the hole search needs to know about a graph.
trait Adjacency {
    fn len(&self) -> usize;
    fn adjacent(&self, a: Node, b: Node) -> bool;
    fn neighbours(&self, node: Node) -> VNodes;
}

impl Adjacency for Graph {
    fn len(&self) -> usize {
        Graph::len(self)
    }

    fn adjacent(&self, a: Node, b: Node) -> bool {
        self.is_adjacent(a, b)
    }

    fn neighbours(&self, node: Node) -> VNodes {
        Graph::neighbours(self, node).to_vec()
    }
}

/// The complement, read off the adjacency matrix of the graph.
struct Complement<'a>(&'a AdjMatrix);

impl Adjacency for Complement<'_> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn adjacent(&self, a: Node, b: Node) -> bool {
        a != b && !self.0.contains(a, b)
    }

    fn neighbours(&self, node: Node) -> VNodes {
        self.0.row(node).iter_zeros().filter(|&other| other != node).collect()
    }
}

/// Looks for an edge uv, x in N(u) - N[v] and y in N(v) - N[u] with an x-y path whose
/// inner nodes avoid N[u] and N[v]; a shortest such path of length at least two closes
/// a hole of length at least five.
fn has_long_hole(graph: &impl Adjacency) -> bool {
    let n = graph.len();
    if n < 5 {
        return false;
    }
    let neighbourhoods: Vec<VNodes> = (0..n).map(|v| graph.neighbours(v)).collect();
    let mut blocked = BitVec::<usize>::repeat(false, n);
    let mut dist = vec![usize::MAX; n];
    let mut queue = VecDeque::new();

    for u in 0..n {
        if neighbourhoods[u].len() < 2 {
            continue;
        }
        for &v in neighbourhoods[u].iter().filter(|&&v| v > u) {
            if neighbourhoods[v].len() < 2 {
                continue;
            }
            blocked.fill(false);
            blocked.set(u, true);
            blocked.set(v, true);
            for &w in neighbourhoods[u].iter().chain(&neighbourhoods[v]) {
                blocked.set(w, true);
            }
            for &x in neighbourhoods[u].iter().filter(|&&x| x != v && !graph.adjacent(x, v)) {
                for &y in neighbourhoods[v]
                    .iter()
                    .filter(|&&y| y != u && y != x && !graph.adjacent(y, u))
                {
                    dist.fill(usize::MAX);
                    dist[x] = 0;
                    queue.clear();
                    queue.push_back(x);
                    while let Some(cur) = queue.pop_front() {
                        if cur == y {
                            break;
                        }
                        for &next in neighbourhoods[cur].iter() {
                            if dist[next] != usize::MAX || (blocked[next] && next != y) {
                                continue;
                            }
                            dist[next] = dist[cur] + 1;
                            queue.push_back(next);
                        }
                    }
                    if dist[y] != usize::MAX && dist[y] >= 2 {
                        return true;
                    }
                }
            }
        }
    }
    false
}

impl Graph {
    pub fn has_long_hole(&self) -> bool {
        has_long_hole(self)
    }

    pub fn has_long_antihole(&self) -> bool {
        has_long_hole(&Complement(&self.adjacency_matrix()))
    }

    pub fn is_weakly_chordal(&self) -> bool {
        self.is_weakly_chordal_complement_bfs()
    }

    /// Searches the complement through the adjacency matrix without building it.
    pub fn is_weakly_chordal_complement_bfs(&self) -> bool {
        !self.has_long_hole() && !self.has_long_antihole()
    }

    /// Builds the complement and runs the same hole search on it.
    pub fn is_weakly_chordal_co_chordal_bipartite(&self) -> bool {
        !self.has_long_hole() && !self.complement().has_long_hole()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::graph::test_utils::*;

    fn brute_force_hole(graph: &Graph) -> bool {
        let n = graph.len();
        (0u32..1 << n).any(|mask| {
            let nodes: VNodes = (0..n).filter(|i| mask >> i & 1 == 1).collect();
            let sub = graph.subgraph(&nodes);
            nodes.len() >= 5
                && sub.is_connected()
                && sub.iter_nodes().all(|v| sub.degree(v) == 2)
        })
    }

    #[test]
    fn known_instances() {
        for graph in [cycle(4), complete(5), path(6), empty(5), empty(0)] {
            assert!(graph.is_weakly_chordal_complement_bfs(), "{graph:?}");
            assert!(graph.is_weakly_chordal_co_chordal_bipartite(), "{graph:?}");
        }
        // the complement of C6 contains no long hole, but C6 itself is one
        for graph in [cycle(5), cycle(6), cycle(6).complement(), cycle(7).complement()] {
            assert!(!graph.is_weakly_chordal_complement_bfs(), "{graph:?}");
            assert!(!graph.is_weakly_chordal_co_chordal_bipartite(), "{graph:?}");
        }
        assert!(!cycle(7).complement().has_long_hole());
        assert!(cycle(7).complement().has_long_antihole());
    }

    #[test]
    fn exhaustive_small() {
        for n in 0..=6 {
            for graph in all_graphs(n) {
                let expected = !brute_force_hole(&graph) && !brute_force_hole(&graph.complement());
                assert_eq!(graph.is_weakly_chordal_complement_bfs(), expected, "{graph:?}");
                assert_eq!(graph.is_weakly_chordal_co_chordal_bipartite(), expected, "{graph:?}");
            }
        }
    }

    #[test]
    fn random_agree() {
        let rng = &mut Pcg64::seed_from_u64(41);
        for _ in 0..200 {
            let graph = random_graph(10, 0.5, rng);
            assert_eq!(
                graph.is_weakly_chordal_complement_bfs(),
                graph.is_weakly_chordal_co_chordal_bipartite()
            );
            if graph.is_chordal() {
                assert!(graph.is_weakly_chordal());
            }
        }
    }
}
