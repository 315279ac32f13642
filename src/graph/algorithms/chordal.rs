//! Chordality via maximum cardinality search (MCS) and a perfect elimination ordering
//! (PEO) check.

use std::collections::BinaryHeap;

use crate::graph::{Graph, Node, VNodes};

/// A bijection between the nodes and the ranks `1..=n`; `order()[i]` has rank `i + 1`
/// and is eliminated before every node of higher rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EliminationOrdering {
    order: VNodes,
    // 0-based position in order
    position: Vec<usize>,
}

impl EliminationOrdering {
    /// `order` has to be a permutation of `0..order.len()`.
    pub fn from_order(order: VNodes) -> Self {
        let mut position = vec![0; order.len()];
        for (pos, &node) in order.iter().enumerate() {
            position[node] = pos;
        }
        Self { order, position }
    }

    pub fn order(&self) -> &[Node] {
        &self.order
    }

    /// Rank in `1..=n`.
    #[inline]
    pub fn rank(&self, node: Node) -> usize {
        self.position[node] + 1
    }

    /// Neighbours of `node` with a strictly higher rank, sorted by rank.
    pub fn later_neighbours(&self, graph: &Graph, node: Node) -> VNodes {
        let mut later: VNodes = graph
            .neighbours(node)
            .iter()
            .copied()
            .filter(|&n| self.position[n] > self.position[node])
            .collect();
        later.sort_unstable_by_key(|&n| self.position[n]);
        later
    }

    /// The later neighbour with the smallest rank.
    pub fn parent(&self, graph: &Graph, node: Node) -> Option<Node> {
        graph
            .neighbours(node)
            .iter()
            .copied()
            .filter(|&n| self.position[n] > self.position[node])
            .min_by_key(|&n| self.position[n])
    }

    /// The parent test: for every node, its parent is adjacent to all other later
    /// neighbours. This is equivalent to every later neighbourhood being a clique.
    pub fn is_perfect(&self, graph: &Graph) -> bool {
        for &node in self.order.iter() {
            let Some(parent) = self.parent(graph, node) else {
                continue;
            };
            for &later in graph.neighbours(node) {
                if later == parent || self.position[later] < self.position[node] {
                    continue;
                }
                if !graph.is_adjacent(parent, later) {
                    return false;
                }
            }
        }
        true
    }
}

const NIL: usize = usize::MAX;

struct Buckets {
    head: Vec<Node>,
    next: Vec<Node>,
    prev: Vec<Node>,
}

impl Buckets {
    fn new(n: usize) -> Self {
        Self { head: vec![NIL; n + 1], next: vec![NIL; n], prev: vec![NIL; n] }
    }

    fn insert(&mut self, node: Node, weight: usize) {
        self.next[node] = self.head[weight];
        self.prev[node] = NIL;
        if self.head[weight] != NIL {
            self.prev[self.head[weight]] = node;
        }
        self.head[weight] = node;
    }

    fn unlink(&mut self, node: Node, weight: usize) {
        if self.prev[node] != NIL {
            self.next[self.prev[node]] = self.next[node];
        } else {
            self.head[weight] = self.next[node];
        }
        if self.next[node] != NIL {
            self.prev[self.next[node]] = self.prev[node];
        }
    }
}

impl Graph {
    /// MCS with a priority queue; ties are broken by the largest label. The first
    /// picked node gets rank n, the last one rank 1.
    pub fn mcs_ordering(&self) -> EliminationOrdering {
        let n = self.len();
        let mut weight = vec![0usize; n];
        let mut visited = vec![false; n];
        let mut order = vec![0; n];
        // lazy deletion: outdated entries are skipped when popped
        let mut queue: BinaryHeap<(usize, Node)> =
            self.iter_nodes().map(|v| (0, v)).collect();

        for pos in (0..n).rev() {
            while let Some((w, node)) = queue.pop() {
                if visited[node] || w != weight[node] {
                    continue;
                }
                visited[node] = true;
                order[pos] = node;
                for &neighbour in self.neighbours(node) {
                    if !visited[neighbour] {
                        weight[neighbour] += 1;
                        queue.push((weight[neighbour], neighbour));
                    }
                }
                break;
            }
        }

        EliminationOrdering::from_order(order)
    }

    /// MCS with doubly linked weight buckets, linear time.
    pub fn bucket_mcs_ordering(&self) -> EliminationOrdering {
        let n = self.len();
        let mut weight = vec![0usize; n];
        let mut visited = vec![false; n];
        let mut buckets = Buckets::new(n);

        // inserting in increasing order puts the largest label at the head
        for v in self.iter_nodes() {
            buckets.insert(v, 0);
        }

        let mut order = vec![0; n];
        let mut top = 0;
        for pos in (0..n).rev() {
            while buckets.head[top] == NIL {
                // there is always an unvisited node left, so this cannot underflow
                top -= 1;
            }
            let node = buckets.head[top];
            buckets.unlink(node, top);
            visited[node] = true;
            order[pos] = node;
            for &neighbour in self.neighbours(node) {
                if visited[neighbour] {
                    continue;
                }
                let w = weight[neighbour];
                buckets.unlink(neighbour, w);
                weight[neighbour] = w + 1;
                buckets.insert(neighbour, w + 1);
                top = top.max(w + 1);
            }
        }

        EliminationOrdering::from_order(order)
    }

    /// A perfect elimination ordering, if the graph is chordal.
    pub fn perfect_elimination_ordering(&self) -> Option<EliminationOrdering> {
        let ordering = self.bucket_mcs_ordering();
        ordering.is_perfect(self).then_some(ordering)
    }

    pub fn is_chordal(&self) -> bool {
        self.is_chordal_bucket_mcs()
    }

    pub fn is_chordal_mcs(&self) -> bool {
        self.mcs_ordering().is_perfect(self)
    }

    pub fn is_chordal_bucket_mcs(&self) -> bool {
        self.bucket_mcs_ordering().is_perfect(self)
    }

    pub fn is_co_chordal(&self) -> bool {
        self.complement().is_chordal()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::graph::test_utils::*;

    fn brute_force_chordal(graph: &Graph) -> bool {
        // a graph is chordal iff we can repeatedly remove a simplicial node
        let mut alive: VNodes = graph.iter_nodes().collect();
        while !alive.is_empty() {
            let sub = graph.subgraph(&alive);
            let Some(pos) = sub
                .iter_nodes()
                .position(|v| sub.set_is_clique(sub.neighbours(v)))
            else {
                return false;
            };
            alive.remove(pos);
        }
        true
    }

    #[test]
    fn known_instances() {
        for graph in [complete(4), path(4), empty(3), empty(0), empty(1), star(3)] {
            assert!(graph.is_chordal_mcs());
            assert!(graph.is_chordal_bucket_mcs());
        }
        for graph in [cycle(4), cycle(5), cycle(6)] {
            assert!(!graph.is_chordal_mcs());
            assert!(!graph.is_chordal_bucket_mcs());
        }
        // a 4-cycle with one chord
        assert!(collect!(4; (1, 2), (2, 3), (3, 4), (4, 1), (1, 3)).is_chordal());
        // the complement of C4 is a matching, C5 is self-complementary
        assert!(cycle(4).is_co_chordal());
        assert!(!cycle(5).is_co_chordal());
        assert!(!collect!(4; (1, 2), (3, 4)).is_co_chordal());
    }

    #[test]
    fn mcs_tie_break() {
        // all weights are zero at the start, so the largest label is picked first
        let ordering = empty(4).mcs_ordering();
        assert_eq!(ordering.order(), &[0, 1, 2, 3]);
        assert_eq!(ordering.rank(3), 4);
        let ordering = path(3).mcs_ordering();
        assert_eq!(ordering.order(), &[0, 1, 2]);
    }

    #[test]
    fn exhaustive_small() {
        for n in 0..=5 {
            for graph in all_graphs(n) {
                let expected = brute_force_chordal(&graph);
                assert_eq!(graph.is_chordal_mcs(), expected, "{graph:?}");
                assert_eq!(graph.is_chordal_bucket_mcs(), expected, "{graph:?}");
            }
        }
    }

    #[test]
    fn random_agree() {
        let rng = &mut Pcg64::seed_from_u64(42);
        for _ in 0..300 {
            let graph = random_graph(12, 0.4, rng);
            let mcs = graph.mcs_ordering();
            let bucket = graph.bucket_mcs_ordering();
            assert_eq!(mcs.is_perfect(&graph), bucket.is_perfect(&graph));
            if let Some(peo) = graph.perfect_elimination_ordering() {
                for v in graph.iter_nodes() {
                    assert!(graph.set_is_clique(&peo.later_neighbours(&graph, v)));
                }
            }
        }
    }
}
