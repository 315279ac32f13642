//! Circular-arc graphs via the circular ones property of the clique matrix: the maximal
//! cliques can be arranged on a circle such that the cliques containing any node form an
//! arc (Gavril). This characterises the Helly circular-arc graphs; every interval graph
//! qualifies, and a disconnected graph qualifies iff all its components are interval.

use bitvec::vec::BitVec;

use super::{cliques::CliqueSet, pq_tree};
use crate::graph::{Graph, Node, VNodes};

impl Graph {
    /// The maximal cliques, or `None` if there are more than 2n of them, which rules out
    /// a circular clique order.
    fn circular_arc_cliques(&self) -> Option<CliqueSet> {
        self.maximal_cliques(Some(2 * self.len()))
    }

    pub fn is_circular_arc(&self) -> bool {
        self.is_circular_arc_mcconnell()
    }

    /// Tucker's reduction: complementing every row that contains a fixed reference column
    /// turns the circular ones property into the consecutive ones property, which is
    /// decided by a PQ-tree.
    pub fn is_circular_arc_mcconnell(&self) -> bool {
        self.circular_clique_order().is_some()
    }

    /// A circular order of the maximal cliques in which every node's cliques form an arc.
    pub fn circular_clique_order(&self) -> Option<Vec<usize>> {
        if self.len() <= 2 {
            let k = self.maximal_cliques(None).map_or(0, |cliques| cliques.len());
            return Some((0..k).collect());
        }
        let cliques = self.circular_arc_cliques()?;
        let k = cliques.len();
        if k <= 2 {
            return Some((0..k).collect());
        }

        let rows: Vec<VNodes> = self
            .iter_nodes()
            .map(|node| {
                let member = cliques.member(node);
                // the reference column is clique 0
                if member.first() == Some(&0) {
                    let mut complement = Vec::with_capacity(k - member.len());
                    let mut member = member.iter().peekable();
                    for clique in 0..k {
                        if member.peek() == Some(&&clique) {
                            member.next();
                        } else {
                            complement.push(clique);
                        }
                    }
                    complement
                } else {
                    member.to_vec()
                }
            })
            .collect();
        let order = pq_tree::consecutive_ones_order(k, rows.iter().map(|r| r.as_slice()))?;
        debug_assert!(is_circular_order(&order, &cliques));
        Some(order)
    }

    /// Backtracking search for a circular clique order starting with clique 0.
    pub fn is_circular_arc_backtracking(&self) -> bool {
        if self.len() <= 2 {
            return true;
        }
        let Some(cliques) = self.circular_arc_cliques() else {
            return false;
        };
        if cliques.len() <= 2 {
            return true;
        }
        CircularSearch::new(&cliques).run()
    }
}

/// Whether the cliques of every node are circularly consecutive in `order`.
pub fn is_circular_order(order: &[usize], cliques: &CliqueSet) -> bool {
    let k = order.len();
    let mut position = vec![0; k];
    for (pos, &clique) in order.iter().enumerate() {
        position[clique] = pos;
    }
    (0..cliques.num_nodes()).all(|node| {
        let mut positions: Vec<usize> =
            cliques.member(node).iter().map(|&c| position[c]).collect();
        if positions.len() <= 1 {
            return true;
        }
        positions.sort_unstable();
        // exactly one gap (possibly across the end) has to hold all missing positions
        let wrap = k - 1 - positions[positions.len() - 1] + positions[0];
        let largest_gap = positions
            .windows(2)
            .map(|w| w[1] - w[0] - 1)
            .fold(wrap, usize::max);
        largest_gap == k - positions.len()
    })
}

/// Like the clique path search for interval graphs, but the nodes of the first clique may
/// leave and come back once: when they come back, all remaining cliques have to contain
/// them, which closes the arc over the end of the sequence.
struct CircularSearch<'a> {
    cliques: &'a CliqueSet,
    contains: Vec<BitVec>,
    order: Vec<usize>,
    placed: BitVec,
    in_first: BitVec,
    // nodes not in the first clique that already left; or nodes of the first clique that
    // left their initial run
    left: BitVec,
    unplaced: Vec<usize>,
}

impl<'a> CircularSearch<'a> {
    fn new(cliques: &'a CliqueSet) -> Self {
        let n = cliques.num_nodes();
        let contains = cliques
            .cliques()
            .iter()
            .map(|clique| {
                let mut row = BitVec::repeat(false, n);
                for &node in clique {
                    row.set(node, true);
                }
                row
            })
            .collect();
        Self {
            cliques,
            contains,
            order: Vec::with_capacity(cliques.len()),
            placed: BitVec::repeat(false, cliques.len()),
            in_first: BitVec::repeat(false, n),
            left: BitVec::repeat(false, n),
            unplaced: (0..n).map(|v| cliques.member(v).len()).collect(),
        }
    }

    fn run(&mut self) -> bool {
        self.in_first = self.contains[0].clone();
        self.place(0);
        self.extend()
    }

    fn place(&mut self, clique: usize) {
        self.order.push(clique);
        self.placed.set(clique, true);
        for &v in self.cliques.cliques()[clique].iter() {
            self.unplaced[v] -= 1;
        }
    }

    fn unplace(&mut self, clique: usize) {
        self.order.pop();
        self.placed.set(clique, false);
        for &v in self.cliques.cliques()[clique].iter() {
            self.unplaced[v] += 1;
        }
    }

    fn admissible(&self, current: usize, next: usize) -> bool {
        let remaining = self.cliques.len() - self.order.len();
        // nodes outside of the first clique cannot wrap around, so they have to continue
        let continues = self.cliques.cliques()[current].iter().all(|&v| {
            self.in_first[v] || self.unplaced[v] == 0 || self.contains[next][v]
        });
        continues
            && self.cliques.cliques()[next].iter().all(|&v| {
                if !self.left[v] {
                    true
                } else {
                    // a first clique node coming back stays until the end
                    self.in_first[v] && self.unplaced[v] == remaining
                }
            })
    }

    fn extend(&mut self) -> bool {
        if self.order.len() == self.cliques.len() {
            return true;
        }
        let Some(&current) = self.order.last() else {
            return false;
        };
        for next in 0..self.cliques.len() {
            if self.placed[next] || !self.admissible(current, next) {
                continue;
            }
            let newly_left: Vec<Node> = self.cliques.cliques()[current]
                .iter()
                .copied()
                .filter(|&v| !self.contains[next][v] && !self.left[v])
                .collect();
            for &v in newly_left.iter() {
                self.left.set(v, true);
            }
            self.place(next);
            if self.extend() {
                return true;
            }
            self.unplace(next);
            for &v in newly_left.iter() {
                self.left.set(v, false);
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::graph::test_utils::*;

    // `None` if there are too many cliques to try all orders
    fn brute_force(graph: &Graph) -> Option<bool> {
        if graph.len() <= 2 {
            return Some(true);
        }
        let Some(cliques) = graph.maximal_cliques(Some(2 * graph.len())) else {
            return Some(false);
        };
        let k = cliques.len();
        if k > 8 {
            return None;
        }
        Some((0..k).permutations(k).any(|order| is_circular_order(&order, &cliques)))
    }

    #[test]
    fn known_instances() {
        for graph in [complete(5), cycle(4), cycle(5), cycle(7), path(5), star(3), empty(4)] {
            assert!(graph.is_circular_arc_mcconnell(), "{graph:?}");
            assert!(graph.is_circular_arc_backtracking(), "{graph:?}");
        }
        // three disjoint arcs cannot all be crossed by three further disjoint arcs
        let k33 = complete_bipartite(3, 3);
        assert!(!k33.is_circular_arc_mcconnell());
        assert!(!k33.is_circular_arc_backtracking());
        // a cycle needs the whole circle, so nothing else fits
        let cycle_and_point = Graph::from_edges_unchecked(5, cycle(4).iter_edges());
        assert!(!cycle_and_point.is_circular_arc_mcconnell());
        assert!(!cycle_and_point.is_circular_arc_backtracking());
    }

    #[test]
    fn order_is_circular() {
        let graph = cycle(6);
        let order = graph.circular_clique_order().unwrap();
        let cliques = graph.maximal_cliques(None).unwrap();
        assert!(is_circular_order(&order, &cliques));
        assert!(!pq_tree::is_consecutive_order(
            &order,
            graph.iter_nodes().map(|v| cliques.member(v))
        ));
    }

    #[test]
    fn against_brute_force() {
        for n in 0..=5 {
            for graph in all_graphs(n) {
                let expected = brute_force(&graph).unwrap();
                assert_eq!(graph.is_circular_arc_mcconnell(), expected, "{graph:?}");
                assert_eq!(graph.is_circular_arc_backtracking(), expected, "{graph:?}");
            }
        }
        let rng = &mut Pcg64::seed_from_u64(13);
        for _ in 0..200 {
            let graph = random_graph(7, 0.5, rng);
            let Some(expected) = brute_force(&graph) else {
                continue;
            };
            assert_eq!(graph.is_circular_arc_mcconnell(), expected, "{graph:?}");
            assert_eq!(graph.is_circular_arc_backtracking(), expected, "{graph:?}");
        }
    }

    #[test]
    fn interval_graphs_are_circular_arc() {
        let rng = &mut Pcg64::seed_from_u64(17);
        for _ in 0..200 {
            let graph = random_graph(9, 0.6, rng);
            if graph.is_interval() {
                assert!(graph.is_circular_arc());
            }
        }
    }
}
