//! Classes that are decided by (almost) only looking at the degrees: split and threshold
//! graphs.

use crate::graph::{Graph, Node};

impl Graph {
    /// Degrees sorted in decreasing order.
    pub fn degree_sequence(&self) -> Vec<usize> {
        let mut ret: Vec<usize> = self.iter_nodes().map(|v| self.degree(v)).collect();
        ret.sort_unstable_by(|a, b| b.cmp(a));
        ret
    }

    pub fn is_split(&self) -> bool {
        self.is_split_hammer_simeone()
    }

    /// With d_1 >= ... >= d_n and m = max{i : d_i >= i - 1}, the graph is split iff
    /// sum_{i <= m} d_i = m(m - 1) + sum_{i > m} d_i.
    pub fn is_split_hammer_simeone(&self) -> bool {
        let degrees = self.degree_sequence();
        // 1-based i, so d_i >= i - 1 is degrees[i - 1] >= i - 1
        let m = degrees.iter().enumerate().filter(|&(i, &d)| d >= i).map(|(i, _)| i + 1).max();
        let Some(m) = m else {
            return true;
        };
        let head: usize = degrees[..m].iter().sum();
        let tail: usize = degrees[m..].iter().sum();
        head == m * (m - 1) + tail
    }

    /// Split iff the graph and its complement are chordal (Földes and Hammer).
    pub fn is_split_degree_sequence(&self) -> bool {
        self.is_chordal() && self.complement().is_chordal()
    }

    pub fn is_threshold(&self) -> bool {
        self.is_threshold_degree_sequence_fast()
    }

    /// Repeatedly delete an isolated or dominating node, lowest label first.
    pub fn is_threshold_degree_sequence(&self) -> bool {
        let mut alive = vec![true; self.len()];
        let mut degree: Vec<usize> = self.iter_nodes().map(|v| self.degree(v)).collect();
        for remaining in (1..=self.len()).rev() {
            let Some(pick) = self
                .iter_nodes()
                .find(|&v| alive[v] && (degree[v] == 0 || degree[v] == remaining - 1))
            else {
                return false;
            };
            alive[pick] = false;
            for &neighbour in self.neighbours(pick) {
                degree[neighbour] -= 1;
            }
        }
        true
    }

    /// The same elimination on the sorted degree sequence: isolated nodes are at the end,
    /// dominating nodes at the front, and deleting a dominating node lowers all remaining
    /// degrees by one. This works on the sequence alone, since threshold graphs are
    /// determined by their degree sequence.
    pub fn is_threshold_degree_sequence_fast(&self) -> bool {
        let degrees = self.degree_sequence();
        let (mut front, mut back) = (0, degrees.len());
        let mut removed_dominating = 0;
        while front < back {
            let remaining = back - front;
            if degrees[back - 1] == removed_dominating {
                back -= 1;
            } else if degrees[front] - removed_dominating == remaining - 1 {
                front += 1;
                removed_dominating += 1;
            } else {
                return false;
            }
        }
        true
    }

    /// A clique and an independent set partitioning the nodes, if the graph is split;
    /// the clique consists of the m nodes of highest degree.
    pub fn split_partition(&self) -> Option<(Vec<Node>, Vec<Node>)> {
        if !self.is_split_hammer_simeone() {
            return None;
        }
        let mut nodes: Vec<Node> = self.iter_nodes().collect();
        nodes.sort_by(|&a, &b| self.degree(b).cmp(&self.degree(a)).then(a.cmp(&b)));
        let m = nodes
            .iter()
            .enumerate()
            .filter(|&(i, &v)| self.degree(v) >= i)
            .map(|(i, _)| i + 1)
            .max()
            .unwrap_or(0);
        let independent = nodes.split_off(m);
        debug_assert!(self.set_is_clique(&nodes) && self.set_is_independent(&independent));
        Some((nodes, independent))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::graph::test_utils::*;

    #[test]
    fn split() {
        for graph in [star(3), complete(4), empty(3), empty(0), path(3), path(4)] {
            assert!(graph.is_split_hammer_simeone(), "{graph:?}");
            assert!(graph.is_split_degree_sequence(), "{graph:?}");
        }
        // 2K2, C4 and C5 are the forbidden subgraphs
        let two_edges = collect!(4; (1, 2), (3, 4));
        for graph in [two_edges, cycle(4), cycle(5)] {
            assert!(!graph.is_split_hammer_simeone(), "{graph:?}");
            assert!(!graph.is_split_degree_sequence(), "{graph:?}");
        }
        let (clique, independent) = star(3).split_partition().unwrap();
        assert_eq!(clique, vec![0, 1]);
        assert_eq!(independent, vec![2, 3]);
    }

    #[test]
    fn threshold() {
        for graph in [star(3), complete(4), empty(3), empty(0), path(3)] {
            assert!(graph.is_threshold_degree_sequence(), "{graph:?}");
            assert!(graph.is_threshold_degree_sequence_fast(), "{graph:?}");
        }
        for graph in [path(4), cycle(4), collect!(4; (1, 2), (3, 4))] {
            assert!(!graph.is_threshold_degree_sequence(), "{graph:?}");
            assert!(!graph.is_threshold_degree_sequence_fast(), "{graph:?}");
        }
    }

    #[test]
    fn exhaustive_small() {
        for n in 0..=6 {
            for graph in all_graphs(n) {
                let split = graph.is_split_hammer_simeone();
                assert_eq!(split, graph.is_split_degree_sequence(), "{graph:?}");
                assert_eq!(split, graph.split_partition().is_some());
                let threshold = graph.is_threshold_degree_sequence();
                assert_eq!(threshold, graph.is_threshold_degree_sequence_fast(), "{graph:?}");
                // threshold = split and cograph
                assert_eq!(threshold, split && graph.is_cograph(), "{graph:?}");
            }
        }
    }

    #[test]
    fn random_agree() {
        let rng = &mut Pcg64::seed_from_u64(29);
        for _ in 0..500 {
            let graph = random_graph(12, 0.5, rng);
            assert_eq!(graph.is_split_hammer_simeone(), graph.is_split_degree_sequence());
        }
    }
}
