//! Chordal bipartite graphs: bipartite graphs without induced cycles of length at least
//! six.

use std::collections::VecDeque;

use bitvec::vec::BitVec;

use super::bipartite::Side;
use crate::graph::{Graph, Node, VNodes};

impl Graph {
    pub fn is_chordal_bipartite(&self) -> bool {
        self.is_chordal_bipartite_fast_bisimplicial()
    }

    /// Every long induced cycle has an edge uv with cycle neighbours x of u and y of v,
    /// such that the rest of the cycle is a shortest x-y path avoiding N(u) and N(v).
    pub fn is_chordal_bipartite_cycle_check(&self) -> bool {
        let Some(side) = self.bipartition() else {
            return false;
        };
        let n = self.len();
        let mut blocked = BitVec::<usize>::repeat(false, n);
        let mut dist = vec![usize::MAX; n];
        let mut queue = VecDeque::new();

        for u in self.iter_nodes().filter(|&u| side[u] == Side::Left) {
            if self.degree(u) < 2 {
                continue;
            }
            for &v in self.neighbours(u).iter().filter(|&&v| self.degree(v) >= 2) {
                blocked.fill(false);
                for &w in self.neighbours(u).iter().chain(self.neighbours(v)) {
                    blocked.set(w, true);
                }
                for &x in self.neighbours(u).iter().filter(|&&x| x != v) {
                    for &y in self.neighbours(v).iter().filter(|&&y| y != u) {
                        dist.fill(usize::MAX);
                        dist[x] = 0;
                        queue.clear();
                        queue.push_back(x);
                        while let Some(cur) = queue.pop_front() {
                            if cur == y {
                                break;
                            }
                            for &next in self.neighbours(cur) {
                                if dist[next] != usize::MAX || (blocked[next] && next != y) {
                                    continue;
                                }
                                dist[next] = dist[cur] + 1;
                                queue.push_back(next);
                            }
                        }
                        // u-x-...-y-v-u has length dist + 3
                        if dist[y] != usize::MAX && dist[y] >= 3 {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    /// Repeatedly delete a bisimplicial edge (without its endpoints). Deleting such an
    /// edge creates no long induced cycle, and no edge of a long induced cycle is
    /// bisimplicial, so the deletion gets stuck iff there is such a cycle.
    pub fn is_chordal_bipartite_bisimplicial(&self) -> bool {
        if !self.is_bipartite() {
            return false;
        }
        let mut matrix = self.adjacency_matrix();
        let mut edges: Vec<(Node, Node)> = self.iter_edges().collect();
        while !edges.is_empty() {
            let bisimplicial = edges.iter().position(|&(u, v)| {
                matrix.row(u).iter_ones().all(|a| {
                    a == v || matrix.row(v).iter_ones().all(|b| b == u || matrix.contains(a, b))
                })
            });
            let Some(pos) = bisimplicial else {
                return false;
            };
            let (u, v) = edges.swap_remove(pos);
            matrix.set(u, v, false);
        }
        true
    }

    /// Lubiw: the bi-adjacency matrix is totally balanced iff it is free of
    /// [[1, 1], [1, 0]] in a doubly lexical ordering. Γ is its own transpose, so one
    /// orientation of the matrix suffices.
    pub fn is_chordal_bipartite_fast_bisimplicial(&self) -> bool {
        let Some(side) = self.bipartition() else {
            return false;
        };
        if self.len() <= 2 {
            return true;
        }
        let rows: VNodes = self.iter_nodes().filter(|&v| side[v] == Side::Left).collect();
        let columns: VNodes = self.iter_nodes().filter(|&v| side[v] == Side::Right).collect();
        match self.doubly_lexical_ordering(rows, columns) {
            Some((rows, columns)) => self.is_gamma_free(&rows, &columns),
            None => self.is_chordal_bipartite_bisimplicial(),
        }
    }

    /// Rows and columns both in increasing lexical order, where a vector is read from its
    /// last position (the last position is the most significant one). Alternately sorts
    /// rows and columns until neither changes; `None` if that does not settle within the
    /// round limit.
    fn doubly_lexical_ordering(
        &self,
        mut rows: VNodes,
        mut columns: VNodes,
    ) -> Option<(VNodes, VNodes)> {
        let n = self.len();
        let mut position = vec![0; n];
        let sort = |order: &mut VNodes, other: &[Node], position: &mut Vec<usize>| -> bool {
            for (pos, &node) in other.iter().enumerate() {
                position[node] = pos;
            }
            let len = other.len();
            let key = |node: Node| -> BitVec {
                let mut key = BitVec::repeat(false, len);
                for &neighbour in self.neighbours(node) {
                    key.set(len - 1 - position[neighbour], true);
                }
                key
            };
            let mut keyed: Vec<(BitVec, Node)> = order.iter().map(|&v| (key(v), v)).collect();
            // stable, so equal rows keep their relative order and the rounds settle
            keyed.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: VNodes = keyed.into_iter().map(|(_, v)| v).collect();
            let changed = sorted != *order;
            *order = sorted;
            changed
        };
        for _ in 0..(n * n + 2) {
            let rows_changed = sort(&mut rows, columns.as_slice(), &mut position);
            let columns_changed = sort(&mut columns, rows.as_slice(), &mut position);
            if !rows_changed && !columns_changed {
                return Some((rows, columns));
            }
        }
        None
    }

    /// No rows i1 < i2 and columns j1 < j2 with ones at (i1, j1), (i1, j2), (i2, j1) and a
    /// zero at (i2, j2).
    fn is_gamma_free(&self, rows: &[Node], columns: &[Node]) -> bool {
        let mut position = vec![usize::MAX; self.len()];
        for (pos, &node) in columns.iter().enumerate() {
            position[node] = pos;
        }
        let row_columns: Vec<VNodes> = rows
            .iter()
            .map(|&row| {
                let mut cols: VNodes =
                    self.neighbours(row).iter().map(|&c| position[c]).collect();
                cols.sort_unstable();
                cols
            })
            .collect();
        let matrix = self.adjacency_matrix();
        (0..rows.len()).all(|i| {
            rows[i + 1..].iter().all(|&lower| {
                let mut shared = false;
                row_columns[i].iter().all(|&col| {
                    if matrix.contains(lower, columns[col]) {
                        shared = true;
                        true
                    } else {
                        !shared
                    }
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    use super::*;
    use crate::graph::test_utils::*;

    fn all_variants(graph: &Graph) -> bool {
        let cycles = graph.is_chordal_bipartite_cycle_check();
        assert_eq!(cycles, graph.is_chordal_bipartite_bisimplicial(), "{graph:?}");
        assert_eq!(cycles, graph.is_chordal_bipartite_fast_bisimplicial(), "{graph:?}");
        cycles
    }

    #[test]
    fn known_instances() {
        for graph in [cycle(4), path(6), star(4), complete_bipartite(3, 3), empty(2), empty(0)] {
            assert!(all_variants(&graph), "{graph:?}");
        }
        for graph in [cycle(6), cycle(8), cycle(3), complete(4)] {
            assert!(!all_variants(&graph), "{graph:?}");
        }
        // a domino (two squares sharing an edge) has no induced C6
        let domino = collect!(6; (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 1), (2, 5));
        assert!(all_variants(&domino));
    }

    #[test]
    fn trees() {
        // the path 6-1-4-2-5-3, and a tree plus an isolated vertex
        let path = collect!(6; (1, 4), (1, 6), (2, 4), (2, 5), (3, 5));
        assert!(path.is_chordal_bipartite());
        assert!(all_variants(&path));
        let spider = collect!(9; (1, 8), (1, 9), (2, 6), (3, 6), (3, 7), (3, 8), (4, 6));
        assert!(spider.is_chordal_bipartite());
        assert!(all_variants(&spider));

        let rng = &mut Pcg64::seed_from_u64(59);
        for _ in 0..200 {
            let n = rng.gen_range(1..=14);
            let tree = Graph::from_edges_unchecked(
                n,
                (1..n).map(|child| (rng.gen_range(0..child), child)).collect::<Vec<_>>(),
            );
            assert!(tree.is_chordal_bipartite_fast_bisimplicial(), "{tree:?}");
        }
    }

    #[test]
    fn exhaustive_small() {
        for n in 0..=6 {
            for graph in all_graphs(n).filter(|g| g.is_bipartite()) {
                all_variants(&graph);
            }
        }
    }

    #[test]
    fn random_agree() {
        let rng = &mut Pcg64::seed_from_u64(31);
        for _ in 0..300 {
            // sparse, so that a good share is bipartite
            let graph = random_graph(10, 0.2, rng);
            all_variants(&graph);
        }
    }
}
