//! Strongly chordal graphs by deleting simple nodes (Farber): a node is simple if the
//! closed neighbourhoods of its neighbours form a chain under inclusion, which in
//! particular makes it simplicial.

use bitvec::{slice::BitSlice, vec::BitVec};

use crate::graph::{AdjMatrix, Graph, Node, VNodes};

impl Graph {
    pub fn is_strongly_chordal(&self) -> bool {
        self.is_strongly_chordal_peo_matrix()
    }

    fn alive_neighbours(&self, node: Node, alive: &BitSlice) -> VNodes {
        self.neighbours(node).iter().copied().filter(|&v| alive[v]).collect()
    }

    /// N[x] ⊆ N[y] among the alive nodes.
    fn closed_neighbourhood_subset(&self, x: Node, y: Node, alive: &BitSlice) -> bool {
        (x == y || self.is_adjacent(x, y))
            && self
                .neighbours(x)
                .iter()
                .all(|&z| !alive[z] || z == y || self.is_adjacent(y, z))
    }

    fn is_simple(&self, node: Node, alive: &BitSlice) -> bool {
        let neighbours = self.alive_neighbours(node, alive);
        neighbours.iter().enumerate().all(|(i, &x)| {
            neighbours[i + 1..].iter().all(|&y| self.is_adjacent(x, y))
        }) && neighbours.iter().enumerate().all(|(i, &x)| {
            neighbours[i + 1..].iter().all(|&y| {
                self.closed_neighbourhood_subset(x, y, alive)
                    || self.closed_neighbourhood_subset(y, x, alive)
            })
        })
    }

    /// Scans all alive nodes for a simple one in every round, comparing all pairs of
    /// neighbours.
    pub fn is_strongly_chordal_strong_elimination(&self) -> bool {
        if !self.is_chordal() {
            return false;
        }
        let mut alive = BitVec::<usize>::repeat(true, self.len());
        for _ in self.iter_nodes() {
            let Some(pick) = alive.iter_ones().find(|&v| self.is_simple(v, &alive)) else {
                return false;
            };
            alive.set(pick, false);
        }
        true
    }

    /// Same elimination with an adjacency matrix; for a simplicial node it suffices to
    /// compare neighbours that are consecutive when sorted by their alive degree.
    pub fn is_strongly_chordal_peo_matrix(&self) -> bool {
        if self.len() <= 1 {
            return true;
        }
        if !self.is_chordal() {
            return false;
        }
        let matrix = self.adjacency_matrix();
        let mut alive = BitVec::<usize>::repeat(true, self.len());
        let mut degree: Vec<usize> = self.iter_nodes().map(|v| self.degree(v)).collect();

        for _ in self.iter_nodes() {
            let Some(pick) =
                alive.iter_ones().find(|&v| is_simple_matrix(&matrix, &alive, &degree, v))
            else {
                return false;
            };
            alive.set(pick, false);
            for &neighbour in self.neighbours(pick) {
                degree[neighbour] -= 1;
            }
        }
        true
    }
}

fn is_simple_matrix(matrix: &AdjMatrix, alive: &BitSlice, degree: &[usize], node: Node) -> bool {
    let mut neighbours: VNodes = matrix.row(node).iter_ones().filter(|&v| alive[v]).collect();
    let simplicial = neighbours.iter().enumerate().all(|(i, &x)| {
        neighbours[i + 1..].iter().all(|&y| matrix.contains(x, y))
    });
    if !simplicial {
        return false;
    }
    neighbours.sort_by_key(|&v| degree[v]);
    // the neighbours are pairwise adjacent, so N[x] ⊆ N[y] is N(x) - y ⊆ N(y)
    neighbours.windows(2).all(|w| {
        let (x, y) = (w[0], w[1]);
        matrix
            .row(x)
            .iter_ones()
            .all(|z| !alive[z] || z == y || matrix.contains(y, z))
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::graph::test_utils::*;

    fn sun() -> Graph {
        collect!(6; (1, 2), (2, 3), (3, 1), (4, 1), (4, 2), (5, 2), (5, 3), (6, 3), (6, 1))
    }

    #[test]
    fn known_instances() {
        for graph in [complete(5), path(5), star(4), empty(3), empty(0)] {
            assert!(graph.is_strongly_chordal_strong_elimination(), "{graph:?}");
            assert!(graph.is_strongly_chordal_peo_matrix(), "{graph:?}");
        }
        // the 3-sun is chordal, but none of its nodes is simple
        let sun = sun();
        assert!(sun.is_chordal());
        assert!(!sun.is_strongly_chordal_strong_elimination());
        assert!(!sun.is_strongly_chordal_peo_matrix());
        assert!(!cycle(4).is_strongly_chordal_peo_matrix());
    }

    #[test]
    fn variants_agree() {
        for n in 0..=6 {
            for graph in all_graphs(n) {
                assert_eq!(
                    graph.is_strongly_chordal_strong_elimination(),
                    graph.is_strongly_chordal_peo_matrix(),
                    "{graph:?}"
                );
            }
        }
        let rng = &mut Pcg64::seed_from_u64(37);
        for _ in 0..300 {
            let graph = random_graph(11, 0.6, rng);
            let strongly = graph.is_strongly_chordal();
            assert_eq!(strongly, graph.is_strongly_chordal_strong_elimination());
            // interval graphs are strongly chordal
            if graph.is_interval() {
                assert!(strongly, "{graph:?}");
            }
        }
    }
}
