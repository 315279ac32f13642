//! Trapezoid graphs are the co-comparability graphs whose complement, as a partial order,
//! has interval dimension at most two.

use std::collections::VecDeque;

use bitvec::vec::BitVec;

use crate::graph::{Edge, Graph};

impl Graph {
    pub fn is_trapezoid(&self) -> bool {
        self.is_trapezoid_chain_cover()
    }

    /// Every ordered pair (x, y) with x not below y has to be reversed in one of two
    /// interval extensions of the order. Two such pairs with x1 < y2 and x2 < y1 form a
    /// 2 + 2 and cannot share an extension, so the pairs have to be 2-colourable.
    pub fn is_trapezoid_chain_cover(&self) -> bool {
        let n = self.len();
        if n <= 2 {
            return true;
        }
        let Some(arcs) = self.complement().transitive_orientation() else {
            return false;
        };
        let mut below = vec![BitVec::<usize>::repeat(false, n); n];
        for (a, b) in arcs {
            below[a].set(b, true);
        }

        let pairs: Vec<Edge> = self
            .iter_nodes()
            .flat_map(|x| self.iter_nodes().map(move |y| (x, y)))
            .filter(|&(x, y)| x != y && !below[x][y])
            .collect();
        let conflicting = |(x1, y1): Edge, (x2, y2): Edge| {
            x1 != x2 && x1 != y2 && y1 != x2 && y1 != y2 && below[x1][y2] && below[x2][y1]
        };

        let mut colour: Vec<Option<bool>> = vec![None; pairs.len()];
        let mut queue = VecDeque::new();
        for start in 0..pairs.len() {
            if colour[start].is_some() {
                continue;
            }
            colour[start] = Some(false);
            queue.push_back(start);
            while let Some(i) = queue.pop_front() {
                let other = colour[i].map(|c| !c);
                for j in 0..pairs.len() {
                    if j == i || !conflicting(pairs[i], pairs[j]) {
                        continue;
                    }
                    match colour[j] {
                        None => {
                            colour[j] = other;
                            queue.push_back(j);
                        },
                        Some(c) if Some(c) != other => return false,
                        Some(_) => {},
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::graph::test_utils::*;

    #[test]
    fn known_instances() {
        for graph in [complete(4), path(5), cycle(4), empty(4), empty(0), star(4)] {
            assert!(graph.is_trapezoid(), "{graph:?}");
        }
        // long holes are not even co-comparability graphs
        for graph in [cycle(5), cycle(6)] {
            assert!(!graph.is_trapezoid(), "{graph:?}");
        }
    }

    #[test]
    fn contains_interval_and_permutation() {
        let rng = &mut Pcg64::seed_from_u64(47);
        for _ in 0..300 {
            let graph = random_graph(8, 0.5, rng);
            let trapezoid = graph.is_trapezoid();
            if graph.is_interval() || graph.is_permutation() {
                assert!(trapezoid, "{graph:?}");
            }
            if trapezoid {
                assert!(graph.is_co_comparability(), "{graph:?}");
            }
        }
    }
}
