//! Small forbidden induced subgraphs: the claw K_{1,3}, the net and the tent (3-sun).
//!
//! Among chordal graphs, being free of all three characterises proper interval graphs.

use itertools::Itertools;

use crate::graph::{Graph, Node, VNodes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claw {
    pub center: Node,
    pub leaves: [Node; 3],
}

/// A triangle with three pairwise non-adjacent attachments. For a net, `attachments[i]`
/// is adjacent to `triangle[i]` only; for a tent, `attachments[i]` is adjacent to
/// `triangle[i]` and `triangle[(i + 1) % 3]` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoratedTriangle {
    pub triangle: [Node; 3],
    pub attachments: [Node; 3],
}

impl Graph {
    /// Naive search: a claw centered at v is an independent triple in N(v).
    pub fn find_claw(&self) -> Option<Claw> {
        for (center, neighbourhood) in self.iter_with_neighbourhoods() {
            if neighbourhood.len() < 3 {
                continue;
            }
            for (a, b) in neighbourhood.iter().copied().tuple_combinations() {
                if self.is_adjacent(a, b) {
                    continue;
                }
                for &c in neighbourhood.iter().filter(|&&c| c > b) {
                    if !self.is_adjacent(a, c) && !self.is_adjacent(b, c) {
                        return Some(Claw { center, leaves: [a, b, c] });
                    }
                }
            }
        }
        None
    }

    pub fn is_claw_free(&self) -> bool {
        self.find_claw().is_none()
    }

    pub fn find_net(&self) -> Option<DecoratedTriangle> {
        self.find_decorated_triangle(|graph, triangle, i| {
            let (a, b, c) = (triangle[i], triangle[(i + 1) % 3], triangle[(i + 2) % 3]);
            graph
                .neighbours(a)
                .iter()
                .copied()
                .filter(|&x| {
                    x != b && x != c && !graph.is_adjacent(x, b) && !graph.is_adjacent(x, c)
                })
                .collect()
        })
    }

    pub fn find_tent(&self) -> Option<DecoratedTriangle> {
        self.find_decorated_triangle(|graph, triangle, i| {
            let (a, b, c) = (triangle[i], triangle[(i + 1) % 3], triangle[(i + 2) % 3]);
            graph
                .neighbours(a)
                .iter()
                .copied()
                .filter(|&x| {
                    x != b && x != c && graph.is_adjacent(x, b) && !graph.is_adjacent(x, c)
                })
                .collect()
        })
    }

    /// Chordal and no induced claw, net or tent.
    pub fn is_proper_interval_fast_claw_check(&self) -> bool {
        self.is_chordal()
            && self.is_claw_free()
            && self.find_net().is_none()
            && self.find_tent().is_none()
    }

    // `candidates(graph, triangle, i)` are the possible attachments at position i; they
    // are disjoint for different i by construction
    fn find_decorated_triangle(
        &self,
        candidates: impl Fn(&Self, [Node; 3], usize) -> VNodes,
    ) -> Option<DecoratedTriangle> {
        for a in self.iter_nodes() {
            for (b, c) in self
                .neighbours(a)
                .iter()
                .copied()
                .filter(|&b| b > a)
                .tuple_combinations()
            {
                if !self.is_adjacent(b, c) {
                    continue;
                }
                let triangle = [a, b, c];
                let [xs, ys, zs] = [0, 1, 2].map(|i| candidates(self, triangle, i));
                for &x in xs.iter() {
                    for &y in ys.iter().filter(|&&y| !self.is_adjacent(x, y)) {
                        if let Some(&z) = zs
                            .iter()
                            .find(|&&z| !self.is_adjacent(x, z) && !self.is_adjacent(y, z))
                        {
                            return Some(DecoratedTriangle {
                                triangle,
                                attachments: [x, y, z],
                            });
                        }
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::*;

    fn net() -> Graph {
        collect!(6; (1, 2), (2, 3), (1, 3), (1, 4), (2, 5), (3, 6))
    }

    fn tent() -> Graph {
        collect!(6; (1, 2), (2, 3), (1, 3), (1, 4), (2, 4), (2, 5), (3, 5), (3, 6), (1, 6))
    }

    #[test]
    fn claw() {
        let claw = star(3).find_claw().unwrap();
        assert_eq!(claw.center, 0);
        assert_eq!(claw.leaves, [1, 2, 3]);
        assert!(star(2).is_claw_free());
        assert!(complete(5).is_claw_free());
        assert!(cycle(6).is_claw_free());
        // the claw is induced only if the leaves are independent
        assert!(collect!(4; (1, 2), (1, 3), (1, 4), (2, 3)).is_claw_free());
    }

    #[test]
    fn net_and_tent() {
        let found = net().find_net().unwrap();
        assert_eq!(found.triangle, [0, 1, 2]);
        assert_eq!(found.attachments, [3, 4, 5]);
        assert!(net().find_tent().is_none());
        assert!(net().is_claw_free());

        let found = tent().find_tent().unwrap();
        assert_eq!(found.triangle, [0, 1, 2]);
        assert_eq!(found.attachments, [3, 4, 5]);
        assert!(tent().find_net().is_none());
        assert!(tent().is_claw_free());

        // an edge between two attachments destroys the net
        let graph = collect!(6; (1, 2), (2, 3), (1, 3), (1, 4), (2, 5), (3, 6), (4, 5));
        assert!(graph.find_net().is_none());
    }

    #[test]
    fn proper_interval() {
        for graph in [path(5), complete(4), empty(3), empty(0)] {
            assert!(graph.is_proper_interval_fast_claw_check());
        }
        for graph in [star(3), net(), tent(), cycle(4)] {
            assert!(!graph.is_proper_interval_fast_claw_check());
        }
    }
}
