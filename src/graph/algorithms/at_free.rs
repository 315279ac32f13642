use std::collections::VecDeque;

use crate::graph::{Graph, Node};

const BLOCKED: usize = usize::MAX;

impl Graph {
    /// For every v, the component index of each node in G - N[v] (or [BLOCKED]).
    fn components_avoiding_closed_neighbourhoods(&self) -> Vec<Vec<usize>> {
        let n = self.len();
        let mut ret = Vec::with_capacity(n);
        let mut queue = VecDeque::new();
        for v in self.iter_nodes() {
            let mut component = vec![None; n];
            component[v] = Some(BLOCKED);
            for &u in self.neighbours(v) {
                component[u] = Some(BLOCKED);
            }
            let mut label = 0;
            for start in self.iter_nodes() {
                if component[start].is_some() {
                    continue;
                }
                component[start] = Some(label);
                queue.push_back(start);
                while let Some(node) = queue.pop_front() {
                    for &next in self.neighbours(node) {
                        if component[next].is_none() {
                            component[next] = Some(label);
                            queue.push_back(next);
                        }
                    }
                }
                label += 1;
            }
            // every node got a label or was blocked
            ret.push(component.into_iter().map(|c| c.unwrap_or(BLOCKED)).collect());
        }
        ret
    }

    /// Three nodes such that each pair is joined by a path avoiding the closed
    /// neighbourhood of the third.
    pub fn find_asteroidal_triple(&self) -> Option<[Node; 3]> {
        let n = self.len();
        if n < 3 {
            return None;
        }
        let comp = self.components_avoiding_closed_neighbourhoods();
        let joined = |avoid: Node, x: Node, y: Node| {
            comp[avoid][x] != BLOCKED && comp[avoid][x] == comp[avoid][y]
        };
        for a in 0..n {
            for b in a + 1..n {
                if !joined(a, b, b) {
                    continue;
                }
                for c in b + 1..n {
                    if joined(a, b, c) && joined(b, a, c) && joined(c, a, b) {
                        return Some([a, b, c]);
                    }
                }
            }
        }
        None
    }

    pub fn is_at_free(&self) -> bool {
        self.find_asteroidal_triple().is_none()
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::test_utils::*;

    #[test]
    fn asteroidal_triples() {
        // the ends of the long claw (subdivided star)
        let long_claw = collect!(7; (1, 2), (2, 3), (1, 4), (4, 5), (1, 6), (6, 7));
        assert_eq!(long_claw.find_asteroidal_triple(), Some([2, 4, 6]));
        assert!(!cycle(6).is_at_free());
        for graph in [path(6), cycle(4), cycle(5), complete(4), star(3), empty(2)] {
            assert!(graph.is_at_free(), "{graph:?}");
        }
        // three isolated nodes are not joined at all
        assert!(empty(3).is_at_free());
    }
}
