//! Bipartite graphs, and chain graphs (bipartite with nested neighbourhoods on one side,
//! equivalently 2K2-free bipartite) together with their complements.

use std::collections::VecDeque;

use crate::graph::{Graph, Node, VNodes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Whether `a` is a subset of `b`; both sorted.
fn is_subset(a: &[Node], b: &[Node]) -> bool {
    let mut b = b.iter();
    a.iter().all(|x| b.any(|y| y == x))
}

impl Graph {
    /// A proper 2-colouring by BFS; the smallest node of every component is on the left.
    pub fn bipartition(&self) -> Option<Vec<Side>> {
        self.two_colouring(|node| self.neighbours(node).to_vec())
    }

    fn two_colouring(&self, neighbours: impl Fn(Node) -> VNodes) -> Option<Vec<Side>> {
        let mut side: Vec<Option<Side>> = vec![None; self.len()];
        let mut queue = VecDeque::new();
        for start in self.iter_nodes() {
            if side[start].is_some() {
                continue;
            }
            side[start] = Some(Side::Left);
            queue.push_back(start);
            while let Some(node) = queue.pop_front() {
                let other = side[node].map(Side::other);
                for neighbour in neighbours(node) {
                    match side[neighbour] {
                        None => {
                            side[neighbour] = other;
                            queue.push_back(neighbour);
                        },
                        Some(s) if Some(s) != other => return None,
                        Some(_) => {},
                    }
                }
            }
        }
        Some(side.into_iter().map(|s| s.unwrap_or(Side::Left)).collect())
    }

    pub fn is_bipartite(&self) -> bool {
        self.bipartition().is_some()
    }

    fn left_side(&self) -> Option<VNodes> {
        let side = self.bipartition()?;
        Some(self.iter_nodes().filter(|&v| side[v] == Side::Left).collect())
    }

    pub fn is_chain(&self) -> bool {
        self.is_chain_degree_sort()
    }

    /// Sorted by decreasing degree, every neighbourhood of the left side has to contain
    /// the next one.
    pub fn is_chain_degree_sort(&self) -> bool {
        let Some(mut left) = self.left_side() else {
            return false;
        };
        left.sort_by_key(|&v| std::cmp::Reverse(self.degree(v)));
        left.windows(2)
            .all(|w| is_subset(self.neighbours(w[1]), self.neighbours(w[0])))
    }

    /// Pairwise comparison of the left neighbourhoods.
    pub fn is_chain_neighbourhood_inclusion(&self) -> bool {
        let Some(left) = self.left_side() else {
            return false;
        };
        left.iter().enumerate().all(|(i, &u)| {
            left[i + 1..].iter().all(|&v| {
                let (nu, nv) = (self.neighbours(u), self.neighbours(v));
                is_subset(nu, nv) || is_subset(nv, nu)
            })
        })
    }

    pub fn is_cochain(&self) -> bool {
        self.is_cochain_direct()
    }

    pub fn is_cochain_complement(&self) -> bool {
        self.complement().is_chain()
    }

    /// The complement is bipartite iff the nodes split into two cliques; its left
    /// neighbourhoods are nested iff the neighbourhoods into the other clique are.
    pub fn is_cochain_direct(&self) -> bool {
        let Some(side) = self.two_colouring(|node| {
            self.iter_nodes()
                .filter(|&other| other != node && !self.is_adjacent(node, other))
                .collect()
        }) else {
            return false;
        };
        let across = |node: Node| -> VNodes {
            self.neighbours(node)
                .iter()
                .copied()
                .filter(|&other| side[other] == Side::Right)
                .collect()
        };
        let mut left: Vec<VNodes> = self
            .iter_nodes()
            .filter(|&v| side[v] == Side::Left)
            .map(across)
            .collect();
        left.sort_by_key(|neighbours| std::cmp::Reverse(neighbours.len()));
        left.windows(2).all(|w| is_subset(&w[1], &w[0]))
    }
}
