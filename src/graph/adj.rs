use std::ops::Range;

use itertools::Itertools;

use super::{
    to_label, to_node, AdjMatrix, Edge, InvalidGraph, Label, LabelEdge, Node, VNodes,
};

/// Immutable simple graph on the nodes `0..n`.
///
/// Externally, the nodes are the labels `1..=n` (see [Self::new] and
/// [Self::iter_label_edges]); every algorithm works on the compact indices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Graph {
    // sorted and without duplicates; we don't need the O(1) lookup of a hash set for
    // most of the algorithms, and if we do, we build an AdjMatrix
    nodes: Vec<VNodes>,
    num_edges: usize,
}

impl Graph {
    /// Build the graph on the labels `1..=n`. Duplicate edges (in either orientation)
    /// are merged.
    pub fn new(
        n: usize,
        edges: impl IntoIterator<Item = LabelEdge>,
    ) -> Result<Self, InvalidGraph> {
        let mut nodes = vec![Vec::new(); n];
        for (a, b) in edges {
            if a == 0 || b == 0 || a > n || b > n {
                return Err(InvalidGraph::OutOfRange { edge: (a, b), n });
            }
            if a == b {
                return Err(InvalidGraph::SelfLoop(a));
            }
            nodes[to_node(a)].push(to_node(b));
            nodes[to_node(b)].push(to_node(a));
        }
        Ok(Self::from_raw(nodes))
    }

    /// Like [Self::new], but on compact indices and without range checks; self loops
    /// are dropped.
    pub fn from_edges_unchecked(n: usize, edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut nodes = vec![Vec::new(); n];
        for (a, b) in edges {
            if a != b {
                nodes[a].push(b);
                nodes[b].push(a);
            }
        }
        Self::from_raw(nodes)
    }

    fn from_raw(mut nodes: Vec<VNodes>) -> Self {
        let mut num_edges = 0;
        for neighbours in nodes.iter_mut() {
            neighbours.sort_unstable();
            neighbours.dedup();
            num_edges += neighbours.len();
        }
        Self { nodes, num_edges: num_edges / 2 }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Sorted neighbourhood of `node`.
    #[inline]
    pub fn neighbours(&self, node: Node) -> &[Node] {
        &self.nodes[node]
    }

    #[inline]
    pub fn degree(&self, node: Node) -> usize {
        self.nodes[node].len()
    }

    #[inline]
    pub fn is_adjacent(&self, a: Node, b: Node) -> bool {
        self.nodes[a].binary_search(&b).is_ok()
    }

    pub fn iter_nodes(&self) -> Range<Node> {
        0..self.nodes.len()
    }

    pub fn iter_with_neighbourhoods(&self) -> impl Iterator<Item = (Node, &[Node])> + '_ {
        self.nodes.iter().enumerate().map(|(n, neighbours)| (n, neighbours.as_slice()))
    }

    /// Edges `(a, b)` with `a < b`, in lexicographic order.
    pub fn iter_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.iter_with_neighbourhoods().flat_map(|(node, neighbours)| {
            neighbours.iter().filter(move |&&n| n > node).map(move |&n| (node, n))
        })
    }

    pub fn iter_label_edges(&self) -> impl Iterator<Item = LabelEdge> + '_ {
        self.iter_edges().map(|(a, b)| (to_label(a), to_label(b)))
    }

    pub fn label(&self, node: Node) -> Label {
        to_label(node)
    }

    pub fn complement(&self) -> Self {
        let n = self.len();
        let mut nodes = Vec::with_capacity(n);
        for (node, neighbours) in self.iter_with_neighbourhoods() {
            // both sorted, so we can merge
            let mut complement = Vec::with_capacity(n - 1 - neighbours.len());
            let mut neighbours = neighbours.iter().peekable();
            for other in 0..n {
                if neighbours.peek() == Some(&&other) {
                    neighbours.next();
                } else if other != node {
                    complement.push(other);
                }
            }
            nodes.push(complement);
        }
        let num_edges = n * n.saturating_sub(1) / 2 - self.num_edges;
        Self { nodes, num_edges }
    }

    /// The subgraph induced by `nodes`; node `i` of the result is `nodes[i]`.
    pub fn subgraph(&self, nodes: &[Node]) -> Self {
        let mut map = vec![usize::MAX; self.len()];
        for (new, &old) in nodes.iter().enumerate() {
            map[old] = new;
        }
        Self::from_raw(
            nodes
                .iter()
                .map(|&old| {
                    self.nodes[old]
                        .iter()
                        .filter_map(|&n| (map[n] != usize::MAX).then_some(map[n]))
                        .collect()
                })
                .collect(),
        )
    }

    /// Connected components, each sorted, ordered by their smallest node.
    pub fn components(&self) -> Vec<VNodes> {
        let mut seen = vec![false; self.len()];
        let mut ret = Vec::new();
        let mut stack = Vec::new();
        for start in self.iter_nodes() {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            stack.push(start);
            let mut component = Vec::new();
            while let Some(node) = stack.pop() {
                component.push(node);
                for &n in self.neighbours(node) {
                    if !seen[n] {
                        seen[n] = true;
                        stack.push(n);
                    }
                }
            }
            component.sort_unstable();
            ret.push(component);
        }
        ret
    }

    pub fn is_connected(&self) -> bool {
        self.components().len() <= 1
    }

    pub fn adjacency_matrix(&self) -> AdjMatrix {
        AdjMatrix::from_graph(self)
    }

    pub fn set_is_clique(&self, nodes: &[Node]) -> bool {
        nodes.iter().tuple_combinations().all(|(&a, &b)| self.is_adjacent(a, b))
    }

    pub fn set_is_independent(&self, nodes: &[Node]) -> bool {
        nodes.iter().tuple_combinations().all(|(&a, &b)| !self.is_adjacent(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::*;

    #[test]
    fn construction() {
        let graph = Graph::new(4, [(1, 2), (2, 1), (3, 2), (1, 2)]).unwrap();
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.neighbours(1), &[0, 2]);
        assert_eq!(graph.degree(3), 0);
        assert_eq!(graph.iter_label_edges().collect::<Vec<_>>(), vec![(1, 2), (2, 3)]);

        assert_eq!(Graph::new(0, []).unwrap().len(), 0);
    }

    #[test]
    fn invalid_graphs() {
        assert_eq!(
            Graph::new(3, [(1, 4)]),
            Err(InvalidGraph::OutOfRange { edge: (1, 4), n: 3 })
        );
        assert_eq!(
            Graph::new(3, [(0, 1)]),
            Err(InvalidGraph::OutOfRange { edge: (0, 1), n: 3 })
        );
        assert_eq!(Graph::new(3, [(1, 2), (2, 2)]), Err(InvalidGraph::SelfLoop(2)));
    }

    #[test]
    fn complement() {
        let graph = path(4);
        let complement = graph.complement();
        assert_eq!(
            complement.iter_edges().collect::<Vec<_>>(),
            vec![(0, 2), (0, 3), (1, 3)]
        );
        assert_eq!(complement.complement(), graph);
        assert_eq!(empty(5).complement(), complete(5));
        assert_eq!(empty(0).complement(), empty(0));
    }

    #[test]
    fn subgraph() {
        let graph = cycle(5);
        let sub = graph.subgraph(&[4, 0, 1]);
        assert_eq!(sub.iter_edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
        assert_eq!(graph.subgraph(&[]).len(), 0);
    }

    #[test]
    fn components() {
        let graph = collect!(6; (1, 2), (4, 5), (5, 6));
        assert_eq!(graph.components(), vec![vec![0, 1], vec![2], vec![3, 4, 5]]);
        assert!(!graph.is_connected());
        assert!(path(7).is_connected());
        assert!(empty(0).is_connected());
    }

    #[test]
    fn cliques_and_independent_sets() {
        let graph = complete(4);
        assert!(graph.set_is_clique(&[0, 1, 3]));
        assert!(!path(3).set_is_clique(&[0, 1, 2]));
        assert!(path(3).set_is_independent(&[0, 2]));
    }
}
