use hashbrown::HashSet;

// some of the following type aliases are not used everywhere, but they serve as
// documentation and orientation for variable names

/// Internal, compact node index in `0..n`.
pub type Node = usize;
/// External vertex label in `1..=n`.
pub type Label = usize;
pub type Edge = (Node, Node);
pub type LabelEdge = (Label, Label);

// V for vector
pub(crate) type VNodes = Vec<Node>;
// H for hash
pub(crate) type HNodes = HashSet<Node>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum InvalidGraph {
    #[error("edge {edge:?} has a vertex outside of 1..={n}")]
    OutOfRange { edge: LabelEdge, n: usize },
    #[error("self loop detected on vertex {0}")]
    SelfLoop(Label),
}

#[inline]
pub fn to_label(node: Node) -> Label {
    node + 1
}

#[inline]
pub fn to_node(label: Label) -> Node {
    label - 1
}

mod adj;
pub mod algorithms;
mod impl_petgraph;
pub mod matrix;

pub use adj::Graph;
pub use matrix::AdjMatrix;

#[cfg(test)]
pub mod test_utils {
    use super::*;

    pub fn path(n: usize) -> Graph {
        Graph::from_edges_unchecked(n, (1..n).map(|i| (i - 1, i)))
    }

    pub fn cycle(n: usize) -> Graph {
        Graph::from_edges_unchecked(n, (0..n).map(|i| (i, (i + 1) % n)))
    }

    pub fn complete(n: usize) -> Graph {
        Graph::from_edges_unchecked(
            n,
            (0..n).flat_map(|a| (a + 1..n).map(move |b| (a, b))),
        )
    }

    pub fn empty(n: usize) -> Graph {
        Graph::from_edges_unchecked(n, [])
    }

    /// Center 0 with `leaves` leaves.
    pub fn star(leaves: usize) -> Graph {
        Graph::from_edges_unchecked(leaves + 1, (1..=leaves).map(|l| (0, l)))
    }

    /// Left side `0..a`, right side `a..a + b`.
    pub fn complete_bipartite(a: usize, b: usize) -> Graph {
        Graph::from_edges_unchecked(
            a + b,
            (0..a).flat_map(|l| (a..a + b).map(move |r| (l, r))),
        )
    }

    pub use crate::rand_helper::random_graph;

    /// Build a graph from 1-based labels; panics on invalid input, so only for tests.
    macro_rules! collect {
        ($n:expr; $(($a:expr, $b:expr)),* $(,)?) => {
            $crate::graph::Graph::new($n, vec![$(($a, $b)),*]).unwrap()
        };
    }
    pub(crate) use collect;

    /// All graphs on `n` nodes, by edge subset; only for tiny n.
    pub fn all_graphs(n: usize) -> impl Iterator<Item = Graph> {
        let pairs: Vec<Edge> =
            (0..n).flat_map(|a| (a + 1..n).map(move |b| (a, b))).collect();
        let count = 1u64 << pairs.len();
        (0..count).map(move |mask| {
            Graph::from_edges_unchecked(
                n,
                pairs
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask >> i & 1 == 1)
                    .map(|(_, e)| *e),
            )
        })
    }

    // just a naive test whether the utils compile, more or less
    #[test]
    fn macros() {
        let graph = collect!(3; (1, 2), (1, 3));
        assert_eq!(graph.iter_label_edges().collect::<Vec<_>>(), vec![(1, 2), (1, 3)]);
        assert_eq!(all_graphs(3).count(), 8);
        assert_eq!(complete_bipartite(2, 3).num_edges(), 6);
    }
}
