use bitvec::{slice::BitSlice, vec::BitVec};

use super::{Graph, Node};

/// Dense, symmetric adjacency matrix; one bit row per node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjMatrix {
    rows: Vec<BitVec>,
}

impl AdjMatrix {
    pub fn new(n: usize) -> Self {
        Self { rows: vec![BitVec::repeat(false, n); n] }
    }

    pub fn from_graph(graph: &Graph) -> Self {
        let mut ret = Self::new(graph.len());
        for (a, b) in graph.iter_edges() {
            ret.set(a, b, true);
        }
        ret
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn contains(&self, a: Node, b: Node) -> bool {
        self.rows[a][b]
    }

    /// Symmetric update.
    #[inline]
    pub fn set(&mut self, a: Node, b: Node, value: bool) {
        self.rows[a].set(b, value);
        self.rows[b].set(a, value);
    }

    #[inline]
    pub fn row(&self, node: Node) -> &BitSlice {
        &self.rows[node]
    }

    /// Clear every edge at `node`.
    pub fn isolate(&mut self, node: Node) {
        for other in 0..self.rows.len() {
            self.rows[other].set(node, false);
        }
        self.rows[node].fill(false);
    }

    pub fn to_graph(&self) -> Graph {
        Graph::from_edges_unchecked(
            self.len(),
            self.rows
                .iter()
                .enumerate()
                .flat_map(|(a, row)| {
                    row.iter_ones().filter(move |&b| b > a).map(move |b| (a, b))
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::*;

    #[test]
    fn matrix() {
        let graph = cycle(5);
        let mut matrix = graph.adjacency_matrix();
        assert!(matrix.contains(0, 4) && matrix.contains(4, 0));
        assert!(!matrix.contains(0, 2));
        assert_eq!(matrix.row(2).count_ones(), 2);
        assert_eq!(matrix.to_graph(), graph);
        matrix.isolate(0);
        assert_eq!(matrix.to_graph().num_edges(), 3);
    }
}
