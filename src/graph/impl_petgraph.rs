// needed for modular-decomposition, which is generic over the petgraph visitor traits

use std::{iter::Copied, slice};

use petgraph::{
    visit::{
        GraphBase, GraphProp, IntoNeighbors, NodeCompactIndexable, NodeCount,
        NodeIndexable,
    },
    Undirected,
};

use super::{Edge, Graph, Node};

impl GraphBase for Graph {
    type NodeId = Node;
    type EdgeId = Edge;
}

impl NodeCount for Graph {
    fn node_count(&self) -> usize {
        self.len()
    }
}

impl NodeIndexable for Graph {
    // the nodes are always compact
    fn node_bound(&self) -> usize {
        self.len()
    }

    fn to_index(&self, a: Self::NodeId) -> usize {
        a
    }

    fn from_index(&self, i: usize) -> Self::NodeId {
        i
    }
}

impl NodeCompactIndexable for Graph {}

impl<'a> IntoNeighbors for &'a Graph {
    type Neighbors = Copied<slice::Iter<'a, Node>>;

    fn neighbors(self, a: Self::NodeId) -> Self::Neighbors {
        self.neighbours(a).iter().copied()
    }
}

impl GraphProp for Graph {
    type EdgeType = Undirected;
}
