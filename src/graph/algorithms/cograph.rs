//! Cographs (P4-free graphs) via cotrees, and the trivially perfect graphs.
//!
//! Every induced subgraph with at least two nodes of a cograph is either disconnected or
//! has a disconnected complement; recursing on the (co-)components gives the cotree.

use std::collections::VecDeque;

use bitvec::vec::BitVec;
use petgraph::{graph::DiGraph, Direction};

use crate::graph::{Graph, Node, VNodes};

pub type NodeIndex = petgraph::graph::NodeIndex<u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CotreeNode {
    /// disjoint union of the children
    Union,
    /// the children are completely joined
    Join,
    Leaf(Node),
}

#[derive(Debug, Clone, Default)]
pub struct Cotree {
    pub graph: DiGraph<CotreeNode, ()>,
    /// `None` for the null graph
    pub root: Option<NodeIndex>,
}

impl Cotree {
    pub fn children(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(node, Direction::Outgoing)
    }

    /// The leaves below `node`.
    pub fn leaves(&self, node: NodeIndex) -> VNodes {
        let mut ret = Vec::new();
        let mut stack = vec![node];
        while let Some(node) = stack.pop() {
            match self.graph[node] {
                CotreeNode::Leaf(leaf) => ret.push(leaf),
                _ => stack.extend(self.children(node)),
            }
        }
        ret
    }

    /// Two nodes are adjacent iff their lowest common ancestor is a join node.
    pub fn to_graph(&self, num_nodes: usize) -> Graph {
        let mut edges = Vec::new();
        for node in self.graph.node_indices() {
            if self.graph[node] != CotreeNode::Join {
                continue;
            }
            let parts: Vec<VNodes> = self.children(node).map(|c| self.leaves(c)).collect();
            for (i, left) in parts.iter().enumerate() {
                for right in parts[i + 1..].iter() {
                    for &a in left {
                        edges.extend(right.iter().map(|&b| (a, b)));
                    }
                }
            }
        }
        Graph::from_edges_unchecked(num_nodes, edges)
    }
}

/// How the complement components of a node set are computed.
trait CoComponents {
    fn co_components(&mut self, graph: &Graph, nodes: &[Node]) -> Vec<VNodes>;
}

/// Rescans the list of unvisited nodes for every dequeued node.
struct Scan;

impl CoComponents for Scan {
    fn co_components(&mut self, graph: &Graph, nodes: &[Node]) -> Vec<VNodes> {
        let mut ret = Vec::new();
        let mut unvisited: VNodes = nodes.to_vec();
        let mut queue = VecDeque::new();
        while let Some(start) = unvisited.pop() {
            let mut component = vec![start];
            queue.push_back(start);
            while let Some(node) = queue.pop_front() {
                let (adjacent, non_adjacent): (VNodes, VNodes) = unvisited
                    .iter()
                    .copied()
                    .partition(|&other| graph.is_adjacent(node, other));
                unvisited = adjacent;
                component.extend_from_slice(&non_adjacent);
                queue.extend(non_adjacent);
            }
            ret.push(component);
        }
        ret
    }
}

/// Keeps the unvisited nodes in a doubly linked list: the neighbours of the dequeued
/// node are cut out, everything left over joins the component, then the neighbours are
/// put back. Each step costs O(deg + moved).
struct PartitionRefinement {
    next: Vec<usize>,
    prev: Vec<usize>,
    present: BitVec,
}

impl PartitionRefinement {
    fn new(n: usize) -> Self {
        // index n is the sentinel
        Self {
            next: vec![n; n + 1],
            prev: vec![n; n + 1],
            present: BitVec::repeat(false, n),
        }
    }

    fn sentinel(&self) -> usize {
        self.next.len() - 1
    }

    fn remove(&mut self, node: Node) {
        let (prev, next) = (self.prev[node], self.next[node]);
        self.next[prev] = next;
        self.prev[next] = prev;
        self.present.set(node, false);
    }

    fn push_front(&mut self, node: Node) {
        let sentinel = self.sentinel();
        let first = self.next[sentinel];
        self.next[node] = first;
        self.prev[node] = sentinel;
        self.prev[first] = node;
        self.next[sentinel] = node;
        self.present.set(node, true);
    }

    fn first(&self) -> Option<Node> {
        let first = self.next[self.sentinel()];
        (first != self.sentinel()).then_some(first)
    }
}

impl CoComponents for PartitionRefinement {
    fn co_components(&mut self, graph: &Graph, nodes: &[Node]) -> Vec<VNodes> {
        for &node in nodes.iter().rev() {
            self.push_front(node);
        }
        let mut ret = Vec::new();
        let mut queue = VecDeque::new();
        let mut cut = Vec::new();
        while let Some(start) = self.first() {
            self.remove(start);
            let mut component = vec![start];
            queue.push_back(start);
            while let Some(node) = queue.pop_front() {
                cut.clear();
                for &neighbour in graph.neighbours(node) {
                    if self.present[neighbour] {
                        self.remove(neighbour);
                        cut.push(neighbour);
                    }
                }
                while let Some(other) = self.first() {
                    self.remove(other);
                    component.push(other);
                    queue.push_back(other);
                }
                for &neighbour in cut.iter() {
                    self.push_front(neighbour);
                }
            }
            ret.push(component);
        }
        ret
    }
}

struct CotreeBuilder<'a, C> {
    graph: &'a Graph,
    co_components: C,
    tree: DiGraph<CotreeNode, ()>,
    in_subset: BitVec,
}

impl<C: CoComponents> CotreeBuilder<'_, C> {
    fn components(&mut self, nodes: &[Node]) -> Vec<VNodes> {
        for &node in nodes {
            self.in_subset.set(node, true);
        }
        let mut ret = Vec::new();
        let mut queue = VecDeque::new();
        for &start in nodes {
            if !self.in_subset[start] {
                continue;
            }
            self.in_subset.set(start, false);
            let mut component = vec![start];
            queue.push_back(start);
            while let Some(node) = queue.pop_front() {
                for &neighbour in self.graph.neighbours(node) {
                    if self.in_subset[neighbour] {
                        self.in_subset.set(neighbour, false);
                        component.push(neighbour);
                        queue.push_back(neighbour);
                    }
                }
            }
            ret.push(component);
        }
        ret
    }

    fn build(&mut self, nodes: &[Node]) -> Option<NodeIndex> {
        if let [leaf] = nodes {
            return Some(self.tree.add_node(CotreeNode::Leaf(*leaf)));
        }
        let (kind, parts) = {
            let components = self.components(nodes);
            if components.len() > 1 {
                (CotreeNode::Union, components)
            } else {
                let co_components = self.co_components.co_components(self.graph, nodes);
                if co_components.len() == 1 {
                    return None;
                }
                (CotreeNode::Join, co_components)
            }
        };
        let parent = self.tree.add_node(kind);
        for part in parts {
            let child = self.build(&part)?;
            self.tree.add_edge(parent, child, ());
        }
        Some(parent)
    }
}

impl Graph {
    fn cotree_with(&self, co_components: impl CoComponents) -> Option<Cotree> {
        let mut builder = CotreeBuilder {
            graph: self,
            co_components,
            tree: DiGraph::new(),
            in_subset: BitVec::repeat(false, self.len()),
        };
        let root = if self.is_empty() {
            None
        } else {
            let nodes: VNodes = self.iter_nodes().collect();
            Some(builder.build(&nodes)?)
        };
        Some(Cotree { graph: builder.tree, root })
    }

    /// The cotree, if the graph is a cograph.
    pub fn cotree(&self) -> Option<Cotree> {
        let ret = self.cotree_with(Scan)?;
        debug_assert!(ret.to_graph(self.len()) == *self);
        Some(ret)
    }

    pub fn is_cograph(&self) -> bool {
        self.is_cograph_partition_refinement()
    }

    pub fn is_cograph_cotree(&self) -> bool {
        self.cotree().is_some()
    }

    pub fn is_cograph_partition_refinement(&self) -> bool {
        self.cotree_with(PartitionRefinement::new(self.len())).is_some()
    }

    /// Chordal cographs.
    pub fn is_trivially_perfect(&self) -> bool {
        self.is_chordal() && self.is_cograph()
    }

    /// Every connected induced subgraph has a universal node (Wolk); so we repeatedly
    /// strip a universal node from each component.
    pub fn is_quasi_threshold(&self) -> bool {
        let mut alive = BitVec::<usize>::repeat(true, self.len());
        let mut stack: Vec<VNodes> = self.components();
        while let Some(component) = stack.pop() {
            if component.len() <= 2 {
                continue;
            }
            let size = component.len();
            let degree_in = |node: Node, alive: &BitVec| {
                self.neighbours(node).iter().filter(|&&n| alive[n]).count()
            };
            let Some(universal) =
                component.iter().copied().find(|&node| degree_in(node, &alive) == size - 1)
            else {
                return false;
            };
            alive.set(universal, false);
            let rest: VNodes = component.into_iter().filter(|&n| n != universal).collect();
            stack.extend(self.subgraph(&rest).components().into_iter().map(|sub| {
                sub.into_iter().map(|n| rest[n]).collect::<VNodes>()
            }));
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

    fn has_induced_p4(graph: &Graph) -> bool {
        let n = graph.len();
        for a in 0..n {
            for b in 0..n {
                for c in 0..n {
                    for d in 0..n {
                        if a == b || a == c || a == d || b == c || b == d || c == d {
                            continue;
                        }
                        if graph.is_adjacent(a, b)
                            && graph.is_adjacent(b, c)
                            && graph.is_adjacent(c, d)
                            && !graph.is_adjacent(a, c)
                            && !graph.is_adjacent(a, d)
                            && !graph.is_adjacent(b, d)
                        {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    #[test]
    fn known_instances() {
        for graph in [complete(4), empty(4), empty(0), cycle(4), complete_bipartite(2, 3)] {
            assert!(graph.is_cograph_cotree());
            assert!(graph.is_cograph_partition_refinement());
        }
        for graph in [path(4), cycle(5), path(6)] {
            assert!(!graph.is_cograph_cotree());
            assert!(!graph.is_cograph_partition_refinement());
        }
    }

    #[test]
    fn cotree_shape() {
        // C4 is the join of two independent pairs
        let cotree = cycle(4).cotree().unwrap();
        let root = cotree.root.unwrap();
        assert_eq!(cotree.graph[root], CotreeNode::Join);
        assert_eq!(cotree.children(root).count(), 2);
        for child in cotree.children(root) {
            assert_eq!(cotree.graph[child], CotreeNode::Union);
        }
        assert_eq!(cotree.to_graph(4), cycle(4));
        assert!(empty(0).cotree().unwrap().root.is_none());
    }

    #[test]
    fn exhaustive_small() {
        for n in 0..=5 {
            for graph in all_graphs(n) {
                let expected = !has_induced_p4(&graph);
                assert_eq!(graph.is_cograph_cotree(), expected, "{graph:?}");
                assert_eq!(graph.is_cograph_partition_refinement(), expected, "{graph:?}");
                assert_eq!(
                    graph.is_trivially_perfect(),
                    graph.is_quasi_threshold(),
                    "{graph:?}"
                );
                if let Some(cotree) = graph.cotree() {
                    assert_eq!(cotree.to_graph(n), graph);
                }
            }
        }
    }

    #[test]
    fn random_agree() {
        let rng = &mut Pcg64::seed_from_u64(5);
        for _ in 0..500 {
            // sparse or dense enough to hit cographs once in a while
            let graph = random_graph(8, 0.15, rng);
            assert_eq!(graph.is_cograph_cotree(), graph.is_cograph_partition_refinement());
            assert_eq!(graph.is_trivially_perfect(), graph.is_quasi_threshold());
        }
    }

    #[test]
    fn trivially_perfect() {
        assert!(star(4).is_trivially_perfect());
        assert!(star(4).is_quasi_threshold());
        // C4 is a cograph but not chordal
        assert!(!cycle(4).is_trivially_perfect());
        assert!(!cycle(4).is_quasi_threshold());
        assert!(!path(4).is_quasi_threshold());
    }
}
