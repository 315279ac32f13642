use modular_decomposition::ModuleKind;
use petgraph::{graph::DiGraph, Direction};

use super::cograph::{Cotree, CotreeNode};
use crate::graph::{Graph, Node, VNodes};

pub type NodeIndex = petgraph::graph::NodeIndex<u32>;

pub type TreeGraph = DiGraph<ModuleKind<Node>, ()>;

/// The modular decomposition tree; edges point from a module to its children.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    pub graph: TreeGraph,
    pub root: NodeIndex,
}

impl Tree {
    pub fn kind(&self, module: NodeIndex) -> &ModuleKind<Node> {
        &self.graph[module]
    }

    pub fn children(&self, module: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(module, Direction::Outgoing)
    }

    // instead of doing a recursion, we keep a manual stack of the children iterators,
    // i.e., it is a depth-first traversal
    pub fn module_nodes(&self, module: NodeIndex) -> VNodes {
        if let ModuleKind::Node(node) = self.graph[module] {
            return vec![node];
        }
        let mut ret = Vec::new();
        let mut stack = vec![self.children(module)];
        'outer: while let Some(iter) = stack.last_mut() {
            for child in iter {
                match self.graph[child] {
                    ModuleKind::Node(node) => ret.push(node),
                    _ => {
                        stack.push(self.children(child));
                        continue 'outer;
                    },
                }
            }
            stack.pop();
        }
        ret
    }

    /// A cograph's decomposition tree is its cotree: series modules join their children
    /// and parallel modules unite them. `None` if there is a prime module.
    pub fn to_cotree(&self) -> Option<Cotree> {
        let mut graph = DiGraph::new();
        let mut root = None;
        let mut stack = vec![(self.root, None)];
        while let Some((module, parent)) = stack.pop() {
            let kind = match *self.kind(module) {
                ModuleKind::Prime => return None,
                ModuleKind::Series => CotreeNode::Join,
                ModuleKind::Parallel => CotreeNode::Union,
                ModuleKind::Node(node) => CotreeNode::Leaf(node),
            };
            let index = graph.add_node(kind);
            match parent {
                Some(parent) => {
                    graph.add_edge(parent, index, ());
                },
                None => root = Some(index),
            }
            stack.extend(self.children(module).map(|child| (child, Some(index))));
        }
        Some(Cotree { graph, root })
    }
}

impl Graph {
    /// `None` for the null graph, where the decomposition is undefined.
    pub fn modular_decomposition(&self) -> Option<Tree> {
        let md_tree = modular_decomposition::modular_decomposition(self).ok()?;
        let ret = Tree {
            root: NodeIndex::from(md_tree.root().index() as u32),
            graph: md_tree.into_digraph(),
        };
        debug_assert_eq!(ret.module_nodes(ret.root).len(), self.len());
        Some(ret)
    }

    /// A graph is a cograph iff its modular decomposition has no prime module.
    pub fn is_cograph_modular_decomposition(&self) -> bool {
        match self.modular_decomposition() {
            Some(tree) => tree.to_cotree().is_some(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::graph::test_utils::*;

    #[test]
    fn decomposition() {
        // the root of C4 is series with two parallel children
        let tree = cycle(4).modular_decomposition().unwrap();
        assert!(matches!(tree.kind(tree.root), ModuleKind::Series));
        assert_eq!(tree.children(tree.root).count(), 2);
        for child in tree.children(tree.root) {
            assert!(matches!(tree.kind(child), ModuleKind::Parallel));
            let mut nodes = tree.module_nodes(child);
            nodes.sort();
            assert!(nodes == vec![0, 2] || nodes == vec![1, 3]);
        }
        let mut all = tree.module_nodes(tree.root);
        all.sort();
        assert_eq!(all, vec![0, 1, 2, 3]);

        let cotree = tree.to_cotree().unwrap();
        assert_eq!(cotree.to_graph(4), cycle(4));

        let tree = path(4).modular_decomposition().unwrap();
        assert!(matches!(tree.kind(tree.root), ModuleKind::Prime));
        assert!(tree.to_cotree().is_none());
        assert!(empty(0).modular_decomposition().is_none());
    }

    #[test]
    fn cograph_agrees() {
        for n in 0..=5 {
            for graph in all_graphs(n) {
                assert_eq!(
                    graph.is_cograph_modular_decomposition(),
                    graph.is_cograph_cotree(),
                    "{graph:?}"
                );
                // the cotree from the decomposition describes the same graph
                if let Some(cotree) = graph.modular_decomposition().and_then(|t| t.to_cotree()) {
                    assert_eq!(cotree.to_graph(n), graph, "{graph:?}");
                    assert_eq!(cotree.leaves(cotree.root.unwrap()).len(), n);
                }
            }
        }
        let rng = &mut Pcg64::seed_from_u64(9);
        for _ in 0..200 {
            let graph = random_graph(12, 0.1, rng);
            assert_eq!(graph.is_cograph_modular_decomposition(), graph.is_cograph());
        }
    }
}
