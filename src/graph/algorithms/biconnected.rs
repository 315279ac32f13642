//! Biconnected components (Hopcroft and Tarjan) and the classes that are defined by the
//! shape of their blocks.

use bitvec::vec::BitVec;

use crate::graph::{Edge, Graph, Node, VNodes};

struct Frame {
    node: Node,
    parent: Option<Node>,
    next: usize,
}

impl Graph {
    /// The edge sets of the biconnected components; isolated nodes have none.
    pub fn biconnected_components(&self) -> Vec<Vec<Edge>> {
        let n = self.len();
        let mut time = vec![0; n];
        let mut low = vec![0; n];
        let mut timer = 0;
        let mut edges: Vec<Edge> = Vec::new();
        let mut ret = Vec::new();

        for root in self.iter_nodes() {
            if time[root] != 0 {
                continue;
            }
            timer += 1;
            time[root] = timer;
            low[root] = timer;
            // manual stack instead of a recursion; each frame remembers where it stopped
            let mut stack = vec![Frame { node: root, parent: None, next: 0 }];
            while let Some(frame) = stack.last_mut() {
                let node = frame.node;
                let Some(&to) = self.neighbours(node).get(frame.next) else {
                    let parent = frame.parent;
                    stack.pop();
                    if let Some(parent) = parent {
                        low[parent] = low[parent].min(low[node]);
                        if low[node] >= time[parent] {
                            let pos = edges
                                .iter()
                                .rposition(|&e| e == (parent, node))
                                .unwrap_or(0);
                            ret.push(edges.split_off(pos));
                        }
                    }
                    continue;
                };
                frame.next += 1;
                if Some(to) == frame.parent {
                    continue;
                }
                if time[to] == 0 {
                    edges.push((node, to));
                    timer += 1;
                    time[to] = timer;
                    low[to] = timer;
                    stack.push(Frame { node: to, parent: Some(node), next: 0 });
                } else if time[to] < time[node] {
                    edges.push((node, to));
                    low[node] = low[node].min(time[to]);
                }
            }
        }
        ret
    }

    pub(crate) fn blocks_all(&self, accept: impl Fn(&[Node], &[Edge]) -> bool) -> bool {
        let mut seen = BitVec::<usize>::repeat(false, self.len());
        self.biconnected_components().iter().all(|component| {
            let mut nodes: VNodes = Vec::new();
            for &(a, b) in component {
                for v in [a, b] {
                    if !seen[v] {
                        seen.set(v, true);
                        nodes.push(v);
                    }
                }
            }
            let ok = accept(&nodes, component);
            for &v in nodes.iter() {
                seen.set(v, false);
            }
            ok
        })
    }

    /// Every block is a clique.
    pub fn is_block(&self) -> bool {
        self.blocks_all(|nodes, edges| edges.len() == nodes.len() * (nodes.len() - 1) / 2)
    }

    /// Every block is a single edge or a cycle.
    pub fn is_cactus(&self) -> bool {
        self.blocks_all(|nodes, edges| edges.len() == 1 || edges.len() == nodes.len())
    }
}
