//! Planarity by path embedding (Demoucron, Malgrange and Pertuiset), block by block.
//!
//! The embedded part starts as a cycle and grows by one path at a time. A fragment is
//! either a missing edge between two embedded nodes, or a component of the remaining
//! nodes together with its edges into the embedded part. It must go into a face that
//! holds all of its attachments: a fragment without such a face proves that the block is
//! not planar, and a fragment with exactly one such face is embedded first. The embedded
//! part stays biconnected, so every face is a simple cycle.

use std::collections::VecDeque;

use bitvec::vec::BitVec;
use hashbrown::HashMap;

use super::minor::k4_free_bound;
use crate::graph::{AdjMatrix, Graph, Node, VNodes};

#[derive(Debug)]
struct Fragment {
    attachments: VNodes,
    // empty for a single edge
    inner: VNodes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Embedded,
    Complete,
    Stuck,
}

struct Embedding<'a> {
    block: &'a Graph,
    embedded: BitVec,
    edges: AdjMatrix,
    faces: Vec<VNodes>,
}

/// The nodes of `face` from position `from` to position `to`, both included.
fn walk(face: &[Node], from: usize, to: usize) -> VNodes {
    let k = face.len();
    let steps = (to + k - from) % k;
    (0..=steps).map(|s| face[(from + s) % k]).collect()
}

impl<'a> Embedding<'a> {
    /// `cycle` is closed by the edge between its first and its last node.
    fn new(block: &'a Graph, cycle: VNodes) -> Self {
        let n = block.len();
        let mut ret = Self {
            block,
            embedded: BitVec::repeat(false, n),
            edges: AdjMatrix::new(n),
            faces: Vec::new(),
        };
        ret.mark(&cycle);
        if let (Some(&first), Some(&last)) = (cycle.first(), cycle.last()) {
            ret.edges.set(first, last, true);
        }
        ret.faces = vec![cycle.clone(), cycle];
        ret
    }

    fn mark(&mut self, path: &[Node]) {
        for &v in path {
            self.embedded.set(v, true);
        }
        for pair in path.windows(2) {
            self.edges.set(pair[0], pair[1], true);
        }
    }

    fn fragments(&self) -> Vec<Fragment> {
        let mut ret: Vec<Fragment> = self
            .block
            .iter_edges()
            .filter(|&(a, b)| {
                self.embedded[a] && self.embedded[b] && !self.edges.contains(a, b)
            })
            .map(|(a, b)| Fragment { attachments: vec![a, b], inner: Vec::new() })
            .collect();

        let mut seen = self.embedded.clone();
        for start in self.block.iter_nodes() {
            if seen[start] {
                continue;
            }
            seen.set(start, true);
            let mut inner = vec![start];
            let mut attachments = VNodes::new();
            let mut next = 0;
            while let Some(&node) = inner.get(next) {
                next += 1;
                for &neighbour in self.block.neighbours(node) {
                    if self.embedded[neighbour] {
                        attachments.push(neighbour);
                    } else if !seen[neighbour] {
                        seen.set(neighbour, true);
                        inner.push(neighbour);
                    }
                }
            }
            attachments.sort_unstable();
            attachments.dedup();
            ret.push(Fragment { attachments, inner });
        }
        ret
    }

    /// A path through the fragment from its first attachment to another one.
    fn path(&self, fragment: &Fragment) -> Option<VNodes> {
        if fragment.inner.is_empty() {
            return Some(fragment.attachments.clone());
        }
        let a = *fragment.attachments.first()?;
        let mut inside = BitVec::<usize>::repeat(false, self.block.len());
        for &v in fragment.inner.iter() {
            inside.set(v, true);
        }
        let start = *self.block.neighbours(a).iter().find(|&&v| inside[v])?;
        let mut parent: HashMap<Node, Node> = HashMap::new();
        parent.insert(start, a);
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            let exit =
                self.block.neighbours(node).iter().find(|&&b| b != a && self.embedded[b]);
            if let Some(&b) = exit {
                let mut ret = vec![b, node];
                let mut current = node;
                while let Some(&previous) = parent.get(&current) {
                    ret.push(previous);
                    current = previous;
                }
                ret.reverse();
                return Some(ret);
            }
            for &neighbour in self.block.neighbours(node) {
                if inside[neighbour] && !parent.contains_key(&neighbour) {
                    parent.insert(neighbour, node);
                    queue.push_back(neighbour);
                }
            }
        }
        None
    }

    /// Splits `face` along `path`, whose ends lie on it.
    fn embed(&mut self, face: usize, path: VNodes) -> Step {
        let (Some(&a), Some(&b)) = (path.first(), path.last()) else {
            return Step::Stuck;
        };
        let cycle = &self.faces[face];
        let (Some(i), Some(j)) =
            (cycle.iter().position(|&v| v == a), cycle.iter().position(|&v| v == b))
        else {
            return Step::Stuck;
        };
        let inner = &path[1..path.len() - 1];
        let mut first = walk(cycle, i, j);
        first.extend(inner.iter().rev());
        let mut second = walk(cycle, j, i);
        second.extend(inner.iter());

        self.faces[face] = first;
        self.faces.push(second);
        self.mark(&path);
        Step::Embedded
    }

    fn step(&mut self) -> Step {
        let fragments = self.fragments();
        let mut choice = None;
        for (index, fragment) in fragments.iter().enumerate() {
            let mut admissible = self.faces.iter().enumerate().filter(|(_, face)| {
                fragment.attachments.iter().all(|v| face.contains(v))
            });
            let Some((face, _)) = admissible.next() else {
                return Step::Stuck;
            };
            if admissible.next().is_none() {
                choice = Some((index, face));
                break;
            }
            if choice.is_none() {
                choice = Some((index, face));
            }
        }
        let Some((index, face)) = choice else {
            return Step::Complete;
        };
        // every fragment of a block has two attachments, so there is a path
        match self.path(&fragments[index]) {
            Some(path) => self.embed(face, path),
            None => Step::Stuck,
        }
    }
}

/// Euler's bound for simple planar graphs.
fn planar_bound(n: usize) -> usize {
    if n < 3 { n * n.saturating_sub(1) / 2 } else { 3 * n - 6 }
}

/// A cycle through the first edge `(u, v)`, as a path from `v` back to `u`.
fn cycle_through_first_edge(block: &Graph) -> Option<VNodes> {
    let (u, v) = block.iter_edges().next()?;
    let mut parent: Vec<Option<Node>> = vec![None; block.len()];
    parent[u] = Some(u);
    let mut queue = VecDeque::from([u]);
    while let Some(node) = queue.pop_front() {
        for &next in block.neighbours(node) {
            if parent[next].is_some() || (node == u && next == v) {
                continue;
            }
            parent[next] = Some(node);
            if next == v {
                let mut ret = vec![v];
                let mut current = v;
                while current != u {
                    current = parent[current]?;
                    ret.push(current);
                }
                return Some(ret);
            }
            queue.push_back(next);
        }
    }
    None
}

fn is_planar_block(block: &Graph) -> bool {
    let n = block.len();
    if n <= 4 {
        return true;
    }
    if block.num_edges() > planar_bound(n) {
        return false;
    }
    let Some(cycle) = cycle_through_first_edge(block) else {
        return true;
    };
    let mut embedding = Embedding::new(block, cycle);
    loop {
        match embedding.step() {
            Step::Embedded => {},
            Step::Complete => return true,
            Step::Stuck => return false,
        }
    }
}

impl Graph {
    /// A graph is planar iff all of its blocks are.
    pub fn is_planar(&self) -> bool {
        if self.num_edges() > planar_bound(self.len()) {
            return false;
        }
        self.blocks_all(|nodes, edges| {
            let index: HashMap<Node, Node> =
                nodes.iter().enumerate().map(|(i, &v)| (v, i)).collect();
            let block = Graph::from_edges_unchecked(
                nodes.len(),
                edges.iter().map(|(a, b)| (index[a], index[b])),
            );
            is_planar_block(&block)
        })
    }

    /// Outerplanar iff adding a node adjacent to every node keeps the graph planar.
    pub fn is_outer_planar(&self) -> bool {
        if self.num_edges() > k4_free_bound(self.len()) {
            return false;
        }
        let apex = self.len();
        Graph::from_edges_unchecked(
            apex + 1,
            self.iter_edges().chain(self.iter_nodes().map(|v| (v, apex))),
        )
        .is_planar()
    }
}
