//! Reverse search over the labelled chordal graphs.
//!
//! The search tree lives on partial graphs: chordal graphs on some subset of the labels
//! `1..=n`. The parent of such a graph deletes its simplicial vertex with the largest
//! label; since every chordal graph has a simplicial vertex, all parent chains end in the
//! graph without vertices. The children of a graph add one missing vertex x, adjacent to
//! a clique (possibly empty), such that x ends up as the largest simplicial vertex. The
//! leaves on all n vertices are emitted, and nothing except the current path is stored.

use std::iter::FusedIterator;

use bitvec::vec::BitVec;

use crate::graph::{AdjMatrix, Graph, LabelEdge, Node, VNodes};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnumerationError {
    #[error("enumerated a graph that is not chordal: {edges:?}")]
    NotChordal { edges: Vec<LabelEdge> },
}

/// One level of the search path: the children moves of the current partial graph, and
/// the vertex that was added to get there.
#[derive(Debug)]
struct Frame {
    moves: Vec<(Node, VNodes)>,
    next: usize,
    added: Option<Node>,
}

/// Iterator over every chordal graph on the labels `1..=n`, each exactly once.
///
/// An `Err` means that an emitted graph failed the chordality check (a bug in the
/// parent/child rule); the iterator stops after it.
#[derive(Debug)]
pub struct ChordalGraphs {
    n: usize,
    matrix: AdjMatrix,
    alive: BitVec,
    num_alive: usize,
    stack: Vec<Frame>,
    started: bool,
    done: bool,
}

pub fn enumerate_chordal(n: usize) -> ChordalGraphs {
    ChordalGraphs::new(n)
}

impl ChordalGraphs {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            matrix: AdjMatrix::new(n),
            alive: BitVec::repeat(false, n),
            num_alive: 0,
            stack: Vec::with_capacity(n + 1),
            started: false,
            done: false,
        }
    }

    fn add(&mut self, x: Node, clique: &[Node]) {
        self.alive.set(x, true);
        self.num_alive += 1;
        for &c in clique {
            self.matrix.set(x, c, true);
        }
    }

    fn remove(&mut self, x: Node) {
        self.matrix.isolate(x);
        self.alive.set(x, false);
        self.num_alive -= 1;
    }

    fn is_simplicial(&self, node: Node) -> bool {
        let neighbours: VNodes = self.matrix.row(node).iter_ones().collect();
        neighbours
            .iter()
            .enumerate()
            .all(|(i, &a)| neighbours[i + 1..].iter().all(|&b| self.matrix.contains(a, b)))
    }

    /// All cliques of the current partial graph, the empty one included.
    fn cliques(&self) -> Vec<VNodes> {
        let mut ret = vec![Vec::new()];
        let mut stack: Vec<VNodes> = vec![Vec::new()];
        while let Some(clique) = stack.pop() {
            let start = clique.last().map_or(0, |&last| last + 1);
            for v in self.alive.iter_ones().filter(|&v| v >= start) {
                if clique.iter().all(|&c| self.matrix.contains(c, v)) {
                    let mut larger = clique.clone();
                    larger.push(v);
                    ret.push(larger.clone());
                    stack.push(larger);
                }
            }
        }
        ret
    }

    /// Whether `x` is the simplicial vertex with the largest label; only vertices above
    /// `x` need checking since `x` itself is simplicial.
    fn is_canonical(&self, x: Node) -> bool {
        self.alive[x + 1..].iter_ones().all(|offset| !self.is_simplicial(x + 1 + offset))
    }

    fn children(&mut self) -> Vec<(Node, VNodes)> {
        let cliques = self.cliques();
        let missing: VNodes = self.alive.iter_zeros().collect();
        let mut ret = Vec::new();
        for x in missing {
            for clique in cliques.iter() {
                self.add(x, clique);
                let canonical = self.is_canonical(x);
                self.remove(x);
                if canonical {
                    ret.push((x, clique.clone()));
                }
            }
        }
        ret
    }

    fn emit(&mut self) -> Result<Graph, EnumerationError> {
        let graph = self.matrix.to_graph();
        if graph.is_chordal() {
            Ok(graph)
        } else {
            self.done = true;
            Err(EnumerationError::NotChordal { edges: graph.iter_label_edges().collect() })
        }
    }
}

impl Iterator for ChordalGraphs {
    type Item = Result<Graph, EnumerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            if self.n == 0 {
                self.done = true;
                return Some(self.emit());
            }
            let moves = self.children();
            self.stack.push(Frame { moves, next: 0, added: None });
        }

        loop {
            let Some(frame) = self.stack.last_mut() else {
                self.done = true;
                return None;
            };
            let Some((x, clique)) = frame.moves.get(frame.next).cloned() else {
                if let Some(added) = frame.added {
                    self.remove(added);
                }
                self.stack.pop();
                continue;
            };
            frame.next += 1;

            self.add(x, &clique);
            if self.num_alive == self.n {
                let ret = self.emit();
                self.remove(x);
                return Some(ret);
            }
            let moves = self.children();
            self.stack.push(Frame { moves, next: 0, added: Some(x) });
        }
    }
}

impl FusedIterator for ChordalGraphs {}

#[cfg(test)]
mod tests {
    use hashbrown::HashSet;

    use super::*;
    use crate::graph::test_utils::*;

    fn collect_all(n: usize) -> Vec<Graph> {
        enumerate_chordal(n).map(|graph| graph.unwrap()).collect()
    }

    #[test]
    fn counts() {
        for (n, expected) in [(0, 1), (1, 1), (2, 2), (3, 8), (4, 61)] {
            assert_eq!(collect_all(n).len(), expected, "n = {n}");
        }
        assert_eq!(collect_all(0), vec![empty(0)]);
    }

    #[test]
    fn exact_and_distinct() {
        for n in 1..=5 {
            let enumerated = collect_all(n);
            let set: HashSet<Graph> = enumerated.iter().cloned().collect();
            assert_eq!(set.len(), enumerated.len(), "duplicates for n = {n}");
            let expected: HashSet<Graph> =
                all_graphs(n).filter(|graph| graph.is_chordal()).collect();
            assert_eq!(set, expected, "n = {n}");
        }
    }

    #[test]
    fn fused() {
        let mut graphs = enumerate_chordal(2);
        assert_eq!(graphs.by_ref().count(), 2);
        assert!(graphs.next().is_none());
        assert!(graphs.next().is_none());
    }
}
