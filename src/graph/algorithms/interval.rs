//! Interval graphs and their relatives.
//!
//! A graph is interval iff it is chordal and its maximal cliques can be ordered such that
//! the cliques containing any fixed node are consecutive. Such an order gives the model
//! directly: node v gets the interval spanned by the positions of its cliques.

use bitvec::vec::BitVec;

use super::{
    cliques::CliqueSet,
    pq_tree::{self, PqTree},
};
use crate::{
    certificate::IntervalModel,
    graph::{Graph, Node},
};

impl Graph {
    /// An interval model, if the graph is an interval graph. Uses the clique tree if it
    /// already is a path forest and a PQ-tree over the cliques otherwise.
    pub fn interval_model(&self) -> Option<IntervalModel> {
        let peo = self.perfect_elimination_ordering()?;
        let cliques = self.chordal_maximal_cliques(&peo);
        let order = match clique_path_order(&cliques) {
            Some(order) => order,
            None => {
                let mut tree = PqTree::new(cliques.len());
                for node in self.iter_nodes() {
                    if !tree.reduce(cliques.member(node)) {
                        return None;
                    }
                }
                tree.frontier()
            },
        };
        debug_assert!(pq_tree::is_consecutive_order(
            &order,
            self.iter_nodes().map(|v| cliques.member(v))
        ));
        Some(model_from_clique_order(&cliques, &order))
    }

    pub fn is_interval(&self) -> bool {
        self.is_interval_pq_tree()
    }

    pub fn is_interval_pq_tree(&self) -> bool {
        self.interval_model().is_some()
    }

    /// Backtracking search for a consecutive clique order.
    pub fn is_interval_backtracking(&self) -> bool {
        let Some(peo) = self.perfect_elimination_ordering() else {
            return false;
        };
        let cliques = self.chordal_maximal_cliques(&peo);
        if cliques.is_empty() {
            return true;
        }
        CliquePathSearch::new(&cliques).run()
    }

    /// Interval = chordal and AT-free (Lekkerkerker and Boland).
    pub fn is_interval_at_free(&self) -> bool {
        self.is_chordal() && self.is_at_free()
    }

    /// An interval model of a proper interval graph, i.e., interval and claw-free.
    pub fn proper_interval_model(&self) -> Option<IntervalModel> {
        let model = self.interval_model()?;
        self.is_claw_free().then_some(model)
    }

    pub fn is_proper_interval(&self) -> bool {
        self.is_proper_interval_fast_claw_check()
    }

    pub fn is_proper_interval_pq_tree(&self) -> bool {
        self.proper_interval_model().is_some()
    }

    /// For simple graphs, unit interval and proper interval coincide (Roberts).
    pub fn is_unit_interval(&self) -> bool {
        self.is_proper_interval()
    }

    pub fn is_co_interval(&self) -> bool {
        self.complement().is_interval()
    }
}

/// If the clique tree is a union of paths, the concatenation of these paths; a clique
/// tree has the subtree property, and subtrees of paths are subpaths.
fn clique_path_order(cliques: &CliqueSet) -> Option<Vec<usize>> {
    let tree = cliques.clique_tree();
    if tree.iter().any(|neighbours| neighbours.len() > 2) {
        return None;
    }
    let mut order = Vec::with_capacity(tree.len());
    let mut visited = BitVec::<usize>::repeat(false, tree.len());
    // a forest without degree three nodes: every component has an end with degree <= 1
    for start in 0..tree.len() {
        if visited[start] || tree[start].len() > 1 {
            continue;
        }
        let (mut previous, mut current) = (usize::MAX, start);
        loop {
            visited.set(current, true);
            order.push(current);
            match tree[current].iter().find(|&&next| next != previous) {
                Some(&next) => (previous, current) = (current, next),
                None => break,
            }
        }
    }
    (order.len() == tree.len()).then_some(order)
}

fn model_from_clique_order(cliques: &CliqueSet, order: &[usize]) -> IntervalModel {
    let mut position = vec![0; order.len()];
    for (pos, &clique) in order.iter().enumerate() {
        position[clique] = pos + 1;
    }
    IntervalModel::new(
        (0..cliques.num_nodes())
            .map(|node| {
                let positions = cliques.member(node).iter().map(|&c| position[c]);
                let l = positions.clone().min().unwrap_or(0);
                let r = positions.max().unwrap_or(0);
                (l, r)
            })
            .collect(),
    )
}

/// Places the cliques one after the other. A node is *active* while it is in the last
/// placed clique and still has unplaced cliques; it is *finished* once a placed clique
/// after it does not contain it.
struct CliquePathSearch<'a> {
    cliques: &'a CliqueSet,
    // incidence rows per clique
    contains: Vec<BitVec>,
    order: Vec<usize>,
    placed: BitVec,
    finished: BitVec,
    unplaced: Vec<usize>,
}

impl<'a> CliquePathSearch<'a> {
    fn new(cliques: &'a CliqueSet) -> Self {
        let contains = cliques
            .cliques()
            .iter()
            .map(|clique| {
                let mut row = BitVec::repeat(false, cliques.num_nodes());
                for &node in clique {
                    row.set(node, true);
                }
                row
            })
            .collect();
        Self {
            cliques,
            contains,
            order: Vec::with_capacity(cliques.len()),
            placed: BitVec::repeat(false, cliques.len()),
            finished: BitVec::repeat(false, cliques.num_nodes()),
            unplaced: (0..cliques.num_nodes()).map(|v| cliques.member(v).len()).collect(),
        }
    }

    fn run(&mut self) -> bool {
        // the first clique of a path has a node that is in no other clique
        let starts: Vec<usize> = (0..self.cliques.len())
            .filter(|&c| {
                self.cliques.cliques()[c].iter().any(|&v| self.cliques.member(v).len() == 1)
            })
            .collect();
        let starts = if starts.is_empty() { vec![0] } else { starts };
        for start in starts {
            self.place(start);
            if self.extend() {
                return true;
            }
            self.unplace(start);
        }
        false
    }

    fn place(&mut self, clique: usize) {
        self.order.push(clique);
        self.placed.set(clique, true);
        for &v in self.cliques.cliques()[clique].iter() {
            self.unplaced[v] -= 1;
        }
    }

    fn unplace(&mut self, clique: usize) {
        self.order.pop();
        self.placed.set(clique, false);
        for &v in self.cliques.cliques()[clique].iter() {
            self.unplaced[v] += 1;
        }
    }

    fn extend(&mut self) -> bool {
        if self.order.len() == self.cliques.len() {
            return true;
        }
        let Some(&current) = self.order.last() else {
            return false;
        };
        let active: Vec<Node> = self.cliques.cliques()[current]
            .iter()
            .copied()
            .filter(|&v| self.unplaced[v] > 0)
            .collect();

        for next in 0..self.cliques.len() {
            if self.placed[next]
                || !active.iter().all(|&v| self.contains[next][v])
                || self.cliques.cliques()[next].iter().any(|&v| self.finished[v])
            {
                continue;
            }
            // with no active node, the current path ends and the next one starts
            let newly_finished: Vec<Node> = self.cliques.cliques()[current]
                .iter()
                .copied()
                .filter(|&v| !self.contains[next][v] && !self.finished[v])
                .collect();
            for &v in newly_finished.iter() {
                self.finished.set(v, true);
            }
            self.place(next);
            if self.extend() {
                return true;
            }
            self.unplace(next);
            for &v in newly_finished.iter() {
                self.finished.set(v, false);
            }
        }
        false
    }
}
