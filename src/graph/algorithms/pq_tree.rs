//! PQ-trees (Booth and Lueker) for the consecutive ones property.
//!
//! The tree represents every ordering of the ground set `0..n` in which all sets reduced
//! so far are consecutive. P-nodes allow any permutation of their children, Q-nodes only
//! the given order or its reversal.
//!
//! The reduction applies the usual templates, but instead of the bubbling phase with
//! parent pointers, it recomputes the pertinent leaf counts for every reduction with a
//! traversal from the root, which keeps the implementation compact at the cost of
//! O(n) per reduction.

use bitvec::vec::BitVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Leaf(usize),
    P,
    Q,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PqNode {
    kind: Kind,
    children: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Empty,
    Full,
    // only for Q-nodes after a reduction step: empty children first, full children last
    Partial,
}

#[derive(Debug, Clone, Copy, Default)]
struct Count {
    pertinent: usize,
    leaves: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PqTree {
    // arena; nodes that are merged into others stay behind unreferenced
    nodes: Vec<PqNode>,
    root: usize,
    num_leaves: usize,
}

impl PqTree {
    /// The universal tree: a P-node over all elements.
    pub fn new(num_leaves: usize) -> Self {
        let mut nodes: Vec<PqNode> = (0..num_leaves)
            .map(|leaf| PqNode { kind: Kind::Leaf(leaf), children: Vec::new() })
            .collect();
        let root = if num_leaves == 1 {
            0
        } else {
            nodes.push(PqNode { kind: Kind::P, children: (0..num_leaves).collect() });
            num_leaves
        };
        Self { nodes, root, num_leaves }
    }

    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// Restrict the tree to the orderings in which `set` is consecutive. Returns false if
    /// there is no such ordering; the tree is then in an unspecified state.
    pub fn reduce(&mut self, set: &[usize]) -> bool {
        let mut in_set = BitVec::<usize>::repeat(false, self.num_leaves);
        for &e in set {
            in_set.set(e, true);
        }
        let size = in_set.count_ones();
        if size <= 1 || size == self.num_leaves {
            return true;
        }

        let mut counts = vec![Count::default(); self.nodes.len()];
        self.count(self.root, &in_set, &mut counts);

        let mut pertinent_root = self.root;
        while let Some(&child) = self.nodes[pertinent_root]
            .children
            .iter()
            .find(|&&c| counts[c].pertinent == size)
        {
            pertinent_root = child;
        }

        self.reduce_node(pertinent_root, true, &counts).is_some()
    }

    /// One ordering that is admissible for all reductions so far.
    pub fn frontier(&self) -> Vec<usize> {
        let mut ret = Vec::with_capacity(self.num_leaves);
        if self.num_leaves == 0 {
            return ret;
        }
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            match self.nodes[node].kind {
                Kind::Leaf(leaf) => ret.push(leaf),
                Kind::P | Kind::Q => stack.extend(self.nodes[node].children.iter().rev()),
            }
        }
        ret
    }

    fn count(&self, node: usize, in_set: &BitVec, counts: &mut [Count]) -> Count {
        let ret = match self.nodes[node].kind {
            Kind::Leaf(leaf) => Count { pertinent: in_set[leaf] as usize, leaves: 1 },
            Kind::P | Kind::Q => {
                let mut ret = Count::default();
                for &child in self.nodes[node].children.iter() {
                    let c = self.count(child, in_set, counts);
                    ret.pertinent += c.pertinent;
                    ret.leaves += c.leaves;
                }
                ret
            },
        };
        counts[node] = ret;
        ret
    }

    fn reduce_node(&mut self, node: usize, is_root: bool, counts: &[Count]) -> Option<Status> {
        let children = self.nodes[node].children.clone();
        let mut statuses = Vec::with_capacity(children.len());
        for &child in children.iter() {
            let Count { pertinent, leaves } = counts[child];
            statuses.push(if pertinent == 0 {
                Status::Empty
            } else if pertinent == leaves {
                Status::Full
            } else {
                self.reduce_node(child, false, counts)?
            });
        }

        match self.nodes[node].kind {
            Kind::P => self.reduce_p(node, children, statuses, is_root),
            Kind::Q => self.reduce_q(node, children, statuses, is_root),
            // leaves are never partial
            Kind::Leaf(_) => unreachable!(),
        }
    }

    fn reduce_p(
        &mut self,
        node: usize,
        children: Vec<usize>,
        statuses: Vec<Status>,
        is_root: bool,
    ) -> Option<Status> {
        let (mut empties, mut fulls, mut partials) = (Vec::new(), Vec::new(), Vec::new());
        for (child, status) in children.into_iter().zip(statuses) {
            match status {
                Status::Empty => empties.push(child),
                Status::Full => fulls.push(child),
                Status::Partial => partials.push(child),
            }
        }
        if partials.is_empty() && empties.is_empty() {
            return Some(Status::Full);
        }

        if !is_root {
            let mut sequence = Vec::new();
            match partials.as_slice() {
                // P3
                [] => {
                    sequence.push(self.group(empties));
                    sequence.push(self.group(fulls));
                },
                // P5
                [partial] => {
                    if !empties.is_empty() {
                        sequence.push(self.group(empties));
                    }
                    sequence.extend_from_slice(&self.nodes[*partial].children);
                    if !fulls.is_empty() {
                        sequence.push(self.group(fulls));
                    }
                },
                _ => return None,
            }
            self.nodes[node] = PqNode { kind: Kind::Q, children: sequence };
            return Some(Status::Partial);
        }

        match partials.as_slice() {
            // P2
            [] => {
                let full = self.group(fulls);
                empties.push(full);
                self.nodes[node].children = empties;
            },
            // P4
            [partial] => {
                let partial = *partial;
                if !fulls.is_empty() {
                    let full = self.group(fulls);
                    self.nodes[partial].children.push(full);
                }
                if empties.is_empty() {
                    self.nodes[node] = self.nodes[partial].clone();
                } else {
                    empties.push(partial);
                    self.nodes[node].children = empties;
                }
            },
            // P6
            [left, right] => {
                let mut sequence = self.nodes[*left].children.clone();
                if !fulls.is_empty() {
                    sequence.push(self.group(fulls));
                }
                sequence.extend(self.nodes[*right].children.iter().rev());
                let merged = PqNode { kind: Kind::Q, children: sequence };
                if empties.is_empty() {
                    self.nodes[node] = merged;
                } else {
                    self.nodes.push(merged);
                    empties.push(self.nodes.len() - 1);
                    self.nodes[node].children = empties;
                }
            },
            _ => return None,
        }
        Some(Status::Partial)
    }

    fn reduce_q(
        &mut self,
        node: usize,
        mut children: Vec<usize>,
        mut statuses: Vec<Status>,
        is_root: bool,
    ) -> Option<Status> {
        let pertinent: Vec<usize> = statuses
            .iter()
            .enumerate()
            .filter_map(|(i, s)| (*s != Status::Empty).then_some(i))
            .collect();
        let (first, last) = (*pertinent.first()?, *pertinent.last()?);
        if last - first + 1 != pertinent.len() {
            return None;
        }
        if first < last && statuses[first + 1..last].iter().any(|s| *s == Status::Partial) {
            return None;
        }
        if statuses.iter().all(|s| *s == Status::Full) {
            return Some(Status::Full);
        }

        let len = children.len();
        let (first, last) = if is_root {
            (first, last)
        } else {
            // the pertinent block has to end at one side of the node, with at most one
            // partial child on its inner end (Q2)
            if last == len - 1 && (first == last || statuses[last] == Status::Full) {
                (first, last)
            } else if first == 0 && (first == last || statuses[first] == Status::Full) {
                children.reverse();
                statuses.reverse();
                (len - 1 - last, len - 1 - first)
            } else {
                return None;
            }
        };

        // Q3 (on the root), Q2 otherwise
        let mut sequence = Vec::with_capacity(len);
        sequence.extend_from_slice(&children[..first]);
        for idx in first..=last {
            let child = children[idx];
            if statuses[idx] != Status::Partial {
                sequence.push(child);
            } else if idx == first {
                sequence.extend_from_slice(&self.nodes[child].children);
            } else {
                sequence.extend(self.nodes[child].children.iter().rev());
            }
        }
        sequence.extend_from_slice(&children[last + 1..]);
        self.nodes[node].children = sequence;
        Some(Status::Partial)
    }

    fn group(&mut self, nodes: Vec<usize>) -> usize {
        if nodes.len() == 1 {
            nodes[0]
        } else {
            self.nodes.push(PqNode { kind: Kind::P, children: nodes });
            self.nodes.len() - 1
        }
    }
}

/// An ordering of the columns `0..num_columns` in which every row (a set of columns) is
/// consecutive, if one exists.
pub fn consecutive_ones_order<'a>(
    num_columns: usize,
    rows: impl IntoIterator<Item = &'a [usize]>,
) -> Option<Vec<usize>> {
    let mut tree = PqTree::new(num_columns);
    for row in rows {
        if !tree.reduce(row) {
            return None;
        }
    }
    Some(tree.frontier())
}

/// Whether the columns of `order` keep every row consecutive.
pub fn is_consecutive_order<'a>(
    order: &[usize],
    rows: impl IntoIterator<Item = &'a [usize]>,
) -> bool {
    let mut position = vec![0; order.len()];
    for (pos, &column) in order.iter().enumerate() {
        position[column] = pos;
    }
    rows.into_iter().all(|row| {
        let Some(min) = row.iter().map(|&c| position[c]).min() else {
            return true;
        };
        let max = row.iter().map(|&c| position[c]).max().unwrap_or(min);
        max - min + 1 == row.len()
    })
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{seq::SliceRandom, Rng, SeedableRng};
    use rand_pcg::Pcg64;

    use super::*;

    fn brute_force(num_columns: usize, rows: &[Vec<usize>]) -> bool {
        (0..num_columns).permutations(num_columns).any(|order| {
            is_consecutive_order(&order, rows.iter().map(|r| r.as_slice()))
        })
    }

    fn check(num_columns: usize, rows: &[Vec<usize>]) -> Option<Vec<usize>> {
        let order = consecutive_ones_order(num_columns, rows.iter().map(|r| r.as_slice()));
        if let Some(ref order) = order {
            assert_eq!(
                order.iter().copied().sorted().collect::<Vec<_>>(),
                (0..num_columns).collect::<Vec<_>>()
            );
            assert!(is_consecutive_order(order, rows.iter().map(|r| r.as_slice())));
        }
        order
    }

    #[test]
    fn trivial() {
        assert_eq!(check(0, &[]), Some(vec![]));
        assert_eq!(check(1, &[vec![0]]), Some(vec![0]));
        assert!(check(4, &[vec![], vec![2], vec![0, 1, 2, 3]]).is_some());
    }

    #[test]
    fn path_constraints() {
        // forces the order 0 1 2 3 4 up to reversal
        let rows = vec![vec![0, 1], vec![1, 2], vec![2, 3], vec![3, 4]];
        let order = check(5, &rows).unwrap();
        assert!(order == vec![0, 1, 2, 3, 4] || order == vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn single_pertinent_child_of_q_node() {
        // [0, 1] and [1, 2] build the Q-node (0 1 2); the next set meets it in one leaf
        let rows = vec![vec![0, 1], vec![1, 2], vec![2, 3]];
        assert!(check(5, &rows).is_some());
        let rows = vec![vec![0, 1], vec![1, 2], vec![0, 4], vec![3, 4]];
        assert!(check(5, &rows).is_some());
        // the middle leaf cannot get another neighbour
        assert!(check(4, &[vec![0, 1], vec![1, 2], vec![1, 3]]).is_none());
    }

    #[test]
    fn impossible() {
        // three pairs around one center, like a claw's cliques plus a triangle
        assert!(check(4, &[vec![0, 1], vec![0, 2], vec![0, 3]]).is_none());
        // a cycle
        assert!(check(4, &[vec![0, 1], vec![1, 2], vec![2, 3], vec![3, 0]]).is_none());
    }

    #[test]
    fn random_against_brute_force() {
        let rng = &mut Pcg64::seed_from_u64(7);
        for _ in 0..2000 {
            let num_columns = rng.gen_range(1..=6);
            let num_rows = rng.gen_range(0..=5);
            let mut columns: Vec<usize> = (0..num_columns).collect();
            let rows: Vec<Vec<usize>> = (0..num_rows)
                .map(|_| {
                    columns.shuffle(rng);
                    let size = rng.gen_range(0..=num_columns);
                    columns[..size].to_vec()
                })
                .collect();
            assert_eq!(
                check(num_columns, &rows).is_some(),
                brute_force(num_columns, &rows),
                "{rows:?}"
            );
        }
    }
}
