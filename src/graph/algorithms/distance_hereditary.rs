//! Distance-hereditary graphs by pruning: a graph with at least two nodes is
//! distance-hereditary iff it has a pendant (or isolated) node or a pair of twins, and
//! the graph without it is distance-hereditary again (Bandelt and Mulder). Which node we
//! prune does not matter, since the class is hereditary.

use bitvec::{slice::BitSlice, vec::BitVec};
use hashbrown::HashMap;
use indexmap::IndexMap;

use crate::graph::{AdjMatrix, Graph, Node, VNodes};

/// Finds a node that has a true or false twin among the alive nodes.
trait TwinFinder {
    fn find(&mut self, matrix: &AdjMatrix, alive: &BitSlice) -> Option<Node>;
}

fn open_row(matrix: &AdjMatrix, alive: &BitSlice, node: Node) -> BitVec {
    let mut row = matrix.row(node).to_bitvec();
    row &= alive;
    row
}

/// Exact signatures (the alive part of the adjacency rows) as hash map keys.
struct SignatureMap;

impl TwinFinder for SignatureMap {
    fn find(&mut self, matrix: &AdjMatrix, alive: &BitSlice) -> Option<Node> {
        let mut open: HashMap<BitVec, Node> = HashMap::new();
        let mut closed: HashMap<BitVec, Node> = HashMap::new();
        for node in alive.iter_ones() {
            let row = open_row(matrix, alive, node);
            let mut closed_row = row.clone();
            closed_row.set(node, true);
            if open.insert(row, node).is_some() || closed.insert(closed_row, node).is_some()
            {
                return Some(node);
            }
        }
        None
    }
}

/// Sorts the nodes by their neighbour lists; twins end up next to each other.
struct SortedLists;

impl TwinFinder for SortedLists {
    fn find(&mut self, matrix: &AdjMatrix, alive: &BitSlice) -> Option<Node> {
        let lists: Vec<(VNodes, Node)> = alive
            .iter_ones()
            .map(|node| (open_row(matrix, alive, node).iter_ones().collect(), node))
            .collect();
        let find_equal = |mut lists: Vec<(VNodes, Node)>| {
            lists.sort_unstable();
            lists.windows(2).find(|w| w[0].0 == w[1].0).map(|w| w[1].1)
        };
        if let Some(node) = find_equal(lists.clone()) {
            return Some(node);
        }
        let closed = lists
            .into_iter()
            .map(|(mut list, node)| {
                let pos = list.partition_point(|&n| n < node);
                list.insert(pos, node);
                (list, node)
            })
            .collect();
        find_equal(closed)
    }
}

/// Sums of random-looking node keys; equal hashes are only candidates and are compared
/// exactly.
struct KeyHashes;

fn node_key(node: Node) -> u64 {
    // splitmix64 finaliser
    let mut z = (node as u64).wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

impl TwinFinder for KeyHashes {
    fn find(&mut self, matrix: &AdjMatrix, alive: &BitSlice) -> Option<Node> {
        let mut open: IndexMap<u64, VNodes> = IndexMap::new();
        let mut closed: IndexMap<u64, VNodes> = IndexMap::new();
        for node in alive.iter_ones() {
            let hash = matrix
                .row(node)
                .iter_ones()
                .filter(|&n| alive[n])
                .fold(0u64, |h, n| h.wrapping_add(node_key(n)));
            open.entry(hash).or_default().push(node);
            closed.entry(hash.wrapping_add(node_key(node))).or_default().push(node);
        }
        let false_twins = |a, b| open_row(matrix, alive, a) == open_row(matrix, alive, b);
        let true_twins = |a, b| {
            let (mut row_a, mut row_b) = (open_row(matrix, alive, a), open_row(matrix, alive, b));
            row_a.set(b, false);
            row_b.set(a, false);
            matrix.contains(a, b) && row_a == row_b
        };
        open.values()
            .find_map(|bucket| first_repeated(bucket, false_twins))
            .or_else(|| closed.values().find_map(|bucket| first_repeated(bucket, true_twins)))
    }
}

fn first_repeated(bucket: &[Node], equal: impl Fn(Node, Node) -> bool) -> Option<Node> {
    for (i, &b) in bucket.iter().enumerate() {
        if bucket[..i].iter().any(|&a| equal(a, b)) {
            return Some(b);
        }
    }
    None
}

impl Graph {
    fn is_distance_hereditary_with(&self, mut twins: impl TwinFinder) -> bool {
        let mut matrix = self.adjacency_matrix();
        let mut alive = BitVec::<usize>::repeat(true, self.len());
        let mut degree: Vec<usize> = self.iter_nodes().map(|v| self.degree(v)).collect();
        let mut remaining = self.len();
        while remaining > 1 {
            let pendant = alive.iter_ones().find(|&v| degree[v] <= 1);
            let Some(pick) = pendant.or_else(|| twins.find(&matrix, &alive)) else {
                return false;
            };
            for neighbour in matrix.row(pick).iter_ones() {
                degree[neighbour] -= 1;
            }
            matrix.isolate(pick);
            alive.set(pick, false);
            remaining -= 1;
        }
        true
    }

    pub fn is_distance_hereditary(&self) -> bool {
        self.is_distance_hereditary_hash()
    }

    pub fn is_distance_hereditary_hash(&self) -> bool {
        self.is_distance_hereditary_with(KeyHashes)
    }

    pub fn is_distance_hereditary_hashmap(&self) -> bool {
        self.is_distance_hereditary_with(SignatureMap)
    }

    pub fn is_distance_hereditary_sorted(&self) -> bool {
        self.is_distance_hereditary_with(SortedLists)
    }

    /// Chordal and distance-hereditary (Howorka).
    pub fn is_ptolemaic(&self) -> bool {
        self.is_ptolemaic_sorted()
    }

    pub fn is_ptolemaic_sorted(&self) -> bool {
        self.is_chordal() && self.is_distance_hereditary_sorted()
    }

    pub fn is_ptolemaic_hashmap(&self) -> bool {
        self.is_chordal() && self.is_distance_hereditary_hashmap()
    }
}
