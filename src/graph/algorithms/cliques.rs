use bitvec::vec::BitVec;
use hashbrown::HashMap;
use petgraph::unionfind::UnionFind;

use super::chordal::EliminationOrdering;
use crate::graph::{AdjMatrix, Graph, Node, VNodes};

/// Maximal cliques together with the inverse relation (which cliques contain a node).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliqueSet {
    cliques: Vec<VNodes>,
    member: Vec<Vec<usize>>,
}

impl CliqueSet {
    pub fn new(num_nodes: usize, mut cliques: Vec<VNodes>) -> Self {
        let mut member = vec![Vec::new(); num_nodes];
        for (idx, clique) in cliques.iter_mut().enumerate() {
            clique.sort_unstable();
            for &node in clique.iter() {
                member[node].push(idx);
            }
        }
        Self { cliques, member }
    }

    pub fn len(&self) -> usize {
        self.cliques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cliques.is_empty()
    }

    pub fn cliques(&self) -> &[VNodes] {
        &self.cliques
    }

    /// Indices of the cliques that contain `node`, increasing.
    pub fn member(&self, node: Node) -> &[usize] {
        &self.member[node]
    }

    pub fn num_nodes(&self) -> usize {
        self.member.len()
    }

    /// Rows are nodes, columns are cliques.
    pub fn incidence_matrix(&self) -> Vec<BitVec> {
        self.member
            .iter()
            .map(|cliques| {
                let mut row = BitVec::repeat(false, self.len());
                for &c in cliques {
                    row.set(c, true);
                }
                row
            })
            .collect()
    }

    /// A maximum weight spanning forest of the clique intersection graph (weight =
    /// size of the intersection), as adjacency lists over clique indices. For the
    /// cliques of a chordal graph this is a clique tree (per component).
    pub fn clique_tree(&self) -> Vec<Vec<usize>> {
        let k = self.len();
        let mut weights: HashMap<(usize, usize), usize> = HashMap::new();
        for cliques in self.member.iter() {
            for (i, &a) in cliques.iter().enumerate() {
                for &b in cliques[i + 1..].iter() {
                    *weights.entry((a, b)).or_default() += 1;
                }
            }
        }
        let mut edges: Vec<_> = weights.into_iter().collect();
        // heaviest first, ties by index so that the forest is deterministic
        edges.sort_unstable_by(|(ea, wa), (eb, wb)| wb.cmp(wa).then(ea.cmp(eb)));

        let mut forest = UnionFind::new(k);
        let mut tree = vec![Vec::new(); k];
        for ((a, b), _) in edges {
            if forest.union(a, b) {
                tree[a].push(b);
                tree[b].push(a);
            }
        }
        tree
    }
}

impl Graph {
    /// The maximal cliques of a chordal graph, given a PEO: `{v} ∪ later(v)` is a
    /// maximal clique unless some node u with parent v has `|later(u)| = |later(v)| +
    /// 1`. Ordered by the rank of their lowest node.
    pub fn chordal_maximal_cliques(&self, peo: &EliminationOrdering) -> CliqueSet {
        let n = self.len();
        let mut later_count = vec![0; n];
        let mut parent = vec![None; n];
        for v in self.iter_nodes() {
            later_count[v] =
                self.neighbours(v).iter().filter(|&&u| peo.rank(u) > peo.rank(v)).count();
            parent[v] = peo.parent(self, v);
        }

        let mut maximal = vec![true; n];
        for u in self.iter_nodes() {
            if let Some(p) = parent[u] {
                if later_count[u] == later_count[p] + 1 {
                    maximal[p] = false;
                }
            }
        }

        let cliques = peo
            .order()
            .iter()
            .filter(|&&v| maximal[v])
            .map(|&v| {
                let mut clique = peo.later_neighbours(self, v);
                clique.push(v);
                clique
            })
            .collect();
        CliqueSet::new(n, cliques)
    }

    /// All maximal cliques (Bron–Kerbosch with pivoting). Returns `None` as soon as
    /// there are more than `limit` cliques.
    pub fn maximal_cliques(&self, limit: Option<usize>) -> Option<CliqueSet> {
        let matrix = self.adjacency_matrix();
        let mut search = BronKerbosch {
            matrix: &matrix,
            cliques: Vec::new(),
            limit: limit.unwrap_or(usize::MAX),
        };
        let mut current = Vec::new();
        if !search.expand(&mut current, self.iter_nodes().collect(), Vec::new()) {
            return None;
        }
        Some(CliqueSet::new(self.len(), search.cliques))
    }
}

struct BronKerbosch<'a> {
    matrix: &'a AdjMatrix,
    cliques: Vec<VNodes>,
    limit: usize,
}

impl BronKerbosch<'_> {
    /// False if the limit was exceeded.
    fn expand(&mut self, current: &mut VNodes, mut p: VNodes, mut x: VNodes) -> bool {
        if p.is_empty() {
            // the empty clique is only reached on the null graph
            if x.is_empty() && !current.is_empty() {
                if self.cliques.len() == self.limit {
                    return false;
                }
                self.cliques.push(current.clone());
            }
            return true;
        }

        let matrix = self.matrix;
        let pivot = p
            .iter()
            .chain(x.iter())
            .copied()
            .max_by_key(|&u| (p.iter().filter(|&&v| matrix.contains(u, v)).count(), u))
            .expect("p is not empty");
        let candidates: VNodes =
            p.iter().copied().filter(|&v| !matrix.contains(pivot, v)).collect();

        for v in candidates {
            current.push(v);
            let next_p = p.iter().copied().filter(|&u| matrix.contains(v, u)).collect();
            let next_x = x.iter().copied().filter(|&u| matrix.contains(v, u)).collect();
            let ok = self.expand(current, next_p, next_x);
            current.pop();
            if !ok {
                return false;
            }
            p.retain(|&u| u != v);
            x.push(v);
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

    fn sorted(set: &CliqueSet) -> Vec<VNodes> {
        let mut cliques = set.cliques().to_vec();
        cliques.sort();
        cliques
    }

    #[test]
    fn chordal_cliques() {
        let graph = collect!(6; (1, 2), (1, 3), (2, 3), (3, 4), (4, 5), (4, 6), (5, 6));
        let peo = graph.perfect_elimination_ordering().unwrap();
        let cliques = graph.chordal_maximal_cliques(&peo);
        assert_eq!(sorted(&cliques), vec![vec![0, 1, 2], vec![2, 3], vec![3, 4, 5]]);
        assert_eq!(cliques.member(2).len(), 2);

        let cliques = empty(3).chordal_maximal_cliques(&empty(3).mcs_ordering());
        assert_eq!(sorted(&cliques), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn bron_kerbosch() {
        let cliques = cycle(5).maximal_cliques(None).unwrap();
        assert_eq!(cliques.len(), 5);
        assert!(cliques.cliques().iter().all(|c| c.len() == 2));
        assert_eq!(complete(5).maximal_cliques(None).unwrap().len(), 1);
        assert_eq!(empty(0).maximal_cliques(None).unwrap().len(), 0);
        // the octahedron has 8 triangles
        let octahedron = Graph::from_edges_unchecked(
            6,
            complete(6).iter_edges().filter(|&(a, b)| a % 3 != b % 3),
        );
        assert_eq!(octahedron.maximal_cliques(None).unwrap().len(), 8);
        assert!(octahedron.maximal_cliques(Some(7)).is_none());
    }

    #[test]
    fn chordal_agrees_with_bron_kerbosch() {
        let rng = &mut Pcg64::seed_from_u64(3);
        let mut checked = 0;
        while checked < 100 {
            let graph = random_graph(10, 0.5, rng);
            let Some(peo) = graph.perfect_elimination_ordering() else {
                continue;
            };
            checked += 1;
            assert_eq!(
                sorted(&graph.chordal_maximal_cliques(&peo)),
                sorted(&graph.maximal_cliques(None).unwrap())
            );
        }
    }

    #[test]
    fn clique_tree() {
        // a path of three triangles
        let graph = collect!(5; (1, 2), (1, 3), (2, 3), (2, 4), (3, 4), (3, 5), (4, 5));
        let peo = graph.perfect_elimination_ordering().unwrap();
        let cliques = graph.chordal_maximal_cliques(&peo);
        assert_eq!(cliques.len(), 3);
        let tree = cliques.clique_tree();
        assert_eq!(tree.iter().map(|t| t.len()).sum::<usize>(), 4);
        // the middle triangle {2, 3, 4} is adjacent to both others
        let middle = cliques.cliques().iter().position(|c| c == &vec![1, 2, 3]).unwrap();
        assert_eq!(tree[middle].len(), 2);
    }
}
