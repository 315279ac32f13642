use hashbrown::HashSet;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::graph::Graph;

/// Generate `num` different seeds with the [ChaCha20Rng] generator, in the order they
/// were drawn.
pub fn generate_seeds(num: usize, seed: Option<u64>) -> Vec<u64> {
    let rng = &mut if let Some(seed) = seed {
        ChaCha20Rng::seed_from_u64(seed)
    } else {
        ChaCha20Rng::from_entropy()
    };

    let mut seen = HashSet::<u64>::with_capacity(num);
    let mut ret = Vec::with_capacity(num);
    while ret.len() < num {
        let seed = rng.gen();
        if seen.insert(seed) {
            ret.push(seed);
        }
    }

    debug_assert_eq!(seen.len(), num);
    ret
}

/// G(n, p) with every pair drawn independently.
pub fn random_graph(n: usize, p: f64, rng: &mut impl Rng) -> Graph {
    let mut edges = Vec::new();
    for a in 0..n {
        for b in a + 1..n {
            if rng.gen_bool(p) {
                edges.push((a, b));
            }
        }
    }
    Graph::from_edges_unchecked(n, edges)
}
