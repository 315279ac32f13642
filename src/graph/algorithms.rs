//! The recognition algorithms, mostly as methods on [Graph](super::Graph). Every class
//! has a default `is_<class>` method, and one `is_<class>_<variant>` method per
//! algorithm variant.

pub mod at_free;
pub mod biconnected;
pub mod bipartite;
pub mod chordal;
pub mod chordal_bipartite;
pub mod circular_arc;
pub mod claw_free;
pub mod cliques;
pub mod cograph;
pub mod comparability;
pub mod degree_sequence;
pub mod distance_hereditary;
pub mod interval;
pub mod minor;
pub mod modular_decomposition;
pub mod planarity;
pub mod pq_tree;
pub mod strongly_chordal;
pub mod trapezoid;
pub mod weakly_chordal;
