#![deny(unsafe_op_in_unsafe_fn)]

//! Recognition of graph classes, with several algorithms per class, and a reverse-search
//! enumeration of the labelled chordal graphs.
//!
//! Graphs come in on the labels `1..=n` (see [graph::Graph::new]); [registry::recognize]
//! picks the algorithm by name.

pub mod certificate;
pub mod enumerate;
pub mod graph;
pub mod io;
pub mod rand_helper;
pub mod registry;
