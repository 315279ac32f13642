//! The static table of graph classes and their recognition algorithms, and the
//! [recognize] entry point that ties class, algorithm and certificate together.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    certificate::{Certificate, CertificateError, IntervalModel},
    graph::{Graph, InvalidGraph, LabelEdge},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionError {
    #[error(transparent)]
    InvalidGraph(#[from] InvalidGraph),
    #[error("unknown graph class \"{0}\"")]
    UnknownClass(String),
    #[error(
        "unknown algorithm \"{requested}\" for the class {class}; valid are: {}",
        .valid.join(", ")
    )]
    UnknownAlgorithm {
        class: GraphClass,
        requested: String,
        valid: Vec<&'static str>,
    },
    #[error("the certificate does not match the graph: {0}")]
    CertificateInvalid(#[from] CertificateError),
}

macro_rules! graph_classes {
    ($($variant:ident => $name:literal,)+) => {
        /// The recognizable graph classes.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum GraphClass {
            $($variant,)+
        }

        impl GraphClass {
            pub const ALL: &'static [GraphClass] = &[$(GraphClass::$variant,)+];

            pub fn name(self) -> &'static str {
                match self {
                    $(GraphClass::$variant => $name,)+
                }
            }
        }
    };
}

graph_classes! {
    AtFree => "at_free",
    Bipartite => "bipartite",
    BipartitePermutation => "bipartite_permutation",
    Block => "block",
    Cactus => "cactus",
    Chain => "chain",
    Chordal => "chordal",
    ChordalBipartite => "chordal_bipartite",
    CircularArc => "circular_arc",
    CoChordal => "co_chordal",
    CoComparability => "co_comparability",
    CoInterval => "co_interval",
    Cochain => "cochain",
    Cograph => "cograph",
    Comparability => "comparability",
    DistanceHereditary => "distance_hereditary",
    Interval => "interval",
    OuterPlanar => "outer_planar",
    Permutation => "permutation",
    Planar => "planar",
    ProperInterval => "proper_interval",
    Ptolemaic => "ptolemaic",
    QuasiThreshold => "quasi_threshold",
    SeriesParallel => "series_parallel",
    Split => "split",
    StronglyChordal => "strongly_chordal",
    Threshold => "threshold",
    Trapezoid => "trapezoid",
    TriviallyPerfect => "trivially_perfect",
    UnitInterval => "unit_interval",
    WeaklyChordal => "weakly_chordal",
}

impl fmt::Display for GraphClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GraphClass {
    type Err = RecognitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GraphClass::ALL
            .iter()
            .copied()
            .find(|class| class.name() == s)
            .ok_or_else(|| RecognitionError::UnknownClass(s.to_owned()))
    }
}

#[derive(Clone, Copy)]
enum Run {
    Decide(fn(&Graph) -> bool),
    // the model is only returned for members
    Certify(fn(&Graph) -> Option<IntervalModel>),
}

/// A named recognition algorithm of some class.
#[derive(Clone, Copy)]
pub struct Algorithm {
    pub name: &'static str,
    run: Run,
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Algorithm").field("name", &self.name).finish_non_exhaustive()
    }
}

/// The answer of an algorithm: membership and, for some algorithms, a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recognition {
    pub member: bool,
    pub certificate: Certificate,
}

impl Algorithm {
    pub fn produces_certificate(&self) -> bool {
        matches!(self.run, Run::Certify(_))
    }

    /// Run the algorithm; the certificate, if any, is not validated here.
    pub fn run(&self, graph: &Graph) -> Recognition {
        match self.run {
            Run::Decide(decide) => {
                Recognition { member: decide(graph), certificate: Certificate::Absent }
            },
            Run::Certify(certify) => match certify(graph) {
                Some(model) => Recognition {
                    member: true,
                    certificate: Certificate::IntervalModel(model),
                },
                None => Recognition { member: false, certificate: Certificate::Absent },
            },
        }
    }
}

macro_rules! table {
    ($($name:literal => $kind:ident($f:path)),+ $(,)?) => {{
        const TABLE: &[Algorithm] = &[$(Algorithm { name: $name, run: Run::$kind($f) }),+];
        TABLE
    }};
}

impl GraphClass {
    /// All algorithms of the class; the first one is the default.
    pub fn algorithms(self) -> &'static [Algorithm] {
        use GraphClass::*;
        match self {
            AtFree => table!["brute_force" => Decide(Graph::is_at_free)],
            Bipartite => table!["bfs" => Decide(Graph::is_bipartite)],
            BipartitePermutation => {
                table!["chain_both_sides" => Decide(Graph::is_bipartite_permutation)]
            },
            Block => table!["dfs" => Decide(Graph::is_block)],
            Cactus => table!["dfs" => Decide(Graph::is_cactus)],
            Chain => table![
                "degree_sort" => Decide(Graph::is_chain_degree_sort),
                "neighborhood_inclusion" => Decide(Graph::is_chain_neighbourhood_inclusion),
            ],
            Chordal => table![
                "bucket_mcs_peo" => Decide(Graph::is_chordal_bucket_mcs),
                "mcs_peo" => Decide(Graph::is_chordal_mcs),
            ],
            ChordalBipartite => table![
                "fast_bisimplicial" => Decide(Graph::is_chordal_bipartite_fast_bisimplicial),
                "cycle_check" => Decide(Graph::is_chordal_bipartite_cycle_check),
                "bisimplicial" => Decide(Graph::is_chordal_bipartite_bisimplicial),
            ],
            CircularArc => table![
                "mcconnell" => Decide(Graph::is_circular_arc_mcconnell),
                "backtracking" => Decide(Graph::is_circular_arc_backtracking),
            ],
            CoChordal => table!["complement" => Decide(Graph::is_co_chordal)],
            CoComparability => table!["complement" => Decide(Graph::is_co_comparability)],
            CoInterval => table!["complement" => Decide(Graph::is_co_interval)],
            Cochain => table![
                "direct" => Decide(Graph::is_cochain_direct),
                "complement" => Decide(Graph::is_cochain_complement),
            ],
            Cograph => table![
                "partition_refinement" => Decide(Graph::is_cograph_partition_refinement),
                "cotree" => Decide(Graph::is_cograph_cotree),
                "modular_decomposition" => Decide(Graph::is_cograph_modular_decomposition),
            ],
            Comparability => table!["transitive_orientation" => Decide(Graph::is_comparability)],
            DistanceHereditary => table![
                "hash_twins" => Decide(Graph::is_distance_hereditary_hash),
                "hashmap_twins" => Decide(Graph::is_distance_hereditary_hashmap),
                "sorted_twins" => Decide(Graph::is_distance_hereditary_sorted),
            ],
            Interval => table![
                "pq_tree" => Certify(Graph::interval_model),
                "backtracking" => Decide(Graph::is_interval_backtracking),
                "at_free" => Decide(Graph::is_interval_at_free),
            ],
            OuterPlanar => table!["apex_embedding" => Decide(Graph::is_outer_planar)],
            Permutation => table![
                "class_based" => Decide(Graph::is_permutation_class_based),
                "backtracking" => Decide(Graph::is_permutation_backtracking),
            ],
            Planar => table!["path_embedding" => Decide(Graph::is_planar)],
            ProperInterval => table![
                "fast_claw_check" => Decide(Graph::is_proper_interval_fast_claw_check),
                "pq_tree" => Certify(Graph::proper_interval_model),
            ],
            Ptolemaic => table![
                "dh_sorted" => Decide(Graph::is_ptolemaic_sorted),
                "dh_hashmap" => Decide(Graph::is_ptolemaic_hashmap),
            ],
            QuasiThreshold => table!["dfs" => Decide(Graph::is_quasi_threshold)],
            SeriesParallel => table![
                "queue_reduction" => Decide(Graph::is_series_parallel_queue_reduction),
                "minor_check" => Decide(Graph::is_series_parallel_minor_check),
            ],
            Split => table![
                "hammer_simeone" => Decide(Graph::is_split_hammer_simeone),
                "degree_sequence" => Decide(Graph::is_split_degree_sequence),
            ],
            StronglyChordal => table![
                "peo_matrix" => Decide(Graph::is_strongly_chordal_peo_matrix),
                "strong_elimination" => Decide(Graph::is_strongly_chordal_strong_elimination),
            ],
            Threshold => table![
                "degree_sequence_fast" => Decide(Graph::is_threshold_degree_sequence_fast),
                "degree_sequence" => Decide(Graph::is_threshold_degree_sequence),
            ],
            Trapezoid => table!["chain_cover" => Decide(Graph::is_trapezoid_chain_cover)],
            TriviallyPerfect => table!["dfs" => Decide(Graph::is_trivially_perfect)],
            UnitInterval => table!["proper_interval" => Decide(Graph::is_unit_interval)],
            WeaklyChordal => table![
                "complement_bfs" => Decide(Graph::is_weakly_chordal_complement_bfs),
                "co_chordal_bipartite" => Decide(Graph::is_weakly_chordal_co_chordal_bipartite),
            ],
        }
    }

    pub fn default_algorithm(self) -> &'static Algorithm {
        // every table has at least one entry
        &self.algorithms()[0]
    }

    /// Look up an algorithm by name, or the default one for `None`.
    pub fn algorithm(self, name: Option<&str>) -> Result<&'static Algorithm, RecognitionError> {
        let Some(name) = name else {
            return Ok(self.default_algorithm());
        };
        self.algorithms().iter().find(|algorithm| algorithm.name == name).ok_or_else(|| {
            RecognitionError::UnknownAlgorithm {
                class: self,
                requested: name.to_owned(),
                valid: self.algorithms().iter().map(|algorithm| algorithm.name).collect(),
            }
        })
    }
}

/// Run the chosen (or default) algorithm of `class` on `graph`. A certificate is checked
/// against the graph before it is returned.
pub fn recognize(
    class: GraphClass,
    graph: &Graph,
    algorithm: Option<&str>,
) -> Result<Recognition, RecognitionError> {
    let algorithm = class.algorithm(algorithm)?;
    let recognition = algorithm.run(graph);
    recognition.certificate.validate(graph)?;
    Ok(recognition)
}

/// Like [recognize], but everything comes in as raw input: the class name, the number of
/// vertices and the labelled edges. Nothing runs unless all of it is valid.
pub fn recognize_labels(
    class: &str,
    n: usize,
    edges: impl IntoIterator<Item = LabelEdge>,
    algorithm: Option<&str>,
) -> Result<Recognition, RecognitionError> {
    let class: GraphClass = class.parse()?;
    let algorithm = class.algorithm(algorithm)?;
    let graph = Graph::new(n, edges)?;
    recognize(class, &graph, Some(algorithm.name))
}
