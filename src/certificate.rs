//! Certificates that come with a positive recognition answer.

use serde::{Deserialize, Serialize};

use crate::graph::{to_label, Graph, Label};

/// What a recognizer returns next to its yes/no answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Certificate {
    #[default]
    Absent,
    IntervalModel(IntervalModel),
}

impl Certificate {
    pub fn is_absent(&self) -> bool {
        matches!(self, Certificate::Absent)
    }

    pub fn validate(&self, graph: &Graph) -> Result<(), CertificateError> {
        match self {
            Certificate::Absent => Ok(()),
            Certificate::IntervalModel(model) => model.validate(graph),
        }
    }
}

/// One closed interval `(l, r)` per vertex, indexed by node (so the interval of label `i`
/// is at index `i - 1`); the endpoints are 1-based positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalModel {
    pub intervals: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CertificateError {
    #[error("the model has {got} intervals but the graph has {expected} vertices")]
    WrongLength { expected: usize, got: usize },
    #[error("interval ({l}, {r}) of vertex {vertex} is reversed")]
    Reversed { vertex: Label, l: usize, r: usize },
    #[error("vertices {a} and {b} are adjacent but their intervals are disjoint")]
    Disjoint { a: Label, b: Label },
    #[error("vertices {a} and {b} are not adjacent but their intervals overlap")]
    Overlap { a: Label, b: Label },
}

impl IntervalModel {
    pub fn new(intervals: Vec<(usize, usize)>) -> Self {
        Self { intervals }
    }

    #[inline]
    pub fn overlap(&self, a: usize, b: usize) -> bool {
        let ((la, ra), (lb, rb)) = (self.intervals[a], self.intervals[b]);
        !(ra < lb || rb < la)
    }

    /// Check that exactly the adjacent vertex pairs have overlapping intervals.
    pub fn validate(&self, graph: &Graph) -> Result<(), CertificateError> {
        if self.intervals.len() != graph.len() {
            return Err(CertificateError::WrongLength {
                expected: graph.len(),
                got: self.intervals.len(),
            });
        }
        for (node, &(l, r)) in self.intervals.iter().enumerate() {
            if l > r {
                return Err(CertificateError::Reversed { vertex: to_label(node), l, r });
            }
        }
        for a in graph.iter_nodes() {
            for b in a + 1..graph.len() {
                let (la, lb) = (to_label(a), to_label(b));
                match (graph.is_adjacent(a, b), self.overlap(a, b)) {
                    (true, false) => return Err(CertificateError::Disjoint { a: la, b: lb }),
                    (false, true) => return Err(CertificateError::Overlap { a: la, b: lb }),
                    _ => {},
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::*;

    #[test]
    fn validation() {
        let graph = path(3);
        let model = IntervalModel::new(vec![(1, 1), (1, 2), (2, 2)]);
        assert_eq!(model.validate(&graph), Ok(()));
        assert_eq!(Certificate::IntervalModel(model).validate(&graph), Ok(()));
        assert_eq!(Certificate::Absent.validate(&graph), Ok(()));

        let model = IntervalModel::new(vec![(1, 1), (1, 2)]);
        assert_eq!(
            model.validate(&graph),
            Err(CertificateError::WrongLength { expected: 3, got: 2 })
        );

        let model = IntervalModel::new(vec![(1, 1), (2, 1), (2, 2)]);
        assert_eq!(
            model.validate(&graph),
            Err(CertificateError::Reversed { vertex: 2, l: 2, r: 1 })
        );

        // touching endpoints count as overlap
        let model = IntervalModel::new(vec![(1, 2), (2, 3), (1, 3)]);
        assert_eq!(
            model.validate(&graph),
            Err(CertificateError::Overlap { a: 1, b: 3 })
        );
        let model = IntervalModel::new(vec![(1, 1), (2, 2), (3, 3)]);
        assert_eq!(
            model.validate(&graph),
            Err(CertificateError::Disjoint { a: 1, b: 2 })
        );
    }

    #[test]
    fn serialization() {
        let certificate = Certificate::IntervalModel(IntervalModel::new(vec![(1, 2)]));
        let json = serde_json::to_string(&certificate).unwrap();
        assert_eq!(json, r#"{"kind":"interval_model","intervals":[[1,2]]}"#);
        assert_eq!(serde_json::from_str::<Certificate>(&json).unwrap(), certificate);
        assert_eq!(serde_json::to_string(&Certificate::Absent).unwrap(), r#"{"kind":"absent"}"#);
    }
}
