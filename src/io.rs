//! The plain text exchange format.
//!
//! A graph is `n m` followed by `m` edges `u v` on the labels `1..=n`, all separated by
//! whitespace. A recognition answer is `NO`, or `YES` followed by one `l r` line per
//! vertex if it carries an interval model. An enumeration is the number of graphs and
//! then one line `m u1 v1 u2 v2 ...` per graph.

use std::{fmt::Write, num::ParseIntError};

use crate::{
    certificate::Certificate,
    graph::{Graph, InvalidGraph, LabelEdge},
    registry::Recognition,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("missing the {0}")]
    MissingToken(&'static str),
    #[error("invalid {what} \"{token}\": {source}")]
    InvalidToken {
        what: &'static str,
        token: String,
        source: ParseIntError,
    },
    #[error("expected {expected} edges, found {got}")]
    EdgeCountMismatch { expected: usize, got: usize },
    #[error(transparent)]
    InvalidGraph(#[from] InvalidGraph),
}

fn parse_token<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &'static str,
) -> Result<usize, ParseError> {
    let token = tokens.next().ok_or(ParseError::MissingToken(what))?;
    token.parse().map_err(|source| ParseError::InvalidToken {
        what,
        token: token.to_owned(),
        source,
    })
}

pub fn parse_graph(input: &str) -> Result<Graph, ParseError> {
    let mut tokens = input.split_ascii_whitespace();
    let n = parse_token(&mut tokens, "number of vertices")?;
    let m = parse_token(&mut tokens, "number of edges")?;
    let rest: Vec<&str> = tokens.collect();
    if rest.len() % 2 == 1 {
        return Err(ParseError::MissingToken("second endpoint of the last edge"));
    }
    if rest.len() / 2 != m {
        return Err(ParseError::EdgeCountMismatch { expected: m, got: rest.len() / 2 });
    }
    let mut tokens = rest.into_iter();
    let mut edges: Vec<LabelEdge> = Vec::with_capacity(m);
    for _ in 0..m {
        let u = parse_token(&mut tokens, "edge endpoint")?;
        let v = parse_token(&mut tokens, "edge endpoint")?;
        edges.push((u, v));
    }
    Ok(Graph::new(n, edges)?)
}

pub fn format_recognition(recognition: &Recognition) -> String {
    if !recognition.member {
        return "NO\n".into();
    }
    let mut ret = String::from("YES\n");
    if let Certificate::IntervalModel(model) = &recognition.certificate {
        for (l, r) in model.intervals.iter() {
            // writing into a String cannot fail
            let _ = writeln!(ret, "{l} {r}");
        }
    }
    ret
}

fn write_graph_line(out: &mut String, graph: &Graph) {
    let _ = write!(out, "{}", graph.num_edges());
    for (u, v) in graph.iter_label_edges() {
        let _ = write!(out, " {u} {v}");
    }
}

/// `m u1 v1 u2 v2 ...` with `u < v`, edges in lexicographic order.
pub fn format_graph_line(graph: &Graph) -> String {
    let mut ret = String::new();
    write_graph_line(&mut ret, graph);
    ret
}

/// Writes the graphs one line at a time as they come, and puts the count in front once
/// the stream is exhausted; stops at the first error.
pub fn format_enumeration<E>(
    graphs: impl IntoIterator<Item = Result<Graph, E>>,
) -> Result<String, E> {
    let mut ret = String::new();
    let mut count = 0usize;
    for graph in graphs {
        write_graph_line(&mut ret, &graph?);
        ret.push('\n');
        count += 1;
    }
    ret.insert_str(0, &format!("{count}\n"));
    Ok(ret)
}
