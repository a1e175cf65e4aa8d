//! Error type shared by graph construction, GFA I/O and k-mer queries.

use crate::bidirected_graph::OrientedNode;

#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    #[error("invalid segment label: symbol {symbol:?} at position {position} is not one of A, C, G, T")]
    InvalidSegment { position: usize, symbol: char },
    #[error("unknown node {node}: graph has {segments} segments")]
    UnknownNode { node: OrientedNode, segments: usize },
    #[error("no source node: every oriented node has an incoming edge")]
    NoSource,
    #[error("no destination reachable from {0}")]
    NoDestination(OrientedNode),
    #[error("k-mer length must be at least 1, got {0}")]
    InvalidKmerLength(usize),
    #[error("GFA line {line}: {detail}")]
    Gfa { line: usize, detail: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub fn gfa(line: usize, detail: impl Into<String>) -> Self {
        GraphError::Gfa {
            line,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
