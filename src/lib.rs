//! Pattern search and k-mer ranking over walks of bidirected sequence graphs.
//!
//! A [`SequenceGraph`] holds segments in both orientations and directed edges
//! between oriented nodes. [`SequenceGraph::linearize`] removes DFS back edges to
//! obtain an acyclic graph, [`SequenceGraph::source`] and
//! [`SequenceGraph::destination`] choose the walk endpoints, and
//! [`SequenceGraph::contains_pattern`] / [`SequenceGraph::top_kmers`] query the
//! texts of all walks between them.

pub mod alphabet;
pub mod bidirected_graph;
pub mod endpoints;
pub mod error;
pub mod gfa;
pub mod kmer_rank;
pub mod linearize;
pub mod logging;
pub mod pattern_search;
pub mod rolling_hash;
pub mod seqwalk;
pub mod walks;

pub use bidirected_graph::{Edge, OrientedNode, SequenceGraph};
pub use error::GraphError;
pub use gfa::{load_gfa, parse_gfa, write_gfa, GfaGraph};
pub use kmer_rank::{KmerCount, KmerTally};
pub use walks::WalkVisitor;
