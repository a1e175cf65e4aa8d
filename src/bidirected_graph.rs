use std::fmt;

use crate::alphabet::{reverse_complement, validate};
use crate::error::{GraphError, Result};

/// An oriented reference to a segment in the graph.
/// The least significant bit (LSB) indicates orientation:
/// - 0 = forward strand
/// - 1 = reverse strand
/// The remaining bits store the segment index, so the raw value doubles as the
/// node's dense slot `2 * segment + orientation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrientedNode(u64);

impl OrientedNode {
    /// Create a node for `segment` in the given orientation
    pub fn new(segment: usize, is_reverse: bool) -> Self {
        let mut value = (segment as u64) << 1;
        if is_reverse {
            value |= 1;
        }
        OrientedNode(value)
    }

    /// Forward orientation of `segment`
    pub fn forward(segment: usize) -> Self {
        Self::new(segment, false)
    }

    /// Reverse orientation of `segment`
    pub fn reverse(segment: usize) -> Self {
        Self::new(segment, true)
    }

    /// Index of the underlying segment
    pub fn segment(&self) -> usize {
        (self.0 >> 1) as usize
    }

    /// Whether this is the reverse-complement orientation
    pub fn is_reverse(&self) -> bool {
        (self.0 & 1) == 1
    }

    /// Orientation sign as a char ('+' or '-')
    pub fn orientation_char(&self) -> char {
        if self.is_reverse() {
            '-'
        } else {
            '+'
        }
    }

    /// Dense index of this node, `2 * segment + orientation`
    #[inline]
    pub fn slot(&self) -> usize {
        self.0 as usize
    }

    /// Inverse of [`OrientedNode::slot`]
    #[inline]
    pub fn from_slot(slot: usize) -> Self {
        OrientedNode(slot as u64)
    }
}

impl fmt::Display for OrientedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.segment(), self.orientation_char())
    }
}

/// A directed edge between two oriented nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub from: OrientedNode,
    pub to: OrientedNode,
}

impl Edge {
    pub fn new(from: OrientedNode, to: OrientedNode) -> Self {
        Edge { from, to }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Per-orientation state of a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeRecord {
    label: Vec<u8>,
    /// Cleared by the first edge that targets this node, never set again.
    source_candidate: bool,
    outgoing: Vec<OrientedNode>,
}

impl NodeRecord {
    fn new(label: Vec<u8>) -> Self {
        NodeRecord {
            label,
            source_candidate: true,
            outgoing: Vec::new(),
        }
    }
}

/// A bidirected sequence graph.
///
/// Every segment contributes two oriented nodes: the forward node carries the
/// segment text and the reverse node its reverse complement. Edges are directed
/// and leave from one specific orientation; parallel edges are kept as-is.
/// The graph only grows: segments and edges are appended, never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceGraph {
    nodes: Vec<NodeRecord>,
    edge_count: usize,
}

impl SequenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(segments: usize) -> Self {
        SequenceGraph {
            nodes: Vec::with_capacity(2 * segments),
            edge_count: 0,
        }
    }

    /// Append a segment and return its index. Both orientations start out as
    /// source candidates.
    pub fn add_segment(&mut self, text: impl AsRef<[u8]>) -> Result<usize> {
        let text = text.as_ref();
        validate(text)?;
        Ok(self.push_segment(text.to_vec()))
    }

    /// Append an already validated segment.
    pub(crate) fn push_segment(&mut self, forward: Vec<u8>) -> usize {
        let index = self.segment_count();
        let reverse = reverse_complement(&forward);
        self.nodes.push(NodeRecord::new(forward));
        self.nodes.push(NodeRecord::new(reverse));
        index
    }

    /// Append the directed edge `from -> to`. `to` permanently stops being a
    /// source candidate.
    pub fn add_edge(&mut self, from: OrientedNode, to: OrientedNode) -> Result<()> {
        for node in [from, to] {
            if !self.contains(node) {
                return Err(GraphError::UnknownNode {
                    node,
                    segments: self.segment_count(),
                });
            }
        }
        self.push_edge(from, to);
        Ok(())
    }

    /// Append an edge whose endpoints are known to exist.
    pub(crate) fn push_edge(&mut self, from: OrientedNode, to: OrientedNode) {
        self.nodes[from.slot()].outgoing.push(to);
        self.nodes[to.slot()].source_candidate = false;
        self.edge_count += 1;
    }

    /// Label of an oriented node.
    ///
    /// # Panics
    /// Panics if `node` is not part of the graph.
    #[inline]
    pub fn label(&self, node: OrientedNode) -> &[u8] {
        &self.nodes[node.slot()].label
    }

    pub fn label_string(&self, node: OrientedNode) -> String {
        String::from_utf8_lossy(self.label(node)).to_string()
    }

    pub fn segment_count(&self) -> usize {
        self.nodes.len() / 2
    }

    /// Number of oriented nodes, always twice the segment count.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: OrientedNode) -> bool {
        node.slot() < self.nodes.len()
    }

    /// Whether no edge has targeted `node` so far. False for unknown nodes.
    pub fn is_source_candidate(&self, node: OrientedNode) -> bool {
        self.nodes
            .get(node.slot())
            .map_or(false, |record| record.source_candidate)
    }

    /// Destinations of the edges leaving `node`, in insertion order.
    /// Empty for unknown nodes.
    #[inline]
    pub fn outgoing(&self, node: OrientedNode) -> &[OrientedNode] {
        match self.nodes.get(node.slot()) {
            Some(record) => &record.outgoing,
            None => &[],
        }
    }

    /// All oriented nodes by ascending segment, forward before reverse.
    pub fn nodes(&self) -> impl Iterator<Item = OrientedNode> + '_ {
        (0..self.nodes.len()).map(OrientedNode::from_slot)
    }

    /// All edges, grouped by source node in `nodes()` order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes().flat_map(move |from| {
            self.outgoing(from)
                .iter()
                .map(move |&to| Edge::new(from, to))
        })
    }
}
