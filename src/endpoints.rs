//! Source and destination selection on an acyclic graph.

use bitvec::prelude::*;

use crate::bidirected_graph::{OrientedNode, SequenceGraph};

impl SequenceGraph {
    /// First node, by ascending segment and forward before reverse, that no edge
    /// targets. `None` for an empty graph or when every node has an incoming edge.
    pub fn source(&self) -> Option<OrientedNode> {
        self.nodes().find(|&node| self.is_source_candidate(node))
    }

    /// Follow outgoing edges from `start`, always taking the first one, until a
    /// node without outgoing edges is reached.
    ///
    /// With several sinks this returns whichever the first-edge descent hits
    /// first, not the closest one. A branch whose edges all lead back onto the
    /// current path (only possible on cyclic input) is abandoned in favour of
    /// the parent's next edge. `None` if no sink is found or `start` is unknown.
    pub fn destination(&self, start: OrientedNode) -> Option<OrientedNode> {
        if !self.contains(start) {
            return None;
        }

        let mut on_path = bitvec![0; self.node_count()];
        on_path.set(start.slot(), true);
        let mut stack = vec![(start, 0usize)];

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let outgoing = self.outgoing(node);
            if outgoing.is_empty() {
                return Some(node);
            }

            let next = outgoing.get(frame.1).copied();
            frame.1 += 1;
            match next {
                Some(next) if !on_path[next.slot()] => {
                    on_path.set(next.slot(), true);
                    stack.push((next, 0));
                }
                Some(_) => {}
                None => {
                    on_path.set(node.slot(), false);
                    stack.pop();
                }
            }
        }
        None
    }
}
