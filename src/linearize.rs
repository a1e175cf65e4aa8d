//! Cycle removal by dropping DFS back edges.
//!
//! A depth-first search is started from every oriented node that has not been
//! reached yet, in `nodes()` order. Tree edges and forward/cross edges are copied
//! into a fresh graph; an edge into a node that is still on the active DFS path
//! closes a cycle and is left out. Which edges get cut depends on that visitation
//! order: this is not a strongly-connected-component condensation, and a
//! different root or edge order could cut a different (equally valid) set.

use bitvec::prelude::*;

use crate::bidirected_graph::{OrientedNode, SequenceGraph};

impl SequenceGraph {
    /// Build an acyclic copy of this graph.
    ///
    /// Returns the new graph and whether any edge had to be dropped, i.e. whether
    /// this graph was cyclic. Segment indices and labels are preserved, and the
    /// kept edges stay in their original per-node order, so an acyclic input
    /// comes back unchanged.
    pub fn linearize(&self) -> (SequenceGraph, bool) {
        let mut acyclic = SequenceGraph::with_capacity(self.segment_count());
        for segment in 0..self.segment_count() {
            acyclic.push_segment(self.label(OrientedNode::forward(segment)).to_vec());
        }

        let mut visited = bitvec![0; self.node_count()];
        let mut on_stack = bitvec![0; self.node_count()];
        let mut dropped = 0usize;
        // (node, index of the next outgoing edge to examine)
        let mut stack: Vec<(OrientedNode, usize)> = Vec::new();

        for root in self.nodes() {
            if visited[root.slot()] {
                continue;
            }
            visited.set(root.slot(), true);
            on_stack.set(root.slot(), true);
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let node = frame.0;
                let next = self.outgoing(node).get(frame.1).copied();
                frame.1 += 1;

                match next {
                    Some(next) if !visited[next.slot()] => {
                        acyclic.push_edge(node, next);
                        visited.set(next.slot(), true);
                        on_stack.set(next.slot(), true);
                        stack.push((next, 0));
                    }
                    Some(next) if !on_stack[next.slot()] => {
                        acyclic.push_edge(node, next);
                    }
                    Some(next) => {
                        log::debug!("dropping back edge {} -> {}", node, next);
                        dropped += 1;
                    }
                    None => {
                        on_stack.set(node.slot(), false);
                        stack.pop();
                    }
                }
            }
        }

        if dropped > 0 {
            log::info!(
                "Removed {} back edge(s); {} of {} edges kept",
                dropped,
                acyclic.edge_count(),
                self.edge_count()
            );
        }
        (acyclic, dropped > 0)
    }

    /// Exhaustive cycle check (Kahn's algorithm over oriented nodes).
    pub fn is_acyclic(&self) -> bool {
        let mut in_degree = vec![0usize; self.node_count()];
        for edge in self.edges() {
            in_degree[edge.to.slot()] += 1;
        }

        let mut ready: Vec<OrientedNode> =
            self.nodes().filter(|n| in_degree[n.slot()] == 0).collect();
        let mut removed = 0usize;
        while let Some(node) = ready.pop() {
            removed += 1;
            for &next in self.outgoing(node) {
                in_degree[next.slot()] -= 1;
                if in_degree[next.slot()] == 0 {
                    ready.push(next);
                }
            }
        }
        removed == self.node_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidirected_graph::Edge;

    fn fwd(i: usize) -> OrientedNode {
        OrientedNode::forward(i)
    }

    fn graph_with(labels: &[&str], edges: &[(OrientedNode, OrientedNode)]) -> SequenceGraph {
        let mut graph = SequenceGraph::new();
        for label in labels {
            graph.add_segment(label).unwrap();
        }
        for &(from, to) in edges {
            graph.add_edge(from, to).unwrap();
        }
        graph
    }

    #[test]
    fn test_acyclic_graph_is_unchanged() {
        let graph = graph_with(
            &["ACG", "TT", "GA"],
            &[
                (fwd(0), fwd(1)),
                (fwd(0), fwd(2)),
                (fwd(1), fwd(2)),
                (OrientedNode::reverse(2), OrientedNode::reverse(0)),
            ],
        );
        assert!(graph.is_acyclic());
        let (acyclic, was_cyclic) = graph.linearize();
        assert!(!was_cyclic);
        assert_eq!(acyclic, graph);
    }

    #[test]
    fn test_loop_back_to_entry_drops_only_the_back_edge() {
        // 0+ -> 1+ -> 2+ -> 0+, plus the forward edge 0+ -> 2+
        let graph = graph_with(
            &["A", "C", "G"],
            &[
                (fwd(0), fwd(1)),
                (fwd(1), fwd(2)),
                (fwd(2), fwd(0)),
                (fwd(0), fwd(2)),
            ],
        );
        assert!(!graph.is_acyclic());

        let (acyclic, was_cyclic) = graph.linearize();
        assert!(was_cyclic);
        assert!(acyclic.is_acyclic());
        let kept: Vec<Edge> = acyclic.edges().collect();
        assert_eq!(
            kept,
            vec![
                Edge::new(fwd(0), fwd(1)),
                Edge::new(fwd(0), fwd(2)),
                Edge::new(fwd(1), fwd(2)),
            ]
        );
    }

    #[test]
    fn test_self_loop_is_dropped() {
        let graph = graph_with(&["AC"], &[(fwd(0), fwd(0))]);
        let (acyclic, was_cyclic) = graph.linearize();
        assert!(was_cyclic);
        assert_eq!(acyclic.edge_count(), 0);
        assert_eq!(acyclic.label(fwd(0)), b"AC");
        // The dropped edge was the only incoming one.
        assert!(acyclic.is_source_candidate(fwd(0)));
    }

    #[test]
    fn test_cycle_through_both_orientations() {
        // 0+ -> 1- -> 0+ via the reverse orientation of segment 1
        let graph = graph_with(
            &["AT", "GC"],
            &[
                (fwd(0), OrientedNode::reverse(1)),
                (OrientedNode::reverse(1), fwd(0)),
            ],
        );
        let (acyclic, was_cyclic) = graph.linearize();
        assert!(was_cyclic);
        assert_eq!(
            acyclic.edges().collect::<Vec<_>>(),
            vec![Edge::new(fwd(0), OrientedNode::reverse(1))]
        );
    }

    #[test]
    fn test_empty_graph() {
        let (acyclic, was_cyclic) = SequenceGraph::new().linearize();
        assert!(!was_cyclic);
        assert!(acyclic.is_empty());
        assert!(acyclic.is_acyclic());
    }
}
