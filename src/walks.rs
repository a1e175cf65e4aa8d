//! Enumeration of every walk between two oriented nodes.
//!
//! Walks are explored depth first with an explicit stack of frames instead of
//! recursion. All frames share one text buffer holding the concatenated labels
//! of the current walk; each frame remembers where its own label starts so that
//! backtracking is a truncation. Visitor state is copied into each frame on
//! descent, so a sibling branch always starts from its parent's state.

use std::ops::ControlFlow;

use crate::bidirected_graph::{OrientedNode, SequenceGraph};

/// Receives the text of walks as they are built.
pub trait WalkVisitor {
    /// Per-walk state, copied on every descent.
    type State: Clone;

    /// State before any label has been appended.
    fn start(&self) -> Self::State;

    /// Called after a node's label was appended to `text`; the new label is
    /// `text[appended_at..]`.
    fn extend(&mut self, state: &mut Self::State, text: &[u8], appended_at: usize);

    /// Called when a walk reaches the destination. Returning `Break` stops the
    /// enumeration.
    fn complete(&mut self, state: &Self::State, text: &[u8]) -> ControlFlow<()>;
}

struct Frame<S> {
    node: OrientedNode,
    next_edge: usize,
    text_start: usize,
    state: S,
}

impl SequenceGraph {
    /// Visit every walk from `source` to `destination`.
    ///
    /// A walk stops at `destination` even if it has outgoing edges, and branches
    /// ending in any other sink are discarded. The number of walks can grow
    /// exponentially with the number of branch points. The graph must be
    /// acyclic: on a cyclic graph this does not terminate.
    pub fn visit_walks<V: WalkVisitor>(
        &self,
        source: OrientedNode,
        destination: OrientedNode,
        visitor: &mut V,
    ) -> ControlFlow<()> {
        if !self.contains(source) || !self.contains(destination) {
            return ControlFlow::Continue(());
        }

        let mut text: Vec<u8> = Vec::new();
        let mut stack: Vec<Frame<V::State>> = Vec::new();
        let mut pending = Some((source, visitor.start()));

        loop {
            if let Some((node, mut state)) = pending.take() {
                let text_start = text.len();
                text.extend_from_slice(self.label(node));
                visitor.extend(&mut state, &text, text_start);

                if node == destination {
                    let flow = visitor.complete(&state, &text);
                    if flow.is_break() {
                        return flow;
                    }
                    text.truncate(text_start);
                } else {
                    stack.push(Frame {
                        node,
                        next_edge: 0,
                        text_start,
                        state,
                    });
                }
            }

            let Some(frame) = stack.last_mut() else {
                return ControlFlow::Continue(());
            };
            match self.outgoing(frame.node).get(frame.next_edge) {
                Some(&next) => {
                    frame.next_edge += 1;
                    pending = Some((next, frame.state.clone()));
                }
                None => {
                    text.truncate(frame.text_start);
                    stack.pop();
                }
            }
        }
    }
}
