//! Substring search along source-to-destination walks.

use std::ops::ControlFlow;

use crate::alphabet;
use crate::bidirected_graph::{OrientedNode, SequenceGraph};
use crate::rolling_hash::KarpRabin;
use crate::walks::WalkVisitor;

/// Rolling state of one walk.
#[derive(Debug, Clone, Copy)]
struct ScanState {
    hash: u64,
    /// Symbols in the current window, saturates at the pattern length.
    filled: usize,
    matched: bool,
}

struct PatternScan<'p> {
    pattern: &'p [u8],
    kr: KarpRabin,
    target: u64,
    found: bool,
}

impl<'p> PatternScan<'p> {
    fn new(pattern: &'p [u8]) -> Self {
        let kr = KarpRabin::new(pattern.len());
        PatternScan {
            pattern,
            kr,
            target: kr.fingerprint(pattern),
            found: false,
        }
    }

    #[inline]
    fn window_matches(&self, hash: u64, window: &[u8]) -> bool {
        hash == self.target && window == self.pattern
    }
}

impl WalkVisitor for PatternScan<'_> {
    type State = ScanState;

    fn start(&self) -> ScanState {
        ScanState {
            hash: 0,
            filled: 0,
            matched: self.pattern.is_empty(),
        }
    }

    fn extend(&mut self, state: &mut ScanState, text: &[u8], appended_at: usize) {
        let m = self.pattern.len();
        for end in appended_at..text.len() {
            if state.matched {
                return;
            }
            if state.filled < m {
                state.hash = self.kr.push(state.hash, text[end]);
                state.filled += 1;
                if state.filled < m {
                    continue;
                }
            } else {
                state.hash = self.kr.roll(state.hash, text[end - m], text[end]);
            }
            state.matched = self.window_matches(state.hash, &text[end + 1 - m..=end]);
        }
    }

    fn complete(&mut self, state: &ScanState, _text: &[u8]) -> ControlFlow<()> {
        if state.matched {
            self.found = true;
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

impl SequenceGraph {
    /// Whether `pattern` occurs in the concatenated labels of at least one walk
    /// from `source` to `destination`.
    ///
    /// Each walk keeps a Karp-Rabin fingerprint of its trailing window, advanced
    /// as labels are appended; fingerprint hits are confirmed by comparing the
    /// window itself. The search stops at the first walk that reaches
    /// `destination` with a confirmed match. An empty pattern matches as soon as
    /// any walk exists; a pattern with symbols outside A/C/G/T never matches.
    pub fn contains_pattern(
        &self,
        pattern: &str,
        source: OrientedNode,
        destination: OrientedNode,
    ) -> bool {
        let pattern = pattern.as_bytes();
        if !alphabet::is_valid(pattern) {
            log::debug!(
                "pattern {:?} has symbols outside the alphabet, skipping search",
                String::from_utf8_lossy(pattern)
            );
            return false;
        }

        let mut scan = PatternScan::new(pattern);
        let _ = self.visit_walks(source, destination, &mut scan);
        log::debug!(
            "pattern {:?} from {} to {}: {}",
            String::from_utf8_lossy(pattern),
            source,
            destination,
            if scan.found { "found" } else { "not found" }
        );
        scan.found
    }
}
