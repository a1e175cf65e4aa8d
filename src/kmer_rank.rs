//! k-mer frequency ranking over all source-to-destination walks.
//!
//! Each length-k window with k <= 64 is encoded exactly as a base-4 numeral
//! (A=0, T=1, C=2, G=3) packed into a `u128`; longer windows are keyed by
//! their bytes. Either way the key is exact, so unlike the pattern search no
//! collision check is needed. Counts are pooled across every walk.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::ops::ControlFlow;

use serde::Serialize;

use crate::alphabet::{digit_unchecked, is_valid, symbol};
use crate::bidirected_graph::{OrientedNode, SequenceGraph};
use crate::error::{GraphError, Result};
use crate::walks::WalkVisitor;

/// Longest k whose numeral fits in a u128.
pub const MAX_PACKED_K: usize = 64;

/// Encode a window of at most [`MAX_PACKED_K`] valid symbols as a base-4 numeral.
pub fn encode_kmer(window: &[u8]) -> u128 {
    window
        .iter()
        .fold(0, |code, &s| (code << 2) | u128::from(digit_unchecked(s)))
}

/// Decode a numeral back to exactly `k` symbols, left-padded with `A`.
pub fn decode_kmer(mut code: u128, k: usize) -> String {
    let mut kmer = vec![b'A'; k];
    for slot in kmer.iter_mut().rev() {
        if code == 0 {
            break;
        }
        *slot = symbol((code & 0b11) as u64);
        code >>= 2;
    }
    String::from_utf8_lossy(&kmer).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KmerCount {
    pub kmer: String,
    pub count: u64,
}

/// Exact identity of a window: its numeral, or the bytes when k is too long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum KmerKey {
    Packed(u128),
    Window(Box<[u8]>),
}

impl KmerKey {
    fn of(window: &[u8]) -> Self {
        if window.len() <= MAX_PACKED_K {
            KmerKey::Packed(encode_kmer(window))
        } else {
            KmerKey::Window(window.into())
        }
    }

    fn to_kmer(&self, k: usize) -> String {
        match self {
            KmerKey::Packed(code) => decode_kmer(*code, k),
            KmerKey::Window(bytes) => String::from_utf8_lossy(bytes).to_string(),
        }
    }
}

/// Occurrence counts keyed by k-mer, remembering first-seen order.
#[derive(Debug, Clone)]
pub struct KmerTally {
    k: usize,
    index: HashMap<KmerKey, usize>,
    counts: Vec<(KmerKey, u64)>,
}

impl KmerTally {
    fn new(k: usize) -> Self {
        KmerTally {
            k,
            index: HashMap::new(),
            counts: Vec::new(),
        }
    }

    /// Number of distinct k-mers seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts, i.e. the number of windows tallied.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    #[inline]
    fn record(&mut self, key: KmerKey) {
        match self.index.get(&key) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(key.clone(), self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    /// Tally every length-k window of `text`.
    fn record_windows(&mut self, text: &[u8]) {
        let k = self.k;
        if text.len() < k {
            return;
        }
        if k > MAX_PACKED_K {
            for window in text.windows(k) {
                self.record(KmerKey::Window(window.into()));
            }
            return;
        }

        let mask = if k == MAX_PACKED_K {
            u128::MAX
        } else {
            (1u128 << (2 * k)) - 1
        };
        let mut code = encode_kmer(&text[..k]);
        self.record(KmerKey::Packed(code));
        for &incoming in &text[k..] {
            code = ((code << 2) | u128::from(digit_unchecked(incoming))) & mask;
            self.record(KmerKey::Packed(code));
        }
    }

    /// Count of a k-mer given as text; zero if unseen or of the wrong length.
    pub fn count(&self, kmer: &str) -> u64 {
        if kmer.len() != self.k || !is_valid(kmer.as_bytes()) {
            return 0;
        }
        self.index
            .get(&KmerKey::of(kmer.as_bytes()))
            .map_or(0, |&i| self.counts[i].1)
    }

    /// The `n` most frequent k-mers, most frequent first.
    ///
    /// A min-heap of capacity `n` is seeded with the first `n` distinct k-mers;
    /// a later k-mer evicts the minimum only with a strictly larger count, so on
    /// ties the earlier k-mer stays. The order among equal counts is unspecified.
    pub fn top(&self, n: usize) -> Vec<KmerCount> {
        if n == 0 {
            return Vec::new();
        }
        let mut heap: BinaryHeap<Reverse<(u64, &KmerKey)>> = BinaryHeap::with_capacity(n);
        for (key, count) in &self.counts {
            if heap.len() < n {
                heap.push(Reverse((*count, key)));
            } else if let Some(&Reverse((min_count, _))) = heap.peek() {
                if *count > min_count {
                    heap.pop();
                    heap.push(Reverse((*count, key)));
                }
            }
        }

        let mut ranked: Vec<KmerCount> = Vec::with_capacity(heap.len());
        while let Some(Reverse((count, key))) = heap.pop() {
            ranked.push(KmerCount {
                kmer: key.to_kmer(self.k),
                count,
            });
        }
        ranked.reverse();
        ranked
    }
}

struct KmerScan {
    tally: KmerTally,
}

impl WalkVisitor for KmerScan {
    type State = ();

    fn start(&self) {}

    fn extend(&mut self, _state: &mut (), _text: &[u8], _appended_at: usize) {}

    fn complete(&mut self, _state: &(), text: &[u8]) -> ControlFlow<()> {
        self.tally.record_windows(text);
        ControlFlow::Continue(())
    }
}

impl SequenceGraph {
    /// Count every length-`k` window of every walk from `source` to `destination`.
    pub fn count_kmers(
        &self,
        k: usize,
        source: OrientedNode,
        destination: OrientedNode,
    ) -> Result<KmerTally> {
        if k == 0 {
            return Err(GraphError::InvalidKmerLength(k));
        }
        let mut scan = KmerScan {
            tally: KmerTally::new(k),
        };
        let _ = self.visit_walks(source, destination, &mut scan);
        log::debug!(
            "{} windows, {} distinct {}-mers between {} and {}",
            scan.tally.total(),
            scan.tally.distinct(),
            k,
            source,
            destination
        );
        Ok(scan.tally)
    }

    /// The `n` most frequent length-`k` windows over all walks from `source` to
    /// `destination`, by descending count. See [`KmerTally::top`].
    pub fn top_kmers(
        &self,
        k: usize,
        n: usize,
        source: OrientedNode,
        destination: OrientedNode,
    ) -> Result<Vec<KmerCount>> {
        Ok(self.count_kmers(k, source, destination)?.top(n))
    }
}
