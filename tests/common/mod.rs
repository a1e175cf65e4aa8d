#![allow(dead_code)]

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use seqwalk::{OrientedNode, SequenceGraph};

const BASES: &[u8] = b"ACGT";

pub fn random_sequence(rng: &mut StdRng, len: usize) -> String {
    (0..len)
        .map(|_| BASES[rng.gen_range(0..BASES.len())] as char)
        .collect()
}

fn add_random_segments(rng: &mut StdRng, graph: &mut SequenceGraph, segments: usize) {
    for _ in 0..segments {
        let len = rng.gen_range(1..=4);
        graph.add_segment(random_sequence(rng, len)).unwrap();
    }
}

/// Random graph with arbitrary edges, self-loops and cycles included.
pub fn random_graph(rng: &mut StdRng, segments: usize, edges: usize) -> SequenceGraph {
    let mut graph = SequenceGraph::new();
    add_random_segments(rng, &mut graph, segments);
    let slots = graph.node_count();
    for _ in 0..edges {
        let from = OrientedNode::from_slot(rng.gen_range(0..slots));
        let to = OrientedNode::from_slot(rng.gen_range(0..slots));
        graph.add_edge(from, to).unwrap();
    }
    graph
}

/// Random acyclic graph: edges only go forward in a shuffled order of the
/// oriented nodes.
pub fn random_dag(rng: &mut StdRng, segments: usize, edges: usize) -> SequenceGraph {
    let mut graph = SequenceGraph::new();
    add_random_segments(rng, &mut graph, segments);
    let mut order: Vec<usize> = (0..graph.node_count()).collect();
    order.shuffle(rng);
    let mut rank = vec![0; order.len()];
    for (r, &slot) in order.iter().enumerate() {
        rank[slot] = r;
    }

    for _ in 0..edges {
        let a = rng.gen_range(0..order.len());
        let b = rng.gen_range(0..order.len());
        if rank[a] == rank[b] {
            continue;
        }
        let (from, to) = if rank[a] < rank[b] { (a, b) } else { (b, a) };
        graph
            .add_edge(OrientedNode::from_slot(from), OrientedNode::from_slot(to))
            .unwrap();
    }
    graph
}

/// Graph from labels and `(segment, is_reverse)` edge pairs.
pub fn build_graph(labels: &[&str], edges: &[((usize, bool), (usize, bool))]) -> SequenceGraph {
    let mut graph = SequenceGraph::new();
    for label in labels {
        graph.add_segment(label).unwrap();
    }
    for &((a, a_rev), (b, b_rev)) in edges {
        graph
            .add_edge(OrientedNode::new(a, a_rev), OrientedNode::new(b, b_rev))
            .unwrap();
    }
    graph
}

fn collect_walks(
    graph: &SequenceGraph,
    node: OrientedNode,
    destination: OrientedNode,
    prefix: String,
    out: &mut Vec<String>,
) {
    let text = prefix + &graph.label_string(node);
    if node == destination {
        out.push(text);
        return;
    }
    for &next in graph.outgoing(node) {
        collect_walks(graph, next, destination, text.clone(), out);
    }
}

/// Brute-force texts of every walk from `source` to `destination`.
pub fn walk_texts(
    graph: &SequenceGraph,
    source: OrientedNode,
    destination: OrientedNode,
) -> Vec<String> {
    let mut out = Vec::new();
    collect_walks(graph, source, destination, String::new(), &mut out);
    out
}

/// Brute-force sliding window counts pooled over `texts`.
pub fn window_counts(texts: &[String], k: usize) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for text in texts {
        if text.len() < k {
            continue;
        }
        for start in 0..=text.len() - k {
            *counts.entry(text[start..start + k].to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Recursive three-colour cycle detection.
pub fn has_cycle(graph: &SequenceGraph) -> bool {
    fn visit(graph: &SequenceGraph, node: OrientedNode, colour: &mut [u8]) -> bool {
        colour[node.slot()] = 1;
        for &next in graph.outgoing(node) {
            let state = colour[next.slot()];
            match state {
                1 => return true,
                0 if visit(graph, next, colour) => return true,
                _ => {}
            }
        }
        colour[node.slot()] = 2;
        false
    }

    let mut colour = vec![0u8; graph.node_count()];
    graph
        .nodes()
        .any(|node| colour[node.slot()] == 0 && visit(graph, node, &mut colour))
}
