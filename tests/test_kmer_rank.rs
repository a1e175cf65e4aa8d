mod common;

use common::{build_graph, random_dag, walk_texts, window_counts};
use rand::rngs::StdRng;
use rand::SeedableRng;
use seqwalk::{GraphError, OrientedNode};

#[test]
fn test_two_segment_scenario() {
    let graph = build_graph(&["ATG", "CAT"], &[((0, false), (1, false))]);
    let source = graph.source().unwrap();
    let destination = graph.destination(source).unwrap();

    let top = graph.top_kmers(2, 10, source, destination).unwrap();
    assert_eq!(top.len(), 4);
    assert_eq!(top[0].kmer, "AT");
    assert_eq!(top[0].count, 2);

    let mut rest: Vec<(String, u64)> = top[1..]
        .iter()
        .map(|kc| (kc.kmer.clone(), kc.count))
        .collect();
    rest.sort();
    assert_eq!(
        rest,
        vec![
            ("CA".to_string(), 1),
            ("GC".to_string(), 1),
            ("TG".to_string(), 1)
        ]
    );
}

#[test]
fn test_agrees_with_brute_force_on_random_dags() {
    let mut rng = StdRng::seed_from_u64(1234);
    for round in 0..120 {
        let graph = random_dag(&mut rng, 2 + round % 5, 3 + round % 8);
        let source = graph.source().unwrap();
        let destination = graph.destination(source).unwrap();
        let texts = walk_texts(&graph, source, destination);

        for k in 1..=4 {
            let expected = window_counts(&texts, k);
            let tally = graph.count_kmers(k, source, destination).unwrap();
            assert_eq!(tally.distinct(), expected.len(), "round {} k {}", round, k);
            for (kmer, &count) in &expected {
                assert_eq!(tally.count(kmer), count, "round {} k {} {}", round, k, kmer);
            }

            for n in [1, 3, 10] {
                let top = graph.top_kmers(k, n, source, destination).unwrap();
                assert_eq!(top.len(), n.min(expected.len()));
                assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
                for kc in &top {
                    assert_eq!(kc.kmer.len(), k);
                    assert_eq!(expected[&kc.kmer], kc.count);
                }
                // Nothing left out beats the weakest entry that made the cut.
                if let Some(weakest) = top.last() {
                    for (kmer, &count) in &expected {
                        if top.iter().all(|kc| &kc.kmer != kmer) {
                            assert!(count <= weakest.count, "round {} k {} n {}", round, k, n);
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_kmer_of_zero_symbols_keeps_its_length() {
    let graph = build_graph(&["AAAA", "AT"], &[((0, false), (1, false))]);
    let top = graph
        .top_kmers(3, 10, OrientedNode::forward(0), OrientedNode::forward(1))
        .unwrap();
    // "AAAAAT": AAA three times, then AAT.
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].kmer, "AAA");
    assert_eq!(top[0].kmer.len(), 3);
    assert_eq!(top[0].count, 3);
    assert_eq!(top[1].kmer, "AAT");
    assert_eq!(top[1].count, 1);
}

#[test]
fn test_reverse_walk_counts() {
    // 1- -> 0-: rc("CAT") + rc("ATG") = "ATGCAT"
    let graph = build_graph(&["ATG", "CAT"], &[((1, true), (0, true))]);
    let tally = graph
        .count_kmers(2, OrientedNode::reverse(1), OrientedNode::reverse(0))
        .unwrap();
    assert_eq!(tally.count("AT"), 2);
    assert_eq!(tally.total(), 5);
}

#[test]
fn test_lengths_beyond_a_machine_word() {
    let repeat = "ACGT".repeat(10);
    let graph = build_graph(&[repeat.as_str(), repeat.as_str()], &[((0, false), (1, false))]);
    let (source, destination) = (OrientedNode::forward(0), OrientedNode::forward(1));
    let texts = walk_texts(&graph, source, destination);

    // Up to 64 packs into a numeral, 80 falls back to byte keys.
    for k in [36, 40, 80] {
        let expected = window_counts(&texts, k);
        let tally = graph.count_kmers(k, source, destination).unwrap();
        assert_eq!(tally.distinct(), expected.len(), "k {}", k);
        for (kmer, &count) in &expected {
            assert_eq!(tally.count(kmer), count, "k {} {}", k, kmer);
        }
    }

    // "ACGT" x 20: 41 windows of length 40 at four phases.
    let top = graph.top_kmers(40, 10, source, destination).unwrap();
    let counts: Vec<u64> = top.iter().map(|kc| kc.count).collect();
    assert_eq!(counts, vec![11, 10, 10, 10]);
    assert_eq!(top[0].kmer, repeat);
    assert!(graph.top_kmers(81, 10, source, destination).unwrap().is_empty());
}

#[test]
fn test_zero_length_is_rejected() {
    let graph = build_graph(&["ATG"], &[]);
    let node = OrientedNode::forward(0);
    assert!(matches!(
        graph.top_kmers(0, 10, node, node),
        Err(GraphError::InvalidKmerLength(0))
    ));
}
