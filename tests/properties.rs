//! Randomized checks of the totality, label-determinism and percolation
//! invariants, over generated vocabularies and pattern sets.

use proptest::prelude::*;
use weighted_reweight::{
    build_pattern_trie, substring_matcher, trie_matcher, DirectVocabulary, Semiring, Tropical,
};

fn vocab_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::hash_set(0u32..12, 2..10).prop_map(|s| {
        let mut v: Vec<u32> = s.into_iter().collect();
        v.sort();
        v
    })
}

proptest! {
    /// Every (state, symbol) pair is covered exactly once in a substring
    /// matcher's acceptor, for any vocabulary/pattern pair.
    #[test]
    fn substring_matcher_is_total(vocab in vocab_strategy()) {
        let pattern = {
            let mut v = vocab.clone();
            v.truncate(3.min(v.len()).max(2));
            v
        };
        let vocabulary = DirectVocabulary::new(vocab.clone()).unwrap();
        let a = substring_matcher(&vocabulary, &pattern, Tropical(1.0), true).unwrap();
        for state in a.states() {
            prop_assert_eq!(a.arcs(state).len(), vocab.len());
            let mut labels: Vec<u32> = a.arcs(state).iter().map(|arc| arc.in_label).collect();
            labels.sort();
            labels.dedup();
            prop_assert_eq!(labels.len(), vocab.len());
        }
    }

    /// Same totality/determinism check for the trie matcher, whose arc
    /// construction is independent code from the substring matcher's.
    #[test]
    fn trie_matcher_is_total(
        vocab in vocab_strategy(),
        lens in prop::collection::vec(2usize..5, 1..6),
    ) {
        let vocabulary = DirectVocabulary::new(vocab.clone()).unwrap();
        let mut entries = Vec::new();
        for (i, len) in lens.iter().enumerate() {
            let pattern: Vec<u32> = (0..*len).map(|j| vocab[(i + j) % vocab.len()]).collect();
            entries.push((pattern, Tropical(1.0 + i as f64)));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.dedup_by(|a, b| a.0 == b.0);
        prop_assume!(!entries.is_empty());
        let patterns = build_pattern_trie(entries).unwrap();
        let a = trie_matcher(&vocabulary, &patterns, true).unwrap();
        for state in a.states() {
            prop_assert_eq!(a.arcs(state).len(), vocab.len());
            let mut labels: Vec<u32> = a.arcs(state).iter().map(|arc| arc.in_label).collect();
            labels.sort();
            labels.dedup();
            prop_assert_eq!(labels.len(), vocab.len());
        }
    }

    /// A state's percolated weight can never be `zero`: every state is
    /// reachable from the initial state via the unseen-symbol loopback, so
    /// its weight is always a finite composition of pattern weights and
    /// `one`, never the absorbing element.
    #[test]
    fn percolated_weights_are_never_absorbing(
        vocab in vocab_strategy(),
        lens in prop::collection::vec(2usize..5, 1..5),
    ) {
        let vocabulary = DirectVocabulary::new(vocab.clone()).unwrap();
        let mut entries = Vec::new();
        for (i, len) in lens.iter().enumerate() {
            let pattern: Vec<u32> = (0..*len).map(|j| vocab[(i + j) % vocab.len()]).collect();
            entries.push((pattern, Tropical(1.0 + i as f64)));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.dedup_by(|a, b| a.0 == b.0);
        prop_assume!(!entries.is_empty());
        let patterns = build_pattern_trie(entries).unwrap();
        let a = trie_matcher(&vocabulary, &patterns, true).unwrap();
        for state in a.states() {
            for arc in a.arcs(state) {
                prop_assert_ne!(arc.weight, Tropical::zero());
            }
        }
    }
}
