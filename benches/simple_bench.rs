use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use weighted_reweight::util::path_score;
use weighted_reweight::{
    build_pattern_trie, shortest_distance, substring_matcher, trie_matcher, DirectVocabulary,
    Tropical,
};

fn do_substring_matcher(vocab_size: usize, pattern_len: usize, b: &mut Bencher) {
    let vocab = DirectVocabulary::new(0..vocab_size).unwrap();
    let pattern: Vec<usize> = (0..pattern_len).map(|i| i % 3).collect();
    let query: Vec<usize> = (0..200).map(|i| i % vocab_size).collect();
    let a = substring_matcher(&vocab, &pattern, Tropical(1.0), true).unwrap();
    b.iter(|| path_score(&a, &query).unwrap());
}

fn do_trie_matcher(vocab_size: usize, num_patterns: usize, b: &mut Bencher) {
    let vocab = DirectVocabulary::new(0..vocab_size).unwrap();
    let patterns = build_pattern_trie((0..num_patterns).map(|i| {
        let len = 2 + i % 3;
        ((0..len).map(|j| (i + j) % vocab_size).collect(), Tropical(1.0))
    }))
    .unwrap();
    let query: Vec<usize> = (0..200).map(|i| i % vocab_size).collect();
    let a = trie_matcher(&vocab, &patterns, true).unwrap();
    b.iter(|| path_score(&a, &query).unwrap());
}

fn bench_substring_matcher(c: &mut Criterion) {
    c.bench_function("substring_matcher/vocab=50,pattern=4", |b| {
        do_substring_matcher(50, 4, b)
    });
}

fn bench_trie_matcher(c: &mut Criterion) {
    c.bench_function("trie_matcher/vocab=50,patterns=20", |b| {
        do_trie_matcher(50, 20, b)
    });
}

fn bench_shortest_distance(c: &mut Criterion) {
    let vocab = DirectVocabulary::new(0..20).unwrap();
    let patterns = build_pattern_trie(
        (0..10).map(|i| ((0..3).map(|j| (i + j) % 20).collect(), Tropical(1.0))),
    )
    .unwrap();
    let a = trie_matcher(&vocab, &patterns, true).unwrap();
    c.bench_function("shortest_distance/states=21", |b| {
        b.iter(|| shortest_distance(&a))
    });
}

criterion_group!(
    benches,
    bench_substring_matcher,
    bench_trie_matcher,
    bench_shortest_distance
);
criterion_main!(benches);
