//! Weighted finite-state automaton toolkit: a substring reweighter, a
//! multi-pattern trie reweighter with percolated weights, and a weighted
//! path sampler, all built on a small from-scratch acceptor/semiring
//! backend rather than delegating to an external FST library.

pub mod acceptor;
pub mod error;
pub mod matching;
pub mod sampling;
pub mod semiring;
pub mod trie;
pub mod util;
pub mod vocabulary;

pub use acceptor::{shortest_distance, Acceptor, AcceptorBuilder, Arc};
pub use error::{Result, WeightedAutomatonError};
pub use matching::{build_pattern_trie, substring_matcher, trie_matcher};
pub use sampling::{deque_samples, sample, sample_transitions, samples, Path, Prefix};
pub use semiring::{Log, Semiring, Tropical};
pub use trie::Trie;
pub use vocabulary::{DirectVocabulary, LabelMap, MaskedVocabulary};
