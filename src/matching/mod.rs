//! Matchers: deterministic weighted acceptors that reweight occurrences of
//! patterns in a vocabulary's language.

pub mod substring;
pub mod trie_matcher;

pub use substring::substring_matcher;
pub use trie_matcher::{build_pattern_trie, trie_matcher};
