//! Substring reweighter: single-pattern, Aho–Corasick-style failure DFA.
//!
//! Builds a deterministic weighted acceptor over the vocabulary whose
//! accepted language is `V*` and whose path weight scores `alpha` once per
//! overlap-inclusive occurrence of the pattern, `one` otherwise. States
//! track "how much of the pattern has just been seen as a suffix of the
//! input so far" (state `i` = longest suffix of the input scanned so far
//! that is also a prefix of the pattern, of length `i`).

use crate::acceptor::{Acceptor, AcceptorBuilder};
use crate::error::{Result, WeightedAutomatonError};
use crate::semiring::Semiring;
use crate::trie::Trie;
use crate::vocabulary::LabelMap;
use std::collections::HashSet;
use std::hash::Hash;

/// Builds the deterministic acceptor that reweights occurrences of `pattern`
/// by `alpha`.
///
/// `pattern` must contain at least two symbols (a bare unigram carries no
/// "suffix so far" state to track). `sort` requests input-label sorting of
/// the finished acceptor's arcs.
pub fn substring_matcher<Sym, Lab, W, V>(
    vocab: &V,
    pattern: &[Sym],
    alpha: W,
    sort: bool,
) -> Result<Acceptor<Lab, W>>
where
    Sym: Clone + Eq + Hash + Ord,
    Lab: Copy + Eq + Ord,
    W: Semiring,
    V: LabelMap<Sym, Lab>,
{
    if pattern.len() < 2 {
        return Err(WeightedAutomatonError::InvalidPattern {
            len: pattern.len(),
            min: 2,
        });
    }
    if vocab.symbols().is_empty() {
        return Err(WeightedAutomatonError::EmptyVocabulary);
    }

    let k = pattern.len();
    let one = W::one();

    let mut builder: AcceptorBuilder<Lab, W> = AcceptorBuilder::with_capacity(k + 1);
    for _ in 0..=k {
        builder.add_state();
    }
    builder.set_initial(0)?;
    for state in 0..=k {
        builder.set_final(state, one)?;
    }

    // Helper trie: reversed non-empty prefixes of `pattern`, reverse(N[..i]) -> i.
    let mut prefixes: Trie<Sym, usize> = Trie::new();
    for i in 1..=k {
        let mut rev: Vec<Sym> = pattern[..i].to_vec();
        rev.reverse();
        prefixes.insert(rev, i);
    }

    let weight_for = |destination: usize| -> W {
        if destination == k {
            alpha
        } else {
            one
        }
    };

    let mut seen: HashSet<Sym> = HashSet::new();
    for i in 0..k {
        for sym in vocab.symbols().to_vec() {
            if sym == pattern[i] {
                let w = weight_for(i + 1);
                for label in vocab.labels(&sym) {
                    builder.add_arc(i, i + 1, *label, *label, w)?;
                }
            } else if seen.contains(&sym) {
                let mut key: Vec<Sym> = pattern[..i].to_vec();
                key.push(sym.clone());
                key.reverse();
                let (_, sid) = prefixes.longest_prefix_item(&key, (Vec::new(), 0));
                let w = weight_for(sid);
                for label in vocab.labels(&sym) {
                    builder.add_arc(i, sid, *label, *label, w)?;
                }
            } else {
                for label in vocab.labels(&sym) {
                    builder.add_arc(i, 0, *label, *label, one)?;
                }
            }
        }
        seen.insert(pattern[i].clone());
    }

    // Terminal state k.
    for sym in vocab.symbols().to_vec() {
        if seen.contains(&sym) {
            let mut key: Vec<Sym> = pattern.to_vec();
            key.push(sym.clone());
            key.reverse();
            let (_, sid) = prefixes.longest_prefix_item(&key, (Vec::new(), 0));
            let w = weight_for(sid);
            for label in vocab.labels(&sym) {
                builder.add_arc(k, sid, *label, *label, w)?;
            }
        } else {
            for label in vocab.labels(&sym) {
                builder.add_arc(k, 0, *label, *label, one)?;
            }
        }
    }

    if sort {
        builder.arc_sort_input()?;
    }
    builder.build()
}
