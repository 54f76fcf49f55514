//! Trie reweighter: multi-pattern matcher with percolated weights.
//!
//! Unlike the substring matcher, patterns here already carry their own
//! weight and several patterns can share prefixes or be substrings of one
//! another. States are the reversed prefixes of every pattern (plus the
//! empty prefix); a state's weight is the semiring sum of every pattern
//! weight whose reversed prefix the state extends, so overlapping matches
//! accumulate.

use crate::acceptor::{Acceptor, AcceptorBuilder};
use crate::error::{Result, WeightedAutomatonError};
use crate::semiring::Semiring;
use crate::trie::Trie;
use crate::vocabulary::LabelMap;
use std::collections::HashSet;
use std::hash::Hash;

/// Builds a pattern trie from `(pattern, weight)` pairs, rejecting a pattern
/// sequence that repeats (ambiguous which weight should apply) and any
/// empty pattern (no reversed prefixes to build states from).
pub fn build_pattern_trie<Sym, W>(
    entries: impl IntoIterator<Item = (Vec<Sym>, W)>,
) -> Result<Trie<Sym, W>>
where
    Sym: Ord + Clone,
    W: Clone,
{
    let mut trie = Trie::new();
    for (pattern, weight) in entries {
        if pattern.is_empty() {
            return Err(WeightedAutomatonError::InvalidPattern { len: 0, min: 1 });
        }
        if trie.contains_key(&pattern) {
            return Err(WeightedAutomatonError::DuplicatePattern);
        }
        trie.insert(pattern, weight);
    }
    Ok(trie)
}

/// Builds the deterministic acceptor that reweights every pattern in
/// `patterns` by its associated weight, percolating the weight of a shorter
/// pattern into every longer pattern that extends it.
///
/// `patterns` must be built with [`build_pattern_trie`] (or otherwise
/// contain only non-empty, distinct pattern keys) and iterates in ascending
/// lexicographic order, which the percolation pass below depends on to see
/// every prefix before the patterns that extend it.
pub fn trie_matcher<Sym, Lab, W, V>(
    vocab: &V,
    patterns: &Trie<Sym, W>,
    sort: bool,
) -> Result<Acceptor<Lab, W>>
where
    Sym: Clone + Eq + Hash + Ord,
    Lab: Copy + Eq + Ord,
    W: Semiring,
    V: LabelMap<Sym, Lab>,
{
    if vocab.symbols().is_empty() {
        return Err(WeightedAutomatonError::EmptyVocabulary);
    }
    if patterns.is_empty() {
        return Err(WeightedAutomatonError::InvalidPattern { len: 0, min: 1 });
    }

    let one = W::one();
    let mut seen: HashSet<Sym> = HashSet::new();
    let mut states: Trie<Sym, usize> = Trie::new();
    states.insert(Vec::new(), 0);
    let mut weights: Vec<W> = vec![one];
    let mut finals: HashSet<usize> = HashSet::new();
    finals.insert(0);

    for (pattern, weight) in patterns.iter() {
        for sym in pattern {
            seen.insert(sym.clone());
        }
        let head_len = if pattern.len() <= 1 {
            0
        } else {
            let (head, _) =
                patterns.longest_prefix_item(&pattern[..pattern.len() - 1], (Vec::new(), one));
            head.len()
        };
        for i in head_len..pattern.len().saturating_sub(1) {
            let mut rprefix: Vec<Sym> = pattern[..=i].to_vec();
            rprefix.reverse();
            let sid = weights.len();
            states.insert(rprefix, sid);
            weights.push(one);
        }
        let mut rpattern = pattern.clone();
        rpattern.reverse();
        let sid = weights.len();
        states.insert(rpattern, sid);
        weights.push(*weight);
        finals.insert(sid);
    }

    // Percolate: visiting reversed prefixes in ascending lexicographic
    // order guarantees every proper prefix of a state has already folded in
    // its own parent by the time that state is visited. The fold is the
    // semiring's `times`, not `plus`: a state's weight is the cost of the
    // pattern ending there composed with whatever shorter match is still
    // active in its longest matching suffix, not a choice between them.
    let percolation_order: Vec<(Vec<Sym>, usize)> = states
        .iter()
        .map(|(k, v)| (k.clone(), *v))
        .collect();
    for (rprefix, sid) in percolation_order {
        let (_, parent_sid) = states.longest_proper_prefix_item(&rprefix, (Vec::new(), 0));
        if parent_sid != sid {
            weights[sid] = weights[sid].times(weights[parent_sid]);
        }
    }

    let num_states = weights.len();
    let mut builder: AcceptorBuilder<Lab, W> = AcceptorBuilder::with_capacity(num_states);
    for _ in 0..num_states {
        builder.add_state();
    }
    builder.set_initial(0)?;
    for &sid in &finals {
        // Final states carry no weight of their own: the percolated weight
        // of a state is spent on the arcs leading into it, exactly as
        // substring_matcher spends its weight on arcs rather than finals.
        builder.set_final(sid, one)?;
    }

    let unseen: Vec<Sym> = vocab
        .symbols()
        .iter()
        .filter(|s| !seen.contains(s))
        .cloned()
        .collect();

    for (rpfrom, sfrom) in states.iter() {
        for sym in &unseen {
            for label in vocab.labels(sym) {
                builder.add_arc(*sfrom, 0, *label, *label, weights[0])?;
            }
        }
        for sym in &seen {
            let mut current: Vec<Sym> = Vec::with_capacity(rpfrom.len() + 1);
            current.push(sym.clone());
            current.extend(rpfrom.iter().cloned());
            let (_, sto) = states.longest_prefix_item(&current, (Vec::new(), 0));
            for label in vocab.labels(sym) {
                builder.add_arc(*sfrom, sto, *label, *label, weights[sto])?;
            }
        }
    }

    if sort {
        builder.arc_sort_input()?;
    }
    builder.build()
}
