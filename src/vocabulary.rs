//! Vocabulary abstraction: direct and masked symbol-to-label mappings.
//!
//! Both modes are the same algorithm, parametric only in how a symbol's
//! output labels are produced — a "symbol expands to one or more labels" is
//! the general case, with a singleton expansion for the direct case. Rather
//! than encode both branches as an enum every matcher has to match on, each
//! mode is a small strategy object implementing [`LabelMap`]; the matchers
//! are generic over the trait and never know which mode they were built
//! with.

use crate::error::{Result, WeightedAutomatonError};
use std::collections::HashMap;
use std::hash::Hash;

/// Produces the output labels of a symbol and enumerates the vocabulary.
///
/// Symbol iteration order is preserved from construction; it does not
/// affect correctness (the constructed acceptors are deterministic per
/// label) but it does affect state numbering, which callers must not rely
/// on (see spec's open question on state-id assignment).
pub trait LabelMap<Sym, Lab> {
    /// All symbols in the vocabulary, in a stable order.
    fn symbols(&self) -> &[Sym];

    /// The non-empty ordered sequence of labels a symbol expands to.
    fn labels(&self, sym: &Sym) -> &[Lab];
}

/// Direct mode: every symbol is its own (singleton) label.
#[derive(Debug, Clone)]
pub struct DirectVocabulary<Sym> {
    symbols: Vec<Sym>,
    // Parallel singleton label lists, indexed alongside `symbols`, so that
    // `labels` can hand back a `&[Sym]` slice uniformly with masked mode.
    singleton_labels: Vec<[Sym; 1]>,
    index: HashMap<Sym, usize>,
}

impl<Sym> DirectVocabulary<Sym>
where
    Sym: Clone + Eq + Hash,
{
    pub fn new(symbols: impl IntoIterator<Item = Sym>) -> Result<Self> {
        let mut index = HashMap::new();
        let mut ordered = Vec::new();
        for s in symbols {
            if !index.contains_key(&s) {
                index.insert(s.clone(), ordered.len());
                ordered.push(s);
            }
        }
        if ordered.is_empty() {
            return Err(WeightedAutomatonError::EmptyVocabulary);
        }
        let singleton_labels = ordered.iter().map(|s| [s.clone()]).collect();
        Ok(DirectVocabulary {
            symbols: ordered,
            singleton_labels,
            index,
        })
    }
}

impl<Sym> LabelMap<Sym, Sym> for DirectVocabulary<Sym>
where
    Sym: Clone + Eq + Hash,
{
    fn symbols(&self) -> &[Sym] {
        &self.symbols
    }

    fn labels(&self, sym: &Sym) -> &[Sym] {
        let idx = *self
            .index
            .get(sym)
            .expect("symbol must belong to this vocabulary");
        &self.singleton_labels[idx]
    }
}

/// Masked mode: every symbol expands to a non-empty ordered sequence of
/// labels. Label identity is not required to be unique across symbols.
#[derive(Debug, Clone)]
pub struct MaskedVocabulary<Sym, Lab> {
    symbols: Vec<Sym>,
    map: HashMap<Sym, Vec<Lab>>,
}

impl<Sym, Lab> MaskedVocabulary<Sym, Lab>
where
    Sym: Clone + Eq + Hash + std::fmt::Debug,
    Lab: Clone + Eq + Hash + std::fmt::Debug,
{
    /// Rejects an empty label list for any symbol, an empty vocabulary, and
    /// (per the source algorithm's undefined behaviour here) a label value
    /// reused under two different symbols, which would make label lookup
    /// ambiguous about which symbol actually matched.
    pub fn new(entries: impl IntoIterator<Item = (Sym, Vec<Lab>)>) -> Result<Self> {
        let mut symbols = Vec::new();
        let mut map = HashMap::new();
        let mut label_owner: HashMap<Lab, Sym> = HashMap::new();
        for (sym, labels) in entries {
            if labels.is_empty() {
                return Err(WeightedAutomatonError::InconsistentMask {
                    symbol: format!("{:?}", sym),
                });
            }
            for label in &labels {
                if let Some(owner) = label_owner.get(label) {
                    if *owner != sym {
                        return Err(WeightedAutomatonError::InconsistentMask {
                            symbol: format!(
                                "label {:?} claimed by both {:?} and {:?}",
                                label, owner, sym
                            ),
                        });
                    }
                } else {
                    label_owner.insert(label.clone(), sym.clone());
                }
            }
            if !map.contains_key(&sym) {
                symbols.push(sym.clone());
            }
            map.insert(sym, labels);
        }
        if symbols.is_empty() {
            return Err(WeightedAutomatonError::EmptyVocabulary);
        }
        Ok(MaskedVocabulary { symbols, map })
    }
}

impl<Sym, Lab> LabelMap<Sym, Lab> for MaskedVocabulary<Sym, Lab>
where
    Sym: Clone + Eq + Hash,
{
    fn symbols(&self) -> &[Sym] {
        &self.symbols
    }

    fn labels(&self, sym: &Sym) -> &[Lab] {
        &self.map[sym]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_labels_itself() {
        let v = DirectVocabulary::new(vec![1, 2, 3]).unwrap();
        assert_eq!(v.labels(&2), &[2]);
        assert_eq!(v.symbols(), &[1, 2, 3]);
    }

    #[test]
    fn direct_rejects_empty() {
        let v: Result<DirectVocabulary<i32>> = DirectVocabulary::new(Vec::new());
        assert!(matches!(v, Err(WeightedAutomatonError::EmptyVocabulary)));
    }

    #[test]
    fn masked_labels_expand() {
        let v = MaskedVocabulary::new(vec![
            ("the", vec![1, 2]),
            ("black", vec![3, 4]),
        ])
        .unwrap();
        assert_eq!(v.labels(&"the"), &[1, 2]);
        assert_eq!(v.labels(&"black"), &[3, 4]);
    }

    #[test]
    fn masked_rejects_empty_label_list() {
        let v = MaskedVocabulary::new(vec![("the", vec![1]), ("black", Vec::<i32>::new())]);
        assert!(matches!(
            v,
            Err(WeightedAutomatonError::InconsistentMask { .. })
        ));
    }

    #[test]
    fn masked_rejects_label_shared_across_symbols() {
        let v = MaskedVocabulary::new(vec![("the", vec![1, 2]), ("black", vec![2, 3])]);
        assert!(matches!(
            v,
            Err(WeightedAutomatonError::InconsistentMask { .. })
        ));
    }
}
