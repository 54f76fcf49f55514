//! The weighted acceptor backend: states, arcs, construction and shortest
//! distance.
//!
//! Spec names this an external "automaton backend" collaborator; here it is
//! the internal boundary between construction (this module) and the
//! matchers/sampler built on top of it.

use crate::error::{Result, WeightedAutomatonError};
use crate::semiring::Semiring;
use std::collections::HashMap;

/// One transition: input label = output label, matching the acceptor
/// invariant that this crate never builds a transducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc<Lab, W> {
    pub to: usize,
    pub in_label: Lab,
    pub out_label: Lab,
    pub weight: W,
}

/// A deterministic, complete, weighted finite-state acceptor.
///
/// Built once by [`AcceptorBuilder`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Acceptor<Lab, W> {
    initial: usize,
    finals: HashMap<usize, W>,
    arcs: Vec<Vec<Arc<Lab, W>>>,
}

impl<Lab, W: Copy> Acceptor<Lab, W> {
    pub fn num_states(&self) -> usize {
        self.arcs.len()
    }

    pub fn start(&self) -> usize {
        self.initial
    }

    pub fn is_final(&self, id: usize) -> bool {
        self.finals.contains_key(&id)
    }

    pub fn final_weight(&self, id: usize) -> Option<W> {
        self.finals.get(&id).copied()
    }

    pub fn arcs(&self, id: usize) -> &[Arc<Lab, W>] {
        &self.arcs[id]
    }

    pub fn states(&self) -> impl Iterator<Item = usize> {
        0..self.arcs.len()
    }
}

/// Mutable factory producing a labelled weighted acceptor.
pub struct AcceptorBuilder<Lab, W> {
    initial: Option<usize>,
    finals: HashMap<usize, W>,
    arcs: Vec<Vec<Arc<Lab, W>>>,
}

impl<Lab, W> Default for AcceptorBuilder<Lab, W> {
    fn default() -> Self {
        AcceptorBuilder {
            initial: None,
            finals: HashMap::new(),
            arcs: Vec::new(),
        }
    }
}

impl<Lab, W> AcceptorBuilder<Lab, W>
where
    Lab: Copy + Eq,
    W: Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(states: usize) -> Self {
        AcceptorBuilder {
            initial: None,
            finals: HashMap::new(),
            arcs: Vec::with_capacity(states),
        }
    }

    pub fn add_state(&mut self) -> usize {
        let id = self.arcs.len();
        self.arcs.push(Vec::new());
        id
    }

    pub fn set_initial(&mut self, id: usize) -> Result<()> {
        self.check_state(id)?;
        self.initial = Some(id);
        Ok(())
    }

    pub fn set_final(&mut self, id: usize, weight: W) -> Result<()> {
        self.check_state(id)?;
        self.finals.insert(id, weight);
        Ok(())
    }

    pub fn add_arc(&mut self, from: usize, to: usize, in_label: Lab, out_label: Lab, weight: W) -> Result<()> {
        self.check_state(from)?;
        self.check_state(to)?;
        self.arcs[from].push(Arc {
            to,
            in_label,
            out_label,
            weight,
        });
        Ok(())
    }

    fn check_state(&self, id: usize) -> Result<()> {
        if id >= self.arcs.len() {
            Err(WeightedAutomatonError::BackendFailure(format!(
                "state {} out of range (have {} states)",
                id,
                self.arcs.len()
            )))
        } else {
            Ok(())
        }
    }

    /// Sorts arcs at each state by input label. Rejects a state carrying two
    /// arcs with the same input label, since that would make the acceptor
    /// non-deterministic (§1 of the testable properties).
    pub fn arc_sort_input(&mut self) -> Result<()>
    where
        Lab: Ord,
    {
        for (state, arcs) in self.arcs.iter_mut().enumerate() {
            arcs.sort_by_key(|a| a.in_label);
            for pair in arcs.windows(2) {
                if pair[0].in_label == pair[1].in_label {
                    return Err(WeightedAutomatonError::BackendFailure(format!(
                        "state {} has two arcs sharing input label",
                        state
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn build(self) -> Result<Acceptor<Lab, W>> {
        let initial = self.initial.ok_or_else(|| {
            WeightedAutomatonError::BackendFailure("no initial state set".to_string())
        })?;
        Ok(Acceptor {
            initial,
            finals: self.finals,
            arcs: self.arcs,
        })
    }
}

/// Computes the totals vector (the "shortest distance to final" in the
/// acceptor's semiring): `totals[q] = ⨁` over paths `q ⇒ final` of the
/// product of arc weights.
///
/// This crate only ever needs the reverse-from-finals direction the sampler
/// consumes, so (unlike a general FST library) this function doesn't take a
/// `reverse` flag. Implemented as fixpoint relaxation, which terminates in
/// at most `num_states` passes because the acceptors this crate builds for
/// sampling are acyclic (per §5's termination argument).
pub fn shortest_distance<Lab, W>(acceptor: &Acceptor<Lab, W>) -> Vec<W>
where
    Lab: Copy,
    W: Semiring,
{
    let n = acceptor.num_states();
    let mut totals: Vec<W> = (0..n)
        .map(|q| acceptor.final_weight(q).unwrap_or_else(W::zero))
        .collect();

    for _ in 0..=n {
        let mut changed = false;
        for q in 0..n {
            let mut acc = acceptor.final_weight(q).unwrap_or_else(W::zero);
            for arc in acceptor.arcs(q) {
                acc = acc.plus(arc.weight.times(totals[arc.to]));
            }
            if acc.value() != totals[q].value() {
                changed = true;
            }
            totals[q] = acc;
        }
        if !changed {
            break;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semiring::Tropical;

    #[test]
    fn build_rejects_out_of_range_arc() {
        let mut b: AcceptorBuilder<u32, Tropical> = AcceptorBuilder::new();
        let s0 = b.add_state();
        let err = b.add_arc(s0, 5, 1, 1, Tropical::one());
        assert!(err.is_err());
    }

    #[test]
    fn arc_sort_rejects_duplicate_label() {
        let mut b: AcceptorBuilder<u32, Tropical> = AcceptorBuilder::new();
        let s0 = b.add_state();
        let s1 = b.add_state();
        b.add_arc(s0, s1, 1, 1, Tropical::one()).unwrap();
        b.add_arc(s0, s0, 1, 1, Tropical::one()).unwrap();
        assert!(b.arc_sort_input().is_err());
    }

    #[test]
    fn shortest_distance_simple_chain() {
        let mut b: AcceptorBuilder<u32, Tropical> = AcceptorBuilder::new();
        let s0 = b.add_state();
        let s1 = b.add_state();
        b.set_initial(s0).unwrap();
        b.set_final(s1, Tropical::one()).unwrap();
        b.add_arc(s0, s1, 1, 1, Tropical(2.0)).unwrap();
        let a = b.build().unwrap();
        let totals = shortest_distance(&a);
        assert_eq!(totals[s1], Tropical::one());
        assert_eq!(totals[s0], Tropical(2.0));
    }
}
