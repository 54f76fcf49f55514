//! Test/demo helpers grounded on the original implementation's
//! `util.py` (`path_fsa`, `network_fsa`): building a single-path acceptor
//! out of a literal label sequence, and scoring a label sequence against an
//! already-built acceptor without a general intersection algorithm.

use crate::acceptor::Acceptor;
use crate::error::{Result, WeightedAutomatonError};
use crate::semiring::Semiring;

/// Walks `labels` through `acceptor` from its start state, multiplying arc
/// weights, and returns the total path weight. Both operands are always
/// deterministic/total here, so this is a direct walk rather than a general
/// FST intersection (out of scope per spec's Non-goals).
pub fn path_score<Lab, W>(acceptor: &Acceptor<Lab, W>, labels: &[Lab]) -> Result<W>
where
    Lab: Copy + PartialEq,
    W: Semiring,
{
    let mut state = acceptor.start();
    let mut acc = W::one();
    for &label in labels {
        let arc = acceptor
            .arcs(state)
            .iter()
            .find(|a| a.in_label == label)
            .ok_or_else(|| {
                WeightedAutomatonError::SamplerPrecondition(format!(
                    "no transition from state {} on label",
                    state
                ))
            })?;
        acc = acc.times(arc.weight);
        state = arc.to;
    }
    Ok(acc)
}

/// Walks `labels` through `acceptor`, returning the per-step score trace:
/// the weight of each individual transition taken (not the running
/// product). Used to check S3/S4-style step traces against the spec.
pub fn path_trace<Lab, W>(acceptor: &Acceptor<Lab, W>, labels: &[Lab]) -> Result<Vec<W>>
where
    Lab: Copy + PartialEq,
    W: Semiring,
{
    let mut state = acceptor.start();
    let mut trace = Vec::with_capacity(labels.len());
    for &label in labels {
        let arc = acceptor
            .arcs(state)
            .iter()
            .find(|a| a.in_label == label)
            .ok_or_else(|| {
                WeightedAutomatonError::SamplerPrecondition(format!(
                    "no transition from state {} on label",
                    state
                ))
            })?;
        trace.push(arc.weight);
        state = arc.to;
    }
    Ok(trace)
}

/// Builds an acceptor whose only accepted string is `labels`, each
/// transition `i` weighted `weights[i]` (or `one` if `weights` is absent).
/// Grounded on `util.py::path_fsa`.
pub fn path_fsa<Lab, W>(labels: &[Lab], weights: Option<&[W]>) -> Result<Acceptor<Lab, W>>
where
    Lab: Copy + Eq + Ord,
    W: Semiring,
{
    use crate::acceptor::AcceptorBuilder;

    let n = labels.len();
    let mut builder: AcceptorBuilder<Lab, W> = AcceptorBuilder::with_capacity(n + 1);
    for _ in 0..=n {
        builder.add_state();
    }
    builder.set_initial(0)?;
    builder.set_final(n, W::one())?;
    for (i, &label) in labels.iter().enumerate() {
        let w = weights.map(|ws| ws[i]).unwrap_or_else(W::one);
        builder.add_arc(i, i + 1, label, label, w)?;
    }
    builder.build()
}

/// Builds a layered acceptor with `n_layers` intermediate layers of
/// `layer_size` states each, every state in layer `i` connected to every
/// state in layer `i + 1`. Used by sampler tests to build the small
/// networks the spec's S5/S6 scenarios describe. Grounded on
/// `util.py::network_fsa`.
pub fn network_fsa<W>(
    n_layers: usize,
    layer_size: usize,
    mut arc: impl FnMut(usize, usize) -> (u32, W),
) -> Result<Acceptor<u32, W>>
where
    W: Semiring,
{
    use crate::acceptor::AcceptorBuilder;

    let total_states = n_layers * layer_size + 2;
    let mut builder: AcceptorBuilder<u32, W> = AcceptorBuilder::with_capacity(total_states);
    for _ in 0..total_states {
        builder.add_state();
    }
    builder.set_initial(0)?;
    let final_state = total_states - 1;
    builder.set_final(final_state, W::one())?;

    for n in 0..n_layers.saturating_sub(1) {
        for i in 0..layer_size {
            let from = n * layer_size + i + 1;
            for j in 0..layer_size {
                let to = (n + 1) * layer_size + j + 1;
                let (label, w) = arc(from, to);
                builder.add_arc(from, to, label, label, w)?;
            }
        }
    }

    for i in 0..layer_size {
        let (label, w) = arc(0, i + 1);
        builder.add_arc(0, i + 1, label, label, w)?;
        let from = (n_layers - 1) * layer_size + i + 1;
        let (label2, w2) = arc(from, final_state);
        builder.add_arc(from, final_state, label2, label2, w2)?;
    }

    builder.build()
}
