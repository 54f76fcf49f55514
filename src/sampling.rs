//! Path sampler: draws complete paths from a weighted acceptor in
//! proportion to their path weight, given a precomputed totals vector
//! (shortest distance to a final state, see [`crate::acceptor::shortest_distance`]).
//!
//! Two modes are provided: [`sample`]/[`samples`] draw one path at a time;
//! [`deque_samples`] batches many draws that share a prefix by sampling a
//! whole multiset of outgoing transitions at once via [`sample_transitions`].

use crate::acceptor::Acceptor;
use crate::error::{Result, WeightedAutomatonError};
use crate::semiring::Semiring;
use rand::Rng;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};

/// A sampled path: the label sequence plus the per-step arc weight.
///
/// Equality and hashing only consider `labels`, matching the source's tuple
/// semantics (the weight trace is auxiliary metadata carried alongside, not
/// part of a path's identity — two draws that visit the same label sequence
/// by different arcs are still "the same path" for counting purposes).
#[derive(Debug, Clone)]
pub struct Path<Lab, W> {
    pub labels: Vec<Lab>,
    pub weights: Vec<W>,
}

impl<Lab: PartialEq, W> PartialEq for Path<Lab, W> {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}
impl<Lab: Eq, W> Eq for Path<Lab, W> {}
impl<Lab: Hash, W> Hash for Path<Lab, W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.labels.hash(state);
    }
}

fn check_preconditions<Lab, W: Semiring>(acceptor: &Acceptor<Lab, W>, totals: &[W]) -> Result<()> {
    if totals.len() != acceptor.num_states() {
        return Err(WeightedAutomatonError::SamplerPrecondition(format!(
            "totals has {} entries, acceptor has {} states",
            totals.len(),
            acceptor.num_states()
        )));
    }
    let mut visited = vec![false; acceptor.num_states()];
    let mut queue = VecDeque::new();
    queue.push_back(acceptor.start());
    visited[acceptor.start()] = true;
    while let Some(q) = queue.pop_front() {
        for arc in acceptor.arcs(q) {
            if !visited[arc.to] {
                visited[arc.to] = true;
                queue.push_back(arc.to);
            }
        }
    }
    if visited.iter().any(|&v| !v) {
        return Err(WeightedAutomatonError::SamplerPrecondition(
            "acceptor is not connected: some state is unreachable from the initial state"
                .to_string(),
        ));
    }
    // Co-reachability: a reachable state with no path to any final state has
    // totals[q] == zero() (the fixpoint in shortest_distance never lifts it
    // off the absorbing element), which would otherwise send `sample`'s
    // threshold comparisons to +inf and loop forever without ever reaching a
    // final state.
    for q in 0..acceptor.num_states() {
        if visited[q] && totals[q].value() == W::zero().value() {
            return Err(WeightedAutomatonError::SamplerPrecondition(format!(
                "acceptor is not connected: state {} has no path to any final state",
                q
            )));
        }
    }
    Ok(())
}

/// Draws a single path from `acceptor`, starting at its initial state and
/// stopping the first time a final state is reached.
pub fn sample<Lab, W, R>(
    acceptor: &Acceptor<Lab, W>,
    totals: &[W],
    rng: &mut R,
) -> Result<Path<Lab, W>>
where
    Lab: Copy,
    W: Semiring,
    R: Rng + ?Sized,
{
    check_preconditions(acceptor, totals)?;

    let mut sid = acceptor.start();
    let mut labels = Vec::new();
    let mut weights = Vec::new();

    while !acceptor.is_final(sid) {
        let u: f64 = rng.gen_range(0.0..1.0);
        let th = W::from_real(1.0 - u).times(totals[sid]);
        let arcs = acceptor.arcs(sid);
        if arcs.is_empty() {
            return Err(WeightedAutomatonError::SamplerPrecondition(format!(
                "state {} is non-final with no outgoing arcs",
                sid
            )));
        }
        let mut acc = W::zero();
        let mut chosen = arcs.len() - 1;
        for (i, arc) in arcs.iter().enumerate() {
            acc = acc.plus(arc.weight.times(totals[arc.to]));
            // acc accumulates the mass of arcs seen so far, so it only ever
            // shrinks (in weight-value terms) as more arcs are folded in;
            // the first arc whose running mass already covers th is the
            // one the threshold picks out.
            if acc.cmp_value(&th) != std::cmp::Ordering::Greater {
                chosen = i;
                break;
            }
        }
        let arc = arcs[chosen];
        labels.push(arc.in_label);
        weights.push(arc.weight);
        sid = arc.to;
    }

    Ok(Path { labels, weights })
}

/// Draws `n` independent paths, wrapping repeated calls to [`sample`] and
/// tallying multiplicities per distinct label sequence.
pub fn samples<Lab, W, R>(
    acceptor: &Acceptor<Lab, W>,
    totals: &[W],
    n: usize,
    rng: &mut R,
) -> Result<HashMap<Path<Lab, W>, usize>>
where
    Lab: Copy + Eq + Hash,
    W: Semiring,
    R: Rng + ?Sized,
{
    let mut selection: HashMap<Path<Lab, W>, usize> = HashMap::new();
    for _ in 0..n {
        let path = sample(acceptor, totals, rng)?;
        *selection.entry(path).or_insert(0) += 1;
    }
    Ok(selection)
}

/// Describes an in-progress batch of `n` identical prefixes waiting to be
/// expanded from state `last`.
#[derive(Debug, Clone)]
pub struct Prefix<Lab, W> {
    pub last: usize,
    pub n: usize,
    pub path: Vec<(Lab, W)>,
}

/// Samples `n` transitions out of `sfrom` at once: draws `n` uniform
/// thresholds, sorts them, and walks `sfrom`'s arcs in order assigning each
/// arc the count of thresholds that fall in its slice of the cumulative
/// weight. Returns `(to_state, label, weight, count)` for each arc that won
/// at least one threshold.
pub fn sample_transitions<Lab, W, R>(
    acceptor: &Acceptor<Lab, W>,
    totals: &[W],
    n: usize,
    sfrom: usize,
    rng: &mut R,
) -> Result<Vec<(usize, Lab, W, usize)>>
where
    Lab: Copy,
    W: Semiring,
    R: Rng + ?Sized,
{
    check_preconditions(acceptor, totals)?;
    Ok(sample_transitions_unchecked(
        acceptor, totals, n, sfrom, rng,
    ))
}

/// The body of [`sample_transitions`], skipping precondition validation so
/// [`deque_samples`] can check once up front and then call this per queue
/// item instead of re-walking the whole acceptor on every expansion.
fn sample_transitions_unchecked<Lab, W, R>(
    acceptor: &Acceptor<Lab, W>,
    totals: &[W],
    n: usize,
    sfrom: usize,
    rng: &mut R,
) -> Vec<(usize, Lab, W, usize)>
where
    Lab: Copy,
    W: Semiring,
    R: Rng + ?Sized,
{
    let total = totals[sfrom];
    let mut thresholds: Vec<f64> = (0..n)
        .map(|_| {
            let u: f64 = rng.gen_range(0.0..1.0);
            W::from_real(1.0 - u).times(total).value()
        })
        .collect();
    // Descending: the running mass `acc` only shrinks arc over arc, so the
    // largest thresholds are the ones an early arc's mass already covers.
    thresholds.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    let mut transitions = Vec::new();
    let mut low = 0usize;
    let mut acc = W::zero();
    for arc in acceptor.arcs(sfrom) {
        acc = acc.plus(arc.weight.times(totals[arc.to]));
        // Largest index such that thresholds[low..ipoint] are all >= acc.
        let mut ipoint = low;
        while ipoint < thresholds.len() && thresholds[ipoint] >= acc.value() {
            ipoint += 1;
        }
        if ipoint > low {
            transitions.push((arc.to, arc.in_label, arc.weight, ipoint - low));
        }
        low = ipoint;
        if low == n {
            break;
        }
    }
    transitions
}

/// Draws `n` paths using the batched breadth-first strategy: a queue of
/// `(state, count, prefix)` triples is expanded by sampling a whole
/// multiset of transitions from each non-final state at once, which lets
/// paths that share a prefix share the sampling work for that prefix.
pub fn deque_samples<Lab, W, R>(
    acceptor: &Acceptor<Lab, W>,
    totals: &[W],
    n: usize,
    rng: &mut R,
) -> Result<HashMap<Path<Lab, W>, usize>>
where
    Lab: Copy + Eq + Hash,
    W: Semiring,
    R: Rng + ?Sized,
{
    check_preconditions(acceptor, totals)?;

    let mut samples_out: HashMap<Path<Lab, W>, usize> = HashMap::new();
    let mut queue: VecDeque<Prefix<Lab, W>> = VecDeque::new();
    queue.push_back(Prefix {
        last: acceptor.start(),
        n,
        path: Vec::new(),
    });

    while let Some(prefix) = queue.pop_front() {
        if acceptor.is_final(prefix.last) {
            let labels = prefix.path.iter().map(|(l, _)| *l).collect();
            let weights = prefix.path.iter().map(|(_, w)| *w).collect();
            let path = Path { labels, weights };
            *samples_out.entry(path).or_insert(0) += prefix.n;
        } else {
            let transitions =
                sample_transitions_unchecked(acceptor, totals, prefix.n, prefix.last, rng);
            for (to, label, weight, count) in transitions {
                let mut path = prefix.path.clone();
                path.push((label, weight));
                queue.push_back(Prefix {
                    last: to,
                    n: count,
                    path,
                });
            }
        }
    }
    Ok(samples_out)
}
