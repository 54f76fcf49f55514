//! Commutative semirings used to weight acceptor arcs.
//!
//! Two concrete semirings are provided: [`Tropical`] (min-plus) and [`Log`]
//! (the log semiring, used whenever a sampler needs true sum-product
//! semantics rather than a shortest-path approximation).

use std::cmp::Ordering;
use std::fmt;

/// A commutative semiring (S, +, *, 0, 1) with a `from_real` embedding of a
/// probability-like value in `[0, 1]` and a total order on the carrier's
/// underlying real value.
///
/// `plus` is ⊕, `times` is ⊗, `zero` is the absorbing element, `one` is the
/// multiplicative identity.
pub trait Semiring: Copy + Clone + fmt::Debug + PartialEq {
    fn zero() -> Self;
    fn one() -> Self;

    /// Embeds a real `r` in `[0, 1]` into the semiring.
    fn from_real(r: f64) -> Self;

    fn plus(self, other: Self) -> Self;
    fn times(self, other: Self) -> Self;

    /// The underlying real value, used for the sampler's threshold
    /// comparisons and for reporting arc weights.
    fn value(self) -> f64;

    /// Total order on the underlying real, per §5's ordering guarantees.
    fn cmp_value(&self, other: &Self) -> Ordering {
        self.value()
            .partial_cmp(&other.value())
            .unwrap_or(Ordering::Equal)
    }
}

/// The tropical (min, +) semiring: `zero = +inf`, `one = 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tropical(pub f64);

impl Semiring for Tropical {
    fn zero() -> Self {
        Tropical(f64::INFINITY)
    }

    fn one() -> Self {
        Tropical(0.0)
    }

    fn from_real(r: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&r), "from_real expects r in [0, 1]");
        if r <= 0.0 {
            Self::zero()
        } else {
            Tropical(-r.ln())
        }
    }

    fn plus(self, other: Self) -> Self {
        Tropical(self.0.min(other.0))
    }

    fn times(self, other: Self) -> Self {
        Tropical(self.0 + other.0)
    }

    fn value(self) -> f64 {
        self.0
    }
}

/// The log semiring: `⊕` is log-sum-exp of the negative-log inputs,
/// `zero = +inf`, `one = 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Log(pub f64);

impl Semiring for Log {
    fn zero() -> Self {
        Log(f64::INFINITY)
    }

    fn one() -> Self {
        Log(0.0)
    }

    fn from_real(r: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&r), "from_real expects r in [0, 1]");
        if r <= 0.0 {
            Self::zero()
        } else {
            Log(-r.ln())
        }
    }

    fn plus(self, other: Self) -> Self {
        if self.0.is_infinite() {
            return other;
        }
        if other.0.is_infinite() {
            return self;
        }
        let (a, b) = (self.0, other.0);
        let m = a.min(b);
        Log(m - ((-(a - m)).exp() + (-(b - m)).exp()).ln())
    }

    fn times(self, other: Self) -> Self {
        Log(self.0 + other.0)
    }

    fn value(self) -> f64 {
        self.0
    }
}
