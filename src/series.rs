//! Truncated Taylor series
//!
//! [`SeriesParameters`] selects a function, how many terms to keep, and where to
//! expand it. [`SeriesParameters::terms`] walks the summands in index order; the
//! sampler sums them numerically and the renderer prints them, from the same
//! [`SeriesTerm`] values.
use crate::{
    display::Sign,
    function::{Descriptor, FunctionKind},
    value::{IntClampedCast, Value},
};

/// What to expand, to which order, and around which point
///
/// `term_count` is the highest summation index included, so most functions sum
/// `term_count + 1` terms; the logarithm starts at index 1 and sums `term_count`.
///
/// Any term count and any centre are accepted. Interactive front ends restrict
/// them further, see [`crate::controls`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeriesParameters<T = f64> {
    /// Function being approximated
    pub kind: FunctionKind,

    /// Highest term index included in the sum
    pub term_count: usize,

    /// Expansion point `a`; the series is in powers of `x - a`
    pub center: T,
}

impl<T: Value> Default for SeriesParameters<T> {
    fn default() -> Self {
        Self::new(FunctionKind::Sine, 3, T::zero())
    }
}

impl<T: Value> SeriesParameters<T> {
    /// Creates a new set of parameters
    pub fn new(kind: FunctionKind, term_count: usize, center: T) -> Self {
        Self {
            kind,
            term_count,
            center,
        }
    }

    /// The descriptor of the selected function
    #[must_use]
    pub fn descriptor(&self) -> Descriptor<T> {
        self.kind.descriptor()
    }

    /// Iterates over the summands of the truncated series, in index order
    pub fn terms(&self) -> impl Iterator<Item = SeriesTerm<T>> {
        let descriptor = self.descriptor();
        (descriptor.start_index..=self.term_count).map(descriptor.term)
    }

    /// Number of summands in the truncated series
    #[must_use]
    pub fn len(&self) -> usize {
        let start = self.descriptor().start_index;
        self.term_count.saturating_add(1).saturating_sub(start)
    }

    /// Returns true if the truncated series has no summands
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluates the truncated series at `x`
    ///
    /// Returns `None` where the series is not evaluated; for the logarithm that
    /// is wherever `1 + (x - center) <= 0`.
    pub fn approximate(&self, x: T) -> Option<T> {
        let descriptor = self.descriptor();
        let shifted = x - self.center;
        if !(descriptor.series_defined)(shifted) {
            return None;
        }

        Some(
            self.terms()
                .fold(T::zero(), |acc, term| acc + term.evaluate(shifted)),
        )
    }

    /// Legend label for the approximation, e.g. `Taylor approx. (3 terms)`
    #[must_use]
    pub fn approximation_label(&self) -> String {
        let plural = if self.term_count == 1 { "" } else { "s" };
        format!("Taylor approx. ({} term{plural})", self.term_count)
    }
}

/// A single summand `sign · s^exponent / denominator`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesTerm<T> {
    /// Summation index `n`
    pub index: usize,

    /// Sign contributed by the alternating factor, if any
    pub sign: Sign,

    /// Power of the shifted variable
    pub exponent: usize,

    /// Divisor; a factorial, or `n` for the logarithm
    pub denominator: T,
}

impl<T: Value> SeriesTerm<T> {
    /// Creates a new term
    pub fn new(index: usize, sign: Sign, exponent: usize, denominator: T) -> Self {
        Self {
            index,
            sign,
            exponent,
            denominator,
        }
    }

    /// Evaluates the term at the shifted variable `s = x - center`
    pub fn evaluate(&self, shifted: T) -> T {
        let power = Value::powi(shifted, self.exponent.clamped_cast());
        self.sign.apply(power / self.denominator)
    }
}
