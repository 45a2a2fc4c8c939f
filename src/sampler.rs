//! Sampling exact values and truncated series over a domain
//!
//! A [`Sampler`] walks a [`SampleDomain`] (by default `[-4, 4]` in steps of `0.1`,
//! 81 points) and records, at every `x`, the exact function value and the value of
//! the truncated series. Either value may be missing:
//! - The exact value is missing where the function is undefined (`ln(1+x)` at `x <= -1`).
//! - The approximation is missing where the series is not evaluated (`1 + (x - center) <= 0`).
//!
//! Missing values are `None`, never zero, so charts can leave a gap.
//!
//! ```
//! # use taylorscope::{sample, FunctionKind, SeriesParameters};
//! let samples = sample(&SeriesParameters::new(FunctionKind::Exponential, 3, 0.0_f64));
//! assert_eq!(samples.len(), 81);
//!
//! let point = samples.at(1.0).unwrap();
//! assert!((point.approx.unwrap() - 8.0 / 3.0).abs() < 1e-12);
//! ```
use std::ops::Range;

use crate::{
    error::{Error, Result},
    function::{Descriptor, FunctionKind},
    series::SeriesParameters,
    value::{SteppedValues, Value},
};

/// The x coordinates a sample set covers
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SampleDomain<T = f64> {
    start: T,
    end: T,
    step: T,
    precision: Option<u32>,
}

impl<T: Value> Default for SampleDomain<T> {
    /// `[-4, 4]` in steps of `0.1`, rounded to one decimal place
    fn default() -> Self {
        let four = T::from_positive_int(4);
        Self {
            start: -four,
            end: four,
            step: T::one() / T::from_positive_int(10),
            precision: Some(1),
        }
    }
}

impl<T: Value> SampleDomain<T> {
    /// Creates a new domain covering `range` inclusively, in increments of `step`
    ///
    /// # Errors
    /// Returns [`Error::InvalidDomain`] if a bound or the step is not finite,
    /// the step is not positive, or the range is reversed.
    pub fn new(range: std::ops::RangeInclusive<T>, step: T) -> Result<Self> {
        use num_traits::float::FloatCore;

        let (start, end) = range.into_inner();
        if !FloatCore::is_finite(start) || !FloatCore::is_finite(end) {
            return Err(Error::InvalidDomain(format!(
                "bounds must be finite, got {start}..={end}"
            )));
        }

        if !FloatCore::is_finite(step) || step <= T::zero() {
            return Err(Error::InvalidDomain(format!(
                "step must be positive, got {step}"
            )));
        }

        if end < start {
            return Err(Error::InvalidDomain(format!(
                "range is reversed: {start}..={end}"
            )));
        }

        Ok(Self {
            start,
            end,
            step,
            precision: None,
        })
    }

    /// Rounds every sampled x to `decimals` decimal places
    #[must_use]
    pub fn with_precision(mut self, decimals: u32) -> Self {
        self.precision = Some(decimals);
        self
    }

    /// First x coordinate
    pub fn start(&self) -> T {
        self.start
    }

    /// Last x coordinate, if reachable in whole steps
    pub fn end(&self) -> T {
        self.end
    }

    /// Distance between consecutive x coordinates
    pub fn step(&self) -> T {
        self.step
    }

    /// Number of points in the domain
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps().len()
    }

    /// Returns true if the domain has no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the x coordinates, in increasing order
    pub fn xs(&self) -> impl Iterator<Item = T> {
        let precision = self.precision;
        self.steps().map(move |x| match precision {
            Some(decimals) => x.round_to(decimals),
            None => x,
        })
    }

    fn steps(&self) -> SteppedValues<T> {
        SteppedValues::new(self.start..=self.end, self.step)
    }
}

/// Which exact values of `ln(1+x)` are reported as missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum LogGuard {
    /// Missing wherever `1 + x <= 0`
    #[default]
    Strict,

    /// Missing only at `x = 0`; every other point is evaluated, which yields
    /// `-inf` at `x = -1` and NaN below it
    LegacyOrigin,
}

impl LogGuard {
    fn exact<T: Value>(self, descriptor: &Descriptor<T>, x: T) -> Option<T> {
        match (self, descriptor.kind) {
            (LogGuard::LegacyOrigin, FunctionKind::NaturalLogShifted) => {
                (x != T::zero()).then(|| (descriptor.exact)(x))
            }
            _ => descriptor.exact_value(x),
        }
    }
}

/// A single sampled x coordinate
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SamplePoint<T = f64> {
    /// Sample coordinate
    pub x: T,

    /// Exact function value, `None` where the function is undefined
    pub exact: Option<T>,

    /// Truncated series value, `None` where the series is not evaluated
    pub approx: Option<T>,
}

impl<T: Value> SamplePoint<T> {
    /// The coordinate formatted to one decimal place, as used for chart keys
    #[must_use]
    pub fn key(&self) -> String {
        format!("{:.1}", self.x)
    }

    /// Absolute difference between the approximation and the exact value
    ///
    /// `None` if either value is missing.
    pub fn error(&self) -> Option<T> {
        Some(Value::abs(self.approx? - self.exact?))
    }
}

/// Samples a series over a domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler<T = f64> {
    /// Where to sample
    pub domain: SampleDomain<T>,

    /// Which exact logarithm values are missing
    pub log_guard: LogGuard,
}

impl<T: Value> Default for Sampler<T> {
    fn default() -> Self {
        Self::new(SampleDomain::default())
    }
}

impl<T: Value> Sampler<T> {
    /// Creates a sampler over the given domain, with the strict logarithm guard
    pub fn new(domain: SampleDomain<T>) -> Self {
        Self {
            domain,
            log_guard: LogGuard::Strict,
        }
    }

    /// Replaces the logarithm guard
    #[must_use]
    pub fn with_log_guard(mut self, log_guard: LogGuard) -> Self {
        self.log_guard = log_guard;
        self
    }

    /// Samples the exact function and its truncated series over the domain
    ///
    /// The result is regenerated from scratch on every call; points are ordered
    /// by increasing x.
    pub fn sample(&self, params: &SeriesParameters<T>) -> SampleSet<T> {
        let descriptor = params.descriptor();
        let points: Vec<_> = self
            .domain
            .xs()
            .map(|x| SamplePoint {
                x,
                exact: self.log_guard.exact(&descriptor, x),
                approx: params.approximate(x),
            })
            .collect();

        log::debug!(
            "sampled {} points of {} with {} terms around {}",
            points.len(),
            params.kind,
            params.term_count,
            params.center
        );

        SampleSet {
            params: *params,
            points,
        }
    }
}

/// Samples a series over the default domain `[-4, 4]`
pub fn sample<T: Value>(params: &SeriesParameters<T>) -> SampleSet<T> {
    Sampler::default().sample(params)
}

/// The points sampled for one set of parameters
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SampleSet<T = f64> {
    params: SeriesParameters<T>,
    points: Vec<SamplePoint<T>>,
}

impl<T: Value> SampleSet<T> {
    /// Parameters the set was sampled with
    pub fn params(&self) -> &SeriesParameters<T> {
        &self.params
    }

    /// Sampled points, ordered by increasing x
    pub fn points(&self) -> &[SamplePoint<T>] {
        &self.points
    }

    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no points were sampled
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the points
    pub fn iter(&self) -> std::slice::Iter<'_, SamplePoint<T>> {
        self.points.iter()
    }

    /// Finds the point sampled at `x`
    pub fn at(&self, x: T) -> Option<&SamplePoint<T>> {
        let tolerance = T::try_cast(1e-9).unwrap_or(T::epsilon());
        self.points
            .iter()
            .find(|p| Value::abs(p.x - x) <= tolerance)
    }

    /// Contiguous runs of `(x, exact)`; a missing value ends a run
    #[must_use]
    pub fn exact_series(&self) -> Vec<Vec<(T, T)>> {
        runs(self.points.iter().map(|p| (p.x, p.exact)))
    }

    /// Contiguous runs of `(x, approx)`; a missing value ends a run
    #[must_use]
    pub fn approx_series(&self) -> Vec<Vec<(T, T)>> {
        runs(self.points.iter().map(|p| (p.x, p.approx)))
    }

    /// Range of x coordinates covered
    pub fn x_range(&self) -> Option<Range<T>> {
        Some(self.points.first()?.x..self.points.last()?.x)
    }

    /// Range of the finite exact values
    pub fn exact_range(&self) -> Option<Range<T>> {
        finite_range(self.points.iter().filter_map(|p| p.exact))
    }

    /// Range of the finite approximations
    pub fn approx_range(&self) -> Option<Range<T>> {
        finite_range(self.points.iter().filter_map(|p| p.approx))
    }

    /// Largest finite error over points where both values are present
    pub fn max_error(&self) -> Option<T> {
        self.points
            .iter()
            .filter_map(SamplePoint::error)
            .filter(|e| num_traits::float::FloatCore::is_finite(*e))
            .reduce(nalgebra::RealField::max)
    }
}

impl<'a, T: Value> IntoIterator for &'a SampleSet<T> {
    type Item = &'a SamplePoint<T>;
    type IntoIter = std::slice::Iter<'a, SamplePoint<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

fn runs<T: Value>(values: impl Iterator<Item = (T, Option<T>)>) -> Vec<Vec<(T, T)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (x, y) in values {
        match y {
            Some(y) if num_traits::float::FloatCore::is_finite(y) => current.push((x, y)),
            _ if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            _ => {}
        }
    }

    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn finite_range<T: Value>(values: impl Iterator<Item = T>) -> Option<Range<T>> {
    values
        .filter(|v| num_traits::float::FloatCore::is_finite(*v))
        .fold(None, |acc: Option<(T, T)>, v| {
            Some(match acc {
                Some((min, max)) => (
                    nalgebra::RealField::min(min, v),
                    nalgebra::RealField::max(max, v),
                ),
                None => (v, v),
            })
        })
        .map(|(min, max)| min..max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;

    fn params(kind: FunctionKind, term_count: usize, center: f64) -> SeriesParameters {
        SeriesParameters::new(kind, term_count, center)
    }

    #[test]
    fn test_default_domain() {
        let domain = SampleDomain::<f64>::default();
        assert_eq!(domain.len(), 81);

        let xs: Vec<_> = domain.xs().collect();
        assert_eq!(xs[0], -4.0);
        assert_eq!(xs[3], -3.7);
        assert_eq!(xs[40], 0.0);
        assert_eq!(xs[41], 0.1);
        assert_eq!(xs[80], 4.0);
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_invalid_domains() {
        assert!(matches!(SampleDomain::new(0.0..=1.0, 0.0), Err(Error::InvalidDomain(_))));
        assert!(matches!(SampleDomain::new(0.0..=1.0, -1.0), Err(Error::InvalidDomain(_))));
        assert!(matches!(SampleDomain::new(1.0..=0.0, 0.1), Err(Error::InvalidDomain(_))));
        assert!(matches!(
            SampleDomain::new(f64::NEG_INFINITY..=0.0, 0.1),
            Err(Error::InvalidDomain(_))
        ));
        assert!(matches!(SampleDomain::new(0.0..=1.0, f64::NAN), Err(Error::InvalidDomain(_))));
    }

    #[test]
    fn test_oversized_precision_keeps_order() {
        let domain = SampleDomain::new(0.0..=1.0, 0.25).unwrap().with_precision(400);
        let xs: Vec<_> = domain.xs().collect();
        assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_custom_domain() {
        let domain = SampleDomain::new(-1.0..=1.0, 0.25).unwrap();
        let xs: Vec<_> = domain.xs().collect();
        assert_eq!(xs, vec![-1.0, -0.75, -0.5, -0.25, 0.0, 0.25, 0.5, 0.75, 1.0]);

        let samples = Sampler::new(domain).sample(&params(FunctionKind::Cosine, 2, 0.0));
        assert_eq!(samples.len(), 9);
    }

    #[test]
    fn test_exponential_scenario() {
        let samples = sample(&params(FunctionKind::Exponential, 3, 0.0));
        assert_eq!(samples.len(), 81);

        let point = samples.at(1.0).unwrap();
        assert_eq!(point.key(), "1.0");
        assert_close!(point.approx.unwrap(), 1.0 + 1.0 + 0.5 + 1.0 / 6.0);
        assert_close!(point.exact.unwrap(), std::f64::consts::E, tolerance = 1e-15);
        assert_close!(point.error().unwrap(), 0.051_615_161_792_378_5, tolerance = 1e-12);
    }

    #[test]
    fn test_all_points_present_for_entire_functions() {
        for kind in [FunctionKind::Sine, FunctionKind::Cosine, FunctionKind::Exponential] {
            let samples = sample(&params(kind, 10, 3.0));
            assert!(samples.iter().all(|p| p.exact.is_some() && p.approx.is_some()));
            assert_eq!(samples.exact_series().len(), 1);
        }
    }

    #[test]
    fn test_log_missing_values() {
        let samples = sample(&params(FunctionKind::NaturalLogShifted, 3, 2.0));

        // s = -6, so 1 + s <= 0
        let first = samples.at(-4.0).unwrap();
        assert_eq!(first.approx, None);
        assert_eq!(first.exact, None);

        // Exact ln(1+x) is undefined up to and including x = -1
        assert_eq!(samples.at(-1.0).unwrap().exact, None);
        assert!(samples.at(-0.9).unwrap().exact.is_some());

        // The series is evaluated once 1 + (x - 2) > 0, i.e. x > 1
        assert_eq!(samples.at(1.0).unwrap().approx, None);
        assert!(samples.at(1.1).unwrap().approx.is_some());

        let exact_missing = samples.iter().filter(|p| p.exact.is_none()).count();
        assert_eq!(exact_missing, 31); // -4.0 ..= -1.0
        let approx_missing = samples.iter().filter(|p| p.approx.is_none()).count();
        assert_eq!(approx_missing, 51); // -4.0 ..= 1.0
    }

    #[test]
    fn test_legacy_log_guard() {
        let sampler = Sampler::default().with_log_guard(LogGuard::LegacyOrigin);
        let samples = sampler.sample(&params(FunctionKind::NaturalLogShifted, 3, 0.0));

        assert_eq!(samples.at(0.0).unwrap().exact, None);
        assert_eq!(samples.at(-1.0).unwrap().exact, Some(f64::NEG_INFINITY));
        assert!(samples.at(-2.0).unwrap().exact.unwrap().is_nan());
        assert!(samples.at(0.5).unwrap().exact.is_some());

        // The legacy guard only applies to the logarithm
        let samples = sampler.sample(&params(FunctionKind::Sine, 3, 0.0));
        assert_eq!(samples.at(0.0).unwrap().exact, Some(0.0));
    }

    #[test]
    fn test_gaps_split_series() {
        let samples = sample(&params(FunctionKind::NaturalLogShifted, 5, 0.0));

        let exact = samples.exact_series();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].first().unwrap().0, -0.9);

        let approx = samples.approx_series();
        assert_eq!(approx.len(), 1);
        assert_eq!(approx[0].len(), 50);

        // Legacy guard leaves a hole at the origin, and non-finite values also break runs
        let samples = Sampler::default()
            .with_log_guard(LogGuard::LegacyOrigin)
            .sample(&params(FunctionKind::NaturalLogShifted, 5, 0.0));
        assert_eq!(samples.exact_series().len(), 2);
    }

    #[test]
    fn test_ranges_and_errors() {
        let samples = sample(&params(FunctionKind::Sine, 10, 0.0));
        assert_eq!(samples.x_range(), Some(-4.0..4.0));

        let exact = samples.exact_range().unwrap();
        assert!(exact.start >= -1.0 && exact.end <= 1.0);

        let error = samples.max_error().unwrap();
        assert!(error < 1e-3, "max error {error}");

        let samples = sample(&params(FunctionKind::Sine, 1, 0.0));
        assert!(samples.max_error().unwrap() > 1.0);
    }

    #[test]
    fn test_samples_are_idempotent() {
        let p = params(FunctionKind::Cosine, 6, -1.5);
        assert_eq!(sample(&p), sample(&p));
        assert_eq!(sample(&p).params(), &p);
    }

    #[test]
    fn test_zero_terms() {
        let samples = sample(&params(FunctionKind::Exponential, 0, 0.0));
        assert!(samples.iter().all(|p| p.approx == Some(1.0)));

        let samples = sample(&params(FunctionKind::NaturalLogShifted, 0, 0.0));
        assert!(samples.iter().filter_map(|p| p.approx).all(|a| a == 0.0));
    }

    #[test]
    fn test_serialize_missing_as_null() {
        let samples = sample(&params(FunctionKind::NaturalLogShifted, 2, 2.0));
        let json = serde_json::to_value(samples.points()).unwrap();
        assert_eq!(json[0]["x"], -4.0);
        assert_eq!(json[0]["exact"], serde_json::Value::Null);
        assert_eq!(json[0]["approx"], serde_json::Value::Null);
        assert!(json[80]["approx"].is_f64());
    }
}
