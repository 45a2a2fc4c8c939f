//! State container for an interactive front end
//!
//! A UI holds one [`Controls`] value: the selected function, the term count and the
//! expansion point. Slider input is clamped to the ranges a UI offers, and
//! [`Controls::frame`] recomputes everything the UI needs to draw from scratch.
//!
//! ```
//! # use taylorscope::{controls::Controls, FunctionKind};
//! let mut controls = Controls::default();
//! controls.set_function(FunctionKind::Exponential);
//! controls.set_center(7.2); // clamped to the slider range
//! assert_eq!(controls.center(), 3.0);
//!
//! let frame = controls.frame();
//! assert_eq!(frame.samples.len(), 81);
//! assert_eq!(frame.formula.len(), 4);
//! ```
use std::ops::RangeInclusive;

use crate::{
    display::{render, Formula},
    function::FunctionKind,
    sampler::{SampleSet, Sampler},
    series::SeriesParameters,
};

/// Term counts offered by the term slider
pub const TERMS_RANGE: RangeInclusive<usize> = 1..=10;

/// Expansion points offered by the centre slider
pub const CENTER_RANGE: RangeInclusive<f64> = -3.0..=3.0;

/// Increment of the centre slider
pub const CENTER_STEP: f64 = 0.5;

/// Everything needed to draw one state of the visualizer
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Frame {
    /// Parameters this frame was computed from
    pub params: SeriesParameters,

    /// Chart data
    pub samples: SampleSet,

    /// Formula text data
    pub formula: Formula,

    /// Legend label for the approximation series
    pub approximation_label: String,
}

/// The visualizer's interactive state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    params: SeriesParameters,
    sampler: Sampler,
}

impl Default for Controls {
    /// `sin(x)` with 3 terms around 0
    fn default() -> Self {
        Self::new(Sampler::default())
    }
}

impl Controls {
    /// Creates the default state, sampling with the given sampler
    #[must_use]
    pub fn new(sampler: Sampler) -> Self {
        Self {
            params: SeriesParameters::default(),
            sampler,
        }
    }

    /// Current parameters
    #[must_use]
    pub fn params(&self) -> SeriesParameters {
        self.params
    }

    /// Selected function
    #[must_use]
    pub fn function(&self) -> FunctionKind {
        self.params.kind
    }

    /// Selected term count
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.params.term_count
    }

    /// Selected expansion point
    #[must_use]
    pub fn center(&self) -> f64 {
        self.params.center
    }

    /// Selects a function. Returns true if the state changed
    pub fn set_function(&mut self, kind: FunctionKind) -> bool {
        let changed = self.params.kind != kind;
        self.params.kind = kind;
        changed
    }

    /// Sets the term count, clamped to [`TERMS_RANGE`]. Returns true if the state changed
    pub fn set_term_count(&mut self, term_count: usize) -> bool {
        let clamped = term_count.clamp(*TERMS_RANGE.start(), *TERMS_RANGE.end());
        if clamped != term_count {
            log::warn!("term count {term_count} is outside {TERMS_RANGE:?}, using {clamped}");
        }

        let changed = self.params.term_count != clamped;
        self.params.term_count = clamped;
        changed
    }

    /// Sets the expansion point, snapped to [`CENTER_STEP`] and clamped to [`CENTER_RANGE`].
    /// Returns true if the state changed
    ///
    /// Non-finite input is ignored.
    pub fn set_center(&mut self, center: f64) -> bool {
        if !center.is_finite() {
            log::warn!("ignoring non-finite center {center}");
            return false;
        }

        let snapped = ((center / CENTER_STEP).round() * CENTER_STEP)
            .clamp(*CENTER_RANGE.start(), *CENTER_RANGE.end());
        if snapped != center {
            log::warn!("center {center} is not a slider position, using {snapped}");
        }

        #[allow(clippy::float_cmp)]
        let changed = self.params.center != snapped;
        self.params.center = snapped;
        changed
    }

    /// Recomputes the chart and formula data for the current state
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame {
            params: self.params,
            samples: self.sampler.sample(&self.params),
            formula: render(&self.params),
            approximation_label: self.params.approximation_label(),
        }
    }
}
