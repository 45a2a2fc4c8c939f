//! The catalogue of functions a series can approximate
//!
//! Every function is described once, by a [`Descriptor`]: how to evaluate it exactly,
//! where it is defined, and how to build the `n`-th term of its Taylor series.
//! The sampler and the formula renderer both read from the same descriptor, so the
//! plotted approximation and the displayed formula always agree term for term.
use std::{fmt, str::FromStr};

use crate::{
    display::Sign,
    error::Error,
    series::SeriesTerm,
    value::Value,
};

/// One of the elementary functions that can be expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum FunctionKind {
    /// `sin(x)`
    #[default]
    #[serde(rename = "sin")]
    Sine,

    /// `cos(x)`
    #[serde(rename = "cos")]
    Cosine,

    /// `e^x`
    #[serde(rename = "exp")]
    Exponential,

    /// `ln(1 + x)`
    #[serde(rename = "ln")]
    NaturalLogShifted,
}

impl FunctionKind {
    /// Every supported function, in selection order
    pub const ALL: [FunctionKind; 4] = [
        FunctionKind::Sine,
        FunctionKind::Cosine,
        FunctionKind::Exponential,
        FunctionKind::NaturalLogShifted,
    ];

    /// The short token used to select this function (`sin`, `cos`, `exp`, `ln`)
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            FunctionKind::Sine => "sin",
            FunctionKind::Cosine => "cos",
            FunctionKind::Exponential => "exp",
            FunctionKind::NaturalLogShifted => "ln",
        }
    }

    /// A human readable name, suitable for a selection list
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FunctionKind::Sine => "Sine (sin x)",
            FunctionKind::Cosine => "Cosine (cos x)",
            FunctionKind::Exponential => "Exponential (e^x)",
            FunctionKind::NaturalLogShifted => "Natural logarithm (ln(1+x))",
        }
    }

    /// Returns the descriptor shared by the sampler and the renderer
    #[must_use]
    pub fn descriptor<T: Value>(self) -> Descriptor<T> {
        match self {
            FunctionKind::Sine => Descriptor {
                kind: self,
                label: "sin(x)",
                start_index: 0,
                exact: <T as nalgebra::ComplexField>::sin,
                exact_defined: always,
                term: sine_term,
                series_defined: always,
            },

            FunctionKind::Cosine => Descriptor {
                kind: self,
                label: "cos(x)",
                start_index: 0,
                exact: <T as nalgebra::ComplexField>::cos,
                exact_defined: always,
                term: cosine_term,
                series_defined: always,
            },

            FunctionKind::Exponential => Descriptor {
                kind: self,
                label: "e^x",
                start_index: 0,
                exact: <T as nalgebra::ComplexField>::exp,
                exact_defined: always,
                term: exponential_term,
                series_defined: always,
            },

            FunctionKind::NaturalLogShifted => Descriptor {
                kind: self,
                label: "ln(1+x)",
                start_index: 1,
                exact: ln_1p,
                exact_defined: above_minus_one,
                term: log_term,
                series_defined: above_minus_one,
            },
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for FunctionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sin" => Ok(FunctionKind::Sine),
            "cos" => Ok(FunctionKind::Cosine),
            "exp" => Ok(FunctionKind::Exponential),
            "ln" => Ok(FunctionKind::NaturalLogShifted),
            other => Err(Error::UnknownFunction(other.to_string())),
        }
    }
}

/// Everything needed to evaluate and expand one function
///
/// - `exact` is evaluated unconditionally; check `exact_defined` first.
/// - `term(n)` is the `n`-th summand of the series, for `n >= start_index`.
/// - `series_defined(s)` tells whether the truncated series is meaningful at `s = x - center`.
#[derive(Clone, Copy)]
pub struct Descriptor<T: Value> {
    /// The function this describes
    pub kind: FunctionKind,

    /// Label for the function itself, e.g. `sin(x)`
    pub label: &'static str,

    /// First summation index
    pub start_index: usize,

    /// The exact function, with no domain checks
    pub exact: fn(T) -> T,

    /// Whether the exact function is defined at `x`
    pub exact_defined: fn(T) -> bool,

    /// Builds the `n`-th term of the series
    pub term: fn(usize) -> SeriesTerm<T>,

    /// Whether the series is evaluated at the shifted variable `s`
    pub series_defined: fn(T) -> bool,
}

impl<T: Value> Descriptor<T> {
    /// Evaluates the exact function, or `None` where it is undefined
    pub fn exact_value(&self, x: T) -> Option<T> {
        (self.exact_defined)(x).then(|| (self.exact)(x))
    }

    /// Label preceding the expanded formula, e.g. `sin(x) ≈`
    #[must_use]
    pub fn approx_label(&self) -> String {
        format!("{} ≈", self.label)
    }
}

impl<T: Value> fmt::Debug for Descriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("start_index", &self.start_index)
            .finish_non_exhaustive()
    }
}

fn always<T: Value>(_: T) -> bool {
    true
}

fn above_minus_one<T: Value>(v: T) -> bool {
    T::one() + v > T::zero()
}

fn ln_1p<T: Value>(x: T) -> T {
    nalgebra::ComplexField::ln(T::one() + x)
}

/// `(-1)^n · s^(2n+1) / (2n+1)!`
fn sine_term<T: Value>(n: usize) -> SeriesTerm<T> {
    let exponent = n.saturating_mul(2).saturating_add(1);
    SeriesTerm::new(n, Sign::alternating(n), exponent, T::factorial(exponent))
}

/// `(-1)^n · s^(2n) / (2n)!`
fn cosine_term<T: Value>(n: usize) -> SeriesTerm<T> {
    let exponent = n.saturating_mul(2);
    SeriesTerm::new(n, Sign::alternating(n), exponent, T::factorial(exponent))
}

/// `s^n / n!`
fn exponential_term<T: Value>(n: usize) -> SeriesTerm<T> {
    SeriesTerm::new(n, Sign::Positive, n, T::factorial(n))
}

/// `(-1)^(n+1) · s^n / n`
fn log_term<T: Value>(n: usize) -> SeriesTerm<T> {
    SeriesTerm::new(
        n,
        Sign::alternating(n.wrapping_add(1)),
        n,
        T::from_positive_int(n),
    )
}
