//! Utilities for displaying truncated series as formulas
//!
//! This module turns [`SeriesParameters`] into a [`Formula`]: a label such as
//! `sin(x) ≈` followed by one [`FormulaTerm`] per summand. The terms come from
//! [`SeriesParameters::terms`], the same summands the sampler adds up, so what is
//! shown is exactly what is plotted.
//!
//! # Key Concepts
//! - **[`Formula`]**: The label and the ordered terms; renders as text.
//! - **[`FormulaTerm`]**: Sign, optional coefficient, variable power and denominator.
//! - **[`Sign`]**: Tracks whether a term is added or subtracted.
//! - **[`FormulaStyle`]**: Plain `x^3` exponents or Unicode superscripts `x³`.
//!
//! # Example
//! ```
//! # use taylorscope::{display::render, FunctionKind, SeriesParameters};
//! let params = SeriesParameters::new(FunctionKind::Exponential, 3, 0.0_f64);
//! let formula = render(&params);
//! assert_eq!(formula.to_string(), "e^x ≈ x^0/1 + x^1/1 + x^2/2 + x^3/6");
//! ```
use std::fmt;

use crate::{series::SeriesParameters, value::Value};

pub mod unicode;

/// Default precision for formatting coefficients
///
/// Only used when a [`FormulaTerm`] carries a non-unit coefficient; [`render`] never
/// produces one for the built-in functions.
pub const DEFAULT_PRECISION: usize = 2;

/// How exponents are written when a formula is rendered to text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormulaStyle {
    /// ASCII exponents: `(x - 1)^3/6`
    #[default]
    Plain,

    /// Unicode superscript exponents: `(x - 1)³/6`
    Unicode,
}

/// Represents the sign of a series term.
///
/// Used when formatting formulas to determine how a term
/// is connected to the rest of the expression (`+` or `-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    #[serde(rename = "+")]
    Positive,

    /// Negative sign (`-` when displayed).
    #[serde(rename = "-")]
    Negative,
}

impl Sign {
    /// The sign of `(-1)^power`
    ///
    /// # Example
    /// ```
    /// # use taylorscope::display::Sign;
    /// assert_eq!(Sign::alternating(0), Sign::Positive);
    /// assert_eq!(Sign::alternating(3), Sign::Negative);
    /// ```
    #[must_use]
    pub fn alternating(power: usize) -> Self {
        if power % 2 == 0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    /// Multiplies a value by this sign
    pub fn apply<T: Value>(self, value: T) -> T {
        match self {
            Sign::Positive => value,
            Sign::Negative => -value,
        }
    }

    /// Returns the character representation of the sign.
    ///
    /// `+` for `Positive`, `-` for `Negative`.
    ///
    /// # Example
    /// ```
    /// # use taylorscope::display::Sign;
    /// assert_eq!(Sign::Positive.char(), '+');
    /// assert_eq!(Sign::Negative.char(), '-');
    /// ```
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

/// The variable part of a term: `x` or `(x - center)`, raised to a power
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Variable<T> {
    /// Expansion point; zero renders as a bare `x`
    pub center: T,

    /// Power the variable is raised to
    pub exponent: usize,
}

impl<T: Value> Variable<T> {
    /// Creates a new variable power
    pub fn new(center: T, exponent: usize) -> Self {
        Self { center, exponent }
    }

    /// The base being raised: `x`, `(x - 1.5)` or `(x + 2)`
    #[must_use]
    pub fn base(&self) -> String {
        let center = self.center;
        if center == T::zero() {
            "x".to_string()
        } else if center < T::zero() {
            format!("(x + {})", -center)
        } else {
            format!("(x - {center})")
        }
    }

    /// Formats the base and its exponent in the given style
    #[must_use]
    pub fn format(&self, style: FormulaStyle) -> String {
        let base = self.base();
        match style {
            FormulaStyle::Plain => format!("{base}^{}", self.exponent),
            FormulaStyle::Unicode => {
                format!("{base}{}", unicode::superscript(&self.exponent.to_string()))
            }
        }
    }
}

/// A single displayed term of a formula
///
/// The first term of a formula carries no sign; the sign of every later term
/// comes from the alternating factor of the series. The alternating factor never
/// contributes a printed coefficient, so `coefficient` is `None` for every
/// built-in function.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FormulaTerm<T> {
    /// Summation index `n` this term was built from
    pub index: usize,

    /// Sign glyph preceding the term, if any
    pub sign: Option<Sign>,

    /// Numeric coefficient, if one needs to be printed
    ///
    /// Always `None` from [`render`]. Callers building terms by hand can set it, and
    /// [`FormulaTerm::body`] formats it with [`format_coefficient`].
    pub coefficient: Option<T>,

    /// The variable and its power
    pub variable: Variable<T>,

    /// Denominator; a factorial, or `n` for the logarithm
    pub denominator: T,
}

impl<T: Value> FormulaTerm<T> {
    /// The term without its sign, e.g. `(x - 1)^3/6`
    #[must_use]
    pub fn body(&self, style: FormulaStyle) -> String {
        let coefficient = self
            .coefficient
            .and_then(|c| format_coefficient(c, DEFAULT_PRECISION))
            .unwrap_or_default();
        let variable = self.variable.format(style);
        format!("{coefficient}{variable}/{}", self.denominator)
    }

    /// Writes the term, preceded by its sign if it has one
    ///
    /// # Errors
    /// Returns an error if writing to `buffer` fails.
    pub fn write<B: fmt::Write>(&self, buffer: &mut B, style: FormulaStyle) -> fmt::Result {
        if let Some(sign) = self.sign {
            write!(buffer, "{} ", sign.char())?;
        }
        write!(buffer, "{}", self.body(style))
    }
}

impl<T: Value> fmt::Display for FormulaTerm<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, FormulaStyle::Plain)
    }
}

/// A labelled, term-by-term description of a truncated series
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Formula<T = f64> {
    /// Label such as `sin(x) ≈`
    pub label: String,

    /// Terms in summation order
    pub terms: Vec<FormulaTerm<T>>,
}

impl<T: Value> Formula<T> {
    /// Number of terms
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the formula has no terms
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Writes the full formula into the provided buffer.
    ///
    /// The label is followed by the terms separated by spaces; a formula
    /// without terms is written as `label 0`.
    ///
    /// # Errors
    /// Returns an error if writing to `buffer` fails.
    pub fn write<B: fmt::Write>(&self, buffer: &mut B, style: FormulaStyle) -> fmt::Result {
        write!(buffer, "{}", self.label)?;
        if self.terms.is_empty() {
            return write!(buffer, " 0");
        }

        for term in &self.terms {
            write!(buffer, " ")?;
            term.write(buffer, style)?;
        }
        Ok(())
    }

    /// Renders the formula to a string in the given style
    #[must_use]
    pub fn to_styled_string(&self, style: FormulaStyle) -> String {
        let mut buffer = String::new();
        // Writing into a String cannot fail
        let _ = self.write(&mut buffer, style);
        buffer
    }
}

impl<T: Value> fmt::Display for Formula<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, FormulaStyle::Plain)
    }
}

/// Renders the truncated series described by `params` as a formula
///
/// One term is produced per summand of [`SeriesParameters::terms`], with the same
/// exponent and denominator. Only presentation data is produced here; nothing is
/// evaluated.
pub fn render<T: Value>(params: &SeriesParameters<T>) -> Formula<T> {
    let descriptor = params.descriptor();
    let terms: Vec<_> = params
        .terms()
        .enumerate()
        .map(|(position, term)| FormulaTerm {
            index: term.index,
            sign: (position > 0).then_some(term.sign),
            coefficient: None,
            variable: Variable::new(params.center, term.exponent),
            denominator: term.denominator,
        })
        .collect();

    log::debug!(
        "rendered {} formula with {} terms around {}",
        params.kind,
        terms.len(),
        params.center
    );

    Formula {
        label: descriptor.approx_label(),
        terms,
    }
}

/// Formats a numeric coefficient for display in a term.
///
/// - Returns `None` if the coefficient is zero or effectively zero (≤ epsilon).
/// - Returns an empty string for a unit coefficient, which is implied.
/// - Formats as a decimal if the absolute value is between `1e-3` and `1e3`, in scientific notation otherwise.
///
/// # Example
/// ```
/// # use taylorscope::display::format_coefficient;
/// assert_eq!(format_coefficient(0.0, 2), None);
/// assert_eq!(format_coefficient(1.0, 2), Some(String::new()));
/// assert_eq!(format_coefficient(2.5, 2), Some("2.50".to_string()));
/// assert_eq!(format_coefficient(1e5, 2), Some("1.00e5".to_string()));
/// ```
pub fn format_coefficient<T: Value>(coef: T, precision: usize) -> Option<String> {
    let abs = Value::abs(coef);
    if abs <= T::epsilon() {
        return None;
    }

    if Value::abs(abs - T::one()) <= T::epsilon() {
        return Some(String::new());
    }

    let low = T::try_cast(1e-3).ok()?;
    let high = T::try_cast(1e3).ok()?;
    Some(unicode::float(abs, Some(low..high), precision))
}
