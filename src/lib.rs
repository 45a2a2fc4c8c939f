//! # Taylorscope
//! ## Watch a polynomial pretend to be a function
//!
//! A truncated Taylor series is a good approximation near its expansion point and a
//! terrible one far away from it. This library computes both sides of that story for a
//! handful of classic functions so a front end can draw them next to each other:
//! - `sin(x)`, `cos(x)`, `e^x` and `ln(1+x)`, expanded around a chosen center
//! - Exact values and series values, sampled across a fixed domain
//! - The human-readable formula of the truncated series
//!
//! The simplest use-case is to sample one configuration and print its formula:
//! ```rust
//! # use taylorscope::{render, sample, FunctionKind, SeriesParameters};
//! let params = SeriesParameters::new(FunctionKind::Exponential, 3, 0.0_f64);
//!
//! let formula = render(&params);
//! assert_eq!(formula.to_string(), "e^x ≈ x^0/1 + x^1/1 + x^2/2 + x^3/6");
//!
//! let samples = sample(&params);
//! let point = samples.at(1.0).unwrap();
//! assert!((point.approx.unwrap() - 8.0 / 3.0).abs() < 1e-12);
//! ```
//!
//! # Core Concepts
//! - A [`FunctionKind`] names one of the supported functions.
//!     - Its [`function::Descriptor`] holds everything known about it: the exact function,
//!       where it is defined, and the closed form of its series terms.
//!     - The sampler and the formula renderer both read from it, so they can never disagree.
//! - [`SeriesParameters`] select a function, a number of terms and an expansion point (the center).
//!     - The series is evaluated in the shifted variable `x - center`.
//! - A [`Sampler`] produces a [`SampleSet`] of [`SamplePoint`]s over a [`SampleDomain`].
//!     - Values that do not exist are `None`, never zero.
//! - [`render`] produces a [`Formula`], printable as plain text or with unicode superscripts.
//! - [`Controls`] is the state an interactive front end holds, with slider bounds.
//!
//! # Testing utilities
//!
//! This crate includes assertions for comparing floating point results. See [`test`].
//!
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]


#[cfg(feature = "plotting")]
#[cfg_attr(docsrs, doc(cfg(feature = "plotting")))]
pub mod plotting;

pub mod controls;
pub mod display;
pub mod error;
pub mod function;
pub mod sampler;
pub mod series;
pub mod value;

pub use controls::Controls;
pub use display::{render, Formula, FormulaStyle};
pub use function::FunctionKind;
pub use sampler::{sample, LogGuard, SampleDomain, SamplePoint, SampleSet, Sampler};
pub use series::{SeriesParameters, SeriesTerm};

pub use nalgebra;
