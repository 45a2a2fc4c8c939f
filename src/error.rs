//! Error types for series sampling and rendering
//!
//! Sampling and rendering themselves are total; these errors only come out of
//! the boundaries where untrusted input is turned into typed parameters.

/// Errors that can occur when configuring or selecting a series.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The function token does not name one of the supported functions.
    ///
    /// Valid tokens are `sin`, `cos`, `exp` and `ln`.
    #[error("Unknown function kind `{0}`; expected one of sin, cos, exp, ln")]
    UnknownFunction(String),

    /// The sampling domain cannot produce an ordered set of points.
    ///
    /// The bounds must be finite, `start <= end`, and the step strictly positive.
    #[error("Invalid sampling domain: {0}")]
    InvalidDomain(String),

    /// A numeric value could not be cast to the target type. This is usually a custom type much smaller than f64/f32
    #[error("Failed to cast value to target type")]
    CastFailed,
}

/// Result type for series configuration
pub type Result<T> = std::result::Result<T, Error>;
