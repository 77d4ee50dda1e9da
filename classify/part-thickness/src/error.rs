//! Error types for thickness estimation.

use thiserror::Error;

/// Result type alias for thickness estimation.
pub type ThicknessResult<T> = Result<T, ThicknessError>;

/// Errors that can occur during thickness estimation.
#[derive(Debug, Error)]
pub enum ThicknessError {
    /// No usable samples were provided.
    #[error("no thickness samples to estimate from")]
    NoSamples,

    /// A sample was non-finite or negative.
    ///
    /// Upstream ray casting is expected to have dropped unpaired and
    /// infinite hits already, so this indicates a caller bug.
    #[error("invalid sample at index {index}: {value}")]
    InvalidSample {
        /// Index of the offending sample in the input slice.
        index: usize,
        /// The offending value.
        value: f64,
    },
}

impl ThicknessError {
    /// Create a no-samples error.
    #[must_use]
    pub const fn no_samples() -> Self {
        Self::NoSamples
    }

    /// Create an invalid-sample error.
    #[must_use]
    pub const fn invalid_sample(index: usize, value: f64) -> Self {
        Self::InvalidSample { index, value }
    }
}
