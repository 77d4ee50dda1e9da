//! Error types for process classification.

use thiserror::Error;

/// Result type alias for classification operations.
pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Errors that can occur during classification.
///
/// Classification itself never fails on well-formed metrics; the only error
/// surface is the metrics constructor rejecting non-finite measurements,
/// which is a caller contract violation.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// A measurement was NaN or infinite.
    #[error("non-finite {name}: {value}")]
    NonFiniteInput {
        /// Which measurement was invalid.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
}

impl ClassifyError {
    /// Create a non-finite input error.
    #[must_use]
    pub const fn non_finite(name: &'static str, value: f64) -> Self {
        Self::NonFiniteInput { name, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClassifyError::non_finite("volume_mm3", f64::INFINITY);
        let text = format!("{err}");
        assert!(text.contains("volume_mm3"));
        assert!(text.contains("inf"));
    }
}
