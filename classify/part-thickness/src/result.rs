//! Result types for thickness estimation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a statistical thickness estimate.
///
/// # Example
///
/// ```
/// use part_thickness::{estimate_thickness, EstimatorParams};
///
/// let samples = vec![2.0; 40];
/// let estimate = estimate_thickness(&samples, &EstimatorParams::default()).unwrap();
/// assert!(estimate.is_uniform);
/// assert!((estimate.representative_mm - 2.0).abs() < 0.1);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThicknessEstimate {
    /// The single thickness value to hand to classification: the mode for
    /// uniform-walled parts, the minimum otherwise.
    pub representative_mm: f64,

    /// Minimum thickness in the filtered sample set.
    pub min_mm: f64,

    /// Median thickness in the filtered sample set.
    pub median_mm: f64,

    /// Midpoint of the most populated histogram bin.
    pub mode_mm: f64,

    /// Whether the walls count as uniform (median close to minimum).
    pub is_uniform: bool,

    /// Number of raw samples supplied.
    pub sample_count: usize,

    /// Number of samples kept after outlier filtering.
    pub kept_count: usize,
}

impl ThicknessEstimate {
    /// Relative spread between median and minimum, `(median - min) / min`.
    ///
    /// The denominator is floored at 0.1 mm so paper-thin parts do not
    /// blow the ratio up.
    #[must_use]
    pub fn spread_ratio(&self) -> f64 {
        (self.median_mm - self.min_mm) / self.min_mm.max(0.1)
    }

    /// Fraction of raw samples rejected by the outlier fence.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rejected_fraction(&self) -> f64 {
        if self.sample_count == 0 {
            0.0
        } else {
            1.0 - (self.kept_count as f64) / (self.sample_count as f64)
        }
    }

    /// Confidence in this measurement relative to the part's smallest
    /// bounding-box extent.
    ///
    /// A wall much thinner than the bounding box means ray casting found
    /// real material thickness rather than echoing the box, so confidence
    /// rises as the ratio falls:
    ///
    /// | thickness / bbox min | confidence |
    /// |----------------------|------------|
    /// | < 0.3                | 0.95       |
    /// | < 0.5                | 0.80       |
    /// | < 0.7                | 0.60       |
    /// | otherwise            | 0.40       |
    ///
    /// Returns 0.0 when the estimate itself is empty (non-positive
    /// representative thickness).
    #[must_use]
    pub fn confidence_for(&self, min_bbox_dim: f64) -> f64 {
        if self.representative_mm <= 0.0 {
            return 0.0;
        }
        let ratio = self.representative_mm / min_bbox_dim.max(0.1);
        if ratio < 0.3 {
            0.95
        } else if ratio < 0.5 {
            0.80
        } else if ratio < 0.7 {
            0.60
        } else {
            0.40
        }
    }
}

impl std::fmt::Display for ThicknessEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Wall Thickness Estimate:")?;
        writeln!(f, "  Representative: {:.2} mm", self.representative_mm)?;
        writeln!(f, "  Min: {:.2} mm", self.min_mm)?;
        writeln!(f, "  Median: {:.2} mm", self.median_mm)?;
        writeln!(f, "  Mode: {:.2} mm", self.mode_mm)?;
        writeln!(f, "  Uniform walls: {}", self.is_uniform)?;
        writeln!(
            f,
            "  Samples kept: {} of {}",
            self.kept_count, self.sample_count
        )?;
        Ok(())
    }
}
