//! Geometric summary metrics.
//!
//! Normalizes raw measurements from the geometry kernel into a canonical,
//! sorted dimension triple plus the derived ratios every downstream check
//! consumes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ClassifyError, ClassifyResult};

/// Immutable geometric summary of a part.
///
/// Constructed once per analysis request from externally supplied
/// measurements, never mutated. Dimensions are sorted ascending on
/// construction regardless of input order.
///
/// Degenerate geometry (zero dimensions or volume) is accepted: every
/// derived ratio floors its denominator (`max(x, 0.1)`) instead of failing,
/// and a zero envelope yields zero volume efficiency. Those floors set the
/// near-boundary classification behavior and must not change.
///
/// # Example
///
/// ```
/// use part_classify::GeometricMetrics;
///
/// let metrics = GeometricMetrics::new([100.0, 2.0, 50.0], 9_000.0, 11_000.0).unwrap();
/// assert!((metrics.min_dim - 2.0).abs() < 1e-12);
/// assert!((metrics.max_dim - 100.0).abs() < 1e-12);
/// assert!((metrics.aspect_ratio - 50.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeometricMetrics {
    /// Smallest bounding-box extent in mm.
    pub min_dim: f64,
    /// Middle bounding-box extent in mm.
    pub mid_dim: f64,
    /// Largest bounding-box extent in mm.
    pub max_dim: f64,
    /// Measured part volume in mm³.
    pub volume_mm3: f64,
    /// Measured surface area in mm².
    pub surface_area_mm2: f64,
    /// Bounding-box envelope volume, `min * mid * max`.
    pub envelope_volume: f64,
    /// `max_dim / max(min_dim, 0.1)`.
    pub aspect_ratio: f64,
    /// Part volume over envelope volume; 0 when the envelope is empty.
    pub volume_efficiency: f64,
    /// Volume in cm³.
    pub volume_cm3: f64,
    /// Surface area in cm².
    pub surface_area_cm2: f64,
    /// `surface_area_cm2 / max(volume_cm3, 0.1)`.
    pub surface_to_volume_ratio: f64,
}

impl GeometricMetrics {
    /// Build metrics from three unordered extents (mm), volume (mm³), and
    /// surface area (mm²).
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::NonFiniteInput`] if any measurement is NaN
    /// or infinite. Finite degenerate values (zeros, negatives) are
    /// accepted and absorbed by the derived-ratio floors.
    pub fn new(
        bbox_dims: [f64; 3],
        volume_mm3: f64,
        surface_area_mm2: f64,
    ) -> ClassifyResult<Self> {
        for &dim in &bbox_dims {
            if !dim.is_finite() {
                return Err(ClassifyError::non_finite("bbox dimension", dim));
            }
        }
        if !volume_mm3.is_finite() {
            return Err(ClassifyError::non_finite("volume_mm3", volume_mm3));
        }
        if !surface_area_mm2.is_finite() {
            return Err(ClassifyError::non_finite("surface_area_mm2", surface_area_mm2));
        }

        let mut dims = bbox_dims;
        dims.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let [min_dim, mid_dim, max_dim] = dims;

        let envelope_volume = min_dim * mid_dim * max_dim;
        let aspect_ratio = max_dim / min_dim.max(0.1);
        let volume_efficiency = if envelope_volume > 0.0 {
            volume_mm3 / envelope_volume
        } else {
            0.0
        };

        let volume_cm3 = volume_mm3 / 1000.0;
        let surface_area_cm2 = surface_area_mm2 / 100.0;
        let surface_to_volume_ratio = surface_area_cm2 / volume_cm3.max(0.1);

        Ok(Self {
            min_dim,
            mid_dim,
            max_dim,
            volume_mm3,
            surface_area_mm2,
            envelope_volume,
            aspect_ratio,
            volume_efficiency,
            volume_cm3,
            surface_area_cm2,
            surface_to_volume_ratio,
        })
    }
}
