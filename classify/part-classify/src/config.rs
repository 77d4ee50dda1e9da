//! Named constant tables for classification thresholds.
//!
//! These numbers are the production quoting calibration. They are grouped
//! here so tuning never touches the decision logic.

/// Standard sheet-metal gauge thicknesses in mm.
pub const STANDARD_GAUGES_MM: [f64; 10] = [0.8, 1.0, 1.2, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0];

/// How close (mm) a minimum dimension must be to a standard gauge to earn
/// the gauge bonus in scoring.
pub const GAUGE_TOLERANCE_MM: f64 = 0.3;

/// Lower bound of the sheet-metal thickness range (approx 26 gauge).
pub const SHEET_METAL_MIN_THICKNESS_MM: f64 = 0.4;

/// Upper bound of the sheet-metal thickness range (thick plate).
pub const SHEET_METAL_MAX_THICKNESS_MM: f64 = 8.0;

/// Check whether a thickness sits within tolerance of a standard gauge.
#[must_use]
pub(crate) fn near_standard_gauge(thickness_mm: f64) -> bool {
    STANDARD_GAUGES_MM
        .iter()
        .any(|&gauge| (thickness_mm - gauge).abs() < GAUGE_TOLERANCE_MM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_match() {
        assert!(near_standard_gauge(1.0));
        assert!(near_standard_gauge(2.2));
        assert!(!near_standard_gauge(3.5));
        assert!(!near_standard_gauge(20.0));
    }

    #[test]
    fn test_thickness_range_ordering() {
        assert!(SHEET_METAL_MIN_THICKNESS_MM < SHEET_METAL_MAX_THICKNESS_MM);
    }
}
