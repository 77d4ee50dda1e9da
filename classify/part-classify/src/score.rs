//! Sheet-metal likelihood scoring.
//!
//! A 0–100 additive score over five independent geometric checks, plus a
//! bundle of advanced metrics used by the classifier's scoring fallback.
//! Each check is an ordered tier table evaluated top to bottom so the
//! short-circuit order stays visible and testable per rule.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::near_standard_gauge;
use crate::metrics::GeometricMetrics;

/// Aspect-ratio tiers (25 points max): sheet is much longer than thick.
const ASPECT_RATIO_TIERS: [(f64, f64); 4] = [(20.0, 25.0), (15.0, 20.0), (10.0, 15.0), (5.0, 8.0)];

/// Surface-to-volume tiers (20 points max): thin walls mean high ratio.
const SURFACE_TO_VOLUME_TIERS: [(f64, f64); 4] =
    [(80.0, 20.0), (60.0, 15.0), (40.0, 10.0), (25.0, 5.0)];

/// Flatness tiers (15 points max).
const FLATNESS_TIERS: [(f64, f64); 3] = [(0.7, 15.0), (0.5, 10.0), (0.3, 5.0)];

/// Award the points of the first tier whose threshold the value exceeds.
fn tier_points(value: f64, tiers: &[(f64, f64)]) -> f64 {
    tiers
        .iter()
        .find(|&&(threshold, _)| value > threshold)
        .map_or(0.0, |&(_, points)| points)
}

/// Sheet-metal likelihood score from 0 to 100.
///
/// Five additive checks; the running total is clamped to `[0, 100]` only
/// as the final step:
///
/// 1. Thickness band (up to 50): minimum dimension in sheet gauge range
/// 2. Aspect ratio (up to 25)
/// 3. Surface-to-volume ratio (up to 20)
/// 4. Flatness (up to 15)
/// 5. Volume efficiency (up to 10): low efficiency means hollow or bent
///
/// # Example
///
/// ```
/// use part_classify::{sheet_metal_score, GeometricMetrics};
///
/// // 2mm sheet, 200x100mm: scores high.
/// let sheet = GeometricMetrics::new([2.0, 100.0, 200.0], 38_000.0, 41_000.0).unwrap();
/// // 50mm solid cube: scores low.
/// let block = GeometricMetrics::new([50.0, 50.0, 50.0], 110_000.0, 16_000.0).unwrap();
///
/// assert!(sheet_metal_score(&sheet) > sheet_metal_score(&block));
/// ```
#[must_use]
pub fn sheet_metal_score(metrics: &GeometricMetrics) -> f64 {
    let mut score = 0.0;

    // 1. Thickness band. The gauge bonus rewards stock thicknesses; very
    // thin non-standard material earns a flat partial credit.
    if (0.5..=6.0).contains(&metrics.min_dim) {
        score += 35.0;
        if near_standard_gauge(metrics.min_dim) {
            score += 15.0;
        } else if metrics.min_dim <= 4.0 {
            score += 8.0;
        }
    } else if (0.3..0.5).contains(&metrics.min_dim) {
        score += 25.0;
    }

    // 2. Aspect ratio.
    score += tier_points(metrics.aspect_ratio, &ASPECT_RATIO_TIERS);

    // 3. Surface-to-volume ratio.
    score += tier_points(metrics.surface_to_volume_ratio, &SURFACE_TO_VOLUME_TIERS);

    // 4. Flatness.
    if metrics.min_dim > 0.0 {
        let flatness_ratio = (metrics.mid_dim * metrics.max_dim)
            / (metrics.volume_cm3 * 10.0 / metrics.min_dim).max(1.0);
        score += tier_points(flatness_ratio, &FLATNESS_TIERS);
    }

    // 5. Volume efficiency.
    if metrics.volume_efficiency < 0.4 {
        score += 10.0;
    } else if metrics.volume_efficiency < 0.6 {
        score += 5.0;
    }

    score.clamp(0.0, 100.0)
}

/// Advanced geometric metrics for the classifier's scoring fallback.
///
/// All fields are bucketed step functions over the continuous inputs; the
/// breakpoints are part of the observable quoting behavior.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdvancedMetrics {
    /// High for uniform thin walls (sheet metal), low for machined solids.
    pub wall_thickness_consistency: f64,
    /// High for mostly flat or flat-bent parts.
    pub planarity_score: f64,
    /// High for solid parts, low for hollow structures.
    pub volume_distribution: f64,
    /// High for box-like parts, low for elongated ones.
    pub dimension_balance: f64,
    /// Surface-to-volume ratio passed through from the base metrics.
    pub surface_to_volume_ratio: f64,
}

/// Compute the advanced metrics bundle from base geometry.
#[must_use]
pub fn advanced_metrics(metrics: &GeometricMetrics) -> AdvancedMetrics {
    let volume_distribution = if metrics.volume_efficiency > 0.7 {
        0.9
    } else if metrics.volume_efficiency > 0.5 {
        0.6
    } else if metrics.volume_efficiency > 0.3 {
        0.3
    } else {
        0.1
    };

    // Low efficiency with a thin minimum dimension reads as consistent
    // thin walls; high efficiency as varying machined thickness.
    let wall_thickness_consistency = if metrics.min_dim < 6.0 && metrics.volume_efficiency < 0.5 {
        0.8 + (1.0 - metrics.volume_efficiency) * 0.2
    } else {
        0.4
    };

    let planarity_score = if metrics.aspect_ratio > 10.0 && metrics.volume_efficiency < 0.5 {
        0.7 + (metrics.aspect_ratio / 100.0).min(0.3)
    } else if metrics.aspect_ratio > 5.0 {
        0.5
    } else {
        0.3
    };

    let dimension_balance = if metrics.mid_dim > 0.0 {
        let mid_to_max = metrics.mid_dim / metrics.max_dim;
        let min_to_mid = metrics.min_dim / metrics.mid_dim;
        (mid_to_max + min_to_mid) / 2.0
    } else {
        0.0
    };

    AdvancedMetrics {
        wall_thickness_consistency,
        planarity_score,
        volume_distribution,
        dimension_balance,
        surface_to_volume_ratio: metrics.surface_to_volume_ratio,
    }
}
