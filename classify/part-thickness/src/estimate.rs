//! Thickness estimation implementation.
//!
//! Reduces raw two-way ray-cast distance sums to one representative wall
//! thickness using percentile-fence outlier filtering and histogram-mode
//! estimation.

use tracing::{debug, info, warn};

use crate::error::{ThicknessError, ThicknessResult};
use crate::params::EstimatorParams;
use crate::result::ThicknessEstimate;

/// Estimate a representative wall thickness from ray-cast samples.
///
/// Each sample is the forward plus backward first-hit distance at one
/// surface point, in mm. Samples must be finite and non-negative; upstream
/// ray casting drops unpaired hits before this point.
///
/// # Errors
///
/// Returns [`ThicknessError::NoSamples`] for an empty slice and
/// [`ThicknessError::InvalidSample`] for non-finite or negative values.
/// Callers treat `NoSamples` as "no thickness signal" and fall back to a
/// bounding-box approximation.
///
/// # Example
///
/// ```
/// use part_thickness::{estimate_thickness, EstimatorParams};
///
/// let samples = vec![1.5, 1.52, 1.48, 1.5, 1.51];
/// let estimate = estimate_thickness(&samples, &EstimatorParams::default()).unwrap();
/// assert!(estimate.is_uniform);
/// ```
pub fn estimate_thickness(
    samples: &[f64],
    params: &EstimatorParams,
) -> ThicknessResult<ThicknessEstimate> {
    if samples.is_empty() {
        return Err(ThicknessError::no_samples());
    }

    for (index, &value) in samples.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(ThicknessError::invalid_sample(index, value));
        }
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    // Tukey fence on the 5th/95th percentile spread. Edge artifacts and
    // self-intersections show up as extreme distance sums.
    let p5 = percentile(&sorted, 5.0);
    let p95 = percentile(&sorted, 95.0);
    let iqr = p95 - p5;
    let lo = p5 - params.fence_factor * iqr;
    let hi = p95 + params.fence_factor * iqr;

    let mut kept: Vec<f64> = sorted.iter().copied().filter(|&v| v >= lo && v <= hi).collect();
    if kept.is_empty() {
        // A non-empty input must always produce an estimate.
        warn!(
            samples = samples.len(),
            "outlier fence rejected every sample, using unfiltered set"
        );
        kept = sorted;
    }

    let min_mm = kept[0];
    let median_mm = percentile(&kept, 50.0);
    let mode_mm = histogram_mode(&kept, params.bins);

    let spread = (median_mm - min_mm) / min_mm.max(0.1);
    let is_uniform = spread < params.uniformity_threshold;

    // Uniform walls are best summarized by the most common gauge; varying
    // walls by the conservative minimum, since any thin reading on an
    // otherwise thick part is the diagnostic signal.
    let representative_mm = if is_uniform { mode_mm } else { min_mm };

    debug!(
        p5 = format!("{p5:.3}"),
        p95 = format!("{p95:.3}"),
        kept = kept.len(),
        rejected = samples.len().saturating_sub(kept.len()),
        "outlier filtering complete"
    );
    info!(
        min = format!("{min_mm:.2}"),
        median = format!("{median_mm:.2}"),
        mode = format!("{mode_mm:.2}"),
        uniform = is_uniform,
        "thickness estimate complete"
    );

    Ok(ThicknessEstimate {
        representative_mm,
        min_mm,
        median_mm,
        mode_mm,
        is_uniform,
        sample_count: samples.len(),
        kept_count: kept.len(),
    })
}

/// Linear-interpolation percentile over a sorted slice.
///
/// Matches the behavior of the reference statistics stack: rank
/// `q/100 * (n-1)`, interpolated between the neighboring order statistics.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = q / 100.0 * ((sorted.len() - 1) as f64);
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let frac = rank - rank.floor();
    sorted[lower] + frac * (sorted[upper] - sorted[lower])
}

/// Midpoint of the most populated histogram bin.
///
/// Bins span the kept sample range; the first maximal bin wins ties. A
/// zero-width range (all samples equal) returns that value directly.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn histogram_mode(sorted: &[f64], bins: usize) -> f64 {
    debug_assert!(!sorted.is_empty());
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    if bins == 0 || max <= min {
        return min;
    }

    let width = (max - min) / (bins as f64);
    let mut counts = vec![0_usize; bins];
    for &v in sorted {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let mut best = 0;
    for (idx, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = idx;
        }
    }
    min + (best as f64 + 0.5) * width
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Uniform-walled part: a strong 2.0 mm plurality with mild spread.
    fn uniform_samples() -> Vec<f64> {
        let mut samples = vec![2.0; 60];
        samples.extend(vec![1.95; 20]);
        samples.extend(vec![2.05; 20]);
        samples
    }

    #[test]
    fn test_empty_input_errors() {
        let result = estimate_thickness(&[], &EstimatorParams::default());
        assert!(matches!(result, Err(ThicknessError::NoSamples)));
    }

    #[test]
    fn test_invalid_sample_errors() {
        let result = estimate_thickness(&[1.0, f64::NAN], &EstimatorParams::default());
        assert!(matches!(
            result,
            Err(ThicknessError::InvalidSample { index: 1, .. })
        ));

        let result = estimate_thickness(&[1.0, -0.5], &EstimatorParams::default());
        assert!(matches!(
            result,
            Err(ThicknessError::InvalidSample { index: 1, .. })
        ));
    }

    #[test]
    fn test_uniform_part_uses_mode() {
        let estimate =
            estimate_thickness(&uniform_samples(), &EstimatorParams::default()).unwrap();

        assert!(estimate.is_uniform);
        assert_relative_eq!(estimate.min_mm, 1.95, epsilon = 1e-12);
        assert_relative_eq!(estimate.median_mm, 2.0, epsilon = 1e-12);
        // Mode bin midpoint lands next to the 2.0 plurality.
        assert!((estimate.mode_mm - 2.0).abs() < 0.01);
        assert_relative_eq!(estimate.representative_mm, estimate.mode_mm);
    }

    #[test]
    fn test_varying_part_uses_minimum() {
        // Bimodal: thin webs at 1 mm, thick bosses at 5 mm. Median lands on
        // the thick side, spread ratio is 4.0, far from uniform.
        let mut samples = vec![1.0; 30];
        samples.extend(vec![5.0; 70]);

        let estimate = estimate_thickness(&samples, &EstimatorParams::default()).unwrap();

        assert!(!estimate.is_uniform);
        assert_relative_eq!(estimate.representative_mm, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_sample() {
        let estimate = estimate_thickness(&[3.0], &EstimatorParams::default()).unwrap();
        assert!(estimate.is_uniform);
        assert_relative_eq!(estimate.representative_mm, 3.0, epsilon = 1e-12);
        assert_eq!(estimate.kept_count, 1);
    }

    #[test]
    fn test_all_equal_samples() {
        let estimate = estimate_thickness(&[2.5; 200], &EstimatorParams::default()).unwrap();
        assert!(estimate.is_uniform);
        assert_relative_eq!(estimate.representative_mm, 2.5, epsilon = 1e-12);
        assert_relative_eq!(estimate.mode_mm, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_outlier_is_fenced_out() {
        let baseline =
            estimate_thickness(&uniform_samples(), &EstimatorParams::default()).unwrap();

        let mut with_outlier = uniform_samples();
        with_outlier.push(1000.0);
        let spiked = estimate_thickness(&with_outlier, &EstimatorParams::default()).unwrap();

        assert_eq!(spiked.kept_count, baseline.kept_count);
        let change =
            (spiked.representative_mm - baseline.representative_mm).abs() / baseline.representative_mm;
        assert!(change < 0.05, "outlier moved the estimate by {change:.3}");
    }

    #[test]
    fn test_appending_in_fence_sample_is_stable() {
        let baseline =
            estimate_thickness(&uniform_samples(), &EstimatorParams::default()).unwrap();

        let mut extended = uniform_samples();
        extended.push(2.0);
        let more = estimate_thickness(&extended, &EstimatorParams::default()).unwrap();

        assert_relative_eq!(
            more.representative_mm,
            baseline.representative_mm,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_fence_collapse_falls_back_to_unfiltered() {
        // A negative fence factor inverts the fence bounds and rejects
        // every sample; the estimator must fall back to the unfiltered set
        // rather than return nothing.
        let samples = vec![1.0, 1.0, 2.0, 2.0];
        let params = EstimatorParams::default().fence_factor(-1.0);
        let estimate = estimate_thickness(&samples, &params).unwrap();
        assert_eq!(estimate.kept_count, 4);
        assert!(!estimate.is_uniform);
        assert_relative_eq!(estimate.representative_mm, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_interpolation() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(percentile(&sorted, 0.0), 1.0);
        assert_relative_eq!(percentile(&sorted, 100.0), 4.0);
        assert_relative_eq!(percentile(&sorted, 50.0), 2.5);
        assert_relative_eq!(percentile(&sorted, 25.0), 1.75);
    }

    #[test]
    fn test_histogram_mode_tie_takes_first_bin() {
        // Equal counts at both ends; the lower bin wins.
        let sorted = vec![1.0, 1.0, 3.0, 3.0];
        let mode = histogram_mode(&sorted, 2);
        assert!(mode < 2.0);
    }

    #[test]
    fn test_provenance_counts() {
        let mut samples = uniform_samples();
        samples.push(500.0);
        let estimate = estimate_thickness(&samples, &EstimatorParams::default()).unwrap();
        assert_eq!(estimate.sample_count, 101);
        assert_eq!(estimate.kept_count, 100);
    }
}
