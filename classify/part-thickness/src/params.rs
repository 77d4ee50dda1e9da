//! Parameters for thickness estimation.

/// Parameters for statistical thickness estimation.
///
/// The defaults reproduce the production quoting behavior; changing them
/// shifts which thickness a part is billed at, so treat them as tuning
/// knobs for calibration work only.
///
/// # Example
///
/// ```
/// use part_thickness::EstimatorParams;
///
/// let params = EstimatorParams::default();
/// assert_eq!(params.bins, 50);
///
/// let coarse = EstimatorParams::default().bins(20);
/// assert_eq!(coarse.bins, 20);
/// ```
#[derive(Debug, Clone)]
pub struct EstimatorParams {
    /// Number of histogram bins used to locate the thickness mode.
    pub bins: usize,

    /// Multiplier applied to the p5–p95 spread when building the
    /// outlier fence.
    pub fence_factor: f64,

    /// Maximum relative spread `(median - min) / min` for a part to count
    /// as uniform-walled.
    pub uniformity_threshold: f64,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            bins: 50,
            fence_factor: 1.5,
            uniformity_threshold: 0.3,
        }
    }
}

impl EstimatorParams {
    /// Set the number of histogram bins.
    #[must_use]
    pub const fn bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    /// Set the outlier fence multiplier.
    #[must_use]
    pub const fn fence_factor(mut self, factor: f64) -> Self {
        self.fence_factor = factor;
        self
    }

    /// Set the uniformity threshold.
    #[must_use]
    pub const fn uniformity_threshold(mut self, threshold: f64) -> Self {
        self.uniformity_threshold = threshold;
        self
    }
}
