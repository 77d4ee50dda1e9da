//! Bend detection from shape statistics.
//!
//! Infers bend count, bend type, flanges, and relief cuts for formed sheet
//! parts using seven independent geometric indicators. No feature
//! recognition happens here; everything is derived from bounding box,
//! volume, surface area, and the optional detected wall thickness.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics::GeometricMetrics;

/// Optional evidence from upstream analysis passed into bend detection
/// and classification.
///
/// # Example
///
/// ```
/// use part_classify::DetectionInput;
///
/// let input = DetectionInput::default()
///     .detected_thickness(2.0)
///     .thickness_confidence(0.9)
///     .triangle_count(12_000);
/// assert_eq!(input.detected_thickness, Some(2.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DetectionInput {
    /// Wall thickness from ray casting, mm. `None` when unavailable.
    pub detected_thickness: Option<f64>,
    /// Confidence in the thickness measurement, 0 to 1.
    pub thickness_confidence: f64,
    /// Mesh triangle count; 0 when no tessellation exists.
    pub triangle_count: usize,
}

impl DetectionInput {
    /// Set the detected wall thickness.
    #[must_use]
    pub const fn detected_thickness(mut self, thickness_mm: f64) -> Self {
        self.detected_thickness = Some(thickness_mm);
        self
    }

    /// Set the thickness measurement confidence.
    #[must_use]
    pub const fn thickness_confidence(mut self, confidence: f64) -> Self {
        self.thickness_confidence = confidence;
        self
    }

    /// Set the mesh triangle count.
    #[must_use]
    pub const fn triangle_count(mut self, count: usize) -> Self {
        self.triangle_count = count;
        self
    }
}

/// The detection method that produced an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BendMethod {
    /// Detected wall far thinner than the bounding-box minimum.
    ThicknessDiscrepancy,
    /// Volume well below the bounding-box envelope.
    VolumeHollowness,
    /// Surface area well above the flat-box equivalent.
    SurfaceExcess,
    /// U-bracket dimension signature.
    UBracketPattern,
    /// L-bracket dimension signature.
    LBracketPattern,
    /// High triangle density in a thin part.
    MeshComplexity,
    /// Thin hollow structure implies flanges.
    FlangeDetection,
    /// Multiple bends imply relief cuts at corners.
    ReliefCutInference,
}

impl BendMethod {
    /// Get a human-readable name for the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThicknessDiscrepancy => "thickness discrepancy",
            Self::VolumeHollowness => "volume hollowness",
            Self::SurfaceExcess => "surface excess",
            Self::UBracketPattern => "U-bracket pattern",
            Self::LBracketPattern => "L-bracket pattern",
            Self::MeshComplexity => "mesh complexity",
            Self::FlangeDetection => "flange detection",
            Self::ReliefCutInference => "relief cut inference",
        }
    }
}

/// One triggered detection method with its evidence.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BendIndicator {
    /// Which method triggered.
    pub method: BendMethod,
    /// Confidence contributed by this method, 0 to 1.
    pub confidence: f64,
    /// Human-readable evidence line.
    pub evidence: String,
    /// Method-specific numeric payload (ratio, excess, density, ...).
    pub value: f64,
}

impl BendIndicator {
    fn new(method: BendMethod, confidence: f64, evidence: String, value: f64) -> Self {
        Self {
            method,
            confidence,
            evidence,
            value,
        }
    }
}

/// Bracket pattern inferred from dimension ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BendPattern {
    /// Two parallel bends forming a channel.
    UBracket,
    /// A single right-angle bend.
    LBracket,
}

impl BendPattern {
    /// Get a human-readable name for the pattern.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UBracket => "U-bracket",
            Self::LBracket => "L-bracket",
        }
    }
}

/// An inferred zone where material is folded.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BendRegion {
    /// Bracket pattern for the region.
    pub pattern: BendPattern,
    /// Inferred bend lines, e.g. `"along_length"`.
    pub bend_lines: Vec<String>,
}

/// Results from bend detection analysis.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BendAnalysis {
    /// Estimated number of bends.
    pub bend_count: usize,
    /// Estimated bend angles in degrees.
    pub bend_angles: Vec<f64>,
    /// Whether the part likely has flanges.
    pub has_flanges: bool,
    /// Whether the part likely has relief cuts at bend corners.
    pub has_relief_cuts: bool,
    /// Forming complexity from 0 to 100.
    pub complexity_score: f64,
    /// Inferred bend regions.
    pub bend_regions: Vec<BendRegion>,
    /// Whether the part is likely a bent sheet part.
    pub is_likely_bent: bool,
    /// Aggregate confidence across triggered indicators, 0 to 1.
    pub confidence: f64,
    /// Every indicator that triggered, in detection order.
    pub indicators: Vec<BendIndicator>,
}

impl BendAnalysis {
    /// Human-readable multi-line report for logs and UI.
    ///
    /// Not parsed downstream; the structured fields are the contract.
    #[must_use]
    pub fn report(&self) -> String {
        if !self.is_likely_bent {
            return "No bends detected - likely flat sheet or solid machined part".to_string();
        }

        let mut lines = vec![
            format!(
                "Bent sheet metal detected (confidence: {:.0}%)",
                self.confidence * 100.0
            ),
            format!("  Bend count: {}", self.bend_count),
        ];

        if !self.bend_angles.is_empty() {
            let angles = self
                .bend_angles
                .iter()
                .take(5)
                .map(|a| format!("{a:.0}°"))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("  Bend angles: {angles}"));
        }

        for (i, region) in self.bend_regions.iter().take(3).enumerate() {
            lines.push(format!(
                "  Region {}: {} - {}",
                i + 1,
                region.pattern.as_str(),
                region.bend_lines.join(", ")
            ));
        }

        lines.push(format!("  Complexity: {:.0}/100", self.complexity_score));

        let mut features = Vec::new();
        if self.has_flanges {
            features.push("flanges");
        }
        if self.has_relief_cuts {
            features.push("relief cuts");
        }
        if !features.is_empty() {
            lines.push(format!("  Features: {}", features.join(", ")));
        }

        lines.join("\n")
    }
}

/// Analyze a part for bends using seven independent indicators.
///
/// Each indicator is a pure check that may append evidence and suggest a
/// bend count; suggestions only ever raise the running count (`max` fold),
/// so the indicators are order-insensitive for counting.
///
/// # Example
///
/// ```
/// use part_classify::{analyze_bends, DetectionInput, GeometricMetrics};
///
/// let metrics = GeometricMetrics::new([20.0, 40.0, 165.0], 12_500.0, 25_000.0).unwrap();
/// let input = DetectionInput::default()
///     .detected_thickness(2.18)
///     .thickness_confidence(0.95);
///
/// let analysis = analyze_bends(&metrics, &input);
/// assert!(analysis.is_likely_bent);
/// assert!(analysis.bend_count >= 2);
/// ```
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn analyze_bends(metrics: &GeometricMetrics, input: &DetectionInput) -> BendAnalysis {
    let mut indicators = Vec::new();
    let mut bend_count = 0_usize;
    let mut bend_angles = Vec::new();
    let mut bend_regions = Vec::new();

    let is_hollow = metrics.volume_efficiency < 0.4;

    // 1. Thickness discrepancy: the strongest signal for bent parts.
    let mut has_thickness_discrepancy = false;
    if let Some((indicator, suggested)) = thickness_discrepancy(metrics, input) {
        has_thickness_discrepancy = true;
        indicators.push(indicator);
        bend_count = bend_count.max(suggested);
    }

    // 2. Volume hollowness.
    if let Some((indicator, suggested)) = volume_hollowness(metrics) {
        indicators.push(indicator);
        bend_count = bend_count.max(suggested);
    }

    // 3. Surface area excess over the flat-box equivalent.
    if let Some((indicator, suggested)) = surface_excess(metrics) {
        indicators.push(indicator);
        bend_count = bend_count.max(suggested);
    }

    // 4. Dimension-ratio bracket patterns (U before L, mutually exclusive).
    if let Some(pattern) = bracket_pattern(metrics, is_hollow) {
        indicators.push(pattern.indicator);
        bend_count = bend_count.max(pattern.suggested_count);
        bend_angles.extend(pattern.angles);
        bend_regions.push(pattern.region);
    }

    // 5. Mesh complexity.
    if let Some((indicator, suggested)) = mesh_complexity(metrics, input.triangle_count) {
        indicators.push(indicator);
        bend_count = bend_count.max(suggested);
    }

    // 6. Flanges: thin plus hollow.
    let has_flanges = metrics.min_dim < 6.0 && is_hollow;
    if has_flanges {
        indicators.push(BendIndicator::new(
            BendMethod::FlangeDetection,
            0.6,
            "Thin walls with hollow structure suggest flanges".to_string(),
            metrics.min_dim,
        ));
    }

    // 7. Relief cuts: needs the folded count from the methods above.
    let has_relief_cuts = bend_count >= 2 && metrics.volume_efficiency < 0.35;
    if has_relief_cuts {
        indicators.push(BendIndicator::new(
            BendMethod::ReliefCutInference,
            0.5,
            "Multiple bends suggest relief cuts at corners".to_string(),
            metrics.volume_efficiency,
        ));
    }

    // Aggregate confidence: mean over triggered indicators, boosted when
    // the two strongest signals agree.
    #[allow(clippy::cast_precision_loss)]
    let mut confidence = if indicators.is_empty() {
        0.0
    } else {
        indicators.iter().map(|i| i.confidence).sum::<f64>() / (indicators.len() as f64)
    };
    if has_thickness_discrepancy && is_hollow {
        confidence = (confidence + 0.2).min(0.95);
    }

    let is_likely_bent = confidence > 0.6 && bend_count > 0;

    #[allow(clippy::cast_precision_loss)]
    let complexity_score = ((bend_count as f64) * 15.0
        + if has_flanges { 10.0 } else { 0.0 }
        + if has_relief_cuts { 5.0 } else { 0.0 }
        + (1.0 - metrics.volume_efficiency) * 30.0)
        .clamp(0.0, 100.0);

    if bend_count > 0 && bend_angles.is_empty() {
        bend_angles = vec![90.0; bend_count.min(5)];
    }

    debug!(
        bend_count,
        confidence = format!("{confidence:.2}"),
        indicators = indicators.len(),
        is_likely_bent,
        "bend analysis complete"
    );

    BendAnalysis {
        bend_count,
        bend_angles,
        has_flanges,
        has_relief_cuts,
        complexity_score,
        bend_regions,
        is_likely_bent,
        confidence,
        indicators,
    }
}

/// Detected wall much thinner than the bounding-box minimum.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn thickness_discrepancy(
    metrics: &GeometricMetrics,
    input: &DetectionInput,
) -> Option<(BendIndicator, usize)> {
    let thickness = input.detected_thickness.filter(|&t| t > 0.0)?;

    let ratio = if metrics.min_dim > 0.0 {
        thickness / metrics.min_dim
    } else {
        1.0
    };

    if ratio >= 0.5 || input.thickness_confidence <= 0.6 {
        return None;
    }

    // Smaller ratio means more material folded away from the envelope.
    let suggested = if ratio < 0.2 {
        ((10.0 * (1.0 - ratio)).round() as usize).max(3)
    } else if ratio < 0.35 {
        2
    } else {
        1
    };

    let indicator = BendIndicator::new(
        BendMethod::ThicknessDiscrepancy,
        input.thickness_confidence,
        format!(
            "Wall {thickness:.1}mm << bbox {:.1}mm",
            metrics.min_dim
        ),
        ratio,
    );
    Some((indicator, suggested))
}

/// Volume well below the envelope: bent or hollow structure.
fn volume_hollowness(metrics: &GeometricMetrics) -> Option<(BendIndicator, usize)> {
    if metrics.volume_efficiency >= 0.4 {
        return None;
    }

    let hollowness = 1.0 - metrics.volume_efficiency;
    let suggested = if metrics.volume_efficiency < 0.25 {
        3
    } else if metrics.volume_efficiency < 0.35 {
        2
    } else {
        0
    };

    let indicator = BendIndicator::new(
        BendMethod::VolumeHollowness,
        0.7,
        format!(
            "Volume efficiency {:.1}% (hollow structure)",
            metrics.volume_efficiency * 100.0
        ),
        hollowness,
    );
    Some((indicator, suggested))
}

/// Surface area well above the flat-box equivalent.
fn surface_excess(metrics: &GeometricMetrics) -> Option<(BendIndicator, usize)> {
    let flat_estimate = 2.0
        * (metrics.mid_dim * metrics.max_dim
            + metrics.min_dim * metrics.max_dim
            + metrics.min_dim * metrics.mid_dim);
    if flat_estimate <= 0.0 {
        return None;
    }

    let excess = (metrics.surface_area_mm2 - flat_estimate) / flat_estimate;
    if excess <= 0.3 {
        return None;
    }

    let indicator = BendIndicator::new(
        BendMethod::SurfaceExcess,
        0.6,
        format!("Surface area {:.0}% higher than flat equivalent", excess * 100.0),
        excess,
    );
    Some((indicator, 1))
}

struct PatternMatch {
    indicator: BendIndicator,
    suggested_count: usize,
    angles: Vec<f64>,
    region: BendRegion,
}

/// Characteristic dimension relationships of folded brackets.
fn bracket_pattern(metrics: &GeometricMetrics, is_hollow: bool) -> Option<PatternMatch> {
    let aspect_ratio = metrics.max_dim / metrics.min_dim.max(0.1);
    let mid_to_max = if metrics.max_dim > 0.0 {
        metrics.mid_dim / metrics.max_dim
    } else {
        0.0
    };

    // U-bracket: long, hollow, with a medium second dimension.
    if aspect_ratio > 15.0 && mid_to_max > 0.3 && mid_to_max < 0.7 && is_hollow {
        return Some(PatternMatch {
            indicator: BendIndicator::new(
                BendMethod::UBracketPattern,
                0.75,
                format!("U-bracket geometry detected (AR: {aspect_ratio:.1})"),
                aspect_ratio,
            ),
            suggested_count: 2,
            angles: vec![90.0, 90.0],
            region: BendRegion {
                pattern: BendPattern::UBracket,
                bend_lines: vec![
                    "along_length".to_string(),
                    "along_length_opposite".to_string(),
                ],
            },
        });
    }

    // L-bracket: long, thin, one dominant face.
    if aspect_ratio > 10.0 && mid_to_max < 0.4 && metrics.min_dim < 6.0 {
        return Some(PatternMatch {
            indicator: BendIndicator::new(
                BendMethod::LBracketPattern,
                0.7,
                "L-bracket geometry detected".to_string(),
                aspect_ratio,
            ),
            suggested_count: 1,
            angles: vec![90.0],
            region: BendRegion {
                pattern: BendPattern::LBracket,
                bend_lines: vec!["along_length".to_string()],
            },
        });
    }

    None
}

/// High triangle density on a thin part: more facets mean more forming.
#[allow(clippy::cast_precision_loss)]
fn mesh_complexity(
    metrics: &GeometricMetrics,
    triangle_count: usize,
) -> Option<(BendIndicator, usize)> {
    if triangle_count == 0 || metrics.min_dim >= 6.0 {
        return None;
    }

    let density = (triangle_count as f64) / metrics.surface_area_mm2.max(1.0);
    if density <= 0.5 {
        return None;
    }

    let suggested = (triangle_count / 3000).min(5);
    let indicator = BendIndicator::new(
        BendMethod::MeshComplexity,
        0.5,
        format!("High mesh complexity: {density:.2} triangles/mm²"),
        density,
    );
    Some((indicator, suggested))
}
