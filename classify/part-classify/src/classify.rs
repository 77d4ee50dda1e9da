//! Manufacturing process classification.
//!
//! A fixed priority cascade over thickness evidence, bend evidence, and
//! geometric scores. Rules are tried in order and the first match wins;
//! the order itself is part of the quoting contract.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bends::{analyze_bends, BendAnalysis, DetectionInput};
use crate::config::{SHEET_METAL_MAX_THICKNESS_MM, SHEET_METAL_MIN_THICKNESS_MM};
use crate::metrics::GeometricMetrics;
use crate::score::{advanced_metrics, sheet_metal_score};

/// Manufacturing process label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Process {
    /// Cut and bent from sheet stock.
    SheetMetal,
    /// Machined on a mill.
    CncMilling,
    /// Machined on a lathe.
    CncTurning,
}

impl Process {
    /// Get the wire label for the process.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SheetMetal => "sheet_metal",
            Self::CncMilling => "cnc_milling",
            Self::CncTurning => "cnc_turning",
        }
    }
}

/// Which cascade rule produced the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClassificationMethod {
    /// Detected wall thickness fell in the sheet-metal range.
    ThicknessDetection,
    /// Bend analysis with a thin profile.
    BendDetection,
    /// Thin minimum dimension with high aspect ratio.
    DimensionAnalysis,
    /// Cylindrical geometry.
    GeometryCylindrical,
    /// Geometric scoring fallback chose sheet metal.
    GeometricScoring,
    /// Default CNC milling branch.
    DefaultCnc,
}

impl ClassificationMethod {
    /// Get the wire label for the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThicknessDetection => "thickness_detection",
            Self::BendDetection => "bend_detection",
            Self::DimensionAnalysis => "dimension_analysis",
            Self::GeometryCylindrical => "geometry_cylindrical",
            Self::GeometricScoring => "geometric_scoring",
            Self::DefaultCnc => "default_cnc",
        }
    }
}

/// Compact bend-analysis summary carried in classification metadata.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BendSummary {
    /// Whether the part is likely bent.
    pub is_likely_bent: bool,
    /// Estimated bend count.
    pub bend_count: usize,
    /// Aggregate bend-detection confidence.
    pub confidence: f64,
    /// Forming complexity, 0 to 100.
    pub complexity: f64,
}

impl From<&BendAnalysis> for BendSummary {
    fn from(analysis: &BendAnalysis) -> Self {
        Self {
            is_likely_bent: analysis.is_likely_bent,
            bend_count: analysis.bend_count,
            confidence: analysis.confidence,
            complexity: analysis.complexity_score,
        }
    }
}

/// Explanatory metadata attached to every classification.
///
/// Informational for audit and debugging; the authoritative outputs are
/// the process label and confidence.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassificationMetadata {
    /// Base sheet-metal score, 0 to 100.
    pub sheet_metal_score: f64,
    /// Detected wall thickness passed in, mm.
    pub detected_thickness: Option<f64>,
    /// Confidence in the thickness measurement.
    pub thickness_confidence: f64,
    /// Smallest bounding-box extent, mm.
    pub bbox_minimum: f64,
    /// Part volume over envelope volume.
    pub volume_efficiency: f64,
    /// Bend-analysis summary.
    pub bend_analysis: BendSummary,
    /// Which cascade rule decided.
    pub classification_method: ClassificationMethod,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
    /// Enhanced score; present only when the scoring fallback ran.
    pub enhanced_sheet_metal_score: Option<f64>,
    /// Multi-line bend report for logs and UI.
    pub bend_report: Option<String>,
}

/// A process label with confidence and explanatory metadata.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassificationResult {
    /// Chosen manufacturing process.
    pub process: Process,
    /// Confidence in the label, 0 to 1.
    pub confidence: f64,
    /// Explanatory metadata.
    pub metadata: ClassificationMetadata,
}

/// Classify a part's manufacturing process.
///
/// Thickness-first priority cascade; the first matching rule wins:
///
/// 1. Detected wall thickness in the sheet-metal range → sheet metal
/// 2. Bends detected with a thin profile → sheet metal
/// 3. Thin minimum dimension with high aspect ratio → sheet metal
/// 4. Cylindrical geometry → CNC turning
/// 5. Scoring fallback → sheet metal or CNC milling
///
/// Never fails: degenerate geometry is absorbed by the floors inside
/// [`GeometricMetrics`] and routes to the low-confidence fallback rules.
///
/// # Example
///
/// ```
/// use part_classify::{classify_process, DetectionInput, GeometricMetrics, Process};
///
/// let shaft = GeometricMetrics::new([25.0, 25.0, 100.0], 45_000.0, 9_000.0).unwrap();
/// let result = classify_process(&shaft, &DetectionInput::default());
/// assert_eq!(result.process, Process::CncTurning);
/// ```
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn classify_process(
    metrics: &GeometricMetrics,
    input: &DetectionInput,
) -> ClassificationResult {
    let base_score = sheet_metal_score(metrics);
    let advanced = advanced_metrics(metrics);
    let bends = analyze_bends(metrics, input);

    let metadata = |method: ClassificationMethod, reasoning: String| ClassificationMetadata {
        sheet_metal_score: base_score,
        detected_thickness: input.detected_thickness,
        thickness_confidence: input.thickness_confidence,
        bbox_minimum: metrics.min_dim,
        volume_efficiency: metrics.volume_efficiency,
        bend_analysis: BendSummary::from(&bends),
        classification_method: method,
        reasoning,
        enhanced_sheet_metal_score: None,
        bend_report: None,
    };

    let finish = |result: ClassificationResult| {
        info!(
            process = result.process.as_str(),
            confidence = format!("{:.2}", result.confidence),
            method = result.metadata.classification_method.as_str(),
            "classification complete"
        );
        result
    };

    // Rule 1: detected thickness in the sheet-metal gauge range. The most
    // accurate signal when present; a lowered confidence bar (0.3) is
    // deliberate, the measurement is trusted once it exists at all.
    let has_valid_thickness = input
        .detected_thickness
        .is_some_and(|t| t > 0.0 && input.thickness_confidence > 0.3);
    if let Some(thickness) = input.detected_thickness {
        if has_valid_thickness
            && (SHEET_METAL_MIN_THICKNESS_MM..=SHEET_METAL_MAX_THICKNESS_MM).contains(&thickness)
        {
            let base_confidence = 0.85 + input.thickness_confidence * 0.10;
            let (confidence, reasoning) = if bends.is_likely_bent {
                (
                    (base_confidence + 0.05).min(0.98),
                    format!(
                        "THICKNESS-DETECTED: {thickness:.2}mm wall thickness with {} bends",
                        bends.bend_count
                    ),
                )
            } else {
                (
                    base_confidence,
                    format!(
                        "THICKNESS-DETECTED: {thickness:.2}mm uniform wall thickness (sheet metal gauge)"
                    ),
                )
            };

            let mut meta = metadata(ClassificationMethod::ThicknessDetection, reasoning);
            if bends.bend_count > 0 {
                meta.bend_report = Some(bends.report());
            }
            return finish(ClassificationResult {
                process: Process::SheetMetal,
                confidence,
                metadata: meta,
            });
        }
    }

    // Degenerate zero geometry falls back to neutral stand-in values for
    // the dimension-based rules.
    let min_dim = if metrics.min_dim == 0.0 { 10.0 } else { metrics.min_dim };
    let aspect_ratio = if metrics.aspect_ratio == 0.0 {
        1.0
    } else {
        metrics.aspect_ratio
    };

    // Rule 2: bends detected on a thin profile.
    if bends.is_likely_bent && min_dim < SHEET_METAL_MAX_THICKNESS_MM {
        let confidence = (0.70 + bends.confidence * 0.20).min(0.90);
        let reasoning = format!(
            "BEND-DETECTED: {} bends with {min_dim:.2}mm profile",
            bends.bend_count
        );
        let mut meta = metadata(ClassificationMethod::BendDetection, reasoning);
        meta.bend_report = Some(bends.report());
        return finish(ClassificationResult {
            process: Process::SheetMetal,
            confidence,
            metadata: meta,
        });
    }

    // Rule 3: thin profile with high aspect ratio.
    if min_dim < 6.0 && aspect_ratio > 8.0 {
        let confidence = if aspect_ratio > 15.0 { 0.80 } else { 0.70 };
        let reasoning = format!(
            "DIMENSION-BASED: {min_dim:.2}mm thin profile with {aspect_ratio:.1}:1 aspect ratio"
        );
        return finish(ClassificationResult {
            process: Process::SheetMetal,
            confidence,
            metadata: metadata(ClassificationMethod::DimensionAnalysis, reasoning),
        });
    }

    // Rule 4: cylindrical geometry (similar cross-section extents, elongated,
    // solid) goes to the lathe.
    let min_val = if metrics.min_dim == 0.0 { 1.0 } else { metrics.min_dim };
    let mid_val = if metrics.mid_dim == 0.0 { 1.0 } else { metrics.mid_dim };
    let xy_similarity = (min_val - mid_val).abs() / min_val.max(mid_val);
    let is_cylindrical =
        xy_similarity < 0.15 && aspect_ratio > 1.5 && metrics.volume_efficiency > 0.6;
    if is_cylindrical {
        return finish(ClassificationResult {
            process: Process::CncTurning,
            confidence: 0.85,
            metadata: metadata(
                ClassificationMethod::GeometryCylindrical,
                "Cylindrical geometry with rotational symmetry".to_string(),
            ),
        });
    }

    // Rule 5: scoring fallback.
    let mut enhanced_score = base_score
        + advanced.wall_thickness_consistency * 15.0
        + advanced.planarity_score * 15.0;
    if advanced.volume_distribution > 0.75 {
        enhanced_score -= 25.0;
    }
    #[allow(clippy::cast_precision_loss)]
    if bends.bend_count > 0 {
        enhanced_score += ((bends.bend_count as f64) * 8.0).min(20.0);
    }
    let enhanced_score = enhanced_score.clamp(0.0, 100.0);

    let with_score = |method, reasoning: String| {
        let mut meta = metadata(method, reasoning);
        meta.enhanced_sheet_metal_score = Some(enhanced_score);
        meta
    };

    if enhanced_score > 65.0 {
        return finish(ClassificationResult {
            process: Process::SheetMetal,
            confidence: 0.70,
            metadata: with_score(
                ClassificationMethod::GeometricScoring,
                format!("Geometric analysis suggests sheet metal (score: {enhanced_score:.0}/100)"),
            ),
        });
    }

    if enhanced_score > 45.0 && metrics.volume_efficiency < 0.4 {
        return finish(ClassificationResult {
            process: Process::SheetMetal,
            confidence: 0.60,
            metadata: with_score(
                ClassificationMethod::GeometricScoring,
                "Hollow thin-walled structure suggests sheet metal".to_string(),
            ),
        });
    }

    let confidence = if enhanced_score < 30.0 { 0.85 } else { 0.70 };
    finish(ClassificationResult {
        process: Process::CncMilling,
        confidence,
        metadata: with_score(
            ClassificationMethod::DefaultCnc,
            "Solid geometry or varying wall thickness indicates CNC machining".to_string(),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(dims: [f64; 3], volume: f64, area: f64) -> GeometricMetrics {
        GeometricMetrics::new(dims, volume, area).unwrap()
    }

    fn thickness(t: f64, confidence: f64) -> DetectionInput {
        DetectionInput::default()
            .detected_thickness(t)
            .thickness_confidence(confidence)
    }

    #[test]
    fn test_bent_bracket_by_thickness() {
        let m = metrics([20.0, 40.0, 165.0], 12_500.0, 25_000.0);
        let result = classify_process(&m, &thickness(2.18, 0.95));

        assert_eq!(result.process, Process::SheetMetal);
        assert!(result.confidence >= 0.85);
        assert!(result.metadata.bend_analysis.bend_count >= 2);
        assert_eq!(
            result.metadata.classification_method,
            ClassificationMethod::ThicknessDetection
        );
        assert!(result.metadata.reasoning.contains("bends"));
        assert!(result.metadata.bend_report.is_some());
    }

    #[test]
    fn test_flat_sheet_by_thickness() {
        let m = metrics([3.0, 100.0, 200.0], 58_000.0, 40_600.0);
        let result = classify_process(&m, &thickness(3.15, 0.95));

        assert_eq!(result.process, Process::SheetMetal);
        assert!(!result.metadata.bend_analysis.is_likely_bent);
        assert!(result.metadata.reasoning.contains("uniform wall thickness"));
        assert!(result.metadata.bend_report.is_none());
    }

    #[test]
    fn test_solid_block_is_milling() {
        let m = metrics([50.0, 50.0, 50.0], 110_000.0, 16_000.0);
        let result = classify_process(&m, &DetectionInput::default());

        assert_eq!(result.process, Process::CncMilling);
        assert!(result.confidence >= 0.70);
        assert_eq!(
            result.metadata.classification_method,
            ClassificationMethod::DefaultCnc
        );
        assert!(result.metadata.enhanced_sheet_metal_score.is_some());
    }

    #[test]
    fn test_shaft_is_turning() {
        let m = metrics([25.0, 25.0, 100.0], 45_000.0, 9_000.0);
        let result = classify_process(&m, &DetectionInput::default());

        assert_eq!(result.process, Process::CncTurning);
        assert!(result.confidence >= 0.80);
        assert_eq!(
            result.metadata.classification_method,
            ClassificationMethod::GeometryCylindrical
        );
    }

    #[test]
    fn test_foil_at_lower_gauge_bound() {
        let m = metrics([0.5, 100.0, 150.0], 6_800.0, 30_200.0);
        let result = classify_process(&m, &thickness(0.55, 0.90));

        assert_eq!(result.process, Process::SheetMetal);
        assert_eq!(
            result.metadata.classification_method,
            ClassificationMethod::ThicknessDetection
        );
    }

    #[test]
    fn test_thickness_rule_beats_cylindrical() {
        // Satisfies rule 4 (cylindrical shaft) and rule 1 (5mm wall in
        // gauge range): thickness must win.
        let m = metrics([25.0, 25.0, 100.0], 45_000.0, 9_000.0);
        let result = classify_process(&m, &thickness(5.0, 0.90));

        assert_eq!(result.process, Process::SheetMetal);
        assert_eq!(
            result.metadata.classification_method,
            ClassificationMethod::ThicknessDetection
        );
    }

    #[test]
    fn test_unreliable_thickness_is_ignored() {
        // Confidence at the 0.3 bar does not pass; the shaft falls through
        // to the cylindrical rule.
        let m = metrics([25.0, 25.0, 100.0], 45_000.0, 9_000.0);
        let result = classify_process(&m, &thickness(5.0, 0.3));

        assert_eq!(result.process, Process::CncTurning);
    }

    #[test]
    fn test_out_of_range_thickness_falls_through() {
        // 12mm wall is plate, not sheet; the solid block default applies.
        let m = metrics([50.0, 50.0, 50.0], 110_000.0, 16_000.0);
        let result = classify_process(&m, &thickness(12.0, 0.95));

        assert_eq!(result.process, Process::CncMilling);
    }

    #[test]
    fn test_dimension_based_thin_profile() {
        // Thin and long, no thickness signal, no bend evidence strong
        // enough: rule 3 applies with the high-aspect confidence.
        let m = metrics([3.0, 100.0, 200.0], 58_000.0, 40_600.0);
        let result = classify_process(&m, &DetectionInput::default());

        assert_eq!(result.process, Process::SheetMetal);
        assert_eq!(
            result.metadata.classification_method,
            ClassificationMethod::DimensionAnalysis
        );
        assert!((result.confidence - 0.80).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bend_rule_on_thin_profile() {
        // Hollow folded channel, no thickness signal: bend evidence alone
        // classifies it, with the 0.90 cap.
        let m = metrics([2.0, 60.0, 120.0], 3_000.0, 30_000.0);
        let result = classify_process(&m, &DetectionInput::default());

        assert_eq!(result.process, Process::SheetMetal);
        assert_eq!(
            result.metadata.classification_method,
            ClassificationMethod::BendDetection
        );
        assert!(result.confidence <= 0.90);
        assert!(result.metadata.bend_report.is_some());
    }

    #[test]
    fn test_degenerate_geometry_does_not_panic() {
        let m = metrics([0.0, 0.0, 0.0], 0.0, 0.0);
        let result = classify_process(&m, &DetectionInput::default());
        assert!(result.confidence > 0.0);

        let m = metrics([0.0, 10.0, 100.0], 0.0, 500.0);
        let _ = classify_process(&m, &DetectionInput::default());
    }

    #[test]
    fn test_metadata_carries_inputs() {
        let m = metrics([20.0, 40.0, 165.0], 12_500.0, 25_000.0);
        let result = classify_process(&m, &thickness(2.18, 0.95));

        let meta = &result.metadata;
        assert_eq!(meta.detected_thickness, Some(2.18));
        assert!((meta.thickness_confidence - 0.95).abs() < f64::EPSILON);
        assert!((meta.bbox_minimum - 20.0).abs() < f64::EPSILON);
        assert!(meta.sheet_metal_score >= 0.0);
        assert!(!meta.reasoning.is_empty());
    }

    #[test]
    fn test_process_labels() {
        assert_eq!(Process::SheetMetal.as_str(), "sheet_metal");
        assert_eq!(Process::CncMilling.as_str(), "cnc_milling");
        assert_eq!(Process::CncTurning.as_str(), "cnc_turning");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_result_serde_round_trip() {
        let m = metrics([20.0, 40.0, 165.0], 12_500.0, 25_000.0);
        let result = classify_process(&m, &thickness(2.18, 0.95));

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"sheet_metal\""));
        let back: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.process, result.process);
        assert!((back.confidence - result.confidence).abs() < 1e-12);
    }
}
