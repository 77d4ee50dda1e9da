//! Manufacturing process classification for quoting.
//!
//! This crate decides whether a part should be made as sheet metal, CNC
//! milled, or CNC turned, working only from geometric summary statistics:
//! the three bounding-box extents, volume, surface area, and optionally a
//! detected wall thickness from upstream ray casting.
//!
//! # Thickness-first classification
//!
//! Actual wall thickness is the most accurate sheet-metal indicator when it
//! is available, so the classifier runs a fixed priority cascade:
//!
//! 1. Detected wall thickness in the sheet-metal gauge range
//! 2. Bend detection combined with a thin profile
//! 3. Thin minimum dimension with high aspect ratio
//! 4. Cylindrical geometry (CNC turning)
//! 5. Geometric scoring fallback (sheet metal vs CNC milling)
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero engine dependencies**; it performs
//! no I/O and holds no state between calls.
//!
//! # Example
//!
//! ```
//! use part_classify::{classify_process, DetectionInput, GeometricMetrics, Process};
//!
//! // A thin bent bracket: 2.18mm walls detected inside a 20mm bbox minimum.
//! let metrics = GeometricMetrics::new([165.0, 20.0, 40.0], 12_500.0, 25_000.0).unwrap();
//! let input = DetectionInput::default()
//!     .detected_thickness(2.18)
//!     .thickness_confidence(0.95);
//!
//! let result = classify_process(&metrics, &input);
//! assert_eq!(result.process, Process::SheetMetal);
//! assert!(result.confidence >= 0.85);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bends;
mod classify;
mod config;
mod error;
mod metrics;
mod score;

pub use bends::{
    analyze_bends, BendAnalysis, BendIndicator, BendMethod, BendPattern, BendRegion,
    DetectionInput,
};
pub use classify::{
    classify_process, BendSummary, ClassificationMetadata, ClassificationMethod,
    ClassificationResult, Process,
};
pub use config::{
    GAUGE_TOLERANCE_MM, SHEET_METAL_MAX_THICKNESS_MM, SHEET_METAL_MIN_THICKNESS_MM,
    STANDARD_GAUGES_MM,
};
pub use error::{ClassifyError, ClassifyResult};
pub use metrics::GeometricMetrics;
pub use score::{advanced_metrics, sheet_metal_score, AdvancedMetrics};
