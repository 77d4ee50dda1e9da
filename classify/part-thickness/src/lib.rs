//! Statistical wall thickness estimation for manufacturing analysis.
//!
//! This crate reduces a noisy set of ray-cast thickness samples to a single
//! representative wall thickness. Each sample is the sum of the forward and
//! backward first-hit distances at one surface point; the raw distances come
//! from an external ray-intersection collaborator.
//!
//! # Algorithm
//!
//! Samples are filtered with a Tukey fence built on the 5th/95th percentiles,
//! then summarized three ways: minimum, median, and histogram mode. Parts
//! with uniform walls (sheet metal) are best described by the mode, the most
//! common material gauge. Parts with varying thickness are summarized
//! conservatively by the minimum.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero engine dependencies**. It can be used
//! in CLI tools, web services, and WASM.
//!
//! # Example
//!
//! ```
//! use part_thickness::{estimate_thickness, EstimatorParams};
//!
//! let samples: Vec<f64> = (0..100).map(|i| 2.0 + 0.01 * f64::from(i % 5)).collect();
//! let estimate = estimate_thickness(&samples, &EstimatorParams::default()).unwrap();
//!
//! assert!(estimate.is_uniform);
//! println!("Representative thickness: {:.2} mm", estimate.representative_mm);
//! ```
//!
//! # Use Cases
//!
//! - **Process classification**: Decide sheet metal vs machined from gauge
//! - **Quoting**: Feed a stable thickness into downstream cost estimation
//! - **Quality checks**: Flag parts whose walls vary more than expected

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod estimate;
mod params;
mod result;

pub use error::{ThicknessError, ThicknessResult};
pub use estimate::estimate_thickness;
pub use params::EstimatorParams;
pub use result::ThicknessEstimate;
