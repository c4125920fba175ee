//! # mp-resolution
//!
//! The analysis core of metplot: load per-sample event columns, bin events
//! by a kinematic variable, reduce MET-reconstruction residuals to one
//! dispersion value per bin, and emit a plot-friendly artifact.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod artifact;
pub mod binning;
pub mod estimator;
pub mod events;
pub mod pipeline;
pub mod residual;

pub use artifact::{ResolutionArtifact, ResolutionSeries};
pub use binning::BinEdges;
pub use estimator::Estimator;
pub use events::EventTable;
pub use pipeline::compute_resolution;
