//! # Hidden Markov Model
//!
//! Count accumulation, normalization, and the immutable probability tables
//! consumed by the decoder.

pub mod counts;
pub mod estimator;
pub mod tables;

pub use counts::Counts;
pub use estimator::{normalize, Estimator, EstimatorConfig};
pub use tables::{EmissionRow, HmmModel, LogDistribution, TagState};
