//! Lifetime, propagation and population statistics of eddy tracks

/// Fixed-width histograms shared between populations
pub mod histogram;
/// Per-track lifetime and propagation summaries
pub mod lifetime;
/// Descriptive statistics of eddy populations
pub mod statistics;
