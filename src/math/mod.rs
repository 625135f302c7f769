//! Mathematical utilities for track statistics and velocity spectra

/// Coriolis parameter and inertial frequencies
pub mod coriolis;
/// Great-circle distances and geographic bounds
pub mod geodesy;
/// Rotary spectra of horizontal velocity records
pub mod spectrum;
