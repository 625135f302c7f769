//! Eddy track statistics and rotary velocity spectra for near-inertial wave studies
//!
//! The crate loads mesoscale eddy tracks detected by AMEDA, splits them by sense of
//! rotation, fills gaps in their paths and derives lifetime and propagation statistics.
//! Each command of the binary produces one artifact: a summary table, a set of
//! histograms, a track animation or a rotary spectrum of a velocity record.

#![forbid(unsafe_code)]

/// Lifetime, propagation and population statistics of eddy tracks
pub mod analysis;
/// Input/output operations, figures and error handling
pub mod io;
/// Geodesy, Coriolis and spectral utilities
pub mod math;
/// Eddy observations, track assembly and gap filling
pub mod tracks;

pub use io::error::{EddyError, Result};
