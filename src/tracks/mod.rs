//! Eddy track data structures and preprocessing
//!
//! This module contains track-related functionality including:
//! - Observation records and track assembly
//! - Loading tracks from the AMEDA table export
//! - Rotation and lifetime filtering
//! - Gap filling of missing time steps

/// Track filtering by rotation, lifetime and region
pub mod filter;
/// Gap filling for missing time steps
pub mod gaps;
/// Track table loading and validation
pub mod loader;
/// Observation and track data structures
pub mod record;

pub use filter::{Partition, differentiate_eddies, filter_region};
pub use gaps::{FillMethod, FilledPath, fill_coords};
pub use loader::{load_tracks, read_tracks};
pub use record::{EddyObservation, EddyTrack, Polarity};
