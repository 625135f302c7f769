//! Filling of missing time steps in eddy paths
//!
//! AMEDA can lose an eddy for a few steps and pick it up again under the same track.
//! Propagation statistics and animations need a position at every step, so gaps are
//! filled with one of four rules.

use crate::io::error::{EddyError, Result};
use std::fmt;

/// Rule used to place an eddy during missing time steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FillMethod {
    /// Midpoint of the two positions bounding the gap
    Midpoint,
    /// Evenly spaced positions from the start to the end of the gap, both included
    #[default]
    Linear,
    /// Position at the beginning of the gap
    Begin,
    /// Position at the end of the gap
    End,
}

impl fmt::Display for FillMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Midpoint => "midpoint",
            Self::Linear => "linear",
            Self::Begin => "begin",
            Self::End => "end",
        };
        f.write_str(name)
    }
}

/// Eddy path with a position at every time step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilledPath {
    /// Consecutive time steps
    pub steps: Vec<i64>,
    /// Longitudes matching `steps`
    pub lons: Vec<f64>,
    /// Latitudes matching `steps`
    pub lats: Vec<f64>,
}

impl FilledPath {
    /// Number of positions
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the path holds no positions
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn push(&mut self, step: i64, lon: f64, lat: f64) {
        self.steps.push(step);
        self.lons.push(lon);
        self.lats.push(lat);
    }
}

// `count` points from `start` to `end` inclusive, a single point sits at `start`
fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let denominator = count.saturating_sub(1).max(1) as f64;
    (0..count).map(move |i| (end - start).mul_add(i as f64 / denominator, start))
}

/// Insert the missing steps of a track and position the eddy during them
///
/// Steps are expected in increasing order. A jump larger than one step is a gap;
/// the inserted positions depend on `method`.
///
/// # Errors
///
/// Returns [`EddyError::LengthMismatch`] if the step, longitude and latitude
/// sequences differ in length
pub fn fill_coords(
    steps: &[i64],
    lons: &[f64],
    lats: &[f64],
    method: FillMethod,
) -> Result<FilledPath> {
    if steps.len() != lons.len() || steps.len() != lats.len() {
        return Err(EddyError::LengthMismatch {
            operation: "fill_coords",
            left: steps.len(),
            right: if steps.len() == lons.len() {
                lats.len()
            } else {
                lons.len()
            },
        });
    }

    let mut path = FilledPath::default();
    let mut previous: Option<(i64, f64, f64)> = None;

    for ((&step, &lon), &lat) in steps.iter().zip(lons).zip(lats) {
        if let Some((prev_step, prev_lon, prev_lat)) = previous {
            if step - prev_step > 1 {
                let missing = (prev_step + 1..step).collect::<Vec<_>>();
                let count = missing.len();

                let (fill_lons, fill_lats): (Vec<f64>, Vec<f64>) = match method {
                    FillMethod::Midpoint => (
                        vec![f64::midpoint(prev_lon, lon); count],
                        vec![f64::midpoint(prev_lat, lat); count],
                    ),
                    FillMethod::Linear => (
                        linspace(prev_lon, lon, count).collect(),
                        linspace(prev_lat, lat, count).collect(),
                    ),
                    FillMethod::Begin => (vec![prev_lon; count], vec![prev_lat; count]),
                    FillMethod::End => (vec![lon; count], vec![lat; count]),
                };

                for ((fill_step, fill_lon), fill_lat) in
                    missing.into_iter().zip(fill_lons).zip(fill_lats)
                {
                    path.push(fill_step, fill_lon, fill_lat);
                }
            }
        }

        path.push(step, lon, lat);
        previous = Some((step, lon, lat));
    }

    Ok(path)
}
