//! Velocity records at a single point

use crate::io::configuration::SAMPLING_TOLERANCE;
use crate::io::error::{EddyError, Result, WithPath, invalid_data};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct VelocityRecord {
    #[serde(alias = "time")]
    time_hours: f64,
    u: f64,
    v: f64,
}

/// Horizontal velocity components sampled in time
#[derive(Debug, Clone, PartialEq)]
pub struct VelocitySeries {
    /// Sample times (hours), increasing
    pub times_hours: Vec<f64>,
    /// Eastward velocity (m/s)
    pub u: Vec<f64>,
    /// Northward velocity (m/s)
    pub v: Vec<f64>,
}

impl VelocitySeries {
    /// Build a series from matching time and component sequences
    ///
    /// # Errors
    ///
    /// Returns an error if the sequences differ in length or a value is not finite
    pub fn new(times_hours: Vec<f64>, u: Vec<f64>, v: Vec<f64>) -> Result<Self> {
        if times_hours.len() != u.len() || u.len() != v.len() {
            return Err(EddyError::LengthMismatch {
                operation: "velocity series",
                left: times_hours.len(),
                right: if times_hours.len() == u.len() {
                    v.len()
                } else {
                    u.len()
                },
            });
        }
        if times_hours
            .iter()
            .chain(&u)
            .chain(&v)
            .any(|value| !value.is_finite())
        {
            return Err(invalid_data(&"velocity series contains non-finite values"));
        }

        Ok(Self { times_hours, u, v })
    }

    /// Number of samples
    pub const fn len(&self) -> usize {
        self.times_hours.len()
    }

    /// Whether the series holds no samples
    pub const fn is_empty(&self) -> bool {
        self.times_hours.is_empty()
    }

    /// Time from first to last sample (hours)
    pub fn duration_hours(&self) -> f64 {
        match (self.times_hours.first(), self.times_hours.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// Common interval between samples (hours)
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 samples, times repeat or decrease,
    /// or any interval departs from the first by more than the sampling tolerance
    pub fn sample_interval_hours(&self) -> Result<f64> {
        let mut intervals = self
            .times_hours
            .windows(2)
            .map(|pair| match pair {
                [a, b] => b - a,
                _ => f64::NAN,
            });

        let first = intervals
            .next()
            .ok_or_else(|| invalid_data(&"velocity series needs at least 2 samples"))?;
        if first.is_nan() || first <= 0.0 {
            return Err(invalid_data(&"velocity sample times must increase"));
        }

        for (index, interval) in intervals.enumerate() {
            if (interval - first).abs() > SAMPLING_TOLERANCE * first {
                return Err(invalid_data(&format!(
                    "velocity series is unevenly sampled: interval {} is {interval} h, expected {first} h",
                    index + 1
                )));
            }
        }

        Ok(first)
    }
}

/// Load a velocity record with `time_hours`, `u` and `v` columns
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed
pub fn load_velocity_series(path: &Path) -> Result<VelocitySeries> {
    let file = File::open(path).with_path(path, "open velocity table")?;
    let series = read_velocity_series(file, path)?;
    info!(
        path = %path.display(),
        samples = series.len(),
        hours = series.duration_hours(),
        "loaded velocity record"
    );
    Ok(series)
}

/// Read a velocity record from any CSV source, rows are sorted by time
///
/// # Errors
///
/// Returns an error if a row cannot be parsed or holds non-finite values
pub fn read_velocity_series<R: std::io::Read>(reader: R, path: &Path) -> Result<VelocitySeries> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = csv_reader
        .deserialize::<VelocityRecord>()
        .map(|record| record.with_path(path, "parse velocity row"))
        .collect::<Result<Vec<_>>>()?;
    records.sort_by(|a, b| a.time_hours.total_cmp(&b.time_hours));

    let mut times_hours = Vec::with_capacity(records.len());
    let mut u = Vec::with_capacity(records.len());
    let mut v = Vec::with_capacity(records.len());
    for record in records {
        times_hours.push(record.time_hours);
        u.push(record.u);
        v.push(record.v);
    }

    VelocitySeries::new(times_hours, u, v)
}
