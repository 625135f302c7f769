//! CSV tables written next to the figures

use crate::analysis::histogram::Histogram;
use crate::analysis::lifetime::TrackSummary;
use crate::io::ensure_parent_dir;
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::math::spectrum::RotarySpectrum;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

#[derive(Serialize)]
struct HistogramRow {
    bin_low: f64,
    bin_high: f64,
    cyclonic: usize,
    anticyclonic: usize,
}

#[derive(Serialize)]
struct SpectrumRow {
    frequency_cpd: f64,
    clockwise: f64,
    counterclockwise: f64,
}

fn write_rows<T: Serialize>(path: &Path, rows: impl IntoIterator<Item = T>) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path).with_path(path, "create table")?;
    let mut count = 0usize;
    for row in rows {
        writer.serialize(row).with_path(path, "write table row")?;
        count += 1;
    }
    writer.flush().with_path(path, "flush table")?;
    debug!(path = %path.display(), rows = count, "wrote table");
    Ok(())
}

/// Write one row per track summary
///
/// # Errors
///
/// Returns an error if the file cannot be created or written
pub fn write_summaries(path: &Path, summaries: &[TrackSummary]) -> Result<()> {
    write_rows(path, summaries)
}

/// Write cyclone and anticyclone counts of histograms sharing the same bins
///
/// # Errors
///
/// Returns an error if the histograms have different edges or the file cannot be written
pub fn write_histogram_table(
    path: &Path,
    cyclones: &Histogram,
    anticyclones: &Histogram,
) -> Result<()> {
    if cyclones.edges != anticyclones.edges {
        return Err(invalid_parameter(
            "histograms",
            &format!("{} and {} bins", cyclones.bins(), anticyclones.bins()),
            &"cyclone and anticyclone histograms must share bin edges",
        ));
    }

    let rows = cyclones
        .edges
        .windows(2)
        .zip(cyclones.counts.iter().zip(&anticyclones.counts))
        .filter_map(|(pair, (&cyclonic, &anticyclonic))| match pair {
            [bin_low, bin_high] => Some(HistogramRow {
                bin_low: *bin_low,
                bin_high: *bin_high,
                cyclonic,
                anticyclonic,
            }),
            _ => None,
        });
    write_rows(path, rows)
}

/// Write the clockwise and counter-clockwise densities per frequency
///
/// # Errors
///
/// Returns an error if the file cannot be created or written
pub fn write_spectrum_table(path: &Path, spectrum: &RotarySpectrum) -> Result<()> {
    let rows = spectrum
        .frequencies
        .iter()
        .zip(spectrum.clockwise.iter().zip(&spectrum.counterclockwise))
        .map(|(&frequency_cpd, (&clockwise, &counterclockwise))| SpectrumRow {
            frequency_cpd,
            clockwise,
            counterclockwise,
        });
    write_rows(path, rows)
}
