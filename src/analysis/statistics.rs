//! Descriptive statistics of eddy populations

use crate::analysis::lifetime::TrackSummary;
use crate::tracks::record::Polarity;
use statrs::statistics::{Data, OrderStatistics, Statistics};
use std::io::Write;

/// Track property described by the population statistics and histograms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Lifetime in days
    Lifetime,
    /// Distance travelled
    Distance,
    /// Net displacement
    Displacement,
    /// Mean propagation speed
    Speed,
    /// Mean radius
    Radius,
    /// Mean Rossby number magnitude
    Rossby,
    /// Mean amplitude
    Amplitude,
}

impl Metric {
    /// All metrics in report order
    pub const fn all() -> [Self; 7] {
        [
            Self::Lifetime,
            Self::Distance,
            Self::Displacement,
            Self::Speed,
            Self::Radius,
            Self::Rossby,
            Self::Amplitude,
        ]
    }

    /// Name used in reports
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lifetime => "lifetime",
            Self::Distance => "distance",
            Self::Displacement => "displacement",
            Self::Speed => "speed",
            Self::Radius => "radius",
            Self::Rossby => "rossby",
            Self::Amplitude => "amplitude",
        }
    }

    /// Units of the values
    pub const fn units(self) -> &'static str {
        match self {
            Self::Lifetime => "days",
            Self::Distance | Self::Displacement | Self::Radius => "km",
            Self::Speed => "km/day",
            Self::Rossby => "-",
            Self::Amplitude => "m/s",
        }
    }

    /// File name, without extension, of the metric's histogram outputs
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Lifetime => "lifetime_histogram",
            Self::Distance => "distance_histogram",
            Self::Displacement => "displacement_histogram",
            Self::Speed => "speed_histogram",
            Self::Radius => "radius_histogram",
            Self::Rossby => "rossby_histogram",
            Self::Amplitude => "amplitude_histogram",
        }
    }

    /// Value of the metric for one track, `None` if the track table lacks it
    pub const fn value(self, summary: &TrackSummary) -> Option<f64> {
        match self {
            Self::Lifetime => Some(summary.lifetime_days),
            Self::Distance => Some(summary.distance_km),
            Self::Displacement => Some(summary.displacement_km),
            Self::Speed => Some(summary.mean_speed_km_per_day),
            Self::Radius => Some(summary.mean_radius_km),
            Self::Rossby => summary.mean_rossby,
            Self::Amplitude => summary.mean_amplitude,
        }
    }

    /// Finite values of the metric over the tracks of one polarity
    pub fn values(self, summaries: &[TrackSummary], polarity: Polarity) -> Vec<f64> {
        summaries
            .iter()
            .filter(|summary| summary.polarity == polarity)
            .filter_map(|summary| self.value(summary))
            .filter(|value| value.is_finite())
            .collect()
    }
}

/// Descriptive statistics of one metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSummary {
    /// Number of values
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation, zero for a single value
    pub std_dev: f64,
    /// Median
    pub median: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
}

impl MetricSummary {
    /// Describe a set of values, `None` when empty
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let std_dev = if values.len() > 1 {
            values.iter().std_dev()
        } else {
            0.0
        };
        let mut data = Data::new(values.to_vec());

        Some(Self {
            count: values.len(),
            mean: values.iter().mean(),
            std_dev,
            median: data.percentile(50),
            min: Statistics::min(values),
            max: Statistics::max(values),
        })
    }
}

/// Statistics of every metric for one eddy population
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationReport {
    /// Population described
    pub polarity: Polarity,
    /// Number of tracks in the population
    pub tracks: usize,
    /// Statistics per metric, `None` when no track reports the metric
    pub metrics: Vec<(Metric, Option<MetricSummary>)>,
}

impl PopulationReport {
    /// Statistics of one metric
    pub fn metric(&self, metric: Metric) -> Option<&MetricSummary> {
        self.metrics
            .iter()
            .find(|(candidate, _)| *candidate == metric)
            .and_then(|(_, summary)| summary.as_ref())
    }
}

/// Describe the tracks of one polarity
pub fn describe(summaries: &[TrackSummary], polarity: Polarity) -> PopulationReport {
    let tracks = summaries
        .iter()
        .filter(|summary| summary.polarity == polarity)
        .count();

    let metrics = Metric::all()
        .into_iter()
        .map(|metric| {
            (
                metric,
                MetricSummary::from_values(&metric.values(summaries, polarity)),
            )
        })
        .collect();

    PopulationReport {
        polarity,
        tracks,
        metrics,
    }
}

/// Write population reports as an aligned plain-text table
///
/// # Errors
///
/// Returns an error if writing to `out` fails
pub fn write_reports<W: Write>(reports: &[PopulationReport], out: &mut W) -> std::io::Result<()> {
    for report in reports {
        writeln!(
            out,
            "{} eddies: {} tracks",
            report.polarity.label(),
            report.tracks
        )?;
        writeln!(
            out,
            "  {:<13}{:>8}{:>6}{:>12}{:>12}{:>12}{:>12}{:>12}",
            "metric", "units", "n", "mean", "std", "median", "min", "max"
        )?;
        for (metric, summary) in &report.metrics {
            match summary {
                Some(s) => writeln!(
                    out,
                    "  {:<13}{:>8}{:>6}{:>12.3}{:>12.3}{:>12.3}{:>12.3}{:>12.3}",
                    metric.label(),
                    metric.units(),
                    s.count,
                    s.mean,
                    s.std_dev,
                    s.median,
                    s.min,
                    s.max
                )?,
                None => writeln!(
                    out,
                    "  {:<13}{:>8}{:>6}",
                    metric.label(),
                    metric.units(),
                    0
                )?,
            }
        }
    }
    Ok(())
}
