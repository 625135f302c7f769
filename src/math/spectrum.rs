//! Rotary spectra of horizontal velocity records
//!
//! The velocity is treated as the complex series `w = u + i v`. Positive frequencies
//! of its Fourier transform rotate counter-clockwise and negative frequencies rotate
//! clockwise, which separates near-inertial motion (clockwise in the northern
//! hemisphere) from the rest of the signal.

use crate::io::configuration::HOURS_PER_DAY;
use crate::io::error::{EddyError, Result, computation_error, invalid_parameter};
use ndarray::{Array2, Axis};
use num_traits::Zero;
use rustfft::FftPlanner;
use rustfft::num_complex::Complex;
use std::f64::consts::TAU;
use tracing::debug;

/// Taper applied to each segment before the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Taper {
    /// No tapering
    Rectangular,
    /// Periodic Hann window
    #[default]
    Hann,
}

impl Taper {
    /// Window coefficient at position `i` of `n` samples
    pub fn coefficient(self, i: usize, n: usize) -> f64 {
        match self {
            Self::Rectangular => 1.0,
            Self::Hann => 0.5 * (1.0 - (TAU * i as f64 / n as f64).cos()),
        }
    }

    /// Window coefficients for `n` samples
    pub fn coefficients(self, n: usize) -> Vec<f64> {
        (0..n).map(|i| self.coefficient(i, n)).collect()
    }
}

/// Segmenting and tapering options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumConfig {
    /// Samples per segment
    pub segment_len: usize,
    /// Fraction of a segment shared with the next one, in `[0, 1)`
    pub overlap: f64,
    /// Window applied to each segment
    pub taper: Taper,
}

impl SpectrumConfig {
    /// Build a configuration from a segment duration
    ///
    /// # Errors
    ///
    /// Returns an error if the sampling interval or segment duration is not positive
    pub fn from_hours(
        segment_hours: f64,
        sample_interval_hours: f64,
        overlap: f64,
        taper: Taper,
    ) -> Result<Self> {
        if sample_interval_hours.is_nan() || sample_interval_hours <= 0.0 {
            return Err(invalid_parameter(
                "sample_interval_hours",
                &sample_interval_hours,
                &"must be positive",
            ));
        }
        if segment_hours.is_nan() || segment_hours <= 0.0 {
            return Err(invalid_parameter(
                "segment_hours",
                &segment_hours,
                &"must be positive",
            ));
        }

        Ok(Self {
            segment_len: (segment_hours / sample_interval_hours).round() as usize,
            overlap,
            taper,
        })
    }
}

/// Energy of each rotary branch inside a frequency band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandEnergy {
    /// Clockwise variance ((m/s)²)
    pub clockwise: f64,
    /// Counter-clockwise variance ((m/s)²)
    pub counterclockwise: f64,
}

impl BandEnergy {
    /// `(cw - ccw) / (cw + ccw)`, +1 for purely clockwise motion
    pub fn rotary_coefficient(&self) -> f64 {
        let total = self.clockwise + self.counterclockwise;
        if total > 0.0 {
            (self.clockwise - self.counterclockwise) / total
        } else {
            0.0
        }
    }
}

/// One-sided clockwise and counter-clockwise spectral densities
#[derive(Debug, Clone)]
pub struct RotarySpectrum {
    /// Positive frequencies (cpd)
    pub frequencies: Vec<f64>,
    /// Clockwise density ((m/s)²/cpd)
    pub clockwise: Vec<f64>,
    /// Counter-clockwise density ((m/s)²/cpd)
    pub counterclockwise: Vec<f64>,
    /// Density of the zero-frequency bin
    pub dc: f64,
    /// Frequency spacing (cpd)
    pub resolution: f64,
    /// Number of averaged segments
    pub segments: usize,
}

impl RotarySpectrum {
    /// Variance integrated over both branches and the zero-frequency bin
    pub fn total_variance(&self) -> f64 {
        let branches: f64 = self
            .clockwise
            .iter()
            .zip(&self.counterclockwise)
            .map(|(cw, ccw)| cw + ccw)
            .sum();
        (branches + self.dc) * self.resolution
    }

    /// Integrate both branches over `[centre (1 - b), centre (1 + b)]`
    pub fn band_energy(&self, centre: f64, half_width_fraction: f64) -> BandEnergy {
        let low = centre * (1.0 - half_width_fraction);
        let high = centre * (1.0 + half_width_fraction);

        let mut energy = BandEnergy {
            clockwise: 0.0,
            counterclockwise: 0.0,
        };
        for ((frequency, cw), ccw) in self
            .frequencies
            .iter()
            .zip(&self.clockwise)
            .zip(&self.counterclockwise)
        {
            if (low..=high).contains(frequency) {
                energy.clockwise += cw * self.resolution;
                energy.counterclockwise += ccw * self.resolution;
            }
        }
        energy
    }

    /// Frequency and density of the strongest clockwise bin
    pub fn clockwise_peak(&self) -> Option<(f64, f64)> {
        self.frequencies
            .iter()
            .copied()
            .zip(self.clockwise.iter().copied())
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Estimate the rotary spectrum of a velocity record sampled every `dt_hours`
///
/// The mean of `u + i v` is removed, the record is cut into overlapping segments,
/// each segment is tapered and transformed, and the power is averaged across
/// segments. Densities are scaled so that the rectangular-taper spectrum integrates
/// to the record variance.
///
/// # Errors
///
/// Returns an error if:
/// - `u` and `v` differ in length
/// - The record holds fewer than 2 samples
/// - The sampling interval is not positive
/// - The segment is shorter than 2 samples or longer than the record
/// - The overlap lies outside `[0, 1)`
pub fn rotary_spectrum(
    u: &[f64],
    v: &[f64],
    dt_hours: f64,
    config: &SpectrumConfig,
) -> Result<RotarySpectrum> {
    if u.len() != v.len() {
        return Err(EddyError::LengthMismatch {
            operation: "rotary_spectrum",
            left: u.len(),
            right: v.len(),
        });
    }
    let n = u.len();
    if n < 2 {
        return Err(invalid_parameter(
            "samples",
            &n,
            &"a spectrum needs at least 2 samples",
        ));
    }
    if !dt_hours.is_finite() || dt_hours <= 0.0 {
        return Err(invalid_parameter(
            "dt_hours",
            &dt_hours,
            &"must be positive",
        ));
    }
    let segment_len = config.segment_len;
    if segment_len < 2 || segment_len > n {
        return Err(invalid_parameter(
            "segment_len",
            &segment_len,
            &format!("must lie between 2 and the record length {n}"),
        ));
    }
    if !(0.0..1.0).contains(&config.overlap) {
        return Err(invalid_parameter(
            "overlap",
            &config.overlap,
            &"must lie in [0, 1)",
        ));
    }

    let mean = u
        .iter()
        .zip(v)
        .fold(Complex::<f64>::zero(), |acc, (&re, &im)| {
            acc + Complex::new(re, im)
        })
        / n as f64;
    let series: Vec<Complex<f64>> = u
        .iter()
        .zip(v)
        .map(|(&re, &im)| Complex::new(re, im) - mean)
        .collect();

    let hop = (segment_len as f64 * (1.0 - config.overlap))
        .round()
        .max(1.0) as usize;
    let starts: Vec<usize> = (0..=n - segment_len).step_by(hop).collect();

    let window = config.taper.coefficients(segment_len);
    let window_power: f64 = window.iter().map(|w| w * w).sum();
    if window_power <= 0.0 {
        return Err(computation_error("rotary_spectrum", &"taper has no energy"));
    }
    let dt_days = dt_hours / HOURS_PER_DAY;
    let scale = dt_days / window_power;

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(segment_len);
    let mut buffer = vec![Complex::<f64>::zero(); segment_len];
    let mut power = Array2::<f64>::zeros((starts.len(), segment_len));

    for (mut row, &start) in power.axis_iter_mut(Axis(0)).zip(&starts) {
        let segment = series.get(start..start + segment_len).ok_or_else(|| {
            computation_error("rotary_spectrum", &format!("segment at {start} out of range"))
        })?;

        for ((slot, &sample), &weight) in buffer.iter_mut().zip(segment).zip(&window) {
            *slot = sample * weight;
        }
        fft.process(&mut buffer);

        for (cell, coefficient) in row.iter_mut().zip(&buffer) {
            *cell = coefficient.norm_sqr() * scale;
        }
    }

    let mean_power = power
        .mean_axis(Axis(0))
        .ok_or_else(|| computation_error("rotary_spectrum", &"no segments to average"))?;

    let resolution = 1.0 / (segment_len as f64 * dt_days);
    let half = segment_len / 2;
    let nyquist_shared = segment_len % 2 == 0;

    let mut frequencies = Vec::with_capacity(half);
    let mut clockwise = Vec::with_capacity(half);
    let mut counterclockwise = Vec::with_capacity(half);

    for k in 1..=half {
        let positive = mean_power.get(k).copied().unwrap_or(0.0);
        let negative = mean_power.get(segment_len - k).copied().unwrap_or(0.0);

        frequencies.push(k as f64 * resolution);
        if nyquist_shared && k == half {
            // The Nyquist bin is both +N/2 and -N/2
            clockwise.push(positive / 2.0);
            counterclockwise.push(positive / 2.0);
        } else {
            clockwise.push(negative);
            counterclockwise.push(positive);
        }
    }

    debug!(
        samples = n,
        segment_len,
        segments = starts.len(),
        resolution,
        "estimated rotary spectrum"
    );

    Ok(RotarySpectrum {
        frequencies,
        clockwise,
        counterclockwise,
        dc: mean_power.get(0).copied().unwrap_or(0.0),
        resolution,
        segments: starts.len(),
    })
}
