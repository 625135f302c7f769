//! Fixed-width histograms with edges shared between eddy populations

use crate::io::error::{Result, invalid_parameter};

/// Counts of values falling in consecutive equal-width bins
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` increasing bin edges
    pub edges: Vec<f64>,
    /// Count per bin
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal bins spanning `[min, max]`
    ///
    /// Every bin is half open except the last, which also holds `max`. Values
    /// outside the range and NaN are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `bins` is zero or the range is empty or not finite
    pub fn with_range(values: &[f64], bins: usize, min: f64, max: f64) -> Result<Self> {
        if bins == 0 {
            return Err(invalid_parameter("bins", &bins, &"must be at least 1"));
        }
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(invalid_parameter(
                "range",
                &format!("[{min}, {max}]"),
                &"must be finite and non-empty",
            ));
        }

        let width = (max - min) / bins as f64;
        let edges = (0..=bins)
            .map(|i| if i == bins { max } else { width.mul_add(i as f64, min) })
            .collect();
        let mut counts = vec![0usize; bins];

        for &value in values {
            if !(min..=max).contains(&value) {
                continue;
            }
            let index = (((value - min) / width).floor() as usize).min(bins - 1);
            if let Some(count) = counts.get_mut(index) {
                *count += 1;
            }
        }

        Ok(Self { edges, counts })
    }

    /// Bin several groups on common edges spanning the pooled finite range
    ///
    /// A range collapsed to a single value is widened by 0.5 on both sides.
    ///
    /// # Errors
    ///
    /// Returns an error if `bins` is zero or no group holds a finite value
    pub fn shared(groups: &[&[f64]], bins: usize) -> Result<Vec<Self>> {
        let finite = || {
            groups
                .iter()
                .flat_map(|group| group.iter().copied())
                .filter(|value| value.is_finite())
        };

        let min = finite().fold(f64::INFINITY, f64::min);
        let max = finite().fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() || !max.is_finite() {
            return Err(invalid_parameter(
                "values",
                &"[]",
                &"no finite values to bin",
            ));
        }
        let (min, max) = if max > min {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        };

        groups
            .iter()
            .map(|group| Self::with_range(group, bins, min, max))
            .collect()
    }

    /// Number of bins
    pub const fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Number of binned values
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Largest bin count
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Midpoint of each bin
    pub fn centers(&self) -> Vec<f64> {
        self.edges
            .windows(2)
            .map(|pair| match pair {
                [low, high] => f64::midpoint(*low, *high),
                _ => f64::NAN,
            })
            .collect()
    }

    /// Share of the binned values in each bin, zeros when nothing was binned
    pub fn fractions(&self) -> Vec<f64> {
        let total = self.total();
        self.counts
            .iter()
            .map(|&count| {
                if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                }
            })
            .collect()
    }

    /// Lower edge of the first bin
    pub fn min(&self) -> f64 {
        self.edges.first().copied().unwrap_or(0.0)
    }

    /// Upper edge of the last bin
    pub fn max(&self) -> f64 {
        self.edges.last().copied().unwrap_or(0.0)
    }
}
