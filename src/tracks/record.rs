//! Eddy observations and the tracks assembled from them

use crate::io::configuration::{ANTICYCLONE_COLOR, CYCLONE_COLOR};
use serde::{Deserialize, Serialize};

/// Sense of rotation of an eddy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Positive relative vorticity, AMEDA flag `1`
    Cyclonic,
    /// Negative relative vorticity, AMEDA flag `-1`
    Anticyclonic,
}

impl Polarity {
    /// Maps the AMEDA `type` flag, anything other than exactly 1 or -1 is unclassified
    pub fn from_flag(flag: f64) -> Option<Self> {
        if (flag - 1.0).abs() < f64::EPSILON {
            Some(Self::Cyclonic)
        } else if (flag + 1.0).abs() < f64::EPSILON {
            Some(Self::Anticyclonic)
        } else {
            None
        }
    }

    /// AMEDA flag value
    pub const fn flag(self) -> i8 {
        match self {
            Self::Cyclonic => 1,
            Self::Anticyclonic => -1,
        }
    }

    /// Sign of the relative vorticity in the northern hemisphere
    pub const fn sign(self) -> f64 {
        match self {
            Self::Cyclonic => 1.0,
            Self::Anticyclonic => -1.0,
        }
    }

    /// Rossby number carrying the sign of the rotation
    pub const fn signed_rossby(self, rossby: f64) -> f64 {
        self.sign() * rossby.abs()
    }

    /// Human readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cyclonic => "cyclonic",
            Self::Anticyclonic => "anticyclonic",
        }
    }

    /// Plot colour
    pub const fn color(self) -> [u8; 4] {
        match self {
            Self::Cyclonic => CYCLONE_COLOR,
            Self::Anticyclonic => ANTICYCLONE_COLOR,
        }
    }

    /// Both polarities in report order
    pub const fn all() -> [Self; 2] {
        [Self::Cyclonic, Self::Anticyclonic]
    }
}

/// One row of the track table: a single eddy detection at one time step
///
/// Header names follow this struct, or the AMEDA variable names given as aliases
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EddyObservation {
    /// Track identifier
    #[serde(alias = "id")]
    pub track: u32,
    /// Time step index of the detection
    pub step: i64,
    /// Timestamp of the detection (days)
    #[serde(default)]
    pub time: Option<f64>,
    /// AMEDA rotation flag
    #[serde(rename = "type")]
    pub polarity_flag: f64,
    /// Centre longitude (degrees east)
    #[serde(alias = "x1")]
    pub lon: f64,
    /// Centre latitude (degrees north)
    #[serde(alias = "y1")]
    pub lat: f64,
    /// Radius of maximum velocity (km)
    #[serde(alias = "rmax1")]
    pub radius_km: f64,
    /// Rossby number
    #[serde(default, alias = "ro1")]
    pub rossby: Option<f64>,
    /// Amplitude, the maximum azimuthal velocity in AMEDA output
    #[serde(default, alias = "velmax1")]
    pub amplitude: Option<f64>,
}

/// Ordered detections of a single eddy
#[derive(Debug, Clone, PartialEq)]
pub struct EddyTrack {
    /// Track identifier
    pub id: u32,
    /// Sense of rotation taken from the first detection
    pub polarity: Option<Polarity>,
    /// Detections ordered by time step
    pub observations: Vec<EddyObservation>,
}

impl EddyTrack {
    /// Assemble a track from detections already ordered by step
    pub fn new(id: u32, observations: Vec<EddyObservation>) -> Self {
        let polarity = observations
            .first()
            .and_then(|obs| Polarity::from_flag(obs.polarity_flag));

        Self {
            id,
            polarity,
            observations,
        }
    }

    /// Number of detections
    pub const fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the track has no detections
    pub const fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Time step of the first detection
    pub fn first_step(&self) -> Option<i64> {
        self.observations.first().map(|obs| obs.step)
    }

    /// Time step of the last detection
    pub fn last_step(&self) -> Option<i64> {
        self.observations.last().map(|obs| obs.step)
    }

    /// Number of time steps spanned from first to last detection, gaps included
    pub fn lifetime(&self) -> i64 {
        match (self.first_step(), self.last_step()) {
            (Some(first), Some(last)) => last - first + 1,
            _ => 0,
        }
    }

    /// Time steps of all detections
    pub fn steps(&self) -> Vec<i64> {
        self.observations.iter().map(|obs| obs.step).collect()
    }

    /// Centre longitudes of all detections
    pub fn lons(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.lon).collect()
    }

    /// Centre latitudes of all detections
    pub fn lats(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.lat).collect()
    }

    /// Radii of all detections
    pub fn radii(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.radius_km).collect()
    }

    /// Rossby numbers of the detections that report one
    pub fn rossby_numbers(&self) -> Vec<f64> {
        self.observations.iter().filter_map(|obs| obs.rossby).collect()
    }

    /// Amplitudes of the detections that report one
    pub fn amplitudes(&self) -> Vec<f64> {
        self.observations
            .iter()
            .filter_map(|obs| obs.amplitude)
            .collect()
    }
}
