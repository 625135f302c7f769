//! Coriolis parameter and inertial frequencies
//!
//! Frequencies are returned in cycles per day (cpd) to match the rotary spectrum axis.

use crate::io::configuration::{EARTH_ROTATION_RATE, HOURS_PER_DAY, SECONDS_PER_DAY};
use std::f64::consts::TAU;

/// Coriolis parameter `f = 2Ω sin(lat)` in rad/s
pub fn coriolis_parameter(lat: f64) -> f64 {
    2.0 * EARTH_ROTATION_RATE * lat.to_radians().sin()
}

/// Local inertial frequency in cycles per day
pub fn inertial_frequency_cpd(lat: f64) -> f64 {
    coriolis_parameter(lat).abs() * SECONDS_PER_DAY / TAU
}

/// Local inertial period in hours, infinite at the equator
pub fn inertial_period_hours(lat: f64) -> f64 {
    let frequency = inertial_frequency_cpd(lat);
    if frequency > 0.0 {
        HOURS_PER_DAY / frequency
    } else {
        f64::INFINITY
    }
}

/// Inertial frequency shifted by half the relative vorticity of an eddy core (cpd)
///
/// For a solid-body core with Rossby number `Ro = V / (f R)` the relative vorticity is
/// `2 Ro f`, so `f_eff = f (1 + Ro)`. `signed_rossby` is positive for cyclones.
pub fn effective_inertial_frequency_cpd(lat: f64, signed_rossby: f64) -> f64 {
    inertial_frequency_cpd(lat) * (1.0 + signed_rossby)
}
