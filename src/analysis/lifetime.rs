//! Lifetime and propagation of individual eddy tracks

use crate::io::error::{Result, invalid_data, invalid_parameter};
use crate::math::coriolis::effective_inertial_frequency_cpd;
use crate::math::geodesy::{geodist, net_displacement};
use crate::tracks::gaps::{FillMethod, fill_coords};
use crate::tracks::record::{EddyTrack, Polarity};
use serde::Serialize;
use statrs::statistics::Statistics;

/// Lifetime, propagation and mean properties of one track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    /// Track identifier
    pub id: u32,
    /// Sense of rotation
    pub polarity: Polarity,
    /// Time step of the first detection
    pub first_step: i64,
    /// Time step of the last detection
    pub last_step: i64,
    /// Number of detections, gaps excluded
    pub detections: usize,
    /// Steps spanned from first to last detection
    pub lifetime_steps: i64,
    /// Lifetime in days
    pub lifetime_days: f64,
    /// Distance travelled along the gap-filled path (km)
    pub distance_km: f64,
    /// Distance between genesis and final position (km)
    pub displacement_km: f64,
    /// Distance travelled per day between the first and last detection (km/day)
    pub mean_speed_km_per_day: f64,
    /// Mean radius of maximum velocity (km)
    pub mean_radius_km: f64,
    /// Mean magnitude of the Rossby number, if reported
    pub mean_rossby: Option<f64>,
    /// Mean amplitude, if reported
    pub mean_amplitude: Option<f64>,
    /// Longitude of the first detection
    pub genesis_lon: f64,
    /// Latitude of the first detection
    pub genesis_lat: f64,
    /// Effective inertial frequency inside the core at genesis (cpd)
    pub effective_inertial_frequency_cpd: Option<f64>,
}

fn mean_or_none(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().mean())
}

/// Summarise a classified track
///
/// Distance is measured along the path with gaps filled by `fill`; lifetime counts
/// every step from the first to the last detection. Speed divides the distance by
/// the time elapsed between them, so a single detection has zero speed.
///
/// # Errors
///
/// Returns an error if:
/// - The track is empty or has no valid rotation flag
/// - `time_step_days` is not positive
pub fn summarize_track(
    track: &EddyTrack,
    fill: FillMethod,
    time_step_days: f64,
) -> Result<TrackSummary> {
    if time_step_days.is_nan() || time_step_days <= 0.0 {
        return Err(invalid_parameter(
            "time_step_days",
            &time_step_days,
            &"must be positive",
        ));
    }

    let polarity = track
        .polarity
        .ok_or_else(|| invalid_data(&format!("track {} has no rotation flag", track.id)))?;
    let (Some(first), Some(last)) = (track.observations.first(), track.observations.last())
    else {
        return Err(invalid_data(&format!("track {} has no detections", track.id)));
    };

    let path = fill_coords(&track.steps(), &track.lons(), &track.lats(), fill)?;
    let distance_km = geodist(&path.lons, &path.lats)?;
    let displacement_km = net_displacement(&path.lons, &path.lats)?;

    let lifetime_steps = track.lifetime();
    let lifetime_days = lifetime_steps as f64 * time_step_days;
    let elapsed_days = (lifetime_steps - 1) as f64 * time_step_days;
    let mean_speed_km_per_day = if elapsed_days > 0.0 {
        distance_km / elapsed_days
    } else {
        0.0
    };

    let rossby_magnitudes: Vec<f64> = track.rossby_numbers().iter().map(|ro| ro.abs()).collect();
    let mean_rossby = mean_or_none(&rossby_magnitudes);

    Ok(TrackSummary {
        id: track.id,
        polarity,
        first_step: first.step,
        last_step: last.step,
        detections: track.len(),
        lifetime_steps,
        lifetime_days,
        distance_km,
        displacement_km,
        mean_speed_km_per_day,
        mean_radius_km: track.radii().iter().mean(),
        mean_rossby,
        mean_amplitude: mean_or_none(&track.amplitudes()),
        genesis_lon: first.lon,
        genesis_lat: first.lat,
        effective_inertial_frequency_cpd: mean_rossby
            .map(|ro| effective_inertial_frequency_cpd(first.lat, polarity.signed_rossby(ro))),
    })
}

/// Summarise every classified track, skipping none
///
/// # Errors
///
/// Returns the first error raised by [`summarize_track`]
pub fn summarize_tracks<'a, I>(
    tracks: I,
    fill: FillMethod,
    time_step_days: f64,
) -> Result<Vec<TrackSummary>>
where
    I: IntoIterator<Item = &'a EddyTrack>,
{
    tracks
        .into_iter()
        .map(|track| summarize_track(track, fill, time_step_days))
        .collect()
}
