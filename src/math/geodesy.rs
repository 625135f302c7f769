//! Great-circle distances along eddy paths and geographic bounding boxes

use crate::io::configuration::{EARTH_RADIUS_KM, KM_PER_DEGREE};
use crate::io::error::{EddyError, Result, invalid_parameter};
use std::str::FromStr;

/// Distance in km between two positions given in degrees, using the haversine formula
pub fn haversine(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (lon1, lat1, lon2, lat2) = (
        lon1.to_radians(),
        lat1.to_radians(),
        lon2.to_radians(),
        lat2.to_radians(),
    );

    let dlon = lon2 - lon1;
    let dlat = lat2 - lat1;

    let a = (lat1.cos() * lat2.cos())
        .mul_add((dlon / 2.0).sin().powi(2), (dlat / 2.0).sin().powi(2))
        .min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Total distance travelled along a path of longitudes and latitudes (km)
///
/// # Errors
///
/// Returns [`EddyError::LengthMismatch`] if the coordinate lists differ in length
pub fn geodist(lons: &[f64], lats: &[f64]) -> Result<f64> {
    check_lengths("geodist", lons, lats)?;

    Ok(lons
        .windows(2)
        .zip(lats.windows(2))
        .map(|pair| match pair {
            ([lon1, lon2], [lat1, lat2]) => haversine(*lon1, *lat1, *lon2, *lat2),
            _ => 0.0,
        })
        .sum())
}

/// Distance between the first and last position of a path (km)
///
/// # Errors
///
/// Returns [`EddyError::LengthMismatch`] if the coordinate lists differ in length
pub fn net_displacement(lons: &[f64], lats: &[f64]) -> Result<f64> {
    check_lengths("net_displacement", lons, lats)?;

    match (lons.first(), lats.first(), lons.last(), lats.last()) {
        (Some(&lon1), Some(&lat1), Some(&lon2), Some(&lat2)) => {
            Ok(haversine(lon1, lat1, lon2, lat2))
        }
        _ => Ok(0.0),
    }
}

fn check_lengths(operation: &'static str, lons: &[f64], lats: &[f64]) -> Result<()> {
    if lons.len() == lats.len() {
        Ok(())
    } else {
        Err(EddyError::LengthMismatch {
            operation,
            left: lons.len(),
            right: lats.len(),
        })
    }
}

/// Degrees of latitude spanned by a distance
pub fn km_to_lat_degrees(km: f64) -> f64 {
    km / KM_PER_DEGREE
}

/// Degrees of longitude spanned by a distance at the given latitude
pub fn km_to_lon_degrees(km: f64, lat: f64) -> f64 {
    // Clamped so the poles do not divide by zero
    km / (KM_PER_DEGREE * lat.to_radians().cos().max(1e-6))
}

/// Longitude/latitude box in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    /// Western edge
    pub lon_min: f64,
    /// Eastern edge
    pub lon_max: f64,
    /// Southern edge
    pub lat_min: f64,
    /// Northern edge
    pub lat_max: f64,
}

impl GeoBounds {
    /// Create bounds, edges must be finite and strictly ordered
    ///
    /// # Errors
    ///
    /// Returns an error if an edge is not finite or a minimum is not below its maximum
    pub fn new(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Result<Self> {
        let edges = [lon_min, lon_max, lat_min, lat_max];
        if edges.iter().any(|edge| !edge.is_finite()) {
            return Err(invalid_parameter(
                "bounds",
                &format!("{edges:?}"),
                &"edges must be finite",
            ));
        }
        if lon_min >= lon_max || lat_min >= lat_max {
            return Err(invalid_parameter(
                "bounds",
                &format!("{edges:?}"),
                &"minimum edges must be below maximum edges",
            ));
        }

        Ok(Self {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        })
    }

    /// Smallest box holding every point, grown by `padding` degrees on each side
    ///
    /// Returns `None` when no finite point is given
    pub fn enclosing<I>(points: I, padding: f64) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut bounds: Option<Self> = None;

        for (lon, lat) in points {
            if !lon.is_finite() || !lat.is_finite() {
                continue;
            }
            bounds = Some(match bounds {
                Some(b) => Self {
                    lon_min: b.lon_min.min(lon),
                    lon_max: b.lon_max.max(lon),
                    lat_min: b.lat_min.min(lat),
                    lat_max: b.lat_max.max(lat),
                },
                None => Self {
                    lon_min: lon,
                    lon_max: lon,
                    lat_min: lat,
                    lat_max: lat,
                },
            });
        }

        let padding = padding.abs().max(f64::EPSILON);
        bounds.map(|b| Self {
            lon_min: b.lon_min - padding,
            lon_max: b.lon_max + padding,
            lat_min: b.lat_min - padding,
            lat_max: b.lat_max + padding,
        })
    }

    /// Whether the position lies inside the box, edges included
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.lon_min..=self.lon_max).contains(&lon) && (self.lat_min..=self.lat_max).contains(&lat)
    }

    /// Width in degrees of longitude
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Height in degrees of latitude
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }
}

impl FromStr for GeoBounds {
    type Err = EddyError;

    /// Parses `lon_min,lon_max,lat_min,lat_max`
    fn from_str(s: &str) -> Result<Self> {
        let edges = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| invalid_parameter("bounds", &s, &e))?;

        match edges.as_slice() {
            [lon_min, lon_max, lat_min, lat_max] => {
                Self::new(*lon_min, *lon_max, *lat_min, *lat_max)
            }
            _ => Err(invalid_parameter(
                "bounds",
                &s,
                &"expected lon_min,lon_max,lat_min,lat_max",
            )),
        }
    }
}
