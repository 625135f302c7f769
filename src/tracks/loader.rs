//! Track table loading with grouping and validation

use crate::io::error::{Result, WithPath, invalid_data};
use crate::tracks::record::{EddyObservation, EddyTrack};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load eddy tracks from a CSV export of the AMEDA `eddy_tracks` structure
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any row is malformed
pub fn load_tracks(path: &Path) -> Result<Vec<EddyTrack>> {
    let file = File::open(path).with_path(path, "open track table")?;
    let tracks = read_tracks(file, path)?;
    info!(
        path = %path.display(),
        tracks = tracks.len(),
        "loaded eddy tracks"
    );
    Ok(tracks)
}

/// Read eddy tracks from any CSV source, `path` is only used in error messages
///
/// Rows are grouped by track identifier and ordered by time step. Tracks are
/// returned in ascending identifier order.
///
/// # Errors
///
/// Returns an error if:
/// - A row cannot be parsed
/// - A position is not finite
/// - A track repeats a time step
pub fn read_tracks<R: std::io::Read>(reader: R, path: &Path) -> Result<Vec<EddyTrack>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut grouped: BTreeMap<u32, Vec<EddyObservation>> = BTreeMap::new();
    let mut rows = 0usize;

    for record in csv_reader.deserialize::<EddyObservation>() {
        let observation = record.with_path(path, "parse track row")?;
        rows += 1;

        if !observation.lon.is_finite() || !observation.lat.is_finite() {
            return Err(invalid_data(&format!(
                "track {} step {} has a non-finite position ({}, {})",
                observation.track, observation.step, observation.lon, observation.lat
            )));
        }

        grouped
            .entry(observation.track)
            .or_default()
            .push(observation);
    }

    if grouped.is_empty() {
        warn!(path = %path.display(), "track table contains no detections");
    }

    let mut tracks = Vec::with_capacity(grouped.len());
    for (id, mut observations) in grouped {
        observations.sort_by_key(|obs| obs.step);

        if let Some(pair) = observations
            .windows(2)
            .find(|pair| matches!(pair, [a, b] if a.step == b.step))
        {
            let step = pair.first().map_or(0, |obs| obs.step);
            return Err(invalid_data(&format!(
                "track {id} repeats time step {step}"
            )));
        }

        let track = EddyTrack::new(id, observations);
        if track.polarity.is_none() {
            debug!(track = id, "track has no valid rotation flag");
        }
        tracks.push(track);
    }

    debug!(rows, tracks = tracks.len(), "grouped detections into tracks");
    Ok(tracks)
}
