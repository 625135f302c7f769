//! Track selection by sense of rotation, lifetime and region

use crate::math::geodesy::GeoBounds;
use crate::tracks::record::{EddyTrack, Polarity};

/// Tracks split by sense of rotation
#[derive(Debug, Clone, Default)]
pub struct Partition<'a> {
    /// Cyclonic tracks in input order
    pub cyclones: Vec<&'a EddyTrack>,
    /// Anticyclonic tracks in input order
    pub anticyclones: Vec<&'a EddyTrack>,
}

impl<'a> Partition<'a> {
    /// Tracks of the given polarity
    pub fn of(&self, polarity: Polarity) -> &[&'a EddyTrack] {
        match polarity {
            Polarity::Cyclonic => &self.cyclones,
            Polarity::Anticyclonic => &self.anticyclones,
        }
    }

    /// Cyclones followed by anticyclones
    pub fn all(&self) -> impl Iterator<Item = &'a EddyTrack> + '_ {
        self.cyclones
            .iter()
            .chain(self.anticyclones.iter())
            .copied()
    }

    /// Total number of classified tracks
    pub const fn len(&self) -> usize {
        self.cyclones.len() + self.anticyclones.len()
    }

    /// Whether no track was classified
    pub const fn is_empty(&self) -> bool {
        self.cyclones.is_empty() && self.anticyclones.is_empty()
    }
}

/// Split tracks into cyclones and anticyclones living at least `min_lifetime` steps
///
/// Tracks without a valid rotation flag are left out of both groups.
pub fn differentiate_eddies<'a, I>(tracks: I, min_lifetime: i64) -> Partition<'a>
where
    I: IntoIterator<Item = &'a EddyTrack>,
{
    let mut partition = Partition::default();

    for track in tracks {
        if track.lifetime() < min_lifetime {
            continue;
        }
        match track.polarity {
            Some(Polarity::Cyclonic) => partition.cyclones.push(track),
            Some(Polarity::Anticyclonic) => partition.anticyclones.push(track),
            None => {}
        }
    }

    partition
}

/// Keep tracks with at least one detection inside `bounds`
pub fn filter_region<'a, I>(tracks: I, bounds: &GeoBounds) -> Vec<&'a EddyTrack>
where
    I: IntoIterator<Item = &'a EddyTrack>,
{
    tracks
        .into_iter()
        .filter(|track| {
            track
                .observations
                .iter()
                .any(|obs| bounds.contains(obs.lon, obs.lat))
        })
        .collect()
}
