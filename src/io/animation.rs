//! Animated map of eddy tracks exported as GIF

use crate::io::canvas::{Canvas, Scale, blend};
use crate::io::configuration::{
    AXIS_COLOR, FINAL_FRAME_HOLD, MAX_MAP_DIMENSION, SEA_COLOR, VIEWER_MIN_FRAME_DELAY_MS,
};
use crate::io::ensure_parent_dir;
use crate::io::error::{EddyError, Result, WithPath, invalid_parameter};
use crate::io::progress::Progress;
use crate::math::geodesy::{GeoBounds, km_to_lat_degrees, km_to_lon_degrees};
use crate::tracks::gaps::{FillMethod, fill_coords};
use crate::tracks::record::{EddyTrack, Polarity};
use image::{Delay, Frame, RgbaImage};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Eddy centre and radius at one time step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedPosition {
    /// Centre longitude
    pub lon: f64,
    /// Centre latitude
    pub lat: f64,
    /// Radius (km), carried over from the last detection inside gaps
    pub radius_km: f64,
}

/// Gap-filled track ready for drawing
#[derive(Debug, Clone)]
pub struct AnimatedTrack {
    /// Sense of rotation
    pub polarity: Polarity,
    /// Position at every step from the first to the last detection
    pub positions: BTreeMap<i64, AnimatedPosition>,
}

impl AnimatedTrack {
    /// Fill the gaps of a classified track, `None` for unclassified or empty tracks
    ///
    /// # Errors
    ///
    /// Propagates gap-filling errors
    pub fn from_track(track: &EddyTrack, fill: FillMethod) -> Result<Option<Self>> {
        let Some(polarity) = track.polarity else {
            return Ok(None);
        };
        if track.is_empty() {
            return Ok(None);
        }

        let path = fill_coords(&track.steps(), &track.lons(), &track.lats(), fill)?;
        let mut observations = track.observations.iter().peekable();
        let mut radius_km = 0.0;
        let mut positions = BTreeMap::new();

        for ((&step, &lon), &lat) in path.steps.iter().zip(&path.lons).zip(&path.lats) {
            if let Some(obs) = observations.next_if(|obs| obs.step == step) {
                radius_km = obs.radius_km;
            }
            positions.insert(
                step,
                AnimatedPosition {
                    lon,
                    lat,
                    radius_km,
                },
            );
        }

        Ok(Some(Self {
            polarity,
            positions,
        }))
    }
}

/// Map animation with one frame per time step
pub struct TrackAnimation {
    tracks: Vec<AnimatedTrack>,
    bounds: GeoBounds,
    width: u32,
    height: u32,
    trail_length: usize,
    first_step: i64,
    last_step: i64,
}

impl TrackAnimation {
    /// Prepare tracks for drawing on a map covering `bounds`
    ///
    /// # Errors
    ///
    /// Returns an error if no classified track is given, the resolution is zero,
    /// or the map would exceed the maximum dimension
    pub fn new<'a, I>(
        tracks: I,
        fill: FillMethod,
        bounds: GeoBounds,
        pixels_per_degree: u32,
        trail_length: usize,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a EddyTrack>,
    {
        if pixels_per_degree == 0 {
            return Err(invalid_parameter(
                "pixels_per_degree",
                &pixels_per_degree,
                &"must be positive",
            ));
        }

        let width = (bounds.lon_span() * f64::from(pixels_per_degree)).ceil();
        let height = (bounds.lat_span() * f64::from(pixels_per_degree)).ceil();
        let limit = f64::from(MAX_MAP_DIMENSION);
        if width > limit || height > limit {
            return Err(invalid_parameter(
                "pixels_per_degree",
                &pixels_per_degree,
                &format!("map of {width}x{height} pixels exceeds {MAX_MAP_DIMENSION}"),
            ));
        }

        let mut animated = Vec::new();
        for track in tracks {
            if let Some(prepared) = AnimatedTrack::from_track(track, fill)? {
                animated.push(prepared);
            }
        }

        let first_step = animated
            .iter()
            .filter_map(|track| track.positions.keys().next().copied())
            .min();
        let last_step = animated
            .iter()
            .filter_map(|track| track.positions.keys().next_back().copied())
            .max();
        let (Some(first_step), Some(last_step)) = (first_step, last_step) else {
            return Err(EddyError::InvalidInput {
                reason: "No classified tracks to animate".to_string(),
            });
        };

        Ok(Self {
            tracks: animated,
            bounds,
            width: (width as u32).max(1),
            height: (height as u32).max(1),
            trail_length,
            first_step,
            last_step,
        })
    }

    /// Number of time steps covered, one frame each before skipping
    pub fn frame_count(&self) -> usize {
        usize::try_from(self.last_step - self.first_step + 1).unwrap_or(0)
    }

    /// Frame size in pixels
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// First and last step shown
    pub const fn step_range(&self) -> (i64, i64) {
        (self.first_step, self.last_step)
    }

    /// Draw the map at one time step
    ///
    /// Trails fade with age, discs show the eddy radius, and a bar along the bottom
    /// edge shows how far through the record the frame is.
    pub fn render_frame(&self, step: i64) -> RgbaImage {
        let mut canvas = Canvas::new(
            self.width,
            self.height,
            0,
            SEA_COLOR,
            Scale::linear(self.bounds.lon_min, self.bounds.lon_max),
            Scale::linear(self.bounds.lat_min, self.bounds.lat_max),
        );

        let trail = i64::try_from(self.trail_length).unwrap_or(i64::MAX);
        for track in &self.tracks {
            let color = track.polarity.color();

            let history: Vec<(i64, i64)> = track
                .positions
                .range(step.saturating_sub(trail)..=step)
                .filter_map(|(_, position)| canvas.to_pixel(position.lon, position.lat))
                .collect();
            let segments = history.len().max(1) as f64;
            for (age, pair) in history.windows(2).enumerate() {
                if let [from, to] = pair {
                    let alpha = (age + 1) as f64 / segments;
                    canvas.line(*from, *to, blend(color, SEA_COLOR, alpha));
                }
            }

            if let Some(position) = track.positions.get(&step) {
                if let Some(center) = canvas.to_pixel(position.lon, position.lat) {
                    let area = canvas.area();
                    let rx = km_to_lon_degrees(position.radius_km, position.lat)
                        * f64::from(area.width)
                        / self.bounds.lon_span();
                    let ry = km_to_lat_degrees(position.radius_km) * f64::from(area.height)
                        / self.bounds.lat_span();
                    canvas.fill_ellipse(center, (rx, ry), color, 0.45);
                    canvas.fill_ellipse(center, (1.5, 1.5), color, 1.0);
                }
            }
        }

        let steps = (self.last_step - self.first_step).max(1) as f64;
        let elapsed = (step - self.first_step) as f64 / steps;
        let bottom = i64::from(self.height) - 1;
        let reach = (elapsed * f64::from(self.width)).round() as i64;
        if reach > 0 {
            canvas.fill_rect((0, bottom - 1), (reach - 1, bottom), AXIS_COLOR);
        }

        canvas.into_image()
    }

    /// Render the drawn steps and stream them into a GIF
    ///
    /// Delays shorter than viewers support are raised to the minimum and frames are
    /// skipped to keep the apparent speed. The last frame is held longer. Frames are
    /// encoded as they are rendered, so only one is held in memory at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `frame_delay_ms` is zero
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, path: &Path, frame_delay_ms: u32, progress: &Progress) -> Result<()> {
        if frame_delay_ms == 0 {
            return Err(invalid_parameter(
                "frame_delay_ms",
                &frame_delay_ms,
                &"must be positive",
            ));
        }

        let frame_count = self.drawn_steps(frame_delay_ms).len() + 1;

        ensure_parent_dir(path)?;
        let file = std::fs::File::create(path).with_path(path, "create file")?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(self.frames(frame_delay_ms, progress))
            .map_err(|e| EddyError::ImageExport {
                path: path.to_path_buf(),
                source: e,
            })?;

        info!(
            path = %path.display(),
            frames = frame_count,
            steps = self.frame_count(),
            "exported track animation"
        );
        Ok(())
    }

    /// Steps drawn into the GIF, always ending on the last step
    ///
    /// Every step is drawn unless `frame_delay_ms` had to be raised to the viewer
    /// minimum, in which case steps are strided to keep the requested pace.
    pub fn drawn_steps(&self, frame_delay_ms: u32) -> Vec<i64> {
        let (_, skip_factor) = frame_timing(frame_delay_ms);
        (self.first_step..=self.last_step)
            .enumerate()
            .filter(|&(index, step)| index % skip_factor == 0 || step == self.last_step)
            .map(|(_, step)| step)
            .collect()
    }

    /// Frames with viewer-safe delays, each rendered when the iterator reaches it
    ///
    /// The drawn steps are followed by the last step again, held longer.
    pub fn frames<'a>(
        &'a self,
        frame_delay_ms: u32,
        progress: &'a Progress,
    ) -> impl Iterator<Item = Frame> + 'a {
        let (effective_delay_ms, _) = frame_timing(frame_delay_ms);
        let delay = Delay::from_numer_denom_ms(effective_delay_ms, 1);
        let hold = Delay::from_numer_denom_ms(effective_delay_ms * FINAL_FRAME_HOLD, 1);

        self.drawn_steps(frame_delay_ms)
            .into_iter()
            .map(move |step| {
                let frame = Frame::from_parts(self.render_frame(step), 0, 0, delay);
                progress.inc();
                frame
            })
            .chain(std::iter::once_with(move || {
                progress.finish();
                Frame::from_parts(self.render_frame(self.last_step), 0, 0, hold)
            }))
    }
}

// Delay written to the GIF and the stride over steps that keeps the requested pace
fn frame_timing(frame_delay_ms: u32) -> (u32, usize) {
    let frame_delay_ms = frame_delay_ms.max(1);
    let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
    let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
        VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
    } else {
        1
    };
    (effective_delay_ms, skip_factor)
}
