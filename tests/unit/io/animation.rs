//! Tests for animated track maps

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use eddytracks::io::animation::{AnimatedTrack, TrackAnimation};
    use eddytracks::io::canvas::blend;
    use eddytracks::io::configuration::{AXIS_COLOR, CYCLONE_COLOR, MIN_PROGRESS_ITEMS, SEA_COLOR};
    use eddytracks::io::progress::Progress;
    use eddytracks::math::geodesy::GeoBounds;
    use eddytracks::tracks::gaps::FillMethod;
    use eddytracks::tracks::record::{EddyObservation, EddyTrack, Polarity};

    fn observation(step: i64, flag: f64, lon: f64, lat: f64, radius_km: f64) -> EddyObservation {
        EddyObservation {
            track: 1,
            step,
            time: None,
            polarity_flag: flag,
            lon,
            lat,
            radius_km,
            rossby: None,
            amplitude: None,
        }
    }

    fn drifting_cyclone(steps: i64) -> EddyTrack {
        EddyTrack::new(
            1,
            (0..steps)
                .map(|step| observation(step, 1.0, 0.5 + step as f64 * 0.5, 41.0, 5.0))
                .collect(),
        )
    }

    fn bounds() -> GeoBounds {
        GeoBounds::new(0.0, 4.0, 40.0, 42.0).expect("bounds")
    }

    // Tests gap steps are positioned and keep the last radius
    // Verified by interpolating the radius across the gap
    #[test]
    fn test_animated_track_fills_gaps() {
        let track = EddyTrack::new(
            3,
            vec![
                observation(0, -1.0, 5.0, 42.0, 10.0),
                observation(2, -1.0, 7.0, 42.0, 20.0),
            ],
        );
        let animated = AnimatedTrack::from_track(&track, FillMethod::Midpoint)
            .expect("fill")
            .expect("classified");

        assert_eq!(animated.polarity, Polarity::Anticyclonic);
        assert_eq!(animated.positions.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);

        let gap = animated.positions.get(&1).expect("gap step");
        assert_relative_eq!(gap.lon, 6.0);
        assert_relative_eq!(gap.radius_km, 10.0);
        let last = animated.positions.get(&2).expect("last step");
        assert_relative_eq!(last.radius_km, 20.0);
    }

    // Tests unclassified and empty tracks are left out
    // Verified by defaulting the polarity to cyclonic
    #[test]
    fn test_animated_track_skips_unclassified() {
        let unclassified = EddyTrack::new(2, vec![observation(0, 0.0, 5.0, 42.0, 10.0)]);
        assert!(
            AnimatedTrack::from_track(&unclassified, FillMethod::Linear)
                .expect("fill")
                .is_none()
        );

        let empty = EddyTrack::new(4, Vec::new());
        assert!(AnimatedTrack::from_track(&empty, FillMethod::Linear).expect("fill").is_none());
    }

    // Tests map size and step range
    // Verified by swapping the spans
    #[test]
    fn test_dimensions_and_steps() {
        let track = drifting_cyclone(5);
        let animation =
            TrackAnimation::new([&track], FillMethod::Linear, bounds(), 10, 3).expect("animation");

        assert_eq!(animation.dimensions(), (40, 20));
        assert_eq!(animation.step_range(), (0, 4));
        assert_eq!(animation.frame_count(), 5);
    }

    // Tests the eddy centre is drawn in its polarity colour
    // Verified by drawing every eddy in the axis colour
    #[test]
    fn test_render_centre() {
        let track = EddyTrack::new(1, vec![observation(0, 1.0, 2.0, 41.0, 5.0)]);
        let animation =
            TrackAnimation::new([&track], FillMethod::Linear, bounds(), 10, 3).expect("animation");
        let frame = animation.render_frame(0);

        assert_eq!(frame.dimensions(), (40, 20));
        assert_eq!(frame.get_pixel(20, 10).0, CYCLONE_COLOR);
        assert_eq!(frame.get_pixel(0, 0).0, SEA_COLOR);
        assert_eq!(frame.get_pixel(0, 19).0, SEA_COLOR);
    }

    // Tests trails fade behind the eddy and the progress bar fills
    // Verified by drawing trails at full opacity
    #[test]
    fn test_render_trail_and_progress() {
        let track = EddyTrack::new(
            1,
            vec![
                observation(0, 1.0, 1.0, 41.0, 5.0),
                observation(1, 1.0, 3.0, 41.0, 5.0),
            ],
        );
        let animation =
            TrackAnimation::new([&track], FillMethod::Linear, bounds(), 10, 3).expect("animation");

        let first = animation.render_frame(0);
        assert_eq!(first.get_pixel(15, 10).0, SEA_COLOR);

        let second = animation.render_frame(1);
        assert_eq!(second.get_pixel(15, 10).0, blend(CYCLONE_COLOR, SEA_COLOR, 0.5));
        assert_eq!(second.get_pixel(30, 10).0, CYCLONE_COLOR);
        assert_eq!(second.get_pixel(0, 19).0, AXIS_COLOR);
        assert_eq!(second.get_pixel(39, 18).0, AXIS_COLOR);
    }

    // Tests a zero trail shows only the current position
    // Verified by including one step before the window
    #[test]
    fn test_render_without_trail() {
        let track = EddyTrack::new(
            1,
            vec![
                observation(0, 1.0, 1.0, 41.0, 5.0),
                observation(1, 1.0, 3.0, 41.0, 5.0),
            ],
        );
        let animation =
            TrackAnimation::new([&track], FillMethod::Linear, bounds(), 10, 0).expect("animation");

        assert_eq!(animation.render_frame(1).get_pixel(15, 10).0, SEA_COLOR);
    }

    // Tests invalid resolutions and tracks are rejected
    // Verified by clamping the resolution instead
    #[test]
    fn test_invalid_animations() {
        let track = drifting_cyclone(3);
        assert!(TrackAnimation::new([&track], FillMethod::Linear, bounds(), 0, 3).is_err());

        let wide = GeoBounds::new(0.0, 100.0, 40.0, 42.0).expect("bounds");
        assert!(TrackAnimation::new([&track], FillMethod::Linear, wide, 80, 3).is_err());

        let unclassified = EddyTrack::new(2, vec![observation(0, 0.0, 2.0, 41.0, 5.0)]);
        assert!(TrackAnimation::new([&unclassified], FillMethod::Linear, bounds(), 10, 3).is_err());
        assert!(
            TrackAnimation::new(Vec::<&EddyTrack>::new(), FillMethod::Linear, bounds(), 10, 3)
                .is_err()
        );
    }

    // Tests short delays are raised and compensated by skipping frames
    // Verified by keeping every frame at the short delay
    #[test]
    fn test_frames_skip_short_delays() {
        let track = drifting_cyclone(5);
        let animation =
            TrackAnimation::new([&track], FillMethod::Linear, bounds(), 10, 3).expect("animation");

        let progress = Progress::hidden();
        let frames: Vec<_> = animation.frames(10, &progress).collect();
        assert_eq!(frames.len(), 4);
        let first = frames.first().expect("first frame");
        assert_eq!(first.delay().numer_denom_ms(), (20, 1));
        let hold = frames.last().expect("held frame");
        assert_eq!(hold.delay().numer_denom_ms(), (400, 1));
    }

    // Tests long delays keep every step plus the held final frame
    // Verified by dropping the held frame
    #[test]
    fn test_frames_long_delays() {
        let track = drifting_cyclone(5);
        let animation =
            TrackAnimation::new([&track], FillMethod::Linear, bounds(), 10, 3).expect("animation");

        let progress = Progress::hidden();
        let frames: Vec<_> = animation.frames(100, &progress).collect();
        assert_eq!(frames.len(), 6);
        let hold = frames.last().expect("held frame");
        assert_eq!(hold.delay().numer_denom_ms(), (2000, 1));
    }

    // Tests the strided steps always end on the last step
    // Verified by striding from the last step backwards
    #[test]
    fn test_drawn_steps() {
        let track = drifting_cyclone(6);
        let animation =
            TrackAnimation::new([&track], FillMethod::Linear, bounds(), 10, 3).expect("animation");

        assert_eq!(animation.drawn_steps(100), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(animation.drawn_steps(10), vec![0, 2, 4, 5]);
        assert_eq!(animation.drawn_steps(5), vec![0, 4, 5]);
    }

    // Tests frames are rendered only as the iterator advances
    // Verified by rendering every frame before returning
    #[test]
    fn test_frames_render_lazily() {
        let track = drifting_cyclone(5);
        let animation =
            TrackAnimation::new([&track], FillMethod::Linear, bounds(), 10, 3).expect("animation");
        let progress = Progress::new("frames", MIN_PROGRESS_ITEMS, true);

        let mut frames = animation.frames(100, &progress);
        assert_eq!(progress.position(), 0);
        let first = frames.next().expect("first frame");
        assert_eq!(progress.position(), 1);
        assert_eq!(first.buffer().as_raw(), animation.render_frame(0).as_raw());

        let rest = frames.count();
        assert_eq!(rest, 5);
        assert_eq!(progress.position(), 5);
    }

    // Tests GIF export into a new directory and zero delays
    // Verified by skipping directory creation
    #[test]
    fn test_export_gif() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("maps").join("tracks.gif");
        let track = drifting_cyclone(3);
        let animation =
            TrackAnimation::new([&track], FillMethod::Linear, bounds(), 10, 3).expect("animation");

        assert!(animation.export_gif(&path, 0, &Progress::hidden()).is_err());
        assert!(!path.exists());

        animation.export_gif(&path, 50, &Progress::hidden()).expect("export");
        let metadata = std::fs::metadata(&path).expect("gif written");
        assert!(metadata.len() > 0);
    }
}
