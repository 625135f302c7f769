//! Tests for track selection by rotation, lifetime and region

#[cfg(test)]
mod tests {
    use eddytracks::math::geodesy::GeoBounds;
    use eddytracks::tracks::filter::{differentiate_eddies, filter_region};
    use eddytracks::tracks::record::{EddyObservation, EddyTrack, Polarity};

    fn track(id: u32, flag: f64, steps: &[i64], lon: f64) -> EddyTrack {
        let observations = steps
            .iter()
            .map(|&step| EddyObservation {
                track: id,
                step,
                time: None,
                polarity_flag: flag,
                lon,
                lat: 42.0,
                radius_km: 20.0,
                rossby: None,
                amplitude: None,
            })
            .collect();
        EddyTrack::new(id, observations)
    }

    fn population() -> Vec<EddyTrack> {
        vec![
            track(1, 1.0, &[0, 1, 2], 4.0),
            track(2, -1.0, &[5], 5.0),
            track(3, 0.0, &[0, 1, 2, 3], 6.0),
            track(4, -1.0, &[0, 4], 7.0),
        ]
    }

    // Tests tracks are split by rotation and unclassified tracks dropped
    // Verified by treating unclassified tracks as cyclones
    #[test]
    fn test_split_by_polarity() {
        let tracks = population();
        let partition = differentiate_eddies(&tracks, 0);

        let cyclone_ids: Vec<u32> = partition.cyclones.iter().map(|t| t.id).collect();
        let anticyclone_ids: Vec<u32> = partition.anticyclones.iter().map(|t| t.id).collect();
        assert_eq!(cyclone_ids, vec![1]);
        assert_eq!(anticyclone_ids, vec![2, 4]);
        assert_eq!(partition.len(), 3);
        assert!(!partition.is_empty());
    }

    // Tests the lifetime threshold is inclusive and counts gap steps
    // Verified by using a strict comparison
    #[test]
    fn test_min_lifetime() {
        let tracks = population();

        let partition = differentiate_eddies(&tracks, 3);
        assert_eq!(partition.cyclones.len(), 1);
        let ids: Vec<u32> = partition.anticyclones.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4]);

        let strict = differentiate_eddies(&tracks, 6);
        assert!(strict.is_empty());
    }

    // Tests polarity accessor and combined iteration order
    // Verified by iterating anticyclones first
    #[test]
    fn test_of_and_all() {
        let tracks = population();
        let partition = differentiate_eddies(&tracks, 0);

        assert_eq!(partition.of(Polarity::Cyclonic).len(), 1);
        assert_eq!(partition.of(Polarity::Anticyclonic).len(), 2);
        let order: Vec<u32> = partition.all().map(|t| t.id).collect();
        assert_eq!(order, vec![1, 2, 4]);
    }

    // Tests region filtering keeps tracks with any detection inside
    // Verified by requiring every detection inside
    #[test]
    fn test_filter_region() {
        let tracks = population();
        let bounds = GeoBounds::new(4.5, 6.5, 41.0, 43.0).expect("valid bounds");

        let kept: Vec<u32> = filter_region(&tracks, &bounds).iter().map(|t| t.id).collect();
        assert_eq!(kept, vec![2, 3]);

        let partition = differentiate_eddies(filter_region(&tracks, &bounds), 0);
        assert!(partition.cyclones.is_empty());
        assert_eq!(partition.anticyclones.len(), 1);
    }
}
