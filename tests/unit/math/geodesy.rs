//! Tests for great-circle distances and geographic bounds

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use eddytracks::EddyError;
    use eddytracks::io::configuration::KM_PER_DEGREE;
    use eddytracks::math::geodesy::{
        GeoBounds, geodist, haversine, km_to_lat_degrees, km_to_lon_degrees, net_displacement,
    };

    // Tests a degree of latitude along a meridian
    // Verified by using the mean Earth radius 6371 km
    #[test]
    fn test_haversine_one_degree_latitude() {
        assert_relative_eq!(haversine(0.0, 0.0, 0.0, 1.0), KM_PER_DEGREE, max_relative = 1e-9);
        assert_relative_eq!(KM_PER_DEGREE, 111.229_833, max_relative = 1e-6);
    }

    // Tests distances shrink with the cosine of latitude along a parallel
    // Verified by dropping the cos(lat) factor
    #[test]
    fn test_haversine_along_parallel() {
        let equator = haversine(0.0, 0.0, 1.0, 0.0);
        let sixty = haversine(0.0, 60.0, 0.001, 60.0) * 1000.0;
        assert_relative_eq!(equator, KM_PER_DEGREE, max_relative = 1e-9);
        assert_relative_eq!(sixty, KM_PER_DEGREE / 2.0, max_relative = 1e-4);
    }

    // Tests symmetry and zero distance
    // Verified by swapping the argument order in the formula
    #[test]
    fn test_haversine_symmetric() {
        let forward = haversine(4.5, 42.1, 6.2, 40.3);
        let backward = haversine(6.2, 40.3, 4.5, 42.1);
        assert_relative_eq!(forward, backward, max_relative = 1e-12);
        assert!(haversine(5.0, 42.0, 5.0, 42.0).abs() < 1e-9);
    }

    // Tests antipodal points stay finite
    // Verified by removing the clamp on the haversine term
    #[test]
    fn test_haversine_antipodal() {
        let distance = haversine(0.0, 0.0, 180.0, 0.0);
        assert!(distance.is_finite());
        assert_relative_eq!(distance, KM_PER_DEGREE * 180.0, max_relative = 1e-9);
    }

    // Tests path length sums consecutive legs
    // Verified by measuring first to last only
    #[test]
    fn test_geodist_sums_legs() {
        let distance = geodist(&[0.0, 0.0, 0.0], &[0.0, 1.0, 2.0]).expect("valid path");
        assert_relative_eq!(distance, 2.0 * KM_PER_DEGREE, max_relative = 1e-9);
    }

    // Tests short paths
    // Verified by erroring on a single point
    #[test]
    fn test_geodist_short_paths() {
        assert!(geodist(&[], &[]).expect("empty path").abs() < f64::EPSILON);
        assert!(geodist(&[3.0], &[40.0]).expect("single point").abs() < f64::EPSILON);
    }

    // Tests mismatched coordinate lists
    // Verified by zipping to the shorter list
    #[test]
    fn test_geodist_length_mismatch() {
        assert!(matches!(
            geodist(&[0.0, 1.0], &[0.0]),
            Err(EddyError::LengthMismatch { .. })
        ));
        assert!(matches!(
            net_displacement(&[0.0], &[0.0, 1.0]),
            Err(EddyError::LengthMismatch { .. })
        ));
    }

    // Tests displacement ignores the route taken
    // Verified by returning the path length
    #[test]
    fn test_net_displacement() {
        let lons = [0.0, 0.0, 0.0];
        let lats = [0.0, 1.0, 0.0];
        assert!(net_displacement(&lons, &lats).expect("valid path").abs() < 1e-9);
        assert!(net_displacement(&[], &[]).expect("empty path").abs() < f64::EPSILON);
    }

    // Tests kilometre to degree conversions
    // Verified by omitting the latitude scaling for longitude
    #[test]
    fn test_km_to_degrees() {
        assert_relative_eq!(km_to_lat_degrees(KM_PER_DEGREE), 1.0, max_relative = 1e-12);
        assert_relative_eq!(km_to_lon_degrees(KM_PER_DEGREE, 60.0), 2.0, max_relative = 1e-9);
        assert!(km_to_lon_degrees(10.0, 90.0).is_finite());
    }

    // Tests bounds validation
    // Verified by accepting inverted edges
    #[test]
    fn test_bounds_validation() {
        assert!(GeoBounds::new(0.0, 1.0, 2.0, 3.0).is_ok());
        assert!(GeoBounds::new(1.0, 0.0, 2.0, 3.0).is_err());
        assert!(GeoBounds::new(0.0, 1.0, 3.0, 3.0).is_err());
        assert!(GeoBounds::new(f64::NAN, 1.0, 2.0, 3.0).is_err());
    }

    // Tests parsing from the command-line form
    // Verified by swapping latitude and longitude order
    #[test]
    fn test_bounds_from_str() {
        let bounds: GeoBounds = "-5, 10,35,45".parse().expect("valid bounds");
        assert_eq!(
            bounds,
            GeoBounds::new(-5.0, 10.0, 35.0, 45.0).expect("valid bounds")
        );
        assert_relative_eq!(bounds.lon_span(), 15.0);
        assert_relative_eq!(bounds.lat_span(), 10.0);

        assert!("1,2,3".parse::<GeoBounds>().is_err());
        assert!("a,b,c,d".parse::<GeoBounds>().is_err());
        assert!("1,2,3,4,5".parse::<GeoBounds>().is_err());
    }

    // Tests containment is inclusive
    // Verified by using strict comparisons
    #[test]
    fn test_bounds_contains() {
        let bounds = GeoBounds::new(0.0, 2.0, 40.0, 44.0).expect("valid bounds");
        assert!(bounds.contains(1.0, 42.0));
        assert!(bounds.contains(0.0, 44.0));
        assert!(!bounds.contains(-0.1, 42.0));
        assert!(!bounds.contains(1.0, 44.1));
    }

    // Tests enclosing boxes with padding
    // Verified by ignoring the padding
    #[test]
    fn test_enclosing() {
        let bounds = GeoBounds::enclosing([(4.0, 42.0), (6.0, 41.0), (f64::NAN, 0.0)], 0.5)
            .expect("finite points");
        assert_eq!(
            bounds,
            GeoBounds::new(3.5, 6.5, 40.5, 42.5).expect("valid bounds")
        );

        assert!(GeoBounds::enclosing(std::iter::empty(), 0.5).is_none());
    }

    // Tests a single point still gives a box with area
    // Verified by allowing zero padding
    #[test]
    fn test_enclosing_single_point() {
        let bounds = GeoBounds::enclosing([(5.0, 42.0)], 0.0).expect("finite point");
        assert!(bounds.lon_span() > 0.0);
        assert!(bounds.lat_span() > 0.0);
        assert!(bounds.contains(5.0, 42.0));
    }
}
