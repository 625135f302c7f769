//! Tests for velocity record loading and sampling checks

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use eddytracks::EddyError;
    use eddytracks::io::series::{VelocitySeries, load_velocity_series, read_velocity_series};
    use std::path::Path;

    fn read(table: &str) -> eddytracks::Result<VelocitySeries> {
        read_velocity_series(table.as_bytes(), Path::new("velocity.csv"))
    }

    // Tests rows are sorted by time
    // Verified by keeping input order
    #[test]
    fn test_sorted_by_time() {
        let series = read("time_hours,u,v\n2,0.3,0.1\n0,0.1,-0.1\n1,0.2,0.0\n").expect("series");

        assert_eq!(series.times_hours, vec![0.0, 1.0, 2.0]);
        assert_eq!(series.u, vec![0.1, 0.2, 0.3]);
        assert_eq!(series.v, vec![-0.1, 0.0, 0.1]);
        assert_eq!(series.len(), 3);
        assert_relative_eq!(series.duration_hours(), 2.0);
    }

    // Tests the short time header
    // Verified by removing the alias
    #[test]
    fn test_time_alias() {
        let series = read("time, u, v\n0, 0.1, 0.2\n0.5, 0.1, 0.2\n").expect("series");
        assert_relative_eq!(series.sample_interval_hours().expect("uniform"), 0.5);
    }

    // Tests uneven sampling is rejected
    // Verified by checking only the first interval
    #[test]
    fn test_uneven_sampling() {
        let series = read("time_hours,u,v\n0,0,0\n1,0,0\n2,0,0\n3.5,0,0\n").expect("series");
        assert!(matches!(
            series.sample_interval_hours(),
            Err(EddyError::InvalidInput { .. })
        ));
    }

    // Tests small rounding in timestamps is tolerated
    // Verified by requiring exact equality
    #[test]
    fn test_sampling_tolerance() {
        let series = VelocitySeries::new(
            vec![0.0, 1.0, 2.000_000_000_1, 3.0],
            vec![0.0; 4],
            vec![0.0; 4],
        )
        .expect("series");
        assert_relative_eq!(series.sample_interval_hours().expect("uniform"), 1.0);
    }

    // Tests records too short or repeating a time
    // Verified by returning a zero interval
    #[test]
    fn test_degenerate_sampling() {
        let single = read("time_hours,u,v\n0,0.1,0.1\n").expect("series");
        assert!(single.sample_interval_hours().is_err());

        let repeated = read("time_hours,u,v\n1,0.1,0.1\n1,0.2,0.2\n").expect("series");
        assert!(repeated.sample_interval_hours().is_err());

        let empty = read("time_hours,u,v\n").expect("series");
        assert!(empty.is_empty());
        assert!(empty.duration_hours().abs() < f64::EPSILON);
    }

    // Tests non-finite velocities
    // Verified by skipping the finiteness check
    #[test]
    fn test_non_finite_rejected() {
        assert!(read("time_hours,u,v\n0,NaN,0\n1,0,0\n").is_err());
        assert!(VelocitySeries::new(vec![0.0], vec![f64::INFINITY], vec![0.0]).is_err());
    }

    // Tests mismatched components
    // Verified by truncating to the shortest component
    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            VelocitySeries::new(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0]),
            Err(EddyError::LengthMismatch {
                left: 2,
                right: 1,
                ..
            })
        ));
    }

    // Tests loading from disk and missing files
    // Verified by reading from the wrong path
    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("velocity.csv");
        std::fs::write(&path, "time_hours,u,v\n0,0.1,0.2\n1,0.3,0.4\n").expect("write record");

        let series = load_velocity_series(&path).expect("series");
        assert_eq!(series.len(), 2);

        assert!(matches!(
            load_velocity_series(&dir.path().join("missing.csv")),
            Err(EddyError::FileSystem { .. })
        ));
    }
}
