//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use eddytracks::EddyError;
    use eddytracks::io::error::{WithPath, computation_error, invalid_data, invalid_parameter};
    use std::error::Error;
    use std::path::{Path, PathBuf};

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = EddyError::FileSystem {
            path: "/tmp/eddy_tracks.csv".into(),
            operation: "read",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("/tmp/eddy_tracks.csv"));
    }

    // Tests errors without an underlying cause
    // Verified by returning a source for every variant
    #[test]
    fn test_errors_without_source() {
        assert!(invalid_data(&"bad row").source().is_none());
        assert!(computation_error("fft", &"empty").source().is_none());
        assert!(
            EddyError::LengthMismatch {
                operation: "geodist",
                left: 1,
                right: 2
            }
            .source()
            .is_none()
        );
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("overlap", &1.5, &"must lie in [0, 1)");

        let message = error.to_string();
        assert!(message.contains("overlap"));
        assert!(message.contains("1.5"));
        assert!(message.contains("must lie in [0, 1)"));
    }

    // Tests LengthMismatch formatting
    // Verified by printing only one length
    #[test]
    fn test_length_mismatch_error() {
        let error = EddyError::LengthMismatch {
            operation: "fill_coords",
            left: 4,
            right: 3,
        };

        let message = error.to_string();
        assert!(message.contains("fill_coords"));
        assert!(message.contains("4 and 3"));
    }

    // Tests helper constructors pick the right variant
    // Verified by mapping every helper to Computation
    #[test]
    fn test_helper_variants() {
        assert!(matches!(
            invalid_data(&"duplicate step"),
            EddyError::InvalidInput { reason } if reason == "duplicate step"
        ));
        assert!(matches!(
            computation_error("rotary_spectrum", &"no segments"),
            EddyError::Computation { operation: "rotary_spectrum", .. }
        ));
    }

    // Tests malformed velocity records read as input errors, not track errors
    // Verified by naming tracks in every input message
    #[test]
    fn test_invalid_input_message() {
        let message = invalid_data(&"velocity sample times must increase").to_string();
        assert_eq!(
            message,
            "Invalid input data: velocity sample times must increase"
        );
        assert!(!message.to_lowercase().contains("track"));
    }

    // Tests CSV failures keep their path
    // Verified by converting to FileSystem
    #[test]
    fn test_csv_with_path() {
        let result: std::result::Result<(), csv::Error> =
            Err(csv::Error::from(std::io::Error::other("broken pipe")));

        match result.with_path(Path::new("summary.csv"), "write table row") {
            Err(error @ EddyError::Table { .. }) => {
                assert!(error.source().is_some());
                let message = error.to_string();
                assert!(message.contains("summary.csv"));
                assert!(message.contains("write table row"));
            }
            other => unreachable!("Expected Table error, got {other:?}"),
        }
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        let error = EddyError::ImageExport {
            path: PathBuf::from("/figures/lifetime_histogram.png"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("lifetime_histogram.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    // Tests bare io::Error conversion
    // Verified by dropping the source
    #[test]
    fn test_from_io_error() {
        let error: EddyError = std::io::Error::other("disk full").into();
        assert!(matches!(error, EddyError::FileSystem { .. }));
        assert!(error.to_string().contains("disk full"));
    }
}
