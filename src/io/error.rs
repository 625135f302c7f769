//! Error types and path context for analysis operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all eddy analysis operations
#[derive(Debug)]
pub enum EddyError {
    /// Failed to read or write a CSV table
    Table {
        /// Path to the table
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying CSV error
        source: csv::Error,
    },

    /// Input data doesn't meet analysis requirements
    ///
    /// Raised for duplicated time steps within a track, non-finite positions,
    /// unevenly sampled velocity records and similar malformed input
    InvalidInput {
        /// Description of what's wrong with the input
        reason: String,
    },

    /// Coordinate sequences passed together have different lengths
    LengthMismatch {
        /// Name of the operation receiving the sequences
        operation: &'static str,
        /// Length of the first sequence
        left: usize,
        /// Length of the second sequence
        right: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a figure or animation to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for EddyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "Table error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidInput { reason } => {
                write!(f, "Invalid input data: {reason}")
            }
            Self::LengthMismatch {
                operation,
                left,
                right,
            } => {
                write!(
                    f,
                    "Length mismatch in {operation}: sequences have {left} and {right} elements"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for EddyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Table { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for analysis results
pub type Result<T> = std::result::Result<T, EddyError>;

/// Attaches the file path and operation to low-level I/O and CSV failures
pub trait WithPath<T> {
    /// Wrap the error with the path it occurred on
    ///
    /// # Errors
    ///
    /// Propagates the original error converted into an [`EddyError`] carrying `path`
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| EddyError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

impl<T> WithPath<T> for std::result::Result<T, csv::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| EddyError::Table {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

impl From<std::io::Error> for EddyError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> EddyError {
    EddyError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> EddyError {
    EddyError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create an invalid input data error
pub fn invalid_data(reason: &impl ToString) -> EddyError {
    EddyError::InvalidInput {
        reason: reason.to_string(),
    }
}
