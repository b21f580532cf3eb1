// Error types for the centroid classifier
//
// This module defines the error taxonomy for feature extraction, training and
// evaluation, with stable numeric codes for callers that report errors
// programmatically (CLI exit paths, JSON reports).

mod classifier;

pub use classifier::{log_classifier_error, ClassifierError, ClassifierErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
