// Classifier error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Classifier error code constants
///
/// Single source of truth for the numeric codes reported by the CLI.
///
/// Error code range: 3001-3004
pub struct ClassifierErrorCodes {}

impl ClassifierErrorCodes {
    /// Sample stream is misaligned with the window size, or window size < 2
    pub const INVALID_INPUT: i32 = 3001;

    /// Label outside the declared range [1, K]
    pub const INVALID_LABEL: i32 = 3002;

    /// A declared label has no training examples
    pub const EMPTY_CLASS: i32 = 3003;

    /// Positive label never occurs in the evaluation set
    pub const DIVISION_BY_ZERO: i32 = 3004;
}

/// Log a classifier error with structured context
///
/// This function logs classifier errors with structured fields including:
/// - error_code: Numeric error code for programmatic handling
/// - component: The component where the error occurred
/// - message: Human-readable error message
/// - context: Additional contextual information
pub fn log_classifier_error(err: &ClassifierError, context: &str) {
    error!(
        "Classifier error in {}: code={}, component=CentroidClassifier, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Classifier-related errors
///
/// All variants are fatal to the current training/evaluation run.
///
/// Error code ranges: 3001-3004
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// Malformed input (window alignment, window size, mismatched lengths)
    InvalidInput { reason: String },

    /// Label outside [1, label_count]
    InvalidLabel { label: u32, label_count: u32 },

    /// No training examples for a declared label
    EmptyClass { label: u32 },

    /// No examples of the positive label in the evaluation set
    DivisionByZero { label: u32 },
}

impl ClassifierError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        ClassifierError::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl ErrorCode for ClassifierError {
    fn code(&self) -> i32 {
        match self {
            ClassifierError::InvalidInput { .. } => ClassifierErrorCodes::INVALID_INPUT,
            ClassifierError::InvalidLabel { .. } => ClassifierErrorCodes::INVALID_LABEL,
            ClassifierError::EmptyClass { .. } => ClassifierErrorCodes::EMPTY_CLASS,
            ClassifierError::DivisionByZero { .. } => ClassifierErrorCodes::DIVISION_BY_ZERO,
        }
    }

    fn message(&self) -> String {
        match self {
            ClassifierError::InvalidInput { reason } => format!("Invalid input: {}", reason),
            ClassifierError::InvalidLabel { label, label_count } => {
                format!("Label {} out of range [1, {}]", label, label_count)
            }
            ClassifierError::EmptyClass { label } => {
                format!("No training examples for label {}", label)
            }
            ClassifierError::DivisionByZero { label } => {
                format!(
                    "Positive label {} never occurs in the evaluation set",
                    label
                )
            }
        }
    }
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClassifierError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ClassifierError {}
