// Threshold detector - one-class detection by minimum positive feature
//
// Training keeps the smallest feature seen among positive-label windows.
// Any window whose feature reaches that threshold is flagged positive.

use serde::{Deserialize, Serialize};

use super::classifier::{Label, LabeledFeature};
use crate::error::ClassifierError;

/// Counts of flagged windows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdReport {
    /// Threshold the windows were compared against
    pub threshold: f64,
    /// Number of analyzed windows
    pub evaluated: usize,
    /// Flagged windows whose label is the positive label
    pub true_positives: usize,
    /// Flagged windows with any other label
    pub false_positives: usize,
}

/// Smallest feature among windows labelled `positive_label`
///
/// # Errors
/// `EmptyClass` when no pair carries `positive_label`.
pub fn learn_threshold(
    pairs: &[LabeledFeature],
    positive_label: Label,
) -> Result<f64, ClassifierError> {
    pairs
        .iter()
        .filter(|&&(_, label)| label == positive_label)
        .map(|&(feature, _)| feature)
        .fold(None, |min: Option<f64>, feature| {
            Some(min.map_or(feature, |m| m.min(feature)))
        })
        .ok_or(ClassifierError::EmptyClass {
            label: positive_label,
        })
}

/// Flag windows with `feature >= threshold` and count hits per label
pub fn analyze(pairs: &[LabeledFeature], threshold: f64, positive_label: Label) -> ThresholdReport {
    let (true_positives, false_positives) = pairs
        .iter()
        .filter(|&&(feature, _)| feature >= threshold)
        .fold((0, 0), |(tp, fp), &(_, label)| {
            if label == positive_label {
                (tp + 1, fp)
            } else {
                (tp, fp + 1)
            }
        });

    tracing::debug!(
        "[Threshold] threshold {}: {} true positives, {} false positives over {} windows",
        threshold,
        true_positives,
        false_positives,
        pairs.len()
    );

    ThresholdReport {
        threshold,
        evaluated: pairs.len(),
        true_positives,
        false_positives,
    }
}
