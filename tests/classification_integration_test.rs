//! Integration tests for the extraction → training → evaluation pipeline
//!
//! These tests drive the public API the way an external data loader would:
//! a flat sample stream plus one label per window.

use seizure_centroid::analysis::pair_with_labels;
use seizure_centroid::error::{ClassifierError, ErrorCode};
use seizure_centroid::{evaluate, fit, predict, FeatureExtractor, LabeledFeature};

const WINDOW: usize = 178;

/// Window alternating between 0 and `step`; its waveform length is (WINDOW - 1) * step
fn alternating_window(step: f64) -> Vec<f64> {
    (0..WINDOW)
        .map(|i| if i % 2 == 0 { 0.0 } else { step })
        .collect()
}

fn build_stream(steps: &[f64]) -> Vec<f64> {
    steps.iter().flat_map(|&step| alternating_window(step)).collect()
}

#[test]
fn test_full_pipeline_on_eeg_sized_windows() {
    let extractor = FeatureExtractor::new(WINDOW).unwrap();

    // Label 1 windows are high-activity, labels 2..=3 progressively quieter
    let train_samples = build_stream(&[80.0, 90.0, 10.0, 12.0, 20.0, 22.0]);
    let train_labels = [1, 1, 2, 2, 3, 3];
    let train: Vec<LabeledFeature> =
        pair_with_labels(extractor.extract(&train_samples).unwrap(), &train_labels).unwrap();

    let centroids = fit(&train, 3).unwrap();
    assert_eq!(centroids.get(1), Some(85.0 * 177.0));
    assert_eq!(centroids.get(2), Some(11.0 * 177.0));
    assert_eq!(centroids.get(3), Some(21.0 * 177.0));

    let test_samples = build_stream(&[100.0, 11.0, 19.0, 60.0]);
    let test_labels = [1, 2, 3, 1];
    let test =
        pair_with_labels(extractor.extract(&test_samples).unwrap(), &test_labels).unwrap();

    // Gate just above the quiet classes: high-activity windows default to label 1
    let gate = 30.0 * 177.0;
    let report = evaluate(&test, &centroids, 1, gate).unwrap();
    assert_eq!(report.overall_accuracy.to_string(), "100.00");
    assert_eq!(report.positive_class_recall.to_string(), "100.00");

    // A gate below every feature leaves every prediction at label 1
    let report = evaluate(&test, &centroids, 1, 0.0).unwrap();
    assert_eq!(report.overall_accuracy.to_string(), "50.00");
    assert_eq!(report.positive_class_recall.to_string(), "100.00");
}

#[test]
fn test_predict_matches_nearest_centroid_below_gate() {
    let train = [(10.0, 1), (10.0, 1), (20.0, 2), (20.0, 2)];
    let centroids = fit(&train, 2).unwrap();

    for &(feature, label) in &train {
        assert_eq!(predict(feature, &centroids, feature + 1.0), label);
    }
}

#[test]
fn test_errors_surface_with_codes() {
    let extractor = FeatureExtractor::new(WINDOW).unwrap();
    let err = extractor.extract(&vec![0.0; WINDOW + 1]).unwrap_err();
    assert_eq!(err.code(), 3001);

    let err = fit(&[(1.0, 3)], 2).unwrap_err();
    assert_eq!(
        err,
        ClassifierError::InvalidLabel {
            label: 3,
            label_count: 2
        }
    );
    assert_eq!(err.code(), 3002);

    let err = fit(&[(1.0, 1)], 2).unwrap_err();
    assert_eq!(err.code(), 3003);

    let centroids = fit(&[(10.0, 1), (20.0, 2)], 2).unwrap();
    let err = evaluate(&[(20.0, 2)], &centroids, 1, 100.0).unwrap_err();
    assert_eq!(err.code(), 3004);
}
