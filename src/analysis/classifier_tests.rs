use super::*;

/// Helper to create the two-class table {1: 10, 2: 20}
fn create_two_class_table() -> CentroidTable {
    CentroidTable::new(vec![10.0, 20.0]).unwrap()
}

/// Centroids recorded from a full training run on the EEG dataset
fn create_recorded_table() -> CentroidTable {
    CentroidTable::new(vec![
        13040.672413793103,
        1618.5073787772312,
        1508.3789398280803,
        3533.7969295184926,
        2160.4601769911505,
    ])
    .unwrap()
}

#[test]
fn test_fit_two_classes() {
    let features = [(10.0, 1), (10.0, 1), (20.0, 2), (20.0, 2)];
    let table = fit(&features, 2).unwrap();

    assert_eq!(table.label_count(), 2);
    assert_eq!(table.get(1), Some(10.0));
    assert_eq!(table.get(2), Some(20.0));
}

#[test]
fn test_fit_averages_per_label() {
    let features = [(1.0, 2), (4.0, 1), (3.0, 2), (8.0, 1), (6.0, 1)];
    let table = fit(&features, 2).unwrap();

    assert_eq!(table.as_slice(), &[6.0, 2.0]);
}

#[test]
fn test_fit_rejects_label_above_range() {
    let features = [(10.0, 1), (20.0, 2), (30.0, 3)];
    match fit(&features, 2) {
        Err(ClassifierError::InvalidLabel { label, label_count }) => {
            assert_eq!(label, 3);
            assert_eq!(label_count, 2);
        }
        other => panic!("Expected InvalidLabel, got {:?}", other),
    }
}

#[test]
fn test_fit_rejects_label_zero() {
    let features = [(10.0, 0), (20.0, 1)];
    assert!(matches!(
        fit(&features, 1),
        Err(ClassifierError::InvalidLabel { label: 0, .. })
    ));
}

#[test]
fn test_fit_rejects_empty_class() {
    let features = [(10.0, 1), (30.0, 3)];
    assert_eq!(
        fit(&features, 3),
        Err(ClassifierError::EmptyClass { label: 2 })
    );
}

#[test]
fn test_fit_huge_label_count_reports_empty_class() {
    // Must not size a per-label table before noticing the missing classes
    assert_eq!(
        fit(&[(10.0, 1)], u32::MAX),
        Err(ClassifierError::EmptyClass { label: 2 })
    );
    assert_eq!(
        fit(&[(10.0, 2), (12.0, 1), (14.0, 4)], 1_000_000),
        Err(ClassifierError::EmptyClass { label: 3 })
    );
}

#[test]
fn test_fit_rejects_zero_label_count() {
    assert!(matches!(
        fit(&[], 0),
        Err(ClassifierError::InvalidInput { .. })
    ));
}

#[test]
fn test_fit_without_examples_is_empty_class() {
    assert_eq!(fit(&[], 1), Err(ClassifierError::EmptyClass { label: 1 }));
}

#[test]
fn test_predict_below_gate_picks_nearest() {
    let table = create_two_class_table();
    assert_eq!(predict(11.0, &table, 100.0), 1);
    assert_eq!(predict(19.0, &table, 100.0), 2);
    assert_eq!(predict(500.0, &table, 1000.0), 2);
}

#[test]
fn test_predict_at_or_above_gate_keeps_default_label() {
    let table = create_two_class_table();

    // Feature sits on centroid 2, but the gate suppresses the scan
    assert_eq!(predict(20.0, &table, 20.0), DEFAULT_LABEL);
    assert_eq!(predict(20.0, &table, 5.0), DEFAULT_LABEL);

    // Just below the gate the scan runs
    assert_eq!(predict(20.0, &table, 20.5), 2);
}

#[test]
fn test_predict_tie_keeps_lowest_label() {
    let table = CentroidTable::new(vec![0.0, 10.0, 20.0]).unwrap();

    // Equidistant from labels 2 and 3
    assert_eq!(predict(15.0, &table, 100.0), 2);
    // Equidistant from labels 1 and 2
    assert_eq!(predict(5.0, &table, 100.0), 1);
}

#[test]
fn test_predict_exhaustive_ignores_gate() {
    let table = create_two_class_table();
    assert_eq!(
        predict_with(20.0, &table, 5.0, SearchPolicy::Exhaustive),
        2
    );
    assert_eq!(predict_with(20.0, &table, 5.0, SearchPolicy::Gated), 1);
}

#[test]
fn test_predict_recorded_centroids() {
    let table = create_recorded_table();
    let gate = 3500.0;

    // High-activity windows are left at label 1 by the gate
    assert_eq!(predict(12000.0, &table, gate), 1);
    assert_eq!(predict(3600.0, &table, gate), 1);
    // Below the gate the nearest centroid wins
    assert_eq!(predict(3400.0, &table, gate), 4);
    assert_eq!(predict(1500.0, &table, gate), 3);
    assert_eq!(predict(1600.0, &table, gate), 2);
    assert_eq!(predict(2100.0, &table, gate), 5);
}

#[test]
fn test_fit_then_predict_reproduces_nearest_label() {
    let features = [
        (100.0, 1),
        (140.0, 1),
        (300.0, 2),
        (340.0, 2),
        (900.0, 3),
        (700.0, 3),
    ];
    let table = fit(&features, 3).unwrap();

    for &(feature, _) in &features {
        let expected = table
            .iter()
            .fold((DEFAULT_LABEL, f64::INFINITY), |best, (label, centroid)| {
                let d = (feature - centroid).abs();
                if d < best.1 {
                    (label, d)
                } else {
                    best
                }
            })
            .0;
        assert_eq!(predict(feature, &table, feature + 1.0), expected);
    }
}

#[test]
fn test_evaluate_perfect_scores() {
    let table = create_two_class_table();
    let report = evaluate(&[(10.0, 1), (20.0, 2)], &table, 1, 100.0).unwrap();

    assert_eq!(report.overall_accuracy.to_string(), "100.00");
    assert_eq!(report.positive_class_recall.to_string(), "100.00");
    assert_eq!(report.evaluated, 2);
    assert_eq!(report.correct, 2);
}

#[test]
fn test_evaluate_partial_scores() {
    let table = create_two_class_table();
    // (20, 1) is mispredicted as 2, (30, 2) is gated to label 1
    let pairs = [(10.0, 1), (20.0, 1), (12.0, 1), (30.0, 2), (19.0, 2), (21.0, 2)];
    let report = evaluate(&pairs, &table, 1, 25.0).unwrap();

    assert_eq!(report.correct, 4);
    assert_eq!(report.positive_total, 3);
    assert_eq!(report.positive_correct, 2);
    assert_eq!(report.overall_accuracy.to_string(), "66.67");
    assert_eq!(report.positive_class_recall.to_string(), "66.67");
}

#[test]
fn test_evaluate_missing_positive_label() {
    let table = create_two_class_table();
    assert_eq!(
        evaluate(&[(20.0, 2), (21.0, 2)], &table, 1, 100.0),
        Err(ClassifierError::DivisionByZero { label: 1 })
    );
}

#[test]
fn test_evaluate_empty_set_is_division_by_zero() {
    let table = create_two_class_table();
    assert_eq!(
        evaluate(&[], &table, 2, 100.0),
        Err(ClassifierError::DivisionByZero { label: 2 })
    );
}

#[test]
fn test_evaluate_rejects_out_of_range_labels() {
    let table = create_two_class_table();
    assert!(matches!(
        evaluate(&[(10.0, 1)], &table, 3, 100.0),
        Err(ClassifierError::InvalidLabel { label: 3, .. })
    ));
    assert!(matches!(
        evaluate(&[(10.0, 1), (10.0, 7)], &table, 1, 100.0),
        Err(ClassifierError::InvalidLabel { label: 7, .. })
    ));
}

#[test]
fn test_centroid_table_validation() {
    assert!(matches!(
        CentroidTable::new(vec![]),
        Err(ClassifierError::InvalidInput { .. })
    ));
    assert!(matches!(
        CentroidTable::new(vec![1.0, f64::NAN]),
        Err(ClassifierError::InvalidInput { .. })
    ));
    assert_eq!(create_two_class_table().get(0), None);
    assert_eq!(create_two_class_table().get(3), None);
}

#[test]
fn test_centroid_table_json_array() {
    let table = create_two_class_table();
    let json = serde_json::to_string(&table).unwrap();
    assert_eq!(json, "[10.0,20.0]");

    let parsed: CentroidTable = serde_json::from_str("[1.5, 2.5, 3.5]").unwrap();
    assert_eq!(parsed.label_count(), 3);
    assert!(serde_json::from_str::<CentroidTable>("[]").is_err());
}

#[test]
fn test_report_serializes_percentages_as_strings() {
    let table = create_two_class_table();
    let report = evaluate(&[(10.0, 1), (20.0, 2)], &table, 2, 100.0).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["overall_accuracy"], "100.00");
    assert_eq!(json["positive_class_recall"], "100.00");
    assert_eq!(json["positive_label"], 2);
}

#[test]
fn test_centroid_classifier_owns_table() {
    let features = [(10.0, 1), (10.0, 1), (20.0, 2), (20.0, 2)];
    let classifier = CentroidClassifier::train(&features, 2, 100.0, SearchPolicy::Gated).unwrap();

    assert_eq!(classifier.centroids().as_slice(), &[10.0, 20.0]);
    assert_eq!(classifier.predict(18.0), 2);
    assert_eq!(classifier.predict(150.0), DEFAULT_LABEL);

    let report = classifier.evaluate(&features, 2).unwrap();
    assert_eq!(report.overall_accuracy.to_string(), "100.00");
}
