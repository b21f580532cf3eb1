// Classifier - nearest-centroid classification of window features
//
// Training averages the window feature per class label into a CentroidTable.
// Inference assigns a feature to the label of the closest centroid, subject
// to a gate: the centroid scan only runs for features below the gate
// threshold, otherwise the first label is returned unchanged.
//
// Evaluation reports overall accuracy and recall of one positive label as
// percentages with two decimal digits.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::ClassifierError;

/// Class label in [1, K]
pub type Label = u32;

/// Window feature paired with its class label
pub type LabeledFeature = (f64, Label);

/// Label returned when the gate suppresses the centroid scan
pub const DEFAULT_LABEL: Label = 1;

/// Centroid scan policy used by `predict_with`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPolicy {
    /// Scan centroids only when the feature is below the gate threshold
    #[default]
    Gated,
    /// Always scan every centroid (gate threshold ignored)
    Exhaustive,
}

/// Mean window feature per label
///
/// Entry `i` holds the centroid of label `i + 1`. Serialized as a plain JSON
/// array of centroids in label order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CentroidTable {
    centroids: Vec<f64>,
}

impl CentroidTable {
    /// Build a table from centroids listed in label order
    ///
    /// # Errors
    /// `InvalidInput` when the list is empty or contains a non-finite value.
    pub fn new(centroids: Vec<f64>) -> Result<Self, ClassifierError> {
        if centroids.is_empty() {
            return Err(ClassifierError::invalid_input(
                "centroid table needs at least one label",
            ));
        }
        if let Some(pos) = centroids.iter().position(|c| !c.is_finite()) {
            return Err(ClassifierError::invalid_input(format!(
                "centroid for label {} is not finite ({})",
                pos + 1,
                centroids[pos]
            )));
        }
        Ok(Self { centroids })
    }

    /// Number of labels K
    pub fn label_count(&self) -> u32 {
        self.centroids.len() as u32
    }

    /// Centroid of `label`, if it is in [1, K]
    pub fn get(&self, label: Label) -> Option<f64> {
        let index = (label as usize).checked_sub(1)?;
        self.centroids.get(index).copied()
    }

    /// (label, centroid) pairs in ascending label order
    pub fn iter(&self) -> impl Iterator<Item = (Label, f64)> + '_ {
        self.centroids
            .iter()
            .enumerate()
            .map(|(i, &centroid)| (i as Label + 1, centroid))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.centroids
    }
}

impl TryFrom<Vec<f64>> for CentroidTable {
    type Error = ClassifierError;

    fn try_from(centroids: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(centroids)
    }
}

impl From<CentroidTable> for Vec<f64> {
    fn from(table: CentroidTable) -> Self {
        table.centroids
    }
}

/// Percentage rendered with two decimal digits ("87.50")
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Percentage {
    fn from_counts(numerator: usize, denominator: usize) -> Self {
        Percentage(numerator as f64 / denominator as f64 * 100.0)
    }

    /// Raw percentage value (0.0-100.0)
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Aggregate metrics of one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    /// Number of evaluated pairs
    pub evaluated: usize,
    /// Pairs whose prediction matched the true label
    pub correct: usize,
    /// Label treated as the positive class
    pub positive_label: Label,
    /// Pairs whose true label is the positive label
    pub positive_total: usize,
    /// Positive pairs predicted as the positive label
    pub positive_correct: usize,
    /// correct / evaluated
    pub overall_accuracy: Percentage,
    /// positive_correct / positive_total
    pub positive_class_recall: Percentage,
}

#[derive(Default)]
struct Tally {
    evaluated: usize,
    correct: usize,
    positive_total: usize,
    positive_correct: usize,
}

fn distance(a: f64, b: f64) -> f64 {
    (a - b).abs()
}

fn check_label(label: Label, label_count: u32) -> Result<(), ClassifierError> {
    if label == 0 || label > label_count {
        return Err(ClassifierError::InvalidLabel { label, label_count });
    }
    Ok(())
}

/// Average the features of each label into a CentroidTable
///
/// # Arguments
/// * `features` - (feature, label) pairs
/// * `label_count` - Number of labels K (labels are 1..=K)
///
/// # Errors
/// * `InvalidInput` - `label_count` is 0
/// * `InvalidLabel` - a label lies outside [1, K]
/// * `EmptyClass` - some label in [1, K] has no examples (lowest such label)
pub fn fit(features: &[LabeledFeature], label_count: u32) -> Result<CentroidTable, ClassifierError> {
    if label_count == 0 {
        return Err(ClassifierError::invalid_input("label count must be at least 1"));
    }

    for &(_, label) in features {
        check_label(label, label_count)?;
    }

    // Fewer examples than labels: some class is empty, report it before
    // sizing the per-label table
    if features.len() < label_count as usize {
        let present: BTreeSet<Label> = features.iter().map(|&(_, label)| label).collect();
        let label = (1..=label_count)
            .find(|label| !present.contains(label))
            .unwrap_or(label_count);
        return Err(ClassifierError::EmptyClass { label });
    }

    let sums = features.iter().fold(
        vec![(0.0_f64, 0_usize); label_count as usize],
        |mut sums, &(feature, label)| {
            let slot = &mut sums[label as usize - 1];
            slot.0 += feature;
            slot.1 += 1;
            sums
        },
    );

    let centroids = sums
        .iter()
        .enumerate()
        .map(|(i, &(sum, count))| {
            let label = i as Label + 1;
            if count == 0 {
                return Err(ClassifierError::EmptyClass { label });
            }
            let centroid = sum / count as f64;
            tracing::debug!(
                "[Classifier] label {}: {} examples, feature sum {}, centroid {}",
                label,
                count,
                sum,
                centroid
            );
            Ok(centroid)
        })
        .collect::<Result<Vec<f64>, ClassifierError>>()?;

    CentroidTable::new(centroids)
}

/// Predict a label with the gated centroid scan
///
/// The prediction starts at `DEFAULT_LABEL`. Only when `feature` is below
/// `gate_threshold` are all centroids scanned for the smallest absolute
/// distance; ties keep the lowest label. Features at or above the gate keep
/// the default label.
pub fn predict(feature: f64, centroids: &CentroidTable, gate_threshold: f64) -> Label {
    predict_with(feature, centroids, gate_threshold, SearchPolicy::Gated)
}

/// Predict a label with an explicit scan policy
pub fn predict_with(
    feature: f64,
    centroids: &CentroidTable,
    gate_threshold: f64,
    policy: SearchPolicy,
) -> Label {
    let mut predicted = DEFAULT_LABEL;

    let scan = match policy {
        SearchPolicy::Gated => feature < gate_threshold,
        SearchPolicy::Exhaustive => true,
    };

    if scan {
        let mut min_distance = centroids
            .get(DEFAULT_LABEL)
            .map_or(f64::INFINITY, |c| distance(feature, c));
        for (label, centroid) in centroids.iter() {
            let d = distance(feature, centroid);
            if d < min_distance {
                min_distance = d;
                predicted = label;
            }
        }
    }

    predicted
}

/// Evaluate the gated classifier on held-out pairs
///
/// # Errors
/// * `InvalidLabel` - `positive_label` or a test label lies outside [1, K]
/// * `DivisionByZero` - `positive_label` never occurs in `test_pairs`
pub fn evaluate(
    test_pairs: &[LabeledFeature],
    centroids: &CentroidTable,
    positive_label: Label,
    gate_threshold: f64,
) -> Result<EvaluationReport, ClassifierError> {
    evaluate_with(
        test_pairs,
        centroids,
        positive_label,
        gate_threshold,
        SearchPolicy::Gated,
    )
}

/// Evaluate with an explicit scan policy
pub fn evaluate_with(
    test_pairs: &[LabeledFeature],
    centroids: &CentroidTable,
    positive_label: Label,
    gate_threshold: f64,
    policy: SearchPolicy,
) -> Result<EvaluationReport, ClassifierError> {
    let label_count = centroids.label_count();
    check_label(positive_label, label_count)?;

    let tally = test_pairs
        .iter()
        .try_fold(Tally::default(), |mut tally, &(feature, label)| {
            check_label(label, label_count)?;
            let predicted = predict_with(feature, centroids, gate_threshold, policy);

            tally.evaluated += 1;
            if predicted == label {
                tally.correct += 1;
            }
            if label == positive_label {
                tally.positive_total += 1;
                if predicted == positive_label {
                    tally.positive_correct += 1;
                }
            }
            Ok::<_, ClassifierError>(tally)
        })?;

    if tally.positive_total == 0 {
        return Err(ClassifierError::DivisionByZero {
            label: positive_label,
        });
    }

    let report = EvaluationReport {
        evaluated: tally.evaluated,
        correct: tally.correct,
        positive_label,
        positive_total: tally.positive_total,
        positive_correct: tally.positive_correct,
        overall_accuracy: Percentage::from_counts(tally.correct, tally.evaluated),
        positive_class_recall: Percentage::from_counts(
            tally.positive_correct,
            tally.positive_total,
        ),
    };

    tracing::info!(
        "[Classifier] evaluated {} windows: accuracy {}%, label {} recall {}%",
        report.evaluated,
        report.overall_accuracy,
        positive_label,
        report.positive_class_recall
    );

    Ok(report)
}

/// CentroidClassifier owns a trained CentroidTable and its inference settings
///
/// The table is built once by `train` and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidClassifier {
    centroids: CentroidTable,
    gate_threshold: f64,
    policy: SearchPolicy,
}

impl CentroidClassifier {
    /// Wrap an existing centroid table
    pub fn new(centroids: CentroidTable, gate_threshold: f64, policy: SearchPolicy) -> Self {
        Self {
            centroids,
            gate_threshold,
            policy,
        }
    }

    /// Fit centroids from training pairs
    pub fn train(
        features: &[LabeledFeature],
        label_count: u32,
        gate_threshold: f64,
        policy: SearchPolicy,
    ) -> Result<Self, ClassifierError> {
        let centroids = fit(features, label_count)?;
        Ok(Self::new(centroids, gate_threshold, policy))
    }

    pub fn centroids(&self) -> &CentroidTable {
        &self.centroids
    }

    pub fn gate_threshold(&self) -> f64 {
        self.gate_threshold
    }

    pub fn policy(&self) -> SearchPolicy {
        self.policy
    }

    pub fn predict(&self, feature: f64) -> Label {
        predict_with(feature, &self.centroids, self.gate_threshold, self.policy)
    }

    pub fn evaluate(
        &self,
        test_pairs: &[LabeledFeature],
        positive_label: Label,
    ) -> Result<EvaluationReport, ClassifierError> {
        evaluate_with(
            test_pairs,
            &self.centroids,
            positive_label,
            self.gate_threshold,
            self.policy,
        )
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
