//! Session runner for the CLI harness.
//!
//! A session holds a training stream and a test stream, each a flat list of
//! samples plus one label per window. The runner extracts features, fits (or
//! loads) the centroid table and evaluates the held-out windows. Each run is
//! independent; nothing carries over between runs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::classifier::{
    CentroidClassifier, CentroidTable, EvaluationReport, Label, LabeledFeature,
};
use crate::analysis::features::FeatureExtractor;
use crate::analysis::pair_with_labels;
use crate::analysis::threshold::{self, ThresholdReport};
use crate::config::AppConfig;
use crate::error::ClassifierError;

/// Samples of consecutive windows with one label per window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledStream {
    pub samples: Vec<f64>,
    pub labels: Vec<Label>,
}

/// Training and held-out streams of one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub train: LabeledStream,
    pub test: LabeledStream,
}

impl SessionData {
    /// Load a session from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }
}

/// Outcome of a full train → evaluate run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub centroids: CentroidTable,
    pub evaluation: EvaluationReport,
    /// Minimum-positive threshold detector on the same split; absent when
    /// the training stream has no positive windows
    pub threshold: Option<ThresholdReport>,
}

/// Drives extraction, training and evaluation for one configuration
pub struct SessionRunner {
    config: AppConfig,
}

impl SessionRunner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Train on `data.train` and evaluate on `data.test`
    pub fn run(&self, data: &SessionData) -> Result<SessionReport, ClassifierError> {
        let train_windows = self.config.split.train_windows;
        let train = if self.config.classifier.centroids.is_some() {
            // Fixed centroids: the training stream only feeds the threshold detector
            self.labeled_pairs(&data.train, train_windows)
                .unwrap_or_else(|err| {
                    tracing::warn!("[Session] Ignoring unusable training stream: {}", err);
                    Vec::new()
                })
        } else {
            self.labeled_pairs(&data.train, train_windows)?
        };
        let test = self.labeled_pairs(&data.test, self.config.split.test_windows)?;

        let classifier = self.classifier(&train)?;
        let evaluation = classifier.evaluate(&test, self.config.classifier.positive_label)?;
        let threshold = self.threshold_report(&train, &test);

        Ok(SessionReport {
            centroids: classifier.centroids().clone(),
            evaluation,
            threshold,
        })
    }

    /// Fit the centroid table on `data.train` only
    pub fn fit(&self, data: &SessionData) -> Result<CentroidTable, ClassifierError> {
        let train = self.labeled_pairs(&data.train, self.config.split.train_windows)?;
        Ok(self.classifier(&train)?.centroids().clone())
    }

    /// Run the minimum-positive threshold detector alone
    pub fn threshold(&self, data: &SessionData) -> Result<ThresholdReport, ClassifierError> {
        let positive_label = self.config.classifier.positive_label;
        let train = self.labeled_pairs(&data.train, self.config.split.train_windows)?;
        let test = self.labeled_pairs(&data.test, self.config.split.test_windows)?;

        let learned = threshold::learn_threshold(&train, positive_label)?;
        Ok(threshold::analyze(&test, learned, positive_label))
    }

    fn classifier(&self, train: &[LabeledFeature]) -> Result<CentroidClassifier, ClassifierError> {
        let settings = &self.config.classifier;
        match &settings.centroids {
            Some(centroids) => {
                let table = CentroidTable::new(centroids.clone())?;
                if table.label_count() != settings.label_count {
                    return Err(ClassifierError::InvalidInput {
                        reason: format!(
                            "configured table has {} centroids, expected {}",
                            table.label_count(),
                            settings.label_count
                        ),
                    });
                }
                tracing::info!("[Session] Using {} configured centroids", table.label_count());
                Ok(CentroidClassifier::new(
                    table,
                    settings.gate_threshold,
                    settings.search,
                ))
            }
            None => {
                tracing::info!("[Session] Fitting centroids on {} windows", train.len());
                CentroidClassifier::train(
                    train,
                    settings.label_count,
                    settings.gate_threshold,
                    settings.search,
                )
            }
        }
    }

    fn threshold_report(
        &self,
        train: &[LabeledFeature],
        test: &[LabeledFeature],
    ) -> Option<ThresholdReport> {
        let positive_label = self.config.classifier.positive_label;
        match threshold::learn_threshold(train, positive_label) {
            Ok(learned) => Some(threshold::analyze(test, learned, positive_label)),
            Err(err) => {
                tracing::warn!("[Session] Skipping threshold detector: {}", err);
                None
            }
        }
    }

    /// Extract features of the first `cap` windows and pair them with labels
    fn labeled_pairs(
        &self,
        stream: &LabeledStream,
        cap: Option<usize>,
    ) -> Result<Vec<LabeledFeature>, ClassifierError> {
        let extractor =
            FeatureExtractor::with_kind(self.config.features.window_size, self.config.features.kind)?;

        let (samples, labels) = match cap {
            Some(windows) => {
                let sample_end = windows
                    .saturating_mul(extractor.window_size())
                    .min(stream.samples.len());
                let label_end = windows.min(stream.labels.len());
                (&stream.samples[..sample_end], &stream.labels[..label_end])
            }
            None => (stream.samples.as_slice(), stream.labels.as_slice()),
        };

        pair_with_labels(extractor.extract(samples)?, labels)
    }
}
