//! Configuration management for classification runs
//!
//! This module provides runtime configuration loading from JSON files, so
//! window size, gate threshold and the train/test split can be adjusted
//! without recompilation. A configuration is built explicitly by the caller
//! and lives for one run; nothing here is process-global.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::classifier::{Label, SearchPolicy};
use crate::analysis::features::{FeatureKind, DEFAULT_WINDOW_SIZE};

/// Upper bound on `classifier.label_count`
pub const MAX_LABEL_COUNT: u32 = 1024;

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub split: SplitConfig,
}

/// Feature extraction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Samples per window
    pub window_size: usize,
    /// Per-window reduction
    pub kind: FeatureKind,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            kind: FeatureKind::AbsoluteDifference,
        }
    }
}

/// Centroid classifier parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Number of labels K (labels are 1..=K)
    pub label_count: u32,
    /// Features at or above this value skip the centroid scan
    pub gate_threshold: f64,
    /// Label whose recall is reported
    pub positive_label: Label,
    /// Centroid scan policy
    pub search: SearchPolicy,
    /// Fixed centroids in label order; when set, training is skipped
    pub centroids: Option<Vec<f64>>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            label_count: 5,
            gate_threshold: 3500.0,
            positive_label: 1,
            search: SearchPolicy::Gated,
            centroids: None,
        }
    }
}

/// Window caps applied to the train and test streams
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Use at most this many leading training windows
    pub train_windows: Option<usize>,
    /// Use at most this many leading test windows
    pub test_windows: Option<usize>,
}

impl AppConfig {
    /// Load configuration from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The loaded configuration, or the defaults if the file doesn't exist
    /// or its JSON is invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                config
            }
            Err(err) => {
                log::warn!(
                    "[Config] Failed to load config file {:?}: {:#}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load and validate configuration, failing on any error
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if self.features.window_size < 2 {
            bail!(
                "features.window_size must be at least 2 (got {})",
                self.features.window_size
            );
        }
        if self.classifier.label_count == 0 || self.classifier.label_count > MAX_LABEL_COUNT {
            bail!(
                "classifier.label_count must be in [1, {}] (got {})",
                MAX_LABEL_COUNT,
                self.classifier.label_count
            );
        }
        if self.classifier.positive_label == 0
            || self.classifier.positive_label > self.classifier.label_count
        {
            bail!(
                "classifier.positive_label {} out of range [1, {}]",
                self.classifier.positive_label,
                self.classifier.label_count
            );
        }
        if !self.classifier.gate_threshold.is_finite() {
            bail!("classifier.gate_threshold must be finite");
        }
        if let Some(centroids) = &self.classifier.centroids {
            if centroids.len() != self.classifier.label_count as usize {
                bail!(
                    "classifier.centroids has {} entries, expected {}",
                    centroids.len(),
                    self.classifier.label_count
                );
            }
        }
        Ok(())
    }
}
