// Seizure Centroid - nearest-centroid classification of EEG windows
// Windowed waveform-length features with a gated centroid classifier

// Module declarations
pub mod analysis;
pub mod config;
pub mod error;
pub mod session;

// Re-exports for convenience
pub use analysis::classifier::{
    evaluate, fit, predict, CentroidClassifier, CentroidTable, EvaluationReport, Label,
    LabeledFeature, SearchPolicy,
};
pub use analysis::features::{FeatureExtractor, FeatureKind};
pub use config::AppConfig;
pub use error::ClassifierError;

/// Install the stderr log subscriber
///
/// `log` records are forwarded through tracing. Calling this more than once
/// is a no-op.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}
