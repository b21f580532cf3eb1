// Types module - Data structures for window features

use serde::{Deserialize, Serialize};

/// Per-window reduction applied by the FeatureExtractor
///
/// Every kind reduces the successive differences of a window to one scalar,
/// so all of them are zero for a constant window and unchanged when the
/// window is reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Σ |s[k+1] - s[k]| (waveform length)
    #[default]
    AbsoluteDifference,

    /// Σ (s[k+1] - s[k])²
    SquaredDifference,

    /// sqrt(Σ (s[k+1] - s[k])²)
    RootSquaredDifference,
}
