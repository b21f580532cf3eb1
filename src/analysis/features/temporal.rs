// Temporal module - Time-domain window reductions
//
// These reductions operate on successive differences of a window's samples.
// Large values indicate a rapidly changing (high activity) signal, small
// values a flat one.

use super::types::FeatureKind;

/// Compute waveform length
///
/// Formula: WL = Σ_{k=0}^{N-2} |x[k+1] - x[k]|
///
/// # Arguments
/// * `window` - Time-domain samples of one window
///
/// # Returns
/// Sum of absolute successive differences (0.0 for fewer than 2 samples)
pub fn waveform_length(window: &[f64]) -> f64 {
    window.windows(2).map(|pair| (pair[1] - pair[0]).abs()).sum()
}

/// Compute difference energy
///
/// Formula: E = Σ_{k=0}^{N-2} (x[k+1] - x[k])²
pub fn difference_energy(window: &[f64]) -> f64 {
    window
        .windows(2)
        .map(|pair| {
            let delta = pair[1] - pair[0];
            delta * delta
        })
        .sum()
}

/// Reduce a window with the selected feature kind
pub fn reduce(window: &[f64], kind: FeatureKind) -> f64 {
    match kind {
        FeatureKind::AbsoluteDifference => waveform_length(window),
        FeatureKind::SquaredDifference => difference_energy(window),
        FeatureKind::RootSquaredDifference => difference_energy(window).sqrt(),
    }
}
