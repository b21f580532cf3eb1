// FeatureExtractor - windowed feature extraction for seizure classification
//
// This module splits a flat sample stream into consecutive non-overlapping
// windows and reduces each window to a single scalar feature.
//
// Module organization:
// - types: Data structures (FeatureKind)
// - temporal: Time-domain reductions (waveform length, difference energy)
// - mod.rs: Coordinator (FeatureExtractor, WindowFeatures)

mod temporal;
mod types;

pub use temporal::{difference_energy, waveform_length};
pub use types::FeatureKind;

use std::slice::ChunksExact;

use crate::error::ClassifierError;

/// Window length of the recorded EEG dataset (one second of samples)
pub const DEFAULT_WINDOW_SIZE: usize = 178;

/// FeatureExtractor reduces fixed-size windows of a sample stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureExtractor {
    window_size: usize,
    kind: FeatureKind,
}

impl FeatureExtractor {
    /// Create a FeatureExtractor using the waveform-length feature
    ///
    /// # Arguments
    /// * `window_size` - Samples per window (must be at least 2)
    pub fn new(window_size: usize) -> Result<Self, ClassifierError> {
        Self::with_kind(window_size, FeatureKind::default())
    }

    /// Create a FeatureExtractor with an explicit reduction
    pub fn with_kind(window_size: usize, kind: FeatureKind) -> Result<Self, ClassifierError> {
        if window_size < 2 {
            return Err(ClassifierError::invalid_input(format!(
                "window size must be at least 2 (got {})",
                window_size
            )));
        }
        Ok(Self { window_size, kind })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    /// Extract one feature per window
    ///
    /// The returned iterator is lazy and borrows `samples`; clone it (or call
    /// `extract` again) to restart from the first window.
    ///
    /// # Errors
    /// `InvalidInput` when `samples.len()` is not an exact multiple of the
    /// window size. A trailing partial window is never silently dropped.
    pub fn extract<'a>(&self, samples: &'a [f64]) -> Result<WindowFeatures<'a>, ClassifierError> {
        let remainder = samples.len() % self.window_size;
        if remainder != 0 {
            return Err(ClassifierError::invalid_input(format!(
                "stream length {} is not a multiple of window size {} ({} trailing samples)",
                samples.len(),
                self.window_size,
                remainder
            )));
        }

        Ok(WindowFeatures {
            chunks: samples.chunks_exact(self.window_size),
            kind: self.kind,
        })
    }

    /// Extract all features eagerly
    pub fn extract_all(&self, samples: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        Ok(self.extract(samples)?.collect())
    }
}

/// Lazy sequence of window features in stream order
#[derive(Debug, Clone)]
pub struct WindowFeatures<'a> {
    chunks: ChunksExact<'a, f64>,
    kind: FeatureKind,
}

impl Iterator for WindowFeatures<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.chunks
            .next()
            .map(|window| temporal::reduce(window, self.kind))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for WindowFeatures<'_> {}
