// Analysis module - feature extraction and centroid classification
//
// Pipeline: sample stream → FeatureExtractor → (feature, label) pairs →
// fit (CentroidTable) → predict / evaluate.
//
// Every stage is a pure function over borrowed slices; callers own the
// sample and label streams.

pub mod classifier;
pub mod features;
pub mod threshold;

use classifier::{Label, LabeledFeature};

use crate::error::ClassifierError;

/// Zip window features with their labels positionally
///
/// # Errors
/// `InvalidInput` when the number of features differs from the number of
/// labels. Extra labels or features are never silently dropped.
pub fn pair_with_labels<I>(
    features: I,
    labels: &[Label],
) -> Result<Vec<LabeledFeature>, ClassifierError>
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: ExactSizeIterator,
{
    let features = features.into_iter();
    if features.len() != labels.len() {
        return Err(ClassifierError::invalid_input(format!(
            "{} windows but {} labels",
            features.len(),
            labels.len()
        )));
    }

    Ok(features.zip(labels.iter().copied()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use features::FeatureExtractor;

    #[test]
    fn test_pair_with_labels_aligns_windows() {
        let extractor = FeatureExtractor::new(2).unwrap();
        let samples = [0.0, 5.0, 1.0, 1.0, 3.0, 0.0];
        let features = extractor.extract(&samples).unwrap();

        let pairs = pair_with_labels(features, &[2, 1, 3]).unwrap();
        assert_eq!(pairs, vec![(5.0, 2), (0.0, 1), (3.0, 3)]);
    }

    #[test]
    fn test_pair_with_labels_rejects_mismatch() {
        let result = pair_with_labels(vec![1.0, 2.0], &[1]);
        match result {
            Err(ClassifierError::InvalidInput { reason }) => {
                assert!(reason.contains("2 windows but 1 labels"), "got {}", reason);
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
