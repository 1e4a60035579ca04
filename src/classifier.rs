//! Defines the trait of classifiers.
use crate::Sample;
use crate::error::Result;


/// A trait that defines the behavor of classifier.
/// You only need to implement `classify` and `class_distribution`.
pub trait Classifier {
    /// Predicts the class code of `instance`,
    /// a slice of feature values (`f64::NAN` for a missing value).
    fn classify(&self, instance: &[f64]) -> Result<usize>;


    /// Computes the class distribution of `instance`.
    fn class_distribution(&self, instance: &[f64]) -> Result<Vec<f64>>;


    /// Predicts the class code of the i'th row of `sample`.
    fn predict(&self, sample: &Sample, row: usize) -> Result<usize> {
        let instance = sample.row(row);
        self.classify(&instance[..])
    }


    /// Predicts the class codes of `sample`.
    fn predict_all(&self, sample: &Sample) -> Vec<Result<usize>>
    {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.predict(sample, row))
            .collect::<Vec<_>>()
    }
}
