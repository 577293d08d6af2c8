use std::iter::Sum;
use std::ops::{Add, AddAssign};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::{EvaluationError, Result, Scores};

/// True/false positive/negative counts for one target label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct ConfusionMatrix {
    true_positives: usize,
    false_positives: usize,
    true_negatives: usize,
    false_negatives: usize,
}

impl ConfusionMatrix {
    pub fn new(
        true_positives: usize,
        false_positives: usize,
        true_negatives: usize,
        false_negatives: usize,
    ) -> Self {
        Self {
            true_positives,
            false_positives,
            true_negatives,
            false_negatives,
        }
    }

    /// Counts each `(prediction, gold)` pair against `target`.
    ///
    /// # Errors
    ///
    /// Returns `EvaluationError::LengthMismatch` if the slices differ in length.
    pub fn from_predictions<L: PartialEq>(predictions: &[L], gold: &[L], target: &L) -> Result<Self> {
        if predictions.len() != gold.len() {
            return Err(EvaluationError::LengthMismatch {
                predictions: predictions.len(),
                gold: gold.len(),
            });
        }
        let mut matrix = Self::default();
        for (prediction, truth) in predictions.iter().zip(gold) {
            match (prediction == target, truth == target) {
                (true, true) => matrix.increment_true_positives(),
                (true, false) => matrix.increment_false_positives(),
                (false, true) => matrix.increment_false_negatives(),
                (false, false) => matrix.increment_true_negatives(),
            }
        }
        Ok(matrix)
    }

    pub fn true_positives(&self) -> usize {
        self.true_positives
    }

    pub fn false_positives(&self) -> usize {
        self.false_positives
    }

    pub fn true_negatives(&self) -> usize {
        self.true_negatives
    }

    pub fn false_negatives(&self) -> usize {
        self.false_negatives
    }

    pub fn increment_true_positives(&mut self) {
        self.true_positives += 1;
    }

    pub fn increment_false_positives(&mut self) {
        self.false_positives += 1;
    }

    pub fn increment_true_negatives(&mut self) {
        self.true_negatives += 1;
    }

    pub fn increment_false_negatives(&mut self) {
        self.false_negatives += 1;
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Number of gold instances of the target label.
    pub fn support(&self) -> usize {
        self.true_positives + self.false_negatives
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    pub fn f1(&self) -> f64 {
        crate::f1_score(self.precision(), self.recall())
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    pub fn scores(&self) -> Scores {
        Scores::new(self.precision(), self.recall(), self.f1())
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl Add for ConfusionMatrix {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for ConfusionMatrix {
    fn add_assign(&mut self, rhs: Self) {
        self.true_positives += rhs.true_positives;
        self.false_positives += rhs.false_positives;
        self.true_negatives += rhs.true_negatives;
        self.false_negatives += rhs.false_negatives;
    }
}

impl Sum for ConfusionMatrix {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a ConfusionMatrix> for ConfusionMatrix {
    fn sum<I: Iterator<Item = &'a ConfusionMatrix>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_from_predictions() {
        let matrix =
            ConfusionMatrix::from_predictions(&["a", "b", "a"], &["a", "a", "a"], &"a").unwrap();
        assert_eq!(matrix, ConfusionMatrix::new(2, 0, 0, 1));
        assert_eq!(matrix.precision(), 1.0);
        assert_abs_diff_eq!(matrix.recall(), 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(matrix.f1(), 0.8, epsilon = 1e-12);
        assert_eq!(matrix.support(), 3);
        assert_abs_diff_eq!(matrix.accuracy(), 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            ConfusionMatrix::from_predictions(&[1, 2], &[1], &1).unwrap_err(),
            EvaluationError::LengthMismatch {
                predictions: 2,
                gold: 1
            }
        );
    }

    #[test]
    fn test_zero_denominators() {
        let never_predicted = ConfusionMatrix::new(0, 0, 3, 2);
        assert_eq!(never_predicted.precision(), 0.0);
        assert_eq!(never_predicted.recall(), 0.0);
        assert_eq!(never_predicted.f1(), 0.0);
        assert_eq!(ConfusionMatrix::default().accuracy(), 0.0);
    }

    #[test]
    fn test_addition() {
        let mut a = ConfusionMatrix::new(1, 2, 3, 4);
        let b = ConfusionMatrix::new(4, 3, 2, 1);
        assert_eq!(a + b, ConfusionMatrix::new(5, 5, 5, 5));
        a.increment_true_positives();
        a += b;
        assert_eq!(a, ConfusionMatrix::new(6, 5, 5, 5));
        let total: ConfusionMatrix = [a, b].iter().sum();
        assert_eq!(total, ConfusionMatrix::new(10, 8, 7, 6));
        assert_eq!(total.total(), 31);
    }
}
