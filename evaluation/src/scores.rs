use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Precision, recall and F1 of one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Scores {
    precision: f64,
    recall: f64,
    f1: f64,
}

impl Scores {
    pub fn new(precision: f64, recall: f64, f1: f64) -> Self {
        Self {
            precision,
            recall,
            f1,
        }
    }

    /// Scores whose F1 is the harmonic mean of `precision` and `recall`.
    pub fn from_precision_recall(precision: f64, recall: f64) -> Self {
        Self::new(precision, recall, f1_score(precision, recall))
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn recall(&self) -> f64 {
        self.recall
    }

    pub fn f1(&self) -> f64 {
        self.f1
    }
}

impl Display for Scores {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scores(precision: {:.3}, recall: {:.3}, f1-score: {:.3})",
            self.precision, self.recall, self.f1
        )
    }
}

/// Harmonic mean of precision and recall, zero when both are zero.
pub fn f1_score(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_display() {
        let scores = Scores::from_precision_recall(0.8, 2.0 / 3.0);
        assert_abs_diff_eq!(scores.f1(), 0.727_272_727, epsilon = 1e-9);
        assert_eq!(
            scores.to_string(),
            "Scores(precision: 0.800, recall: 0.667, f1-score: 0.727)"
        );
    }

    #[test]
    fn test_f1_of_zero_scores() {
        assert_eq!(f1_score(0.0, 0.0), 0.0);
        assert_eq!(Scores::default().to_string(), "Scores(precision: 0.000, recall: 0.000, f1-score: 0.000)");
    }
}
