//! Confusion matrices and precision/recall/F1 under micro and macro averaging.

use thiserror::Error;

mod confusion;
mod evaluator;
mod scores;

pub use confusion::ConfusionMatrix;
pub use evaluator::Evaluator;
pub use scores::{Scores, f1_score};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// Predictions and gold labels must be parallel sequences.
    #[error("{predictions} predictions but {gold} gold labels")]
    LengthMismatch { predictions: usize, gold: usize },
}

pub type Result<T> = std::result::Result<T, EvaluationError>;

/// Mean of the per-matrix precision, recall and F1. Every class weighs the
/// same regardless of its support. Zero scores for no matrices.
pub fn macro_average<'a, I>(matrices: I) -> Scores
where
    I: IntoIterator<Item = &'a ConfusionMatrix>,
{
    let (n, precision, recall, f1) = matrices.into_iter().fold(
        (0usize, 0.0, 0.0, 0.0),
        |(n, p, r, f), matrix| {
            (
                n + 1,
                p + matrix.precision(),
                r + matrix.recall(),
                f + matrix.f1(),
            )
        },
    );
    if n == 0 {
        return Scores::default();
    }
    let n = n as f64;
    Scores::new(precision / n, recall / n, f1 / n)
}

/// Scores of the counter-wise sum of all matrices.
pub fn micro_average<'a, I>(matrices: I) -> Scores
where
    I: IntoIterator<Item = &'a ConfusionMatrix>,
{
    matrices.into_iter().sum::<ConfusionMatrix>().scores()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_averages_of_two_classes() {
        let matrices = [ConfusionMatrix::new(8, 2, 0, 0), ConfusionMatrix::new(0, 0, 8, 2)];

        let macro_scores = macro_average(&matrices);
        assert_abs_diff_eq!(macro_scores.precision(), 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(macro_scores.recall(), 0.5, epsilon = 1e-12);

        let micro = micro_average(&matrices);
        assert_abs_diff_eq!(micro.precision(), 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(micro.recall(), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_no_matrices() {
        assert_eq!(macro_average(&[] as &[ConfusionMatrix]), Scores::default());
        assert_eq!(micro_average(&[] as &[ConfusionMatrix]), Scores::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let matrix = ConfusionMatrix::new(3, 1, 4, 1);
        let json = serde_json::to_string(&matrix).unwrap();
        assert_eq!(serde_json::from_str::<ConfusionMatrix>(&json).unwrap(), matrix);

        let scores = matrix.scores();
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(serde_json::from_str::<Scores>(&json).unwrap(), scores);
    }
}
