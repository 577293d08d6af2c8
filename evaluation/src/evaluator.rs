use std::fmt::Debug;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::{ConfusionMatrix, EvaluationError, Result, Scores, macro_average, micro_average};

/// Compares predictions with gold labels, one confusion matrix per label.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluator<L>
where
    L: Clone + Eq + Hash + Debug,
{
    predictions: Vec<L>,
    gold: Vec<L>,
    class_matrices: IndexMap<L, ConfusionMatrix>,
}

impl<L> Evaluator<L>
where
    L: Clone + Eq + Hash + Debug,
{
    /// Evaluates every label that occurs in `predictions` or `gold`, in order of
    /// first occurrence (predictions first).
    ///
    /// # Errors
    ///
    /// Returns `EvaluationError::LengthMismatch` if the two sequences differ in length.
    pub fn new(predictions: Vec<L>, gold: Vec<L>) -> Result<Self> {
        let labels: IndexSet<L> = predictions.iter().chain(&gold).cloned().collect();
        Self::with_labels(predictions, gold, labels)
    }

    /// Evaluates only `labels`. Accuracy still covers every pair.
    pub fn with_labels<I>(predictions: Vec<L>, gold: Vec<L>, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
    {
        if predictions.len() != gold.len() {
            return Err(EvaluationError::LengthMismatch {
                predictions: predictions.len(),
                gold: gold.len(),
            });
        }
        let class_matrices = labels
            .into_iter()
            .map(|label| {
                let matrix = ConfusionMatrix::from_predictions(&predictions, &gold, &label)?;
                Ok((label, matrix))
            })
            .collect::<Result<IndexMap<_, _>>>()?;
        debug!(
            samples = predictions.len(),
            labels = class_matrices.len(),
            "built class confusion matrices"
        );
        Ok(Self {
            predictions,
            gold,
            class_matrices,
        })
    }

    pub fn predictions(&self) -> &[L] {
        &self.predictions
    }

    pub fn gold(&self) -> &[L] {
        &self.gold
    }

    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.class_matrices.keys()
    }

    pub fn class_matrices(&self) -> &IndexMap<L, ConfusionMatrix> {
        &self.class_matrices
    }

    pub fn confusion_matrix(&self, label: &L) -> Option<&ConfusionMatrix> {
        self.class_matrices.get(label)
    }

    /// Fraction of predictions equal to their gold label, `0.0` without samples.
    pub fn accuracy(&self) -> f64 {
        if self.predictions.is_empty() {
            return 0.0;
        }
        let correct = self
            .predictions
            .iter()
            .zip(&self.gold)
            .filter(|(prediction, truth)| prediction == truth)
            .count();
        correct as f64 / self.predictions.len() as f64
    }

    pub fn macro_averages(&self) -> Scores {
        macro_average(self.class_matrices.values())
    }

    pub fn micro_averages(&self) -> Scores {
        micro_average(self.class_matrices.values())
    }
}
