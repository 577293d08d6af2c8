use std::fmt::Debug;
use std::hash::Hash;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use thiserror::Error;
use tracing::{debug, info, warn};
// Core components from the shared library.
use wordbag_helpers::{FeatureMatrix, FeatureVector, Float, VectorError, WeightVector};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

mod labels;

pub use labels::LabelBinarizer;

/// Errors that can occur when training or using the perceptron.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PerceptronError {
    /// Prediction was requested before `fit` or `set_weights`.
    #[error("the perceptron has no weights yet; call `fit` or `set_weights` first")]
    NotFitted,
    /// Label-based training needs exactly two distinct labels.
    #[error("expected exactly two distinct labels, found {0}")]
    InvalidLabelSet(usize),
    #[error("label {0} is not one of the two fitted labels")]
    UnknownLabel(String),
    /// Targets must be `+1` or `-1`.
    #[error("targets must be +1 or -1, found {0}")]
    InvalidTarget(i8),
    #[error("{targets} targets given for a matrix of {rows} rows")]
    TargetLengthMismatch { rows: usize, targets: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Vector(#[from] VectorError),
}

pub type Result<T> = std::result::Result<T, PerceptronError>;

/// Training parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct PerceptronConfig<F: Float> {
    pub learning_rate: F,
    /// Upper bound on passes over the training rows.
    pub epochs: usize,
    /// When set, initial weights are drawn uniformly from `[-theta, theta]`
    /// instead of starting at zero.
    pub theta: Option<F>,
    /// Seed for the initial weights. A fresh seed is drawn when `None`.
    pub seed: Option<u64>,
}

impl<F: Float> Default for PerceptronConfig<F> {
    fn default() -> Self {
        Self {
            learning_rate: F::one(),
            epochs: 5,
            theta: None,
            seed: None,
        }
    }
}

impl<F: Float> PerceptronConfig<F> {
    pub fn with_learning_rate(mut self, learning_rate: F) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_theta(mut self, theta: F) -> Self {
        self.theta = Some(theta);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// # Errors
    ///
    /// Returns `PerceptronError::InvalidConfig` for a non-positive or non-finite
    /// learning rate, zero epochs, or a negative or non-finite `theta`.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > F::zero() && self.learning_rate.is_finite()) {
            return Err(PerceptronError::InvalidConfig(format!(
                "learning rate must be positive and finite, got {:?}",
                self.learning_rate
            )));
        }
        if self.epochs == 0 {
            return Err(PerceptronError::InvalidConfig(
                "epochs must be at least 1".into(),
            ));
        }
        if let Some(theta) = self.theta {
            if !(theta >= F::zero() && theta.is_finite()) {
                return Err(PerceptronError::InvalidConfig(format!(
                    "theta must be non-negative and finite, got {theta:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of a training run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FitReport {
    mistakes: Vec<usize>,
}

impl FitReport {
    /// Mistakes made in each completed epoch.
    pub fn mistakes(&self) -> &[usize] {
        &self.mistakes
    }

    pub fn epochs(&self) -> usize {
        self.mistakes.len()
    }

    pub fn total_mistakes(&self) -> usize {
        self.mistakes.iter().sum()
    }

    /// Whether the last epoch classified every training row correctly.
    pub fn converged(&self) -> bool {
        self.mistakes.last() == Some(&0)
    }
}

/// A binary online perceptron over `+1` / `-1` targets.
///
/// For each training row `x` with target `t` the prediction is the sign of
/// `w · x + b` (a value of exactly zero predicts `+1`); on a mistake the
/// parameters move by `learning_rate * (t - prediction)` along `x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Perceptron<F: Float> {
    config: PerceptronConfig<F>,
    weights: Option<WeightVector<F>>,
}

impl<F: Float> Default for Perceptron<F> {
    fn default() -> Self {
        Self {
            config: PerceptronConfig::default(),
            weights: None,
        }
    }
}

impl<F: Float> Perceptron<F> {
    /// # Errors
    ///
    /// Returns `PerceptronError::InvalidConfig` if the configuration is rejected
    /// by [`PerceptronConfig::validate`].
    pub fn new(config: PerceptronConfig<F>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            weights: None,
        })
    }

    /// A perceptron starting from pre-initialized weights.
    pub fn with_weights(config: PerceptronConfig<F>, weights: WeightVector<F>) -> Result<Self> {
        let mut perceptron = Self::new(config)?;
        perceptron.set_weights(weights);
        Ok(perceptron)
    }

    pub fn config(&self) -> &PerceptronConfig<F> {
        &self.config
    }

    pub fn weights(&self) -> Option<&WeightVector<F>> {
        self.weights.as_ref()
    }

    pub fn set_weights(&mut self, weights: WeightVector<F>) {
        self.weights = Some(weights);
    }

    pub fn is_fitted(&self) -> bool {
        self.weights.is_some()
    }

    /// Drops the learned weights.
    pub fn reset(&mut self) {
        self.weights = None;
    }

    fn initial_weights(&self, n_features: usize) -> WeightVector<F> {
        let theta = self.config.theta.unwrap_or_else(F::zero);
        match self.config.seed {
            Some(seed) => {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
                WeightVector::random(n_features, theta, &mut rng)
            }
            None => WeightVector::random(n_features, theta, &mut rand::rng()),
        }
    }

    /// Trains on the rows of `matrix` against `targets`.
    ///
    /// Weights already present (from `set_weights` or an earlier `fit`) are
    /// trained further; otherwise they are initialized from the configuration.
    /// Stops after `epochs` passes or after the first pass without mistakes.
    /// Nothing changes when an error is returned.
    ///
    /// # Errors
    ///
    /// * `TargetLengthMismatch` if `targets` and the matrix rows differ in number.
    /// * `InvalidTarget` for any target other than `+1` / `-1`.
    /// * `Vector(DimensionMismatch)` if existing weights do not match the row length.
    pub fn fit(&mut self, matrix: &FeatureMatrix<F>, targets: &[i8]) -> Result<FitReport> {
        if targets.len() != matrix.n_rows() {
            return Err(PerceptronError::TargetLengthMismatch {
                rows: matrix.n_rows(),
                targets: targets.len(),
            });
        }
        if let Some(&bad) = targets.iter().find(|&&t| t != 1 && t != -1) {
            return Err(PerceptronError::InvalidTarget(bad));
        }
        if matrix.is_empty() {
            warn!("fit called with an empty matrix; weights left untouched");
            return Ok(FitReport::default());
        }

        let mut weights = match &self.weights {
            Some(weights) => {
                weights.weights().check_len(matrix.n_features())?;
                weights.clone()
            }
            None => self.initial_weights(matrix.n_features()),
        };

        let learning_rate = self.config.learning_rate;
        let mut report = FitReport::default();
        for epoch in 0..self.config.epochs {
            let mut mistakes = 0;
            for (row, &target) in matrix.iter().zip(targets) {
                let prediction = sign(weights.decision_value(row)?);
                if prediction != target {
                    let update = learning_rate * (as_float::<F>(target) - as_float::<F>(prediction));
                    weights.step(row, update)?;
                    mistakes += 1;
                }
            }
            debug!(epoch = epoch + 1, mistakes, "perceptron epoch finished");
            report.mistakes.push(mistakes);
            if mistakes == 0 {
                break;
            }
        }

        info!(
            epochs = report.epochs(),
            total_mistakes = report.total_mistakes(),
            converged = report.converged(),
            "perceptron training finished"
        );
        self.weights = Some(weights);
        Ok(report)
    }

    /// Trains on arbitrary two-valued labels.
    ///
    /// The returned binarizer is needed to turn predictions back into labels.
    pub fn fit_labels<L>(
        &mut self,
        matrix: &FeatureMatrix<F>,
        labels: &[L],
    ) -> Result<(LabelBinarizer<L>, FitReport)>
    where
        L: Clone + Eq + Hash + Debug,
    {
        let binarizer = LabelBinarizer::fit(labels)?;
        let targets = binarizer.transform(labels)?;
        let report = self.fit(matrix, &targets)?;
        Ok((binarizer, report))
    }

    fn fitted_weights(&self) -> Result<&WeightVector<F>> {
        self.weights.as_ref().ok_or(PerceptronError::NotFitted)
    }

    /// Raw score `w · x + b` for one vector.
    pub fn decision_value<V: FeatureVector<F>>(&self, x: &V) -> Result<F> {
        Ok(self.fitted_weights()?.decision_value(x)?)
    }

    /// Raw scores for every row of `matrix`.
    pub fn decision_function(&self, matrix: &FeatureMatrix<F>) -> Result<Vec<F>> {
        let weights = self.fitted_weights()?;
        matrix
            .iter()
            .map(|row| weights.decision_value(row).map_err(PerceptronError::from))
            .collect()
    }

    pub fn predict_one<V: FeatureVector<F>>(&self, x: &V) -> Result<i8> {
        self.decision_value(x).map(sign)
    }

    /// `+1` / `-1` prediction for every row of `matrix`.
    ///
    /// # Errors
    ///
    /// Returns `PerceptronError::NotFitted` without weights, and
    /// `PerceptronError::Vector` if the rows do not match the weight length.
    pub fn predict(&self, matrix: &FeatureMatrix<F>) -> Result<Vec<i8>> {
        Ok(self
            .decision_function(matrix)?
            .into_iter()
            .map(sign)
            .collect())
    }

    pub fn predict_labels<L>(
        &self,
        matrix: &FeatureMatrix<F>,
        binarizer: &LabelBinarizer<L>,
    ) -> Result<Vec<L>>
    where
        L: Clone + Eq + Hash + Debug,
    {
        Ok(binarizer.inverse_transform(&self.predict(matrix)?))
    }
}

fn sign<F: Float>(value: F) -> i8 {
    if value >= F::zero() { 1 } else { -1 }
}

fn as_float<F: Float>(target: i8) -> F {
    if target > 0 { F::one() } else { -F::one() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use wordbag_helpers::{DenseVector, SparseVector, Vector};

    fn dense(values: &[f64]) -> Vector<f64> {
        Vector::Dense(DenseVector::from_vec(values.to_vec()))
    }

    fn separable() -> FeatureMatrix<f64> {
        FeatureMatrix::new(vec![dense(&[1.0, 0.0]), dense(&[-1.0, 0.0])]).unwrap()
    }

    #[test]
    fn test_learns_separable_points() {
        let mut perceptron = Perceptron::new(PerceptronConfig::default()).unwrap();
        let report = perceptron.fit(&separable(), &[1, -1]).unwrap();

        assert_eq!(report.mistakes(), &[1, 0]);
        assert!(report.converged());
        assert_eq!(perceptron.predict(&separable()).unwrap(), vec![1, -1]);
        assert_eq!(perceptron.predict(&separable()).unwrap(), vec![1, -1]);

        let weights = perceptron.weights().unwrap();
        assert_eq!(weights.weights().to_vec(), vec![2.0, 0.0]);
        assert_eq!(weights.bias(), -2.0);
    }

    #[test]
    fn test_sparse_rows_train_identically() {
        let sparse = FeatureMatrix::new(
            separable()
                .into_rows()
                .into_iter()
                .map(Vector::into_sparse)
                .map(Vector::Sparse)
                .collect(),
        )
        .unwrap();
        let mut a = Perceptron::default();
        let mut b = Perceptron::default();
        a.fit(&separable(), &[1, -1]).unwrap();
        b.fit(&sparse, &[1, -1]).unwrap();
        assert_eq!(a.weights(), b.weights());
    }

    #[test]
    fn test_zero_decision_value_predicts_positive() {
        let perceptron =
            Perceptron::with_weights(PerceptronConfig::default(), WeightVector::<f64>::new(2))
                .unwrap();
        let x = SparseVector::from_entries(2, [(0, 3.0)]).unwrap();
        assert_eq!(perceptron.decision_value(&x).unwrap(), 0.0);
        assert_eq!(perceptron.predict_one(&x).unwrap(), 1);
    }

    #[test]
    fn test_predict_before_fit() {
        let perceptron = Perceptron::<f64>::default();
        assert_eq!(
            perceptron.predict(&separable()).unwrap_err(),
            PerceptronError::NotFitted
        );
        assert_eq!(
            perceptron.decision_function(&separable()).unwrap_err(),
            PerceptronError::NotFitted
        );
    }

    #[test]
    fn test_dimension_mismatch_on_predict() {
        let mut perceptron = Perceptron::default();
        perceptron.fit(&separable(), &[1, -1]).unwrap();
        let wide = FeatureMatrix::new(vec![dense(&[1.0, 0.0, 0.0])]).unwrap();
        assert_eq!(
            perceptron.predict(&wide).unwrap_err(),
            PerceptronError::Vector(VectorError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_invalid_targets_leave_model_untouched() {
        let mut perceptron = Perceptron::<f64>::default();
        assert_eq!(
            perceptron.fit(&separable(), &[1, 0]).unwrap_err(),
            PerceptronError::InvalidTarget(0)
        );
        assert_eq!(
            perceptron.fit(&separable(), &[1]).unwrap_err(),
            PerceptronError::TargetLengthMismatch {
                rows: 2,
                targets: 1
            }
        );
        assert!(!perceptron.is_fitted());
    }

    #[test]
    fn test_invalid_config() {
        let config = PerceptronConfig::<f64>::default().with_learning_rate(0.0);
        assert!(matches!(
            Perceptron::new(config),
            Err(PerceptronError::InvalidConfig(_))
        ));
        let config = PerceptronConfig::<f64>::default().with_epochs(0);
        assert!(matches!(
            Perceptron::new(config),
            Err(PerceptronError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_seeded_random_init_is_reproducible() {
        let config = PerceptronConfig::<f64>::default()
            .with_theta(0.5)
            .with_seed(7)
            .with_epochs(1);
        let mut a = Perceptron::new(config).unwrap();
        let mut b = Perceptron::new(config).unwrap();
        a.fit(&separable(), &[1, -1]).unwrap();
        b.fit(&separable(), &[1, -1]).unwrap();
        assert_eq!(a.weights(), b.weights());
    }

    #[test]
    fn test_learning_rate_scales_updates() {
        let config = PerceptronConfig::default().with_learning_rate(0.25);
        let mut perceptron = Perceptron::new(config).unwrap();
        perceptron.fit(&separable(), &[1, -1]).unwrap();
        let weights = perceptron.weights().unwrap();
        assert_abs_diff_eq!(weights.weights().get(0).unwrap(), 0.5);
        assert_abs_diff_eq!(weights.bias(), -0.5);
    }

    #[test]
    fn test_labels_round_trip_through_predictions() {
        let mut perceptron = Perceptron::default();
        let (binarizer, _) = perceptron
            .fit_labels(&separable(), &["pos", "neg"])
            .unwrap();
        assert_eq!(
            perceptron.predict_labels(&separable(), &binarizer).unwrap(),
            vec!["pos", "neg"]
        );
        assert_eq!(
            perceptron
                .fit_labels(&separable(), &["x", "x"])
                .unwrap_err(),
            PerceptronError::InvalidLabelSet(1)
        );
    }

    #[test]
    fn test_reset_forgets_weights() {
        let mut perceptron = Perceptron::default();
        perceptron.fit(&separable(), &[1, -1]).unwrap();
        perceptron.reset();
        assert!(perceptron.weights().is_none());
        assert_eq!(
            perceptron.predict_one(&DenseVector::from_vec(vec![1.0, 0.0])).unwrap_err(),
            PerceptronError::NotFitted
        );
    }
}
