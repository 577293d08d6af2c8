use rand::Rng;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::{DenseVector, FeatureVector, SparseVector};
use crate::{Float, Result};

/// The learned parameters of a linear classifier: sparse weights plus a bias.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct WeightVector<F: Float> {
    weights: SparseVector<F>,
    bias: F,
}

impl<F: Float> WeightVector<F> {
    /// All-zero weights of length `len` and zero bias.
    pub fn new(len: usize) -> Self {
        Self::from_parts(SparseVector::new(len), F::zero())
    }

    pub fn from_parts(weights: SparseVector<F>, bias: F) -> Self {
        Self { weights, bias }
    }

    /// Weights drawn uniformly from `[-theta, theta]`, zero bias.
    pub fn random<R: Rng>(len: usize, theta: F, rng: &mut R) -> Self {
        if !(theta > F::zero()) {
            return Self::new(len);
        }
        let values = (0..len)
            .map(|_| rng.random_range(-theta..=theta))
            .collect::<Vec<F>>();
        Self::from_parts(DenseVector::from_vec(values).to_sparse(), F::zero())
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weights(&self) -> &SparseVector<F> {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut SparseVector<F> {
        &mut self.weights
    }

    pub fn bias(&self) -> F {
        self.bias
    }

    pub fn set_bias(&mut self, bias: F) {
        self.bias = bias;
    }

    pub fn into_parts(self) -> (SparseVector<F>, F) {
        (self.weights, self.bias)
    }

    /// `w · x + b`.
    pub fn decision_value<V>(&self, x: &V) -> Result<F>
    where
        V: FeatureVector<F>,
    {
        Ok(self.weights.dot(x)? + self.bias)
    }

    /// Applies `w += step * x` and `b += step`, touching only the non-zero
    /// coordinates of `x`.
    pub fn step<V>(&mut self, x: &V, step: F) -> Result<()>
    where
        V: FeatureVector<F>,
    {
        self.weights.check_len(x.len())?;
        for (i, v) in x.nonzero() {
            let updated = self.weights.value_at(i) + step * v;
            self.weights.set(i, updated)?;
        }
        self.bias += step;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VectorError;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_step_and_decision_value() {
        let mut w = WeightVector::<f64>::new(3);
        let x = DenseVector::from_vec(vec![1.0, 0.0, -2.0]);
        assert_eq!(w.decision_value(&x).unwrap(), 0.0);

        w.step(&x, 2.0).unwrap();
        assert_eq!(w.weights().to_vec(), vec![2.0, 0.0, -4.0]);
        assert_eq!(w.bias(), 2.0);
        assert_abs_diff_eq!(w.decision_value(&x).unwrap(), 2.0 + 8.0 + 2.0);

        w.step(&x, -2.0).unwrap();
        assert_eq!(w.weights().nnz(), 0);
        assert_eq!(w.bias(), 0.0);
    }

    #[test]
    fn test_step_rejects_wrong_length() {
        let mut w = WeightVector::<f64>::new(3);
        let x = DenseVector::from_vec(vec![1.0, 0.0]);
        assert_eq!(
            w.step(&x, 1.0).unwrap_err(),
            VectorError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        );
        assert_eq!(w.bias(), 0.0);
    }

    #[test]
    fn test_random_within_bound() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let w = WeightVector::<f64>::random(20, 0.5, &mut rng);
        assert_eq!(w.len(), 20);
        assert_eq!(w.bias(), 0.0);
        assert!(w.weights().nonzero_values().iter().all(|v| *v >= -0.5 && *v <= 0.5));
        assert!(w.weights().nnz() > 0);

        let zero = WeightVector::<f64>::random(5, 0.0, &mut rng);
        assert_eq!(zero.weights().nnz(), 0);
    }
}
