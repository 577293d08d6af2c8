use ndarray::{Array1, ArrayView1, Zip};
use rand::Rng;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::{FeatureVector, SparseVector};
use crate::{Float, Result, VectorError};

/// A feature vector storing every coordinate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct DenseVector<F: Float> {
    data: Array1<F>,
}

impl<F: Float> DenseVector<F> {
    pub fn new(data: Array1<F>) -> Self {
        Self { data }
    }

    pub fn zeros(len: usize) -> Self {
        Self {
            data: Array1::zeros(len),
        }
    }

    pub fn from_vec(values: Vec<F>) -> Self {
        Self {
            data: Array1::from_vec(values),
        }
    }

    /// A vector of `len` coordinates drawn uniformly from `[0, 1)`.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        let data = (0..len)
            .map(|_| rng.random_range(F::zero()..F::one()))
            .collect::<Array1<F>>();
        Self { data }
    }

    pub fn view(&self) -> ArrayView1<'_, F> {
        self.data.view()
    }

    pub fn into_array(self) -> Array1<F> {
        self.data
    }
}

impl<F: Float> FeatureVector<F> for DenseVector<F> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn get(&self, index: usize) -> Result<F> {
        self.data
            .get(index)
            .copied()
            .ok_or(VectorError::IndexOutOfRange {
                index,
                len: self.data.len(),
            })
    }

    fn set(&mut self, index: usize, value: F) -> Result<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(VectorError::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    fn value_at(&self, index: usize) -> F {
        self.data.get(index).copied().unwrap_or_else(F::zero)
    }

    fn nnz(&self) -> usize {
        self.data.iter().filter(|v| !v.is_zero()).count()
    }

    fn nonzero(&self) -> Box<dyn Iterator<Item = (usize, F)> + '_> {
        Box::new(
            self.data
                .iter()
                .copied()
                .enumerate()
                .filter(|(_, v)| !v.is_zero()),
        )
    }

    fn is_sparse(&self) -> bool {
        false
    }

    fn as_dense(&self) -> Option<&DenseVector<F>> {
        Some(self)
    }

    fn zero(&mut self) {
        self.data.fill(F::zero());
    }

    fn to_dense(&self) -> DenseVector<F> {
        self.clone()
    }

    fn to_sparse(&self) -> SparseVector<F> {
        SparseVector::from_dense(self)
    }

    fn map_in_place<O>(&mut self, op: O)
    where
        O: Fn(F) -> F,
    {
        self.data.mapv_inplace(op);
    }

    fn zip_in_place<V, O>(&mut self, other: &V, op: O) -> Result<()>
    where
        V: FeatureVector<F>,
        O: Fn(F, F) -> F,
    {
        self.check_len(other.len())?;
        match other.as_dense() {
            Some(rhs) => Zip::from(&mut self.data)
                .and(&rhs.data)
                .for_each(|a, &b| *a = op(*a, b)),
            None => self
                .data
                .iter_mut()
                .enumerate()
                .for_each(|(i, a)| *a = op(*a, other.value_at(i))),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_get_and_set() {
        let mut v = DenseVector::new(array![1.0, 2.0, 3.0]);
        assert_eq!(v.get(1).unwrap(), 2.0);
        v.set(1, 0.0).unwrap();
        assert_eq!(v.nnz(), 2);
        assert_eq!(
            v.get(3).unwrap_err(),
            VectorError::IndexOutOfRange { index: 3, len: 3 }
        );
        assert!(v.set(7, 1.0).is_err());
    }

    #[test]
    fn test_elementwise_ops() {
        let a = DenseVector::new(array![1.0, 2.0, 3.0]);
        let b = DenseVector::new(array![4.0, 5.0, 6.0]);
        assert_eq!(a.add(&b).unwrap().to_vec(), vec![5.0, 7.0, 9.0]);
        assert_eq!(b.subtract(&a).unwrap().to_vec(), vec![3.0, 3.0, 3.0]);
        assert_eq!(a.multiply(&b).unwrap().to_vec(), vec![4.0, 10.0, 18.0]);
        assert_eq!(b.divide(&a).unwrap().to_vec(), vec![4.0, 2.5, 2.0]);
        assert_eq!(a.pow(&a).unwrap().to_vec(), vec![1.0, 4.0, 27.0]);
        assert_eq!(a.subtract_scalar(1.0).to_vec(), vec![0.0, 1.0, 2.0]);
        assert_eq!(a.pow_scalar(2.0).to_vec(), vec![1.0, 4.0, 9.0]);
        assert_abs_diff_eq!(a.dot(&b).unwrap(), 32.0);
    }

    #[test]
    fn test_divide_by_zero_scalar() {
        let mut a = DenseVector::new(array![1.0, 2.0]);
        assert_eq!(a.divide_scalar(0.0).unwrap_err(), VectorError::DivisionByZero);
        assert_eq!(
            a.divide_scalar_in_place(0.0).unwrap_err(),
            VectorError::DivisionByZero
        );
        assert_eq!(a.to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_random_is_reproducible() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let a = DenseVector::<f64>::random(8, &mut rng);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let b = DenseVector::<f64>::random(8, &mut rng);
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
        assert!(a.to_vec().iter().all(|&v| (0.0..1.0).contains(&v)));
    }
}
