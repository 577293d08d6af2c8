use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::vector::{DenseVector, FeatureVector, SparseVector, Vector};
use crate::{Float, Result, VectorError};

/// An ordered collection of feature vectors sharing one length.
///
/// Shape is reported as `(n_features, n_rows)`. Broadcast operations mutate
/// every row in place; arguments are validated before the first row is touched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", try_from = "FeatureMatrixRepr<F>")
)]
pub struct FeatureMatrix<F: Float> {
    rows: Vec<Vector<F>>,
    n_features: usize,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(crate = "serde_crate")]
struct FeatureMatrixRepr<F: Float> {
    rows: Vec<Vector<F>>,
    n_features: usize,
}

#[cfg(feature = "serde")]
impl<F: Float> TryFrom<FeatureMatrixRepr<F>> for FeatureMatrix<F> {
    type Error = VectorError;

    fn try_from(repr: FeatureMatrixRepr<F>) -> Result<Self> {
        let matrix = Self::new(repr.rows)?;
        if !matrix.rows.is_empty() && matrix.n_features != repr.n_features {
            return Err(VectorError::ShapeMismatch {
                row: 0,
                expected: repr.n_features,
                found: matrix.n_features,
            });
        }
        Ok(matrix)
    }
}

impl<F: Float> FeatureMatrix<F> {
    /// Builds a matrix from its rows.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::ShapeMismatch` if any row's length differs from the first.
    pub fn new(rows: Vec<Vector<F>>) -> Result<Self> {
        let n_features = rows.first().map_or(0, |row| row.len());
        if let Some((row, found)) = rows
            .iter()
            .map(|r| r.len())
            .enumerate()
            .find(|&(_, len)| len != n_features)
        {
            return Err(VectorError::ShapeMismatch {
                row,
                expected: n_features,
                found,
            });
        }
        Ok(Self { rows, n_features })
    }

    pub fn from_rows<I, V>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Vector<F>>,
    {
        Self::new(rows.into_iter().map(Into::into).collect())
    }

    /// A matrix of random rows. Dense rows with uniform `[0, 1)` values when
    /// `sparsity` is `None`, sparse rows with that fraction of zeros otherwise.
    pub fn random_initialize(
        n_features: usize,
        n_rows: usize,
        sparsity: Option<f64>,
    ) -> Result<Self> {
        Self::random_initialize_with_rng(n_features, n_rows, sparsity, &mut rand::rng())
    }

    /// Seeded variant of [`random_initialize`](Self::random_initialize) for reproducible matrices.
    pub fn random_initialize_with_seed(
        n_features: usize,
        n_rows: usize,
        sparsity: Option<f64>,
        seed: u64,
    ) -> Result<Self> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        Self::random_initialize_with_rng(n_features, n_rows, sparsity, &mut rng)
    }

    pub fn random_initialize_with_rng<R: Rng>(
        n_features: usize,
        n_rows: usize,
        sparsity: Option<f64>,
        rng: &mut R,
    ) -> Result<Self> {
        let rows = (0..n_rows)
            .map(|_| match sparsity {
                None => Ok(Vector::Dense(DenseVector::random(n_features, rng))),
                Some(s) => SparseVector::random(n_features, s, rng).map(Vector::Sparse),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows, n_features })
    }

    /// `(n_features, n_rows)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_features, self.rows.len())
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Vector<F>> {
        let len = self.rows.len();
        self.rows
            .get(index)
            .ok_or(VectorError::IndexOutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Vector<F>> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(VectorError::IndexOutOfRange { index, len })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vector<F>> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[Vector<F>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vector<F>> {
        self.rows
    }

    fn check_operand<V: FeatureVector<F>>(&self, other: &V) -> Result<()> {
        if other.len() != self.n_features {
            return Err(VectorError::DimensionMismatch {
                expected: self.n_features,
                found: other.len(),
            });
        }
        Ok(())
    }

    fn broadcast<V, O>(&mut self, other: &V, op: O) -> Result<()>
    where
        V: FeatureVector<F>,
        O: Fn(&mut Vector<F>, &V) -> Result<()>,
    {
        self.check_operand(other)?;
        self.rows.iter_mut().try_for_each(|row| op(row, other))
    }

    pub fn add_in_place<V: FeatureVector<F>>(&mut self, other: &V) -> Result<()> {
        self.broadcast(other, |row, v| row.add_in_place(v))
    }

    pub fn add_scalar_in_place(&mut self, scalar: F) {
        self.rows
            .iter_mut()
            .for_each(|row| row.add_scalar_in_place(scalar));
    }

    pub fn subtract_in_place<V: FeatureVector<F>>(&mut self, other: &V) -> Result<()> {
        self.broadcast(other, |row, v| row.subtract_in_place(v))
    }

    pub fn subtract_scalar_in_place(&mut self, scalar: F) {
        self.rows
            .iter_mut()
            .for_each(|row| row.subtract_scalar_in_place(scalar));
    }

    pub fn multiply_in_place<V: FeatureVector<F>>(&mut self, other: &V) -> Result<()> {
        self.broadcast(other, |row, v| row.multiply_in_place(v))
    }

    pub fn multiply_scalar_in_place(&mut self, scalar: F) {
        self.rows
            .iter_mut()
            .for_each(|row| row.multiply_scalar_in_place(scalar));
    }

    pub fn divide_in_place<V: FeatureVector<F>>(&mut self, other: &V) -> Result<()> {
        self.broadcast(other, |row, v| row.divide_in_place(v))
    }

    pub fn divide_scalar_in_place(&mut self, scalar: F) -> Result<()> {
        if scalar.is_zero() {
            return Err(VectorError::DivisionByZero);
        }
        self.rows
            .iter_mut()
            .try_for_each(|row| row.divide_scalar_in_place(scalar))
    }

    pub fn pow_in_place<V: FeatureVector<F>>(&mut self, other: &V) -> Result<()> {
        self.broadcast(other, |row, v| row.pow_in_place(v))
    }

    pub fn pow_scalar_in_place(&mut self, exponent: F) {
        self.rows
            .iter_mut()
            .for_each(|row| row.pow_scalar_in_place(exponent));
    }
}

impl<'a, F: Float> IntoIterator for &'a FeatureMatrix<F> {
    type Item = &'a Vector<F>;
    type IntoIter = std::slice::Iter<'a, Vector<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense(values: &[f64]) -> Vector<f64> {
        Vector::Dense(DenseVector::from_vec(values.to_vec()))
    }

    fn sparse(values: &[f64]) -> Vector<f64> {
        Vector::Sparse(DenseVector::from_vec(values.to_vec()).to_sparse())
    }

    #[test]
    fn test_shape() {
        let m = FeatureMatrix::new(vec![dense(&[1.0, 2.0, 3.0]), sparse(&[0.0, 1.0, 0.0])]).unwrap();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.n_rows(), 2);
        assert_eq!(m.n_features(), 3);
        assert_eq!(FeatureMatrix::<f64>::new(vec![]).unwrap().shape(), (0, 0));
    }

    #[test]
    fn test_unequal_rows_are_rejected() {
        let err = FeatureMatrix::new(vec![
            dense(&[1.0, 2.0, 3.0]),
            sparse(&[1.0, 2.0, 3.0]),
            dense(&[1.0, 2.0, 3.0, 4.0]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            VectorError::ShapeMismatch {
                row: 2,
                expected: 3,
                found: 4
            }
        );
    }

    #[test]
    fn test_get_out_of_range() {
        let m = FeatureMatrix::new(vec![dense(&[1.0]), dense(&[2.0])]).unwrap();
        assert_eq!(m.get(1).unwrap().get(0).unwrap(), 2.0);
        assert_eq!(
            m.get(2).unwrap_err(),
            VectorError::IndexOutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn test_broadcast_mutates_rows() {
        let mut m = FeatureMatrix::new(vec![dense(&[1.0, 2.0]), sparse(&[0.0, 4.0])]).unwrap();
        m.add_in_place(&DenseVector::from_vec(vec![1.0, 1.0])).unwrap();
        assert_eq!(m.get(0).unwrap().to_vec(), vec![2.0, 3.0]);
        assert_eq!(m.get(1).unwrap().to_vec(), vec![1.0, 5.0]);
        assert!(m.get(1).unwrap().is_sparse());

        m.multiply_scalar_in_place(2.0);
        m.subtract_scalar_in_place(2.0);
        assert_eq!(m.get(0).unwrap().to_vec(), vec![2.0, 4.0]);
        assert_eq!(m.get(1).unwrap().to_vec(), vec![0.0, 8.0]);

        m.divide_scalar_in_place(2.0).unwrap();
        m.pow_scalar_in_place(2.0);
        assert_eq!(m.get(0).unwrap().to_vec(), vec![1.0, 4.0]);
        assert_eq!(m.get(1).unwrap().to_vec(), vec![0.0, 16.0]);
    }

    #[test]
    fn test_failed_broadcast_leaves_matrix_unchanged() {
        let mut m = FeatureMatrix::new(vec![dense(&[1.0, 2.0]), sparse(&[0.0, 4.0])]).unwrap();
        let before = m.clone();
        assert_eq!(
            m.add_in_place(&DenseVector::from_vec(vec![1.0])).unwrap_err(),
            VectorError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(m.divide_scalar_in_place(0.0).unwrap_err(), VectorError::DivisionByZero);
        assert_eq!(m, before);
    }

    #[test]
    fn test_random_initialize() {
        let m = FeatureMatrix::<f64>::random_initialize_with_seed(10, 4, None, 42).unwrap();
        assert_eq!(m.shape(), (10, 4));
        assert!(m.iter().all(|row| !row.is_sparse()));

        let s = FeatureMatrix::<f64>::random_initialize_with_seed(10, 4, Some(0.8), 42).unwrap();
        assert_eq!(s.shape(), (10, 4));
        assert!(s.iter().all(|row| row.is_sparse()));
        assert_eq!(s, FeatureMatrix::random_initialize_with_seed(10, 4, Some(0.8), 42).unwrap());

        assert!(FeatureMatrix::<f64>::random_initialize(3, 2, Some(-0.1)).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates_shape() {
        let uneven = r#"{"rows":[{"Sparse":{"len":3,"entries":{}}},{"Sparse":{"len":5,"entries":{"4":1.0}}}],"n_features":3}"#;
        let err = serde_json::from_str::<FeatureMatrix<f64>>(uneven).unwrap_err();
        assert!(err.to_string().contains("row 1 has length 5, expected 3"));

        let wrong_width = r#"{"rows":[{"Sparse":{"len":3,"entries":{}}}],"n_features":4}"#;
        assert!(serde_json::from_str::<FeatureMatrix<f64>>(wrong_width).is_err());

        let m = FeatureMatrix::new(vec![dense(&[1.0, 0.0]), sparse(&[0.0, 4.0])]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(serde_json::from_str::<FeatureMatrix<f64>>(&json).unwrap(), m);
    }

}
