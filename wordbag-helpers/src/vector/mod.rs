//! Feature vectors with interchangeable dense and sparse storage.
//!
//! [`FeatureVector`] is the shared contract. [`DenseVector`] stores every
//! coordinate in an `ndarray::Array1`, [`SparseVector`] stores only the non-zero
//! ones in an ordered map. Both return the same numbers for every operation:
//! an operation keeps the receiver's representation and computes the values of
//! the dense computation. [`Vector`] tags the two so heterogeneous rows can live
//! in one [`FeatureMatrix`](crate::FeatureMatrix).

mod dense;
mod sparse;
mod weight;

pub use dense::DenseVector;
pub use sparse::SparseVector;
pub use weight::WeightVector;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::{Float, Result, VectorError};

/// The numeric vector contract.
///
/// Length is fixed at construction. Every binary operation checks that the
/// operand has the receiver's length and fails with
/// [`VectorError::DimensionMismatch`] otherwise. Operations ending in
/// `_in_place` mutate the receiver; the others return a new value of the same
/// representation.
pub trait FeatureVector<F: Float> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coordinate at `index`.
    fn get(&self, index: usize) -> Result<F>;

    /// Assigns the coordinate at `index`.
    fn set(&mut self, index: usize, value: F) -> Result<()>;

    /// Coordinate at `index`, reading zero past the end. Callers check lengths first.
    fn value_at(&self, index: usize) -> F;

    /// Number of non-zero coordinates.
    fn nnz(&self) -> usize;

    /// Non-zero coordinates in ascending index order.
    fn nonzero(&self) -> Box<dyn Iterator<Item = (usize, F)> + '_>;

    fn is_sparse(&self) -> bool;

    /// Borrow as a dense vector when that is the underlying storage.
    fn as_dense(&self) -> Option<&DenseVector<F>> {
        None
    }

    /// Resets every coordinate to zero.
    fn zero(&mut self);

    /// Same as [`zero`](FeatureVector::zero).
    fn clear(&mut self) {
        self.zero();
    }

    fn to_dense(&self) -> DenseVector<F>;

    fn to_sparse(&self) -> SparseVector<F>;

    /// Replaces every coordinate `x` with `op(x)`.
    fn map_in_place<O>(&mut self, op: O)
    where
        O: Fn(F) -> F;

    /// Replaces every coordinate `x` with `op(x, y)`, `y` being the coordinate of
    /// `other` at the same index.
    fn zip_in_place<V, O>(&mut self, other: &V, op: O) -> Result<()>
    where
        V: FeatureVector<F>,
        O: Fn(F, F) -> F;

    fn check_len(&self, found: usize) -> Result<()> {
        if found != self.len() {
            return Err(VectorError::DimensionMismatch {
                expected: self.len(),
                found,
            });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(VectorError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// Inner product.
    ///
    /// Walks the non-zero entries of whichever operand stores fewer of them and
    /// probes the other, accumulating in ascending index order.
    fn dot<V>(&self, other: &V) -> Result<F>
    where
        V: FeatureVector<F>,
    {
        self.check_len(other.len())?;
        let dot = if self.nnz() <= other.nnz() {
            self.nonzero()
                .fold(F::zero(), |acc, (i, v)| acc + v * other.value_at(i))
        } else {
            other
                .nonzero()
                .fold(F::zero(), |acc, (i, v)| acc + self.value_at(i) * v)
        };
        Ok(dot)
    }

    fn sum(&self) -> F {
        self.nonzero().fold(F::zero(), |acc, (_, v)| acc + v)
    }

    /// Product of all coordinates.
    fn product(&self) -> F {
        (0..self.len()).fold(F::one(), |acc, i| acc * self.value_at(i))
    }

    /// Euclidean length.
    fn norm(&self) -> F {
        self.nonzero()
            .fold(F::zero(), |acc, (_, v)| acc + v * v)
            .sqrt()
    }

    /// Cosine of the angle between the two vectors.
    ///
    /// NaN when either vector has zero length.
    fn cosine_similarity<V>(&self, other: &V) -> Result<F>
    where
        V: FeatureVector<F>,
    {
        let dot = self.dot(other)?;
        Ok(dot / (self.norm() * other.norm()))
    }

    fn nonzero_indices(&self) -> Vec<usize> {
        self.nonzero().map(|(i, _)| i).collect()
    }

    fn nonzero_values(&self) -> Vec<F> {
        self.nonzero().map(|(_, v)| v).collect()
    }

    /// All coordinates, zeros included.
    fn to_vec(&self) -> Vec<F> {
        (0..self.len()).map(|i| self.value_at(i)).collect()
    }

    /// Overwrites every coordinate with the matching one of `other`.
    fn update<V>(&mut self, other: &V) -> Result<()>
    where
        V: FeatureVector<F>,
    {
        self.zip_in_place(other, |_, b| b)
    }

    fn add_in_place<V>(&mut self, other: &V) -> Result<()>
    where
        V: FeatureVector<F>,
    {
        self.zip_in_place(other, |a, b| a + b)
    }

    fn add_scalar_in_place(&mut self, scalar: F) {
        self.map_in_place(|a| a + scalar);
    }

    fn subtract_in_place<V>(&mut self, other: &V) -> Result<()>
    where
        V: FeatureVector<F>,
    {
        self.zip_in_place(other, |a, b| a - b)
    }

    fn subtract_scalar_in_place(&mut self, scalar: F) {
        self.map_in_place(|a| a - scalar);
    }

    fn multiply_in_place<V>(&mut self, other: &V) -> Result<()>
    where
        V: FeatureVector<F>,
    {
        self.zip_in_place(other, |a, b| a * b)
    }

    fn multiply_scalar_in_place(&mut self, scalar: F) {
        self.map_in_place(|a| a * scalar);
    }

    /// Coordinate-wise division with IEEE semantics for zero divisors.
    fn divide_in_place<V>(&mut self, other: &V) -> Result<()>
    where
        V: FeatureVector<F>,
    {
        self.zip_in_place(other, |a, b| a / b)
    }

    fn divide_scalar_in_place(&mut self, scalar: F) -> Result<()> {
        if scalar.is_zero() {
            return Err(VectorError::DivisionByZero);
        }
        self.map_in_place(|a| a / scalar);
        Ok(())
    }

    /// Raises each coordinate to the power given by the matching coordinate of `other`.
    fn pow_in_place<V>(&mut self, other: &V) -> Result<()>
    where
        V: FeatureVector<F>,
    {
        self.zip_in_place(other, |a, b| a.powf(b))
    }

    fn pow_scalar_in_place(&mut self, exponent: F) {
        self.map_in_place(|a| a.powf(exponent));
    }

    fn add<V>(&self, other: &V) -> Result<Self>
    where
        Self: Clone,
        V: FeatureVector<F>,
    {
        let mut out = self.clone();
        out.add_in_place(other)?;
        Ok(out)
    }

    fn add_scalar(&self, scalar: F) -> Self
    where
        Self: Clone,
    {
        let mut out = self.clone();
        out.add_scalar_in_place(scalar);
        out
    }

    fn subtract<V>(&self, other: &V) -> Result<Self>
    where
        Self: Clone,
        V: FeatureVector<F>,
    {
        let mut out = self.clone();
        out.subtract_in_place(other)?;
        Ok(out)
    }

    fn subtract_scalar(&self, scalar: F) -> Self
    where
        Self: Clone,
    {
        let mut out = self.clone();
        out.subtract_scalar_in_place(scalar);
        out
    }

    fn multiply<V>(&self, other: &V) -> Result<Self>
    where
        Self: Clone,
        V: FeatureVector<F>,
    {
        let mut out = self.clone();
        out.multiply_in_place(other)?;
        Ok(out)
    }

    fn multiply_scalar(&self, scalar: F) -> Self
    where
        Self: Clone,
    {
        let mut out = self.clone();
        out.multiply_scalar_in_place(scalar);
        out
    }

    fn divide<V>(&self, other: &V) -> Result<Self>
    where
        Self: Clone,
        V: FeatureVector<F>,
    {
        let mut out = self.clone();
        out.divide_in_place(other)?;
        Ok(out)
    }

    fn divide_scalar(&self, scalar: F) -> Result<Self>
    where
        Self: Clone,
    {
        let mut out = self.clone();
        out.divide_scalar_in_place(scalar)?;
        Ok(out)
    }

    fn pow<V>(&self, other: &V) -> Result<Self>
    where
        Self: Clone,
        V: FeatureVector<F>,
    {
        let mut out = self.clone();
        out.pow_in_place(other)?;
        Ok(out)
    }

    fn pow_scalar(&self, exponent: F) -> Self
    where
        Self: Clone,
    {
        let mut out = self.clone();
        out.pow_scalar_in_place(exponent);
        out
    }
}

/// A feature vector in either representation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Vector<F: Float> {
    Dense(DenseVector<F>),
    Sparse(SparseVector<F>),
}

impl<F: Float> Vector<F> {
    /// Switches to the other representation, keeping the values.
    pub fn toggle(self) -> Self {
        match self {
            Vector::Dense(v) => Vector::Sparse(v.to_sparse()),
            Vector::Sparse(v) => Vector::Dense(v.to_dense()),
        }
    }

    pub fn into_dense(self) -> DenseVector<F> {
        match self {
            Vector::Dense(v) => v,
            Vector::Sparse(v) => v.to_dense(),
        }
    }

    pub fn into_sparse(self) -> SparseVector<F> {
        match self {
            Vector::Dense(v) => v.to_sparse(),
            Vector::Sparse(v) => v,
        }
    }
}

impl<F: Float> From<DenseVector<F>> for Vector<F> {
    fn from(v: DenseVector<F>) -> Self {
        Vector::Dense(v)
    }
}

impl<F: Float> From<SparseVector<F>> for Vector<F> {
    fn from(v: SparseVector<F>) -> Self {
        Vector::Sparse(v)
    }
}

impl<F: Float> FeatureVector<F> for Vector<F> {
    fn len(&self) -> usize {
        match self {
            Vector::Dense(v) => v.len(),
            Vector::Sparse(v) => v.len(),
        }
    }

    fn get(&self, index: usize) -> Result<F> {
        match self {
            Vector::Dense(v) => v.get(index),
            Vector::Sparse(v) => v.get(index),
        }
    }

    fn set(&mut self, index: usize, value: F) -> Result<()> {
        match self {
            Vector::Dense(v) => v.set(index, value),
            Vector::Sparse(v) => v.set(index, value),
        }
    }

    fn value_at(&self, index: usize) -> F {
        match self {
            Vector::Dense(v) => v.value_at(index),
            Vector::Sparse(v) => v.value_at(index),
        }
    }

    fn nnz(&self) -> usize {
        match self {
            Vector::Dense(v) => v.nnz(),
            Vector::Sparse(v) => v.nnz(),
        }
    }

    fn nonzero(&self) -> Box<dyn Iterator<Item = (usize, F)> + '_> {
        match self {
            Vector::Dense(v) => v.nonzero(),
            Vector::Sparse(v) => v.nonzero(),
        }
    }

    fn is_sparse(&self) -> bool {
        matches!(self, Vector::Sparse(_))
    }

    fn as_dense(&self) -> Option<&DenseVector<F>> {
        match self {
            Vector::Dense(v) => Some(v),
            Vector::Sparse(_) => None,
        }
    }

    fn zero(&mut self) {
        match self {
            Vector::Dense(v) => v.zero(),
            Vector::Sparse(v) => v.zero(),
        }
    }

    fn to_dense(&self) -> DenseVector<F> {
        match self {
            Vector::Dense(v) => v.clone(),
            Vector::Sparse(v) => v.to_dense(),
        }
    }

    fn to_sparse(&self) -> SparseVector<F> {
        match self {
            Vector::Dense(v) => v.to_sparse(),
            Vector::Sparse(v) => v.clone(),
        }
    }

    fn map_in_place<O>(&mut self, op: O)
    where
        O: Fn(F) -> F,
    {
        match self {
            Vector::Dense(v) => v.map_in_place(op),
            Vector::Sparse(v) => v.map_in_place(op),
        }
    }

    fn zip_in_place<V, O>(&mut self, other: &V, op: O) -> Result<()>
    where
        V: FeatureVector<F>,
        O: Fn(F, F) -> F,
    {
        match self {
            Vector::Dense(v) => v.zip_in_place(other, op),
            Vector::Sparse(v) => v.zip_in_place(other, op),
        }
    }
}
