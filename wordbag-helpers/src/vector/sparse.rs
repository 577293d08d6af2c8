use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::{DenseVector, FeatureVector};
use crate::{Float, Result, VectorError};

/// A feature vector storing only its non-zero coordinates.
///
/// `set(i, 0.0)` removes the entry at `i`, so the map never holds an explicit
/// zero. Entries are kept in index order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", try_from = "SparseVectorRepr<F>")
)]
pub struct SparseVector<F: Float> {
    len: usize,
    entries: BTreeMap<usize, F>,
}

/// Unchecked wire form; every entry passes through `from_entries`.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(crate = "serde_crate")]
struct SparseVectorRepr<F> {
    len: usize,
    entries: BTreeMap<usize, F>,
}

#[cfg(feature = "serde")]
impl<F: Float> TryFrom<SparseVectorRepr<F>> for SparseVector<F> {
    type Error = VectorError;

    fn try_from(repr: SparseVectorRepr<F>) -> Result<Self> {
        Self::from_entries(repr.len, repr.entries)
    }
}

impl<F: Float> SparseVector<F> {
    /// An all-zero vector of length `len`.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            entries: BTreeMap::new(),
        }
    }

    /// Builds a vector from `(index, value)` pairs. Later pairs overwrite earlier
    /// ones; zero values are dropped.
    pub fn from_entries<I>(len: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, F)>,
    {
        let mut vector = Self::new(len);
        for (index, value) in entries {
            vector.set(index, value)?;
        }
        Ok(vector)
    }

    pub fn from_dense(dense: &DenseVector<F>) -> Self {
        Self {
            len: dense.len(),
            entries: dense.nonzero().collect(),
        }
    }

    /// A vector of `len` coordinates where each coordinate is zero with
    /// probability `sparsity` and otherwise drawn uniformly from `[0, 1)`.
    pub fn random<R: Rng>(len: usize, sparsity: f64, rng: &mut R) -> Result<Self> {
        if !(0.0..=1.0).contains(&sparsity) {
            return Err(VectorError::InvalidSparsity(sparsity));
        }
        let entries = (0..len)
            .filter_map(|i| {
                if !rng.random_bool(1.0 - sparsity) {
                    return None;
                }
                let value = rng.random_range(F::zero()..F::one());
                (!value.is_zero()).then_some((i, value))
            })
            .collect();
        Ok(Self { len, entries })
    }

    /// Stores `value` at an index already known to be in range.
    fn store(&mut self, index: usize, value: F) {
        if value.is_zero() {
            self.entries.remove(&index);
        } else {
            self.entries.insert(index, value);
        }
    }

    fn rebuild<O>(&mut self, op: O)
    where
        O: Fn(usize) -> F,
    {
        self.entries = (0..self.len)
            .map(|i| (i, op(i)))
            .filter(|(_, v)| !v.is_zero())
            .collect();
    }
}

impl<F: Float> FeatureVector<F> for SparseVector<F> {
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> Result<F> {
        self.check_index(index)?;
        Ok(self.value_at(index))
    }

    fn set(&mut self, index: usize, value: F) -> Result<()> {
        self.check_index(index)?;
        self.store(index, value);
        Ok(())
    }

    fn value_at(&self, index: usize) -> F {
        self.entries.get(&index).copied().unwrap_or_else(F::zero)
    }

    fn nnz(&self) -> usize {
        self.entries.len()
    }

    fn nonzero(&self) -> Box<dyn Iterator<Item = (usize, F)> + '_> {
        Box::new(self.entries.iter().map(|(&i, &v)| (i, v)))
    }

    fn is_sparse(&self) -> bool {
        true
    }

    fn zero(&mut self) {
        self.entries.clear();
    }

    fn to_dense(&self) -> DenseVector<F> {
        let mut values = vec![F::zero(); self.len];
        for (&i, &v) in &self.entries {
            values[i] = v;
        }
        DenseVector::from_vec(values)
    }

    fn to_sparse(&self) -> SparseVector<F> {
        self.clone()
    }

    /// Touches only the stored entries when `op(0) == 0`.
    fn map_in_place<O>(&mut self, op: O)
    where
        O: Fn(F) -> F,
    {
        if op(F::zero()).is_zero() {
            for value in self.entries.values_mut() {
                *value = op(*value);
            }
            self.entries.retain(|_, v| !v.is_zero());
        } else {
            let current = std::mem::take(&mut self.entries);
            let read = |i: usize| current.get(&i).copied().unwrap_or_else(F::zero);
            self.rebuild(|i| op(read(i)));
        }
    }

    /// Touches only the union of both operands' stored indices when
    /// `op(0, 0) == 0`.
    fn zip_in_place<V, O>(&mut self, other: &V, op: O) -> Result<()>
    where
        V: FeatureVector<F>,
        O: Fn(F, F) -> F,
    {
        self.check_len(other.len())?;
        if op(F::zero(), F::zero()).is_zero() {
            let indices: BTreeSet<usize> = self
                .entries
                .keys()
                .copied()
                .chain(other.nonzero().map(|(i, _)| i))
                .collect();
            for i in indices {
                let value = op(self.value_at(i), other.value_at(i));
                self.store(i, value);
            }
        } else {
            let current = std::mem::take(&mut self.entries);
            let read = |i: usize| current.get(&i).copied().unwrap_or_else(F::zero);
            self.rebuild(|i| op(read(i), other.value_at(i)));
        }
        Ok(())
    }
}
