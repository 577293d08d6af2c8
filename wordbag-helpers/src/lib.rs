use ndarray::{NdFloat, ScalarOperand};

use num_traits::{FromPrimitive, NumCast, Signed};
use rand::distr::uniform::SampleUniform;

use std::iter::Sum;

// Include submodules
mod common;
mod error;
mod matrix;
pub mod vector;

// Re-export types from submodules
pub use common::DataPoint;
pub use error::{Result, VectorError};
pub use matrix::FeatureMatrix;
pub use vector::{DenseVector, FeatureVector, SparseVector, Vector, WeightVector};

pub trait Float:
    NdFloat
    + FromPrimitive
    + Default
    + Signed
    + Sum
    + SampleUniform
    + ScalarOperand
    + std::marker::Unpin
{
    fn cast<T: NumCast>(x: T) -> Option<Self> {
        NumCast::from(x)
    }

    /// Converts a count (token occurrences, document frequencies, row numbers)
    /// into the float type.
    fn from_count(n: usize) -> Self;
}

impl Float for f32 {
    fn from_count(n: usize) -> Self {
        n as f32
    }
}

impl Float for f64 {
    fn from_count(n: usize) -> Self {
        n as f64
    }
}
