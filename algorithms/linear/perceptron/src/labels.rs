use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexSet;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::{PerceptronError, Result};

/// Maps a two-valued label set onto `+1` / `-1` targets and back.
///
/// The first label seen while fitting becomes the positive class.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct LabelBinarizer<L> {
    positive: L,
    negative: L,
}

impl<L> LabelBinarizer<L>
where
    L: Clone + Eq + Hash + Debug,
{
    /// # Errors
    ///
    /// Returns `PerceptronError::InvalidLabelSet` with the number of distinct
    /// labels found when that number is not exactly two.
    pub fn fit(labels: &[L]) -> Result<Self> {
        let distinct: IndexSet<&L> = labels.iter().collect();
        match (distinct.len(), distinct.first(), distinct.last()) {
            (2, Some(&positive), Some(&negative)) => Ok(Self {
                positive: positive.clone(),
                negative: negative.clone(),
            }),
            (n, _, _) => Err(PerceptronError::InvalidLabelSet(n)),
        }
    }

    pub fn positive(&self) -> &L {
        &self.positive
    }

    pub fn negative(&self) -> &L {
        &self.negative
    }

    pub fn target(&self, label: &L) -> Result<i8> {
        if *label == self.positive {
            Ok(1)
        } else if *label == self.negative {
            Ok(-1)
        } else {
            Err(PerceptronError::UnknownLabel(format!("{label:?}")))
        }
    }

    pub fn transform(&self, labels: &[L]) -> Result<Vec<i8>> {
        labels.iter().map(|label| self.target(label)).collect()
    }

    /// Non-negative targets map to the positive label.
    pub fn label(&self, target: i8) -> &L {
        if target >= 0 {
            &self.positive
        } else {
            &self.negative
        }
    }

    pub fn inverse_transform(&self, targets: &[i8]) -> Vec<L> {
        targets.iter().map(|&t| self.label(t).clone()).collect()
    }
}
