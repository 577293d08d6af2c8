use tracing::{debug, warn};
use wordbag_helpers::{Float, SparseVector};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::{FeatureExtractor, Result, Vocabulary};

/// Binary bag-of-words features: `1.0` for every known token present in a
/// document, regardless of how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct BagOfWords {
    vocabulary: Vocabulary,
}

impl BagOfWords {
    pub fn build<I, D, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vocabulary = Vocabulary::build(documents);
        debug!(features = vocabulary.len(), "built bag-of-words vocabulary");
        Self { vocabulary }
    }

    pub fn from_vocabulary(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

impl<F: Float> FeatureExtractor<F> for BagOfWords {
    fn vocabulary(&self) -> &Vocabulary {
        BagOfWords::vocabulary(self)
    }

    fn vectorize<I, S>(&self, tokens: I) -> Result<SparseVector<F>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut n_tokens = 0usize;
        let entries = tokens
            .into_iter()
            .inspect(|_| n_tokens += 1)
            .filter_map(|token| self.vocabulary.index_of(token.as_ref()))
            .map(|index| (index, F::one()))
            .collect::<Vec<_>>();
        if entries.is_empty() && n_tokens > 0 {
            warn!(
                tokens = n_tokens,
                "no token of the document is in the vocabulary"
            );
        }
        Ok(SparseVector::from_entries(self.vocabulary.len(), entries)?)
    }
}
