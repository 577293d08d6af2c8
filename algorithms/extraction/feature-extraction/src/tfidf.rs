use tracing::{debug, trace, warn};
use wordbag_helpers::{Float, SparseVector};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::{DocumentCounter, ExtractionError, FeatureExtractor, Result, TokenCounter, Vocabulary};

/// TF-IDF features.
///
/// For a known token `t` of a document `d` the stored value is
///
/// ```text
/// tf(t, d) = ln(1 + count(t, d) / len(d))
/// idf(t)   = ln(N / df(t))      (0 when df(t) == 0)
/// value    = tf(t, d) * idf(t)
/// ```
///
/// where `len(d)` counts every token of `d`, known or not, `df(t)` is the number
/// of training documents containing `t` and `N` the corpus size.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct TfIdf {
    vocabulary: Vocabulary,
    document_frequencies: DocumentCounter,
    n_documents: usize,
}

impl TfIdf {
    /// Builds the vocabulary and document frequencies, taking `N` to be the number
    /// of training documents.
    pub fn build<I, D, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Vocabulary::default();
        let mut document_frequencies = DocumentCounter::new();
        for document in documents {
            let tokens: Vec<S> = document.into_iter().collect();
            for token in &tokens {
                vocabulary.insert(token.as_ref());
            }
            document_frequencies.add_document(&tokens);
        }
        let n_documents = document_frequencies.n_documents();
        debug!(
            features = vocabulary.len(),
            documents = n_documents,
            "built tf-idf vocabulary"
        );
        Self {
            vocabulary,
            document_frequencies,
            n_documents,
        }
    }

    /// Like [`build`](Self::build) with an explicit corpus size `N`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidDocumentCount` if `n_documents` is smaller
    /// than the number of training documents.
    pub fn with_document_count<I, D, S>(documents: I, n_documents: usize) -> Result<Self>
    where
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut extractor = Self::build(documents);
        let observed = extractor.document_frequencies.n_documents();
        if n_documents < observed {
            return Err(ExtractionError::InvalidDocumentCount {
                provided: n_documents,
                observed,
            });
        }
        extractor.n_documents = n_documents;
        Ok(extractor)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    pub fn document_frequency(&self, token: &str) -> usize {
        self.document_frequencies.get(token)
    }

    pub fn idf<F: Float>(&self, token: &str) -> F {
        match self.document_frequency(token) {
            0 => F::zero(),
            df => (F::from_count(self.n_documents) / F::from_count(df)).ln(),
        }
    }

    pub fn tf<F: Float>(count: usize, document_len: usize) -> F {
        if document_len == 0 {
            return F::zero();
        }
        (F::one() + F::from_count(count) / F::from_count(document_len)).ln()
    }
}

impl<F: Float> FeatureExtractor<F> for TfIdf {
    fn vocabulary(&self) -> &Vocabulary {
        TfIdf::vocabulary(self)
    }

    fn vectorize<I, S>(&self, tokens: I) -> Result<SparseVector<F>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let counts = TokenCounter::from_tokens(tokens);
        let entries = counts
            .iter()
            .filter_map(|(token, count)| {
                let index = self.vocabulary.index_of(token)?;
                let tf: F = Self::tf(count, counts.total());
                Some((index, tf * self.idf::<F>(token)))
            })
            .collect::<Vec<_>>();
        if entries.is_empty() && !counts.is_empty() {
            warn!(
                tokens = counts.total(),
                "no token of the document is in the vocabulary"
            );
        } else if entries.len() < counts.len() {
            trace!(
                skipped = counts.len() - entries.len(),
                "ignored tokens outside the vocabulary"
            );
        }
        Ok(SparseVector::from_entries(self.vocabulary.len(), entries)?)
    }
}
