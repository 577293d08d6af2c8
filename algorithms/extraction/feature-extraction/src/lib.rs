use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;
// Core components from the shared library.
use wordbag_helpers::{FeatureMatrix, Float, SparseVector, VectorError};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

mod bag_of_words;
mod counter;
mod tfidf;
mod vocabulary;

pub use bag_of_words::BagOfWords;
pub use counter::{DocumentCounter, TokenCounter};
pub use tfidf::TfIdf;
pub use vocabulary::Vocabulary;

/// Errors that can occur while building extractors or vectorizing documents.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    /// The explicit corpus size is smaller than the number of training documents.
    #[error("document count {provided} is smaller than the {observed} training documents")]
    InvalidDocumentCount { provided: usize, observed: usize },
    /// An extractor name that does not match any known kind.
    #[error("unknown extractor kind `{0}`")]
    UnknownKind(String),
    #[error(transparent)]
    Vector(#[from] VectorError),
}

pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Turns token sequences into feature vectors over a fixed vocabulary.
///
/// Vectorization only reads the vocabulary, so one extractor can serve any
/// number of documents, from any number of threads.
pub trait FeatureExtractor<F: Float> {
    fn vocabulary(&self) -> &Vocabulary;

    /// Length of every vector this extractor produces.
    fn feature_count(&self) -> usize {
        self.vocabulary().len()
    }

    /// Vectorizes one document. Tokens outside the vocabulary contribute nothing.
    fn vectorize<I, S>(&self, tokens: I) -> Result<SparseVector<F>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>;

    /// Vectorizes every document into the rows of a matrix.
    fn transform<I, D, S>(&self, documents: I) -> Result<FeatureMatrix<F>>
    where
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = documents
            .into_iter()
            .map(|document| self.vectorize(document))
            .collect::<Result<Vec<_>>>()?;
        debug!(rows = rows.len(), features = self.feature_count(), "vectorized documents");
        Ok(FeatureMatrix::from_rows(rows)?)
    }

    /// Parallel [`transform`](FeatureExtractor::transform), one task per document.
    #[cfg(feature = "rayon")]
    fn transform_par<S>(&self, documents: &[Vec<S>]) -> Result<FeatureMatrix<F>>
    where
        Self: Sync,
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        let rows = documents
            .par_iter()
            .map(|document| self.vectorize(document))
            .collect::<Result<Vec<_>>>()?;
        Ok(FeatureMatrix::from_rows(rows)?)
    }
}

/// Selects an extractor implementation at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "kebab-case")
)]
pub enum ExtractorKind {
    #[default]
    BagOfWords,
    TfIdf,
}

impl Display for ExtractorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractorKind::BagOfWords => write!(f, "bag-of-words"),
            ExtractorKind::TfIdf => write!(f, "tf-idf"),
        }
    }
}

impl FromStr for ExtractorKind {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bow" | "bag-of-words" | "bagofwords" => Ok(ExtractorKind::BagOfWords),
            "tfidf" | "tf-idf" => Ok(ExtractorKind::TfIdf),
            _ => Err(ExtractionError::UnknownKind(s.to_owned())),
        }
    }
}

/// Either extractor, chosen by [`ExtractorKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Extractor {
    BagOfWords(BagOfWords),
    TfIdf(TfIdf),
}

impl Extractor {
    pub fn build<I, D, S>(kind: ExtractorKind, documents: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match kind {
            ExtractorKind::BagOfWords => Extractor::BagOfWords(BagOfWords::build(documents)),
            ExtractorKind::TfIdf => Extractor::TfIdf(TfIdf::build(documents)),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        match self {
            Extractor::BagOfWords(e) => e.vocabulary(),
            Extractor::TfIdf(e) => e.vocabulary(),
        }
    }

    pub fn kind(&self) -> ExtractorKind {
        match self {
            Extractor::BagOfWords(_) => ExtractorKind::BagOfWords,
            Extractor::TfIdf(_) => ExtractorKind::TfIdf,
        }
    }
}

impl<F: Float> FeatureExtractor<F> for Extractor {
    fn vocabulary(&self) -> &Vocabulary {
        Extractor::vocabulary(self)
    }

    fn vectorize<I, S>(&self, tokens: I) -> Result<SparseVector<F>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self {
            Extractor::BagOfWords(e) => e.vectorize(tokens),
            Extractor::TfIdf(e) => e.vectorize(tokens),
        }
    }
}
