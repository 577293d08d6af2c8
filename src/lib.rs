//! Bag-of-words text classification: feature extraction, a binary perceptron
//! and confusion-matrix evaluation over one dual dense/sparse vector type.

use thiserror::Error;

mod classifier;

pub use classifier::TextClassifier;

// Re-export the workspace crates under one roof.
pub use evaluation::{
    ConfusionMatrix, EvaluationError, Evaluator, Scores, f1_score, macro_average, micro_average,
};
pub use feature_extraction::{
    BagOfWords, DocumentCounter, ExtractionError, Extractor, ExtractorKind, FeatureExtractor,
    TfIdf, TokenCounter, Vocabulary,
};
pub use perceptron::{FitReport, LabelBinarizer, Perceptron, PerceptronConfig, PerceptronError};
pub use wordbag_helpers::{
    DataPoint, DenseVector, FeatureMatrix, FeatureVector, Float, SparseVector, Vector,
    VectorError, WeightVector,
};

/// Any error raised by the toolkit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WordbagError {
    #[error(transparent)]
    Vector(#[from] VectorError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Perceptron(#[from] PerceptronError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

pub type Result<T> = std::result::Result<T, WordbagError>;
