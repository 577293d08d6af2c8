use std::fmt::Debug;
use std::hash::Hash;

use tracing::{info, warn};

use crate::{
    DataPoint, Evaluator, Extractor, ExtractorKind, FeatureExtractor, FeatureMatrix,
    FeatureVector, FitReport, Float, LabelBinarizer, Perceptron, PerceptronConfig, Result,
};

/// Extractor, perceptron and label mapping trained together on tokenized
/// documents with two-valued labels.
#[derive(Debug, Clone)]
pub struct TextClassifier<L, F = f64>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    extractor: Extractor,
    perceptron: Perceptron<F>,
    binarizer: LabelBinarizer<L>,
    report: FitReport,
}

impl<L, F> TextClassifier<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    /// Builds a `kind` extractor over `documents`, vectorizes them and trains a
    /// perceptron on `labels`. The first label in `labels` is the positive class.
    ///
    /// # Errors
    ///
    /// * `Perceptron(InvalidConfig)` for a rejected configuration.
    /// * `Perceptron(InvalidLabelSet)` unless `labels` holds exactly two values.
    /// * `Perceptron(TargetLengthMismatch)` if documents and labels differ in number.
    pub fn fit<D, S>(
        documents: &[D],
        labels: &[L],
        kind: ExtractorKind,
        config: PerceptronConfig<F>,
    ) -> Result<Self>
    where
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut perceptron = Perceptron::new(config)?;
        let extractor = Extractor::build(kind, documents.iter().map(|d| d.as_ref()));
        let matrix: FeatureMatrix<F> = extractor.transform(documents.iter().map(|d| d.as_ref()))?;
        let (binarizer, report) = perceptron.fit_labels(&matrix, labels)?;
        info!(
            extractor = %kind,
            features = matrix.n_features(),
            documents = matrix.n_rows(),
            converged = report.converged(),
            "text classifier trained"
        );
        Ok(Self {
            extractor,
            perceptron,
            binarizer,
            report,
        })
    }

    /// [`fit`](Self::fit) over labelled data points.
    pub fn fit_data_points(
        data: &[DataPoint<L>],
        kind: ExtractorKind,
        config: PerceptronConfig<F>,
    ) -> Result<Self> {
        let documents: Vec<&[String]> = data.iter().map(|dp| dp.tokens.as_slice()).collect();
        let labels: Vec<L> = data.iter().map(|dp| dp.label.clone()).collect();
        Self::fit(&documents, &labels, kind, config)
    }

    /// Vectorizes `documents` with the trained vocabulary.
    pub fn vectorize<D, S>(&self, documents: &[D]) -> Result<FeatureMatrix<F>>
    where
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        let matrix: FeatureMatrix<F> =
            self.extractor.transform(documents.iter().map(|d| d.as_ref()))?;
        for (index, row) in matrix.iter().enumerate() {
            if row.nnz() == 0 {
                warn!(document = index, "document vectorized to all zeros");
            }
        }
        Ok(matrix)
    }

    pub fn predict<D, S>(&self, documents: &[D]) -> Result<Vec<L>>
    where
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        let matrix = self.vectorize(documents)?;
        Ok(self.perceptron.predict_labels(&matrix, &self.binarizer)?)
    }

    /// Predicts `documents` and compares the result against `gold`.
    pub fn evaluate<D, S>(&self, documents: &[D], gold: &[L]) -> Result<Evaluator<L>>
    where
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        let predictions = self.predict(documents)?;
        Ok(Evaluator::new(predictions, gold.to_vec())?)
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub fn perceptron(&self) -> &Perceptron<F> {
        &self.perceptron
    }

    pub fn binarizer(&self) -> &LabelBinarizer<L> {
        &self.binarizer
    }

    pub fn report(&self) -> &FitReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PerceptronError, WordbagError};

    fn training() -> (Vec<Vec<&'static str>>, Vec<&'static str>) {
        let documents = vec![
            vec!["great", "film", "loved", "it"],
            vec!["awful", "film", "hated", "it"],
            vec!["loved", "the", "acting"],
            vec!["hated", "the", "plot"],
        ];
        (documents, vec!["pos", "neg", "pos", "neg"])
    }

    #[test]
    fn test_fit_and_predict_training_documents() {
        let (documents, labels) = training();
        for kind in [ExtractorKind::BagOfWords, ExtractorKind::TfIdf] {
            let classifier: TextClassifier<&str> =
                TextClassifier::fit(&documents, &labels, kind, PerceptronConfig::default().with_epochs(20))
                    .unwrap();
            assert_eq!(classifier.extractor().kind(), kind);
            assert!(classifier.report().converged());
            assert_eq!(classifier.predict(&documents).unwrap(), labels);
        }
    }

    #[test]
    fn test_evaluate() {
        let (documents, labels) = training();
        let classifier: TextClassifier<&str> = TextClassifier::fit(
            &documents,
            &labels,
            ExtractorKind::BagOfWords,
            PerceptronConfig::default().with_epochs(20),
        )
        .unwrap();
        let evaluator = classifier.evaluate(&documents, &labels).unwrap();
        assert_eq!(evaluator.accuracy(), 1.0);
        assert_eq!(evaluator.macro_averages().f1(), 1.0);
    }

    #[test]
    fn test_fit_data_points() {
        let data = vec![
            DataPoint::from_text("good good fun", 1u8),
            DataPoint::from_text("bad boring", 0u8),
        ];
        let classifier: TextClassifier<u8, f32> =
            TextClassifier::fit_data_points(&data, ExtractorKind::BagOfWords, PerceptronConfig::default())
                .unwrap();
        assert_eq!(*classifier.binarizer().positive(), 1);
        assert_eq!(classifier.predict(&[vec!["fun"], vec!["boring"]]).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_errors_are_wrapped() {
        let (documents, _) = training();
        let result: Result<TextClassifier<&str>> = TextClassifier::fit(
            &documents,
            &["pos", "pos", "pos", "pos"],
            ExtractorKind::TfIdf,
            PerceptronConfig::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            WordbagError::Perceptron(PerceptronError::InvalidLabelSet(1))
        );
    }
}
