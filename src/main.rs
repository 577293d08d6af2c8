// A small end-to-end run: train on a handful of labelled sentences, then
// score held-out ones with both extractors.
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use wordbag::{DataPoint, ExtractorKind, PerceptronConfig, TextClassifier, WordbagError};

fn main() -> Result<(), WordbagError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let train = [
        DataPoint::from_text("a wonderful heartfelt film", "positive"),
        DataPoint::from_text("loved every minute of it", "positive"),
        DataPoint::from_text("the cast is wonderful", "positive"),
        DataPoint::from_text("a dull and tedious film", "negative"),
        DataPoint::from_text("hated every minute of it", "negative"),
        DataPoint::from_text("the plot is tedious", "negative"),
    ];
    let test = [
        DataPoint::from_text("wonderful cast", "positive"),
        DataPoint::from_text("tedious and dull", "negative"),
        DataPoint::from_text("loved the plot", "positive"),
    ];
    let documents: Vec<&[String]> = test.iter().map(|dp| dp.tokens.as_slice()).collect();
    let gold: Vec<&str> = test.iter().map(|dp| dp.label).collect();

    for kind in [ExtractorKind::BagOfWords, ExtractorKind::TfIdf] {
        let config = PerceptronConfig::default().with_epochs(20).with_seed(42);
        let classifier: TextClassifier<&str> =
            TextClassifier::fit_data_points(&train, kind, config)?;
        let evaluator = classifier.evaluate(&documents, &gold)?;

        info!(extractor = %kind, predictions = ?evaluator.predictions(), "held-out predictions");
        println!("{kind}: accuracy {:.3}", evaluator.accuracy());
        println!("  macro {}", evaluator.macro_averages());
        println!("  micro {}", evaluator.micro_averages());
    }
    Ok(())
}
