//! Example demonstrating error handling with the perceptron.
//!
//! Every failure mode of training and prediction is reported through
//! `PerceptronError` instead of a panic.

use perceptron::{Perceptron, PerceptronConfig, PerceptronError};
use wordbag_helpers::{DenseVector, FeatureMatrix, SparseVector, Vector};

fn matrix(rows: &[&[f64]]) -> FeatureMatrix<f64> {
    FeatureMatrix::from_rows(rows.iter().map(|r| DenseVector::from_vec(r.to_vec())))
        .expect("rows share one length")
}

fn main() {
    println!("Perceptron Error Handling Examples");
    println!("==================================");

    let training = matrix(&[&[1.0, 0.0], &[0.8, 0.2], &[-1.0, 0.0], &[-0.7, -0.3]]);

    // Example 1: Invalid configuration
    println!("\n1. Handling an invalid learning rate:");
    match Perceptron::new(PerceptronConfig::<f64>::default().with_learning_rate(-1.0)) {
        Ok(_) => println!("   Perceptron created successfully"),
        Err(e @ PerceptronError::InvalidConfig(_)) => println!("   ✓ Caught expected error: {e}"),
        Err(e) => println!("   ✗ Unexpected error: {e}"),
    }

    // Example 2: Predicting before training
    println!("\n2. Predicting before fit:");
    let untrained = Perceptron::<f64>::default();
    match untrained.predict(&training) {
        Ok(predictions) => println!("   Predictions: {predictions:?}"),
        Err(PerceptronError::NotFitted) => {
            println!("   ✓ Caught expected error: {}", PerceptronError::NotFitted)
        }
        Err(e) => println!("   ✗ Unexpected error: {e}"),
    }

    // Example 3: Bad targets
    println!("\n3. Targets outside {{+1, -1}}:");
    let mut perceptron = Perceptron::default();
    match perceptron.fit(&training, &[1, 1, 0, -1]) {
        Ok(_) => println!("   Training succeeded"),
        Err(e @ PerceptronError::InvalidTarget(_)) => println!("   ✓ Caught expected error: {e}"),
        Err(e) => println!("   ✗ Unexpected error: {e}"),
    }

    // Example 4: Successful training and prediction
    println!("\n4. Successful training with error handling:");
    match perceptron.fit(&training, &[1, 1, -1, -1]) {
        Ok(report) => {
            println!(
                "   ✓ Trained for {} epochs, mistakes per epoch: {:?}",
                report.epochs(),
                report.mistakes()
            );
            let probe = SparseVector::from_entries(2, [(0, 0.5)]).expect("index in range");
            match perceptron.predict_one(&probe) {
                Ok(label) => println!("   ✓ Prediction for [0.5, 0.0]: {label:+}"),
                Err(e) => println!("   ✗ Prediction failed: {e}"),
            }
        }
        Err(e) => println!("   ✗ Training failed: {e}"),
    }

    // Example 5: Dimension mismatch surfaces from the vector layer
    println!("\n5. Predicting rows of the wrong length:");
    let wide = FeatureMatrix::new(vec![Vector::Dense(DenseVector::from_vec(vec![1.0, 0.0, 0.0]))])
        .expect("single row");
    match perceptron.predict(&wide) {
        Ok(predictions) => println!("   Predictions: {predictions:?}"),
        Err(e @ PerceptronError::Vector(_)) => println!("   ✓ Caught expected error: {e}"),
        Err(e) => println!("   ✗ Unexpected error: {e}"),
    }

    // Example 6: Error propagation with labels
    println!("\n6. Error propagation in functions:");

    fn classify() -> Result<Vec<&'static str>, PerceptronError> {
        let training = matrix(&[&[2.0], &[-2.0]]);
        let mut perceptron = Perceptron::default();
        let (labels, _) = perceptron.fit_labels(&training, &["positive", "negative"])?;
        perceptron.predict_labels(&matrix(&[&[0.5], &[-3.0]]), &labels)
    }

    match classify() {
        Ok(labels) => println!("   ✓ Classification result: {labels:?}"),
        Err(e) => println!("   ✗ Classification failed: {e}"),
    }

    println!("\n7. Error types and their meanings:");
    println!("   - NotFitted: predict called before fit or set_weights");
    println!("   - InvalidLabelSet: label-based training needs exactly two labels");
    println!("   - InvalidTarget: targets must be +1 or -1");
    println!("   - TargetLengthMismatch: one target per matrix row");
    println!("   - InvalidConfig: learning rate, epochs or theta out of range");
    println!("   - Vector: dimension mismatch between weights and rows");

    println!("\nAll examples completed successfully!");
}
