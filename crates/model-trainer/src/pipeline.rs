//! Training Pipeline

use crate::dataset::SymptomDataset;
use crate::settings::TrainerConfig;
use crate::split::train_test_split;
use crate::TrainingError;
use inference_engine::{Classifier, LabelEncoder, RandomForest};
use ndarray::Array1;
use storage::{ArtifactPaths, ArtifactStore};
use tracing::info;

/// Fitted classifier and label encoder
pub struct TrainedModel {
    /// Forest fit on the training partition
    pub forest: RandomForest,
    /// Encoder fit on every label in the dataset
    pub encoder: LabelEncoder,
    /// Rows used for fitting
    pub n_train: usize,
    /// Rows held out
    pub n_test: usize,
    /// Accuracy on the held-out rows, when there are any
    pub test_accuracy: Option<f64>,
}

/// Summary of a finished training run
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// Symptom columns the model expects
    pub n_features: usize,
    /// Distinct diseases
    pub n_classes: usize,
    /// Rows used for fitting
    pub n_train: usize,
    /// Rows held out
    pub n_test: usize,
    /// Accuracy on the held-out rows
    pub test_accuracy: Option<f64>,
    /// Where the artifacts were written
    pub artifacts: ArtifactPaths,
}

/// Encode labels, split rows and fit the forest
pub fn train(dataset: &SymptomDataset, config: &TrainerConfig) -> Result<TrainedModel, TrainingError> {
    let (encoder, encoded) = LabelEncoder::fit_transform(dataset.labels.as_slice());
    info!("Encoded {} distinct diseases", encoder.classes().len());

    let split = train_test_split(dataset.n_rows(), config.test_ratio, config.seed)?;

    let train_x = dataset.matrix(&split.train);
    let train_y = Array1::from_vec(split.train.iter().map(|&row| encoded[row]).collect());
    let forest = RandomForest::fit(
        &train_x,
        &train_y,
        encoder.classes().len(),
        &config.forest_params(),
    )?;

    let test_accuracy = if split.test.is_empty() {
        None
    } else {
        let test_x = dataset.matrix(&split.test);
        let test_y = Array1::from_vec(split.test.iter().map(|&row| encoded[row]).collect());
        let accuracy = forest.accuracy(&test_x, &test_y)?;
        info!(
            "Hold-out accuracy: {:.2}% on {} rows",
            accuracy * 100.0,
            split.test.len()
        );
        Some(accuracy)
    };

    Ok(TrainedModel {
        forest,
        encoder,
        n_train: split.train.len(),
        n_test: split.test.len(),
        test_accuracy,
    })
}

/// Run the whole job: load, fit, then persist the symptom list, model and encoder
pub fn run(config: &TrainerConfig) -> Result<TrainingReport, TrainingError> {
    let dataset = SymptomDataset::from_path(&config.dataset_path)?;
    let store = ArtifactStore::in_dir(&config.artifact_dir);

    let model = train(&dataset, config)?;

    store.save_symptoms(&dataset.feature_names)?;
    info!(
        "Symptoms list saved successfully at {}",
        store.paths().symptoms.display()
    );

    store.save_model(&model.forest)?;
    info!("Model saved successfully at {}", store.paths().model.display());

    store.save_encoder(&model.encoder)?;
    info!(
        "Label encoder saved successfully at {}",
        store.paths().encoder.display()
    );

    info!("Model trained with {} features.", model.forest.n_features());

    Ok(TrainingReport {
        n_features: model.forest.n_features(),
        n_classes: model.encoder.classes().len(),
        n_train: model.n_train,
        n_test: model.n_test,
        test_accuracy: model.test_accuracy,
        artifacts: store.paths().clone(),
    })
}
