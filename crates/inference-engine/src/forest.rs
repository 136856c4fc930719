//! Bagged Decision-Tree Forest

use crate::classifier::Classifier;
use crate::InferenceError;
use linfa::traits::Fit;
use linfa::Dataset;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Forest training parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees in the ensemble
    pub n_trees: usize,
    /// Maximum depth of each tree (unbounded when `None`)
    pub max_depth: Option<usize>,
    /// Features sampled per tree (`ceil(sqrt(n_features))` when `None`)
    pub max_features: Option<usize>,
    /// Seed for bootstrap and feature sampling
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            max_features: None,
            seed: 42,
        }
    }
}

impl ForestParams {
    fn features_per_tree(&self, n_features: usize) -> usize {
        let sqrt_rule = (n_features as f64).sqrt().ceil() as usize;
        self.max_features.unwrap_or(sqrt_rule).clamp(1, n_features)
    }
}

/// One ensemble member and the feature columns it was trained on
#[derive(Serialize, Deserialize)]
struct SubspaceTree {
    features: Vec<usize>,
    tree: DecisionTree<f64, usize>,
}

impl SubspaceTree {
    fn vote(&self, features: &[f64]) -> Result<usize, InferenceError> {
        use linfa::traits::Predict;

        let projected = self
            .features
            .iter()
            .map(|&column| {
                features.get(column).copied().ok_or_else(|| {
                    InferenceError::InferenceFailed(format!(
                        "Tree uses feature column {} but the input has {}",
                        column,
                        features.len()
                    ))
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        let row = Array2::from_shape_vec((1, projected.len()), projected)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let predicted: Array1<usize> = self.tree.predict(&row);
        predicted
            .iter()
            .next()
            .copied()
            .ok_or_else(|| InferenceError::InferenceFailed("Tree returned no prediction".to_string()))
    }
}

/// Random forest classifier.
///
/// Every tree is fit on a bootstrap sample of the rows and a random subset of
/// the feature columns. Class probabilities are the fraction of trees voting
/// for each class.
#[derive(Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    n_classes: usize,
    trees: Vec<SubspaceTree>,
}

impl RandomForest {
    /// Fit a forest on a dense record matrix and encoded targets
    pub fn fit(
        records: &Array2<f64>,
        targets: &Array1<usize>,
        n_classes: usize,
        params: &ForestParams,
    ) -> Result<Self, InferenceError> {
        let (n_rows, n_features) = records.dim();

        if n_rows == 0 {
            return Err(InferenceError::TrainingFailed("No training rows".to_string()));
        }
        if n_features == 0 {
            return Err(InferenceError::TrainingFailed("No feature columns".to_string()));
        }
        if targets.len() != n_rows {
            return Err(InferenceError::InvalidInputShape {
                expected: n_rows,
                actual: targets.len(),
            });
        }
        if params.n_trees == 0 {
            return Err(InferenceError::TrainingFailed("Forest needs at least one tree".to_string()));
        }
        if let Some(&label) = targets.iter().find(|&&label| label >= n_classes) {
            return Err(InferenceError::UnknownClass {
                index: label,
                classes: n_classes,
            });
        }

        let per_tree = params.features_per_tree(n_features);
        info!(
            "Fitting random forest: trees={}, rows={}, features={}, features_per_tree={}, classes={}",
            params.n_trees, n_rows, n_features, per_tree, n_classes
        );

        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.n_trees);

        for member in 0..params.n_trees {
            let rows: Vec<usize> = (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
            let mut features = rand::seq::index::sample(&mut rng, n_features, per_tree).into_vec();
            features.sort_unstable();

            let sample = records.select(Axis(0), &rows).select(Axis(1), &features);
            let labels = targets.select(Axis(0), &rows);
            let dataset = Dataset::new(sample, labels);

            let mut tree_params = DecisionTree::<f64, usize>::params();
            if let Some(depth) = params.max_depth {
                tree_params = tree_params.max_depth(Some(depth));
            }

            let tree = tree_params
                .fit(&dataset)
                .map_err(|e| InferenceError::TrainingFailed(format!("tree {}: {}", member, e)))?;

            trees.push(SubspaceTree { features, tree });
        }

        debug!("Random forest fitted with {} trees", trees.len());

        Ok(Self {
            n_features,
            n_classes,
            trees,
        })
    }

    /// Number of trees in the ensemble
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Fraction of rows whose predicted class matches the target
    pub fn accuracy(&self, records: &Array2<f64>, targets: &Array1<usize>) -> Result<f64, InferenceError> {
        if records.nrows() == 0 {
            return Ok(0.0);
        }

        let mut correct = 0usize;
        for (row, &target) in records.outer_iter().zip(targets.iter()) {
            let features = row.to_vec();
            if self.predict(&features)? == target {
                correct += 1;
            }
        }

        Ok(correct as f64 / records.nrows() as f64)
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict(&self, features: &[f64]) -> Result<usize, InferenceError> {
        let probabilities = self.predict_proba(features)?;

        let mut best: Option<(usize, f64)> = None;
        for (class, &p) in probabilities.iter().enumerate() {
            match best {
                Some((_, top)) if p <= top => {}
                _ => best = Some((class, p)),
            }
        }

        best.map(|(class, _)| class)
            .ok_or(InferenceError::EmptyProbabilities)
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if features.len() != self.n_features {
            return Err(InferenceError::InvalidInputShape {
                expected: self.n_features,
                actual: features.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(InferenceError::InferenceFailed("Forest has no trees".to_string()));
        }

        let mut votes = vec![0usize; self.n_classes];
        for member in &self.trees {
            let class = member.vote(features)?;
            let slot = votes.get_mut(class).ok_or(InferenceError::UnknownClass {
                index: class,
                classes: self.n_classes,
            })?;
            *slot += 1;
        }

        let total = self.trees.len() as f64;
        Ok(votes.into_iter().map(|count| count as f64 / total).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Class 0 when feature 0 is set, class 1 when feature 1 is set
    fn toy_data() -> (Array2<f64>, Array1<usize>) {
        let records = array![
            [1.0, 0.0],
            [1.0, 0.0],
            [1.0, 0.0],
            [1.0, 0.0],
            [0.0, 1.0],
            [0.0, 1.0],
            [0.0, 1.0],
            [0.0, 1.0],
        ];
        let targets = array![0, 0, 0, 0, 1, 1, 1, 1];
        (records, targets)
    }

    fn params() -> ForestParams {
        ForestParams {
            n_trees: 15,
            max_features: Some(2),
            ..Default::default()
        }
    }

    #[test]
    fn test_fit_and_predict() {
        let (records, targets) = toy_data();
        let forest = RandomForest::fit(&records, &targets, 2, &params()).unwrap();

        assert_eq!(forest.n_features(), 2);
        assert_eq!(forest.n_classes(), 2);
        assert_eq!(forest.n_trees(), 15);
        assert_eq!(forest.predict(&[1.0, 0.0]).unwrap(), 0);
        assert_eq!(forest.predict(&[0.0, 1.0]).unwrap(), 1);
        assert!((forest.accuracy(&records, &targets).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (records, targets) = toy_data();
        let forest = RandomForest::fit(&records, &targets, 2, &params()).unwrap();

        let proba = forest.predict_proba(&[1.0, 0.0]).unwrap();
        assert_eq!(proba.len(), 2);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let (records, targets) = toy_data();
        let params = ForestParams {
            n_trees: 10,
            max_features: Some(1),
            ..Default::default()
        };
        let a = RandomForest::fit(&records, &targets, 2, &params).unwrap();
        let b = RandomForest::fit(&records, &targets, 2, &params).unwrap();

        let features_a: Vec<_> = a.trees.iter().map(|t| t.features.clone()).collect();
        let features_b: Vec<_> = b.trees.iter().map(|t| t.features.clone()).collect();
        assert_eq!(features_a, features_b);
        assert_eq!(
            a.predict_proba(&[1.0, 1.0]).unwrap(),
            b.predict_proba(&[1.0, 1.0]).unwrap()
        );
    }

    #[test]
    fn test_wrong_feature_count() {
        let (records, targets) = toy_data();
        let forest = RandomForest::fit(&records, &targets, 2, &params()).unwrap();
        assert!(matches!(
            forest.predict(&[1.0]),
            Err(InferenceError::InvalidInputShape { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_rejects_bad_training_input() {
        let (records, targets) = toy_data();
        let no_trees = ForestParams {
            n_trees: 0,
            ..Default::default()
        };
        assert!(RandomForest::fit(&records, &targets, 2, &no_trees).is_err());
        assert!(matches!(
            RandomForest::fit(&records, &targets, 1, &params()).err(),
            Some(InferenceError::UnknownClass { index: 1, classes: 1 })
        ));
    }

    #[test]
    fn test_serde_round_trip_keeps_predictions() {
        let (records, targets) = toy_data();
        let forest = RandomForest::fit(&records, &targets, 2, &params()).unwrap();

        let blob = serde_json::to_vec(&forest).unwrap();
        let restored: RandomForest = serde_json::from_slice(&blob).unwrap();

        assert_eq!(restored.n_trees(), forest.n_trees());
        assert_eq!(
            restored.predict_proba(&[0.0, 1.0]).unwrap(),
            forest.predict_proba(&[0.0, 1.0]).unwrap()
        );
    }

    #[test]
    fn test_out_of_range_tree_column_is_an_error() {
        let (records, targets) = toy_data();
        let mut forest = RandomForest::fit(&records, &targets, 2, &params()).unwrap();
        forest.trees[0].features = vec![99];

        assert!(matches!(
            forest.predict(&[1.0, 0.0]),
            Err(InferenceError::InferenceFailed(_))
        ));
    }
}
