//! Seeded Train/Test Split

use crate::TrainingError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Row indices of the two partitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    /// Rows used to fit the model
    pub train: Vec<usize>,
    /// Rows held out for evaluation
    pub test: Vec<usize>,
}

/// Shuffle row indices with a seeded RNG and hold out `ceil(n * test_ratio)`
pub fn train_test_split(n_rows: usize, test_ratio: f64, seed: u64) -> Result<Split, TrainingError> {
    if !(0.0..1.0).contains(&test_ratio) {
        return Err(TrainingError::InvalidConfig(format!(
            "test_ratio must be in [0, 1), got {}",
            test_ratio
        )));
    }

    let n_test = (n_rows as f64 * test_ratio).ceil() as usize;
    if n_test >= n_rows {
        return Err(TrainingError::InsufficientRows { rows: n_rows });
    }

    let mut order: Vec<usize> = (0..n_rows).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));

    let train = order.split_off(n_test);
    Ok(Split { train, test: order })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eighty_twenty() {
        let split = train_test_split(10, 0.2, 42).unwrap();
        assert_eq!(split.train.len(), 8);
        assert_eq!(split.test.len(), 2);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_test_size_rounds_up() {
        let split = train_test_split(7, 0.2, 1).unwrap();
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 5);
    }

    #[test]
    fn test_same_seed_same_split() {
        assert_eq!(
            train_test_split(50, 0.2, 42).unwrap(),
            train_test_split(50, 0.2, 42).unwrap()
        );
    }

    #[test]
    fn test_zero_ratio_keeps_everything() {
        let split = train_test_split(3, 0.0, 42).unwrap();
        assert_eq!(split.train.len(), 3);
        assert!(split.test.is_empty());
    }

    #[test]
    fn test_rejects_degenerate_inputs() {
        assert!(matches!(
            train_test_split(1, 0.2, 42),
            Err(TrainingError::InsufficientRows { rows: 1 })
        ));
        assert!(matches!(
            train_test_split(0, 0.2, 42),
            Err(TrainingError::InsufficientRows { rows: 0 })
        ));
        assert!(matches!(
            train_test_split(10, 1.0, 42),
            Err(TrainingError::InvalidConfig(_))
        ));
    }
}
