//! Symptom Dataset Loading

use crate::TrainingError;
use ndarray::Array2;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Label used for a row whose target cell is missing
const FILLED_LABEL: &str = "0";

/// Cell contents read as missing values, in addition to empty cells
const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_TOKENS.contains(&cell)
}

/// Symptom table loaded from CSV.
///
/// Every column except the last is a numeric feature; the last column holds
/// the disease label. Empty cells and NA markers such as `NA`, `NaN` or
/// `null` are filled with zero while loading.
#[derive(Debug, Clone, PartialEq)]
pub struct SymptomDataset {
    /// Feature column names in file order
    pub feature_names: Vec<String>,
    /// Row-major feature values
    pub records: Vec<Vec<f64>>,
    /// Disease label per row
    pub labels: Vec<String>,
    /// Number of missing cells that were filled
    pub filled_cells: usize,
}

impl SymptomDataset {
    /// Load a dataset from a CSV file with a header row
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TrainingError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TrainingError::DatasetNotFound(path.to_path_buf()));
        }

        info!("Loading dataset from {}", path.display());
        let file = std::fs::File::open(path)
            .map_err(|e| TrainingError::Csv(csv::Error::from(e)))?;
        Self::from_reader(file)
    }

    /// Load a dataset from any CSV source with a header row
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, TrainingError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv.headers()?.iter().map(str::to_string).collect();
        if headers.len() < 2 {
            return Err(TrainingError::NotEnoughColumns);
        }

        let feature_names = headers[..headers.len() - 1].to_vec();
        let mut records = Vec::new();
        let mut labels = Vec::new();
        let mut filled_cells = 0usize;

        for (index, row) in csv.records().enumerate() {
            let row = row?;
            let line = index + 1;

            let mut values = Vec::with_capacity(feature_names.len());
            for (column, cell) in feature_names.iter().zip(row.iter()) {
                let cell = cell.trim();
                if is_missing(cell) {
                    filled_cells += 1;
                    values.push(0.0);
                    continue;
                }

                let invalid = || TrainingError::InvalidCell {
                    row: line,
                    column: column.clone(),
                    value: cell.to_string(),
                };
                let value = cell.parse::<f64>().map_err(|_| invalid())?;
                if !value.is_finite() {
                    return Err(invalid());
                }
                values.push(value);
            }

            let label = row.get(feature_names.len()).unwrap_or_default();
            if is_missing(label.trim()) {
                filled_cells += 1;
                labels.push(FILLED_LABEL.to_string());
            } else {
                labels.push(label.to_string());
            }

            records.push(values);
        }

        if filled_cells > 0 {
            info!("Missing values detected. Handling missing values...");
            debug!("Filled {} missing cells with zero", filled_cells);
        }

        info!(
            "Loaded dataset: rows={}, features={}",
            records.len(),
            feature_names.len()
        );

        Ok(Self {
            feature_names,
            records,
            labels,
            filled_cells,
        })
    }

    /// Number of data rows
    pub fn n_rows(&self) -> usize {
        self.records.len()
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Dense matrix of the selected rows, in the given order
    pub fn matrix(&self, rows: &[usize]) -> Array2<f64> {
        let n_features = self.n_features();
        Array2::from_shape_fn((rows.len(), n_features), |(i, j)| self.records[rows[i]][j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
fever,cough,headache,prognosis
1,0,1,Flu
0,1,0,Common Cold
1,1,,Flu
";

    #[test]
    fn test_parse_sample() {
        let dataset = SymptomDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dataset.feature_names, vec!["fever", "cough", "headache"]);
        assert_eq!(dataset.n_rows(), 3);
        assert_eq!(dataset.records[2], vec![1.0, 1.0, 0.0]);
        assert_eq!(dataset.labels, vec!["Flu", "Common Cold", "Flu"]);
        assert_eq!(dataset.filled_cells, 1);
    }

    #[test]
    fn test_missing_label_becomes_zero() {
        let data = "a,b,label\n1,0,\n0,1,X\n";
        let dataset = SymptomDataset::from_reader(data.as_bytes()).unwrap();
        assert_eq!(dataset.labels, vec!["0", "X"]);
        assert_eq!(dataset.filled_cells, 1);
    }

    #[test]
    fn test_na_markers_filled() {
        for token in MISSING_TOKENS {
            let data = format!("a,b,label\n1,{},X\n0,1,{}\n", token, token);
            let dataset = SymptomDataset::from_reader(data.as_bytes()).unwrap();
            assert_eq!(dataset.records, vec![vec![1.0, 0.0], vec![0.0, 1.0]], "token: {}", token);
            assert_eq!(dataset.labels, vec!["X", "0"], "token: {}", token);
            assert_eq!(dataset.filled_cells, 2, "token: {}", token);
        }
    }

    #[test]
    fn test_non_finite_cells_rejected() {
        for token in ["NAN", "inf", "-infinity"] {
            let data = format!("a,label\n{},X\n", token);
            assert!(
                matches!(
                    SymptomDataset::from_reader(data.as_bytes()),
                    Err(TrainingError::InvalidCell { .. })
                ),
                "token: {}",
                token
            );
        }
    }

    #[test]
    fn test_single_column_rejected() {
        let data = "prognosis\nFlu\n";
        assert!(matches!(
            SymptomDataset::from_reader(data.as_bytes()),
            Err(TrainingError::NotEnoughColumns)
        ));
    }

    #[test]
    fn test_non_numeric_cell_rejected() {
        let data = "fever,prognosis\nyes,Flu\n";
        match SymptomDataset::from_reader(data.as_bytes()) {
            Err(TrainingError::InvalidCell { row, column, value }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "fever");
                assert_eq!(value, "yes");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = SymptomDataset::from_path("/definitely/not/here.csv").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Dataset file not found at /definitely/not/here.csv. Please ensure the file exists."
        );
    }

    #[test]
    fn test_matrix_selects_rows() {
        let dataset = SymptomDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let matrix = dataset.matrix(&[1, 0]);
        assert_eq!(matrix.dim(), (2, 3));
        assert_eq!(matrix[[0, 1]], 1.0);
        assert_eq!(matrix[[1, 0]], 1.0);
    }
}
