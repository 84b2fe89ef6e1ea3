//! Dataset loading using Polars

use crate::error::{PipelineError, PipelineResult};
use polars::prelude::*;
use std::path::Path;

/// Customer identifier column
pub const CUSTOMER_ID_COL: &str = "CustomerID";
/// Categorical gender column
pub const GENDER_COL: &str = "Gender";
/// Customer age column
pub const AGE_COL: &str = "Age";
/// Annual income column, in thousands of dollars
pub const INCOME_COL: &str = "Annual Income (k$)";
/// Spending score column, bounded 1-100
pub const SCORE_COL: &str = "Spending Score (1-100)";
/// Cluster label column appended by the pipeline
pub const CLUSTER_COL: &str = "Cluster";

/// Numeric columns fed to the model, in the fixed order the model was
/// trained with.
pub const FEATURE_COLS: [&str; 3] = [AGE_COL, INCOME_COL, SCORE_COL];

/// Load the customer dataset from a CSV file
///
/// # Arguments
/// * `path` - Path to the dataset CSV
///
/// # Returns
/// * A `DataFrame` with all required columns present
///
/// Fails with `NotFound` if the file is absent, and with `Parse` if the
/// content cannot be read into the expected columns. There is no
/// partial-load recovery.
pub fn load_customers(path: &Path) -> PipelineResult<DataFrame> {
    if !path.exists() {
        return Err(PipelineError::NotFound {
            path: path.display().to_string(),
        });
    }

    let df = CsvReader::from_path(path)
        .map_err(|e| PipelineError::Parse(e.to_string()))?
        .has_header(true)
        .finish()
        .map_err(|e| PipelineError::Parse(e.to_string()))?;

    let present = df.get_column_names();
    for required in [CUSTOMER_ID_COL, GENDER_COL, AGE_COL, INCOME_COL, SCORE_COL] {
        if !present.contains(&required) {
            return Err(PipelineError::Parse(format!(
                "dataset is missing required column `{}`",
                required
            )));
        }
    }

    if df.height() == 0 {
        return Err(PipelineError::Parse("dataset contains no rows".to_string()));
    }

    Ok(df)
}

/// Extract a column as `f64` values, rejecting nulls
pub fn numeric_column(df: &DataFrame, name: &str) -> PipelineResult<Vec<f64>> {
    let values: Vec<f64> = df
        .column(name)
        .map_err(|e| PipelineError::Parse(e.to_string()))?
        .cast(&DataType::Float64)
        .map_err(|e| PipelineError::Parse(e.to_string()))?
        .f64()
        .map_err(|e| PipelineError::Parse(e.to_string()))?
        .into_no_null_iter()
        .collect();

    if values.len() != df.height() {
        return Err(PipelineError::Parse(format!(
            "column `{}` contains null values",
            name
        )));
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "CustomerID,Gender,Age,Annual Income (k$),Spending Score (1-100)"
        )
        .unwrap();
        writeln!(file, "1,Male,19,15,39").unwrap();
        writeln!(file, "2,Male,21,15,81").unwrap();
        writeln!(file, "3,Female,20,16,6").unwrap();
        writeln!(file, "4,Female,23,16,77").unwrap();
        file
    }

    #[test]
    fn test_load_customers() {
        let file = create_test_csv();
        let df = load_customers(file.path()).unwrap();

        assert_eq!(df.height(), 4);
        assert!(df.get_column_names().contains(&GENDER_COL));
        assert!(df.get_column_names().contains(&INCOME_COL));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = load_customers(Path::new("no_such_dataset.csv"));
        assert!(matches!(result, Err(PipelineError::NotFound { .. })));
    }

    #[test]
    fn test_missing_column_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "CustomerID,Age").unwrap();
        writeln!(file, "1,19").unwrap();

        let result = load_customers(file.path());
        match result {
            Err(PipelineError::Parse(msg)) => assert!(msg.contains("Gender")),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_dataset_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "CustomerID,Gender,Age,Annual Income (k$),Spending Score (1-100)"
        )
        .unwrap();

        let result = load_customers(file.path());
        assert!(matches!(result, Err(PipelineError::Parse(_))));
    }

    #[test]
    fn test_numeric_column_extraction() {
        let file = create_test_csv();
        let df = load_customers(file.path()).unwrap();

        let ages = numeric_column(&df, AGE_COL).unwrap();
        assert_eq!(ages, vec![19.0, 21.0, 20.0, 23.0]);
    }
}
