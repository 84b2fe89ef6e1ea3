//! Categorical encoding and feature scaling

use crate::data::{numeric_column, FEATURE_COLS, GENDER_COL};
use crate::error::{PipelineError, PipelineResult};
use ndarray::Array2;
use polars::prelude::*;
use std::collections::BTreeSet;

const VARIANCE_EPS: f64 = 1e-10;

/// One-hot encode the gender column, dropping the first category in
/// sorted order. The indicator columns are appended to the frame; they
/// are intentionally NOT part of the feature matrix handed to the model,
/// which only sees the three numeric columns.
pub fn encode_gender(df: DataFrame) -> PipelineResult<DataFrame> {
    let categories: BTreeSet<String> = df
        .column(GENDER_COL)
        .map_err(|e| PipelineError::Parse(e.to_string()))?
        .utf8()
        .map_err(|e| PipelineError::Parse(e.to_string()))?
        .into_iter()
        .flatten()
        .map(str::to_owned)
        .collect();

    let mut lf = df.lazy();
    for category in categories.iter().skip(1) {
        let name = format!("{}_{}", GENDER_COL, category);
        lf = lf.with_column(
            col(GENDER_COL)
                .eq(lit(category.as_str()))
                .cast(DataType::UInt32)
                .alias(&name),
        );
    }

    lf.collect().map_err(|e| PipelineError::Parse(e.to_string()))
}

/// Per-column standardization to zero mean and unit variance.
///
/// Statistics are fit on the current dataset every run, not taken from
/// the trained model artifact. A zero-variance column transforms to 0.0.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

impl StandardScaler {
    /// Fit mean and population standard deviation per column
    pub fn fit(matrix: &Array2<f64>) -> Self {
        let n = matrix.nrows() as f64;
        let mut means = Vec::with_capacity(matrix.ncols());
        let mut stds = Vec::with_capacity(matrix.ncols());

        for column in matrix.columns() {
            let mean = column.sum() / n;
            let variance = column.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
            means.push(mean);
            stds.push(variance.sqrt());
        }

        Self { means, stds }
    }

    /// Transform a matrix using the fitted statistics
    pub fn transform(&self, matrix: &Array2<f64>) -> Array2<f64> {
        Array2::from_shape_fn(matrix.dim(), |(i, j)| {
            if self.stds[j] < VARIANCE_EPS {
                0.0
            } else {
                (matrix[[i, j]] - self.means[j]) / self.stds[j]
            }
        })
    }

    /// Fit and transform in one step
    pub fn fit_transform(matrix: &Array2<f64>) -> (Self, Array2<f64>) {
        let scaler = Self::fit(matrix);
        let scaled = scaler.transform(matrix);
        (scaler, scaled)
    }
}

/// Build the (n, 3) feature matrix from the numeric columns, in the
/// fixed order {Age, Annual Income (k$), Spending Score (1-100)}
pub fn feature_matrix(df: &DataFrame) -> PipelineResult<Array2<f64>> {
    let n_samples = df.height();

    let mut columns = Vec::with_capacity(FEATURE_COLS.len());
    for name in FEATURE_COLS {
        columns.push(numeric_column(df, name)?);
    }

    let mut data = Vec::with_capacity(n_samples * FEATURE_COLS.len());
    for i in 0..n_samples {
        for column in &columns {
            data.push(column[i]);
        }
    }

    Array2::from_shape_vec((n_samples, FEATURE_COLS.len()), data)
        .map_err(|e| PipelineError::Parse(e.to_string()))
}
