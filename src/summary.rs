//! Per-cluster aggregation and metric formatting

use crate::data::{AGE_COL, CLUSTER_COL, INCOME_COL, SCORE_COL};
use crate::error::{PipelineError, PipelineResult};
use polars::prelude::*;

/// Summary metrics over the rows of one cluster.
///
/// Means are `None` when the cluster has no rows; that case is rendered
/// as the literal `no data` rather than a NaN or zero.
#[derive(Debug, Clone)]
pub struct ClusterSummary {
    pub cluster: u32,
    pub count: usize,
    pub mean_age: Option<f64>,
    pub mean_income: Option<f64>,
    pub mean_score: Option<f64>,
}

impl ClusterSummary {
    /// Compute summary metrics over only the rows assigned to `cluster`
    pub fn compute(table: &DataFrame, cluster: u32) -> PipelineResult<Self> {
        let rows = filter_cluster(table, cluster)?;

        let mean_of = |name: &str| -> PipelineResult<Option<f64>> {
            Ok(rows
                .column(name)
                .map_err(|e| PipelineError::Parse(e.to_string()))?
                .mean())
        };

        Ok(Self {
            cluster,
            count: rows.height(),
            mean_age: mean_of(AGE_COL)?,
            mean_income: mean_of(INCOME_COL)?,
            mean_score: mean_of(SCORE_COL)?,
        })
    }

    /// Mean age, one decimal, e.g. `32.7 yrs`
    pub fn formatted_age(&self) -> String {
        match self.mean_age {
            Some(age) => format!("{:.1} yrs", age),
            None => "no data".to_string(),
        }
    }

    /// Mean annual income, two decimals, currency-formatted, e.g. `$86.54k`
    pub fn formatted_income(&self) -> String {
        match self.mean_income {
            Some(income) => format!("${:.2}k", income),
            None => "no data".to_string(),
        }
    }

    /// Mean spending score, one decimal
    pub fn formatted_score(&self) -> String {
        match self.mean_score {
            Some(score) => format!("{:.1}", score),
            None => "no data".to_string(),
        }
    }
}

/// Rows assigned to `cluster`, with the cluster column still attached
fn filter_cluster(table: &DataFrame, cluster: u32) -> PipelineResult<DataFrame> {
    table
        .clone()
        .lazy()
        .filter(col(CLUSTER_COL).eq(lit(cluster)))
        .collect()
        .map_err(|e| PipelineError::Parse(e.to_string()))
}

/// Tabular view of one cluster: matching rows with the cluster column
/// removed (the view is already scoped to a single cluster)
pub fn cluster_rows(table: &DataFrame, cluster: u32) -> PipelineResult<DataFrame> {
    let rows = filter_cluster(table, cluster)?;
    rows.drop(CLUSTER_COL)
        .map_err(|e| PipelineError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GENDER_COL;

    fn create_segmented_frame() -> DataFrame {
        df!(
            "CustomerID" => &[1i64, 2, 3, 4, 5],
            GENDER_COL => &["Male", "Female", "Female", "Male", "Female"],
            AGE_COL => &[20i64, 30, 40, 50, 60],
            INCOME_COL => &[15i64, 25, 35, 45, 55],
            SCORE_COL => &[10i64, 40, 60, 80, 90],
            CLUSTER_COL => &[0u32, 0, 1, 1, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_metrics_use_only_matching_rows() {
        let table = create_segmented_frame();
        let summary = ClusterSummary::compute(&table, 0).unwrap();

        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean_age, Some(25.0));
        assert_eq!(summary.mean_income, Some(20.0));
        assert_eq!(summary.mean_score, Some(25.0));
    }

    #[test]
    fn test_counts_partition_the_table() {
        let table = create_segmented_frame();
        let count_0 = ClusterSummary::compute(&table, 0).unwrap().count;
        let count_1 = ClusterSummary::compute(&table, 1).unwrap().count;

        assert_eq!(count_0 + count_1, table.height());
    }

    #[test]
    fn test_empty_cluster_policy() {
        let table = create_segmented_frame();
        let summary = ClusterSummary::compute(&table, 9).unwrap();

        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean_age, None);
        assert_eq!(summary.mean_income, None);
        assert_eq!(summary.mean_score, None);
        assert_eq!(summary.formatted_age(), "no data");
        assert_eq!(summary.formatted_income(), "no data");
        assert_eq!(summary.formatted_score(), "no data");
    }

    #[test]
    fn test_metric_formatting() {
        let summary = ClusterSummary {
            cluster: 2,
            count: 40,
            mean_age: Some(32.66),
            mean_income: Some(86.5),
            mean_score: Some(82.12),
        };

        assert_eq!(summary.formatted_age(), "32.7 yrs");
        assert_eq!(summary.formatted_income(), "$86.50k");
        assert_eq!(summary.formatted_score(), "82.1");
    }

    #[test]
    fn test_cluster_rows_drop_cluster_column() {
        let table = create_segmented_frame();
        let rows = cluster_rows(&table, 1).unwrap();

        assert_eq!(rows.height(), 3);
        assert!(!rows.get_column_names().contains(&CLUSTER_COL));
        assert!(rows.get_column_names().contains(&AGE_COL));
    }
}
